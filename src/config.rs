use std::path::PathBuf;
use std::time::Duration;

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} has invalid value {value:?}")]
    Invalid { key: &'static str, value: String },
    #[error("ALUMNI_API_URL must be set when ALUMNI_GATEWAY=remote")]
    MissingApiUrl,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayMode {
    Remote,
    Local,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpSettings {
    pub api_url: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
    pub max_tries: usize,
    pub retry_delay: Duration,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub mode: GatewayMode,
    pub http: Option<HttpSettings>,
    pub database_url: String,
    pub upload_dir: PathBuf,
    pub log_dir: PathBuf,
}

const DEFAULT_DATABASE_URL: &str = "sqlite://alumni.db?mode=rwc";

impl AppConfig {
    /// Reads the process environment (after `.env` has been loaded).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| get(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let mode = match var("ALUMNI_GATEWAY").as_deref() {
            None | Some("local") => GatewayMode::Local,
            Some("remote") => GatewayMode::Remote,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    key: "ALUMNI_GATEWAY",
                    value: other.to_string(),
                })
            }
        };

        let http = match (&mode, var("ALUMNI_API_URL")) {
            (GatewayMode::Remote, None) => return Err(ConfigError::MissingApiUrl),
            (_, None) => None,
            (_, Some(url)) => {
                let timeout_secs: u64 = parse_or(&var, "ALUMNI_HTTP_TIMEOUT_SECS", 30)?;
                let max_tries: usize = parse_or(&var, "ALUMNI_HTTP_MAX_TRIES", 3)?;
                let delay_secs: f64 = parse_or(&var, "ALUMNI_HTTP_RETRY_DELAY_SECS", 2.0)?;
                if !delay_secs.is_finite() || delay_secs < 0.0 {
                    return Err(ConfigError::Invalid {
                        key: "ALUMNI_HTTP_RETRY_DELAY_SECS",
                        value: delay_secs.to_string(),
                    });
                }
                Some(HttpSettings {
                    api_url: url.trim_end_matches('/').to_string(),
                    api_key: var("ALUMNI_API_KEY"),
                    timeout: Duration::from_secs(timeout_secs),
                    max_tries: max_tries.max(1),
                    retry_delay: Duration::from_secs_f64(delay_secs),
                })
            }
        };

        Ok(Self {
            mode,
            http,
            database_url: var("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            upload_dir: PathBuf::from(var("ALUMNI_UPLOAD_DIR").unwrap_or_else(|| "uploads".into())),
            log_dir: PathBuf::from(var("ALUMNI_LOG_DIR").unwrap_or_else(|| "logs".into())),
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    var: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match var(key) {
        None => Ok(default),
        Some(v) => v.parse().map_err(|_| ConfigError::Invalid { key, value: v }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|k| env.get(k).cloned())
    }

    #[test]
    fn empty_environment_uses_local_defaults() {
        let c = config(&[]).unwrap();
        assert_eq!(c.mode, GatewayMode::Local);
        assert!(c.http.is_none());
        assert_eq!(c.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(c.upload_dir, PathBuf::from("uploads"));
        assert_eq!(c.log_dir, PathBuf::from("logs"));
    }

    #[test]
    fn remote_requires_an_api_url() {
        assert_eq!(
            config(&[("ALUMNI_GATEWAY", "remote")]),
            Err(ConfigError::MissingApiUrl)
        );
        let c = config(&[
            ("ALUMNI_GATEWAY", "remote"),
            ("ALUMNI_API_URL", "https://api.example.org/v1/"),
            ("ALUMNI_HTTP_MAX_TRIES", "5"),
        ])
        .unwrap();
        let http = c.http.unwrap();
        assert_eq!(http.api_url, "https://api.example.org/v1");
        assert_eq!(http.max_tries, 5);
        assert_eq!(http.timeout, Duration::from_secs(30));
        assert_eq!(http.retry_delay, Duration::from_secs(2));
        assert_eq!(http.api_key, None);
    }

    #[test]
    fn bad_values_are_reported_with_their_key() {
        assert_eq!(
            config(&[("ALUMNI_GATEWAY", "cloud")]),
            Err(ConfigError::Invalid {
                key: "ALUMNI_GATEWAY",
                value: "cloud".into()
            })
        );
        let err = config(&[
            ("ALUMNI_API_URL", "http://x"),
            ("ALUMNI_HTTP_TIMEOUT_SECS", "soon"),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                key: "ALUMNI_HTTP_TIMEOUT_SECS",
                value: "soon".into()
            }
        );
    }
}
