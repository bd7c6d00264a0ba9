use log::{info, warn};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use std::time::Duration;

pub type ExpectedFn = Box<dyn Fn(&Response) -> bool + Send + Sync>;

/// Rate limits and server errors are worth another try; everything else is
/// final.
pub fn retryable_status(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

/// HTTP client that resends a request while the response is not "expected".
pub struct RetrySession {
    client: Client,
    expected: ExpectedFn,
    max_tries: usize,
    delay_unexpected: Duration,
}

impl RetrySession {
    /// # Arguments
    ///
    /// * `timeout` - per-request timeout
    /// * `expected` - decides whether a response ends the retry loop
    /// * `max_tries` - attempts per request, at least one
    /// * `delay_unexpected` - pause before resending
    pub fn new(
        timeout: Duration,
        expected: ExpectedFn,
        max_tries: usize,
        delay_unexpected: Duration,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: Client::builder()
                .timeout(timeout)
                .user_agent(concat!("alumni-admin/", env!("CARGO_PKG_VERSION")))
                .build()?,
            expected,
            max_tries: max_tries.max(1),
            delay_unexpected,
        })
    }

    /// Retries only on 429 and 5xx.
    pub fn with_default_policy(
        timeout: Duration,
        max_tries: usize,
        delay_unexpected: Duration,
    ) -> Result<Self, reqwest::Error> {
        Self::new(
            timeout,
            Box::new(|resp: &Response| !retryable_status(resp.status())),
            max_tries,
            delay_unexpected,
        )
    }

    /// Sends the request built by `builder` until it is expected or the
    /// tries run out, returning the last response either way.
    pub async fn request<F>(&self, builder: F) -> Result<Response, reqwest::Error>
    where
        F: Fn(&Client) -> RequestBuilder,
    {
        let mut try_num = 1;
        loop {
            let resp = builder(&self.client).send().await?;
            if (self.expected)(&resp) {
                info!("{} request(...) [{} tries]", self, try_num);
                return Ok(resp);
            }
            if try_num >= self.max_tries {
                warn!(
                    "{} request(...) [max {} tries ran out, status {}]",
                    self,
                    try_num,
                    resp.status()
                );
                return Ok(resp);
            }
            try_num += 1;
            tokio::time::sleep(self.delay_unexpected).await;
        }
    }
}

impl std::fmt::Display for RetrySession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<RetrySession [max_tries={}]>", self.max_tries)
    }
}

impl std::fmt::Debug for RetrySession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<RetrySession [max_tries={}]>", self.max_tries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_throttling_and_server_errors_retry() {
        assert!(retryable_status(StatusCode::TOO_MANY_REQUESTS));
        assert!(retryable_status(StatusCode::BAD_GATEWAY));
        assert!(!retryable_status(StatusCode::NOT_FOUND));
        assert!(!retryable_status(StatusCode::CREATED));
    }
}
