//! Entity gateway contract shared by the hosted API session and the local
//! SQLite store.

use crate::model::{AlumniProfile, EntityKind, EventDetails, NewsArticle, Record};
use async_trait::async_trait;
use serde_json::Value;
use std::fmt;

#[derive(thiserror::Error, Debug)]
pub enum GatewayError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{method} {url} failed with status {status}: {body}")]
    Status {
        method: String,
        url: String,
        status: u16,
        body: String,
    },
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("storage error: {0}")]
    Storage(#[from] sea_orm::DbErr),
    #[error("{kind} record `{id}` not found")]
    NotFound { kind: &'static str, id: String },
    #[error("unknown field `{0}`")]
    UnknownField(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Field name, `-` prefixed for descending order. Empty means unsorted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec(String);

impl SortSpec {
    pub fn new(spec: impl Into<String>) -> Self {
        Self(spec.into())
    }

    /// The sort every full load of `T` uses.
    pub fn default_for<T: EntityKind>() -> Self {
        Self::new(T::DEFAULT_SORT)
    }

    pub fn ascending(field: &str) -> Self {
        Self::new(field)
    }

    pub fn descending(field: &str) -> Self {
        Self::new(format!("-{}", field))
    }

    pub fn field(&self) -> Option<&str> {
        let f = self.0.strip_prefix('-').unwrap_or(&self.0).trim();
        if f.is_empty() {
            None
        } else {
            Some(f)
        }
    }

    pub fn is_descending(&self) -> bool {
        self.0.starts_with('-')
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compare {
    Eq,
    Gte,
}

/// One structured comparison understood by every gateway.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldPredicate {
    pub field: String,
    pub op: Compare,
    pub value: Value,
}

impl FieldPredicate {
    pub fn eq(field: &str, value: impl Into<Value>) -> Self {
        Self {
            field: field.to_string(),
            op: Compare::Eq,
            value: value.into(),
        }
    }

    pub fn gte(field: &str, value: impl Into<Value>) -> Self {
        Self {
            field: field.to_string(),
            op: Compare::Gte,
            value: value.into(),
        }
    }
}

/// Wire form of a predicate list: `{"field": value}` for equality,
/// `{"field": {"$gte": value}}` for lower bounds.
pub fn predicate_query(predicates: &[FieldPredicate]) -> Value {
    let mut q = serde_json::Map::new();
    for p in predicates {
        let v = match p.op {
            Compare::Eq => p.value.clone(),
            Compare::Gte => serde_json::json!({ "$gte": p.value }),
        };
        q.insert(p.field.clone(), v);
    }
    Value::Object(q)
}

/// CRUD over one record kind.
#[async_trait]
pub trait EntityGateway<T: EntityKind>: Send + Sync {
    async fn list(&self, sort: &SortSpec) -> Result<Vec<Record<T>>, GatewayError>;

    async fn filter(
        &self,
        predicates: &[FieldPredicate],
        sort: &SortSpec,
    ) -> Result<Vec<Record<T>>, GatewayError>;

    /// The gateway assigns `id` and `created_date`.
    async fn create(&self, data: &T) -> Result<Record<T>, GatewayError>;

    async fn update(&self, id: &str, data: &T) -> Result<Record<T>, GatewayError>;

    async fn delete(&self, id: &str) -> Result<(), GatewayError>;
}

#[async_trait]
pub trait FileUploader: Send + Sync {
    /// Stores the file and returns the URL it is served from.
    async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> Result<String, GatewayError>;
}

/// Everything the admin console talks to.
pub trait Gateway:
    EntityGateway<AlumniProfile>
    + EntityGateway<EventDetails>
    + EntityGateway<NewsArticle>
    + FileUploader
{
    fn describe(&self) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_spec_splits_direction_and_field() {
        let s = SortSpec::new("-created_date");
        assert_eq!(s.field(), Some("created_date"));
        assert!(s.is_descending());

        let s = SortSpec::default_for::<EventDetails>();
        assert_eq!(s.field(), Some("event_date"));
        assert!(!s.is_descending());

        assert_eq!(SortSpec::new("").field(), None);
        assert_eq!(SortSpec::descending("publish_date").as_str(), "-publish_date");
    }

    #[test]
    fn predicate_query_uses_gte_operator() {
        let q = predicate_query(&[
            FieldPredicate::gte("event_date", "2025-01-01"),
            FieldPredicate::eq("is_featured", true),
        ]);
        assert_eq!(
            q,
            serde_json::json!({
                "event_date": { "$gte": "2025-01-01" },
                "is_featured": true
            })
        );
    }
}
