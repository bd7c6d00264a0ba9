use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub type RecordId = String;

/// A stored record: gateway-owned metadata plus the kind's field set.
///
/// `id` is assigned by the gateway at creation and never changes. The field
/// set is flattened so the wire shape is a single flat JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record<T> {
    pub id: RecordId,
    #[serde(
        default,
        deserialize_with = "super::lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_date: Option<String>,
    #[serde(
        default,
        deserialize_with = "super::lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_date: Option<String>,
    #[serde(flatten)]
    pub data: T,
}

impl<T> Record<T> {
    pub fn new(id: impl Into<RecordId>, data: T) -> Self {
        Self {
            id: id.into(),
            created_date: None,
            updated_date: None,
            data,
        }
    }
}

/// A field set that the gateway stores as its own collection.
pub trait EntityKind:
    Serialize + DeserializeOwned + Clone + Default + Send + Sync + 'static
{
    /// Collection name on the hosted entity API.
    const NAME: &'static str;
    /// Sort spec used for every full view load.
    const DEFAULT_SORT: &'static str;
}
