//! Record shapes for the three managed collections.
//!
//! Everything coming back from the entity gateway may omit any field, so the
//! per-kind field sets keep every value optional and the query layer treats
//! an absent value as "does not match".

pub mod alumni;
pub mod edits;
pub mod lenient;
pub mod event;
pub mod news;
pub mod record;

pub use alumni::{ActiveStatus, Alumni, AlumniProfile, Industry};
pub use edits::{EditOp, Editable, FieldEdit, FieldError};
pub use event::{Event, EventDetails, EventType};
pub use news::{News, NewsArticle, NewsCategory};
pub use record::{EntityKind, Record, RecordId};
