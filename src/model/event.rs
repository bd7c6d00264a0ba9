use super::edits::{self, Editable, FieldEdit, FieldError};
use super::lenient;
use super::record::{EntityKind, Record};
use serde::{Deserialize, Serialize};
use std::fmt;

pub type Event = Record<EventDetails>;

/// Event categories. Labels the UI does not know deserialize as `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventType {
    Reunion,
    Networking,
    Workshop,
    Webinar,
    Social,
    Career,
    Fundraising,
    Other,
}

impl EventType {
    pub const ALL: [EventType; 8] = [
        EventType::Reunion,
        EventType::Networking,
        EventType::Workshop,
        EventType::Webinar,
        EventType::Social,
        EventType::Career,
        EventType::Fundraising,
        EventType::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            EventType::Reunion => "Reunion",
            EventType::Networking => "Networking",
            EventType::Workshop => "Workshop",
            EventType::Webinar => "Webinar",
            EventType::Social => "Social",
            EventType::Career => "Career",
            EventType::Fundraising => "Fundraising",
            EventType::Other => "Other",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.label().eq_ignore_ascii_case(s))
    }
}

impl From<String> for EventType {
    fn from(s: String) -> Self {
        EventType::parse(&s).unwrap_or(EventType::Other)
    }
}

impl From<EventType> for String {
    fn from(t: EventType) -> Self {
        t.label().to_string()
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EventDetails {
    #[serde(deserialize_with = "lenient::text")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub description: Option<String>,
    /// ISO `YYYY-MM-DD`.
    #[serde(deserialize_with = "lenient::text")]
    pub event_date: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub start_time: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub end_time: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub location: Option<String>,
    #[serde(deserialize_with = "lenient::label")]
    pub event_type: Option<EventType>,
    #[serde(deserialize_with = "lenient::flag")]
    pub registration_required: Option<bool>,
    #[serde(deserialize_with = "lenient::count")]
    pub max_attendees: Option<u32>,
    #[serde(deserialize_with = "lenient::text")]
    pub registration_deadline: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub registration_url: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub contact_email: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub image_url: Option<String>,
    #[serde(deserialize_with = "lenient::flag")]
    pub is_featured: Option<bool>,
}

impl EntityKind for EventDetails {
    const NAME: &'static str = "Event";
    const DEFAULT_SORT: &'static str = "event_date";
}

impl EventDetails {
    pub fn new_event() -> Self {
        Self {
            registration_required: Some(false),
            is_featured: Some(false),
            ..Self::default()
        }
    }
}

impl Editable for EventDetails {
    fn apply_edit(&mut self, edit: &FieldEdit) -> Result<(), FieldError> {
        match edit.key.as_str() {
            "title" => self.title = edits::text(edit)?,
            "description" => self.description = edits::text(edit)?,
            "event_date" | "date" => self.event_date = edits::date(edit)?,
            "start_time" => self.start_time = edits::time_of_day(edit)?,
            "end_time" => self.end_time = edits::time_of_day(edit)?,
            "location" => self.location = edits::text(edit)?,
            "event_type" | "type" => self.event_type = edits::choice(edit, EventType::parse)?,
            "registration_required" => self.registration_required = edits::flag(edit)?,
            "max_attendees" => self.max_attendees = edits::positive(edit)?,
            "registration_deadline" => self.registration_deadline = edits::date(edit)?,
            "registration_url" => self.registration_url = edits::text(edit)?,
            "contact_email" => self.contact_email = edits::text(edit)?,
            "image_url" => self.image_url = edits::text(edit)?,
            "is_featured" | "featured" => self.is_featured = edits::flag(edit)?,
            other => return Err(FieldError::UnknownField(other.to_string())),
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), FieldError> {
        edits::require(&self.title, "title")?;
        edits::require(&self.description, "description")?;
        edits::require(&self.event_date, "event_date")?;
        edits::require(&self.location, "location")?;
        edits::require(&self.event_type, "event_type")
    }
}
