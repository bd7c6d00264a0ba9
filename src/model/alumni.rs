use super::edits::{self, EditOp, Editable, FieldEdit, FieldError};
use super::lenient;
use super::record::{EntityKind, Record};
use serde::{Deserialize, Serialize};
use std::fmt;

pub type Alumni = Record<AlumniProfile>;

/// Whether a profile is active, exactly as the gateway reported it.
///
/// Older records were created before the flag existed, so absence is its own
/// state. Use [`ActiveStatus::counts_as_active`] whenever a yes/no is needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<bool>", into = "Option<bool>")]
pub enum ActiveStatus {
    Active,
    Inactive,
    #[default]
    Unspecified,
}

impl ActiveStatus {
    /// Only an explicit `false` makes a profile inactive.
    pub fn counts_as_active(self) -> bool {
        !matches!(self, ActiveStatus::Inactive)
    }

    pub fn is_unspecified(&self) -> bool {
        matches!(self, ActiveStatus::Unspecified)
    }
}

impl From<Option<bool>> for ActiveStatus {
    fn from(v: Option<bool>) -> Self {
        match v {
            Some(true) => ActiveStatus::Active,
            Some(false) => ActiveStatus::Inactive,
            None => ActiveStatus::Unspecified,
        }
    }
}

impl From<ActiveStatus> for Option<bool> {
    fn from(v: ActiveStatus) -> Self {
        match v {
            ActiveStatus::Active => Some(true),
            ActiveStatus::Inactive => Some(false),
            ActiveStatus::Unspecified => None,
        }
    }
}

/// Industries offered by the profile form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Industry {
    Technology,
    Healthcare,
    Finance,
    Education,
    Government,
    NonProfit,
    Consulting,
    Manufacturing,
    RealEstate,
    Legal,
    Media,
    Retail,
    Other,
}

impl Industry {
    pub const ALL: [Industry; 13] = [
        Industry::Technology,
        Industry::Healthcare,
        Industry::Finance,
        Industry::Education,
        Industry::Government,
        Industry::NonProfit,
        Industry::Consulting,
        Industry::Manufacturing,
        Industry::RealEstate,
        Industry::Legal,
        Industry::Media,
        Industry::Retail,
        Industry::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Industry::Technology => "Technology",
            Industry::Healthcare => "Healthcare",
            Industry::Finance => "Finance",
            Industry::Education => "Education",
            Industry::Government => "Government",
            Industry::NonProfit => "Non-Profit",
            Industry::Consulting => "Consulting",
            Industry::Manufacturing => "Manufacturing",
            Industry::RealEstate => "Real Estate",
            Industry::Legal => "Legal",
            Industry::Media => "Media",
            Industry::Retail => "Retail",
            Industry::Other => "Other",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|i| i.label().eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for Industry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Alumni profile fields.
///
/// `industry` stays the raw label the gateway returned so that grouping and
/// filter options only ever show values that exist in the data.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AlumniProfile {
    #[serde(deserialize_with = "lenient::text")]
    pub first_name: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub last_name: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub email: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub phone: Option<String>,
    #[serde(deserialize_with = "lenient::year")]
    pub graduation_year: Option<i32>,
    #[serde(deserialize_with = "lenient::text")]
    pub degree: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub major: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub current_company: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub current_position: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub industry: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub location: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub bio: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub linkedin_url: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub profile_photo_url: Option<String>,
    #[serde(deserialize_with = "lenient::string_list")]
    pub tags: Vec<String>,
    #[serde(
        deserialize_with = "lenient::active",
        skip_serializing_if = "ActiveStatus::is_unspecified"
    )]
    pub is_active: ActiveStatus,
}

impl EntityKind for AlumniProfile {
    const NAME: &'static str = "Alumni";
    const DEFAULT_SORT: &'static str = "-created_date";
}

impl AlumniProfile {
    /// Blank profile as the "add alumni" form starts it.
    pub fn new_profile() -> Self {
        Self {
            is_active: ActiveStatus::Active,
            ..Self::default()
        }
    }

    /// `"{first} {last}"`, the string the directory search runs against.
    pub fn search_name(&self) -> String {
        format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or_default(),
            self.last_name.as_deref().unwrap_or_default()
        )
    }

    pub fn display_name(&self) -> String {
        let name = self.search_name();
        let name = name.trim();
        if name.is_empty() {
            "(unnamed)".to_string()
        } else {
            name.to_string()
        }
    }

    /// Adds a trimmed tag unless it is already present. Returns whether the
    /// list changed.
    pub fn add_tag(&mut self, tag: &str) -> Result<bool, FieldError> {
        let tag = tag.trim();
        if tag.is_empty() {
            return Err(FieldError::BlankTag);
        }
        if self.tags.iter().any(|t| t == tag) {
            return Ok(false);
        }
        self.tags.push(tag.to_string());
        Ok(true)
    }

    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let tag = tag.trim();
        let before = self.tags.len();
        self.tags.retain(|t| t != tag);
        self.tags.len() != before
    }

    /// Replaces the tag list from a comma separated value, keeping first
    /// occurrences only.
    pub fn set_tags(&mut self, raw: &str) -> Result<(), FieldError> {
        self.tags.clear();
        for tag in raw.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            self.add_tag(tag)?;
        }
        Ok(())
    }
}

impl Editable for AlumniProfile {
    fn apply_edit(&mut self, edit: &FieldEdit) -> Result<(), FieldError> {
        match edit.key.as_str() {
            "first_name" => self.first_name = edits::text(edit)?,
            "last_name" => self.last_name = edits::text(edit)?,
            "email" => self.email = edits::text(edit)?,
            "phone" => self.phone = edits::text(edit)?,
            "graduation_year" => self.graduation_year = edits::year(edit)?,
            "degree" => self.degree = edits::text(edit)?,
            "major" => self.major = edits::text(edit)?,
            "current_company" | "company" => self.current_company = edits::text(edit)?,
            "current_position" | "position" => self.current_position = edits::text(edit)?,
            "industry" => {
                self.industry =
                    edits::choice(edit, |s| Industry::parse(s).map(|i| i.label().to_string()))?
            }
            "location" => self.location = edits::text(edit)?,
            "bio" => self.bio = edits::text(edit)?,
            "linkedin_url" => self.linkedin_url = edits::text(edit)?,
            "profile_photo_url" => self.profile_photo_url = edits::text(edit)?,
            "is_active" => self.is_active = edits::flag(edit)?.into(),
            "tags" => match edit.op {
                EditOp::Set => self.set_tags(&edit.value)?,
                EditOp::Add => {
                    self.add_tag(&edit.value)?;
                }
                EditOp::Remove => {
                    self.remove_tag(&edit.value);
                }
            },
            other => return Err(FieldError::UnknownField(other.to_string())),
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), FieldError> {
        edits::require(&self.first_name, "first_name")?;
        edits::require(&self.last_name, "last_name")?;
        edits::require(&self.email, "email")?;
        edits::require(&self.graduation_year, "graduation_year")?;
        edits::require(&self.degree, "degree")
    }
}
