use super::edits::{self, Editable, FieldEdit, FieldError};
use super::lenient;
use super::record::{EntityKind, Record};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

pub type News = Record<NewsArticle>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NewsCategory {
    AlumniAchievement,
    CampusNews,
    EventRecap,
    CareerSpotlight,
    UniversityUpdate,
    Research,
    Other,
}

impl NewsCategory {
    pub const ALL: [NewsCategory; 7] = [
        NewsCategory::AlumniAchievement,
        NewsCategory::CampusNews,
        NewsCategory::EventRecap,
        NewsCategory::CareerSpotlight,
        NewsCategory::UniversityUpdate,
        NewsCategory::Research,
        NewsCategory::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            NewsCategory::AlumniAchievement => "Alumni Achievement",
            NewsCategory::CampusNews => "Campus News",
            NewsCategory::EventRecap => "Event Recap",
            NewsCategory::CareerSpotlight => "Career Spotlight",
            NewsCategory::UniversityUpdate => "University Update",
            NewsCategory::Research => "Research",
            NewsCategory::Other => "Other",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(s))
    }
}

impl From<String> for NewsCategory {
    fn from(s: String) -> Self {
        NewsCategory::parse(&s).unwrap_or(NewsCategory::Other)
    }
}

impl From<NewsCategory> for String {
    fn from(c: NewsCategory) -> Self {
        c.label().to_string()
    }
}

impl fmt::Display for NewsCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsArticle {
    #[serde(deserialize_with = "lenient::text")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub summary: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub content: Option<String>,
    #[serde(deserialize_with = "lenient::label")]
    pub category: Option<NewsCategory>,
    #[serde(deserialize_with = "lenient::text")]
    pub author: Option<String>,
    /// ISO `YYYY-MM-DD`.
    #[serde(deserialize_with = "lenient::text")]
    pub publish_date: Option<String>,
    #[serde(deserialize_with = "lenient::flag")]
    pub is_published: Option<bool>,
    #[serde(deserialize_with = "lenient::flag")]
    pub is_featured: Option<bool>,
    #[serde(deserialize_with = "lenient::text")]
    pub featured_image_url: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub external_url: Option<String>,
}

impl EntityKind for NewsArticle {
    const NAME: &'static str = "News";
    const DEFAULT_SORT: &'static str = "-publish_date";
}

impl NewsArticle {
    /// New articles are published on creation day unless edited otherwise.
    pub fn new_article(today: NaiveDate) -> Self {
        Self {
            publish_date: Some(today.format("%Y-%m-%d").to_string()),
            is_published: Some(true),
            is_featured: Some(false),
            ..Self::default()
        }
    }
}

impl Editable for NewsArticle {
    fn apply_edit(&mut self, edit: &FieldEdit) -> Result<(), FieldError> {
        match edit.key.as_str() {
            "title" => self.title = edits::text(edit)?,
            "summary" => self.summary = edits::text(edit)?,
            "content" => self.content = edits::text(edit)?,
            "category" => self.category = edits::choice(edit, NewsCategory::parse)?,
            "author" => self.author = edits::text(edit)?,
            "publish_date" | "date" => self.publish_date = edits::date(edit)?,
            "is_published" | "published" => self.is_published = edits::flag(edit)?,
            "is_featured" | "featured" => self.is_featured = edits::flag(edit)?,
            "featured_image_url" => self.featured_image_url = edits::text(edit)?,
            "external_url" => self.external_url = edits::text(edit)?,
            other => return Err(FieldError::UnknownField(other.to_string())),
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), FieldError> {
        edits::require(&self.title, "title")?;
        edits::require(&self.summary, "summary")?;
        edits::require(&self.content, "content")?;
        edits::require(&self.category, "category")?;
        edits::require(&self.author, "author")?;
        edits::require(&self.publish_date, "publish_date")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_article_defaults_to_published_today() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 9).unwrap();
        let a = NewsArticle::new_article(today);
        assert_eq!(a.publish_date.as_deref(), Some("2026-03-09"));
        assert_eq!(a.is_published, Some(true));
        assert_eq!(a.is_featured, Some(false));
    }

    #[test]
    fn category_labels_round_trip_and_unknown_is_other() {
        let a: NewsArticle =
            serde_json::from_str(r#"{"category":"Career Spotlight"}"#).unwrap();
        assert_eq!(a.category, Some(NewsCategory::CareerSpotlight));
        let a: NewsArticle = serde_json::from_str(r#"{"category":"Sports"}"#).unwrap();
        assert_eq!(a.category, Some(NewsCategory::Other));
    }

    #[test]
    fn edits_accept_category_case_insensitively() {
        let mut a = NewsArticle::default();
        a.apply_edit(&FieldEdit::set("category", "event recap"))
            .unwrap();
        assert_eq!(a.category, Some(NewsCategory::EventRecap));
        assert!(a.apply_edit(&FieldEdit::set("category", "gossip")).is_err());
    }
}
