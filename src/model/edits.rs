use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;

/// How a `key<op>value` pair changes a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOp {
    Set,
    Add,
    Remove,
}

/// One `key=value`, `key+=value` or `key-=value` pair from a command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldEdit {
    pub key: String,
    pub op: EditOp,
    pub value: String,
}

impl FieldEdit {
    pub fn set(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            op: EditOp::Set,
            value: value.into(),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("unknown field `{0}`")]
    UnknownField(String),
    #[error("invalid value for `{field}`: {value:?}")]
    InvalidValue { field: String, value: String },
    #[error("missing required field `{0}`")]
    MissingRequired(&'static str),
    #[error("`{0}` only supports `=`")]
    UnsupportedOp(String),
    #[error("tags cannot be blank")]
    BlankTag,
    #[error("malformed field argument: {0}")]
    Malformed(String),
}

/// A field set that can be edited from command arguments.
pub trait Editable {
    fn apply_edit(&mut self, edit: &FieldEdit) -> Result<(), FieldError>;

    /// Checks the fields the create/edit forms mark as required.
    fn validate(&self) -> Result<(), FieldError>;

    fn apply_edits(&mut self, edits: &[FieldEdit]) -> Result<(), FieldError> {
        for edit in edits {
            self.apply_edit(edit)?;
        }
        self.validate()
    }
}

fn invalid(edit: &FieldEdit) -> FieldError {
    FieldError::InvalidValue {
        field: edit.key.clone(),
        value: edit.value.clone(),
    }
}

pub(crate) fn only_set(edit: &FieldEdit) -> Result<(), FieldError> {
    if edit.op == EditOp::Set {
        Ok(())
    } else {
        Err(FieldError::UnsupportedOp(edit.key.clone()))
    }
}

/// Plain text; an empty value clears the field.
pub(crate) fn text(edit: &FieldEdit) -> Result<Option<String>, FieldError> {
    only_set(edit)?;
    let v = edit.value.trim();
    Ok(if v.is_empty() { None } else { Some(v.to_string()) })
}

pub(crate) fn flag(edit: &FieldEdit) -> Result<Option<bool>, FieldError> {
    only_set(edit)?;
    match edit.value.trim().to_ascii_lowercase().as_str() {
        "" => Ok(None),
        "1" | "true" | "yes" | "y" | "on" => Ok(Some(true)),
        "0" | "false" | "no" | "n" | "off" => Ok(Some(false)),
        _ => Err(invalid(edit)),
    }
}

pub(crate) fn year(edit: &FieldEdit) -> Result<Option<i32>, FieldError> {
    only_set(edit)?;
    let v = edit.value.trim();
    if v.is_empty() {
        return Ok(None);
    }
    v.parse::<i32>().map(Some).map_err(|_| invalid(edit))
}

pub(crate) fn positive(edit: &FieldEdit) -> Result<Option<u32>, FieldError> {
    only_set(edit)?;
    let v = edit.value.trim();
    if v.is_empty() {
        return Ok(None);
    }
    match v.parse::<u32>() {
        Ok(n) if n > 0 => Ok(Some(n)),
        _ => Err(invalid(edit)),
    }
}

fn date_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("static date pattern"))
}

fn time_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([01]\d|2[0-3]):[0-5]\d$").expect("static time pattern"))
}

/// ISO `YYYY-MM-DD`, the only form that sorts lexicographically by date.
pub(crate) fn date(edit: &FieldEdit) -> Result<Option<String>, FieldError> {
    let Some(v) = text(edit)? else {
        return Ok(None);
    };
    if date_re().is_match(&v) && NaiveDate::parse_from_str(&v, "%Y-%m-%d").is_ok() {
        Ok(Some(v))
    } else {
        Err(invalid(edit))
    }
}

/// `HH:MM`, 24-hour clock.
pub(crate) fn time_of_day(edit: &FieldEdit) -> Result<Option<String>, FieldError> {
    let Some(v) = text(edit)? else {
        return Ok(None);
    };
    if time_re().is_match(&v) {
        Ok(Some(v))
    } else {
        Err(invalid(edit))
    }
}

/// Maps a label through `parse`; an empty value clears the field.
pub(crate) fn choice<T>(
    edit: &FieldEdit,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<Option<T>, FieldError> {
    let Some(v) = text(edit)? else {
        return Ok(None);
    };
    parse(&v).map(Some).ok_or_else(|| invalid(edit))
}

pub(crate) fn require<T>(value: &Option<T>, field: &'static str) -> Result<(), FieldError> {
    if value.is_some() {
        Ok(())
    } else {
        Err(FieldError::MissingRequired(field))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_accepts_common_spellings() {
        assert_eq!(flag(&FieldEdit::set("x", "Yes")), Ok(Some(true)));
        assert_eq!(flag(&FieldEdit::set("x", "off")), Ok(Some(false)));
        assert_eq!(flag(&FieldEdit::set("x", "")), Ok(None));
        assert!(flag(&FieldEdit::set("x", "maybe")).is_err());
    }

    #[test]
    fn date_must_be_a_real_iso_day() {
        assert_eq!(
            date(&FieldEdit::set("d", "2025-02-28")),
            Ok(Some("2025-02-28".to_string()))
        );
        assert!(date(&FieldEdit::set("d", "2025-02-30")).is_err());
        assert!(date(&FieldEdit::set("d", "28/02/2025")).is_err());
    }

    #[test]
    fn positive_rejects_zero() {
        assert!(positive(&FieldEdit::set("n", "0")).is_err());
        assert_eq!(positive(&FieldEdit::set("n", "40")), Ok(Some(40)));
    }

    #[test]
    fn add_op_is_rejected_on_scalar_fields() {
        let edit = FieldEdit {
            key: "title".into(),
            op: EditOp::Add,
            value: "x".into(),
        };
        assert_eq!(text(&edit), Err(FieldError::UnsupportedOp("title".into())));
    }
}
