//! Field decoders that never fail.
//!
//! Records come from a schemaless store, so any field may hold `null` or a
//! value of the wrong type. A bad value decodes as absent instead of
//! rejecting the whole collection.

use super::alumni::ActiveStatus;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

fn raw<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Value>, D::Error> {
    Option::<Value>::deserialize(d)
}

/// Strings as-is; numbers and booleans by their text.
pub fn text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(match raw(d)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

fn integer(v: Option<Value>) -> Option<i64> {
    match v? {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Integers, whole floats and numeric strings such as `"2020"`.
pub fn year<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i32>, D::Error> {
    Ok(integer(raw(d)?).and_then(|n| i32::try_from(n).ok()))
}

pub fn count<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u32>, D::Error> {
    Ok(integer(raw(d)?).and_then(|n| u32::try_from(n).ok()))
}

/// Booleans, plus the `"true"` / `"false"` strings some clients send.
pub fn flag<'de, D: Deserializer<'de>>(d: D) -> Result<Option<bool>, D::Error> {
    Ok(match raw(d)? {
        Some(Value::Bool(b)) => Some(b),
        Some(Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        },
        _ => None,
    })
}

pub fn active<'de, D: Deserializer<'de>>(d: D) -> Result<ActiveStatus, D::Error> {
    flag(d).map(ActiveStatus::from)
}

/// Enumerated labels; anything that is not a string is absent.
pub fn label<'de, D, T>(d: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: From<String>,
{
    Ok(match raw(d)? {
        Some(Value::String(s)) => Some(T::from(s)),
        _ => None,
    })
}

/// Keeps the string entries of an array; `null` or a non-array is empty.
pub fn string_list<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
    Ok(match raw(d)? {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|v| match v {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use crate::model::{Alumni, AlumniProfile, Event, EventType, News, NewsCategory};

    #[test]
    fn one_malformed_alumnus_does_not_sink_the_collection() {
        let rows: Vec<Alumni> = serde_json::from_str(
            r#"[{"id":"a","tags":["x"]},{"id":"b","tags":null},{"id":"c","tags":"x"}]"#,
        )
        .unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].data.tags, vec!["x".to_string()]);
        assert!(rows[1].data.tags.is_empty());
        assert!(rows[2].data.tags.is_empty());
    }

    #[test]
    fn graduation_year_accepts_numeric_text() {
        let rows: Vec<Alumni> = serde_json::from_str(
            r#"[{"id":"a","graduation_year":"2020"},{"id":"b","graduation_year":"soon"},
                {"id":"c","graduation_year":2019.0},{"id":"d","graduation_year":{}}]"#,
        )
        .unwrap();
        let years: Vec<_> = rows.iter().map(|r| r.data.graduation_year).collect();
        assert_eq!(years, vec![Some(2020), None, Some(2019), None]);
    }

    #[test]
    fn wrong_typed_text_and_flags_become_absent_or_text() {
        let p: AlumniProfile =
            serde_json::from_str(r#"{"first_name":7,"location":["x"],"is_active":"false"}"#)
                .unwrap();
        assert_eq!(p.first_name.as_deref(), Some("7"));
        assert_eq!(p.location, None);
        assert!(!p.is_active.counts_as_active());

        let p: AlumniProfile = serde_json::from_str(r#"{"is_active":"maybe"}"#).unwrap();
        assert!(p.is_active.counts_as_active());
    }

    #[test]
    fn event_fields_decode_leniently() {
        let rows: Vec<Event> = serde_json::from_str(
            r#"[{"id":"e","max_attendees":"50","registration_required":"true",
                 "is_featured":null,"event_type":3},
                {"id":"f","max_attendees":-2,"registration_required":1,"event_type":"Gala"}]"#,
        )
        .unwrap();
        assert_eq!(rows[0].data.max_attendees, Some(50));
        assert_eq!(rows[0].data.registration_required, Some(true));
        assert_eq!(rows[0].data.is_featured, None);
        assert_eq!(rows[0].data.event_type, None);
        assert_eq!(rows[1].data.max_attendees, None);
        assert_eq!(rows[1].data.registration_required, None);
        assert_eq!(rows[1].data.event_type, Some(EventType::Other));
    }

    #[test]
    fn news_flags_decode_leniently() {
        let rows: Vec<News> = serde_json::from_str(
            r#"[{"id":"n","is_published":"yes","is_featured":true,"category":null,
                 "publish_date":20250101}]"#,
        )
        .unwrap();
        let a = &rows[0].data;
        assert_eq!(a.is_published, None);
        assert_eq!(a.is_featured, Some(true));
        assert_eq!(a.category, None::<NewsCategory>);
        assert_eq!(a.publish_date.as_deref(), Some("20250101"));
    }
}
