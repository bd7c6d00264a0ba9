//! Filter menu choices derived from the loaded collection.

use crate::model::{AlumniProfile, Record};
use std::cmp::Reverse;
use std::collections::BTreeSet;

fn distinct_text<'a>(values: impl Iterator<Item = Option<&'a str>>) -> Vec<String> {
    values
        .flatten()
        .filter(|v| !v.trim().is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Distinct graduation years, most recent first, as the text the year
/// predicate compares against.
pub fn graduation_year_options(rows: &[Record<AlumniProfile>]) -> Vec<String> {
    let years: BTreeSet<Reverse<i32>> = rows
        .iter()
        .filter_map(|r| r.data.graduation_year)
        .map(Reverse)
        .collect();
    years.into_iter().map(|Reverse(y)| y.to_string()).collect()
}

pub fn industry_options(rows: &[Record<AlumniProfile>]) -> Vec<String> {
    distinct_text(rows.iter().map(|r| r.data.industry.as_deref()))
}

pub fn location_options(rows: &[Record<AlumniProfile>]) -> Vec<String> {
    distinct_text(rows.iter().map(|r| r.data.location.as_deref()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alum(
        year: Option<i32>,
        industry: Option<&str>,
        location: Option<&str>,
    ) -> Record<AlumniProfile> {
        Record::new(
            "id",
            AlumniProfile {
                graduation_year: year,
                industry: industry.map(str::to_string),
                location: location.map(str::to_string),
                ..AlumniProfile::default()
            },
        )
    }

    #[test]
    fn years_are_distinct_and_descending() {
        let rows = vec![
            alum(Some(2015), None, None),
            alum(Some(2021), None, None),
            alum(None, None, None),
            alum(Some(2015), None, None),
        ];
        assert_eq!(graduation_year_options(&rows), vec!["2021", "2015"]);
    }

    #[test]
    fn text_options_skip_blanks_and_sort_ascending() {
        let rows = vec![
            alum(None, Some("Technology"), Some("Oslo")),
            alum(None, Some(""), Some("Berlin")),
            alum(None, Some("Finance"), None),
            alum(None, Some("Technology"), Some("  ")),
        ];
        assert_eq!(industry_options(&rows), vec!["Finance", "Technology"]);
        assert_eq!(location_options(&rows), vec!["Berlin", "Oslo"]);
    }

    #[test]
    fn empty_collection_has_no_options() {
        assert!(graduation_year_options(&[]).is_empty());
        assert!(industry_options(&[]).is_empty());
    }
}
