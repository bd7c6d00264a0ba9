//! In-memory query engine over loaded collections.
//!
//! Filtering is a pure function of the collection, the filter state and the
//! injected [`QueryContext`]. It never reorders: the gateway's sort order is
//! what the views show.

pub mod alumni;
pub mod dashboard;
pub mod events;
pub mod news;
pub mod options;
pub mod selection;

use crate::model::Record;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};

pub use alumni::AlumniFilter;
pub use dashboard::{DashboardSnapshot, DashboardStats, IndustryBreakdown, IndustryShare};
pub use events::{EventFilter, TimeWindow};
pub use news::{NewsFilter, NewsTab};
pub use selection::{Flag, Selection};

/// Values the engine needs from outside the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryContext {
    pub today: NaiveDate,
}

impl QueryContext {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    /// "Today" is the UTC calendar date, the same day the hosted API stamps
    /// on records. Near midnight it can differ from the local date.
    pub fn utc() -> Self {
        Self::at(Utc::now())
    }

    pub fn at<Tz: TimeZone>(now: DateTime<Tz>) -> Self {
        Self::new(now.with_timezone(&Utc).date_naive())
    }

    pub fn today_iso(&self) -> String {
        self.today.format("%Y-%m-%d").to_string()
    }
}

/// Per-kind predicate set. A record is kept when every active predicate
/// admits it.
pub trait RecordFilter<T> {
    fn matches(&self, data: &T, ctx: &QueryContext) -> bool;
}

pub fn filter_records<'a, T, F>(
    records: &'a [Record<T>],
    filter: &F,
    ctx: &QueryContext,
) -> Vec<&'a Record<T>>
where
    F: RecordFilter<T>,
{
    records
        .iter()
        .filter(|r| filter.matches(&r.data, ctx))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn today_is_the_utc_date() {
        let new_york = FixedOffset::west_opt(5 * 3600).unwrap();
        let late_evening = new_york.with_ymd_and_hms(2025, 1, 1, 21, 30, 0).unwrap();
        assert_eq!(QueryContext::at(late_evening).today_iso(), "2025-01-02");

        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
        let early_morning = tokyo.with_ymd_and_hms(2025, 1, 2, 7, 0, 0).unwrap();
        assert_eq!(QueryContext::at(early_morning).today_iso(), "2025-01-01");
    }
}
