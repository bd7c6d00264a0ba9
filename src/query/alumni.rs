use super::selection::{contains_ci, Selection};
use super::{QueryContext, RecordFilter};
use crate::model::AlumniProfile;

/// Predicates of the alumni directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlumniFilter {
    /// Name, company or major.
    pub search: Selection<String>,
    pub graduation_year: Selection<String>,
    pub industry: Selection<String>,
    /// Case-insensitive substring of the location.
    pub location: Selection<String>,
}

impl AlumniFilter {
    pub fn is_empty(&self) -> bool {
        self.search.is_any()
            && self.graduation_year.is_any()
            && self.industry.is_any()
            && self.location.is_any()
    }
}

impl RecordFilter<AlumniProfile> for AlumniFilter {
    fn matches(&self, p: &AlumniProfile, _ctx: &QueryContext) -> bool {
        self.search.admits(|term| {
            contains_ci(&p.search_name(), term)
                || p.current_company
                    .as_deref()
                    .is_some_and(|c| contains_ci(c, term))
                || p.major.as_deref().is_some_and(|m| contains_ci(m, term))
        }) && self.graduation_year.admits(|year| {
            p.graduation_year
                .is_some_and(|y| y.to_string() == *year)
        }) && self
            .industry
            .admits(|ind| p.industry.as_deref() == Some(ind.as_str()))
            && self.location.admits(|loc| {
                p.location.as_deref().is_some_and(|l| contains_ci(l, loc))
            })
    }
}
