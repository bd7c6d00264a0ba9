use super::QueryContext;
use crate::model::{Alumni, AlumniProfile, Event, EventDetails, News, Record};
use std::collections::HashMap;

pub const TOP_INDUSTRIES: usize = 6;
pub const RECENT_ALUMNI: usize = 5;
pub const UPCOMING_EVENTS: usize = 4;
pub const RECENT_NEWS: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndustryShare {
    pub industry: String,
    pub count: usize,
    /// Whole-number percentage of the kept groups' combined count.
    pub percent: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndustryBreakdown {
    /// Alumni in the kept groups; the percentage denominator.
    pub total_categorized: usize,
    pub shares: Vec<IndustryShare>,
}

impl IndustryBreakdown {
    /// Groups by industry, largest first, keeping the top `limit`. Equal
    /// counts stay in the order the industry was first seen. Shares are
    /// relative to the kept groups only.
    pub fn compute(alumni: &[Record<AlumniProfile>], limit: usize) -> Self {
        let mut groups: Vec<(&str, usize)> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();
        for industry in alumni
            .iter()
            .filter_map(|a| a.data.industry.as_deref())
            .filter(|i| !i.trim().is_empty())
        {
            match index.get(industry) {
                Some(&i) => groups[i].1 += 1,
                None => {
                    index.insert(industry, groups.len());
                    groups.push((industry, 1));
                }
            }
        }

        groups.sort_by(|a, b| b.1.cmp(&a.1));
        groups.truncate(limit);
        let total_categorized: usize = groups.iter().map(|(_, n)| n).sum();
        let shares = groups
            .into_iter()
            .map(|(industry, count)| IndustryShare {
                industry: industry.to_string(),
                count,
                percent: share_percent(count, total_categorized),
            })
            .collect();

        Self {
            total_categorized,
            shares,
        }
    }
}

/// `round(100 * count / total)`; an empty denominator is 0%.
pub fn share_percent(count: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (100.0 * count as f64 / total as f64).round() as u32
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardStats {
    pub total_alumni: usize,
    pub active_alumni: usize,
    pub upcoming_events: usize,
    pub industries: IndustryBreakdown,
}

impl DashboardStats {
    /// Summary over the unfiltered collections.
    pub fn compute(
        alumni: &[Record<AlumniProfile>],
        events: &[Record<EventDetails>],
        ctx: &QueryContext,
    ) -> Self {
        let today = ctx.today_iso();
        Self {
            total_alumni: alumni.len(),
            active_alumni: alumni
                .iter()
                .filter(|a| a.data.is_active.counts_as_active())
                .count(),
            upcoming_events: events
                .iter()
                .filter(|e| {
                    e.data
                        .event_date
                        .as_deref()
                        .is_some_and(|d| d >= today.as_str())
                })
                .count(),
            industries: IndustryBreakdown::compute(alumni, TOP_INDUSTRIES),
        }
    }
}

/// Everything the dashboard screen shows.
#[derive(Debug, Clone, Default)]
pub struct DashboardSnapshot {
    pub stats: DashboardStats,
    pub recent_alumni: Vec<Alumni>,
    pub upcoming_events: Vec<Event>,
    pub recent_news: Vec<News>,
}

impl DashboardSnapshot {
    /// `alumni` and `news` arrive newest first and `upcoming` arrives
    /// already restricted to today onwards, in date order.
    pub fn assemble(
        alumni: Vec<Alumni>,
        events: Vec<Event>,
        upcoming: Vec<Event>,
        news: Vec<News>,
        ctx: &QueryContext,
    ) -> Self {
        let stats = DashboardStats::compute(&alumni, &events, ctx);
        Self {
            stats,
            recent_alumni: alumni.into_iter().take(RECENT_ALUMNI).collect(),
            upcoming_events: upcoming.into_iter().take(UPCOMING_EVENTS).collect(),
            recent_news: news.into_iter().take(RECENT_NEWS).collect(),
        }
    }
}
