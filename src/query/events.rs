use super::selection::{Flag, Selection};
use super::{QueryContext, RecordFilter};
use crate::model::{EventDetails, EventType};

/// Which side of today an event has to fall on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeWindow {
    #[default]
    Upcoming,
    Past,
    All,
}

impl TimeWindow {
    pub fn label(self) -> &'static str {
        match self {
            TimeWindow::Upcoming => "upcoming",
            TimeWindow::Past => "past",
            TimeWindow::All => "all",
        }
    }

    pub fn next(self) -> Self {
        match self {
            TimeWindow::Upcoming => TimeWindow::Past,
            TimeWindow::Past => TimeWindow::All,
            TimeWindow::All => TimeWindow::Upcoming,
        }
    }

    /// ISO dates compare chronologically as strings. Undated events only
    /// belong to `All`.
    pub fn admits(self, event_date: Option<&str>, today: &str) -> bool {
        match (self, event_date) {
            (TimeWindow::All, _) => true,
            (_, None) => false,
            (TimeWindow::Upcoming, Some(d)) => d >= today,
            (TimeWindow::Past, Some(d)) => d < today,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFilter {
    pub window: TimeWindow,
    pub event_type: Selection<EventType>,
    pub registration_required: Flag,
}

impl EventFilter {
    /// Predicates other than the time window.
    pub fn is_empty(&self) -> bool {
        self.event_type.is_any() && self.registration_required.is_any()
    }
}

impl RecordFilter<EventDetails> for EventFilter {
    fn matches(&self, e: &EventDetails, ctx: &QueryContext) -> bool {
        self.window
            .admits(e.event_date.as_deref(), &ctx.today_iso())
            && self
                .event_type
                .admits(|t| e.event_type == Some(*t))
            && self
                .registration_required
                .admits(|want| e.registration_required == Some(*want))
    }
}
