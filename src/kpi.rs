// Year-over-year visitor KPIs for one (year, state, visitor type)
// selection.
use crate::types::{StateVisitRecord, VisitorType};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kpi {
    pub current: i64,
    pub previous: i64,
    pub delta: i64,
    pub pct_change: f64,
}

/// Sum of visitors over the long table for one (year, state, type) cell.
/// Zero when nothing matches.
pub fn visitor_total(
    records: &[StateVisitRecord],
    year: i32,
    state: &str,
    visitor_type: VisitorType,
) -> i64 {
    records
        .iter()
        .filter(|r| r.year == year && r.state == state && r.visitor_type == visitor_type)
        .map(|r| r.visitors)
        .sum()
}

/// Compute current/previous/delta/percent-change for one selection. Pure
/// over its inputs; invoked once per visitor type per render pass.
///
/// When the prior year has no data the percent change is pinned to exactly
/// `100.0`. Callers must treat that value as a "no baseline" marker, not a
/// measured figure; it is returned even when the current value is also
/// zero.
pub fn visitor_kpi(
    records: &[StateVisitRecord],
    year: i32,
    state: &str,
    visitor_type: VisitorType,
) -> Kpi {
    let current = visitor_total(records, year, state, visitor_type);
    let previous = visitor_total(records, year - 1, state, visitor_type);
    let delta = current - previous;
    let pct_change = if previous != 0 {
        delta as f64 / previous as f64 * 100.0
    } else {
        100.0
    };
    Kpi {
        current,
        previous,
        delta,
        pct_change,
    }
}

/// Display direction for a delta. The rendered label is a pure function of
/// the delta's sign; zero renders as `Down`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
}

impl Trend {
    pub fn of(delta: i64) -> Self {
        if delta > 0 {
            Trend::Up
        } else {
            Trend::Down
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Trend::Up => "Up",
            Trend::Down => "Down",
        }
    }
}
