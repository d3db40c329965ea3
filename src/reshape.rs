// Wide-to-long reshaping of the state-visit table.
//
// The warehouse exports one row per state with a column per
// (visitor type, year) pair. Everything downstream wants the unpivoted form,
// so the melt runs once at load time.
use crate::error::{DashboardError, Result};
use crate::table::Table;
use crate::types::{GrowthRecord, StateVisitRecord, VisitorType};
use crate::util::{clean_count, clean_metric, parse_year};

const STATE: &str = "STATE";

/// The four wide value columns unpivoted into long form.
pub const VALUE_COLUMNS: [&str; 4] = [
    "DOMESTIC_2020",
    "FOREIGN_2020",
    "DOMESTIC_2021",
    "FOREIGN_2021",
];

const GROWTH_COLUMNS: [(&str, VisitorType); 2] = [
    ("DTV_GROWTH_PCT", VisitorType::Domestic),
    ("FTV_GROWTH_PCT", VisitorType::Foreign),
];

fn bad_column(column: &str) -> DashboardError {
    DashboardError::BadTypeYearColumn {
        column: column.to_string(),
    }
}

/// Split a wide column name like `DOMESTIC_2020` into its visitor type and
/// year. The name must split on the single separator into exactly two
/// parts, and the second must parse as an integer; anything else is a
/// schema mismatch and fails the load rather than silently dropping
/// records.
pub fn split_type_year(column: &str) -> Result<(VisitorType, i32)> {
    let mut parts = column.splitn(2, '_');
    let (Some(kind), Some(year)) = (parts.next(), parts.next()) else {
        return Err(bad_column(column));
    };
    let visitor_type = VisitorType::parse(kind).ok_or_else(|| bad_column(column))?;
    let year = parse_year(year).ok_or_else(|| bad_column(column))?;
    Ok((visitor_type, year))
}

/// Unpivot the wide state table into one record per
/// (state, visitor type, year) triple. Output length is always
/// `4 x row_count`; count cells are cleaned with the zero-coercion policy.
pub fn melt_state_visits(table: &Table) -> Result<Vec<StateVisitRecord>> {
    let state_idx = table.require(STATE)?;
    let mut melted = Vec::with_capacity(table.row_count() * VALUE_COLUMNS.len());
    for column in VALUE_COLUMNS {
        let col_idx = table.require(column)?;
        let (visitor_type, year) = split_type_year(column)?;
        for row in 0..table.row_count() {
            melted.push(StateVisitRecord {
                state: table.value(row, state_idx).trim().to_string(),
                visitor_type,
                year,
                visitors: clean_count(table.value(row, col_idx)),
            });
        }
    }
    Ok(melted)
}

/// Unpivot the per-state growth percentages. Cells that do not parse are
/// dropped (counted, for the load diagnostics) rather than zeroed, so an
/// unknown growth figure never shows up as 0%.
pub fn melt_growth(table: &Table) -> Result<(Vec<GrowthRecord>, usize)> {
    let state_idx = table.require(STATE)?;
    let mut records = Vec::new();
    let mut dropped = 0usize;
    for (column, visitor_type) in GROWTH_COLUMNS {
        let col_idx = table.require(column)?;
        for row in 0..table.row_count() {
            match clean_metric(table.value(row, col_idx)) {
                Some(growth_pct) => records.push(GrowthRecord {
                    state: table.value(row, state_idx).trim().to_string(),
                    visitor_type,
                    growth_pct,
                }),
                None => dropped += 1,
            }
        }
    }
    Ok((records, dropped))
}
