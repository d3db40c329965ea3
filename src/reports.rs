// Per-view report builders. Each function recomputes its derived table
// fresh from the loaded context; nothing here mutates shared state.
use crate::error::Result;
use crate::geo;
use crate::kpi::{self, Trend};
use crate::table::Table;
use crate::types::{
    BreakdownRow, GrowthRecord, GrowthRow, HeritagePracticeRow, HeritageTrendRow, KpiRow,
    MonumentRecord, MonumentRow, StateVisitRecord, SummaryStats, SwadeshMapRow, SwadeshProject,
    SwadeshProjectRow, VisitorType,
};
use crate::util::{clean_amount, clean_count, format_int, format_number, parse_year};
use chrono::Local;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

// ---------------------------------------------------------------------------
// Tourism insights
// ---------------------------------------------------------------------------

/// Distinct years in the long table, newest first (the year selector order).
pub fn tourism_years(visits: &[StateVisitRecord]) -> Vec<i32> {
    let years: BTreeSet<i32> = visits.iter().map(|r| r.year).collect();
    years.into_iter().rev().collect()
}

/// Distinct states, ascending.
pub fn tourism_states(visits: &[StateVisitRecord]) -> Vec<String> {
    let states: BTreeSet<&str> = visits.iter().map(|r| r.state.as_str()).collect();
    states.into_iter().map(str::to_string).collect()
}

/// The two KPI cards for one (year, state) selection: one call per visitor
/// type, rendered with signed change and trend direction.
pub fn kpi_rows(visits: &[StateVisitRecord], year: i32, state: &str) -> Vec<KpiRow> {
    VisitorType::ALL
        .iter()
        .map(|&visitor_type| {
            let k = kpi::visitor_kpi(visits, year, state, visitor_type);
            KpiRow {
                visitor_type: visitor_type.label().to_string(),
                current: format_int(k.current),
                last_year: format_int(k.previous),
                change: format_int(k.delta),
                pct_change: format!("{}%", format_number(k.pct_change, 2)),
                trend: Trend::of(k.delta).label().to_string(),
            }
        })
        .collect()
}

/// Per-type visitor sums for the selected year and state.
pub fn breakdown_rows(visits: &[StateVisitRecord], year: i32, state: &str) -> Vec<BreakdownRow> {
    VisitorType::ALL
        .iter()
        .map(|&visitor_type| BreakdownRow {
            visitor_type: visitor_type.label().to_string(),
            visitors: format_int(kpi::visitor_total(visits, year, state, visitor_type)),
        })
        .collect()
}

/// All growth readings across states, strongest growth first.
pub fn growth_rows(growth: &[GrowthRecord]) -> Vec<GrowthRow> {
    let mut sorted: Vec<&GrowthRecord> = growth.iter().collect();
    sorted.sort_by(|a, b| {
        b.growth_pct
            .partial_cmp(&a.growth_pct)
            .unwrap_or(Ordering::Equal)
    });
    sorted
        .into_iter()
        .map(|r| GrowthRow {
            state: r.state.clone(),
            visitor_type: r.visitor_type.label().to_string(),
            growth_pct: format_number(r.growth_pct, 2),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Monuments
// ---------------------------------------------------------------------------

const MONUMENT_NAME: &str = "MONUMENT_NAME";
const MONUMENT_STATE: &str = "STATE";

/// Locate the two year-range columns for the selected token and compute
/// per-monument totals.
///
/// A missing column comes back as `MissingColumn`, which the caller
/// surfaces as an inline warning and skips the view; it is the one schema
/// mismatch that is not fatal.
pub fn monument_totals(table: &Table, range: &str) -> Result<Vec<MonumentRecord>> {
    // Constructed names get the same normalization as the headers they are
    // matched against.
    let domestic_col = format!("DOMESTIC_{range}").to_uppercase();
    let foreign_col = format!("FOREIGN_{range}").to_uppercase();

    let name_idx = table.require(MONUMENT_NAME)?;
    let state_idx = table.require(MONUMENT_STATE)?;
    let dom_idx = table.require(&domestic_col)?;
    let for_idx = table.require(&foreign_col)?;

    let mut records = Vec::with_capacity(table.row_count());
    for row in 0..table.row_count() {
        let domestic = clean_count(table.value(row, dom_idx));
        let foreign = clean_count(table.value(row, for_idx));
        records.push(MonumentRecord {
            monument: table.value(row, name_idx).trim().to_string(),
            state: table.value(row, state_idx).trim().to_string(),
            domestic,
            foreign,
            total: domestic + foreign,
        });
    }
    Ok(records)
}

/// Distinct monument states for the filter selector.
pub fn monument_states(records: &[MonumentRecord]) -> Vec<String> {
    let states: BTreeSet<&str> = records.iter().map(|r| r.state.as_str()).collect();
    states.into_iter().map(str::to_string).collect()
}

fn rank_monuments<'a, I>(records: I, limit: usize) -> Vec<MonumentRow>
where
    I: Iterator<Item = &'a MonumentRecord>,
{
    let mut sorted: Vec<&MonumentRecord> = records.collect();
    sorted.sort_by(|a, b| b.total.cmp(&a.total));
    sorted
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(idx, r)| MonumentRow {
            rank: idx + 1,
            monument: r.monument.clone(),
            state: r.state.clone(),
            domestic: format_int(r.domestic),
            foreign: format_int(r.foreign),
            total: format_int(r.total),
        })
        .collect()
}

/// Global top-N monuments by total visitors.
pub fn top_monuments(records: &[MonumentRecord], limit: usize) -> Vec<MonumentRow> {
    rank_monuments(records.iter(), limit)
}

/// Top-N monuments within one state.
pub fn top_monuments_in_state(
    records: &[MonumentRecord],
    state: &str,
    limit: usize,
) -> Vec<MonumentRow> {
    rank_monuments(records.iter().filter(|r| r.state == state), limit)
}

// ---------------------------------------------------------------------------
// Intangible heritage
// ---------------------------------------------------------------------------

const HERITAGE_NAME: &str = "NAME";
const HERITAGE_TYPE: &str = "TYPE";
const HERITAGE_REGION: &str = "REGION";
const YEAR_LISTED: &str = "YEAR_LISTED";

/// Practices recognized per year, ascending. Rows whose listing year does
/// not parse are skipped as missing reference data.
pub fn heritage_trend(table: &Table) -> Result<Vec<HeritageTrendRow>> {
    let year_idx = table.require(YEAR_LISTED)?;
    let mut counts: BTreeMap<i32, usize> = BTreeMap::new();
    for row in 0..table.row_count() {
        if let Some(year) = parse_year(table.value(row, year_idx)) {
            *counts.entry(year).or_default() += 1;
        }
    }
    Ok(counts
        .into_iter()
        .map(|(year, practices)| HeritageTrendRow { year, practices })
        .collect())
}

/// Distinct listing years for the selector, ascending.
pub fn heritage_years(table: &Table) -> Result<Vec<i32>> {
    let year_idx = table.require(YEAR_LISTED)?;
    let mut years = BTreeSet::new();
    for row in 0..table.row_count() {
        if let Some(year) = parse_year(table.value(row, year_idx)) {
            years.insert(year);
        }
    }
    Ok(years.into_iter().collect())
}

/// Name/type/region listing for one selected year.
pub fn heritage_listed_in(table: &Table, year: i32) -> Result<Vec<HeritagePracticeRow>> {
    let name_idx = table.require(HERITAGE_NAME)?;
    let type_idx = table.require(HERITAGE_TYPE)?;
    let region_idx = table.require(HERITAGE_REGION)?;
    let year_idx = table.require(YEAR_LISTED)?;

    let mut rows = Vec::new();
    for row in 0..table.row_count() {
        if parse_year(table.value(row, year_idx)) == Some(year) {
            rows.push(HeritagePracticeRow {
                name: table.value(row, name_idx).trim().to_string(),
                kind: table.value(row, type_idx).trim().to_string(),
                region: table.value(row, region_idx).trim().to_string(),
            });
        }
    }
    Ok(rows)
}

// ---------------------------------------------------------------------------
// Swadesh Darshan
// ---------------------------------------------------------------------------

const STATE_UT: &str = "STATE_UT";
const AMOUNT_SANCTIONED: &str = "AMOUNT_SANCTIONED";
const AMOUNT_UTILISED: &str = "AMOUNT_UTILISED";
const NUM_PROJECTS: &str = "NUM_PROJECTS";

/// Clean the project summary and join coordinates from the gazetteer. The
/// state name is matched exactly as exported; a failed lookup leaves the
/// coordinates missing instead of raising.
pub fn swadesh_projects(table: &Table) -> Result<Vec<SwadeshProject>> {
    let state_idx = table.require(STATE_UT)?;
    let sanctioned_idx = table.require(AMOUNT_SANCTIONED)?;
    let utilised_idx = table.require(AMOUNT_UTILISED)?;
    let projects_idx = table.require(NUM_PROJECTS)?;

    let mut projects = Vec::with_capacity(table.row_count());
    for row in 0..table.row_count() {
        let state_ut = table.value(row, state_idx).to_string();
        let (lat, lon) = match geo::coordinates(&state_ut) {
            Some((lat, lon)) => (Some(lat), Some(lon)),
            None => (None, None),
        };
        projects.push(SwadeshProject {
            state_ut,
            amount_sanctioned: clean_amount(table.value(row, sanctioned_idx)),
            amount_utilised: clean_amount(table.value(row, utilised_idx)),
            num_projects: clean_count(table.value(row, projects_idx)),
            lat,
            lon,
        });
    }
    Ok(projects)
}

/// Selector options: distinct states among the mappable rows, ascending.
/// States that never reach the map are not offered as map filters.
pub fn swadesh_states(projects: &[SwadeshProject]) -> Vec<String> {
    let states: BTreeSet<&str> = projects
        .iter()
        .filter(|p| p.lat.is_some())
        .map(|p| p.state_ut.as_str())
        .collect();
    states.into_iter().map(str::to_string).collect()
}

/// Full tabular listing, unmappable rows included.
pub fn project_rows(projects: &[SwadeshProject]) -> Vec<SwadeshProjectRow> {
    projects
        .iter()
        .map(|p| SwadeshProjectRow {
            state_ut: p.state_ut.clone(),
            projects: format_int(p.num_projects),
            sanctioned: format_number(p.amount_sanctioned, 2),
            utilised: format_number(p.amount_utilised, 2),
        })
        .collect()
}

/// Map layer rows: only records with coordinates, optionally filtered to
/// one state/UT.
pub fn map_rows(projects: &[SwadeshProject], state: Option<&str>) -> Vec<SwadeshMapRow> {
    projects
        .iter()
        .filter_map(|p| {
            let (lat, lon) = (p.lat?, p.lon?);
            if let Some(wanted) = state {
                if p.state_ut != wanted {
                    return None;
                }
            }
            Some(SwadeshMapRow {
                state_ut: p.state_ut.clone(),
                projects: format_int(p.num_projects),
                sanctioned: format_number(p.amount_sanctioned, 2),
                utilised: format_number(p.amount_utilised, 2),
                lat: format!("{lat:.4}"),
                lon: format!("{lon:.4}"),
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Summary export
// ---------------------------------------------------------------------------

pub fn generate_summary(
    visits: &[StateVisitRecord],
    heritage_practices: usize,
    projects: &[SwadeshProject],
) -> SummaryStats {
    let latest_year = tourism_years(visits).first().copied().unwrap_or(0);
    let sum_for = |visitor_type: VisitorType| -> i64 {
        visits
            .iter()
            .filter(|r| r.year == latest_year && r.visitor_type == visitor_type)
            .map(|r| r.visitors)
            .sum()
    };
    let mapped_projects = projects.iter().filter(|p| p.lat.is_some()).count();
    SummaryStats {
        states: tourism_states(visits).len(),
        latest_year,
        domestic_visitors: sum_for(VisitorType::Domestic),
        foreign_visitors: sum_for(VisitorType::Foreign),
        heritage_practices,
        mapped_projects,
        unmapped_projects: projects.len() - mapped_projects,
        generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(name: &str, columns: &[&str], rows: &[&[&str]]) -> Table {
        Table::new(
            name,
            columns.iter().map(|c| c.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|v| v.to_string()).collect())
                .collect(),
        )
    }

    fn monuments() -> Table {
        table(
            "TOURIST_VISITS_MONUMENTS",
            &["MONUMENT_NAME", "STATE", "DOMESTIC_2020_21", "FOREIGN_2020_21"],
            &[
                &["Taj Mahal", "Uttar Pradesh", "8,000", "1,000"],
                &["Red Fort", "Delhi", "5,000", "500"],
                &["Agra Fort", "Uttar Pradesh", "3,000", "x"],
            ],
        )
    }

    #[test]
    fn monument_totals_are_additive_post_cleaning() {
        let records = monument_totals(&monuments(), "2020_21").unwrap();
        for r in &records {
            assert_eq!(r.total, r.domestic + r.foreign);
        }
        // unparseable foreign count coerces to zero
        let agra = records.iter().find(|r| r.monument == "Agra Fort").unwrap();
        assert_eq!((agra.domestic, agra.foreign, agra.total), (3000, 0, 3000));
    }

    #[test]
    fn missing_range_columns_are_reported_not_fatal() {
        let err = monument_totals(&monuments(), "2021_22").unwrap_err();
        assert!(matches!(
            err,
            crate::error::DashboardError::MissingColumn { .. }
        ));
    }

    #[test]
    fn top_monuments_orders_by_total() {
        let records = monument_totals(&monuments(), "2020_21").unwrap();
        let top = top_monuments(&records, 2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].monument, "Taj Mahal");
        assert_eq!(top[0].rank, 1);
        assert_eq!(top[1].monument, "Red Fort");
    }

    #[test]
    fn state_filter_restricts_ranking() {
        let records = monument_totals(&monuments(), "2020_21").unwrap();
        let top = top_monuments_in_state(&records, "Uttar Pradesh", 10);
        assert_eq!(top.len(), 2);
        assert!(top.iter().all(|r| r.state == "Uttar Pradesh"));
        assert_eq!(monument_states(&records), ["Delhi", "Uttar Pradesh"]);
    }

    fn heritage() -> Table {
        table(
            "INTANGIBLE_HERITAGE",
            &["NAME", "TYPE", "REGION", "YEAR_LISTED"],
            &[
                &["Koodiyattam", "Theatre", "Kerala", "2008"],
                &["Ramlila", "Performance", "North India", "2008"],
                &["Yoga", "Practice", "Pan-India", "2016"],
                &["Unknown", "Practice", "Nowhere", "n/a"],
            ],
        )
    }

    #[test]
    fn heritage_trend_counts_by_year() {
        let trend = heritage_trend(&heritage()).unwrap();
        assert_eq!(trend.len(), 2);
        assert_eq!((trend[0].year, trend[0].practices), (2008, 2));
        assert_eq!((trend[1].year, trend[1].practices), (2016, 1));
        assert_eq!(heritage_years(&heritage()).unwrap(), [2008, 2016]);
    }

    #[test]
    fn heritage_listing_filters_by_year() {
        let listed = heritage_listed_in(&heritage(), 2008).unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].name, "Koodiyattam");
        assert_eq!(listed[0].kind, "Theatre");
    }

    fn swadesh() -> Table {
        table(
            "SWADESH_DARSHAN_SUMMARY",
            &["STATE_UT", "AMOUNT_SANCTIONED", "AMOUNT_UTILISED", "NUM_PROJECTS"],
            &[
                &["Goa", "1,000.50", "900.25", "2"],
                &["Kerala", "2,500", "2,000", "3"],
                &["Atlantis", "50", "40", "1"],
            ],
        )
    }

    #[test]
    fn map_rows_only_carry_joined_coordinates() {
        let projects = swadesh_projects(&swadesh()).unwrap();
        assert_eq!(projects.len(), 3);

        let map = map_rows(&projects, None);
        assert_eq!(map.len(), 2);
        assert!(map.iter().all(|r| !r.lat.is_empty() && !r.lon.is_empty()));
        assert!(map.iter().all(|r| r.state_ut != "Atlantis"));

        // the unmappable row still appears in tabular output
        let listing = project_rows(&projects);
        assert!(listing.iter().any(|r| r.state_ut == "Atlantis"));
    }

    #[test]
    fn map_filter_and_selector_track_mappable_states() {
        let projects = swadesh_projects(&swadesh()).unwrap();
        assert_eq!(swadesh_states(&projects), ["Goa", "Kerala"]);
        let goa_only = map_rows(&projects, Some("Goa"));
        assert_eq!(goa_only.len(), 1);
        assert_eq!(goa_only[0].sanctioned, "1,000.50");
    }

    fn visits() -> Vec<StateVisitRecord> {
        vec![
            StateVisitRecord {
                state: "Goa".into(),
                visitor_type: VisitorType::Domestic,
                year: 2020,
                visitors: 10000,
            },
            StateVisitRecord {
                state: "Goa".into(),
                visitor_type: VisitorType::Domestic,
                year: 2021,
                visitors: 12000,
            },
            StateVisitRecord {
                state: "Goa".into(),
                visitor_type: VisitorType::Foreign,
                year: 2021,
                visitors: 1500,
            },
            StateVisitRecord {
                state: "Assam".into(),
                visitor_type: VisitorType::Foreign,
                year: 2021,
                visitors: 300,
            },
        ]
    }

    #[test]
    fn selectors_derive_from_data() {
        assert_eq!(tourism_years(&visits()), [2021, 2020]);
        assert_eq!(tourism_states(&visits()), ["Assam", "Goa"]);
    }

    #[test]
    fn kpi_rows_render_one_row_per_visitor_type() {
        let rows = kpi_rows(&visits(), 2021, "Goa");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].visitor_type, "Domestic");
        assert_eq!(rows[0].current, "12,000");
        assert_eq!(rows[0].change, "2,000");
        assert_eq!(rows[0].pct_change, "20.00%");
        assert_eq!(rows[0].trend, "Up");
        // no 2020 foreign baseline: sentinel percent, not a division
        assert_eq!(rows[1].last_year, "0");
        assert_eq!(rows[1].pct_change, "100.00%");
    }

    #[test]
    fn growth_rows_sort_strongest_first() {
        let growth = vec![
            GrowthRecord {
                state: "Goa".into(),
                visitor_type: VisitorType::Domestic,
                growth_pct: 20.0,
            },
            GrowthRecord {
                state: "Kerala".into(),
                visitor_type: VisitorType::Foreign,
                growth_pct: 35.5,
            },
        ];
        let rows = growth_rows(&growth);
        assert_eq!(rows[0].state, "Kerala");
        assert_eq!(rows[0].growth_pct, "35.50");
    }

    #[test]
    fn summary_counts_states_and_latest_year_totals() {
        let projects = swadesh_projects(&swadesh()).unwrap();
        let summary = generate_summary(&visits(), 4, &projects);
        assert_eq!(summary.states, 2);
        assert_eq!(summary.latest_year, 2021);
        assert_eq!(summary.domestic_visitors, 12000);
        assert_eq!(summary.foreign_visitors, 1800);
        assert_eq!(summary.mapped_projects, 2);
        assert_eq!(summary.unmapped_projects, 1);
    }
}
