use serde::Serialize;
use std::fmt;
use tabled::Tabled;

/// The two visitor categories encoded in the wide table's column names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VisitorType {
    Domestic,
    Foreign,
}

impl VisitorType {
    pub const ALL: [VisitorType; 2] = [VisitorType::Domestic, VisitorType::Foreign];

    /// Parse the upper-cased token taken from a wide column name.
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "DOMESTIC" => Some(VisitorType::Domestic),
            "FOREIGN" => Some(VisitorType::Foreign),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            VisitorType::Domestic => "Domestic",
            VisitorType::Foreign => "Foreign",
        }
    }
}

impl fmt::Display for VisitorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = match self {
            VisitorType::Domestic => "DOMESTIC",
            VisitorType::Foreign => "FOREIGN",
        };
        f.write_str(token)
    }
}

/// One cell of the unpivoted state-visit table: exactly one record per
/// (state, visitor type, year) triple.
#[derive(Debug, Clone)]
pub struct StateVisitRecord {
    pub state: String,
    pub visitor_type: VisitorType,
    pub year: i32,
    pub visitors: i64,
}

/// One growth-percentage reading per (state, visitor type). Records whose
/// source cell did not parse are dropped during the melt, never zeroed.
#[derive(Debug, Clone)]
pub struct GrowthRecord {
    pub state: String,
    pub visitor_type: VisitorType,
    pub growth_pct: f64,
}

/// Per-monument visitor totals for one selected year range. Recomputed per
/// selection, never persisted across ranges.
#[derive(Debug, Clone)]
pub struct MonumentRecord {
    pub monument: String,
    pub state: String,
    pub domestic: i64,
    pub foreign: i64,
    pub total: i64,
}

/// One Swadesh Darshan project summary row with coordinates joined from the
/// gazetteer. `lat`/`lon` stay `None` when the state spelling has no
/// gazetteer entry; such rows are kept in tabular views and dropped from the
/// map only.
#[derive(Debug, Clone)]
pub struct SwadeshProject {
    pub state_ut: String,
    pub amount_sanctioned: f64,
    pub amount_utilised: f64,
    pub num_projects: i64,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

// ---------------------------------------------------------------------------
// Rendered report rows. These carry pre-formatted display strings, matching
// how the dashboard printed every count with thousands separators.
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct KpiRow {
    #[serde(rename = "VisitorType")]
    #[tabled(rename = "VisitorType")]
    pub visitor_type: String,
    #[serde(rename = "Current")]
    #[tabled(rename = "Current")]
    pub current: String,
    #[serde(rename = "LastYear")]
    #[tabled(rename = "LastYear")]
    pub last_year: String,
    #[serde(rename = "Change")]
    #[tabled(rename = "Change")]
    pub change: String,
    #[serde(rename = "PctChange")]
    #[tabled(rename = "PctChange")]
    pub pct_change: String,
    #[serde(rename = "Trend")]
    #[tabled(rename = "Trend")]
    pub trend: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct BreakdownRow {
    #[serde(rename = "Type")]
    #[tabled(rename = "Type")]
    pub visitor_type: String,
    #[serde(rename = "Visitors")]
    #[tabled(rename = "Visitors")]
    pub visitors: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct GrowthRow {
    #[serde(rename = "State")]
    #[tabled(rename = "State")]
    pub state: String,
    #[serde(rename = "VisitorType")]
    #[tabled(rename = "VisitorType")]
    pub visitor_type: String,
    #[serde(rename = "GrowthPct")]
    #[tabled(rename = "GrowthPct")]
    pub growth_pct: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct MonumentRow {
    #[serde(rename = "Rank")]
    #[tabled(rename = "Rank")]
    pub rank: usize,
    #[serde(rename = "Monument")]
    #[tabled(rename = "Monument")]
    pub monument: String,
    #[serde(rename = "State")]
    #[tabled(rename = "State")]
    pub state: String,
    #[serde(rename = "Domestic")]
    #[tabled(rename = "Domestic")]
    pub domestic: String,
    #[serde(rename = "Foreign")]
    #[tabled(rename = "Foreign")]
    pub foreign: String,
    #[serde(rename = "TotalVisitors")]
    #[tabled(rename = "TotalVisitors")]
    pub total: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct HeritageTrendRow {
    #[serde(rename = "Year")]
    #[tabled(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Practices")]
    #[tabled(rename = "Practices")]
    pub practices: usize,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct HeritagePracticeRow {
    #[serde(rename = "Name")]
    #[tabled(rename = "Name")]
    pub name: String,
    #[serde(rename = "Type")]
    #[tabled(rename = "Type")]
    pub kind: String,
    #[serde(rename = "Region")]
    #[tabled(rename = "Region")]
    pub region: String,
}

/// Full project listing, unmappable rows included.
#[derive(Debug, Serialize, Tabled, Clone)]
pub struct SwadeshProjectRow {
    #[serde(rename = "StateUT")]
    #[tabled(rename = "StateUT")]
    pub state_ut: String,
    #[serde(rename = "Projects")]
    #[tabled(rename = "Projects")]
    pub projects: String,
    #[serde(rename = "Sanctioned")]
    #[tabled(rename = "Sanctioned")]
    pub sanctioned: String,
    #[serde(rename = "Utilised")]
    #[tabled(rename = "Utilised")]
    pub utilised: String,
}

/// Map layer rows. Every row here carries coordinates; rows without a
/// gazetteer match never reach this type.
#[derive(Debug, Serialize, Tabled, Clone)]
pub struct SwadeshMapRow {
    #[serde(rename = "StateUT")]
    #[tabled(rename = "StateUT")]
    pub state_ut: String,
    #[serde(rename = "Projects")]
    #[tabled(rename = "Projects")]
    pub projects: String,
    #[serde(rename = "Sanctioned")]
    #[tabled(rename = "Sanctioned")]
    pub sanctioned: String,
    #[serde(rename = "Utilised")]
    #[tabled(rename = "Utilised")]
    pub utilised: String,
    #[serde(rename = "Lat")]
    #[tabled(rename = "Lat")]
    pub lat: String,
    #[serde(rename = "Lon")]
    #[tabled(rename = "Lon")]
    pub lon: String,
}

#[derive(Debug, Serialize)]
pub struct SummaryStats {
    pub states: usize,
    pub latest_year: i32,
    pub domestic_visitors: i64,
    pub foreign_visitors: i64,
    pub heritage_practices: usize,
    pub mapped_projects: usize,
    pub unmapped_projects: usize,
    pub generated_at: String,
}
