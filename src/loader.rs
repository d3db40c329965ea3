// Data source adapter and load-time context.
//
// The warehouse tables arrive as one CSV export per table. `TableSource`
// replaces the warehouse connection: a full unfiltered read per table,
// memoized by table name for the life of the process so repeated render
// passes never re-read the files. `Dashboard::load` is the explicit init
// boundary: it pulls all four tables, normalizes headers, reshapes the
// state table, and hands back an owned context that every view receives by
// reference.
use crate::error::Result;
use crate::reshape;
use crate::table::Table;
use crate::types::{GrowthRecord, StateVisitRecord};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub const TOURIST_VISITS_STATE: &str = "TOURIST_VISITS_STATE";
pub const TOURIST_VISITS_MONUMENTS: &str = "TOURIST_VISITS_MONUMENTS";
pub const INTANGIBLE_HERITAGE: &str = "INTANGIBLE_HERITAGE";
pub const SWADESH_DARSHAN_SUMMARY: &str = "SWADESH_DARSHAN_SUMMARY";

pub struct TableSource {
    data_dir: PathBuf,
    cache: HashMap<String, Table>,
}

impl TableSource {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        TableSource {
            data_dir: data_dir.as_ref().to_path_buf(),
            cache: HashMap::new(),
        }
    }

    /// Full read of one named table, `<data_dir>/<table_name>.csv`
    /// lower-cased. The cache has no invalidation; a stale file needs a
    /// process restart, same as the warehouse cache it stands in for.
    pub fn load(&mut self, table_name: &str) -> Result<Table> {
        if let Some(table) = self.cache.get(table_name) {
            return Ok(table.clone());
        }
        let path = self
            .data_dir
            .join(format!("{}.csv", table_name.to_lowercase()));
        let mut rdr = ReaderBuilder::new().flexible(true).from_path(&path)?;
        let columns: Vec<String> = rdr.headers()?.iter().map(|h| h.to_string()).collect();
        let mut rows = Vec::new();
        for record in rdr.records() {
            let record = record?;
            rows.push(record.iter().map(|field| field.to_string()).collect());
        }
        let table = Table::new(table_name, columns, rows);
        self.cache.insert(table_name.to_string(), table.clone());
        Ok(table)
    }
}

/// Load diagnostics printed once at startup.
#[derive(Debug, Clone)]
pub struct LoadReport {
    pub state_rows: usize,
    pub monument_rows: usize,
    pub heritage_rows: usize,
    pub swadesh_rows: usize,
    pub visit_records: usize,
    pub growth_cells_dropped: usize,
}

/// Everything one render pass needs. Loaded once, then treated as
/// immutable: each filter selection recomputes its derived tables fresh
/// from this context.
pub struct Dashboard {
    pub states: Table,
    pub monuments: Table,
    pub heritage: Table,
    pub swadesh: Table,
    pub visits: Vec<StateVisitRecord>,
    pub growth: Vec<GrowthRecord>,
}

impl Dashboard {
    pub fn load(source: &mut TableSource) -> Result<(Self, LoadReport)> {
        let mut states = source.load(TOURIST_VISITS_STATE)?;
        let mut monuments = source.load(TOURIST_VISITS_MONUMENTS)?;
        let mut heritage = source.load(INTANGIBLE_HERITAGE)?;
        let swadesh = source.load(SWADESH_DARSHAN_SUMMARY)?;

        // The project summary export already ships clean headers; the other
        // three need normalizing before any name-based lookup.
        states.normalize_columns();
        monuments.normalize_columns();
        heritage.normalize_columns();

        let visits = reshape::melt_state_visits(&states)?;
        let (growth, growth_cells_dropped) = reshape::melt_growth(&states)?;

        let report = LoadReport {
            state_rows: states.row_count(),
            monument_rows: monuments.row_count(),
            heritage_rows: heritage.row_count(),
            swadesh_rows: swadesh.row_count(),
            visit_records: visits.len(),
            growth_cells_dropped,
        };
        let dashboard = Dashboard {
            states,
            monuments,
            heritage,
            swadesh,
            visits,
            growth,
        };
        Ok((dashboard, report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kpi::{self, Trend};
    use crate::types::VisitorType;
    use std::fs;

    fn fixture_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("tourism_report_{}_{}", tag, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write_fixture(dir: &Path) {
        fs::write(
            dir.join("tourist_visits_state.csv"),
            "state , DOMESTIC_2020,FOREIGN_2020,DOMESTIC_2021,FOREIGN_2021,DTV_GROWTH_PCT,FTV_GROWTH_PCT\n\
             Goa,\"10,000\",\"2,000\",\"12,000\",\"1,500\",20.0,-25.0\n",
        )
        .unwrap();
        fs::write(
            dir.join("tourist_visits_monuments.csv"),
            "monument_name,State,DOMESTIC_2020_21,FOREIGN_2020_21\n\
             Taj Mahal,Uttar Pradesh,\"1,000\",\"200\"\n",
        )
        .unwrap();
        fs::write(
            dir.join("intangible_heritage.csv"),
            "Name,Type,Region,YEAR_LISTED\nKoodiyattam,Theatre,Kerala,2008\n",
        )
        .unwrap();
        fs::write(
            dir.join("swadesh_darshan_summary.csv"),
            "STATE_UT,AMOUNT_SANCTIONED,AMOUNT_UTILISED,NUM_PROJECTS\n\
             Goa,\"1,000.50\",900,2\n\
             Atlantis,50,40,1\n",
        )
        .unwrap();
    }

    #[test]
    fn source_memoizes_reads() {
        let dir = fixture_dir("memo");
        write_fixture(&dir);
        let mut source = TableSource::new(&dir);
        let first = source.load(TOURIST_VISITS_STATE).unwrap();
        // Delete the file; the second load must come from the cache.
        fs::remove_file(dir.join("tourist_visits_state.csv")).unwrap();
        let second = source.load(TOURIST_VISITS_STATE).unwrap();
        assert_eq!(first.row_count(), second.row_count());
        assert!(source.load(TOURIST_VISITS_MONUMENTS).is_ok());
    }

    #[test]
    fn missing_table_is_fatal() {
        let dir = fixture_dir("missing");
        let mut source = TableSource::new(&dir);
        assert!(source.load(TOURIST_VISITS_STATE).is_err());
    }

    #[test]
    fn load_normalizes_reshapes_and_reports() {
        let dir = fixture_dir("load");
        write_fixture(&dir);
        let mut source = TableSource::new(&dir);
        let (dash, report) = Dashboard::load(&mut source).unwrap();

        assert_eq!(report.state_rows, 1);
        assert_eq!(report.visit_records, 4);
        assert_eq!(report.growth_cells_dropped, 0);
        assert!(dash.states.column_index("STATE").is_some());
        assert!(dash.monuments.column_index("MONUMENT_NAME").is_some());

        // End-to-end KPI over the loaded context.
        let k = kpi::visitor_kpi(&dash.visits, 2021, "Goa", VisitorType::Domestic);
        assert_eq!((k.current, k.previous, k.delta), (12000, 10000, 2000));
        assert!((k.pct_change - 20.0).abs() < 1e-9);
        assert_eq!(Trend::of(k.delta), Trend::Up);

        let k = kpi::visitor_kpi(&dash.visits, 2021, "Goa", VisitorType::Foreign);
        assert_eq!((k.current, k.previous, k.delta), (1500, 2000, -500));
        assert!((k.pct_change + 25.0).abs() < 1e-9);
        assert_eq!(Trend::of(k.delta), Trend::Down);
    }
}
