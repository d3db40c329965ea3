// Entry point and interactive view selection.
//
// The four warehouse tables are loaded once behind an explicit init
// boundary, then every filter selection re-runs one synchronous pass over
// the in-memory context and renders that view's tables. A failed load is
// fatal; a missing monument year-range column is only a warning for that
// view.
mod error;
mod geo;
mod kpi;
mod loader;
mod output;
mod reports;
mod reshape;
mod table;
mod types;
mod util;

use error::{DashboardError, Result};
use loader::{Dashboard, TableSource};
use std::fmt::Display;
use std::io::{self, Write};
use util::format_int;

fn main() {
    let data_dir = std::env::args().nth(1).unwrap_or_else(|| "data".to_string());
    if let Err(e) = run(&data_dir) {
        eprintln!("Fatal: {e}");
        std::process::exit(1);
    }
}

fn run(data_dir: &str) -> Result<()> {
    let mut source = TableSource::new(data_dir);
    let (dash, report) = Dashboard::load(&mut source)?;
    println!(
        "Loaded {} state rows ({} visit records), {} monument rows, {} heritage rows, {} project rows.",
        format_int(report.state_rows as i64),
        format_int(report.visit_records as i64),
        format_int(report.monument_rows as i64),
        format_int(report.heritage_rows as i64),
        format_int(report.swadesh_rows as i64),
    );
    if report.growth_cells_dropped > 0 {
        println!(
            "Note: {} growth values could not be parsed and were dropped.",
            format_int(report.growth_cells_dropped as i64)
        );
    }
    println!();

    loop {
        println!("Select View:");
        println!("[1] Tourism insights by state and year");
        println!("[2] Monument visitor insights");
        println!("[3] Intangible cultural heritage");
        println!("[4] Swadesh Darshan projects");
        println!("[5] Export summary JSON");
        println!("[0] Exit\n");
        match read_choice().as_str() {
            "1" => view_tourism(&dash)?,
            "2" => view_monuments(&dash)?,
            "3" => view_heritage(&dash)?,
            "4" => view_swadesh(&dash)?,
            "5" => export_summary(&dash)?,
            "0" => {
                println!("Exiting.");
                break;
            }
            _ => println!("Invalid choice. Please enter 0-5.\n"),
        }
    }
    Ok(())
}

/// Read a single line of input after printing the common prompt.
fn read_choice() -> String {
    print!("Enter choice: ");
    let _ = io::stdout().flush();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf.trim().to_string()
}

/// Numbered single-choice selector over options derived from the data.
/// Returns `None` when there is nothing to choose from.
fn select<T>(label: &str, options: &[T]) -> Option<T>
where
    T: Display + Clone,
{
    if options.is_empty() {
        println!("(no options available)\n");
        return None;
    }
    println!("{label}:");
    for (idx, option) in options.iter().enumerate() {
        println!("[{}] {}", idx + 1, option);
    }
    loop {
        match read_choice().parse::<usize>() {
            Ok(n) if (1..=options.len()).contains(&n) => {
                println!();
                return Some(options[n - 1].clone());
            }
            _ => println!("Invalid choice. Please enter 1-{}.", options.len()),
        }
    }
}

fn view_tourism(dash: &Dashboard) -> Result<()> {
    let Some(year) = select("Select Year", &reports::tourism_years(&dash.visits)) else {
        return Ok(());
    };
    let Some(state) = select("Select State", &reports::tourism_states(&dash.visits)) else {
        return Ok(());
    };

    let kpis = reports::kpi_rows(&dash.visits, year, &state);
    output::preview_table(
        &format!("Key Metrics for {state}, {year}"),
        Some("vs last year"),
        &kpis,
        kpis.len(),
    );

    let breakdown = reports::breakdown_rows(&dash.visits, year, &state);
    output::preview_table("Visitor Breakdown by Type", None, &breakdown, breakdown.len());

    let growth = reports::growth_rows(&dash.growth);
    output::preview_table(
        "Tourism Growth by State and Type",
        Some("all states, % vs prior period"),
        &growth,
        10,
    );
    output::write_csv("tourism_growth.csv", &growth)?;
    println!("(Full table exported to tourism_growth.csv)\n");
    Ok(())
}

fn view_monuments(dash: &Dashboard) -> Result<()> {
    let ranges = ["2020_21".to_string(), "2021_22".to_string()];
    let Some(range) = select("Select Year Range", &ranges) else {
        return Ok(());
    };
    let records = match reports::monument_totals(&dash.monuments, &range) {
        Ok(records) => records,
        Err(DashboardError::MissingColumn { column, .. }) => {
            println!("Warning: data columns for year range {range} not found ({column}).\n");
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    let overall = reports::top_monuments(&records, 10);
    output::preview_table(
        "Overall Top 10 Monuments by Total Visitors",
        Some(&format!("year range {range}")),
        &overall,
        overall.len(),
    );
    output::write_csv("monuments_top10.csv", &overall)?;
    println!("(Full table exported to monuments_top10.csv)\n");

    let Some(state) = select("Select State", &reports::monument_states(&records)) else {
        return Ok(());
    };
    let in_state = reports::top_monuments_in_state(&records, &state, 10);
    output::preview_table(
        &format!("Top Monuments in {state}"),
        Some(&format!("year range {range}")),
        &in_state,
        in_state.len(),
    );
    Ok(())
}

fn view_heritage(dash: &Dashboard) -> Result<()> {
    let trend = reports::heritage_trend(&dash.heritage)?;
    output::preview_table(
        "Recognition Trend Over the Years",
        Some("practices recognized per listing year"),
        &trend,
        trend.len(),
    );
    output::write_csv("heritage_trend.csv", &trend)?;
    println!("(Full table exported to heritage_trend.csv)\n");

    let Some(year) = select(
        "See Practices Listed by Year",
        &reports::heritage_years(&dash.heritage)?,
    ) else {
        return Ok(());
    };
    let listed = reports::heritage_listed_in(&dash.heritage, year)?;
    output::preview_table(
        &format!("Practices Listed in {year}"),
        None,
        &listed,
        listed.len(),
    );
    Ok(())
}

fn view_swadesh(dash: &Dashboard) -> Result<()> {
    let projects = reports::swadesh_projects(&dash.swadesh)?;
    let listing = reports::project_rows(&projects);
    output::preview_table(
        "Swadesh Darshan Project Summary",
        Some("all states and UTs"),
        &listing,
        listing.len(),
    );

    let mut options = vec!["All".to_string()];
    options.extend(reports::swadesh_states(&projects));
    let Some(choice) = select("Select a State/UT", &options) else {
        return Ok(());
    };
    let filter = (choice != "All").then_some(choice.as_str());
    let map = reports::map_rows(&projects, filter);
    output::preview_table(
        "Project Locations",
        Some("rows without coordinates are omitted"),
        &map,
        map.len(),
    );
    output::write_csv("swadesh_projects_map.csv", &map)?;
    println!("(Full table exported to swadesh_projects_map.csv)\n");
    Ok(())
}

fn export_summary(dash: &Dashboard) -> Result<()> {
    let projects = reports::swadesh_projects(&dash.swadesh)?;
    let summary = reports::generate_summary(&dash.visits, dash.heritage.row_count(), &projects);
    output::write_json("summary.json", &summary)?;
    println!("Summary written to summary.json\n");
    Ok(())
}
