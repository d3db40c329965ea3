// Rendering sink boundary: console previews plus CSV/JSON export. Layout
// and styling end here; the report builders never format terminal output
// themselves.
use crate::error::Result;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

pub fn write_csv<T: Serialize>(path: &str, rows: &[T]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_json<T: Serialize>(path: &str, value: &T) -> Result<()> {
    let body = serde_json::to_string_pretty(value)?;
    std::fs::write(path, body)?;
    Ok(())
}

/// Print up to `max_rows` of a report as a markdown table, with a title and
/// an optional parenthesized note.
pub fn preview_table<T>(title: &str, note: Option<&str>, rows: &[T], max_rows: usize)
where
    T: Tabled + Clone,
{
    println!("{title}");
    if let Some(n) = note {
        println!("({n})");
    }
    println!();
    let slice: Vec<T> = rows.iter().cloned().take(max_rows).collect();
    if slice.is_empty() {
        println!("(no rows)\n");
        return;
    }
    let rendered = Table::new(slice).with(Style::markdown()).to_string();
    println!("{rendered}\n");
}
