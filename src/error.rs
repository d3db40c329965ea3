use thiserror::Error;

/// Failure modes of a render pass.
///
/// Source-level failures (`Io`, `Csv`, `Json`) are fatal: every view depends
/// on the four base tables, so there is no partial rendering. `MissingColumn`
/// is fatal for required base columns but downgraded to an inline warning for
/// the monument year-range columns, where the view is skipped instead.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to read table: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to write summary: {0}")]
    Json(#[from] serde_json::Error),
    #[error("table {table} is missing required column {column}")]
    MissingColumn { table: String, column: String },
    #[error("column {column} does not split into a visitor type and year")]
    BadTypeYearColumn { column: String },
}

pub type Result<T> = std::result::Result<T, DashboardError>;
