use thiserror::Error;

/// Errors emitted by the store adapters and the generation engine.
///
/// Unresolved placeholders are deliberately *not* represented here: they are
/// non-fatal and accumulate in the run report instead of aborting the run.
#[derive(Debug, Error)]
pub enum SdfError {
    #[error("table not found: {0}")]
    MissingTable(String),
    #[error("column not found in table {table}: {column}")]
    MissingColumn { table: String, column: String },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
