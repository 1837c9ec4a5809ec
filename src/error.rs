// ⚠️ Error Taxonomy - Typed failures for the pipeline
// Fatal: UnsupportedFormat. Informational: InsufficientData, MissingColumn.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// File extension is not a recognized tabular format.
    /// Fatal to the load step; always names the offending extension.
    #[error("unsupported file format: .{0} (expected .csv or .xlsx)")]
    UnsupportedFormat(String),

    /// A required column is absent from the input header.
    /// Non-fatal to the session; names the missing column.
    #[error("missing required column: {0}")]
    MissingColumn(String),

    /// Not enough usable data for the requested computation
    /// (empty table, or fewer than two distinct months for a forecast).
    #[error("insufficient data: {0}")]
    InsufficientData(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("XLSX error: {0}")]
    Xlsx(#[from] calamine::XlsxError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

// ============================================================================
// TESTS
// ============================================================================
