use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Workbook error: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported input format: {0}")]
    UnsupportedFormat(PathBuf),

    #[error("Workbook has no data rows: {0}")]
    EmptySheet(PathBuf),

    #[error("Missing column: {0}")]
    MissingColumn(String),
}

pub type Result<T> = std::result::Result<T, ReportError>;
