use std::path::PathBuf;

/// plotly.js bundle referenced by every exported fragment.
pub const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

/// Configuration for one report run.
///
/// The binary always runs with [`ReportConfig::default`]; the fields exist so
/// tests and library callers can point the pipeline elsewhere.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Spreadsheet with the arrivals observations.
    pub input_path: PathBuf,
    /// HTML file the chart fragments are appended to.
    pub output_path: PathBuf,
    /// Script URL for the charting library.
    pub plotly_cdn: String,
    /// Default `tracing` filter directive when `RUST_LOG` is unset.
    pub log_level: String,
    /// Standalone page with every chart, banner included.
    pub preview_path: Option<PathBuf>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("turismo.xlsx"),
            output_path: PathBuf::from("index.html"),
            plotly_cdn: PLOTLY_CDN.to_string(),
            log_level: "info".to_string(),
            preview_path: None,
        }
    }
}
