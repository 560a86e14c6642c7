//! Tourism-arrivals dashboard: load a spreadsheet of arrival statistics,
//! aggregate it per study-region country and append plotly charts to a
//! static HTML report.

pub mod aggregation;
pub mod config;
pub mod error;
pub mod figure;
pub mod filters;
pub mod model;
pub mod region;
pub mod report;
pub mod schema;
pub mod visualization;

pub use config::ReportConfig;
pub use error::{ReportError, Result};
pub use figure::Figure;
pub use model::ArrivalsModel;
pub use report::Report;
