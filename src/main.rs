use anyhow::Result;
use arrivals_report::{report, ArrivalsModel, ReportConfig};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn setup_logging(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .init();
}

fn main() -> Result<()> {
    let config = ReportConfig::default();
    setup_logging(&config.log_level);
    tracing::info!("arrivals-report v{} starting", env!("CARGO_PKG_VERSION"));

    // A load failure stops the run before anything is appended.
    let model = match ArrivalsModel::load(&config.input_path) {
        Ok(model) => model,
        Err(err) => {
            tracing::error!(path = %config.input_path.display(), "failed to load file: {err}");
            std::process::exit(1);
        }
    };

    report::render(&model, &config)?;
    Ok(())
}
