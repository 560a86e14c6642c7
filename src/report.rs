use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::config::ReportConfig;
use crate::error::Result;
use crate::figure::Figure;
use crate::model::ArrivalsModel;
use crate::visualization;

/// Every chart of the dashboard, in declaration order.
#[derive(Debug, Clone)]
pub struct Report {
    pub banner: Figure,
    pub context: Figure,
    pub origin_flows: Figure,
    pub volume_animation: Figure,
    pub volume_bubbles: Figure,
    pub purpose_share: Figure,
    pub purpose_history: Figure,
    pub top_hubs: Figure,
}

impl Report {
    /// Run every aggregation stage and its chart builder.
    pub fn build(model: &ArrivalsModel) -> Result<Self> {
        let context = visualization::context_chart(&model.context_series()?)?;
        let origin_flows = visualization::origin_flow_chart(&model.origin_flows()?)?;
        let volume_animation = visualization::volume_animation(&model.volume_grid()?)?;
        let volume_bubbles = visualization::volume_bubbles(&model.volume_points()?)?;
        let purpose_share = visualization::purpose_share_chart(&model.purpose_share()?)?;
        let purpose_history = visualization::purpose_history_chart(&model.purpose_history()?)?;
        let top_hubs = visualization::top_hubs_chart(&model.top_hubs(3)?)?;
        tracing::info!("charts built");

        Ok(Self {
            banner: visualization::title_banner(),
            context,
            origin_flows,
            volume_animation,
            volume_bubbles,
            purpose_share,
            purpose_history,
            top_hubs,
        })
    }

    /// Charts written to the report file. The banner and the two exploratory
    /// views (origin flows, animated volume) only appear on the live page.
    pub fn exported(&self) -> [&Figure; 5] {
        [
            &self.context,
            &self.volume_bubbles,
            &self.purpose_share,
            &self.purpose_history,
            &self.top_hubs,
        ]
    }

    pub fn all(&self) -> [&Figure; 8] {
        [
            &self.banner,
            &self.context,
            &self.origin_flows,
            &self.volume_animation,
            &self.volume_bubbles,
            &self.purpose_share,
            &self.purpose_history,
            &self.top_hubs,
        ]
    }

    /// Append the exported fragments to `path`, creating it if needed.
    ///
    /// Existing content is kept, so running twice duplicates the charts.
    pub fn export(&self, path: &Path, cdn_url: &str) -> Result<usize> {
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        let figures = self.exported();
        for fig in figures {
            file.write_all(fig.to_html_fragment(cdn_url)?.as_bytes())?;
        }
        file.flush()?;
        tracing::info!(path = %path.display(), fragments = figures.len(), "report appended");
        Ok(figures.len())
    }

    /// Standalone page with the banner and every chart.
    pub fn live_page(&self, cdn_url: &str) -> Result<String> {
        let mut body = String::new();
        for fig in self.all() {
            body.push_str(&fig.to_html_fragment(cdn_url)?);
        }
        Ok(format!(
            "<html>\n<head><meta charset=\"utf-8\" /></head>\n<body style=\"background:black;\">\n{body}</body>\n</html>\n"
        ))
    }
}

/// Load, aggregate, render and export according to `config`.
pub fn run(config: &ReportConfig) -> Result<usize> {
    let model = ArrivalsModel::load(&config.input_path)?;
    render(&model, config)
}

/// Build every chart from an already-loaded model and export it.
pub fn render(model: &ArrivalsModel, config: &ReportConfig) -> Result<usize> {
    let report = Report::build(model)?;
    if let Some(preview) = &config.preview_path {
        std::fs::write(preview, report.live_page(&config.plotly_cdn)?)?;
        tracing::info!(path = %preview.display(), "live page written");
    }
    report.export(&config.output_path, &config.plotly_cdn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PLOTLY_CDN;
    use crate::schema::indicator;

    const CSV_HEADER: &str = "reporter_area_label,partner_area_label,indicator_label,year,value\n";

    fn write_dataset(dir: &Path, rows: &[&str]) -> std::path::PathBuf {
        let path = dir.join("turismo.csv");
        let mut text = CSV_HEADER.to_string();
        for row in rows {
            text.push_str(row);
            text.push('\n');
        }
        std::fs::write(&path, text).unwrap();
        path
    }

    fn config(dir: &Path, input: std::path::PathBuf) -> ReportConfig {
        ReportConfig {
            input_path: input,
            output_path: dir.join("index.html"),
            ..ReportConfig::default()
        }
    }

    #[test]
    fn test_minimal_dataset_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_dataset(
            dir.path(),
            &["France,World,arrivals,2020,1000", "Ghana,Europe,arrivals,2020,50"],
        );
        let cfg = config(dir.path(), input);

        let model = ArrivalsModel::load(&cfg.input_path).unwrap();
        let report = Report::build(&model).unwrap();
        assert_eq!(report.context.data[0]["y"], serde_json::json!([1000.0]));
        assert_eq!(report.context.data[1]["y"], serde_json::json!([50.0]));

        assert_eq!(run(&cfg).unwrap(), 5);
        let html = std::fs::read_to_string(&cfg.output_path).unwrap();
        assert_eq!(html.matches("class=\"plotly-graph-div\"").count(), 5);
        assert_eq!(html.matches(PLOTLY_CDN).count(), 5);
        assert!(!html.contains("DASHBOARD"));
    }

    #[test]
    fn test_fragments_follow_declaration_order() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_dataset(
            dir.path(),
            &[
                "World,World,arrivals,2019,5000",
                &format!("Ghana,World,{},2019,10", indicator::RESIDENCE_TOTAL),
            ],
        );
        let cfg = config(dir.path(), input);
        run(&cfg).unwrap();
        let html = std::fs::read_to_string(&cfg.output_path).unwrap();

        let markers = [
            "Contexto:",
            "Países seleccionados:",
            "El principal tipo de turismo:",
            "Distribución histórica",
            "Principales 3 hubs",
        ];
        let positions: Vec<usize> = markers.iter().map(|m| html.find(m).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{positions:?}");
    }

    #[test]
    fn test_export_appends_on_every_run() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_dataset(dir.path(), &["Ghana,World,arrivals,2020,5"]);
        let cfg = config(dir.path(), input);
        std::fs::write(&cfg.output_path, "<!-- previous -->\n").unwrap();

        run(&cfg).unwrap();
        run(&cfg).unwrap();
        let html = std::fs::read_to_string(&cfg.output_path).unwrap();
        assert!(html.starts_with("<!-- previous -->"));
        assert_eq!(html.matches("Plotly.newPlot(").count(), 10);
    }

    #[test]
    fn test_load_failure_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config(dir.path(), dir.path().join("missing.xlsx"));
        assert!(run(&cfg).is_err());
        assert!(!cfg.output_path.exists());
    }

    #[test]
    fn test_live_page_includes_banner_and_all_charts() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_dataset(dir.path(), &["Ghana,World,arrivals,2020,5"]);
        let mut cfg = config(dir.path(), input);
        cfg.preview_path = Some(dir.path().join("preview.html"));
        run(&cfg).unwrap();

        let page = std::fs::read_to_string(dir.path().join("preview.html")).unwrap();
        assert!(page.starts_with("<html>"));
        assert!(page.contains("DASHBOARD"));
        assert_eq!(page.matches("class=\"plotly-graph-div\"").count(), 8);
        assert!(page.contains("Plotly.addFrames("));
    }
}
