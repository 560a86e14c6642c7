//! Visualization module: one chart builder per aggregation stage.
//!
//! Each builder reads a summary DataFrame, pulls the columns it needs into
//! plain vectors and emits plotly.js traces on the dark template. Colors come
//! from `region` so a country or purpose keeps the same color on every chart.
use std::collections::BTreeMap;

use polars::prelude::*;
use serde_json::{json, Value};

use crate::error::Result;
use crate::figure::Figure;
use crate::model::ContextSeries;
use crate::region::{self, GOLD, STUDY_REGION, VIVID};
use crate::schema::{observation, purpose, summary};

const ARRIVALS_LOG: &str = "Llegadas (miles) - escala logarítmica";
const YEAR_LABEL: &str = "Año";

const ANIMATION_SIZE_MAX: f64 = 60.0;
const STATIC_SIZE_MAX: f64 = 45.0;

const FACET_COLUMNS: usize = 3;
const FACET_COL_SPACING: f64 = 0.08;
const FACET_ROW_SPACING: f64 = 0.15;

// ── Column extraction ───────────────────────────────────────────────────────

fn strings(df: &DataFrame, name: &str) -> Result<Vec<String>> {
    Ok(df
        .column(name)?
        .str()?
        .into_iter()
        .map(|v| v.unwrap_or("").to_string())
        .collect())
}

fn floats(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    Ok(df.column(name)?.f64()?.into_iter().collect())
}

fn years(df: &DataFrame) -> Result<Vec<Option<i32>>> {
    Ok(df.column(observation::YEAR)?.i32()?.into_iter().collect())
}

/// plotly `sizeref` for area-scaled markers so the largest is `size_max` px.
fn area_sizeref(sizes: impl Iterator<Item = f64>, size_max: f64) -> f64 {
    let max = sizes.fold(0.0_f64, f64::max);
    if max > 0.0 {
        2.0 * max / (size_max * size_max)
    } else {
        1.0
    }
}

// ── Title banner ────────────────────────────────────────────────────────────

/// Annotation-only title card. Shown on the live page, never exported.
pub fn title_banner() -> Figure {
    let mut fig = Figure::default();
    let hidden = json!({"showgrid": false, "zeroline": false, "showticklabels": false});
    fig.update_layout(json!({
        "annotations": [{
            "text": "<b>DASHBOARD: DESTINOS TURÍSTICOS<br>PARA EL MERCADO DEL ARTE AFRICANO</b>\
                     <br><span style='font-size:18px; color:gray;'>Análisis de flujos turísticos \
                     en 6 países de África central y occidental</span>",
            "showarrow": false,
            "xref": "paper",
            "yref": "paper",
            "x": 0.5,
            "y": 0.5,
            "font": {"size": 35, "color": GOLD},
            "align": "center"
        }],
        "plot_bgcolor": "black",
        "paper_bgcolor": "black",
        "xaxis": hidden.clone(),
        "yaxis": hidden,
        "height": 250
    }));
    fig
}

// ── Context ─────────────────────────────────────────────────────────────────

pub fn context_chart(series: &ContextSeries) -> Result<Figure> {
    let mut fig = Figure::dark();
    fig.add_trace(json!({
        "type": "scatter",
        "mode": "lines",
        "name": "Mundo",
        "x": years(&series.world)?,
        "y": floats(&series.world, observation::VALUE)?,
        "line": {"color": "silver", "width": 2, "dash": "dot"}
    }));
    fig.add_trace(json!({
        "type": "scatter",
        "mode": "lines",
        "name": "África 6 (c/o)",
        "x": years(&series.region)?,
        "y": floats(&series.region, observation::VALUE)?,
        "line": {"color": GOLD, "width": 5}
    }));
    fig.update_layout(json!({
        "title": {"text": "<b>Contexto:</b> 6 países de África central y occidental en el turismo global"},
        "xaxis": {"title": {"text": YEAR_LABEL}},
        "yaxis": {"type": "log", "title": {"text": ARRIVALS_LOG}},
        "hovermode": "x unified"
    }));
    Ok(fig)
}

// ── Origin flows ────────────────────────────────────────────────────────────

pub fn origin_flow_chart(flows: &DataFrame) -> Result<Figure> {
    let destinations = strings(flows, observation::REPORTER_AREA)?;
    let origins = strings(flows, observation::PARTNER_AREA)?;
    let values = floats(flows, observation::VALUE)?;

    // Origins keep their first-appearance order.
    let mut order: Vec<&str> = Vec::new();
    for origin in &origins {
        if !order.contains(&origin.as_str()) {
            order.push(origin);
        }
    }

    let mut fig = Figure::dark();
    for (i, origin) in order.iter().enumerate() {
        let rows: Vec<usize> = (0..origins.len()).filter(|&r| origins[r] == *origin).collect();
        fig.add_trace(json!({
            "type": "bar",
            "orientation": "h",
            "name": origin,
            "legendgroup": origin,
            "x": rows.iter().map(|&r| values[r]).collect::<Vec<_>>(),
            "y": rows.iter().map(|&r| destinations[r].as_str()).collect::<Vec<_>>(),
            "marker": {"color": VIVID[i % VIVID.len()]},
            "hovertemplate": "Origen:=%{fullData.name}<br>Promedio llegadas (miles)=%{x}<br>País de destino=%{y}<extra></extra>"
        }));
    }
    fig.update_layout(json!({
        "title": {"text": "<b>Análisis de los flujos turísticos:</b> ¿quién visita estos países? (2016-2022)"},
        "barmode": "stack",
        "xaxis": {"title": {"text": "Promedio llegadas (miles)"}},
        "yaxis": {"title": {"text": "País de destino"}, "categoryorder": "total ascending"},
        "legend": {"title": {"text": "Origen:"}}
    }));
    Ok(fig)
}

// ── Volume evolution ────────────────────────────────────────────────────────

fn animate_args(target: Value, duration: u32) -> Value {
    json!([target, {
        "frame": {"duration": duration, "redraw": false},
        "mode": "immediate",
        "fromcurrent": true,
        "transition": {"duration": duration, "easing": "linear"}
    }])
}

/// Animated bubble chart over the full country × year grid, one frame per year.
pub fn volume_animation(grid: &DataFrame) -> Result<Figure> {
    let areas = strings(grid, observation::REPORTER_AREA)?;
    let grid_years = years(grid)?;
    let values = floats(grid, observation::VALUE)?;
    let sizes = floats(grid, summary::SIZE_VALUE)?;

    let sizeref = area_sizeref(sizes.iter().flatten().copied(), ANIMATION_SIZE_MAX);

    // year -> rows in grid order
    let mut by_year: BTreeMap<i32, Vec<usize>> = BTreeMap::new();
    for (row, year) in grid_years.iter().enumerate() {
        if let Some(year) = year {
            by_year.entry(*year).or_default().push(row);
        }
    }

    let bubble = |row: usize| {
        let area = areas[row].as_str();
        json!({
            "type": "scatter",
            "mode": "markers",
            "name": area,
            "legendgroup": area,
            "showlegend": true,
            "ids": [area],
            "hovertext": [area],
            "x": [grid_years[row]],
            "y": [values[row]],
            "marker": {
                "color": region::region_color(area),
                "size": [sizes[row].unwrap_or(0.0)],
                "sizemode": "area",
                "sizeref": sizeref,
                "symbol": "circle"
            },
            "hovertemplate": "<b>%{hovertext}</b><br><br>Año=%{x}<br>Llegadas (miles) - escala logarítmica=%{y}<extra></extra>"
        })
    };

    let mut fig = Figure::dark();
    let mut steps = Vec::with_capacity(by_year.len());
    for (i, (year, rows)) in by_year.iter().enumerate() {
        let traces: Vec<Value> = rows.iter().map(|&r| bubble(r)).collect();
        if i == 0 {
            fig.data = traces.clone();
        }
        let name = year.to_string();
        fig.frames.push(json!({"name": name, "data": traces}));
        steps.push(json!({
            "label": name,
            "method": "animate",
            "args": animate_args(json!([name]), 0)
        }));
    }

    let positives: Vec<f64> = values.iter().flatten().copied().filter(|v| *v > 0.0).collect();
    let mut yaxis = json!({"type": "log", "title": {"text": ARRIVALS_LOG}});
    if !positives.is_empty() {
        let min = positives.iter().copied().fold(f64::INFINITY, f64::min);
        let max = positives.iter().copied().fold(0.0_f64, f64::max);
        yaxis["range"] = json!([(min * 0.5).log10(), (max * 2.0).log10()]);
    }

    fig.update_layout(json!({
        "title": {"text": "<b>Evolución del mercado:</b> volumen de turistas (1995-2022)"},
        "xaxis": {"title": {"text": YEAR_LABEL}, "range": [1994, 2023]},
        "yaxis": yaxis,
        "legend": {"title": {"text": "País:"}, "itemsizing": "constant"},
        "updatemenus": [{
            "type": "buttons",
            "direction": "left",
            "showactive": false,
            "pad": {"r": 10, "t": 70},
            "x": 0.1, "xanchor": "right", "y": 0, "yanchor": "top",
            "buttons": [
                {"label": "&#9654;", "method": "animate", "args": animate_args(Value::Null, 500)},
                {"label": "&#9724;", "method": "animate", "args": animate_args(json!([null]), 0)}
            ]
        }],
        "sliders": [{
            "active": 0,
            "currentvalue": {"prefix": "Año="},
            "len": 0.9,
            "pad": {"b": 10, "t": 60},
            "x": 0.1, "xanchor": "left", "y": 0, "yanchor": "top",
            "steps": steps
        }]
    }));
    fig.enable_full_redraw();
    Ok(fig)
}

/// Static bubble chart of every positive country-year.
pub fn volume_bubbles(points: &DataFrame) -> Result<Figure> {
    let areas = strings(points, observation::REPORTER_AREA)?;
    let point_years = years(points)?;
    let values = floats(points, observation::VALUE)?;
    let sizeref = area_sizeref(values.iter().flatten().copied(), STATIC_SIZE_MAX);

    let mut fig = Figure::dark();
    for area in STUDY_REGION {
        let rows: Vec<usize> = (0..areas.len()).filter(|&r| areas[r] == area).collect();
        if rows.is_empty() {
            continue;
        }
        fig.add_trace(json!({
            "type": "scatter",
            "mode": "markers",
            "name": area,
            "legendgroup": area,
            "hovertext": rows.iter().map(|_| area).collect::<Vec<_>>(),
            "x": rows.iter().map(|&r| point_years[r]).collect::<Vec<_>>(),
            "y": rows.iter().map(|&r| values[r]).collect::<Vec<_>>(),
            "marker": {
                "color": region::region_color(area),
                "opacity": 0.8,
                "size": rows.iter().map(|&r| values[r].unwrap_or(0.0)).collect::<Vec<_>>(),
                "sizemode": "area",
                "sizeref": sizeref,
                "line": {"width": 0.5, "color": "darkgrey"}
            },
            "hovertemplate": "<b>%{hovertext}</b><br><br>Año=%{x}<br>Total llegadas (miles)=%{y}<extra></extra>"
        }));
    }
    fig.update_layout(json!({
        "hovermode": "closest",
        "legend": {"title": {"text": "Países seleccionados:"}, "itemsizing": "constant"},
        "xaxis": {"title": {"text": YEAR_LABEL}},
        "yaxis": {"type": "log", "title": {"text": ARRIVALS_LOG}}
    }));
    Ok(fig)
}

// ── Visitor purpose ─────────────────────────────────────────────────────────

/// 100% stacked horizontal bars of the latest-year purpose split.
pub fn purpose_share_chart(share: &DataFrame) -> Result<Figure> {
    let areas = strings(share, observation::REPORTER_AREA)?;
    let categories = strings(share, summary::CATEGORY)?;
    let pct = floats(share, summary::SHARE_PCT)?;

    let mut fig = Figure::dark();
    for category in purpose::ORDER {
        let rows: Vec<usize> = (0..categories.len())
            .filter(|&r| categories[r] == category)
            .collect();
        if rows.is_empty() {
            continue;
        }
        fig.add_trace(json!({
            "type": "bar",
            "orientation": "h",
            "name": category,
            "legendgroup": category,
            "x": rows.iter().map(|&r| pct[r]).collect::<Vec<_>>(),
            "y": rows.iter().map(|&r| areas[r].as_str()).collect::<Vec<_>>(),
            "text": rows.iter().map(|&r| percent_label(pct[r])).collect::<Vec<_>>(),
            "textposition": "auto",
            "marker": {"color": region::purpose_color(category)},
            "hovertemplate": "Categoria=%{fullData.name}<br>Distribución (%)=%{x}<br>País=%{y}<br>text=%{text}<extra></extra>"
        }));
    }
    fig.update_layout(json!({
        "title": {"text": "<b>El principal tipo de turismo:</b> ¿ocio/cultura o negocios?"},
        "barmode": "relative",
        "xaxis": {"title": {"text": "Distribución del tipo de turismo en los países de la región"}},
        "yaxis": {
            "title": {"text": null},
            "categoryorder": "array",
            "categoryarray": STUDY_REGION.iter().rev().collect::<Vec<_>>()
        },
        "legend": {"title": {"text": "Categoria"}},
        "margin": {"l": 150}
    }));
    Ok(fig)
}

pub fn percent_label(pct: Option<f64>) -> String {
    format!("{:.1}%", pct.unwrap_or(0.0))
}

/// One line panel per country, three per row.
pub fn purpose_history_chart(history: &DataFrame) -> Result<Figure> {
    let areas = strings(history, observation::REPORTER_AREA)?;
    let categories = strings(history, summary::CATEGORY)?;
    let hist_years = years(history)?;
    let values = floats(history, observation::VALUE)?;

    let panels: Vec<&str> = STUDY_REGION
        .iter()
        .copied()
        .filter(|area| areas.iter().any(|a| a == area))
        .collect();

    let mut fig = Figure::dark();
    let mut annotations = Vec::with_capacity(panels.len());
    let mut seen_in_legend: Vec<&str> = Vec::new();

    let columns = panels.len().clamp(1, FACET_COLUMNS);
    let rows = panels.len().div_ceil(columns).max(1);
    let width = (1.0 - FACET_COL_SPACING * (columns - 1) as f64) / columns as f64;
    let height = (1.0 - FACET_ROW_SPACING * (rows - 1) as f64) / rows as f64;

    for (i, area) in panels.iter().enumerate() {
        let (row, column) = (i / columns, i % columns);
        let x0 = column as f64 * (width + FACET_COL_SPACING);
        let top = 1.0 - row as f64 * (height + FACET_ROW_SPACING);
        let suffix = if i == 0 { String::new() } else { (i + 1).to_string() };

        let mut xaxis = json!({
            "domain": [x0, x0 + width],
            "anchor": format!("y{suffix}"),
            "showticklabels": true
        });
        if row == rows - 1 {
            xaxis["title"] = json!({"text": YEAR_LABEL});
        }
        let mut yaxis = json!({
            "domain": [top - height, top],
            "anchor": format!("x{suffix}"),
            "showticklabels": column == 0
        });
        if i > 0 {
            yaxis["matches"] = json!("y");
        }
        if column == 0 {
            yaxis["title"] = json!({"text": "Llegadas (miles)"});
        }
        fig.layout.insert(format!("xaxis{suffix}"), xaxis);
        fig.layout.insert(format!("yaxis{suffix}"), yaxis);

        for category in [purpose::LEISURE, purpose::BUSINESS] {
            let points: Vec<usize> = (0..areas.len())
                .filter(|&r| areas[r] == *area && categories[r] == category)
                .collect();
            if points.is_empty() {
                continue;
            }
            let first = !seen_in_legend.contains(&category);
            if first {
                seen_in_legend.push(category);
            }
            fig.add_trace(json!({
                "type": "scatter",
                "mode": "lines",
                "name": category,
                "legendgroup": category,
                "showlegend": first,
                "xaxis": format!("x{suffix}"),
                "yaxis": format!("y{suffix}"),
                "x": points.iter().map(|&r| hist_years[r]).collect::<Vec<_>>(),
                "y": points.iter().map(|&r| values[r]).collect::<Vec<_>>(),
                "line": {"color": region::purpose_color(category)},
                "hovertemplate": "Propósito=%{fullData.name}<br>Año=%{x}<br>Llegadas (miles)=%{y}<extra></extra>"
            }));
        }

        annotations.push(json!({
            "text": format!("{}={}", observation::REPORTER_AREA, area),
            "showarrow": false,
            "xref": "paper",
            "yref": "paper",
            "x": x0 + width / 2.0,
            "y": top,
            "xanchor": "center",
            "yanchor": "bottom",
            "font": {}
        }));
    }

    fig.update_layout(json!({
        "title": {"text": "<b>Distribución histórica con los datos disponibles en los últimos años</b> "},
        "annotations": annotations,
        "margin": {"t": 100, "b": 80, "l": 50, "r": 50},
        "showlegend": true,
        "legend": {
            "yanchor": "bottom",
            "y": 0.01,
            "xanchor": "right",
            "x": 0.99,
            "bgcolor": "rgba(0,0,0,0)",
            "borderwidth": 0,
            "title": {"text": ""}
        }
    }));
    fig.bold_facet_titles();
    Ok(fig)
}

// ── Top hubs ────────────────────────────────────────────────────────────────

pub fn top_hubs_chart(hubs: &DataFrame) -> Result<Figure> {
    let areas = strings(hubs, observation::REPORTER_AREA)?;
    let values = floats(hubs, observation::VALUE)?;
    let colors: Vec<Option<&str>> = areas.iter().map(|a| region::region_color(a)).collect();

    let mut fig = Figure::dark();
    fig.add_trace(json!({
        "type": "pie",
        "labels": areas,
        "values": values,
        "hole": 0.6,
        "marker": {"colors": colors},
        "textfont": {"size": 14, "color": "white"},
        "hovertemplate": "reporter_area_label=%{label}<br>value=%{value}<extra></extra>"
    }));
    fig.update_layout(json!({
        "title": {"text": "<b>Principales 3 hubs para inversión:</b> capacidad para atraer visitantes (cuota llegadas internacionales)"},
        "legend": {"tracegroupgap": 0}
    }));
    Ok(fig)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ArrivalsModel;
    use crate::schema::indicator;

    fn model() -> ArrivalsModel {
        let rows = [
            ("World", "World", "arrivals", "2019", "5000"),
            ("Ghana", "World", indicator::RESIDENCE_TOTAL, "2019", "900"),
            ("Ghana", "Europe", "by region", "2019", "300"),
            ("Ghana", "Africa", "by region", "2019", "200"),
            ("Gabon", "Africa", "by region", "2018", "50"),
            ("Gabon", "World", indicator::RESIDENCE_TOTAL, "2017", "120"),
            ("Ghana", "World", indicator::PURPOSE_BUSINESS, "2019", "100"),
            ("Ghana", "World", indicator::PURPOSE_TOTAL, "2019", "300"),
            ("Ghana", "World", indicator::PURPOSE_PERSONAL, "2018", "250"),
            ("Congo", "World", indicator::PURPOSE_BUSINESS, "2016", "10"),
            ("Congo", "World", indicator::PURPOSE_PERSONAL, "2016", "20"),
        ];
        let df = df!(
            observation::REPORTER_AREA => rows.iter().map(|r| r.0).collect::<Vec<_>>(),
            observation::PARTNER_AREA => rows.iter().map(|r| r.1).collect::<Vec<_>>(),
            observation::INDICATOR => rows.iter().map(|r| r.2).collect::<Vec<_>>(),
            observation::YEAR => rows.iter().map(|r| r.3).collect::<Vec<_>>(),
            observation::VALUE => rows.iter().map(|r| r.4).collect::<Vec<_>>()
        )
        .unwrap();
        ArrivalsModel::from_frame(df).unwrap()
    }

    #[test]
    fn test_title_banner_has_no_data() {
        let fig = title_banner();
        assert!(fig.data.is_empty());
        assert_eq!(fig.annotations().len(), 1);
        assert_eq!(fig.layout["height"], 250);
    }

    #[test]
    fn test_context_chart_two_series_log_axis() {
        let fig = context_chart(&model().context_series().unwrap()).unwrap();
        assert_eq!(fig.data.len(), 2);
        assert_eq!(fig.data[0]["name"], "Mundo");
        assert_eq!(fig.data[0]["x"], json!([2016, 2017, 2018, 2019]));
        assert_eq!(fig.data[0]["y"][3], json!(6300.0));
        assert_eq!(fig.data[1]["y"][3], json!(1800.0));
        assert_eq!(fig.layout["yaxis"]["type"], "log");
        assert_eq!(fig.layout["hovermode"], "x unified");
    }

    #[test]
    fn test_origin_flow_chart_one_trace_per_origin() {
        let fig = origin_flow_chart(&model().origin_flows().unwrap()).unwrap();
        let names: Vec<&str> = fig.data.iter().filter_map(|t| t["name"].as_str()).collect();
        assert_eq!(names, vec!["Africa", "Europe"]);
        assert_eq!(fig.data[0]["y"], json!(["Gabon", "Ghana"]));
        assert_eq!(fig.layout["barmode"], "stack");
        assert_eq!(fig.layout["yaxis"]["categoryorder"], "total ascending");
    }

    #[test]
    fn test_volume_animation_frames_and_redraw() {
        let m = model();
        let fig = volume_animation(&m.volume_grid().unwrap()).unwrap();
        assert_eq!(fig.frames.len(), 28);
        assert_eq!(fig.frames[0]["name"], "1995");
        assert_eq!(fig.frames[27]["name"], "2022");
        assert_eq!(fig.data.len(), STUDY_REGION.len());
        assert_eq!(fig.layout["sliders"][0]["steps"].as_array().unwrap().len(), 28);

        let json = fig.to_json().unwrap();
        assert!(!json.contains("\"redraw\":false"));

        // Missing years keep a null position but a zero size.
        assert_eq!(fig.data[0]["y"], json!([null]));
        assert_eq!(fig.data[0]["marker"]["size"], json!([0.0]));
    }

    #[test]
    fn test_volume_animation_log_range_uses_positive_values() {
        let fig = volume_animation(&model().volume_grid().unwrap()).unwrap();
        let range = fig.layout["yaxis"]["range"].as_array().unwrap();
        // Smallest positive is Congo 2016 (20), largest Ghana 2019 (900).
        let low = range[0].as_f64().unwrap();
        let high = range[1].as_f64().unwrap();
        assert!((low - 10.0_f64.log10()).abs() < 1e-9);
        assert!((high - 1800.0_f64.log10()).abs() < 1e-9);
    }

    #[test]
    fn test_volume_bubbles_follow_region_order() {
        let fig = volume_bubbles(&model().volume_points().unwrap()).unwrap();
        let names: Vec<&str> = fig.data.iter().filter_map(|t| t["name"].as_str()).collect();
        assert_eq!(names, vec!["Ghana", "Gabon", "Congo"]);
        assert_eq!(fig.data[0]["marker"]["color"], "#006B3F");
        assert_eq!(fig.data[0]["marker"]["line"]["color"], "darkgrey");
        assert_eq!(fig.data[0]["marker"]["opacity"], 0.8);
        assert!(fig.data[0].get("opacity").is_none());
        assert_eq!(fig.layout["yaxis"]["type"], "log");
    }

    #[test]
    fn test_purpose_share_chart_labels() {
        let fig = purpose_share_chart(&model().purpose_share().unwrap()).unwrap();
        let names: Vec<&str> = fig.data.iter().filter_map(|t| t["name"].as_str()).collect();
        assert_eq!(
            names,
            vec![purpose::LEISURE, purpose::BUSINESS, purpose::UNSPECIFIED]
        );
        assert_eq!(fig.data[0]["text"], json!(["75.0%"]));
        assert_eq!(fig.data[1]["y"], json!(["Congo", "Ghana"]));
        assert_eq!(fig.data[2]["y"], json!(["Gabon"]));
        assert_eq!(fig.data[1]["marker"]["color"], "#0E14E0");
        assert_eq!(fig.layout["margin"]["l"], 150);
    }

    #[test]
    fn test_percent_label_one_decimal() {
        assert_eq!(percent_label(Some(33.333)), "33.3%");
        assert_eq!(percent_label(Some(100.0)), "100.0%");
    }

    #[test]
    fn test_purpose_history_facets() {
        let fig = purpose_history_chart(&model().purpose_history().unwrap()).unwrap();
        let titles: Vec<&str> = fig
            .annotations()
            .iter()
            .filter_map(|a| a["text"].as_str())
            .collect();
        assert_eq!(titles, vec!["<b>Ghana</b>", "<b>Congo</b>"]);
        assert_eq!(fig.layout["xaxis"]["showticklabels"], true);
        assert_eq!(fig.layout["xaxis2"]["showticklabels"], true);
        assert!(fig.layout["xaxis2"].get("matches").is_none());
        assert_eq!(fig.data.len(), 4);
        let legend_entries = fig.data.iter().filter(|t| t["showlegend"] == true).count();
        assert_eq!(legend_entries, 2);
    }

    #[test]
    fn test_top_hubs_chart_is_donut() {
        let fig = top_hubs_chart(&model().top_hubs(3).unwrap()).unwrap();
        assert_eq!(fig.data.len(), 1);
        assert_eq!(fig.data[0]["hole"], 0.6);
        assert_eq!(fig.data[0]["labels"], json!(["Ghana", "Gabon"]));
        assert_eq!(fig.data[0]["marker"]["colors"], json!(["#006B3F", "#FCD116"]));
    }
}
