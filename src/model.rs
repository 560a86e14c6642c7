use std::path::{Path, PathBuf};

use calamine::{open_workbook_auto, Data, Reader};
use polars::prelude::*;

use crate::aggregation::Aggregation;
use crate::error::{ReportError, Result};
use crate::filters;
use crate::region::STUDY_REGION;
use crate::schema::{indicator, observation, purpose, summary, years};

/// The cleaned observation table every stage reads from.
///
/// Stages never mutate it; each one clones the frame into its own lazy plan.
#[derive(Debug, Clone)]
pub struct ArrivalsModel {
    observations: DataFrame,
}

/// Global and study-region yearly totals.
#[derive(Debug, Clone)]
pub struct ContextSeries {
    pub world: DataFrame,
    pub region: DataFrame,
}

impl ArrivalsModel {
    // ── Data loading ────────────────────────────────────────────────────────

    /// Load and clean the observations file.
    ///
    /// `.csv` goes through the polars CSV reader; spreadsheet extensions go
    /// through calamine and only the first worksheet is read.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = read_as_strings(path)?;
        require_columns(&raw, &observation::REQUIRED)?;
        let model = Self::from_frame(raw)?;
        tracing::info!(
            path = %path.display(),
            rows = model.observations.height(),
            "observations loaded"
        );
        Ok(model)
    }

    /// Clean an already-loaded raw frame.
    pub fn from_frame(raw: DataFrame) -> Result<Self> {
        Ok(Self {
            observations: clean(raw)?,
        })
    }

    pub fn observations(&self) -> &DataFrame {
        &self.observations
    }

    fn scan(&self) -> LazyFrame {
        self.observations.clone().lazy()
    }

    fn study_region(&self) -> LazyFrame {
        self.scan().filter(filters::in_study_region())
    }

    // ── Stages ──────────────────────────────────────────────────────────────

    /// World-partner totals and study-region totals, summed per year.
    pub fn context_series(&self) -> Result<ContextSeries> {
        let by_year = Aggregation::sum(observation::VALUE).by(&[observation::YEAR]);
        let world = by_year.execute(self.scan().filter(filters::partner_is_world()))?;
        let region = by_year.execute(self.study_region())?;
        tracing::debug!(
            world_years = world.height(),
            region_years = region.height(),
            "context series aggregated"
        );
        Ok(ContextSeries { world, region })
    }

    /// Mean arrivals per (destination, origin region) over recent years.
    pub fn origin_flows(&self) -> Result<DataFrame> {
        let recent = self.study_region().filter(
            filters::indicator_contains(indicator::REGION_MARKER)
                .and(filters::partner_is_not_world())
                .and(filters::year_from(years::ORIGIN_FLOWS_FROM)),
        );
        Aggregation::avg(observation::VALUE)
            .by(&[observation::REPORTER_AREA, observation::PARTNER_AREA])
            .execute(recent)
    }

    /// Max value per (country, year) inside the study region.
    pub fn volume_by_country_year(&self) -> Result<DataFrame> {
        Aggregation::max(observation::VALUE)
            .by(&[observation::REPORTER_AREA, observation::YEAR])
            .execute(self.study_region())
    }

    /// Complete country × year grid for the animated bubble chart.
    ///
    /// `value` stays null where nothing was reported; `size_value` carries the
    /// same numbers with nulls replaced by zero.
    pub fn volume_grid(&self) -> Result<DataFrame> {
        let volume = self.volume_by_country_year()?;
        let grid = year_grid()?;
        let df = grid
            .lazy()
            .join(
                volume.lazy(),
                [col(observation::REPORTER_AREA), col(observation::YEAR)],
                [col(observation::REPORTER_AREA), col(observation::YEAR)],
                JoinArgs::new(JoinType::Left),
            )
            .sort_by_exprs([col(summary::GRID_ORDER)], SortMultipleOptions::default())
            .select([
                col(observation::REPORTER_AREA),
                col(observation::YEAR),
                col(observation::VALUE),
                col(observation::VALUE)
                    .fill_null(lit(0.0))
                    .alias(summary::SIZE_VALUE),
            ])
            .collect()?;
        Ok(df)
    }

    /// Country-year maxima with empty years removed.
    pub fn volume_points(&self) -> Result<DataFrame> {
        let df = self
            .volume_by_country_year()?
            .lazy()
            .filter(filters::value_positive())
            .collect()?;
        Ok(df)
    }

    /// Latest-year visitor-purpose split per country, as percentages.
    ///
    /// Countries with explicit business/total purpose rows are classified
    /// directly. Only countries with none of those fall back to their generic
    /// "total" indicators, reported as an undifferentiated category.
    pub fn purpose_share(&self) -> Result<DataFrame> {
        let scoped = self.study_region();

        let primary = scoped
            .clone()
            .with_columns([when(filters::indicator_is(indicator::PURPOSE_BUSINESS))
                .then(lit(purpose::BUSINESS))
                .when(filters::indicator_is(indicator::PURPOSE_TOTAL))
                .then(lit(purpose::LEISURE))
                .otherwise(lit(NULL).cast(DataType::String))
                .alias(summary::CATEGORY)])
            .filter(col(summary::CATEGORY).is_not_null())
            .collect()?;

        let classified = primary
            .column(observation::REPORTER_AREA)?
            .as_materialized_series()
            .unique()?;

        let fallback = scoped
            .filter(
                col(observation::REPORTER_AREA)
                    .is_in(lit(classified).implode(), false)
                    .not()
                    .and(filters::indicator_contains(indicator::TOTAL_MARKER)),
            )
            .with_columns([lit(purpose::UNSPECIFIED).alias(summary::CATEGORY)])
            .collect()?;

        let mut combined = primary;
        combined.vstack_mut(&fallback)?;

        let latest = combined
            .clone()
            .lazy()
            .filter(filters::value_positive())
            .group_by([col(observation::REPORTER_AREA)])
            .agg([col(observation::YEAR).max()]);

        let df = combined
            .lazy()
            .join(
                latest,
                [col(observation::REPORTER_AREA), col(observation::YEAR)],
                [col(observation::REPORTER_AREA), col(observation::YEAR)],
                JoinArgs::new(JoinType::Inner),
            )
            .with_columns([(col(observation::VALUE)
                / col(observation::VALUE)
                    .sum()
                    .over([col(observation::REPORTER_AREA)])
                * lit(100.0))
            .alias(summary::SHARE_PCT)])
            .sort_by_exprs(
                [
                    col(observation::REPORTER_AREA),
                    col(summary::CATEGORY),
                    col(observation::VALUE),
                ],
                SortMultipleOptions::default().with_order_descending_multi([false, false, true]),
            )
            .collect()?;
        Ok(df)
    }

    /// Yearly business vs personal-purpose rows, labelled by category.
    pub fn purpose_history(&self) -> Result<DataFrame> {
        let df = self
            .study_region()
            .with_columns([when(filters::indicator_is(indicator::PURPOSE_BUSINESS))
                .then(lit(purpose::BUSINESS))
                .when(filters::indicator_is(indicator::PURPOSE_PERSONAL))
                .then(lit(purpose::LEISURE))
                .otherwise(lit(NULL).cast(DataType::String))
                .alias(summary::CATEGORY)])
            .filter(col(summary::CATEGORY).is_not_null())
            .sort_by_exprs(
                [
                    col(observation::REPORTER_AREA),
                    col(summary::CATEGORY),
                    col(observation::YEAR),
                ],
                SortMultipleOptions::default(),
            )
            .collect()?;
        Ok(df)
    }

    /// The `n` study-region countries with the most residence-based overnight
    /// visitors since 2015, largest first.
    pub fn top_hubs(&self, n: u32) -> Result<DataFrame> {
        let recent = self.study_region().filter(
            filters::indicator_is(indicator::RESIDENCE_TOTAL)
                .and(filters::year_from(years::TOP_HUBS_FROM)),
        );
        let df = Aggregation::sum(observation::VALUE)
            .by(&[observation::REPORTER_AREA])
            .apply(recent)
            .sort_by_exprs(
                [col(observation::VALUE), col(observation::REPORTER_AREA)],
                SortMultipleOptions::default().with_order_descending_multi([true, false]),
            )
            .limit(n)
            .collect()?;
        Ok(df)
    }
}

// ── Loading helpers ─────────────────────────────────────────────────────────

fn read_as_strings(path: &Path) -> Result<DataFrame> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("csv") => read_csv_as_strings(path),
        Some("xlsx" | "xlsm" | "xlsb" | "xls" | "ods") => read_workbook_as_strings(path),
        _ => Err(ReportError::UnsupportedFormat(path.to_path_buf())),
    }
}

/// Read a CSV file with all columns as String dtype.
/// Trims whitespace from column names.
fn read_csv_as_strings(path: &Path) -> Result<DataFrame> {
    let mut df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0)) // all columns as String
        .try_into_reader_with_file_path(Some(PathBuf::from(path)))?
        .finish()?;

    let trimmed: Vec<String> = df
        .get_column_names_str()
        .iter()
        .map(|c| c.trim().to_string())
        .collect();
    df.set_column_names(trimmed.as_slice())?;
    Ok(df)
}

/// Read the first worksheet, header row first, every cell as an optional string.
fn read_workbook_as_strings(path: &Path) -> Result<DataFrame> {
    let mut workbook = open_workbook_auto(path)?;
    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| ReportError::EmptySheet(path.to_path_buf()))?;
    let range = workbook.worksheet_range(&sheet)?;

    let mut rows = range.rows();
    let header = rows
        .next()
        .ok_or_else(|| ReportError::EmptySheet(path.to_path_buf()))?;
    let names: Vec<String> = header
        .iter()
        .enumerate()
        .map(|(i, cell)| match cell_to_string(cell) {
            Some(name) if !name.trim().is_empty() => name.trim().to_string(),
            _ => format!("{}{i}", observation::UNNAMED_PREFIX),
        })
        .collect();

    let mut cells: Vec<Vec<Option<String>>> = vec![Vec::new(); names.len()];
    for row in rows {
        for (i, values) in cells.iter_mut().enumerate() {
            values.push(row.get(i).and_then(cell_to_string));
        }
    }

    let columns: Vec<Column> = names
        .iter()
        .zip(cells)
        .map(|(name, values)| Series::new(name.as_str().into(), values).into())
        .collect();
    Ok(DataFrame::new(columns)?)
}

fn cell_to_string(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) => Some(s.clone()),
        // Whole floats are written without a fraction so years parse as ints.
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => Some(format!("{}", *f as i64)),
        Data::Float(f) => Some(f.to_string()),
        Data::Int(i) => Some(i.to_string()),
        other => Some(other.to_string()),
    }
}

fn require_columns(df: &DataFrame, required: &[&str]) -> Result<()> {
    for &col_name in required {
        if df.column(col_name).is_err() {
            return Err(ReportError::MissingColumn(col_name.to_string()));
        }
    }
    Ok(())
}

// ── Cleaning ────────────────────────────────────────────────────────────────

/// Drop the extraneous columns and coerce `value` and `year`.
///
/// `value` ends up finite and non-negative: anything that fails to parse,
/// is missing, negative or non-finite becomes 0.
pub fn clean(raw: DataFrame) -> Result<DataFrame> {
    let mut df = raw;
    let extra: Vec<String> = df
        .get_column_names_str()
        .iter()
        .filter(|c| **c == observation::EXTRA || c.starts_with(observation::UNNAMED_PREFIX))
        .map(|c| c.to_string())
        .collect();
    for name in &extra {
        df = df.drop(name)?;
    }

    let value = as_float(&df, observation::VALUE)?;
    let year = as_float(&df, observation::YEAR)?;

    let df = df
        .lazy()
        .with_columns([
            value.fill_null(lit(0.0)).alias(observation::VALUE),
            year.cast(DataType::Int32).alias(observation::YEAR),
        ])
        .with_columns([when(
            col(observation::VALUE)
                .is_finite()
                .and(col(observation::VALUE).gt_eq(lit(0.0))),
        )
        .then(col(observation::VALUE))
        .otherwise(lit(0.0))
        .alias(observation::VALUE)])
        .collect()?;
    Ok(df)
}

/// Non-strict Float64 view of a column; string cells are trimmed first.
fn as_float(df: &DataFrame, name: &str) -> Result<Expr> {
    let dtype = df.column(name)?.dtype().clone();
    let expr = if dtype == DataType::String {
        col(name)
            .str()
            .strip_chars(lit(" \t\r\n"))
            .cast(DataType::Float64)
    } else {
        col(name).cast(DataType::Float64)
    };
    Ok(expr)
}

/// Every study-region country paired with every year of the grid window.
fn year_grid() -> Result<DataFrame> {
    let mut areas = Vec::new();
    let mut years_col = Vec::new();
    for area in STUDY_REGION {
        for year in years::GRID_FIRST..=years::GRID_LAST {
            areas.push(area);
            years_col.push(year);
        }
    }
    let order: Vec<u32> = (0..areas.len() as u32).collect();
    let df = DataFrame::new(vec![
        Series::new(observation::REPORTER_AREA.into(), areas).into(),
        Series::new(observation::YEAR.into(), years_col).into(),
        Series::new(summary::GRID_ORDER.into(), order).into(),
    ])?;
    Ok(df)
}
