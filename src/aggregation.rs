use polars::prelude::*;

use crate::error::Result;

/// Declarative group-by + reduction.
///
/// Stages describe what they want; [`Aggregation::execute`] runs it against a
/// lazy frame and returns the rows sorted by the group keys.
#[derive(Debug, Clone)]
pub struct Aggregation {
    pub(crate) kind: AggKind,
    pub(crate) group_by: Vec<String>,
}

#[derive(Debug, Clone)]
pub enum AggKind {
    Sum {
        column: String,
        alias: Option<String>,
    },
    Avg {
        column: String,
        alias: Option<String>,
    },
    Max {
        column: String,
        alias: Option<String>,
    },
}

impl Aggregation {
    pub fn sum(column: &str) -> Self {
        Self::from_kind(AggKind::Sum {
            column: column.to_string(),
            alias: None,
        })
    }

    pub fn avg(column: &str) -> Self {
        Self::from_kind(AggKind::Avg {
            column: column.to_string(),
            alias: None,
        })
    }

    /// Per-group maximum. Used where several overlapping indicators report
    /// the same (area, year) and only the best-covered one should count.
    pub fn max(column: &str) -> Self {
        Self::from_kind(AggKind::Max {
            column: column.to_string(),
            alias: None,
        })
    }

    fn from_kind(kind: AggKind) -> Self {
        Self {
            kind,
            group_by: Vec::new(),
        }
    }

    /// Group keys, in output order.
    pub fn by(mut self, columns: &[&str]) -> Self {
        self.group_by = columns.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn alias(mut self, name: &str) -> Self {
        match &mut self.kind {
            AggKind::Sum { alias, .. } | AggKind::Avg { alias, .. } | AggKind::Max { alias, .. } => {
                *alias = Some(name.to_string())
            }
        }
        self
    }

    /// Name of the reduced column in the output frame.
    pub fn output_name(&self) -> &str {
        match &self.kind {
            AggKind::Sum { column, alias }
            | AggKind::Avg { column, alias }
            | AggKind::Max { column, alias } => alias.as_deref().unwrap_or(column),
        }
    }

    pub(crate) fn to_expr(&self) -> Expr {
        let reduced = match &self.kind {
            AggKind::Sum { column, .. } => col(column.as_str()).sum(),
            AggKind::Avg { column, .. } => col(column.as_str()).mean(),
            AggKind::Max { column, .. } => col(column.as_str()).max(),
        };
        reduced.alias(self.output_name())
    }

    fn key_exprs(&self) -> Vec<Expr> {
        self.group_by.iter().map(|c| col(c.as_str())).collect()
    }

    fn keys_present(&self) -> Option<Expr> {
        self.group_by
            .iter()
            .map(|c| col(c.as_str()).is_not_null())
            .reduce(|acc, e| acc.and(e))
    }

    /// Attach the aggregation to a lazy plan.
    ///
    /// Rows with a null group key are dropped before grouping.
    pub fn apply(&self, frame: LazyFrame) -> LazyFrame {
        let keys = self.key_exprs();
        let frame = match self.keys_present() {
            Some(predicate) => frame.filter(predicate),
            None => frame,
        };
        frame
            .group_by(keys.clone())
            .agg([self.to_expr()])
            .sort_by_exprs(keys, SortMultipleOptions::default())
    }

    pub fn execute(&self, frame: LazyFrame) -> Result<DataFrame> {
        Ok(self.apply(frame).collect()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DataFrame {
        df!(
            "area" => ["Ghana", "Ghana", "Gabon", "Ghana"],
            "year" => [2020i32, 2020, 2020, 2021],
            "value" => [10.0, 30.0, 5.0, 7.0]
        )
        .unwrap()
    }

    #[test]
    fn test_sum_groups_and_sorts_by_keys() {
        let out = Aggregation::sum("value")
            .by(&["area", "year"])
            .execute(sample().lazy())
            .unwrap();

        assert_eq!(out.height(), 3);
        let areas: Vec<_> = out.column("area").unwrap().str().unwrap().into_iter().collect();
        assert_eq!(areas, vec![Some("Gabon"), Some("Ghana"), Some("Ghana")]);
        let values = out.column("value").unwrap().f64().unwrap();
        assert_eq!(values.get(1), Some(40.0));
        assert_eq!(values.get(2), Some(7.0));
    }

    #[test]
    fn test_avg_and_max() {
        let avg = Aggregation::avg("value")
            .by(&["area"])
            .execute(sample().lazy())
            .unwrap();
        let ghana_avg = avg.column("value").unwrap().f64().unwrap().get(1).unwrap();
        assert!((ghana_avg - 47.0 / 3.0).abs() < 1e-9);

        let max = Aggregation::max("value")
            .by(&["area"])
            .execute(sample().lazy())
            .unwrap();
        assert_eq!(max.column("value").unwrap().f64().unwrap().get(1), Some(30.0));
    }

    #[test]
    fn test_null_keys_are_not_grouped() {
        let df = df!(
            "area" => ["Ghana", "Ghana", "Gabon"],
            "year" => [Some(2020i32), None, Some(2020)],
            "value" => [5.0, 7.0, 1.0]
        )
        .unwrap();
        let out = Aggregation::sum("value")
            .by(&["year"])
            .execute(df.lazy())
            .unwrap();
        assert_eq!(out.height(), 1);
        assert_eq!(out.column("value").unwrap().f64().unwrap().get(0), Some(6.0));
    }

    #[test]
    fn test_alias_renames_output() {
        let agg = Aggregation::sum("value").alias("total").by(&["year"]);
        assert_eq!(agg.output_name(), "total");
        let out = agg.execute(sample().lazy()).unwrap();
        assert!(out.column("total").is_ok());
        assert_eq!(out.column("total").unwrap().f64().unwrap().get(0), Some(45.0));
    }
}
