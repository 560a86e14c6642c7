//! Row predicates shared by the aggregation stages.

use polars::prelude::*;

use crate::region::STUDY_REGION;
use crate::schema::{observation, partner};

fn study_region_series() -> Series {
    Series::new("study_region".into(), &STUDY_REGION)
}

/// Reporting area belongs to the study region.
pub fn in_study_region() -> Expr {
    col(observation::REPORTER_AREA).is_in(lit(study_region_series()).implode(), false)
}

pub fn partner_is_world() -> Expr {
    col(observation::PARTNER_AREA).eq(lit(partner::WORLD))
}

pub fn partner_is_not_world() -> Expr {
    col(observation::PARTNER_AREA).neq(lit(partner::WORLD))
}

pub fn indicator_is(label: &str) -> Expr {
    col(observation::INDICATOR).eq(lit(label))
}

/// Case-insensitive substring match on the indicator label.
pub fn indicator_contains(needle: &str) -> Expr {
    col(observation::INDICATOR)
        .str()
        .to_lowercase()
        .str()
        .contains_literal(lit(needle.to_lowercase()))
}

pub fn year_from(first: i32) -> Expr {
    col(observation::YEAR).gt_eq(lit(first))
}

pub fn value_positive() -> Expr {
    col(observation::VALUE).gt(lit(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> DataFrame {
        df!(
            observation::REPORTER_AREA => ["Ghana", "France", "Gabon"],
            observation::PARTNER_AREA => ["World", "Europe", "World"],
            observation::INDICATOR => ["Arrivals by REGION", "total arrivals", "Total"],
            observation::YEAR => [2016i32, 2018, 2020],
            observation::VALUE => [1.0, 0.0, 3.0]
        )
        .unwrap()
    }

    fn count(predicate: Expr) -> usize {
        frame().lazy().filter(predicate).collect().unwrap().height()
    }

    #[test]
    fn test_study_region_membership() {
        assert_eq!(count(in_study_region()), 2);
        assert_eq!(count(in_study_region().not()), 1);
    }

    #[test]
    fn test_partner_predicates() {
        assert_eq!(count(partner_is_world()), 2);
        assert_eq!(count(partner_is_not_world()), 1);
    }

    #[test]
    fn test_indicator_contains_ignores_case() {
        assert_eq!(count(indicator_contains("region")), 1);
        assert_eq!(count(indicator_contains("TOTAL")), 2);
        assert_eq!(count(indicator_is("Total")), 1);
    }

    #[test]
    fn test_year_and_value() {
        assert_eq!(count(year_from(2018)), 2);
        assert_eq!(count(value_positive()), 2);
    }
}
