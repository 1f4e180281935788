use polars::prelude::*;
use tracing::debug;

use super::{check_groups, Aggregation, GroupSums, Strategy};
use crate::error::BenchResult;
use crate::generator::{Dataset, GROUP_COL, VALUE_COL};

pub const CASE_GROUP_COL: &str = "group";

pub fn case_col(group: u32) -> String { format!("case_{}", group) }

/// One full filter-and-sum scan per group, written horizontally: the output has an identity
/// `group` column `0..d` plus one `case_<g>` column per group whose only non-null cell is
/// row `g`. A group with no matching rows keeps a null cell.
#[derive(Debug, Clone, Copy, Default)]
pub struct CaseAggregation;

impl Aggregation for CaseAggregation {
    fn strategy(&self) -> Strategy { Strategy::Case }

    fn aggregate(&self, data: &Dataset, groups: u32) -> BenchResult<DataFrame> {
        check_groups(data, groups)?;
        let ids: Vec<i64> = (0..groups as i64).collect();
        let mut agg = DataFrame::new(vec![Column::new(CASE_GROUP_COL.into(), ids)])?;
        let df = data.frame();
        let keys = df.column(GROUP_COL)?.i64()?;
        for g in 0..groups {
            let subset = df.filter(&keys.equal(g as i64))?;
            let mut cells: Vec<Option<f64>> = vec![None; groups as usize];
            if subset.height() > 0 {
                cells[g as usize] = subset.column(VALUE_COL)?.f64()?.sum();
            }
            agg.with_column(Column::new(case_col(g).into(), cells))?;
        }
        debug!(target: "pivot_bench::aggregate", "CASE output: rows={} cols={}", agg.height(), agg.width());
        Ok(agg)
    }

    fn group_sums(&self, frame: &DataFrame, groups: u32) -> BenchResult<GroupSums> {
        let mut out = GroupSums::new();
        for g in 0..groups {
            if let Some(v) = frame.column(&case_col(g))?.f64()?.get(g as usize) {
                out.insert(g, v);
            }
        }
        Ok(out)
    }
}
