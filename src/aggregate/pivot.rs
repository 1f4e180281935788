use polars::prelude::*;
use tracing::debug;

use super::{check_groups, Aggregation, GroupSums, Strategy};
use crate::error::BenchResult;
use crate::generator::{Dataset, GROUP_COL, VALUE_COL};

/// Single pass hashed grouping: `group_by(grouping_column).agg(sum(value))`, sorted by group.
/// Groups with no rows do not appear in the output.
#[derive(Debug, Clone, Copy, Default)]
pub struct PivotAggregation;

impl Aggregation for PivotAggregation {
    fn strategy(&self) -> Strategy { Strategy::Pivot }

    fn aggregate(&self, data: &Dataset, groups: u32) -> BenchResult<DataFrame> {
        check_groups(data, groups)?;
        let out = data
            .frame()
            .clone()
            .lazy()
            .group_by([col(GROUP_COL)])
            .agg([col(VALUE_COL).sum()])
            .collect()?;
        let out = out.sort([GROUP_COL], SortMultipleOptions::default())?;
        debug!(target: "pivot_bench::aggregate", "PIVOT output: rows={}", out.height());
        Ok(out)
    }

    fn group_sums(&self, frame: &DataFrame, _groups: u32) -> BenchResult<GroupSums> {
        let keys = frame.column(GROUP_COL)?.i64()?;
        let sums = frame.column(VALUE_COL)?.f64()?;
        Ok(keys
            .into_iter()
            .zip(sums.into_iter())
            .filter_map(|(k, v)| Some((k? as u32, v.unwrap_or(0.0))))
            .collect())
    }
}
