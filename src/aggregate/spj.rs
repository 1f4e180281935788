use polars::prelude::*;
use tracing::debug;

use super::{check_groups, Aggregation, GroupSums, Strategy};
use crate::error::BenchResult;
use crate::generator::{Dataset, GROUP_COL, VALUE_COL};

pub const SPJ_GROUP_COL: &str = "group";
pub const SPJ_VALUE_COL: &str = "value";

#[derive(Debug, Clone, Copy, PartialEq)]
struct SpjRecord {
    group: u32,
    value: f64,
}

/// Same per-group scans as CASE, but results are appended to a record list and turned into
/// a `(group, value)` frame at the end. Every group in `0..d` gets a row; empty groups sum to 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpjAggregation;

impl Aggregation for SpjAggregation {
    fn strategy(&self) -> Strategy { Strategy::Spj }

    fn aggregate(&self, data: &Dataset, groups: u32) -> BenchResult<DataFrame> {
        check_groups(data, groups)?;
        let df = data.frame();
        let keys = df.column(GROUP_COL)?.i64()?;
        let mut result: Vec<SpjRecord> = Vec::new();
        for g in 0..groups {
            let subset = df.filter(&keys.equal(g as i64))?;
            let value = subset.column(VALUE_COL)?.f64()?.sum().unwrap_or(0.0);
            result.push(SpjRecord { group: g, value });
        }

        let (ids, values): (Vec<i64>, Vec<f64>) = result.iter().map(|r| (r.group as i64, r.value)).unzip();
        let out = DataFrame::new(vec![
            Column::new(SPJ_GROUP_COL.into(), ids),
            Column::new(SPJ_VALUE_COL.into(), values),
        ])?;
        debug!(target: "pivot_bench::aggregate", "SPJ output: rows={}", out.height());
        Ok(out)
    }

    fn group_sums(&self, frame: &DataFrame, _groups: u32) -> BenchResult<GroupSums> {
        let keys = frame.column(SPJ_GROUP_COL)?.i64()?;
        let sums = frame.column(SPJ_VALUE_COL)?.f64()?;
        Ok(keys
            .into_no_null_iter()
            .zip(sums.into_no_null_iter())
            .map(|(k, v)| (k as u32, v))
            .collect())
    }
}
