//! Synthetic fact table generation.
//!
//! A dataset is a three column frame: `id` (row index), `grouping_column` (group in `[0, d)`)
//! and `value` (uniform in `[0, 1)`). Randomness always comes from the caller's `Rng`, so a
//! seeded `StdRng` reproduces a run exactly.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use polars::prelude::*;
use rand::Rng;
use rand_distr::{Distribution, Zeta};
use tracing::debug;

use crate::error::{BenchError, BenchResult};

pub const ID_COL: &str = "id";
pub const GROUP_COL: &str = "grouping_column";
pub const VALUE_COL: &str = "value";

/// Zipf shape parameter used for skewed group assignment.
pub const ZIPF_SHAPE: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupDistribution {
    Uniform,
    /// Zeta(2) draw reduced modulo `d`. The modulo folds the tail back onto the low groups,
    /// so the per-group skew is not a true Zipf over `[0, d)`.
    Zipf,
}

impl GroupDistribution {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupDistribution::Uniform => "uniform",
            GroupDistribution::Zipf => "zipf",
        }
    }
}

impl Default for GroupDistribution {
    fn default() -> Self { GroupDistribution::Uniform }
}

impl Display for GroupDistribution {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GroupDistribution {
    type Err = BenchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "uniform" => Ok(GroupDistribution::Uniform),
            "zipf" => Ok(GroupDistribution::Zipf),
            other => Err(BenchError::UnsupportedDistribution(other.to_string())),
        }
    }
}

/// One generated fact table together with the group count it was drawn for.
#[derive(Debug, Clone)]
pub struct Dataset {
    frame: DataFrame,
    groups: u32,
}

impl Dataset {
    /// Build a dataset from explicit group assignments and values; ids are the row indices.
    pub fn from_parts(grouping: Vec<i64>, values: Vec<f64>, groups: u32) -> BenchResult<Dataset> {
        if groups == 0 {
            return Err(BenchError::InvalidGroupCount(groups));
        }
        if let Some(&group) = grouping.iter().find(|&&g| g < 0 || g >= groups as i64) {
            return Err(BenchError::GroupOutOfRange { group, groups });
        }
        let ids: Vec<i64> = (0..grouping.len() as i64).collect();
        let frame = DataFrame::new(vec![
            Column::new(ID_COL.into(), ids),
            Column::new(GROUP_COL.into(), grouping),
            Column::new(VALUE_COL.into(), values),
        ])?;
        Ok(Dataset { frame, groups })
    }

    pub fn frame(&self) -> &DataFrame { &self.frame }

    pub fn groups(&self) -> u32 { self.groups }

    pub fn len(&self) -> usize { self.frame.height() }

    pub fn is_empty(&self) -> bool { self.frame.height() == 0 }

    /// Sum of `value` over every row.
    pub fn value_total(&self) -> BenchResult<f64> {
        Ok(self.frame.column(VALUE_COL)?.f64()?.sum().unwrap_or(0.0))
    }

    /// Group assignment of every row, in row order.
    pub fn group_ids(&self) -> BenchResult<Vec<i64>> {
        Ok(self.frame.column(GROUP_COL)?.i64()?.into_no_null_iter().collect())
    }
}

/// Generate a dataset from a distribution tag (`"uniform"` or `"zipf"`).
/// An unknown tag fails before any random draw is consumed.
pub fn gen_data<R: Rng + ?Sized>(rows: usize, groups: u32, dist: &str, rng: &mut R) -> BenchResult<Dataset> {
    let dist = GroupDistribution::from_str(dist)?;
    generate(rows, groups, dist, rng)
}

pub fn generate<R: Rng + ?Sized>(
    rows: usize,
    groups: u32,
    dist: GroupDistribution,
    rng: &mut R,
) -> BenchResult<Dataset> {
    if groups == 0 {
        return Err(BenchError::InvalidGroupCount(groups));
    }
    let d = groups as u64;

    let mut grouping: Vec<i64> = Vec::with_capacity(rows);
    match dist {
        GroupDistribution::Uniform => {
            for _ in 0..rows {
                grouping.push(rng.gen_range(0..d) as i64);
            }
        }
        GroupDistribution::Zipf => {
            let zeta = Zeta::new(ZIPF_SHAPE).map_err(|e| BenchError::config("zipf shape", e.to_string()))?;
            for _ in 0..rows {
                // samples are integral floats >= 1; `as` saturates the rare huge tail draw
                let k = zeta.sample(rng) as u64;
                grouping.push((k % d) as i64);
            }
        }
    }
    let values: Vec<f64> = (0..rows).map(|_| rng.gen::<f64>()).collect();

    let ds = Dataset::from_parts(grouping, values, groups)?;
    debug!(target: "pivot_bench::generator", "generated dataset: rows={} groups={} dist={}", rows, groups, dist);
    Ok(ds)
}
