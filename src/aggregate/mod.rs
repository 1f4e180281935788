//! Horizontal aggregation strategies.
//!
//! Each strategy turns a [`Dataset`] into its own native output frame (the thing being
//! timed) and can read that frame back into [`GroupSums`] for comparison:
//!
//! - PIVOT: one grouped pass, one row per observed group.
//! - CASE: d filtered passes written into an identity-indexed, one-column-per-group frame.
//! - SPJ: d filtered passes appended as records, converted to a frame at the end.

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use polars::prelude::DataFrame;
use serde::Serialize;

use crate::error::{BenchError, BenchResult};
use crate::generator::Dataset;

pub mod case;
pub mod pivot;
pub mod spj;

pub use case::CaseAggregation;
pub use pivot::PivotAggregation;
pub use spj::SpjAggregation;

/// Aggregating with a `groups` other than the dataset's own would silently drop or invent
/// groups in the per-group scans, so every strategy rejects it up front.
pub fn check_groups(data: &Dataset, groups: u32) -> BenchResult<()> {
    if groups != data.groups() {
        return Err(BenchError::GroupCountMismatch { expected: data.groups(), requested: groups });
    }
    Ok(())
}

pub trait Aggregation {
    fn strategy(&self) -> Strategy;

    /// Run the aggregation and return the strategy's native result frame.
    fn aggregate(&self, data: &Dataset, groups: u32) -> BenchResult<DataFrame>;

    /// Read a frame produced by [`Aggregation::aggregate`] back into per-group sums.
    fn group_sums(&self, frame: &DataFrame, groups: u32) -> BenchResult<GroupSums>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Strategy {
    Pivot,
    Case,
    Spj,
}

impl Strategy {
    /// All strategies in timing order.
    pub const ALL: [Strategy; 3] = [Strategy::Pivot, Strategy::Case, Strategy::Spj];

    pub fn label(&self) -> &'static str {
        match self {
            Strategy::Pivot => "PIVOT",
            Strategy::Case => "CASE",
            Strategy::Spj => "SPJ",
        }
    }

    pub fn aggregator(&self) -> &'static dyn Aggregation {
        match self {
            Strategy::Pivot => &PivotAggregation,
            Strategy::Case => &CaseAggregation,
            Strategy::Spj => &SpjAggregation,
        }
    }

    pub fn aggregate(&self, data: &Dataset, groups: u32) -> BenchResult<DataFrame> {
        self.aggregator().aggregate(data, groups)
    }

    /// Aggregate and read back in one step.
    pub fn sums(&self, data: &Dataset, groups: u32) -> BenchResult<GroupSums> {
        let agg = self.aggregator();
        let frame = agg.aggregate(data, groups)?;
        agg.group_sums(&frame, groups)
    }
}

impl Display for Strategy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Group id -> sum of `value`. Groups a strategy left unset are simply absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GroupSums(BTreeMap<u32, f64>);

impl GroupSums {
    pub fn new() -> Self { GroupSums(BTreeMap::new()) }

    pub fn insert(&mut self, group: u32, sum: f64) { self.0.insert(group, sum); }

    pub fn get(&self, group: u32) -> Option<f64> { self.0.get(&group).copied() }

    pub fn get_or_zero(&self, group: u32) -> f64 { self.get(group).unwrap_or(0.0) }

    pub fn groups(&self) -> impl Iterator<Item = u32> + '_ { self.0.keys().copied() }

    pub fn len(&self) -> usize { self.0.len() }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    pub fn total(&self) -> f64 { self.0.values().sum() }

    /// Compare over `0..groups`, treating absent entries as zero.
    pub fn approx_eq(&self, other: &GroupSums, groups: u32, tolerance: f64) -> bool {
        self.first_mismatch(other, groups, tolerance).is_none()
    }

    pub fn first_mismatch(&self, other: &GroupSums, groups: u32, tolerance: f64) -> Option<(u32, f64, f64)> {
        (0..groups)
            .map(|g| (g, self.get_or_zero(g), other.get_or_zero(g)))
            .find(|(_, a, b)| (a - b).abs() > tolerance)
    }
}

impl FromIterator<(u32, f64)> for GroupSums {
    fn from_iter<I: IntoIterator<Item = (u32, f64)>>(iter: I) -> Self {
        GroupSums(iter.into_iter().collect())
    }
}
