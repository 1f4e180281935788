//! Cross-strategy agreement check.

use tracing::debug;

use crate::aggregate::{GroupSums, Strategy};
use crate::error::{BenchError, BenchResult};
use crate::generator::Dataset;

/// Absolute tolerance used when no better one is known; sums of values in `[0, 1)` stay small
/// enough at benchmark sizes for this to absorb reordering error.
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// Run all three strategies on `data` and require every group in `0..groups` to agree
/// (absent entries count as zero). Returns the sums of each strategy in timing order.
pub fn cross_check(data: &Dataset, groups: u32, tolerance: f64) -> BenchResult<Vec<(Strategy, GroupSums)>> {
    let mut all: Vec<(Strategy, GroupSums)> = Vec::with_capacity(Strategy::ALL.len());
    for s in Strategy::ALL {
        all.push((s, s.sums(data, groups)?));
    }
    let (base, base_sums) = &all[0];
    for (other, sums) in all.iter().skip(1) {
        if let Some((group, left_sum, right_sum)) = base_sums.first_mismatch(sums, groups, tolerance) {
            return Err(BenchError::StrategyMismatch { left: base.label(), right: other.label(), group, left_sum, right_sum });
        }
    }
    debug!(target: "pivot_bench::verify", "strategies agree: rows={} groups={}", data.len(), groups);
    Ok(all)
}
