//! Timing harness: fresh dataset per repetition, then PIVOT, CASE, SPJ timed in that order.
//!
//! The fixed order means later strategies in a trial run against caches warmed (or thrashed)
//! by the earlier ones; averages are reported as measured.

use std::time::Instant;

use rand::Rng;
use serde::Serialize;
use tracing::debug;

use crate::aggregate::Strategy;
use crate::error::{BenchError, BenchResult};
use crate::generator::{generate, GroupDistribution};

/// Seconds per strategy: one trial's measurements, or a mean over trials.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct StrategyTimings {
    pub pivot: f64,
    pub case: f64,
    pub spj: f64,
}

impl StrategyTimings {
    pub fn get(&self, strategy: Strategy) -> f64 {
        match strategy {
            Strategy::Pivot => self.pivot,
            Strategy::Case => self.case,
            Strategy::Spj => self.spj,
        }
    }

    fn set(&mut self, strategy: Strategy, secs: f64) {
        match strategy {
            Strategy::Pivot => self.pivot = secs,
            Strategy::Case => self.case = secs,
            Strategy::Spj => self.spj = secs,
        }
    }

    /// Arithmetic mean per strategy. Returns `None` for an empty slice.
    pub fn mean(trials: &[StrategyTimings]) -> Option<StrategyTimings> {
        if trials.is_empty() {
            return None;
        }
        let n = trials.len() as f64;
        let mut out = StrategyTimings::default();
        for s in Strategy::ALL {
            out.set(s, trials.iter().map(|t| t.get(s)).sum::<f64>() / n);
        }
        Some(out)
    }
}

/// Parameters of one harness invocation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrialParams {
    pub rows: usize,
    /// Secondary table size. Accepted for parity with the experiment layout; it has no effect
    /// on generation or aggregation.
    pub fh_size: usize,
    pub groups: u32,
    pub dist: GroupDistribution,
    pub repetitions: usize,
}

/// Run a single trial: generate a dataset and time each strategy once.
pub fn run_trial<R: Rng + ?Sized>(rows: usize, groups: u32, dist: GroupDistribution, rng: &mut R) -> BenchResult<StrategyTimings> {
    let data = generate(rows, groups, dist, rng)?;
    let mut timings = StrategyTimings::default();
    for s in Strategy::ALL {
        let start = Instant::now();
        let out = s.aggregate(&data, groups)?;
        let secs = start.elapsed().as_secs_f64();
        drop(out);
        timings.set(s, secs);
    }
    Ok(timings)
}

/// Average each strategy's wall-clock time over `repetitions` independent trials.
pub fn run_multiple<R: Rng + ?Sized>(params: &TrialParams, rng: &mut R) -> BenchResult<StrategyTimings> {
    if params.repetitions == 0 {
        return Err(BenchError::InvalidRepetitions(params.repetitions));
    }
    let mut trials: Vec<StrategyTimings> = Vec::with_capacity(params.repetitions);
    for rep in 0..params.repetitions {
        let t = run_trial(params.rows, params.groups, params.dist, rng)?;
        debug!(
            target: "pivot_bench::harness",
            "trial {}/{}: N={} n={} d={} pivot={:.6}s case={:.6}s spj={:.6}s",
            rep + 1, params.repetitions, params.rows, params.fh_size, params.groups, t.pivot, t.case, t.spj
        );
        trials.push(t);
    }
    StrategyTimings::mean(&trials).ok_or(BenchError::InvalidRepetitions(0))
}
