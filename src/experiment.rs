//! Experiment driver: run each sweep through the harness and chart it.

use std::fs;
use std::path::PathBuf;

use rand::Rng;
use serde::Serialize;
use tracing::{info, warn};

use crate::config::{RunConfig, SweepParam, SweepSpec};
use crate::error::BenchResult;
use crate::harness::{run_multiple, StrategyTimings, TrialParams};
use crate::plot::{plot_results, SweepChart};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SweepPoint {
    pub value: u64,
    pub timings: StrategyTimings,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExperimentResult {
    pub param: SweepParam,
    pub xlabel: &'static str,
    pub points: Vec<SweepPoint>,
}

impl ExperimentResult {
    pub fn x(&self) -> Vec<f64> { self.points.iter().map(|p| p.value as f64).collect() }

    pub fn pivot_times(&self) -> Vec<f64> { self.points.iter().map(|p| p.timings.pivot).collect() }

    pub fn case_times(&self) -> Vec<f64> { self.points.iter().map(|p| p.timings.case).collect() }

    pub fn spj_times(&self) -> Vec<f64> { self.points.iter().map(|p| p.timings.spj).collect() }
}

pub fn run_sweep<R: Rng + ?Sized>(spec: &SweepSpec, cfg: &RunConfig, rng: &mut R) -> BenchResult<ExperimentResult> {
    if spec.param == SweepParam::FhSize {
        warn!(
            target: "pivot_bench::experiment",
            "sweeping n: the FH table size is not used by generation or aggregation, this sweep measures timing noise only"
        );
    }
    let mut points = Vec::with_capacity(spec.values.len());
    for &value in &spec.values {
        let (rows, fh_size, groups) = spec.point(value)?;
        let params = TrialParams { rows, fh_size, groups, dist: cfg.dist, repetitions: cfg.repetitions };
        let timings = run_multiple(&params, rng)?;
        info!(
            target: "pivot_bench::experiment",
            "{}={}: avg pivot={:.6}s case={:.6}s spj={:.6}s",
            spec.param.axis_label(), value, timings.pivot, timings.case, timings.spj
        );
        points.push(SweepPoint { value, timings });
    }
    Ok(ExperimentResult { param: spec.param, xlabel: spec.param.axis_label(), points })
}

/// Chart one experiment into `cfg.out_dir`, returning the image path.
pub fn plot_experiment(result: &ExperimentResult, cfg: &RunConfig) -> BenchResult<PathBuf> {
    fs::create_dir_all(&cfg.out_dir)?;
    let path = cfg.out_dir.join(format!("{}.png", result.param.slug()));
    let (x, pivot, case, spj) = (result.x(), result.pivot_times(), result.case_times(), result.spj_times());
    let chart = SweepChart { x: &x, pivot: &pivot, case: &case, spj: &spj, xlabel: result.xlabel };
    plot_results(&chart, &path, cfg.image_size)?;
    info!(target: "pivot_bench::experiment", "wrote chart {}", path.display());
    Ok(path)
}

/// Run every configured sweep in order, charting each before starting the next.
pub fn run_all<R: Rng + ?Sized>(cfg: &RunConfig, rng: &mut R) -> BenchResult<Vec<(ExperimentResult, PathBuf)>> {
    let mut out = Vec::with_capacity(cfg.sweeps.len());
    for spec in &cfg.sweeps {
        info!(target: "pivot_bench::experiment", "sweep start: {} over {:?}", spec.param.axis_label(), spec.values);
        let result = run_sweep(spec, cfg, rng)?;
        let path = plot_experiment(&result, cfg)?;
        out.push((result, path));
    }
    Ok(out)
}
