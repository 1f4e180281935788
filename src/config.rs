//! Run configuration: the three fixed sweeps plus output location and seed.
//!
//! Only two knobs come from the environment:
//! - `PIVOT_BENCH_OUT_DIR`: directory for chart images (default `plots`)
//! - `PIVOT_BENCH_SEED`: optional `u64` seed for the shared `StdRng`

use std::path::PathBuf;

use serde::Serialize;

use crate::error::{BenchError, BenchResult};
use crate::generator::GroupDistribution;

pub const ENV_OUT_DIR: &str = "PIVOT_BENCH_OUT_DIR";
pub const ENV_SEED: &str = "PIVOT_BENCH_SEED";

pub const DEFAULT_REPETITIONS: usize = 5;
pub const DEFAULT_OUT_DIR: &str = "plots";

/// Which parameter a sweep varies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SweepParam {
    /// Fact table size N.
    Rows,
    /// FH table size n (no effect on the workload).
    FhSize,
    /// Distinct grouping values d.
    Groups,
}

impl SweepParam {
    pub fn axis_label(&self) -> &'static str {
        match self {
            SweepParam::Rows => "Fact Table Size (N)",
            SweepParam::FhSize => "FH Table Size (n)",
            SweepParam::Groups => "Distinct Grouping Columns (d)",
        }
    }

    /// File stem for the chart image.
    pub fn slug(&self) -> &'static str {
        match self {
            SweepParam::Rows => "vary_table_size_n",
            SweepParam::FhSize => "vary_fh_table_size",
            SweepParam::Groups => "vary_distinct_groups_d",
        }
    }
}

/// One sweep: `param` takes each of `values`; the other two stay at the fixed values below.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepSpec {
    pub param: SweepParam,
    pub values: Vec<u64>,
    pub rows: usize,
    pub fh_size: usize,
    pub groups: u32,
}

impl SweepSpec {
    pub fn vary_rows() -> Self {
        SweepSpec { param: SweepParam::Rows, values: vec![1_000, 5_000, 10_000, 50_000, 100_000], rows: 0, fh_size: 1_000, groups: 16 }
    }

    pub fn vary_fh_size() -> Self {
        SweepSpec { param: SweepParam::FhSize, values: vec![1_000, 5_000, 10_000, 20_000], rows: 50_000, fh_size: 0, groups: 16 }
    }

    pub fn vary_groups() -> Self {
        SweepSpec { param: SweepParam::Groups, values: vec![8, 16, 32, 64, 128], rows: 50_000, fh_size: 1_000, groups: 0 }
    }

    /// `(N, n, d)` for one sweep point. A value that does not fit the parameter's type is an
    /// `InvalidConfig` error rather than a silent truncation.
    pub fn point(&self, value: u64) -> BenchResult<(usize, usize, u32)> {
        let out_of_range = |_| BenchError::config(self.param.axis_label(), format!("sweep value {} out of range", value));
        Ok(match self.param {
            SweepParam::Rows => (usize::try_from(value).map_err(out_of_range)?, self.fh_size, self.groups),
            SweepParam::FhSize => (self.rows, usize::try_from(value).map_err(out_of_range)?, self.groups),
            SweepParam::Groups => (self.rows, self.fh_size, u32::try_from(value).map_err(out_of_range)?),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub sweeps: Vec<SweepSpec>,
    pub repetitions: usize,
    pub dist: GroupDistribution,
    pub out_dir: PathBuf,
    pub seed: Option<u64>,
    /// Chart size in pixels (10x6 aspect).
    pub image_size: (u32, u32),
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            sweeps: vec![SweepSpec::vary_rows(), SweepSpec::vary_fh_size(), SweepSpec::vary_groups()],
            repetitions: DEFAULT_REPETITIONS,
            dist: GroupDistribution::Uniform,
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            seed: None,
            image_size: (1000, 600),
        }
    }
}

impl RunConfig {
    pub fn from_env() -> BenchResult<Self> {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    /// Overlay settings from an arbitrary key lookup (the environment in production).
    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> BenchResult<Self> {
        let mut cfg = RunConfig::default();
        if let Some(dir) = lookup(ENV_OUT_DIR).filter(|s| !s.trim().is_empty()) {
            cfg.out_dir = PathBuf::from(dir);
        }
        if let Some(raw) = lookup(ENV_SEED) {
            let seed = raw
                .trim()
                .parse::<u64>()
                .map_err(|e| BenchError::config(ENV_SEED, format!("'{}' is not a u64: {}", raw, e)))?;
            cfg.seed = Some(seed);
        }
        Ok(cfg)
    }
}
