//! Unified benchmark error model.
//! Every fallible operation in the crate (generation, aggregation, timing, plotting, config)
//! returns `BenchResult<T>`; the binary wraps it into `anyhow` at the top level.

use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BenchError {
    #[error("Unsupported Distribution: '{0}' (expected 'uniform' or 'zipf')")]
    UnsupportedDistribution(String),
    #[error("group count must be at least 1, got {0}")]
    InvalidGroupCount(u32),
    #[error("group {group} outside [0, {groups})")]
    GroupOutOfRange { group: i64, groups: u32 },
    #[error("dataset was generated for {expected} groups, aggregation asked for {requested}")]
    GroupCountMismatch { expected: u32, requested: u32 },
    #[error("repetitions must be at least 1, got {0}")]
    InvalidRepetitions(usize),
    #[error("invalid configuration for {key}: {message}")]
    InvalidConfig { key: String, message: String },
    #[error("{left} and {right} disagree on group {group}: {left_sum} vs {right_sum}")]
    StrategyMismatch {
        left: &'static str,
        right: &'static str,
        group: u32,
        left_sum: f64,
        right_sum: f64,
    },
    #[error("plot error: {0}")]
    Plot(String),
    #[error(transparent)]
    Polars(#[from] PolarsError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl BenchError {
    pub fn code_str(&self) -> &'static str {
        match self {
            BenchError::UnsupportedDistribution(_) => "unsupported_distribution",
            BenchError::InvalidGroupCount(_) => "invalid_group_count",
            BenchError::GroupOutOfRange { .. } => "group_out_of_range",
            BenchError::GroupCountMismatch { .. } => "group_count_mismatch",
            BenchError::InvalidRepetitions(_) => "invalid_repetitions",
            BenchError::InvalidConfig { .. } => "invalid_config",
            BenchError::StrategyMismatch { .. } => "strategy_mismatch",
            BenchError::Plot(_) => "plot_error",
            BenchError::Polars(_) => "polars_error",
            BenchError::Io(_) => "io_error",
        }
    }

    pub fn config<K: Into<String>, M: Into<String>>(key: K, msg: M) -> Self {
        BenchError::InvalidConfig { key: key.into(), message: msg.into() }
    }

    /// Input errors are the ones raised before any work is done.
    pub fn is_user_input(&self) -> bool {
        matches!(
            self,
            BenchError::UnsupportedDistribution(_)
                | BenchError::InvalidGroupCount(_)
                | BenchError::GroupOutOfRange { .. }
                | BenchError::GroupCountMismatch { .. }
                | BenchError::InvalidRepetitions(_)
                | BenchError::InvalidConfig { .. }
        )
    }
}

pub type BenchResult<T> = Result<T, BenchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_mapping() {
        assert_eq!(BenchError::UnsupportedDistribution("x".into()).code_str(), "unsupported_distribution");
        assert_eq!(BenchError::InvalidGroupCount(0).code_str(), "invalid_group_count");
        assert_eq!(BenchError::InvalidRepetitions(0).code_str(), "invalid_repetitions");
        assert_eq!(BenchError::config("PIVOT_BENCH_SEED", "nope").code_str(), "invalid_config");
        assert_eq!(BenchError::Plot("x".into()).code_str(), "plot_error");
        assert_eq!(BenchError::GroupOutOfRange { group: 5, groups: 4 }.code_str(), "group_out_of_range");
        assert_eq!(BenchError::GroupCountMismatch { expected: 4, requested: 2 }.code_str(), "group_count_mismatch");
    }

    #[test]
    fn display_names_the_tag() {
        let e = BenchError::UnsupportedDistribution("unsupported".into());
        let msg = e.to_string();
        assert!(msg.starts_with("Unsupported Distribution"));
        assert!(msg.contains("'unsupported'"));
    }

    #[test]
    fn user_input_classification() {
        assert!(BenchError::InvalidGroupCount(0).is_user_input());
        assert!(BenchError::config("k", "m").is_user_input());
        assert!(!BenchError::Plot("backend".into()).is_user_input());
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk");
        assert!(!BenchError::from(io).is_user_input());
    }
}
