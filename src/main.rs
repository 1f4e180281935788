use anyhow::Context;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use pivot_bench::config::RunConfig;
use pivot_bench::experiment::run_all;
use pivot_bench::generator::generate;
use pivot_bench::verify::{cross_check, DEFAULT_TOLERANCE};

fn main() -> anyhow::Result<()> {
    // Init logging
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .context("log filter")?;
    fmt().with_env_filter(filter).init();

    let cfg = RunConfig::from_env().context("reading configuration")?;
    let rust_log = std::env::var("RUST_LOG").unwrap_or_else(|_| "<unset>".to_string());
    info!(
        target: "pivot_bench",
        "pivot-bench starting: RUST_LOG='{}', out_dir='{}', seed={:?}, repetitions={}, dist={}",
        rust_log, cfg.out_dir.display(), cfg.seed, cfg.repetitions, cfg.dist
    );

    let mut rng = match cfg.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    // Sanity check before timing anything
    let probe = generate(1_000, 16, cfg.dist, &mut rng).context("generating probe dataset")?;
    cross_check(&probe, 16, DEFAULT_TOLERANCE).context("strategies disagree on probe dataset")?;

    let results = run_all(&cfg, &mut rng).context("running experiments")?;
    for (result, path) in &results {
        println!("{}", serde_json::to_string(result).context("serializing result")?);
        info!(target: "pivot_bench", "{} -> {}", result.xlabel, path.display());
    }
    Ok(())
}
