use pivot_bench::aggregate::Strategy;
use pivot_bench::config::{RunConfig, SweepParam, SweepSpec};
use pivot_bench::error::BenchError;
use pivot_bench::experiment::{run_all, run_sweep};
use pivot_bench::generator::{gen_data, GroupDistribution};
use pivot_bench::harness::{run_multiple, TrialParams};
use pivot_bench::tprintln;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn params(rows: usize, groups: u32, repetitions: usize) -> TrialParams {
    TrialParams { rows, fh_size: 1_000, groups, dist: GroupDistribution::Uniform, repetitions }
}

#[test]
fn harness_small_run_returns_non_negative_triple() {
    let mut rng = StdRng::seed_from_u64(2024);
    let t = run_multiple(&params(100, 4, 3), &mut rng).unwrap();
    tprintln!("N=100 d=4 reps=3: {:?}", t);
    for s in Strategy::ALL {
        assert!(t.get(s) >= 0.0 && t.get(s).is_finite(), "{s}");
    }
}

#[test]
fn harness_rejects_zero_repetitions() {
    let mut rng = StdRng::seed_from_u64(1);
    let err = run_multiple(&params(100, 4, 0), &mut rng).unwrap_err();
    assert!(matches!(err, BenchError::InvalidRepetitions(0)));
}

#[test]
fn harness_propagates_generation_errors() {
    let mut rng = StdRng::seed_from_u64(1);
    let err = run_multiple(&params(100, 0, 2), &mut rng).unwrap_err();
    assert!(matches!(err, BenchError::InvalidGroupCount(0)));
}

#[test]
fn fh_size_does_not_change_the_workload() {
    // one repetition consumes exactly the draws of one generation, whatever n is
    let mut a = StdRng::seed_from_u64(3);
    run_multiple(&TrialParams { fh_size: 20_000, ..params(500, 8, 1) }, &mut a).unwrap();
    let mut b = StdRng::seed_from_u64(3);
    run_multiple(&TrialParams { fh_size: 1, ..params(500, 8, 1) }, &mut b).unwrap();
    let mut c = StdRng::seed_from_u64(3);
    gen_data(500, 8, "uniform", &mut c).unwrap();

    let next = a.gen::<u64>();
    assert_eq!(next, b.gen::<u64>());
    assert_eq!(next, c.gen::<u64>());
}

#[test]
fn different_draws_same_group_structure() {
    let mut rng = StdRng::seed_from_u64(77);
    let first = gen_data(100, 4, "uniform", &mut rng).unwrap();
    let second = gen_data(100, 4, "uniform", &mut rng).unwrap();
    let s1 = Strategy::Spj.sums(&first, 4).unwrap();
    let s2 = Strategy::Spj.sums(&second, 4).unwrap();
    assert_ne!(s1, s2);
    for ds in [&first, &second] {
        let pivot = Strategy::Pivot.sums(ds, 4).unwrap();
        let case = Strategy::Case.sums(ds, 4).unwrap();
        assert_eq!(pivot.groups().collect::<Vec<_>>(), case.groups().collect::<Vec<_>>());
    }
}

#[test]
fn fh_sweep_runs_and_keeps_order() {
    let spec = SweepSpec { values: vec![20_000, 1_000], rows: 200, ..SweepSpec::vary_fh_size() };
    let cfg = RunConfig { repetitions: 1, ..RunConfig::default() };
    let mut rng = StdRng::seed_from_u64(5);
    let res = run_sweep(&spec, &cfg, &mut rng).unwrap();
    assert_eq!(res.param, SweepParam::FhSize);
    assert_eq!(res.x(), vec![20_000.0, 1_000.0]);
    assert_eq!(res.case_times().len(), 2);
    assert_eq!(res.spj_times().len(), 2);
}

#[test]
fn run_all_writes_one_chart_per_sweep_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let out_dir = dir.path().join("charts");
    let cfg = RunConfig {
        sweeps: vec![
            SweepSpec { values: vec![100, 200], ..SweepSpec::vary_rows() },
            SweepSpec { values: vec![1_000, 2_000], rows: 200, ..SweepSpec::vary_fh_size() },
            SweepSpec { values: vec![2, 4], rows: 200, ..SweepSpec::vary_groups() },
        ],
        repetitions: 1,
        out_dir: out_dir.clone(),
        seed: Some(11),
        ..RunConfig::default()
    };
    let mut rng = StdRng::seed_from_u64(11);
    let results = run_all(&cfg, &mut rng).unwrap();

    let params: Vec<SweepParam> = results.iter().map(|(r, _)| r.param).collect();
    assert_eq!(params, vec![SweepParam::Rows, SweepParam::FhSize, SweepParam::Groups]);
    let stems: Vec<String> = results
        .iter()
        .map(|(_, p)| p.file_stem().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(stems, vec!["vary_table_size_n", "vary_fh_table_size", "vary_distinct_groups_d"]);

    for (result, path) in &results {
        tprintln!("{} -> {}", result.xlabel, path.display());
        assert_eq!(path.parent(), Some(out_dir.as_path()));
        assert_eq!(result.points.len(), 2);
        let bytes = std::fs::read(path).unwrap();
        assert!(!bytes.is_empty(), "{} is empty", path.display());
        assert!(bytes.starts_with(b"\x89PNG"), "{} is not a PNG", path.display());
    }
}

#[test]
fn oversized_sweep_value_fails_instead_of_wrapping() {
    let spec = SweepSpec { values: vec![(1u64 << 32) + 2], rows: 64, ..SweepSpec::vary_groups() };
    let cfg = RunConfig { repetitions: 1, ..RunConfig::default() };
    let mut rng = StdRng::seed_from_u64(3);
    let err = run_sweep(&spec, &cfg, &mut rng).unwrap_err();
    assert_eq!(err.code_str(), "invalid_config");
}
