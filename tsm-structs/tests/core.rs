use serde_json::json;
use tsm_structs::{
    config::{ExperimentConfig, ReductionMode, DEFAULT_SEEDS},
    core::{ExperimentSummary, RunRecord},
};
use tsm_utils::{dejsonify, jsonify};

fn run(seed: u64, size: usize, tssr: f64) -> RunRecord {
    RunRecord {
        seed,
        selected: (0..size).collect(),
        constructed_size: size + 1,
        size,
        tssr,
        fdcloss: 0.0,
        time_secs: 0.001,
    }
}

#[test]
fn test_config_defaults() {
    let config: ExperimentConfig = dejsonify(r#"{"matrix_path":"matrices/m.txt"}"#).unwrap();
    assert_eq!(config, ExperimentConfig::new("matrices/m.txt"));
    assert_eq!(config.alpha, 0.15);
    assert_eq!(config.seeds, DEFAULT_SEEDS.to_vec());
    assert_eq!(config.mode, ReductionMode::C);
    assert_eq!(config.output_dir(), None);
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_overrides() {
    let value = json!({
        "matrix_path": "m.txt",
        "mode": "A",
        "alpha": 0.0,
        "seeds": [1, 2],
        "output_dir": "out",
        "parallel": true,
    });
    let config: ExperimentConfig = dejsonify(&value.to_string()).unwrap();
    assert_eq!(config.mode, ReductionMode::A);
    assert_eq!(config.seeds, vec![1, 2]);
    assert!(config.parallel);
    assert_eq!(
        config.output_dir().map(|p| p.to_str().unwrap()),
        Some("out")
    );
}

#[test]
fn test_config_validation() {
    let mut config = ExperimentConfig::new("m.txt");
    config.alpha = 1.2;
    assert!(config.validate().is_err());
    config.alpha = 1.0;
    config.seeds.clear();
    assert!(config.validate().is_err());
}

#[test]
fn test_summary_from_runs() {
    let runs = vec![run(42, 2, 0.8), run(7, 4, 0.6)];
    let summary = ExperimentSummary::from_runs(&runs).unwrap();
    assert!((summary.tssr.mean - 0.7).abs() < 1e-12);
    assert_eq!(summary.size.min, 2.0);
    assert_eq!(summary.size.max, 4.0);
    assert_eq!(summary.fdcloss.mean, 0.0);
    assert!(ExperimentSummary::from_runs(&[]).is_none());
}

#[test]
fn test_run_record_json_is_canonical() {
    let a = jsonify(&run(1, 1, 0.5)).unwrap();
    let b = jsonify(&run(1, 1, 0.5)).unwrap();
    assert_eq!(a, b);
    assert!(a.starts_with(r#"{"constructed_size":2,"fdcloss":0.0,"#));
    let back: RunRecord = dejsonify(&a).unwrap();
    assert_eq!(back, run(1, 1, 0.5));
}
