use ndarray::array;
use tsm_challenges::tsm::{CoverageMatrix, Solution, Track};

fn scenario_matrix() -> CoverageMatrix {
    CoverageMatrix::new(array![
        [true, true, false, false],
        [false, false, true, true],
        [true, true, true, true],
    ])
}

#[test]
fn test_target_requirements_exclude_uncoverable_columns() {
    let matrix = CoverageMatrix::new(array![[true, false, false], [false, false, true]]);
    assert_eq!(matrix.target_requirements(), vec![true, false, true]);
}

#[test]
fn test_marginal_gain() {
    let matrix = scenario_matrix();
    assert_eq!(matrix.marginal_gain(0, &[0, 1, 2, 3]), 2);
    assert_eq!(matrix.marginal_gain(1, &[0, 1, 2, 3]), 2);
    assert_eq!(matrix.marginal_gain(2, &[0, 1, 2, 3]), 4);
    assert_eq!(matrix.marginal_gain(2, &[3]), 1);
    assert_eq!(matrix.marginal_gain(0, &[]), 0);
}

#[test]
fn test_union_coverage() {
    let matrix = scenario_matrix();
    assert_eq!(matrix.union_coverage(&[0]), vec![true, true, false, false]);
    assert_eq!(matrix.union_coverage(&[0, 1]), vec![true; 4]);
    assert_eq!(matrix.union_coverage(&[]), vec![false; 4]);
    assert_eq!(matrix.covered_requirements(&[1]), 2);
}

#[test]
fn test_is_fully_covered() {
    let target = vec![true, false, true];
    assert!(CoverageMatrix::is_fully_covered(&[true, false, true], &target));
    assert!(CoverageMatrix::is_fully_covered(&[true, true, true], &target));
    assert!(!CoverageMatrix::is_fully_covered(&[true, true, false], &target));
    assert!(!CoverageMatrix::is_fully_covered(&[true, true], &target));
}

#[test]
fn test_coverage_count() {
    let matrix = scenario_matrix();
    assert_eq!(matrix.coverage_count(0), 2);
    assert_eq!(matrix.coverage_count(2), 4);
}

#[test]
fn test_from_rows_rejects_ragged_rows() {
    assert!(CoverageMatrix::from_rows(vec![vec![true, false], vec![true]]).is_err());
    let matrix = CoverageMatrix::from_rows(vec![vec![true, false], vec![false, true]]).unwrap();
    assert_eq!(matrix.num_tests(), 2);
    assert_eq!(matrix.num_requirements(), 2);
    assert!(CoverageMatrix::from_rows(vec![]).unwrap().is_empty());
}

#[test]
fn test_transpose() {
    let matrix = CoverageMatrix::new(array![[true, false, false], [false, true, true]]);
    let transposed = matrix.transpose();
    assert_eq!(transposed.num_tests(), 3);
    assert_eq!(transposed.num_requirements(), 2);
    assert!(transposed.covers(2, 1));
    assert!(!transposed.covers(2, 0));
}

#[test]
fn test_verify_solution() {
    let matrix = scenario_matrix();
    assert!(matrix.verify_solution(&Solution { tests: vec![2] }).is_ok());
    assert!(matrix.verify_solution(&Solution { tests: vec![0, 1] }).is_ok());
    assert!(matrix.verify_solution(&Solution { tests: vec![0] }).is_err());
    assert!(matrix.verify_solution(&Solution { tests: vec![2, 2] }).is_err());
    assert!(matrix.verify_solution(&Solution { tests: vec![3] }).is_err());
    assert!(matrix.verify_solution(&Solution::new()).is_err());
}

#[test]
fn test_greedy_baseline_covers_targets() {
    let matrix = scenario_matrix();
    assert_eq!(matrix.compute_greedy_baseline().tests, vec![2]);

    let track = Track {
        num_tests: 40,
        num_requirements: 60,
        density_percent: 10,
    };
    let matrix = CoverageMatrix::generate_instance(&[3u8; 32], &track).unwrap();
    let baseline = matrix.compute_greedy_baseline();
    assert!(matrix.verify_solution(&baseline).is_ok());
}

#[test]
fn test_generate_instance_is_seeded() {
    let track = Track {
        num_tests: 20,
        num_requirements: 30,
        density_percent: 25,
    };
    let a = CoverageMatrix::generate_instance(&[1u8; 32], &track).unwrap();
    let b = CoverageMatrix::generate_instance(&[1u8; 32], &track).unwrap();
    let c = CoverageMatrix::generate_instance(&[2u8; 32], &track).unwrap();
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(a.num_tests(), 20);
    assert_eq!(a.num_requirements(), 30);

    let invalid = Track {
        density_percent: 101,
        ..track
    };
    assert!(CoverageMatrix::generate_instance(&[1u8; 32], &invalid).is_err());
}
