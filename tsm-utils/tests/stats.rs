use tsm_utils::Summary;

#[test]
fn test_summary() {
    let summary = Summary::from_values(&[0.5, 0.75, 1.0]).unwrap();
    assert!((summary.mean - 0.75).abs() < 1e-12);
    assert_eq!(summary.min, 0.5);
    assert_eq!(summary.max, 1.0);
    // population std of [0.5, 0.75, 1.0]
    assert!((summary.std_dev - (0.125f64 / 3.0).sqrt()).abs() < 1e-12);
}

#[test]
fn test_summary_single_value_has_zero_spread() {
    let summary = Summary::from_values(&[0.8]).unwrap();
    assert_eq!(summary.mean, 0.8);
    assert_eq!(summary.std_dev, 0.0);
}

#[test]
fn test_empty_series() {
    assert!(Summary::from_values(&[]).is_none());
}
