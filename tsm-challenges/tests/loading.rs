use tsm_challenges::tsm::{load_matrix, CoverageMatrix};

#[test]
fn test_from_text() {
    let text = "1100\n\n  0011  \n1 1\t1 1\n";
    let matrix = CoverageMatrix::from_text(text).unwrap();
    assert_eq!(matrix.num_tests(), 3);
    assert_eq!(matrix.num_requirements(), 4);
    assert!(matrix.covers(0, 1));
    assert!(!matrix.covers(0, 2));
    assert!(matrix.covers(2, 3));
}

#[test]
fn test_from_text_skips_non_binary_lines() {
    let text = "# tests x requirements\n101\n10x\n011\nrow 4\n";
    let matrix = CoverageMatrix::from_text(text).unwrap();
    assert_eq!(matrix.num_tests(), 2);
    assert_eq!(matrix.to_text(), "101\n011\n");
}

#[test]
fn test_from_text_rejects_ragged_rows() {
    let err = CoverageMatrix::from_text("101\n10\n").unwrap_err();
    assert!(err.to_string().contains("Line 2"));
}

#[test]
fn test_from_text_without_rows_is_empty() {
    assert!(CoverageMatrix::from_text("").unwrap().is_empty());
    assert!(CoverageMatrix::from_text("abc\n\n").unwrap().is_empty());
}

#[test]
fn test_load_matrix_with_transpose() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("matrix.txt");
    std::fs::write(&path, "110\n001\n").unwrap();

    let matrix = load_matrix(&path, false).unwrap();
    assert_eq!((matrix.num_tests(), matrix.num_requirements()), (2, 3));

    let transposed = load_matrix(&path, true).unwrap();
    assert_eq!((transposed.num_tests(), transposed.num_requirements()), (3, 2));
    assert!(transposed.covers(2, 1));

    assert!(load_matrix(dir.path().join("missing.txt"), false).is_err());
}
