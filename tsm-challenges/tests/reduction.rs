use ndarray::array;
use tsm_challenges::tsm::{apply_reductions, CoverageMatrix, ReductionMode, TranslationTable};

fn matrix() -> CoverageMatrix {
    // rows 0 and 1 duplicate, row 2 empty, column 1 duplicates column 0,
    // column 3 uncoverable
    CoverageMatrix::new(array![
        [true, true, false, false],
        [true, true, false, false],
        [false, false, false, false],
        [false, false, true, false],
        [true, true, true, false],
    ])
}

#[test]
fn test_mode_a_collapses_duplicate_and_empty_rows() {
    let (reduced, mapping) = apply_reductions(&matrix(), ReductionMode::A);
    assert_eq!(reduced.num_tests(), 3);
    assert_eq!(reduced.num_requirements(), 4);
    assert_eq!(mapping.translate(&[0, 1, 2]).unwrap(), vec![0, 3, 4]);
}

#[test]
fn test_duplicate_rows_map_to_first_occurrence() {
    let matrix = CoverageMatrix::new(array![[false, true], [false, true], [true, false]]);
    let (reduced, mapping) = apply_reductions(&matrix, ReductionMode::A);
    assert_eq!(reduced.to_text(), "01\n10\n");
    assert_eq!(mapping.original_index(0), Some(0));
    assert_eq!(mapping.original_index(1), Some(2));
}

#[test]
fn test_mode_b_collapses_columns_only() {
    let (reduced, mapping) = apply_reductions(&matrix(), ReductionMode::B);
    assert_eq!(reduced.num_tests(), 5);
    assert_eq!(reduced.num_requirements(), 2);
    assert_eq!(mapping, TranslationTable::identity(5));
    assert_eq!(reduced.target_requirements(), vec![true, true]);
}

#[test]
fn test_mode_c_applies_both() {
    let (reduced, mapping) = apply_reductions(&matrix(), ReductionMode::C);
    assert_eq!(reduced.to_text(), "10\n01\n11\n");
    assert_eq!(mapping.translate(&[2]).unwrap(), vec![4]);
}

#[test]
fn test_translate_rejects_out_of_range() {
    let (_, mapping) = apply_reductions(&matrix(), ReductionMode::A);
    assert_eq!(mapping.len(), 3);
    assert!(mapping.translate(&[3]).is_err());
    assert_eq!(mapping.original_index(3), None);
}

#[test]
fn test_reduction_mode_parsing() {
    assert_eq!("a".parse::<ReductionMode>().unwrap(), ReductionMode::A);
    assert_eq!(" C ".parse::<ReductionMode>().unwrap(), ReductionMode::C);
    assert!("D".parse::<ReductionMode>().is_err());
    assert_eq!(ReductionMode::B.to_string(), "B");
    assert_eq!(ReductionMode::default(), ReductionMode::C);
}
