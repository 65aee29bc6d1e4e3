/// Failures of a single solve. All of them are fatal to that solve; a caller
/// may retry with another seed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SolverError {
    #[error("Alpha ({0}) must be a finite value within [0, 1]")]
    InvalidAlpha(f64),

    #[error("Target vector has {found} requirements, matrix has {expected}")]
    TargetLengthMismatch { expected: usize, found: usize },

    #[error("Target requirement {requirement} is not covered by any test")]
    UnreachableRequirement { requirement: usize },

    #[error("Test index {test} out of bounds for {num_tests} tests")]
    TestOutOfBounds { test: usize, num_tests: usize },

    #[error("No test has positive gain while {uncovered} target requirements remain uncovered")]
    DegenerateCandidateList { uncovered: usize },
}
