//! Greedy Randomized Adaptive Search Procedure for test suite minimisation.
//!
//! A solve runs a randomized greedy construction, which adds tests drawn
//! from a restricted candidate list until every target requirement is
//! covered, followed by one local search sweep that drops tests whose
//! removal keeps the cover complete.

mod constructive;
mod error;
mod local_search;

pub use constructive::Construction;
pub use error::SolverError;

use rand::{rngs::SmallRng, SeedableRng};
use std::time::{Duration, Instant};
use tsm_challenges::tsm::{CoverageMatrix, Solution};

#[derive(Debug, Clone, PartialEq)]
pub struct GraspResult {
    /// Selected test indices, ascending and duplicate free.
    pub selected: Vec<usize>,
    pub constructed_size: usize,
    /// Test drawn from the candidate list at each constructive iteration.
    pub rcl_draws: Vec<usize>,
    pub elapsed: Duration,
}

impl GraspResult {
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    pub fn to_solution(&self) -> Solution {
        Solution {
            tests: self.selected.clone(),
        }
    }
}

/// One solver per seed. The solver owns its random source and all mutable
/// search state; the matrix is only ever read, so solvers for different seeds
/// can run side by side over the same matrix.
pub struct GraspSolver<'a> {
    matrix: &'a CoverageMatrix,
    seed: u64,
    rng: SmallRng,
    target: Vec<bool>,
}

impl<'a> GraspSolver<'a> {
    pub fn new(matrix: &'a CoverageMatrix, seed: u64) -> Self {
        Self {
            matrix,
            seed,
            rng: SmallRng::seed_from_u64(seed),
            target: matrix.target_requirements(),
        }
    }

    /// Solver with caller supplied target requirements. Every target must be
    /// covered by at least one test of `matrix`.
    pub fn with_targets(
        matrix: &'a CoverageMatrix,
        seed: u64,
        target: Vec<bool>,
    ) -> Result<Self, SolverError> {
        if target.len() != matrix.num_requirements() {
            return Err(SolverError::TargetLengthMismatch {
                expected: matrix.num_requirements(),
                found: target.len(),
            });
        }
        let coverable = matrix.target_requirements();
        if let Some(requirement) = (0..target.len()).find(|&r| target[r] && !coverable[r]) {
            return Err(SolverError::UnreachableRequirement { requirement });
        }
        Ok(Self {
            matrix,
            seed,
            rng: SmallRng::seed_from_u64(seed),
            target,
        })
    }

    pub fn target_requirements(&self) -> &[bool] {
        &self.target
    }

    /// Runs construction then local search. The random source is not reset
    /// between calls, so a second `solve` on the same solver continues the
    /// stream instead of replaying the first.
    pub fn solve(&mut self, alpha: f64) -> Result<GraspResult, SolverError> {
        let start = Instant::now();

        let construction = self.constructive_phase(alpha)?;
        let constructed_size = construction.selected.len();
        let selected = self.local_search(&construction.selected)?;

        let elapsed = start.elapsed();
        tracing::debug!(
            seed = self.seed,
            alpha,
            constructed_size,
            final_size = selected.len(),
            elapsed_us = elapsed.as_micros() as u64,
            "grasp solve finished"
        );
        Ok(GraspResult {
            selected,
            constructed_size,
            rcl_draws: construction.draws,
            elapsed,
        })
    }

    /// An empty selection never counts as a cover.
    fn covers_targets(&self, tests: &[usize]) -> bool {
        if tests.is_empty() {
            return false;
        }
        let coverage = self.matrix.union_coverage(tests);
        CoverageMatrix::is_fully_covered(&coverage, &self.target)
    }
}
