use super::{GraspSolver, SolverError};
use crate::{seeded_hasher, HashSet};
use rand::Rng;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Construction {
    /// Ascending and duplicate free.
    pub selected: Vec<usize>,
    pub draws: Vec<usize>,
}

impl<'a> GraspSolver<'a> {
    /// Randomized greedy construction. Each iteration ranks every test by the
    /// number of still uncovered targets it covers, keeps those whose gain is
    /// at least `max - alpha * (max - min)` (min being the smallest positive
    /// gain), and draws one of them uniformly.
    pub fn constructive_phase(&mut self, alpha: f64) -> Result<Construction, SolverError> {
        if !alpha.is_finite() || !(0.0..=1.0).contains(&alpha) {
            return Err(SolverError::InvalidAlpha(alpha));
        }

        let matrix = self.matrix;
        let num_requirements = matrix.num_requirements();
        let mut covered = vec![false; num_requirements];
        let mut candidates: HashSet<usize> = HashSet::with_hasher(seeded_hasher(self.seed));
        let mut draws = Vec::new();
        let mut gains = vec![0usize; matrix.num_tests()];

        loop {
            let uncovered: Vec<usize> = (0..num_requirements)
                .filter(|&r| self.target[r] && !covered[r])
                .collect();
            if uncovered.is_empty() {
                break;
            }

            let mut max_gain = 0;
            let mut min_gain = usize::MAX;
            for (test, gain) in gains.iter_mut().enumerate() {
                *gain = matrix.marginal_gain(test, &uncovered);
                max_gain = max_gain.max(*gain);
                if *gain > 0 {
                    min_gain = min_gain.min(*gain);
                }
            }
            // unreachable once targets are checked against the matrix, which
            // `new` and `with_targets` both do
            if max_gain == 0 {
                return Err(SolverError::DegenerateCandidateList {
                    uncovered: uncovered.len(),
                });
            }

            let threshold = max_gain as f64 - alpha * (max_gain - min_gain) as f64;
            let rcl: Vec<usize> = (0..gains.len())
                .filter(|&t| gains[t] as f64 >= threshold)
                .collect();

            let test = rcl[self.rng.gen_range(0..rcl.len())];
            tracing::trace!(
                test,
                gain = gains[test],
                max_gain,
                min_gain,
                rcl_size = rcl.len(),
                "drew test from candidate list"
            );
            candidates.insert(test);
            draws.push(test);
            for (c, &cell) in covered.iter_mut().zip(matrix.row(test)) {
                *c |= cell;
            }
        }

        let mut selected: Vec<usize> = candidates.into_iter().collect();
        selected.sort_unstable();
        tracing::debug!(
            seed = self.seed,
            iterations = draws.len(),
            size = selected.len(),
            "constructive phase finished"
        );
        Ok(Construction { selected, draws })
    }
}
