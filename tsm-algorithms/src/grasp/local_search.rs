use super::{GraspSolver, SolverError};
use crate::{seeded_hasher, HashSet};

impl<'a> GraspSolver<'a> {
    /// Single first-improvement sweep. Tests are visited by ascending total
    /// coverage, index breaking ties, and each is dropped for good if the
    /// remaining tests still cover every target. A kept test is not revisited,
    /// so residual redundancy depending on visiting order can remain.
    ///
    /// Every candidate must index a test of the matrix.
    pub fn local_search(&self, candidates: &[usize]) -> Result<Vec<usize>, SolverError> {
        let num_tests = self.matrix.num_tests();
        if let Some(&test) = candidates.iter().find(|&&t| t >= num_tests) {
            return Err(SolverError::TestOutOfBounds { test, num_tests });
        }

        let mut order: Vec<usize> = candidates.to_vec();
        order.sort_unstable();
        order.dedup();
        order.sort_by_key(|&test| self.matrix.coverage_count(test));

        let mut working: HashSet<usize> = HashSet::with_hasher(seeded_hasher(self.seed));
        working.extend(order.iter().copied());

        let mut removed = 0;
        for &test in &order {
            let trial: Vec<usize> = working.iter().copied().filter(|&t| t != test).collect();
            if self.covers_targets(&trial) {
                working.remove(&test);
                removed += 1;
            }
        }

        let mut selected: Vec<usize> = working.into_iter().collect();
        selected.sort_unstable();
        tracing::debug!(
            seed = self.seed,
            removed,
            size = selected.len(),
            "local search finished"
        );
        Ok(selected)
    }
}
