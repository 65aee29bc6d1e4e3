mod baselines;
mod loading;
pub mod metrics;
pub mod reduction;

pub use loading::load_matrix;
pub use metrics::{calculate_metrics, Metrics};
pub use reduction::{apply_reductions, ReductionMode, TranslationTable};

use anyhow::{anyhow, Result};
use ndarray::{Array2, ArrayView1, Axis};
use rand::{rngs::SmallRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Track {
    pub num_tests: usize,
    pub num_requirements: usize,
    pub density_percent: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Solution {
    pub tests: Vec<usize>,
}

impl Solution {
    pub fn new() -> Self {
        Self { tests: Vec::new() }
    }
}

/// Binary test x requirement table. Rows are tests, columns are requirements.
///
/// The matrix is never mutated once built; every query below is a pure read,
/// so one matrix can be shared by any number of concurrent solves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverageMatrix {
    cells: Array2<bool>,
}

impl CoverageMatrix {
    pub fn new(cells: Array2<bool>) -> Self {
        Self { cells }
    }

    pub fn from_rows(rows: Vec<Vec<bool>>) -> Result<Self> {
        let num_requirements = rows.first().map_or(0, |r| r.len());
        for (i, row) in rows.iter().enumerate() {
            if row.len() != num_requirements {
                return Err(anyhow!(
                    "Row {} has {} requirements, expected {}",
                    i,
                    row.len(),
                    num_requirements
                ));
            }
        }
        let num_tests = rows.len();
        let flat: Vec<bool> = rows.into_iter().flatten().collect();
        let cells = Array2::from_shape_vec((num_tests, num_requirements), flat)?;
        Ok(Self { cells })
    }

    pub fn generate_instance(seed: &[u8; 32], track: &Track) -> Result<Self> {
        if track.density_percent > 100 {
            return Err(anyhow!(
                "Density ({}%) must be within 0..=100",
                track.density_percent
            ));
        }
        let mut rng = SmallRng::from_seed(seed.clone());
        let p = track.density_percent as f64 / 100.0;
        let cells = Array2::from_shape_fn((track.num_tests, track.num_requirements), |_| {
            rng.gen_bool(p)
        });
        Ok(Self { cells })
    }

    pub fn cells(&self) -> &Array2<bool> {
        &self.cells
    }

    pub fn num_tests(&self) -> usize {
        self.cells.nrows()
    }

    pub fn num_requirements(&self) -> usize {
        self.cells.ncols()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn row(&self, test: usize) -> ArrayView1<'_, bool> {
        self.cells.row(test)
    }

    pub fn covers(&self, test: usize, requirement: usize) -> bool {
        self.cells[[test, requirement]]
    }

    pub fn transpose(&self) -> Self {
        Self {
            cells: self.cells.t().to_owned(),
        }
    }

    /// Requirements covered by at least one test. Columns that no test covers
    /// can never be satisfied and are left out of every coverage goal.
    pub fn target_requirements(&self) -> Vec<bool> {
        self.cells
            .axis_iter(Axis(1))
            .map(|column| column.iter().any(|&c| c))
            .collect()
    }

    /// Number of the given requirements that `test` covers.
    pub fn marginal_gain(&self, test: usize, uncovered: &[usize]) -> usize {
        let row = self.cells.row(test);
        uncovered.iter().filter(|&&r| row[r]).count()
    }

    /// Number of requirements `test` covers in the full matrix.
    pub fn coverage_count(&self, test: usize) -> usize {
        self.cells.row(test).iter().filter(|&&c| c).count()
    }

    /// Logical OR of the rows of `tests`.
    pub fn union_coverage<'a, I>(&self, tests: I) -> Vec<bool>
    where
        I: IntoIterator<Item = &'a usize>,
    {
        let mut coverage = vec![false; self.num_requirements()];
        for &test in tests {
            for (covered, &c) in coverage.iter_mut().zip(self.cells.row(test)) {
                *covered |= c;
            }
        }
        coverage
    }

    pub fn covered_requirements<'a, I>(&self, tests: I) -> usize
    where
        I: IntoIterator<Item = &'a usize>,
    {
        self.union_coverage(tests).into_iter().filter(|&c| c).count()
    }

    /// True iff every requirement marked in `target` is marked in `coverage`.
    pub fn is_fully_covered(coverage: &[bool], target: &[bool]) -> bool {
        coverage.len() == target.len() && coverage.iter().zip(target).all(|(&c, &t)| c || !t)
    }

    pub fn verify_solution(&self, solution: &Solution) -> Result<()> {
        let unique: HashSet<usize> = solution.tests.iter().cloned().collect();
        if unique.len() != solution.tests.len() {
            return Err(anyhow!("Duplicate tests selected."));
        }
        if let Some(&test) = solution.tests.iter().find(|&&t| t >= self.num_tests()) {
            return Err(anyhow!(
                "Test ({}) is out of bounds ({} tests)",
                test,
                self.num_tests()
            ));
        }
        let target = self.target_requirements();
        let coverage = self.union_coverage(&solution.tests);
        if let Some(requirement) = (0..target.len()).find(|&r| target[r] && !coverage[r]) {
            return Err(anyhow!(
                "Requirement ({}) is not covered by the selected tests",
                requirement
            ));
        }
        Ok(())
    }

    pub fn compute_greedy_baseline(&self) -> Solution {
        baselines::greedy::solve(self)
    }

    /// Serialises the matrix in the same 0/1 text format `from_text` reads.
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity(self.num_tests() * (self.num_requirements() + 1));
        for row in self.cells.rows() {
            out.extend(row.iter().map(|&c| if c { '1' } else { '0' }));
            out.push('\n');
        }
        out
    }
}
