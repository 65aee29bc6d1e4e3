use super::CoverageMatrix;
use anyhow::{anyhow, Result};
use ndarray::{ArrayView1, Axis};
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, fmt, str::FromStr};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ReductionMode {
    /// Drop empty and duplicate tests.
    A,
    /// Drop duplicate and uncoverable requirements.
    B,
    /// Both of the above.
    #[default]
    C,
}

impl ReductionMode {
    pub fn reduces_tests(&self) -> bool {
        matches!(self, ReductionMode::A | ReductionMode::C)
    }

    pub fn reduces_requirements(&self) -> bool {
        matches!(self, ReductionMode::B | ReductionMode::C)
    }
}

impl FromStr for ReductionMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(ReductionMode::A),
            "B" => Ok(ReductionMode::B),
            "C" => Ok(ReductionMode::C),
            _ => Err(anyhow!("Invalid reduction mode '{}'. Expected A, B or C", s)),
        }
    }
}

impl fmt::Display for ReductionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ReductionMode::A => "A",
            ReductionMode::B => "B",
            ReductionMode::C => "C",
        };
        write!(f, "{}", s)
    }
}

/// Maps test indices of a reduced matrix back to the matrix it was derived from.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TranslationTable(Vec<usize>);

impl TranslationTable {
    pub fn identity(num_tests: usize) -> Self {
        Self((0..num_tests).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn original_index(&self, reduced: usize) -> Option<usize> {
        self.0.get(reduced).copied()
    }

    pub fn translate(&self, reduced: &[usize]) -> Result<Vec<usize>> {
        reduced
            .iter()
            .map(|&i| {
                self.original_index(i).ok_or_else(|| {
                    anyhow!(
                        "Reduced test index ({}) is out of bounds ({} tests)",
                        i,
                        self.len()
                    )
                })
            })
            .collect()
    }

    fn retain(&self, kept: &[usize]) -> Self {
        Self(kept.iter().map(|&i| self.0[i]).collect())
    }
}

fn first_unique<'a, I>(lanes: I) -> Vec<usize>
where
    I: Iterator<Item = ArrayView1<'a, bool>>,
{
    let mut seen: HashSet<Vec<bool>> = HashSet::new();
    lanes
        .enumerate()
        .filter_map(|(i, lane)| seen.insert(lane.to_vec()).then_some(i))
        .collect()
}

fn non_empty<'a, I>(lanes: I) -> Vec<usize>
where
    I: Iterator<Item = ArrayView1<'a, bool>>,
{
    lanes
        .enumerate()
        .filter_map(|(i, lane)| lane.iter().any(|&c| c).then_some(i))
        .collect()
}

/// Shrinks `matrix` according to `mode`. Kept rows and columns stay in their
/// original relative order, and when duplicates are collapsed the first
/// occurrence survives. The returned table maps each remaining test back to
/// its index in `matrix`.
pub fn apply_reductions(
    matrix: &CoverageMatrix,
    mode: ReductionMode,
) -> (CoverageMatrix, TranslationTable) {
    let mut cells = matrix.cells().clone();
    let mut mapping = TranslationTable::identity(matrix.num_tests());

    if mode.reduces_tests() {
        let kept = non_empty(cells.axis_iter(Axis(0)));
        cells = cells.select(Axis(0), &kept);
        mapping = mapping.retain(&kept);

        let kept = first_unique(cells.axis_iter(Axis(0)));
        cells = cells.select(Axis(0), &kept);
        mapping = mapping.retain(&kept);
    }

    if mode.reduces_requirements() {
        let kept = first_unique(cells.axis_iter(Axis(1)));
        cells = cells.select(Axis(1), &kept);

        let kept = non_empty(cells.axis_iter(Axis(1)));
        cells = cells.select(Axis(1), &kept);
    }

    let reduced = CoverageMatrix::new(cells);
    tracing::debug!(
        %mode,
        tests = reduced.num_tests(),
        requirements = reduced.num_requirements(),
        original_tests = matrix.num_tests(),
        original_requirements = matrix.num_requirements(),
        "applied reductions"
    );
    (reduced, mapping)
}
