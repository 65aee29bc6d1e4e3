use super::CoverageMatrix;
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    /// Test suite size reduction, `1 - |S| / |T|`.
    pub tssr: f64,
    /// Fault detection capability loss, approximated by lost requirement
    /// coverage: `1 - |U(S)| / |U(T)|`.
    pub fdcloss: f64,
}

/// `matrix` must be the original, unreduced matrix and `selected` must hold
/// indices into it.
pub fn calculate_metrics(
    original_size: usize,
    selected_size: usize,
    matrix: &CoverageMatrix,
    selected: &[usize],
) -> Result<Metrics> {
    if original_size == 0 {
        return Err(anyhow!("Cannot compute size reduction of an empty test suite"));
    }
    if let Some(&test) = selected.iter().find(|&&t| t >= matrix.num_tests()) {
        return Err(anyhow!(
            "Selected test ({}) is out of bounds ({} tests)",
            test,
            matrix.num_tests()
        ));
    }
    let tssr = 1.0 - selected_size as f64 / original_size as f64;

    let all_tests: Vec<usize> = (0..matrix.num_tests()).collect();
    let u_t = matrix.covered_requirements(&all_tests);
    let u_s = matrix.covered_requirements(selected);
    let fdcloss = if u_t > 0 {
        1.0 - u_s as f64 / u_t as f64
    } else {
        0.0
    };

    Ok(Metrics { tssr, fdcloss })
}
