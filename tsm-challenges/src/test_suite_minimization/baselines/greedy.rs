use crate::tsm::{CoverageMatrix, Solution};

/// Classic greedy set cover: repeatedly take the test covering the most
/// still-uncovered targets, lowest index first on ties.
pub fn solve(matrix: &CoverageMatrix) -> Solution {
    let target = matrix.target_requirements();
    let mut covered = vec![false; matrix.num_requirements()];
    let mut tests = Vec::new();

    loop {
        let uncovered: Vec<usize> = (0..target.len())
            .filter(|&r| target[r] && !covered[r])
            .collect();
        if uncovered.is_empty() {
            break;
        }

        let mut best = None;
        let mut best_gain = 0;
        for test in 0..matrix.num_tests() {
            let gain = matrix.marginal_gain(test, &uncovered);
            if gain > best_gain {
                best_gain = gain;
                best = Some(test);
            }
        }
        // every uncovered target has a covering test, so a positive gain exists
        let Some(test) = best else { break };

        for (c, &cell) in covered.iter_mut().zip(matrix.row(test)) {
            *c |= cell;
        }
        tests.push(test);
    }

    tests.sort_unstable();
    Solution { tests }
}
