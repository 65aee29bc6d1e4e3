use crate::serializable_struct_with_getters;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tsm_challenges::tsm::ReductionMode;
use tsm_utils::Summary;

serializable_struct_with_getters! {
    RunRecord {
        seed: u64,
        /// Selected tests as indices into the original matrix, ascending.
        selected: Vec<usize>,
        constructed_size: usize,
        size: usize,
        tssr: f64,
        fdcloss: f64,
        time_secs: f64,
    }
}

serializable_struct_with_getters! {
    ExperimentSummary {
        tssr: Summary,
        fdcloss: Summary,
        size: Summary,
        time_secs: Summary,
    }
}

fn summarize<F>(runs: &[RunRecord], f: F) -> Option<Summary>
where
    F: Fn(&RunRecord) -> f64,
{
    Summary::from_values(&runs.iter().map(f).collect::<Vec<f64>>())
}

impl ExperimentSummary {
    /// `None` when there are no runs.
    pub fn from_runs(runs: &[RunRecord]) -> Option<Self> {
        Some(Self {
            tssr: summarize(runs, |r| r.tssr)?,
            fdcloss: summarize(runs, |r| r.fdcloss)?,
            size: summarize(runs, |r| r.size as f64)?,
            time_secs: summarize(runs, |r| r.time_secs)?,
        })
    }
}

serializable_struct_with_getters! {
    ExperimentReport {
        matrix_path: PathBuf,
        mode: ReductionMode,
        alpha: f64,
        original_tests: usize,
        original_requirements: usize,
        reduced_tests: usize,
        reduced_requirements: usize,
        greedy_baseline_size: usize,
        runs: Vec<RunRecord>,
        summary: ExperimentSummary,
    }
}
