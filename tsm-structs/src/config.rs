use crate::serializable_struct_with_getters;
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
pub use tsm_challenges::tsm::ReductionMode;

pub const DEFAULT_ALPHA: f64 = 0.15;
pub const DEFAULT_SEEDS: [u64; 5] = [42, 123, 7, 99, 2024];

fn default_alpha() -> f64 {
    DEFAULT_ALPHA
}

fn default_seeds() -> Vec<u64> {
    DEFAULT_SEEDS.to_vec()
}

serializable_struct_with_getters! {
    ExperimentConfig {
        matrix_path: PathBuf,
        #[serde(default)]
        mode: ReductionMode,
        #[serde(default = "default_alpha")]
        alpha: f64,
        #[serde(default = "default_seeds")]
        seeds: Vec<u64>,
        /// Read the matrix file as requirements x tests.
        #[serde(default)]
        transpose: bool,
        /// Solve the seeds concurrently.
        #[serde(default)]
        parallel: bool,
        /// Where derived output files go. Defaults to the matrix file's directory.
        output_dir: Option<PathBuf>,
        #[serde(default)]
        json_report: bool,
        /// Zlib-compress the json report.
        #[serde(default)]
        compress: bool,
    }
}

impl ExperimentConfig {
    pub fn new<P: Into<PathBuf>>(matrix_path: P) -> Self {
        Self {
            matrix_path: matrix_path.into(),
            mode: ReductionMode::default(),
            alpha: DEFAULT_ALPHA,
            seeds: default_seeds(),
            transpose: false,
            parallel: false,
            output_dir: None,
            json_report: false,
            compress: false,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.alpha.is_finite() || !(0.0..=1.0).contains(&self.alpha) {
            return Err(anyhow!("Alpha ({}) must be within [0, 1]", self.alpha));
        }
        if self.seeds.is_empty() {
            return Err(anyhow!("At least one seed is required"));
        }
        Ok(())
    }
}
