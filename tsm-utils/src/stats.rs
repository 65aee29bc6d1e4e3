use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

/// Descriptive statistics over a series of repeated measurements.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub std_dev: f64,
}

impl Summary {
    /// Uses the population standard deviation. An empty series yields `None`.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        Some(Self {
            mean: values.iter().mean(),
            min: Statistics::min(values.iter()),
            max: Statistics::max(values.iter()),
            std_dev: values.iter().population_std_dev(),
        })
    }
}
