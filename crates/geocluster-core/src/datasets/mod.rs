//! Small built-in datasets

mod iris;

pub use iris::{iris, FEATURE_NAMES as IRIS_FEATURE_NAMES, TARGET_NAMES as IRIS_TARGET_NAMES};

use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// Labeled tabular dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// One row per sample
    pub features: Array2<f64>,
    /// Class index per sample
    pub target: Vec<usize>,
    pub feature_names: Vec<String>,
    pub target_names: Vec<String>,
}

impl Dataset {
    pub fn n_samples(&self) -> usize {
        self.features.nrows()
    }

    /// Class name of one sample
    pub fn species(&self, sample: usize) -> Option<&str> {
        self.target
            .get(sample)
            .and_then(|&t| self.target_names.get(t))
            .map(String::as_str)
    }
}
