//! Per-feature standardization (zero mean, unit variance)

use ndarray::{Array1, Array2, Axis};
use serde::{Deserialize, Serialize};

use crate::error::{ClusterError, Result};

/// Learns column means and standard deviations and rescales matrices
///
/// Uses the population standard deviation. Columns with zero variance are
/// only centered (their scale is 1).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StandardScaler {
    mean: Option<Array1<f64>>,
    scale: Option<Array1<f64>>,
}

impl StandardScaler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Learn per-column statistics
    pub fn fit(&mut self, x: &Array2<f64>) -> Result<&mut Self> {
        if x.nrows() == 0 {
            return Err(ClusterError::EmptyInput);
        }

        let n = x.nrows() as f64;
        let mean = x.sum_axis(Axis(0)) / n;
        let mut scale = Array1::zeros(x.ncols());

        for (j, column) in x.axis_iter(Axis(1)).enumerate() {
            let var = column.iter().map(|v| (v - mean[j]).powi(2)).sum::<f64>() / n;
            let std = var.sqrt();
            scale[j] = if std > 0.0 && std.is_finite() { std } else { 1.0 };
        }

        self.mean = Some(mean);
        self.scale = Some(scale);
        Ok(self)
    }

    /// Apply the learned statistics to `x`
    pub fn transform(&self, x: &Array2<f64>) -> Result<Array2<f64>> {
        let (mean, scale) = match (&self.mean, &self.scale) {
            (Some(mean), Some(scale)) => (mean, scale),
            _ => {
                return Err(ClusterError::invalid_input(
                    "StandardScaler not fitted. Call fit() first.",
                ))
            }
        };

        if x.ncols() != mean.len() {
            return Err(ClusterError::DimensionMismatch {
                expected: mean.len(),
                actual: x.ncols(),
            });
        }

        Ok((x - mean) / scale)
    }

    /// Fit on `x` and return its standardized copy
    pub fn fit_transform(&mut self, x: &Array2<f64>) -> Result<Array2<f64>> {
        self.fit(x)?;
        self.transform(x)
    }

    /// Learned column means
    pub fn mean(&self) -> Option<&Array1<f64>> {
        self.mean.as_ref()
    }

    /// Learned column scales
    pub fn scale(&self) -> Option<&Array1<f64>> {
        self.scale.as_ref()
    }
}
