//! Clustering summaries and quality metrics

use ndarray::{Array2, ArrayView1};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::error::{ClusterError, Result};
use crate::point::{is_noise, Label};

/// Cluster and noise counts for a label sequence
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClusterSummary {
    /// Total number of labeled points
    pub n_points: usize,
    /// Number of distinct clusters (noise excluded)
    pub n_clusters: usize,
    /// Number of points labeled as noise
    pub n_noise: usize,
    /// Members per cluster id
    pub cluster_sizes: BTreeMap<Label, usize>,
}

impl ClusterSummary {
    pub fn from_labels(labels: &[Label]) -> Self {
        let mut cluster_sizes = BTreeMap::new();
        let mut n_noise = 0;

        for &label in labels {
            if is_noise(label) {
                n_noise += 1;
            } else {
                *cluster_sizes.entry(label).or_insert(0) += 1;
            }
        }

        Self {
            n_points: labels.len(),
            n_clusters: cluster_sizes.len(),
            n_noise,
            cluster_sizes,
        }
    }

    /// Number of points assigned to some cluster
    pub fn clustered(&self) -> usize {
        self.n_points - self.n_noise
    }

    /// Share of points assigned to some cluster
    pub fn clustering_ratio(&self) -> f64 {
        self.clustered() as f64 / self.n_points.max(1) as f64
    }

    pub fn largest_cluster(&self) -> Option<(Label, usize)> {
        self.cluster_sizes
            .iter()
            .max_by(|a, b| a.1.cmp(b.1).then(b.0.cmp(a.0)))
            .map(|(l, s)| (*l, *s))
    }
}

pub(crate) fn squared_distance(a: ArrayView1<f64>, b: ArrayView1<f64>) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y) * (x - y)).sum()
}

pub(crate) fn euclidean_distance(a: ArrayView1<f64>, b: ArrayView1<f64>) -> f64 {
    squared_distance(a, b).sqrt()
}

/// Within-cluster sum of squared distances to the assigned centroid
pub fn inertia(x: &Array2<f64>, labels: &[Label], centroids: &Array2<f64>) -> Result<f64> {
    if labels.len() != x.nrows() {
        return Err(ClusterError::invalid_input(format!(
            "{} labels for {} samples",
            labels.len(),
            x.nrows()
        )));
    }
    if x.ncols() != centroids.ncols() {
        return Err(ClusterError::DimensionMismatch {
            expected: centroids.ncols(),
            actual: x.ncols(),
        });
    }

    let mut total = 0.0;
    for (i, &label) in labels.iter().enumerate() {
        if label < 0 || label as usize >= centroids.nrows() {
            return Err(ClusterError::invalid_input(format!(
                "label {} has no centroid",
                label
            )));
        }
        total += squared_distance(x.row(i), centroids.row(label as usize));
    }
    Ok(total)
}

/// Mean silhouette coefficient over all non-noise samples
///
/// For each sample, `a` is the mean distance to the rest of its cluster and
/// `b` the smallest mean distance to another cluster; the sample scores
/// `(b - a) / max(a, b)`. Samples alone in their cluster score 0. Needs
/// between 2 and `n - 1` clusters.
pub fn silhouette_score(x: &Array2<f64>, labels: &[Label]) -> Result<f64> {
    if labels.len() != x.nrows() {
        return Err(ClusterError::invalid_input(format!(
            "{} labels for {} samples",
            labels.len(),
            x.nrows()
        )));
    }

    let members: Vec<usize> = (0..labels.len()).filter(|&i| !is_noise(labels[i])).collect();
    let clusters: BTreeSet<Label> = members.iter().map(|&i| labels[i]).collect();
    let n = members.len();

    if clusters.len() < 2 || clusters.len() > n.saturating_sub(1) {
        return Err(ClusterError::invalid_parameter(
            "labels",
            format!(
                "silhouette needs 2 <= n_clusters <= n_samples - 1, got {} clusters for {} samples",
                clusters.len(),
                n
            ),
        ));
    }

    let index: BTreeMap<Label, usize> = clusters.iter().enumerate().map(|(k, l)| (*l, k)).collect();
    let mut sizes = vec![0usize; clusters.len()];
    for &i in &members {
        sizes[index[&labels[i]]] += 1;
    }

    let mut total = 0.0;
    let mut sums = vec![0.0; clusters.len()];
    for &i in &members {
        let own = index[&labels[i]];
        if sizes[own] == 1 {
            continue;
        }

        sums.iter_mut().for_each(|s| *s = 0.0);
        for &j in &members {
            if i != j {
                sums[index[&labels[j]]] += euclidean_distance(x.row(i), x.row(j));
            }
        }

        let a = sums[own] / (sizes[own] - 1) as f64;
        let b = (0..clusters.len())
            .filter(|&k| k != own)
            .map(|k| sums[k] / sizes[k] as f64)
            .fold(f64::INFINITY, f64::min);

        let denom = a.max(b);
        if denom > 0.0 {
            total += (b - a) / denom;
        }
    }

    Ok(total / n as f64)
}
