//! # Density-Based Spatial Clustering (DBSCAN)
//!
//! Groups 2-D points by density reachability:
//! - a **core point** has at least `min_samples` points (itself included)
//!   within `eps`
//! - core points that are within `eps` of each other are chained into one
//!   cluster, together with every point within `eps` of a chain member
//! - non-core points reached by a cluster are **border points**; the first
//!   cluster to reach them keeps them
//! - everything else is [`NOISE`]
//!
//! Coordinates are standardized per axis before distances are taken, so a
//! wide longitude range does not drown out latitude.

use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::error::{ClusterError, Result};
use crate::metrics::ClusterSummary;
use crate::point::{is_noise, Label, Spatial, NOISE};
use crate::scale::StandardScaler;

/// Label every point of `points` with a cluster id or [`NOISE`]
///
/// Labels come back in input order. Cluster ids start at 0 and follow the
/// order in which clusters are discovered walking the input front to back.
///
/// ```
/// use geocluster_core::{cluster, NOISE};
///
/// let points = [[0.0, 0.0], [0.0, 1.0], [1.0, 0.0], [50.0, 50.0]];
/// let labels = cluster(&points, 2.0, 2).unwrap();
/// assert_eq!(labels, vec![0, 0, 0, NOISE]);
/// ```
pub fn cluster<T: Spatial>(points: &[T], eps: f64, min_samples: usize) -> Result<Vec<Label>> {
    Dbscan::new(eps, min_samples).fit(points).map(|result| result.labels)
}

/// DBSCAN clusterer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dbscan {
    /// Neighborhood radius (in standardized units when `normalize` is set)
    eps: f64,
    /// Minimum neighborhood size, the point itself included
    min_samples: usize,
    /// Standardize both axes before measuring distances
    normalize: bool,
}

impl Dbscan {
    /// Create a new DBSCAN clusterer with given parameters
    pub fn new(eps: f64, min_samples: usize) -> Self {
        Self {
            eps,
            min_samples,
            normalize: true,
        }
    }

    /// Enable or disable per-axis standardization
    pub fn normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    pub fn eps(&self) -> f64 {
        self.eps
    }

    pub fn min_samples(&self) -> usize {
        self.min_samples
    }

    /// Check parameters without touching any data
    pub fn validate(&self) -> Result<()> {
        if self.eps.is_nan() || self.eps <= 0.0 {
            return Err(ClusterError::invalid_parameter(
                "eps",
                format!("must be > 0, got {}", self.eps),
            ));
        }
        if self.min_samples < 1 {
            return Err(ClusterError::invalid_parameter(
                "min_samples",
                format!("must be >= 1, got {}", self.min_samples),
            ));
        }
        Ok(())
    }

    /// Perform DBSCAN clustering
    pub fn fit<T: Spatial>(&self, points: &[T]) -> Result<DbscanResult> {
        self.validate()?;

        if let Some(idx) = points.iter().position(|p| !p.is_finite()) {
            return Err(ClusterError::invalid_input(format!(
                "point {} has a non-finite coordinate",
                idx
            )));
        }

        let n = points.len();
        if n == 0 {
            return Ok(DbscanResult::empty());
        }

        let features = self.features(points)?;
        let neighborhoods: Vec<Vec<usize>> =
            (0..n).map(|i| self.range_query(&features, i)).collect();
        let core: Vec<bool> = neighborhoods
            .iter()
            .map(|neighbors| neighbors.len() >= self.min_samples)
            .collect();

        let mut labels = vec![NOISE; n];
        let mut cluster_id: Label = 0;

        for i in 0..n {
            if labels[i] != NOISE || !core[i] {
                continue;
            }

            self.expand_cluster(i, cluster_id, &neighborhoods, &core, &mut labels);
            cluster_id += 1;
        }

        let summary = ClusterSummary::from_labels(&labels);
        tracing::debug!(
            points = n,
            clusters = summary.n_clusters,
            noise = summary.n_noise,
            core = core.iter().filter(|c| **c).count(),
            "dbscan finished"
        );

        Ok(DbscanResult {
            labels,
            core,
            summary,
        })
    }

    /// Coordinates as an `n x 2` matrix, standardized when requested
    fn features<T: Spatial>(&self, points: &[T]) -> Result<Array2<f64>> {
        let mut x = Array2::zeros((points.len(), 2));
        for (i, p) in points.iter().enumerate() {
            let [a, b] = p.coords();
            x[[i, 0]] = a;
            x[[i, 1]] = b;
        }

        if !self.normalize {
            return Ok(x);
        }

        let mut scaler = StandardScaler::new();
        let scaled = scaler.fit_transform(&x)?;
        tracing::debug!(
            mean = ?scaler.mean(),
            scale = ?scaler.scale(),
            "standardized coordinates"
        );
        Ok(scaled)
    }

    fn range_query(&self, features: &Array2<f64>, point_idx: usize) -> Vec<usize> {
        let p = features.row(point_idx);
        features
            .rows()
            .into_iter()
            .enumerate()
            .filter(|(_, q)| {
                let dx = p[0] - q[0];
                let dy = p[1] - q[1];
                (dx * dx + dy * dy).sqrt() <= self.eps
            })
            .map(|(i, _)| i)
            .collect()
    }

    /// Breadth-first walk from a core point; only unlabeled points are claimed
    fn expand_cluster(
        &self,
        seed: usize,
        cluster_id: Label,
        neighborhoods: &[Vec<usize>],
        core: &[bool],
        labels: &mut [Label],
    ) {
        labels[seed] = cluster_id;
        let mut queue: VecDeque<usize> = neighborhoods[seed].iter().copied().collect();

        while let Some(q) = queue.pop_front() {
            if labels[q] != NOISE {
                continue;
            }
            labels[q] = cluster_id;

            if core[q] {
                queue.extend(neighborhoods[q].iter().copied().filter(|&r| labels[r] == NOISE));
            }
        }
    }
}

/// Result of a DBSCAN run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DbscanResult {
    /// One label per input point, in input order
    pub labels: Vec<Label>,
    /// Core-point flag per input point
    pub core: Vec<bool>,
    /// Cluster and noise counts
    pub summary: ClusterSummary,
}

impl DbscanResult {
    fn empty() -> Self {
        Self {
            labels: vec![],
            core: vec![],
            summary: ClusterSummary::default(),
        }
    }

    /// Get the number of clusters found
    pub fn num_clusters(&self) -> usize {
        self.summary.n_clusters
    }

    /// Indices of the core points
    pub fn core_indices(&self) -> Vec<usize> {
        self.core
            .iter()
            .enumerate()
            .filter(|(_, c)| **c)
            .map(|(i, _)| i)
            .collect()
    }

    /// Indices of the points labeled as noise
    pub fn noise_indices(&self) -> Vec<usize> {
        self.labels
            .iter()
            .enumerate()
            .filter(|(_, l)| is_noise(**l))
            .map(|(i, _)| i)
            .collect()
    }

    /// Member indices of one cluster
    pub fn members(&self, cluster_id: Label) -> Vec<usize> {
        self.labels
            .iter()
            .enumerate()
            .filter(|(_, l)| **l == cluster_id)
            .map(|(i, _)| i)
            .collect()
    }
}
