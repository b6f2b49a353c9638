//! Centroid clustering (k-means with k-means++ seeding)

use ndarray::{Array2, ArrayView1, Axis};
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::{ClusterError, Result};
use crate::metrics::squared_distance;
use crate::point::Label;

/// k-means clusterer
///
/// Runs `n_init` independent k-means++ seeded Lloyd fits and keeps the one
/// with the lowest inertia. All randomness comes from `random_state`, so a
/// fixed seed reproduces the same fit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KMeans {
    n_clusters: usize,
    max_iter: usize,
    tolerance: f64,
    n_init: usize,
    random_state: u64,
}

/// Fitted k-means model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KMeansFit {
    /// One row per cluster
    pub centroids: Array2<f64>,
    /// Cluster index per training sample
    pub labels: Vec<Label>,
    /// Within-cluster sum of squared distances
    pub inertia: f64,
    /// Lloyd iterations used by the kept run
    pub n_iter: usize,
}

impl KMeans {
    pub fn new(n_clusters: usize) -> Self {
        Self {
            n_clusters,
            max_iter: 300,
            tolerance: 1e-4,
            n_init: 10,
            random_state: 42,
        }
    }

    pub fn max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn n_init(mut self, n_init: usize) -> Self {
        self.n_init = n_init;
        self
    }

    pub fn random_state(mut self, random_state: u64) -> Self {
        self.random_state = random_state;
        self
    }

    /// Same settings with a different cluster count
    pub fn with_n_clusters(&self, n_clusters: usize) -> Self {
        Self {
            n_clusters,
            ..self.clone()
        }
    }

    pub fn n_clusters(&self) -> usize {
        self.n_clusters
    }

    fn validate(&self, x: &Array2<f64>) -> Result<()> {
        if self.n_clusters == 0 {
            return Err(ClusterError::invalid_parameter("n_clusters", "must be > 0, got 0"));
        }
        if self.max_iter == 0 {
            return Err(ClusterError::invalid_parameter("max_iter", "must be > 0, got 0"));
        }
        if self.n_init == 0 {
            return Err(ClusterError::invalid_parameter("n_init", "must be > 0, got 0"));
        }
        if self.tolerance.is_nan() || self.tolerance < 0.0 {
            return Err(ClusterError::invalid_parameter(
                "tolerance",
                format!("must be >= 0, got {}", self.tolerance),
            ));
        }
        if x.nrows() == 0 || x.ncols() == 0 {
            return Err(ClusterError::EmptyInput);
        }
        if x.nrows() < self.n_clusters {
            return Err(ClusterError::NotEnoughSamples {
                samples: x.nrows(),
                required: self.n_clusters,
            });
        }
        if x.iter().any(|v| !v.is_finite()) {
            return Err(ClusterError::invalid_input("input contains non-finite values"));
        }
        Ok(())
    }

    /// Fit centroids to the rows of `x`
    pub fn fit(&self, x: &Array2<f64>) -> Result<KMeansFit> {
        self.validate(x)?;

        let mut rng = StdRng::seed_from_u64(self.random_state);
        let mut best: Option<KMeansFit> = None;

        for run in 0..self.n_init {
            let centroids = self.init_centroids(x, &mut rng);
            let fit = self.lloyd(x, centroids);
            tracing::trace!(run, inertia = fit.inertia, n_iter = fit.n_iter, "k-means run");

            if best.as_ref().map_or(true, |b| fit.inertia < b.inertia) {
                best = Some(fit);
            }
        }

        let best = best.ok_or_else(|| ClusterError::invalid_parameter("n_init", "no runs"))?;
        tracing::debug!(
            k = self.n_clusters,
            inertia = best.inertia,
            n_iter = best.n_iter,
            "k-means finished"
        );
        Ok(best)
    }

    /// k-means++: each new seed is drawn with probability proportional to its
    /// squared distance from the nearest seed chosen so far
    fn init_centroids(&self, x: &Array2<f64>, rng: &mut StdRng) -> Array2<f64> {
        let n = x.nrows();
        let mut centroids = Array2::zeros((self.n_clusters, x.ncols()));
        centroids.row_mut(0).assign(&x.row(rng.gen_range(0..n)));

        let mut closest: Vec<f64> = x
            .rows()
            .into_iter()
            .map(|row| squared_distance(row, centroids.row(0)))
            .collect();

        for k in 1..self.n_clusters {
            let idx = match WeightedIndex::new(&closest) {
                Ok(dist) => dist.sample(rng),
                // every sample already sits on a centroid
                Err(_) => rng.gen_range(0..n),
            };
            centroids.row_mut(k).assign(&x.row(idx));

            for (i, row) in x.rows().into_iter().enumerate() {
                closest[i] = closest[i].min(squared_distance(row, centroids.row(k)));
            }
        }

        centroids
    }

    fn lloyd(&self, x: &Array2<f64>, mut centroids: Array2<f64>) -> KMeansFit {
        let mut labels = vec![0 as Label; x.nrows()];
        let mut n_iter = 0;

        for _ in 0..self.max_iter {
            n_iter += 1;
            assign(x, &centroids, &mut labels);

            let mut sums = Array2::<f64>::zeros(centroids.raw_dim());
            let mut counts = vec![0usize; self.n_clusters];
            for (row, &label) in x.axis_iter(Axis(0)).zip(labels.iter()) {
                let mut sum = sums.row_mut(label as usize);
                sum += &row;
                counts[label as usize] += 1;
            }

            let mut max_shift: f64 = 0.0;
            for k in 0..self.n_clusters {
                // empty clusters keep their previous centroid
                if counts[k] == 0 {
                    continue;
                }
                let updated = &sums.row(k) / counts[k] as f64;
                let shift = squared_distance(centroids.row(k), updated.view()).sqrt();
                max_shift = max_shift.max(shift);
                centroids.row_mut(k).assign(&updated);
            }

            if max_shift <= self.tolerance {
                break;
            }
        }

        let inertia = assign(x, &centroids, &mut labels);
        KMeansFit {
            centroids,
            labels,
            inertia,
            n_iter,
        }
    }
}

/// Assign each row to its nearest centroid, returning the resulting inertia
fn assign(x: &Array2<f64>, centroids: &Array2<f64>, labels: &mut [Label]) -> f64 {
    let mut inertia = 0.0;
    for (i, row) in x.rows().into_iter().enumerate() {
        let (best, dist) = nearest(row, centroids);
        labels[i] = best as Label;
        inertia += dist;
    }
    inertia
}

fn nearest(row: ArrayView1<f64>, centroids: &Array2<f64>) -> (usize, f64) {
    let mut best = (0, f64::INFINITY);
    for (k, centroid) in centroids.rows().into_iter().enumerate() {
        let dist = squared_distance(row, centroid);
        if dist < best.1 {
            best = (k, dist);
        }
    }
    best
}

impl KMeansFit {
    /// Number of clusters
    pub fn n_clusters(&self) -> usize {
        self.centroids.nrows()
    }

    /// Assign new rows to the nearest fitted centroid
    pub fn predict(&self, x: &Array2<f64>) -> Result<Vec<Label>> {
        if x.ncols() != self.centroids.ncols() {
            return Err(ClusterError::DimensionMismatch {
                expected: self.centroids.ncols(),
                actual: x.ncols(),
            });
        }

        let mut labels = vec![0 as Label; x.nrows()];
        assign(x, &self.centroids, &mut labels);
        Ok(labels)
    }

    /// Distance from every row to every centroid
    pub fn transform(&self, x: &Array2<f64>) -> Result<Array2<f64>> {
        if x.ncols() != self.centroids.ncols() {
            return Err(ClusterError::DimensionMismatch {
                expected: self.centroids.ncols(),
                actual: x.ncols(),
            });
        }

        let mut distances = Array2::zeros((x.nrows(), self.n_clusters()));
        for (i, row) in x.rows().into_iter().enumerate() {
            for (k, centroid) in self.centroids.rows().into_iter().enumerate() {
                distances[[i, k]] = squared_distance(row, centroid).sqrt();
            }
        }
        Ok(distances)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use std::collections::HashSet;

    fn blobs() -> Array2<f64> {
        array![
            [1.0, 1.0],
            [1.5, 2.0],
            [1.2, 1.4],
            [8.0, 8.0],
            [8.5, 7.5],
            [7.8, 8.3],
            [1.1, 1.8],
            [8.2, 7.9]
        ]
    }

    #[test]
    fn test_kmeans_basic() {
        let x = blobs();
        let fit = KMeans::new(2).fit(&x).unwrap();

        assert_eq!(fit.labels.len(), x.nrows());
        assert_eq!(fit.centroids.shape(), &[2, 2]);

        let unique: HashSet<Label> = fit.labels.iter().copied().collect();
        assert_eq!(unique.len(), 2);

        let low = fit.labels[0];
        assert!([0, 1, 2, 6].iter().all(|&i| fit.labels[i] == low));
        assert!([3, 4, 5, 7].iter().all(|&i| fit.labels[i] != low));
    }

    #[test]
    fn test_kmeans_reproducible() {
        let x = blobs();
        let a = KMeans::new(3).random_state(7).fit(&x).unwrap();
        let b = KMeans::new(3).random_state(7).fit(&x).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_kmeans_inertia_matches_labels() {
        let x = blobs();
        let fit = KMeans::new(2).fit(&x).unwrap();
        let recomputed = crate::metrics::inertia(&x, &fit.labels, &fit.centroids).unwrap();
        assert!((fit.inertia - recomputed).abs() < 1e-9);
    }

    #[test]
    fn test_kmeans_k_equals_n() {
        let x = array![[0.0, 0.0], [5.0, 5.0], [9.0, 1.0]];
        let fit = KMeans::new(3).fit(&x).unwrap();
        assert!(fit.inertia.abs() < 1e-12);
    }

    #[test]
    fn test_kmeans_duplicate_points() {
        let x = array![[1.0, 1.0], [1.0, 1.0], [1.0, 1.0]];
        let fit = KMeans::new(2).fit(&x).unwrap();
        assert_eq!(fit.labels.len(), 3);
        assert!(fit.inertia.abs() < 1e-12);
    }

    #[test]
    fn test_kmeans_predict() {
        let x = blobs();
        let fit = KMeans::new(2).fit(&x).unwrap();

        let labels = fit.predict(&array![[1.3, 1.3], [8.1, 8.0]]).unwrap();
        assert_eq!(labels[0], fit.labels[0]);
        assert_eq!(labels[1], fit.labels[3]);
    }

    #[test]
    fn test_kmeans_transform() {
        let x = blobs();
        let fit = KMeans::new(2).fit(&x).unwrap();

        let distances = fit.transform(&x).unwrap();
        assert_eq!(distances.shape(), &[8, 2]);
        assert!(distances.iter().all(|d| *d >= 0.0));
    }

    #[test]
    fn test_kmeans_invalid_clusters() {
        let err = KMeans::new(0).fit(&blobs()).unwrap_err();
        assert!(matches!(err, ClusterError::InvalidParameter { name: "n_clusters", .. }));
    }

    #[test]
    fn test_kmeans_insufficient_samples() {
        let x = array![[1.0, 2.0]];
        assert_eq!(
            KMeans::new(2).fit(&x).unwrap_err(),
            ClusterError::NotEnoughSamples {
                samples: 1,
                required: 2
            }
        );
    }

    #[test]
    fn test_kmeans_empty_input() {
        let x = Array2::<f64>::zeros((0, 2));
        assert_eq!(KMeans::new(1).fit(&x).unwrap_err(), ClusterError::EmptyInput);
    }

    #[test]
    fn test_kmeans_dimension_mismatch() {
        let x_train = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
        let fit = KMeans::new(2).fit(&x_train).unwrap();
        assert!(fit.predict(&array![[1.0, 2.0]]).is_err());
    }
}
