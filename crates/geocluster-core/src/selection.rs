//! Cluster-count selection: elbow (inertia) and silhouette scans over K

use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

use crate::error::{ClusterError, Result};
use crate::kmeans::KMeans;
use crate::metrics::silhouette_score;

/// Scores of one k-means fit inside a scan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KScore {
    pub k: usize,
    pub inertia: f64,
    pub silhouette: f64,
}

/// Inertia and silhouette for every K of a range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KScan {
    pub scores: Vec<KScore>,
}

impl KScan {
    /// K with the highest silhouette score (the smallest such K on ties)
    pub fn best_by_silhouette(&self) -> Option<usize> {
        self.scores
            .iter()
            .fold(None::<&KScore>, |best, s| match best {
                Some(b) if b.silhouette >= s.silhouette => Some(b),
                _ => Some(s),
            })
            .map(|s| s.k)
    }

    /// (k, inertia) pairs for an elbow plot
    pub fn inertia_curve(&self) -> Vec<(usize, f64)> {
        self.scores.iter().map(|s| (s.k, s.inertia)).collect()
    }

    /// (k, silhouette) pairs
    pub fn silhouette_curve(&self) -> Vec<(usize, f64)> {
        self.scores.iter().map(|s| (s.k, s.silhouette)).collect()
    }
}

/// Fit `template` once per K in `k_range` and score each fit
///
/// Silhouette is only defined for `2 <= k <= n - 1`, so the range must stay
/// inside those bounds.
pub fn scan_k(x: &Array2<f64>, k_range: RangeInclusive<usize>, template: &KMeans) -> Result<KScan> {
    let (lo, hi) = (*k_range.start(), *k_range.end());
    if lo < 2 || lo > hi {
        return Err(ClusterError::invalid_parameter(
            "k_range",
            format!("expected 2 <= k_min <= k_max, got {}..={}", lo, hi),
        ));
    }
    if hi >= x.nrows() {
        return Err(ClusterError::NotEnoughSamples {
            samples: x.nrows(),
            required: hi + 1,
        });
    }

    let mut scores = Vec::with_capacity(hi - lo + 1);
    for k in k_range {
        let fit = template.with_n_clusters(k).fit(x)?;
        let silhouette = silhouette_score(x, &fit.labels)?;
        tracing::debug!(k, inertia = fit.inertia, silhouette, "scored cluster count");
        scores.push(KScore {
            k,
            inertia: fit.inertia,
            silhouette,
        });
    }

    Ok(KScan { scores })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_best_by_silhouette() {
        let scan = KScan {
            scores: vec![
                KScore { k: 2, inertia: 10.0, silhouette: 0.4 },
                KScore { k: 3, inertia: 5.0, silhouette: 0.7 },
                KScore { k: 4, inertia: 4.0, silhouette: 0.7 },
            ],
        };
        assert_eq!(scan.best_by_silhouette(), Some(3));
        assert_eq!(scan.inertia_curve(), vec![(2, 10.0), (3, 5.0), (4, 4.0)]);
    }

    #[test]
    fn test_best_by_silhouette_empty() {
        assert_eq!(KScan { scores: vec![] }.best_by_silhouette(), None);
    }

    #[test]
    fn test_scan_three_blobs() {
        let x = array![
            [0.0, 0.0],
            [0.2, 0.1],
            [0.1, 0.3],
            [5.0, 5.0],
            [5.2, 5.1],
            [5.1, 4.8],
            [10.0, 0.0],
            [10.1, 0.2],
            [9.8, 0.1]
        ];

        let scan = scan_k(&x, 2..=5, &KMeans::new(2)).unwrap();
        assert_eq!(scan.scores.len(), 4);
        assert_eq!(scan.best_by_silhouette(), Some(3));

        // the elbow: splitting the third blob off removes most of the inertia
        let inertia = scan.inertia_curve();
        assert!(inertia[1].1 < inertia[0].1 / 10.0);
    }

    #[test]
    fn test_scan_rejects_bad_range() {
        let x = array![[0.0], [1.0], [2.0], [3.0]];
        assert!(scan_k(&x, 1..=3, &KMeans::new(2)).is_err());
        assert!(scan_k(&x, 3..=2, &KMeans::new(2)).is_err());
        assert!(matches!(
            scan_k(&x, 2..=4, &KMeans::new(2)).unwrap_err(),
            ClusterError::NotEnoughSamples { .. }
        ));
    }
}
