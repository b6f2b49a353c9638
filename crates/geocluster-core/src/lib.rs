//! geocluster-core: clustering algorithms for small spatial and tabular datasets
//!
//! - [`cluster`] / [`Dbscan`]: density-based clustering of 2-D points with
//!   per-axis standardization
//! - [`KMeans`]: centroid clustering with k-means++ seeding
//! - [`silhouette_score`], [`inertia`], [`scan_k`]: picking a cluster count
//! - [`StandardScaler`]: zero-mean, unit-variance feature scaling
//!
//! Everything here is synchronous and pure: inputs are borrowed and never
//! modified.

pub mod datasets;
pub mod dbscan;
pub mod error;
pub mod kmeans;
pub mod metrics;
pub mod point;
pub mod scale;
pub mod selection;

pub use dbscan::{cluster, Dbscan, DbscanResult};
pub use error::{ClusterError, Result};
pub use kmeans::{KMeans, KMeansFit};
pub use metrics::{inertia, silhouette_score, ClusterSummary};
pub use point::{is_noise, Label, Point, Spatial, NOISE};
pub use scale::StandardScaler;
pub use selection::{scan_k, KScan, KScore};
