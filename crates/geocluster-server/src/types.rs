//! Earthquake records and pipeline outputs

use chrono::{DateTime, Utc};
use geocluster_core::{ClusterSummary, Point};
use serde::{Deserialize, Serialize};

/// Payload carried by every clustered point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuakeEvent {
    /// USGS event id
    pub id: Option<String>,
    /// Origin time
    pub time: Option<DateTime<Utc>>,
    /// Magnitude (absent for some reviewed events)
    pub magnitude: Option<f64>,
    /// Human-readable location, e.g. "12 km SW of Ocotillo, CA"
    pub place: Option<String>,
    /// Hypocenter depth in km
    pub depth_km: Option<f64>,
}

/// Earthquake as a clusterable point
pub type QuakePoint = Point<QuakeEvent>;

/// Output of the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedArtifact {
    /// File name relative to the render output directory
    pub file_name: String,
    /// Number of markers drawn
    pub markers: usize,
}

/// Result of one fetch -> cluster -> render run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterRun {
    /// Cluster and noise counts
    pub summary: ClusterSummary,
    /// Rendered map
    pub artifact: RenderedArtifact,
    /// Parameters the run used
    pub eps: f64,
    pub min_samples: usize,
    /// Wall-clock time of the whole run
    pub processing_time_ms: u64,
}

impl ClusterRun {
    pub fn n_clusters(&self) -> usize {
        self.summary.n_clusters
    }

    pub fn n_noise(&self) -> usize {
        self.summary.n_noise
    }
}
