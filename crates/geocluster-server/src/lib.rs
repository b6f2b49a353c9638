//! # Geocluster server
//!
//! Fetches recent earthquakes, clusters their epicenters with DBSCAN and
//! serves the result as a Leaflet map.
//!
//! ## Architecture
//!
//! ```text
//! PointSource (USGS feed | GeoJSON file)
//!        │  Vec<QuakePoint>
//!        ▼
//! geocluster_core::Dbscan  ──►  labels + ClusterSummary
//!        │
//!        ▼
//! Renderer (Leaflet map page)  ──►  RenderedArtifact
//! ```
//!
//! [`pipeline::ClusterPipeline`] sequences the three stages and
//! [`server::GeoclusterServer`] exposes them over HTTP.

pub mod config;
pub mod error;
pub mod pipeline;
pub mod render;
pub mod server;
pub mod source;
pub mod types;

pub use config::GeoclusterConfig;
pub use error::{Error, Result};
pub use pipeline::ClusterPipeline;
pub use render::{LeafletMapRenderer, Renderer};
pub use server::GeoclusterServer;
pub use source::{GeoJsonFileSource, PointSource, UsgsSource};
pub use types::{ClusterRun, QuakeEvent, QuakePoint, RenderedArtifact};
