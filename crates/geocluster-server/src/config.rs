//! Configuration for the clustering service

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Environment variable naming a TOML configuration file
pub const CONFIG_ENV: &str = "GEOCLUSTER_CONFIG";

/// Main service configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeoclusterConfig {
    /// Server configuration
    pub server: ServerConfig,
    /// Earthquake feed configuration
    pub source: SourceConfig,
    /// DBSCAN parameters
    pub clustering: ClusteringConfig,
    /// Map output configuration
    pub render: RenderConfig,
}

impl GeoclusterConfig {
    /// Load and validate a TOML file; missing keys fall back to defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        let config = Self::from_toml(&text)?;
        tracing::info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Parse and validate TOML text
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| Error::Config(format!("Invalid TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from an explicit path, else from `GEOCLUSTER_CONFIG`, else defaults
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => match std::env::var_os(CONFIG_ENV) {
                Some(path) => Self::load(PathBuf::from(path)),
                None => Ok(Self::default()),
            },
        }
    }

    /// Reject settings the pipeline could never run with
    pub fn validate(&self) -> Result<()> {
        if self.clustering.eps.is_nan() || self.clustering.eps <= 0.0 {
            return Err(Error::Config(format!(
                "clustering.eps must be > 0, got {}",
                self.clustering.eps
            )));
        }
        if self.clustering.min_samples == 0 {
            return Err(Error::Config("clustering.min_samples must be >= 1".to_string()));
        }
        if self.render.map_file.contains(['/', '\\']) {
            return Err(Error::Config(format!(
                "render.map_file must be a plain file name, got '{}'",
                self.render.map_file
            )));
        }
        Ok(())
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host address
    pub host: String,
    /// Port number
    pub port: u16,
    /// Enable CORS
    pub enable_cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            enable_cors: true,
        }
    }
}

/// Earthquake feed configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// FDSN event query endpoint
    pub base_url: String,
    /// Inclusive start date (YYYY-MM-DD)
    pub start_time: String,
    /// End date (YYYY-MM-DD)
    pub end_time: String,
    /// Minimum magnitude to request
    pub min_magnitude: f64,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Number of retries for failed requests
    pub max_retries: u32,
    /// Read a saved GeoJSON feed instead of querying the network
    pub file: Option<PathBuf>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://earthquake.usgs.gov/fdsnws/event/1/query".to_string(),
            start_time: "2022-04-01".to_string(),
            end_time: "2025-01-01".to_string(),
            min_magnitude: 4.5,
            timeout_secs: 120,
            max_retries: 2,
            file: None,
        }
    }
}

/// DBSCAN parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusteringConfig {
    /// Neighborhood radius in standardized units
    pub eps: f64,
    /// Minimum neighborhood size
    pub min_samples: usize,
    /// Standardize latitude and longitude before clustering
    pub normalize: bool,
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            eps: 0.2,
            min_samples: 5,
            normalize: true,
        }
    }
}

/// Map output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Directory rendered maps are written to and served from
    pub output_dir: PathBuf,
    /// File name of the rendered map
    pub map_file: String,
    /// Initial map zoom
    pub zoom_start: u8,
    /// Marker radius in pixels
    pub marker_radius: u32,
    /// Slippy-map tile URL template
    pub tile_url: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("maps"),
            map_file: "map.html".to_string(),
            zoom_start: 2,
            marker_radius: 3,
            tile_url: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
        }
    }
}
