//! File-backed source reading a saved USGS GeoJSON feed

use async_trait::async_trait;
use std::path::PathBuf;

use super::{parse_geojson, PointSource};
use crate::error::{Error, Result};
use crate::types::QuakePoint;

/// Reads points from a GeoJSON file on every fetch
pub struct GeoJsonFileSource {
    path: PathBuf,
}

impl GeoJsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl PointSource for GeoJsonFileSource {
    async fn fetch(&self) -> Result<Vec<QuakePoint>> {
        let body = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            Error::data_source(format!("Failed to read {}: {}", self.path.display(), e))
        })?;

        let points = parse_geojson(&body)?;
        tracing::info!("Loaded {} events from {}", points.len(), self.path.display());
        Ok(points)
    }

    fn name(&self) -> &str {
        "geojson-file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_reads_feed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"type": "FeatureCollection", "features": [
                {{"id": "a", "properties": {{"mag": 4.9, "place": "Chile", "time": 0}},
                  "geometry": {{"coordinates": [-70.5, -30.1, 35.0]}}}}
            ]}}"#
        )
        .unwrap();

        let points = GeoJsonFileSource::new(file.path()).fetch().await.unwrap();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].lat, -30.1);
        assert_eq!(points[0].payload.place.as_deref(), Some("Chile"));
    }

    #[tokio::test]
    async fn test_missing_file_is_data_source_error() {
        let err = GeoJsonFileSource::new("/no/such/feed.geojson")
            .fetch()
            .await
            .unwrap_err();
        assert!(err.is_data_source());
    }
}
