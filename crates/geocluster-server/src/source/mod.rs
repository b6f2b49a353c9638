//! Data sources supplying earthquake points
//!
//! Both sources read the USGS GeoJSON event format: a `FeatureCollection`
//! whose features carry `[lon, lat, depth]` coordinates and `time` (epoch
//! milliseconds), `mag` and `place` properties.

pub mod file;
pub mod usgs;

pub use file::GeoJsonFileSource;
pub use usgs::UsgsSource;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::types::{QuakeEvent, QuakePoint};

/// Supplies the dataset for one clustering run
#[async_trait]
pub trait PointSource: Send + Sync {
    /// Fetch the current set of points
    async fn fetch(&self) -> Result<Vec<QuakePoint>>;

    /// Source name for logging
    fn name(&self) -> &str;
}

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    features: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    /// String or number per GeoJSON
    id: Option<Value>,
    properties: Option<Properties>,
    geometry: Option<Geometry>,
}

impl Feature {
    fn id(&self) -> Option<String> {
        match self.id.as_ref()? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct Properties {
    time: Option<i64>,
    mag: Option<f64>,
    place: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    #[serde(default)]
    coordinates: Vec<Option<f64>>,
}

/// Parse a USGS GeoJSON payload into points
///
/// Malformed features and features without usable coordinates are skipped;
/// anything that is not a `FeatureCollection` is rejected.
pub fn parse_geojson(body: &str) -> Result<Vec<QuakePoint>> {
    let collection: FeatureCollection = serde_json::from_str(body)
        .map_err(|e| Error::data_source(format!("Malformed GeoJSON payload: {}", e)))?;

    if collection.kind != "FeatureCollection" {
        return Err(Error::data_source(format!(
            "Expected a FeatureCollection, got '{}'",
            collection.kind
        )));
    }

    let total = collection.features.len();
    let points: Vec<QuakePoint> = collection
        .features
        .into_iter()
        .enumerate()
        .filter_map(|(idx, raw)| {
            let feature: Feature = match serde_json::from_value(raw) {
                Ok(feature) => feature,
                Err(e) => {
                    tracing::warn!(index = idx, "Skipping malformed feature: {}", e);
                    return None;
                }
            };
            let point = to_point(&feature);
            if point.is_none() {
                tracing::warn!(id = ?feature.id(), "Skipping feature without usable coordinates");
            }
            point
        })
        .collect();

    tracing::debug!("Parsed {} of {} features", points.len(), total);
    Ok(points)
}

fn to_point(feature: &Feature) -> Option<QuakePoint> {
    let coords = &feature.geometry.as_ref()?.coordinates;
    let lon = (*coords.first()?)?;
    let lat = (*coords.get(1)?)?;
    if !lat.is_finite() || !lon.is_finite() {
        return None;
    }

    let properties = feature.properties.as_ref();
    let event = QuakeEvent {
        id: feature.id(),
        time: properties
            .and_then(|p| p.time)
            .and_then(DateTime::<Utc>::from_timestamp_millis),
        magnitude: properties.and_then(|p| p.mag),
        place: properties.and_then(|p| p.place.clone()),
        depth_km: coords.get(2).copied().flatten(),
    };

    Some(QuakePoint::new(lat, lon, event))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "type": "FeatureCollection",
        "metadata": {"count": 3},
        "features": [
            {
                "type": "Feature",
                "id": "us7000abcd",
                "properties": {"mag": 5.6, "place": "45 km S of Tonga", "time": 1672531200000},
                "geometry": {"type": "Point", "coordinates": [-175.2, -21.4, 10.0]}
            },
            {
                "type": "Feature",
                "id": "us7000noco",
                "properties": {"mag": 4.7, "place": "nowhere", "time": 1672531300000},
                "geometry": null
            },
            {
                "type": "Feature",
                "id": "us7000efgh",
                "properties": {"mag": null, "place": null, "time": null},
                "geometry": {"type": "Point", "coordinates": [139.7, 35.6]}
            }
        ]
    }"#;

    #[test]
    fn test_parse_sample_feed() {
        let points = parse_geojson(SAMPLE).unwrap();
        assert_eq!(points.len(), 2);

        let tonga = &points[0];
        assert_eq!(tonga.lat, -21.4);
        assert_eq!(tonga.lon, -175.2);
        assert_eq!(tonga.payload.magnitude, Some(5.6));
        assert_eq!(tonga.payload.place.as_deref(), Some("45 km S of Tonga"));
        assert_eq!(tonga.payload.depth_km, Some(10.0));
        assert_eq!(
            tonga.payload.time.map(|t| t.to_rfc3339()),
            Some("2023-01-01T00:00:00+00:00".to_string())
        );

        let tokyo = &points[1];
        assert_eq!(tokyo.lat, 35.6);
        assert_eq!(tokyo.payload.magnitude, None);
        assert_eq!(tokyo.payload.depth_km, None);
        assert_eq!(tokyo.payload.time, None);
    }

    #[test]
    fn test_null_properties_and_numeric_id() {
        let body = r#"{
            "type": "FeatureCollection",
            "features": [
                {"id": 7, "properties": null, "geometry": {"coordinates": [10.0, 20.0]}},
                {"id": "ok", "properties": {"mag": 4.9}, "geometry": {"coordinates": [11.0, 21.0]}}
            ]
        }"#;

        let points = parse_geojson(body).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].payload.id.as_deref(), Some("7"));
        assert_eq!(points[0].payload.magnitude, None);
        assert_eq!(points[0].lat, 20.0);
        assert_eq!(points[1].payload.magnitude, Some(4.9));
    }

    #[test]
    fn test_malformed_feature_is_skipped() {
        let body = r#"{
            "type": "FeatureCollection",
            "features": [
                {"properties": {"mag": "strong"}, "geometry": {"coordinates": [1.0, 2.0]}},
                {"properties": {"mag": 5.0}, "geometry": {"coordinates": [3.0, 4.0]}}
            ]
        }"#;

        let points = parse_geojson(body).unwrap();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].lon, 3.0);
    }

    #[test]
    fn test_empty_feed() {
        let points = parse_geojson(r#"{"type": "FeatureCollection", "features": []}"#).unwrap();
        assert!(points.is_empty());
    }

    #[test]
    fn test_rejects_malformed_payload() {
        let err = parse_geojson("<html>Service Unavailable</html>").unwrap_err();
        assert!(err.is_data_source());
    }

    #[test]
    fn test_rejects_other_geojson_types() {
        let err = parse_geojson(r#"{"type": "Feature", "features": []}"#).unwrap_err();
        assert!(matches!(err, Error::DataSource(_)));
    }
}
