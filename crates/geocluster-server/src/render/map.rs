//! Self-contained Leaflet map page, one circle marker per event

use async_trait::async_trait;
use geocluster_core::Label;
use serde::Serialize;
use std::path::PathBuf;

use super::{check_lengths, palette::color_for, Renderer};
use crate::config::RenderConfig;
use crate::error::{Error, Result};
use crate::types::{QuakePoint, RenderedArtifact};

const LEAFLET_CSS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
const LEAFLET_JS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";

/// Marker record embedded into the page
#[derive(Debug, Serialize)]
struct Marker {
    lat: f64,
    lon: f64,
    color: &'static str,
    cluster: Label,
    popup: String,
}

/// Writes `<output_dir>/<map_file>` on every render
pub struct LeafletMapRenderer {
    output_dir: PathBuf,
    map_file: String,
    zoom_start: u8,
    marker_radius: u32,
    tile_url: String,
}

impl LeafletMapRenderer {
    pub fn new(config: &RenderConfig) -> Self {
        Self {
            output_dir: config.output_dir.clone(),
            map_file: config.map_file.clone(),
            zoom_start: config.zoom_start,
            marker_radius: config.marker_radius,
            tile_url: config.tile_url.clone(),
        }
    }

    /// Build the page for already validated input
    pub fn page(&self, points: &[QuakePoint], labels: &[Label]) -> Result<String> {
        let markers: Vec<Marker> = points
            .iter()
            .zip(labels)
            .map(|(p, &label)| Marker {
                lat: p.lat,
                lon: p.lon,
                color: color_for(label),
                cluster: label,
                popup: popup_text(p),
            })
            .collect();

        // keep "</script>" inside place names from closing the block
        let markers_json = serde_json::to_string(&markers)?.replace("</", "<\\/");
        let tile_url = serde_json::to_string(&self.tile_url)?;

        Ok(format!(
            r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>Earthquake clusters</title>
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<link rel="stylesheet" href="{css}">
<script src="{js}"></script>
<style>html, body, #map {{ width: 100%; height: 100%; margin: 0; padding: 0; }}</style>
</head>
<body>
<div id="map"></div>
<script>
const map = L.map("map").setView([0, 0], {zoom});
L.tileLayer({tile_url}, {{
  attribution: "&copy; OpenStreetMap contributors",
  maxZoom: 18
}}).addTo(map);
const markers = {markers};
for (const m of markers) {{
  const popup = document.createElement("div");
  popup.textContent = m.popup;
  L.circleMarker([m.lat, m.lon], {{
    radius: {radius},
    color: m.color,
    fill: true,
    fillColor: m.color
  }}).bindPopup(popup).addTo(map);
}}
</script>
</body>
</html>
"#,
            css = LEAFLET_CSS,
            js = LEAFLET_JS,
            zoom = self.zoom_start,
            tile_url = tile_url,
            markers = markers_json,
            radius = self.marker_radius,
        ))
    }
}

fn popup_text(point: &QuakePoint) -> String {
    let magnitude = point
        .payload
        .magnitude
        .map(|m| m.to_string())
        .unwrap_or_else(|| "unknown".to_string());
    let place = point.payload.place.as_deref().unwrap_or("unknown");
    format!("Magnitude: {}, Place: {}", magnitude, place)
}

#[async_trait]
impl Renderer for LeafletMapRenderer {
    async fn render(&self, points: &[QuakePoint], labels: &[Label]) -> Result<RenderedArtifact> {
        check_lengths(points, labels)?;

        let page = self.page(points, labels)?;
        tokio::fs::create_dir_all(&self.output_dir).await.map_err(|e| {
            Error::render(format!(
                "Failed to create {}: {}",
                self.output_dir.display(),
                e
            ))
        })?;

        let path = self.output_dir.join(&self.map_file);
        tokio::fs::write(&path, page)
            .await
            .map_err(|e| Error::render(format!("Failed to write {}: {}", path.display(), e)))?;

        tracing::info!("Map with {} markers written to {}", points.len(), path.display());

        Ok(RenderedArtifact {
            file_name: self.map_file.clone(),
            markers: points.len(),
        })
    }

    fn name(&self) -> &str {
        "leaflet-map"
    }
}
