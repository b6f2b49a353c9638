#![allow(dead_code)]

use async_trait::async_trait;
use geocluster_core::{Label, Point};
use geocluster_server::{
    error::{Error, Result},
    PointSource, QuakeEvent, QuakePoint, RenderedArtifact, Renderer,
};
use std::sync::Mutex;

pub fn quake(lat: f64, lon: f64) -> QuakePoint {
    Point::new(
        lat,
        lon,
        QuakeEvent {
            id: None,
            time: None,
            magnitude: Some(4.8),
            place: Some(format!("{lat}, {lon}")),
            depth_km: Some(10.0),
        },
    )
}

/// Three epicenters close together and one far away
pub fn four_quakes() -> Vec<QuakePoint> {
    vec![quake(0.0, 0.0), quake(0.0, 1.0), quake(1.0, 0.0), quake(50.0, 50.0)]
}

pub struct StaticSource(pub Vec<QuakePoint>);

#[async_trait]
impl PointSource for StaticSource {
    async fn fetch(&self) -> Result<Vec<QuakePoint>> {
        Ok(self.0.clone())
    }

    fn name(&self) -> &str {
        "static"
    }
}

pub struct FailingSource;

#[async_trait]
impl PointSource for FailingSource {
    async fn fetch(&self) -> Result<Vec<QuakePoint>> {
        Err(Error::data_source("feed unavailable"))
    }

    fn name(&self) -> &str {
        "failing"
    }
}

/// Keeps every label sequence it is asked to draw
#[derive(Default)]
pub struct RecordingRenderer {
    pub calls: Mutex<Vec<Vec<Label>>>,
}

#[async_trait]
impl Renderer for RecordingRenderer {
    async fn render(&self, points: &[QuakePoint], labels: &[Label]) -> Result<RenderedArtifact> {
        self.calls.lock().unwrap().push(labels.to_vec());
        Ok(RenderedArtifact {
            file_name: "recorded.html".to_string(),
            markers: points.len(),
        })
    }

    fn name(&self) -> &str {
        "recording"
    }
}
