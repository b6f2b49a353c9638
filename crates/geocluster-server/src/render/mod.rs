//! Presentation of clustered earthquakes

pub mod map;
pub mod palette;

pub use map::LeafletMapRenderer;
pub use palette::{color_for, NOISE_COLOR, PALETTE};

use async_trait::async_trait;
use geocluster_core::Label;

use crate::error::{Error, Result};
use crate::types::{QuakePoint, RenderedArtifact};

/// Sink for a labeled point set
#[async_trait]
pub trait Renderer: Send + Sync {
    /// Draw `points` colored by `labels` and return what was produced
    async fn render(&self, points: &[QuakePoint], labels: &[Label]) -> Result<RenderedArtifact>;

    /// Renderer name for logging
    fn name(&self) -> &str;
}

/// Points and labels must pair up one to one
pub(crate) fn check_lengths(points: &[QuakePoint], labels: &[Label]) -> Result<()> {
    if points.len() != labels.len() {
        return Err(Error::render(format!(
            "{} labels for {} points",
            labels.len(),
            points.len()
        )));
    }
    Ok(())
}
