//! Fetch -> cluster -> render sequencing

use geocluster_core::Dbscan;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use crate::config::GeoclusterConfig;
use crate::error::{Error, Result};
use crate::render::{LeafletMapRenderer, Renderer};
use crate::source::{GeoJsonFileSource, PointSource, UsgsSource};
use crate::types::ClusterRun;

/// One data source, one clusterer, one renderer
#[derive(Clone)]
pub struct ClusterPipeline {
    source: Arc<dyn PointSource>,
    renderer: Arc<dyn Renderer>,
    dbscan: Dbscan,
}

impl fmt::Debug for ClusterPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClusterPipeline")
            .field("source", &self.source.name())
            .field("renderer", &self.renderer.name())
            .field("dbscan", &self.dbscan)
            .finish()
    }
}

impl ClusterPipeline {
    /// Create a pipeline from explicit collaborators
    pub fn new(
        source: Arc<dyn PointSource>,
        renderer: Arc<dyn Renderer>,
        dbscan: Dbscan,
    ) -> Result<Self> {
        dbscan.validate()?;
        Ok(Self {
            source,
            renderer,
            dbscan,
        })
    }

    /// Build the collaborators a configuration asks for
    ///
    /// A configured `source.file` replaces the network feed.
    pub fn from_config(config: &GeoclusterConfig) -> Result<Self> {
        let source: Arc<dyn PointSource> = match &config.source.file {
            Some(path) => Arc::new(GeoJsonFileSource::new(path)),
            None => Arc::new(UsgsSource::new(&config.source)?),
        };
        let renderer = Arc::new(LeafletMapRenderer::new(&config.render));
        let dbscan = Dbscan::new(config.clustering.eps, config.clustering.min_samples)
            .normalize(config.clustering.normalize);

        tracing::info!(
            "Pipeline: source={}, renderer={}, eps={}, min_samples={}",
            source.name(),
            renderer.name(),
            dbscan.eps(),
            dbscan.min_samples()
        );

        Self::new(source, renderer, dbscan)
    }

    pub fn dbscan(&self) -> &Dbscan {
        &self.dbscan
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    /// Run all three stages; the first failure is returned as is
    pub async fn run(&self) -> Result<ClusterRun> {
        let start = Instant::now();

        let points = self.source.fetch().await?;
        tracing::info!("Clustering {} points", points.len());

        let dbscan = self.dbscan.clone();
        let (points, result) = tokio::task::spawn_blocking(move || {
            let result = dbscan.fit(&points);
            (points, result)
        })
        .await
        .map_err(|e| Error::internal(format!("Clustering task failed: {}", e)))?;
        let result = result?;

        let artifact = self.renderer.render(&points, &result.labels).await?;

        let run = ClusterRun {
            summary: result.summary,
            artifact,
            eps: self.dbscan.eps(),
            min_samples: self.dbscan.min_samples(),
            processing_time_ms: start.elapsed().as_millis() as u64,
        };

        tracing::info!(
            "Run finished: {} clusters, {} noise points in {}ms",
            run.n_clusters(),
            run.n_noise(),
            run.processing_time_ms
        );

        Ok(run)
    }
}
