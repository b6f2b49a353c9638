//! Application state for the clustering server

use parking_lot::RwLock;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::config::GeoclusterConfig;
use crate::error::Result;
use crate::pipeline::ClusterPipeline;
use crate::types::ClusterRun;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Configuration
    config: GeoclusterConfig,
    /// Fetch -> cluster -> render pipeline
    pipeline: ClusterPipeline,
    /// Runs overwrite the same map file, so only one at a time
    run_lock: Mutex<()>,
    /// Most recent successful run
    last_run: RwLock<Option<ClusterRun>>,
    /// Ready state
    ready: RwLock<bool>,
}

impl AppState {
    /// Create state with the collaborators the configuration names
    pub fn new(config: GeoclusterConfig) -> Result<Self> {
        let pipeline = ClusterPipeline::from_config(&config)?;
        Ok(Self::with_pipeline(config, pipeline))
    }

    /// Create state around an already assembled pipeline
    pub fn with_pipeline(config: GeoclusterConfig, pipeline: ClusterPipeline) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                pipeline,
                run_lock: Mutex::new(()),
                last_run: RwLock::new(None),
                ready: RwLock::new(true),
            }),
        }
    }

    /// Get configuration
    pub fn config(&self) -> &GeoclusterConfig {
        &self.inner.config
    }

    pub fn pipeline(&self) -> &ClusterPipeline {
        &self.inner.pipeline
    }

    /// Run the pipeline and remember the outcome
    pub async fn run_pipeline(&self) -> Result<ClusterRun> {
        let _guard = self.inner.run_lock.lock().await;
        let run = self.inner.pipeline.run().await?;
        *self.inner.last_run.write() = Some(run.clone());
        Ok(run)
    }

    /// Most recent successful run, if any
    pub fn last_run(&self) -> Option<ClusterRun> {
        self.inner.last_run.read().clone()
    }

    /// Check if the server is ready
    pub fn is_ready(&self) -> bool {
        *self.inner.ready.read()
    }

    /// Set ready state
    pub fn set_ready(&self, ready: bool) {
        *self.inner.ready.write() = ready;
    }
}
