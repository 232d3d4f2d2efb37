use std::sync::Arc;

use crate::artifacts::ArtifactStore;
use crate::config::Config;
use crate::optimization::ResumeOptimizer;

/// Shared application state injected into all route handlers via Axum extractors.
/// Holds no per-request mutable data.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable optimizer. Default: GeminiOptimizer.
    pub optimizer: Arc<dyn ResumeOptimizer>,
    pub artifacts: ArtifactStore,
}

impl AppState {
    pub fn new(config: Config, optimizer: Arc<dyn ResumeOptimizer>) -> Self {
        let artifacts = ArtifactStore::new(config.output_dir.clone());
        Self {
            config,
            optimizer,
            artifacts,
        }
    }
}
