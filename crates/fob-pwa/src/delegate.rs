//! Seam to the service worker generation engine.
//!
//! The engine computes the precache manifest from the written output and
//! produces the worker. This crate only decides which entry point runs and
//! with which config block.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::DelegateError;
use crate::options::{GenerateSwConfig, InjectManifestConfig};

/// What the engine reports after writing the worker.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwBuildResult {
    /// Number of precached entries
    pub count: usize,
    /// Total precached bytes
    pub size: u64,
    pub warnings: Vec<String>,
}

/// Service worker generation engine.
///
/// Exactly one of the two methods is called per non-SSR build.
#[async_trait]
pub trait ServiceWorkerEngine: Send + Sync + std::fmt::Debug {
    /// Write a complete worker from `config`.
    async fn generate_sw(&self, config: &GenerateSwConfig) -> Result<SwBuildResult, DelegateError>;

    /// Inject the precache manifest into the user's worker source.
    async fn inject_manifest(
        &self,
        config: &InjectManifestConfig,
    ) -> Result<SwBuildResult, DelegateError>;
}
