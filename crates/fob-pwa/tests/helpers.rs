//! Shared test utilities for fob-pwa tests

#![allow(dead_code)]

use async_trait::async_trait;
use fob_pwa::options::{GenerateSwConfig, InjectManifestConfig};
use fob_pwa::{
    DelegateError, HostConfig, ProjectRuntime, PwaBuild, PwaOptions, ServiceWorkerEngine,
    SwBuildResult,
};
use parking_lot::Mutex;
use std::path::Path;
use std::sync::Arc;

pub const INDEX_HTML: &str = "<!doctype html>\n<html lang=\"en\">\n<head>\n  <meta charset=\"utf-8\">\n  <title>Demo</title>\n</head>\n<body>\n  <div id=\"app\"></div>\n</body>\n</html>\n";

/// Engine entry point invocation recorded by [`RecordingEngine`]
#[derive(Debug, Clone, PartialEq)]
pub enum EngineCall {
    GenerateSw(GenerateSwConfig),
    InjectManifest(InjectManifestConfig),
}

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct EngineFailure(pub String);

/// Engine double that records every call and optionally fails
#[derive(Debug, Default)]
pub struct RecordingEngine {
    calls: Mutex<Vec<EngineCall>>,
    failure: Option<String>,
}

impl RecordingEngine {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            failure: Some(message.to_string()),
        })
    }

    pub fn calls(&self) -> Vec<EngineCall> {
        self.calls.lock().clone()
    }

    fn finish(&self) -> Result<SwBuildResult, DelegateError> {
        match &self.failure {
            Some(message) => Err(DelegateError::new(EngineFailure(message.clone()))),
            None => Ok(SwBuildResult {
                count: 3,
                size: 4096,
                warnings: vec!["index.html is larger than 2 MiB".to_string()],
            }),
        }
    }
}

#[async_trait]
impl ServiceWorkerEngine for RecordingEngine {
    async fn generate_sw(&self, config: &GenerateSwConfig) -> Result<SwBuildResult, DelegateError> {
        self.calls.lock().push(EngineCall::GenerateSw(config.clone()));
        self.finish()
    }

    async fn inject_manifest(
        &self,
        config: &InjectManifestConfig,
    ) -> Result<SwBuildResult, DelegateError> {
        self.calls
            .lock()
            .push(EngineCall::InjectManifest(config.clone()));
        self.finish()
    }
}

/// Runtime rooted at `root` with a package.json naming the app
pub fn runtime_with_package(root: impl AsRef<Path>, name: &str) -> Arc<ProjectRuntime> {
    let runtime = ProjectRuntime::new(root.as_ref());
    runtime.add_virtual_file(
        "package.json",
        format!(r#"{{ "name": "{}", "version": "1.0.0" }}"#, name).into_bytes(),
    );
    Arc::new(runtime)
}

/// Configure a build against `runtime` and `engine`
pub async fn configure(
    options: PwaOptions,
    host: HostConfig,
    runtime: Arc<ProjectRuntime>,
    engine: Arc<RecordingEngine>,
) -> PwaBuild {
    PwaBuild::configure(&options, host, runtime, engine)
        .await
        .expect("configuration should resolve")
}

/// File names of generated assets, in emission order
pub fn asset_names(assets: &[fob_pwa::PwaAsset]) -> Vec<&str> {
    assets.iter().map(|a| a.file_name.as_str()).collect()
}
