//! Build phase controller.
//!
//! A [`PwaBuild`] only exists once configuration is resolved, which makes
//! that phase a precondition of every other one. The remaining phases are
//! methods the host calls in order:
//!
//! 1. [`PwaBuild::configure`] when the host configuration is final
//! 2. [`PwaBuild::transform_html`] for each emitted HTML document
//! 3. [`PwaBuild::generate_bundle`] once the module graph is loaded
//! 4. [`PwaBuild::close`] after the output directory is written
//!
//! Virtual module hooks come from [`PwaBuild::virtual_modules`] and share the
//! same per-build state.

use std::sync::Arc;

use crate::constants::REGISTER_SW_FILENAME;
use crate::context::BuildContext;
use crate::delegate::{ServiceWorkerEngine, SwBuildResult};
use crate::error::{PwaError, Result};
use crate::html;
use crate::options::{
    DelegateConfig, HostConfig, InjectRegister, PwaOptions, ResolvedOptions, resolve_options,
};
use crate::register::{RegisterMode, TemplateKind, generate};
use crate::runtime::Runtime;
use crate::virtual_module::VirtualModuleProvider;

/// File produced during bundle generation, relative to the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PwaAsset {
    pub file_name: String,
    pub source: String,
}

/// PWA orchestration for one build pass.
///
/// Cloning shares the build state; create a new `PwaBuild` per build.
#[derive(Debug, Clone)]
pub struct PwaBuild {
    ctx: Arc<BuildContext>,
}

impl PwaBuild {
    /// Configuration-resolved phase.
    ///
    /// Fails fast on invalid options before any asset is produced.
    pub async fn configure(
        user: &PwaOptions,
        host: HostConfig,
        runtime: Arc<dyn Runtime>,
        engine: Arc<dyn ServiceWorkerEngine>,
    ) -> Result<Self> {
        let options = resolve_options(user, &host, runtime.as_ref()).await?;

        tracing::debug!(
            strategy = %options.strategy(),
            ssr = host.ssr,
            command = ?host.command,
            "PWA build configured"
        );

        Ok(Self {
            ctx: Arc::new(BuildContext::new(options, host, runtime, engine)),
        })
    }

    pub fn options(&self) -> &ResolvedOptions {
        self.ctx.options()
    }

    pub fn host(&self) -> &HostConfig {
        self.ctx.host()
    }

    /// Resolve/load hooks bound to this build.
    pub fn virtual_modules(&self) -> VirtualModuleProvider {
        VirtualModuleProvider::new(Arc::clone(&self.ctx))
    }

    /// Whether application code loaded a virtual register module so far.
    pub fn virtual_register_used(&self) -> bool {
        self.ctx.virtual_register_used()
    }

    /// Injection mode for this build, settling `auto` if still open.
    pub fn inject_register(&self) -> InjectRegister {
        self.ctx.inject_register()
    }

    /// HTML-transform phase for one document.
    ///
    /// A document already transformed in this build is returned unchanged so
    /// its tags are never duplicated.
    pub fn transform_html(&self, document: &str, html: &str) -> Result<String> {
        if !self.ctx.begin_document(document) {
            tracing::debug!(document, "Document already transformed, skipping");
            return Ok(html.to_string());
        }

        html::inject(html, self.options(), self.inject_register(), document)
    }

    /// Bundle-generation phase.
    ///
    /// Returns the manifest (if configured) and, when registration is
    /// injected as a script, the standalone register script unless the
    /// project already ships one in its public directory. Later calls in the
    /// same build return nothing.
    pub fn generate_bundle(&self) -> Result<Vec<PwaAsset>> {
        if !self.ctx.begin_bundle() {
            tracing::debug!("PWA assets already generated for this build");
            return Ok(Vec::new());
        }

        let options = self.options();
        let mut assets = Vec::new();

        if let Some(manifest) = &options.manifest {
            let source = manifest
                .to_json(options.minify)
                .map_err(|e| PwaError::config(format!("cannot serialize web manifest: {}", e)))?;
            assets.push(PwaAsset {
                file_name: options.manifest_filename.clone(),
                source,
            });
        }

        if self.inject_register() == InjectRegister::Script {
            let custom = self.host().public_path(REGISTER_SW_FILENAME);
            if self.ctx.runtime.exists(&custom) {
                tracing::debug!(
                    path = %custom.display(),
                    "Keeping project register script"
                );
            } else {
                assets.push(PwaAsset {
                    file_name: REGISTER_SW_FILENAME.to_string(),
                    source: generate(options, RegisterMode::Build, TemplateKind::Script),
                });
            }
        }

        tracing::debug!(count = assets.len(), "Generated PWA assets");
        Ok(assets)
    }

    /// Close phase: run the service worker engine once.
    ///
    /// SSR builds and repeated calls return `Ok(None)` without touching the
    /// engine. Engine errors are returned as [`PwaError::Delegate`] with the
    /// engine's own message.
    pub async fn close(&self) -> Result<Option<SwBuildResult>> {
        if !self.ctx.begin_close() {
            tracing::debug!("PWA build already closed");
            return Ok(None);
        }

        if self.host().ssr {
            tracing::debug!("SSR build, skipping service worker generation");
            return Ok(None);
        }

        let options = self.options();
        let result = match &options.delegate {
            DelegateConfig::GenerateSw(config) => self.ctx.engine.generate_sw(config).await?,
            DelegateConfig::InjectManifest(config) => {
                self.ctx.engine.inject_manifest(config).await?
            }
        };

        tracing::info!(
            strategy = %options.strategy(),
            sw_dest = %options.sw_dest.display(),
            count = result.count,
            size_kib = result.size as f64 / 1024.0,
            "Precached {} entries",
            result.count
        );
        for warning in &result.warnings {
            tracing::warn!(strategy = %options.strategy(), "{}", warning);
        }

        Ok(Some(result))
    }
}
