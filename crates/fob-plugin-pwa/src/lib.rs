//! Rolldown plugin for Progressive Web Apps
//!
//! Wires a [`fob_pwa::PwaBuild`] into Rolldown as two plugins sharing one
//! build state:
//!
//! - [`FobPwaVirtualPlugin`] serves `virtual:pwa-register` and
//!   `virtual:pwa-register/type` through `resolve_id` / `load`.
//! - [`FobPwaPlugin`] runs in `generate_bundle`: it patches every emitted
//!   `.html` asset, then adds the web manifest and `registerSW.js`.
//!
//! Rolldown has no hook after the output is written, so the service worker
//! step is [`FobPwaPlugin::close`], called by the host once the bundle is on
//! disk.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use fob_plugin_pwa::FobPwaPlugin;
//! use fob_pwa::{HostConfig, ProjectRuntime, PwaOptions, ServiceWorkerEngine};
//! use std::sync::Arc;
//!
//! # async fn example(engine: Arc<dyn ServiceWorkerEngine>) -> anyhow::Result<()> {
//! let plugin = FobPwaPlugin::configure(
//!     &PwaOptions::load(".")?,
//!     HostConfig::new(".").out_dir("dist"),
//!     Arc::new(ProjectRuntime::new(".")),
//!     engine,
//! )
//! .await?;
//!
//! let plugins = plugin.plugins();
//! // ... run the Rolldown build with `plugins` and write the output ...
//! plugin.close().await?;
//! # let _ = plugins;
//! # Ok(())
//! # }
//! ```

use anyhow::{Context, Result};
use fob_pwa::{
    HostConfig, PwaBuild, PwaOptions, Runtime, ServiceWorkerEngine, SwBuildResult,
    VirtualModuleProvider,
};
use rolldown_common::{ModuleType, Output, OutputAsset};
use rolldown_plugin::{
    __inner::SharedPluginable, HookGenerateBundleArgs, HookLoadArgs, HookLoadOutput,
    HookLoadReturn, HookNoopReturn, HookResolveIdArgs, HookResolveIdOutput, HookResolveIdReturn,
    HookUsage, Plugin, PluginContext,
};
use std::borrow::Cow;
use std::sync::Arc;

/// Build-phase plugin: HTML injection and PWA asset emission.
#[derive(Debug, Clone)]
pub struct FobPwaPlugin {
    build: PwaBuild,
}

impl FobPwaPlugin {
    pub fn new(build: PwaBuild) -> Self {
        Self { build }
    }

    /// Resolve options for a new build and wrap it.
    pub async fn configure(
        options: &PwaOptions,
        host: HostConfig,
        runtime: Arc<dyn Runtime>,
        engine: Arc<dyn ServiceWorkerEngine>,
    ) -> fob_pwa::Result<Self> {
        Ok(Self::new(
            PwaBuild::configure(options, host, runtime, engine).await?,
        ))
    }

    pub fn build(&self) -> &PwaBuild {
        &self.build
    }

    /// Companion plugin serving the virtual modules of this build.
    pub fn virtual_plugin(&self) -> FobPwaVirtualPlugin {
        FobPwaVirtualPlugin {
            modules: self.build.virtual_modules(),
        }
    }

    /// Both plugins, virtual modules first.
    pub fn plugins(&self) -> Vec<SharedPluginable> {
        vec![Arc::new(self.virtual_plugin()), Arc::new(self.clone())]
    }

    /// Run the service worker engine after the bundle was written.
    pub async fn close(&self) -> fob_pwa::Result<Option<SwBuildResult>> {
        self.build.close().await
    }
}

impl Plugin for FobPwaPlugin {
    fn name(&self) -> Cow<'static, str> {
        "fob-pwa".into()
    }

    fn register_hook_usage(&self) -> HookUsage {
        HookUsage::GenerateBundle
    }

    fn generate_bundle(
        &self,
        _ctx: &PluginContext,
        args: &mut HookGenerateBundleArgs<'_>,
    ) -> impl std::future::Future<Output = HookNoopReturn> + Send {
        let build = self.build.clone();

        async move {
            transform_html_assets(&build, args.bundle)?;
            let assets = pwa_assets(&build, args.bundle)?;
            args.bundle.extend(assets);
            Ok(())
        }
    }
}

/// Rewrite every `.html` asset in `bundle` with the PWA head markup.
pub fn transform_html_assets(build: &PwaBuild, bundle: &mut [Output]) -> Result<()> {
    for output in bundle.iter_mut() {
        let Output::Asset(asset) = output else {
            continue;
        };
        if !asset.filename.ends_with(".html") {
            continue;
        }

        let html = std::str::from_utf8(asset.source.as_bytes())
            .with_context(|| format!("HTML asset `{}` is not valid UTF-8", asset.filename))?;
        let transformed = build.transform_html(&asset.filename, html)?;
        if transformed == html {
            continue;
        }

        tracing::debug!(document = %asset.filename, "Injected PWA markup");
        *output = Output::Asset(Arc::new(OutputAsset {
            names: asset.names.clone(),
            original_file_names: asset.original_file_names.clone(),
            filename: asset.filename.clone(),
            source: transformed.into(),
        }));
    }
    Ok(())
}

/// Generated PWA files not already present in `bundle`.
pub fn pwa_assets(build: &PwaBuild, bundle: &[Output]) -> Result<Vec<Output>> {
    let mut outputs = Vec::new();

    for asset in build.generate_bundle()? {
        let taken = bundle
            .iter()
            .any(|output| output.filename() == asset.file_name);
        if taken {
            tracing::warn!(
                file = %asset.file_name,
                "Bundle already contains this file, keeping the bundled one"
            );
            continue;
        }

        outputs.push(Output::Asset(Arc::new(OutputAsset {
            names: vec![],
            original_file_names: vec![],
            filename: asset.file_name.into(),
            source: asset.source.into(),
        })));
    }

    Ok(outputs)
}

/// Resolve/load plugin for the `virtual:pwa-register` modules.
#[derive(Debug, Clone)]
pub struct FobPwaVirtualPlugin {
    modules: VirtualModuleProvider,
}

impl Plugin for FobPwaVirtualPlugin {
    fn name(&self) -> Cow<'static, str> {
        "fob-pwa:virtual".into()
    }

    fn register_hook_usage(&self) -> HookUsage {
        HookUsage::ResolveId | HookUsage::Load
    }

    fn resolve_id(
        &self,
        _ctx: &PluginContext,
        args: &HookResolveIdArgs<'_>,
    ) -> impl std::future::Future<Output = HookResolveIdReturn> + Send {
        let resolved = self.modules.resolve(args.specifier);

        async move {
            Ok(resolved.map(|id| HookResolveIdOutput {
                id: id.into(),
                ..Default::default()
            }))
        }
    }

    fn load(
        &self,
        _ctx: &PluginContext,
        args: &HookLoadArgs<'_>,
    ) -> impl std::future::Future<Output = HookLoadReturn> + Send {
        let source = self.modules.load(args.id);

        async move {
            Ok(source.map(|code| HookLoadOutput {
                code: code.into(),
                module_type: Some(ModuleType::Js),
                ..Default::default()
            }))
        }
    }
}
