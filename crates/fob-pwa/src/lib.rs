//! Progressive Web App build core for fob.
//!
//! Adds a web manifest, a service worker, and the registration bootstrap to a
//! static build. The crate resolves options, decides which assets a build
//! emits, patches HTML, serves the `virtual:pwa-register` modules, and hands
//! the worker generation itself to a [`ServiceWorkerEngine`].
//!
//! Host integration lives in `fob-plugin-pwa`; this crate has no bundler
//! dependency.
//!
//! ```no_run
//! use std::sync::Arc;
//! use fob_pwa::{HostConfig, ProjectRuntime, PwaBuild, PwaOptions, ServiceWorkerEngine};
//!
//! # async fn run(engine: Arc<dyn ServiceWorkerEngine>) -> fob_pwa::Result<()> {
//! let host = HostConfig::new(".").base("/app/");
//! let options = PwaOptions::load(".")?;
//! let build = PwaBuild::configure(&options, host, Arc::new(ProjectRuntime::new(".")), engine).await?;
//!
//! let page = build.transform_html("index.html", "<html><head></head><body></body></html>")?;
//! for asset in build.generate_bundle()? {
//!     println!("{} ({} bytes)", asset.file_name, asset.source.len());
//! }
//! build.close().await?;
//! # let _ = page;
//! # Ok(())
//! # }
//! ```

pub mod constants;
mod context;
pub mod delegate;
pub mod error;
pub mod html;
pub mod options;
mod orchestrator;
pub mod register;
pub mod runtime;
pub mod virtual_module;

#[cfg(feature = "logging")]
pub mod logging;

pub use delegate::{ServiceWorkerEngine, SwBuildResult};
pub use error::{DelegateError, PwaError, Result};
pub use options::{
    Command, HostConfig, InjectRegister, ManifestIcon, ManifestOptions, Mode, PwaOptions,
    RegisterType, ResolvedOptions, Strategy,
};
pub use orchestrator::{PwaAsset, PwaBuild};
pub use register::{RegisterMode, TemplateKind};
pub use runtime::{ProjectRuntime, Runtime, RuntimeError};
pub use virtual_module::{VirtualModule, VirtualModuleProvider};
