//! User-facing PWA options and the host build description.
//!
//! `PwaOptions` is what a project writes (in `pwa.toml`, the `pwa` field of
//! `package.json`, or through the builder methods). `HostConfig` is what the
//! bundler knows about the build it is running. [`resolve_options`] turns
//! both into one immutable [`ResolvedOptions`].

mod delegate;
mod host;
mod load;
mod manifest;
mod resolve;

pub use delegate::{
    CacheExpiration, CacheHandler, DelegateConfig, GenerateSwConfig, InjectManifestConfig,
    RuntimeCaching, RuntimeCachingOptions, cache_preset,
};
pub use host::{Command, HostConfig};
pub use manifest::{ManifestIcon, ManifestInput, ManifestOptions};
pub use resolve::{ResolvedOptions, normalize_base_path, resolve_options};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::PwaError;

/// Build mode forwarded to the delegate (verbosity / minification defaults).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Production,
    Development,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Production => write!(f, "production"),
            Mode::Development => write!(f, "development"),
        }
    }
}

/// Service worker generation strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    /// The delegate writes the whole worker from a config bag.
    #[default]
    #[serde(rename = "generateSW")]
    GenerateSw,
    /// The delegate injects the precache manifest into the user's worker.
    #[serde(rename = "injectManifest")]
    InjectManifest,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::GenerateSw => "generateSW",
            Strategy::InjectManifest => "injectManifest",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = PwaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "generateSW" => Ok(Strategy::GenerateSw),
            "injectManifest" => Ok(Strategy::InjectManifest),
            other => Err(PwaError::config(format!(
                "unknown strategy '{}', expected \"generateSW\" or \"injectManifest\"",
                other
            ))),
        }
    }
}

/// How the registration snippet reaches the page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InjectRegister {
    /// `Script` unless the app imported the virtual register module.
    #[default]
    Auto,
    /// Inline classic snippet plus the standalone `registerSW.js` asset.
    Script,
    /// Nothing injected; the app registers through the virtual module.
    Null,
}

/// Update behavior baked into the generated registration code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RegisterType {
    /// Activate new workers immediately and reload.
    AutoUpdate,
    /// Wait for the app to accept the update.
    #[default]
    Prompt,
}

impl RegisterType {
    pub fn is_auto_update(&self) -> bool {
        matches!(self, RegisterType::AutoUpdate)
    }
}

/// PWA options as supplied by the project.
///
/// Every field is optional; unset fields take computed defaults during
/// resolution. `strategies` stays a string so an unsupported value can be
/// reported as a configuration error instead of a parse failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PwaOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<Mode>,

    /// Directory of the worker source (`injectManifest`), default `public`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src_dir: Option<PathBuf>,

    /// Output directory, default is the host's output directory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub out_dir: Option<PathBuf>,

    /// Worker file name, default `sw.js`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,

    /// `"generateSW"` (default) or `"injectManifest"`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategies: Option<String>,

    /// Base URL override, default is the host's base URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,

    /// Registration scope, default is the resolved base path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub inject_register: Option<InjectRegister>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub register_type: Option<RegisterType>,

    /// Minify the emitted web manifest, default `true`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minify: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub manifest: Option<ManifestInput>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub manifest_filename: Option<String>,

    /// Adds `crossorigin="use-credentials"` to the manifest link
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_credentials: Option<bool>,

    /// Overrides for the generateSW delegate config (shallow merge)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workbox: Option<Map<String, Value>>,

    /// Overrides for the injectManifest delegate config (shallow merge)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inject_manifest: Option<Map<String, Value>>,
}

impl PwaOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from serde_json::Value (for programmatic config)
    ///
    /// # Example
    ///
    /// ```
    /// use fob_pwa::PwaOptions;
    /// use serde_json::json;
    ///
    /// let options = PwaOptions::from_value(json!({
    ///     "filename": "worker.js",
    ///     "strategies": "injectManifest"
    /// }))
    /// .unwrap();
    /// assert_eq!(options.filename.as_deref(), Some("worker.js"));
    /// ```
    pub fn from_value(value: Value) -> crate::Result<Self> {
        serde_json::from_value(value).map_err(|e| PwaError::config(e.to_string()))
    }

    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn src_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.src_dir = Some(dir.into());
        self
    }

    pub fn out_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.out_dir = Some(dir.into());
        self
    }

    pub fn filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    pub fn strategies(mut self, strategy: impl ToString) -> Self {
        self.strategies = Some(strategy.to_string());
        self
    }

    pub fn base(mut self, base: impl Into<String>) -> Self {
        self.base = Some(base.into());
        self
    }

    pub fn scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    pub fn inject_register(mut self, inject: InjectRegister) -> Self {
        self.inject_register = Some(inject);
        self
    }

    pub fn register_type(mut self, register_type: RegisterType) -> Self {
        self.register_type = Some(register_type);
        self
    }

    pub fn minify(mut self, minify: bool) -> Self {
        self.minify = Some(minify);
        self
    }

    pub fn manifest(mut self, manifest: ManifestOptions) -> Self {
        self.manifest = Some(ManifestInput::Overrides(Box::new(manifest)));
        self
    }

    pub fn disable_manifest(mut self) -> Self {
        self.manifest = Some(ManifestInput::Enabled(false));
        self
    }

    pub fn manifest_filename(mut self, filename: impl Into<String>) -> Self {
        self.manifest_filename = Some(filename.into());
        self
    }

    pub fn use_credentials(mut self, enabled: bool) -> Self {
        self.use_credentials = Some(enabled);
        self
    }

    /// Set one generateSW override key
    pub fn workbox_option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.workbox
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }

    /// Set one injectManifest override key
    pub fn inject_manifest_option(
        mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        self.inject_manifest
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }
}
