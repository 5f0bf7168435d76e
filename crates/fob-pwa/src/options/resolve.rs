use path_clean::PathClean;
use serde::Serialize;
use std::path::{Path, PathBuf};

use super::delegate::{DelegateConfig, GenerateSwConfig, InjectManifestConfig, overlay};
use super::host::HostConfig;
use super::manifest::{ManifestInput, ManifestOptions};
use super::{InjectRegister, Mode, PwaOptions, RegisterType, Strategy};
use crate::constants::{DEFAULT_SRC_DIR, DEFAULT_SW_FILENAME, MANIFEST_FILENAME, PACKAGE_JSON};
use crate::error::Result;
use crate::runtime::{Runtime, RuntimeError};

/// Fully defaulted options for one build.
///
/// Built once by [`resolve_options`] and read-only afterwards. The
/// `inject_register` field keeps the configured value; when it is
/// [`InjectRegister::Auto`] the per-build context settles it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedOptions {
    pub root: PathBuf,
    pub mode: Mode,
    pub src_dir: PathBuf,
    pub out_dir: PathBuf,
    pub filename: String,
    /// Always starts with `/`
    pub base_path: String,
    pub scope: String,
    pub inject_register: InjectRegister,
    pub register_type: RegisterType,
    pub minify: bool,
    /// `None` when the manifest is disabled
    pub manifest: Option<ManifestOptions>,
    pub manifest_filename: String,
    pub use_credentials: bool,
    pub sw_src: PathBuf,
    pub sw_dest: PathBuf,
    /// Config block of the selected strategy
    pub delegate: DelegateConfig,
}

impl ResolvedOptions {
    pub fn strategy(&self) -> Strategy {
        self.delegate.strategy()
    }

    /// URL the worker is registered at.
    pub fn sw_url(&self) -> String {
        join_url(&self.base_path, &self.filename)
    }

    /// URL the manifest link points at, if a manifest is emitted.
    pub fn manifest_url(&self) -> Option<String> {
        self.manifest
            .as_ref()
            .map(|_| join_url(&self.base_path, &self.manifest_filename))
    }
}

/// Prefix `/` when missing; an empty base becomes `/`.
///
/// ```
/// use fob_pwa::options::normalize_base_path;
///
/// assert_eq!(normalize_base_path("sub/"), "/sub/");
/// assert_eq!(normalize_base_path("/app/"), "/app/");
/// assert_eq!(normalize_base_path(""), "/");
/// ```
pub fn normalize_base_path(base: &str) -> String {
    if base.starts_with('/') {
        base.to_string()
    } else {
        format!("/{}", base)
    }
}

fn join_url(base: &str, file: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        file.trim_start_matches('/')
    )
}

/// Merge user options with host-derived defaults.
///
/// The strategy is validated before anything is read, so a bad value fails
/// without side effects. A missing `package.json` yields empty defaults.
pub async fn resolve_options(
    user: &PwaOptions,
    host: &HostConfig,
    runtime: &dyn Runtime,
) -> Result<ResolvedOptions> {
    let strategy = match user.strategies.as_deref() {
        Some(value) => value.parse::<Strategy>()?,
        None => Strategy::default(),
    };

    let root = host.root.clone();
    let mode = user.mode.unwrap_or(host.mode);
    let src_dir = user
        .src_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SRC_DIR));
    let out_dir = user.out_dir.clone().unwrap_or_else(|| host.out_dir.clone());
    let filename = user
        .filename
        .clone()
        .unwrap_or_else(|| DEFAULT_SW_FILENAME.to_string());

    let base_path = normalize_base_path(user.base.as_deref().unwrap_or(&host.base));
    let scope = user.scope.clone().unwrap_or_else(|| base_path.clone());

    let sw_src = root.join(&src_dir).join(&filename).clean();
    let sw_dest = root.join(&out_dir).join(&filename).clean();
    let glob_directory = root.join(&out_dir).clean();

    let delegate = match strategy {
        Strategy::GenerateSw => DelegateConfig::GenerateSw(overlay(
            GenerateSwConfig::defaults(sw_dest.clone(), glob_directory, mode),
            user.workbox.as_ref(),
            "workbox",
        )?),
        Strategy::InjectManifest => DelegateConfig::InjectManifest(overlay(
            InjectManifestConfig::defaults(sw_src.clone(), sw_dest.clone(), glob_directory),
            user.inject_manifest.as_ref(),
            "injectManifest",
        )?),
    };

    let manifest = match &user.manifest {
        Some(ManifestInput::Enabled(false)) => None,
        Some(ManifestInput::Enabled(true)) | None => {
            Some(ManifestOptions::defaults(package_name(runtime, &root).await?))
        }
        Some(ManifestInput::Overrides(overrides)) => Some(
            ManifestOptions::defaults(package_name(runtime, &root).await?)
                .merge(overrides.as_ref().clone()),
        ),
    };

    let resolved = ResolvedOptions {
        root,
        mode,
        src_dir,
        out_dir,
        filename,
        base_path,
        scope,
        inject_register: user.inject_register.unwrap_or_default(),
        register_type: user.register_type.unwrap_or_default(),
        minify: user.minify.unwrap_or(true),
        manifest,
        manifest_filename: user
            .manifest_filename
            .clone()
            .unwrap_or_else(|| MANIFEST_FILENAME.to_string()),
        use_credentials: user.use_credentials.unwrap_or(false),
        sw_src,
        sw_dest,
        delegate,
    };

    tracing::debug!(
        strategy = %resolved.strategy(),
        base_path = %resolved.base_path,
        sw_dest = %resolved.sw_dest.display(),
        "Resolved PWA options"
    );

    Ok(resolved)
}

/// `name` from the project's package.json, if there is one.
async fn package_name(runtime: &dyn Runtime, root: &Path) -> Result<Option<String>> {
    let path = root.join(PACKAGE_JSON);
    let bytes = match runtime.read_file(&path).await {
        Ok(bytes) => bytes,
        Err(RuntimeError::FileNotFound(_)) => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    match serde_json::from_slice::<serde_json::Value>(&bytes) {
        Ok(pkg) => Ok(pkg
            .get("name")
            .and_then(|name| name.as_str())
            .map(str::to_string)),
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "Ignoring malformed package.json, manifest name left unset"
            );
            Ok(None)
        }
    }
}
