//! Parameter bags handed to the service worker engine.
//!
//! Shapes follow the engine's camelCase option names. Keys this crate does
//! not model are carried in `extra` and forwarded untouched, so projects can
//! use any engine option without a release of this crate.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

use super::{Mode, Strategy};
use crate::error::PwaError;

/// Caching handler names understood by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CacheHandler {
    CacheFirst,
    CacheOnly,
    NetworkFirst,
    NetworkOnly,
    StaleWhileRevalidate,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheExpiration {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_entries: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_age_seconds: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeCachingOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration: Option<CacheExpiration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_timeout_seconds: Option<u32>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One runtime caching route. `url_pattern` is a regular expression source
/// the engine compiles; it is never evaluated here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeCaching {
    pub url_pattern: String,
    pub handler: CacheHandler,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<RuntimeCachingOptions>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

const DAY: u64 = 24 * 60 * 60;

fn route(
    url_pattern: &str,
    handler: CacheHandler,
    cache_name: &str,
    max_entries: u32,
    max_age_seconds: u64,
) -> RuntimeCaching {
    RuntimeCaching {
        url_pattern: url_pattern.to_string(),
        handler,
        options: Some(RuntimeCachingOptions {
            cache_name: Some(cache_name.to_string()),
            expiration: Some(CacheExpiration {
                max_entries: Some(max_entries),
                max_age_seconds: Some(max_age_seconds),
                ..Default::default()
            }),
            ..Default::default()
        }),
        extra: Map::new(),
    }
}

/// Default runtime caching routes for `generateSW`.
pub fn cache_preset() -> Vec<RuntimeCaching> {
    use CacheHandler::*;

    let mut others = route(".*", NetworkFirst, "others", 32, DAY);
    if let Some(options) = others.options.as_mut() {
        options.network_timeout_seconds = Some(10);
    }

    vec![
        route(
            r"^https://fonts\.(?:googleapis|gstatic)\.com/.*",
            CacheFirst,
            "google-fonts",
            4,
            365 * DAY,
        ),
        route(
            r"\.(?:eot|otf|ttc|ttf|woff|woff2|font\.css)$",
            StaleWhileRevalidate,
            "static-font-assets",
            4,
            7 * DAY,
        ),
        route(
            r"\.(?:jpg|jpeg|gif|png|svg|ico|webp)$",
            StaleWhileRevalidate,
            "static-image-assets",
            64,
            DAY,
        ),
        route(r"\.(?:js)$", StaleWhileRevalidate, "static-js-assets", 32, DAY),
        route(
            r"\.(?:css|less)$",
            StaleWhileRevalidate,
            "static-style-assets",
            32,
            DAY,
        ),
        route(
            r"\.(?:json|xml|csv)$",
            NetworkFirst,
            "static-data-assets",
            32,
            DAY,
        ),
        others,
    ]
}

/// Config for the engine's generateSW entry point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateSwConfig {
    pub sw_dest: PathBuf,
    pub glob_directory: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub glob_patterns: Option<Vec<String>>,
    pub mode: Mode,
    #[serde(default)]
    pub offline_google_analytics: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub navigate_fallback: Option<String>,
    #[serde(default)]
    pub runtime_caching: Vec<RuntimeCaching>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_waiting: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clients_claim: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl GenerateSwConfig {
    pub(crate) fn defaults(sw_dest: PathBuf, glob_directory: PathBuf, mode: Mode) -> Self {
        Self {
            sw_dest,
            glob_directory,
            glob_patterns: None,
            mode,
            offline_google_analytics: false,
            navigate_fallback: Some("index.html".to_string()),
            runtime_caching: cache_preset(),
            skip_waiting: None,
            clients_claim: None,
            extra: Map::new(),
        }
    }
}

/// Config for the engine's injectManifest entry point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InjectManifestConfig {
    pub sw_src: PathBuf,
    pub sw_dest: PathBuf,
    pub glob_directory: PathBuf,
    pub injection_point: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub glob_patterns: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl InjectManifestConfig {
    pub(crate) fn defaults(sw_src: PathBuf, sw_dest: PathBuf, glob_directory: PathBuf) -> Self {
        Self {
            sw_src,
            sw_dest,
            glob_directory,
            injection_point: crate::constants::INJECTION_POINT.to_string(),
            glob_patterns: None,
            extra: Map::new(),
        }
    }
}

/// The one config block a build hands to the engine.
///
/// Only the block of the selected strategy is ever built, so the other one
/// cannot be consulted by accident.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "strategy", content = "config")]
pub enum DelegateConfig {
    #[serde(rename = "generateSW")]
    GenerateSw(GenerateSwConfig),
    #[serde(rename = "injectManifest")]
    InjectManifest(InjectManifestConfig),
}

impl DelegateConfig {
    pub fn strategy(&self) -> Strategy {
        match self {
            DelegateConfig::GenerateSw(_) => Strategy::GenerateSw,
            DelegateConfig::InjectManifest(_) => Strategy::InjectManifest,
        }
    }

    pub fn sw_dest(&self) -> &Path {
        match self {
            DelegateConfig::GenerateSw(config) => &config.sw_dest,
            DelegateConfig::InjectManifest(config) => &config.sw_dest,
        }
    }

    pub fn glob_directory(&self) -> &Path {
        match self {
            DelegateConfig::GenerateSw(config) => &config.glob_directory,
            DelegateConfig::InjectManifest(config) => &config.glob_directory,
        }
    }
}

/// Shallow overlay: top-level keys of `overrides` replace the defaults'
/// keys, nested objects are replaced whole.
pub(crate) fn overlay<T>(defaults: T, overrides: Option<&Map<String, Value>>, block: &str) -> crate::Result<T>
where
    T: Serialize + DeserializeOwned,
{
    let Some(overrides) = overrides else {
        return Ok(defaults);
    };

    let mut merged = serde_json::to_value(defaults)
        .map_err(|e| PwaError::config(format!("cannot serialize `{}` defaults: {}", block, e)))?;

    if let Value::Object(map) = &mut merged {
        for (key, value) in overrides {
            map.insert(key.clone(), value.clone());
        }
    }

    serde_json::from_value(merged)
        .map_err(|e| PwaError::config(format!("invalid `{}` option: {}", block, e)))
}
