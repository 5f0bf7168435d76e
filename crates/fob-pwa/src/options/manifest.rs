//! Web app manifest fields.
//!
//! Only the common members are typed; anything else a project writes is kept
//! in `extra` and serialized unchanged.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Icon entry of the web manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestIcon {
    pub src: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sizes: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ManifestIcon {
    pub fn new(src: impl Into<String>, sizes: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            sizes: Some(sizes.into()),
            mime_type: None,
            purpose: None,
            extra: Map::new(),
        }
    }

    pub fn mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    pub fn purpose(mut self, purpose: impl Into<String>) -> Self {
        self.purpose = Some(purpose.into());
        self
    }
}

/// Web manifest members. Unset members are omitted from the emitted JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManifestOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icons: Option<Vec<ManifestIcon>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ManifestOptions {
    /// Defaults derived from package metadata.
    pub(crate) fn defaults(package_name: Option<String>) -> Self {
        Self {
            name: package_name.clone(),
            short_name: package_name,
            // Relative to the manifest URL, which already includes the base.
            start_url: Some("./".to_string()),
            display: Some("standalone".to_string()),
            background_color: Some("#ffffff".to_string()),
            lang: Some("en".to_string()),
            ..Self::default()
        }
    }

    /// Overlay `overrides` member by member; set members win, nested
    /// values such as `icons` are replaced whole.
    pub fn merge(self, overrides: ManifestOptions) -> Self {
        let mut extra = self.extra;
        extra.extend(overrides.extra);
        Self {
            name: overrides.name.or(self.name),
            short_name: overrides.short_name.or(self.short_name),
            description: overrides.description.or(self.description),
            start_url: overrides.start_url.or(self.start_url),
            scope: overrides.scope.or(self.scope),
            display: overrides.display.or(self.display),
            background_color: overrides.background_color.or(self.background_color),
            theme_color: overrides.theme_color.or(self.theme_color),
            lang: overrides.lang.or(self.lang),
            icons: overrides.icons.or(self.icons),
            extra,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn short_name(mut self, short_name: impl Into<String>) -> Self {
        self.short_name = Some(short_name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn theme_color(mut self, color: impl Into<String>) -> Self {
        self.theme_color = Some(color.into());
        self
    }

    pub fn background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }

    pub fn display(mut self, display: impl Into<String>) -> Self {
        self.display = Some(display.into());
        self
    }

    pub fn icon(mut self, icon: ManifestIcon) -> Self {
        self.icons.get_or_insert_with(Vec::new).push(icon);
        self
    }

    /// Render as emitted into `manifest.webmanifest`.
    pub fn to_json(&self, minify: bool) -> serde_json::Result<String> {
        if minify {
            serde_json::to_string(self)
        } else {
            serde_json::to_string_pretty(self).map(|json| format!("{}\n", json))
        }
    }
}

/// `manifest` option: `false` disables the manifest, `true` keeps the
/// defaults, an object overrides individual members.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ManifestInput {
    Enabled(bool),
    Overrides(Box<ManifestOptions>),
}
