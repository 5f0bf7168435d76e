use figment::{
    Figment,
    providers::{Env, Format as _, Json, Serialized, Toml},
};
use std::path::Path;

use super::PwaOptions;
use crate::constants::{ENV_PREFIX, OPTIONS_FILENAME, PACKAGE_JSON};
use crate::error::{PwaError, Result};

impl PwaOptions {
    /// Discover options for the project at `root`.
    ///
    /// Priority: environment variables > `pwa` field of package.json >
    /// pwa.toml > defaults. Missing files are skipped. Environment keys
    /// use `__` for nesting, e.g. `FOB_PWA_WORKBOX__MODE=development`.
    pub fn load(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();

        let figment = Figment::new()
            .merge(Serialized::defaults(PwaOptions::default()))
            .merge(Toml::file(root.join(OPTIONS_FILENAME)))
            .merge(Figment::from(Json::file(root.join(PACKAGE_JSON))).focus("pwa"))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        figment.extract().map_err(|e| {
            PwaError::config(format!(
                "failed to load PWA options from {}: {}",
                root.display(),
                e
            ))
        })
    }
}
