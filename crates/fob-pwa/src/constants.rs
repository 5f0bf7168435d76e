//! Fixed identifiers for generated assets and virtual modules.

/// Default service worker file name (relative to `srcDir` / `outDir`).
pub const DEFAULT_SW_FILENAME: &str = "sw.js";

/// Default web manifest asset name.
pub const MANIFEST_FILENAME: &str = "manifest.webmanifest";

/// Standalone classic registration script emitted next to the HTML.
pub const REGISTER_SW_FILENAME: &str = "registerSW.js";

/// Directory holding the user's worker source for `injectManifest`.
pub const DEFAULT_SRC_DIR: &str = "public";

/// Fallback output directory when the host does not declare one.
pub const DEFAULT_OUT_DIR: &str = "dist";

/// Marker the delegate replaces with the precache manifest.
pub const INJECTION_POINT: &str = "self.__WB_MANIFEST";

/// Project metadata file read for manifest name defaults.
pub const PACKAGE_JSON: &str = "package.json";

/// Options file picked up by [`crate::PwaOptions::load`].
pub const OPTIONS_FILENAME: &str = "pwa.toml";

/// Environment prefix for option overrides (`FOB_PWA_FILENAME=...`).
pub const ENV_PREFIX: &str = "FOB_PWA_";

/// Prefix marking ids owned by this plugin. The NUL byte keeps other
/// resolvers and the filesystem loader away from them.
pub const VIRTUAL_ID_PREFIX: &str = "\0";

/// Public specifier of the registration helper module.
pub const VIRTUAL_REGISTER: &str = "virtual:pwa-register";

/// Public specifier of the register-type helper module.
pub const VIRTUAL_REGISTER_TYPE: &str = "virtual:pwa-register/type";

/// Placeholders substituted into registration templates.
pub const PLACEHOLDER_SW_URL: &str = "__SW__";
pub const PLACEHOLDER_SCOPE: &str = "__SCOPE__";
pub const PLACEHOLDER_AUTO_UPDATE: &str = "__SW_AUTO_UPDATE__";

/// `id` attribute of the injected registration snippet.
pub const REGISTER_SCRIPT_ID: &str = "fob-pwa:register-sw";
