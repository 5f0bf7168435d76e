//! Error types for PWA build orchestration.

use miette::Diagnostic;
use thiserror::Error;

use crate::runtime::RuntimeError;

/// Result type alias for fob-pwa operations.
pub type Result<T> = std::result::Result<T, PwaError>;

/// Errors that abort a PWA build.
#[derive(Debug, Error, Diagnostic)]
pub enum PwaError {
    /// Unrecognized strategy or malformed user option shape.
    #[error("invalid PWA configuration: {message}")]
    #[diagnostic(
        code(fob::pwa::config),
        help("`strategies` must be \"generateSW\" or \"injectManifest\"; `workbox`, `injectManifest` and `manifest` must be objects")
    )]
    Config { message: String },

    /// No `</head>` to insert the manifest link and registration before.
    #[error("cannot inject PWA markup into {document}: no closing </head> tag found")]
    #[diagnostic(
        code(fob::pwa::html_structure),
        help("Add a <head> section to the document so the service worker can be registered")
    )]
    HtmlStructure { document: String },

    /// Failure reported by the service worker engine, surfaced as-is.
    #[error(transparent)]
    #[diagnostic(code(fob::pwa::delegate))]
    Delegate(#[from] DelegateError),

    /// Filesystem failure other than a missing optional input.
    #[error(transparent)]
    #[diagnostic(code(fob::pwa::runtime))]
    Runtime(#[from] RuntimeError),
}

impl PwaError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn html_structure(document: impl Into<String>) -> Self {
        Self::HtmlStructure {
            document: document.into(),
        }
    }
}

/// Opaque error raised by a [`crate::ServiceWorkerEngine`].
///
/// Display and `source()` forward to the wrapped error.
#[derive(Debug)]
pub struct DelegateError(Box<dyn std::error::Error + Send + Sync + 'static>);

impl std::fmt::Display for DelegateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for DelegateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl DelegateError {
    pub fn new(error: impl Into<Box<dyn std::error::Error + Send + Sync + 'static>>) -> Self {
        Self(error.into())
    }

    /// Borrow the engine's own error.
    pub fn inner(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        self.0.as_ref()
    }

    /// Take back the engine's own error.
    pub fn into_inner(self) -> Box<dyn std::error::Error + Send + Sync + 'static> {
        self.0
    }
}
