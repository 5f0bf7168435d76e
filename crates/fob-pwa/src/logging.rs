//! Subscriber setup for binaries embedding the PWA core.
//!
//! Requires the `logging` feature. Libraries should not call these; they
//! only see the `tracing` events the build phases emit.

use std::sync::Once;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

static INIT: Once = Once::new();

/// Targets whose events the convenience filter enables.
const TARGETS: [&str; 2] = ["fob_pwa", "fob_plugin_pwa"];

/// Verbosity of PWA build output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    Silent,
    Error,
    Warn,
    /// Phase summaries such as the precache count (default)
    #[default]
    Info,
    /// Per-phase decisions: resolved paths, settled injection mode
    Debug,
    Trace,
}

impl LogLevel {
    fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Silent => "off",
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }

    /// Filter limited to this crate family, other targets stay at `warn`.
    fn filter(&self) -> EnvFilter {
        let mut directives = vec!["warn".to_string()];
        directives.extend(TARGETS.iter().map(|target| format!("{}={}", target, self.as_str())));
        EnvFilter::new(directives.join(","))
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "silent" | "off" => Ok(LogLevel::Silent),
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            other => Err(format!("Invalid log level: {}", other)),
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn install(filter: EnvFilter) {
    INIT.call_once(|| {
        // A host may already own the global subscriber; keep theirs.
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().compact().with_target(false).without_time())
            .try_init();
    });
}

/// Install a compact stderr subscriber at `level`.
///
/// Only the first call in a process takes effect.
///
/// ```rust,no_run
/// use fob_pwa::logging::{init_logging, LogLevel};
///
/// init_logging(LogLevel::Debug);
/// ```
pub fn init_logging(level: LogLevel) {
    install(level.filter());
}

/// Install a subscriber configured by `RUST_LOG`, falling back to
/// [`LogLevel::Info`] when it is unset or unparsable.
pub fn init_logging_from_env() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| LogLevel::Info.filter());
    install(filter);
}
