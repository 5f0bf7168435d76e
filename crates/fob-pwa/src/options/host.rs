//! What the host bundler declares about the current build.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::Mode;
use crate::constants::{DEFAULT_OUT_DIR, DEFAULT_SRC_DIR};

/// Host command the plugin runs under.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Command {
    #[default]
    Build,
    Serve,
}

/// Host build configuration captured at configuration-resolved time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostConfig {
    /// Project root; relative option paths resolve against it
    pub root: PathBuf,
    /// Public base URL the app is deployed under
    pub base: String,
    /// Declared build output directory
    pub out_dir: PathBuf,
    /// Directory copied verbatim into the output
    pub public_dir: PathBuf,
    /// Server-side rendering build (no client bundle)
    pub ssr: bool,
    pub command: Command,
    pub mode: Mode,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            base: "/".to_string(),
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            public_dir: PathBuf::from(DEFAULT_SRC_DIR),
            ssr: false,
            command: Command::Build,
            mode: Mode::Production,
        }
    }
}

impl HostConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    pub fn base(mut self, base: impl Into<String>) -> Self {
        self.base = base.into();
        self
    }

    pub fn out_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.out_dir = dir.into();
        self
    }

    pub fn public_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.public_dir = dir.into();
        self
    }

    pub fn ssr(mut self, ssr: bool) -> Self {
        self.ssr = ssr;
        self
    }

    pub fn command(mut self, command: Command) -> Self {
        self.command = command;
        self
    }

    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Public directory resolved against the project root
    pub fn public_path(&self, file: impl AsRef<Path>) -> PathBuf {
        self.root.join(&self.public_dir).join(file)
    }
}
