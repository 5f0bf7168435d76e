//! Filesystem seam for the PWA core
//!
//! The build core only ever reads: the optional `package.json`, a possible
//! user-supplied register script in the public directory, and nothing else.
//! `ProjectRuntime` serves in-memory files first and falls back to the disk,
//! which lets hosts hand over files they have not written yet.

use async_trait::async_trait;
use parking_lot::RwLock;
use path_clean::PathClean;
use rustc_hash::FxHashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Result type for runtime operations
pub type RuntimeResult<T> = Result<T, RuntimeError>;

/// Errors that can occur during runtime operations
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(String),

    /// Other runtime error
    #[error("Runtime error: {0}")]
    Other(String),
}

/// Read-only file access used by the PWA build phases.
#[async_trait]
pub trait Runtime: Send + Sync + std::fmt::Debug {
    /// Read a file, relative paths resolve against the project root
    async fn read_file(&self, path: &Path) -> RuntimeResult<Vec<u8>>;

    /// Check if a path exists
    fn exists(&self, path: &Path) -> bool;
}

/// Runtime that combines virtual files with filesystem access
#[derive(Debug, Clone)]
pub struct ProjectRuntime {
    /// Virtual files stored in memory
    virtual_files: Arc<RwLock<FxHashMap<PathBuf, Vec<u8>>>>,
    /// Project root for resolving relative paths
    root: PathBuf,
}

impl ProjectRuntime {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            virtual_files: Arc::new(RwLock::new(FxHashMap::default())),
            root: root.into(),
        }
    }

    /// Add a virtual file to the runtime
    ///
    /// The path is normalized before storage to ensure consistent lookup.
    pub fn add_virtual_file(&self, path: impl Into<PathBuf>, content: impl Into<Vec<u8>>) {
        let normalized = self.normalize(&path.into());
        self.virtual_files.write().insert(normalized, content.into());
    }

    pub fn has_virtual_file(&self, path: &Path) -> bool {
        self.virtual_files.read().contains_key(&self.normalize(path))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn normalize(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.clean()
        } else {
            self.root.join(path).clean()
        }
    }
}

#[async_trait]
impl Runtime for ProjectRuntime {
    async fn read_file(&self, path: &Path) -> RuntimeResult<Vec<u8>> {
        let full_path = self.normalize(path);
        if let Some(content) = self.virtual_files.read().get(&full_path) {
            return Ok(content.clone());
        }

        tokio::task::spawn_blocking(move || {
            std::fs::read(&full_path).map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    RuntimeError::FileNotFound(full_path.clone())
                } else {
                    RuntimeError::Io(format!("Failed to read {}: {}", full_path.display(), e))
                }
            })
        })
        .await
        .map_err(|e| RuntimeError::Other(format!("Task join error: {}", e)))?
    }

    fn exists(&self, path: &Path) -> bool {
        let full_path = self.normalize(path);
        if self.virtual_files.read().contains_key(&full_path) {
            return true;
        }
        full_path.exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_virtual_file() {
        let runtime = ProjectRuntime::new("/project");
        runtime.add_virtual_file("package.json", br#"{"name":"demo"}"#.to_vec());

        let content = runtime
            .read_file(Path::new("/project/package.json"))
            .await
            .unwrap();
        assert_eq!(content, br#"{"name":"demo"}"#);
        assert!(runtime.has_virtual_file(Path::new("./package.json")));
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let runtime = ProjectRuntime::new(dir.path());

        let err = runtime
            .read_file(Path::new("package.json"))
            .await
            .unwrap_err();
        assert!(matches!(err, RuntimeError::FileNotFound(_)));
        assert!(!runtime.exists(Path::new("package.json")));
    }

    #[tokio::test]
    async fn test_filesystem_fallback() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("public")).unwrap();
        std::fs::write(dir.path().join("public/registerSW.js"), b"// custom").unwrap();

        let runtime = ProjectRuntime::new(dir.path());
        assert!(runtime.exists(Path::new("public/registerSW.js")));
        let content = runtime
            .read_file(Path::new("public/registerSW.js"))
            .await
            .unwrap();
        assert_eq!(content, b"// custom");
    }

    #[tokio::test]
    async fn test_virtual_takes_precedence() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("package.json"), br#"{"name":"disk"}"#).unwrap();

        let runtime = ProjectRuntime::new(dir.path());
        runtime.add_virtual_file("package.json", br#"{"name":"memory"}"#.to_vec());

        let content = runtime.read_file(Path::new("package.json")).await.unwrap();
        assert_eq!(content, br#"{"name":"memory"}"#);
    }
}
