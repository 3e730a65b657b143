//! Dataset resources read from a local directory.

use std::path::{Path, PathBuf};

use crate::source::{FetchError, ResourceSource};

/// Reads resources relative to a dataset root directory.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    /// Create a source rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The dataset root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ResourceSource for DirectorySource {
    fn location(&self) -> String {
        self.root.display().to_string()
    }

    async fn fetch(&self, path: &str) -> Result<String, FetchError> {
        let full_path = self.root.join(path.trim_start_matches('/'));
        log::debug!("Reading {:?}", full_path);
        let bytes = std::fs::read(&full_path).map_err(|source| FetchError::Io {
            path: path.to_string(),
            source,
        })?;
        Ok(super::decode_lossy(path, bytes))
    }
}
