//! Dataset resources held in memory.

use std::collections::HashMap;

use crate::source::{FetchError, ResourceSource};

/// Serves resources from an in-memory map.
///
/// Paths that were never added answer with status 404, and individual paths
/// can be made to fail with any status.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    resources: HashMap<String, String>,
    failures: HashMap<String, u16>,
}

impl MemorySource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a resource.
    pub fn with(mut self, path: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(path, text);
        self
    }

    /// Make a path fail with the given status.
    pub fn with_failure(mut self, path: impl Into<String>, status: u16) -> Self {
        self.failures.insert(path.into(), status);
        self
    }

    /// Add or replace a resource.
    pub fn insert(&mut self, path: impl Into<String>, text: impl Into<String>) {
        self.resources.insert(path.into(), text.into());
    }
}

impl ResourceSource for MemorySource {
    fn location(&self) -> String {
        "memory".to_string()
    }

    async fn fetch(&self, path: &str) -> Result<String, FetchError> {
        if let Some(&status) = self.failures.get(path) {
            return Err(FetchError::Status {
                path: path.to_string(),
                status,
            });
        }
        self.resources
            .get(path)
            .cloned()
            .ok_or_else(|| FetchError::Status {
                path: path.to_string(),
                status: 404,
            })
    }
}
