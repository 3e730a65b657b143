//! Read-through cache around another source.
//!
//! The catalog pipeline re-fetches every resource on every call. Wrapping the
//! source in a [`CachingSource`] shares fetched text between calls until it is
//! explicitly invalidated. Only successful fetches are cached.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::source::{FetchError, ResourceSource};

/// Caches resource text by path.
#[derive(Debug)]
pub struct CachingSource<S> {
    inner: S,
    entries: RefCell<HashMap<String, String>>,
}

impl<S: ResourceSource> CachingSource<S> {
    /// Wrap a source.
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            entries: RefCell::new(HashMap::new()),
        }
    }

    /// Drop the cached text of one resource.
    pub fn invalidate(&self, path: &str) -> bool {
        self.entries.borrow_mut().remove(path).is_some()
    }

    /// Drop every cached resource.
    pub fn invalidate_all(&self) {
        self.entries.borrow_mut().clear();
    }

    /// Check if a resource is currently cached.
    pub fn is_cached(&self, path: &str) -> bool {
        self.entries.borrow().contains_key(path)
    }

    /// Get the number of cached resources.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Check if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// The wrapped source.
    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: ResourceSource> ResourceSource for CachingSource<S> {
    fn location(&self) -> String {
        format!("{} (cached)", self.inner.location())
    }

    async fn fetch(&self, path: &str) -> Result<String, FetchError> {
        let hit = self.entries.borrow().get(path).cloned();
        if let Some(text) = hit {
            log::debug!("Cache hit for {}", path);
            return Ok(text);
        }

        let text = self.inner.fetch(path).await?;
        self.entries
            .borrow_mut()
            .insert(path.to_string(), text.clone());
        Ok(text)
    }
}
