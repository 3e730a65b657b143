//! Asynchronous access to the raw dataset resources.
//!
//! A [`ResourceSource`] turns a resource path relative to the dataset root
//! (e.g. `parts/part_locs.txt`) into its text. Sources are composed by the
//! catalog loader, which issues independent fetches concurrently.
//!
//! ## Sources
//!
//! - [`DirectorySource`]: a dataset unpacked on the local filesystem
//! - [`HttpSource`]: the hosted asset bucket (native only)
//! - [`MemorySource`]: resources held in memory
//! - [`CachingSource`]: read-through cache around any other source

mod cache;
mod directory;
mod error;
#[cfg(not(target_arch = "wasm32"))]
mod http;
mod memory;

use std::future::Future;

pub use cache::CachingSource;
pub use directory::DirectorySource;
pub use error::FetchError;
#[cfg(not(target_arch = "wasm32"))]
pub use http::HttpSource;
pub use memory::MemorySource;

/// Something dataset resources can be fetched from.
pub trait ResourceSource {
    /// Human-readable location, used in log messages.
    fn location(&self) -> String;

    /// Fetch the full text of the resource at `path`.
    fn fetch(&self, path: &str) -> impl Future<Output = Result<String, FetchError>>;
}

impl<S: ResourceSource + ?Sized> ResourceSource for &S {
    fn location(&self) -> String {
        (**self).location()
    }

    fn fetch(&self, path: &str) -> impl Future<Output = Result<String, FetchError>> {
        (**self).fetch(path)
    }
}

/// Decode resource bytes, replacing invalid UTF-8 instead of failing.
///
/// A bad byte then only spoils the line it sits on, which the parsers drop.
pub(crate) fn decode_lossy(path: &str, bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            log::warn!(
                "{}: invalid UTF-8 at byte {}, decoding lossily",
                path,
                e.utf8_error().valid_up_to()
            );
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    }
}
