//! Error type for resource fetches.

use thiserror::Error;

/// A whole resource could not be fetched.
///
/// The catalog loader treats every variant the same way: the affected catalog
/// resolves to an empty mapping.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The server answered with a non-success status
    #[error("{path}: server responded with status {status}")]
    Status {
        /// Resource path that was requested
        path: String,
        /// HTTP status code
        status: u16,
    },

    /// The request failed before a response arrived
    #[error("{path}: {message}")]
    Transport {
        /// Resource path that was requested
        path: String,
        /// Description of the failure
        message: String,
    },

    /// Reading a local resource failed
    #[error("{path}: {source}")]
    Io {
        /// Resource path that was requested
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl FetchError {
    /// Create a transport error.
    pub fn transport(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Transport {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Resource path the error refers to.
    pub fn path(&self) -> &str {
        match self {
            FetchError::Status { path, .. }
            | FetchError::Transport { path, .. }
            | FetchError::Io { path, .. } => path,
        }
    }
}
