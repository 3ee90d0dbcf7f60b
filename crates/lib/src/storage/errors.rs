//! Error types for storage connections.

use thiserror::Error;

/// Errors raised while preparing or opening a storage connection.
///
/// [`ConnectionManager::connect`](super::ConnectionManager::connect) logs
/// these and returns `None`; the fallible variants of the connect methods
/// hand them to the caller instead.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum StorageError {
    /// The connection URL could not be turned into connect options
    #[error("Invalid connection URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The database refused or could not be reached
    #[error("Failed to connect to the database at '{url}': {reason}")]
    ConnectionFailed { url: String, reason: String },

    /// The requested storage type has no connection manager
    #[error("Storage type {storage_type} does not use a connection")]
    Unsupported { storage_type: String },
}

impl StorageError {
    /// Check if this error came from the database driver
    pub fn is_connection_error(&self) -> bool {
        matches!(self, StorageError::ConnectionFailed { .. })
    }

    /// Check if this error is about the connection settings
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            StorageError::InvalidUrl { .. } | StorageError::Unsupported { .. }
        )
    }

    /// The URL involved, if any
    pub fn url(&self) -> Option<&str> {
        match self {
            StorageError::InvalidUrl { url, .. } | StorageError::ConnectionFailed { url, .. } => {
                Some(url)
            }
            StorageError::Unsupported { .. } => None,
        }
    }
}

impl From<StorageError> for crate::Error {
    fn from(err: StorageError) -> Self {
        crate::Error::Storage(err)
    }
}
