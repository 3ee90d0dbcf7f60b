//! Error types for configuration trees and stores.

use thiserror::Error;

/// Structured error types for configuration operations.
///
/// Reading a value never produces one of these: unreadable values fall back
/// to the node's default. Errors are reserved for structural misuse of the
/// tree and for failures of the backing store.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A node name is blank or contains the path separator
    #[error("Invalid node name '{name}': {reason}")]
    InvalidNodeName { name: String, reason: String },

    /// A node id does not belong to this tree
    #[error("Unknown node id {id}")]
    UnknownNode { id: usize },

    /// The node exists but is not of the requested kind
    #[error("Node '{path}' is not a {expected} node")]
    WrongNodeKind { path: String, expected: String },

    /// A stored value could not be converted to the requested type
    #[error("Config type mismatch: expected {expected}, found {actual}")]
    TypeMismatch { expected: String, actual: String },

    /// The path cannot be written because a scalar occupies one of its parents
    #[error("Invalid config path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    /// Schema upgrade hook failed
    #[error("Upgrade from version {from} to {to} failed: {reason}")]
    UpgradeFailed { from: i32, to: i32, reason: String },

    /// The backing file could not be parsed
    #[error("Failed to parse config file '{file}': {reason}")]
    ParseFailed { file: String, reason: String },
}

impl ConfigError {
    /// Check if this error is related to node declaration
    pub fn is_declaration_error(&self) -> bool {
        matches!(
            self,
            ConfigError::InvalidNodeName { .. } | ConfigError::WrongNodeKind { .. }
        )
    }

    /// Check if this error indicates a node was not found
    pub fn is_not_found(&self) -> bool {
        matches!(self, ConfigError::UnknownNode { .. })
    }

    /// Check if this error is related to type mismatches
    pub fn is_type_error(&self) -> bool {
        matches!(self, ConfigError::TypeMismatch { .. })
    }

    /// Check if this error is related to the backing file
    pub fn is_parse_error(&self) -> bool {
        matches!(self, ConfigError::ParseFailed { .. })
    }

    /// Get the path if this is a path-related error
    pub fn path(&self) -> Option<&str> {
        match self {
            ConfigError::WrongNodeKind { path, .. } | ConfigError::InvalidPath { path, .. } => {
                Some(path)
            }
            _ => None,
        }
    }
}

// Conversion from ConfigError to the main Error type
impl From<ConfigError> for crate::Error {
    fn from(err: ConfigError) -> Self {
        crate::Error::Config(err)
    }
}
