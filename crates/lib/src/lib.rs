//!
//! paperkit: helpers that take the boilerplate out of game-server plugins.
//!
//! ## Core Concepts
//!
//! * **Configuration trees (`config::ConfigTree`)**: A plugin declares its settings as a tree of named nodes. Each node derives its dotted path from its place in the tree and reads or writes one typed value through a codec, falling back to its default whenever the stored value is missing or unreadable.
//! * **Stores (`config::ConfigStore`)**: The dotted-path key/value store a tree reads from and saves to. `config::MemoryStore` is a nested map persisted as JSON.
//! * **Difficulty nodes (`config::DifficultyNode`)**: Values with optional per-difficulty overrides resolved by falling through to harder tiers.
//! * **Translations (`lang::I18n`)**: Locale-aware lookups in `.lang` properties bundles, with on-disk overrides and cached message formats.
//! * **Storage (`storage::ConnectionManager`)**: Opens a MySQL connection from the ready-made `mysql` configuration section.
//! * **Commands (`commands::CommandMap`)**: Declared commands bound to handlers, with usage hints on misuse.

pub mod commands;
pub mod config;
pub mod constants;
pub mod lang;
pub mod storage;
pub mod util;

pub use config::{ConfigTree, MemoryStore};
pub use lang::I18n;

/// Result type used throughout paperkit.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for paperkit.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Structured configuration errors from the config module
    #[error(transparent)]
    Config(config::ConfigError),

    /// Structured translation errors from the lang module
    #[error(transparent)]
    Lang(lang::LangError),

    /// Structured storage errors from the storage module
    #[error(transparent)]
    Storage(storage::StorageError),

    /// Structured command registry errors from the commands module
    #[error(transparent)]
    Command(commands::CommandError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Config(_) => "config",
            Error::Lang(_) => "lang",
            Error::Storage(_) => "storage",
            Error::Command(_) => "commands",
            Error::Io(_) => "io",
            Error::Serialize(_) => "serialize",
        }
    }

    /// Check if this error indicates a resource was not found.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::Config(config_err) => config_err.is_not_found(),
            Error::Command(command_err) => command_err.is_not_found(),
            Error::Io(io_err) => io_err.kind() == std::io::ErrorKind::NotFound,
            _ => false,
        }
    }

    /// Check if this error indicates a conflict (already exists).
    pub fn is_conflict(&self) -> bool {
        match self {
            Error::Command(command_err) => command_err.is_conflict(),
            _ => false,
        }
    }

    /// Check if this error is I/O related.
    pub fn is_io_error(&self) -> bool {
        matches!(self, Error::Io(_))
    }

    /// Check if this error is type-related.
    pub fn is_type_error(&self) -> bool {
        match self {
            Error::Config(config_err) => config_err.is_type_error(),
            _ => false,
        }
    }

    /// Check if this error came from parsing a file or template.
    pub fn is_parse_error(&self) -> bool {
        match self {
            Error::Serialize(_) => true,
            Error::Config(config_err) => config_err.is_parse_error(),
            Error::Lang(lang_err) => lang_err.is_template_error(),
            _ => false,
        }
    }

    /// Check if this error is a failed or misconfigured storage connection.
    pub fn is_storage_error(&self) -> bool {
        matches!(self, Error::Storage(_))
    }
}
