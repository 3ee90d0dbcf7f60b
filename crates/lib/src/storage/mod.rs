//! Storage backends selectable from configuration.
//!
//! Plugins keep their data either in flat files or in a MySQL-compatible
//! database. [`StorageType`] is the configuration switch between the two and
//! [`ConnectionManager`] opens connections for the database case.
//!
//! ## Available Backends
//!
//! - **MySQL** (feature: `mysql`, on by default): [`mysql::MySqlConnectionManager`]

pub mod errors;
#[cfg(feature = "mysql")]
pub mod mysql;

use std::{fmt, str::FromStr};

use async_trait::async_trait;

use crate::config::EnumCodec;
pub use errors::StorageError;
#[cfg(feature = "mysql")]
pub use mysql::{MySqlConnectionManager, MySqlSettings};

/// Where a plugin persists its data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum StorageType {
    #[default]
    FlatFile,
    MySql,
}

impl StorageType {
    pub fn name(self) -> &'static str {
        match self {
            StorageType::FlatFile => "FLAT_FILE",
            StorageType::MySql => "MYSQL",
        }
    }

    /// Whether this storage type talks to a database server.
    pub fn uses_connection(self) -> bool {
        matches!(self, StorageType::MySql)
    }
}

impl fmt::Display for StorageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StorageType {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "FLAT_FILE" => Ok(StorageType::FlatFile),
            "MYSQL" => Ok(StorageType::MySql),
            other => Err(StorageError::Unsupported {
                storage_type: other.to_string(),
            }),
        }
    }
}

/// Configuration codec for [`StorageType`], defaulting to `FLAT_FILE`.
pub type StorageTypeCodec = EnumCodec<StorageType>;

/// Opens connections to a storage backend.
///
/// One attempt per call. Failures are logged and reported as `None`; the
/// caller owns and closes the returned connection.
#[async_trait]
pub trait ConnectionManager: Send + Sync {
    type Connection: Send;

    async fn connect(&self) -> Option<Self::Connection>;
}
