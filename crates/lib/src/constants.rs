//! Constants used throughout paperkit.
//!
//! Reserved node names and the defaults of the ready-made configuration
//! sections live here.

use std::time::Duration;

/// Child name holding a node's value once the node has children.
pub const VALUE_NODE: &str = "value";

/// Value node name used by boolean nodes.
pub const ENABLED_NODE: &str = "enabled";

/// Value node name used by difficulty-dependent nodes.
pub const DEFAULT_NODE: &str = "default";

/// Reserved leaf under the root holding the stored schema version.
pub const VERSION_NODE: &str = "_version";

pub const DEFAULT_MYSQL_HOST: &str = "localhost";
pub const DEFAULT_MYSQL_PORT: i32 = 3306;
pub const DEFAULT_MYSQL_DATABASE: &str = "spigot";
pub const DEFAULT_MYSQL_USER: &str = "root";
pub const DEFAULT_MYSQL_PASSWORD: &str = "password";

/// How long a single connection attempt may take before it is abandoned.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Language and country of the bundle every lookup falls back to.
pub const DEFAULT_LOCALE: &str = "en_US";

/// File extension of translation bundles.
pub const LANG_EXTENSION: &str = "lang";
