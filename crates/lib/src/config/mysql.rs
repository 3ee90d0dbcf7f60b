//! Ready-made MySQL connection settings.

use super::{
    BoolCodec, ConfigStore, ConfigTree, IntCodec, MapListCodec, Node, NodeId, StringCodec,
};
use crate::{Result, constants};

/// The `mysql` section a plugin adds under one of its containers.
///
/// ```
/// use paperkit::config::{ConfigTree, MemoryStore, MySqlConfig};
///
/// let mut tree = ConfigTree::new(MemoryStore::new());
/// let root = tree.root();
/// let storage = tree.container(root, "storage")?;
/// let mysql = MySqlConfig::declare(&mut tree, storage)?;
///
/// assert_eq!(tree.base_path(mysql.hostname.id()), "storage.mysql.hostname");
/// assert_eq!(tree.value(&mysql.port), 3306);
/// # Ok::<(), paperkit::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct MySqlConfig {
    pub container: NodeId,
    pub enabled: Node<BoolCodec>,
    pub hostname: Node<StringCodec>,
    pub port: Node<IntCodec>,
    pub database: Node<StringCodec>,
    pub user_id: Node<StringCodec>,
    pub password: Node<StringCodec>,
    pub flags: Node<MapListCodec>,
    pub table_prefix: Node<StringCodec>,
    pub append_underscore_to_prefix: Node<BoolCodec>,
}

impl MySqlConfig {
    /// Declares the `mysql` container and its settings under `parent`.
    pub fn declare<S: ConfigStore>(
        tree: &mut ConfigTree<S>,
        parent: impl Into<NodeId>,
    ) -> Result<Self> {
        let container = tree.container(parent, "mysql")?;
        Ok(Self {
            container,
            enabled: tree.declare(container, "enabled", BoolCodec::new(false))?,
            hostname: tree.declare(
                container,
                "hostname",
                StringCodec::new(constants::DEFAULT_MYSQL_HOST),
            )?,
            port: tree.declare(
                container,
                "port",
                IntCodec::new(constants::DEFAULT_MYSQL_PORT).with_bounds(0, u16::MAX as i32),
            )?,
            database: tree.declare(
                container,
                "database",
                StringCodec::new(constants::DEFAULT_MYSQL_DATABASE),
            )?,
            user_id: tree.declare(
                container,
                "userID",
                StringCodec::new(constants::DEFAULT_MYSQL_USER),
            )?,
            password: tree.declare(
                container,
                "password",
                StringCodec::new(constants::DEFAULT_MYSQL_PASSWORD),
            )?,
            flags: tree.declare(container, "flags", MapListCodec)?,
            table_prefix: tree.declare(container, "tablePrefix", StringCodec::default())?,
            append_underscore_to_prefix: tree.declare(
                container,
                "appendUnderscoreToPrefix",
                BoolCodec::new(true),
            )?,
        })
    }

    /// The configured table prefix, with a trailing underscore appended when
    /// enabled and the prefix is non-empty and does not already end in one.
    pub fn table_prefix<S: ConfigStore>(&self, tree: &ConfigTree<S>) -> String {
        let mut prefix = tree.value(&self.table_prefix);
        if tree.value(&self.append_underscore_to_prefix) && !prefix.is_empty() && !prefix.ends_with('_')
        {
            prefix.push('_');
        }
        prefix
    }
}

impl From<&MySqlConfig> for NodeId {
    fn from(config: &MySqlConfig) -> Self {
        config.container
    }
}
