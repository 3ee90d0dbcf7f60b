//! Schema versioning and reload notification.

use std::rc::Rc;

use tracing::{info, warn};

use super::{ConfigError, ConfigStore, ConfigTree};
use crate::Result;

/// A plugin's root configuration schema.
///
/// The tree stores the schema version it was last saved with under
/// `_version`. [`ConfigTree::upgrade`] compares it to
/// [`current_version`](RootSchema::current_version) and lets the schema
/// migrate stored data before the new version is recorded.
pub trait RootSchema<S: ConfigStore> {
    /// The version the declared nodes correspond to.
    fn current_version(&self) -> i32;

    /// Migrates data stored under schema version `from`.
    fn upgrade(&mut self, tree: &mut ConfigTree<S>, from: i32) -> Result<()>;
}

impl<S: ConfigStore> ConfigTree<S> {
    /// Runs `schema`'s upgrade hook if the stored version is older.
    ///
    /// Returns whether an upgrade ran. A stored version newer than the
    /// schema's is left untouched.
    pub fn upgrade<R: RootSchema<S>>(&mut self, schema: &mut R) -> Result<bool> {
        let stored = self.version();
        let current = schema.current_version();

        if stored > current {
            warn!(
                stored,
                current, "[Configuration] Stored schema is newer than this plugin; skipping upgrade"
            );
            return Ok(false);
        }
        if stored == current {
            return Ok(false);
        }

        schema
            .upgrade(self, stored)
            .map_err(|err| ConfigError::UpgradeFailed {
                from: stored,
                to: current,
                reason: err.to_string(),
            })?;
        self.set_version(current);
        info!(from = stored, to = current, "[Configuration] Upgraded configuration schema");
        Ok(true)
    }
}

/// Receives the configuration whenever it is reloaded.
pub trait ConfigConsumer<T> {
    fn reload_configuration(&self, configuration: &T);
}

/// A de-duplicated list of [`ConfigConsumer`]s.
pub struct ReloadRegistry<T> {
    consumers: Vec<Rc<dyn ConfigConsumer<T>>>,
}

impl<T> Default for ReloadRegistry<T> {
    fn default() -> Self {
        Self {
            consumers: Vec::new(),
        }
    }
}

impl<T> ReloadRegistry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `consumer` unless the same instance is already registered.
    pub fn register(&mut self, consumer: Rc<dyn ConfigConsumer<T>>) {
        if !self.consumers.iter().any(|c| Rc::ptr_eq(c, &consumer)) {
            self.consumers.push(consumer);
        }
    }

    pub fn len(&self) -> usize {
        self.consumers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.consumers.is_empty()
    }

    /// Hands `configuration` to every registered consumer in registration order.
    pub fn reload(&self, configuration: &T) {
        for consumer in &self.consumers {
            consumer.reload_configuration(configuration);
        }
    }
}
