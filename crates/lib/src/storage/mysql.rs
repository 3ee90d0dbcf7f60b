//! MySQL connections built from the `mysql` configuration section.
//!
//! The settings are read once from a [`ConfigTree`] into [`MySqlSettings`],
//! so the manager can be moved to an async task independently of the tree.

use std::{collections::BTreeMap, time::Duration};

use async_trait::async_trait;
use sqlx::{
    Connection,
    mysql::{MySqlConnectOptions, MySqlConnection},
};
use tracing::{debug, error};

use super::{ConnectionManager, StorageError};
use crate::{
    Result,
    config::{ConfigStore, ConfigTree, ConfigValue, MySqlConfig},
    constants,
};

/// Connection settings for a MySQL-compatible server.
#[derive(Debug, Clone, PartialEq)]
pub struct MySqlSettings {
    pub hostname: String,
    pub port: u16,
    pub database: String,
    pub user_id: String,
    pub password: String,
    /// Extra connection flags. Entries are appended to the URL in order.
    pub flags: Vec<BTreeMap<String, ConfigValue>>,
}

impl MySqlSettings {
    /// Reads the current values of a declared `mysql` section.
    pub fn from_config<S: ConfigStore>(tree: &ConfigTree<S>, config: &MySqlConfig) -> Self {
        let port = tree.value(&config.port);
        Self {
            hostname: tree.value(&config.hostname),
            port: u16::try_from(port).unwrap_or_default(),
            database: tree.value(&config.database),
            user_id: tree.value(&config.user_id),
            password: tree.value(&config.password),
            flags: tree.value(&config.flags),
        }
    }

    /// The `?k=v&k=v` suffix built from the flag sections, or an empty string.
    fn query(&self) -> String {
        let mut query = String::new();
        for (key, value) in self.flags.iter().flat_map(|section| section.iter()) {
            query.push(if query.is_empty() { '?' } else { '&' });
            query.push_str(key);
            query.push('=');
            query.push_str(&value.to_string());
        }
        query
    }

    /// The JDBC-style URL describing these settings.
    ///
    /// ```
    /// # use std::{collections::BTreeMap, time::Duration};
    /// # use paperkit::storage::MySqlSettings;
    /// let mut flags = BTreeMap::new();
    /// flags.insert("useSSL".to_string(), false.into());
    /// let settings = MySqlSettings {
    ///     hostname: "db".into(),
    ///     port: 3306,
    ///     database: "spigot".into(),
    ///     user_id: "root".into(),
    ///     password: "password".into(),
    ///     flags: vec![flags],
    /// };
    /// assert_eq!(settings.jdbc_url(), "jdbc:mysql://db:3306/spigot?useSSL=false");
    /// ```
    pub fn jdbc_url(&self) -> String {
        format!("jdbc:{}", self.url())
    }

    /// The URL sqlx understands. Credentials are passed separately.
    pub fn url(&self) -> String {
        format!(
            "mysql://{}:{}/{}{}",
            self.hostname,
            self.port,
            self.database,
            self.query()
        )
    }

    /// Connect options for sqlx, including credentials.
    ///
    /// Flags sqlx does not recognise are ignored by the driver.
    pub fn connect_options(&self) -> Result<MySqlConnectOptions> {
        let url = self.url();
        let options: MySqlConnectOptions = url.parse().map_err(|e: sqlx::Error| {
            StorageError::InvalidUrl {
                url: url.clone(),
                reason: e.to_string(),
            }
        })?;
        let options = options.username(&self.user_id);
        Ok(if self.password.is_empty() {
            options
        } else {
            options.password(&self.password)
        })
    }
}

/// Opens single MySQL connections from fixed settings.
#[derive(Debug, Clone)]
pub struct MySqlConnectionManager {
    settings: MySqlSettings,
    connect_timeout: Duration,
}

impl MySqlConnectionManager {
    pub fn new(settings: MySqlSettings) -> Self {
        Self {
            settings,
            connect_timeout: constants::DEFAULT_CONNECT_TIMEOUT,
        }
    }

    /// Limits how long one connection attempt may take.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    /// Snapshots the current values of `config` from `tree`.
    pub fn from_config<S: ConfigStore>(tree: &ConfigTree<S>, config: &MySqlConfig) -> Self {
        Self::new(MySqlSettings::from_config(tree, config))
    }

    pub fn settings(&self) -> &MySqlSettings {
        &self.settings
    }

    /// Makes one connection attempt, returning the failure to the caller.
    pub async fn try_connect(&self) -> Result<MySqlConnection> {
        let options = self.settings.connect_options()?;
        let user = if self.settings.user_id.is_empty() {
            "anonymous user".to_string()
        } else {
            format!("user {}", self.settings.user_id)
        };
        debug!(
            url = %self.settings.jdbc_url(),
            user = %user,
            "[Storage] Attempting connection to MySQL-like database"
        );
        let failed = |reason: String| StorageError::ConnectionFailed {
            url: self.settings.jdbc_url(),
            reason,
        };
        match tokio::time::timeout(self.connect_timeout, MySqlConnection::connect_with(&options)).await {
            Ok(Ok(connection)) => Ok(connection),
            Ok(Err(e)) => Err(failed(e.to_string()).into()),
            Err(_) => Err(failed(format!("timed out after {:?}", self.connect_timeout)).into()),
        }
    }
}

#[async_trait]
impl ConnectionManager for MySqlConnectionManager {
    type Connection = MySqlConnection;

    async fn connect(&self) -> Option<MySqlConnection> {
        match self.try_connect().await {
            Ok(connection) => Some(connection),
            Err(err) => {
                error!(error = %err, "[Storage] Failed to connect to the database");
                None
            }
        }
    }
}
