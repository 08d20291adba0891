//! MySQL backend.
//!
//! Opens an `sqlx` [`AnyPool`] against a MySQL server. The pool is created
//! lazily with the configured limits, then a single dedicated connection is
//! opened and pinged to prove the server is reachable. There is no retry: a
//! refused or failed probe is reported straight back to the caller.

mod config;

use std::fmt;

use async_trait::async_trait;
use sqlx::any::{AnyConnectOptions, AnyPoolOptions};
use sqlx::{AnyConnection, AnyPool, ConnectOptions, Connection};
use tracing::{debug, info};

pub use config::{CHARSET, ENV_PREFIX, MySqlConfig};

use crate::database::driver::install_drivers;
use crate::database::error::{CloseError, ConfigError, ConnectionError};
use crate::database::pool::PoolLimits;
use crate::database::{BackendState, Database};

const BACKEND: &str = "mysql";

/// A MySQL implementation of [`Database`].
///
/// # Examples
///
/// ```rust,no_run
/// use blaster_db::{Database, MySql};
///
/// # async fn run() -> Result<(), blaster_db::Error> {
/// let mut db = MySql::new();
/// let config = db.new_config();
/// config.host = "localhost".into();
/// config.port = "3306".into();
/// config.username = "u".into();
/// config.password = "p".into();
/// config.database = "d".into();
/// config.max_open_conns = 10;
/// config.max_idle_conns = 5;
///
/// db.validate_before()?;
/// db.connect().await?;
///
/// let pool = db.get_connection().expect("connected").clone();
/// sqlx::query("SELECT 1").execute(&pool).await.ok();
///
/// db.close().await?;
/// # Ok(())
/// # }
/// ```
pub struct MySql {
    config: Option<MySqlConfig>,
    pool: Option<AnyPool>,
    state: BackendState,
}

impl MySql {
    /// Creates an unconfigured backend and registers the SQL drivers.
    pub fn new() -> Self {
        install_drivers();
        Self {
            config: None,
            pool: None,
            state: BackendState::Unconfigured,
        }
    }

    /// Creates a backend with `config` already attached.
    pub fn with_config(config: MySqlConfig) -> Self {
        let mut db = Self::new();
        *db.new_config() = config;
        db
    }

    /// The attached configuration, if any.
    pub fn config(&self) -> Option<&MySqlConfig> {
        self.config.as_ref()
    }
}

impl Default for MySql {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MySql {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MySql")
            .field("state", &self.state)
            .field("config", &self.config)
            .field("pool_open", &self.pool.as_ref().is_some_and(|p| !p.is_closed()))
            .finish()
    }
}

#[async_trait]
impl Database for MySql {
    type Config = MySqlConfig;
    type Connection = AnyPool;

    fn backend_name(&self) -> &'static str {
        BACKEND
    }

    fn state(&self) -> BackendState {
        self.state
    }

    fn new_config(&mut self) -> &mut MySqlConfig {
        self.state = BackendState::Configured;
        self.config.insert(MySqlConfig::default())
    }

    fn validate_before(&self) -> Result<(), ConfigError> {
        self.config
            .as_ref()
            .ok_or(ConfigError::Unconfigured)?
            .validate()
    }

    async fn connect(&mut self) -> Result<(), ConnectionError> {
        let config = self.config.as_ref().ok_or(ConnectionError::Unconfigured)?;
        install_drivers();

        let url = config.connection_url()?;
        let limits = PoolLimits::new(config.max_open_conns, config.max_idle_conns);
        debug!(
            backend = BACKEND,
            host = %config.host,
            port = %config.port,
            database = %config.database,
            max_open = ?limits.max_open(),
            max_idle = limits.max_idle(),
            "opening connection pool"
        );

        let options = AnyConnectOptions::from_url(&url)?;
        let pool = limits
            .apply(AnyPoolOptions::new())
            .connect_lazy_with(options.clone());

        if let Err(e) = probe(&options).await {
            pool.close().await;
            return Err(e.into());
        }

        if let Some(previous) = self.pool.replace(pool) {
            if !previous.is_closed() {
                debug!(backend = BACKEND, "closing previous connection pool");
                previous.close().await;
            }
        }
        self.state = BackendState::Connected;
        info!(backend = BACKEND, "connection pool ready");

        Ok(())
    }

    fn get_connection(&self) -> Option<&AnyPool> {
        self.pool.as_ref()
    }

    async fn close(&mut self) -> Result<(), CloseError> {
        let pool = self.pool.as_ref().ok_or(CloseError::NotConnected)?;
        pool.close().await;
        self.state = BackendState::Closed;
        info!(backend = BACKEND, "connection pool closed");
        Ok(())
    }
}

/// Opens one connection outside the pool and round-trips a ping on it.
///
/// Going around the pool keeps this a single attempt; the pool itself waits
/// and retries on refused connections until its acquire timeout.
async fn probe(options: &AnyConnectOptions) -> Result<(), sqlx::Error> {
    let mut conn = AnyConnection::connect_with(options).await?;
    conn.ping().await?;
    conn.close().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::Field;
    use crate::database::Error;

    fn fill(config: &mut MySqlConfig, port: &str) {
        config.host = "127.0.0.1".into();
        config.port = port.into();
        config.username = "u".into();
        config.password = "p".into();
        config.database = "d".into();
        config.max_open_conns = 10;
        config.max_idle_conns = 5;
    }

    #[test]
    fn new_backend_is_unconfigured() {
        let db = MySql::new();
        assert_eq!(db.backend_name(), "mysql");
        assert_eq!(db.state(), BackendState::Unconfigured);
        assert!(db.config().is_none());
        assert!(db.get_connection().is_none());
    }

    #[test]
    fn validate_without_config_fails() {
        let db = MySql::new();
        assert!(matches!(
            db.validate_before(),
            Err(ConfigError::Unconfigured)
        ));
    }

    #[test]
    fn new_config_is_empty_and_attached() {
        let mut db = MySql::new();
        assert_eq!(*db.new_config(), MySqlConfig::default());
        assert_eq!(db.state(), BackendState::Configured);

        let err = db.validate_before().unwrap_err();
        assert_eq!(err.field(), Some(Field::Host));
    }

    #[test]
    fn new_config_populated_through_handle() {
        let mut db = MySql::new();
        fill(db.new_config(), "3306");
        assert!(db.validate_before().is_ok());
        assert_eq!(db.config().map(|c| c.database.as_str()), Some("d"));
    }

    #[test]
    fn new_config_replaces_previous() {
        let mut db = MySql::new();
        fill(db.new_config(), "3306");
        db.new_config();
        assert_eq!(db.config(), Some(&MySqlConfig::default()));
    }

    #[test]
    fn validate_does_not_change_state() {
        let mut db = MySql::new();
        db.new_config();
        let _ = db.validate_before();
        assert_eq!(db.state(), BackendState::Configured);
    }

    #[test]
    fn debug_hides_password() {
        let mut db = MySql::new();
        fill(db.new_config(), "3306");
        let out = format!("{db:?}");
        assert!(out.contains("pool_open: false"));
        assert!(!out.contains("\"p\""));
    }

    #[tokio::test]
    async fn connect_without_config_fails() {
        let mut db = MySql::new();
        assert!(matches!(
            db.connect().await,
            Err(ConnectionError::Unconfigured)
        ));
    }

    #[tokio::test]
    async fn connect_with_bad_port_is_invalid_parameters() {
        let mut db = MySql::new();
        fill(db.new_config(), "not-a-port");
        let err = db.connect().await.unwrap_err();
        assert!(matches!(err, ConnectionError::InvalidParameters(_)));
        assert_eq!(db.state(), BackendState::Configured);
        assert!(db.get_connection().is_none());
    }

    #[tokio::test]
    async fn connect_to_unreachable_host_fails_without_handle() {
        let mut db = MySql::new();
        // Nothing listens on port 1; the connection is refused immediately.
        fill(db.new_config(), "1");
        let err = db.connect().await.unwrap_err();
        assert!(matches!(err, ConnectionError::Driver(_)));
        assert_eq!(db.state(), BackendState::Configured);
        assert!(db.get_connection().is_none());
    }

    #[tokio::test]
    async fn close_before_connect_fails_gracefully() {
        let mut db = MySql::new();
        db.new_config();
        assert!(matches!(db.close().await, Err(CloseError::NotConnected)));
        assert_eq!(db.state(), BackendState::Configured);
    }

    #[tokio::test]
    async fn open_reports_validation_before_connecting() {
        let mut db = MySql::new();
        let config = db.new_config();
        fill(config, "1");
        config.username.clear();

        let err = db.open().await.unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::Missing { field: Field::Username, .. })
        ));
    }
}
