//! Database layer — the backend contract and its connection-pool lifecycle.
//!
//! A host drives every backend through the same steps:
//!
//! 1. [`Database::new_config`] attaches an empty configuration and hands it
//!    back for the host to fill (from a file, the environment, or code).
//! 2. [`Database::validate_before`] reports the first missing or invalid field.
//! 3. [`Database::connect`] opens the pool, applies its size limits and
//!    checks the server answers.
//! 4. [`Database::get_connection`] hands out the pool for queries.
//! 5. [`Database::close`] releases the pool.
//!
//! Nothing in this layer retries, times out, or logs errors; every failure is
//! returned to the caller.

use async_trait::async_trait;

pub mod config;
pub mod driver;
pub mod error;
pub mod mysql;
pub mod pool;

pub use config::Field;
pub use driver::install_drivers;
pub use error::{CloseError, ConfigError, ConnectionError, Error, ErrorCode};
pub use mysql::{MySql, MySqlConfig};
pub use pool::PoolLimits;

/// Where a backend is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendState {
    /// No configuration attached yet.
    Unconfigured,
    /// A configuration is attached and not yet connected.
    ///
    /// Calling `new_config` on a connected instance also lands here while the
    /// earlier pool stays live and reachable through
    /// [`Database::get_connection`]; it is closed by the next successful
    /// connect or by close.
    Configured,
    /// A pool is open and passed its liveness check.
    Connected,
    /// The pool was released. The stale handle is still reachable through
    /// [`Database::get_connection`] but refuses new work.
    Closed,
}

/// The capability set every database backend provides.
///
/// Instances are mutated only through `&mut self`, so a single owner (or an
/// external mutex) serializes configuration, connect and close. The handle
/// returned by [`get_connection`](Database::get_connection) is a shared pool
/// and may be cloned freely across tasks.
#[async_trait]
pub trait Database: Send + Sync {
    /// Backend-specific connection parameters.
    type Config: Send + Sync;

    /// The pool handle given to the host for queries.
    type Connection: Clone + Send + Sync;

    /// Short lowercase name of the backend, e.g. `"mysql"`.
    fn backend_name(&self) -> &'static str;

    fn state(&self) -> BackendState;

    /// Attaches a fresh, empty configuration and returns it for the host to
    /// populate. Any previously attached configuration is discarded.
    fn new_config(&mut self) -> &mut Self::Config;

    /// Checks the attached configuration without touching the network.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the first field that fails.
    fn validate_before(&self) -> Result<(), ConfigError>;

    /// Opens the connection pool and checks the server is reachable.
    ///
    /// If a pool from an earlier connect is still open it is closed once the
    /// new pool passes its liveness check. On failure the instance is left as
    /// it was.
    ///
    /// # Errors
    ///
    /// Returns a [`ConnectionError`] if the pool cannot be built or the
    /// liveness probe fails.
    async fn connect(&mut self) -> Result<(), ConnectionError>;

    /// The current pool handle, `None` before the first successful connect.
    fn get_connection(&self) -> Option<&Self::Connection>;

    /// Releases the pool. Closing an already-closed pool is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`CloseError::NotConnected`] if connect never succeeded.
    async fn close(&mut self) -> Result<(), CloseError>;

    /// Validates the configuration and, if it passes, connects.
    async fn open(&mut self) -> Result<(), Error> {
        self.validate_before()?;
        self.connect().await?;
        Ok(())
    }
}
