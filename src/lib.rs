//! # blaster-db
//!
//! A pluggable database backend contract with a pooled MySQL implementation.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use blaster_db::database::mysql::ENV_PREFIX;
//! use blaster_db::{Database, MySql, MySqlConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut db = MySql::new();
//!     *db.new_config() = MySqlConfig::from_env(ENV_PREFIX)?;
//!
//!     db.validate_before()?;
//!     db.connect().await?;
//!
//!     if let Some(pool) = db.get_connection() {
//!         sqlx::query("SELECT 1").execute(pool).await?;
//!     }
//!
//!     db.close().await?;
//!     Ok(())
//! }
//! ```

pub mod database;

// ── Convenience re-exports ────────────────────────────────────────────────────
pub use database::{
    BackendState, CloseError, ConfigError, ConnectionError, Database, Error, ErrorCode, MySql,
    MySqlConfig, PoolLimits,
};
