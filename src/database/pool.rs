//! Connection-pool sizing.
//!
//! Limits follow the conventions of the configuration format: a non-positive
//! `maxOpenConns` means "no limit", a non-positive `maxIdleConns` means "keep
//! no idle connections", and the idle limit never exceeds a finite open
//! limit.

use std::time::Duration;

use sqlx::Database;
use sqlx::pool::PoolOptions;

/// Ceiling used when the open-connection limit is unlimited.
///
/// The pool library needs a finite bound and sizes its idle queue to it up
/// front. This sits far above MySQL's default `max_connections` (151), so the
/// server stays the binding limit.
pub const UNLIMITED_CONNECTIONS: u32 = 10_000;

/// How long a connection above the idle limit may sit unused before it is
/// closed.
pub const IDLE_TIMEOUT: Duration = Duration::from_secs(10 * 60);

/// Open and idle connection limits for a pool.
///
/// # Examples
///
/// ```
/// use blaster_db::database::PoolLimits;
///
/// let limits = PoolLimits::new(0, 5);
/// assert_eq!(limits.max_open(), None);
/// assert_eq!(limits.max_idle(), 5);
///
/// // idle is clamped to a finite open limit
/// assert_eq!(PoolLimits::new(2, 5).max_idle(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolLimits {
    max_open: Option<u32>,
    max_idle: u32,
}

impl PoolLimits {
    pub fn new(max_open: i32, max_idle: i32) -> Self {
        let max_open = u32::try_from(max_open).ok().filter(|&n| n > 0);
        let max_idle = u32::try_from(max_idle)
            .unwrap_or(0)
            .min(max_open.unwrap_or(UNLIMITED_CONNECTIONS));
        Self { max_open, max_idle }
    }

    /// The open-connection limit, or `None` when unlimited.
    pub fn max_open(&self) -> Option<u32> {
        self.max_open
    }

    /// The number of idle connections retained for reuse.
    pub fn max_idle(&self) -> u32 {
        self.max_idle
    }

    /// The `max_connections` value handed to the pool.
    pub fn max_connections(&self) -> u32 {
        self.max_open.unwrap_or(UNLIMITED_CONNECTIONS)
    }

    /// Applies these limits to a set of pool options.
    ///
    /// The pool keeps `max_idle` connections warm and closes any connection
    /// beyond that once it has been idle for [`IDLE_TIMEOUT`].
    pub fn apply<DB: Database>(&self, options: PoolOptions<DB>) -> PoolOptions<DB> {
        options
            .max_connections(self.max_connections())
            .min_connections(self.max_idle)
            .idle_timeout(IDLE_TIMEOUT)
    }
}
