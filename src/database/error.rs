//! Error types for the database lifecycle.
//!
//! Each lifecycle step has its own error type so callers can tell a bad
//! configuration apart from an unreachable server: [`ConfigError`] from
//! validation and loading, [`ConnectionError`] from connect, [`CloseError`]
//! from close. [`Error`] wraps all three for code that drives the whole
//! lifecycle with `?`.

use std::fmt;

use thiserror::Error;

use super::config::Field;

/// Classification code attached to every error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorCode {
    Internal,
}

impl ErrorCode {
    /// Returns the code as a stable lowercase string.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Internal => "internal",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised while loading or validating a backend configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required field is empty.
    #[error("Not found `{}` in config file and `{env}` in env", .field.key())]
    Missing { field: Field, env: String },

    /// A pool-size limit is negative.
    #[error("`{}` in config file or `{env}` in env must not be negative, got {value}", .field.key())]
    Negative {
        field: Field,
        env: String,
        value: i32,
    },

    /// Validation was requested before a configuration was attached.
    #[error("no configuration attached; call `new_config` first")]
    Unconfigured,

    /// An environment variable held a value that does not parse as an integer.
    #[error("environment variable `{var}` is not a valid integer: {value:?}")]
    InvalidEnv { var: String, value: String },

    /// Failed to read a configuration file.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse a JSON configuration.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ConfigError {
    /// The field this error is about, if it concerns a single field.
    pub fn field(&self) -> Option<Field> {
        match self {
            Self::Missing { field, .. } | Self::Negative { field, .. } => Some(*field),
            _ => None,
        }
    }

    /// The classification code for this error.
    pub fn code(&self) -> ErrorCode {
        ErrorCode::Internal
    }
}

/// Errors raised while opening a connection pool.
#[derive(Debug, Error)]
pub enum ConnectionError {
    /// The driver failed to open the pool or the liveness probe failed.
    ///
    /// The message is the driver's own text.
    #[error("{0}")]
    Driver(#[from] sqlx::Error),

    /// The configuration cannot be turned into a connection URL.
    #[error("invalid connection parameters: {0}")]
    InvalidParameters(String),

    /// Connect was called before a configuration was attached.
    #[error("no configuration attached; call `new_config` first")]
    Unconfigured,
}

impl ConnectionError {
    /// The classification code for this error.
    pub fn code(&self) -> ErrorCode {
        ErrorCode::Internal
    }
}

impl From<url::ParseError> for ConnectionError {
    fn from(e: url::ParseError) -> Self {
        Self::InvalidParameters(e.to_string())
    }
}

/// Errors raised while releasing a connection pool.
#[derive(Debug, Error)]
pub enum CloseError {
    /// There is no pool to release; connect never succeeded.
    #[error("connection pool is not open")]
    NotConnected,
}

impl CloseError {
    /// The classification code for this error.
    pub fn code(&self) -> ErrorCode {
        ErrorCode::Internal
    }
}

/// Any error produced by the database lifecycle.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Connection(#[from] ConnectionError),

    #[error(transparent)]
    Close(#[from] CloseError),
}

impl Error {
    /// The classification code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Config(e) => e.code(),
            Self::Connection(e) => e.code(),
            Self::Close(e) => e.code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_message_names_both_sources() {
        let err = ConfigError::Missing {
            field: Field::Host,
            env: "MYSQL_HOST".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "Not found `host` in config file and `MYSQL_HOST` in env"
        );
        assert_eq!(err.field(), Some(Field::Host));
    }

    #[test]
    fn negative_message_names_field_and_value() {
        let err = ConfigError::Negative {
            field: Field::MaxIdleConns,
            env: "MYSQL_MAXIDLECONNS".to_owned(),
            value: -3,
        };
        let msg = err.to_string();
        assert!(msg.contains("`maxIdleConns`"));
        assert!(msg.contains("`MYSQL_MAXIDLECONNS`"));
        assert!(msg.ends_with("-3"));
    }

    #[test]
    fn driver_error_text_is_unmodified() {
        let err = ConnectionError::from(sqlx::Error::PoolClosed);
        assert_eq!(err.to_string(), sqlx::Error::PoolClosed.to_string());
    }

    #[test]
    fn umbrella_error_is_transparent() {
        let err: Error = CloseError::NotConnected.into();
        assert_eq!(err.to_string(), "connection pool is not open");
        assert_eq!(err.code(), ErrorCode::Internal);
        assert_eq!(err.code().to_string(), "internal");
    }
}
