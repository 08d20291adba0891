//! Configuration field names shared by relational backends.
//!
//! Every connection parameter is bindable from two sources: a key in a
//! structured config file (`maxOpenConns`) and an environment variable built
//! from a backend prefix and the upper-cased key (`MYSQL_MAXOPENCONNS`).

use std::fmt;

use crate::database::error::ConfigError;

/// A connection parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Host,
    Port,
    Username,
    Password,
    Database,
    MaxOpenConns,
    MaxIdleConns,
}

impl Field {
    /// All fields, in validation order for those that are validated.
    pub const ALL: [Field; 7] = [
        Self::Host,
        Self::Port,
        Self::Username,
        Self::Password,
        Self::Database,
        Self::MaxOpenConns,
        Self::MaxIdleConns,
    ];

    /// The config-file key for this field.
    pub fn key(self) -> &'static str {
        match self {
            Self::Host => "host",
            Self::Port => "port",
            Self::Username => "username",
            Self::Password => "password",
            Self::Database => "database",
            Self::MaxOpenConns => "maxOpenConns",
            Self::MaxIdleConns => "maxIdleConns",
        }
    }

    /// The environment variable for this field under `prefix`.
    ///
    /// An empty prefix yields the bare upper-cased key.
    ///
    /// ```
    /// use blaster_db::database::Field;
    ///
    /// assert_eq!(Field::MaxOpenConns.env_var("MYSQL"), "MYSQL_MAXOPENCONNS");
    /// assert_eq!(Field::Host.env_var(""), "HOST");
    /// ```
    pub fn env_var(self, prefix: &str) -> String {
        let suffix = self.key().to_ascii_uppercase();
        if prefix.is_empty() {
            suffix
        } else {
            format!("{prefix}_{suffix}")
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Reads `field` from the environment under `prefix`.
///
/// Unset and non-unicode variables are treated as absent.
pub(crate) fn env_string(field: Field, prefix: &str) -> Option<String> {
    std::env::var(field.env_var(prefix)).ok()
}

/// Reads an integer `field` from the environment under `prefix`.
pub(crate) fn env_int(field: Field, prefix: &str) -> Result<Option<i32>, ConfigError> {
    let var = field.env_var(prefix);
    match std::env::var(&var) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidEnv { var, value }),
        Err(_) => Ok(None),
    }
}
