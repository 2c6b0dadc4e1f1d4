//! Storage configuration.
//!
//! The database URL comes from the command line (or `SESSION_DB_URL` via
//! clap); pool tuning comes from environment variables.

pub const DEFAULT_SESSION_DB_URL: &str = "sqlite://session.db";
pub const DEFAULT_SESSION_DB_MAX_CONNECTIONS: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    /// SQLite connection URL for the slot database.
    pub url: String,
    /// Upper bound on pooled SQLite connections.
    pub max_connections: u32,
}

impl StorageConfig {
    /// Config for `url`, with pool tuning read from the environment.
    ///
    /// Optional:
    /// - `SESSION_DB_MAX_CONNECTIONS`: default 1
    #[must_use]
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: env_parse("SESSION_DB_MAX_CONNECTIONS", DEFAULT_SESSION_DB_MAX_CONNECTIONS).max(1),
        }
    }
}

pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
