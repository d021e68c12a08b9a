use std::env;
use std::fmt::Display;
use std::str::FromStr;

/// Host value that enables the drop-and-recreate database bootstrap.
pub const LOCAL_DB_HOST: &str = "localhost";

const DEFAULT_DATABASE_URL: &str = "app.db";
const DEFAULT_ADDRESS: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;

/// Process configuration collected from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Path of the SQLite database file (`DATABASE_URL`).
    pub database_url: String,
    /// Database host (`DB_HOST`); `localhost` resets the database on start.
    pub db_host: Option<String>,
    /// Bind address (`ADDRESS`).
    pub address: String,
    /// Bind port (`PORT`).
    pub port: u16,
}

impl ServerConfig {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            database_url: lookup("DATABASE_URL")
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            db_host: lookup("DB_HOST").filter(|host| !host.trim().is_empty()),
            address: lookup("ADDRESS").unwrap_or_else(|| DEFAULT_ADDRESS.to_string()),
            port: parse_or_default("PORT", lookup("PORT"), DEFAULT_PORT),
        }
    }

    /// Whether the database should be dropped and recreated on start.
    pub fn resets_database(&self) -> bool {
        self.db_host.as_deref() == Some(LOCAL_DB_HOST)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

fn parse_or_default<T>(key: &str, raw: Option<String>, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    match raw {
        Some(value) => value.trim().parse().unwrap_or_else(|err| {
            log::warn!("Invalid {key} value `{value}` ({err}), using default: {default}");
            default
        }),
        None => default,
    }
}
