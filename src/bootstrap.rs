use std::fs;
use std::io;

use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use pushkind_common::db::{DbPool, establish_connection_pool};
use thiserror::Error;

use crate::config::ServerConfig;

/// Schema migrations compiled into the binary.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Errors raised while preparing the database at start-up.
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("failed to remove database file `{path}`: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to open database: {0}")]
    Pool(String),
    #[error("failed to run migrations: {0}")]
    Migration(String),
}

/// Prepares the database and returns a ready connection pool.
///
/// A local configuration (`DB_HOST=localhost`) starts from an empty database;
/// other hosts keep their data. Pending migrations are applied in both cases.
pub fn setup_database(config: &ServerConfig) -> Result<DbPool, BootstrapError> {
    if config.resets_database() {
        log::info!("Recreating database `{}`", config.database_url);
        drop_database(&config.database_url)?;
    } else {
        log::info!("Keeping existing database `{}`", config.database_url);
    }

    let pool = establish_connection_pool(&config.database_url)
        .map_err(|err| BootstrapError::Pool(err.to_string()))?;
    run_migrations(&pool)?;

    Ok(pool)
}

/// Removes the SQLite file at `path` together with its `-wal`/`-shm` files.
///
/// Missing files are not an error.
pub fn drop_database(path: &str) -> Result<(), BootstrapError> {
    for file in [path.to_string(), format!("{path}-wal"), format!("{path}-shm")] {
        match fs::remove_file(&file) {
            Ok(()) => log::info!("Removed `{file}`"),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(source) => return Err(BootstrapError::Io { path: file, source }),
        }
    }
    Ok(())
}

/// Applies pending migrations and returns how many ran.
pub fn run_migrations(pool: &DbPool) -> Result<usize, BootstrapError> {
    let mut conn = pool
        .get()
        .map_err(|err| BootstrapError::Pool(err.to_string()))?;

    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| BootstrapError::Migration(err.to_string()))?;

    if !applied.is_empty() {
        log::info!("Applied {} migration(s)", applied.len());
    }
    Ok(applied.len())
}
