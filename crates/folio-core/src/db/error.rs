//! Database error types.

use thiserror::Error;

/// Errors that can occur during database operations.
#[derive(Error, Debug)]
pub enum DbError {
    /// Database connection error.
    #[error("Database connection error: {0}")]
    Connection(String),

    /// Query execution error.
    #[error("Query error: {0}")]
    Query(String),

    /// Constraint violation (e.g., NOT NULL).
    #[error("Constraint violation: {0}")]
    Constraint(String),

    /// Migration error.
    #[error("Migration error: {0}")]
    Migration(String),

    /// Pool exhausted or acquire timed out.
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Invalid configuration.
    #[error("Invalid database configuration: {0}")]
    Configuration(String),
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => {
                if db_err.is_unique_violation()
                    || db_err.is_check_violation()
                    || db_err.is_foreign_key_violation()
                {
                    DbError::Constraint(db_err.message().to_string())
                } else {
                    DbError::Query(db_err.message().to_string())
                }
            }
            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,
            sqlx::Error::Configuration(msg) => DbError::Configuration(msg.to_string()),
            sqlx::Error::Io(e) => DbError::Connection(e.to_string()),
            sqlx::Error::Tls(e) => DbError::Connection(e.to_string()),
            _ => DbError::Query(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::Migration(err.to_string())
    }
}
