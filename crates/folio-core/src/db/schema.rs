//! Database schema and migrations.

use super::{DbError, DbPool};
use tracing::info;

/// Runs database migrations.
pub async fn run_migrations(pool: &DbPool) -> Result<(), DbError> {
    match pool {
        DbPool::Sqlite(pool) => {
            info!("Running SQLite migrations");
            sqlx::migrate!("src/db/migrations/sqlite").run(pool).await?;
        }
        DbPool::Postgres(pool) => {
            info!("Running PostgreSQL migrations");
            sqlx::migrate!("src/db/migrations/postgres")
                .run(pool)
                .await?;
        }
    }

    info!("Migrations completed successfully");
    Ok(())
}
