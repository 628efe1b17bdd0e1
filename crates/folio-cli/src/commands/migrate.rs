//! Migrate command - applies pending schema migrations.

use anyhow::{Context, Result};
use colored::Colorize;
use folio_core::db::run_migrations;
use folio_core::AppConfig;

use super::connect;

/// Applies migrations and exits.
pub async fn cmd_migrate(config: &AppConfig) -> Result<()> {
    let pool = connect(&config.database).await?;

    println!(
        "{} Running {} migrations...",
        "[migrate]".cyan(),
        pool.db_type()
    );
    run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;
    pool.close().await;

    println!("  {} Migrations complete", "✓".green());
    Ok(())
}
