//! CLI subcommands.

mod check_config;
mod migrate;
mod serve;

pub use check_config::cmd_check_config;
pub use migrate::cmd_migrate;
pub use serve::{run_server, ServeOverrides};

use anyhow::{Context, Result};
use folio_core::db::{create_pool_with_options, PoolOptions};
use folio_core::{DatabaseConfig, DbPool};

/// Opens the connection pool described by `config`.
pub(crate) async fn connect(config: &DatabaseConfig) -> Result<DbPool> {
    let options = PoolOptions {
        max_connections: config.max_connections,
        acquire_timeout: config.acquire_timeout,
        ..PoolOptions::default()
    };

    create_pool_with_options(&config.url, options)
        .await
        .context("Failed to create database connection pool")
}
