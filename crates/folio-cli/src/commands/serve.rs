//! Serve command - starts the API server.

use anyhow::{Context, Result};
use colored::Colorize;
use folio_api::{ApiServer, ApiServerConfig, AppState};
use folio_core::db::run_migrations;
use folio_core::{create_mailer, AppConfig};
use tracing::info;

use super::connect;

/// Command-line overrides applied on top of the environment.
#[derive(Debug, Clone, Default)]
pub struct ServeOverrides {
    pub port: Option<u16>,
    pub host: Option<String>,
    pub run_migrations: bool,
}

/// Runs the API server until shutdown.
pub async fn run_server(mut config: AppConfig, overrides: ServeOverrides) -> Result<()> {
    if let Some(port) = overrides.port {
        config.server.port = port;
    }
    if let Some(host) = overrides.host {
        config.server.host = host;
    }

    println!("{} Starting Folio API server...", "[server]".cyan());

    let pool = connect(&config.database).await?;
    println!("  {} Database: {}", "→".green(), pool.db_type());

    if overrides.run_migrations {
        println!("  {} Running migrations...", "→".green());
        run_migrations(&pool)
            .await
            .context("Failed to run database migrations")?;
        println!("  {} Migrations complete", "✓".green());
    }

    let mailer = create_mailer(&config.mail).context("Failed to initialize mailer")?;
    println!("  {} Mail transport: {}", "→".green(), mailer.name());

    let state = AppState::from_config(&config, pool.clone(), mailer)
        .context("Failed to initialize token signing")?;
    if state.auth.is_none() {
        println!("  {} Login disabled (JWT_SECRET not set)", "!".yellow());
    }

    let server_config = ApiServerConfig::from(&config.server);

    println!();
    println!(
        "  {} Listening on http://{}:{}",
        "✓".green(),
        server_config.host,
        server_config.port
    );
    println!();

    ApiServer::new(state, server_config)
        .run()
        .await
        .context("Server error")?;

    pool.close().await;
    info!("Database pool closed");
    Ok(())
}
