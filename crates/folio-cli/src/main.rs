//! Folio CLI
//!
//! Command-line entry point for the Folio portfolio backend.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use folio_core::AppConfig;
use folio_observability::{init_logging_with_config, LoggingConfig};

mod commands;

use commands::{cmd_check_config, cmd_migrate, run_server, ServeOverrides};

#[derive(Parser)]
#[command(name = "folio")]
#[command(version)]
#[command(about = "Backend for a personal portfolio site", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format (text, json)
    #[arg(long, env = "LOG_FORMAT")]
    log_format: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        /// Port to listen on (overrides FOLIO_PORT)
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to (overrides FOLIO_HOST)
        #[arg(long)]
        host: Option<String>,

        /// Skip running migrations at startup
        #[arg(long)]
        no_migrate: bool,
    },

    /// Apply database migrations and exit
    Migrate,

    /// Validate configuration and print it with secrets redacted
    CheckConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine; real deployments set the environment directly.
    let _ = dotenv::dotenv();

    let cli = Cli::parse();

    let mut logging =
        LoggingConfig::from_values(cli.log_level.as_deref(), cli.log_format.as_deref())
            .map_err(anyhow::Error::msg)
            .context("Invalid logging configuration")?;
    if cli.verbose {
        logging.level = tracing::Level::DEBUG;
    }
    init_logging_with_config(logging);

    let config = AppConfig::from_env().context("Failed to load configuration")?;

    match cli.command {
        Commands::Serve {
            port,
            host,
            no_migrate,
        } => {
            run_server(
                config,
                ServeOverrides {
                    port,
                    host,
                    run_migrations: !no_migrate,
                },
            )
            .await
        }
        Commands::Migrate => cmd_migrate(&config).await,
        Commands::CheckConfig => cmd_check_config(&config),
    }
}
