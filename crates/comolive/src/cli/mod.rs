mod config;
mod render;
mod run;

pub use config::ConfigCommand;
pub use render::RenderCommand;
pub use run::RunCommand;

use std::path::Path;

use anyhow::Result;
use clap::{Parser, Subcommand};
use comolive_core::config::{LiveConfig, LoggingConfig};
use tracing_subscriber::EnvFilter;

/// comolive - live dashboard for CoMo monitoring nodes
#[derive(Parser)]
#[command(name = "comolive")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Serve the dashboard.
    Run(RunCommand),

    /// Render the dashboard for a query string and print the HTML.
    Render(RenderCommand),

    /// Print the effective configuration.
    Config(ConfigCommand),
}

impl Cli {
    /// Execute the CLI command.
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Run(cmd) => cmd.execute().await,
            Commands::Render(cmd) => cmd.execute().await,
            Commands::Config(cmd) => cmd.execute(),
        }
    }
}

/// Load the configuration file, falling back to defaults when it does not exist.
pub fn load_config(path: &str) -> Result<LiveConfig> {
    if !Path::new(path).exists() {
        tracing::warn!("Configuration file {} not found, using defaults", path);
        return Ok(LiveConfig::default());
    }

    tracing::info!("Loading configuration from {}", path);
    Ok(LiveConfig::from_file(path)?)
}

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` wins over the configured level; `dev` forces debug.
pub fn init_tracing(logging: &LoggingConfig, dev: bool) {
    let level = if dev { "debug" } else { logging.level.as_str() };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    let result = if logging.json_format {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if let Err(e) = result {
        eprintln!("Failed to initialize logging: {}", e);
    }
}
