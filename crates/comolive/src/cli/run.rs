use anyhow::Result;
use clap::Parser;
use console::style;

use super::{init_tracing, load_config};
use crate::runtime::Live;

/// Serve the dashboard.
#[derive(Parser)]
pub struct RunCommand {
    /// Configuration file path.
    #[arg(short, long, default_value = "comolive.toml")]
    pub config: String,

    /// Port to listen on (overrides config).
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Host to bind to (overrides config).
    #[arg(long)]
    pub host: Option<String>,

    /// Enable development mode (verbose logging).
    #[arg(long)]
    pub dev: bool,
}

impl RunCommand {
    /// Execute the run command.
    pub async fn execute(self) -> Result<()> {
        let mut config = load_config(&self.config)?;
        init_tracing(&config.observability.logging, self.dev);

        if let Some(port) = self.port {
            config.gateway.port = port;
        }
        if let Some(host) = self.host {
            config.gateway.host = host;
        }

        let live = Live::builder().config(config).build()?;
        let gateway = &live.config().gateway;

        println!();
        println!(
            "  {} v{}",
            style(&live.config().project.title).bold().cyan(),
            env!("CARGO_PKG_VERSION")
        );
        println!(
            "  Dashboard at {}",
            style(format!(
                "http://{}:{}/dashboard.php?comonode=host:port",
                gateway.host, gateway.port
            ))
            .cyan()
        );
        if self.dev {
            println!("  Development mode enabled");
        }
        println!();

        live.run().await?;

        println!("\n  Goodbye!");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_command_defaults() {
        let cmd = RunCommand::try_parse_from(["run"]).unwrap();
        assert_eq!(cmd.config, "comolive.toml");
        assert!(cmd.port.is_none());
        assert!(!cmd.dev);
    }

    #[test]
    fn test_run_command_with_overrides() {
        let cmd = RunCommand::try_parse_from([
            "run", "-c", "custom.toml", "-p", "3000", "--host", "0.0.0.0", "--dev",
        ])
        .unwrap();
        assert_eq!(cmd.config, "custom.toml");
        assert_eq!(cmd.port, Some(3000));
        assert_eq!(cmd.host.as_deref(), Some("0.0.0.0"));
        assert!(cmd.dev);
    }
}
