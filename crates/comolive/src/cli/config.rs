use anyhow::Result;
use clap::Parser;

use super::load_config;

/// Print the effective configuration as TOML.
#[derive(Parser)]
pub struct ConfigCommand {
    /// Configuration file path.
    #[arg(short, long, default_value = "comolive.toml")]
    pub config: String,
}

impl ConfigCommand {
    /// Execute the config command.
    pub fn execute(self) -> Result<()> {
        let config = load_config(&self.config)?;
        print!("{}", config.to_toml()?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_command_default_path() {
        let cmd = ConfigCommand::try_parse_from(["config"]).unwrap();
        assert_eq!(cmd.config, "comolive.toml");
    }
}
