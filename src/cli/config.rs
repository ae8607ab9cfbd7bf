//! `config` command.

use anyhow::Result;
use clap::Parser;

use crate::config::Config;

/// Prints the effective configuration with secrets masked.
#[derive(Parser)]
pub struct ConfigCommand {}

impl ConfigCommand {
    /// Executes the config command.
    pub async fn execute(self) -> Result<()> {
        let config = Config::load()?;
        print!("{}", crate::yaml::to_yaml(&config.redacted())?);
        Ok(())
    }
}
