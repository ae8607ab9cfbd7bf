//! `serve` command.

use anyhow::Result;
use clap::Parser;

use crate::config::Config;
use crate::pipeline::BlogPipeline;

/// Runs the HTTP service.
#[derive(Parser)]
pub struct ServeCommand {
    /// Host to bind (overrides HOST).
    #[arg(long)]
    pub host: Option<String>,
    /// Port to bind (overrides PORT).
    #[arg(long)]
    pub port: Option<u16>,
}

impl ServeCommand {
    /// Executes the serve command.
    pub async fn execute(self) -> Result<()> {
        let config = Config::load()?;
        let host = self.host.unwrap_or_else(|| config.host.clone());
        let port = self.port.unwrap_or(config.port);

        crate::server::serve(BlogPipeline::from_config(&config), &host, port).await
    }
}
