//! `commits` command.

use anyhow::Result;
use clap::Parser;

use crate::config::Config;
use crate::github::{GitHubClient, RepoLocator};

/// Fetches a repository's commits and prints them as YAML.
#[derive(Parser)]
pub struct CommitsCommand {
    /// GitHub repository URL.
    pub url: String,
}

impl CommitsCommand {
    /// Executes the commits command.
    pub async fn execute(self) -> Result<()> {
        let config = Config::load()?;
        let locator = RepoLocator::parse(&self.url)?;

        let commits = GitHubClient::from_config(&config)
            .fetch_commits(&locator)
            .await?;

        if commits.is_empty() {
            eprintln!("{locator} has no commits");
            return Ok(());
        }

        print!("{}", crate::yaml::to_yaml(&commits)?);
        Ok(())
    }
}
