//! Command-line interface.

use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod commits;
pub mod config;
pub mod generate;
pub mod serve;

/// blogcommits: turn a repository's commit history into a blog post.
#[derive(Parser)]
#[command(name = "blogcommits")]
#[command(about = "Turn a GitHub repository's commit history into a blog post", long_about = None)]
#[command(version)]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Runs the HTTP service.
    Serve(serve::ServeCommand),
    /// Generates a blog post for one repository.
    Generate(generate::GenerateCommand),
    /// Prints a repository's commits as YAML.
    Commits(commits::CommitsCommand),
    /// Prints the effective configuration.
    Config(config::ConfigCommand),
}

impl Cli {
    /// Executes the CLI command.
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Serve(cmd) => cmd.execute().await,
            Commands::Generate(cmd) => cmd.execute().await,
            Commands::Commits(cmd) => cmd.execute().await,
            Commands::Config(cmd) => cmd.execute().await,
        }
    }
}
