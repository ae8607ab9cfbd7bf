//! `generate` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::config::Config;
use crate::pipeline::{BlogPipeline, BlogRequest};

/// Generates one blog post and prints it.
#[derive(Parser)]
pub struct GenerateCommand {
    /// GitHub repository URL, e.g. https://github.com/owner/name.
    pub url: String,
    /// Free-text guidance for the post.
    #[arg(long, short)]
    pub context: String,
    /// Writes the markdown to this file instead of stdout.
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

impl GenerateCommand {
    /// Executes the generate command.
    pub async fn execute(self) -> Result<()> {
        let config = Config::load()?;
        let pipeline = BlogPipeline::from_config(&config);

        let request = BlogRequest {
            repository_url: self.url,
            context: self.context,
        };
        let post = pipeline.run(&request).await?;

        match &self.output {
            Some(path) => {
                tokio::fs::write(path, &post.text)
                    .await
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                eprintln!(
                    "Wrote blog post from {} commits to {}",
                    post.commits_processed,
                    path.display()
                );
            }
            None => {
                println!("{}", post.text);
                eprintln!("Generated blog post from {} commits", post.commits_processed);
            }
        }

        Ok(())
    }
}
