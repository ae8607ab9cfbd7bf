//! Request pipeline: resolve, fetch, compose, generate.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::ai::BlogGenerator;
use crate::config::Config;
use crate::error::BlogError;
use crate::github::{GitHubClient, RepoLocator};
use crate::prompts::PromptComposer;

/// Input to a pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogRequest {
    /// GitHub repository URL.
    pub repository_url: String,
    /// Free-text guidance appended to the system prompt.
    pub context: String,
}

/// Result of a successful pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    /// Generated markdown.
    pub text: String,
    /// Number of commits fed into the prompt.
    pub commits_processed: usize,
}

/// The composed stages. Holds no per-request state and can be shared
/// across concurrent requests.
pub struct BlogPipeline {
    github: GitHubClient,
    composer: PromptComposer,
    generator: BlogGenerator,
}

impl BlogPipeline {
    /// Assembles a pipeline from its stages.
    pub fn new(github: GitHubClient, composer: PromptComposer, generator: BlogGenerator) -> Self {
        Self {
            github,
            composer,
            generator,
        }
    }

    /// Assembles the production pipeline described by `config`.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            GitHubClient::from_config(config),
            PromptComposer::from_config(config),
            BlogGenerator::from_config(config),
        )
    }

    /// The prompt composition stage.
    pub fn composer(&self) -> &PromptComposer {
        &self.composer
    }

    /// The generation stage.
    pub fn generator(&self) -> &BlogGenerator {
        &self.generator
    }

    /// Runs every stage in order; the first failure ends the run.
    pub async fn run(&self, request: &BlogRequest) -> Result<BlogPost, BlogError> {
        let locator = RepoLocator::parse(&request.repository_url)?;

        let commits = self.github.fetch_commits(&locator).await?;

        let prompt = self.composer.compose(&commits, &request.context).await?;

        let text = self
            .generator
            .generate(&prompt.system_prompt, &prompt.user_prompt)
            .await?;

        info!(
            repository = %locator,
            commits_processed = commits.len(),
            text_len = text.len(),
            "Blog post generated successfully"
        );

        Ok(BlogPost {
            text,
            commits_processed: commits.len(),
        })
    }
}
