//! Prompt composition for blog post generation.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::Config;
use crate::error::BlogError;
use crate::github::CommitRecord;

/// Inserted between the base template and the caller's context.
pub const CONTEXT_SEPARATOR: &str = "\n\nContext for this blog post:\n";

/// Placed after each commit block.
const COMMIT_DELIMITER: &str = "---";

/// System and user prompts ready to send to the generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedPrompt {
    /// Base template followed by the caller's context.
    pub system_prompt: String,
    /// Rendered commit log.
    pub user_prompt: String,
}

/// Builds prompts from a template file and a commit list.
#[derive(Debug, Clone)]
pub struct PromptComposer {
    template_path: PathBuf,
}

impl PromptComposer {
    /// Creates a composer that reads its template from `template_path`.
    pub fn new(template_path: impl Into<PathBuf>) -> Self {
        Self {
            template_path: template_path.into(),
        }
    }

    /// Creates a composer from the loaded configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.system_prompt_path.clone())
    }

    /// Location of the base template.
    pub fn template_path(&self) -> &Path {
        &self.template_path
    }

    /// Reads the base template. The file is re-read on every call so edits
    /// take effect without a restart.
    pub async fn load_template(&self) -> Result<String, BlogError> {
        tokio::fs::read_to_string(&self.template_path)
            .await
            .map_err(|source| BlogError::TemplateLoadError {
                path: self.template_path.clone(),
                source,
            })
    }

    /// Loads the template and renders both prompts.
    pub async fn compose(
        &self,
        commits: &[CommitRecord],
        context: &str,
    ) -> Result<ComposedPrompt, BlogError> {
        let template = self.load_template().await?;

        let prompt = ComposedPrompt {
            system_prompt: render_system_prompt(&template, context),
            user_prompt: render_commit_log(commits),
        };

        debug!(
            template_path = %self.template_path.display(),
            commit_count = commits.len(),
            system_prompt_len = prompt.system_prompt.len(),
            user_prompt_len = prompt.user_prompt.len(),
            "Composed generation prompts"
        );

        Ok(prompt)
    }
}

/// Appends the caller's context, verbatim, to the base template.
pub fn render_system_prompt(template: &str, context: &str) -> String {
    format!("{template}{CONTEXT_SEPARATOR}{context}")
}

/// Renders commits as numbered blocks separated by blank lines, in the order given.
pub fn render_commit_log(commits: &[CommitRecord]) -> String {
    commits
        .iter()
        .enumerate()
        .map(|(index, commit)| {
            format!(
                "Commit #{}:\nAuthor: {}\nDate: {}\nMessage: {}\n{COMMIT_DELIMITER}",
                index + 1,
                commit.author,
                commit.date,
                commit.message
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
