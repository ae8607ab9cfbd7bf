//! Process configuration.
//!
//! Every component receives what it needs from a [`Config`] at construction
//! time; nothing below this module reads the environment directly.

pub mod settings;

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;
use url::Url;

pub use settings::Settings;

/// Default location of the system prompt template, relative to the working directory.
pub const DEFAULT_SYSTEM_PROMPT_PATH: &str = "prompts/blog.txt";

/// Default GitHub REST API root.
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

/// Default OpenAI API root.
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";

/// Default model; must support strict JSON-schema structured outputs.
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-2024-08-06";

/// Default listener host.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default listener port.
pub const DEFAULT_PORT: u16 = 3000;

/// Effective configuration for the service and CLI.
#[derive(Debug, Clone)]
pub struct Config {
    /// GitHub token sent as a bearer credential.
    pub github_token: Option<String>,
    /// OpenAI API key.
    pub openai_api_key: Option<String>,
    /// Path to the base system prompt template.
    pub system_prompt_path: PathBuf,
    /// GitHub REST API root.
    pub github_api_url: Url,
    /// OpenAI-compatible API root.
    pub openai_base_url: Url,
    /// Model used for generation.
    pub openai_model: String,
    /// Host the HTTP server binds to.
    pub host: String,
    /// Port the HTTP server binds to.
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            github_token: None,
            openai_api_key: None,
            system_prompt_path: PathBuf::from(DEFAULT_SYSTEM_PROMPT_PATH),
            github_api_url: parse_default_url(DEFAULT_GITHUB_API_URL),
            openai_base_url: parse_default_url(DEFAULT_OPENAI_BASE_URL),
            openai_model: DEFAULT_OPENAI_MODEL.to_string(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

#[allow(clippy::expect_used)] // Compile-time constant URL
fn parse_default_url(url: &str) -> Url {
    Url::parse(url).expect("default URL is valid")
}

impl Config {
    /// Loads configuration from the environment with fallback to the settings file.
    pub fn load() -> Result<Self> {
        let settings = Settings::load()?;
        Self::from_settings(&settings)
    }

    /// Loads configuration from the environment with fallback to `settings`.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::from_lookup(|key| settings.get_env_var(key))
    }

    /// Builds configuration from an arbitrary key lookup.
    ///
    /// Missing credentials are not an error here; the stage that needs a
    /// credential reports its absence when it runs.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.is_empty());
        let defaults = Self::default();

        let github_api_url = match get("GITHUB_API_URL") {
            Some(raw) => parse_base_url("GITHUB_API_URL", &raw)?,
            None => defaults.github_api_url,
        };

        let openai_base_url = match get("OPENAI_BASE_URL") {
            Some(raw) => parse_base_url("OPENAI_BASE_URL", &raw)?,
            None => defaults.openai_base_url,
        };

        let port = match get("PORT") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("Invalid value for PORT: {raw}"))?,
            None => defaults.port,
        };

        Ok(Self {
            github_token: get("GITHUB_TOKEN").or_else(|| get("GH_TOKEN")),
            openai_api_key: get("OPENAI_API_KEY"),
            system_prompt_path: get("SYSTEM_PROMPT_PATH")
                .map_or(defaults.system_prompt_path, PathBuf::from),
            github_api_url,
            openai_base_url,
            openai_model: get("OPENAI_MODEL").unwrap_or(defaults.openai_model),
            host: get("HOST").unwrap_or(defaults.host),
            port,
        })
    }

    /// Returns a view of the configuration that is safe to print.
    pub fn redacted(&self) -> RedactedConfig {
        RedactedConfig {
            github_token: mask_secret(self.github_token.as_deref()),
            openai_api_key: mask_secret(self.openai_api_key.as_deref()),
            system_prompt_path: self.system_prompt_path.display().to_string(),
            github_api_url: self.github_api_url.to_string(),
            openai_base_url: self.openai_base_url.to_string(),
            openai_model: self.openai_model.clone(),
            listen: format!("{}:{}", self.host, self.port),
        }
    }
}

/// Parses an API root, rejecting URLs that cannot carry a path.
fn parse_base_url(key: &str, raw: &str) -> Result<Url> {
    let url = Url::parse(raw).with_context(|| format!("Invalid value for {key}: {raw}"))?;
    if url.cannot_be_a_base() {
        anyhow::bail!("Invalid value for {key}: {raw} cannot be used as an API root");
    }
    Ok(url)
}

/// Printable configuration with credentials masked.
#[derive(Debug, Serialize)]
pub struct RedactedConfig {
    /// Masked GitHub token.
    pub github_token: String,
    /// Masked OpenAI key.
    pub openai_api_key: String,
    /// Template path.
    pub system_prompt_path: String,
    /// GitHub API root.
    pub github_api_url: String,
    /// OpenAI API root.
    pub openai_base_url: String,
    /// Generation model.
    pub openai_model: String,
    /// Listener address.
    pub listen: String,
}

/// Masks all but the last four characters of a secret.
fn mask_secret(secret: Option<&str>) -> String {
    match secret {
        None => "<not set>".to_string(),
        Some(value) => {
            let tail: String = value
                .chars()
                .rev()
                .take(4)
                .collect::<Vec<_>>()
                .into_iter()
                .rev()
                .collect();
            format!("****{tail}")
        }
    }
}
