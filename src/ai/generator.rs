//! Blog post generation on top of an [`AiClient`].

use serde::Deserialize;
use tracing::{info, warn};

use super::{AiClient, AiClientMetadata, OpenAiAiClient, ResponseSchema, StructuredReply};
use crate::config::Config;
use crate::error::BlogError;

/// The object the provider must return.
#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct BlogPostPayload {
    /// Markdown body of the blog post.
    pub prompt: String,
}

/// Generates blog post markdown through a schema-constrained request.
pub struct BlogGenerator {
    client: Box<dyn AiClient>,
    schema: ResponseSchema,
}

impl BlogGenerator {
    /// Wraps an AI client.
    pub fn new(client: Box<dyn AiClient>) -> Self {
        Self {
            client,
            schema: ResponseSchema::blog_post(),
        }
    }

    /// Creates a generator backed by the OpenAI client described in `config`.
    pub fn from_config(config: &Config) -> Self {
        Self::new(Box::new(OpenAiAiClient::from_config(config)))
    }

    /// Metadata of the underlying client.
    pub fn metadata(&self) -> AiClientMetadata {
        self.client.get_metadata()
    }

    /// Sends both prompts and returns the generated markdown.
    pub async fn generate(&self, system_prompt: &str, user_prompt: &str) -> Result<String, BlogError> {
        let metadata = self.client.get_metadata();
        info!(provider = %metadata.provider, model = %metadata.model, "Generating blog post");

        let reply = self
            .client
            .send_structured_request(system_prompt, user_prompt, &self.schema)
            .await?;

        interpret_reply(reply)
    }
}

/// Maps a provider reply to the blog text, a refusal, or a parse failure.
///
/// A schema-valid payload wins over everything else; a refusal is only
/// reported when no valid payload is present.
fn interpret_reply(reply: StructuredReply) -> Result<String, BlogError> {
    let parse_failure = match reply.content.as_deref() {
        Some(content) => match serde_json::from_str::<BlogPostPayload>(content) {
            Ok(payload) => return Ok(payload.prompt),
            Err(e) => format!("content did not match the blog_post schema: {e}"),
        },
        None => "response carried no structured content".to_string(),
    };

    if let Some(reason) = reply.refusal {
        warn!(%reason, "Generation provider refused the request");
        return Err(BlogError::GenerationRefused { reason });
    }

    Err(BlogError::GenerationParseError {
        detail: parse_failure,
    })
}
