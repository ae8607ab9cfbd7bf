//! Schema-constrained text generation.

pub mod generator;
pub mod openai;

#[cfg(test)]
pub(crate) mod test_utils;

use std::future::Future;
use std::pin::Pin;

use serde::Serialize;
use serde_json::json;

use crate::error::BlogError;

pub use generator::{BlogGenerator, BlogPostPayload};
pub use openai::OpenAiAiClient;

/// Metadata about an AI client implementation.
#[derive(Clone, Debug)]
pub struct AiClientMetadata {
    /// Service provider name.
    pub provider: String,
    /// Model identifier.
    pub model: String,
}

/// JSON schema the provider must satisfy, in the shape of OpenAI's
/// `response_format.json_schema` object.
#[derive(Clone, Debug, Serialize)]
pub struct ResponseSchema {
    /// Schema name reported to the provider.
    pub name: String,
    /// Whether the provider must adhere to the schema exactly.
    pub strict: bool,
    /// The JSON schema itself.
    pub schema: serde_json::Value,
}

impl ResponseSchema {
    /// Schema for a blog post: an object with a single required `prompt` string.
    pub fn blog_post() -> Self {
        Self {
            name: "blog_post".to_string(),
            strict: true,
            schema: json!({
                "type": "object",
                "properties": {
                    "prompt": {
                        "type": "string",
                        "description": "A markdown styled blogpost based on the commits"
                    }
                },
                "required": ["prompt"],
                "additionalProperties": false
            }),
        }
    }
}

/// What the provider sent back for a structured request.
///
/// Neither field is validated here; interpreting the reply is the
/// generator's job.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StructuredReply {
    /// Raw message content, expected to be JSON matching the schema.
    pub content: Option<String>,
    /// Refusal text, when the provider declined.
    pub refusal: Option<String>,
}

impl StructuredReply {
    /// A reply carrying content only.
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            refusal: None,
        }
    }

    /// A reply carrying a refusal only.
    pub fn refusal(reason: impl Into<String>) -> Self {
        Self {
            content: None,
            refusal: Some(reason.into()),
        }
    }
}

/// Trait for AI service clients that support structured output.
pub trait AiClient: Send + Sync {
    /// Sends a schema-constrained request and returns the unvalidated reply.
    fn send_structured_request<'a>(
        &'a self,
        system_prompt: &'a str,
        user_prompt: &'a str,
        schema: &'a ResponseSchema,
    ) -> Pin<Box<dyn Future<Output = Result<StructuredReply, BlogError>> + Send + 'a>>;

    /// Returns metadata about the AI client implementation.
    fn get_metadata(&self) -> AiClientMetadata;
}
