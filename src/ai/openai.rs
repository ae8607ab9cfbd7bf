//! OpenAI chat-completions client with structured outputs.

use std::future::Future;
use std::pin::Pin;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use url::Url;

use super::{AiClient, AiClientMetadata, ResponseSchema, StructuredReply};
use crate::config::Config;
use crate::error::BlogError;

/// OpenAI API request message.
#[derive(Serialize, Debug)]
struct Message {
    role: String,
    content: String,
}

/// `response_format` member of the request body.
#[derive(Serialize, Debug)]
struct ResponseFormat<'a> {
    #[serde(rename = "type")]
    format_type: &'static str,
    json_schema: &'a ResponseSchema,
}

/// OpenAI API request body.
#[derive(Serialize, Debug)]
struct OpenAiRequest<'a> {
    model: String,
    messages: Vec<Message>,
    response_format: ResponseFormat<'a>,
    stream: bool,
}

/// OpenAI API response choice.
#[derive(Deserialize, Debug)]
struct Choice {
    message: ResponseMessage,
    finish_reason: Option<String>,
}

/// OpenAI API response message.
#[derive(Deserialize, Debug)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    refusal: Option<String>,
}

/// OpenAI API response.
#[derive(Deserialize, Debug)]
struct OpenAiResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    model: Option<String>,
    usage: Option<Usage>,
}

/// OpenAI API usage statistics.
#[derive(Deserialize, Debug)]
#[allow(dead_code)]
struct Usage {
    prompt_tokens: Option<i32>,
    completion_tokens: Option<i32>,
    total_tokens: Option<i32>,
}

/// OpenAI API client using JSON-schema structured outputs.
pub struct OpenAiAiClient {
    /// HTTP client for API requests.
    client: Client,
    /// API key; checked when a request is attempted.
    api_key: Option<String>,
    /// Model identifier.
    model: String,
    /// API root, e.g. `https://api.openai.com`.
    base_url: Url,
}

impl OpenAiAiClient {
    /// Creates a new OpenAI client.
    pub fn new(model: String, api_key: Option<String>, base_url: Url) -> Self {
        Self {
            client: Client::new(),
            api_key,
            model,
            base_url,
        }
    }

    /// Creates a client from the loaded configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.openai_model.clone(),
            config.openai_api_key.clone(),
            config.openai_base_url.clone(),
        )
    }

    /// Builds the full chat completions URL.
    fn get_api_url(&self) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["v1", "chat", "completions"]);
        }

        debug!(base_url = %self.base_url, full_url = %url, "Constructed OpenAI API URL");

        url
    }
}

impl AiClient for OpenAiAiClient {
    fn send_structured_request<'a>(
        &'a self,
        system_prompt: &'a str,
        user_prompt: &'a str,
        schema: &'a ResponseSchema,
    ) -> Pin<Box<dyn Future<Output = Result<StructuredReply, BlogError>> + Send + 'a>> {
        Box::pin(async move {
            let api_key = self
                .api_key
                .as_deref()
                .filter(|key| !key.is_empty())
                .ok_or(BlogError::MissingCredential {
                    variable: "OPENAI_API_KEY",
                })?;

            debug!(
                system_prompt_len = system_prompt.len(),
                user_prompt_len = user_prompt.len(),
                model = %self.model,
                schema = %schema.name,
                "Preparing OpenAI structured request"
            );

            let request = OpenAiRequest {
                model: self.model.clone(),
                messages: vec![
                    Message {
                        role: "system".to_string(),
                        content: system_prompt.to_string(),
                    },
                    Message {
                        role: "user".to_string(),
                        content: user_prompt.to_string(),
                    },
                ],
                response_format: ResponseFormat {
                    format_type: "json_schema",
                    json_schema: schema,
                },
                stream: false,
            };

            let api_url = self.get_api_url();
            info!(url = %api_url, model = %self.model, "Sending request to OpenAI API");

            let response = self
                .client
                .post(api_url)
                .header("Content-Type", "application/json")
                .header("Authorization", format!("Bearer {api_key}"))
                .json(&request)
                .send()
                .await
                .map_err(|e| BlogError::Network {
                    service: "OpenAI",
                    message: e.to_string(),
                })?;

            if !response.status().is_success() {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                return Err(BlogError::GenerationRequestFailed {
                    status: status.as_u16(),
                    body,
                });
            }

            let openai_response: OpenAiResponse =
                response
                    .json()
                    .await
                    .map_err(|e| BlogError::GenerationParseError {
                        detail: format!("response body did not match the chat completion shape: {e}"),
                    })?;

            debug!(
                choice_count = openai_response.choices.len(),
                model = ?openai_response.model,
                usage = ?openai_response.usage,
                "Received OpenAI API response"
            );

            let reply = openai_response
                .choices
                .into_iter()
                .next()
                .map(|choice| {
                    debug!(finish_reason = ?choice.finish_reason, "Extracting first choice");
                    StructuredReply {
                        content: choice.message.content,
                        refusal: choice.message.refusal,
                    }
                })
                .unwrap_or_default();

            Ok(reply)
        })
    }

    fn get_metadata(&self) -> AiClientMetadata {
        AiClientMetadata {
            provider: "OpenAI".to_string(),
            model: self.model.clone(),
        }
    }
}
