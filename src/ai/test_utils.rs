//! Shared test utilities for the `ai` module.

use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use crate::ai::{AiClient, AiClientMetadata, ResponseSchema, StructuredReply};
use crate::error::BlogError;

type ReplyQueue = Arc<Mutex<VecDeque<Result<StructuredReply, BlogError>>>>;

/// Mock AI client with a pre-programmed queue of replies.
///
/// Replies are returned in FIFO order. When the queue is exhausted,
/// subsequent calls return a [`BlogError::Network`] error.
///
/// Every call records the `(system_prompt, user_prompt)` pair. Use
/// [`prompt_handle`](Self::prompt_handle) to read them after the client has
/// been moved into a [`BlogGenerator`](super::BlogGenerator).
pub(crate) struct ConfigurableMockAiClient {
    replies: ReplyQueue,
    metadata: AiClientMetadata,
    recorded_prompts: Arc<Mutex<Vec<(String, String)>>>,
}

impl ConfigurableMockAiClient {
    /// Creates a new mock client that will return the given replies in order.
    pub(crate) fn new(replies: Vec<Result<StructuredReply, BlogError>>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(VecDeque::from(replies))),
            metadata: AiClientMetadata {
                provider: "Mock".to_string(),
                model: "mock-model".to_string(),
            },
            recorded_prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Returns a handle for inspecting the reply queue after the mock has
    /// been moved.
    pub(crate) fn response_handle(&self) -> ResponseQueueHandle {
        ResponseQueueHandle {
            replies: self.replies.clone(),
        }
    }

    /// Returns a handle for inspecting which prompts were sent.
    pub(crate) fn prompt_handle(&self) -> PromptRecordHandle {
        PromptRecordHandle {
            recorded_prompts: self.recorded_prompts.clone(),
        }
    }
}

/// Shared handle to a mock client's reply queue.
pub(crate) struct ResponseQueueHandle {
    replies: ReplyQueue,
}

impl ResponseQueueHandle {
    /// Returns the number of unconsumed replies remaining in the queue.
    pub(crate) fn remaining(&self) -> usize {
        self.replies.lock().unwrap().len()
    }
}

/// Shared handle to a mock client's recorded prompts.
pub(crate) struct PromptRecordHandle {
    recorded_prompts: Arc<Mutex<Vec<(String, String)>>>,
}

impl PromptRecordHandle {
    /// Returns all recorded `(system_prompt, user_prompt)` pairs.
    pub(crate) fn prompts(&self) -> Vec<(String, String)> {
        self.recorded_prompts.lock().unwrap().clone()
    }

    /// Returns the number of AI requests that were made.
    pub(crate) fn request_count(&self) -> usize {
        self.recorded_prompts.lock().unwrap().len()
    }
}

impl AiClient for ConfigurableMockAiClient {
    fn send_structured_request<'a>(
        &'a self,
        system_prompt: &'a str,
        user_prompt: &'a str,
        _schema: &'a ResponseSchema,
    ) -> Pin<Box<dyn Future<Output = Result<StructuredReply, BlogError>> + Send + 'a>> {
        let replies = self.replies.clone();
        let recorded = self.recorded_prompts.clone();
        let sys = system_prompt.to_string();
        let usr = user_prompt.to_string();
        Box::pin(async move {
            recorded.lock().unwrap().push((sys, usr));
            replies.lock().unwrap().pop_front().unwrap_or_else(|| {
                Err(BlogError::Network {
                    service: "mock",
                    message: "no more mock responses".to_string(),
                })
            })
        })
    }

    fn get_metadata(&self) -> AiClientMetadata {
        self.metadata.clone()
    }
}
