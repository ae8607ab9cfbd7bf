//! Error taxonomy for the blog generation pipeline.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the pipeline stages.
///
/// Every stage returns this type unchanged so the HTTP boundary can decide
/// how each kind is surfaced to the caller.
#[derive(Error, Debug)]
pub enum BlogError {
    /// The inbound request was missing a field or was not valid JSON.
    #[error("{0}")]
    InvalidRequest(String),

    /// The repository URL did not match `github.com/<owner>/<name>`.
    #[error("Invalid GitHub repository URL: {url}")]
    InvalidLocator {
        /// The URL as supplied by the caller.
        url: String,
    },

    /// A provider credential is absent from the configuration.
    #[error("{variable} is not set")]
    MissingCredential {
        /// Name of the configuration key that should carry the credential.
        variable: &'static str,
    },

    /// The GitHub API answered with a non-success status.
    #[error("GitHub API error: {status} {status_text}")]
    ProviderError {
        /// Numeric HTTP status.
        status: u16,
        /// Canonical reason phrase for the status.
        status_text: String,
    },

    /// An element of the GitHub commit listing did not have the expected shape.
    #[error("Unexpected commit payload from GitHub at index {index}: {reason}")]
    MalformedCommit {
        /// Zero-based position of the offending element.
        index: usize,
        /// Deserializer message describing the mismatch.
        reason: String,
    },

    /// The system prompt template could not be read.
    #[error("Failed to read system prompt from {}: {source}", path.display())]
    TemplateLoadError {
        /// Location the template was read from.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The generation provider answered with a non-success status.
    #[error("OpenAI API request failed: HTTP {status}: {body}")]
    GenerationRequestFailed {
        /// Numeric HTTP status.
        status: u16,
        /// Response body, kept for diagnostics.
        body: String,
    },

    /// The generation provider explicitly declined the request.
    #[error("OpenAI refused the request: {reason}")]
    GenerationRefused {
        /// Refusal text supplied by the provider.
        reason: String,
    },

    /// The generation output did not satisfy the response schema.
    #[error("Failed to parse OpenAI response: {detail}")]
    GenerationParseError {
        /// What was wrong with the payload.
        detail: String,
    },

    /// Transport-level failure talking to an upstream service.
    #[error("Network error contacting {service}: {message}")]
    Network {
        /// Which upstream was being contacted.
        service: &'static str,
        /// Transport error message.
        message: String,
    },
}

impl BlogError {
    /// Stable machine-readable code for this error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidRequest(_) => "invalid_request",
            Self::InvalidLocator { .. } => "invalid_locator",
            Self::MissingCredential { .. } => "missing_credential",
            Self::ProviderError { .. } => "provider_error",
            Self::MalformedCommit { .. } => "malformed_commit",
            Self::TemplateLoadError { .. } => "template_load_error",
            Self::GenerationRequestFailed { .. } => "generation_request_failed",
            Self::GenerationRefused { .. } => "generation_refused",
            Self::GenerationParseError { .. } => "generation_parse_error",
            Self::Network { .. } => "network_error",
        }
    }

    /// Returns true for errors caused by the caller's input rather than the
    /// service or its upstreams.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidRequest(_) | Self::InvalidLocator { .. })
    }
}
