//! Route handlers.

use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::error::ApiError;
use super::state::SharedState;
use crate::error::BlogError;
use crate::pipeline::BlogRequest;

/// Body of `POST /api/repo`.
#[derive(Debug, Default, Deserialize)]
pub struct GenerateRequest {
    url: Option<String>,
    context: Option<String>,
}

/// Successful response of `POST /api/repo`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    success: bool,
    blog_post: String,
    commits_processed: usize,
}

/// Response of `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: &'static str,
    timestamp: String,
}

impl GenerateRequest {
    /// Checks required fields; empty strings count as missing.
    fn validate(self) -> Result<BlogRequest, BlogError> {
        let repository_url = self
            .url
            .filter(|url| !url.is_empty())
            .ok_or_else(|| BlogError::InvalidRequest("Repository URL is required".to_string()))?;
        let context = self
            .context
            .filter(|context| !context.is_empty())
            .ok_or_else(|| BlogError::InvalidRequest("Context is required".to_string()))?;

        Ok(BlogRequest {
            repository_url,
            context,
        })
    }
}

/// POST /api/repo
///
/// Generates a blog post from the repository's commit history. An empty
/// body is treated as `{}`.
pub async fn generate_blog_post(
    State(state): State<SharedState>,
    body: Bytes,
) -> Result<Json<GenerateResponse>, ApiError> {
    let request: GenerateRequest = if body.is_empty() {
        GenerateRequest::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| BlogError::InvalidRequest(format!("Invalid JSON body: {e}")))?
    };
    let request = request.validate()?;

    info!(url = %request.repository_url, "Generating blog post for repository");
    let post = state.pipeline.run(&request).await?;

    Ok(Json(GenerateResponse {
        success: true,
        blog_post: post.text,
        commits_processed: post.commits_processed,
    }))
}

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        timestamp: Utc::now().to_rfc3339(),
    })
}

/// Fallback for unknown routes.
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}
