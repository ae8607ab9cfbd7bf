//! HTTP surface: `POST /api/repo`, `GET /health`, JSON 404 for everything else.

pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::info;

use crate::pipeline::BlogPipeline;
pub use router::build_router;
pub use state::{AppState, SharedState};

/// Binds `host:port` and serves until the process is stopped.
pub async fn serve(pipeline: BlogPipeline, host: &str, port: u16) -> Result<()> {
    let metadata = pipeline.generator().metadata();
    let template = pipeline.composer().template_path().display().to_string();
    let state = Arc::new(AppState { pipeline });
    let app = build_router(state);

    let addr = format!("{host}:{port}");
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!(
        addr = %listener.local_addr()?,
        provider = %metadata.provider,
        model = %metadata.model,
        template = %template,
        "Server running"
    );

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use axum::Router;
    use serde_json::{json, Value};
    use tempfile::TempDir;
    use tower::ServiceExt;
    use url::Url;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::ai::test_utils::ConfigurableMockAiClient;
    use crate::ai::{BlogGenerator, StructuredReply};
    use crate::error::BlogError;
    use crate::github::GitHubClient;
    use crate::prompts::PromptComposer;

    fn app(
        github_base: &str,
        template: &std::path::Path,
        replies: Vec<Result<StructuredReply, BlogError>>,
    ) -> Router {
        let pipeline = BlogPipeline::new(
            GitHubClient::new(Some("ghp_test".to_string()), Url::parse(github_base).unwrap()),
            PromptComposer::new(template),
            BlogGenerator::new(Box::new(ConfigurableMockAiClient::new(replies))),
        );
        build_router(Arc::new(AppState { pipeline }))
    }

    fn offline_app() -> Router {
        app(
            "http://127.0.0.1:9",
            std::path::Path::new("/nonexistent/blog.txt"),
            vec![],
        )
    }

    fn post_json(body: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/api/repo")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let response = offline_app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "ok");
        assert!(body["timestamp"].as_str().is_some_and(|t| !t.is_empty()));
    }

    #[tokio::test]
    async fn unknown_route_is_json_404() {
        let response = offline_app()
            .oneshot(Request::get("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(response).await, json!({ "error": "Not found" }));
    }

    #[tokio::test]
    async fn missing_url_is_rejected() {
        let response = offline_app()
            .oneshot(post_json(r#"{"context":"c"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(response).await["error"],
            "Repository URL is required"
        );
    }

    #[tokio::test]
    async fn missing_context_is_rejected() {
        let response = offline_app()
            .oneshot(post_json(r#"{"url":"https://github.com/a/b"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"], "Context is required");
    }

    #[tokio::test]
    async fn empty_body_is_treated_as_empty_object() {
        let request = Request::post("/api/repo").body(Body::empty()).unwrap();
        let response = offline_app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(response).await["error"],
            "Repository URL is required"
        );
    }

    #[tokio::test]
    async fn malformed_json_is_rejected() {
        let response = offline_app().oneshot(post_json("{not json")).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(json_body(response).await["error"]
            .as_str()
            .unwrap()
            .starts_with("Invalid JSON body"));
    }

    #[tokio::test]
    async fn non_github_url_is_rejected() {
        let response = offline_app()
            .oneshot(post_json(
                r#"{"url":"https://example.com/a/b","context":"c"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"], "Invalid GitHub repository URL: https://example.com/a/b");
        assert_eq!(body["code"], "invalid_locator");
    }

    #[tokio::test]
    async fn cors_preflight_allows_any_origin() {
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/repo")
            .header(header::ORIGIN, "http://localhost:5173")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
            .body(Body::empty())
            .unwrap();
        let response = offline_app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "*"
        );
    }

    #[tokio::test]
    async fn generates_blog_post() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/acme/widgets/commits"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "commit": { "message": "fix", "author": { "name": "Ann", "date": "2024-01-01T00:00:00Z" } } },
                { "commit": { "message": "feat", "author": { "name": "Bo", "date": "2024-01-02T00:00:00Z" } } },
            ])))
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let template = dir.path().join("blog.txt");
        std::fs::write(&template, "Write a blog post.").unwrap();

        let app = app(
            &server.uri(),
            &template,
            vec![Ok(StructuredReply::content(r##"{"prompt":"# Release notes"}"##))],
        );

        let response = app
            .oneshot(post_json(
                r#"{"url":"https://github.com/acme/widgets","context":"Focus on reliability"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            json_body(response).await,
            json!({ "success": true, "blogPost": "# Release notes", "commitsProcessed": 2 })
        );
    }

    #[tokio::test]
    async fn provider_failure_is_500() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let response = app(&server.uri(), std::path::Path::new("/nonexistent"), vec![])
            .oneshot(post_json(
                r#"{"url":"https://github.com/acme/widgets","context":"c"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json_body(response).await;
        assert_eq!(body["error"], "GitHub API error: 404 Not Found");
        assert_eq!(body["code"], "provider_error");
    }
}
