//! Shared application state for the HTTP server.

use std::sync::Arc;

use crate::pipeline::BlogPipeline;

/// State accessible by all handlers via axum's `State` extractor.
pub struct AppState {
    /// The blog generation pipeline.
    pub pipeline: BlogPipeline,
}

/// Reference-counted handle to [`AppState`].
pub type SharedState = Arc<AppState>;
