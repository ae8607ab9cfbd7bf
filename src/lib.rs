//! # blogcommits
//!
//! Turns a GitHub repository's commit history into a markdown blog post.
//!
//! A request carries a repository URL and free-text context. The
//! [`pipeline::BlogPipeline`] resolves the URL, fetches the commit list,
//! composes a system and user prompt, and asks an OpenAI model for a
//! schema-constrained reply whose `prompt` field holds the post.
//!
//! The pipeline is exposed over HTTP by [`server`] and from the command line
//! by [`cli`].

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod ai;
pub mod cli;
pub mod config;
pub mod error;
pub mod github;
pub mod pipeline;
pub mod prompts;
pub mod server;
pub mod yaml;

pub use crate::cli::Cli;
pub use crate::error::BlogError;
pub use crate::pipeline::{BlogPipeline, BlogPost, BlogRequest};

/// The current version of blogcommits.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
