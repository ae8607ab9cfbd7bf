//! GitHub repository access.

pub mod commits;
pub mod locator;

pub use commits::{CommitRecord, GitHubClient};
pub use locator::RepoLocator;
