// GitHub API module.
// Provides the HTTP client, typed endpoints, pagination, and response types.

pub mod client;
pub mod endpoints;
pub mod pagination;
pub mod types;

pub use client::GitHubClient;
pub use types::*;
