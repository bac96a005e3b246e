// folio: data plumbing for a personal portfolio site.
// Build-time portfolio generation from GitHub, a cached GitHub data client, and the blog feed.

pub mod blog;
pub mod cache;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod github;
pub mod logging;
pub mod portfolio;
pub mod stats;

#[cfg(test)]
mod test_support;

pub use config::Config;
pub use dashboard::{GitHubData, GitHubSummary};
pub use error::{FolioError, Result};
