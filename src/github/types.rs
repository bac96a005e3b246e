// GitHub API response types.
// Defines structs for deserializing GitHub REST API responses.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Repository owner as embedded in a repository listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub id: u64,
    pub login: String,
}

/// GitHub repository as returned by the listing endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    pub owner: Owner,
    pub html_url: String,
    pub description: Option<String>,
    pub homepage: Option<String>,
    #[serde(default)]
    pub topics: Vec<String>,
    pub language: Option<String>,
    #[serde(default)]
    pub fork: bool,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    pub updated_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Repository {
    /// Whether the repository carries the given topic.
    pub fn has_topic(&self, topic: &str) -> bool {
        self.topics.iter().any(|t| t == topic)
    }
}

/// Subset of the user profile the site displays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub public_repos: u64,
    #[serde(default)]
    pub followers: u64,
    #[serde(default)]
    pub following: u64,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Per-repository language breakdown: language name to byte count.
pub type LanguageBytes = BTreeMap<String, u64>;

/// Rate limit information from response headers.
#[derive(Debug, Clone, Default)]
pub struct RateLimit {
    pub limit: u64,
    /// None until a response carrying the header has been seen.
    pub remaining: Option<u64>,
    pub reset: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_defaults_missing_fields() {
        let json = r#"{
            "id": 7,
            "name": "site",
            "full_name": "someone/site",
            "owner": { "id": 1, "login": "someone" },
            "html_url": "https://github.com/someone/site",
            "description": null,
            "homepage": null,
            "language": null,
            "updated_at": "2024-05-01T10:00:00Z",
            "created_at": "2023-01-01T00:00:00Z"
        }"#;

        let repo: Repository = serde_json::from_str(json).unwrap();
        assert!(repo.topics.is_empty());
        assert!(!repo.fork);
        assert_eq!(repo.stargazers_count, 0);
        assert!(!repo.has_topic("portfolio-display"));
    }

    #[test]
    fn test_profile_ignores_extra_fields() {
        let json = r#"{
            "login": "someone",
            "name": "Some One",
            "bio": null,
            "avatar_url": "https://example.com/a.png",
            "public_repos": 12,
            "followers": 3,
            "following": 4,
            "site_admin": false,
            "created_at": "2020-01-01T00:00:00Z",
            "updated_at": "2024-01-01T00:00:00Z"
        }"#;

        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.name.as_deref(), Some("Some One"));
        assert_eq!(profile.public_repos, 12);
        assert_eq!(profile.following, 4);
    }
}
