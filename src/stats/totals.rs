// Account-wide totals.

use serde::{Deserialize, Serialize};

use crate::github::{Repository, UserProfile};

/// Headline numbers shown on the profile page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitHubStats {
    pub total_repos: u64,
    pub total_stars: u64,
    pub total_forks: u64,
    pub followers: u64,
    pub following: u64,
}

impl GitHubStats {
    /// Sum stars and forks over `repos`; counts come from the profile.
    pub fn compute(profile: &UserProfile, repos: &[Repository]) -> Self {
        Self {
            total_repos: profile.public_repos,
            total_stars: repos.iter().map(|r| r.stargazers_count).sum(),
            total_forks: repos.iter().map(|r| r.forks_count).sum(),
            followers: profile.followers,
            following: profile.following,
        }
    }
}
