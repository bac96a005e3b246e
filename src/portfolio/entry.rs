// Portfolio entry and overlay metadata types.
// Entries are what the site's project grid renders; overlays are hand-curated additions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One project card in the portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioEntry {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub image: Option<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
    pub github_url: Option<String>,
    pub live_url: Option<String>,
    pub blog_post_url: Option<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub stars: u64,
    pub updated_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Optional per-repository file with curated fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayMetadata {
    pub custom_description: Option<String>,
    pub image: Option<String>,
    pub blog_post_url: Option<String>,
}
