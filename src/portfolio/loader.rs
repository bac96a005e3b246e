// Loading the generated portfolio file for display.
// Any failure to obtain a non-empty generated list falls back to the bundled projects.

use std::path::PathBuf;
use std::str::FromStr;

use reqwest::Client;
use tracing::{debug, error, warn};

use crate::error::{FolioError, Result};

use super::entry::PortfolioEntry;

const BUNDLED_PORTFOLIO: &str = include_str!("../../data/portfolios-fallback.json");

/// Where the generated portfolio file lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortfolioSource {
    Url(String),
    File(PathBuf),
}

impl PortfolioSource {
    /// `http://` and `https://` locations are URLs, everything else a path.
    pub fn parse(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            PortfolioSource::Url(location.to_string())
        } else {
            PortfolioSource::File(PathBuf::from(location))
        }
    }
}

/// A portfolio list and whether it came from the bundled copy.
#[derive(Debug, Clone)]
pub struct LoadedPortfolio {
    pub entries: Vec<PortfolioEntry>,
    pub from_fallback: bool,
}

/// The projects compiled into the binary.
pub fn bundled_portfolio() -> Vec<PortfolioEntry> {
    serde_json::from_str(BUNDLED_PORTFOLIO).unwrap_or_else(|e| {
        error!(error = %e, "bundled portfolio data is invalid");
        Vec::new()
    })
}

/// Read the generated portfolio, falling back to the bundled projects.
pub async fn load_portfolio(http: &Client, source: &PortfolioSource) -> LoadedPortfolio {
    match fetch_generated(http, source).await {
        Ok(entries) if !entries.is_empty() => {
            debug!(count = entries.len(), "loaded generated portfolio");
            LoadedPortfolio {
                entries,
                from_fallback: false,
            }
        }
        Ok(_) => {
            warn!(?source, "generated portfolio is empty, using bundled projects");
            fallback()
        }
        Err(e) => {
            warn!(?source, error = %e, "generated portfolio unavailable, using bundled projects");
            fallback()
        }
    }
}

fn fallback() -> LoadedPortfolio {
    LoadedPortfolio {
        entries: bundled_portfolio(),
        from_fallback: true,
    }
}

async fn fetch_generated(http: &Client, source: &PortfolioSource) -> Result<Vec<PortfolioEntry>> {
    let text = match source {
        PortfolioSource::Url(url) => {
            let response = http.get(url).send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(FolioError::Http {
                    status: status.as_u16(),
                    body: response.text().await.unwrap_or_default(),
                });
            }
            response.text().await?
        }
        PortfolioSource::File(path) => tokio::fs::read_to_string(path).await?,
    };
    Ok(serde_json::from_str(&text)?)
}

/// Which projects to show.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ProjectFilter {
    #[default]
    All,
    Featured,
    /// Case-insensitive substring match against any technology.
    Technology(String),
}

impl FromStr for ProjectFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "all" | "" => ProjectFilter::All,
            "featured" => ProjectFilter::Featured,
            other => ProjectFilter::Technology(other.to_string()),
        })
    }
}

impl ProjectFilter {
    pub fn matches(&self, entry: &PortfolioEntry) -> bool {
        match self {
            ProjectFilter::All => true,
            ProjectFilter::Featured => entry.featured,
            ProjectFilter::Technology(name) => {
                let needle = name.to_lowercase();
                entry
                    .technologies
                    .iter()
                    .any(|tech| tech.to_lowercase().contains(&needle))
            }
        }
    }

    pub fn apply<'a>(&self, entries: &'a [PortfolioEntry]) -> Vec<&'a PortfolioEntry> {
        entries.iter().filter(|e| self.matches(e)).collect()
    }
}
