// Configuration for folio.
// Loaded from a YAML file; every field has a default so a missing file is fine.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::blog::wordpress::WORDPRESS_API_BASE;
use crate::cache;
use crate::error::{FolioError, Result};
use crate::github::client::{GITHUB_API_BASE, GITHUB_RAW_BASE};
use crate::github::pagination::MAX_PER_PAGE;
use crate::portfolio::overlay::DEFAULT_METADATA_PATH;
use crate::portfolio::{DISPLAY_TOPIC, FEATURED_TOPIC, GeneratorSettings, OverlayLocator};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// GitHub account whose repositories make up the portfolio.
    pub account: String,
    pub api_base: String,
    pub raw_base: String,
    pub display_topic: String,
    pub featured_topic: String,
    /// Overlay file path inside each repository.
    pub metadata_path: String,
    /// Branches searched for the overlay file, in order.
    pub metadata_branches: Vec<String>,
    /// Where `build` writes the generated portfolio.
    pub output: PathBuf,
    /// Response cache directory; the platform cache dir when unset.
    pub cache_dir: Option<PathBuf>,
    pub cache_ttl_secs: u64,
    pub per_page: u32,
    pub wordpress_site: String,
    pub wordpress_base: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            account: "jasonma1127".to_string(),
            api_base: GITHUB_API_BASE.to_string(),
            raw_base: GITHUB_RAW_BASE.to_string(),
            display_topic: DISPLAY_TOPIC.to_string(),
            featured_topic: FEATURED_TOPIC.to_string(),
            metadata_path: DEFAULT_METADATA_PATH.to_string(),
            metadata_branches: vec!["main".to_string(), "master".to_string()],
            output: PathBuf::from("public/portfolios-data.json"),
            cache_dir: None,
            cache_ttl_secs: cache::DEFAULT_TTL.as_secs(),
            per_page: MAX_PER_PAGE,
            wordpress_site: "jasonmablog.wordpress.com".to_string(),
            wordpress_base: WORDPRESS_API_BASE.to_string(),
        }
    }
}

impl Config {
    /// Load from `path`, or from the default location when None.
    ///
    /// An explicit path must exist; the default location may be absent.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| FolioError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Default configuration file path.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "folio").map(|dirs| dirs.config_dir().join("folio.yaml"))
    }

    fn validate(&self) -> Result<()> {
        if self.account.trim().is_empty() {
            return Err(FolioError::Config("account must not be empty".to_string()));
        }
        if self.display_topic.is_empty() {
            return Err(FolioError::Config("display_topic must not be empty".to_string()));
        }
        Ok(())
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// Resolved cache directory, if one can be determined.
    pub fn resolved_cache_dir(&self) -> Option<PathBuf> {
        self.cache_dir.clone().or_else(cache::cache_dir)
    }

    pub fn generator_settings(&self) -> GeneratorSettings {
        GeneratorSettings {
            account: self.account.clone(),
            display_topic: self.display_topic.clone(),
            featured_topic: self.featured_topic.clone(),
            per_page: self.per_page,
            overlay: OverlayLocator::new(self.metadata_path.clone(), self.metadata_branches.clone()),
        }
    }
}
