// Build-time portfolio generator.
// Lists the account's repositories, keeps the marked ones, enriches and ranks them,
// and writes the static data file the site loads.

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use futures::future::join_all;
use tracing::{error, info, warn};

use crate::cache::write_atomic;
use crate::error::{FolioError, Result};
use crate::github::pagination::MAX_PER_PAGE;
use crate::github::{GitHubClient, Repository};

use super::entry::{OverlayMetadata, PortfolioEntry};
use super::overlay::OverlayLocator;
use super::technologies::build_technologies;

pub const DISPLAY_TOPIC: &str = "portfolio-display";
pub const FEATURED_TOPIC: &str = "portfolio-featured";

/// Generator settings.
#[derive(Debug, Clone)]
pub struct GeneratorSettings {
    pub account: String,
    pub display_topic: String,
    pub featured_topic: String,
    pub per_page: u32,
    pub overlay: OverlayLocator,
}

impl GeneratorSettings {
    pub fn new(account: impl Into<String>) -> Self {
        Self {
            account: account.into(),
            display_topic: DISPLAY_TOPIC.to_string(),
            featured_topic: FEATURED_TOPIC.to_string(),
            per_page: MAX_PER_PAGE,
            overlay: OverlayLocator::default(),
        }
    }
}

/// Result of a build run that got past the repository listing.
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub entries: Vec<PortfolioEntry>,
    pub output: PathBuf,
    /// False when the output file could not be written.
    pub written: bool,
}

impl BuildReport {
    pub fn featured_count(&self) -> usize {
        self.entries.iter().filter(|e| e.featured).count()
    }
}

pub struct PortfolioGenerator<'a> {
    client: &'a GitHubClient,
    settings: GeneratorSettings,
}

impl<'a> PortfolioGenerator<'a> {
    pub fn new(client: &'a GitHubClient, settings: GeneratorSettings) -> Self {
        Self { client, settings }
    }

    /// Produce the ranked portfolio entries.
    ///
    /// Fails only if the repository listing is unavailable or empty; overlay
    /// lookups degrade to "no overlay".
    pub async fn generate(&self) -> Result<Vec<PortfolioEntry>> {
        let account = &self.settings.account;
        info!(%account, "fetching repositories");

        let repos = self
            .client
            .list_all_repos(account, self.settings.per_page)
            .await?;
        if repos.is_empty() {
            return Err(FolioError::NoRepositories(account.clone()));
        }
        info!(count = repos.len(), "found repositories");

        let selected = select_display(&repos, &self.settings.display_topic);
        info!(
            count = selected.len(),
            topic = %self.settings.display_topic,
            "selected portfolio projects"
        );
        if selected.is_empty() {
            warn!(
                topic = %self.settings.display_topic,
                "no repositories carry the display topic; writing an empty portfolio"
            );
        }

        let overlays = join_all(selected.iter().map(|repo| {
            self.settings
                .overlay
                .fetch(self.client, &repo.owner.login, &repo.name)
        }))
        .await;

        let mut entries: Vec<PortfolioEntry> = selected
            .into_iter()
            .zip(overlays)
            .map(|(repo, overlay)| self.to_entry(repo, overlay.as_ref()))
            .collect();
        sort_entries(&mut entries);

        Ok(entries)
    }

    /// Generate and write the output file.
    ///
    /// A write failure is logged and reported through `BuildReport::written`
    /// so the surrounding build keeps going with whatever copy it already has.
    pub async fn build(&self, output: &Path) -> Result<BuildReport> {
        let entries = self.generate().await?;

        let written = match write_portfolio(output, &entries) {
            Ok(()) => true,
            Err(e) => {
                error!(output = %output.display(), error = %e, "failed to write portfolio data");
                false
            }
        };

        let report = BuildReport {
            entries,
            output: output.to_path_buf(),
            written,
        };
        if report.written {
            log_summary(&report);
        }
        Ok(report)
    }

    /// Transform a repository plus optional overlay into a portfolio entry.
    pub fn to_entry(&self, repo: &Repository, overlay: Option<&OverlayMetadata>) -> PortfolioEntry {
        let control = [
            self.settings.display_topic.as_str(),
            self.settings.featured_topic.as_str(),
        ];

        let description = overlay
            .and_then(|o| non_empty(o.custom_description.as_deref()))
            .or_else(|| non_empty(repo.description.as_deref()))
            .unwrap_or_default()
            .to_string();

        PortfolioEntry {
            id: repo.id,
            title: repo.name.clone(),
            description,
            image: overlay.and_then(|o| non_empty(o.image.as_deref())).map(String::from),
            technologies: build_technologies(&repo.topics, repo.language.as_deref(), &control),
            github_url: Some(repo.html_url.clone()),
            live_url: non_empty(repo.homepage.as_deref()).map(String::from),
            blog_post_url: overlay
                .and_then(|o| non_empty(o.blog_post_url.as_deref()))
                .map(String::from),
            featured: repo.has_topic(&self.settings.featured_topic),
            stars: repo.stargazers_count,
            updated_at: Some(repo.updated_at),
            created_at: Some(repo.created_at),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Repositories whose topics include `display_topic`.
pub fn select_display<'r>(repos: &'r [Repository], display_topic: &str) -> Vec<&'r Repository> {
    repos.iter().filter(|r| r.has_topic(display_topic)).collect()
}

/// Featured first, then most stars, then most recently updated.
pub fn compare_entries(a: &PortfolioEntry, b: &PortfolioEntry) -> Ordering {
    b.featured
        .cmp(&a.featured)
        .then_with(|| b.stars.cmp(&a.stars))
        .then_with(|| b.updated_at.cmp(&a.updated_at))
}

pub fn sort_entries(entries: &mut [PortfolioEntry]) {
    entries.sort_by(compare_entries);
}

/// Write entries as pretty JSON, replacing the file atomically.
pub fn write_portfolio(path: &Path, entries: &[PortfolioEntry]) -> Result<()> {
    let json = serde_json::to_string_pretty(entries)?;
    write_atomic(path, json.as_bytes())
}

fn log_summary(report: &BuildReport) {
    info!(
        output = %report.output.display(),
        projects = report.entries.len(),
        featured = report.featured_count(),
        "generated portfolio data"
    );
    for (index, entry) in report.entries.iter().enumerate() {
        let badge = if entry.featured { "*" } else { " " };
        info!(
            "{} {}. {} ({})",
            badge,
            index + 1,
            entry.title,
            entry.technologies.join(", ")
        );
    }
}
