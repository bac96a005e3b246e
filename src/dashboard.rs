// Cached GitHub data client for the profile pages.
// Each read is served from the response cache when fresh and refetched otherwise.

use std::future::Future;

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::{debug, info, warn};

use crate::cache::{CacheKey, KeyValueStore, ResponseCache};
use crate::error::{FolioError, Result};
use crate::github::pagination::MAX_PER_PAGE;
use crate::github::{GitHubClient, Repository, UserProfile};
use crate::stats::{GitHubStats, LanguageStat, aggregate_languages};

/// Everything the profile page renders, fetched in one call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubSummary {
    pub profile: UserProfile,
    pub stats: GitHubStats,
    pub languages: Vec<LanguageStat>,
}

/// Read-through cache over the GitHub endpoints for a single account.
pub struct GitHubData<S> {
    client: GitHubClient,
    cache: ResponseCache<S>,
    account: String,
    per_page: u32,
}

impl<S: KeyValueStore> GitHubData<S> {
    pub fn new(client: GitHubClient, cache: ResponseCache<S>, account: impl Into<String>) -> Self {
        Self {
            client,
            cache,
            account: account.into(),
            per_page: MAX_PER_PAGE,
        }
    }

    /// Override the listing page size.
    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page;
        self
    }

    pub fn cache(&self) -> &ResponseCache<S> {
        &self.cache
    }

    /// Serve `key` from cache, or run `fetch` and cache its result.
    ///
    /// Fetch errors propagate and leave the cache untouched.
    async fn cached<T, F, Fut>(&self, key: CacheKey, fetch: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let key = key.for_account(&self.account);
        if let Some(hit) = self.cache.get::<T>(&key) {
            return Ok(hit);
        }

        let value = fetch().await?;
        self.cache.put(&key, &value);
        Ok(value)
    }

    /// The account's public profile.
    pub async fn profile(&self) -> Result<UserProfile> {
        self.cached(CacheKey::Profile, || {
            self.client.get_user_profile(&self.account)
        })
        .await
    }

    /// Every public repository of the account.
    pub async fn repos(&self) -> Result<Vec<Repository>> {
        self.cached(CacheKey::Repos, || async {
            let repos = self.client.list_all_repos(&self.account, self.per_page).await?;
            info!(account = %self.account, count = repos.len(), "fetched repositories");
            Ok::<_, FolioError>(repos)
        })
        .await
    }

    /// Language usage across all non-fork repositories.
    ///
    /// Repositories are queried one after another. A repository whose
    /// language breakdown cannot be fetched is left out of the totals.
    pub async fn language_stats(&self) -> Result<Vec<LanguageStat>> {
        self.cached(CacheKey::Languages, || async {
            let repos = self.repos().await?;
            let mut breakdowns = Vec::new();

            for repo in repos.iter().filter(|r| !r.fork) {
                match self.client.get_repo_languages(&repo.full_name).await {
                    Ok(languages) => breakdowns.push(languages),
                    Err(e) => {
                        warn!(repo = %repo.name, error = %e, "skipping language breakdown");
                    }
                }
            }

            let stats = aggregate_languages(&breakdowns);
            debug!(languages = stats.len(), "aggregated language usage");
            Ok::<_, FolioError>(stats)
        })
        .await
    }

    /// Star, fork, repository and follower totals.
    pub async fn stats(&self) -> Result<GitHubStats> {
        self.cached(CacheKey::Stats, || async {
            let (profile, repos) = futures::try_join!(self.profile(), self.repos())?;
            Ok::<_, FolioError>(GitHubStats::compute(&profile, &repos))
        })
        .await
    }

    /// Profile, totals and language usage, fetched concurrently.
    pub async fn summary(&self) -> Result<GitHubSummary> {
        let (profile, stats, languages) =
            futures::try_join!(self.profile(), self.stats(), self.language_stats())?;
        Ok(GitHubSummary {
            profile,
            stats,
            languages,
        })
    }

    /// Drop every cached category for the account.
    pub fn clear_cache(&self) {
        for key in CacheKey::ALL {
            self.cache.evict(&key.for_account(&self.account));
        }
        info!(account = %self.account, "cleared GitHub cache");
    }
}
