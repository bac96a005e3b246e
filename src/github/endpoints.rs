// GitHub API endpoint functions.
// Provides typed methods for the user, repository listing, languages, and raw file endpoints.

use serde::de::DeserializeOwned;

use crate::error::Result;

use super::client::GitHubClient;
use super::pagination::{clamp_per_page, collect_pages};
use super::types::{LanguageBytes, Repository, UserProfile};

impl GitHubClient {
    /// Get a user's public profile.
    pub async fn get_user_profile(&self, user: &str) -> Result<UserProfile> {
        let response = self.get(&format!("/users/{}", user)).await?;
        let profile: UserProfile = response.json().await?;
        Ok(profile)
    }

    /// Get one page of a user's public repositories.
    pub async fn get_user_repos(
        &self,
        user: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<Repository>> {
        let params = [
            ("per_page", per_page.to_string()),
            ("page", page.to_string()),
        ];
        let response = self
            .get_with_params(&format!("/users/{}/repos", user), &params)
            .await?;
        let repos: Vec<Repository> = response.json().await?;
        Ok(repos)
    }

    /// Get every public repository of a user, walking all pages.
    ///
    /// This is the single listing implementation used by both the portfolio
    /// generator and the cached data client.
    pub async fn list_all_repos(&self, user: &str, per_page: u32) -> Result<Vec<Repository>> {
        let per_page = clamp_per_page(per_page);
        collect_pages(per_page, |page| self.get_user_repos(user, page, per_page)).await
    }

    /// Get the language byte breakdown for a repository (`owner/name`).
    pub async fn get_repo_languages(&self, full_name: &str) -> Result<LanguageBytes> {
        let response = self.get(&format!("/repos/{}/languages", full_name)).await?;
        let languages: LanguageBytes = response.json().await?;
        Ok(languages)
    }

    /// Fetch and decode a JSON file from a repository branch via raw content hosting.
    pub async fn get_raw_json<T: DeserializeOwned>(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
        path: &str,
    ) -> Result<T> {
        let url = format!(
            "{}/{}/{}/{}/{}",
            self.raw_base(),
            owner,
            repo,
            branch,
            path.trim_start_matches('/')
        );
        let response = self.get_url(&url).await?;
        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::repo_json;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn page_of(start: u64, count: u64) -> serde_json::Value {
        json!((start..start + count)
            .map(|i| repo_json(i, &format!("repo-{i}")))
            .collect::<Vec<_>>())
    }

    #[tokio::test]
    async fn test_list_all_repos_stops_on_short_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/someone/repos"))
            .and(query_param("page", "1"))
            .and(query_param("per_page", "100"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_of(0, 100)))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/users/someone/repos"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_of(100, 42)))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/users/someone/repos"))
            .and(query_param("page", "3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(0)
            .mount(&server)
            .await;

        let client = GitHubClient::with_base_urls(None, &server.uri(), &server.uri()).unwrap();
        let repos = client.list_all_repos("someone", 100).await.unwrap();

        assert_eq!(repos.len(), 142);
        assert_eq!(repos[141].name, "repo-141");
    }

    #[tokio::test]
    async fn test_list_all_repos_propagates_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/someone/repos"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let client = GitHubClient::with_base_urls(None, &server.uri(), &server.uri()).unwrap();
        assert!(client.list_all_repos("someone", 100).await.is_err());
    }

    #[tokio::test]
    async fn test_get_raw_json() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/someone/site/main/.github/portfolio.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"image":"a.png"}"#))
            .mount(&server)
            .await;

        let client = GitHubClient::with_base_urls(None, &server.uri(), &server.uri()).unwrap();
        let value: serde_json::Value = client
            .get_raw_json("someone", "site", "main", ".github/portfolio.json")
            .await
            .unwrap();
        assert_eq!(value["image"], "a.png");
    }
}
