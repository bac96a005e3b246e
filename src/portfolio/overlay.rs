// Overlay metadata lookup.
// Tries each candidate branch in order; the first readable file wins.

use tracing::{debug, info};

use crate::github::GitHubClient;

use super::entry::OverlayMetadata;

pub const DEFAULT_METADATA_PATH: &str = ".github/portfolio.json";

/// Where to look for a repository's overlay file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayLocator {
    /// File path inside the repository.
    pub path: String,
    /// Branches tried in order.
    pub branches: Vec<String>,
}

impl Default for OverlayLocator {
    fn default() -> Self {
        Self {
            path: DEFAULT_METADATA_PATH.to_string(),
            branches: vec!["main".to_string(), "master".to_string()],
        }
    }
}

impl OverlayLocator {
    pub fn new(path: impl Into<String>, branches: Vec<String>) -> Self {
        Self {
            path: path.into(),
            branches,
        }
    }

    /// Fetch the overlay for `owner/repo`.
    ///
    /// Returns None when no candidate yields a parseable file; missing
    /// overlays are normal and never reported as errors.
    pub async fn fetch(&self, client: &GitHubClient, owner: &str, repo: &str) -> Option<OverlayMetadata> {
        for branch in &self.branches {
            match client
                .get_raw_json::<OverlayMetadata>(owner, repo, branch, &self.path)
                .await
            {
                Ok(metadata) => {
                    info!(repo, branch = %branch, "found overlay metadata");
                    return Some(metadata);
                }
                Err(e) if e.is_not_found() => {
                    debug!(repo, branch = %branch, "no overlay on branch");
                }
                Err(e) => {
                    debug!(repo, branch = %branch, error = %e, "overlay unreadable");
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const FILE: &str = ".github/portfolio.json";

    async fn client(server: &MockServer) -> GitHubClient {
        GitHubClient::with_base_urls(None, &server.uri(), &server.uri()).unwrap()
    }

    #[tokio::test]
    async fn test_first_branch_wins() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("/someone/site/main/{FILE}")))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"image":"main.png"}"#))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(format!("/someone/site/master/{FILE}")))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"image":"master.png"}"#))
            .expect(0)
            .mount(&server)
            .await;

        let overlay = OverlayLocator::default()
            .fetch(&client(&server).await, "someone", "site")
            .await
            .unwrap();
        assert_eq!(overlay.image.as_deref(), Some("main.png"));
    }

    #[tokio::test]
    async fn test_falls_back_to_second_branch() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("/someone/site/main/{FILE}")))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(format!("/someone/site/master/{FILE}")))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(r#"{"blogPostUrl":"https://blog/x"}"#),
            )
            .expect(1)
            .mount(&server)
            .await;

        let overlay = OverlayLocator::default()
            .fetch(&client(&server).await, "someone", "site")
            .await
            .unwrap();
        assert_eq!(overlay.blog_post_url.as_deref(), Some("https://blog/x"));
    }

    #[tokio::test]
    async fn test_missing_or_malformed_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("/someone/site/main/{FILE}")))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(format!("/someone/site/master/{FILE}")))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let overlay = OverlayLocator::default()
            .fetch(&client(&server).await, "someone", "site")
            .await;
        assert!(overlay.is_none());

        let none = OverlayLocator::new(FILE, Vec::new())
            .fetch(&client(&server).await, "someone", "site")
            .await;
        assert!(none.is_none());
    }
}
