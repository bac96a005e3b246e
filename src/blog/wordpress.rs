// WordPress.com public posts API.
// Fetches the blog feed and derives categories, category filters, and plain-text excerpts.

use std::fmt;
use std::sync::LazyLock;

use chrono::{DateTime, FixedOffset};
use regex::Regex;
use reqwest::Client;
use serde::de::{MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, info};

use crate::error::{FolioError, Result};

pub const WORDPRESS_API_BASE: &str = "https://public-api.wordpress.com";

/// Length of the card excerpt in characters.
pub const EXCERPT_LENGTH: usize = 150;

static HTML_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("HTML tag pattern is valid"));

/// A post category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    #[serde(default)]
    pub slug: String,
}

/// A blog post as returned by the v1.1 posts endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    #[serde(rename = "ID")]
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "URL", default)]
    pub url: String,
    pub date: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub featured_image: Option<String>,
    /// In feed order.
    #[serde(default, deserialize_with = "categories_in_order")]
    pub categories: Vec<Category>,
}

impl Post {
    pub fn in_category(&self, name: &str) -> bool {
        self.categories.iter().any(|c| c.name == name)
    }

    /// Plain-text card excerpt: the API excerpt when present, else the body.
    pub fn card_excerpt(&self) -> String {
        let source = if self.excerpt.is_empty() {
            &self.content
        } else {
            &self.excerpt
        };
        excerpt(source, EXCERPT_LENGTH)
    }

    /// The post as shown on a blog card.
    pub fn card(&self) -> PostCard {
        PostCard {
            id: self.id,
            title: self.title.clone(),
            url: self.url.clone(),
            date: self.date,
            excerpt: self.card_excerpt(),
            featured_image: self.featured_image.clone(),
            categories: self.categories.iter().map(|c| c.name.clone()).collect(),
        }
    }
}

/// Display fields of a post for list output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostCard {
    pub id: u64,
    pub title: String,
    pub url: String,
    pub date: Option<DateTime<FixedOffset>>,
    pub excerpt: String,
    pub featured_image: Option<String>,
    pub categories: Vec<String>,
}

/// Categories arrive as a name-keyed object, or `[]` when a post has none.
/// Entries are kept in document order.
fn categories_in_order<'de, D>(deserializer: D) -> std::result::Result<Vec<Category>, D::Error>
where
    D: Deserializer<'de>,
{
    struct CategoriesVisitor;

    impl<'de> Visitor<'de> for CategoriesVisitor {
        type Value = Vec<Category>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a map or list of categories")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<Self::Value, A::Error> {
            let mut categories = Vec::new();
            while let Some((_, category)) = map.next_entry::<String, Category>()? {
                categories.push(category);
            }
            Ok(categories)
        }

        fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> std::result::Result<Self::Value, A::Error> {
            let mut categories = Vec::new();
            while let Some(category) = seq.next_element::<Category>()? {
                categories.push(category);
            }
            Ok(categories)
        }

        fn visit_unit<E: serde::de::Error>(self) -> std::result::Result<Self::Value, E> {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(CategoriesVisitor)
}

#[derive(Debug, Deserialize)]
struct PostsResponse {
    #[serde(default)]
    posts: Vec<Post>,
}

/// Client for one WordPress.com site.
pub struct WordPressClient {
    client: Client,
    api_base: String,
    site: String,
}

impl WordPressClient {
    pub fn new(site: impl Into<String>) -> Result<Self> {
        Self::with_base_url(site, WORDPRESS_API_BASE)
    }

    pub fn with_base_url(site: impl Into<String>, api_base: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent("folio-portfolio-sync")
            .build()
            .map_err(FolioError::Api)?;
        Ok(Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
            site: site.into(),
        })
    }

    /// Fetch the site's latest posts.
    pub async fn fetch_posts(&self) -> Result<Vec<Post>> {
        let url = format!("{}/rest/v1.1/sites/{}/posts/", self.api_base, self.site);
        debug!(%url, "GET");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FolioError::Http {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }

        let body: PostsResponse = response.json().await?;
        info!(site = %self.site, count = body.posts.len(), "fetched blog posts");
        Ok(body.posts)
    }
}

/// Distinct categories across posts, in first-seen order.
pub fn unique_categories(posts: &[Post]) -> Vec<Category> {
    let mut seen: Vec<Category> = Vec::new();
    for category in posts.iter().flat_map(|p| p.categories.iter()) {
        if !seen.iter().any(|c| c.name == category.name) {
            seen.push(category.clone());
        }
    }
    seen
}

/// Posts in the named category; `"all"` keeps every post.
pub fn filter_by_category<'a>(posts: &'a [Post], category: &str) -> Vec<&'a Post> {
    if category == "all" {
        return posts.iter().collect();
    }
    posts.iter().filter(|p| p.in_category(category)).collect()
}

/// Strip HTML tags and cut to `length` characters, marking truncation with `...`.
pub fn excerpt(content: &str, length: usize) -> String {
    let stripped = HTML_TAG_RE.replace_all(content, "");
    if stripped.chars().count() > length {
        let cut: String = stripped.chars().take(length).collect();
        format!("{}...", cut)
    } else {
        stripped.into_owned()
    }
}
