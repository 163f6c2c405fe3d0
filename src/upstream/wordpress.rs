//! WordPress Client
//!
//! Fetches post listings from `{WP_API_URL}/posts` with optional basic auth.

use std::time::Duration;

use serde_json::Value;
use tracing::{debug, error};

use crate::config::Config;
use crate::error::UpstreamError;

/// Basic-auth pair for a WordPress application password.
#[derive(Debug, Clone)]
struct Credentials {
    username: String,
    password: String,
}

// == WordPress Client ==
/// Thin reqwest wrapper around the `/posts` endpoint.
///
/// Posts are returned as opaque JSON values; no field is interpreted here.
#[derive(Debug, Clone)]
pub struct WordPressClient {
    http: reqwest::Client,
    base_url: String,
    credentials: Option<Credentials>,
}

impl WordPressClient {
    // == Constructor ==
    /// Creates a client for `base_url` with a per-request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, UpstreamError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credentials: None,
        })
    }

    /// Enables basic auth on every request.
    pub fn with_basic_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.credentials = Some(Credentials {
            username: username.into(),
            password: password.into(),
        });
        self
    }

    /// Builds a client from configuration.
    ///
    /// Returns `Ok(None)` when no `WP_API_URL` is set. Auth is only attached
    /// when both username and application password are present.
    pub fn from_config(config: &Config) -> Result<Option<Self>, UpstreamError> {
        let Some(base_url) = config.wp_api_url.as_deref() else {
            return Ok(None);
        };

        let client = Self::new(base_url, config.upstream_timeout())?;
        let client = match (&config.wp_username, &config.wp_app_password) {
            (Some(user), Some(password)) => client.with_basic_auth(user, password),
            _ => client,
        };
        Ok(Some(client))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    // == Fetch Posts ==
    /// Fetches one page of posts, optionally filtered by category slug.
    ///
    /// Any non-success status is an error carrying that status.
    pub async fn fetch_posts(
        &self,
        per_page: u32,
        category: Option<&str>,
    ) -> Result<Vec<Value>, UpstreamError> {
        let url = format!("{}/posts", self.base_url);

        let mut query = vec![("per_page", per_page.to_string())];
        if let Some(category) = category {
            query.push(("category_name", category.to_string()));
        }

        let mut request = self
            .http
            .get(&url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .query(&query);

        if let Some(credentials) = &self.credentials {
            request = request.basic_auth(&credentials.username, Some(&credentials.password));
        }

        debug!("Fetching posts from {} (per_page={})", url, per_page);
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            error!("WordPress API returned status {}", status.as_u16());
            return Err(UpstreamError::Status(status.as_u16()));
        }

        let posts = response.json::<Vec<Value>>().await?;
        Ok(posts)
    }
}
