//! Request DTOs for the posts proxy API
//!
//! Defines the query parameters accepted by the posts route.

use serde::Deserialize;

/// Page size used when `per_page` is omitted
pub const DEFAULT_PER_PAGE: u32 = 6;

/// Largest page size the WordPress REST API accepts
pub const MAX_PER_PAGE: u32 = 100;

/// Query string for `GET /api/posts`
///
/// # Fields
/// - `per_page`: Number of posts to return (default 6)
/// - `category_name`: Optional category slug filter
/// - `refresh`: Bypass the cached listing and refetch
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostsQuery {
    #[serde(default)]
    pub per_page: Option<u32>,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub refresh: bool,
}

impl PostsQuery {
    pub fn per_page(&self) -> u32 {
        self.per_page.unwrap_or(DEFAULT_PER_PAGE)
    }

    pub fn category(&self) -> Option<&str> {
        self.category_name.as_deref()
    }

    /// Validates the query
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        let per_page = self.per_page();
        if per_page == 0 || per_page > MAX_PER_PAGE {
            return Some(format!("per_page must be between 1 and {}", MAX_PER_PAGE));
        }
        if matches!(self.category(), Some(c) if c.trim().is_empty()) {
            return Some("category_name cannot be empty".to_string());
        }
        None
    }

    /// Cache key for this listing.
    ///
    /// Distinct parameter combinations map to distinct keys; `refresh` is not
    /// part of the key.
    pub fn cache_key(&self) -> String {
        match self.category() {
            Some(category) => format!("posts-{}-{}", self.per_page(), category),
            None => format!("posts-{}", self.per_page()),
        }
    }
}
