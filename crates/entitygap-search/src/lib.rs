//! Entitygap Search Provider Layer
//!
//! Pluggable implementations of the `SearchProvider` trait from
//! `entitygap-domain`.
//!
//! # Providers
//!
//! - `MockSearchProvider`: deterministic mock for testing
//! - `GoogleSearchProvider`: scrapes a regional Google results page
//!
//! # Examples
//!
//! ```
//! use entitygap_search::MockSearchProvider;
//! use entitygap_domain::traits::SearchProvider;
//!
//! # tokio_test::block_on(async {
//! let provider = MockSearchProvider::new(vec!["https://a.com".to_string()]);
//! let urls = provider.fetch_result_urls("coffee", "com", 5).await.unwrap();
//! assert_eq!(urls, vec!["https://a.com"]);
//! # });
//! ```

#![warn(missing_docs)]

pub mod google;

use entitygap_domain::traits::SearchProvider;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

pub use google::GoogleSearchProvider;

/// Errors that can occur while fetching search results
#[derive(Error, Debug)]
pub enum SearchError {
    /// Caller asked for fewer than one result
    #[error("Invalid result count: {0} (must be >= 1)")]
    InvalidArgument(usize),

    /// The search backend refused the request (rate limiting or bot block)
    #[error("Search backend blocked the request: HTTP {0}")]
    Blocked(u16),

    /// Network failure or unexpected upstream response
    #[error("Search backend unavailable: {0}")]
    Unavailable(String),
}

/// Mock search provider for deterministic testing
///
/// Returns pre-configured URL lists without any network calls. Per-query
/// responses can be registered; queries can also be configured to fail, for
/// exercising abort paths.
///
/// # Examples
///
/// ```
/// use entitygap_search::MockSearchProvider;
/// use entitygap_domain::traits::SearchProvider;
///
/// # tokio_test::block_on(async {
/// let mut provider = MockSearchProvider::default();
/// provider.add_results("coffee", vec!["https://a.com".to_string()]);
/// let urls = provider.fetch_result_urls("coffee", "com", 10).await.unwrap();
/// assert_eq!(urls.len(), 1);
/// assert_eq!(provider.call_count(), 1);
/// # });
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockSearchProvider {
    default_results: Vec<String>,
    responses: Arc<Mutex<HashMap<String, Vec<String>>>>,
    failing_queries: Arc<Mutex<HashMap<String, String>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockSearchProvider {
    /// Create a mock returning the same URL list for every query
    pub fn new(default_results: Vec<String>) -> Self {
        Self {
            default_results,
            ..Self::default()
        }
    }

    /// Register a URL list for a specific query
    pub fn add_results(&mut self, query: impl Into<String>, urls: Vec<String>) {
        self.responses.lock().unwrap().insert(query.into(), urls);
    }

    /// Configure a query to fail with `Unavailable`
    pub fn add_error(&mut self, query: impl Into<String>, message: impl Into<String>) {
        self.failing_queries
            .lock()
            .unwrap()
            .insert(query.into(), message.into());
    }

    /// Number of times `fetch_result_urls` was called
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

#[async_trait::async_trait]
impl SearchProvider for MockSearchProvider {
    type Error = SearchError;

    async fn fetch_result_urls(
        &self,
        query: &str,
        _locale: &str,
        count: usize,
    ) -> Result<Vec<String>, Self::Error> {
        *self.call_count.lock().unwrap() += 1;

        if count < 1 {
            return Err(SearchError::InvalidArgument(count));
        }
        if let Some(message) = self.failing_queries.lock().unwrap().get(query) {
            return Err(SearchError::Unavailable(message.clone()));
        }

        let urls = self
            .responses
            .lock()
            .unwrap()
            .get(query)
            .cloned()
            .unwrap_or_else(|| self.default_results.clone());
        Ok(urls.into_iter().take(count).collect())
    }
}
