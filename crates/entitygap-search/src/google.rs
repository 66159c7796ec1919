//! Google results-page provider
//!
//! Fetches a regional Google search page and extracts the organic result
//! URLs from the returned HTML. There is no official API behind this; the
//! page layout is scraped the same way the classic `googlesearch` tooling
//! does it, by collecting `/url?q=` redirect links and absolute anchors and
//! filtering out Google's own navigation.
//!
//! # Examples
//!
//! ```no_run
//! use entitygap_search::GoogleSearchProvider;
//!
//! // Query the German index instead of the default .com
//! let provider = GoogleSearchProvider::new();
//! ```

use crate::SearchError;
use entitygap_domain::traits::SearchProvider as SearchProviderTrait;
use regex::Regex;
use std::sync::LazyLock;
use std::time::Duration;
use tracing::{debug, warn};

/// Default timeout for one results-page fetch (10 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Browser-like user agent; Google serves a degraded page to unknown agents
const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/120.0 Safari/537.36";

/// Search provider backed by a regional Google results page
///
/// The locale argument of `fetch_result_urls` selects the top-level domain
/// (`"com"` queries `www.google.com`, `"de"` queries `www.google.de`, and so
/// on). Result ordering is whatever the engine returned; no guarantee of
/// stability between calls.
pub struct GoogleSearchProvider {
    client: reqwest::Client,
    endpoint_override: Option<String>,
    start_offset: usize,
}

impl GoogleSearchProvider {
    /// Create a provider with the default timeout
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()
            .unwrap();

        Self {
            client,
            endpoint_override: None,
            start_offset: 0,
        }
    }

    /// Point the provider at a fixed endpoint instead of a Google TLD.
    ///
    /// Intended for tests against a local HTTP stub.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint_override = Some(endpoint.into());
        self
    }

    /// Skip the first `start` ranked results (results-page paging offset)
    pub fn with_start_offset(mut self, start: usize) -> Self {
        self.start_offset = start;
        self
    }

    fn endpoint(&self, locale: &str) -> String {
        match &self.endpoint_override {
            Some(endpoint) => endpoint.clone(),
            None => format!("https://www.google.{}/search", locale),
        }
    }

    /// Fetch one results page and extract up to `count` organic URLs
    async fn fetch_page(
        &self,
        query: &str,
        locale: &str,
        count: usize,
    ) -> Result<Vec<String>, SearchError> {
        let url = self.endpoint(locale);
        debug!("Fetching search results from {} (count: {})", url, count);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", query),
                ("num", &count.to_string()),
                ("start", &self.start_offset.to_string()),
            ])
            .send()
            .await
            .map_err(|e| SearchError::Unavailable(format!("Request failed: {}", e)))?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS
            || status == reqwest::StatusCode::FORBIDDEN
        {
            warn!("Search backend blocked the request: HTTP {}", status);
            return Err(SearchError::Blocked(status.as_u16()));
        }
        if !status.is_success() {
            return Err(SearchError::Unavailable(format!("HTTP {}", status)));
        }

        let body = response
            .text()
            .await
            .map_err(|e| SearchError::Unavailable(format!("Failed to read body: {}", e)))?;

        Ok(parse_result_urls(&body, count))
    }
}

impl Default for GoogleSearchProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl SearchProviderTrait for GoogleSearchProvider {
    type Error = SearchError;

    async fn fetch_result_urls(
        &self,
        query: &str,
        locale: &str,
        count: usize,
    ) -> Result<Vec<String>, Self::Error> {
        if count < 1 {
            return Err(SearchError::InvalidArgument(count));
        }
        let urls = self.fetch_page(query, locale, count).await?;
        debug!("Extracted {} result URLs", urls.len());
        Ok(urls)
    }
}

// Two anchor shapes appear depending on which page variant is served.
static REDIRECT_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"href="/url\?q=([^"&]+)"#).unwrap());
static ABSOLUTE_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<a[^>]+href="(https?://[^"]+)""#).unwrap());

/// Extract up to `count` organic result URLs from a results-page HTML body.
///
/// Collects both `/url?q=` redirect targets and plain absolute anchors,
/// drops anything hosted on a Google property, and deduplicates while
/// preserving first-seen (ranked) order. Redirect targets are kept exactly
/// as the page carries them: any percent-encoding survives, which is still
/// a valid URL for the downstream analysis call.
fn parse_result_urls(html: &str, count: usize) -> Vec<String> {
    let candidates = REDIRECT_LINK
        .captures_iter(html)
        .chain(ABSOLUTE_LINK.captures_iter(html))
        .map(|caps| caps[1].to_string());

    let mut urls = Vec::new();
    for candidate in candidates {
        if !candidate.starts_with("http") || is_google_host(&candidate) {
            continue;
        }
        if !urls.contains(&candidate) {
            urls.push(candidate);
        }
        if urls.len() == count {
            break;
        }
    }
    urls
}

fn is_google_host(url: &str) -> bool {
    let host = url
        .split("://")
        .nth(1)
        .unwrap_or("")
        .split('/')
        .next()
        .unwrap_or("");
    host.contains("google.")
        || host.ends_with("googleusercontent.com")
        || host.ends_with("gstatic.com")
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESULTS_PAGE: &str = r#"
        <html><body>
        <a href="/url?q=https://a.com/coffee&sa=U&ved=xyz">A</a>
        <a href="/url?q=https://b.com/beans&sa=U">B</a>
        <a href="/url?q=https://maps.google.com/place&sa=U">Maps</a>
        <a href="https://accounts.google.com/signin">Sign in</a>
        <a class="result" href="https://c.com/espresso">C</a>
        <a href="/url?q=https://a.com/coffee&sa=U">A again</a>
        </body></html>
    "#;

    #[test]
    fn test_parse_extracts_and_filters() {
        let urls = parse_result_urls(RESULTS_PAGE, 10);
        assert_eq!(
            urls,
            vec![
                "https://a.com/coffee",
                "https://b.com/beans",
                "https://c.com/espresso",
            ]
        );
    }

    #[test]
    fn test_parse_truncates_to_count() {
        let urls = parse_result_urls(RESULTS_PAGE, 1);
        assert_eq!(urls, vec!["https://a.com/coffee"]);
    }

    #[test]
    fn test_redirect_target_kept_verbatim() {
        let html = r#"<a href="/url?q=https://a.com/caf%C3%A9-guide&sa=U">A</a>"#;
        assert_eq!(parse_result_urls(html, 5), vec!["https://a.com/caf%C3%A9-guide"]);
    }

    #[test]
    fn test_parse_empty_page() {
        assert!(parse_result_urls("<html></html>", 10).is_empty());
    }

    #[test]
    fn test_google_hosts_rejected() {
        assert!(is_google_host("https://www.google.com/search"));
        assert!(is_google_host("https://maps.google.de/place"));
        assert!(!is_google_host("https://a.com/google."));
    }

    #[tokio::test]
    async fn test_zero_count_rejected_before_network() {
        use entitygap_domain::traits::SearchProvider;

        let provider = GoogleSearchProvider::new().with_endpoint("http://127.0.0.1:1/search");
        let err = provider.fetch_result_urls("q", "com", 0).await.unwrap_err();
        assert!(matches!(err, SearchError::InvalidArgument(0)));
    }
}
