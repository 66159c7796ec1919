//! Entitygap Entity Extraction Layer
//!
//! Pluggable implementations of the `EntityExtractor` trait from
//! `entitygap-domain`.
//!
//! # Providers
//!
//! - `MockExtractor`: deterministic mock for testing
//! - `TextRazorExtractor`: TextRazor entity-analysis API integration
//!
//! # Examples
//!
//! ```
//! use entitygap_extractor::MockExtractor;
//! use entitygap_domain::{EntityRecord, traits::EntityExtractor};
//!
//! # tokio_test::block_on(async {
//! let mut extractor = MockExtractor::default();
//! extractor.add_entities("https://a.com", vec![
//!     EntityRecord::new("https://a.com", "Coffee", 0.9, 2.5),
//! ]);
//! let records = extractor.extract_entities("https://a.com", "key").await.unwrap();
//! assert_eq!(records.len(), 1);
//! # });
//! ```

#![warn(missing_docs)]

pub mod textrazor;

use entitygap_domain::traits::EntityExtractor;
use entitygap_domain::EntityRecord;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

pub use textrazor::TextRazorExtractor;

/// Errors that can occur during entity extraction
#[derive(Error, Debug)]
pub enum ExtractError {
    /// Missing or rejected API credential
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// The target URL could not be retrieved for analysis
    #[error("Failed to fetch {url}: {message}")]
    Fetch {
        /// URL that could not be retrieved
        url: String,
        /// Upstream failure description
        message: String,
    },

    /// The analysis service reported an internal failure
    #[error("Analysis failed: {0}")]
    Analysis(String),

    /// The service responded with an unparseable payload
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Mock extractor for deterministic testing
///
/// Returns pre-configured record lists keyed by URL, without any network
/// calls. URLs can also be configured to fail, and an empty credential is
/// rejected just like the real service would.
#[derive(Debug, Clone, Default)]
pub struct MockExtractor {
    responses: Arc<Mutex<HashMap<String, Vec<EntityRecord>>>>,
    failing_urls: Arc<Mutex<HashMap<String, String>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockExtractor {
    /// Register the records returned for a URL
    pub fn add_entities(&mut self, url: impl Into<String>, records: Vec<EntityRecord>) {
        self.responses.lock().unwrap().insert(url.into(), records);
    }

    /// Configure a URL to fail with a fetch error
    pub fn add_error(&mut self, url: impl Into<String>, message: impl Into<String>) {
        self.failing_urls
            .lock()
            .unwrap()
            .insert(url.into(), message.into());
    }

    /// Number of times `extract_entities` was called
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

#[async_trait::async_trait]
impl EntityExtractor for MockExtractor {
    type Error = ExtractError;

    async fn extract_entities(
        &self,
        url: &str,
        credential: &str,
    ) -> Result<Vec<EntityRecord>, Self::Error> {
        *self.call_count.lock().unwrap() += 1;

        if credential.is_empty() {
            return Err(ExtractError::Authentication("empty credential".to_string()));
        }
        if let Some(message) = self.failing_urls.lock().unwrap().get(url) {
            return Err(ExtractError::Fetch {
                url: url.to_string(),
                message: message.clone(),
            });
        }

        Ok(self
            .responses
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_returns_registered_records() {
        let mut extractor = MockExtractor::default();
        extractor.add_entities(
            "https://a.com",
            vec![EntityRecord::new("https://a.com", "Coffee", 0.9, 2.5)],
        );

        let records = extractor
            .extract_entities("https://a.com", "key")
            .await
            .unwrap();
        assert_eq!(records[0].entity_id, "Coffee");
        assert_eq!(extractor.call_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_unknown_url_yields_no_entities() {
        let extractor = MockExtractor::default();
        let records = extractor
            .extract_entities("https://unknown.com", "key")
            .await
            .unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_mock_rejects_empty_credential() {
        let extractor = MockExtractor::default();
        let err = extractor
            .extract_entities("https://a.com", "")
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractError::Authentication(_)));
    }

    #[tokio::test]
    async fn test_mock_error_injection() {
        let mut extractor = MockExtractor::default();
        extractor.add_error("https://down.com", "connection refused");
        let err = extractor
            .extract_entities("https://down.com", "key")
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractError::Fetch { .. }));
    }
}
