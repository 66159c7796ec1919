//! TextRazor API integration
//!
//! Runs one analysis call per URL against the TextRazor `entities` extractor
//! and maps the returned mentions into domain records.
//!
//! # Features
//!
//! - Async HTTP communication with the TextRazor API
//! - Credential passed explicitly per call, never stored as ambient state
//! - Retry logic with exponential backoff on transient failures
//! - Timeout handling
//!
//! # Examples
//!
//! ```no_run
//! use entitygap_extractor::TextRazorExtractor;
//!
//! let extractor = TextRazorExtractor::new().with_max_retries(2);
//! ```

use crate::ExtractError;
use entitygap_domain::traits::EntityExtractor as EntityExtractorTrait;
use entitygap_domain::EntityRecord;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Default TextRazor API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.textrazor.com";

/// Default timeout for one analysis call (30 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default number of retry attempts
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Entity extractor backed by the TextRazor analysis API
///
/// Each call POSTs the target URL with the `entities` extractor enabled and
/// the caller-supplied key in the `x-textrazor-key` header. Transient
/// failures (network errors, HTTP 5xx) are retried with exponential backoff;
/// authentication and analysis failures are surfaced immediately.
pub struct TextRazorExtractor {
    endpoint: String,
    client: reqwest::Client,
    max_retries: u32,
}

/// Top-level TextRazor response envelope
#[derive(Deserialize)]
struct TextRazorResponse {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    response: Option<TextRazorAnalysis>,
}

#[derive(Deserialize)]
struct TextRazorAnalysis {
    #[serde(default)]
    entities: Vec<TextRazorEntity>,
}

/// One entity mention as reported by the service
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TextRazorEntity {
    #[serde(default)]
    entity_id: Option<String>,
    #[serde(default)]
    relevance_score: f64,
    #[serde(default)]
    confidence_score: f64,
    #[serde(default)]
    freebase_types: Vec<String>,
    #[serde(default)]
    matched_text: String,
    #[serde(default)]
    wiki_link: Option<String>,
}

impl TextRazorExtractor {
    /// Create an extractor against the public TextRazor endpoint
    pub fn new() -> Self {
        Self::with_endpoint(DEFAULT_ENDPOINT)
    }

    /// Create an extractor against a specific endpoint
    ///
    /// Intended for tests against a local HTTP stub.
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .unwrap();

        Self {
            endpoint: endpoint.into(),
            client,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    /// Set the maximum number of retry attempts
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Analyze one URL and return every entity mention detected
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - the credential is empty or rejected (`Authentication`)
    /// - the target URL cannot be downloaded by the service (`Fetch`)
    /// - the service reports an internal failure (`Analysis`)
    /// - the payload cannot be parsed (`InvalidResponse`)
    pub async fn analyze_url(
        &self,
        url: &str,
        credential: &str,
    ) -> Result<Vec<EntityRecord>, ExtractError> {
        if credential.is_empty() {
            return Err(ExtractError::Authentication(
                "no API key supplied".to_string(),
            ));
        }

        let params = [("url", url), ("extractors", "entities")];

        // Retry only transient failures; auth and analysis errors are final.
        let mut attempts = 0;
        let mut last_error = None;

        while attempts < self.max_retries {
            match self
                .client
                .post(&self.endpoint)
                .header("x-textrazor-key", credential)
                .form(&params)
                .send()
                .await
            {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        let body = response.text().await.map_err(|e| {
                            ExtractError::InvalidResponse(format!(
                                "Failed to read body: {}",
                                e
                            ))
                        })?;
                        return parse_response(url, &body);
                    } else if status == reqwest::StatusCode::UNAUTHORIZED
                        || status == reqwest::StatusCode::FORBIDDEN
                    {
                        return Err(ExtractError::Authentication(format!(
                            "service rejected the key: HTTP {}",
                            status
                        )));
                    } else if status.is_server_error() {
                        last_error = Some(ExtractError::Analysis(format!(
                            "HTTP {} from analysis service",
                            status
                        )));
                    } else {
                        let error_text = response
                            .text()
                            .await
                            .unwrap_or_else(|_| "Unknown error".to_string());
                        return Err(ExtractError::Analysis(format!(
                            "HTTP {}: {}",
                            status, error_text
                        )));
                    }
                }
                Err(e) => {
                    last_error = Some(ExtractError::Fetch {
                        url: url.to_string(),
                        message: format!("Request failed: {}", e),
                    });
                }
            }

            attempts += 1;
            if attempts < self.max_retries {
                // Exponential backoff: 1s, 2s, 4s, etc.
                let delay = Duration::from_secs(2u64.pow(attempts - 1));
                warn!(
                    "Extraction attempt {} for {} failed, retrying in {:?}",
                    attempts, url, delay
                );
                tokio::time::sleep(delay).await;
            }
        }

        Err(last_error.unwrap_or_else(|| {
            ExtractError::Analysis("Max retries exceeded".to_string())
        }))
    }
}

impl Default for TextRazorExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl EntityExtractorTrait for TextRazorExtractor {
    type Error = ExtractError;

    async fn extract_entities(
        &self,
        url: &str,
        credential: &str,
    ) -> Result<Vec<EntityRecord>, Self::Error> {
        self.analyze_url(url, credential).await
    }
}

/// Map a raw TextRazor payload into domain records for `source_url`.
///
/// Mentions without an `entityId` are skipped; everything else is retained
/// verbatim, one record per mention, unsorted.
fn parse_response(source_url: &str, body: &str) -> Result<Vec<EntityRecord>, ExtractError> {
    let envelope: TextRazorResponse = serde_json::from_str(body)
        .map_err(|e| ExtractError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

    if !envelope.ok {
        let message = envelope
            .error
            .unwrap_or_else(|| "unspecified service error".to_string());
        // The service reports its own download failures through this path.
        if message.to_lowercase().contains("download") {
            return Err(ExtractError::Fetch {
                url: source_url.to_string(),
                message,
            });
        }
        return Err(ExtractError::Analysis(message));
    }

    let entities = envelope
        .response
        .map(|analysis| analysis.entities)
        .unwrap_or_default();

    let records = entities
        .into_iter()
        .filter_map(|entity| {
            let entity_id = entity.entity_id?;
            let mut record = EntityRecord::new(
                source_url,
                entity_id,
                entity.relevance_score,
                entity.confidence_score,
            )
            .with_type_tags(entity.freebase_types)
            .with_matched_text(entity.matched_text);
            if let Some(link) = entity.wiki_link {
                record = record.with_knowledge_base_link(link);
            }
            Some(record)
        })
        .collect::<Vec<_>>();

    debug!("Parsed {} entity mentions for {}", records.len(), source_url);
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENTITIES_BODY: &str = r#"{
        "ok": true,
        "response": {
            "entities": [
                {
                    "entityId": "Coffee",
                    "relevanceScore": 0.9,
                    "confidenceScore": 2.5,
                    "freebaseTypes": ["/food/beverage", "/business/product"],
                    "matchedText": "coffee",
                    "wikiLink": "http://en.wikipedia.org/wiki/Coffee"
                },
                {
                    "entityId": "Brazil",
                    "relevanceScore": 0.4,
                    "confidenceScore": 1.8,
                    "matchedText": "Brazil"
                }
            ]
        }
    }"#;

    #[test]
    fn test_parse_entities() {
        let records = parse_response("https://a.com", ENTITIES_BODY).unwrap();
        assert_eq!(records.len(), 2);

        assert_eq!(records[0].source_url, "https://a.com");
        assert_eq!(records[0].entity_id, "Coffee");
        assert_eq!(records[0].relevance_score, 0.9);
        assert_eq!(records[0].type_tags.len(), 2);
        assert_eq!(
            records[0].knowledge_base_link.as_deref(),
            Some("http://en.wikipedia.org/wiki/Coffee")
        );

        // Absent fields come back empty rather than failing the parse.
        assert!(records[1].type_tags.is_empty());
        assert!(records[1].knowledge_base_link.is_none());
    }

    #[test]
    fn test_parse_no_entities_section() {
        let records = parse_response("https://a.com", r#"{"ok": true, "response": {}}"#).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_parse_mentions_without_id_are_skipped() {
        let body = r#"{"ok": true, "response": {"entities": [{"matchedText": "it"}]}}"#;
        let records = parse_response("https://a.com", body).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_parse_download_failure_maps_to_fetch() {
        let body = r#"{"ok": false, "error": "Failed to download https://a.com"}"#;
        let err = parse_response("https://a.com", body).unwrap_err();
        assert!(matches!(err, ExtractError::Fetch { .. }));
    }

    #[test]
    fn test_parse_service_failure_maps_to_analysis() {
        let body = r#"{"ok": false, "error": "internal analyzer error"}"#;
        let err = parse_response("https://a.com", body).unwrap_err();
        assert!(matches!(err, ExtractError::Analysis(_)));
    }

    #[test]
    fn test_parse_garbage_is_invalid_response() {
        let err = parse_response("https://a.com", "not json").unwrap_err();
        assert!(matches!(err, ExtractError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_empty_credential_rejected_before_network() {
        let extractor = TextRazorExtractor::with_endpoint("http://127.0.0.1:1");
        let err = extractor.analyze_url("https://a.com", "").await.unwrap_err();
        assert!(matches!(err, ExtractError::Authentication(_)));
    }
}
