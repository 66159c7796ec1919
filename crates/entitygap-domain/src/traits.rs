//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and
//! infrastructure. The network-backed implementations live in the
//! `entitygap-search` and `entitygap-extractor` crates; tests substitute
//! in-memory fakes.

use crate::record::EntityRecord;
use async_trait::async_trait;

/// Trait for fetching ranked search-result URLs for a query
///
/// Implemented by the infrastructure layer (entitygap-search)
#[async_trait]
pub trait SearchProvider {
    /// Error type for search operations
    type Error;

    /// Fetch up to `count` result URLs for `query`, in the ranked order
    /// reported by the upstream engine, for the given locale/TLD variant.
    ///
    /// The same query may return different URLs over time; callers must not
    /// assume determinism between calls.
    async fn fetch_result_urls(
        &self,
        query: &str,
        locale: &str,
        count: usize,
    ) -> Result<Vec<String>, Self::Error>;
}

/// Trait for extracting entity mentions from a page
///
/// Implemented by the infrastructure layer (entitygap-extractor)
#[async_trait]
pub trait EntityExtractor {
    /// Error type for extraction operations
    type Error;

    /// Run one remote analysis call for `url` and return every entity
    /// mention detected, unsorted. The credential is passed through
    /// explicitly on every call; implementations hold no ambient key state.
    async fn extract_entities(
        &self,
        url: &str,
        credential: &str,
    ) -> Result<Vec<EntityRecord>, Self::Error>;
}
