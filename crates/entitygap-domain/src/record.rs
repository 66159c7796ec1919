//! EntityRecord - one extracted entity mention for one source URL

use serde::{Deserialize, Serialize};

/// A single extracted-entity row, as reported by the extraction service.
///
/// Records are immutable once built. For a given (`source_url`, `entity_id`)
/// pair a well-formed extraction output carries at most one record per
/// mention, but an entity can legitimately appear multiple times when the
/// service returns multiple matched-text spans; no deduplication happens
/// downstream.
///
/// # Examples
///
/// ```
/// use entitygap_domain::EntityRecord;
///
/// let record = EntityRecord::new("https://a.com", "Coffee", 0.9, 2.5);
/// assert_eq!(record.entity_id, "Coffee");
/// assert!(record.type_tags.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityRecord {
    /// The page the entity was extracted from
    pub source_url: String,

    /// Canonical identifier/name of the entity as reported by the service
    pub entity_id: String,

    /// Service-reported importance of the entity to the page.
    /// No fixed range is guaranteed; treat as an ordering key.
    pub relevance_score: f64,

    /// Service-reported certainty of correct identification
    pub confidence_score: f64,

    /// Taxonomic classification labels; may be empty
    pub type_tags: Vec<String>,

    /// The literal surface text in the page that triggered the match
    pub matched_text: String,

    /// Optional external knowledge-base reference URL
    pub knowledge_base_link: Option<String>,
}

impl EntityRecord {
    /// Create a record with the two identifying fields and both scores.
    ///
    /// Tags, matched text and the knowledge-base link start empty; use the
    /// `with_*` builders to fill them in.
    pub fn new(
        source_url: impl Into<String>,
        entity_id: impl Into<String>,
        relevance_score: f64,
        confidence_score: f64,
    ) -> Self {
        Self {
            source_url: source_url.into(),
            entity_id: entity_id.into(),
            relevance_score,
            confidence_score,
            type_tags: Vec::new(),
            matched_text: String::new(),
            knowledge_base_link: None,
        }
    }

    /// Set the taxonomic type tags
    pub fn with_type_tags(mut self, tags: Vec<String>) -> Self {
        self.type_tags = tags;
        self
    }

    /// Set the matched surface text
    pub fn with_matched_text(mut self, text: impl Into<String>) -> Self {
        self.matched_text = text.into();
        self
    }

    /// Set the knowledge-base reference link
    pub fn with_knowledge_base_link(mut self, link: impl Into<String>) -> Self {
        self.knowledge_base_link = Some(link.into());
        self
    }
}
