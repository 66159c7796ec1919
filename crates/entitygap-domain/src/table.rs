//! EntityTable - an ordered collection of records, relevance descending

use crate::record::EntityRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// An ordered sequence of [`EntityRecord`]s, sorted by `relevance_score`
/// descending. Built fresh per analysis run; never persisted.
///
/// # Examples
///
/// ```
/// use entitygap_domain::{EntityRecord, EntityTable};
///
/// let table = EntityTable::build(vec![
///     vec![EntityRecord::new("https://a.com", "Coffee", 0.9, 2.5)],
///     vec![EntityRecord::new("https://b.com", "Espresso", 0.7, 1.2)],
/// ]);
/// assert_eq!(table.len(), 2);
/// assert_eq!(table.records()[0].entity_id, "Coffee");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityTable {
    records: Vec<EntityRecord>,
}

impl EntityTable {
    /// Create an empty table
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a table from per-URL extraction outputs.
    ///
    /// Flattens the input sequences in order, then sorts by relevance
    /// descending. The sort is stable: records with equal scores keep their
    /// original insertion order, so deterministic inputs give deterministic
    /// tables. No filtering, no deduplication.
    pub fn build(records_per_url: Vec<Vec<EntityRecord>>) -> Self {
        let mut records: Vec<EntityRecord> =
            records_per_url.into_iter().flatten().collect();
        records.sort_by(|a, b| b.relevance_score.total_cmp(&a.relevance_score));
        Self { records }
    }

    /// Wrap an already-ordered sequence of records without re-sorting.
    ///
    /// Used by the gap computation, which must preserve the comparison
    /// table's relative order rather than impose its own.
    pub fn from_ordered(records: Vec<EntityRecord>) -> Self {
        Self { records }
    }

    /// The records in table order
    pub fn records(&self) -> &[EntityRecord] {
        &self.records
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True if the table has no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The set of distinct `entity_id` values in the table
    pub fn entity_ids(&self) -> HashSet<&str> {
        self.records.iter().map(|r| r.entity_id.as_str()).collect()
    }

    /// Iterate over the records in table order
    pub fn iter(&self) -> impl Iterator<Item = &EntityRecord> {
        self.records.iter()
    }
}

impl IntoIterator for EntityTable {
    type Item = EntityRecord;
    type IntoIter = std::vec::IntoIter<EntityRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(url: &str, id: &str, relevance: f64) -> EntityRecord {
        EntityRecord::new(url, id, relevance, 1.0)
    }

    #[test]
    fn test_build_sorts_by_relevance_descending() {
        let table = EntityTable::build(vec![
            vec![record("https://a.com", "Coffee", 0.9), record("https://a.com", "Brazil", 0.4)],
            vec![record("https://b.com", "Espresso", 0.7)],
        ]);

        let ids: Vec<&str> = table.iter().map(|r| r.entity_id.as_str()).collect();
        assert_eq!(ids, vec!["Coffee", "Espresso", "Brazil"]);
    }

    #[test]
    fn test_build_stable_for_equal_scores() {
        let table = EntityTable::build(vec![
            vec![record("https://a.com", "First", 0.5)],
            vec![record("https://b.com", "Second", 0.5)],
            vec![record("https://c.com", "Third", 0.5)],
        ]);

        let ids: Vec<&str> = table.iter().map(|r| r.entity_id.as_str()).collect();
        assert_eq!(ids, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn test_build_retains_duplicate_mentions() {
        // The same entity can appear once per matched-text span.
        let table = EntityTable::build(vec![vec![
            record("https://a.com", "Coffee", 0.9),
            record("https://a.com", "Coffee", 0.9),
        ]]);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_entity_ids_deduplicates() {
        let table = EntityTable::build(vec![vec![
            record("https://a.com", "Coffee", 0.9),
            record("https://b.com", "Coffee", 0.3),
        ]]);
        assert_eq!(table.entity_ids().len(), 1);
        assert!(table.entity_ids().contains("Coffee"));
    }

    #[test]
    fn test_empty_build() {
        let table = EntityTable::build(vec![]);
        assert!(table.is_empty());
        assert_eq!(table.len(), 0);
    }
}
