//! Gap computation - the set difference between two entity tables

use crate::table::EntityTable;

/// Compute the gap table: every record of `comparison` whose `entity_id`
/// does not appear anywhere in `target`, in `comparison`'s relative order.
///
/// Membership is exact string equality on `entity_id`; scores, tags and
/// source URLs play no part. Pure and deterministic.
///
/// Edge cases: an empty `target` returns `comparison` unchanged; an empty
/// `comparison` returns an empty table.
///
/// # Examples
///
/// ```
/// use entitygap_domain::{compute_gap, EntityRecord, EntityTable};
///
/// let comparison = EntityTable::build(vec![vec![
///     EntityRecord::new("https://a.com", "Coffee", 0.9, 2.5),
///     EntityRecord::new("https://b.com", "Espresso", 0.7, 1.2),
/// ]]);
/// let target = EntityTable::build(vec![vec![
///     EntityRecord::new("https://c.com", "Coffee", 0.5, 1.0),
/// ]]);
///
/// let gap = compute_gap(&comparison, &target);
/// assert_eq!(gap.len(), 1);
/// assert_eq!(gap.records()[0].entity_id, "Espresso");
/// ```
pub fn compute_gap(comparison: &EntityTable, target: &EntityTable) -> EntityTable {
    let covered = target.entity_ids();
    let survivors = comparison
        .iter()
        .filter(|record| !covered.contains(record.entity_id.as_str()))
        .cloned()
        .collect();
    EntityTable::from_ordered(survivors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::EntityRecord;
    use proptest::prelude::*;

    fn record(url: &str, id: &str, relevance: f64) -> EntityRecord {
        EntityRecord::new(url, id, relevance, 1.0)
    }

    #[test]
    fn test_gap_excludes_covered_entities() {
        let comparison = EntityTable::build(vec![vec![
            record("https://a.com", "Coffee", 0.9),
            record("https://b.com", "Espresso", 0.7),
            record("https://a.com", "Brazil", 0.4),
        ]]);
        let target = EntityTable::build(vec![vec![record("https://c.com", "Coffee", 0.5)]]);

        let gap = compute_gap(&comparison, &target);
        let ids: Vec<&str> = gap.iter().map(|r| r.entity_id.as_str()).collect();
        assert_eq!(ids, vec!["Espresso", "Brazil"]);
    }

    #[test]
    fn test_gap_against_empty_target_is_identity() {
        let comparison = EntityTable::build(vec![vec![
            record("https://a.com", "Coffee", 0.9),
            record("https://b.com", "Espresso", 0.7),
        ]]);

        let gap = compute_gap(&comparison, &EntityTable::empty());
        assert_eq!(gap, comparison);
    }

    #[test]
    fn test_gap_of_empty_comparison_is_empty() {
        let target = EntityTable::build(vec![vec![record("https://c.com", "Coffee", 0.5)]]);
        let gap = compute_gap(&EntityTable::empty(), &target);
        assert!(gap.is_empty());
    }

    #[test]
    fn test_gap_matches_on_entity_id_only() {
        // Same entity from a different URL with different scores still counts
        // as covered.
        let comparison = EntityTable::build(vec![vec![record("https://a.com", "Coffee", 0.9)]]);
        let target = EntityTable::build(vec![vec![record("https://z.com", "Coffee", 0.01)]]);
        assert!(compute_gap(&comparison, &target).is_empty());
    }

    // Strategy: small tables drawn from a narrow id alphabet so that
    // comparison and target overlap often.
    fn arb_table(max_len: usize) -> impl Strategy<Value = EntityTable> {
        prop::collection::vec(
            ("[a-e]", 0.0f64..1.0).prop_map(|(id, relevance)| {
                EntityRecord::new("https://example.com", id, relevance, 1.0)
            }),
            0..max_len,
        )
        .prop_map(|records| EntityTable::build(vec![records]))
    }

    proptest! {
        #[test]
        fn prop_gap_partitions_comparison(
            comparison in arb_table(12),
            target in arb_table(12),
        ) {
            let gap = compute_gap(&comparison, &target);
            let covered = target.entity_ids();

            // Every survivor is absent from the target.
            for record in gap.iter() {
                prop_assert!(!covered.contains(record.entity_id.as_str()));
            }

            // |gap| + |covered part of comparison| == |comparison|
            let covered_count = comparison
                .iter()
                .filter(|r| covered.contains(r.entity_id.as_str()))
                .count();
            prop_assert_eq!(gap.len() + covered_count, comparison.len());
        }

        #[test]
        fn prop_gap_preserves_relative_order(
            comparison in arb_table(12),
            target in arb_table(12),
        ) {
            let gap = compute_gap(&comparison, &target);
            let covered = target.entity_ids();
            let expected: Vec<&EntityRecord> = comparison
                .iter()
                .filter(|r| !covered.contains(r.entity_id.as_str()))
                .collect();

            prop_assert_eq!(gap.len(), expected.len());
            for (survivor, original) in gap.iter().zip(expected) {
                prop_assert_eq!(survivor, original);
            }
        }
    }
}
