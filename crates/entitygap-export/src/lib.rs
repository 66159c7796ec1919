//! Entitygap Export Layer
//!
//! Serializes an [`EntityTable`] to CSV and parses it back. One header row
//! naming the seven record fields, one row per record. The `type_tags`
//! sequence is flattened into a single field joined by [`TAG_SEPARATOR`],
//! which is distinct from the comma field delimiter so the format stays
//! round-trippable; quoting and escaping follow RFC 4180 via the `csv`
//! crate. An absent `knowledge_base_link` is written as an empty field.
//!
//! A tag that itself contains the separator is not round-trippable; the
//! upstream taxonomy labels (`/food/beverage` and the like) never carry it.
//!
//! # Examples
//!
//! ```
//! use entitygap_domain::{EntityRecord, EntityTable};
//! use entitygap_export::{to_csv, from_csv};
//!
//! let table = EntityTable::build(vec![vec![
//!     EntityRecord::new("https://a.com", "Coffee", 0.9, 2.5),
//! ]]);
//! let bytes = to_csv(&table).unwrap();
//! assert_eq!(from_csv(&bytes).unwrap(), table);
//! ```

#![warn(missing_docs)]

use entitygap_domain::{EntityRecord, EntityTable};
use thiserror::Error;

/// Column names, in data-model order
pub const COLUMNS: [&str; 7] = [
    "source_url",
    "entity_id",
    "relevance_score",
    "confidence_score",
    "type_tags",
    "matched_text",
    "knowledge_base_link",
];

/// Separator joining the elements of `type_tags` within one CSV field
pub const TAG_SEPARATOR: char = ';';

/// Errors that can occur during export or re-import
#[derive(Error, Debug)]
pub enum ExportError {
    /// A record could not be written or read as CSV
    #[error("Serialization error: {0}")]
    Serialization(#[from] csv::Error),

    /// The input being parsed does not carry the expected header row
    #[error("Unexpected header: {0}")]
    InvalidHeader(String),

    /// A field could not be interpreted (missing column, bad number)
    #[error("Invalid field in row {row}: {message}")]
    InvalidField {
        /// 1-based data row number
        row: usize,
        /// What was wrong with it
        message: String,
    },
}

/// Serialize a table to CSV bytes
pub fn to_csv(table: &EntityTable) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(COLUMNS)?;

    for record in table.iter() {
        writer.write_record([
            record.source_url.as_str(),
            record.entity_id.as_str(),
            // f64 Display emits the shortest string that parses back exactly
            &record.relevance_score.to_string(),
            &record.confidence_score.to_string(),
            &join_tags(&record.type_tags),
            record.matched_text.as_str(),
            record.knowledge_base_link.as_deref().unwrap_or(""),
        ])?;
    }

    writer
        .into_inner()
        .map_err(|e| ExportError::Serialization(csv::Error::from(e.into_error())))
}

/// Parse CSV bytes produced by [`to_csv`] back into a table.
///
/// The row order of the input is preserved as-is; no re-sorting happens on
/// the way in.
pub fn from_csv(bytes: &[u8]) -> Result<EntityTable, ExportError> {
    let mut reader = csv::Reader::from_reader(bytes);

    let headers = reader.headers()?.clone();
    if headers.iter().ne(COLUMNS) {
        return Err(ExportError::InvalidHeader(headers.iter().collect::<Vec<_>>().join(",")));
    }

    let mut records = Vec::new();
    for (index, row) in reader.records().enumerate() {
        let row = row?;
        records.push(parse_row(&row, index + 1)?);
    }
    Ok(EntityTable::from_ordered(records))
}

fn join_tags(tags: &[String]) -> String {
    tags.join(&TAG_SEPARATOR.to_string())
}

fn split_tags(field: &str) -> Vec<String> {
    if field.is_empty() {
        return Vec::new();
    }
    field.split(TAG_SEPARATOR).map(str::to_string).collect()
}

fn parse_row(row: &csv::StringRecord, row_number: usize) -> Result<EntityRecord, ExportError> {
    let field = |index: usize| {
        row.get(index).ok_or_else(|| ExportError::InvalidField {
            row: row_number,
            message: format!("missing column '{}'", COLUMNS[index]),
        })
    };
    let score = |index: usize| -> Result<f64, ExportError> {
        field(index)?.parse().map_err(|_| ExportError::InvalidField {
            row: row_number,
            message: format!("'{}' is not a number", COLUMNS[index]),
        })
    };

    let mut record = EntityRecord::new(field(0)?, field(1)?, score(2)?, score(3)?)
        .with_type_tags(split_tags(field(4)?))
        .with_matched_text(field(5)?);

    let link = field(6)?;
    if !link.is_empty() {
        record = record.with_knowledge_base_link(link);
    }
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> EntityTable {
        EntityTable::build(vec![vec![
            EntityRecord::new("https://a.com", "Coffee", 0.9, 2.5)
                .with_type_tags(vec![
                    "/food/beverage".to_string(),
                    "/business/product".to_string(),
                ])
                .with_matched_text("coffee, freshly roasted")
                .with_knowledge_base_link("http://en.wikipedia.org/wiki/Coffee"),
            EntityRecord::new("https://b.com", "Brazil", 0.4, 1.8).with_matched_text("Brazil"),
        ]])
    }

    #[test]
    fn test_header_row() {
        let bytes = to_csv(&EntityTable::empty()).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(
            text.trim_end(),
            "source_url,entity_id,relevance_score,confidence_score,type_tags,matched_text,knowledge_base_link"
        );
    }

    #[test]
    fn test_round_trip_preserves_every_field() {
        let table = sample_table();
        let parsed = from_csv(&to_csv(&table).unwrap()).unwrap();
        assert_eq!(parsed, table);
    }

    #[test]
    fn test_multi_element_tags_are_flattened_and_restored() {
        let bytes = to_csv(&sample_table()).unwrap();
        let text = String::from_utf8(bytes.clone()).unwrap();
        assert!(text.contains("/food/beverage;/business/product"));

        let parsed = from_csv(&bytes).unwrap();
        assert_eq!(parsed.records()[0].type_tags.len(), 2);
    }

    #[test]
    fn test_empty_link_round_trips_as_absent() {
        let parsed = from_csv(&to_csv(&sample_table()).unwrap()).unwrap();
        assert!(parsed.records()[1].knowledge_base_link.is_none());
    }

    #[test]
    fn test_field_delimiter_inside_value_is_quoted() {
        let bytes = to_csv(&sample_table()).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.contains("\"coffee, freshly roasted\""));
    }

    #[test]
    fn test_scores_round_trip_exactly() {
        let table = EntityTable::build(vec![vec![EntityRecord::new(
            "https://a.com",
            "Pi",
            0.30000000000000004,
            1.0e-12,
        )]]);
        let parsed = from_csv(&to_csv(&table).unwrap()).unwrap();
        assert_eq!(parsed.records()[0].relevance_score, 0.30000000000000004);
        assert_eq!(parsed.records()[0].confidence_score, 1.0e-12);
    }

    #[test]
    fn test_wrong_header_rejected() {
        let err = from_csv(b"url,entity\na,b\n").unwrap_err();
        assert!(matches!(err, ExportError::InvalidHeader(_)));
    }

    #[test]
    fn test_bad_score_rejected() {
        let bytes = b"source_url,entity_id,relevance_score,confidence_score,type_tags,matched_text,knowledge_base_link\n\
                      https://a.com,Coffee,not-a-number,1.0,,,\n";
        let err = from_csv(bytes).unwrap_err();
        assert!(matches!(err, ExportError::InvalidField { row: 1, .. }));
    }
}
