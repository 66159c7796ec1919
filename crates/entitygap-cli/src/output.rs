//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use entitygap_domain::EntityRecord;
use entitygap_pipeline::AnalysisReport;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format entity records.
    pub fn format_records(&self, records: &[EntityRecord]) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_records_json(records),
            OutputFormat::Table => self.format_records_table(records),
            OutputFormat::Quiet => self.format_records_quiet(records),
        }
    }

    /// Format records as JSON.
    fn format_records_json(&self, records: &[EntityRecord]) -> Result<String> {
        Ok(serde_json::to_string_pretty(records)?)
    }

    /// Format records as a table.
    fn format_records_table(&self, records: &[EntityRecord]) -> Result<String> {
        if records.is_empty() {
            return Ok(self.colorize("No entities found.", "yellow"));
        }

        let mut builder = Builder::default();
        builder.push_record(["Entity", "Relevance", "Confidence", "Types", "Source"]);

        for record in records {
            builder.push_record([
                &record.entity_id,
                &format!("{:.3}", record.relevance_score),
                &format!("{:.3}", record.confidence_score),
                &record.type_tags.join(";"),
                &record.source_url,
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        Ok(table.to_string())
    }

    /// Format records in quiet mode (entity names only).
    fn format_records_quiet(&self, records: &[EntityRecord]) -> Result<String> {
        let ids: Vec<&str> = records.iter().map(|r| r.entity_id.as_str()).collect();
        Ok(ids.join("\n"))
    }

    /// Format a URL list, one per line with its rank.
    pub fn format_urls(&self, urls: &[String]) -> String {
        if urls.is_empty() {
            return self.colorize("No results found.", "yellow");
        }
        urls.iter()
            .enumerate()
            .map(|(rank, url)| format!("{:>3}. {}", rank + 1, url))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Format the post-run summary line.
    pub fn report_summary(&self, report: &AnalysisReport) -> String {
        let meta = &report.metadata;
        self.success(&format!(
            "Analyzed {} result page(s) in {}ms: {} comparison, {} target, {} gap entities \
             ({} cache hit(s))",
            meta.urls_analyzed.len(),
            meta.elapsed_ms,
            report.comparison.len(),
            report.target.len(),
            report.gap.len(),
            meta.cache_hits,
        ))
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_record() -> EntityRecord {
        EntityRecord::new("https://a.com", "Coffee", 0.9, 2.5)
            .with_type_tags(vec!["/food/beverage".to_string()])
            .with_matched_text("coffee")
    }

    #[test]
    fn test_json_format() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_records(&[create_test_record()]).unwrap();
        assert!(output.contains("entity_id"));
        assert!(output.contains("relevance_score"));
    }

    #[test]
    fn test_quiet_format() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let output = formatter.format_records(&[create_test_record()]).unwrap();
        assert_eq!(output, "Coffee");
    }

    #[test]
    fn test_table_format() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_records(&[create_test_record()]).unwrap();
        assert!(output.contains("Entity"));
        assert!(output.contains("Relevance"));
        assert!(output.contains("Coffee"));
    }

    #[test]
    fn test_url_list_is_ranked() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let urls = vec!["https://a.com".to_string(), "https://b.com".to_string()];
        let output = formatter.format_urls(&urls);
        assert!(output.contains("1. https://a.com"));
        assert!(output.contains("2. https://b.com"));
    }
}
