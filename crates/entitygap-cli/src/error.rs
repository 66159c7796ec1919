//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Analysis pipeline error
    #[error("Analysis error: {0}")]
    Pipeline(#[from] entitygap_pipeline::PipelineError),

    /// Search provider error
    #[error("Search error: {0}")]
    Search(#[from] entitygap_search::SearchError),

    /// Entity extraction error
    #[error("Extraction error: {0}")]
    Extraction(#[from] entitygap_extractor::ExtractError),

    /// CSV export error
    #[error("Export error: {0}")]
    Export(#[from] entitygap_export::ExportError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}
