//! Error types for the analysis pipeline

use thiserror::Error;

/// Errors that can occur during one analysis run
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Malformed caller input; surfaced before any remote call
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The search provider failed; no tables were produced
    #[error("Search failed: {0}")]
    Search(String),

    /// Extraction failed for a URL; the run was aborted
    #[error("Extraction failed for {url}: {message}")]
    Extraction {
        /// URL whose extraction failed
        url: String,
        /// Underlying failure description
        message: String,
    },

    /// An extraction call exceeded the configured timeout
    #[error("Extraction timed out for {url}")]
    Timeout {
        /// URL whose extraction timed out
        url: String,
    },
}
