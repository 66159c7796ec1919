//! Entitygap Pipeline
//!
//! Wires search and extraction into the end-to-end entity gap analysis.
//!
//! # Overview
//!
//! One run takes (query, locale, result count, target URL, credential),
//! fetches the ranked result URLs, extracts entities for every result URL
//! and for the target page, aggregates both into relevance-sorted tables,
//! and derives the gap table - the entities the competition mentions that
//! the target page does not.
//!
//! # Architecture
//!
//! ```text
//! Query → SearchProvider → URLs → EntityExtractor (bounded fan-out)
//!                                        ↓
//!            gap table ← compute_gap ← EntityTable::build
//! ```
//!
//! # Key Features
//!
//! - **Bounded fan-out**: comparison URLs are analyzed concurrently under a
//!   configured limit, respecting upstream rate limits
//! - **All-or-nothing runs**: the first hard failure aborts the run and
//!   cancels in-flight calls; the three tables are always a consistent
//!   snapshot of the same run
//! - **Inspectable caching**: search and extraction results are memoized in
//!   an explicit FIFO-bounded cache with hit/miss counters
//!
//! # Example Usage
//!
//! ```no_run
//! use entitygap_pipeline::{AnalysisPipeline, AnalysisRequest, PipelineConfig};
//! use entitygap_search::GoogleSearchProvider;
//! use entitygap_extractor::TextRazorExtractor;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pipeline = AnalysisPipeline::new(
//!     GoogleSearchProvider::new(),
//!     TextRazorExtractor::new(),
//!     PipelineConfig::default(),
//! );
//!
//! let request = AnalysisRequest {
//!     query: "coffee".to_string(),
//!     locale: "com".to_string(),
//!     num_results: 10,
//!     target_url: "https://example.com/coffee-guide".to_string(),
//!     credential: "textrazor-api-key".to_string(),
//! };
//!
//! let report = pipeline.run(request).await?;
//! println!("Gap entities: {}", report.gap.len());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod cache;
mod config;
mod error;
mod pipeline;
mod types;


pub use cache::{AnalysisCache, CacheKey};
pub use config::PipelineConfig;
pub use error::PipelineError;
pub use pipeline::AnalysisPipeline;
pub use types::{AnalysisMetadata, AnalysisReport, AnalysisRequest};
