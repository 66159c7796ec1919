//! Request and report types for one analysis run

use entitygap_domain::EntityTable;

/// Inputs for one end-to-end analysis run
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    /// Free-text search query
    pub query: String,

    /// Locale/TLD selector for the search index (e.g. "com", "de")
    pub locale: String,

    /// How many ranked results to compare against, within [1, max_results]
    pub num_results: usize,

    /// The page whose entity coverage is being evaluated
    pub target_url: String,

    /// API credential, passed through opaquely to the extraction service
    pub credential: String,
}

/// Everything one successful run produces.
///
/// The three tables are always a mutually consistent snapshot: a failed run
/// yields no report at all.
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    /// All entities extracted from the search results, relevance descending
    pub comparison: EntityTable,

    /// All entities extracted from the target page, relevance descending
    pub target: EntityTable,

    /// Comparison records whose entity is absent from the target page
    pub gap: EntityTable,

    /// Run statistics
    pub metadata: AnalysisMetadata,
}

/// Statistics about one run
#[derive(Debug, Clone, Default)]
pub struct AnalysisMetadata {
    /// The result URLs that were analyzed, in ranked order
    pub urls_analyzed: Vec<String>,

    /// Cache hits observed during this run
    pub cache_hits: usize,

    /// Cache misses observed during this run
    pub cache_misses: usize,

    /// Wall-clock duration of the run in milliseconds
    pub elapsed_ms: u64,
}
