//! Core pipeline implementation

use crate::cache::{AnalysisCache, CacheKey};
use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::types::{AnalysisMetadata, AnalysisReport, AnalysisRequest};
use entitygap_domain::traits::{EntityExtractor, SearchProvider};
use entitygap_domain::{compute_gap, EntityRecord, EntityTable};
use futures::stream::{self, StreamExt};
use std::time::Instant;
use tokio::time::timeout;
use tracing::{debug, info};

/// The orchestrator for one analysis run.
///
/// Generic over the search and extraction seams so tests can substitute
/// deterministic fakes. One instance owns its cache; concurrent runs on the
/// same instance share memoized results but no other state.
pub struct AnalysisPipeline<S, E>
where
    S: SearchProvider,
    E: EntityExtractor,
{
    search: S,
    extractor: E,
    cache: AnalysisCache,
    config: PipelineConfig,
}

impl<S, E> AnalysisPipeline<S, E>
where
    S: SearchProvider + Send + Sync,
    E: EntityExtractor + Send + Sync,
    S::Error: std::fmt::Display,
    E::Error: std::fmt::Display,
{
    /// Create a new pipeline
    pub fn new(search: S, extractor: E, config: PipelineConfig) -> Self {
        let cache = AnalysisCache::new(config.cache_capacity);
        Self {
            search,
            extractor,
            cache,
            config,
        }
    }

    /// The pipeline's memoization cache
    pub fn cache(&self) -> &AnalysisCache {
        &self.cache
    }

    /// Execute one end-to-end run.
    ///
    /// All-or-nothing: the first hard failure aborts the run, cancels any
    /// in-flight extraction calls, and produces no tables.
    pub async fn run(&self, request: AnalysisRequest) -> Result<AnalysisReport, PipelineError> {
        self.validate(&request)?;

        let started = Instant::now();
        let hits_before = self.cache.hits();
        let misses_before = self.cache.misses();

        info!(
            "Starting analysis: query '{}', locale '{}', {} results, target {}",
            request.query, request.locale, request.num_results, request.target_url
        );

        let urls = self
            .fetch_urls(&request.query, &request.locale, request.num_results)
            .await?;
        info!("Search returned {} result URLs", urls.len());

        let per_url = self.extract_all(&urls, &request.credential).await?;
        let comparison = EntityTable::build(per_url);

        let target_records = self
            .extract_all(std::slice::from_ref(&request.target_url), &request.credential)
            .await?;
        let target = EntityTable::build(target_records);

        let gap = compute_gap(&comparison, &target);
        info!(
            "Analysis complete: {} comparison, {} target, {} gap entities",
            comparison.len(),
            target.len(),
            gap.len()
        );

        let metadata = AnalysisMetadata {
            urls_analyzed: urls,
            cache_hits: self.cache.hits() - hits_before,
            cache_misses: self.cache.misses() - misses_before,
            elapsed_ms: started.elapsed().as_millis() as u64,
        };

        Ok(AnalysisReport {
            comparison,
            target,
            gap,
            metadata,
        })
    }

    fn validate(&self, request: &AnalysisRequest) -> Result<(), PipelineError> {
        if request.num_results < 1 || request.num_results > self.config.max_results {
            return Err(PipelineError::InvalidArgument(format!(
                "num_results must be in [1, {}], got {}",
                self.config.max_results, request.num_results
            )));
        }
        if request.target_url.is_empty() {
            return Err(PipelineError::InvalidArgument(
                "target_url must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    async fn fetch_urls(
        &self,
        query: &str,
        locale: &str,
        count: usize,
    ) -> Result<Vec<String>, PipelineError> {
        let key = CacheKey::Search {
            query: query.to_string(),
            locale: locale.to_string(),
            count,
        };
        if let Some(urls) = self.cache.get_urls(&key) {
            debug!("Search cache hit for '{}'", query);
            return Ok(urls);
        }

        let urls = self
            .search
            .fetch_result_urls(query, locale, count)
            .await
            .map_err(|e| PipelineError::Search(e.to_string()))?;
        self.cache.put_urls(key, urls.clone());
        Ok(urls)
    }

    /// Extract entities for every URL, preserving input order in the output.
    ///
    /// Uncached URLs are fanned out with at most `max_concurrency` calls in
    /// flight; the first failure returns immediately, and dropping the
    /// stream cancels whatever is still in flight.
    async fn extract_all(
        &self,
        urls: &[String],
        credential: &str,
    ) -> Result<Vec<Vec<EntityRecord>>, PipelineError> {
        let with_credential = !credential.is_empty();
        let mut per_url: Vec<Option<Vec<EntityRecord>>> = vec![None; urls.len()];

        let mut pending = Vec::new();
        for (index, url) in urls.iter().enumerate() {
            let key = CacheKey::Extraction {
                url: url.clone(),
                with_credential,
            };
            match self.cache.get_records(&key) {
                Some(records) => {
                    debug!("Extraction cache hit for {}", url);
                    per_url[index] = Some(records);
                }
                None => pending.push((index, url.clone())),
            }
        }

        let extraction_timeout = self.config.extraction_timeout();
        let mut in_flight = stream::iter(pending.into_iter().map(|(index, url)| {
            let extractor = &self.extractor;
            async move {
                let outcome =
                    timeout(extraction_timeout, extractor.extract_entities(&url, credential))
                        .await;
                (index, url, outcome)
            }
        }))
        .buffer_unordered(self.config.max_concurrency);

        while let Some((index, url, outcome)) = in_flight.next().await {
            match outcome {
                Err(_) => return Err(PipelineError::Timeout { url }),
                Ok(Err(e)) => {
                    return Err(PipelineError::Extraction {
                        url,
                        message: e.to_string(),
                    })
                }
                Ok(Ok(records)) => {
                    debug!("Extracted {} entities from {}", records.len(), url);
                    self.cache.put_records(
                        CacheKey::Extraction {
                            url,
                            with_credential,
                        },
                        records.clone(),
                    );
                    per_url[index] = Some(records);
                }
            }
        }

        // Every slot was filled either from the cache or by the fan-out.
        Ok(per_url
            .into_iter()
            .map(Option::unwrap_or_default)
            .collect())
    }
}
