//! Analyze command implementation.

use crate::cli::AnalyzeArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use entitygap_extractor::TextRazorExtractor;
use entitygap_pipeline::{AnalysisPipeline, AnalysisRequest, PipelineConfig};
use entitygap_search::GoogleSearchProvider;
use std::fs;

/// File names of the three exported artifacts
const COMPARISON_FILE: &str = "comparison.csv";
const TARGET_FILE: &str = "target.csv";
const GAP_FILE: &str = "gap.csv";

/// Execute the analyze command: run the full pipeline and export the
/// comparison, target and gap tables as CSV.
pub async fn execute_analyze(
    args: AnalyzeArgs,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    let pipeline_config = PipelineConfig {
        max_concurrency: args.concurrency.unwrap_or(config.defaults.concurrency),
        ..PipelineConfig::default()
    };
    pipeline_config.validate().map_err(CliError::Config)?;
    let pipeline = AnalysisPipeline::new(
        GoogleSearchProvider::new(),
        TextRazorExtractor::new(),
        pipeline_config,
    );

    let request = AnalysisRequest {
        query: args.query,
        locale: args
            .country
            .unwrap_or_else(|| config.defaults.country.clone()),
        num_results: args.num_results.unwrap_or(config.defaults.num_results),
        target_url: args.target_url,
        credential: args.api_key,
    };

    let report = pipeline.run(request).await?;

    fs::create_dir_all(&args.out_dir)?;
    for (name, table) in [
        (COMPARISON_FILE, &report.comparison),
        (TARGET_FILE, &report.target),
        (GAP_FILE, &report.gap),
    ] {
        let path = args.out_dir.join(name);
        fs::write(&path, entitygap_export::to_csv(table)?)?;
        println!("{}", formatter.info(&format!("Wrote {}", path.display())));
    }

    println!("{}", formatter.report_summary(&report));
    println!();
    println!("{}", formatter.format_records(report.gap.records())?);

    Ok(())
}
