//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Entitygap CLI - compare the entities in top search results against a
/// target page to find content gaps.
#[derive(Debug, Parser)]
#[command(name = "entitygap")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (entity names only)
    Quiet,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => Self::Table,
            CliFormat::Json => Self::Json,
            CliFormat::Quiet => Self::Quiet,
        }
    }
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the full gap analysis and export the three CSV tables
    Analyze(AnalyzeArgs),

    /// Fetch the ranked result URLs for a query
    Search(SearchArgs),

    /// Extract entities from a single URL
    Extract(ExtractArgs),
}

/// Arguments for the analyze command.
#[derive(Debug, Parser)]
pub struct AnalyzeArgs {
    /// Search keywords
    #[arg(short, long)]
    pub query: String,

    /// The page whose entity coverage is being evaluated
    #[arg(short, long)]
    pub target_url: String,

    /// Number of search results to compare against (1-100)
    #[arg(short = 'n', long)]
    pub num_results: Option<usize>,

    /// Country/TLD variant of the search index (e.g. "com", "de")
    #[arg(short, long)]
    pub country: Option<String>,

    /// TextRazor API key
    #[arg(short, long, env = "TEXTRAZOR_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Maximum extraction calls in flight at once
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Directory the three CSV artifacts are written to
    #[arg(short, long, default_value = ".")]
    pub out_dir: PathBuf,
}

/// Arguments for the search command.
#[derive(Debug, Parser)]
pub struct SearchArgs {
    /// Search keywords
    pub query: String,

    /// Number of results to fetch
    #[arg(short = 'n', long)]
    pub num_results: Option<usize>,

    /// Country/TLD variant of the search index
    #[arg(short, long)]
    pub country: Option<String>,
}

/// Arguments for the extract command.
#[derive(Debug, Parser)]
pub struct ExtractArgs {
    /// URL to analyze
    pub url: String,

    /// TextRazor API key
    #[arg(short, long, env = "TEXTRAZOR_API_KEY", hide_env_values = true)]
    pub api_key: String,
}
