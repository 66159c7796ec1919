//! Search command implementation.

use crate::cli::SearchArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use entitygap_domain::traits::SearchProvider;
use entitygap_search::GoogleSearchProvider;

/// Execute the search command: fetch and print the ranked result URLs.
pub async fn execute_search(
    args: SearchArgs,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    let provider = GoogleSearchProvider::new();
    let urls = provider
        .fetch_result_urls(
            &args.query,
            args.country
                .as_deref()
                .unwrap_or(&config.defaults.country),
            args.num_results.unwrap_or(config.defaults.num_results),
        )
        .await?;

    println!("{}", formatter.format_urls(&urls));
    Ok(())
}
