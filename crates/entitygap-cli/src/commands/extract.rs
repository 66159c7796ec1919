//! Extract command implementation.

use crate::cli::ExtractArgs;
use crate::error::Result;
use crate::output::Formatter;
use entitygap_domain::EntityTable;
use entitygap_extractor::TextRazorExtractor;

/// Execute the extract command: analyze one URL and print its entities,
/// relevance descending.
pub async fn execute_extract(args: ExtractArgs, formatter: &Formatter) -> Result<()> {
    let extractor = TextRazorExtractor::new();
    let records = extractor.analyze_url(&args.url, &args.api_key).await?;
    let table = EntityTable::build(vec![records]);

    println!("{}", formatter.format_records(table.records())?);
    Ok(())
}
