//! `typeahead search`: one query, options on stdout.

use std::io::Write;

use anyhow::{Context, Result, bail};
use typeahead::{DefaultFormatter, ResultSet, SearchProvider, is_placeholder_id};

use crate::build_provider;
use crate::cli::SearchArgs;
use crate::config::AppConfig;

pub async fn run(args: SearchArgs, config: AppConfig) -> Result<()> {
    let Some(provider) = build_provider(&config)? else {
        bail!("No search source configured; pass --endpoint or --fixture, or set TYPEAHEAD_ENDPOINT");
    };
    let results = search(provider.as_ref(), &args.query).await?;

    let mut stdout = std::io::stdout().lock();
    for option in results.options() {
        serde_json::to_writer(&mut stdout, option)?;
        writeln!(stdout)?;
    }
    Ok(())
}

/// Run one query through `provider` and project the records for display.
pub async fn search(provider: &dyn SearchProvider, query: &str) -> Result<ResultSet> {
    let query = query.trim();
    if query.is_empty() {
        bail!("Query is empty");
    }
    if is_placeholder_id(query) {
        bail!("'{query}' is a placeholder identifier and cannot be searched");
    }
    let records = provider
        .search(query)
        .await
        .with_context(|| format!("Search for '{query}' failed"))?;
    tracing::debug!(count = records.len(), "Search completed");
    Ok(ResultSet::from_records(records, &DefaultFormatter))
}
