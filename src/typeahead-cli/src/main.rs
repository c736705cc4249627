//! `typeahead` binary entry point.

use anyhow::Result;
use clap::Parser;

use typeahead_cli::{Cli, dispatch_command};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    dispatch_command(cli).await
}
