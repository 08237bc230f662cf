//! Print the OpenAPI document as JSON.

use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use utoipa::OpenApi;
use wardroom::doc::ApiDoc;

/// Dump the Wardroom OpenAPI document.
#[derive(Debug, Parser)]
#[command(name = "openapi-dump")]
struct Cli {
    /// Write to this file instead of standard output.
    #[arg(long, short)]
    output: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let json = ApiDoc::openapi().to_pretty_json()?;
    match cli.output {
        Some(path) => std::fs::write(path, json)?,
        None => writeln!(std::io::stdout().lock(), "{json}")?,
    }
    Ok(())
}
