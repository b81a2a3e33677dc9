//! hierex - HTML to search records
//!
//! Reads HTML documents and prints one record per content node, annotated
//! with the heading hierarchy, anchor and ranking signals.

use anyhow::Result;
use hierex::cli::{
    effective_config, extract, print_documents_json, print_documents_jsonl,
    print_documents_text, Cli, Commands, OutputFormat,
};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse_args();

    // Setup logging on stderr so stdout stays parseable
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Extract(args) => {
            let config = effective_config(config_path, args.selector.as_deref(), &args.exclude)?;
            let documents = extract(&args.inputs, &config)?;

            match cli.format {
                OutputFormat::Json => print_documents_json(&documents)?,
                OutputFormat::Jsonl => print_documents_jsonl(&documents)?,
                OutputFormat::Text => print_documents_text(&documents),
            }
        }

        Commands::Config(args) => {
            hierex::cli::config(config_path, args.init.as_deref(), args.force)?;
        }
    }

    Ok(())
}
