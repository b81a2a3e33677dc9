//! CLI interface using clap
//!
//! Provides the command-line interface for hierex

mod commands;

pub use commands::*;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// hierex - Extract search records with heading hierarchy from HTML
#[derive(Parser, Debug)]
#[command(name = "hierex")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file (defaults to ./hierex.toml, then the user config dir)
    #[arg(short, long, global = true, env = "HIEREX_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (json, jsonl, text)
    #[arg(short = 'o', long, global = true, default_value = "json")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract records from HTML files, directories or stdin
    Extract(ExtractArgs),

    /// Show or initialize configuration
    Config(ConfigArgs),
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Json,
    Jsonl,
    Text,
}

/// Arguments for extract command
#[derive(Parser, Debug)]
pub struct ExtractArgs {
    /// HTML files or directories; `-` reads stdin
    #[arg(required = true)]
    pub inputs: Vec<String>,

    /// CSS selector of content nodes (overrides config)
    #[arg(short, long)]
    pub selector: Option<String>,

    /// Tag to strip from records, repeatable (overrides config)
    #[arg(short = 'x', long = "exclude")]
    pub exclude: Vec<String>,
}

/// Arguments for config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Write the default configuration to this file
    #[arg(long)]
    pub init: Option<PathBuf>,

    /// Overwrite an existing file with --init
    #[arg(short, long)]
    pub force: bool,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
