//! CLI command definitions and argument parsing.

use crate::config::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Urheber CLI - Classify the operators of crawled web domains.
#[derive(Debug, Parser)]
#[command(name = "urheber")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "URHEBER_CONFIG")]
    pub config: Option<PathBuf>,

    /// SQLite database with known classifications
    #[arg(short, long, global = true, env = "URHEBER_STORE")]
    pub store: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// JSON format (default)
    Json,
    /// One line per document
    Text,
}

impl From<CliFormat> for OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Json => OutputFormat::Json,
            CliFormat::Text => OutputFormat::Text,
        }
    }
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Classify the domains of one or more document files
    Resolve(ResolveArgs),

    /// Look up a domain in the store only
    Lookup(LookupArgs),
}

/// Arguments for the resolve command.
#[derive(Debug, Parser)]
pub struct ResolveArgs {
    /// JSON files holding a document or an array of documents
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Skip the store and research every domain
    #[arg(long)]
    pub no_store: bool,

    /// Print the documents with the result merged in
    #[arg(long)]
    pub merge: bool,

    /// Record research results in the store
    #[arg(long, conflicts_with = "no_store")]
    pub write_back: bool,

    /// Documents resolved in parallel
    #[arg(short = 'j', long)]
    pub concurrency: Option<usize>,
}

/// Arguments for the lookup command.
#[derive(Debug, Parser)]
pub struct LookupArgs {
    /// Domain to look up (e.g. example.org)
    pub domain: String,
}
