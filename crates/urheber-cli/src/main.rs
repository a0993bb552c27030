//! Urheber CLI - Classify the operators of crawled web domains.

use clap::Parser;
use tracing_subscriber::EnvFilter;
use urheber_cli::commands;
use urheber_cli::{Cli, Command, Config, Formatter};
use urheber_llm::OpenAiProvider;
use urheber_research::ResearchClient;
use urheber_resolver::DomainResolver;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> urheber_cli::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize tracing (log to stderr, stdout carries results)
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let mut config = Config::load(cli.config.as_deref())?;

    // Override store path if specified
    if let Some(path) = cli.store {
        config.store.path = Some(path);
    }

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Resolve(args) => {
            // The blocking HTTP client must be built outside the async runtime
            let provider = OpenAiProvider::new(config.provider.clone())?;
            let resolver = DomainResolver::new(ResearchClient::new(provider, config.research.clone()));
            let store_path = if args.no_store {
                None
            } else {
                Some(config.store_path()?)
            };

            commands::execute_resolve(
                args,
                resolver,
                store_path,
                config.settings.concurrency,
                &formatter,
            )?;
        }
        Command::Lookup(args) => {
            commands::execute_lookup(args, &config.store_path()?, &formatter)?;
        }
    }

    Ok(())
}
