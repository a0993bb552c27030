//! Lookup command implementation.

use crate::cli::LookupArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use std::path::Path;
use tracing::warn;
use urheber_resolver::find_known_urheber;
use urheber_store::SqliteStore;

/// Execute the lookup command.
///
/// The store is opened read-only; a missing store reports the domain as not found.
pub fn execute_lookup(args: LookupArgs, store_path: &Path, formatter: &Formatter) -> Result<()> {
    let domain = args.domain.trim();
    if domain.is_empty() {
        return Err(CliError::InvalidInput("Domain must not be empty".to_string()));
    }

    let found = if store_path.exists() {
        let store = SqliteStore::open_read_only(store_path)?;
        find_known_urheber(&store, domain)
    } else {
        warn!("No store at {}", store_path.display());
        None
    };

    println!("{}", formatter.format_lookup(domain, found.map(|u| u.as_str())));

    Ok(())
}
