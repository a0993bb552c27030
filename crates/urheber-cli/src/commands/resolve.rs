//! Resolve command implementation.

use crate::cli::ResolveArgs;
use crate::config::ensure_parent_dir;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use serde_json::Value;
use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{info, warn};
use urheber_domain::traits::DomainResearcher;
use urheber_domain::{ClassificationResult, Document, Method};
use urheber_resolver::DomainResolver;
use urheber_store::SqliteStore;

/// Execute the resolve command.
pub fn execute_resolve<R>(
    args: ResolveArgs,
    resolver: DomainResolver<R>,
    store_path: Option<PathBuf>,
    concurrency: usize,
    formatter: &Formatter,
) -> Result<()>
where
    R: DomainResearcher + Send + Sync + 'static,
    R::Error: Display,
{
    let mut documents = load_documents(&args.files)?;
    info!("Loaded {} document(s)", documents.len());

    let store = match store_path {
        Some(path) if !args.no_store => open_store(&path),
        _ => None,
    };

    let concurrency = args.concurrency.unwrap_or(concurrency);
    if concurrency == 0 {
        return Err(CliError::InvalidInput(
            "concurrency must be greater than 0".to_string(),
        ));
    }

    let results = resolve_documents(
        Arc::new(resolver),
        store.clone(),
        documents.clone(),
        concurrency,
    )?;

    info!(
        "Classified {} of {} document(s)",
        results.iter().filter(|r| r.is_classified()).count(),
        results.len()
    );

    if args.write_back {
        if let Some(store) = &store {
            write_back(store, &results);
        }
    }

    if args.merge {
        for (document, result) in documents.iter_mut().zip(&results) {
            if !result.merge_into(document) {
                warn!("Cannot merge result into non-object document");
            }
        }
        println!("{}", formatter.format_documents(&documents)?);
    } else {
        println!("{}", formatter.format_results(&results)?);
    }

    Ok(())
}

/// Read documents from JSON files; a file holds one document or an array.
pub fn load_documents(files: &[PathBuf]) -> Result<Vec<Value>> {
    let mut documents = Vec::new();

    for file in files {
        let contents = fs::read_to_string(file)?;
        let value: Value = serde_json::from_str(&contents).map_err(|e| {
            CliError::InvalidInput(format!("{}: {}", file.display(), e))
        })?;

        match value {
            Value::Array(items) => documents.extend(items),
            other => documents.push(other),
        }
    }

    Ok(documents)
}

/// Open the store, creating it on first use.
///
/// Resolution continues without a cache if that fails.
fn open_store(path: &Path) -> Option<Arc<SqliteStore>> {
    let opened =
        ensure_parent_dir(path).and_then(|()| SqliteStore::new(path).map_err(CliError::from));
    match opened {
        Ok(store) => Some(Arc::new(store)),
        Err(e) => {
            warn!(
                "Cannot open store at {}: {}; continuing without cache",
                path.display(),
                e
            );
            None
        }
    }
}

/// Resolve documents on blocking worker threads, returning results in input order.
pub fn resolve_documents<R>(
    resolver: Arc<DomainResolver<R>>,
    store: Option<Arc<SqliteStore>>,
    documents: Vec<Value>,
    concurrency: usize,
) -> Result<Vec<ClassificationResult>>
where
    R: DomainResearcher + Send + Sync + 'static,
    R::Error: Display,
{
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let total = documents.len();

    runtime.block_on(async move {
        let semaphore = Arc::new(Semaphore::new(concurrency));
        let mut tasks = JoinSet::new();

        for (index, raw) in documents.into_iter().enumerate() {
            let document: Document = serde_json::from_value(raw).unwrap_or_else(|e| {
                warn!("Document {} is not a valid document: {}", index, e);
                Document::default()
            });

            let permit = Arc::clone(&semaphore)
                .acquire_owned()
                .await
                .map_err(|e| CliError::Task(e.to_string()))?;
            let resolver = Arc::clone(&resolver);
            let store = store.clone();

            tasks.spawn_blocking(move || {
                let _permit = permit;
                (index, resolver.resolve(&document, store.as_deref()))
            });
        }

        let mut results: Vec<Option<ClassificationResult>> = vec![None; total];
        while let Some(joined) = tasks.join_next().await {
            let (index, result) = joined.map_err(|e| CliError::Task(e.to_string()))?;
            results[index] = Some(result);
        }

        Ok(results.into_iter().flatten().collect())
    })
}

/// Record research results so later runs hit the cache.
fn write_back(store: &SqliteStore, results: &[ClassificationResult]) {
    for result in results.iter().filter(|r| r.method() == Method::Research) {
        let Some(domain) = result.domain() else {
            continue;
        };
        match store.insert_record(domain, result.urheber().label()) {
            Ok(id) => info!("Stored {} as {} (record {})", domain, result.urheber(), id),
            Err(e) => warn!("Cannot store classification for {}: {}", domain, e),
        }
    }
}
