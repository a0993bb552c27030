//! Domain resolver: cache lookup with research fallback

use crate::cache::find_known_urheber;
use std::convert::Infallible;
use std::fmt::Display;
use tracing::{debug, warn};
use urheber_domain::traits::{DomainQuery, DomainResearcher, DomainStore};
use urheber_domain::{ClassificationResult, Document, DomainRecord};

/// Resolves the urheber of a document's domain
///
/// Holds only the researcher; no state changes between calls, so one
/// resolver can serve many documents, concurrently if `R` is `Sync`.
pub struct DomainResolver<R>
where
    R: DomainResearcher,
{
    researcher: R,
}

/// Placeholder store type for resolution without a cache
enum NoStore {}

impl DomainStore for NoStore {
    type Error = Infallible;

    fn find_records(&self, _query: &DomainQuery) -> Result<Vec<DomainRecord>, Self::Error> {
        match *self {}
    }
}

impl<R> DomainResolver<R>
where
    R: DomainResearcher,
    R::Error: Display,
{
    /// Create a new resolver around a researcher
    pub fn new(researcher: R) -> Self {
        Self { researcher }
    }

    /// Classify the operator of the document's domain
    ///
    /// 1. Documents without domain or TLD yield `failure`.
    /// 2. With a store, a known classification yields `database`.
    /// 3. Otherwise the researcher is asked; success yields `research`,
    ///    failure yields `error` with the message preserved.
    pub fn resolve<S>(&self, document: &Document, store: Option<&S>) -> ClassificationResult
    where
        S: DomainStore + ?Sized,
        S::Error: Display,
    {
        let Some(full_domain) = document.full_domain() else {
            warn!("Document {:?} is missing domain or TLD", document.url());
            return ClassificationResult::failure();
        };

        if let Some(store) = store {
            if let Some(urheber) = find_known_urheber(store, &full_domain) {
                return ClassificationResult::from_database(full_domain, urheber);
            }
        } else {
            debug!("No store available, researching {}", full_domain);
        }

        match self.researcher.classify(&full_domain, document.url()) {
            Ok(finding) => ClassificationResult::from_research(full_domain, finding),
            Err(e) => {
                warn!("Error researching domain {}: {}", full_domain, e);
                ClassificationResult::error(full_domain, e.to_string())
            }
        }
    }

    /// Classify without a cache, always using the researcher
    pub fn resolve_uncached(&self, document: &Document) -> ClassificationResult {
        self.resolve::<NoStore>(document, None)
    }
}
