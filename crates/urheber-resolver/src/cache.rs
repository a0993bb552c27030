//! Domain cache lookup

use std::fmt::Display;
use tracing::{debug, info, warn};
use urheber_domain::traits::{DomainQuery, DomainStore};
use urheber_domain::Urheber;

/// Records fetched per store query
const PAGE_SIZE: usize = 16;

/// Look up a previously assigned urheber for `domain`
///
/// Records whose domain contains `domain` (case-insensitive) and that carry
/// a non-empty label are scanned in store order (ascending record id); the
/// first label that names one of the seven categories wins. Labels that do
/// not normalize to a category are skipped. Records are read in pages of
/// `PAGE_SIZE`, so a short key that matches many domains only loads rows up
/// to the first usable label. Store errors are logged and reported as not
/// found.
pub fn find_known_urheber<S>(store: &S, domain: &str) -> Option<Urheber>
where
    S: DomainStore + ?Sized,
    S::Error: Display,
{
    let domain = domain.trim();
    if domain.is_empty() {
        return None;
    }

    let mut query = DomainQuery::classified(domain).with_limit(PAGE_SIZE);

    loop {
        let records = match store.find_records(&query) {
            Ok(records) => records,
            Err(e) => {
                warn!("Error querying store for domain {}: {}", domain, e);
                return None;
            }
        };

        for record in &records {
            match Urheber::parse(&record.urheber) {
                Some(urheber) if urheber.is_known() => {
                    info!(
                        "Found existing urheber classification for domain {}: {} (record {})",
                        domain, urheber, record.id
                    );
                    return Some(urheber);
                }
                _ => warn!(
                    "Skipping record {} for {} with unrecognized urheber '{}'",
                    record.id, record.domain, record.urheber
                ),
            }
        }

        match records.last() {
            Some(last) if records.len() == PAGE_SIZE => query = query.after(last.id),
            _ => break,
        }
    }

    debug!("No existing urheber classification found for domain {}", domain);
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use urheber_domain::DomainRecord;

    /// In-memory store that mimics the lookup contract
    struct VecStore {
        records: Vec<DomainRecord>,
        queries: Cell<usize>,
    }

    impl VecStore {
        fn new(records: &[(&str, &str)]) -> Self {
            let records = records
                .iter()
                .enumerate()
                .map(|(i, (domain, urheber))| DomainRecord {
                    id: i as i64 + 1,
                    domain: domain.to_string(),
                    urheber: urheber.to_string(),
                })
                .collect();
            Self {
                records,
                queries: Cell::new(0),
            }
        }
    }

    impl DomainStore for VecStore {
        type Error = String;

        fn find_records(&self, query: &DomainQuery) -> Result<Vec<DomainRecord>, String> {
            self.queries.set(self.queries.get() + 1);
            let needle = query.domain_contains.to_lowercase();
            Ok(self
                .records
                .iter()
                .filter(|r| r.domain.to_lowercase().contains(&needle))
                .filter(|r| !query.require_urheber || !r.urheber.trim().is_empty())
                .filter(|r| query.after_id.is_none_or(|after| r.id > after))
                .take(query.limit.unwrap_or(usize::MAX))
                .cloned()
                .collect())
        }
    }

    struct BrokenStore;

    impl DomainStore for BrokenStore {
        type Error = String;

        fn find_records(&self, _query: &DomainQuery) -> Result<Vec<DomainRecord>, String> {
            Err("connection refused".to_string())
        }
    }

    #[test]
    fn test_hit_returns_first_record() {
        let store = VecStore::new(&[
            ("example.org", "Unternehmen"),
            ("help.example.org", "staatlich"),
        ]);
        assert_eq!(
            find_known_urheber(&store, "Example.org"),
            Some(Urheber::Unternehmen)
        );
    }

    #[test]
    fn test_miss() {
        let store = VecStore::new(&[("example.com", "Unternehmen")]);
        assert_eq!(find_known_urheber(&store, "example.org"), None);
    }

    #[test]
    fn test_unrecognized_labels_are_skipped() {
        let store = VecStore::new(&[
            ("example.org", "Konzern"),
            ("example.org", "unbekannt"),
            ("www.example.org", "Privatperson"),
        ]);
        assert_eq!(
            find_known_urheber(&store, "example.org"),
            Some(Urheber::Privatperson)
        );
    }

    #[test]
    fn test_first_page_hit_reads_one_page() {
        let records: Vec<(&str, &str)> = (0..PAGE_SIZE * 3)
            .map(|_| ("a.de", "Unternehmen"))
            .collect();
        let store = VecStore::new(&records);

        assert_eq!(find_known_urheber(&store, "a.de"), Some(Urheber::Unternehmen));
        assert_eq!(store.queries.get(), 1);
    }

    #[test]
    fn test_usable_label_on_later_page() {
        let mut records: Vec<(&str, &str)> = vec![("a.de", "Konzern"); PAGE_SIZE + 3];
        records.push(("shop.a.de", "Gemeinschaften"));
        let store = VecStore::new(&records);

        assert_eq!(
            find_known_urheber(&store, "a.de"),
            Some(Urheber::Gemeinschaften)
        );
        assert_eq!(store.queries.get(), 2);
    }

    #[test]
    fn test_full_last_page_ends_with_empty_query() {
        let records = vec![("a.de", "Konzern"); PAGE_SIZE];
        let store = VecStore::new(&records);

        assert_eq!(find_known_urheber(&store, "a.de"), None);
        assert_eq!(store.queries.get(), 2);
    }

    #[test]
    fn test_store_error_is_not_found() {
        assert_eq!(find_known_urheber(&BrokenStore, "example.org"), None);
    }

    #[test]
    fn test_empty_domain_skips_the_store() {
        let store = VecStore::new(&[("example.org", "Unternehmen")]);
        assert_eq!(find_known_urheber(&store, "  "), None);
        assert_eq!(store.queries.get(), 0);
    }
}
