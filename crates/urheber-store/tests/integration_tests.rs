//! Integration tests for urheber-store
//!
//! These tests verify the lookup contract the resolver relies on.

use urheber_domain::traits::{DomainQuery, DomainStore};
use urheber_store::SqliteStore;

#[test]
fn test_store_initialization() {
    let store = SqliteStore::new(":memory:");
    assert!(store.is_ok(), "Store should initialize successfully");
    assert_eq!(store.unwrap().count().unwrap(), 0);
}

#[test]
fn test_substring_match_is_case_insensitive() {
    let store = SqliteStore::new(":memory:").unwrap();
    store.insert_record("WWW.Example.ORG", "Unternehmen").unwrap();

    let records = store
        .find_records(&DomainQuery::classified("example.org"))
        .unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].domain, "WWW.Example.ORG");
    assert_eq!(records[0].urheber, "Unternehmen");
}

#[test]
fn test_unclassified_records_are_filtered() {
    let store = SqliteStore::new(":memory:").unwrap();
    store.insert_record("example.org", "").unwrap();
    store.insert_record("help.example.org", "   ").unwrap();

    let classified = store
        .find_records(&DomainQuery::classified("example.org"))
        .unwrap();
    assert!(classified.is_empty());

    let all = store
        .find_records(&DomainQuery {
            domain_contains: "example.org".to_string(),
            require_urheber: false,
            limit: None,
            after_id: None,
        })
        .unwrap();
    assert_eq!(all.len(), 2);
}

#[test]
fn test_matches_are_ordered_by_insertion() {
    let store = SqliteStore::new(":memory:").unwrap();
    store.insert_record("shop.example.org", "Unternehmen").unwrap();
    store.insert_record("example.org", "staatlich").unwrap();
    store.insert_record("blog.example.org", "Privatperson").unwrap();

    let records = store
        .find_records(&DomainQuery::classified("example.org"))
        .unwrap();
    let labels: Vec<_> = records.iter().map(|r| r.urheber.as_str()).collect();
    assert_eq!(labels, vec!["Unternehmen", "staatlich", "Privatperson"]);
    assert!(records.windows(2).all(|w| w[0].id < w[1].id));

    let first = store
        .find_records(&DomainQuery::classified("example.org").with_limit(1))
        .unwrap();
    assert_eq!(first.len(), 1);
    assert_eq!(first[0].urheber, "Unternehmen");

    let rest = store
        .find_records(&DomainQuery::classified("example.org").after(first[0].id))
        .unwrap();
    let labels: Vec<_> = rest.iter().map(|r| r.urheber.as_str()).collect();
    assert_eq!(labels, vec!["staatlich", "Privatperson"]);
}

#[test]
fn test_no_match() {
    let store = SqliteStore::new(":memory:").unwrap();
    store.insert_record("example.org", "Unternehmen").unwrap();

    let records = store
        .find_records(&DomainQuery::classified("example.com"))
        .unwrap();
    assert!(records.is_empty());
}

#[test]
fn test_records_persist_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("domains.db");

    {
        let store = SqliteStore::new(&path).unwrap();
        store.insert_record("bund.de", "staatlich").unwrap();
    }

    let store = SqliteStore::new(&path).unwrap();
    let records = store.find_records(&DomainQuery::classified("bund.de")).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].urheber, "staatlich");
}

#[test]
fn test_store_is_shareable_across_threads() {
    let store = std::sync::Arc::new(SqliteStore::new(":memory:").unwrap());
    store.insert_record("example.org", "Unternehmen").unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let store = std::sync::Arc::clone(&store);
            std::thread::spawn(move || {
                store
                    .find_records(&DomainQuery::classified("example.org"))
                    .unwrap()
                    .len()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), 1);
    }
}
