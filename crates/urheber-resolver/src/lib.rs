//! Urheber Resolver
//!
//! Determines the operator category of a document's domain.
//!
//! # Architecture
//!
//! ```text
//! Document → domain.tld → DomainStore (cache) ──hit──→ database, 1.0
//!                                 │
//!                                miss / store error
//!                                 ↓
//!                         DomainResearcher ──ok──→ research, 0.8
//!                                 │
//!                               error ──→ error, 0.0
//! ```
//!
//! The resolver never returns an error: every path yields a
//! `ClassificationResult`, and callers branch on its `method`.
//!
//! # Example Usage
//!
//! ```
//! use urheber_domain::{Document, Method, Urheber};
//! use urheber_llm::MockProvider;
//! use urheber_research::{ResearchClient, ResearchConfig};
//! use urheber_resolver::DomainResolver;
//! use urheber_store::SqliteStore;
//!
//! let store = SqliteStore::new(":memory:").unwrap();
//! store.insert_record("example.org", "Unternehmen").unwrap();
//!
//! let llm = MockProvider::new("{}");
//! let resolver = DomainResolver::new(ResearchClient::new(llm, ResearchConfig::default()));
//!
//! let document = Document::new("https://help.example.org/x", "example", "org");
//! let result = resolver.resolve(&document, Some(&store));
//!
//! assert_eq!(result.method(), Method::Database);
//! assert_eq!(result.urheber(), Urheber::Unternehmen);
//! ```

#![warn(missing_docs)]

mod cache;
mod resolver;

pub use cache::find_known_urheber;
pub use resolver::DomainResolver;
