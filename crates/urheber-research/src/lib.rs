//! Urheber Research
//!
//! Classifies the operator of a domain from live information using an LLM
//! provider with web retrieval.
//!
//! # Overview
//!
//! The research client is the fallback path of the resolver: it is called
//! for domains that have no classification in the store yet. It asks the
//! provider who operates the domain, then has the provider pick exactly one
//! category from the closed set and answer with a JSON object:
//!
//! ```json
//! {"urheber": "...", "justification": "...", "sources": ["..."]}
//! ```
//!
//! # Strategies
//!
//! ```text
//! two_round:   search (web, free text) → classify (JSON) → parse
//! single_call: search + classify (web, JSON in text)   → parse
//! ```
//!
//! Both strategies produce the same `ResearchFinding`; they differ in the
//! number of provider calls.
//!
//! # Example Usage
//!
//! ```
//! use urheber_domain::traits::DomainResearcher;
//! use urheber_domain::Urheber;
//! use urheber_llm::MockProvider;
//! use urheber_research::{ResearchClient, ResearchConfig};
//!
//! let llm = MockProvider::new(r#"{"urheber": "Unternehmen", "justification": "GmbH", "sources": []}"#);
//! let client = ResearchClient::new(llm, ResearchConfig::default());
//!
//! let finding = client.classify("example.org", "https://example.org/").unwrap();
//! assert_eq!(finding.urheber, Urheber::Unternehmen);
//! ```

#![warn(missing_docs)]

mod client;
mod config;
mod error;
mod parser;
mod prompt;


pub use client::ResearchClient;
pub use config::{ResearchConfig, ResearchStrategy};
pub use error::ResearchError;
pub use parser::parse_research_response;
pub use prompt::PromptBuilder;
