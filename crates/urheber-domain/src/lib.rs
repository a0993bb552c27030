//! Urheber Domain Layer
//!
//! This crate contains the core vocabulary for classifying the operator
//! ("Urheber") of a web domain. It defines the value types and the trait
//! interfaces that the store, provider and resolver layers depend upon.
//!
//! ## Key Concepts
//!
//! - **Urheber**: The operator category of a domain (state body, NGO, company, ...)
//! - **ClassificationResult**: The uniform envelope returned for every document
//! - **Method**: How a result was obtained (database, research, failure, error)
//! - **DomainRecord**: A previously classified domain held by an external store
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture:
//! - Only serde for the wire shape of the result envelope
//! - Pure business logic only
//! - Infrastructure implementations live in other crates
//! - Trait definitions for all external interactions

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod classification;
pub mod document;
pub mod record;
pub mod traits;
pub mod urheber;

// Re-exports for convenience
pub use classification::{ClassificationResult, ResearchFinding, RESEARCH_CONFIDENCE};
pub use document::{Document, DomainInfo};
pub use record::DomainRecord;
pub use urheber::{Method, Urheber};
