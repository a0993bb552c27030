//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use crate::{DomainRecord, ResearchFinding};

/// Query criteria for looking up classified domains
#[derive(Debug, Clone, Default)]
pub struct DomainQuery {
    /// Case-insensitive substring the stored domain must contain
    pub domain_contains: String,

    /// Only return records whose urheber label is present and non-empty
    pub require_urheber: bool,

    /// Maximum results to return
    pub limit: Option<usize>,

    /// Only return records with an id greater than this one
    pub after_id: Option<i64>,
}

impl DomainQuery {
    /// Query for classified records whose domain contains `domain`
    pub fn classified(domain: impl Into<String>) -> Self {
        Self {
            domain_contains: domain.into(),
            require_urheber: true,
            limit: None,
            after_id: None,
        }
    }

    /// Limit the number of returned records
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Continue after the record with the given id
    pub fn after(mut self, id: i64) -> Self {
        self.after_id = Some(id);
        self
    }
}

/// Trait for reading previously classified domains
///
/// Implemented by the infrastructure layer (urheber-store)
pub trait DomainStore {
    /// Error type for store operations
    type Error;

    /// Find records matching the query, ordered by record id
    fn find_records(&self, query: &DomainQuery) -> Result<Vec<DomainRecord>, Self::Error>;
}

/// Output format requested from the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseFormat {
    /// Free text
    #[default]
    Text,

    /// A single JSON object
    Json,
}

/// A single request to an LLM provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmRequest {
    /// System-level instructions
    pub instructions: Option<String>,

    /// User prompt
    pub prompt: String,

    /// Allow the provider to retrieve live information from the web
    pub web_search: bool,

    /// Requested output format
    pub format: ResponseFormat,
}

impl LlmRequest {
    /// Create a plain text request
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            instructions: None,
            prompt: prompt.into(),
            web_search: false,
            format: ResponseFormat::Text,
        }
    }

    /// Set system-level instructions
    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = Some(instructions.into());
        self
    }

    /// Enable web retrieval
    pub fn with_web_search(mut self) -> Self {
        self.web_search = true;
        self
    }

    /// Constrain the output to a JSON object
    pub fn json(mut self) -> Self {
        self.format = ResponseFormat::Json;
        self
    }
}

/// Trait for LLM provider operations
///
/// Implemented by the infrastructure layer (urheber-llm)
pub trait LlmProvider {
    /// Error type for LLM operations
    type Error;

    /// Send a request and return the provider's output text
    fn generate(&self, request: &LlmRequest) -> Result<String, Self::Error>;
}

/// Trait for classifying a domain from live information
///
/// Implemented by the application layer (urheber-research)
pub trait DomainResearcher {
    /// Error type for research operations
    type Error;

    /// Classify the operator of `domain`, using `url` as context
    fn classify(&self, domain: &str, url: &str) -> Result<ResearchFinding, Self::Error>;
}
