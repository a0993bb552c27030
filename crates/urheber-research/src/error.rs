//! Error types for the research client

use thiserror::Error;

/// Errors that can occur during domain research
///
/// Provider-specific errors are flattened into messages; callers only see
/// these variants.
#[derive(Error, Debug)]
pub enum ResearchError {
    /// LLM provider or transport error
    #[error("Provider error: {0}")]
    Provider(String),

    /// Response was not the expected JSON object
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Category outside the closed set
    #[error("Unknown category: {0}")]
    UnknownCategory(String),
}

impl From<serde_json::Error> for ResearchError {
    fn from(e: serde_json::Error) -> Self {
        ResearchError::InvalidResponse(format!("JSON parse error: {}", e))
    }
}
