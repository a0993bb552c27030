//! Urheber LLM Provider Layer
//!
//! Pluggable LLM provider implementations.
//!
//! # Architecture
//!
//! This crate provides implementations of the `LlmProvider` trait from
//! `urheber-domain`. Providers take an `LlmRequest` (prompt, instructions,
//! web retrieval flag, output format) and return the output text.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `OpenAiProvider`: OpenAI Responses API with the `web_search` tool
//!
//! # Examples
//!
//! ```
//! use urheber_llm::MockProvider;
//! use urheber_domain::traits::{LlmProvider, LlmRequest};
//!
//! let provider = MockProvider::new("Hello from LLM!");
//! let result = provider.generate(&LlmRequest::new("test prompt")).unwrap();
//! assert_eq!(result, "Hello from LLM!");
//! ```

#![warn(missing_docs)]

pub mod openai;

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;
use urheber_domain::traits::{LlmProvider as LlmProviderTrait, LlmRequest};

pub use openai::{OpenAiConfig, OpenAiProvider};

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Missing or invalid provider configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

type MockReply = Result<String, String>;

/// Mock LLM provider for deterministic testing
///
/// Replies are chosen in this order: queued replies (first in, first out),
/// then replies registered for an exact prompt, then the default response.
/// Clones share their state, so a clone handed to a client can be inspected
/// from the test.
///
/// # Examples
///
/// ```
/// use urheber_llm::MockProvider;
/// use urheber_domain::traits::{LlmProvider, LlmRequest};
///
/// let provider = MockProvider::new("fallback");
/// provider.queue_response("first");
/// provider.queue_response("second");
///
/// assert_eq!(provider.generate(&LlmRequest::new("a")).unwrap(), "first");
/// assert_eq!(provider.generate(&LlmRequest::new("b")).unwrap(), "second");
/// assert_eq!(provider.generate(&LlmRequest::new("c")).unwrap(), "fallback");
/// assert_eq!(provider.call_count(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: MockReply,
    responses: Arc<Mutex<HashMap<String, MockReply>>>,
    queue: Arc<Mutex<VecDeque<MockReply>>>,
    requests: Arc<Mutex<Vec<LlmRequest>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self::with_default(Ok(response.into()))
    }

    /// Create a MockProvider that fails every request with `message`
    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_default(Err(message.into()))
    }

    fn with_default(default_response: MockReply) -> Self {
        Self {
            default_response,
            responses: Arc::new(Mutex::new(HashMap::new())),
            queue: Arc::new(Mutex::new(VecDeque::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Add a specific response for a given prompt
    pub fn add_response(&self, prompt: impl Into<String>, response: impl Into<String>) {
        lock(&self.responses).insert(prompt.into(), Ok(response.into()));
    }

    /// Configure to return an error for a specific prompt
    pub fn add_error(&self, prompt: impl Into<String>) {
        lock(&self.responses).insert(prompt.into(), Err("Mock error".to_string()));
    }

    /// Queue a response for the next unanswered request
    pub fn queue_response(&self, response: impl Into<String>) {
        lock(&self.queue).push_back(Ok(response.into()));
    }

    /// Queue an error for the next unanswered request
    pub fn queue_error(&self, message: impl Into<String>) {
        lock(&self.queue).push_back(Err(message.into()));
    }

    /// Get the number of times generate was called
    pub fn call_count(&self) -> usize {
        lock(&self.requests).len()
    }

    /// Requests received so far, oldest first
    pub fn requests(&self) -> Vec<LlmRequest> {
        lock(&self.requests).clone()
    }

    /// Reset the call count and recorded requests
    pub fn reset_call_count(&self) {
        lock(&self.requests).clear();
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

impl LlmProviderTrait for MockProvider {
    type Error = LlmError;

    fn generate(&self, request: &LlmRequest) -> Result<String, Self::Error> {
        lock(&self.requests).push(request.clone());

        let reply = lock(&self.queue)
            .pop_front()
            .or_else(|| lock(&self.responses).get(&request.prompt).cloned())
            .unwrap_or_else(|| self.default_response.clone());

        reply.map_err(LlmError::Other)
    }
}
