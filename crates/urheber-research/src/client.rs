//! Core research client implementation

use crate::config::{ResearchConfig, ResearchStrategy};
use crate::error::ResearchError;
use crate::parser::parse_research_response;
use crate::prompt::{PromptBuilder, CLASSIFY_INSTRUCTIONS, SEARCH_INSTRUCTIONS};
use std::fmt::Display;
use tracing::{debug, info};
use urheber_domain::traits::{DomainResearcher, LlmProvider, LlmRequest};
use urheber_domain::ResearchFinding;

/// Classifies domain operators through an LLM provider
///
/// The provider is injected, so tests can substitute a `MockProvider`.
/// The client holds no mutable state and can be shared across threads when
/// the provider can.
pub struct ResearchClient<L>
where
    L: LlmProvider,
{
    provider: L,
    config: ResearchConfig,
}

impl<L> ResearchClient<L>
where
    L: LlmProvider,
    L::Error: Display,
{
    /// Create a new research client
    pub fn new(provider: L, config: ResearchConfig) -> Self {
        Self { provider, config }
    }

    /// Two rounds: web search for findings, then JSON classification
    fn research_two_round(&self, domain: &str, url: &str) -> Result<ResearchFinding, ResearchError> {
        let prompts = PromptBuilder::new(domain, url);

        let search = LlmRequest::new(prompts.build_search())
            .with_instructions(SEARCH_INSTRUCTIONS)
            .with_web_search();
        let findings = self.call_llm(&search)?;

        debug!("Search round for {} returned {} chars", domain, findings.len());

        let classify = LlmRequest::new(prompts.with_findings(findings).build_classification())
            .with_instructions(CLASSIFY_INSTRUCTIONS)
            .json();
        let response = self.call_llm(&classify)?;

        parse_research_response(&response, &self.config)
    }

    /// One web-enabled round that answers with JSON in the text
    fn research_single_call(&self, domain: &str, url: &str) -> Result<ResearchFinding, ResearchError> {
        let request = LlmRequest::new(PromptBuilder::new(domain, url).build_single_call())
            .with_web_search();
        let response = self.call_llm(&request)?;

        parse_research_response(&response, &self.config)
    }

    /// Call the LLM provider
    fn call_llm(&self, request: &LlmRequest) -> Result<String, ResearchError> {
        debug!("Prompt length: {} chars", request.prompt.len());

        self.provider
            .generate(request)
            .map_err(|e| ResearchError::Provider(e.to_string()))
    }
}

impl<L> DomainResearcher for ResearchClient<L>
where
    L: LlmProvider,
    L::Error: Display,
{
    type Error = ResearchError;

    fn classify(&self, domain: &str, url: &str) -> Result<ResearchFinding, Self::Error> {
        info!("Researching domain {} ({:?})", domain, self.config.strategy);

        let finding = match self.config.strategy {
            ResearchStrategy::TwoRound => self.research_two_round(domain, url)?,
            ResearchStrategy::SingleCall => self.research_single_call(domain, url)?,
        };

        info!(
            "Research classification for {}: {} ({} source(s))",
            domain,
            finding.urheber,
            finding.sources.len()
        );

        Ok(finding)
    }
}
