//! Configuration for the research client

use serde::{Deserialize, Serialize};

/// How the provider is asked about a domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResearchStrategy {
    /// Web search for findings, then a JSON-constrained classification call
    #[default]
    TwoRound,

    /// One web-enabled call that researches and classifies together
    SingleCall,
}

/// Configuration for the research client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResearchConfig {
    /// Research strategy
    pub strategy: ResearchStrategy,

    /// Maximum number of sources kept from a response
    pub max_sources: usize,

    /// Maximum justification length (characters)
    pub max_justification_chars: usize,
}

impl Default for ResearchConfig {
    fn default() -> Self {
        Self {
            strategy: ResearchStrategy::TwoRound,
            max_sources: 10,
            max_justification_chars: 2_000,
        }
    }
}

impl ResearchConfig {
    /// Single-call preset: one provider round trip per domain
    pub fn single_call() -> Self {
        Self {
            strategy: ResearchStrategy::SingleCall,
            ..Self::default()
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_sources == 0 {
            return Err("max_sources must be greater than 0".to_string());
        }
        if self.max_justification_chars == 0 {
            return Err("max_justification_chars must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}
