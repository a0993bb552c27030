//! Classification result envelope
//!
//! Every resolution path produces a [`ClassificationResult`]. The
//! constructors are the only way to build one, which keeps the pairing of
//! method, confidence and urheber consistent:
//!
//! | method     | confidence              | urheber          |
//! |------------|-------------------------|------------------|
//! | `database` | 1.0                     | stored category  |
//! | `research` | [`RESEARCH_CONFIDENCE`] | found category   |
//! | `failure`  | 0.0                     | `unbekannt`      |
//! | `error`    | 0.0                     | `unbekannt`      |

use crate::urheber::{Method, Urheber};
use serde::Serialize;
use serde_json::Value;

/// Confidence assigned to classifications produced by the research provider
pub const RESEARCH_CONFIDENCE: f64 = 0.8;

/// Confidence assigned to cache hits
pub const DATABASE_CONFIDENCE: f64 = 1.0;

/// Structured output of the research step
#[derive(Debug, Clone, PartialEq)]
pub struct ResearchFinding {
    /// Category selected by the provider
    pub urheber: Urheber,

    /// Short reasoning for the category (may be empty)
    pub justification: String,

    /// Sources the provider cited (may be empty)
    pub sources: Vec<String>,
}

/// Uniform output envelope of the resolver
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationResult {
    urheber: Urheber,
    confidence: f64,
    method: Method,
    #[serde(skip_serializing_if = "Option::is_none")]
    domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    justification: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sources: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ClassificationResult {
    /// Result for a domain found in the store
    pub fn from_database(domain: impl Into<String>, urheber: Urheber) -> Self {
        Self {
            urheber,
            confidence: DATABASE_CONFIDENCE,
            method: Method::Database,
            domain: Some(domain.into()),
            justification: None,
            sources: None,
            error: None,
        }
    }

    /// Result for a domain classified by the research provider
    pub fn from_research(domain: impl Into<String>, finding: ResearchFinding) -> Self {
        Self {
            urheber: finding.urheber,
            confidence: RESEARCH_CONFIDENCE,
            method: Method::Research,
            domain: Some(domain.into()),
            justification: Some(finding.justification),
            sources: Some(finding.sources),
            error: None,
        }
    }

    /// Result for a document without a usable domain
    pub fn failure() -> Self {
        Self {
            urheber: Urheber::Unbekannt,
            confidence: 0.0,
            method: Method::Failure,
            domain: None,
            justification: None,
            sources: None,
            error: None,
        }
    }

    /// Result for a domain whose research step failed
    pub fn error(domain: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            urheber: Urheber::Unbekannt,
            confidence: 0.0,
            method: Method::Error,
            domain: Some(domain.into()),
            justification: None,
            sources: None,
            error: Some(message.into()),
        }
    }

    /// Operator category
    pub fn urheber(&self) -> Urheber {
        self.urheber
    }

    /// Confidence in [0, 1]
    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    /// How the result was obtained
    pub fn method(&self) -> Method {
        self.method
    }

    /// Fully qualified domain, absent on input failure
    pub fn domain(&self) -> Option<&str> {
        self.domain.as_deref()
    }

    /// Provider reasoning, research results only
    pub fn justification(&self) -> Option<&str> {
        self.justification.as_deref()
    }

    /// Provider sources, research results only
    pub fn sources(&self) -> Option<&[String]> {
        self.sources.as_deref()
    }

    /// Failure description, error results only
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether the result carries a usable category
    pub fn is_classified(&self) -> bool {
        matches!(self.method, Method::Database | Method::Research)
    }

    /// Serialize the envelope as a JSON object
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    /// Merge the envelope fields into a JSON document
    ///
    /// Existing fields with the same names are overwritten. Returns `false`
    /// if `document` is not a JSON object.
    pub fn merge_into(&self, document: &mut Value) -> bool {
        let (Some(target), Value::Object(fields)) = (document.as_object_mut(), self.to_json())
        else {
            return false;
        };
        target.extend(fields);
        true
    }
}
