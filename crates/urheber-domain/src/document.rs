//! Input documents describing a crawled URL

use serde::{Deserialize, Serialize};

/// Domain descriptor attached to a crawled document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainInfo {
    /// Registrable name without TLD (e.g. "example")
    pub domain: Option<String>,

    /// Top-level domain (e.g. "org")
    pub tld: Option<String>,
}

/// The part of a crawled document the resolver reads
///
/// Other fields of the source JSON are ignored on deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Origin URL of the document
    pub url: Option<String>,

    /// Domain descriptor
    pub domain_info: Option<DomainInfo>,
}

impl Document {
    /// Create a document from its parts
    pub fn new(url: impl Into<String>, domain: impl Into<String>, tld: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            domain_info: Some(DomainInfo {
                domain: Some(domain.into()),
                tld: Some(tld.into()),
            }),
        }
    }

    /// Origin URL, empty if missing
    pub fn url(&self) -> &str {
        self.url.as_deref().unwrap_or_default()
    }

    /// The `domain.tld` key, or `None` if either part is empty or missing
    pub fn full_domain(&self) -> Option<String> {
        let info = self.domain_info.as_ref()?;
        let domain = info.domain.as_deref()?.trim().trim_end_matches('.');
        let tld = info.tld.as_deref()?.trim().trim_start_matches('.');

        if domain.is_empty() || tld.is_empty() {
            return None;
        }

        Some(format!("{}.{}", domain, tld))
    }
}
