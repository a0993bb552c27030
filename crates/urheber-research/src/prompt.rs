//! LLM prompt engineering for operator research

use urheber_domain::Urheber;

/// System instructions for the search round
pub const SEARCH_INSTRUCTIONS: &str =
    "You search the web for information and provide factual information only.";

/// System instructions for the classification round
pub const CLASSIFY_INSTRUCTIONS: &str =
    "You analyze website operators and classify them into categories.";

/// Findings placeholder when the search round returned nothing
pub const NO_FINDINGS: &str = "Keine Suchergebnisse verfügbar.";

/// Builds prompts for researching and classifying a domain operator
pub struct PromptBuilder {
    domain: String,
    url: String,
    findings: Option<String>,
}

impl PromptBuilder {
    /// Create a new prompt builder
    pub fn new(domain: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            url: url.into(),
            findings: None,
        }
    }

    /// Add findings from the search round
    pub fn with_findings(mut self, findings: impl Into<String>) -> Self {
        self.findings = Some(findings.into());
        self
    }

    /// Prompt for the search round (free text, web retrieval)
    pub fn build_search(&self) -> String {
        let mut prompt = String::new();

        if self.url.is_empty() {
            prompt.push_str(&format!("Wer betreibt die Website {}? ", self.domain));
        } else {
            prompt.push_str(&format!(
                "Wer betreibt die Website {} oder {}? ",
                self.domain, self.url
            ));
        }
        prompt.push_str(
            "Ist es eine staatliche Einrichtung, Organisation, Unternehmen oder Privatperson?\n\n",
        );
        prompt.push_str(RESEARCH_CHECKLIST);

        prompt
    }

    /// Prompt for the classification round (JSON output)
    pub fn build_classification(&self) -> String {
        let mut prompt = String::new();

        prompt.push_str(&format!(
            "Basierend auf den folgenden Suchergebnissen, klassifiziere den Betreiber der Domain {} in GENAU EINE dieser Kategorien:\n\n",
            self.domain
        ));
        prompt.push_str(&category_list());
        prompt.push('\n');

        prompt.push_str("Suchergebnisse:\n");
        prompt.push_str("---\n");
        let findings = self
            .findings
            .as_deref()
            .filter(|f| !f.trim().is_empty())
            .unwrap_or(NO_FINDINGS);
        prompt.push_str(findings);
        prompt.push_str("\n---\n\n");

        if !self.url.is_empty() {
            prompt.push_str(&format!("URL: {}\n\n", self.url));
        }

        prompt.push_str(OUTPUT_FORMAT);
        prompt
    }

    /// Prompt for the single-call strategy (research and classify at once)
    pub fn build_single_call(&self) -> String {
        let mut prompt = String::new();

        if self.url.is_empty() {
            prompt.push_str(&format!(
                "Recherchiere den Betreiber der Website/Domain: {}.\n\n",
                self.domain
            ));
        } else {
            prompt.push_str(&format!(
                "Recherchiere den Betreiber der Website/Domain: {} ({}).\n\n",
                self.domain, self.url
            ));
        }
        prompt.push_str("Aufgabe: Bestimme, welcher Kategorie der Betreiber der Website angehört.\n\n");
        prompt.push_str(RESEARCH_CHECKLIST);
        prompt.push_str("\n\nKlassifiziere den Betreiber in GENAU EINE dieser Kategorien:\n");
        prompt.push_str(&category_list());
        prompt.push('\n');
        prompt.push_str("Begründe deine Einordnung und gib deine Quellen an.\n");
        prompt.push_str(OUTPUT_FORMAT);

        prompt
    }
}

/// Bullet list of the closed category set with descriptions
fn category_list() -> String {
    Urheber::CATEGORIES
        .iter()
        .map(|u| format!("- \"{}\" ({})\n", u.label(), u.description()))
        .collect()
}

const RESEARCH_CHECKLIST: &str = r#"Suche nach:
1. Informationen über den Webseitenbetreiber (Impressum, About, Legal, Contact pages)
2. Organisationsform (GmbH, AG, e.V., Behörde, etc.)
3. Staatliche Verbindungen oder Funktion
4. Nonprofit-Status oder gemeinnütziger Zweck
5. Ob es sich um eine Privatperson handelt"#;

const OUTPUT_FORMAT: &str = r#"Antworte ausschließlich im JSON-Format, ohne weiteren Text:
{
  "urheber": "KATEGORIE",
  "justification": "Kurze Begründung für die Einordnung",
  "sources": ["Quelle 1", "Quelle 2"]
}"#;
