//! Parse provider output into a research finding

use crate::config::ResearchConfig;
use crate::error::ResearchError;
use serde_json::{Map, Value};
use tracing::warn;
use urheber_domain::{ResearchFinding, Urheber};

const JUSTIFICATION_KEYS: [&str; 3] = ["justification", "begründung", "begruendung"];
const SOURCE_KEYS: [&str; 2] = ["sources", "quellen"];

/// Parse a classification response into a finding
///
/// The response must contain a JSON object with an `urheber` label from the
/// closed category set. Justification and sources are optional and default
/// to empty; German keys (`begründung`, `quellen`) are accepted.
pub fn parse_research_response(
    response: &str,
    config: &ResearchConfig,
) -> Result<ResearchFinding, ResearchError> {
    let json_str = extract_json(response)?;
    let json: Value = serde_json::from_str(json_str)?;

    let obj = json
        .as_object()
        .ok_or_else(|| ResearchError::InvalidResponse("Expected JSON object".to_string()))?;

    let label = obj
        .get("urheber")
        .and_then(Value::as_str)
        .ok_or_else(|| ResearchError::InvalidResponse("Missing or invalid 'urheber'".to_string()))?;

    let urheber = match Urheber::parse(label) {
        Some(urheber) if urheber.is_known() => urheber,
        _ => return Err(ResearchError::UnknownCategory(label.to_string())),
    };

    let justification = first_of(obj, &JUSTIFICATION_KEYS)
        .and_then(Value::as_str)
        .map(|j| truncate_chars(j.trim(), config.max_justification_chars))
        .unwrap_or_default();

    let sources = first_of(obj, &SOURCE_KEYS)
        .map(|v| parse_sources(v, config.max_sources))
        .unwrap_or_default();

    Ok(ResearchFinding {
        urheber,
        justification,
        sources,
    })
}

/// Extract JSON from response, handling markdown code blocks and prose
fn extract_json(response: &str) -> Result<&str, ResearchError> {
    let trimmed = response.trim();

    if trimmed.is_empty() {
        return Err(ResearchError::InvalidResponse("Empty response".to_string()));
    }

    // Check if wrapped in markdown code block
    if let Some(rest) = trimmed.strip_prefix("```") {
        let body = rest.split_once('\n').map(|(_, body)| body).unwrap_or_default();
        // Text after the closing fence is commentary, not JSON
        let body = body.find("```").map_or(body, |end| &body[..end]);
        if body.trim().is_empty() {
            return Err(ResearchError::InvalidResponse("Empty code block".to_string()));
        }
        return Ok(body.trim());
    }

    if trimmed.starts_with('{') {
        return Ok(trimmed);
    }

    // Prose around an object, as produced without a JSON output mode
    match (trimmed.find('{'), trimmed.rfind('}')) {
        (Some(start), Some(end)) if start < end => Ok(&trimmed[start..=end]),
        _ => Err(ResearchError::InvalidResponse(
            "No JSON object in response".to_string(),
        )),
    }
}

fn first_of<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|key| obj.get(*key))
}

/// Accepts a list of strings, a list of `{"url": ..}`/`{"title": ..}` objects,
/// or a single string
fn parse_sources(value: &Value, max_sources: usize) -> Vec<String> {
    let entries: Vec<&Value> = match value {
        Value::Array(items) => items.iter().collect(),
        Value::String(_) => vec![value],
        Value::Null => Vec::new(),
        other => {
            warn!("Ignoring sources of unexpected type: {}", other);
            Vec::new()
        }
    };

    let mut sources: Vec<String> = Vec::new();
    for entry in entries {
        let source = match entry {
            Value::String(s) => Some(s.trim()),
            Value::Object(o) => o
                .get("url")
                .or_else(|| o.get("title"))
                .and_then(Value::as_str)
                .map(str::trim),
            _ => None,
        };

        match source {
            Some(s) if !s.is_empty() && !sources.iter().any(|known| known == s) => {
                sources.push(s.to_string());
            }
            _ => {}
        }

        if sources.len() >= max_sources {
            break;
        }
    }

    sources
}

fn truncate_chars(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(response: &str) -> Result<ResearchFinding, ResearchError> {
        parse_research_response(response, &ResearchConfig::default())
    }

    #[test]
    fn test_parse_valid_json() {
        let finding = parse(
            r#"{
                "urheber": "staatlich",
                "justification": "Impressum nennt das Bundesministerium des Innern",
                "sources": ["https://www.bmi.bund.de/impressum"]
            }"#,
        )
        .unwrap();

        assert_eq!(finding.urheber, Urheber::Staatlich);
        assert!(finding.justification.starts_with("Impressum"));
        assert_eq!(finding.sources, vec!["https://www.bmi.bund.de/impressum"]);
    }

    #[test]
    fn test_parse_german_keys_and_display_label() {
        let finding = parse(
            r#"{
                "urheber": "nicht staatliche Hilfsorganisation",
                "begründung": "Eingetragener gemeinnütziger Verein",
                "quellen": ["Impressum", "Vereinsregister"]
            }"#,
        )
        .unwrap();

        assert_eq!(finding.urheber, Urheber::NichtStaatlicheHilfsorganisation);
        assert_eq!(finding.justification, "Eingetragener gemeinnütziger Verein");
        assert_eq!(finding.sources.len(), 2);
    }

    #[test]
    fn test_missing_optional_fields_become_empty() {
        let finding = parse(r#"{"urheber": "Privatperson"}"#).unwrap();
        assert_eq!(finding.urheber, Urheber::Privatperson);
        assert!(finding.justification.is_empty());
        assert!(finding.sources.is_empty());
    }

    #[test]
    fn test_parse_json_with_markdown_wrapper() {
        let finding = parse(
            "```json\n{\"urheber\": \"Unternehmen\", \"sources\": \"https://example.org/impressum\"}\n```",
        )
        .unwrap();
        assert_eq!(finding.urheber, Urheber::Unternehmen);
        assert_eq!(finding.sources, vec!["https://example.org/impressum"]);
    }

    #[test]
    fn test_parse_json_with_text_after_markdown_wrapper() {
        let finding = parse(
            "```json\n{\"urheber\": \"Unternehmen\", \"sources\": []}\n```\n\nQuellen: Impressum der Seite.",
        )
        .unwrap();
        assert_eq!(finding.urheber, Urheber::Unternehmen);
        assert!(finding.sources.is_empty());
    }

    #[test]
    fn test_parse_json_with_unclosed_markdown_wrapper() {
        let finding = parse("```json\n{\"urheber\": \"Privatperson\"}").unwrap();
        assert_eq!(finding.urheber, Urheber::Privatperson);
    }

    #[test]
    fn test_parse_json_inside_prose() {
        let finding = parse(
            "Nach meiner Recherche:\n{\"urheber\": \"Gemeinschaften\"}\nHoffe das hilft.",
        )
        .unwrap();
        assert_eq!(finding.urheber, Urheber::Gemeinschaften);
    }

    #[test]
    fn test_parse_invalid_json() {
        assert!(matches!(
            parse("This is not JSON"),
            Err(ResearchError::InvalidResponse(_))
        ));
        assert!(matches!(
            parse("{\"urheber\": "),
            Err(ResearchError::InvalidResponse(_))
        ));
        assert!(matches!(parse("   "), Err(ResearchError::InvalidResponse(_))));
    }

    #[test]
    fn test_parse_missing_urheber() {
        let result = parse(r#"{"justification": "no category"}"#);
        assert!(matches!(result, Err(ResearchError::InvalidResponse(_))));

        let result = parse(r#"{"urheber": 3}"#);
        assert!(matches!(result, Err(ResearchError::InvalidResponse(_))));
    }

    #[test]
    fn test_parse_category_outside_closed_set() {
        let result = parse(r#"{"urheber": "Behörde"}"#);
        assert!(matches!(result, Err(ResearchError::UnknownCategory(label)) if label == "Behörde"));

        let result = parse(r#"{"urheber": "unbekannt"}"#);
        assert!(matches!(result, Err(ResearchError::UnknownCategory(_))));
    }

    #[test]
    fn test_sources_are_cleaned_and_capped() {
        let config = ResearchConfig {
            max_sources: 2,
            ..ResearchConfig::default()
        };
        let finding = parse_research_response(
            r#"{
                "urheber": "Organisationen",
                "sources": [" a ", "", "a", 7, {"url": "b"}, "c"]
            }"#,
            &config,
        )
        .unwrap();
        assert_eq!(finding.sources, vec!["a", "b"]);
    }

    #[test]
    fn test_justification_is_truncated_on_char_boundary() {
        let config = ResearchConfig {
            max_justification_chars: 3,
            ..ResearchConfig::default()
        };
        let finding =
            parse_research_response(r#"{"urheber": "staatlich", "justification": "ÄÖÜß"}"#, &config)
                .unwrap();
        assert_eq!(finding.justification, "ÄÖÜ");
    }

    #[test]
    fn test_extract_json_from_markdown_without_language() {
        let response = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(extract_json(response).unwrap(), r#"{"key": "value"}"#);
    }
}
