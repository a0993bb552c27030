//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use serde_json::Value;
use urheber_domain::{ClassificationResult, Method};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format classification results.
    pub fn format_results(&self, results: &[ClassificationResult]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let json: Vec<Value> = results.iter().map(ClassificationResult::to_json).collect();
                Ok(serde_json::to_string_pretty(&json)?)
            }
            OutputFormat::Text => Ok(results
                .iter()
                .map(|r| self.format_result_line(r))
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    /// Format documents with merged results.
    pub fn format_documents(&self, documents: &[Value]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(documents)?),
            OutputFormat::Text => Ok(documents
                .iter()
                .map(|d| serde_json::to_string(d))
                .collect::<std::result::Result<Vec<_>, _>>()?
                .join("\n")),
        }
    }

    /// Format the outcome of a store lookup.
    pub fn format_lookup(&self, domain: &str, found: Option<&str>) -> String {
        match (self.format, found) {
            (OutputFormat::Json, found) => {
                serde_json::json!({ "domain": domain, "urheber": found }).to_string()
            }
            (OutputFormat::Text, Some(urheber)) => {
                format!("{}  {}", domain, self.colorize(urheber, "green"))
            }
            (OutputFormat::Text, None) => {
                format!("{}  {}", domain, self.colorize("not found", "yellow"))
            }
        }
    }

    fn format_result_line(&self, result: &ClassificationResult) -> String {
        let color = match result.method() {
            Method::Database => "green",
            Method::Research => "cyan",
            Method::Failure => "yellow",
            Method::Error => "red",
        };

        let mut line = format!(
            "{:<32} {:<36} {:.2}  {}",
            result.domain().unwrap_or("-"),
            result.urheber().as_str(),
            result.confidence(),
            self.colorize(result.method().as_str(), color)
        );

        if let Some(error) = result.error_message() {
            line.push_str(&format!("  {}", error));
        }

        line
    }

    /// Colorize text if colors are enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}
