//! Urheber categories and resolution methods

use serde::{Deserialize, Serialize};
use std::fmt;

/// Operator category of a web domain
///
/// Seven fixed categories plus `Unbekannt`, which is reserved for results
/// that could not be classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urheber {
    /// Authority, ministry or other state body
    Staatlich,

    /// Non-governmental aid organization, charity
    NichtStaatlicheHilfsorganisation,

    /// Associations that are not aid organizations
    SonstigeVereine,

    /// International organizations, federations
    Organisationen,

    /// Informal groups, communities, networks
    Gemeinschaften,

    /// Commercial companies (GmbH, AG, ...)
    Unternehmen,

    /// Websites run by individuals
    Privatperson,

    /// Not classified
    Unbekannt,
}

impl Urheber {
    /// The seven assignable categories, in prompt order
    pub const CATEGORIES: [Urheber; 7] = [
        Urheber::Staatlich,
        Urheber::NichtStaatlicheHilfsorganisation,
        Urheber::SonstigeVereine,
        Urheber::Organisationen,
        Urheber::Gemeinschaften,
        Urheber::Unternehmen,
        Urheber::Privatperson,
    ];

    /// Get the snake_case identifier used in the result envelope
    pub fn as_str(&self) -> &'static str {
        match self {
            Urheber::Staatlich => "staatlich",
            Urheber::NichtStaatlicheHilfsorganisation => "nicht_staatliche_hilfsorganisation",
            Urheber::SonstigeVereine => "sonstige_vereine",
            Urheber::Organisationen => "organisationen",
            Urheber::Gemeinschaften => "gemeinschaften",
            Urheber::Unternehmen => "unternehmen",
            Urheber::Privatperson => "privatperson",
            Urheber::Unbekannt => "unbekannt",
        }
    }

    /// Get the German display label, as used in prompts and legacy records
    pub fn label(&self) -> &'static str {
        match self {
            Urheber::Staatlich => "staatlich",
            Urheber::NichtStaatlicheHilfsorganisation => "nicht staatliche Hilfsorganisation",
            Urheber::SonstigeVereine => "sonstige Vereine",
            Urheber::Organisationen => "Organisationen",
            Urheber::Gemeinschaften => "Gemeinschaften",
            Urheber::Unternehmen => "Unternehmen",
            Urheber::Privatperson => "Privatperson",
            Urheber::Unbekannt => "unbekannt",
        }
    }

    /// Short description of what falls into the category
    pub fn description(&self) -> &'static str {
        match self {
            Urheber::Staatlich => "Behörde, Ministerium, staatliche Einrichtung",
            Urheber::NichtStaatlicheHilfsorganisation => {
                "NGO, Hilfswerk, gemeinnützige Organisation"
            }
            Urheber::SonstigeVereine => "Vereine, die keine Hilfsorganisationen sind",
            Urheber::Organisationen => "internationale Organisationen, Verbände",
            Urheber::Gemeinschaften => "informelle Gruppen, Communities, Netzwerke",
            Urheber::Unternehmen => "kommerzielle Unternehmen, GmbH, AG, etc.",
            Urheber::Privatperson => "von Einzelpersonen betriebene Webseiten",
            Urheber::Unbekannt => "nicht bestimmbar",
        }
    }

    /// Whether this is one of the seven assignable categories
    pub fn is_known(&self) -> bool {
        !matches!(self, Urheber::Unbekannt)
    }

    /// Parse a label in identifier or display form
    ///
    /// Matching ignores case, surrounding quotes and whitespace, and treats
    /// `_`, `-` and runs of spaces alike, so `"Nicht staatliche Hilfsorganisation"`
    /// and `nicht_staatliche_hilfsorganisation` both parse.
    pub fn parse(s: &str) -> Option<Self> {
        let normalized = s
            .trim()
            .trim_matches(|c| c == '"' || c == '\'')
            .to_lowercase()
            .replace(['_', '-'], " ");
        let normalized = normalized.split_whitespace().collect::<Vec<_>>().join(" ");

        match normalized.as_str() {
            "staatlich" => Some(Urheber::Staatlich),
            "nicht staatliche hilfsorganisation" => Some(Urheber::NichtStaatlicheHilfsorganisation),
            "sonstige vereine" => Some(Urheber::SonstigeVereine),
            "organisationen" => Some(Urheber::Organisationen),
            "gemeinschaften" => Some(Urheber::Gemeinschaften),
            "unternehmen" => Some(Urheber::Unternehmen),
            "privatperson" => Some(Urheber::Privatperson),
            "unbekannt" => Some(Urheber::Unbekannt),
            _ => None,
        }
    }
}

impl fmt::Display for Urheber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Urheber {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid urheber: {}", s))
    }
}

/// How a classification result was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    /// Cache hit in the domain store
    Database,

    /// Classified by the research provider
    Research,

    /// Input document lacked domain or TLD
    Failure,

    /// Research step failed
    Error,
}

impl Method {
    /// Get the method name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Database => "database",
            Method::Research => "research",
            Method::Failure => "failure",
            Method::Error => "error",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
