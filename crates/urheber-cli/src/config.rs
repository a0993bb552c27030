//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use urheber_llm::OpenAiConfig;
use urheber_research::ResearchConfig;

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Domain store settings
    #[serde(default)]
    pub store: StoreSettings,

    /// Research client settings
    #[serde(default)]
    pub research: ResearchConfig,

    /// Provider connection settings
    #[serde(default)]
    pub provider: OpenAiConfig,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,
}

/// Domain store settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreSettings {
    /// SQLite database path (defaults to ~/.urheber/domains.db)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,

    /// Documents resolved in parallel
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Pretty-printed JSON
    Json,
    /// One line per document
    Text,
}

impl Config {
    /// Directory holding the configuration and default database.
    pub fn dir() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".urheber"))
    }

    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        Ok(Self::dir()?.join("config.toml"))
    }

    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, the default path is used
    /// and a missing file yields the default configuration.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let path = Self::path()?;
                if path.exists() {
                    Self::from_file(&path)?
                } else {
                    Self::default()
                }
            }
        };

        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Validate all sections.
    pub fn validate(&self) -> Result<()> {
        self.research.validate().map_err(CliError::Config)?;
        self.provider.validate().map_err(CliError::Config)?;
        if self.settings.concurrency == 0 {
            return Err(CliError::Config(
                "settings.concurrency must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Resolve the database path.
    pub fn store_path(&self) -> Result<PathBuf> {
        match &self.store.path {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::dir()?.join("domains.db")),
        }
    }
}

/// Create the directory that will hold `path`.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Json,
            concurrency: default_concurrency(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Json
}

fn default_concurrency() -> usize {
    4
}
