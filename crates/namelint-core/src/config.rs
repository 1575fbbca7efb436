//! Configuration types for namelint.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

use crate::naming::{self, LoadError, RawRule, RuleSet};
use crate::types::Severity;

/// Top-level configuration for namelint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Rule preset placed before `[[naming]]` rules ("recommended", "none").
    ///
    /// When unset, "recommended" applies only if no `[[naming]]` rule is given.
    #[serde(default)]
    pub preset: Option<String>,

    /// Severity threshold for a failing exit status (default: "error").
    #[serde(default)]
    pub fail_on: Option<Severity>,

    /// Analyzer configuration.
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    /// Per-rule configurations.
    #[serde(default)]
    pub rules: HashMap<String, RuleConfig>,

    /// Naming rules in declaration order.
    #[serde(default)]
    pub naming: Vec<RawRule>,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Checks if a rule is enabled.
    #[must_use]
    pub fn is_rule_enabled(&self, rule_name: &str) -> bool {
        self.rules
            .get(rule_name)
            .map_or(true, |c| c.enabled.unwrap_or(true))
    }

    /// Gets the severity override for a rule.
    #[must_use]
    pub fn rule_severity(&self, rule_name: &str) -> Option<Severity> {
        self.rules.get(rule_name).and_then(|c| c.severity)
    }

    /// Severity at or above which violations fail the run.
    #[must_use]
    pub fn fail_threshold(&self) -> Severity {
        self.fail_on.unwrap_or(Severity::Error)
    }

    /// Builds the naming rule set: preset rules first, then `[[naming]]`.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown preset or a malformed rule.
    pub fn naming_rules(&self) -> Result<RuleSet, ConfigError> {
        let preset = match self.preset.as_deref() {
            Some(name) => name,
            None if self.naming.is_empty() => "recommended",
            None => "none",
        };
        let mut raw = naming::preset(preset).ok_or_else(|| ConfigError::UnknownPreset {
            name: preset.to_string(),
        })?;
        let offset = raw.len();
        raw.extend(self.naming.iter().cloned());

        naming::load_rules(&raw).map_err(|e| match e {
            // Report positions within the user's own `[[naming]]` list.
            LoadError::Validation { context, source } => {
                let context = context
                    .strip_prefix("naming[")
                    .and_then(|rest| rest.split_once(']'))
                    .and_then(|(index, tail)| {
                        let index = index.parse::<usize>().ok()?.checked_sub(offset)?;
                        Some(format!("naming[{index}]{tail}"))
                    })
                    .unwrap_or(context);
                ConfigError::Naming(LoadError::Validation { context, source })
            }
        })
    }
}

/// Analyzer-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Root directory to analyze (default: current directory).
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Glob patterns to exclude from analysis.
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            exclude: Vec::new(),
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

/// Per-rule configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Whether this rule is enabled.
    #[serde(default)]
    pub enabled: Option<bool>,

    /// Severity override for this rule.
    #[serde(default)]
    pub severity: Option<Severity>,
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },

    /// The `preset` key names no built-in preset.
    #[error("unknown preset `{name}`, expected: recommended, none")]
    UnknownPreset {
        /// The unrecognised name.
        name: String,
    },

    /// A `[[naming]]` rule is malformed.
    #[error("invalid naming rule: {0}")]
    Naming(#[from] LoadError),
}
