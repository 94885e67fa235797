//! Configuration types for markup-lint.

use crate::types::Severity;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Top-level configuration, usually read from `markup-lint.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Preset to use (e.g., "recommended", "strict", "minimal").
    #[serde(default)]
    pub preset: Option<String>,

    /// Severity threshold for a failing exit (default: "error").
    #[serde(default)]
    pub fail_on: Option<String>,

    /// Message locale (e.g., "en", "ja").
    #[serde(default)]
    pub locale: Option<String>,

    /// Per-rule configurations.
    #[serde(default)]
    pub rules: HashMap<String, RuleConfig>,
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
    ///
    /// `value = false` disables a rule the same way `enabled = false` does.
    #[must_use]
    pub fn is_rule_enabled(&self, rule_name: &str, rule_code: &str) -> bool {
        self.rule_for(rule_name, rule_code).map_or(true, RuleConfig::is_enabled)
    }

    /// Gets the severity override for a rule.
    #[must_use]
    pub fn rule_severity(&self, rule_name: &str, rule_code: &str) -> Option<Severity> {
        self.rule_for(rule_name, rule_code).and_then(|c| c.severity)
    }

    /// Gets the configuration table of a rule, keyed by name or code.
    ///
    /// A table under the rule name wins over one under its code.
    #[must_use]
    pub fn rule_for(&self, rule_name: &str, rule_code: &str) -> Option<&RuleConfig> {
        self.rules.get(rule_name).or_else(|| self.rules.get(rule_code))
    }

    /// Resolves `fail_on`, defaulting to [`Severity::Error`].
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown severity name.
    pub fn fail_on_severity(&self) -> Result<Severity, ConfigError> {
        self.fail_on
            .as_deref()
            .map_or(Ok(Severity::Error), |s| {
                s.parse().map_err(|message| ConfigError::Parse { message })
            })
    }
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

    /// The rule's main value (for example, naming patterns).
    #[serde(default)]
    pub value: Option<toml::Value>,

    /// Rule-specific options as key-value pairs.
    #[serde(flatten)]
    pub options: HashMap<String, toml::Value>,
}

impl RuleConfig {
    /// Creates an empty rule configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the main value.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<toml::Value>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Sets an option.
    #[must_use]
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<toml::Value>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Returns false when `enabled` or `value` is `false`.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
            && self
                .value
                .as_ref()
                .and_then(toml::Value::as_bool)
                .unwrap_or(true)
    }

    /// Gets a boolean option with a default value.
    #[must_use]
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        self.options
            .get(key)
            .and_then(toml::Value::as_bool)
            .unwrap_or(default)
    }

    /// Gets a string array option.
    #[must_use]
    pub fn get_str_array(&self, key: &str) -> Vec<String> {
        self.options.get(key).map(str_array).unwrap_or_default()
    }

    /// Gets the main value as strings: a single string or an array of them.
    #[must_use]
    pub fn value_strings(&self) -> Vec<String> {
        self.value.as_ref().map(str_array).unwrap_or_default()
    }
}

fn str_array(value: &toml::Value) -> Vec<String> {
    match value {
        toml::Value::String(s) => vec![s.clone()],
        toml::Value::Array(arr) => arr
            .iter()
            .filter_map(|v| v.as_str().map(String::from))
            .collect(),
        _ => Vec::new(),
    }
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
}
