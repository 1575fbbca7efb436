//! TOML deserialization types for `[[naming]]` rules.
//!
//! Values stay as strings here; the loader validates them.

use serde::{Deserialize, Serialize};

use super::format::OneOrMany;

/// One `[[naming]]` entry as written by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RawRule {
    /// Kind name (e.g. "variable").
    #[serde(rename = "type")]
    pub kind: String,
    /// Modifier names that must all be present.
    #[serde(default)]
    pub modifiers: Option<OneOrMany<String>>,
    /// Restricts the rule to declarations whose most specific kind is `type`.
    #[serde(rename = "final", default)]
    pub is_final: bool,
    /// Regex the name must match for the rule to apply.
    #[serde(default)]
    pub filter: Option<String>,
    /// Accepted case format(s).
    #[serde(default)]
    pub format: Option<OneOrMany<String>>,
    /// Leading underscore policy.
    #[serde(default)]
    pub leading_underscore: Option<String>,
    /// Trailing underscore policy.
    #[serde(default)]
    pub trailing_underscore: Option<String>,
    /// Required prefix(es).
    #[serde(default)]
    pub prefix: Option<OneOrMany<String>>,
    /// Required suffix(es).
    #[serde(default)]
    pub suffix: Option<OneOrMany<String>>,
    /// Regex the whole name must match.
    #[serde(default)]
    pub regex: Option<String>,
}

impl RawRule {
    /// Creates a rule for `kind` with every option unset.
    #[must_use]
    pub fn new(kind: &str) -> Self {
        Self {
            kind: kind.to_string(),
            ..Self::default()
        }
    }

    /// Sets the required modifiers.
    #[must_use]
    pub fn modifiers(mut self, modifiers: &[&str]) -> Self {
        self.modifiers = Some(many(modifiers));
        self
    }

    /// Sets the accepted formats.
    #[must_use]
    pub fn format(mut self, formats: &[&str]) -> Self {
        self.format = Some(many(formats));
        self
    }

    /// Sets the leading underscore policy.
    #[must_use]
    pub fn leading_underscore(mut self, policy: &str) -> Self {
        self.leading_underscore = Some(policy.to_string());
        self
    }

    /// Sets the trailing underscore policy.
    #[must_use]
    pub fn trailing_underscore(mut self, policy: &str) -> Self {
        self.trailing_underscore = Some(policy.to_string());
        self
    }

    /// Sets the required prefix.
    #[must_use]
    pub fn prefix(mut self, prefixes: &[&str]) -> Self {
        self.prefix = Some(many(prefixes));
        self
    }

    /// Sets the required suffix.
    #[must_use]
    pub fn suffix(mut self, suffixes: &[&str]) -> Self {
        self.suffix = Some(many(suffixes));
        self
    }

    /// Sets the filter regex.
    #[must_use]
    pub fn filter(mut self, pattern: &str) -> Self {
        self.filter = Some(pattern.to_string());
        self
    }

    /// Sets the name regex.
    #[must_use]
    pub fn regex(mut self, pattern: &str) -> Self {
        self.regex = Some(pattern.to_string());
        self
    }

    /// Marks the rule final.
    #[must_use]
    pub fn final_rule(mut self) -> Self {
        self.is_final = true;
        self
    }
}

fn many(values: &[&str]) -> OneOrMany<String> {
    match values {
        [single] => OneOrMany::One((*single).to_string()),
        _ => OneOrMany::Many(values.iter().map(|v| (*v).to_string()).collect()),
    }
}
