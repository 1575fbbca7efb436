//! Format contracts and case conventions.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::matcher::RuleError;

/// A case convention a name can be required to follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaseFormat {
    /// `camelCase`
    CamelCase,
    /// `PascalCase`
    PascalCase,
    /// `snake_case`
    SnakeCase,
    /// `UPPER_CASE`
    UpperCase,
}

impl CaseFormat {
    /// All case formats.
    pub const ALL: [CaseFormat; 4] = [
        CaseFormat::CamelCase,
        CaseFormat::PascalCase,
        CaseFormat::SnakeCase,
        CaseFormat::UpperCase,
    ];

    /// Returns the configuration spelling of this format.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::CamelCase => "camelCase",
            Self::PascalCase => "PascalCase",
            Self::SnakeCase => "snake_case",
            Self::UpperCase => "UPPER_CASE",
        }
    }

    /// Returns `true` if `name` follows this convention.
    #[must_use]
    pub fn matches(self, name: &str) -> bool {
        match self {
            Self::CamelCase => is_camel_case(name),
            Self::PascalCase => is_pascal_case(name),
            Self::SnakeCase => is_snake_case(name),
            Self::UpperCase => is_upper_case(name),
        }
    }
}

impl fmt::Display for CaseFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CaseFormat {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.name() == s)
            .ok_or_else(|| RuleError::UnknownFormat {
                name: s.to_string(),
            })
    }
}

/// What to do with a single leading or trailing underscore.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnderscorePolicy {
    /// Strip one underscore if present.
    Allow,
    /// Require one underscore and strip it.
    Require,
    /// Report an underscore, then strip it.
    Forbid,
}

impl UnderscorePolicy {
    /// All policies.
    pub const ALL: [UnderscorePolicy; 3] = [
        UnderscorePolicy::Allow,
        UnderscorePolicy::Require,
        UnderscorePolicy::Forbid,
    ];

    /// Returns the configuration spelling of this policy.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Allow => "allow",
            Self::Require => "require",
            Self::Forbid => "forbid",
        }
    }
}

impl FromStr for UnderscorePolicy {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.name() == s)
            .ok_or_else(|| RuleError::UnknownUnderscorePolicy {
                value: s.to_string(),
            })
    }
}

/// An option that accepts either one value or a list of alternatives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    /// A single value.
    One(T),
    /// Any of several values.
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    /// Iterates over the contained values.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        match self {
            Self::One(value) => std::slice::from_ref(value).iter(),
            Self::Many(values) => values.iter(),
        }
    }

    /// Converts every value, failing on the first error.
    ///
    /// The error callback receives the index of a failing list entry.
    pub fn try_map<U, E>(
        &self,
        mut convert: impl FnMut(&T, Option<usize>) -> Result<U, E>,
    ) -> Result<OneOrMany<U>, E> {
        match self {
            Self::One(value) => convert(value, None).map(OneOrMany::One),
            Self::Many(values) => values
                .iter()
                .enumerate()
                .map(|(i, v)| convert(v, Some(i)))
                .collect::<Result<Vec<_>, _>>()
                .map(OneOrMany::Many),
        }
    }
}

impl<T: fmt::Display> OneOrMany<T> {
    /// Joins the values as `a, b or c`.
    #[must_use]
    pub fn join_or(&self) -> String {
        let names: Vec<String> = self.iter().map(ToString::to_string).collect();
        match names.split_last() {
            Some((last, rest)) if !rest.is_empty() => format!("{} or {last}", rest.join(", ")),
            Some((last, _)) => last.clone(),
            None => String::new(),
        }
    }

    /// Joins the values as `a, b, c`.
    #[must_use]
    pub fn join_comma(&self) -> String {
        self.iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// The naming requirements that apply to one declaration.
///
/// Every field is optional. Contracts are merged with [`overlay`], so the
/// requirements of a more specific rule replace those of a broader one field
/// by field.
///
/// [`overlay`]: FormatContract::overlay
#[derive(Debug, Clone, Default)]
pub struct FormatContract {
    /// Accepted case conventions.
    pub format: Option<OneOrMany<CaseFormat>>,
    /// Leading underscore policy.
    pub leading_underscore: Option<UnderscorePolicy>,
    /// Trailing underscore policy.
    pub trailing_underscore: Option<UnderscorePolicy>,
    /// Required prefix.
    pub prefix: Option<OneOrMany<String>>,
    /// Required suffix.
    pub suffix: Option<OneOrMany<String>>,
    /// Regex the whole name must match.
    pub regex: Option<Regex>,
}

impl FormatContract {
    /// Returns `true` if no requirement is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.format.is_none()
            && self.leading_underscore.is_none()
            && self.trailing_underscore.is_none()
            && self.prefix.is_none()
            && self.suffix.is_none()
            && self.regex.is_none()
    }

    /// Replaces every field that is set on `other`; unset fields are kept.
    pub fn overlay(&mut self, other: &Self) {
        if let Some(format) = &other.format {
            self.format = Some(format.clone());
        }
        if let Some(policy) = other.leading_underscore {
            self.leading_underscore = Some(policy);
        }
        if let Some(policy) = other.trailing_underscore {
            self.trailing_underscore = Some(policy);
        }
        if let Some(prefix) = &other.prefix {
            self.prefix = Some(prefix.clone());
        }
        if let Some(suffix) = &other.suffix {
            self.suffix = Some(suffix.clone());
        }
        if let Some(regex) = &other.regex {
            self.regex = Some(regex.clone());
        }
    }
}

// Characters without case (digits, `$`) neither open nor continue an
// uppercase hump.
fn is_upper(c: char) -> bool {
    c.is_uppercase()
}

fn is_pascal_case(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        None => true,
        Some(first) => {
            first != '_' && !first.is_lowercase() && has_strict_humps(chars, is_upper(first))
        }
    }
}

fn is_camel_case(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        None => true,
        Some(first) => first != '_' && !is_upper(first) && has_strict_humps(chars, false),
    }
}

/// Rejects underscores and any two uppercase letters in a row.
fn has_strict_humps(rest: std::str::Chars<'_>, mut was_upper: bool) -> bool {
    for c in rest {
        if c == '_' {
            return false;
        }
        let upper = is_upper(c);
        if upper && was_upper {
            return false;
        }
        was_upper = upper;
    }
    true
}

fn is_snake_case(name: &str) -> bool {
    !name.chars().any(char::is_uppercase) && has_valid_underscores(name)
}

fn is_upper_case(name: &str) -> bool {
    !name.chars().any(char::is_lowercase) && has_valid_underscores(name)
}

/// Underscores must be single, and neither leading nor trailing.
fn has_valid_underscores(name: &str) -> bool {
    !name.starts_with('_') && !name.ends_with('_') && !name.contains("__")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pascal_case_boundaries() {
        assert!(CaseFormat::PascalCase.matches(""));
        assert!(CaseFormat::PascalCase.matches("A"));
        assert!(CaseFormat::PascalCase.matches("FooBar"));
        assert!(CaseFormat::PascalCase.matches("Vec3d"));
        assert!(!CaseFormat::PascalCase.matches("ABC"));
        assert!(!CaseFormat::PascalCase.matches("HttpURL"));
        assert!(!CaseFormat::PascalCase.matches("fooBar"));
        assert!(!CaseFormat::PascalCase.matches("Foo_Bar"));
    }

    #[test]
    fn caseless_first_character_fits_both_humped_formats() {
        for name in ["$Store", "1Abc", "$"] {
            assert!(CaseFormat::PascalCase.matches(name), "{name}");
        }
        assert!(CaseFormat::PascalCase.matches("A1B"));
        assert!(!CaseFormat::PascalCase.matches("$AB"));
        assert!(!CaseFormat::PascalCase.matches("store"));
        assert!(!CaseFormat::PascalCase.matches("_Store"));

        assert!(CaseFormat::CamelCase.matches("$store"));
        assert!(CaseFormat::CamelCase.matches("$Store"));
        assert!(!CaseFormat::CamelCase.matches("$AB"));
    }

    #[test]
    fn camel_case_boundaries() {
        assert!(CaseFormat::CamelCase.matches(""));
        assert!(CaseFormat::CamelCase.matches("aB"));
        assert!(CaseFormat::CamelCase.matches("fooBarBaz"));
        assert!(CaseFormat::CamelCase.matches("item12"));
        assert!(CaseFormat::CamelCase.matches("$el"));
        assert!(!CaseFormat::CamelCase.matches("A"));
        assert!(!CaseFormat::CamelCase.matches("ABC"));
        assert!(!CaseFormat::CamelCase.matches("aBC"));
        assert!(!CaseFormat::CamelCase.matches("foo_bar"));
        assert!(!CaseFormat::CamelCase.matches("_foo"));
    }

    #[test]
    fn snake_case_boundaries() {
        assert!(CaseFormat::SnakeCase.matches("a_b"));
        assert!(CaseFormat::SnakeCase.matches("abc"));
        assert!(CaseFormat::SnakeCase.matches("a1_b2"));
        assert!(!CaseFormat::SnakeCase.matches("a__b"));
        assert!(!CaseFormat::SnakeCase.matches("_a"));
        assert!(!CaseFormat::SnakeCase.matches("a_"));
        assert!(!CaseFormat::SnakeCase.matches("a_B"));
    }

    #[test]
    fn upper_case_boundaries() {
        assert!(CaseFormat::UpperCase.matches("MY_VALUE"));
        assert!(CaseFormat::UpperCase.matches("HTTP2"));
        assert!(!CaseFormat::UpperCase.matches("MY__VALUE"));
        assert!(!CaseFormat::UpperCase.matches("_MY_VALUE"));
        assert!(!CaseFormat::UpperCase.matches("MY_VALUE_"));
        assert!(!CaseFormat::UpperCase.matches("My_Value"));
    }

    #[test]
    fn overlay_replaces_only_present_fields() {
        let mut base = FormatContract {
            format: Some(OneOrMany::One(CaseFormat::CamelCase)),
            leading_underscore: Some(UnderscorePolicy::Forbid),
            ..FormatContract::default()
        };
        let overlay = FormatContract {
            format: Some(OneOrMany::One(CaseFormat::UpperCase)),
            prefix: Some(OneOrMany::One("k".to_string())),
            ..FormatContract::default()
        };
        base.overlay(&overlay);

        assert_eq!(base.format, Some(OneOrMany::One(CaseFormat::UpperCase)));
        assert_eq!(base.leading_underscore, Some(UnderscorePolicy::Forbid));
        assert_eq!(base.prefix, Some(OneOrMany::One("k".to_string())));
        assert!(base.suffix.is_none());
    }

    #[test]
    fn empty_contract() {
        assert!(FormatContract::default().is_empty());
        let contract = FormatContract {
            trailing_underscore: Some(UnderscorePolicy::Allow),
            ..FormatContract::default()
        };
        assert!(!contract.is_empty());
    }

    #[test]
    fn join_or_lists_alternatives() {
        let formats = OneOrMany::Many(vec![
            CaseFormat::CamelCase,
            CaseFormat::PascalCase,
            CaseFormat::UpperCase,
        ]);
        assert_eq!(formats.join_or(), "camelCase, PascalCase or UPPER_CASE");
        assert_eq!(OneOrMany::One(CaseFormat::SnakeCase).join_or(), "snake_case");
    }

    #[test]
    fn parses_policies_and_formats() {
        assert_eq!(
            "forbid".parse::<UnderscorePolicy>().unwrap(),
            UnderscorePolicy::Forbid
        );
        assert_eq!(
            "UPPER_CASE".parse::<CaseFormat>().unwrap(),
            CaseFormat::UpperCase
        );
        assert!("kebab-case".parse::<CaseFormat>().is_err());
        assert!("maybe".parse::<UnderscorePolicy>().is_err());
    }
}
