//! Validation of an identifier against a merged [`FormatContract`].

use std::fmt;

use super::category::KindSelector;
use super::format::{CaseFormat, FormatContract, OneOrMany, UnderscorePolicy};

/// One way a name fails its contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameFailure {
    /// The name does not match the configured regex.
    RegexMismatch,
    /// The name starts with `_` under a `forbid` policy.
    LeadingUnderscoreForbidden,
    /// The name lacks a leading `_` under a `require` policy.
    LeadingUnderscoreRequired,
    /// The name ends with `_` under a `forbid` policy.
    TrailingUnderscoreForbidden,
    /// The name lacks a trailing `_` under a `require` policy.
    TrailingUnderscoreRequired,
    /// The name does not start with the required prefix.
    MissingPrefix(OneOrMany<String>),
    /// The name does not end with the required suffix.
    MissingSuffix(OneOrMany<String>),
    /// The name follows none of the accepted case conventions.
    WrongFormat(OneOrMany<CaseFormat>),
}

impl fmt::Display for NameFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RegexMismatch => f.write_str("name did not match required regex"),
            Self::LeadingUnderscoreForbidden => {
                f.write_str("name must not have leading underscore")
            }
            Self::LeadingUnderscoreRequired => f.write_str("name must have leading underscore"),
            Self::TrailingUnderscoreForbidden => {
                f.write_str("name must not have trailing underscore")
            }
            Self::TrailingUnderscoreRequired => f.write_str("name must have trailing underscore"),
            Self::MissingPrefix(OneOrMany::One(prefix)) => {
                write!(f, "name must start with {prefix}")
            }
            Self::MissingPrefix(prefixes) => {
                write!(f, "name must start with one of {}", prefixes.join_comma())
            }
            Self::MissingSuffix(OneOrMany::One(suffix)) => write!(f, "name must end with {suffix}"),
            Self::MissingSuffix(suffixes) => {
                write!(f, "name must end with one of {}", suffixes.join_comma())
            }
            Self::WrongFormat(formats) => write!(f, "name must be in {}", formats.join_or()),
        }
    }
}

/// A compiled contract bound to the kind selector it was resolved for.
#[derive(Debug, Clone)]
pub struct NameChecker {
    selector: KindSelector,
    contract: FormatContract,
}

impl NameChecker {
    /// Creates a checker for declarations of `selector`.
    #[must_use]
    pub fn new(selector: KindSelector, contract: FormatContract) -> Self {
        Self { selector, contract }
    }

    /// Returns the contract this checker enforces.
    #[must_use]
    pub fn contract(&self) -> &FormatContract {
        &self.contract
    }

    /// Returns every failure of `name`, in check order.
    ///
    /// Underscores and affixes are stripped as they are checked, so the
    /// case convention is tested against the remaining core of the name.
    #[must_use]
    pub fn check(&self, name: &str) -> Vec<NameFailure> {
        let contract = &self.contract;
        let mut failures = Vec::new();

        if let Some(regex) = &contract.regex {
            if !regex.is_match(name) {
                failures.push(NameFailure::RegexMismatch);
            }
        }

        let mut rest = name;

        if let Some(policy) = contract.leading_underscore {
            if let Some(stripped) = rest.strip_prefix('_') {
                if policy == UnderscorePolicy::Forbid {
                    failures.push(NameFailure::LeadingUnderscoreForbidden);
                }
                rest = stripped;
            } else if policy == UnderscorePolicy::Require {
                failures.push(NameFailure::LeadingUnderscoreRequired);
            }
        }

        if let Some(policy) = contract.trailing_underscore {
            if let Some(stripped) = rest.strip_suffix('_') {
                if policy == UnderscorePolicy::Forbid {
                    failures.push(NameFailure::TrailingUnderscoreForbidden);
                }
                rest = stripped;
            } else if policy == UnderscorePolicy::Require {
                failures.push(NameFailure::TrailingUnderscoreRequired);
            }
        }

        if let Some(prefixes) = &contract.prefix {
            match prefixes.iter().find_map(|p| rest.strip_prefix(p.as_str())) {
                Some(stripped) => rest = stripped,
                None => failures.push(NameFailure::MissingPrefix(prefixes.clone())),
            }
        }

        if let Some(suffixes) = &contract.suffix {
            match suffixes.iter().find_map(|s| rest.strip_suffix(s.as_str())) {
                Some(stripped) => rest = stripped,
                None => failures.push(NameFailure::MissingSuffix(suffixes.clone())),
            }
        }

        if let Some(formats) = &contract.format {
            if !formats.iter().any(|f| f.matches(rest)) {
                failures.push(NameFailure::WrongFormat(formats.clone()));
            }
        }

        failures
    }

    /// Returns the diagnostic message for a failure.
    #[must_use]
    pub fn message(&self, failure: &NameFailure) -> String {
        format!("{} {failure}", self.selector)
    }
}
