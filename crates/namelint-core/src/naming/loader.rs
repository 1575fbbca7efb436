//! DTO → [`RuleSet`] conversion with validation.

use std::str::FromStr;

use super::category::{Kind, Modifier};
use super::config_dto::RawRule;
use super::format::{CaseFormat, FormatContract, OneOrMany, UnderscorePolicy};
use super::matcher::{compile_regex, RuleError, RuleMatcher, RuleSet};

/// Errors during DTO → rule conversion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    /// A field-level validation error.
    #[error("{context}: {source}")]
    Validation {
        /// Where the error occurred (e.g., "naming[2].modifiers[1]").
        context: String,
        /// The underlying rule error.
        source: RuleError,
    },
}

/// Converts raw rules into a sorted [`RuleSet`].
///
/// # Errors
///
/// Returns the first error encountered during conversion.
pub fn load_rules(rules: &[RawRule]) -> Result<RuleSet, LoadError> {
    let matchers = rules
        .iter()
        .enumerate()
        .map(|(i, rule)| convert_rule(rule, &format!("naming[{i}]")))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(RuleSet::new(matchers))
}

fn convert_rule(rule: &RawRule, ctx: &str) -> Result<RuleMatcher, LoadError> {
    let kind: Kind = parse(&rule.kind, ctx, "type")?;

    let modifiers = match &rule.modifiers {
        Some(names) => non_empty(names, ctx, "modifiers")?
            .iter()
            .enumerate()
            .map(|(j, name)| parse::<Modifier>(name, ctx, &format!("modifiers[{j}]")))
            .collect::<Result<Vec<_>, _>>()?,
        None => Vec::new(),
    };

    let filter = rule
        .filter
        .as_deref()
        .map(|p| compile_regex(p).map_err(|e| validation(ctx, "filter", e)))
        .transpose()?;

    let contract = FormatContract {
        format: rule
            .format
            .as_ref()
            .map(|names| parse_list::<CaseFormat>(names, ctx, "format"))
            .transpose()?,
        leading_underscore: rule
            .leading_underscore
            .as_deref()
            .map(|v| parse::<UnderscorePolicy>(v, ctx, "leadingUnderscore"))
            .transpose()?,
        trailing_underscore: rule
            .trailing_underscore
            .as_deref()
            .map(|v| parse::<UnderscorePolicy>(v, ctx, "trailingUnderscore"))
            .transpose()?,
        prefix: rule
            .prefix
            .as_ref()
            .map(|p| non_empty(p, ctx, "prefix").cloned())
            .transpose()?,
        suffix: rule
            .suffix
            .as_ref()
            .map(|s| non_empty(s, ctx, "suffix").cloned())
            .transpose()?,
        regex: rule
            .regex
            .as_deref()
            .map(|p| compile_regex(p).map_err(|e| validation(ctx, "regex", e)))
            .transpose()?,
    };

    Ok(RuleMatcher::new(
        kind,
        &modifiers,
        filter,
        rule.is_final,
        contract,
    ))
}

fn validation(ctx: &str, field: &str, source: RuleError) -> LoadError {
    LoadError::Validation {
        context: format!("{ctx}.{field}"),
        source,
    }
}

fn parse<T>(value: &str, ctx: &str, field: &str) -> Result<T, LoadError>
where
    T: FromStr<Err = RuleError>,
{
    value.parse().map_err(|e| validation(ctx, field, e))
}

fn parse_list<T>(
    values: &OneOrMany<String>,
    ctx: &str,
    field: &str,
) -> Result<OneOrMany<T>, LoadError>
where
    T: FromStr<Err = RuleError>,
{
    non_empty(values, ctx, field)?.try_map(|value, index| {
        let field = match index {
            Some(j) => format!("{field}[{j}]"),
            None => field.to_string(),
        };
        parse(value, ctx, &field)
    })
}

fn non_empty<'a, T>(
    values: &'a OneOrMany<T>,
    ctx: &str,
    field: &str,
) -> Result<&'a OneOrMany<T>, LoadError> {
    match values {
        OneOrMany::Many(list) if list.is_empty() => {
            Err(validation(ctx, field, RuleError::EmptyList))
        }
        _ => Ok(values),
    }
}
