//! Compiled naming rules and specificity-ordered resolution.

use std::sync::Arc;

use regex::Regex;

use super::category::{Kind, KindSelector, Modifier, Modifiers, Specificity};
use super::format::FormatContract;

/// Field-level problems in a naming rule.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleError {
    /// The `type` names no known kind.
    #[error("unknown kind `{name}`")]
    UnknownKind {
        /// The unrecognised name.
        name: String,
    },

    /// A modifier name is not recognised.
    #[error("unknown modifier `{name}`")]
    UnknownModifier {
        /// The unrecognised name.
        name: String,
    },

    /// A format name is not recognised.
    #[error("unknown format `{name}`, expected: camelCase, PascalCase, snake_case, UPPER_CASE")]
    UnknownFormat {
        /// The unrecognised name.
        name: String,
    },

    /// An underscore policy is not recognised.
    #[error("unknown underscore policy `{value}`, expected: allow, require, forbid")]
    UnknownUnderscorePolicy {
        /// The unrecognised value.
        value: String,
    },

    /// A filter or regex failed to compile.
    #[error("invalid regex `{pattern}`: {reason}")]
    InvalidRegex {
        /// The pattern as written.
        pattern: String,
        /// Compiler message.
        reason: String,
    },

    /// A list option has no entries.
    #[error("list must not be empty")]
    EmptyList,
}

/// Compiles `pattern`, mapping failures to [`RuleError::InvalidRegex`].
///
/// # Errors
///
/// Returns an error if the pattern is not a valid regex.
pub fn compile_regex(pattern: &str) -> Result<Regex, RuleError> {
    Regex::new(pattern).map_err(|e| RuleError::InvalidRegex {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })
}

/// One normalised naming rule.
#[derive(Debug, Clone)]
pub struct RuleMatcher {
    kind: Kind,
    kinds: KindSelector,
    modifiers: Modifiers,
    filter: Option<Regex>,
    is_final: bool,
    specificity: Specificity,
    contract: FormatContract,
}

/// Outcome of testing one matcher against one declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchResult {
    /// Whether the matcher's contract applies.
    pub applies: bool,
    /// Whether the matcher's filter was evaluated.
    pub consulted_filter: bool,
}

impl RuleMatcher {
    /// Builds a matcher and computes its specificity.
    #[must_use]
    pub fn new(
        kind: Kind,
        modifiers: &[Modifier],
        filter: Option<Regex>,
        is_final: bool,
        contract: FormatContract,
    ) -> Self {
        let mut specificity = Specificity::of_kind(kind);
        let mut mask = Modifiers::NONE;
        for &modifier in modifiers {
            mask |= modifier.flag();
            specificity = specificity.with_modifier(modifier);
        }
        if filter.is_some() {
            specificity = specificity.with_filter();
        }
        Self {
            kind,
            kinds: kind.mask(),
            modifiers: mask,
            filter,
            is_final,
            specificity,
            contract,
        }
    }

    /// The kind this rule names.
    #[must_use]
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// The rule's ordering weight.
    #[must_use]
    pub fn specificity(&self) -> Specificity {
        self.specificity
    }

    /// The contract fragment this rule contributes.
    #[must_use]
    pub fn contract(&self) -> &FormatContract {
        &self.contract
    }

    /// Tests this rule against a declaration.
    #[must_use]
    pub fn matches(&self, selector: KindSelector, modifiers: Modifiers, name: &str) -> MatchResult {
        let structural = (!self.is_final || selector.most_specific() == Some(self.kind))
            && self.kinds.intersects(selector)
            && self.modifiers.difference(modifiers).is_empty();
        if !structural {
            return MatchResult {
                applies: false,
                consulted_filter: false,
            };
        }
        match &self.filter {
            Some(filter) => MatchResult {
                applies: filter.is_match(name),
                consulted_filter: true,
            },
            None => MatchResult {
                applies: true,
                consulted_filter: false,
            },
        }
    }
}

/// The merged contract for one declaration.
#[derive(Debug, Clone)]
pub struct Resolution {
    /// The overlay of every applicable fragment; `None` if nothing was set.
    pub contract: Option<FormatContract>,
    /// `false` if a filter took part, so the result depends on the name.
    pub cacheable: bool,
}

/// An immutable, specificity-sorted list of matchers.
///
/// Cloning shares the underlying list.
#[derive(Debug, Clone)]
pub struct RuleSet {
    matchers: Arc<[RuleMatcher]>,
}

impl RuleSet {
    /// Sorts `matchers` ascending by specificity.
    ///
    /// The sort is stable, so of two equally specific rules the later one
    /// is overlaid last and wins.
    #[must_use]
    pub fn new(mut matchers: Vec<RuleMatcher>) -> Self {
        matchers.sort_by_key(RuleMatcher::specificity);
        tracing::debug!(rules = matchers.len(), "sorted naming rules");
        Self {
            matchers: matchers.into(),
        }
    }

    /// Returns the matchers in resolution order.
    #[must_use]
    pub fn matchers(&self) -> &[RuleMatcher] {
        &self.matchers
    }

    /// Returns `true` if no rule is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }

    /// Merges every rule that applies to the declaration.
    #[must_use]
    pub fn resolve(&self, selector: KindSelector, modifiers: Modifiers, name: &str) -> Resolution {
        let mut contract = FormatContract::default();
        let mut cacheable = true;
        for matcher in self.matchers.iter() {
            let result = matcher.matches(selector, modifiers, name);
            if result.consulted_filter {
                cacheable = false;
            }
            if result.applies {
                contract.overlay(&matcher.contract);
            }
        }
        Resolution {
            contract: (!contract.is_empty()).then_some(contract),
            cacheable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::format::{CaseFormat, OneOrMany};

    fn contract(format: CaseFormat) -> FormatContract {
        FormatContract {
            format: Some(OneOrMany::One(format)),
            ..FormatContract::default()
        }
    }

    fn format_of(resolution: &Resolution) -> Option<CaseFormat> {
        match resolution.contract.as_ref()?.format.as_ref()? {
            OneOrMany::One(format) => Some(*format),
            OneOrMany::Many(_) => None,
        }
    }

    #[test]
    fn more_specific_rule_overrides() {
        let rules = RuleSet::new(vec![
            RuleMatcher::new(
                Kind::Variable,
                &[Modifier::Const],
                None,
                false,
                contract(CaseFormat::UpperCase),
            ),
            RuleMatcher::new(
                Kind::Default,
                &[],
                None,
                false,
                contract(CaseFormat::CamelCase),
            ),
        ]);
        let plain = rules.resolve(KindSelector::VARIABLE, Modifiers::GLOBAL, "x");
        let constant = rules.resolve(
            KindSelector::VARIABLE,
            Modifiers::GLOBAL | Modifiers::CONST,
            "X",
        );
        assert_eq!(format_of(&plain), Some(CaseFormat::CamelCase));
        assert_eq!(format_of(&constant), Some(CaseFormat::UpperCase));
    }

    #[test]
    fn equal_specificity_keeps_declaration_order() {
        let rules = RuleSet::new(vec![
            RuleMatcher::new(Kind::Class, &[], None, false, contract(CaseFormat::SnakeCase)),
            RuleMatcher::new(Kind::Class, &[], None, false, contract(CaseFormat::PascalCase)),
        ]);
        let resolution = rules.resolve(KindSelector::CLASS, Modifiers::GLOBAL, "Foo");
        assert_eq!(format_of(&resolution), Some(CaseFormat::PascalCase));
    }

    #[test]
    fn final_rule_only_hits_its_own_kind() {
        let variable = RuleMatcher::new(
            Kind::Variable,
            &[],
            None,
            true,
            contract(CaseFormat::CamelCase),
        );
        assert!(variable.matches(KindSelector::VARIABLE, Modifiers::NONE, "a").applies);
        assert!(!variable.matches(KindSelector::FUNCTION, Modifiers::NONE, "a").applies);
        assert!(!variable.matches(KindSelector::PARAMETER, Modifiers::NONE, "a").applies);

        let property = RuleMatcher::new(
            Kind::Property,
            &[],
            None,
            true,
            contract(CaseFormat::CamelCase),
        );
        assert!(property.matches(KindSelector::PROPERTY, Modifiers::NONE, "a").applies);
        assert!(property
            .matches(KindSelector::PARAMETER_PROPERTY, Modifiers::NONE, "a")
            .applies);
        assert!(!property.matches(KindSelector::ENUM_MEMBER, Modifiers::NONE, "a").applies);

        let default = RuleMatcher::new(
            Kind::Default,
            &[],
            None,
            true,
            contract(CaseFormat::CamelCase),
        );
        assert!(!default.matches(KindSelector::VARIABLE, Modifiers::NONE, "a").applies);
    }

    #[test]
    fn every_required_modifier_must_be_present() {
        let matcher = RuleMatcher::new(
            Kind::Property,
            &[Modifier::Static, Modifier::Readonly],
            None,
            false,
            contract(CaseFormat::UpperCase),
        );
        let both = Modifiers::STATIC | Modifiers::CONST | Modifiers::PUBLIC;
        assert!(matcher.matches(KindSelector::PROPERTY, both, "A").applies);
        assert!(!matcher.matches(KindSelector::PROPERTY, Modifiers::STATIC, "A").applies);
    }

    #[test]
    fn filter_is_recorded_only_after_structural_match() {
        let matcher = RuleMatcher::new(
            Kind::Variable,
            &[],
            Some(compile_regex("^on").unwrap()),
            false,
            FormatContract::default(),
        );
        let miss = matcher.matches(KindSelector::CLASS, Modifiers::NONE, "onClick");
        assert!(!miss.applies && !miss.consulted_filter);

        let rejected = matcher.matches(KindSelector::VARIABLE, Modifiers::NONE, "click");
        assert!(!rejected.applies && rejected.consulted_filter);

        // Unanchored: the pattern may match anywhere.
        let anywhere = RuleMatcher::new(
            Kind::Variable,
            &[],
            Some(compile_regex("Handler").unwrap()),
            false,
            FormatContract::default(),
        );
        assert!(anywhere.matches(KindSelector::VARIABLE, Modifiers::NONE, "clickHandlerFn").applies);
    }

    #[test]
    fn filtered_resolution_is_not_cacheable() {
        let rules = RuleSet::new(vec![
            RuleMatcher::new(Kind::Default, &[], None, false, contract(CaseFormat::CamelCase)),
            RuleMatcher::new(
                Kind::Variable,
                &[],
                Some(compile_regex("^[A-Z]").unwrap()),
                false,
                contract(CaseFormat::PascalCase),
            ),
        ]);
        let upper = rules.resolve(KindSelector::VARIABLE, Modifiers::LOCAL, "Foo");
        let lower = rules.resolve(KindSelector::VARIABLE, Modifiers::LOCAL, "foo");
        assert!(!upper.cacheable && !lower.cacheable);
        assert_eq!(format_of(&upper), Some(CaseFormat::PascalCase));
        assert_eq!(format_of(&lower), Some(CaseFormat::CamelCase));

        let class = rules.resolve(KindSelector::CLASS, Modifiers::GLOBAL, "Foo");
        assert!(class.cacheable);
    }

    #[test]
    fn empty_merge_yields_no_contract() {
        let rules = RuleSet::new(vec![RuleMatcher::new(
            Kind::Class,
            &[],
            None,
            false,
            contract(CaseFormat::PascalCase),
        )]);
        let resolution = rules.resolve(KindSelector::VARIABLE, Modifiers::GLOBAL, "x");
        assert!(resolution.contract.is_none());
        assert!(resolution.cacheable);
    }

    #[test]
    fn invalid_regex_reports_pattern() {
        let err = compile_regex("(").unwrap_err();
        assert!(matches!(err, RuleError::InvalidRegex { ref pattern, .. } if pattern == "("));
    }
}
