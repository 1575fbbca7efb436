//! NC001: naming-convention.

use crate::context::FileContext;
use crate::rule::Rule;
use crate::syntax::{Ident, SyntaxTree};
use crate::types::{Location, Severity, Violation};

use super::matcher::RuleSet;
use super::walker::{FailureSink, NamingWalker};

/// Checks every declared name against the configured naming rules.
#[derive(Debug, Clone)]
pub struct NamingConvention {
    rules: RuleSet,
}

impl NamingConvention {
    /// Rule name.
    pub const NAME: &'static str = "naming-convention";
    /// Rule code.
    pub const CODE: &'static str = "NC001";

    /// Creates the rule over a loaded rule set.
    #[must_use]
    pub fn new(rules: RuleSet) -> Self {
        Self { rules }
    }
}

/// Collects walker failures as violations of one file.
struct ViolationSink<'a> {
    rule: &'a NamingConvention,
    file: &'a FileContext<'a>,
    violations: Vec<Violation>,
}

impl FailureSink for ViolationSink<'_> {
    fn add_failure(&mut self, ident: &Ident, message: String) {
        let location = Location::from_span(self.file.relative_path.clone(), ident.span);
        self.violations.push(
            Violation::new(
                self.rule.code(),
                self.rule.name(),
                self.rule.default_severity(),
                location,
                message,
            )
            .with_name(ident.text.clone()),
        );
    }
}

impl Rule for NamingConvention {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn code(&self) -> &'static str {
        Self::CODE
    }

    fn description(&self) -> &'static str {
        "Enforces naming conventions by declaration kind and modifiers"
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn check(&self, ctx: &FileContext, tree: &SyntaxTree) -> Vec<Violation> {
        if self.rules.is_empty() {
            return Vec::new();
        }
        let mut sink = ViolationSink {
            rule: self,
            file: ctx,
            violations: Vec::new(),
        };
        NamingWalker::new(self.rules.clone()).walk(tree, &mut sink);
        sink.violations
    }
}
