//! Rule trait for defining lint rules.

use crate::context::FileContext;
use crate::syntax::SyntaxTree;
use crate::types::{Severity, Violation};

/// A per-file lint rule over a parsed [`SyntaxTree`].
///
/// # Example
///
/// ```ignore
/// use namelint_core::{FileContext, Rule, SyntaxTree, Violation};
///
/// pub struct NoEmptyFiles;
///
/// impl Rule for NoEmptyFiles {
///     fn name(&self) -> &'static str { "no-empty-files" }
///     fn code(&self) -> &'static str { "NL900" }
///
///     fn check(&self, ctx: &FileContext, tree: &SyntaxTree) -> Vec<Violation> {
///         // ...
///         Vec::new()
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "naming-convention").
    fn name(&self) -> &'static str;

    /// Returns the rule code (e.g., "NC001").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the default severity for violations from this rule.
    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    /// Checks a single file and returns any violations found.
    fn check(&self, ctx: &FileContext, tree: &SyntaxTree) -> Vec<Violation>;
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;
