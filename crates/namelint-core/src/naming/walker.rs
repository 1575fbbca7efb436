//! Scope-tracking walk over one [`SyntaxTree`].

use std::collections::HashMap;
use std::rc::Rc;

use crate::syntax::{Ident, Node, Span, SyntaxTree};

use super::category::{KindSelector, Modifiers};
use super::checker::NameChecker;
use super::classify::{self, Declaration};
use super::matcher::RuleSet;

/// Receives naming failures as the walk finds them.
pub trait FailureSink {
    /// Records that `ident` violates its contract.
    fn add_failure(&mut self, ident: &Ident, message: String);
}

/// A recorded naming failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    /// The offending name.
    pub name: String,
    /// Where the name was declared.
    pub span: Span,
    /// Human-readable reason.
    pub message: String,
}

impl FailureSink for Vec<Finding> {
    fn add_failure(&mut self, ident: &Ident, message: String) {
        self.push(Finding {
            name: ident.text.clone(),
            span: ident.span,
            message,
        });
    }
}

/// One checking session.
///
/// Owns the scope depth and the checker cache; build a new walker for every
/// tree. The rule set itself is shared.
#[derive(Debug)]
pub struct NamingWalker {
    rules: RuleSet,
    depth: usize,
    cache: HashMap<(KindSelector, Modifiers), Option<Rc<NameChecker>>>,
}

impl NamingWalker {
    /// Creates a walker over `rules`.
    #[must_use]
    pub fn new(rules: RuleSet) -> Self {
        Self {
            rules,
            depth: 0,
            cache: HashMap::new(),
        }
    }

    /// Checks every declaration in `tree`.
    pub fn walk(&mut self, tree: &SyntaxTree, sink: &mut dyn FailureSink) {
        for node in &tree.nodes {
            self.visit(node, sink);
        }
    }

    /// Number of cached `(selector, modifiers)` resolutions.
    #[must_use]
    pub fn cached_entries(&self) -> usize {
        self.cache.len()
    }

    fn visit(&mut self, node: &Node, sink: &mut dyn FailureSink) {
        for declaration in classify::declarations(node, self.depth) {
            self.check(declaration, sink);
        }

        if node.scope_boundary {
            self.depth += 1;
        }
        for param in &node.type_parameters {
            self.check(classify::type_parameter(param, self.depth), sink);
        }
        for child in &node.children {
            self.visit(child, sink);
        }
        if node.scope_boundary {
            self.depth -= 1;
        }
    }

    fn check(&mut self, declaration: Declaration<'_>, sink: &mut dyn FailureSink) {
        let Some(checker) = self.checker_for(&declaration) else {
            return;
        };
        let name = &declaration.ident.text;
        for failure in checker.check(name) {
            sink.add_failure(declaration.ident, checker.message(&failure));
        }
    }

    fn checker_for(&mut self, declaration: &Declaration<'_>) -> Option<Rc<NameChecker>> {
        let key = (declaration.selector, declaration.modifiers);
        if let Some(cached) = self.cache.get(&key) {
            return cached.clone();
        }

        let resolution = self.rules.resolve(
            declaration.selector,
            declaration.modifiers,
            &declaration.ident.text,
        );
        let checker = resolution
            .contract
            .map(|contract| Rc::new(NameChecker::new(declaration.selector, contract)));
        if resolution.cacheable {
            tracing::debug!(
                selector = %declaration.selector,
                modifiers = %declaration.modifiers,
                "cached naming contract"
            );
            self.cache.insert(key, checker.clone());
        }
        checker
    }
}
