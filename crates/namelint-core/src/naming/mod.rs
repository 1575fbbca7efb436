//! Identifier naming conventions driven by `[[naming]]` rules.
//!
//! # Architecture
//!
//! ```text
//! [[naming]] TOML
//!   ↓ serde (config_dto::RawRule)
//!   ↓ loader: validate + normalise
//! RuleSet (specificity-sorted RuleMatchers)
//!   ↓ NamingWalker, one per SyntaxTree
//! classify → resolve + cache → NameChecker::check
//!   ↓ FailureSink
//! Violations
//! ```

pub mod category;
pub mod checker;
pub mod classify;
pub mod config_dto;
pub mod format;
pub mod loader;
pub mod matcher;
pub mod presets;
pub mod rule;
pub mod walker;

pub use category::{Kind, KindSelector, Modifier, Modifiers, Specificity};
pub use checker::{NameChecker, NameFailure};
pub use config_dto::RawRule;
pub use format::{CaseFormat, FormatContract, OneOrMany, UnderscorePolicy};
pub use loader::{load_rules, LoadError};
pub use matcher::{RuleError, RuleMatcher, RuleSet};
pub use presets::{preset, recommended, PRESETS};
pub use rule::NamingConvention;
pub use walker::{FailureSink, Finding, NamingWalker};
