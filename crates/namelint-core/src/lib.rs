//! # namelint-core
//!
//! Core framework for identifier naming checks.
//!
//! This crate provides:
//!
//! - [`SyntaxTree`], the language-neutral declaration tree rules consume
//! - [`SourceParser`], the extension point for language front ends
//! - [`Rule`] trait and [`Violation`] for lint findings
//! - [`Analyzer`] for orchestrating lint execution over a project
//! - [`naming`], the naming-convention engine
//!
//! ## Example
//!
//! ```ignore
//! use namelint_core::{naming::NamingConvention, Analyzer, Config};
//! use namelint_ts::TypeScriptParser;
//!
//! let config = Config::default();
//! let analyzer = Analyzer::builder()
//!     .root("./src")
//!     .parser(TypeScriptParser::new())
//!     .rule(NamingConvention::new(config.naming_rules()?))
//!     .config(config)
//!     .build()?;
//!
//! let result = analyzer.analyze()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod config;
mod context;
mod parser;
mod rule;
mod types;

pub mod naming;
pub mod syntax;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError};
pub use config::{AnalyzerConfig, Config, ConfigError, RuleConfig};
pub use context::FileContext;
pub use parser::{ParseError, ParserBox, SourceParser};
pub use rule::{Rule, RuleBox};
pub use syntax::SyntaxTree;
pub use types::{LintResult, Location, Severity, Violation, ViolationDiagnostic};
