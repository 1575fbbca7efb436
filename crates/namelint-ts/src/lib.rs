//! # namelint-ts
//!
//! Tree-sitter based TypeScript front end for namelint.
//!
//! [`TypeScriptParser`] implements `namelint_core::SourceParser`: it parses
//! `.ts`/`.mts`/`.cts` (or `.tsx` via [`TypeScriptParser::tsx`]) sources and
//! lowers them into the declaration tree the naming rules walk.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod lower;
pub mod typescript;

pub use typescript::TypeScriptParser;
