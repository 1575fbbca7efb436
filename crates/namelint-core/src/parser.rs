//! Front-end extension point.
//!
//! Implement [`SourceParser`] to teach the analyzer a new language: it turns
//! source text into the [`SyntaxTree`] the rules consume.

use std::path::Path;

use crate::syntax::SyntaxTree;

/// Errors a front end can report.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The grammar could not be loaded.
    #[error("failed to load {language} grammar: {message}")]
    Language {
        /// Language identifier.
        language: &'static str,
        /// Loader message.
        message: String,
    },

    /// The parser produced no tree.
    #[error("parser returned no tree")]
    NoTree,
}

/// Language-specific source parser.
pub trait SourceParser: Send + Sync {
    /// Language identifier (e.g. `"typescript"`).
    fn language_id(&self) -> &'static str;

    /// File extensions this parser handles, without the dot.
    fn extensions(&self) -> &'static [&'static str];

    /// Parses `source` read from `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be parsed at all.
    fn parse(&self, path: &Path, source: &str) -> Result<SyntaxTree, ParseError>;

    /// Returns `true` if this parser handles `path`.
    fn handles(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions().contains(&ext))
    }
}

/// Type alias for boxed parser trait objects.
pub type ParserBox = Box<dyn SourceParser>;

#[cfg(test)]
mod tests {
    use super::*;

    struct Fake;

    impl SourceParser for Fake {
        fn language_id(&self) -> &'static str {
            "fake"
        }

        fn extensions(&self) -> &'static [&'static str] {
            &["ts", "mts"]
        }

        fn parse(&self, path: &Path, _source: &str) -> Result<SyntaxTree, ParseError> {
            Ok(SyntaxTree::new(path, Vec::new()))
        }
    }

    #[test]
    fn handles_by_extension() {
        assert!(Fake.handles(Path::new("src/a.ts")));
        assert!(Fake.handles(Path::new("src/a.mts")));
        assert!(!Fake.handles(Path::new("src/a.tsx")));
        assert!(!Fake.handles(Path::new("Makefile")));
    }
}
