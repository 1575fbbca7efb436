//! Core analyzer for orchestrating lint execution.

use crate::config::Config;
use crate::context::FileContext;
use crate::parser::{ParseError, ParserBox, SourceParser};
use crate::rule::{Rule, RuleBox};
use crate::types::{LintResult, Violation};

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Directories skipped unless the caller sets its own excludes.
const DEFAULT_EXCLUDES: [&str; 2] = ["**/node_modules/**", "**/dist/**"];

/// Errors that can occur during analysis.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// IO error reading files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing a source file.
    #[error("Parse error in {path}: {source}")]
    Parse {
        /// Path to the file that failed to parse.
        path: PathBuf,
        /// Front-end error.
        source: ParseError,
    },

    /// Glob pattern error.
    #[error("Invalid glob pattern: {0}")]
    Glob(#[from] glob::PatternError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// No parser was registered.
    #[error("no source parser registered")]
    NoParser,
}

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    root: Option<PathBuf>,
    rules: Vec<RuleBox>,
    parsers: Vec<ParserBox>,
    exclude_patterns: Vec<String>,
    config: Option<Config>,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the root directory to analyze.
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Adds a per-file rule to the analyzer.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Registers a front end.
    #[must_use]
    pub fn parser<P: SourceParser + 'static>(mut self, parser: P) -> Self {
        self.parsers.push(Box::new(parser));
        self
    }

    /// Adds an exclude glob pattern.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Adds multiple exclude glob patterns.
    #[must_use]
    pub fn excludes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_patterns
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Builds the analyzer.
    ///
    /// # Errors
    ///
    /// Returns an error if no parser is registered or the working
    /// directory cannot be resolved.
    pub fn build(self) -> Result<Analyzer, AnalyzerError> {
        if self.parsers.is_empty() {
            return Err(AnalyzerError::NoParser);
        }

        let root = self
            .root
            .or_else(|| self.config.as_ref().map(|c| c.analyzer.root.clone()))
            .unwrap_or_else(|| PathBuf::from("."));

        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir()?.join(&root)
        };

        // Merge exclude patterns from config
        let mut exclude_patterns = self.exclude_patterns;
        if let Some(ref config) = self.config {
            exclude_patterns.extend(config.analyzer.exclude.clone());
        }

        if exclude_patterns.is_empty() {
            exclude_patterns.extend(DEFAULT_EXCLUDES.map(String::from));
        }

        Ok(Analyzer {
            root,
            rules: self.rules,
            parsers: self.parsers,
            exclude_patterns,
            config: self.config.unwrap_or_default(),
        })
    }
}

/// The main analyzer that orchestrates lint execution.
///
/// Use [`Analyzer::builder()`] to construct an instance.
pub struct Analyzer {
    root: PathBuf,
    rules: Vec<RuleBox>,
    parsers: Vec<ParserBox>,
    exclude_patterns: Vec<String>,
    config: Config,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the root directory being analyzed.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Analyzes all files and returns the results.
    ///
    /// If the root is a file, only that file is analyzed. Files that fail to
    /// parse are logged and left out of `files_checked`.
    ///
    /// # Errors
    ///
    /// Returns an error if file discovery or reading fails.
    pub fn analyze(&self) -> Result<LintResult, AnalyzerError> {
        info!("Starting analysis at {:?}", self.root);

        let mut result = LintResult::new();
        let files = self.discover_files()?;

        info!("Found {} files to analyze", files.len());

        for file_path in &files {
            match self.analyze_file(file_path) {
                Ok(violations) => {
                    result.violations.extend(violations);
                    result.files_checked += 1;
                }
                Err(AnalyzerError::Parse { path, source }) => {
                    warn!("Failed to parse {}: {}", path.display(), source);
                }
                Err(e) => return Err(e),
            }
        }

        result.sort();

        info!(
            "Analysis complete: {} violations in {} files",
            result.violations.len(),
            result.files_checked
        );

        Ok(result)
    }

    /// Analyzes source text as if it were read from `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if no parser handles `path` or parsing fails.
    pub fn analyze_source(&self, path: &Path, content: &str) -> Result<Vec<Violation>, AnalyzerError> {
        let parser = self
            .parser_for(path)
            .ok_or(AnalyzerError::NoParser)?;
        let tree = parser
            .parse(path, content)
            .map_err(|source| AnalyzerError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        let base = if self.root.is_file() {
            self.root.parent().unwrap_or(&self.root)
        } else {
            &self.root
        };
        let ctx = FileContext::new(path, content, base);
        let mut violations = Vec::new();

        for rule in &self.rules {
            if !self.config.is_rule_enabled(rule.name()) {
                debug!("Skipping disabled rule: {}", rule.name());
                continue;
            }

            let rule_violations = rule.check(&ctx, &tree);
            let rule_violations = self.apply_severity_override(rule.name(), rule_violations);
            violations.extend(rule_violations);
        }

        Ok(violations)
    }

    /// Analyzes a single file and returns violations.
    fn analyze_file(&self, path: &Path) -> Result<Vec<Violation>, AnalyzerError> {
        debug!("Analyzing: {}", path.display());

        let content = std::fs::read_to_string(path)?;
        self.analyze_source(path, &content)
    }

    /// Applies severity overrides from configuration.
    fn apply_severity_override(
        &self,
        rule_name: &str,
        mut violations: Vec<Violation>,
    ) -> Vec<Violation> {
        if let Some(severity) = self.config.rule_severity(rule_name) {
            for v in &mut violations {
                v.severity = severity;
            }
        }
        violations
    }

    fn parser_for(&self, path: &Path) -> Option<&dyn SourceParser> {
        self.parsers
            .iter()
            .find(|p| p.handles(path))
            .map(|p| &**p)
    }

    /// Discovers all source files some parser handles.
    fn discover_files(&self) -> Result<Vec<PathBuf>, AnalyzerError> {
        if self.root.is_file() {
            return Ok(vec![self.root.clone()]);
        }

        let mut files = Vec::new();
        for parser in &self.parsers {
            for ext in parser.extensions() {
                let pattern = format!("{}/**/*.{ext}", self.root.display());
                for entry in glob::glob(&pattern)? {
                    let path = entry.map_err(|e| AnalyzerError::Io(e.into_error()))?;

                    if self.should_exclude(&path) {
                        debug!("Excluding: {}", path.display());
                        continue;
                    }

                    files.push(path);
                }
            }
        }

        files.sort();
        files.dedup();
        Ok(files)
    }

    /// Checks if a path should be excluded.
    fn should_exclude(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();

        for pattern in &self.exclude_patterns {
            if let Ok(glob_pattern) = glob::Pattern::new(pattern) {
                if glob_pattern.matches(&path_str) {
                    return true;
                }
            }

            // Also check as substring for patterns like "**/dist/**"
            let normalized_pattern = pattern.replace("**", "");
            if !normalized_pattern.is_empty() && path_str.contains(&normalized_pattern) {
                return true;
            }
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::SyntaxTree;

    struct EmptyParser;

    impl SourceParser for EmptyParser {
        fn language_id(&self) -> &'static str {
            "empty"
        }

        fn extensions(&self) -> &'static [&'static str] {
            &["ts"]
        }

        fn parse(&self, path: &Path, _source: &str) -> Result<SyntaxTree, ParseError> {
            Ok(SyntaxTree::new(path, Vec::new()))
        }
    }

    /// Refuses any file whose source mentions `broken`.
    struct PickyParser;

    impl SourceParser for PickyParser {
        fn language_id(&self) -> &'static str {
            "picky"
        }

        fn extensions(&self) -> &'static [&'static str] {
            &["ts"]
        }

        fn parse(&self, path: &Path, source: &str) -> Result<SyntaxTree, ParseError> {
            if source.contains("broken") {
                return Err(ParseError::NoTree);
            }
            Ok(SyntaxTree::new(path, Vec::new()))
        }
    }

    #[test]
    fn test_builder_requires_parser() {
        assert!(matches!(
            Analyzer::builder().root(".").build(),
            Err(AnalyzerError::NoParser)
        ));

        let analyzer = Analyzer::builder()
            .root(".")
            .parser(EmptyParser)
            .build()
            .expect("Failed to build analyzer");
        assert!(analyzer.root().exists());
        assert_eq!(analyzer.rule_count(), 0);
    }

    #[test]
    fn test_default_excludes() {
        let analyzer = Analyzer::builder()
            .root(".")
            .parser(EmptyParser)
            .build()
            .expect("Failed to build analyzer");

        assert!(analyzer.should_exclude(Path::new("/foo/node_modules/react/index.ts")));
        assert!(analyzer.should_exclude(Path::new("/foo/dist/app.ts")));
        assert!(!analyzer.should_exclude(Path::new("/foo/src/app.ts")));
    }

    #[test]
    fn test_explicit_excludes_replace_defaults() {
        let analyzer = Analyzer::builder()
            .root(".")
            .parser(EmptyParser)
            .exclude("**/generated/**")
            .build()
            .expect("Failed to build analyzer");

        assert!(analyzer.should_exclude(Path::new("/foo/generated/api.ts")));
        assert!(!analyzer.should_exclude(Path::new("/foo/dist/app.ts")));
    }

    #[test]
    fn test_parser_selection() {
        let analyzer = Analyzer::builder()
            .root(".")
            .parser(EmptyParser)
            .build()
            .expect("Failed to build analyzer");

        assert!(analyzer.parser_for(Path::new("a.ts")).is_some());
        assert!(analyzer.parser_for(Path::new("a.js")).is_none());
        assert!(matches!(
            analyzer.analyze_source(Path::new("a.js"), ""),
            Err(AnalyzerError::NoParser)
        ));
    }

    #[test]
    fn test_unparsable_files_are_skipped() {
        let tmp = tempfile::TempDir::new().unwrap();
        std::fs::write(tmp.path().join("good.ts"), "const a = 1;").unwrap();
        std::fs::write(tmp.path().join("bad.ts"), "broken").unwrap();

        let analyzer = Analyzer::builder()
            .root(tmp.path())
            .parser(PickyParser)
            .build()
            .expect("Failed to build analyzer");

        let result = analyzer.analyze().expect("parse failures are not fatal");
        assert_eq!(result.files_checked, 1);
        assert!(result.violations.is_empty());
        assert!(matches!(
            analyzer.analyze_source(&tmp.path().join("bad.ts"), "broken"),
            Err(AnalyzerError::Parse { .. })
        ));
    }
}
