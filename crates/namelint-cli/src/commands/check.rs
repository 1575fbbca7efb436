//! Check command implementation.

use anyhow::{Context, Result};
use namelint_core::naming::NamingConvention;
use namelint_core::Analyzer;
use namelint_ts::TypeScriptParser;
use std::path::Path;

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Runs the check command.
pub fn run(
    path: &Path,
    format: OutputFormat,
    exclude: Vec<String>,
    source: &ConfigSource,
) -> Result<()> {
    let config = source.load()?;
    let rules = config
        .naming_rules()
        .context("Failed to load naming rules")?;
    let threshold = config.fail_threshold();

    let analyzer = Analyzer::builder()
        .root(path)
        .parser(TypeScriptParser::new())
        .parser(TypeScriptParser::tsx())
        .rule(NamingConvention::new(rules))
        .excludes(exclude)
        .config(config)
        .build()
        .context("Failed to build analyzer")?;

    tracing::info!("Analyzing {:?} with {} rules", path, analyzer.rule_count());

    let result = analyzer.analyze().context("Analysis failed")?;

    super::output::print(&result, format, analyzer.root())?;

    if result.has_violations_at(threshold) {
        std::process::exit(1);
    }

    Ok(())
}
