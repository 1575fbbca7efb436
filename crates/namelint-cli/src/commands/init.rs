//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# namelint configuration
# Run `namelint list-kinds` for the kinds, modifiers and formats below.

# Rules placed before [[naming]]: "recommended" or "none".
# Defaults to "recommended" when no [[naming]] rule is given.
preset = "recommended"

# Lowest severity that makes `namelint check` exit with status 1.
fail_on = "error"

[analyzer]
# Root directory to analyze (default: current directory)
# root = "./src"

# Glob patterns to exclude from analysis
exclude = [
    "**/node_modules/**",
    "**/dist/**",
]

[rules.naming-convention]
enabled = true
# severity = "warning"  # Override default severity

# Each [[naming]] rule applies to declarations of `type` carrying all of its
# `modifiers`. More specific rules override broader ones field by field.

# [[naming]]
# type = "variable"
# modifiers = ["global", "const"]
# format = ["camelCase", "UPPER_CASE"]

# [[naming]]
# type = "interface"
# prefix = "I"
# format = "PascalCase"

# [[naming]]
# type = "member"
# modifiers = "private"
# leadingUnderscore = "require"

# [[naming]]
# type = "property"
# filter = "^HTTP_"
# format = "UPPER_CASE"
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    let config_path = Path::new("namelint.toml");

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, DEFAULT_CONFIG)?;

    println!("Created namelint.toml");
    println!("\nNext steps:");
    println!("  1. Add [[naming]] rules to namelint.toml");
    println!("  2. Run: namelint check");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use namelint_core::Config;

    #[test]
    fn template_is_a_valid_config() {
        let config = Config::parse(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.preset.as_deref(), Some("recommended"));
        assert!(config.naming.is_empty());
        assert!(config.is_rule_enabled("naming-convention"));
        assert!(!config.naming_rules().unwrap().is_empty());
    }
}
