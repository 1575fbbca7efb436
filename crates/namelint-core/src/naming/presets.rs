//! Built-in rule presets.

use super::config_dto::RawRule;

/// Names accepted by the `preset` config key.
pub const PRESETS: [&str; 2] = ["recommended", "none"];

/// Returns the rules of the named preset.
#[must_use]
pub fn preset(name: &str) -> Option<Vec<RawRule>> {
    match name {
        "recommended" => Some(recommended()),
        "none" => Some(Vec::new()),
        _ => None,
    }
}

/// Conventional TypeScript naming.
///
/// camelCase by default, PascalCase types, and module-level constants or
/// enum members may be UPPER_CASE. One leading or trailing underscore is
/// tolerated everywhere.
#[must_use]
pub fn recommended() -> Vec<RawRule> {
    vec![
        RawRule::new("default")
            .format(&["camelCase"])
            .leading_underscore("allow")
            .trailing_underscore("allow"),
        RawRule::new("variable")
            .modifiers(&["global", "const"])
            .format(&["camelCase", "UPPER_CASE"]),
        RawRule::new("variable")
            .modifiers(&["import"])
            .format(&["camelCase", "PascalCase"]),
        RawRule::new("function").format(&["camelCase", "PascalCase"]),
        RawRule::new("property")
            .modifiers(&["static", "readonly"])
            .format(&["camelCase", "UPPER_CASE"]),
        RawRule::new("type").format(&["PascalCase"]),
        RawRule::new("enumMember").format(&["PascalCase", "UPPER_CASE"]),
    ]
}
