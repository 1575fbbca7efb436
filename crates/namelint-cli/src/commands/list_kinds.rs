//! List kinds command implementation.

use std::fmt::Write;

use namelint_core::naming::{CaseFormat, Kind, Modifier, UnderscorePolicy, PRESETS};

/// Runs the list-kinds command.
pub fn run() {
    print!("{}", render());
}

fn render() -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = write_tables(&mut out);
    out
}

fn write_tables(out: &mut String) -> std::fmt::Result {
    writeln!(out, "Declaration kinds (`type`):\n")?;
    writeln!(out, "{:<22} {:<10} Also covers", "Kind", "Parent")?;
    writeln!(out, "{}", "-".repeat(72))?;
    for kind in Kind::ALL {
        writeln!(
            out,
            "{:<22} {:<10} {}",
            kind.name(),
            kind.parent().map_or("-", Kind::name),
            covered(kind)
        )?;
    }

    writeln!(out, "\nModifiers (`modifiers`):")?;
    writeln!(out, "  {}", join(Modifier::ALL.map(Modifier::name)))?;

    writeln!(out, "\nFormats (`format`):")?;
    writeln!(out, "  {}", join(CaseFormat::ALL.map(CaseFormat::name)))?;

    writeln!(out, "\nUnderscore policies (`leadingUnderscore`, `trailingUnderscore`):")?;
    writeln!(out, "  {}", join(UnderscorePolicy::ALL.map(UnderscorePolicy::name)))?;

    writeln!(out, "\nPresets (`preset`):")?;
    writeln!(out, "  {}", PRESETS.join(", "))?;

    writeln!(out, "\nA rule on a kind also covers its descendants unless `final = true`.")
}

/// Descendants a non-final rule on `kind` also applies to.
fn covered(kind: Kind) -> String {
    if kind == Kind::Default {
        return "every kind".to_string();
    }
    let names: Vec<&str> = Kind::ALL
        .into_iter()
        .filter(|other| *other != kind && other.is_within(kind))
        .map(Kind::name)
        .collect();
    if names.is_empty() {
        "-".to_string()
    } else {
        names.join(", ")
    }
}

fn join<const N: usize>(names: [&str; N]) -> String {
    names.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_rows_list_descendants() {
        assert_eq!(covered(Kind::Default), "every kind");
        assert_eq!(covered(Kind::Variable), "function, parameter");
        assert_eq!(covered(Kind::Member), "property, method, enumMember");
        assert_eq!(covered(Kind::Property), "enumMember");
        assert_eq!(covered(Kind::Class), "-");
    }

    #[test]
    fn render_covers_every_section() {
        let text = render();
        let row = text
            .lines()
            .find(|line| line.starts_with("type "))
            .expect("type row");
        assert!(row.contains("class, interface, typeAlias, genericTypeParameter, enum"));
        for heading in ["Modifiers", "Formats", "Underscore policies", "Presets"] {
            assert!(text.contains(heading), "{heading}");
        }
        assert!(text.contains("recommended"));
    }
}
