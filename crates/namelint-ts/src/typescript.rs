//! TypeScript and TSX front end using Tree-sitter.

use std::path::Path;

use namelint_core::{ParseError, SourceParser, SyntaxTree};
use tree_sitter::{Language, Parser};
use tracing::debug;

use crate::lower::Lowerer;

/// Parses TypeScript (or TSX) source into a [`SyntaxTree`].
pub struct TypeScriptParser {
    language: Language,
    language_id: &'static str,
    extensions: &'static [&'static str],
}

impl TypeScriptParser {
    /// Creates a parser for `.ts`, `.mts` and `.cts` files.
    #[must_use]
    pub fn new() -> Self {
        Self {
            language: tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            language_id: "typescript",
            extensions: &["ts", "mts", "cts"],
        }
    }

    /// Creates a parser for `.tsx` files.
    #[must_use]
    pub fn tsx() -> Self {
        Self {
            language: tree_sitter_typescript::LANGUAGE_TSX.into(),
            language_id: "tsx",
            extensions: &["tsx"],
        }
    }
}

impl Default for TypeScriptParser {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceParser for TypeScriptParser {
    fn language_id(&self) -> &'static str {
        self.language_id
    }

    fn extensions(&self) -> &'static [&'static str] {
        self.extensions
    }

    fn parse(&self, path: &Path, source: &str) -> Result<SyntaxTree, ParseError> {
        let mut parser = Parser::new();
        parser
            .set_language(&self.language)
            .map_err(|e| ParseError::Language {
                language: self.language_id,
                message: e.to_string(),
            })?;

        let src = source.as_bytes();
        let tree = parser.parse(src, None).ok_or(ParseError::NoTree)?;
        let root = tree.root_node();
        if root.has_error() {
            // Tree-sitter recovers; declarations outside the broken region still lower.
            debug!("{} has syntax errors", path.display());
        }

        Ok(SyntaxTree::new(path, Lowerer::new(src).program(root)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use namelint_core::syntax::{BindingKind, ModifierTokens, Node, NodeKind};

    fn parse(src: &str) -> Vec<Node> {
        TypeScriptParser::new()
            .parse(Path::new("a.ts"), src)
            .expect("typescript should parse")
            .nodes
    }

    /// Every declared name in pre-order, with the node that declares it.
    fn names(nodes: &[Node]) -> Vec<(String, NodeKind)> {
        let mut out = Vec::new();
        for node in nodes {
            if let Some(name) = &node.name {
                out.push((name.text.clone(), node.kind));
            }
            for binding in &node.bindings {
                out.push((binding.ident.text.clone(), node.kind));
            }
            out.extend(names(&node.children));
        }
        out
    }

    fn find<'a>(nodes: &'a [Node], text: &str) -> Option<&'a Node> {
        nodes.iter().find_map(|node| {
            let declares = node.name.as_ref().is_some_and(|n| n.text == text)
                || node.bindings.iter().any(|b| b.ident.text == text);
            if declares {
                Some(node)
            } else {
                find(&node.children, text)
            }
        })
    }

    #[test]
    fn lowers_variable_lists() {
        let nodes = parse("const a = 1, b = 2;\nlet c;\nvar d;\n");
        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes[0].kind, NodeKind::VariableList(BindingKind::Const));
        assert_eq!(nodes[0].bindings.len(), 2);
        assert_eq!(nodes[1].kind, NodeKind::VariableList(BindingKind::Let));
        assert_eq!(nodes[2].kind, NodeKind::VariableList(BindingKind::Var));
    }

    #[test]
    fn identifier_spans_are_one_indexed() {
        let nodes = parse("\nconst value = 1;\n");
        let span = nodes[0].bindings[0].ident.span;
        assert_eq!((span.line, span.column), (2, 7));
        assert_eq!(span.offset, 7);
        assert_eq!(span.length, 5);
    }

    #[test]
    fn export_and_declare_mark_declarations() {
        let nodes = parse("export const a = 1;\ndeclare const b: number;\n");
        assert!(nodes[0].modifiers.contains(ModifierTokens::EXPORT));
        assert!(nodes[1].modifiers.contains(ModifierTokens::DECLARE));
    }

    #[test]
    fn destructuring_records_source_property() {
        let nodes = parse("const { a, b: renamed, ...rest } = obj;\n");
        let bindings = &nodes[0].bindings;
        assert_eq!(bindings.len(), 3);
        assert!(!bindings[0].is_renamed());
        assert_eq!(bindings[1].ident.text, "renamed");
        assert!(bindings[1].is_renamed());
        assert!(!bindings[2].is_renamed());
    }

    #[test]
    fn functions_open_scopes_with_parameters() {
        let nodes = parse("function run<T>(input: T, this_arg = 1) { let local = input; }\n");
        let function = &nodes[0];
        assert_eq!(function.kind, NodeKind::Function);
        assert!(function.scope_boundary);
        assert_eq!(function.type_parameters[0].text, "T");
        assert_eq!(
            names(&function.children),
            vec![
                ("input".to_string(), NodeKind::Parameter),
                ("this_arg".to_string(), NodeKind::Parameter),
                ("local".to_string(), NodeKind::VariableList(BindingKind::Let)),
            ]
        );
    }

    #[test]
    fn this_parameter_declares_nothing() {
        let nodes = parse("function f(this: Window, e: Event) {}\n");
        assert_eq!(nodes[0].children[0].kind, NodeKind::ThisParameter);
        assert_eq!(nodes[0].children[1].bindings[0].ident.text, "e");
    }

    #[test]
    fn class_members_carry_modifiers() {
        let nodes = parse(
            "export abstract class Store {\n\
             \x20 private static readonly MAX = 1;\n\
             \x20 #secret = 2;\n\
             \x20 protected abstract load(): void;\n\
             \x20 get size() { return 0; }\n\
             \x20 constructor(public readonly name: string) {}\n\
             }\n",
        );
        let class = &nodes[0];
        assert_eq!(class.kind, NodeKind::Class);
        assert!(class
            .modifiers
            .contains(ModifierTokens::EXPORT | ModifierTokens::ABSTRACT));

        let max = find(&nodes, "MAX").expect("MAX declared");
        assert_eq!(max.kind, NodeKind::Property);
        assert!(max.modifiers.contains(
            ModifierTokens::PRIVATE | ModifierTokens::STATIC | ModifierTokens::READONLY
        ));

        let secret = find(&nodes, "secret").expect("#secret declared without #");
        assert!(secret.modifiers.contains(ModifierTokens::PRIVATE));
        assert_eq!(secret.name.as_ref().map(|n| n.span.column), Some(4));

        let load = find(&nodes, "load").expect("load declared");
        assert_eq!(load.kind, NodeKind::Method);
        assert!(load
            .modifiers
            .contains(ModifierTokens::PROTECTED | ModifierTokens::ABSTRACT));

        assert_eq!(find(&nodes, "size").map(|n| n.kind), Some(NodeKind::Property));
        assert!(find(&nodes, "constructor").is_none());

        let name = find(&nodes, "name").expect("parameter property declared");
        assert_eq!(name.kind, NodeKind::Parameter);
        assert!(name
            .modifiers
            .contains(ModifierTokens::PUBLIC | ModifierTokens::READONLY));
    }

    #[test]
    fn interfaces_types_and_enums() {
        let nodes = parse(
            "interface Props<TItem> { item_count: number; render(): void }\n\
             type Pair<A> = { first: A };\n\
             const enum Color { Red, DarkBlue = 2 }\n",
        );
        assert_eq!(
            names(&nodes),
            vec![
                ("Props".to_string(), NodeKind::Interface),
                ("item_count".to_string(), NodeKind::Property),
                ("render".to_string(), NodeKind::Method),
                ("Pair".to_string(), NodeKind::TypeAlias),
                ("first".to_string(), NodeKind::Property),
                ("Color".to_string(), NodeKind::Enum),
                ("Red".to_string(), NodeKind::EnumMember),
                ("DarkBlue".to_string(), NodeKind::EnumMember),
            ]
        );
        assert_eq!(nodes[0].type_parameters[0].text, "TItem");
        assert!(nodes[2].modifiers.contains(ModifierTokens::CONST));
    }

    #[test]
    fn imports_record_renames() {
        let nodes = parse(
            "import React from 'react';\n\
             import * as path from 'path';\n\
             import { readFile, writeFile as write } from 'fs';\n",
        );
        assert_eq!(nodes.len(), 3);
        assert!(nodes.iter().all(|n| n.kind == NodeKind::Import));
        assert_eq!(nodes[0].bindings[0].ident.text, "React");
        assert_eq!(nodes[1].bindings[0].ident.text, "path");

        let named = &nodes[2].bindings;
        assert_eq!(named.len(), 2);
        assert!(!named[0].is_renamed());
        assert_eq!(named[1].ident.text, "write");
        assert_eq!(named[1].property.as_deref(), Some("writeFile"));
    }

    #[test]
    fn blocks_and_loops_are_scopes() {
        let nodes = parse(
            "for (const item of items) { const inner = item; }\n\
             try { run(); } catch (err) {}\n",
        );
        assert!(nodes.iter().all(|n| n.scope_boundary));
        let item = find(&nodes, "item").expect("loop variable declared");
        assert_eq!(item.kind, NodeKind::VariableList(BindingKind::Const));
        let err = find(&nodes, "err").expect("catch variable declared");
        assert_eq!(err.kind, NodeKind::VariableList(BindingKind::Let));
    }

    #[test]
    fn nested_functions_in_expressions_are_found() {
        let nodes = parse("const handler = (event) => { const Inner = 1; };\n");
        let arrow = &nodes[0].children[0];
        assert_eq!(arrow.kind, NodeKind::Function);
        assert!(arrow.name.is_none());
        assert!(find(&nodes, "event").is_some());
        assert!(find(&nodes, "Inner").is_some());
    }

    #[test]
    fn signatures_and_annotations_declare_parameters() {
        let nodes = parse(
            "type Cb = <TErr>(err: TErr) => void;\n\
             interface Factory { (name: string): void; new (size: number): Factory }\n\
             const run: (done: () => void) => void = (callback) => callback();\n",
        );
        let params: Vec<String> = names(&nodes)
            .into_iter()
            .filter(|(_, kind)| *kind == NodeKind::Parameter)
            .map(|(name, _)| name)
            .collect();
        assert_eq!(params, vec!["err", "name", "size", "done", "callback"]);

        let signature = &nodes[0].children[0];
        assert_eq!(signature.kind, NodeKind::Block);
        assert!(signature.scope_boundary);
        assert_eq!(signature.type_parameters[0].text, "TErr");
    }

    #[test]
    fn quoted_names_are_skipped() {
        let nodes = parse("interface Headers { 'content-type': string; ok: boolean }\n");
        assert_eq!(
            names(&nodes),
            vec![
                ("Headers".to_string(), NodeKind::Interface),
                ("ok".to_string(), NodeKind::Property),
            ]
        );
    }

    #[test]
    fn tsx_parser_handles_jsx() {
        let parser = TypeScriptParser::tsx();
        assert!(parser.handles(Path::new("App.tsx")));
        assert!(!parser.handles(Path::new("App.ts")));

        let tree = parser
            .parse(
                Path::new("App.tsx"),
                "export function App() { const Title = <h1>hi</h1>; return Title; }\n",
            )
            .expect("tsx should parse");
        assert!(find(&tree.nodes, "App").is_some());
        assert!(find(&tree.nodes, "Title").is_some());
    }

    #[test]
    fn empty_source() {
        assert!(parse("").is_empty());
    }
}
