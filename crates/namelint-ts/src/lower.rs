//! Lowering of tree-sitter TypeScript syntax into declaration nodes.
//!
//! Only declarations and scopes produce [`Node`]s; every other syntax node is
//! transparent and its children are lowered in its place.

use namelint_core::syntax::{Binding, BindingKind, Ident, ModifierTokens, Node, NodeKind, Span};
use tree_sitter::Node as TsNode;

/// Converts a concrete syntax tree into declaration nodes.
pub(crate) struct Lowerer<'s> {
    src: &'s [u8],
}

impl<'s> Lowerer<'s> {
    pub(crate) fn new(src: &'s [u8]) -> Self {
        Self { src }
    }

    /// Lowers the children of `program`; they sit at scope depth zero.
    pub(crate) fn program(&self, root: TsNode<'_>) -> Vec<Node> {
        let mut out = Vec::new();
        self.children_into(root, &mut out);
        out
    }

    fn children_into(&self, node: TsNode<'_>, out: &mut Vec<Node>) {
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            self.lower_into(child, out);
        }
    }

    fn lowered(&self, node: TsNode<'_>) -> Vec<Node> {
        let mut out = Vec::new();
        self.lower_into(node, &mut out);
        out
    }

    fn lower_into(&self, node: TsNode<'_>, out: &mut Vec<Node>) {
        match node.kind() {
            "export_statement" => {
                let start = out.len();
                match node.child_by_field_name("declaration") {
                    Some(declaration) => self.lower_into(declaration, out),
                    None => self.children_into(node, out),
                }
                mark(&mut out[start..], ModifierTokens::EXPORT);
            }
            "ambient_declaration" => {
                let start = out.len();
                self.children_into(node, out);
                mark(&mut out[start..], ModifierTokens::DECLARE);
            }
            "lexical_declaration" | "variable_declaration" => out.push(self.variables(node)),
            "function_declaration"
            | "generator_function_declaration"
            | "function_signature"
            | "function_expression"
            | "function"
            | "generator_function"
            | "arrow_function" => out.push(self.function(node)),
            "class_declaration" | "abstract_class_declaration" | "class" => {
                out.push(self.class(node));
            }
            "interface_declaration" => out.push(self.type_declaration(node, NodeKind::Interface, "body")),
            "type_alias_declaration" => {
                out.push(self.type_declaration(node, NodeKind::TypeAlias, "value"));
            }
            "enum_declaration" => out.push(self.enumeration(node)),
            "method_definition" | "method_signature" | "abstract_method_signature" => {
                out.push(self.method(node));
            }
            "public_field_definition" | "property_signature" => out.push(self.property(node)),
            "function_type" | "constructor_type" | "call_signature" | "construct_signature" => {
                out.push(self.signature(node));
            }
            "import_statement" => out.push(self.import(node)),
            "catch_clause" => out.push(self.catch_clause(node)),
            "for_in_statement" => out.push(self.for_in(node)),
            "for_statement"
            | "statement_block"
            | "class_static_block"
            | "internal_module"
            | "module"
            | "switch_body" => {
                let mut children = Vec::new();
                self.children_into(node, &mut children);
                out.push(Node::block(children));
            }
            _ => self.children_into(node, out),
        }
    }

    fn variables(&self, node: TsNode<'_>) -> Node {
        let kind = match node.child_by_field_name("kind").map(|k| self.text(k)) {
            Some("const") => BindingKind::Const,
            Some("let") => BindingKind::Let,
            _ => BindingKind::Var,
        };

        let mut bindings = Vec::new();
        let mut children = Vec::new();
        let mut cursor = node.walk();
        for declarator in node.named_children(&mut cursor) {
            if declarator.kind() != "variable_declarator" {
                continue;
            }
            if let Some(name) = declarator.child_by_field_name("name") {
                self.pattern_bindings(name, None, &mut bindings);
            }
            self.rest_into(declarator, &["name"], &mut children);
        }

        Node::new(NodeKind::VariableList(kind))
            .with_bindings(bindings)
            .with_children(children)
    }

    fn function(&self, node: TsNode<'_>) -> Node {
        let mut children = self.parameters(node);
        if let Some(return_type) = node.child_by_field_name("return_type") {
            self.lower_into(return_type, &mut children);
        }
        if let Some(body) = node.child_by_field_name("body") {
            self.body_into(body, &mut children);
        }

        let mut function = Node::new(NodeKind::Function)
            .with_type_parameters(self.type_parameters(node))
            .with_children(children)
            .scope();
        if let Some(name) = node.child_by_field_name("name") {
            function = self.name(function, name);
        }
        function
    }

    fn class(&self, node: TsNode<'_>) -> Node {
        let mut tokens = self.modifier_tokens(node);
        if node.kind() == "abstract_class_declaration" {
            tokens = tokens | ModifierTokens::ABSTRACT;
        }

        let mut children = Vec::new();
        if let Some(body) = node.child_by_field_name("body") {
            self.children_into(body, &mut children);
        }

        let mut class = Node::new(NodeKind::Class)
            .with_modifiers(tokens)
            .with_type_parameters(self.type_parameters(node))
            .with_children(children)
            .scope();
        if let Some(name) = node.child_by_field_name("name") {
            class = self.name(class, name);
        }
        class
    }

    /// Interfaces and type aliases: a name, type parameters and one body field.
    fn type_declaration(&self, node: TsNode<'_>, kind: NodeKind, body_field: &str) -> Node {
        let children = node
            .child_by_field_name(body_field)
            .map(|body| self.lowered(body))
            .unwrap_or_default();

        let mut declaration = Node::new(kind)
            .with_type_parameters(self.type_parameters(node))
            .with_children(children)
            .scope();
        if let Some(name) = node.child_by_field_name("name") {
            declaration = self.name(declaration, name);
        }
        declaration
    }

    fn enumeration(&self, node: TsNode<'_>) -> Node {
        let mut members = Vec::new();
        if let Some(body) = node.child_by_field_name("body") {
            let mut cursor = body.walk();
            for member in body.named_children(&mut cursor) {
                let name = if member.kind() == "enum_assignment" {
                    member.child_by_field_name("name")
                } else {
                    Some(member)
                };
                if let Some(name) = name {
                    members.push(self.name(Node::new(NodeKind::EnumMember), name));
                }
            }
        }

        let mut enumeration = Node::new(NodeKind::Enum)
            .with_modifiers(self.modifier_tokens(node))
            .with_children(members)
            .scope();
        if let Some(name) = node.child_by_field_name("name") {
            enumeration = self.name(enumeration, name);
        }
        enumeration
    }

    fn method(&self, node: TsNode<'_>) -> Node {
        let is_accessor = self.has_token(node, &["get", "set"]);
        let kind = if is_accessor {
            NodeKind::Property
        } else {
            NodeKind::Method
        };

        let mut children = self.parameters(node);
        if let Some(return_type) = node.child_by_field_name("return_type") {
            self.lower_into(return_type, &mut children);
        }
        if let Some(body) = node.child_by_field_name("body") {
            self.body_into(body, &mut children);
        }

        let mut method = Node::new(kind)
            .with_modifiers(self.modifier_tokens(node))
            .with_type_parameters(self.type_parameters(node))
            .with_children(children)
            .scope();
        // Constructors keep their scope and parameters but declare no name.
        if let Some(name) = node.child_by_field_name("name") {
            if self.text(name) != "constructor" {
                method = self.name(method, name);
            }
        }
        method
    }

    fn property(&self, node: TsNode<'_>) -> Node {
        let mut children = Vec::new();
        self.rest_into(node, &["name"], &mut children);

        let mut property = Node::new(NodeKind::Property)
            .with_modifiers(self.modifier_tokens(node))
            .with_children(children);
        if let Some(name) = node.child_by_field_name("name") {
            property = self.name(property, name);
        }
        property
    }

    fn import(&self, node: TsNode<'_>) -> Node {
        let mut bindings = Vec::new();
        let mut cursor = node.walk();
        for clause in node.named_children(&mut cursor) {
            match clause.kind() {
                "import_clause" => self.import_clause(clause, &mut bindings),
                "import_require_clause" => {
                    let mut inner = clause.walk();
                    let alias = clause
                        .named_children(&mut inner)
                        .find(|c| c.kind() == "identifier");
                    if let Some(alias) = alias {
                        bindings.push(Binding::plain(self.ident(alias)));
                    }
                }
                _ => {}
            }
        }
        Node::new(NodeKind::Import).with_bindings(bindings)
    }

    fn import_clause(&self, clause: TsNode<'_>, bindings: &mut Vec<Binding>) {
        let mut cursor = clause.walk();
        for part in clause.named_children(&mut cursor) {
            match part.kind() {
                "identifier" => bindings.push(Binding::plain(self.ident(part))),
                "namespace_import" => {
                    let mut inner = part.walk();
                    let alias = part
                        .named_children(&mut inner)
                        .find(|c| c.kind() == "identifier");
                    if let Some(alias) = alias {
                        bindings.push(Binding::plain(self.ident(alias)));
                    }
                }
                "named_imports" => {
                    let mut inner = part.walk();
                    for specifier in part.named_children(&mut inner) {
                        if specifier.kind() != "import_specifier" {
                            continue;
                        }
                        let Some(imported) = specifier.child_by_field_name("name") else {
                            continue;
                        };
                        let local = specifier.child_by_field_name("alias").unwrap_or(imported);
                        if local.kind() != "identifier" {
                            continue;
                        }
                        bindings.push(Binding::from_property(
                            self.ident(local),
                            self.property_key(imported).unwrap_or_default(),
                        ));
                    }
                }
                _ => {}
            }
        }
    }

    fn catch_clause(&self, node: TsNode<'_>) -> Node {
        let mut children = Vec::new();
        if let Some(parameter) = node.child_by_field_name("parameter") {
            let mut bindings = Vec::new();
            self.pattern_bindings(parameter, None, &mut bindings);
            children.push(Node::new(NodeKind::VariableList(BindingKind::Let)).with_bindings(bindings));
        }
        if let Some(body) = node.child_by_field_name("body") {
            self.children_into(body, &mut children);
        }
        Node::block(children)
    }

    fn for_in(&self, node: TsNode<'_>) -> Node {
        let kind = node.child_by_field_name("kind").map(|k| match self.text(k) {
            "const" => BindingKind::Const,
            "let" => BindingKind::Let,
            _ => BindingKind::Var,
        });

        let mut children = Vec::new();
        if let (Some(kind), Some(left)) = (kind, node.child_by_field_name("left")) {
            let mut bindings = Vec::new();
            self.pattern_bindings(left, None, &mut bindings);
            children.push(Node::new(NodeKind::VariableList(kind)).with_bindings(bindings));
        }
        for field in ["right", "body"] {
            if let Some(part) = node.child_by_field_name(field) {
                self.lower_into(part, &mut children);
            }
        }
        Node::block(children)
    }

    /// Function and constructor types, call and construct signatures.
    ///
    /// They declare no name but scope their parameters and type parameters.
    fn signature(&self, node: TsNode<'_>) -> Node {
        let mut children = self.parameters(node);
        self.rest_into(node, &["type_parameters", "parameters"], &mut children);
        Node::block(children).with_type_parameters(self.type_parameters(node))
    }

    /// Lowers every named child except the given fields.
    ///
    /// Picks up functions nested in type annotations, initializers and
    /// return types.
    fn rest_into(&self, node: TsNode<'_>, skip_fields: &[&str], out: &mut Vec<Node>) {
        let skipped: Vec<TsNode<'_>> = skip_fields
            .iter()
            .filter_map(|field| node.child_by_field_name(*field))
            .collect();
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            if !skipped.contains(&child) {
                self.lower_into(child, out);
            }
        }
    }

    /// Lowers a function body without opening a second scope for it.
    fn body_into(&self, body: TsNode<'_>, out: &mut Vec<Node>) {
        if body.kind() == "statement_block" {
            self.children_into(body, out);
        } else {
            self.lower_into(body, out);
        }
    }

    fn parameters(&self, node: TsNode<'_>) -> Vec<Node> {
        // Arrow functions with a bare parameter: `x => x`.
        if let Some(single) = node.child_by_field_name("parameter") {
            return vec![Node::new(NodeKind::Parameter)
                .with_bindings(vec![Binding::plain(self.ident(single))])];
        }

        let Some(list) = node.child_by_field_name("parameters") else {
            return Vec::new();
        };
        let mut params = Vec::new();
        let mut cursor = list.walk();
        for param in list.named_children(&mut cursor) {
            if matches!(param.kind(), "required_parameter" | "optional_parameter") {
                params.push(self.parameter(param));
            }
        }
        params
    }

    fn parameter(&self, node: TsNode<'_>) -> Node {
        let Some(pattern) = node.child_by_field_name("pattern") else {
            return Node::new(NodeKind::Parameter);
        };
        if pattern.kind() == "this" {
            return Node::new(NodeKind::ThisParameter);
        }

        let mut bindings = Vec::new();
        self.pattern_bindings(pattern, None, &mut bindings);
        let mut children = Vec::new();
        self.rest_into(node, &["pattern"], &mut children);

        Node::new(NodeKind::Parameter)
            .with_modifiers(self.modifier_tokens(node))
            .with_bindings(bindings)
            .with_children(children)
    }

    /// Flattens a binding pattern into the names it introduces.
    fn pattern_bindings(&self, node: TsNode<'_>, property: Option<String>, out: &mut Vec<Binding>) {
        match node.kind() {
            "identifier" => out.push(Binding {
                ident: self.ident(node),
                property,
            }),
            "shorthand_property_identifier_pattern" => {
                let ident = self.ident(node);
                let property = ident.text.clone();
                out.push(Binding::from_property(ident, property));
            }
            "pair_pattern" => {
                if let Some(value) = node.child_by_field_name("value") {
                    let key = node
                        .child_by_field_name("key")
                        .and_then(|key| self.property_key(key));
                    self.pattern_bindings(value, key, out);
                }
            }
            "assignment_pattern" | "object_assignment_pattern" => {
                if let Some(left) = node.child_by_field_name("left") {
                    self.pattern_bindings(left, property, out);
                }
            }
            "object_pattern" | "array_pattern" | "rest_pattern" => {
                let mut cursor = node.walk();
                for child in node.named_children(&mut cursor) {
                    self.pattern_bindings(child, None, out);
                }
            }
            _ => {}
        }
    }

    fn type_parameters(&self, node: TsNode<'_>) -> Vec<Ident> {
        let Some(list) = node.child_by_field_name("type_parameters") else {
            return Vec::new();
        };
        let mut cursor = list.walk();
        list.named_children(&mut cursor)
            .filter(|p| p.kind() == "type_parameter")
            .filter_map(|p| p.child_by_field_name("name"))
            .map(|name| self.ident(name))
            .collect()
    }

    /// Modifier keywords written directly on `node`.
    fn modifier_tokens(&self, node: TsNode<'_>) -> ModifierTokens {
        let mut tokens = ModifierTokens::NONE;
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            let token = match child.kind() {
                "static" => ModifierTokens::STATIC,
                "readonly" => ModifierTokens::READONLY,
                "abstract" => ModifierTokens::ABSTRACT,
                "declare" => ModifierTokens::DECLARE,
                "const" => ModifierTokens::CONST,
                "accessibility_modifier" => match self.text(child) {
                    "private" => ModifierTokens::PRIVATE,
                    "protected" => ModifierTokens::PROTECTED,
                    _ => ModifierTokens::PUBLIC,
                },
                _ => continue,
            };
            tokens = tokens | token;
        }
        tokens
    }

    fn has_token(&self, node: TsNode<'_>, kinds: &[&str]) -> bool {
        let mut cursor = node.walk();
        let found = node
            .children(&mut cursor)
            .any(|child| !child.is_named() && kinds.contains(&child.kind()));
        found
    }

    /// Sets the declared name; quoted and computed names declare nothing.
    fn name(&self, target: Node, name: TsNode<'_>) -> Node {
        match name.kind() {
            "identifier" | "type_identifier" | "property_identifier" => {
                target.named(self.ident(name))
            }
            "private_property_identifier" => {
                let mut ident = self.ident(name);
                if let Some(stripped) = ident.text.strip_prefix('#') {
                    ident.text = stripped.to_string();
                    ident.span.offset += 1;
                    ident.span.column += 1;
                    ident.span.length -= 1;
                }
                target
                    .named(ident)
                    .with_modifiers(ModifierTokens::PRIVATE)
            }
            _ => target,
        }
    }

    /// The property a key refers to, without quotes.
    fn property_key(&self, key: TsNode<'_>) -> Option<String> {
        match key.kind() {
            "property_identifier" | "identifier" | "number" => Some(self.text(key).to_string()),
            "string" => Some(
                self.text(key)
                    .trim_matches(|c| c == '"' || c == '\'')
                    .to_string(),
            ),
            _ => None,
        }
    }

    fn ident(&self, node: TsNode<'_>) -> Ident {
        let start = node.start_position();
        Ident::new(
            self.text(node),
            Span {
                line: start.row + 1,
                column: start.column + 1,
                offset: node.start_byte(),
                length: node.end_byte() - node.start_byte(),
            },
        )
    }

    fn text(&self, node: TsNode<'_>) -> &'s str {
        node.utf8_text(self.src).unwrap_or("")
    }
}

fn mark(nodes: &mut [Node], token: ModifierTokens) {
    for node in nodes {
        node.modifiers = node.modifiers.with(token);
    }
}
