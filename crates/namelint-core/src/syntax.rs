//! Language-neutral declaration tree consumed by rules.
//!
//! Front ends lower their concrete syntax into [`Node`]s: only declarations,
//! the identifiers they introduce, and the scopes that enclose them survive.

use std::path::PathBuf;

/// A source position of an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
    /// Byte offset from the start of the file.
    pub offset: usize,
    /// Length in bytes.
    pub length: usize,
}

/// An identifier with its position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    /// The identifier as written.
    pub text: String,
    /// Where it was written.
    pub span: Span,
}

impl Ident {
    /// Creates an identifier.
    #[must_use]
    pub fn new(text: impl Into<String>, span: Span) -> Self {
        Self {
            text: text.into(),
            span,
        }
    }
}

/// A name introduced by a binding position (variable, parameter, import).
///
/// Destructuring patterns are flattened: `const { a: b } = o` yields one
/// binding `b` whose `property` is `a`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    /// The local name.
    pub ident: Ident,
    /// The source property or exported name, when the pattern names one.
    pub property: Option<String>,
}

impl Binding {
    /// A plain binding with no source property.
    #[must_use]
    pub fn plain(ident: Ident) -> Self {
        Self {
            ident,
            property: None,
        }
    }

    /// A binding taken from `property` of a destructured value.
    #[must_use]
    pub fn from_property(ident: Ident, property: impl Into<String>) -> Self {
        Self {
            ident,
            property: Some(property.into()),
        }
    }

    /// Returns `true` if the local name differs from the source property.
    #[must_use]
    pub fn is_renamed(&self) -> bool {
        self.property
            .as_deref()
            .is_some_and(|property| property != self.ident.text)
    }
}

/// Keyword used by a variable declaration list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingKind {
    /// `var`
    Var,
    /// `let`
    Let,
    /// `const`
    Const,
}

/// What a [`Node`] declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// A file or any scope that declares nothing itself.
    Block,
    /// `var`/`let`/`const` statement; names are in `bindings`.
    VariableList(BindingKind),
    /// Named function, function expression or arrow function.
    Function,
    /// Class declaration or expression.
    Class,
    /// Interface declaration.
    Interface,
    /// Type alias.
    TypeAlias,
    /// Enum declaration.
    Enum,
    /// Enum member.
    EnumMember,
    /// Function or method parameter; names are in `bindings`.
    Parameter,
    /// The `this` pseudo-parameter.
    ThisParameter,
    /// Class field, accessor or interface property.
    Property,
    /// Class or interface method.
    Method,
    /// Import statement; names are in `bindings`.
    Import,
}

/// Modifier keywords written on a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ModifierTokens(u16);

impl ModifierTokens {
    /// No modifiers.
    pub const NONE: Self = Self(0);
    /// `export`
    pub const EXPORT: Self = Self(1);
    /// `declare`
    pub const DECLARE: Self = Self(1 << 1);
    /// `abstract`
    pub const ABSTRACT: Self = Self(1 << 2);
    /// `static`
    pub const STATIC: Self = Self(1 << 3);
    /// `readonly`
    pub const READONLY: Self = Self(1 << 4);
    /// `public`
    pub const PUBLIC: Self = Self(1 << 5);
    /// `protected`
    pub const PROTECTED: Self = Self(1 << 6);
    /// `private` or a `#private` name.
    pub const PRIVATE: Self = Self(1 << 7);
    /// `const` (on enums).
    pub const CONST: Self = Self(1 << 8);

    /// Returns `true` if every token of `other` is present.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns the union of both token sets.
    #[must_use]
    pub const fn with(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl std::ops::BitOr for ModifierTokens {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.with(rhs)
    }
}

/// One node of the declaration tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// What this node declares.
    pub kind: NodeKind,
    /// Modifier keywords on the declaration.
    pub modifiers: ModifierTokens,
    /// The declared name, if the declaration has one.
    pub name: Option<Ident>,
    /// Names introduced through binding patterns.
    pub bindings: Vec<Binding>,
    /// Generic type parameters of this declaration.
    pub type_parameters: Vec<Ident>,
    /// Nested nodes.
    pub children: Vec<Node>,
    /// Whether this node opens a new scope for its type parameters and children.
    pub scope_boundary: bool,
}

impl Node {
    /// Creates an empty node of `kind`.
    #[must_use]
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            modifiers: ModifierTokens::NONE,
            name: None,
            bindings: Vec::new(),
            type_parameters: Vec::new(),
            children: Vec::new(),
            scope_boundary: false,
        }
    }

    /// Creates a scope block.
    #[must_use]
    pub fn block(children: Vec<Node>) -> Self {
        Self::new(NodeKind::Block).with_children(children).scope()
    }

    /// Sets the declared name.
    #[must_use]
    pub fn named(mut self, ident: Ident) -> Self {
        self.name = Some(ident);
        self
    }

    /// Adds modifier tokens.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: ModifierTokens) -> Self {
        self.modifiers = self.modifiers.with(modifiers);
        self
    }

    /// Sets the bindings.
    #[must_use]
    pub fn with_bindings(mut self, bindings: Vec<Binding>) -> Self {
        self.bindings = bindings;
        self
    }

    /// Sets the generic type parameters.
    #[must_use]
    pub fn with_type_parameters(mut self, params: Vec<Ident>) -> Self {
        self.type_parameters = params;
        self
    }

    /// Sets the children.
    #[must_use]
    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    /// Marks this node as a scope boundary.
    #[must_use]
    pub fn scope(mut self) -> Self {
        self.scope_boundary = true;
        self
    }
}

/// A parsed source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxTree {
    /// The file this tree was parsed from.
    pub path: PathBuf,
    /// Top-level nodes, at scope depth zero.
    pub nodes: Vec<Node>,
}

impl SyntaxTree {
    /// Creates a tree.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, nodes: Vec<Node>) -> Self {
        Self {
            path: path.into(),
            nodes,
        }
    }
}
