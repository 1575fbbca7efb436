//! Maps declaration nodes to kind selectors and modifier masks.

use crate::syntax::{BindingKind, Ident, ModifierTokens, Node, NodeKind};

use super::category::{Kind, KindSelector, Modifiers};

/// One declared name with its classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Declaration<'a> {
    /// The declared identifier.
    pub ident: &'a Ident,
    /// Kinds the declaration belongs to.
    pub selector: KindSelector,
    /// Modifiers the declaration carries.
    pub modifiers: Modifiers,
}

/// Classifies every name `node` itself declares at scope `depth`.
///
/// Children and type parameters are not included.
#[must_use]
pub fn declarations(node: &Node, depth: usize) -> Vec<Declaration<'_>> {
    let tokens = node.modifiers;
    match node.kind {
        NodeKind::Block | NodeKind::ThisParameter => Vec::new(),
        // Ambient variables describe names owned by other code.
        NodeKind::VariableList(_) if tokens.contains(ModifierTokens::DECLARE) => Vec::new(),
        NodeKind::VariableList(binding_kind) => {
            let mut base = scope(depth) | exported(tokens);
            if binding_kind == BindingKind::Const {
                base |= Modifiers::CONST;
            }
            node.bindings
                .iter()
                .map(|binding| Declaration {
                    ident: &binding.ident,
                    selector: KindSelector::VARIABLE,
                    modifiers: base | renamed(binding.is_renamed()),
                })
                .collect()
        }
        NodeKind::Import => node
            .bindings
            .iter()
            .map(|binding| Declaration {
                ident: &binding.ident,
                selector: KindSelector::VARIABLE,
                modifiers: Modifiers::IMPORT | scope(depth) | renamed(binding.is_renamed()),
            })
            .collect(),
        NodeKind::Parameter if is_parameter_property(tokens) => {
            let modifiers = member_modifiers(tokens);
            node.bindings
                .iter()
                .map(|binding| Declaration {
                    ident: &binding.ident,
                    selector: KindSelector::PARAMETER_PROPERTY,
                    modifiers,
                })
                .collect()
        }
        NodeKind::Parameter => node
            .bindings
            .iter()
            .map(|binding| Declaration {
                ident: &binding.ident,
                selector: KindSelector::PARAMETER,
                modifiers: scope(depth) | renamed(binding.is_renamed()),
            })
            .collect(),
        NodeKind::EnumMember => named(
            node,
            KindSelector::ENUM_MEMBER,
            Modifiers::STATIC | Modifiers::PUBLIC | Modifiers::CONST,
        ),
        NodeKind::Property => named(node, KindSelector::PROPERTY, member_modifiers(tokens)),
        NodeKind::Method => named(node, KindSelector::METHOD, member_modifiers(tokens)),
        NodeKind::Function => named(
            node,
            KindSelector::FUNCTION,
            scope(depth) | exported(tokens),
        ),
        NodeKind::Class => {
            let mut modifiers = scope(depth) | exported(tokens);
            if tokens.contains(ModifierTokens::ABSTRACT) {
                modifiers |= Modifiers::ABSTRACT;
            }
            named(node, KindSelector::CLASS, modifiers)
        }
        NodeKind::Interface => named(
            node,
            KindSelector::INTERFACE,
            scope(depth) | exported(tokens),
        ),
        NodeKind::TypeAlias => named(
            node,
            KindSelector::TYPE_ALIAS,
            scope(depth) | exported(tokens),
        ),
        NodeKind::Enum => {
            let mut modifiers = scope(depth) | exported(tokens);
            if tokens.contains(ModifierTokens::CONST) {
                modifiers |= Modifiers::CONST;
            }
            named(node, KindSelector::ENUM, modifiers)
        }
    }
}

/// Classifies a generic type parameter declared at `depth`.
#[must_use]
pub fn type_parameter(ident: &Ident, depth: usize) -> Declaration<'_> {
    Declaration {
        ident,
        selector: KindSelector::GENERIC_TYPE_PARAMETER,
        modifiers: scope(depth),
    }
}

/// Returns `true` if the selector denotes a class or interface member.
#[must_use]
pub fn is_member(selector: KindSelector) -> bool {
    selector.intersects(Kind::Member.mask())
}

fn named(node: &Node, selector: KindSelector, modifiers: Modifiers) -> Vec<Declaration<'_>> {
    node.name
        .iter()
        .map(|ident| Declaration {
            ident,
            selector,
            modifiers,
        })
        .collect()
}

fn is_parameter_property(tokens: ModifierTokens) -> bool {
    [
        ModifierTokens::PUBLIC,
        ModifierTokens::PROTECTED,
        ModifierTokens::PRIVATE,
        ModifierTokens::READONLY,
    ]
    .into_iter()
    .any(|token| tokens.contains(token))
}

fn member_modifiers(tokens: ModifierTokens) -> Modifiers {
    let mut modifiers = if tokens.contains(ModifierTokens::PRIVATE) {
        Modifiers::PRIVATE
    } else if tokens.contains(ModifierTokens::PROTECTED) {
        Modifiers::PROTECTED
    } else {
        Modifiers::PUBLIC
    };
    for (token, modifier) in [
        (ModifierTokens::READONLY, Modifiers::CONST),
        (ModifierTokens::STATIC, Modifiers::STATIC),
        (ModifierTokens::ABSTRACT, Modifiers::ABSTRACT),
    ] {
        if tokens.contains(token) {
            modifiers |= modifier;
        }
    }
    modifiers
}

fn scope(depth: usize) -> Modifiers {
    if depth == 0 {
        Modifiers::GLOBAL
    } else {
        Modifiers::LOCAL
    }
}

fn exported(tokens: ModifierTokens) -> Modifiers {
    if tokens.contains(ModifierTokens::EXPORT) {
        Modifiers::EXPORT
    } else {
        Modifiers::NONE
    }
}

fn renamed(is_renamed: bool) -> Modifiers {
    if is_renamed {
        Modifiers::RENAME
    } else {
        Modifiers::NONE
    }
}
