//! Declaration kinds, kind selectors, modifiers and specificity weights.
//!
//! Kinds form a small tree rooted at [`Kind::Default`]:
//!
//! ```text
//! default
//! ├── variable ── function, parameter
//! ├── member ──── property ── enumMember
//! │            └─ method
//! └── type ────── class, interface, typeAlias, genericTypeParameter, enum
//! ```
//!
//! Every child kind owns a higher bit than its parent, so the most specific
//! kind of a [`KindSelector`] is the kind of its highest set bit.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};
use std::str::FromStr;

use super::matcher::RuleError;

/// A single declaration kind, as named by a rule's `type` option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Matches every declaration.
    Default,
    /// Variables, including functions and parameters.
    Variable,
    /// Function declarations.
    Function,
    /// Function and method parameters.
    Parameter,
    /// Class and interface members.
    Member,
    /// Properties, including parameter properties and enum members.
    Property,
    /// Methods.
    Method,
    /// Type declarations.
    Type,
    /// Classes.
    Class,
    /// Interfaces.
    Interface,
    /// Type aliases.
    TypeAlias,
    /// Generic type parameters.
    GenericTypeParameter,
    /// Enums.
    Enum,
    /// Enum members.
    EnumMember,
}

impl Kind {
    /// All kinds, parents before children.
    pub const ALL: [Kind; 14] = [
        Kind::Default,
        Kind::Variable,
        Kind::Function,
        Kind::Parameter,
        Kind::Member,
        Kind::Property,
        Kind::Method,
        Kind::Type,
        Kind::Class,
        Kind::Interface,
        Kind::TypeAlias,
        Kind::GenericTypeParameter,
        Kind::Enum,
        Kind::EnumMember,
    ];

    /// Returns the configuration spelling of this kind.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Variable => "variable",
            Self::Function => "function",
            Self::Parameter => "parameter",
            Self::Member => "member",
            Self::Property => "property",
            Self::Method => "method",
            Self::Type => "type",
            Self::Class => "class",
            Self::Interface => "interface",
            Self::TypeAlias => "typeAlias",
            Self::GenericTypeParameter => "genericTypeParameter",
            Self::Enum => "enum",
            Self::EnumMember => "enumMember",
        }
    }

    /// Returns the parent of this kind in the kind tree.
    #[must_use]
    pub fn parent(self) -> Option<Kind> {
        match self {
            Self::Default => None,
            Self::Variable | Self::Member | Self::Type => Some(Self::Default),
            Self::Function | Self::Parameter => Some(Self::Variable),
            Self::Property | Self::Method => Some(Self::Member),
            Self::Class
            | Self::Interface
            | Self::TypeAlias
            | Self::GenericTypeParameter
            | Self::Enum => Some(Self::Type),
            Self::EnumMember => Some(Self::Property),
        }
    }

    /// Returns `true` if `self` is `other` or one of its descendants.
    #[must_use]
    pub fn is_within(self, other: Kind) -> bool {
        let mut current = Some(self);
        while let Some(kind) = current {
            if kind == other {
                return true;
            }
            current = kind.parent();
        }
        false
    }

    /// The selector bits a rule naming this kind matches against.
    #[must_use]
    pub fn mask(self) -> KindSelector {
        match self {
            Self::Default => KindSelector::ALL,
            other => KindSelector(other.bit()),
        }
    }

    fn bit(self) -> u16 {
        match self {
            Self::Default => 0,
            Self::Variable => 1,
            Self::Function => 1 << 1,
            Self::Parameter => 1 << 2,
            Self::Member => 1 << 3,
            Self::Property => 1 << 4,
            Self::Method => 1 << 5,
            Self::Type => 1 << 6,
            Self::Class => 1 << 7,
            Self::Interface => 1 << 8,
            Self::TypeAlias => 1 << 9,
            Self::GenericTypeParameter => 1 << 10,
            Self::Enum => 1 << 11,
            Self::EnumMember => 1 << 12,
        }
    }

    /// Rank used as the most significant part of a rule's specificity.
    ///
    /// Strictly increases along every parent → child edge.
    fn rank(self) -> u32 {
        match self {
            Self::Default => 1,
            Self::Variable => 2,
            Self::Function => 3,
            Self::Parameter => 4,
            Self::Member => 5,
            Self::Property | Self::Method => 6,
            Self::Type => 7,
            Self::Class
            | Self::Interface
            | Self::TypeAlias
            | Self::GenericTypeParameter
            | Self::Enum => 8,
            Self::EnumMember => 9,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Kind {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.name() == s)
            .ok_or_else(|| RuleError::UnknownKind {
                name: s.to_string(),
            })
    }
}

/// The set of kinds a declaration belongs to.
///
/// Declarations carry composite selectors (a function is also a variable);
/// rules match a selector by bitwise intersection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KindSelector(u16);

impl KindSelector {
    /// Every kind bit.
    pub const ALL: Self = Self(0x1fff);
    /// Plain variables.
    pub const VARIABLE: Self = Self(1);
    /// `variable | function`.
    pub const FUNCTION: Self = Self(Self::VARIABLE.0 | 1 << 1);
    /// `variable | parameter`.
    pub const PARAMETER: Self = Self(Self::VARIABLE.0 | 1 << 2);
    /// `member | property`.
    pub const PROPERTY: Self = Self(1 << 3 | 1 << 4);
    /// `parameter | property`.
    pub const PARAMETER_PROPERTY: Self = Self(Self::PARAMETER.0 | Self::PROPERTY.0);
    /// `member | method`.
    pub const METHOD: Self = Self(1 << 3 | 1 << 5);
    /// `type | class`.
    pub const CLASS: Self = Self(1 << 6 | 1 << 7);
    /// `type | interface`.
    pub const INTERFACE: Self = Self(1 << 6 | 1 << 8);
    /// `type | typeAlias`.
    pub const TYPE_ALIAS: Self = Self(1 << 6 | 1 << 9);
    /// `type | genericTypeParameter`.
    pub const GENERIC_TYPE_PARAMETER: Self = Self(1 << 6 | 1 << 10);
    /// `type | enum`.
    pub const ENUM: Self = Self(1 << 6 | 1 << 11);
    /// `property | enumMember`.
    pub const ENUM_MEMBER: Self = Self(Self::PROPERTY.0 | 1 << 12);

    const NAMED: [(Self, &'static str); 12] = [
        (Self::VARIABLE, "variable"),
        (Self::FUNCTION, "function"),
        (Self::PARAMETER, "parameter"),
        (Self::PROPERTY, "property"),
        (Self::PARAMETER_PROPERTY, "parameterProperty"),
        (Self::METHOD, "method"),
        (Self::CLASS, "class"),
        (Self::INTERFACE, "interface"),
        (Self::TYPE_ALIAS, "typeAlias"),
        (Self::GENERIC_TYPE_PARAMETER, "genericTypeParameter"),
        (Self::ENUM, "enum"),
        (Self::ENUM_MEMBER, "enumMember"),
    ];

    /// Returns `true` if the two selectors share any kind.
    #[must_use]
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// Returns `true` if every kind of `other` is also in `self`.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns the kind of the highest set bit.
    #[must_use]
    pub fn most_specific(self) -> Option<Kind> {
        Kind::ALL
            .into_iter()
            .rev()
            .find(|k| *k != Kind::Default && self.0 & k.bit() != 0)
    }

    /// Returns the name used to prefix violation messages.
    #[must_use]
    pub fn name(self) -> &'static str {
        Self::NAMED
            .iter()
            .find(|(selector, _)| *selector == self)
            .map_or_else(
                || self.most_specific().map_or("declaration", Kind::name),
                |(_, name)| *name,
            )
    }
}

impl fmt::Display for KindSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single modifier, as named by a rule's `modifiers` option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    /// `const` bindings.
    Const,
    /// `readonly` members; shares the `const` bit.
    Readonly,
    /// `static` members.
    Static,
    /// Public members (explicit or implied).
    Public,
    /// `protected` members.
    Protected,
    /// `private` members.
    Private,
    /// Declared at the top level of a file.
    Global,
    /// Declared inside a scope.
    Local,
    /// `abstract` classes and members.
    Abstract,
    /// Exported declarations.
    Export,
    /// Imported bindings.
    Import,
    /// Bindings whose name differs from their source property.
    Rename,
}

impl Modifier {
    /// All modifiers in specificity order.
    pub const ALL: [Modifier; 12] = [
        Modifier::Const,
        Modifier::Readonly,
        Modifier::Static,
        Modifier::Global,
        Modifier::Local,
        Modifier::Public,
        Modifier::Protected,
        Modifier::Private,
        Modifier::Abstract,
        Modifier::Export,
        Modifier::Import,
        Modifier::Rename,
    ];

    /// Returns the configuration spelling of this modifier.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Const => "const",
            Self::Readonly => "readonly",
            Self::Static => "static",
            Self::Public => "public",
            Self::Protected => "protected",
            Self::Private => "private",
            Self::Global => "global",
            Self::Local => "local",
            Self::Abstract => "abstract",
            Self::Export => "export",
            Self::Import => "import",
            Self::Rename => "rename",
        }
    }

    /// The bit this modifier sets in a [`Modifiers`] mask.
    #[must_use]
    pub fn flag(self) -> Modifiers {
        match self {
            Self::Const | Self::Readonly => Modifiers::CONST,
            Self::Static => Modifiers::STATIC,
            Self::Public => Modifiers::PUBLIC,
            Self::Protected => Modifiers::PROTECTED,
            Self::Private => Modifiers::PRIVATE,
            Self::Global => Modifiers::GLOBAL,
            Self::Local => Modifiers::LOCAL,
            Self::Abstract => Modifiers::ABSTRACT,
            Self::Export => Modifiers::EXPORT,
            Self::Import => Modifiers::IMPORT,
            Self::Rename => Modifiers::RENAME,
        }
    }

    fn weight(self) -> u32 {
        match self {
            Self::Const | Self::Readonly => 1,
            Self::Static | Self::Global | Self::Local => 1 << 1,
            Self::Public | Self::Protected | Self::Private => 1 << 2,
            Self::Abstract => 1 << 3,
            Self::Export => 1 << 4,
            Self::Import => 1 << 5,
            Self::Rename => 1 << 6,
        }
    }
}

impl FromStr for Modifier {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.name() == s)
            .ok_or_else(|| RuleError::UnknownModifier {
                name: s.to_string(),
            })
    }
}

/// Bitmask of the modifiers a declaration carries or a rule requires.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers(u16);

impl Modifiers {
    /// No modifiers.
    pub const NONE: Self = Self(0);
    /// `const` / `readonly`.
    pub const CONST: Self = Self(1);
    /// `static`.
    pub const STATIC: Self = Self(1 << 1);
    /// `public`.
    pub const PUBLIC: Self = Self(1 << 2);
    /// `protected`.
    pub const PROTECTED: Self = Self(1 << 3);
    /// `private`.
    pub const PRIVATE: Self = Self(1 << 4);
    /// Top-level declaration.
    pub const GLOBAL: Self = Self(1 << 5);
    /// Scoped declaration.
    pub const LOCAL: Self = Self(1 << 6);
    /// `abstract`.
    pub const ABSTRACT: Self = Self(1 << 7);
    /// `export`.
    pub const EXPORT: Self = Self(1 << 8);
    /// Imported binding.
    pub const IMPORT: Self = Self(1 << 9);
    /// Renamed binding.
    pub const RENAME: Self = Self(1 << 10);

    /// Returns `true` if every bit of `other` is set in `self`.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns `true` if no bit is set.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns the bits of `self` that are missing from `other`.
    #[must_use]
    pub const fn difference(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }
}

impl BitOr for Modifiers {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Modifiers {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for modifier in Modifier::ALL {
            if modifier == Modifier::Readonly || !self.contains(modifier.flag()) {
                continue;
            }
            if !first {
                f.write_str("|")?;
            }
            f.write_str(modifier.name())?;
            first = false;
        }
        if first {
            f.write_str("none")?;
        }
        Ok(())
    }
}

/// Ordering weight of a rule; higher wins when contracts are merged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Specificity(u32);

impl Specificity {
    const FILTER: u32 = 1 << 7;
    const KIND_SHIFT: u32 = 8;

    /// Weight of a rule that only names a kind.
    #[must_use]
    pub fn of_kind(kind: Kind) -> Self {
        Self(kind.rank() << Self::KIND_SHIFT)
    }

    /// Adds the weight of a required modifier.
    #[must_use]
    pub fn with_modifier(self, modifier: Modifier) -> Self {
        Self(self.0 | modifier.weight())
    }

    /// Adds the weight of a filter.
    #[must_use]
    pub fn with_filter(self) -> Self {
        Self(self.0 | Self::FILTER)
    }

    /// Returns the raw score.
    #[must_use]
    pub fn value(self) -> u32 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composite_selectors_are_supersets() {
        assert!(KindSelector::FUNCTION.contains(KindSelector::VARIABLE));
        assert!(KindSelector::PARAMETER_PROPERTY.contains(KindSelector::PARAMETER));
        assert!(KindSelector::PARAMETER_PROPERTY.contains(KindSelector::PROPERTY));
        assert!(KindSelector::ENUM_MEMBER.contains(KindSelector::PROPERTY));
        assert!(!KindSelector::METHOD.contains(KindSelector::PROPERTY));
    }

    #[test]
    fn rule_masks_match_by_intersection() {
        assert!(Kind::Variable.mask().intersects(KindSelector::FUNCTION));
        assert!(Kind::Member.mask().intersects(KindSelector::METHOD));
        assert!(!Kind::Function.mask().intersects(KindSelector::VARIABLE));
        assert!(!Kind::Property.mask().intersects(KindSelector::METHOD));
        assert!(Kind::Default.mask().intersects(KindSelector::ENUM_MEMBER));
    }

    #[test]
    fn most_specific_kind_follows_the_tree() {
        assert_eq!(KindSelector::FUNCTION.most_specific(), Some(Kind::Function));
        assert_eq!(
            KindSelector::PARAMETER_PROPERTY.most_specific(),
            Some(Kind::Property)
        );
        assert_eq!(
            KindSelector::ENUM_MEMBER.most_specific(),
            Some(Kind::EnumMember)
        );
        for kind in Kind::ALL.into_iter().skip(1) {
            let parent = kind.parent().unwrap();
            assert!(kind.is_within(parent));
            assert!(kind.rank() > parent.rank(), "{kind} must outrank {parent}");
            if parent != Kind::Default {
                assert!(kind.bit() > parent.bit());
            }
        }
    }

    #[test]
    fn selector_names() {
        assert_eq!(KindSelector::PARAMETER_PROPERTY.name(), "parameterProperty");
        assert_eq!(KindSelector::GENERIC_TYPE_PARAMETER.name(), "genericTypeParameter");
        assert_eq!(KindSelector::ENUM_MEMBER.to_string(), "enumMember");
    }

    #[test]
    fn parses_names() {
        assert_eq!("typeAlias".parse::<Kind>().unwrap(), Kind::TypeAlias);
        assert_eq!(
            "readonly".parse::<Modifier>().unwrap().flag(),
            Modifiers::CONST
        );
        assert!(matches!(
            "klass".parse::<Kind>(),
            Err(RuleError::UnknownKind { .. })
        ));
        assert!(matches!(
            "statik".parse::<Modifier>(),
            Err(RuleError::UnknownModifier { .. })
        ));
    }

    #[test]
    fn kind_outweighs_every_modifier_and_filter() {
        let mut loaded = Specificity::of_kind(Kind::Variable).with_filter();
        for modifier in Modifier::ALL {
            loaded = loaded.with_modifier(modifier);
        }
        assert!(Specificity::of_kind(Kind::Function) > loaded);
    }

    #[test]
    fn modifier_weights_are_ordered() {
        let base = Specificity::of_kind(Kind::Member);
        let weight = |m| base.with_modifier(m);
        assert!(weight(Modifier::Const) < weight(Modifier::Static));
        assert!(weight(Modifier::Static) == weight(Modifier::Local));
        assert!(weight(Modifier::Global) < weight(Modifier::Private));
        assert!(weight(Modifier::Private) < weight(Modifier::Abstract));
        assert!(weight(Modifier::Abstract) < weight(Modifier::Export));
        assert!(weight(Modifier::Export) < weight(Modifier::Import));
        assert!(weight(Modifier::Import) < weight(Modifier::Rename));
        assert!(weight(Modifier::Rename) < base.with_filter());
    }

    #[test]
    fn modifiers_display() {
        let mods = Modifiers::STATIC | Modifiers::PUBLIC | Modifiers::CONST;
        assert_eq!(mods.to_string(), "const|static|public");
        assert_eq!(Modifiers::NONE.to_string(), "none");
    }
}
