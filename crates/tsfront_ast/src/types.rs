//! Flag types shared by tokens and syntax-tree nodes.

use std::fmt;

bitflags::bitflags! {
    /// Structural flags on syntax-tree nodes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct NodeFlags: u32 {
        const NONE                = 0;
        const LET                 = 1 << 0;
        const CONST               = 1 << 1;
        /// Namespace declared with `namespace` rather than `module`.
        const NAMESPACE           = 1 << 2;
        /// Inner link of a dotted namespace name `a.b.c`.
        const NESTED_NAMESPACE    = 1 << 3;
        /// `declare global { ... }`.
        const GLOBAL_AUGMENTATION = 1 << 4;
        /// Member or call inside an optional chain.
        const OPTIONAL_CHAIN      = 1 << 5;
        /// Node was parsed in strict-mode code.
        const STRICT              = 1 << 6;
        /// Node was parsed inside a `declare` context.
        const AMBIENT             = 1 << 7;
        /// `import type` / `export type`.
        const TYPE_ONLY           = 1 << 8;
        /// `for await (...)`.
        const AWAIT               = 1 << 9;
        const BLOCK_SCOPED = Self::LET.bits() | Self::CONST.bits();
    }
}

bitflags::bitflags! {
    /// Modifier keywords seen on a declaration or member.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ModifierFlags: u32 {
        const NONE      = 0;
        const EXPORT    = 1 << 0;
        const AMBIENT   = 1 << 1;
        const PUBLIC    = 1 << 2;
        const PRIVATE   = 1 << 3;
        const PROTECTED = 1 << 4;
        const STATIC    = 1 << 5;
        const READONLY  = 1 << 6;
        const ACCESSOR  = 1 << 7;
        const ABSTRACT  = 1 << 8;
        const ASYNC     = 1 << 9;
        const DEFAULT   = 1 << 10;
        const CONST     = 1 << 11;
        const OVERRIDE  = 1 << 12;
        const IN        = 1 << 13;
        const OUT       = 1 << 14;
        const ACCESSIBILITY_MODIFIER = Self::PUBLIC.bits() | Self::PRIVATE.bits() | Self::PROTECTED.bits();
        const PARAMETER_PROPERTY_MODIFIER = Self::ACCESSIBILITY_MODIFIER.bits() | Self::READONLY.bits() | Self::OVERRIDE.bits();
        const TYPE_SCRIPT_MODIFIER = Self::AMBIENT.bits()
            | Self::ACCESSIBILITY_MODIFIER.bits()
            | Self::READONLY.bits()
            | Self::ABSTRACT.bits()
            | Self::OVERRIDE.bits()
            | Self::IN.bits()
            | Self::OUT.bits();
        const EXPORT_DEFAULT = Self::EXPORT.bits() | Self::DEFAULT.bits();
    }
}

impl ModifierFlags {
    /// The source spelling of a single modifier flag.
    pub fn keyword(self) -> &'static str {
        match self {
            ModifierFlags::EXPORT => "export",
            ModifierFlags::AMBIENT => "declare",
            ModifierFlags::PUBLIC => "public",
            ModifierFlags::PRIVATE => "private",
            ModifierFlags::PROTECTED => "protected",
            ModifierFlags::STATIC => "static",
            ModifierFlags::READONLY => "readonly",
            ModifierFlags::ACCESSOR => "accessor",
            ModifierFlags::ABSTRACT => "abstract",
            ModifierFlags::ASYNC => "async",
            ModifierFlags::DEFAULT => "default",
            ModifierFlags::CONST => "const",
            ModifierFlags::OVERRIDE => "override",
            ModifierFlags::IN => "in",
            ModifierFlags::OUT => "out",
            _ => "modifier",
        }
    }
}

bitflags::bitflags! {
    /// Flags the scanner attaches to tokens.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TokenFlags: u32 {
        const NONE                 = 0;
        /// A line terminator appears between the previous token and this one.
        const PRECEDING_LINE_BREAK = 1 << 0;
        /// Identifier spelled with `\u` escapes; never a keyword.
        const UNICODE_ESCAPE       = 1 << 1;
        /// String containing a legacy octal escape.
        const OCTAL_ESCAPE         = 1 << 2;
        const CONTAINS_SEPARATOR   = 1 << 3;
        const SCIENTIFIC           = 1 << 4;
        const IMPLICIT_OCTAL       = 1 << 5;
        const HEX_SPECIFIER        = 1 << 6;
        const BINARY_SPECIFIER     = 1 << 7;
        const OCTAL_SPECIFIER      = 1 << 8;
        /// String delimited by `'`.
        const SINGLE_QUOTE         = 1 << 9;
        const UNTERMINATED         = 1 << 10;
        const NUMERIC_LITERAL_FLAGS = Self::SCIENTIFIC.bits()
            | Self::IMPLICIT_OCTAL.bits()
            | Self::HEX_SPECIFIER.bits()
            | Self::BINARY_SPECIFIER.bits()
            | Self::OCTAL_SPECIFIER.bits()
            | Self::CONTAINS_SEPARATOR.bits();
    }
}

/// Declaration keyword of a variable declaration list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariableKind {
    Var,
    Let,
    Const,
}

impl VariableKind {
    pub fn as_str(self) -> &'static str {
        match self {
            VariableKind::Var => "var",
            VariableKind::Let => "let",
            VariableKind::Const => "const",
        }
    }

    pub fn node_flags(self) -> NodeFlags {
        match self {
            VariableKind::Var => NodeFlags::NONE,
            VariableKind::Let => NodeFlags::LET,
            VariableKind::Const => NodeFlags::CONST,
        }
    }
}

impl fmt::Display for VariableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modifier_groups() {
        assert!(ModifierFlags::ACCESSIBILITY_MODIFIER.contains(ModifierFlags::PROTECTED));
        assert!(ModifierFlags::PARAMETER_PROPERTY_MODIFIER.contains(ModifierFlags::READONLY));
        assert!(!ModifierFlags::ACCESSIBILITY_MODIFIER.contains(ModifierFlags::STATIC));
        assert_eq!(ModifierFlags::AMBIENT.keyword(), "declare");
    }

    #[test]
    fn variable_kind_flags() {
        assert_eq!(VariableKind::Const.node_flags(), NodeFlags::CONST);
        assert!(NodeFlags::BLOCK_SCOPED.contains(VariableKind::Let.node_flags()));
        assert_eq!(VariableKind::Var.to_string(), "var");
    }
}
