//! SyntaxKind enum - the closed tag set for tokens and syntax-tree nodes.
//!
//! Token kinds come first and are grouped so that range checks classify them:
//! trivia, literals, punctuation (binary operators, then assignment
//! operators), identifiers, reserved words, strict-mode reserved words and
//! contextual keywords. Node kinds follow.

/// The kind of a token or syntax-tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u16)]
pub enum SyntaxKind {
    // ========================================================================
    // Tokens
    // ========================================================================
    Unknown = 0,
    EndOfFileToken,

    // Trivia (only produced when the scanner retains comments)
    SingleLineCommentTrivia,
    MultiLineCommentTrivia,

    // Literals
    NumericLiteral,
    BigIntLiteral,
    StringLiteral,
    RegularExpressionLiteral,
    NoSubstitutionTemplateLiteral,
    TemplateHead,
    TemplateMiddle,
    TemplateTail,

    // Punctuation
    OpenBraceToken,
    CloseBraceToken,
    OpenParenToken,
    CloseParenToken,
    OpenBracketToken,
    CloseBracketToken,
    DotToken,
    DotDotDotToken,
    SemicolonToken,
    CommaToken,
    QuestionDotToken,
    AtToken,
    LessThanToken,
    GreaterThanToken,
    LessThanEqualsToken,
    GreaterThanEqualsToken,
    EqualsEqualsToken,
    ExclamationEqualsToken,
    EqualsEqualsEqualsToken,
    ExclamationEqualsEqualsToken,
    EqualsGreaterThanToken,
    PlusToken,
    MinusToken,
    AsteriskToken,
    AsteriskAsteriskToken,
    SlashToken,
    PercentToken,
    PlusPlusToken,
    MinusMinusToken,
    LessThanLessThanToken,
    GreaterThanGreaterThanToken,
    GreaterThanGreaterThanGreaterThanToken,
    AmpersandToken,
    BarToken,
    CaretToken,
    ExclamationToken,
    TildeToken,
    AmpersandAmpersandToken,
    BarBarToken,
    QuestionToken,
    ColonToken,
    QuestionQuestionToken,

    // Assignment operators
    EqualsToken,
    PlusEqualsToken,
    MinusEqualsToken,
    AsteriskEqualsToken,
    AsteriskAsteriskEqualsToken,
    SlashEqualsToken,
    PercentEqualsToken,
    LessThanLessThanEqualsToken,
    GreaterThanGreaterThanEqualsToken,
    GreaterThanGreaterThanGreaterThanEqualsToken,
    AmpersandEqualsToken,
    BarEqualsToken,
    CaretEqualsToken,
    BarBarEqualsToken,
    AmpersandAmpersandEqualsToken,
    QuestionQuestionEqualsToken,

    // Identifiers
    PrivateIdentifier,
    Identifier,

    // Reserved words
    BreakKeyword,
    CaseKeyword,
    CatchKeyword,
    ClassKeyword,
    ConstKeyword,
    ContinueKeyword,
    DebuggerKeyword,
    DefaultKeyword,
    DeleteKeyword,
    DoKeyword,
    ElseKeyword,
    EnumKeyword,
    ExportKeyword,
    ExtendsKeyword,
    FalseKeyword,
    FinallyKeyword,
    ForKeyword,
    FunctionKeyword,
    IfKeyword,
    ImportKeyword,
    InKeyword,
    InstanceOfKeyword,
    NewKeyword,
    NullKeyword,
    ReturnKeyword,
    SuperKeyword,
    SwitchKeyword,
    ThisKeyword,
    ThrowKeyword,
    TrueKeyword,
    TryKeyword,
    TypeOfKeyword,
    VarKeyword,
    VoidKeyword,
    WhileKeyword,
    WithKeyword,

    // Reserved in strict mode
    ImplementsKeyword,
    InterfaceKeyword,
    LetKeyword,
    PackageKeyword,
    PrivateKeyword,
    ProtectedKeyword,
    PublicKeyword,
    StaticKeyword,
    YieldKeyword,

    // Contextual keywords
    AbstractKeyword,
    AccessorKeyword,
    AsKeyword,
    AssertsKeyword,
    AnyKeyword,
    AsyncKeyword,
    AwaitKeyword,
    BooleanKeyword,
    ConstructorKeyword,
    DeclareKeyword,
    GetKeyword,
    InferKeyword,
    IsKeyword,
    KeyOfKeyword,
    ModuleKeyword,
    NamespaceKeyword,
    NeverKeyword,
    ReadonlyKeyword,
    NumberKeyword,
    ObjectKeyword,
    SatisfiesKeyword,
    SetKeyword,
    StringKeyword,
    SymbolKeyword,
    TypeKeyword,
    UndefinedKeyword,
    UniqueKeyword,
    UnknownKeyword,
    FromKeyword,
    GlobalKeyword,
    BigIntKeyword,
    OverrideKeyword,
    OfKeyword,

    // ========================================================================
    // Nodes
    // ========================================================================

    // Names
    QualifiedName,
    ComputedPropertyName,

    // Signature elements
    TypeParameter,
    Parameter,

    // Type members
    PropertySignature,
    MethodSignature,
    CallSignature,
    ConstructSignature,
    IndexSignature,

    // Class members
    PropertyDeclaration,
    MethodDeclaration,
    Constructor,
    GetAccessor,
    SetAccessor,
    ClassStaticBlockDeclaration,
    SemicolonClassElement,

    // Types
    TypePredicate,
    TypeReference,
    FunctionType,
    ConstructorType,
    TypeQuery,
    TypeLiteral,
    ArrayType,
    TupleType,
    OptionalType,
    RestType,
    NonNullType,
    NamedTupleMember,
    UnionType,
    IntersectionType,
    ConditionalType,
    InferType,
    ParenthesizedType,
    ThisType,
    TypeOperator,
    IndexedAccessType,
    MappedType,
    LiteralType,
    TemplateLiteralType,
    TemplateLiteralTypeSpan,

    // Patterns
    ObjectPattern,
    ArrayPattern,
    PatternProperty,
    PatternElement,
    RestElement,

    // Expressions
    ArrayLiteralExpression,
    ObjectLiteralExpression,
    PropertyAccessExpression,
    ElementAccessExpression,
    CallExpression,
    NewExpression,
    TaggedTemplateExpression,
    TypeAssertionExpression,
    ParenthesizedExpression,
    FunctionExpression,
    ArrowFunction,
    DeleteExpression,
    TypeOfExpression,
    VoidExpression,
    AwaitExpression,
    PrefixUnaryExpression,
    PostfixUnaryExpression,
    BinaryExpression,
    AssignmentExpression,
    ConditionalExpression,
    SequenceExpression,
    TemplateExpression,
    YieldExpression,
    SpreadElement,
    ClassExpression,
    OmittedExpression,
    ExpressionWithTypeArguments,
    AsExpression,
    SatisfiesExpression,
    NonNullExpression,
    MetaProperty,

    // Object literal members
    PropertyAssignment,
    ShorthandPropertyAssignment,
    SpreadAssignment,

    // Misc
    TemplateSpan,

    // Statements
    Block,
    EmptyStatement,
    VariableStatement,
    ExpressionStatement,
    IfStatement,
    DoStatement,
    WhileStatement,
    ForStatement,
    ForInStatement,
    ForOfStatement,
    ContinueStatement,
    BreakStatement,
    ReturnStatement,
    WithStatement,
    SwitchStatement,
    LabeledStatement,
    ThrowStatement,
    TryStatement,
    DebuggerStatement,

    // Declarations
    VariableDeclaration,
    VariableDeclarationList,
    FunctionDeclaration,
    ClassDeclaration,
    InterfaceDeclaration,
    TypeAliasDeclaration,
    EnumDeclaration,
    ModuleDeclaration,
    ModuleBlock,
    ImportDeclaration,
    ImportSpecifier,
    ExportDeclaration,
    ExportSpecifier,
    ExportAssignment,

    // Clauses
    CaseClause,
    DefaultClause,
    HeritageClause,
    CatchClause,

    // Enum
    EnumMember,

    // Top level
    CompilationUnit,
}

impl SyntaxKind {
    pub const FIRST_LITERAL_TOKEN: SyntaxKind = SyntaxKind::NumericLiteral;
    pub const LAST_LITERAL_TOKEN: SyntaxKind = SyntaxKind::NoSubstitutionTemplateLiteral;
    pub const FIRST_TEMPLATE_TOKEN: SyntaxKind = SyntaxKind::NoSubstitutionTemplateLiteral;
    pub const LAST_TEMPLATE_TOKEN: SyntaxKind = SyntaxKind::TemplateTail;
    pub const FIRST_PUNCTUATION: SyntaxKind = SyntaxKind::OpenBraceToken;
    pub const LAST_PUNCTUATION: SyntaxKind = SyntaxKind::QuestionQuestionEqualsToken;
    pub const FIRST_ASSIGNMENT: SyntaxKind = SyntaxKind::EqualsToken;
    pub const LAST_ASSIGNMENT: SyntaxKind = SyntaxKind::QuestionQuestionEqualsToken;
    pub const FIRST_COMPOUND_ASSIGNMENT: SyntaxKind = SyntaxKind::PlusEqualsToken;
    pub const FIRST_KEYWORD: SyntaxKind = SyntaxKind::BreakKeyword;
    pub const LAST_KEYWORD: SyntaxKind = SyntaxKind::OfKeyword;
    pub const FIRST_RESERVED_WORD: SyntaxKind = SyntaxKind::BreakKeyword;
    pub const LAST_RESERVED_WORD: SyntaxKind = SyntaxKind::WithKeyword;
    pub const FIRST_FUTURE_RESERVED_WORD: SyntaxKind = SyntaxKind::ImplementsKeyword;
    pub const LAST_FUTURE_RESERVED_WORD: SyntaxKind = SyntaxKind::YieldKeyword;
    pub const FIRST_CONTEXTUAL_KEYWORD: SyntaxKind = SyntaxKind::AbstractKeyword;
    pub const FIRST_TYPE_NODE: SyntaxKind = SyntaxKind::TypePredicate;
    pub const LAST_TYPE_NODE: SyntaxKind = SyntaxKind::TemplateLiteralTypeSpan;
    pub const FIRST_STATEMENT: SyntaxKind = SyntaxKind::Block;
    pub const LAST_STATEMENT: SyntaxKind = SyntaxKind::DebuggerStatement;
    pub const LAST_TOKEN: SyntaxKind = SyntaxKind::OfKeyword;
    pub const FIRST_NODE: SyntaxKind = SyntaxKind::QualifiedName;

    #[inline]
    fn between(self, first: SyntaxKind, last: SyntaxKind) -> bool {
        let v = self as u16;
        v >= first as u16 && v <= last as u16
    }

    /// Whether this kind is a token rather than a node.
    #[inline]
    pub fn is_token(self) -> bool {
        self <= Self::LAST_TOKEN
    }

    #[inline]
    pub fn is_trivia(self) -> bool {
        matches!(self, SyntaxKind::SingleLineCommentTrivia | SyntaxKind::MultiLineCommentTrivia)
    }

    #[inline]
    pub fn is_literal(self) -> bool {
        self.between(Self::FIRST_LITERAL_TOKEN, Self::LAST_LITERAL_TOKEN)
    }

    #[inline]
    pub fn is_template(self) -> bool {
        self.between(Self::FIRST_TEMPLATE_TOKEN, Self::LAST_TEMPLATE_TOKEN)
    }

    #[inline]
    pub fn is_punctuation(self) -> bool {
        self.between(Self::FIRST_PUNCTUATION, Self::LAST_PUNCTUATION)
    }

    /// `=` and every compound assignment operator.
    #[inline]
    pub fn is_assignment_operator(self) -> bool {
        self.between(Self::FIRST_ASSIGNMENT, Self::LAST_ASSIGNMENT)
    }

    #[inline]
    pub fn is_compound_assignment(self) -> bool {
        self.between(Self::FIRST_COMPOUND_ASSIGNMENT, Self::LAST_ASSIGNMENT)
    }

    /// `&&=`, `||=` and `??=`.
    #[inline]
    pub fn is_logical_assignment(self) -> bool {
        matches!(
            self,
            SyntaxKind::BarBarEqualsToken
                | SyntaxKind::AmpersandAmpersandEqualsToken
                | SyntaxKind::QuestionQuestionEqualsToken
        )
    }

    #[inline]
    pub fn is_keyword(self) -> bool {
        self.between(Self::FIRST_KEYWORD, Self::LAST_KEYWORD)
    }

    /// Words that can never be used as identifiers.
    #[inline]
    pub fn is_reserved_word(self) -> bool {
        self.between(Self::FIRST_RESERVED_WORD, Self::LAST_RESERVED_WORD)
    }

    /// Words that are reserved only in strict-mode code.
    #[inline]
    pub fn is_strict_mode_reserved_word(self) -> bool {
        self.between(Self::FIRST_FUTURE_RESERVED_WORD, Self::LAST_FUTURE_RESERVED_WORD)
    }

    #[inline]
    pub fn is_contextual_keyword(self) -> bool {
        self.between(Self::FIRST_CONTEXTUAL_KEYWORD, Self::LAST_KEYWORD)
    }

    /// Plain identifiers and every keyword spelling.
    #[inline]
    pub fn is_identifier_or_keyword(self) -> bool {
        self.between(SyntaxKind::Identifier, Self::LAST_KEYWORD)
    }

    /// Whether this kind is a modifier keyword on declarations or members.
    #[inline]
    pub fn is_modifier_kind(self) -> bool {
        matches!(
            self,
            SyntaxKind::AbstractKeyword
                | SyntaxKind::AccessorKeyword
                | SyntaxKind::AsyncKeyword
                | SyntaxKind::ConstKeyword
                | SyntaxKind::DeclareKeyword
                | SyntaxKind::DefaultKeyword
                | SyntaxKind::ExportKeyword
                | SyntaxKind::InKeyword
                | SyntaxKind::OverrideKeyword
                | SyntaxKind::PrivateKeyword
                | SyntaxKind::ProtectedKeyword
                | SyntaxKind::PublicKeyword
                | SyntaxKind::ReadonlyKeyword
                | SyntaxKind::StaticKeyword
        )
    }

    /// Keywords that denote a predefined type when used in type position.
    #[inline]
    pub fn is_keyword_type(self) -> bool {
        matches!(
            self,
            SyntaxKind::AnyKeyword
                | SyntaxKind::UnknownKeyword
                | SyntaxKind::StringKeyword
                | SyntaxKind::NumberKeyword
                | SyntaxKind::BigIntKeyword
                | SyntaxKind::BooleanKeyword
                | SyntaxKind::SymbolKeyword
                | SyntaxKind::ObjectKeyword
                | SyntaxKind::UndefinedKeyword
                | SyntaxKind::NeverKeyword
                | SyntaxKind::VoidKeyword
                | SyntaxKind::NullKeyword
        )
    }

    #[inline]
    pub fn is_type_node(self) -> bool {
        self.between(Self::FIRST_TYPE_NODE, Self::LAST_TYPE_NODE) || self.is_keyword_type()
    }

    /// Statement and declaration node kinds that may appear in a statement list.
    #[inline]
    pub fn is_statement(self) -> bool {
        self.between(Self::FIRST_STATEMENT, Self::LAST_STATEMENT)
            || matches!(
                self,
                SyntaxKind::FunctionDeclaration
                    | SyntaxKind::ClassDeclaration
                    | SyntaxKind::InterfaceDeclaration
                    | SyntaxKind::TypeAliasDeclaration
                    | SyntaxKind::EnumDeclaration
                    | SyntaxKind::ModuleDeclaration
                    | SyntaxKind::ImportDeclaration
                    | SyntaxKind::ExportDeclaration
                    | SyntaxKind::ExportAssignment
            )
    }

    /// Get the keyword text for a keyword kind, or None if not a keyword.
    pub fn keyword_text(self) -> Option<&'static str> {
        if !self.is_keyword() {
            return None;
        }
        KEYWORDS
            .iter()
            .find(|(_, kind)| *kind == self)
            .map(|(text, _)| *text)
    }

    /// Map an identifier spelling to its keyword kind.
    pub fn from_keyword(text: &str) -> Option<SyntaxKind> {
        // Every keyword is 2..=11 ASCII lowercase letters.
        if text.len() < 2 || text.len() > 11 || !text.as_bytes()[0].is_ascii_lowercase() {
            return None;
        }
        match text {
            "break" => Some(SyntaxKind::BreakKeyword),
            "case" => Some(SyntaxKind::CaseKeyword),
            "catch" => Some(SyntaxKind::CatchKeyword),
            "class" => Some(SyntaxKind::ClassKeyword),
            "const" => Some(SyntaxKind::ConstKeyword),
            "continue" => Some(SyntaxKind::ContinueKeyword),
            "debugger" => Some(SyntaxKind::DebuggerKeyword),
            "default" => Some(SyntaxKind::DefaultKeyword),
            "delete" => Some(SyntaxKind::DeleteKeyword),
            "do" => Some(SyntaxKind::DoKeyword),
            "else" => Some(SyntaxKind::ElseKeyword),
            "enum" => Some(SyntaxKind::EnumKeyword),
            "export" => Some(SyntaxKind::ExportKeyword),
            "extends" => Some(SyntaxKind::ExtendsKeyword),
            "false" => Some(SyntaxKind::FalseKeyword),
            "finally" => Some(SyntaxKind::FinallyKeyword),
            "for" => Some(SyntaxKind::ForKeyword),
            "function" => Some(SyntaxKind::FunctionKeyword),
            "if" => Some(SyntaxKind::IfKeyword),
            "import" => Some(SyntaxKind::ImportKeyword),
            "in" => Some(SyntaxKind::InKeyword),
            "instanceof" => Some(SyntaxKind::InstanceOfKeyword),
            "new" => Some(SyntaxKind::NewKeyword),
            "null" => Some(SyntaxKind::NullKeyword),
            "return" => Some(SyntaxKind::ReturnKeyword),
            "super" => Some(SyntaxKind::SuperKeyword),
            "switch" => Some(SyntaxKind::SwitchKeyword),
            "this" => Some(SyntaxKind::ThisKeyword),
            "throw" => Some(SyntaxKind::ThrowKeyword),
            "true" => Some(SyntaxKind::TrueKeyword),
            "try" => Some(SyntaxKind::TryKeyword),
            "typeof" => Some(SyntaxKind::TypeOfKeyword),
            "var" => Some(SyntaxKind::VarKeyword),
            "void" => Some(SyntaxKind::VoidKeyword),
            "while" => Some(SyntaxKind::WhileKeyword),
            "with" => Some(SyntaxKind::WithKeyword),
            "implements" => Some(SyntaxKind::ImplementsKeyword),
            "interface" => Some(SyntaxKind::InterfaceKeyword),
            "let" => Some(SyntaxKind::LetKeyword),
            "package" => Some(SyntaxKind::PackageKeyword),
            "private" => Some(SyntaxKind::PrivateKeyword),
            "protected" => Some(SyntaxKind::ProtectedKeyword),
            "public" => Some(SyntaxKind::PublicKeyword),
            "static" => Some(SyntaxKind::StaticKeyword),
            "yield" => Some(SyntaxKind::YieldKeyword),
            "abstract" => Some(SyntaxKind::AbstractKeyword),
            "accessor" => Some(SyntaxKind::AccessorKeyword),
            "as" => Some(SyntaxKind::AsKeyword),
            "asserts" => Some(SyntaxKind::AssertsKeyword),
            "any" => Some(SyntaxKind::AnyKeyword),
            "async" => Some(SyntaxKind::AsyncKeyword),
            "await" => Some(SyntaxKind::AwaitKeyword),
            "boolean" => Some(SyntaxKind::BooleanKeyword),
            "constructor" => Some(SyntaxKind::ConstructorKeyword),
            "declare" => Some(SyntaxKind::DeclareKeyword),
            "get" => Some(SyntaxKind::GetKeyword),
            "infer" => Some(SyntaxKind::InferKeyword),
            "is" => Some(SyntaxKind::IsKeyword),
            "keyof" => Some(SyntaxKind::KeyOfKeyword),
            "module" => Some(SyntaxKind::ModuleKeyword),
            "namespace" => Some(SyntaxKind::NamespaceKeyword),
            "never" => Some(SyntaxKind::NeverKeyword),
            "readonly" => Some(SyntaxKind::ReadonlyKeyword),
            "number" => Some(SyntaxKind::NumberKeyword),
            "object" => Some(SyntaxKind::ObjectKeyword),
            "satisfies" => Some(SyntaxKind::SatisfiesKeyword),
            "set" => Some(SyntaxKind::SetKeyword),
            "string" => Some(SyntaxKind::StringKeyword),
            "symbol" => Some(SyntaxKind::SymbolKeyword),
            "type" => Some(SyntaxKind::TypeKeyword),
            "undefined" => Some(SyntaxKind::UndefinedKeyword),
            "unique" => Some(SyntaxKind::UniqueKeyword),
            "unknown" => Some(SyntaxKind::UnknownKeyword),
            "from" => Some(SyntaxKind::FromKeyword),
            "global" => Some(SyntaxKind::GlobalKeyword),
            "bigint" => Some(SyntaxKind::BigIntKeyword),
            "override" => Some(SyntaxKind::OverrideKeyword),
            "of" => Some(SyntaxKind::OfKeyword),
            _ => None,
        }
    }

    /// Get the punctuation text for a punctuation kind, or None.
    pub fn punctuation_text(self) -> Option<&'static str> {
        let text = match self {
            SyntaxKind::OpenBraceToken => "{",
            SyntaxKind::CloseBraceToken => "}",
            SyntaxKind::OpenParenToken => "(",
            SyntaxKind::CloseParenToken => ")",
            SyntaxKind::OpenBracketToken => "[",
            SyntaxKind::CloseBracketToken => "]",
            SyntaxKind::DotToken => ".",
            SyntaxKind::DotDotDotToken => "...",
            SyntaxKind::SemicolonToken => ";",
            SyntaxKind::CommaToken => ",",
            SyntaxKind::QuestionDotToken => "?.",
            SyntaxKind::AtToken => "@",
            SyntaxKind::LessThanToken => "<",
            SyntaxKind::GreaterThanToken => ">",
            SyntaxKind::LessThanEqualsToken => "<=",
            SyntaxKind::GreaterThanEqualsToken => ">=",
            SyntaxKind::EqualsEqualsToken => "==",
            SyntaxKind::ExclamationEqualsToken => "!=",
            SyntaxKind::EqualsEqualsEqualsToken => "===",
            SyntaxKind::ExclamationEqualsEqualsToken => "!==",
            SyntaxKind::EqualsGreaterThanToken => "=>",
            SyntaxKind::PlusToken => "+",
            SyntaxKind::MinusToken => "-",
            SyntaxKind::AsteriskToken => "*",
            SyntaxKind::AsteriskAsteriskToken => "**",
            SyntaxKind::SlashToken => "/",
            SyntaxKind::PercentToken => "%",
            SyntaxKind::PlusPlusToken => "++",
            SyntaxKind::MinusMinusToken => "--",
            SyntaxKind::LessThanLessThanToken => "<<",
            SyntaxKind::GreaterThanGreaterThanToken => ">>",
            SyntaxKind::GreaterThanGreaterThanGreaterThanToken => ">>>",
            SyntaxKind::AmpersandToken => "&",
            SyntaxKind::BarToken => "|",
            SyntaxKind::CaretToken => "^",
            SyntaxKind::ExclamationToken => "!",
            SyntaxKind::TildeToken => "~",
            SyntaxKind::AmpersandAmpersandToken => "&&",
            SyntaxKind::BarBarToken => "||",
            SyntaxKind::QuestionToken => "?",
            SyntaxKind::ColonToken => ":",
            SyntaxKind::QuestionQuestionToken => "??",
            SyntaxKind::EqualsToken => "=",
            SyntaxKind::PlusEqualsToken => "+=",
            SyntaxKind::MinusEqualsToken => "-=",
            SyntaxKind::AsteriskEqualsToken => "*=",
            SyntaxKind::AsteriskAsteriskEqualsToken => "**=",
            SyntaxKind::SlashEqualsToken => "/=",
            SyntaxKind::PercentEqualsToken => "%=",
            SyntaxKind::LessThanLessThanEqualsToken => "<<=",
            SyntaxKind::GreaterThanGreaterThanEqualsToken => ">>=",
            SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken => ">>>=",
            SyntaxKind::AmpersandEqualsToken => "&=",
            SyntaxKind::BarEqualsToken => "|=",
            SyntaxKind::CaretEqualsToken => "^=",
            SyntaxKind::BarBarEqualsToken => "||=",
            SyntaxKind::AmpersandAmpersandEqualsToken => "&&=",
            SyntaxKind::QuestionQuestionEqualsToken => "??=",
            _ => return None,
        };
        Some(text)
    }

    /// Human-readable spelling used in diagnostics: the exact text for
    /// punctuation and keywords, a category name otherwise.
    pub fn describe(self) -> &'static str {
        if let Some(text) = self.punctuation_text().or_else(|| self.keyword_text()) {
            return text;
        }
        match self {
            SyntaxKind::EndOfFileToken => "end of file",
            SyntaxKind::Identifier => "identifier",
            SyntaxKind::PrivateIdentifier => "private identifier",
            SyntaxKind::NumericLiteral => "numeric literal",
            SyntaxKind::BigIntLiteral => "bigint literal",
            SyntaxKind::StringLiteral => "string literal",
            SyntaxKind::RegularExpressionLiteral => "regular expression",
            SyntaxKind::NoSubstitutionTemplateLiteral | SyntaxKind::TemplateHead => "template literal",
            SyntaxKind::TemplateMiddle | SyntaxKind::TemplateTail => "template continuation",
            SyntaxKind::SingleLineCommentTrivia | SyntaxKind::MultiLineCommentTrivia => "comment",
            _ => "token",
        }
    }
}

/// Keyword spellings in declaration order.
pub const KEYWORDS: &[(&str, SyntaxKind)] = &[
    ("break", SyntaxKind::BreakKeyword),
    ("case", SyntaxKind::CaseKeyword),
    ("catch", SyntaxKind::CatchKeyword),
    ("class", SyntaxKind::ClassKeyword),
    ("const", SyntaxKind::ConstKeyword),
    ("continue", SyntaxKind::ContinueKeyword),
    ("debugger", SyntaxKind::DebuggerKeyword),
    ("default", SyntaxKind::DefaultKeyword),
    ("delete", SyntaxKind::DeleteKeyword),
    ("do", SyntaxKind::DoKeyword),
    ("else", SyntaxKind::ElseKeyword),
    ("enum", SyntaxKind::EnumKeyword),
    ("export", SyntaxKind::ExportKeyword),
    ("extends", SyntaxKind::ExtendsKeyword),
    ("false", SyntaxKind::FalseKeyword),
    ("finally", SyntaxKind::FinallyKeyword),
    ("for", SyntaxKind::ForKeyword),
    ("function", SyntaxKind::FunctionKeyword),
    ("if", SyntaxKind::IfKeyword),
    ("import", SyntaxKind::ImportKeyword),
    ("in", SyntaxKind::InKeyword),
    ("instanceof", SyntaxKind::InstanceOfKeyword),
    ("new", SyntaxKind::NewKeyword),
    ("null", SyntaxKind::NullKeyword),
    ("return", SyntaxKind::ReturnKeyword),
    ("super", SyntaxKind::SuperKeyword),
    ("switch", SyntaxKind::SwitchKeyword),
    ("this", SyntaxKind::ThisKeyword),
    ("throw", SyntaxKind::ThrowKeyword),
    ("true", SyntaxKind::TrueKeyword),
    ("try", SyntaxKind::TryKeyword),
    ("typeof", SyntaxKind::TypeOfKeyword),
    ("var", SyntaxKind::VarKeyword),
    ("void", SyntaxKind::VoidKeyword),
    ("while", SyntaxKind::WhileKeyword),
    ("with", SyntaxKind::WithKeyword),
    ("implements", SyntaxKind::ImplementsKeyword),
    ("interface", SyntaxKind::InterfaceKeyword),
    ("let", SyntaxKind::LetKeyword),
    ("package", SyntaxKind::PackageKeyword),
    ("private", SyntaxKind::PrivateKeyword),
    ("protected", SyntaxKind::ProtectedKeyword),
    ("public", SyntaxKind::PublicKeyword),
    ("static", SyntaxKind::StaticKeyword),
    ("yield", SyntaxKind::YieldKeyword),
    ("abstract", SyntaxKind::AbstractKeyword),
    ("accessor", SyntaxKind::AccessorKeyword),
    ("as", SyntaxKind::AsKeyword),
    ("asserts", SyntaxKind::AssertsKeyword),
    ("any", SyntaxKind::AnyKeyword),
    ("async", SyntaxKind::AsyncKeyword),
    ("await", SyntaxKind::AwaitKeyword),
    ("boolean", SyntaxKind::BooleanKeyword),
    ("constructor", SyntaxKind::ConstructorKeyword),
    ("declare", SyntaxKind::DeclareKeyword),
    ("get", SyntaxKind::GetKeyword),
    ("infer", SyntaxKind::InferKeyword),
    ("is", SyntaxKind::IsKeyword),
    ("keyof", SyntaxKind::KeyOfKeyword),
    ("module", SyntaxKind::ModuleKeyword),
    ("namespace", SyntaxKind::NamespaceKeyword),
    ("never", SyntaxKind::NeverKeyword),
    ("readonly", SyntaxKind::ReadonlyKeyword),
    ("number", SyntaxKind::NumberKeyword),
    ("object", SyntaxKind::ObjectKeyword),
    ("satisfies", SyntaxKind::SatisfiesKeyword),
    ("set", SyntaxKind::SetKeyword),
    ("string", SyntaxKind::StringKeyword),
    ("symbol", SyntaxKind::SymbolKeyword),
    ("type", SyntaxKind::TypeKeyword),
    ("undefined", SyntaxKind::UndefinedKeyword),
    ("unique", SyntaxKind::UniqueKeyword),
    ("unknown", SyntaxKind::UnknownKeyword),
    ("from", SyntaxKind::FromKeyword),
    ("global", SyntaxKind::GlobalKeyword),
    ("bigint", SyntaxKind::BigIntKeyword),
    ("override", SyntaxKind::OverrideKeyword),
    ("of", SyntaxKind::OfKeyword),
];

impl std::fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_table_round_trips() {
        for &(text, kind) in KEYWORDS {
            assert_eq!(SyntaxKind::from_keyword(text), Some(kind), "{text}");
            assert_eq!(kind.keyword_text(), Some(text));
        }
        let count = SyntaxKind::LAST_KEYWORD as u16 - SyntaxKind::FIRST_KEYWORD as u16 + 1;
        assert_eq!(KEYWORDS.len(), count as usize);
    }

    #[test]
    fn non_keywords_stay_identifiers() {
        assert_eq!(SyntaxKind::from_keyword("foo"), None);
        assert_eq!(SyntaxKind::from_keyword("Break"), None);
        assert_eq!(SyntaxKind::from_keyword("x"), None);
        assert_eq!(SyntaxKind::from_keyword("target"), None);
    }

    #[test]
    fn keyword_classes() {
        assert!(SyntaxKind::WithKeyword.is_reserved_word());
        assert!(!SyntaxKind::LetKeyword.is_reserved_word());
        assert!(SyntaxKind::LetKeyword.is_strict_mode_reserved_word());
        assert!(SyntaxKind::YieldKeyword.is_strict_mode_reserved_word());
        assert!(SyntaxKind::AsyncKeyword.is_contextual_keyword());
        assert!(SyntaxKind::OfKeyword.is_contextual_keyword());
        assert!(SyntaxKind::Identifier.is_identifier_or_keyword());
        assert!(!SyntaxKind::PrivateIdentifier.is_identifier_or_keyword());
    }

    #[test]
    fn operator_classes() {
        assert!(SyntaxKind::EqualsToken.is_assignment_operator());
        assert!(!SyntaxKind::EqualsToken.is_compound_assignment());
        assert!(SyntaxKind::QuestionQuestionEqualsToken.is_compound_assignment());
        assert!(SyntaxKind::BarBarEqualsToken.is_logical_assignment());
        assert!(!SyntaxKind::EqualsEqualsToken.is_assignment_operator());
        assert!(SyntaxKind::QuestionQuestionEqualsToken.is_punctuation());
        assert!(!SyntaxKind::Identifier.is_punctuation());
    }

    #[test]
    fn node_classes() {
        assert!(SyntaxKind::StringLiteral.is_literal());
        assert!(SyntaxKind::NoSubstitutionTemplateLiteral.is_template());
        assert!(!SyntaxKind::TemplateHead.is_literal());
        assert!(SyntaxKind::MultiLineCommentTrivia.is_trivia());
        assert!(SyntaxKind::UnionType.is_type_node());
        assert!(SyntaxKind::StringKeyword.is_type_node());
        assert!(!SyntaxKind::IfStatement.is_type_node());
        assert!(SyntaxKind::IfStatement.is_statement());
        assert!(SyntaxKind::FunctionDeclaration.is_statement());
        assert!(!SyntaxKind::Identifier.is_statement());
    }

    #[test]
    fn describe_uses_spelling() {
        assert_eq!(SyntaxKind::EqualsGreaterThanToken.describe(), "=>");
        assert_eq!(SyntaxKind::InterfaceKeyword.describe(), "interface");
        assert_eq!(SyntaxKind::EndOfFileToken.describe(), "end of file");
        assert!(SyntaxKind::Identifier.is_token());
        assert!(!SyntaxKind::Block.is_token());
    }
}
