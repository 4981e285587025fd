//! Syntax-tree node definitions.
//!
//! Nodes are arena-allocated and immutable once built. Each category
//! (statements, expressions, types, patterns, members) is a closed enum whose
//! variants carry their payload inline; children are referenced through `&'a`
//! arena references and lists are arena slices. Every node starts with a
//! [`NodeData`] carrying its kind tag and source range.

use crate::syntax_kind::SyntaxKind;
use crate::types::*;
use tsfront_core::intern::{InternedString, StringInterner};
use tsfront_core::source::SourceId;
use tsfront_core::text::{LineMap, TextRange};
use tsfront_diagnostics::Diagnostic;

// ============================================================================
// Core Node Wrapper
// ============================================================================

/// Common data shared by all nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeData {
    pub kind: SyntaxKind,
    pub range: TextRange,
    pub flags: NodeFlags,
    pub modifier_flags: ModifierFlags,
}

impl NodeData {
    pub fn new(kind: SyntaxKind, pos: u32, end: u32) -> Self {
        Self::with_range(kind, TextRange::new(pos, end))
    }

    pub fn with_range(kind: SyntaxKind, range: TextRange) -> Self {
        Self {
            kind,
            range,
            flags: NodeFlags::NONE,
            modifier_flags: ModifierFlags::NONE,
        }
    }

    pub fn with_flags(mut self, flags: NodeFlags) -> Self {
        self.flags |= flags;
        self
    }

    pub fn with_modifiers(mut self, modifiers: ModifierFlags) -> Self {
        self.modifier_flags |= modifiers;
        self
    }

    #[inline]
    pub fn pos(&self) -> u32 {
        self.range.pos
    }

    #[inline]
    pub fn end(&self) -> u32 {
        self.range.end
    }
}

/// A list of nodes, allocated in the arena.
pub type NodeList<'a, T> = &'a [T];

/// An optional arena-allocated node.
pub type OptionalNode<'a, T> = Option<&'a T>;

// ============================================================================
// Compilation Unit
// ============================================================================

/// Root of a parsed source unit.
#[derive(Debug)]
pub struct CompilationUnit<'a> {
    pub data: NodeData,
    pub statements: NodeList<'a, Statement<'a>>,
    pub source: SourceId,
    pub file_name: String,
    pub line_map: LineMap,
    /// Whether the unit is strict-mode code, either by module goal or by a
    /// `"use strict"` directive prologue.
    pub strict: bool,
    pub module: bool,
    /// Non-fatal diagnostics reported by the scanner and parser.
    pub diagnostics: Vec<Diagnostic>,
    pub interner: StringInterner,
}

impl CompilationUnit<'_> {
    pub fn resolve(&self, symbol: InternedString) -> &str {
        self.interner.resolve(symbol)
    }
}

// ============================================================================
// Identifier & Literals
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub struct Identifier<'a> {
    /// `Identifier` or `PrivateIdentifier`.
    pub data: NodeData,
    /// Decoded name (escapes resolved, `#` included for private names).
    pub name: &'a str,
    pub symbol: InternedString,
    /// Keyword kind when a keyword spelling is used as a name.
    pub original_keyword_kind: Option<SyntaxKind>,
}

impl<'a> Identifier<'a> {
    #[inline]
    pub fn text(&self) -> &'a str {
        self.name
    }

    #[inline]
    pub fn is_private(&self) -> bool {
        self.data.kind == SyntaxKind::PrivateIdentifier
    }
}

#[derive(Debug, Clone, Copy)]
pub struct StringLiteral<'a> {
    pub data: NodeData,
    /// Cooked value.
    pub value: &'a str,
    pub single_quote: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct NumericLiteral<'a> {
    pub data: NodeData,
    pub value: f64,
    pub raw: &'a str,
    pub numeric_literal_flags: TokenFlags,
}

#[derive(Debug, Clone, Copy)]
pub struct BigIntLiteral<'a> {
    pub data: NodeData,
    /// Digits with separators and the `n` suffix removed, prefix kept.
    pub digits: &'a str,
}

#[derive(Debug, Clone, Copy)]
pub struct RegularExpressionLiteral<'a> {
    pub data: NodeData,
    pub pattern: &'a str,
    pub flags: &'a str,
}

/// One literal piece of a template: the whole no-substitution template, the
/// head, a middle or the tail.
#[derive(Debug, Clone, Copy)]
pub struct TemplatePiece<'a> {
    pub data: NodeData,
    pub cooked: &'a str,
    pub raw: &'a str,
}

#[derive(Debug)]
pub struct TemplateExpression<'a> {
    pub data: NodeData,
    pub head: TemplatePiece<'a>,
    pub template_spans: NodeList<'a, TemplateSpan<'a>>,
}

#[derive(Debug)]
pub struct TemplateSpan<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
    pub literal: TemplatePiece<'a>,
}

// ============================================================================
// Names
// ============================================================================

#[derive(Debug)]
pub enum EntityName<'a> {
    Identifier(Identifier<'a>),
    QualifiedName(&'a QualifiedName<'a>),
}

#[derive(Debug)]
pub struct QualifiedName<'a> {
    pub data: NodeData,
    pub left: EntityName<'a>,
    pub right: Identifier<'a>,
}

#[derive(Debug, Clone, Copy)]
pub struct ComputedPropertyName<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
}

#[derive(Debug, Clone, Copy)]
pub enum PropertyName<'a> {
    Identifier(Identifier<'a>),
    PrivateIdentifier(Identifier<'a>),
    StringLiteral(StringLiteral<'a>),
    NumericLiteral(NumericLiteral<'a>),
    ComputedPropertyName(ComputedPropertyName<'a>),
}

impl<'a> PropertyName<'a> {
    /// The statically known key text, if the name is not computed.
    pub fn static_text(&self) -> Option<&'a str> {
        match self {
            PropertyName::Identifier(id) | PropertyName::PrivateIdentifier(id) => Some(id.name),
            PropertyName::StringLiteral(lit) => Some(lit.value),
            PropertyName::NumericLiteral(lit) => Some(lit.raw),
            PropertyName::ComputedPropertyName(_) => None,
        }
    }
}

// ============================================================================
// Type Nodes
// ============================================================================

#[derive(Debug)]
pub enum TypeNode<'a> {
    /// `any`, `string`, `void`, `null`, ... (kind is the keyword).
    KeywordType(NodeData),
    ThisType(NodeData),
    TypeReference(TypeReferenceNode<'a>),
    /// Function and constructor types.
    FunctionType(FunctionTypeNode<'a>),
    TypeQuery(TypeQueryNode<'a>),
    TypeLiteral(TypeLiteralNode<'a>),
    ArrayType(ArrayTypeNode<'a>),
    TupleType(TupleTypeNode<'a>),
    OptionalType(WrappedTypeNode<'a>),
    RestType(WrappedTypeNode<'a>),
    /// `T!`
    NonNullType(WrappedTypeNode<'a>),
    NamedTupleMember(NamedTupleMemberNode<'a>),
    UnionType(UnionOrIntersectionTypeNode<'a>),
    IntersectionType(UnionOrIntersectionTypeNode<'a>),
    ConditionalType(ConditionalTypeNode<'a>),
    InferType(InferTypeNode<'a>),
    ParenthesizedType(WrappedTypeNode<'a>),
    TypeOperator(TypeOperatorNode<'a>),
    IndexedAccessType(IndexedAccessTypeNode<'a>),
    MappedType(MappedTypeNode<'a>),
    LiteralType(LiteralTypeNode<'a>),
    TemplateLiteralType(TemplateLiteralTypeNode<'a>),
    TypePredicate(TypePredicateNode<'a>),
}

#[derive(Debug)]
pub struct TypeReferenceNode<'a> {
    pub data: NodeData,
    pub type_name: EntityName<'a>,
    pub type_arguments: Option<NodeList<'a, TypeNode<'a>>>,
}

#[derive(Debug)]
pub struct FunctionTypeNode<'a> {
    /// `FunctionType` or `ConstructorType`; `abstract new` sets the
    /// ABSTRACT modifier.
    pub data: NodeData,
    pub type_parameters: Option<NodeList<'a, TypeParameter<'a>>>,
    pub parameters: NodeList<'a, Parameter<'a>>,
    pub return_type: &'a TypeNode<'a>,
}

#[derive(Debug)]
pub struct TypeQueryNode<'a> {
    pub data: NodeData,
    pub expr_name: EntityName<'a>,
    pub type_arguments: Option<NodeList<'a, TypeNode<'a>>>,
}

#[derive(Debug)]
pub struct TypeLiteralNode<'a> {
    pub data: NodeData,
    pub members: NodeList<'a, TypeElement<'a>>,
}

#[derive(Debug)]
pub struct ArrayTypeNode<'a> {
    pub data: NodeData,
    pub element_type: &'a TypeNode<'a>,
}

#[derive(Debug)]
pub struct TupleTypeNode<'a> {
    pub data: NodeData,
    pub elements: NodeList<'a, TypeNode<'a>>,
}

/// Optional (`T?`), rest (`...T`), non-null (`T!`) and parenthesized types.
#[derive(Debug)]
pub struct WrappedTypeNode<'a> {
    pub data: NodeData,
    pub type_node: &'a TypeNode<'a>,
}

#[derive(Debug)]
pub struct NamedTupleMemberNode<'a> {
    pub data: NodeData,
    pub rest: bool,
    pub name: Identifier<'a>,
    pub optional: bool,
    pub type_node: &'a TypeNode<'a>,
}

#[derive(Debug)]
pub struct UnionOrIntersectionTypeNode<'a> {
    pub data: NodeData,
    pub types: NodeList<'a, TypeNode<'a>>,
}

#[derive(Debug)]
pub struct ConditionalTypeNode<'a> {
    pub data: NodeData,
    pub check_type: &'a TypeNode<'a>,
    pub extends_type: &'a TypeNode<'a>,
    pub true_type: &'a TypeNode<'a>,
    pub false_type: &'a TypeNode<'a>,
}

#[derive(Debug)]
pub struct InferTypeNode<'a> {
    pub data: NodeData,
    pub type_parameter: TypeParameter<'a>,
}

#[derive(Debug)]
pub struct TypeOperatorNode<'a> {
    pub data: NodeData,
    /// `KeyOfKeyword`, `UniqueKeyword` or `ReadonlyKeyword`.
    pub operator: SyntaxKind,
    pub type_node: &'a TypeNode<'a>,
}

#[derive(Debug)]
pub struct IndexedAccessTypeNode<'a> {
    pub data: NodeData,
    pub object_type: &'a TypeNode<'a>,
    pub index_type: &'a TypeNode<'a>,
}

#[derive(Debug)]
pub struct MappedTypeNode<'a> {
    pub data: NodeData,
    /// `ReadonlyKeyword`, `PlusToken` or `MinusToken` (the latter two
    /// mean `+readonly` / `-readonly`).
    pub readonly_token: Option<SyntaxKind>,
    pub type_parameter: TypeParameter<'a>,
    pub name_type: OptionalNode<'a, TypeNode<'a>>,
    /// `QuestionToken`, `PlusToken` or `MinusToken`.
    pub question_token: Option<SyntaxKind>,
    pub type_node: OptionalNode<'a, TypeNode<'a>>,
}

#[derive(Debug)]
pub struct LiteralTypeNode<'a> {
    pub data: NodeData,
    pub literal: &'a Expression<'a>,
}

#[derive(Debug)]
pub struct TemplateLiteralTypeNode<'a> {
    pub data: NodeData,
    pub head: TemplatePiece<'a>,
    pub template_spans: NodeList<'a, TemplateLiteralTypeSpan<'a>>,
}

#[derive(Debug)]
pub struct TemplateLiteralTypeSpan<'a> {
    pub data: NodeData,
    pub type_node: &'a TypeNode<'a>,
    pub literal: TemplatePiece<'a>,
}

#[derive(Debug)]
pub struct TypePredicateNode<'a> {
    pub data: NodeData,
    pub asserts: bool,
    pub parameter_name: TypePredicateParameterName<'a>,
    pub type_node: OptionalNode<'a, TypeNode<'a>>,
}

#[derive(Debug)]
pub enum TypePredicateParameterName<'a> {
    Identifier(Identifier<'a>),
    ThisType(NodeData),
}

// ============================================================================
// Signatures
// ============================================================================

#[derive(Debug)]
pub struct TypeParameter<'a> {
    /// Modifier flags carry `const`, `in` and `out`.
    pub data: NodeData,
    pub name: Identifier<'a>,
    pub constraint: OptionalNode<'a, TypeNode<'a>>,
    pub default: OptionalNode<'a, TypeNode<'a>>,
}

#[derive(Debug)]
pub struct Parameter<'a> {
    /// Modifier flags are set on constructor parameter properties.
    pub data: NodeData,
    pub rest: bool,
    pub name: Pattern<'a>,
    pub optional: bool,
    pub type_annotation: OptionalNode<'a, TypeNode<'a>>,
    pub initializer: OptionalNode<'a, Expression<'a>>,
}

/// Call and construct signatures in object types and interfaces.
#[derive(Debug)]
pub struct SignatureDeclaration<'a> {
    pub data: NodeData,
    pub type_parameters: Option<NodeList<'a, TypeParameter<'a>>>,
    pub parameters: NodeList<'a, Parameter<'a>>,
    pub return_type: OptionalNode<'a, TypeNode<'a>>,
}

#[derive(Debug)]
pub struct IndexSignature<'a> {
    pub data: NodeData,
    pub parameter: Parameter<'a>,
    pub type_annotation: &'a TypeNode<'a>,
}

// ============================================================================
// Type Elements (interface and object type members)
// ============================================================================

#[derive(Debug)]
pub enum TypeElement<'a> {
    PropertySignature(PropertySignature<'a>),
    MethodSignature(MethodSignature<'a>),
    CallSignature(SignatureDeclaration<'a>),
    ConstructSignature(SignatureDeclaration<'a>),
    IndexSignature(IndexSignature<'a>),
}

#[derive(Debug)]
pub struct PropertySignature<'a> {
    pub data: NodeData,
    pub name: PropertyName<'a>,
    pub optional: bool,
    pub type_annotation: OptionalNode<'a, TypeNode<'a>>,
}

#[derive(Debug)]
pub struct MethodSignature<'a> {
    pub data: NodeData,
    pub name: PropertyName<'a>,
    pub optional: bool,
    pub type_parameters: Option<NodeList<'a, TypeParameter<'a>>>,
    pub parameters: NodeList<'a, Parameter<'a>>,
    pub return_type: OptionalNode<'a, TypeNode<'a>>,
}

// ============================================================================
// Patterns
// ============================================================================

/// A binding or assignment target. Patterns are derived from expressions or
/// parsed directly in declaration position.
#[derive(Debug, Clone, Copy)]
pub enum Pattern<'a> {
    Identifier(Identifier<'a>),
    Object(ObjectPattern<'a>),
    Array(ArrayPattern<'a>),
    /// Member or element access; only valid as an assignment target.
    Expression(&'a Expression<'a>),
}

#[derive(Debug, Clone, Copy)]
pub struct ObjectPattern<'a> {
    pub data: NodeData,
    pub properties: NodeList<'a, PatternProperty<'a>>,
    pub rest: OptionalNode<'a, RestElement<'a>>,
}

#[derive(Debug, Clone, Copy)]
pub struct PatternProperty<'a> {
    pub data: NodeData,
    pub key: PropertyName<'a>,
    pub value: Pattern<'a>,
    pub initializer: OptionalNode<'a, Expression<'a>>,
    pub shorthand: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct ArrayPattern<'a> {
    pub data: NodeData,
    /// `None` marks an elision.
    pub elements: NodeList<'a, Option<PatternElement<'a>>>,
    pub rest: OptionalNode<'a, RestElement<'a>>,
}

#[derive(Debug, Clone, Copy)]
pub struct PatternElement<'a> {
    pub data: NodeData,
    pub target: Pattern<'a>,
    pub initializer: OptionalNode<'a, Expression<'a>>,
}

#[derive(Debug, Clone, Copy)]
pub struct RestElement<'a> {
    pub data: NodeData,
    pub target: Pattern<'a>,
}

// ============================================================================
// Expressions
// ============================================================================

#[derive(Debug)]
pub enum Expression<'a> {
    Identifier(Identifier<'a>),
    ThisKeyword(NodeData),
    SuperKeyword(NodeData),
    NullKeyword(NodeData),
    TrueKeyword(NodeData),
    FalseKeyword(NodeData),
    NumericLiteral(NumericLiteral<'a>),
    BigIntLiteral(BigIntLiteral<'a>),
    StringLiteral(StringLiteral<'a>),
    RegularExpressionLiteral(RegularExpressionLiteral<'a>),
    NoSubstitutionTemplateLiteral(TemplatePiece<'a>),
    TemplateExpression(TemplateExpression<'a>),
    ArrayLiteral(ArrayLiteralExpression<'a>),
    ObjectLiteral(ObjectLiteralExpression<'a>),
    PropertyAccess(PropertyAccessExpression<'a>),
    ElementAccess(ElementAccessExpression<'a>),
    Call(CallExpression<'a>),
    New(NewExpression<'a>),
    TaggedTemplate(TaggedTemplateExpression<'a>),
    TypeAssertion(TypeAssertionExpression<'a>),
    Parenthesized(ParenthesizedExpression<'a>),
    /// Function expressions and arrow functions.
    Function(Function<'a>),
    Class(Class<'a>),
    /// `+ - ! ~ ++ --` prefixes plus `delete`, `typeof` and `void`.
    PrefixUnary(UnaryExpression<'a>),
    PostfixUnary(UnaryExpression<'a>),
    Await(AwaitExpression<'a>),
    Yield(YieldExpression<'a>),
    Binary(BinaryExpression<'a>),
    Assignment(AssignmentExpression<'a>),
    Conditional(ConditionalExpression<'a>),
    Sequence(SequenceExpression<'a>),
    Spread(SpreadElement<'a>),
    OmittedExpression(NodeData),
    As(TypeCastExpression<'a>),
    Satisfies(TypeCastExpression<'a>),
    NonNull(NonNullExpression<'a>),
    MetaProperty(MetaPropertyExpression<'a>),
}

#[derive(Debug)]
pub struct ArrayLiteralExpression<'a> {
    pub data: NodeData,
    /// Holes are `OmittedExpression`, spreads are `Spread`.
    pub elements: NodeList<'a, Expression<'a>>,
    /// A comma directly after the last element.
    pub trailing_comma: bool,
}

#[derive(Debug)]
pub struct ObjectLiteralExpression<'a> {
    pub data: NodeData,
    pub properties: NodeList<'a, ObjectLiteralElement<'a>>,
    pub trailing_comma: bool,
}

#[derive(Debug)]
pub enum ObjectLiteralElement<'a> {
    PropertyAssignment(PropertyAssignment<'a>),
    ShorthandPropertyAssignment(ShorthandPropertyAssignment<'a>),
    SpreadAssignment(SpreadAssignment<'a>),
    MethodDeclaration(MethodDeclaration<'a>),
    GetAccessor(AccessorDeclaration<'a>),
    SetAccessor(AccessorDeclaration<'a>),
}

#[derive(Debug)]
pub struct PropertyAssignment<'a> {
    pub data: NodeData,
    pub name: PropertyName<'a>,
    pub initializer: &'a Expression<'a>,
}

#[derive(Debug)]
pub struct ShorthandPropertyAssignment<'a> {
    pub data: NodeData,
    pub name: Identifier<'a>,
    /// `{ a = 1 }`: only legal once the literal becomes a pattern.
    pub object_assignment_initializer: OptionalNode<'a, Expression<'a>>,
}

#[derive(Debug)]
pub struct SpreadAssignment<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
}

#[derive(Debug)]
pub struct PropertyAccessExpression<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
    pub question_dot: bool,
    pub name: Identifier<'a>,
}

#[derive(Debug)]
pub struct ElementAccessExpression<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
    pub question_dot: bool,
    pub argument_expression: &'a Expression<'a>,
}

#[derive(Debug)]
pub struct CallExpression<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
    pub question_dot: bool,
    pub type_arguments: Option<NodeList<'a, TypeNode<'a>>>,
    pub arguments: NodeList<'a, Expression<'a>>,
}

#[derive(Debug)]
pub struct NewExpression<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
    pub type_arguments: Option<NodeList<'a, TypeNode<'a>>>,
    /// `None` for `new X` without parentheses, distinct from `new X()`.
    pub arguments: Option<NodeList<'a, Expression<'a>>>,
}

#[derive(Debug)]
pub struct TaggedTemplateExpression<'a> {
    pub data: NodeData,
    pub tag: &'a Expression<'a>,
    pub type_arguments: Option<NodeList<'a, TypeNode<'a>>>,
    pub template: &'a Expression<'a>,
}

#[derive(Debug)]
pub struct TypeAssertionExpression<'a> {
    pub data: NodeData,
    pub type_node: &'a TypeNode<'a>,
    pub expression: &'a Expression<'a>,
}

#[derive(Debug)]
pub struct ParenthesizedExpression<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
}

#[derive(Debug)]
pub struct UnaryExpression<'a> {
    pub data: NodeData,
    pub operator: SyntaxKind,
    pub operand: &'a Expression<'a>,
}

#[derive(Debug)]
pub struct AwaitExpression<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
}

#[derive(Debug)]
pub struct YieldExpression<'a> {
    pub data: NodeData,
    pub delegate: bool,
    pub expression: OptionalNode<'a, Expression<'a>>,
}

#[derive(Debug)]
pub struct BinaryExpression<'a> {
    pub data: NodeData,
    pub left: &'a Expression<'a>,
    pub operator: SyntaxKind,
    pub right: &'a Expression<'a>,
}

#[derive(Debug)]
pub struct AssignmentExpression<'a> {
    pub data: NodeData,
    pub target: Pattern<'a>,
    pub operator: SyntaxKind,
    pub right: &'a Expression<'a>,
}

#[derive(Debug)]
pub struct ConditionalExpression<'a> {
    pub data: NodeData,
    pub condition: &'a Expression<'a>,
    pub when_true: &'a Expression<'a>,
    pub when_false: &'a Expression<'a>,
}

#[derive(Debug)]
pub struct SequenceExpression<'a> {
    pub data: NodeData,
    pub expressions: NodeList<'a, Expression<'a>>,
}

#[derive(Debug)]
pub struct SpreadElement<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
}

/// `x as T` and `x satisfies T`.
#[derive(Debug)]
pub struct TypeCastExpression<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
    pub type_node: &'a TypeNode<'a>,
}

#[derive(Debug)]
pub struct NonNullExpression<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
}

/// `new.target` and `import.meta`.
#[derive(Debug)]
pub struct MetaPropertyExpression<'a> {
    pub data: NodeData,
    pub keyword_token: SyntaxKind,
    pub name: Identifier<'a>,
}

// ============================================================================
// Functions & Classes
// ============================================================================

/// Every function-like construct: declarations, expressions, arrows, methods,
/// accessors and constructors.
#[derive(Debug)]
pub struct Function<'a> {
    /// Kind is `FunctionDeclaration`, `FunctionExpression`, `ArrowFunction`,
    /// `MethodDeclaration`, `GetAccessor`, `SetAccessor` or `Constructor`.
    pub data: NodeData,
    pub name: Option<Identifier<'a>>,
    pub is_generator: bool,
    pub is_async: bool,
    pub is_arrow: bool,
    pub type_parameters: Option<NodeList<'a, TypeParameter<'a>>>,
    pub parameters: NodeList<'a, Parameter<'a>>,
    pub return_type: OptionalNode<'a, TypeNode<'a>>,
    /// `None` for overload signatures and ambient declarations.
    pub body: Option<FunctionBody<'a>>,
}

#[derive(Debug)]
pub enum FunctionBody<'a> {
    Block(&'a Block<'a>),
    /// Concise arrow body.
    Expression(&'a Expression<'a>),
}

#[derive(Debug)]
pub struct Class<'a> {
    /// `ClassDeclaration` or `ClassExpression`.
    pub data: NodeData,
    pub name: Option<Identifier<'a>>,
    pub type_parameters: Option<NodeList<'a, TypeParameter<'a>>>,
    pub heritage_clauses: NodeList<'a, HeritageClause<'a>>,
    pub members: NodeList<'a, ClassElement<'a>>,
}

#[derive(Debug)]
pub struct HeritageClause<'a> {
    pub data: NodeData,
    /// `ExtendsKeyword` or `ImplementsKeyword`.
    pub token: SyntaxKind,
    pub types: NodeList<'a, ExpressionWithTypeArguments<'a>>,
}

#[derive(Debug)]
pub struct ExpressionWithTypeArguments<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
    pub type_arguments: Option<NodeList<'a, TypeNode<'a>>>,
}

#[derive(Debug)]
pub enum ClassElement<'a> {
    PropertyDeclaration(PropertyDeclaration<'a>),
    MethodDeclaration(MethodDeclaration<'a>),
    Constructor(Function<'a>),
    GetAccessor(AccessorDeclaration<'a>),
    SetAccessor(AccessorDeclaration<'a>),
    IndexSignature(IndexSignature<'a>),
    ClassStaticBlock(ClassStaticBlock<'a>),
    SemicolonClassElement(NodeData),
}

#[derive(Debug)]
pub struct PropertyDeclaration<'a> {
    pub data: NodeData,
    pub name: PropertyName<'a>,
    pub optional: bool,
    /// `x!: T`.
    pub definite: bool,
    pub type_annotation: OptionalNode<'a, TypeNode<'a>>,
    pub initializer: OptionalNode<'a, Expression<'a>>,
}

#[derive(Debug)]
pub struct MethodDeclaration<'a> {
    pub data: NodeData,
    pub name: PropertyName<'a>,
    pub optional: bool,
    pub function: Function<'a>,
}

#[derive(Debug)]
pub struct AccessorDeclaration<'a> {
    pub data: NodeData,
    pub name: PropertyName<'a>,
    pub function: Function<'a>,
}

#[derive(Debug)]
pub struct ClassStaticBlock<'a> {
    pub data: NodeData,
    pub body: Block<'a>,
}

// ============================================================================
// Statements
// ============================================================================

#[derive(Debug)]
pub enum Statement<'a> {
    VariableStatement(VariableStatement<'a>),
    FunctionDeclaration(Function<'a>),
    ClassDeclaration(Class<'a>),
    InterfaceDeclaration(InterfaceDeclaration<'a>),
    TypeAliasDeclaration(TypeAliasDeclaration<'a>),
    EnumDeclaration(EnumDeclaration<'a>),
    ModuleDeclaration(ModuleDeclaration<'a>),
    ImportDeclaration(ImportDeclaration<'a>),
    ExportDeclaration(ExportDeclaration<'a>),
    ExportAssignment(ExportAssignment<'a>),
    Block(Block<'a>),
    EmptyStatement(NodeData),
    ExpressionStatement(ExpressionStatement<'a>),
    IfStatement(IfStatement<'a>),
    DoStatement(LoopStatement<'a>),
    WhileStatement(LoopStatement<'a>),
    ForStatement(ForStatement<'a>),
    ForInStatement(ForInOrOfStatement<'a>),
    ForOfStatement(ForInOrOfStatement<'a>),
    ContinueStatement(JumpStatement<'a>),
    BreakStatement(JumpStatement<'a>),
    ReturnStatement(ReturnStatement<'a>),
    WithStatement(WithStatement<'a>),
    SwitchStatement(SwitchStatement<'a>),
    LabeledStatement(LabeledStatement<'a>),
    ThrowStatement(ThrowStatement<'a>),
    TryStatement(TryStatement<'a>),
    DebuggerStatement(NodeData),
}

#[derive(Debug)]
pub struct Block<'a> {
    pub data: NodeData,
    pub statements: NodeList<'a, Statement<'a>>,
}

#[derive(Debug)]
pub struct VariableStatement<'a> {
    pub data: NodeData,
    pub declaration_list: VariableDeclarationList<'a>,
}

#[derive(Debug)]
pub struct VariableDeclarationList<'a> {
    pub data: NodeData,
    pub kind: VariableKind,
    pub declarations: NodeList<'a, VariableDeclaration<'a>>,
}

#[derive(Debug)]
pub struct VariableDeclaration<'a> {
    pub data: NodeData,
    pub name: Pattern<'a>,
    /// `let x!: T`.
    pub definite: bool,
    pub type_annotation: OptionalNode<'a, TypeNode<'a>>,
    pub initializer: OptionalNode<'a, Expression<'a>>,
}

#[derive(Debug)]
pub struct ExpressionStatement<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
}

#[derive(Debug)]
pub struct IfStatement<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
    pub then_statement: &'a Statement<'a>,
    pub else_statement: OptionalNode<'a, Statement<'a>>,
}

/// `do ... while` and `while` loops.
#[derive(Debug)]
pub struct LoopStatement<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
    pub statement: &'a Statement<'a>,
}

#[derive(Debug)]
pub struct ForStatement<'a> {
    pub data: NodeData,
    pub initializer: Option<ForInitializer<'a>>,
    pub condition: OptionalNode<'a, Expression<'a>>,
    pub incrementor: OptionalNode<'a, Expression<'a>>,
    pub statement: &'a Statement<'a>,
}

#[derive(Debug)]
pub enum ForInitializer<'a> {
    VariableDeclarationList(VariableDeclarationList<'a>),
    Expression(&'a Expression<'a>),
    /// Assignment target of a `for-in`/`for-of` head.
    Pattern(Pattern<'a>),
}

/// `for-in` and `for-of` loops; `for await` sets the AWAIT node flag.
#[derive(Debug)]
pub struct ForInOrOfStatement<'a> {
    pub data: NodeData,
    pub initializer: ForInitializer<'a>,
    pub expression: &'a Expression<'a>,
    pub statement: &'a Statement<'a>,
}

/// `break` and `continue`.
#[derive(Debug)]
pub struct JumpStatement<'a> {
    pub data: NodeData,
    pub label: Option<Identifier<'a>>,
}

#[derive(Debug)]
pub struct ReturnStatement<'a> {
    pub data: NodeData,
    pub expression: OptionalNode<'a, Expression<'a>>,
}

#[derive(Debug)]
pub struct WithStatement<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
    pub statement: &'a Statement<'a>,
}

#[derive(Debug)]
pub struct SwitchStatement<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
    pub clauses: NodeList<'a, CaseClause<'a>>,
}

#[derive(Debug)]
pub struct CaseClause<'a> {
    /// `CaseClause` or `DefaultClause`; the latter has no expression.
    pub data: NodeData,
    pub expression: OptionalNode<'a, Expression<'a>>,
    pub statements: NodeList<'a, Statement<'a>>,
}

#[derive(Debug)]
pub struct LabeledStatement<'a> {
    pub data: NodeData,
    pub label: Identifier<'a>,
    pub statement: &'a Statement<'a>,
}

#[derive(Debug)]
pub struct ThrowStatement<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
}

#[derive(Debug)]
pub struct TryStatement<'a> {
    pub data: NodeData,
    pub try_block: Block<'a>,
    pub catch_clause: Option<CatchClause<'a>>,
    pub finally_block: Option<Block<'a>>,
}

#[derive(Debug)]
pub struct CatchClause<'a> {
    pub data: NodeData,
    pub variable: Option<Pattern<'a>>,
    pub type_annotation: OptionalNode<'a, TypeNode<'a>>,
    pub block: Block<'a>,
}

// ============================================================================
// Declarations
// ============================================================================

#[derive(Debug)]
pub struct InterfaceDeclaration<'a> {
    pub data: NodeData,
    pub name: Identifier<'a>,
    pub type_parameters: Option<NodeList<'a, TypeParameter<'a>>>,
    pub heritage_clauses: NodeList<'a, HeritageClause<'a>>,
    pub members: NodeList<'a, TypeElement<'a>>,
}

#[derive(Debug)]
pub struct TypeAliasDeclaration<'a> {
    pub data: NodeData,
    pub name: Identifier<'a>,
    pub type_parameters: Option<NodeList<'a, TypeParameter<'a>>>,
    pub type_node: &'a TypeNode<'a>,
}

#[derive(Debug)]
pub struct EnumDeclaration<'a> {
    pub data: NodeData,
    pub name: Identifier<'a>,
    pub members: NodeList<'a, EnumMember<'a>>,
}

#[derive(Debug)]
pub struct EnumMember<'a> {
    pub data: NodeData,
    pub name: PropertyName<'a>,
    pub initializer: OptionalNode<'a, Expression<'a>>,
}

#[derive(Debug)]
pub struct ModuleDeclaration<'a> {
    pub data: NodeData,
    pub name: ModuleName<'a>,
    pub body: Option<ModuleBody<'a>>,
}

#[derive(Debug)]
pub enum ModuleName<'a> {
    Identifier(Identifier<'a>),
    /// Ambient external module, `declare module "x"`.
    StringLiteral(StringLiteral<'a>),
}

#[derive(Debug)]
pub enum ModuleBody<'a> {
    ModuleBlock(Block<'a>),
    /// Next link of a dotted name `namespace a.b { }`.
    Namespace(&'a ModuleDeclaration<'a>),
}

#[derive(Debug)]
pub struct ImportDeclaration<'a> {
    pub data: NodeData,
    pub specifiers: NodeList<'a, ImportSpecifier<'a>>,
    pub module_specifier: StringLiteral<'a>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportSpecifierKind {
    /// `import x from "m"`.
    Default,
    /// `import * as ns from "m"`.
    Namespace,
    /// `import { a as b } from "m"`.
    Named,
}

#[derive(Debug)]
pub struct ImportSpecifier<'a> {
    pub data: NodeData,
    pub kind: ImportSpecifierKind,
    /// Imported name; equal to `local` for defaults and unaliased names,
    /// `None` for namespace imports.
    pub imported: Option<Identifier<'a>>,
    pub local: Identifier<'a>,
    pub type_only: bool,
}

#[derive(Debug)]
pub struct ExportDeclaration<'a> {
    pub data: NodeData,
    pub clause: ExportClause<'a>,
    pub module_specifier: Option<StringLiteral<'a>>,
}

#[derive(Debug)]
pub enum ExportClause<'a> {
    /// `export { a, b as c }`.
    Named(NodeList<'a, ExportSpecifier<'a>>),
    /// `export *` or `export * as ns`.
    Namespace(Option<Identifier<'a>>),
}

#[derive(Debug)]
pub struct ExportSpecifier<'a> {
    pub data: NodeData,
    pub local: Identifier<'a>,
    pub exported: Identifier<'a>,
    pub type_only: bool,
}

/// `export default <expr>` and `export = <expr>`.
#[derive(Debug)]
pub struct ExportAssignment<'a> {
    pub data: NodeData,
    pub is_export_equals: bool,
    pub expression: &'a Expression<'a>,
}
