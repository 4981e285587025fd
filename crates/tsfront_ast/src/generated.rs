//! Uniform accessors over the node enums.
//!
//! Every category enum exposes `data()`, `kind()`, `range()`, `pos()` and
//! `end()` so consumers can treat nodes uniformly without matching.

use crate::node::*;
use crate::syntax_kind::SyntaxKind;
use tsfront_core::text::TextRange;

macro_rules! node_accessors {
    ($ty:ident) => {
        impl<'a> $ty<'a> {
            #[inline]
            pub fn kind(&self) -> SyntaxKind {
                self.data().kind
            }

            #[inline]
            pub fn range(&self) -> TextRange {
                self.data().range
            }

            #[inline]
            pub fn pos(&self) -> u32 {
                self.data().range.pos
            }

            #[inline]
            pub fn end(&self) -> u32 {
                self.data().range.end
            }
        }
    };
}

impl<'a> Statement<'a> {
    pub fn data(&self) -> &NodeData {
        match self {
            Statement::VariableStatement(n) => &n.data,
            Statement::FunctionDeclaration(n) => &n.data,
            Statement::ClassDeclaration(n) => &n.data,
            Statement::InterfaceDeclaration(n) => &n.data,
            Statement::TypeAliasDeclaration(n) => &n.data,
            Statement::EnumDeclaration(n) => &n.data,
            Statement::ModuleDeclaration(n) => &n.data,
            Statement::ImportDeclaration(n) => &n.data,
            Statement::ExportDeclaration(n) => &n.data,
            Statement::ExportAssignment(n) => &n.data,
            Statement::Block(n) => &n.data,
            Statement::EmptyStatement(d) => d,
            Statement::ExpressionStatement(n) => &n.data,
            Statement::IfStatement(n) => &n.data,
            Statement::DoStatement(n) => &n.data,
            Statement::WhileStatement(n) => &n.data,
            Statement::ForStatement(n) => &n.data,
            Statement::ForInStatement(n) => &n.data,
            Statement::ForOfStatement(n) => &n.data,
            Statement::ContinueStatement(n) => &n.data,
            Statement::BreakStatement(n) => &n.data,
            Statement::ReturnStatement(n) => &n.data,
            Statement::WithStatement(n) => &n.data,
            Statement::SwitchStatement(n) => &n.data,
            Statement::LabeledStatement(n) => &n.data,
            Statement::ThrowStatement(n) => &n.data,
            Statement::TryStatement(n) => &n.data,
            Statement::DebuggerStatement(d) => d,
        }
    }

    /// Whether this is one of the iteration statements.
    pub fn is_iteration(&self) -> bool {
        matches!(
            self,
            Statement::DoStatement(_)
                | Statement::WhileStatement(_)
                | Statement::ForStatement(_)
                | Statement::ForInStatement(_)
                | Statement::ForOfStatement(_)
        )
    }
}

node_accessors!(Statement);

impl<'a> Expression<'a> {
    pub fn data(&self) -> &NodeData {
        match self {
            Expression::Identifier(n) => &n.data,
            Expression::ThisKeyword(d)
            | Expression::SuperKeyword(d)
            | Expression::NullKeyword(d)
            | Expression::TrueKeyword(d)
            | Expression::FalseKeyword(d)
            | Expression::OmittedExpression(d) => d,
            Expression::NumericLiteral(n) => &n.data,
            Expression::BigIntLiteral(n) => &n.data,
            Expression::StringLiteral(n) => &n.data,
            Expression::RegularExpressionLiteral(n) => &n.data,
            Expression::NoSubstitutionTemplateLiteral(n) => &n.data,
            Expression::TemplateExpression(n) => &n.data,
            Expression::ArrayLiteral(n) => &n.data,
            Expression::ObjectLiteral(n) => &n.data,
            Expression::PropertyAccess(n) => &n.data,
            Expression::ElementAccess(n) => &n.data,
            Expression::Call(n) => &n.data,
            Expression::New(n) => &n.data,
            Expression::TaggedTemplate(n) => &n.data,
            Expression::TypeAssertion(n) => &n.data,
            Expression::Parenthesized(n) => &n.data,
            Expression::Function(n) => &n.data,
            Expression::Class(n) => &n.data,
            Expression::PrefixUnary(n) | Expression::PostfixUnary(n) => &n.data,
            Expression::Await(n) => &n.data,
            Expression::Yield(n) => &n.data,
            Expression::Binary(n) => &n.data,
            Expression::Assignment(n) => &n.data,
            Expression::Conditional(n) => &n.data,
            Expression::Sequence(n) => &n.data,
            Expression::Spread(n) => &n.data,
            Expression::As(n) | Expression::Satisfies(n) => &n.data,
            Expression::NonNull(n) => &n.data,
            Expression::MetaProperty(n) => &n.data,
        }
    }

    /// Strip any number of enclosing parentheses.
    pub fn skip_parentheses(&self) -> &Expression<'a> {
        let mut expr = self;
        while let Expression::Parenthesized(paren) = expr {
            expr = paren.expression;
        }
        expr
    }

    /// Identifier, member access or element access: the targets allowed for
    /// compound assignment and update operators.
    pub fn is_simple_assignment_target(&self) -> bool {
        match self {
            Expression::Identifier(_) => true,
            Expression::PropertyAccess(n) => !n.data.flags.contains(crate::NodeFlags::OPTIONAL_CHAIN),
            Expression::ElementAccess(n) => !n.data.flags.contains(crate::NodeFlags::OPTIONAL_CHAIN),
            Expression::Parenthesized(n) => n.expression.is_simple_assignment_target(),
            Expression::NonNull(n) => n.expression.is_simple_assignment_target(),
            Expression::As(n) | Expression::Satisfies(n) => n.expression.is_simple_assignment_target(),
            Expression::TypeAssertion(n) => n.expression.is_simple_assignment_target(),
            _ => false,
        }
    }
}

node_accessors!(Expression);

impl<'a> TypeNode<'a> {
    pub fn data(&self) -> &NodeData {
        match self {
            TypeNode::KeywordType(d) | TypeNode::ThisType(d) => d,
            TypeNode::TypeReference(n) => &n.data,
            TypeNode::FunctionType(n) => &n.data,
            TypeNode::TypeQuery(n) => &n.data,
            TypeNode::TypeLiteral(n) => &n.data,
            TypeNode::ArrayType(n) => &n.data,
            TypeNode::TupleType(n) => &n.data,
            TypeNode::OptionalType(n)
            | TypeNode::RestType(n)
            | TypeNode::NonNullType(n)
            | TypeNode::ParenthesizedType(n) => &n.data,
            TypeNode::NamedTupleMember(n) => &n.data,
            TypeNode::UnionType(n) | TypeNode::IntersectionType(n) => &n.data,
            TypeNode::ConditionalType(n) => &n.data,
            TypeNode::InferType(n) => &n.data,
            TypeNode::TypeOperator(n) => &n.data,
            TypeNode::IndexedAccessType(n) => &n.data,
            TypeNode::MappedType(n) => &n.data,
            TypeNode::LiteralType(n) => &n.data,
            TypeNode::TemplateLiteralType(n) => &n.data,
            TypeNode::TypePredicate(n) => &n.data,
        }
    }
}

node_accessors!(TypeNode);

impl<'a> Pattern<'a> {
    pub fn data(&self) -> &NodeData {
        match self {
            Pattern::Identifier(n) => &n.data,
            Pattern::Object(n) => &n.data,
            Pattern::Array(n) => &n.data,
            Pattern::Expression(e) => e.data(),
        }
    }

    /// Whether this is a destructuring pattern rather than a plain name.
    pub fn is_destructuring(&self) -> bool {
        matches!(self, Pattern::Object(_) | Pattern::Array(_))
    }

    pub fn as_identifier(&self) -> Option<&Identifier<'a>> {
        match self {
            Pattern::Identifier(id) => Some(id),
            _ => None,
        }
    }
}

node_accessors!(Pattern);

impl<'a> ClassElement<'a> {
    pub fn data(&self) -> &NodeData {
        match self {
            ClassElement::PropertyDeclaration(n) => &n.data,
            ClassElement::MethodDeclaration(n) => &n.data,
            ClassElement::Constructor(n) => &n.data,
            ClassElement::GetAccessor(n) | ClassElement::SetAccessor(n) => &n.data,
            ClassElement::IndexSignature(n) => &n.data,
            ClassElement::ClassStaticBlock(n) => &n.data,
            ClassElement::SemicolonClassElement(d) => d,
        }
    }
}

node_accessors!(ClassElement);

impl<'a> TypeElement<'a> {
    pub fn data(&self) -> &NodeData {
        match self {
            TypeElement::PropertySignature(n) => &n.data,
            TypeElement::MethodSignature(n) => &n.data,
            TypeElement::CallSignature(n) | TypeElement::ConstructSignature(n) => &n.data,
            TypeElement::IndexSignature(n) => &n.data,
        }
    }
}

node_accessors!(TypeElement);

impl<'a> ObjectLiteralElement<'a> {
    pub fn data(&self) -> &NodeData {
        match self {
            ObjectLiteralElement::PropertyAssignment(n) => &n.data,
            ObjectLiteralElement::ShorthandPropertyAssignment(n) => &n.data,
            ObjectLiteralElement::SpreadAssignment(n) => &n.data,
            ObjectLiteralElement::MethodDeclaration(n) => &n.data,
            ObjectLiteralElement::GetAccessor(n) | ObjectLiteralElement::SetAccessor(n) => &n.data,
        }
    }
}

node_accessors!(ObjectLiteralElement);

impl<'a> PropertyName<'a> {
    pub fn data(&self) -> &NodeData {
        match self {
            PropertyName::Identifier(n) | PropertyName::PrivateIdentifier(n) => &n.data,
            PropertyName::StringLiteral(n) => &n.data,
            PropertyName::NumericLiteral(n) => &n.data,
            PropertyName::ComputedPropertyName(n) => &n.data,
        }
    }
}

node_accessors!(PropertyName);

impl<'a> EntityName<'a> {
    pub fn data(&self) -> &NodeData {
        match self {
            EntityName::Identifier(n) => &n.data,
            EntityName::QualifiedName(n) => &n.data,
        }
    }

    /// The right-most identifier of a possibly qualified name.
    pub fn last_identifier(&self) -> &Identifier<'a> {
        match self {
            EntityName::Identifier(id) => id,
            EntityName::QualifiedName(q) => &q.right,
        }
    }
}

node_accessors!(EntityName);

impl<'a> ModuleName<'a> {
    pub fn data(&self) -> &NodeData {
        match self {
            ModuleName::Identifier(n) => &n.data,
            ModuleName::StringLiteral(n) => &n.data,
        }
    }

    pub fn text(&self) -> &'a str {
        match self {
            ModuleName::Identifier(n) => n.name,
            ModuleName::StringLiteral(n) => n.value,
        }
    }
}

node_accessors!(ModuleName);

impl<'a> FunctionBody<'a> {
    pub fn data(&self) -> &NodeData {
        match self {
            FunctionBody::Block(b) => &b.data,
            FunctionBody::Expression(e) => e.data(),
        }
    }
}

node_accessors!(FunctionBody);
