//! AST visitor trait for traversing the syntax tree.
//!
//! Every method has a default implementation that walks into the node's
//! children, so an implementation overrides only the hooks it cares about
//! and calls the matching `walk_*` function to keep descending.

use crate::node::*;

/// A visitor over the syntax tree. Default implementations walk children.
pub trait AstVisitor<'a> {
    fn visit_compilation_unit(&mut self, node: &CompilationUnit<'a>) {
        for stmt in node.statements {
            self.visit_statement(stmt);
        }
    }

    fn visit_statement(&mut self, stmt: &Statement<'a>) {
        walk_statement(self, stmt);
    }

    fn visit_expression(&mut self, expr: &Expression<'a>) {
        walk_expression(self, expr);
    }

    fn visit_type_node(&mut self, node: &TypeNode<'a>) {
        walk_type_node(self, node);
    }

    fn visit_pattern(&mut self, pattern: &Pattern<'a>) {
        walk_pattern(self, pattern);
    }

    fn visit_identifier(&mut self, _id: &Identifier<'a>) {}

    fn visit_block(&mut self, block: &Block<'a>) {
        for stmt in block.statements {
            self.visit_statement(stmt);
        }
    }

    fn visit_variable_declaration_list(&mut self, list: &VariableDeclarationList<'a>) {
        for decl in list.declarations {
            self.visit_pattern(&decl.name);
            if let Some(ty) = decl.type_annotation {
                self.visit_type_node(ty);
            }
            if let Some(init) = decl.initializer {
                self.visit_expression(init);
            }
        }
    }

    fn visit_function(&mut self, func: &Function<'a>) {
        walk_function(self, func);
    }

    fn visit_class(&mut self, class: &Class<'a>) {
        walk_class(self, class);
    }

    fn visit_class_element(&mut self, element: &ClassElement<'a>) {
        walk_class_element(self, element);
    }

    fn visit_type_element(&mut self, element: &TypeElement<'a>) {
        walk_type_element(self, element);
    }

    fn visit_object_literal_element(&mut self, element: &ObjectLiteralElement<'a>) {
        walk_object_literal_element(self, element);
    }

    fn visit_property_name(&mut self, name: &PropertyName<'a>) {
        match name {
            PropertyName::Identifier(id) | PropertyName::PrivateIdentifier(id) => self.visit_identifier(id),
            PropertyName::ComputedPropertyName(c) => self.visit_expression(c.expression),
            PropertyName::StringLiteral(_) | PropertyName::NumericLiteral(_) => {}
        }
    }

    fn visit_parameter(&mut self, param: &Parameter<'a>) {
        self.visit_pattern(&param.name);
        if let Some(ty) = param.type_annotation {
            self.visit_type_node(ty);
        }
        if let Some(init) = param.initializer {
            self.visit_expression(init);
        }
    }

    fn visit_type_parameter(&mut self, param: &TypeParameter<'a>) {
        self.visit_identifier(&param.name);
        if let Some(c) = param.constraint {
            self.visit_type_node(c);
        }
        if let Some(d) = param.default {
            self.visit_type_node(d);
        }
    }

    fn visit_heritage_clause(&mut self, clause: &HeritageClause<'a>) {
        for ty in clause.types {
            self.visit_expression(ty.expression);
            visit_type_arguments(self, ty.type_arguments);
        }
    }

    fn visit_entity_name(&mut self, name: &EntityName<'a>) {
        match name {
            EntityName::Identifier(id) => self.visit_identifier(id),
            EntityName::QualifiedName(q) => {
                self.visit_entity_name(&q.left);
                self.visit_identifier(&q.right);
            }
        }
    }
}

fn visit_type_parameters<'a, V: AstVisitor<'a> + ?Sized>(v: &mut V, params: Option<&[TypeParameter<'a>]>) {
    for p in params.unwrap_or_default() {
        v.visit_type_parameter(p);
    }
}

fn visit_type_arguments<'a, V: AstVisitor<'a> + ?Sized>(v: &mut V, args: Option<&[TypeNode<'a>]>) {
    for t in args.unwrap_or_default() {
        v.visit_type_node(t);
    }
}

fn visit_signature<'a, V: AstVisitor<'a> + ?Sized>(
    v: &mut V,
    type_parameters: Option<&[TypeParameter<'a>]>,
    parameters: &[Parameter<'a>],
    return_type: Option<&TypeNode<'a>>,
) {
    visit_type_parameters(v, type_parameters);
    for p in parameters {
        v.visit_parameter(p);
    }
    if let Some(ret) = return_type {
        v.visit_type_node(ret);
    }
}

fn visit_for_initializer<'a, V: AstVisitor<'a> + ?Sized>(v: &mut V, init: &ForInitializer<'a>) {
    match init {
        ForInitializer::VariableDeclarationList(list) => v.visit_variable_declaration_list(list),
        ForInitializer::Expression(e) => v.visit_expression(e),
        ForInitializer::Pattern(p) => v.visit_pattern(p),
    }
}

pub fn walk_statement<'a, V: AstVisitor<'a> + ?Sized>(v: &mut V, stmt: &Statement<'a>) {
    match stmt {
        Statement::VariableStatement(n) => v.visit_variable_declaration_list(&n.declaration_list),
        Statement::FunctionDeclaration(n) => v.visit_function(n),
        Statement::ClassDeclaration(n) => v.visit_class(n),
        Statement::InterfaceDeclaration(n) => {
            v.visit_identifier(&n.name);
            visit_type_parameters(v, n.type_parameters);
            for clause in n.heritage_clauses {
                v.visit_heritage_clause(clause);
            }
            for member in n.members {
                v.visit_type_element(member);
            }
        }
        Statement::TypeAliasDeclaration(n) => {
            v.visit_identifier(&n.name);
            visit_type_parameters(v, n.type_parameters);
            v.visit_type_node(n.type_node);
        }
        Statement::EnumDeclaration(n) => {
            v.visit_identifier(&n.name);
            for member in n.members {
                v.visit_property_name(&member.name);
                if let Some(init) = member.initializer {
                    v.visit_expression(init);
                }
            }
        }
        Statement::ModuleDeclaration(n) => walk_module(v, n),
        Statement::ImportDeclaration(n) => {
            for spec in n.specifiers {
                v.visit_identifier(&spec.local);
            }
        }
        Statement::ExportDeclaration(n) => match &n.clause {
            ExportClause::Named(specs) => {
                for spec in specs.iter() {
                    v.visit_identifier(&spec.local);
                }
            }
            ExportClause::Namespace(Some(name)) => v.visit_identifier(name),
            ExportClause::Namespace(None) => {}
        },
        Statement::ExportAssignment(n) => v.visit_expression(n.expression),
        Statement::Block(n) => v.visit_block(n),
        Statement::EmptyStatement(_) | Statement::DebuggerStatement(_) => {}
        Statement::ExpressionStatement(n) => v.visit_expression(n.expression),
        Statement::IfStatement(n) => {
            v.visit_expression(n.expression);
            v.visit_statement(n.then_statement);
            if let Some(else_stmt) = n.else_statement {
                v.visit_statement(else_stmt);
            }
        }
        Statement::DoStatement(n) => {
            v.visit_statement(n.statement);
            v.visit_expression(n.expression);
        }
        Statement::WhileStatement(n) => {
            v.visit_expression(n.expression);
            v.visit_statement(n.statement);
        }
        Statement::ForStatement(n) => {
            if let Some(init) = &n.initializer {
                visit_for_initializer(v, init);
            }
            if let Some(cond) = n.condition {
                v.visit_expression(cond);
            }
            if let Some(inc) = n.incrementor {
                v.visit_expression(inc);
            }
            v.visit_statement(n.statement);
        }
        Statement::ForInStatement(n) | Statement::ForOfStatement(n) => {
            visit_for_initializer(v, &n.initializer);
            v.visit_expression(n.expression);
            v.visit_statement(n.statement);
        }
        Statement::ContinueStatement(n) | Statement::BreakStatement(n) => {
            if let Some(label) = &n.label {
                v.visit_identifier(label);
            }
        }
        Statement::ReturnStatement(n) => {
            if let Some(e) = n.expression {
                v.visit_expression(e);
            }
        }
        Statement::WithStatement(n) => {
            v.visit_expression(n.expression);
            v.visit_statement(n.statement);
        }
        Statement::SwitchStatement(n) => {
            v.visit_expression(n.expression);
            for clause in n.clauses {
                if let Some(e) = clause.expression {
                    v.visit_expression(e);
                }
                for s in clause.statements {
                    v.visit_statement(s);
                }
            }
        }
        Statement::LabeledStatement(n) => {
            v.visit_identifier(&n.label);
            v.visit_statement(n.statement);
        }
        Statement::ThrowStatement(n) => v.visit_expression(n.expression),
        Statement::TryStatement(n) => {
            v.visit_block(&n.try_block);
            if let Some(catch) = &n.catch_clause {
                if let Some(var) = &catch.variable {
                    v.visit_pattern(var);
                }
                if let Some(ty) = catch.type_annotation {
                    v.visit_type_node(ty);
                }
                v.visit_block(&catch.block);
            }
            if let Some(fin) = &n.finally_block {
                v.visit_block(fin);
            }
        }
    }
}

fn walk_module<'a, V: AstVisitor<'a> + ?Sized>(v: &mut V, module: &ModuleDeclaration<'a>) {
    if let ModuleName::Identifier(id) = &module.name {
        v.visit_identifier(id);
    }
    match &module.body {
        Some(ModuleBody::ModuleBlock(block)) => v.visit_block(block),
        Some(ModuleBody::Namespace(inner)) => walk_module(v, inner),
        None => {}
    }
}

pub fn walk_expression<'a, V: AstVisitor<'a> + ?Sized>(v: &mut V, expr: &Expression<'a>) {
    match expr {
        Expression::Identifier(id) => v.visit_identifier(id),
        Expression::ThisKeyword(_)
        | Expression::SuperKeyword(_)
        | Expression::NullKeyword(_)
        | Expression::TrueKeyword(_)
        | Expression::FalseKeyword(_)
        | Expression::NumericLiteral(_)
        | Expression::BigIntLiteral(_)
        | Expression::StringLiteral(_)
        | Expression::RegularExpressionLiteral(_)
        | Expression::NoSubstitutionTemplateLiteral(_)
        | Expression::OmittedExpression(_) => {}
        Expression::TemplateExpression(n) => {
            for span in n.template_spans {
                v.visit_expression(span.expression);
            }
        }
        Expression::ArrayLiteral(n) => {
            for e in n.elements {
                v.visit_expression(e);
            }
        }
        Expression::ObjectLiteral(n) => {
            for p in n.properties {
                v.visit_object_literal_element(p);
            }
        }
        Expression::PropertyAccess(n) => {
            v.visit_expression(n.expression);
            v.visit_identifier(&n.name);
        }
        Expression::ElementAccess(n) => {
            v.visit_expression(n.expression);
            v.visit_expression(n.argument_expression);
        }
        Expression::Call(n) => {
            v.visit_expression(n.expression);
            visit_type_arguments(v, n.type_arguments);
            for a in n.arguments {
                v.visit_expression(a);
            }
        }
        Expression::New(n) => {
            v.visit_expression(n.expression);
            visit_type_arguments(v, n.type_arguments);
            for a in n.arguments.unwrap_or_default() {
                v.visit_expression(a);
            }
        }
        Expression::TaggedTemplate(n) => {
            v.visit_expression(n.tag);
            visit_type_arguments(v, n.type_arguments);
            v.visit_expression(n.template);
        }
        Expression::TypeAssertion(n) => {
            v.visit_type_node(n.type_node);
            v.visit_expression(n.expression);
        }
        Expression::Parenthesized(n) => v.visit_expression(n.expression),
        Expression::Function(n) => v.visit_function(n),
        Expression::Class(n) => v.visit_class(n),
        Expression::PrefixUnary(n) | Expression::PostfixUnary(n) => v.visit_expression(n.operand),
        Expression::Await(n) => v.visit_expression(n.expression),
        Expression::Yield(n) => {
            if let Some(e) = n.expression {
                v.visit_expression(e);
            }
        }
        Expression::Binary(n) => {
            v.visit_expression(n.left);
            v.visit_expression(n.right);
        }
        Expression::Assignment(n) => {
            v.visit_pattern(&n.target);
            v.visit_expression(n.right);
        }
        Expression::Conditional(n) => {
            v.visit_expression(n.condition);
            v.visit_expression(n.when_true);
            v.visit_expression(n.when_false);
        }
        Expression::Sequence(n) => {
            for e in n.expressions {
                v.visit_expression(e);
            }
        }
        Expression::Spread(n) => v.visit_expression(n.expression),
        Expression::As(n) | Expression::Satisfies(n) => {
            v.visit_expression(n.expression);
            v.visit_type_node(n.type_node);
        }
        Expression::NonNull(n) => v.visit_expression(n.expression),
        Expression::MetaProperty(n) => v.visit_identifier(&n.name),
    }
}

pub fn walk_pattern<'a, V: AstVisitor<'a> + ?Sized>(v: &mut V, pattern: &Pattern<'a>) {
    match pattern {
        Pattern::Identifier(id) => v.visit_identifier(id),
        Pattern::Object(obj) => {
            for prop in obj.properties {
                v.visit_property_name(&prop.key);
                v.visit_pattern(&prop.value);
                if let Some(init) = prop.initializer {
                    v.visit_expression(init);
                }
            }
            if let Some(rest) = obj.rest {
                v.visit_pattern(&rest.target);
            }
        }
        Pattern::Array(arr) => {
            for elem in arr.elements.iter().flatten() {
                v.visit_pattern(&elem.target);
                if let Some(init) = elem.initializer {
                    v.visit_expression(init);
                }
            }
            if let Some(rest) = arr.rest {
                v.visit_pattern(&rest.target);
            }
        }
        Pattern::Expression(e) => v.visit_expression(e),
    }
}

pub fn walk_function<'a, V: AstVisitor<'a> + ?Sized>(v: &mut V, func: &Function<'a>) {
    if let Some(name) = &func.name {
        v.visit_identifier(name);
    }
    visit_signature(v, func.type_parameters, func.parameters, func.return_type);
    match &func.body {
        Some(FunctionBody::Block(block)) => v.visit_block(block),
        Some(FunctionBody::Expression(e)) => v.visit_expression(e),
        None => {}
    }
}

pub fn walk_class<'a, V: AstVisitor<'a> + ?Sized>(v: &mut V, class: &Class<'a>) {
    if let Some(name) = &class.name {
        v.visit_identifier(name);
    }
    visit_type_parameters(v, class.type_parameters);
    for clause in class.heritage_clauses {
        v.visit_heritage_clause(clause);
    }
    for member in class.members {
        v.visit_class_element(member);
    }
}

pub fn walk_class_element<'a, V: AstVisitor<'a> + ?Sized>(v: &mut V, element: &ClassElement<'a>) {
    match element {
        ClassElement::PropertyDeclaration(n) => {
            v.visit_property_name(&n.name);
            if let Some(ty) = n.type_annotation {
                v.visit_type_node(ty);
            }
            if let Some(init) = n.initializer {
                v.visit_expression(init);
            }
        }
        ClassElement::MethodDeclaration(n) => {
            v.visit_property_name(&n.name);
            v.visit_function(&n.function);
        }
        ClassElement::Constructor(n) => v.visit_function(n),
        ClassElement::GetAccessor(n) | ClassElement::SetAccessor(n) => {
            v.visit_property_name(&n.name);
            v.visit_function(&n.function);
        }
        ClassElement::IndexSignature(n) => {
            v.visit_parameter(&n.parameter);
            v.visit_type_node(n.type_annotation);
        }
        ClassElement::ClassStaticBlock(n) => v.visit_block(&n.body),
        ClassElement::SemicolonClassElement(_) => {}
    }
}

pub fn walk_type_element<'a, V: AstVisitor<'a> + ?Sized>(v: &mut V, element: &TypeElement<'a>) {
    match element {
        TypeElement::PropertySignature(n) => {
            v.visit_property_name(&n.name);
            if let Some(ty) = n.type_annotation {
                v.visit_type_node(ty);
            }
        }
        TypeElement::MethodSignature(n) => {
            v.visit_property_name(&n.name);
            visit_signature(v, n.type_parameters, n.parameters, n.return_type);
        }
        TypeElement::CallSignature(n) | TypeElement::ConstructSignature(n) => {
            visit_signature(v, n.type_parameters, n.parameters, n.return_type);
        }
        TypeElement::IndexSignature(n) => {
            v.visit_parameter(&n.parameter);
            v.visit_type_node(n.type_annotation);
        }
    }
}

pub fn walk_object_literal_element<'a, V: AstVisitor<'a> + ?Sized>(
    v: &mut V,
    element: &ObjectLiteralElement<'a>,
) {
    match element {
        ObjectLiteralElement::PropertyAssignment(n) => {
            v.visit_property_name(&n.name);
            v.visit_expression(n.initializer);
        }
        ObjectLiteralElement::ShorthandPropertyAssignment(n) => {
            v.visit_identifier(&n.name);
            if let Some(init) = n.object_assignment_initializer {
                v.visit_expression(init);
            }
        }
        ObjectLiteralElement::SpreadAssignment(n) => v.visit_expression(n.expression),
        ObjectLiteralElement::MethodDeclaration(n) => {
            v.visit_property_name(&n.name);
            v.visit_function(&n.function);
        }
        ObjectLiteralElement::GetAccessor(n) | ObjectLiteralElement::SetAccessor(n) => {
            v.visit_property_name(&n.name);
            v.visit_function(&n.function);
        }
    }
}

pub fn walk_type_node<'a, V: AstVisitor<'a> + ?Sized>(v: &mut V, node: &TypeNode<'a>) {
    match node {
        TypeNode::KeywordType(_) | TypeNode::ThisType(_) => {}
        TypeNode::TypeReference(n) => {
            v.visit_entity_name(&n.type_name);
            visit_type_arguments(v, n.type_arguments);
        }
        TypeNode::FunctionType(n) => {
            visit_signature(v, n.type_parameters, n.parameters, Some(n.return_type));
        }
        TypeNode::TypeQuery(n) => {
            v.visit_entity_name(&n.expr_name);
            visit_type_arguments(v, n.type_arguments);
        }
        TypeNode::TypeLiteral(n) => {
            for member in n.members {
                v.visit_type_element(member);
            }
        }
        TypeNode::ArrayType(n) => v.visit_type_node(n.element_type),
        TypeNode::TupleType(n) => {
            for e in n.elements {
                v.visit_type_node(e);
            }
        }
        TypeNode::OptionalType(n)
        | TypeNode::RestType(n)
        | TypeNode::NonNullType(n)
        | TypeNode::ParenthesizedType(n) => {
            v.visit_type_node(n.type_node)
        }
        TypeNode::NamedTupleMember(n) => {
            v.visit_identifier(&n.name);
            v.visit_type_node(n.type_node);
        }
        TypeNode::UnionType(n) | TypeNode::IntersectionType(n) => {
            for t in n.types {
                v.visit_type_node(t);
            }
        }
        TypeNode::ConditionalType(n) => {
            v.visit_type_node(n.check_type);
            v.visit_type_node(n.extends_type);
            v.visit_type_node(n.true_type);
            v.visit_type_node(n.false_type);
        }
        TypeNode::InferType(n) => v.visit_type_parameter(&n.type_parameter),
        TypeNode::TypeOperator(n) => v.visit_type_node(n.type_node),
        TypeNode::IndexedAccessType(n) => {
            v.visit_type_node(n.object_type);
            v.visit_type_node(n.index_type);
        }
        TypeNode::MappedType(n) => {
            v.visit_type_parameter(&n.type_parameter);
            if let Some(name) = n.name_type {
                v.visit_type_node(name);
            }
            if let Some(ty) = n.type_node {
                v.visit_type_node(ty);
            }
        }
        TypeNode::LiteralType(n) => v.visit_expression(n.literal),
        TypeNode::TemplateLiteralType(n) => {
            for span in n.template_spans {
                v.visit_type_node(span.type_node);
            }
        }
        TypeNode::TypePredicate(n) => {
            if let TypePredicateParameterName::Identifier(id) = &n.parameter_name {
                v.visit_identifier(id);
            }
            if let Some(ty) = n.type_node {
                v.visit_type_node(ty);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SyntaxKind, VariableKind};
    use bumpalo::Bump;
    use tsfront_core::StringInterner;

    struct NameCollector(Vec<String>);

    impl<'a> AstVisitor<'a> for NameCollector {
        fn visit_identifier(&mut self, id: &Identifier<'a>) {
            self.0.push(id.name.to_string());
        }
    }

    fn ident<'a>(interner: &StringInterner, name: &'a str, pos: u32) -> Identifier<'a> {
        Identifier {
            data: NodeData::new(SyntaxKind::Identifier, pos, pos + name.len() as u32),
            name,
            symbol: interner.intern(name),
            original_keyword_kind: None,
        }
    }

    #[test]
    fn default_walk_reaches_nested_identifiers() {
        // let x = a + b;
        let arena = Bump::new();
        let interner = StringInterner::new();
        let left = arena.alloc(Expression::Identifier(ident(&interner, "a", 8)));
        let right = arena.alloc(Expression::Identifier(ident(&interner, "b", 12)));
        let sum = arena.alloc(Expression::Binary(BinaryExpression {
            data: NodeData::new(SyntaxKind::BinaryExpression, 8, 13),
            left,
            operator: SyntaxKind::PlusToken,
            right,
        }));
        let decls = arena.alloc_slice_fill_iter([VariableDeclaration {
            data: NodeData::new(SyntaxKind::VariableDeclaration, 4, 13),
            name: Pattern::Identifier(ident(&interner, "x", 4)),
            definite: false,
            type_annotation: None,
            initializer: Some(&*sum),
        }]);
        let stmt = Statement::VariableStatement(VariableStatement {
            data: NodeData::new(SyntaxKind::VariableStatement, 0, 14),
            declaration_list: VariableDeclarationList {
                data: NodeData::new(SyntaxKind::VariableDeclarationList, 0, 13),
                kind: VariableKind::Let,
                declarations: decls,
            },
        });

        let mut collector = NameCollector(Vec::new());
        collector.visit_statement(&stmt);
        assert_eq!(collector.0, ["x", "a", "b"]);
        assert_eq!(stmt.kind(), SyntaxKind::VariableStatement);
        assert_eq!(stmt.range().len(), 14);
    }
}
