// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::rc::Rc;

use ahash::{AHashMap, AHashSet};
use oxc_allocator::{Address, UnstableAddress};
use oxc_ast::ast::{
    Argument, ArrayExpressionElement, ArrowFunctionExpression, AssignmentTarget,
    AssignmentTargetMaybeDefault, AssignmentTargetProperty, BindingPattern, BlockStatement,
    CatchClause, ChainElement, Expression, ForStatementInit, ForStatementLeft, FormalParameters,
    Function, MemberExpression, ObjectPropertyKind, PropertyKey, PropertyKind,
    SimpleAssignmentTarget, Statement, SwitchStatement, VariableDeclaration,
};
use oxc_diagnostics::OxcDiagnostic;
use oxc_ecmascript::{BoundNames, IsSimpleParameterList};
use oxc_span::{GetSpan, Span};

use super::{
    DeclarationFlags, PrecookOptions, PrecookResult, PrecookRoot, Scope, ScopeFlags,
    unsupported_expression, unsupported_statement,
};
use crate::ecmascript::syntax_directed_operations::scope_analysis::{
    LexicallyScopedDeclaration, LexicallyScopedDeclarations, VarDeclaredNames,
};

pub(super) struct Analyzer<'a> {
    options: PrecookOptions,
    scopes: AHashMap<Address, Rc<Scope<'a>>>,
    /// Innermost scope last.
    stack: Vec<Rc<Scope<'a>>>,
    free_variables: Vec<&'a str>,
    seen_free_variables: AHashSet<&'a str>,
    errors: Vec<OxcDiagnostic>,
    warnings: Vec<OxcDiagnostic>,
}

impl<'a> Analyzer<'a> {
    pub(super) fn new(options: PrecookOptions) -> Self {
        Self {
            options,
            scopes: AHashMap::default(),
            stack: Vec::new(),
            free_variables: Vec::new(),
            seen_free_variables: AHashSet::default(),
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub(super) fn analyze(
        mut self,
        root: PrecookRoot<'a>,
    ) -> Result<PrecookResult<'a>, Vec<OxcDiagnostic>> {
        let mut root_scope = Scope::new(ScopeFlags::GLOBAL);
        if let PrecookRoot::Function(function) = root {
            if let Some(id) = &function.id {
                root_scope.declare(id.name.as_str(), DeclarationFlags::FUNCTION);
            }
        }
        let root_scope = Rc::new(root_scope);
        self.stack.push(root_scope.clone());
        match root {
            PrecookRoot::Function(function) => self.visit_function(function),
            PrecookRoot::Expression(expression) => self.visit_expression(expression),
        }
        self.stack.pop();

        if !self.errors.is_empty() {
            return Err(self.errors);
        }
        Ok(PrecookResult {
            scopes: self.scopes,
            free_variables: self.free_variables,
            root_scope,
            warnings: self.warnings,
        })
    }

    fn enter(&mut self, scope: Scope<'a>, address: Option<Address>) {
        let scope = Rc::new(scope);
        if let Some(address) = address {
            self.scopes.insert(address, scope.clone());
        }
        self.stack.push(scope);
    }

    fn leave(&mut self) {
        self.stack.pop();
    }

    fn reference(&mut self, name: &'a str) {
        if self.stack.iter().rev().any(|scope| scope.has(name)) {
            return;
        }
        if self.seen_free_variables.insert(name) {
            self.free_variables.push(name);
        }
    }

    fn unsupported(&mut self, kind: &str, span: Span) {
        self.warnings.push(
            OxcDiagnostic::warn(format!("Unsupported node type `{kind}`")).with_label(span),
        );
    }

    fn check_function_kind(&mut self, is_async: bool, is_generator: bool, span: Span) {
        if is_async {
            self.errors
                .push(OxcDiagnostic::error("Async function is not allowed").with_label(span));
        }
        if is_generator {
            self.errors
                .push(OxcDiagnostic::error("Generator function is not allowed").with_label(span));
        }
    }

    /// The scope of a function body: parameters, top-level var and lexical
    /// declarations, and the functions to instantiate on entry.
    fn function_scope(params: &FormalParameters<'a>, body: &'a [Statement<'a>]) -> Scope<'a> {
        let mut flags = ScopeFlags::FUNCTION;
        if !params.is_simple_parameter_list() {
            flags = flags | ScopeFlags::PARAMETER_EXPRESSIONS;
        }
        let mut scope = Scope::new(flags);
        params.bound_names(&mut |id| scope.declare(id.name.as_str(), DeclarationFlags::PARAM));
        body.var_declared_names(&mut |id| scope.declare(id.name.as_str(), DeclarationFlags::VAR));
        Self::declare_lexically_scoped(&mut scope, body);
        scope
    }

    fn declare_lexically_scoped<T>(scope: &mut Scope<'a>, code: &'a T)
    where
        T: LexicallyScopedDeclarations<'a> + ?Sized,
    {
        code.lexically_scoped_declarations(&mut |declaration| match declaration {
            LexicallyScopedDeclaration::Variable(decl) => {
                let flags = if decl.kind.is_const() {
                    DeclarationFlags::CONST
                } else {
                    DeclarationFlags::LET
                };
                decl.bound_names(&mut |id| scope.declare(id.name.as_str(), flags));
            }
            LexicallyScopedDeclaration::Function(function) => scope.hoist_function(function),
        });
    }

    fn visit_function(&mut self, function: &'a Function<'a>) {
        self.check_function_kind(function.r#async, function.generator, function.span);
        let Some(body) = &function.body else {
            // An overload signature.
            return;
        };
        // The name of a function expression is visible inside it only.
        let named_expression = function.is_expression() && function.id.is_some();
        if named_expression {
            let mut scope = Scope::new(ScopeFlags::FUNCTION);
            if let Some(id) = &function.id {
                scope.declare(id.name.as_str(), DeclarationFlags::FUNCTION);
            }
            self.enter(scope, None);
        }
        self.visit_function_parts(
            &function.params,
            &body.statements,
            function.unstable_address(),
        );
        if named_expression {
            self.leave();
        }
    }

    fn visit_arrow_function(&mut self, arrow: &'a ArrowFunctionExpression<'a>) {
        self.check_function_kind(arrow.r#async, false, arrow.span);
        if self.options.expression_only && !arrow.expression {
            self.errors.push(
                OxcDiagnostic::error(
                    "Only an `Expression` is allowed in `ArrowFunctionExpression`'s body",
                )
                .with_label(arrow.body.span),
            );
        }
        self.visit_function_parts(&arrow.params, &arrow.body.statements, arrow.unstable_address());
    }

    fn visit_function_parts(
        &mut self,
        params: &'a FormalParameters<'a>,
        body: &'a [Statement<'a>],
        address: Address,
    ) {
        // Parameter expressions cannot see declarations of the body.
        let mut parameter_scope = Scope::new(ScopeFlags::FUNCTION);
        params.bound_names(&mut |id| parameter_scope.declare(id.name.as_str(), DeclarationFlags::PARAM));
        self.enter(parameter_scope, None);
        for param in &params.items {
            self.visit_binding_pattern(&param.pattern);
            if let Some(initializer) = &param.initializer {
                self.visit_expression(initializer);
            }
        }
        if let Some(rest) = &params.rest {
            self.visit_binding_pattern(&rest.rest.argument);
        }
        self.leave();

        self.enter(Self::function_scope(params, body), Some(address));
        self.visit_statements(body);
        self.leave();
    }

    fn visit_statements(&mut self, statements: &'a [Statement<'a>]) {
        for statement in statements {
            self.visit_statement(statement);
        }
    }

    fn visit_statement(&mut self, statement: &'a Statement<'a>) {
        if let Some(kind) = unsupported_statement(statement) {
            self.unsupported(kind, statement.span());
            return;
        }
        match statement {
            Statement::BlockStatement(block) => self.visit_block(block),
            Statement::VariableDeclaration(decl) => self.visit_variable_declaration(decl),
            Statement::FunctionDeclaration(function) => self.visit_function(function),
            Statement::ExpressionStatement(st) => self.visit_expression(&st.expression),
            Statement::IfStatement(st) => {
                self.visit_expression(&st.test);
                self.visit_statement(&st.consequent);
                if let Some(alternate) = &st.alternate {
                    self.visit_statement(alternate);
                }
            }
            Statement::DoWhileStatement(st) => {
                self.visit_statement(&st.body);
                self.visit_expression(&st.test);
            }
            Statement::WhileStatement(st) => {
                self.visit_expression(&st.test);
                self.visit_statement(&st.body);
            }
            Statement::ForStatement(st) => {
                let lexical = match &st.init {
                    Some(ForStatementInit::VariableDeclaration(decl)) if decl.kind.is_lexical() => {
                        Some(decl)
                    }
                    _ => None,
                };
                if let Some(decl) = lexical {
                    self.enter(Self::loop_head_scope(decl), Some(st.unstable_address()));
                }
                match &st.init {
                    Some(ForStatementInit::VariableDeclaration(decl)) => {
                        self.visit_variable_declaration(decl);
                    }
                    Some(init) => {
                        if let Some(expression) = init.as_expression() {
                            self.visit_expression(expression);
                        }
                    }
                    None => {}
                }
                if let Some(test) = &st.test {
                    self.visit_expression(test);
                }
                if let Some(update) = &st.update {
                    self.visit_expression(update);
                }
                self.visit_statement(&st.body);
                if lexical.is_some() {
                    self.leave();
                }
            }
            Statement::ForInStatement(st) => {
                self.visit_for_in_of(&st.left, &st.right, &st.body, st.unstable_address());
            }
            Statement::ForOfStatement(st) => {
                self.visit_for_in_of(&st.left, &st.right, &st.body, st.unstable_address());
            }
            Statement::ReturnStatement(st) => {
                if let Some(argument) = &st.argument {
                    self.visit_expression(argument);
                }
            }
            Statement::ThrowStatement(st) => self.visit_expression(&st.argument),
            Statement::SwitchStatement(st) => self.visit_switch(st),
            Statement::TryStatement(st) => {
                self.visit_block(&st.block);
                if let Some(handler) = &st.handler {
                    self.visit_catch_clause(handler);
                }
                if let Some(finalizer) = &st.finalizer {
                    self.visit_block(finalizer);
                }
            }
            Statement::BreakStatement(_)
            | Statement::ContinueStatement(_)
            | Statement::EmptyStatement(_) => {}
            // Type-only declarations.
            _ => {}
        }
    }

    fn visit_block(&mut self, block: &'a BlockStatement<'a>) {
        let mut scope = Scope::new(ScopeFlags::BLOCK);
        Self::declare_lexically_scoped(&mut scope, block.body.as_slice());
        self.enter(scope, Some(block.unstable_address()));
        self.visit_statements(&block.body);
        self.leave();
    }

    fn visit_switch(&mut self, switch: &'a SwitchStatement<'a>) {
        self.visit_expression(&switch.discriminant);
        let mut scope = Scope::new(ScopeFlags::BLOCK);
        Self::declare_lexically_scoped(&mut scope, switch.cases.as_slice());
        self.enter(scope, Some(switch.unstable_address()));
        for case in &switch.cases {
            if let Some(test) = &case.test {
                self.visit_expression(test);
            }
            self.visit_statements(&case.consequent);
        }
        self.leave();
    }

    fn visit_catch_clause(&mut self, clause: &'a CatchClause<'a>) {
        let mut scope = Scope::new(ScopeFlags::BLOCK);
        if let Some(param) = &clause.param {
            param
                .pattern
                .bound_names(&mut |id| scope.declare(id.name.as_str(), DeclarationFlags::PARAM));
        }
        self.enter(scope, Some(clause.unstable_address()));
        if let Some(param) = &clause.param {
            self.visit_binding_pattern(&param.pattern);
        }
        self.visit_block(&clause.body);
        self.leave();
    }

    fn loop_head_scope(decl: &VariableDeclaration<'a>) -> Scope<'a> {
        let flags = if decl.kind.is_const() {
            DeclarationFlags::CONST
        } else {
            DeclarationFlags::LET
        };
        let mut scope = Scope::new(ScopeFlags::BLOCK);
        decl.bound_names(&mut |id| scope.declare(id.name.as_str(), flags));
        scope
    }

    fn visit_for_in_of(
        &mut self,
        left: &'a ForStatementLeft<'a>,
        right: &'a Expression<'a>,
        body: &'a Statement<'a>,
        address: Address,
    ) {
        let lexical = match left {
            ForStatementLeft::VariableDeclaration(decl) if decl.kind.is_lexical() => Some(decl),
            _ => None,
        };
        // The iterated expression is evaluated with the loop bindings in
        // their temporal dead zone.
        if let Some(decl) = lexical {
            self.enter(Self::loop_head_scope(decl), Some(address));
        }
        self.visit_expression(right);
        match left {
            ForStatementLeft::VariableDeclaration(decl) => self.visit_variable_declaration(decl),
            target => {
                if let Some(target) = target.as_assignment_target() {
                    self.visit_assignment_target(target);
                }
            }
        }
        self.visit_statement(body);
        if lexical.is_some() {
            self.leave();
        }
    }

    fn visit_variable_declaration(&mut self, decl: &'a VariableDeclaration<'a>) {
        if decl.kind.is_var() && self.options.rules.no_var {
            self.errors.push(
                OxcDiagnostic::error(
                    "Var declaration is not recommended, use `let` or `const` instead",
                )
                .with_label(decl.span),
            );
        }
        for declarator in &decl.declarations {
            self.visit_binding_pattern(&declarator.id);
            if let Some(init) = &declarator.init {
                self.visit_expression(init);
            }
        }
    }

    /// Names in a binding pattern are declarations. Only default values and
    /// computed keys are visited.
    fn visit_binding_pattern(&mut self, pattern: &'a BindingPattern<'a>) {
        match pattern {
            BindingPattern::BindingIdentifier(_) => {}
            BindingPattern::ObjectPattern(pattern) => {
                for property in &pattern.properties {
                    if property.computed {
                        self.visit_property_key(&property.key);
                    }
                    self.visit_binding_pattern(&property.value);
                }
                if let Some(rest) = &pattern.rest {
                    self.visit_binding_pattern(&rest.argument);
                }
            }
            BindingPattern::ArrayPattern(pattern) => {
                for element in pattern.elements.iter().flatten() {
                    self.visit_binding_pattern(element);
                }
                if let Some(rest) = &pattern.rest {
                    self.visit_binding_pattern(&rest.argument);
                }
            }
            BindingPattern::AssignmentPattern(pattern) => {
                self.visit_binding_pattern(&pattern.left);
                self.visit_expression(&pattern.right);
            }
        }
    }

    fn visit_property_key(&mut self, key: &'a PropertyKey<'a>) {
        if let Some(expression) = key.as_expression() {
            self.visit_expression(expression);
        }
    }

    fn visit_assignment_target(&mut self, target: &'a AssignmentTarget<'a>) {
        match target {
            AssignmentTarget::ArrayAssignmentTarget(pattern) => {
                for element in pattern.elements.iter().flatten() {
                    self.visit_assignment_target_maybe_default(element);
                }
                if let Some(rest) = &pattern.rest {
                    self.visit_assignment_target(&rest.target);
                }
            }
            AssignmentTarget::ObjectAssignmentTarget(pattern) => {
                for property in &pattern.properties {
                    match property {
                        AssignmentTargetProperty::AssignmentTargetPropertyIdentifier(property) => {
                            self.reference(property.binding.name.as_str());
                            if let Some(init) = &property.init {
                                self.visit_expression(init);
                            }
                        }
                        AssignmentTargetProperty::AssignmentTargetPropertyProperty(property) => {
                            if property.computed {
                                self.visit_property_key(&property.name);
                            }
                            self.visit_assignment_target_maybe_default(&property.binding);
                        }
                    }
                }
                if let Some(rest) = &pattern.rest {
                    self.visit_assignment_target(&rest.target);
                }
            }
            target => {
                if let Some(target) = target.as_simple_assignment_target() {
                    self.visit_simple_assignment_target(target);
                }
            }
        }
    }

    fn visit_assignment_target_maybe_default(
        &mut self,
        target: &'a AssignmentTargetMaybeDefault<'a>,
    ) {
        match target {
            AssignmentTargetMaybeDefault::AssignmentTargetWithDefault(target) => {
                self.visit_assignment_target(&target.binding);
                self.visit_expression(&target.init);
            }
            target => {
                if let Some(target) = target.as_assignment_target() {
                    self.visit_assignment_target(target);
                }
            }
        }
    }

    fn visit_simple_assignment_target(&mut self, target: &'a SimpleAssignmentTarget<'a>) {
        match target {
            SimpleAssignmentTarget::AssignmentTargetIdentifier(id) => {
                self.reference(id.name.as_str());
            }
            SimpleAssignmentTarget::TSAsExpression(it) => self.visit_expression(&it.expression),
            SimpleAssignmentTarget::TSSatisfiesExpression(it) => {
                self.visit_expression(&it.expression);
            }
            SimpleAssignmentTarget::TSNonNullExpression(it) => {
                self.visit_expression(&it.expression);
            }
            SimpleAssignmentTarget::TSTypeAssertion(it) => self.visit_expression(&it.expression),
            target => {
                if let Some(member) = target.as_member_expression() {
                    self.visit_member_expression(member);
                }
            }
        }
    }

    fn visit_member_expression(&mut self, member: &'a MemberExpression<'a>) {
        match member {
            MemberExpression::ComputedMemberExpression(it) => {
                self.visit_expression(&it.object);
                self.visit_expression(&it.expression);
            }
            MemberExpression::StaticMemberExpression(it) => self.visit_expression(&it.object),
            MemberExpression::PrivateFieldExpression(it) => {
                self.unsupported("PrivateName", it.field.span);
            }
        }
    }

    fn visit_arguments(&mut self, arguments: &'a [Argument<'a>]) {
        for argument in arguments {
            match argument {
                Argument::SpreadElement(spread) => self.visit_expression(&spread.argument),
                argument => {
                    if let Some(expression) = argument.as_expression() {
                        self.visit_expression(expression);
                    }
                }
            }
        }
    }

    fn visit_expression(&mut self, expression: &'a Expression<'a>) {
        if let Some(kind) = unsupported_expression(expression, self.options.expression_only) {
            self.unsupported(kind, expression.span());
            return;
        }
        match expression {
            Expression::Identifier(id) => self.reference(id.name.as_str()),
            Expression::BooleanLiteral(_)
            | Expression::NullLiteral(_)
            | Expression::NumericLiteral(_)
            | Expression::StringLiteral(_) => {}
            Expression::TemplateLiteral(template) => {
                for expression in &template.expressions {
                    self.visit_expression(expression);
                }
            }
            Expression::TaggedTemplateExpression(tagged) => {
                self.visit_expression(&tagged.tag);
                for expression in &tagged.quasi.expressions {
                    self.visit_expression(expression);
                }
            }
            Expression::ArrayExpression(array) => {
                for element in &array.elements {
                    match element {
                        ArrayExpressionElement::SpreadElement(spread) => {
                            self.visit_expression(&spread.argument);
                        }
                        ArrayExpressionElement::Elision(_) => {}
                        element => {
                            if let Some(expression) = element.as_expression() {
                                self.visit_expression(expression);
                            }
                        }
                    }
                }
            }
            Expression::ObjectExpression(object) => {
                for property in &object.properties {
                    match property {
                        ObjectPropertyKind::ObjectProperty(property) => {
                            if property.kind != PropertyKind::Init {
                                self.warnings.push(
                                    OxcDiagnostic::warn(format!(
                                        "Unsupported property kind `{}`",
                                        if property.kind == PropertyKind::Get { "get" } else { "set" }
                                    ))
                                    .with_label(property.span),
                                );
                                continue;
                            }
                            if property.computed {
                                self.visit_property_key(&property.key);
                            }
                            self.visit_expression(&property.value);
                        }
                        ObjectPropertyKind::SpreadProperty(spread) => {
                            self.visit_expression(&spread.argument);
                        }
                    }
                }
            }
            Expression::ArrowFunctionExpression(arrow) => self.visit_arrow_function(arrow),
            Expression::FunctionExpression(function) => self.visit_function(function),
            Expression::AssignmentExpression(assignment) => {
                self.visit_assignment_target(&assignment.left);
                self.visit_expression(&assignment.right);
            }
            Expression::UpdateExpression(update) => {
                self.visit_simple_assignment_target(&update.argument);
            }
            Expression::UnaryExpression(unary) => self.visit_expression(&unary.argument),
            Expression::BinaryExpression(binary) => {
                self.visit_expression(&binary.left);
                self.visit_expression(&binary.right);
            }
            Expression::LogicalExpression(logical) => {
                self.visit_expression(&logical.left);
                self.visit_expression(&logical.right);
            }
            Expression::ConditionalExpression(conditional) => {
                self.visit_expression(&conditional.test);
                self.visit_expression(&conditional.consequent);
                self.visit_expression(&conditional.alternate);
            }
            Expression::SequenceExpression(sequence) => {
                for expression in &sequence.expressions {
                    self.visit_expression(expression);
                }
            }
            Expression::CallExpression(call) => {
                self.visit_expression(&call.callee);
                self.visit_arguments(&call.arguments);
            }
            Expression::NewExpression(new) => {
                self.visit_expression(&new.callee);
                self.visit_arguments(&new.arguments);
            }
            Expression::ChainExpression(chain) => match &chain.expression {
                ChainElement::CallExpression(call) => {
                    self.visit_expression(&call.callee);
                    self.visit_arguments(&call.arguments);
                }
                ChainElement::TSNonNullExpression(it) => self.visit_expression(&it.expression),
                element => {
                    if let Some(member) = element.as_member_expression() {
                        self.visit_member_expression(member);
                    }
                }
            },
            Expression::ComputedMemberExpression(it) => {
                self.visit_expression(&it.object);
                self.visit_expression(&it.expression);
            }
            Expression::StaticMemberExpression(it) => self.visit_expression(&it.object),
            Expression::ParenthesizedExpression(it) => self.visit_expression(&it.expression),
            Expression::TSAsExpression(it) => self.visit_expression(&it.expression),
            Expression::TSSatisfiesExpression(it) => self.visit_expression(&it.expression),
            Expression::TSTypeAssertion(it) => self.visit_expression(&it.expression),
            Expression::TSNonNullExpression(it) => self.visit_expression(&it.expression),
            Expression::TSInstantiationExpression(it) => self.visit_expression(&it.expression),
            // Rejected by `unsupported_expression`.
            _ => {}
        }
    }
}
