// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Static analysis of a cook before it is evaluated.
//!
//! A single traversal computes the [`Scope`] of every node that opens one,
//! the names the code reads without declaring them, and the diagnostics
//! for syntax that cannot be cooked.

mod analyzer;
mod scope;

use std::rc::Rc;

use ahash::AHashMap;
use oxc_allocator::{Address, Allocator};
use oxc_ast::ast::{Expression, Function, Statement, VariableDeclarationKind};
use oxc_diagnostics::OxcDiagnostic;

pub use scope::{DeclarationFlags, Scope, ScopeFlags};

use self::analyzer::Analyzer;
use super::source_code::{SourceCode, parse_function};
use crate::ecmascript::syntax_directed_operations::{expression_type_name, statement_type_name};

/// Opt-in lint rules enforced during analysis.
#[derive(Debug, Default, Clone, Copy)]
pub struct Rules {
    /// Reject `var` declarations.
    pub no_var: bool,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct PrecookOptions {
    /// Only accept the expression forms allowed inside `<% %>` templates.
    pub expression_only: bool,
    pub rules: Rules,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct PrecookFunctionOptions {
    /// Parse the source as TypeScript and drop its type-only statements.
    pub typescript: bool,
    pub rules: Rules,
}

/// The node a cook starts from.
#[derive(Debug, Clone, Copy)]
pub enum PrecookRoot<'a> {
    Function(&'a Function<'a>),
    Expression(&'a Expression<'a>),
}

#[derive(Debug)]
pub struct PrecookResult<'a> {
    /// Static scope of every scope-opening node, keyed by node address.
    pub scopes: AHashMap<Address, Rc<Scope<'a>>>,
    /// Names read or assigned without a declaration, in order of first use.
    pub free_variables: Vec<&'a str>,
    /// The scope enclosing the root: it holds the name of a root function.
    pub root_scope: Rc<Scope<'a>>,
    /// Unsupported syntax found during analysis. Evaluation throws a
    /// SyntaxError if it reaches one of these nodes.
    pub warnings: Vec<OxcDiagnostic>,
}

#[derive(Debug)]
pub struct PrecookedFunction<'a> {
    pub function: &'a Function<'a>,
    pub source: SourceCode<'a>,
    pub precooked: PrecookResult<'a>,
}

/// Analyzes `root`. Every error found is reported, not only the first.
pub fn precook<'a>(
    root: PrecookRoot<'a>,
    options: PrecookOptions,
) -> Result<PrecookResult<'a>, Vec<OxcDiagnostic>> {
    Analyzer::new(options).analyze(root)
}

/// Parses `source_text` as a single function declaration and analyzes it.
pub fn precook_function<'a>(
    allocator: &'a Allocator,
    source_text: &'a str,
    options: PrecookFunctionOptions,
) -> Result<PrecookedFunction<'a>, Vec<OxcDiagnostic>> {
    let parsed = parse_function(allocator, source_text, options.typescript)?;
    let precooked = precook(
        PrecookRoot::Function(parsed.function),
        PrecookOptions {
            expression_only: false,
            rules: options.rules,
        },
    )?;
    Ok(PrecookedFunction {
        function: parsed.function,
        source: parsed.source,
        precooked,
    })
}

/// The ESTree type of an expression that cannot be cooked, or `None` if it
/// can. Template expressions are restricted further than function bodies.
pub(crate) fn unsupported_expression(
    expression: &Expression,
    expression_only: bool,
) -> Option<&'static str> {
    match expression {
        Expression::ThisExpression(_)
        | Expression::Super(_)
        | Expression::ClassExpression(_)
        | Expression::YieldExpression(_)
        | Expression::AwaitExpression(_)
        | Expression::ImportExpression(_)
        | Expression::MetaProperty(_)
        | Expression::PrivateFieldExpression(_)
        | Expression::PrivateInExpression(_)
        | Expression::RegExpLiteral(_)
        | Expression::BigIntLiteral(_)
        | Expression::JSXElement(_)
        | Expression::JSXFragment(_)
        | Expression::V8IntrinsicExpression(_) => Some(expression_type_name(expression)),
        Expression::AssignmentExpression(_)
        | Expression::UpdateExpression(_)
        | Expression::FunctionExpression(_)
            if expression_only =>
        {
            Some(expression_type_name(expression))
        }
        _ => None,
    }
}

/// The ESTree type of a statement that cannot be cooked, or `None` if it
/// can. Type-only TypeScript statements are supported: they do nothing.
pub(crate) fn unsupported_statement(statement: &Statement) -> Option<&'static str> {
    match statement {
        Statement::LabeledStatement(_)
        | Statement::WithStatement(_)
        | Statement::DebuggerStatement(_)
        | Statement::ClassDeclaration(_)
        | Statement::TSEnumDeclaration(_)
        | Statement::TSModuleDeclaration(_)
        | Statement::TSGlobalDeclaration(_)
        | Statement::TSImportEqualsDeclaration(_)
        | Statement::TSExportAssignment(_)
        | Statement::TSNamespaceExportDeclaration(_)
        | Statement::ImportDeclaration(_)
        | Statement::ExportAllDeclaration(_)
        | Statement::ExportDefaultDeclaration(_)
        | Statement::ExportNamedDeclaration(_) => Some(statement_type_name(statement)),
        Statement::BreakStatement(st) if st.label.is_some() => Some(statement_type_name(statement)),
        Statement::ContinueStatement(st) if st.label.is_some() => {
            Some(statement_type_name(statement))
        }
        Statement::ForOfStatement(st) if st.r#await => Some(statement_type_name(statement)),
        Statement::VariableDeclaration(decl)
            if matches!(
                decl.kind,
                VariableDeclarationKind::Using | VariableDeclarationKind::AwaitUsing
            ) =>
        {
            Some(statement_type_name(statement))
        }
        _ => None,
    }
}

#[cfg(test)]
mod test {
    use oxc_allocator::{Allocator, UnstableAddress};
    use oxc_ast::ast::Statement;

    use super::*;
    use crate::ecmascript::scripts_and_modules::source_code::parse_expression;

    fn precook_source<'a>(
        allocator: &'a Allocator,
        source: &'a str,
        rules: Rules,
    ) -> Result<PrecookedFunction<'a>, Vec<OxcDiagnostic>> {
        precook_function(
            allocator,
            source,
            PrecookFunctionOptions {
                typescript: false,
                rules,
            },
        )
    }

    fn messages(errors: &[OxcDiagnostic]) -> Vec<String> {
        errors.iter().map(|error| error.message.to_string()).collect()
    }

    #[test]
    fn collects_free_variables_in_order_of_first_use() {
        let allocator = Allocator::default();
        let precooked = precook_source(
            &allocator,
            "function test(a) { let b = c + a; d = b; return [c, e, test, (f) => f + g]; }",
            Rules::default(),
        )
        .unwrap()
        .precooked;
        assert_eq!(precooked.free_variables, ["c", "d", "e", "g"]);
        assert_eq!(
            precooked.root_scope.get("test"),
            Some(DeclarationFlags::FUNCTION)
        );
    }

    #[test]
    fn function_scope_holds_params_vars_lexicals_and_functions() {
        let allocator = Allocator::default();
        let precooked = precook_source(
            &allocator,
            "function test(a, b = 1) { var c; { var d; let e; } const f = 2; function a() {} }",
            Rules::default(),
        )
        .unwrap();
        let scope = &precooked.precooked.scopes[&precooked.function.unstable_address()];
        assert!(scope.flags.contains(ScopeFlags::FUNCTION | ScopeFlags::PARAMETER_EXPRESSIONS));
        assert_eq!(scope.get("a"), Some(DeclarationFlags::PARAM | DeclarationFlags::FUNCTION));
        assert_eq!(scope.get("b"), Some(DeclarationFlags::PARAM));
        assert_eq!(scope.get("c"), Some(DeclarationFlags::VAR));
        assert_eq!(scope.get("d"), Some(DeclarationFlags::VAR));
        assert_eq!(scope.get("e"), None);
        assert_eq!(scope.get("f"), Some(DeclarationFlags::CONST));
        assert_eq!(scope.functions().len(), 1);
    }

    #[test]
    fn blocks_hold_their_lexical_declarations() {
        let allocator = Allocator::default();
        let precooked = precook_source(
            &allocator,
            "function test() { { let a; function b() {} var c; } }",
            Rules::default(),
        )
        .unwrap();
        let Some(Statement::BlockStatement(block)) =
            precooked.function.body.as_ref().and_then(|body| body.statements.first())
        else {
            panic!("expected a block");
        };
        let scope = &precooked.precooked.scopes[&block.unstable_address()];
        assert_eq!(scope.flags, ScopeFlags::BLOCK);
        assert_eq!(scope.get("a"), Some(DeclarationFlags::LET));
        assert_eq!(scope.get("b"), Some(DeclarationFlags::FUNCTION));
        assert!(!scope.has("c"));
        assert_eq!(scope.functions().len(), 1);
    }

    #[test]
    fn later_function_declarations_win() {
        let allocator = Allocator::default();
        let precooked = precook_source(
            &allocator,
            "function test() { function a() { return 1 } function a() { return 2 } }",
            Rules::default(),
        )
        .unwrap();
        let scope = &precooked.precooked.scopes[&precooked.function.unstable_address()];
        assert_eq!(scope.functions().len(), 1);
        let body = scope.functions()[0].body.as_ref().unwrap();
        assert_eq!(&precooked.source.source_text[body.span.start as usize..body.span.end as usize], "{ return 2 }");
    }

    #[test]
    fn rejects_async_and_generator_functions() {
        let allocator = Allocator::default();
        let errors = precook_source(
            &allocator,
            "function test() { const a = async () => 1; function* b() {} }",
            Rules::default(),
        )
        .unwrap_err();
        assert_eq!(
            messages(&errors),
            ["Async function is not allowed", "Generator function is not allowed"]
        );
    }

    #[test]
    fn no_var_rule_rejects_var_declarations() {
        let allocator = Allocator::default();
        let source = "function test() { var a = 1; for (var b of []) {} return a; }";
        let errors = precook_source(&allocator, source, Rules { no_var: true }).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(
            errors[0].message,
            "Var declaration is not recommended, use `let` or `const` instead"
        );
        assert!(precook_source(&allocator, source, Rules::default()).is_ok());
    }

    #[test]
    fn expression_only_mode_restricts_node_kinds() {
        let allocator = Allocator::default();
        let parsed = parse_expression(&allocator, "[a, b => b + 1, (c = 1), this]", false).unwrap();
        let precooked = precook(
            PrecookRoot::Expression(parsed.expression),
            PrecookOptions {
                expression_only: true,
                rules: Rules::default(),
            },
        )
        .unwrap();
        assert_eq!(precooked.free_variables, ["a"]);
        assert_eq!(
            messages(&precooked.warnings),
            [
                "Unsupported node type `AssignmentExpression`",
                "Unsupported node type `ThisExpression`"
            ]
        );

        let parsed = parse_expression(&allocator, "() => { return 1 }", false).unwrap();
        let errors = precook(
            PrecookRoot::Expression(parsed.expression),
            PrecookOptions {
                expression_only: true,
                rules: Rules::default(),
            },
        )
        .unwrap_err();
        assert_eq!(
            messages(&errors),
            ["Only an `Expression` is allowed in `ArrowFunctionExpression`'s body"]
        );
    }

    #[test]
    fn lexical_loop_heads_see_their_own_bindings() {
        let allocator = Allocator::default();
        let precooked = precook_source(
            &allocator,
            "function test() { for (const a of a) {} for (let i = 0; i < n; i++) {} }",
            Rules::default(),
        )
        .unwrap()
        .precooked;
        assert_eq!(precooked.free_variables, ["n"]);
    }

    #[test]
    fn warns_about_unsupported_statements() {
        let allocator = Allocator::default();
        let precooked = precook_source(
            &allocator,
            "function test() { outer: for (;;) { break outer; } debugger; }",
            Rules::default(),
        )
        .unwrap()
        .precooked;
        assert_eq!(
            messages(&precooked.warnings),
            [
                "Unsupported node type `LabeledStatement`",
                "Unsupported node type `DebuggerStatement`"
            ]
        );
    }
}
