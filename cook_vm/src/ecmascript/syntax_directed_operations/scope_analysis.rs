// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use oxc_ast::ast::{
    BindingIdentifier, ForStatementInit, ForStatementLeft, Function, Statement, SwitchCase,
    VariableDeclaration,
};
use oxc_ecmascript::BoundNames;

/// ### [8.2.7 Static Semantics: VarDeclaredNames](https://tc39.es/ecma262/#sec-static-semantics-vardeclarednames)
///
/// The syntax-directed operation VarDeclaredNames takes no arguments and
/// returns a List of Strings. Function declarations are not included: they
/// are collected by [`LexicallyScopedDeclarations`] of the statement list
/// they appear in.
pub(crate) trait VarDeclaredNames<'a> {
    fn var_declared_names<F: FnMut(&BindingIdentifier<'a>)>(&self, f: &mut F);
}

impl<'a> VarDeclaredNames<'a> for [Statement<'a>] {
    fn var_declared_names<F: FnMut(&BindingIdentifier<'a>)>(&self, f: &mut F) {
        // StatementList : StatementList StatementListItem
        // 1. Let names1 be VarDeclaredNames of StatementList.
        // 2. Let names2 be VarDeclaredNames of StatementListItem.
        // 3. Return the list-concatenation of names1 and names2.
        for statement in self {
            statement.var_declared_names(f);
        }
    }
}

impl<'a> VarDeclaredNames<'a> for Statement<'a> {
    fn var_declared_names<F: FnMut(&BindingIdentifier<'a>)>(&self, f: &mut F) {
        match self {
            // VariableStatement : var VariableDeclarationList ;
            // 1. Return BoundNames of VariableDeclarationList.
            Statement::VariableDeclaration(decl) => {
                if decl.kind.is_var() {
                    decl.bound_names(f);
                }
            }
            // Block : { StatementList }
            // 1. Return VarDeclaredNames of StatementList.
            Statement::BlockStatement(st) => st.body.var_declared_names(f),
            // IfStatement : if ( Expression ) Statement else Statement
            // 1. Let names1 be VarDeclaredNames of the first Statement.
            // 2. Let names2 be VarDeclaredNames of the second Statement.
            // 3. Return the list-concatenation of names1 and names2.
            Statement::IfStatement(st) => {
                st.consequent.var_declared_names(f);
                if let Some(alternate) = &st.alternate {
                    alternate.var_declared_names(f);
                }
            }
            // DoWhileStatement : do Statement while ( Expression ) ;
            // 1. Return VarDeclaredNames of Statement.
            Statement::DoWhileStatement(st) => st.body.var_declared_names(f),
            Statement::WhileStatement(st) => st.body.var_declared_names(f),
            // ForStatement : for ( var VariableDeclarationList ; Expressionopt ; Expressionopt ) Statement
            // 1. Let names1 be BoundNames of VariableDeclarationList.
            // 2. Let names2 be VarDeclaredNames of Statement.
            // 3. Return the list-concatenation of names1 and names2.
            Statement::ForStatement(st) => {
                if let Some(ForStatementInit::VariableDeclaration(decl)) = &st.init {
                    if decl.kind.is_var() {
                        decl.bound_names(f);
                    }
                }
                st.body.var_declared_names(f);
            }
            // ForInOfStatement : for ( var ForBinding in Expression ) Statement
            // 1. Let names1 be the BoundNames of ForBinding.
            // 2. Let names2 be VarDeclaredNames of Statement.
            // 3. Return the list-concatenation of names1 and names2.
            Statement::ForInStatement(st) => {
                if let ForStatementLeft::VariableDeclaration(decl) = &st.left {
                    if decl.kind.is_var() {
                        decl.bound_names(f);
                    }
                }
                st.body.var_declared_names(f);
            }
            Statement::ForOfStatement(st) => {
                if let ForStatementLeft::VariableDeclaration(decl) = &st.left {
                    if decl.kind.is_var() {
                        decl.bound_names(f);
                    }
                }
                st.body.var_declared_names(f);
            }
            // LabelledStatement : LabelIdentifier : LabelledItem
            // 1. Return the VarDeclaredNames of LabelledItem.
            Statement::LabeledStatement(st) => st.body.var_declared_names(f),
            // SwitchStatement : switch ( Expression ) CaseBlock
            // 1. Return the VarDeclaredNames of CaseBlock.
            Statement::SwitchStatement(st) => {
                for case in &st.cases {
                    case.consequent.var_declared_names(f);
                }
            }
            // TryStatement : try Block Catch Finally
            // 1. Let names1 be VarDeclaredNames of Block.
            // 2. Let names2 be VarDeclaredNames of Catch.
            // 3. Let names3 be VarDeclaredNames of Finally.
            // 4. Return the list-concatenation of names1, names2, and names3.
            Statement::TryStatement(st) => {
                st.block.body.var_declared_names(f);
                if let Some(handler) = &st.handler {
                    handler.body.body.var_declared_names(f);
                }
                if let Some(finalizer) = &st.finalizer {
                    finalizer.body.var_declared_names(f);
                }
            }
            // Statement : EmptyStatement, ExpressionStatement, ContinueStatement,
            //             BreakStatement, ReturnStatement, ThrowStatement,
            //             DebuggerStatement
            // 1. Return a new empty List.
            _ => {}
        }
    }
}

/// A declaration that is scoped to the statement list it appears in.
#[derive(Debug, Clone, Copy)]
pub(crate) enum LexicallyScopedDeclaration<'a> {
    Variable(&'a VariableDeclaration<'a>),
    Function(&'a Function<'a>),
}

/// ### [8.2.6 Static Semantics: LexicallyScopedDeclarations](https://tc39.es/ecma262/#sec-static-semantics-lexicallyscopeddeclarations)
///
/// Every function declaration is block scoped, including those at the top
/// level of a function body where they behave like var declarations with an
/// initial value.
pub(crate) trait LexicallyScopedDeclarations<'a> {
    fn lexically_scoped_declarations<F: FnMut(LexicallyScopedDeclaration<'a>)>(
        &'a self,
        f: &mut F,
    );
}

impl<'a> LexicallyScopedDeclarations<'a> for [Statement<'a>] {
    fn lexically_scoped_declarations<F: FnMut(LexicallyScopedDeclaration<'a>)>(
        &'a self,
        f: &mut F,
    ) {
        for statement in self {
            match statement {
                // StatementListItem : Declaration
                // 1. Return a List whose sole element is DeclarationPart of Declaration.
                Statement::VariableDeclaration(decl) if decl.kind.is_lexical() => {
                    f(LexicallyScopedDeclaration::Variable(decl));
                }
                Statement::FunctionDeclaration(function) => {
                    f(LexicallyScopedDeclaration::Function(function));
                }
                // StatementListItem : Statement
                // 2. Return a new empty List.
                _ => {}
            }
        }
    }
}

impl<'a> LexicallyScopedDeclarations<'a> for [SwitchCase<'a>] {
    fn lexically_scoped_declarations<F: FnMut(LexicallyScopedDeclaration<'a>)>(
        &'a self,
        f: &mut F,
    ) {
        // CaseBlock : { CaseClausesopt DefaultClause CaseClausesopt }
        // 1. If the first CaseClauses is present, let declarations1 be the
        //    LexicallyScopedDeclarations of the first CaseClauses.
        // 3. Let declarations2 be LexicallyScopedDeclarations of DefaultClause.
        // 4. If the second CaseClauses is present, let declarations3 be the
        //    LexicallyScopedDeclarations of the second CaseClauses.
        // 6. Return the list-concatenation of declarations1, declarations2,
        //    and declarations3.
        for case in self {
            case.consequent.lexically_scoped_declarations(f);
        }
    }
}

#[cfg(test)]
mod test {
    use oxc_allocator::Allocator;
    use oxc_parser::Parser;
    use oxc_span::SourceType;

    use super::*;

    fn with_body(source: &str, test: impl FnOnce(&[Statement])) {
        let allocator = Allocator::default();
        let program = Parser::new(&allocator, source, SourceType::mjs()).parse().program;
        test(&program.body);
    }

    #[test]
    fn var_names_are_collected_through_blocks() {
        with_body(
            "var a; { var b; let c; } if (x) { var d } else var e; for (var f of g) { var h }\
             try { var i } catch { var j } finally { var k } switch (x) { case 1: var l }\
             function m() { var n }",
            |body| {
                let mut names = Vec::new();
                body.var_declared_names(&mut |identifier| names.push(identifier.name.as_str().to_owned()));
                assert_eq!(names, ["a", "b", "d", "e", "f", "h", "i", "j", "k", "l"]);
            },
        );
    }

    #[test]
    fn lexical_declarations_stay_at_their_level() {
        with_body("let a; const b = 1; var c; function d() {} { let e; }", |body| {
            let mut kinds = Vec::new();
            body.lexically_scoped_declarations(&mut |declaration| {
                kinds.push(match declaration {
                    LexicallyScopedDeclaration::Variable(decl) => {
                        let mut names = String::new();
                        decl.bound_names(&mut |identifier| names.push_str(&identifier.name));
                        names
                    }
                    LexicallyScopedDeclaration::Function(function) => {
                        format!("{}()", function.id.as_ref().unwrap().name)
                    }
                });
            });
            assert_eq!(kinds, ["a", "b", "d()"]);
        });
    }
}
