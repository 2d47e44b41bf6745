// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ### [14.7.5 The for-in, for-of, and for-await-of Statements](https://tc39.es/ecma262/#sec-for-in-and-for-of-statements)

use oxc_ast::ast;
use oxc_ecmascript::BoundNames;

use super::{
    Evaluate, assignment::assign_to_target, binding_initialization::binding_initialization,
};
use crate::ecmascript::{
    abstract_operations::{
        operations_on_iterator_objects::{IteratorRecord, get_iterator, iterator_step_value},
        operations_on_objects::{enumerable_own_properties, enumerable_properties_kind},
    },
    builtins::array::create_array_from_list,
    execution::{Agent, JsResult, new_declarative_environment},
    types::{CompletionRecord, Value},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IterationKind {
    Enumerate,
    Iterate,
}

impl<'a> Evaluate<'a> for ast::ForInStatement<'a> {
    type Output = CompletionRecord;

    /// ### [14.7.5.5 Runtime Semantics: ForInOfLoopEvaluation](https://tc39.es/ecma262/#sec-runtime-semantics-forinofloopevaluation)
    fn evaluate(&'a self, agent: &mut Agent<'a>) -> JsResult<CompletionRecord> {
        // ForInOfStatement : for ( LeftHandSideExpression in Expression ) Statement
        // 1. Let keyResult be ? ForIn/OfHeadEvaluation(« », Expression, ENUMERATE).
        // 2. Return ? ForIn/OfBodyEvaluation(LeftHandSideExpression,
        //    Statement, keyResult, ENUMERATE, ASSIGNMENT, labelSet).
        let Some(mut key_result) =
            for_in_of_head_evaluation(agent, &self.left, &self.right, IterationKind::Enumerate)?
        else {
            return Ok(CompletionRecord::normal(Value::Undefined));
        };
        for_in_of_body_evaluation(agent, &self.left, &self.body, &mut key_result)
    }
}

impl<'a> Evaluate<'a> for ast::ForOfStatement<'a> {
    type Output = CompletionRecord;

    /// ### [14.7.5.5 Runtime Semantics: ForInOfLoopEvaluation](https://tc39.es/ecma262/#sec-runtime-semantics-forinofloopevaluation)
    fn evaluate(&'a self, agent: &mut Agent<'a>) -> JsResult<CompletionRecord> {
        // ForInOfStatement : for ( LeftHandSideExpression of AssignmentExpression ) Statement
        // 1. Let keyResult be ? ForIn/OfHeadEvaluation(« », AssignmentExpression, ITERATE).
        let Some(mut key_result) =
            for_in_of_head_evaluation(agent, &self.left, &self.right, IterationKind::Iterate)?
        else {
            unreachable!("for-of never breaks early in its head")
        };
        // 2. Return ? ForIn/OfBodyEvaluation(LeftHandSideExpression,
        //    Statement, keyResult, ITERATE, ASSIGNMENT, labelSet).
        for_in_of_body_evaluation(agent, &self.left, &self.body, &mut key_result)
    }
}

/// ### [14.7.5.6 ForIn/OfHeadEvaluation ( uninitializedBoundNames, expr, iterationKind )](https://tc39.es/ecma262/#sec-runtime-semantics-forinofheadevaluation)
///
/// Returns `None` when a for-in loop has nothing to enumerate.
fn for_in_of_head_evaluation<'a>(
    agent: &mut Agent<'a>,
    left: &'a ast::ForStatementLeft<'a>,
    expr: &'a ast::Expression<'a>,
    iteration_kind: IterationKind,
) -> JsResult<Option<IteratorRecord>> {
    // 1. Let oldEnv be the running execution context's LexicalEnvironment.
    let old_env = agent.current_lexical_environment();
    // 2. If uninitializedBoundNames is not empty, then
    let lexical_declaration = match left {
        ast::ForStatementLeft::VariableDeclaration(declaration)
            if declaration.kind.is_lexical() =>
        {
            Some(declaration)
        }
        _ => None,
    };
    if let Some(declaration) = lexical_declaration {
        // b. Let newEnv be NewDeclarativeEnvironment(oldEnv).
        let new_env = new_declarative_environment(agent, Some(old_env));
        // c. For each String name of uninitializedBoundNames, do
        //    i. Perform ! newEnv.CreateMutableBinding(name, false).
        declaration.bound_names(&mut |identifier| {
            new_env.create_mutable_binding(agent, &identifier.name, false);
        });
        // d. Set the running execution context's LexicalEnvironment to newEnv.
        agent.set_current_lexical_environment(new_env);
    }
    // 3. Let exprRef be Completion(Evaluation of expr).
    // 4. Set the running execution context's LexicalEnvironment to oldEnv.
    // 5. Let exprValue be ? GetValue(? exprRef).
    let expr_value = expr.evaluate(agent);
    agent.set_current_lexical_environment(old_env);
    let expr_value = expr_value?;
    match iteration_kind {
        // 6. If iterationKind is ENUMERATE, then
        IterationKind::Enumerate => {
            // a. If exprValue is either undefined or null, then
            //    i. Return Completion Record { [[Type]]: BREAK, [[Value]]: EMPTY, [[Target]]: EMPTY }.
            let keys = match &expr_value {
                Value::Undefined | Value::Null => return Ok(None),
                // b. Let obj be ! ToObject(exprValue).
                // c. Let iterator be EnumerateObjectProperties(obj).
                Value::Object(obj) => {
                    enumerable_own_properties::<enumerable_properties_kind::Key>(agent, *obj)
                }
                Value::String(string) => (0..string.utf16_len())
                    .map(|index| Value::from(index.to_string()))
                    .collect(),
                _ => Vec::new(),
            };
            // d. Let nextMethod be ! GetV(iterator, "next").
            // e. Return the Iterator Record { [[Iterator]]: iterator, [[NextMethod]]: nextMethod, [[Done]]: false }.
            let array = create_array_from_list(agent, keys);
            Ok(Some(IteratorRecord::Array {
                array,
                next_index: 0,
            }))
        }
        // 7. Else,
        //    b. Return ? GetIterator(exprValue, iteratorKind).
        IterationKind::Iterate => get_iterator(agent, &expr_value).map(Some),
    }
}

/// ### [14.7.5.7 ForIn/OfBodyEvaluation ( lhs, stmt, iteratorRecord, iterationKind, lhsKind, labelSet )](https://tc39.es/ecma262/#sec-runtime-semantics-forin-div-ofbodyevaluation-lhs-stmt-iterator-lhskind-labelset)
fn for_in_of_body_evaluation<'a>(
    agent: &mut Agent<'a>,
    lhs: &'a ast::ForStatementLeft<'a>,
    statement: &'a ast::Statement<'a>,
    iterator_record: &mut IteratorRecord,
) -> JsResult<CompletionRecord> {
    // 1. If iteratorKind is not present, set iteratorKind to SYNC.
    // 2. Let oldEnv be the running execution context's LexicalEnvironment.
    let old_env = agent.current_lexical_environment();
    // 3. Let V be undefined.
    let mut v = Value::Undefined;
    // 4. Let destructuring be IsDestructuring of lhs.
    // 6. Repeat,
    loop {
        // a. Let nextResult be ? Call(iteratorRecord.[[NextMethod]], iteratorRecord.[[Iterator]]).
        // d. If done is true, return V.
        // e. Let nextValue be ? IteratorValue(nextResult).
        let Some(next_value) = iterator_step_value(agent, iterator_record) else {
            return Ok(CompletionRecord::normal(v));
        };
        let status = match lhs {
            // f. If lhsKind is either ASSIGNMENT or VAR-BINDING, then
            //    i. If destructuring is true, then
            //       1. If lhsKind is ASSIGNMENT, then
            //          a. Let status be Completion(DestructuringAssignmentEvaluation
            //             of assignmentPattern with argument nextValue).
            //       2. Else,
            //          b. Let status be Completion(BindingInitialization of lhs
            //             with arguments nextValue and undefined).
            ast::ForStatementLeft::VariableDeclaration(declaration)
                if !declaration.kind.is_lexical() =>
            {
                binding_initialization(
                    agent,
                    &declaration.declarations[0].id,
                    next_value,
                    None,
                )
            }
            // g. Else,
            //    i. Assert: lhsKind is LEXICAL-BINDING.
            //    ii. Assert: lhs is a ForDeclaration.
            ast::ForStatementLeft::VariableDeclaration(declaration) => {
                // iii. Let iterationEnv be NewDeclarativeEnvironment(oldEnv).
                let iteration_env = new_declarative_environment(agent, Some(old_env));
                // iv. Perform ForDeclarationBindingInstantiation of lhs with argument iterationEnv.
                let is_const = declaration.kind.is_const();
                declaration.bound_names(&mut |identifier| {
                    if is_const {
                        iteration_env.create_immutable_binding(agent, &identifier.name, true);
                    } else {
                        iteration_env.create_mutable_binding(agent, &identifier.name, false);
                    }
                });
                // v. Set the running execution context's LexicalEnvironment to iterationEnv.
                agent.set_current_lexical_environment(iteration_env);
                // vii. Else,
                //      1. Let status be Completion(ForDeclarationBindingInitialization
                //         of lhs with arguments nextValue and iterationEnv).
                binding_initialization(
                    agent,
                    &declaration.declarations[0].id,
                    next_value,
                    Some(iteration_env),
                )
            }
            _ => {
                let Some(target) = lhs.as_assignment_target() else {
                    unreachable!("for-in/of head is a declaration or an assignment target")
                };
                assign_to_target(agent, target, next_value)
            }
        };
        // i. If status is an abrupt completion, then
        //    i. Set the running execution context's LexicalEnvironment to oldEnv.
        //    iv. Return ? status.
        // j. Let result be Completion(Evaluation of stmt).
        let result = status.and_then(|()| statement.evaluate(agent));
        // k. Set the running execution context's LexicalEnvironment to oldEnv.
        agent.set_current_lexical_environment(old_env);
        let result = result?;
        // l. If LoopContinues(result, labelSet) is false, then
        //    i. If iterationKind is ENUMERATE, then
        //       1. Return ? UpdateEmpty(result, V).
        if !result.loop_continues() {
            return Ok(result.update_empty(Some(v)));
        }
        // m. If result.[[Value]] is not EMPTY, set V to result.[[Value]].
        if let Some(value) = result.value {
            v = value;
        }
    }
}
