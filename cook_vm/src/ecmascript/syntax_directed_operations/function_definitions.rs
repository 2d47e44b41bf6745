// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ### [15.2 Function Definitions](https://tc39.es/ecma262/#sec-function-definitions)
//! ### [15.3 Arrow Function Definitions](https://tc39.es/ecma262/#sec-arrow-function-definitions)

use oxc_ast::ast::{ArrowFunctionExpression, Expression, Function};

use crate::{
    ecmascript::{
        builtins::ecmascript_function::{FunctionCode, ordinary_function_create},
        execution::{Agent, Environment, JsResult, new_declarative_environment},
        types::{CompletionRecord, CompletionType, JsString, Object, ObjectKind, Value},
    },
    engine::{Evaluate, evaluate_statement_list, function_declaration_instantiation},
};

/// ### [15.2.4 Runtime Semantics: InstantiateOrdinaryFunctionObject](https://tc39.es/ecma262/#sec-runtime-semantics-instantiateordinaryfunctionobject)
///
/// Creates the closure of a function declaration over `env`.
pub(crate) fn instantiate_ordinary_function_object<'a>(
    agent: &mut Agent<'a>,
    function: &'a Function<'a>,
    env: Environment,
) -> Object {
    // FunctionDeclaration : function BindingIdentifier ( FormalParameters ) { FunctionBody }
    // 1. Let name be StringValue of BindingIdentifier.
    // FunctionDeclaration : function ( FormalParameters ) { FunctionBody }
    // 1. Let F be OrdinaryFunctionCreate(..., "default").
    let name = function
        .id
        .as_ref()
        .map_or("default", |id| id.name.as_str());
    // 3. Let F be OrdinaryFunctionCreate(%Function.prototype%, sourceText,
    //    FormalParameters, FunctionBody, NON-LEXICAL-THIS, env, privateEnv).
    // 4. Perform SetFunctionName(F, name).
    // 5. Perform MakeConstructor(F).
    // 6. Return F.
    ordinary_function_create(agent, FunctionCode::Function(function), env, JsString::from(name))
}

/// ### [15.2.5 Runtime Semantics: InstantiateOrdinaryFunctionExpression](https://tc39.es/ecma262/#sec-runtime-semantics-instantiateordinaryfunctionexpression)
pub(crate) fn instantiate_ordinary_function_expression<'a>(
    agent: &mut Agent<'a>,
    function: &'a Function<'a>,
) -> Object {
    let code = FunctionCode::Function(function);
    // 1. Let env be the LexicalEnvironment of the running execution context.
    let env = agent.current_lexical_environment();
    let Some(id) = &function.id else {
        // FunctionExpression : function ( FormalParameters ) { FunctionBody }
        // 1. If name is not present, set name to "".
        // 5. Let closure be OrdinaryFunctionCreate(%Function.prototype%,
        //    sourceText, FormalParameters, FunctionBody, NON-LEXICAL-THIS,
        //    env, privateEnv).
        return ordinary_function_create(agent, code, env, JsString::from(""));
    };
    // FunctionExpression : function BindingIdentifier ( FormalParameters ) { FunctionBody }
    // 2. Let name be StringValue of BindingIdentifier.
    let name = id.name.as_str();
    // 3. Let outerEnv be the running execution context's LexicalEnvironment.
    // 4. Let funcEnv be NewDeclarativeEnvironment(outerEnv).
    let func_env = new_declarative_environment(agent, Some(env));
    // 5. Perform ! funcEnv.CreateImmutableBinding(name, false).
    func_env.create_immutable_binding(agent, name, false);
    // 8. Let closure be OrdinaryFunctionCreate(%Function.prototype%,
    //    sourceText, FormalParameters, FunctionBody, NON-LEXICAL-THIS,
    //    funcEnv, privateEnv).
    // 9. Perform SetFunctionName(closure, name).
    let closure = ordinary_function_create(agent, code, func_env, JsString::from(name));
    // 11. Perform ! funcEnv.InitializeBinding(name, closure).
    func_env.initialize_binding(agent, name, Value::Object(closure));
    // 12. Return closure.
    closure
}

/// ### [15.3.4 Runtime Semantics: InstantiateArrowFunctionExpression](https://tc39.es/ecma262/#sec-runtime-semantics-instantiatearrowfunctionexpression)
pub(crate) fn instantiate_arrow_function_expression<'a>(
    agent: &mut Agent<'a>,
    arrow: &'a ArrowFunctionExpression<'a>,
) -> Object {
    // 1. If name is not present, set name to "".
    // 2. Let env be the LexicalEnvironment of the running execution context.
    let env = agent.current_lexical_environment();
    // 5. Let closure be OrdinaryFunctionCreate(%Function.prototype%,
    //    sourceText, ArrowParameters, ConciseBody, LEXICAL-THIS, env,
    //    privateEnv).
    // 6. Perform SetFunctionName(closure, name).
    // 7. Return closure.
    ordinary_function_create(agent, FunctionCode::Arrow(arrow), env, JsString::from(""))
}

/// ### [8.4.3 Static Semantics: IsAnonymousFunctionDefinition ( expr )](https://tc39.es/ecma262/#sec-isanonymousfunctiondefinition)
pub(crate) fn is_anonymous_function_definition(expression: &Expression) -> bool {
    match expression.get_inner_expression() {
        Expression::ArrowFunctionExpression(_) => true,
        Expression::FunctionExpression(function) => function.id.is_none(),
        _ => false,
    }
}

/// ### [8.4.5 Runtime Semantics: NamedEvaluation](https://tc39.es/ecma262/#sec-runtime-semantics-namedevaluation)
///
/// Evaluates `expression` and, if it is an anonymous function definition,
/// names the resulting closure `name`.
pub(crate) fn named_evaluation<'a>(
    agent: &mut Agent<'a>,
    expression: &'a Expression<'a>,
    name: &str,
) -> JsResult<Value> {
    let value = expression.evaluate(agent)?;
    if is_anonymous_function_definition(expression) {
        if let Value::Object(closure) = &value {
            set_function_name(agent, *closure, name);
        }
    }
    Ok(value)
}

/// ### [10.2.9 SetFunctionName ( F, name \[ , prefix \] )](https://tc39.es/ecma262/#sec-setfunctionname)
fn set_function_name(agent: &mut Agent, f: Object, name: &str) {
    if let ObjectKind::ECMAScriptFunction(data) = &mut agent[f].kind {
        if data.initial_name.is_empty() {
            data.initial_name = JsString::from(name);
        }
    }
}

/// ### [10.2.1.4 OrdinaryCallEvaluateBody ( F, argumentsList )](https://tc39.es/ecma262/#sec-ordinarycallevaluatebody)
///
/// Runs in the callee context pushed by `[[Call]]`. Returns the value of a
/// return completion, or undefined if the body completes normally.
pub(crate) fn evaluate_body<'a>(
    agent: &mut Agent<'a>,
    code: FunctionCode<'a>,
    arguments_list: &[Value],
) -> JsResult<Value> {
    // 1. Perform ? FunctionDeclarationInstantiation(functionObject, argumentsList).
    function_declaration_instantiation(agent, code, arguments_list)?;
    match code {
        // ConciseBody : ExpressionBody
        // 2. Let exprRef be ? Evaluation of ExpressionBody.
        // 3. Let exprValue be ? GetValue(exprRef).
        // 4. Return Completion Record { [[Type]]: RETURN, [[Value]]: exprValue, [[Target]]: EMPTY }.
        FunctionCode::Arrow(arrow) if arrow.expression => {
            let Some(expression) = arrow.get_expression() else {
                unreachable!("expression body without an expression")
            };
            expression.evaluate(agent)
        }
        // FunctionBody : FunctionStatementList
        // 2. Return ? Evaluation of FunctionStatementList.
        FunctionCode::Arrow(arrow) => completion_value(evaluate_statement_list(
            agent,
            &arrow.body.statements,
        )?),
        FunctionCode::Function(function) => {
            let Some(body) = &function.body else {
                return Ok(Value::Undefined);
            };
            completion_value(evaluate_statement_list(agent, &body.statements)?)
        }
    }
}

fn completion_value(completion: CompletionRecord) -> JsResult<Value> {
    Ok(match completion.kind {
        CompletionType::Return => completion.value.unwrap_or_default(),
        _ => Value::Undefined,
    })
}
