// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ### [10.2 ECMAScript Function Objects](https://tc39.es/ecma262/#sec-ecmascript-function-objects)

use oxc_allocator::UnstableAddress;
use oxc_ast::ast::{ArrowFunctionExpression, BindingPattern, FormalParameters, Function};
use oxc_span::Span;

use crate::{
    ecmascript::{
        abstract_operations::operations_on_objects::ordinary_object_create,
        execution::{
            Agent, ECMAScriptCodeEvaluationState, Environment, ExecutionContext, JsResult,
            RealmIdentifier, new_declarative_environment,
        },
        syntax_directed_operations::function_definitions::evaluate_body,
        types::{JsString, Object, ObjectHeapData, ObjectKind, Value},
    },
    heap::CreateHeapData,
};

/// ### \[\[ECMAScriptCode]]
///
/// The parsed function, borrowed from the allocator the source was parsed
/// into.
#[derive(Debug, Clone, Copy)]
pub(crate) enum FunctionCode<'a> {
    Function(&'a Function<'a>),
    Arrow(&'a ArrowFunctionExpression<'a>),
}

impl<'a> FunctionCode<'a> {
    /// ### \[\[FormalParameters]]
    pub(crate) fn formal_parameters(self) -> &'a FormalParameters<'a> {
        match self {
            FunctionCode::Function(function) => &function.params,
            FunctionCode::Arrow(arrow) => &arrow.params,
        }
    }

    pub(crate) fn span(self) -> Span {
        match self {
            FunctionCode::Function(function) => function.span,
            FunctionCode::Arrow(arrow) => arrow.span,
        }
    }

    /// Key of the function's scope in the precooked scope map.
    pub(crate) fn address(self) -> oxc_allocator::Address {
        match self {
            FunctionCode::Function(function) => function.unstable_address(),
            FunctionCode::Arrow(arrow) => arrow.unstable_address(),
        }
    }
}

#[derive(Debug)]
pub struct ECMAScriptFunctionHeapData<'a> {
    /// ### \[\[Environment]]
    ///
    /// The Environment Record that the function was closed over.
    pub(crate) environment: Environment,

    /// ### \[\[Realm]]
    pub(crate) realm: RealmIdentifier,

    pub(crate) code: FunctionCode<'a>,

    /// ### \[\[InitialName]]
    ///
    /// Set by SetFunctionName when the function is created.
    pub(crate) initial_name: JsString,
}

impl ECMAScriptFunctionHeapData<'_> {
    pub(crate) fn name(&self) -> &str {
        &self.initial_name
    }

    pub(crate) fn is_arrow(&self) -> bool {
        matches!(self.code, FunctionCode::Arrow(_))
    }

    /// ### [15.1.5 Static Semantics: ExpectedArgumentCount](https://tc39.es/ecma262/#sec-static-semantics-expectedargumentcount)
    pub(crate) fn length(&self) -> usize {
        let params = self.code.formal_parameters();
        params
            .items
            .iter()
            .take_while(|param| {
                param.initializer.is_none()
                    && !matches!(param.pattern, BindingPattern::AssignmentPattern(_))
            })
            .count()
    }
}

/// ### [10.2.3 OrdinaryFunctionCreate ( functionPrototype, sourceText, ParameterList, Body, thisMode, env, privateEnv )](https://tc39.es/ecma262/#sec-ordinaryfunctioncreate)
///
/// Creates the function object and performs SetFunctionName on it. Every
/// function is strict and none has its own `this`.
pub(crate) fn ordinary_function_create<'a>(
    agent: &mut Agent<'a>,
    code: FunctionCode<'a>,
    env: Environment,
    name: JsString,
) -> Object {
    let data = ECMAScriptFunctionHeapData {
        // 13. Set F.[[Environment]] to env.
        environment: env,
        // 16. Set F.[[Realm]] to the current Realm Record.
        realm: agent.current_realm_id(),
        // 5. Set F.[[FormalParameters]] to ParameterList.
        // 6. Set F.[[ECMAScriptCode]] to Body.
        code,
        initial_name: name,
    };
    // 23. Return F.
    agent
        .heap
        .create(ObjectHeapData::new(ObjectKind::ECMAScriptFunction(data)))
}

/// ### [10.2.1 \[\[Call\]\] ( thisArgument, argumentsList )](https://tc39.es/ecma262/#sec-ecmascript-function-objects-call-thisargument-argumentslist)
///
/// `thisArgument` is not observable: `this` is unsupported.
pub(crate) fn internal_call<'a>(
    agent: &mut Agent<'a>,
    f: Object,
    arguments_list: &[Value],
) -> JsResult<Value> {
    let ObjectKind::ECMAScriptFunction(data) = &agent[f].kind else {
        unreachable!("[[Call]] of a non-ECMAScript function")
    };
    let (code, realm, environment) = (data.code, data.realm, data.environment);
    if let FunctionCode::Function(function) = code {
        if let Some(hooks) = agent[realm].hooks.clone() {
            hooks.before_call(function);
        }
    }
    if agent.options.print_internals {
        eprintln!("Calling {}", f.function_name(agent));
    }
    // 1. Let callerContext be the running execution context.
    // 2. Let calleeContext be PrepareForOrdinaryCall(F, undefined).
    prepare_for_ordinary_call(agent, realm, environment);
    // 5. Let result be Completion(OrdinaryCallEvaluateBody(F, argumentsList)).
    let result = evaluate_body(agent, code, arguments_list);
    // 6. Remove calleeContext from the execution context stack and restore
    //    callerContext as the running execution context.
    agent.execution_context_stack.pop();
    // 7. If result is a return completion, return result.[[Value]].
    // 8. ReturnIfAbrupt(result).
    // 9. Return undefined.
    result
}

/// ### [10.2.2 \[\[Construct\]\] ( argumentsList, newTarget )](https://tc39.es/ecma262/#sec-ecmascript-function-objects-construct-argumentslist-newtarget)
///
/// The body runs without a `this` binding; an object result replaces the
/// freshly allocated object.
pub(crate) fn internal_construct(
    agent: &mut Agent,
    f: Object,
    arguments_list: &[Value],
) -> JsResult<Value> {
    let result = internal_call(agent, f, arguments_list)?;
    // 10. If result is a return completion, then
    //     a. If result.[[Value]] is an Object, return result.[[Value]].
    if result.is_object() {
        return Ok(result);
    }
    // 12. Let thisBinding be ? constructorEnv.GetThisBinding().
    // 13. Return thisBinding.
    Ok(Value::Object(ordinary_object_create(agent)))
}

/// ### [10.2.1.1 PrepareForOrdinaryCall ( F, newTarget )](https://tc39.es/ecma262/#sec-prepareforordinarycall)
fn prepare_for_ordinary_call(
    agent: &mut Agent,
    callee_realm: RealmIdentifier,
    environment: Environment,
) {
    // 7. Let localEnv be NewFunctionEnvironment(F, newTarget).
    let local_env = new_declarative_environment(agent, Some(environment));
    // 2. Let calleeContext be a new ECMAScript code execution context.
    let callee_context = ExecutionContext {
        // 8. Set the LexicalEnvironment of calleeContext to localEnv.
        ecmascript_code: ECMAScriptCodeEvaluationState {
            lexical_environment: local_env,
        },
        // 5. Set the Realm of calleeContext to calleeRealm.
        realm: callee_realm,
    };
    // 12. Push calleeContext onto the execution context stack; calleeContext
    //     is now the running execution context.
    agent.execution_context_stack.push(callee_context);
}

/// ### [20.2.3.5 Function.prototype.toString ( )](https://tc39.es/ecma262/#sec-function.prototype.tostring)
pub(crate) fn function_source_text(agent: &Agent, o: Object) -> String {
    match &agent[o].kind {
        // 2. If func is an Object, func has a [[SourceText]] internal slot,
        //    func.[[SourceText]] is a sequence of Unicode code points, and
        //    HostHasSourceTextAvailable(func) is true, then
        //    a. Return CodePointsToString(func.[[SourceText]]).
        ObjectKind::ECMAScriptFunction(data) => {
            let source_text = agent[data.realm].source_text;
            data.code.span().source_text(source_text).to_string()
        }
        // 3. If func is a built-in function object, return an
        //    implementation-defined String source code representation of
        //    func.
        ObjectKind::BuiltinFunction(data) => {
            format!("function {}() {{ [native code] }}", data.name)
        }
        _ => unreachable!("function object expected"),
    }
}
