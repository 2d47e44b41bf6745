// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use oxc_ast::ast::BindingPattern;

use super::{Evaluate, binding_initialization::binding_initialization};
use crate::ecmascript::{
    builtins::{array::create_array_from_list, ecmascript_function::FunctionCode},
    execution::{Agent, JsResult, new_declarative_environment},
    scripts_and_modules::precook::{DeclarationFlags, ScopeFlags},
    syntax_directed_operations::function_definitions::{
        instantiate_ordinary_function_object, is_anonymous_function_definition, named_evaluation,
    },
    types::Value,
};

/// ### [10.2.11 FunctionDeclarationInstantiation ( func, argumentsList )](https://tc39.es/ecma262/#sec-functiondeclarationinstantiation)
///
/// Binds parameters, hoisted variables, lexical declarations and hoisted
/// functions in the environment of the running function context. No
/// `arguments` object is created.
pub(crate) fn function_declaration_instantiation<'a>(
    agent: &mut Agent<'a>,
    code: FunctionCode<'a>,
    arguments_list: &[Value],
) -> JsResult<()> {
    let scope = agent[agent.current_realm_id()].scope(code.address());
    // 1. Let calleeContext be the running execution context.
    // 2. Let code be func.[[ECMAScriptCode]].
    // 5. Let formals be func.[[FormalParameters]].
    let formals = code.formal_parameters();
    // 20. Else,
    //     a. NOTE: Mapped argument objects are only provided for non-strict
    //        functions that don't have a rest parameter, any parameter
    //        default value initializers, or any destructured parameters.
    //     b. Let env be the LexicalEnvironment of calleeContext.
    let env = agent.current_lexical_environment();
    // 21. For each String paramName of parameterNames, do
    //     a. Let alreadyDeclared be ! env.HasBinding(paramName).
    //     c. If alreadyDeclared is false, then
    //        i. Perform ! env.CreateMutableBinding(paramName, false).
    for (name, flags) in scope.declarations() {
        if flags.contains(DeclarationFlags::PARAM) && !env.has_binding(agent, name) {
            env.create_mutable_binding(agent, name, false);
        }
    }
    // 26. Perform ? IteratorBindingInitialization of formals with arguments
    //     iteratorRecord and env.
    for (index, param) in formals.items.iter().enumerate() {
        let mut value = arguments_list.get(index).cloned().unwrap_or_default();
        // SingleNameBinding : BindingIdentifier Initializer
        // 3. If Initializer is present and v is undefined, then
        if let Some(initializer) = &param.initializer {
            if value.is_undefined() {
                value = match &param.pattern {
                    // a. If IsAnonymousFunctionDefinition(Initializer) is true, then
                    //    i. Set v to ? NamedEvaluation of Initializer with argument bindingId.
                    BindingPattern::BindingIdentifier(identifier)
                        if is_anonymous_function_definition(initializer) =>
                    {
                        named_evaluation(agent, initializer, &identifier.name)?
                    }
                    // b. Else,
                    //    i. Let defaultValue be ? Evaluation of Initializer.
                    //    ii. Set v to ? GetValue(defaultValue).
                    _ => initializer.evaluate(agent)?,
                };
            }
        }
        binding_initialization(agent, &param.pattern, value, Some(env))?;
    }
    // FunctionRestParameter : BindingRestElement
    if let Some(rest) = &formals.rest {
        // 2. Let A be CreateArrayFromList(the remaining arguments).
        let remaining = arguments_list
            .get(formals.items.len()..)
            .map(<[Value]>::to_vec)
            .unwrap_or_default();
        let array = create_array_from_list(agent, remaining);
        binding_initialization(agent, &rest.rest.argument, Value::Object(array), Some(env))?;
    }

    let has_parameter_expressions = scope.flags.contains(ScopeFlags::PARAMETER_EXPRESSIONS);
    let var_env = if !has_parameter_expressions {
        // 27. If hasParameterExpressions is false, then
        //     a. NOTE: Only a single Environment Record is needed for the
        //        parameters and top-level vars.
        //     b. Let instantiatedVarNames be a copy of the List parameterBindings.
        //     c. For each element n of varNames, do
        //        i. If instantiatedVarNames does not contain n, then
        //           2. Perform ! env.CreateMutableBinding(n, false).
        //           3. Perform ! env.InitializeBinding(n, undefined).
        for (name, flags) in scope.declarations() {
            if is_var_scoped(flags) && !flags.contains(DeclarationFlags::PARAM) {
                env.create_mutable_binding(agent, name, false);
                env.initialize_binding(agent, name, Value::Undefined);
            }
        }
        //     d. Let varEnv be env.
        env
    } else {
        // 28. Else,
        //     a. NOTE: A separate Environment Record is needed to ensure that
        //        closures created by expressions in the formal parameter
        //        list do not have visibility of declarations in the function
        //        body.
        //     b. Let varEnv be NewDeclarativeEnvironment(env).
        let var_env = new_declarative_environment(agent, Some(env));
        //     e. For each element n of varNames, do
        for (name, flags) in scope.declarations() {
            if !is_var_scoped(flags) {
                continue;
            }
            //    i. If instantiatedVarNames does not contain n, then
            //       2. Perform ! varEnv.CreateMutableBinding(n, false).
            var_env.create_mutable_binding(agent, name, false);
            //       3. If parameterBindings does not contain n, or if
            //          functionNames contains n, then
            //          a. Let initialValue be undefined.
            //       4. Else,
            //          a. Let initialValue be ! env.GetBindingValue(n, false).
            let initial_value = if !flags.contains(DeclarationFlags::PARAM)
                || flags.contains(DeclarationFlags::FUNCTION)
            {
                Value::Undefined
            } else {
                env.get_binding_value(agent, name, false)?
            };
            //       5. Perform ! varEnv.InitializeBinding(n, initialValue).
            var_env.initialize_binding(agent, name, initial_value);
        }
        var_env
    };

    // 30. If strict is false, then
    //     ...
    // 31. Else,
    //     a. Let lexEnv be varEnv.
    let lex_env = var_env;
    // 33. Set the LexicalEnvironment of calleeContext to lexEnv.
    agent.set_current_lexical_environment(lex_env);
    // 34. Let lexDeclarations be the LexicallyScopedDeclarations of code.
    // 35. For each element d of lexDeclarations, do
    //     b. For each element dn of the BoundNames of d, do
    for (name, flags) in scope.declarations() {
        if flags.contains(DeclarationFlags::CONST) {
            // i. If IsConstantDeclaration of d is true, then
            //    1. Perform ! lexEnv.CreateImmutableBinding(dn, true).
            lex_env.create_immutable_binding(agent, name, true);
        } else if flags.contains(DeclarationFlags::LET) {
            // ii. Else,
            //     1. Perform ! lexEnv.CreateMutableBinding(dn, false).
            lex_env.create_mutable_binding(agent, name, false);
        }
    }
    // 36. Let privateEnv be the PrivateEnvironment of calleeContext.
    // 37. For each Parse Node f of functionsToInitialize, do
    for function in scope.functions() {
        // a. Let fn be the sole element of the BoundNames of f.
        let Some(id) = &function.id else {
            continue;
        };
        // b. Let fo be InstantiateFunctionObject of f with arguments lexEnv and privateEnv.
        let fo = instantiate_ordinary_function_object(agent, function, lex_env);
        // c. Perform ! varEnv.SetMutableBinding(fn, fo, false).
        var_env.set_mutable_binding(agent, &id.name, Value::Object(fo), false)?;
    }
    // 38. Return unused.
    Ok(())
}

/// Names a function body binds in its variable environment.
fn is_var_scoped(flags: DeclarationFlags) -> bool {
    flags.contains(DeclarationFlags::VAR) || flags.contains(DeclarationFlags::FUNCTION)
}
