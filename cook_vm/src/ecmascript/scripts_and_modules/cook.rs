// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Entry points for evaluating precooked code.

use std::rc::Rc;

use ahash::AHashMap;
use oxc_ast::AstKind;

use super::{
    precook::{PrecookOptions, PrecookRoot, Rules, precook},
    source_code::{SourceCode, diagnostic_message},
};
use crate::{
    ecmascript::{
        abstract_operations::{operations_on_objects::call_function, testing_and_comparison::is_callable},
        execution::{
            Agent, CookHooks, ECMAScriptCodeEvaluationState, ExceptionType, ExecutionContext,
            JsResult, Realm, new_declarative_environment,
        },
        syntax_directed_operations::function_definitions::instantiate_ordinary_function_object,
        types::Value,
    },
    engine::{Evaluate, before_evaluate},
    heap::{CreateHeapData, heap_gc::maybe_heap_gc},
};

#[derive(Debug, Default, Clone)]
pub struct CookOptions {
    pub rules: Rules,
    /// Values offered to the cooked code, by name. Only the names the code
    /// actually reads are bound.
    pub global_variables: Vec<(String, Value)>,
    pub hooks: Option<Rc<dyn CookHooks>>,
}

/// Picks the provided values of the free variables. A name provided more
/// than once takes its last value; names that are not provided are left
/// out, so reading them throws a ReferenceError.
pub fn supply<'g>(free_variables: &[&str], provided: &'g [(String, Value)]) -> Vec<(&'g str, Value)> {
    let table: AHashMap<&str, &'g (String, Value)> = provided
        .iter()
        .map(|entry| (entry.0.as_str(), entry))
        .collect();
    free_variables
        .iter()
        .filter_map(|name| table.get(name).copied())
        .map(|(name, value)| (name.as_str(), value.clone()))
        .collect()
}

/// Evaluates `root` in a fresh realm whose only globals are the supplied
/// ones.
///
/// A function root evaluates to the function object, ready to be called
/// with [`invoke`]; an expression root evaluates to its value. Any syntax
/// the analysis rejects is thrown as a SyntaxError.
pub fn cook<'a>(
    agent: &mut Agent<'a>,
    root: PrecookRoot<'a>,
    source: &SourceCode<'a>,
    options: CookOptions,
) -> JsResult<Value> {
    let expression_only = matches!(root, PrecookRoot::Expression(_));
    let precooked = match precook(
        root,
        PrecookOptions {
            expression_only,
            rules: options.rules,
        },
    ) {
        Ok(precooked) => precooked,
        Err(errors) => {
            let message = errors
                .first()
                .map_or_else(
                    || "Invalid source".to_owned(),
                    |error| diagnostic_message(error, source.source_text),
                );
            return Err(agent.throw_exception(ExceptionType::SyntaxError, message));
        }
    };

    let global_env = new_declarative_environment(agent, None);
    let supplied = supply(&precooked.free_variables, &options.global_variables);
    if agent.options.print_internals {
        let names = supplied.iter().map(|(name, _)| *name).collect::<Vec<_>>();
        eprintln!("Supplied globals: {names:?}");
    }
    for (name, value) in supplied {
        global_env.create_immutable_binding(agent, name, true);
        global_env.initialize_binding(agent, name, value);
    }

    let realm = agent.heap.create(Realm {
        source_text: source.source_text,
        global_env,
        scopes: precooked.scopes,
        pipeline_operators: source.pipeline_operators.clone(),
        expression_only,
        hooks: options.hooks,
        template_map: AHashMap::default(),
    });
    agent.execution_context_stack.push(ExecutionContext {
        ecmascript_code: ECMAScriptCodeEvaluationState {
            lexical_environment: global_env,
        },
        realm,
    });

    let result = match root {
        PrecookRoot::Function(function) => {
            before_evaluate(agent, AstKind::Function(function));
            // The function sees its own name, like a named function
            // expression.
            let root_env = new_declarative_environment(agent, Some(global_env));
            let closure = instantiate_ordinary_function_object(agent, function, root_env);
            if let Some(id) = &function.id {
                root_env.create_immutable_binding(agent, &id.name, true);
                root_env.initialize_binding(agent, &id.name, Value::Object(closure));
            }
            Ok(Value::Object(closure))
        }
        PrecookRoot::Expression(expression) => expression.evaluate(agent),
    };
    agent.execution_context_stack.pop();
    maybe_heap_gc(agent);

    if let Err(error) = &result {
        report_uncaught(agent, error.value());
    }
    result
}

/// Calls a function returned by [`cook`] with `undefined` as `this`.
pub fn invoke(agent: &mut Agent, function: &Value, arguments: &[Value]) -> JsResult<Value> {
    let Some(function) = is_callable(agent, function) else {
        let message = format!("{} is not a function", function.string_repr(agent));
        return Err(agent.throw_exception(ExceptionType::TypeError, message));
    };
    let result = call_function(agent, function, Value::Undefined, arguments);
    maybe_heap_gc(agent);
    if let Err(error) = &result {
        report_uncaught(agent, error.value());
    }
    result
}

fn report_uncaught(agent: &Agent, thrown: &Value) {
    if agent.options.print_internals {
        eprintln!("Uncaught {}", thrown.string_repr(agent));
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn supply_keeps_free_variable_order_and_last_duplicate() {
        let provided = vec![
            ("b".to_owned(), Value::from(1)),
            ("a".to_owned(), Value::from(2)),
            ("b".to_owned(), Value::from(3)),
            ("unused".to_owned(), Value::from(4)),
        ];
        let supplied = supply(&["a", "missing", "b"], &provided);
        assert_eq!(supplied, vec![("a", Value::from(2)), ("b", Value::from(3))]);
    }

    #[test]
    fn supply_of_nothing_is_empty() {
        assert!(supply(&["a"], &[]).is_empty());
    }
}
