// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ### [8.6.2 Runtime Semantics: BindingInitialization](https://tc39.es/ecma262/#sec-runtime-semantics-bindinginitialization)

use oxc_ast::ast;

use super::{Evaluate, evaluate_property_key};
use crate::ecmascript::{
    abstract_operations::{
        operations_on_iterator_objects::{
            IteratorRecord, get_iterator, iterator_step_value, iterator_to_list,
        },
        operations_on_objects::{copy_data_properties, get_v, ordinary_object_create},
        testing_and_comparison::require_object_coercible,
    },
    builtins::array::create_array_from_list,
    execution::{Agent, Environment, JsResult},
    syntax_directed_operations::function_definitions::{
        is_anonymous_function_definition, named_evaluation,
    },
    types::{Value, put_value},
};

/// Binds the names of `pattern` to the parts of `value`.
///
/// With an environment the bindings are initialized in it; without one
/// each name is resolved and assigned, which is how `var` patterns are
/// initialized.
pub(crate) fn binding_initialization<'a>(
    agent: &mut Agent<'a>,
    pattern: &'a ast::BindingPattern<'a>,
    value: Value,
    environment: Option<Environment>,
) -> JsResult<()> {
    match pattern {
        // BindingIdentifier : Identifier
        // 1. Let name be the StringValue of Identifier.
        // 2. Return ? InitializeBoundName(name, value, environment).
        ast::BindingPattern::BindingIdentifier(identifier) => {
            initialize_bound_name(agent, &identifier.name, value, environment)
        }
        // BindingPattern : ObjectBindingPattern
        ast::BindingPattern::ObjectPattern(pattern) => {
            // 1. Perform ? RequireObjectCoercible(value).
            require_object_coercible(agent, &value)?;
            // 2. Return ? BindingInitialization of ObjectBindingPattern with
            //    arguments value and environment.
            object_binding_initialization(agent, pattern, value, environment)
        }
        // BindingPattern : ArrayBindingPattern
        ast::BindingPattern::ArrayPattern(pattern) => {
            // 1. Let iteratorRecord be ? GetIterator(value, SYNC).
            let mut iterator_record = get_iterator(agent, &value)?;
            // 2. Let result be Completion(IteratorBindingInitialization of
            //    ArrayBindingPattern with arguments iteratorRecord and
            //    environment).
            array_binding_initialization(agent, pattern, &mut iterator_record, environment)
        }
        // SingleNameBinding : BindingIdentifier Initializer
        // BindingElement : BindingPattern Initializer
        ast::BindingPattern::AssignmentPattern(pattern) => {
            let value = if value.is_undefined() {
                evaluate_default(agent, &pattern.left, &pattern.right)?
            } else {
                value
            };
            binding_initialization(agent, &pattern.left, value, environment)
        }
    }
}

/// ### [8.6.3 Runtime Semantics: InitializeBoundName ( name, value, environment )](https://tc39.es/ecma262/#sec-initializeboundname)
fn initialize_bound_name(
    agent: &mut Agent,
    name: &str,
    value: Value,
    environment: Option<Environment>,
) -> JsResult<()> {
    match environment {
        // 1. If environment is not undefined, then
        //    a. Perform ! environment.InitializeBinding(name, value).
        Some(environment) => {
            environment.initialize_binding(agent, name, value);
            Ok(())
        }
        // 2. Else,
        //    a. Let lhs be ? ResolveBinding(name).
        //    b. Return ? PutValue(lhs, value).
        None => {
            let lhs = agent.resolve_binding(name, None);
            put_value(agent, &lhs, value)
        }
    }
}

/// Initializer of a binding element whose value is undefined. Anonymous
/// functions take the name of the identifier they are bound to.
fn evaluate_default<'a>(
    agent: &mut Agent<'a>,
    target: &'a ast::BindingPattern<'a>,
    initializer: &'a ast::Expression<'a>,
) -> JsResult<Value> {
    match target {
        ast::BindingPattern::BindingIdentifier(identifier)
            if is_anonymous_function_definition(initializer) =>
        {
            named_evaluation(agent, initializer, &identifier.name)
        }
        _ => initializer.evaluate(agent),
    }
}

/// ObjectBindingPattern : { BindingPropertyList , BindingRestProperty }
fn object_binding_initialization<'a>(
    agent: &mut Agent<'a>,
    pattern: &'a ast::ObjectPattern<'a>,
    value: Value,
    environment: Option<Environment>,
) -> JsResult<()> {
    // 1. Let excludedNames be ? PropertyBindingInitialization of
    //    BindingPropertyList with arguments value and environment.
    let mut excluded_names = Vec::with_capacity(pattern.properties.len());
    for property in &pattern.properties {
        // BindingProperty : PropertyName : BindingElement
        // 1. Let P be ? Evaluation of PropertyName.
        let p = evaluate_property_key(agent, &property.key, property.computed)?;
        // 2. Perform ? KeyedBindingInitialization of BindingElement with
        //    arguments value, environment, and P.
        // BindingElement : BindingPattern Initializeropt
        // 1. Let v be ? GetV(value, propertyName).
        let v = get_v(agent, &value, &p)?;
        binding_initialization(agent, &property.value, v, environment)?;
        // 3. Return « P ».
        excluded_names.push(p);
    }
    // BindingRestProperty : ... BindingIdentifier
    if let Some(rest) = &pattern.rest {
        // 2. Let restObj be OrdinaryObjectCreate(%Object.prototype%).
        let rest_obj = ordinary_object_create(agent);
        // 3. Perform ? CopyDataProperties(restObj, value, excludedNames).
        copy_data_properties(agent, rest_obj, &value, &excluded_names)?;
        // 4. If environment is undefined, return ? PutValue(lhs, restObj).
        // 5. Return ? InitializeReferencedBinding(lhs, restObj).
        binding_initialization(agent, &rest.argument, Value::Object(rest_obj), environment)?;
    }
    Ok(())
}

/// ### [8.6.4 Runtime Semantics: IteratorBindingInitialization](https://tc39.es/ecma262/#sec-runtime-semantics-iteratorbindinginitialization)
fn array_binding_initialization<'a>(
    agent: &mut Agent<'a>,
    pattern: &'a ast::ArrayPattern<'a>,
    iterator_record: &mut IteratorRecord,
    environment: Option<Environment>,
) -> JsResult<()> {
    for element in &pattern.elements {
        // Elision : ,
        // 2. Perform ? IteratorStep(iteratorRecord).
        let Some(element) = element else {
            iterator_step_value(agent, iterator_record);
            continue;
        };
        // SingleNameBinding : BindingIdentifier Initializeropt
        // 3. Let v be undefined.
        // 4. If iteratorRecord.[[Done]] is false, then
        //    a. Let next be ? IteratorStepValue(iteratorRecord).
        //    b. If next is not DONE, then
        //       i. Set v to next.
        let v = iterator_step_value(agent, iterator_record).unwrap_or_default();
        binding_initialization(agent, element, v, environment)?;
    }
    // BindingRestElement : ... BindingPattern
    if let Some(rest) = &pattern.rest {
        // 1. Let A be ! ArrayCreate(0).
        // 3. Repeat,
        //    a. Let next be DONE.
        //    b. If iteratorRecord.[[Done]] is false, then
        //       i. Set next to ? IteratorStepValue(iteratorRecord).
        //    c. If next is DONE, then
        //       i. Return ? BindingInitialization of BindingPattern with
        //          arguments A and environment.
        //    d. Perform ! CreateDataPropertyOrThrow(A, ! ToString(𝔽(n)), next).
        let remaining = iterator_to_list(agent, iterator_record);
        let a = create_array_from_list(agent, remaining);
        binding_initialization(agent, &rest.argument, Value::Object(a), environment)?;
    }
    Ok(())
}
