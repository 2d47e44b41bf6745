// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ### [13.15.5 Destructuring Assignment](https://tc39.es/ecma262/#sec-destructuring-assignment)

use oxc_ast::ast;

use super::super::{Evaluate, EvaluateReference, evaluate_property_key};
use crate::ecmascript::{
    abstract_operations::{
        operations_on_iterator_objects::{
            IteratorRecord, get_iterator, iterator_step_value, iterator_to_list,
        },
        operations_on_objects::{copy_data_properties, get_v, ordinary_object_create},
        testing_and_comparison::require_object_coercible,
    },
    builtins::array::create_array_from_list,
    execution::{Agent, JsResult},
    syntax_directed_operations::function_definitions::{
        is_anonymous_function_definition, named_evaluation,
    },
    types::{PropertyKey, Reference, Value, put_value},
};

/// ### [13.15.5.2 Runtime Semantics: DestructuringAssignmentEvaluation](https://tc39.es/ecma262/#sec-runtime-semantics-destructuringassignmentevaluation)
pub(super) fn destructuring_assignment_evaluation<'a>(
    agent: &mut Agent<'a>,
    pattern: &'a ast::AssignmentTargetPattern<'a>,
    value: Value,
) -> JsResult<()> {
    match pattern {
        ast::AssignmentTargetPattern::ObjectAssignmentTarget(pattern) => {
            // ObjectAssignmentPattern : { AssignmentPropertyList }
            // 1. Perform ? RequireObjectCoercible(value).
            require_object_coercible(agent, &value)?;
            object_destructuring_assignment(agent, pattern, value)
        }
        ast::AssignmentTargetPattern::ArrayAssignmentTarget(pattern) => {
            // ArrayAssignmentPattern : [ AssignmentElementList ]
            // 1. Let iteratorRecord be ? GetIterator(value, SYNC).
            let mut iterator_record = get_iterator(agent, &value)?;
            // 2. Let result be Completion(IteratorDestructuringAssignmentEvaluation
            //    of AssignmentElementList with argument iteratorRecord).
            array_destructuring_assignment(agent, pattern, &mut iterator_record)
        }
    }
}

/// Assigns `value` to an assignment target, destructuring it if the target
/// is a pattern.
pub(crate) fn assign_to_target<'a>(
    agent: &mut Agent<'a>,
    target: &'a ast::AssignmentTarget<'a>,
    value: Value,
) -> JsResult<()> {
    let lref = target_reference(agent, target)?;
    assign_value(agent, target, lref, value)
}

/// Evaluates a simple target to its reference. Patterns have none.
fn target_reference<'a>(
    agent: &mut Agent<'a>,
    target: &'a ast::AssignmentTarget<'a>,
) -> JsResult<Option<Reference>> {
    match target.as_simple_assignment_target() {
        Some(target) => target.evaluate_reference(agent).map(Some),
        None => Ok(None),
    }
}

fn assign_value<'a>(
    agent: &mut Agent<'a>,
    target: &'a ast::AssignmentTarget<'a>,
    lref: Option<Reference>,
    value: Value,
) -> JsResult<()> {
    match lref {
        // 7. Return ? PutValue(lref, rhsValue).
        Some(lref) => put_value(agent, &lref, value),
        // 6. If DestructuringAssignmentTarget is either an ObjectLiteral or
        //    an ArrayLiteral, then
        //    a. Let nestedAssignmentPattern be the AssignmentPattern that is
        //       covered by DestructuringAssignmentTarget.
        //    b. Return ? DestructuringAssignmentEvaluation of
        //       nestedAssignmentPattern with argument rhsValue.
        None => {
            let Some(pattern) = target.as_assignment_target_pattern() else {
                unreachable!("assignment target is simple or a pattern")
            };
            destructuring_assignment_evaluation(agent, pattern, value)
        }
    }
}

/// Splits an element into its target and its default value.
fn split_default<'a>(
    element: &'a ast::AssignmentTargetMaybeDefault<'a>,
) -> (&'a ast::AssignmentTarget<'a>, Option<&'a ast::Expression<'a>>) {
    match element {
        ast::AssignmentTargetMaybeDefault::AssignmentTargetWithDefault(with_default) => {
            (&with_default.binding, Some(&with_default.init))
        }
        _ => {
            let Some(target) = element.as_assignment_target() else {
                unreachable!("element without default is an assignment target")
            };
            (target, None)
        }
    }
}

/// ### [13.15.5.6 Runtime Semantics: KeyedDestructuringAssignmentEvaluation](https://tc39.es/ecma262/#sec-runtime-semantics-keyeddestructuringassignmentevaluation)
///
/// Steps 3 to 7, shared with the elements of array patterns: applies the
/// default of an element and assigns the result.
fn assign_with_default<'a>(
    agent: &mut Agent<'a>,
    target: &'a ast::AssignmentTarget<'a>,
    lref: Option<Reference>,
    initializer: Option<&'a ast::Expression<'a>>,
    v: Value,
) -> JsResult<()> {
    // 3. If Initializer is present and v is undefined, then
    let rhs_value = match initializer {
        Some(initializer) if v.is_undefined() => match target {
            // a. If IsAnonymousFunctionDefinition(Initializer) and
            //    IsIdentifierRef of DestructuringAssignmentTarget are both true, then
            //    i. Let rhsValue be ? NamedEvaluation of Initializer with argument
            //       DestructuringAssignmentTarget.[[StringValue]].
            ast::AssignmentTarget::AssignmentTargetIdentifier(identifier)
                if is_anonymous_function_definition(initializer) =>
            {
                named_evaluation(agent, initializer, &identifier.name)?
            }
            // b. Else,
            //    i. Let defaultValue be ? Evaluation of Initializer.
            //    ii. Let rhsValue be ? GetValue(defaultValue).
            _ => initializer.evaluate(agent)?,
        },
        // 4. Else, let rhsValue be v.
        _ => v,
    };
    assign_value(agent, target, lref, rhs_value)
}

/// ### [13.15.5.3 Runtime Semantics: PropertyDestructuringAssignmentEvaluation](https://tc39.es/ecma262/#sec-runtime-semantics-propertydestructuringassignmentevaluation)
fn object_destructuring_assignment<'a>(
    agent: &mut Agent<'a>,
    pattern: &'a ast::ObjectAssignmentTarget<'a>,
    value: Value,
) -> JsResult<()> {
    let mut excluded_names = Vec::with_capacity(pattern.properties.len());
    for property in &pattern.properties {
        match property {
            // AssignmentProperty : IdentifierReference Initializeropt
            ast::AssignmentTargetProperty::AssignmentTargetPropertyIdentifier(property) => {
                // 1. Let P be the StringValue of IdentifierReference.
                let p = property.binding.name.as_str();
                // 2. Let lref be ? ResolveBinding(P).
                let lref = agent.resolve_binding(p, None);
                // 3. Let v be ? GetV(value, P).
                let key = PropertyKey::from(p);
                let mut v = get_v(agent, &value, &key)?;
                // 4. If Initializer is present and v is undefined, then
                if let Some(init) = &property.init {
                    if v.is_undefined() {
                        // a. If IsAnonymousFunctionDefinition(Initializer) is true, then
                        //    i. Set v to ? NamedEvaluation of Initializer with argument P.
                        // b. Else,
                        //    i. Let defaultValue be ? Evaluation of Initializer.
                        //    ii. Set v to ? GetValue(defaultValue).
                        v = if is_anonymous_function_definition(init) {
                            named_evaluation(agent, init, p)?
                        } else {
                            init.evaluate(agent)?
                        };
                    }
                }
                // 5. Perform ? PutValue(lref, v).
                put_value(agent, &lref, v)?;
                // 6. Return « P ».
                excluded_names.push(key);
            }
            // AssignmentProperty : PropertyName : AssignmentElement
            ast::AssignmentTargetProperty::AssignmentTargetPropertyProperty(property) => {
                // 1. Let name be ? Evaluation of PropertyName.
                let name = evaluate_property_key(agent, &property.name, property.computed)?;
                // 2. Perform ? KeyedDestructuringAssignmentEvaluation of
                //    AssignmentElement with arguments value and name.
                let (target, initializer) = split_default(&property.binding);
                // 1. If DestructuringAssignmentTarget is neither an ObjectLiteral
                //    nor an ArrayLiteral, then
                //    a. Let lref be ? Evaluation of DestructuringAssignmentTarget.
                let lref = target_reference(agent, target)?;
                // 2. Let v be ? GetV(value, propertyName).
                let v = get_v(agent, &value, &name)?;
                assign_with_default(agent, target, lref, initializer, v)?;
                // 3. Return « name ».
                excluded_names.push(name);
            }
        }
    }
    // AssignmentRestProperty : ... DestructuringAssignmentTarget
    if let Some(rest) = &pattern.rest {
        // 1. Let lref be ? Evaluation of DestructuringAssignmentTarget.
        let lref = target_reference(agent, &rest.target)?;
        // 2. Let restObj be OrdinaryObjectCreate(%Object.prototype%).
        let rest_obj = ordinary_object_create(agent);
        // 3. Perform ? CopyDataProperties(restObj, value, excludedNames).
        copy_data_properties(agent, rest_obj, &value, &excluded_names)?;
        // 4. Return ? PutValue(lref, restObj).
        assign_value(agent, &rest.target, lref, Value::Object(rest_obj))?;
    }
    Ok(())
}

/// ### [13.15.5.5 Runtime Semantics: IteratorDestructuringAssignmentEvaluation](https://tc39.es/ecma262/#sec-runtime-semantics-iteratordestructuringassignmentevaluation)
fn array_destructuring_assignment<'a>(
    agent: &mut Agent<'a>,
    pattern: &'a ast::ArrayAssignmentTarget<'a>,
    iterator_record: &mut IteratorRecord,
) -> JsResult<()> {
    for element in &pattern.elements {
        // AssignmentElisionElement : Elision
        let Some(element) = element else {
            iterator_step_value(agent, iterator_record);
            continue;
        };
        // AssignmentElement : DestructuringAssignmentTarget Initializeropt
        let (target, initializer) = split_default(element);
        // 1. If DestructuringAssignmentTarget is neither an ObjectLiteral nor
        //    an ArrayLiteral, then
        //    a. Let lref be ? Evaluation of DestructuringAssignmentTarget.
        let lref = target_reference(agent, target)?;
        // 2. Let value be undefined.
        // 3. If iteratorRecord.[[Done]] is false, then
        //    a. Let next be ? IteratorStepValue(iteratorRecord).
        //    b. If next is not DONE, then
        //       i. Set value to next.
        let value = iterator_step_value(agent, iterator_record).unwrap_or_default();
        assign_with_default(agent, target, lref, initializer, value)?;
    }
    // AssignmentRestElement : ... DestructuringAssignmentTarget
    if let Some(rest) = &pattern.rest {
        // 1. If DestructuringAssignmentTarget is neither an ObjectLiteral nor
        //    an ArrayLiteral, then
        //    a. Let lref be ? Evaluation of DestructuringAssignmentTarget.
        let lref = target_reference(agent, &rest.target)?;
        // 2. Let A be ! ArrayCreate(0).
        // 4. Repeat, while iteratorRecord.[[Done]] is false,
        //    a. Let next be ? IteratorStepValue(iteratorRecord).
        //    b. If next is not DONE, then
        //       i. Perform ! CreateDataPropertyOrThrow(A, ! ToString(𝔽(n)), next).
        let remaining = iterator_to_list(agent, iterator_record);
        let a = create_array_from_list(agent, remaining);
        // 5. If DestructuringAssignmentTarget is neither an ObjectLiteral nor
        //    an ArrayLiteral, then
        //    a. Return ? PutValue(lref, A).
        assign_value(agent, &rest.target, lref, Value::Object(a))?;
    }
    Ok(())
}
