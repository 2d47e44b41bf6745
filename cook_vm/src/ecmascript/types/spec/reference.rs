// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::ecmascript::{
    abstract_operations::operations_on_objects::{get_v, set},
    execution::{Agent, Environment, ExceptionType, JsResult},
    types::{PropertyKey, Value},
};

/// ### [\[\[Base\]\]](https://tc39.es/ecma262/#table-reference-record-fields)
#[derive(Debug, Clone)]
pub(crate) enum Base {
    Value(Value),
    Environment(Environment),
    Unresolvable,
}

/// ### [6.2.5 The Reference Record Specification Type](https://tc39.es/ecma262/#sec-reference-record-specification-type)
///
/// A Reference Record is a resolved name or (possibly not-yet-resolved)
/// property binding. Private names and super references do not exist here.
#[derive(Debug, Clone)]
pub(crate) struct Reference {
    /// ### \[\[Base]]
    pub(crate) base: Base,

    /// ### \[\[ReferencedName]]
    ///
    /// Always a String for environment and unresolvable references.
    pub(crate) referenced_name: PropertyKey,

    /// ### \[\[Strict]]
    pub(crate) strict: bool,
}

impl Reference {
    pub(crate) fn environment(env: Environment, name: &str, strict: bool) -> Self {
        Self {
            base: Base::Environment(env),
            referenced_name: PropertyKey::from(name),
            strict,
        }
    }

    pub(crate) fn property(base: Value, referenced_name: PropertyKey, strict: bool) -> Self {
        Self {
            base: Base::Value(base),
            referenced_name,
            strict,
        }
    }

    /// ### [6.2.5.2 IsUnresolvableReference ( V )](https://tc39.es/ecma262/#sec-isunresolvablereference)
    pub(crate) fn is_unresolvable_reference(&self) -> bool {
        matches!(self.base, Base::Unresolvable)
    }

    fn binding_name(&self) -> &str {
        match &self.referenced_name {
            PropertyKey::String(name) => name.as_str(),
            PropertyKey::Symbol(_) => unreachable!("binding names are always strings"),
        }
    }
}

/// ### [6.2.5.5 GetValue ( V )](https://tc39.es/ecma262/#sec-getvalue)
pub(crate) fn get_value(agent: &mut Agent, reference: &Reference) -> JsResult<Value> {
    match &reference.base {
        // 2. If IsUnresolvableReference(V) is true, throw a ReferenceError exception.
        Base::Unresolvable => Err(agent.throw_exception(
            ExceptionType::ReferenceError,
            format!("{} is not defined", reference.binding_name()),
        )),
        // 3. If IsPropertyReference(V) is true, then
        //   a. Let baseObj be ? ToObject(V.[[Base]]).
        //   c. Return ? baseObj.[[Get]](V.[[ReferencedName]], GetThisValue(V)).
        Base::Value(base) => {
            let base = base.clone();
            get_v(agent, &base, &reference.referenced_name)
        }
        // 4. Else,
        //   a. Let base be V.[[Base]].
        //   b. Assert: base is an Environment Record.
        //   c. Return ? base.GetBindingValue(V.[[ReferencedName]], V.[[Strict]]).
        Base::Environment(env) => {
            env.get_binding_value(agent, reference.binding_name(), reference.strict)
        }
    }
}

/// ### [6.2.5.6 PutValue ( V, W )](https://tc39.es/ecma262/#sec-putvalue)
pub(crate) fn put_value(agent: &mut Agent, reference: &Reference, w: Value) -> JsResult<()> {
    match &reference.base {
        // 2. If IsUnresolvableReference(V) is true, then
        //   a. If V.[[Strict]] is true, throw a ReferenceError exception.
        // Global object writes are never allowed, so sloppy references throw
        // as well.
        Base::Unresolvable => Err(agent.throw_exception(
            ExceptionType::ReferenceError,
            format!("{} is not defined", reference.binding_name()),
        )),
        // 3. If IsPropertyReference(V) is true, then
        Base::Value(Value::Object(base)) => {
            // b. Let succeeded be ? baseObj.[[Set]](V.[[ReferencedName]], W, GetThisValue(V)).
            // c. If succeeded is false and V.[[Strict]] is true, throw a TypeError exception.
            set(
                agent,
                *base,
                reference.referenced_name.clone(),
                w,
                reference.strict,
            )?;
            Ok(())
        }
        Base::Value(base) if base.is_nullish() => {
            let message = format!(
                "Cannot set properties of {} (setting '{}')",
                if base.is_null() { "null" } else { "undefined" },
                reference.referenced_name.to_display(agent)
            );
            Err(agent.throw_exception(ExceptionType::TypeError, message))
        }
        // Setting a property on a primitive wrapper always fails in strict code.
        Base::Value(base) => {
            let message = format!(
                "Cannot create property '{}' on {} '{}'",
                reference.referenced_name.to_display(agent),
                base.type_of(agent),
                base.string_repr(agent).trim_matches('"')
            );
            Err(agent.throw_exception(ExceptionType::TypeError, message))
        }
        // 4. Else,
        //   c. Return ? base.SetMutableBinding(V.[[ReferencedName]], W, V.[[Strict]]).
        Base::Environment(env) => {
            env.set_mutable_binding(agent, reference.binding_name(), w, reference.strict)
        }
    }
}

/// ### [6.2.5.8 InitializeReferencedBinding ( V, W )](https://tc39.es/ecma262/#sec-initializereferencedbinding)
pub(crate) fn initialize_referenced_binding(
    agent: &mut Agent,
    reference: &Reference,
    w: Value,
) -> JsResult<()> {
    // 1. Assert: IsUnresolvableReference(V) is false.
    // 2. Let base be V.[[Base]].
    // 3. Assert: base is an Environment Record.
    let Base::Environment(base) = &reference.base else {
        unreachable!("InitializeReferencedBinding on a non-environment reference");
    };
    // 4. Return ? base.InitializeBinding(V.[[ReferencedName]], W).
    base.initialize_binding(agent, reference.binding_name(), w);
    Ok(())
}
