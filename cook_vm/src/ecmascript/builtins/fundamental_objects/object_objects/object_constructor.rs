// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::ecmascript::{
    abstract_operations::{
        operations_on_iterator_objects::{get_iterator, iterator_step_value},
        operations_on_objects::{
            EnumerablePropertiesKind, copy_data_properties, create_data_property_or_throw,
            enumerable_own_properties, enumerable_properties_kind, get, get_own_property,
            integrity, ordinary_object_create, own_property_keys, set, set_integrity_level,
            test_integrity_level,
        },
        type_conversion::to_property_key,
    },
    builders::BuiltinFunctionBuilder,
    builtins::{ArgumentsList, Behaviour, Builtin, array::create_array_from_list},
    execution::{Agent, ExceptionType, JsError, JsResult},
    types::{Object, PropertyKey, Value},
};

pub(crate) struct ObjectConstructor;

impl Builtin for ObjectConstructor {
    const NAME: &'static str = "Object";

    const LENGTH: u8 = 1;

    const BEHAVIOUR: Behaviour = Behaviour::Constructor(Self::behaviour);
}

struct ObjectAssign;

impl Builtin for ObjectAssign {
    const NAME: &'static str = "assign";

    const LENGTH: u8 = 2;

    const BEHAVIOUR: Behaviour = Behaviour::Regular(ObjectConstructor::assign);
}

struct ObjectEntries;

impl Builtin for ObjectEntries {
    const NAME: &'static str = "entries";

    const LENGTH: u8 = 1;

    const BEHAVIOUR: Behaviour = Behaviour::Regular(ObjectConstructor::entries);
}

struct ObjectFreeze;

impl Builtin for ObjectFreeze {
    const NAME: &'static str = "freeze";

    const LENGTH: u8 = 1;

    const BEHAVIOUR: Behaviour = Behaviour::Regular(ObjectConstructor::freeze);
}

struct ObjectFromEntries;

impl Builtin for ObjectFromEntries {
    const NAME: &'static str = "fromEntries";

    const LENGTH: u8 = 1;

    const BEHAVIOUR: Behaviour = Behaviour::Regular(ObjectConstructor::from_entries);
}

struct ObjectIsFrozen;

impl Builtin for ObjectIsFrozen {
    const NAME: &'static str = "isFrozen";

    const LENGTH: u8 = 1;

    const BEHAVIOUR: Behaviour = Behaviour::Regular(ObjectConstructor::is_frozen);
}

struct ObjectKeys;

impl Builtin for ObjectKeys {
    const NAME: &'static str = "keys";

    const LENGTH: u8 = 1;

    const BEHAVIOUR: Behaviour = Behaviour::Regular(ObjectConstructor::keys);
}

struct ObjectValues;

impl Builtin for ObjectValues {
    const NAME: &'static str = "values";

    const LENGTH: u8 = 1;

    const BEHAVIOUR: Behaviour = Behaviour::Regular(ObjectConstructor::values);
}

impl ObjectConstructor {
    /// ### [20.1.1.1 Object ( \[ value \] )](https://tc39.es/ecma262/#sec-object-value)
    ///
    /// There are no wrapper objects: primitives are returned as they are.
    fn behaviour(
        agent: &mut Agent,
        _this_value: Value,
        arguments: ArgumentsList,
        _new_target: Option<Object>,
    ) -> JsResult<Value> {
        let value = arguments.get(0);
        // 2. If value is either undefined or null, return OrdinaryObjectCreate(%Object.prototype%).
        if value.is_nullish() {
            return Ok(Value::Object(ordinary_object_create(agent)));
        }
        // 3. Return ! ToObject(value).
        Ok(value)
    }

    /// ### [20.1.2.1 Object.assign ( target, ...sources )](https://tc39.es/ecma262/#sec-object.assign)
    ///
    /// This function copies the values of all of the enumerable own
    /// properties from one or more source objects to a target object.
    fn assign(agent: &mut Agent, _this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
        // 1. Let to be ? ToObject(target).
        let to = match arguments.get(0) {
            Value::Object(to) => to,
            Value::Undefined | Value::Null => return Err(cannot_convert_to_object(agent)),
            _ => {
                return Err(agent.throw_exception_with_static_message(
                    ExceptionType::TypeError,
                    "Object.assign target must be an object",
                ));
            }
        };
        // 3. For each element nextSource of sources, do
        for next_source in arguments.slice_from(1) {
            // a. If nextSource is neither undefined nor null, then
            //    i. Let from be ! ToObject(nextSource).
            let from = match next_source {
                Value::Object(from) => *from,
                Value::String(_) => {
                    let from = ordinary_object_create(agent);
                    copy_data_properties(agent, from, next_source, &[])?;
                    from
                }
                _ => continue,
            };
            // ii. Let keys be ? from.[[OwnPropertyKeys]]().
            let keys = own_property_keys(agent, from);
            // iii. For each element nextKey of keys, do
            for next_key in keys {
                // 1. Let desc be ? from.[[GetOwnProperty]](nextKey).
                // 2. If desc is not undefined and desc.[[Enumerable]] is true, then
                let Some(desc) = get_own_property(agent, from, &next_key) else {
                    continue;
                };
                if desc.enumerable != Some(true) {
                    continue;
                }
                // a. Let propValue be ? Get(from, nextKey).
                // b. Perform ? Set(to, nextKey, propValue, true).
                set(agent, to, next_key, desc.value.unwrap_or_default(), true)?;
            }
        }
        // 4. Return to.
        Ok(Value::Object(to))
    }

    /// ### [20.1.2.5 Object.entries ( O )](https://tc39.es/ecma262/#sec-object.entries)
    fn entries(agent: &mut Agent, _this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
        // 1. Let obj be ? ToObject(O).
        // 2. Let entryList be ? EnumerableOwnProperties(obj, KEY+VALUE).
        let entry_list =
            own_enumerable::<enumerable_properties_kind::KeyValue>(agent, &arguments.get(0))?;
        // 3. Return CreateArrayFromList(entryList).
        Ok(Value::Object(create_array_from_list(agent, entry_list)))
    }

    /// ### [20.1.2.6 Object.freeze ( O )](https://tc39.es/ecma262/#sec-object.freeze)
    fn freeze(agent: &mut Agent, _this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
        let o = arguments.get(0);
        // 1. If O is not an Object, return O.
        let Value::Object(object) = o else {
            return Ok(o);
        };
        // 2. Let status be ? SetIntegrityLevel(O, FROZEN).
        // 3. If status is false, throw a TypeError exception.
        set_integrity_level::<integrity::Frozen>(agent, object);
        // 4. Return O.
        Ok(o)
    }

    /// ### [20.1.2.7 Object.fromEntries ( iterable )](https://tc39.es/ecma262/#sec-object.fromentries)
    fn from_entries(
        agent: &mut Agent,
        _this_value: Value,
        arguments: ArgumentsList,
    ) -> JsResult<Value> {
        let iterable = arguments.get(0);
        // 1. Perform ? RequireObjectCoercible(iterable).
        // 2. Let obj be OrdinaryObjectCreate(%Object.prototype%).
        // 5. Return ? AddEntriesFromIterable(obj, iterable, adder).
        let mut iterator_record = get_iterator(agent, &iterable)?;
        let obj = ordinary_object_create(agent);
        while let Some(next) = iterator_step_value(agent, &mut iterator_record) {
            // If next is not an Object, then
            //   i. Let error be ThrowCompletion(a newly created TypeError object).
            let Value::Object(entry) = next else {
                let message = format!("Iterator value {} is not an entry object", next.string_repr(agent));
                return Err(agent.throw_exception(ExceptionType::TypeError, message));
            };
            // Let k be Completion(Get(next, "0")).
            let k = get(agent, entry, &PropertyKey::from("0"));
            // Let v be Completion(Get(next, "1")).
            let v = get(agent, entry, &PropertyKey::from("1"));
            // a. Let propertyKey be ? ToPropertyKey(key).
            let property_key = to_property_key(agent, &k)?;
            // b. Perform ! CreateDataPropertyOrThrow(obj, propertyKey, value).
            create_data_property_or_throw(agent, obj, property_key, v)?;
        }
        Ok(Value::Object(obj))
    }

    /// ### [20.1.2.15 Object.isFrozen ( O )](https://tc39.es/ecma262/#sec-object.isfrozen)
    fn is_frozen(agent: &mut Agent, _this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
        // 1. If O is not an Object, return true.
        let Value::Object(o) = arguments.get(0) else {
            return Ok(Value::Boolean(true));
        };
        // 2. Return ? TestIntegrityLevel(O, FROZEN).
        Ok(Value::Boolean(test_integrity_level::<integrity::Frozen>(agent, o)))
    }

    /// ### [20.1.2.17 Object.keys ( O )](https://tc39.es/ecma262/#sec-object.keys)
    fn keys(agent: &mut Agent, _this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
        // 1. Let obj be ? ToObject(O).
        // 2. Let keyList be ? EnumerableOwnProperties(obj, KEY).
        let key_list = own_enumerable::<enumerable_properties_kind::Key>(agent, &arguments.get(0))?;
        // 3. Return CreateArrayFromList(keyList).
        Ok(Value::Object(create_array_from_list(agent, key_list)))
    }

    /// ### [20.1.2.24 Object.values ( O )](https://tc39.es/ecma262/#sec-object.values)
    fn values(agent: &mut Agent, _this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
        // 1. Let obj be ? ToObject(O).
        // 2. Let valueList be ? EnumerableOwnProperties(obj, VALUE).
        let value_list =
            own_enumerable::<enumerable_properties_kind::Value>(agent, &arguments.get(0))?;
        // 3. Return CreateArrayFromList(valueList).
        Ok(Value::Object(create_array_from_list(agent, value_list)))
    }

    pub(crate) fn create_intrinsic(agent: &mut Agent) -> Object {
        BuiltinFunctionBuilder::new::<ObjectConstructor>(agent)
            .with_builtin_function_property::<ObjectAssign>()
            .with_builtin_function_property::<ObjectEntries>()
            .with_builtin_function_property::<ObjectFreeze>()
            .with_builtin_function_property::<ObjectFromEntries>()
            .with_builtin_function_property::<ObjectIsFrozen>()
            .with_builtin_function_property::<ObjectKeys>()
            .with_builtin_function_property::<ObjectValues>()
            .build()
    }
}

/// EnumerableOwnProperties of `ToObject(value)`. A string behaves like its
/// wrapper object; other primitives have no own properties.
fn own_enumerable<Kind: EnumerablePropertiesKind>(
    agent: &mut Agent,
    value: &Value,
) -> JsResult<Vec<Value>> {
    match value {
        Value::Undefined | Value::Null => Err(cannot_convert_to_object(agent)),
        Value::Object(o) => Ok(enumerable_own_properties::<Kind>(agent, *o)),
        Value::String(_) => {
            let wrapper = ordinary_object_create(agent);
            copy_data_properties(agent, wrapper, value, &[])?;
            Ok(enumerable_own_properties::<Kind>(agent, wrapper))
        }
        _ => Ok(Vec::new()),
    }
}

pub(crate) fn cannot_convert_to_object(agent: &mut Agent) -> JsError {
    agent.throw_exception_with_static_message(
        ExceptionType::TypeError,
        "Cannot convert undefined or null to object",
    )
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ecmascript::{
        abstract_operations::operations_on_objects::create_data_property_or_throw,
        execution::AgentOptions,
    };

    fn object_with(agent: &mut Agent, entries: &[(&str, Value)]) -> Object {
        let object = ordinary_object_create(agent);
        for (key, value) in entries {
            create_data_property_or_throw(agent, object, PropertyKey::from(*key), value.clone())
                .unwrap();
        }
        object
    }

    #[test]
    fn keys_of_strings_and_objects() {
        let mut agent = Agent::new(AgentOptions::default());
        let object = object_with(&mut agent, &[("b", Value::from(1)), ("a", Value::from(2))]);
        let keys = ObjectConstructor::keys(
            &mut agent,
            Value::Undefined,
            ArgumentsList(&[Value::Object(object)]),
        )
        .unwrap();
        let keys = keys.as_object().unwrap().array_elements(&agent).unwrap();
        assert_eq!(keys, vec![Value::from("b"), Value::from("a")]);

        let keys =
            ObjectConstructor::keys(&mut agent, Value::Undefined, ArgumentsList(&[Value::from("hi")]))
                .unwrap();
        let keys = keys.as_object().unwrap().array_elements(&agent).unwrap();
        assert_eq!(keys, vec![Value::from("0"), Value::from("1")]);

        assert!(ObjectConstructor::keys(&mut agent, Value::Undefined, ArgumentsList(&[])).is_err());
    }

    #[test]
    fn assign_overwrites_in_order() {
        let mut agent = Agent::new(AgentOptions::default());
        let target = object_with(&mut agent, &[("a", Value::from(1))]);
        let source = object_with(&mut agent, &[("a", Value::from(2)), ("b", Value::from(3))]);
        let result = ObjectConstructor::assign(
            &mut agent,
            Value::Undefined,
            ArgumentsList(&[Value::Object(target), Value::Null, Value::Object(source)]),
        )
        .unwrap();
        assert_eq!(result, Value::Object(target));
        assert_eq!(get(&mut agent, target, &PropertyKey::from("a")), Value::from(2));
        assert_eq!(get(&mut agent, target, &PropertyKey::from("b")), Value::from(3));
    }

    #[test]
    fn frozen_objects_reject_writes() {
        let mut agent = Agent::new(AgentOptions::default());
        let object = object_with(&mut agent, &[("a", Value::from(1))]);
        let arguments = [Value::Object(object)];
        ObjectConstructor::freeze(&mut agent, Value::Undefined, ArgumentsList(&arguments)).unwrap();
        let frozen =
            ObjectConstructor::is_frozen(&mut agent, Value::Undefined, ArgumentsList(&arguments))
                .unwrap();
        assert_eq!(frozen, Value::Boolean(true));
        assert!(set(&mut agent, object, PropertyKey::from("a"), Value::from(2), true).is_err());
        assert_eq!(get(&mut agent, object, &PropertyKey::from("a")), Value::from(1));
    }
}
