// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ## [7.3 Operations on Objects](https://tc39.es/ecma262/#sec-operations-on-objects)
//!
//! Objects have no prototype chain. Lookups that miss an own property fall
//! back to the intrinsic methods of the receiver's kind.

use super::{
    testing_and_comparison::{is_callable, is_constructor},
    type_conversion::{number_to_uint32, to_length, to_number},
};
use crate::{
    ecmascript::{
        builtins::{
            ArgumentsList, Behaviour, array::create_array_from_list, ecmascript_function,
            intrinsics::get_intrinsic_property,
        },
        execution::{Agent, ExceptionType, JsResult},
        types::{
            JsString, Object, ObjectHeapData, ObjectKind, ObjectProperty, PropertyDescriptor,
            PropertyKey, Value,
        },
    },
    heap::CreateHeapData,
};

/// ### [7.3.1 MakeBasicObject ( internalSlotsList )](https://tc39.es/ecma262/#sec-makebasicobject)
///
/// Ordinary objects created by object literals, `Object()` and rest
/// patterns.
pub(crate) fn ordinary_object_create(agent: &mut Agent) -> Object {
    agent.heap.create(ObjectHeapData::new(ObjectKind::Ordinary))
}

/// ### [10.1.5 \[\[GetOwnProperty\]\] ( P )](https://tc39.es/ecma262/#sec-ordinary-object-internal-methods-and-internal-slots-getownproperty-p)
pub(crate) fn get_own_property(agent: &Agent, o: Object, p: &PropertyKey) -> Option<PropertyDescriptor> {
    let data = &agent[o];
    if let ObjectKind::Array(array) = &data.kind {
        if let Some(index) = p.as_array_index() {
            let value = array.get(index as usize).cloned()?;
            return Some(PropertyDescriptor {
                value: Some(value),
                writable: Some(!array.frozen),
                enumerable: Some(true),
                configurable: Some(!array.frozen),
            });
        }
        if p.as_str() == Some("length") {
            return Some(PropertyDescriptor {
                value: Some(Value::from(array.len())),
                writable: Some(!array.frozen),
                enumerable: Some(false),
                configurable: Some(false),
            });
        }
    }
    data.find_property(p).map(|property| PropertyDescriptor {
        value: Some(property.value.clone()),
        writable: Some(property.writable),
        enumerable: Some(property.enumerable),
        configurable: Some(property.configurable),
    })
}

/// The value of an own data property, without intrinsic fallback.
pub(crate) fn get_own_property_value(agent: &Agent, o: Object, p: &PropertyKey) -> Option<Value> {
    let data = &agent[o];
    if let ObjectKind::Array(array) = &data.kind {
        if let Some(index) = p.as_array_index() {
            return array.get(index as usize).cloned();
        }
        if p.as_str() == Some("length") {
            return Some(Value::from(array.len()));
        }
    }
    data.find_property(p).map(|property| property.value.clone())
}

/// ### [7.3.2 Get ( O, P )](https://tc39.es/ecma262/#sec-get-o-p)
///
/// The abstract operation Get takes arguments O (an Object) and P (a property
/// key) and returns either a normal completion containing an ECMAScript
/// language value or a throw completion. It is used to retrieve the value of
/// a specific property of an object.
pub(crate) fn get(agent: &mut Agent, o: Object, p: &PropertyKey) -> Value {
    // 1. Return ? O.[[Get]](P, O).
    if let Some(value) = get_own_property_value(agent, o, p) {
        return value;
    }
    get_intrinsic_property(agent, &Value::Object(o), p).unwrap_or_default()
}

/// ### [7.3.3 GetV ( V, P )](https://tc39.es/ecma262/#sec-getv)
///
/// The abstract operation GetV takes arguments V (an ECMAScript language
/// value) and P (a property key) and returns either a normal completion
/// containing an ECMAScript language value or a throw completion. It is used
/// to retrieve the value of a specific property of an ECMAScript language
/// value. If the value is not an object, the property lookup is performed
/// using a wrapper object appropriate for the type of the value.
pub(crate) fn get_v(agent: &mut Agent, v: &Value, p: &PropertyKey) -> JsResult<Value> {
    match v {
        Value::Object(o) => Ok(get(agent, *o, p)),
        // 1. Let O be ? ToObject(V).
        Value::Undefined | Value::Null => {
            let message = format!(
                "Cannot read properties of {} (reading '{}')",
                if v.is_null() { "null" } else { "undefined" },
                p.to_display(agent)
            );
            Err(agent.throw_exception(ExceptionType::TypeError, message))
        }
        // 2. Return ? O.[[Get]](P, V).
        _ => Ok(get_intrinsic_property(agent, v, p).unwrap_or_default()),
    }
}

/// ### [7.3.4 Set ( O, P, V, Throw )](https://tc39.es/ecma262/#sec-set-o-p-v-throw)
///
/// The abstract operation Set takes arguments O (an Object), P (a property
/// key), V (an ECMAScript language value), and Throw (a Boolean) and returns
/// either a normal completion containing unused or a throw completion. It is
/// used to set the value of a specific property of an object. V is the new
/// value for the property.
pub(crate) fn set(agent: &mut Agent, o: Object, p: PropertyKey, v: Value, throw: bool) -> JsResult<bool> {
    // 1. Let success be ? O.[[Set]](P, V, O).
    let success = ordinary_set(agent, o, &p, v)?;
    // 2. If success is false and Throw is true, throw a TypeError exception.
    if !success && throw {
        let message = if get_own_property(agent, o, &p).is_some() {
            format!("Cannot assign to read only property '{}' of object", p.to_display(agent))
        } else {
            format!("Cannot add property {}, object is not extensible", p.to_display(agent))
        };
        return Err(agent.throw_exception(ExceptionType::TypeError, message));
    }
    // 3. Return unused.
    Ok(success)
}

fn ordinary_set(agent: &mut Agent, o: Object, p: &PropertyKey, v: Value) -> JsResult<bool> {
    if o.is_array(agent) {
        if let Some(index) = p.as_array_index() {
            return Ok(array_set_element(agent, o, index, v));
        }
        if p.as_str() == Some("length") {
            return array_set_length(agent, o, &v);
        }
    }
    let data = &mut agent[o];
    if let Some(property) = data.find_property_mut(p) {
        if !property.writable {
            return Ok(false);
        }
        property.value = v;
        return Ok(true);
    }
    if !data.extensible {
        return Ok(false);
    }
    data.properties.push(ObjectProperty::data(p.clone(), v));
    Ok(true)
}

/// Writes past the end grow the length; the array storage decides whether
/// the element lands in the dense part or the sparse part.
fn array_set_element(agent: &mut Agent, o: Object, index: u32, v: Value) -> bool {
    let extensible = agent[o].extensible;
    let ObjectKind::Array(array) = &mut agent[o].kind else {
        unreachable!()
    };
    if array.frozen {
        return false;
    }
    if !extensible && !array.has(index as usize) {
        return false;
    }
    array.set(index, v);
    true
}

/// ### [10.4.2.4 ArraySetLength ( A, Desc )](https://tc39.es/ecma262/#sec-arraysetlength)
fn array_set_length(agent: &mut Agent, o: Object, v: &Value) -> JsResult<bool> {
    // 3. Let newLen be ? ToUint32(Desc.[[Value]]).
    // 4. Let numberLen be ? ToNumber(Desc.[[Value]]).
    let number_len = to_number(agent, v)?;
    let new_len = number_to_uint32(number_len);
    // 5. If SameValueZero(newLen, numberLen) is false, throw a RangeError exception.
    if f64::from(new_len) != number_len {
        return Err(agent.throw_exception_with_static_message(
            ExceptionType::RangeError,
            "Invalid array length",
        ));
    }
    let ObjectKind::Array(array) = &mut agent[o].kind else {
        unreachable!()
    };
    if array.frozen {
        return Ok(false);
    }
    array.set_len(new_len);
    Ok(true)
}

/// ### [7.3.5 CreateDataProperty ( O, P, V )](https://tc39.es/ecma262/#sec-createdataproperty)
///
/// The abstract operation CreateDataProperty takes arguments O (an Object), P
/// (a property key), and V (an ECMAScript language value) and returns either
/// a normal completion containing a Boolean or a throw completion. It is used
/// to create a new own property of an object.
pub(crate) fn create_data_property(agent: &mut Agent, o: Object, p: PropertyKey, v: Value) -> JsResult<bool> {
    // 1. Let newDesc be the PropertyDescriptor { [[Value]]: V, [[Writable]]:
    //    true, [[Enumerable]]: true, [[Configurable]]: true }.
    // 2. Return ? O.[[DefineOwnProperty]](P, newDesc).
    if o.is_array(agent) {
        if let Some(index) = p.as_array_index() {
            return Ok(array_set_element(agent, o, index, v));
        }
        if p.as_str() == Some("length") {
            return Ok(false);
        }
    }
    let data = &mut agent[o];
    if let Some(property) = data.find_property_mut(&p) {
        if !property.configurable {
            return Ok(false);
        }
        *property = ObjectProperty::data(p, v);
        return Ok(true);
    }
    if !data.extensible {
        return Ok(false);
    }
    data.properties.push(ObjectProperty::data(p, v));
    Ok(true)
}

/// ### [7.3.7 CreateDataPropertyOrThrow ( O, P, V )](https://tc39.es/ecma262/#sec-createdatapropertyorthrow)
pub(crate) fn create_data_property_or_throw(agent: &mut Agent, o: Object, p: PropertyKey, v: Value) -> JsResult<()> {
    // 1. Let success be ? CreateDataProperty(O, P, V).
    let success = create_data_property(agent, o, p.clone(), v)?;
    // 2. If success is false, throw a TypeError exception.
    if !success {
        let message = format!("Cannot define property {}, object is not extensible", p.to_display(agent));
        return Err(agent.throw_exception(ExceptionType::TypeError, message));
    }
    // 3. Return unused.
    Ok(())
}

/// ### [10.1.10 \[\[Delete\]\] ( P )](https://tc39.es/ecma262/#sec-ordinary-object-internal-methods-and-internal-slots-delete-p)
pub(crate) fn delete(agent: &mut Agent, o: Object, p: &PropertyKey) -> bool {
    let data = &mut agent[o];
    if let ObjectKind::Array(array) = &mut data.kind {
        if let Some(index) = p.as_array_index() {
            if array.frozen {
                return !array.has(index as usize);
            }
            array.remove(index as usize);
            return true;
        }
        if p.as_str() == Some("length") {
            return false;
        }
    }
    // 1. Let desc be ? O.[[GetOwnProperty]](P).
    let Some(position) = data.properties.iter().position(|property| &property.key == p) else {
        // 2. If desc is undefined, return true.
        return true;
    };
    // 3. If desc.[[Configurable]] is true, then
    if data.properties[position].configurable {
        // a. Remove the own property with name P from O.
        data.properties.remove(position);
        // b. Return true.
        return true;
    }
    // 4. Return false.
    false
}

/// ### [7.3.11 HasProperty ( O, P )](https://tc39.es/ecma262/#sec-hasproperty)
pub(crate) fn has_property(agent: &mut Agent, o: Object, p: &PropertyKey) -> bool {
    has_own_property(agent, o, p) || get_intrinsic_property(agent, &Value::Object(o), p).is_some()
}

/// ### [7.3.12 HasOwnProperty ( O, P )](https://tc39.es/ecma262/#sec-hasownproperty)
pub(crate) fn has_own_property(agent: &Agent, o: Object, p: &PropertyKey) -> bool {
    // 1. Let desc be ? O.[[GetOwnProperty]](P).
    // 2. If desc is undefined, return false.
    // 3. Return true.
    get_own_property(agent, o, p).is_some()
}

/// ### [7.3.13 Call ( F, V \[ , argumentsList \] )](https://tc39.es/ecma262/#sec-call)
///
/// The abstract operation Call takes arguments F (an ECMAScript language
/// value) and V (an ECMAScript language value) and optional argument
/// argumentsList (a List of ECMAScript language values) and returns either a
/// normal completion containing an ECMAScript language value or a throw
/// completion. It is used to call the \[\[Call\]\] internal method of a
/// function object.
pub(crate) fn call(agent: &mut Agent, f: &Value, v: Value, arguments_list: &[Value]) -> JsResult<Value> {
    // 2. If IsCallable(F) is false, throw a TypeError exception.
    let Some(f) = is_callable(agent, f) else {
        let message = format!("{} is not a function", f.string_repr(agent));
        return Err(agent.throw_exception(ExceptionType::TypeError, message));
    };
    // 3. Return ? F.[[Call]](V, argumentsList).
    call_function(agent, f, v, arguments_list)
}

/// \[\[Call\]\] of a function object.
pub(crate) fn call_function(agent: &mut Agent, f: Object, v: Value, arguments_list: &[Value]) -> JsResult<Value> {
    match builtin_behaviour(agent, f) {
        Some(Behaviour::Regular(behaviour)) => behaviour(agent, v, ArgumentsList(arguments_list)),
        Some(Behaviour::Constructor(behaviour)) => {
            behaviour(agent, v, ArgumentsList(arguments_list), None)
        }
        None => ecmascript_function::internal_call(agent, f, arguments_list),
    }
}

fn builtin_behaviour(agent: &Agent, f: Object) -> Option<Behaviour> {
    match &agent[f].kind {
        ObjectKind::BuiltinFunction(data) => Some(data.behaviour),
        ObjectKind::ECMAScriptFunction(_) => None,
        _ => unreachable!("function object expected"),
    }
}

/// ### [7.3.14 Construct ( F \[ , argumentsList \[ , newTarget \] \] )](https://tc39.es/ecma262/#sec-construct)
pub(crate) fn construct(agent: &mut Agent, f: &Value, arguments_list: &[Value]) -> JsResult<Value> {
    let Some(f) = is_constructor(agent, f) else {
        let message = format!("{} is not a constructor", f.string_repr(agent));
        return Err(agent.throw_exception(ExceptionType::TypeError, message));
    };
    // 1. If newTarget is not present, set newTarget to F.
    // 3. Return ? F.[[Construct]](argumentsList, newTarget).
    match builtin_behaviour(agent, f) {
        Some(Behaviour::Constructor(behaviour)) => {
            behaviour(agent, Value::Undefined, ArgumentsList(arguments_list), Some(f))
        }
        Some(Behaviour::Regular(_)) => unreachable!(),
        None => ecmascript_function::internal_construct(agent, f, arguments_list),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum IntegrityLevel {
    Sealed,
    Frozen,
}

pub(crate) trait Level {
    const LEVEL: IntegrityLevel;
}

pub(crate) mod integrity {
    use super::{IntegrityLevel, Level};

    pub(crate) struct Sealed {}
    pub(crate) struct Frozen {}

    impl Level for Sealed {
        const LEVEL: IntegrityLevel = IntegrityLevel::Sealed;
    }

    impl Level for Frozen {
        const LEVEL: IntegrityLevel = IntegrityLevel::Frozen;
    }
}

/// ### [7.3.15 SetIntegrityLevel ( O, level )](https://tc39.es/ecma262/#sec-setintegritylevel)
///
/// The abstract operation SetIntegrityLevel takes arguments O (an Object) and
/// level (SEALED or FROZEN) and returns either a normal completion containing
/// a Boolean or a throw completion. It is used to fix the set of own
/// properties of an object.
pub(crate) fn set_integrity_level<T: Level>(agent: &mut Agent, o: Object) -> bool {
    let data = &mut agent[o];
    // 1. Let status be ? O.[[PreventExtensions]]().
    data.extensible = false;
    let frozen = T::LEVEL == IntegrityLevel::Frozen;
    if let ObjectKind::Array(array) = &mut data.kind {
        // Array elements cannot be sealed without being frozen.
        array.frozen = true;
    }
    // 3. Let keys be ? O.[[OwnPropertyKeys]]().
    // 4. If level is SEALED, then
    //    a. For each element k of keys, do
    //       i. Perform ? DefinePropertyOrThrow(O, k, PropertyDescriptor { [[Configurable]]: false }).
    // 5. Else,
    //    b. For each element k of keys, do
    //       ii. Let desc be the PropertyDescriptor { [[Configurable]]: false, [[Writable]]: false }.
    for property in data.properties.iter_mut() {
        property.configurable = false;
        if frozen {
            property.writable = false;
        }
    }
    // 6. Return true.
    true
}

/// ### [7.3.16 TestIntegrityLevel ( O, level )](https://tc39.es/ecma262/#sec-testintegritylevel)
///
/// The abstract operation TestIntegrityLevel takes arguments O (an Object) and
/// level (SEALED or FROZEN) and returns either a normal completion containing a
/// Boolean or a throw completion. It is used to determine if the set of own
/// properties of an object are fixed.
pub(crate) fn test_integrity_level<T: Level>(agent: &Agent, o: Object) -> bool {
    let data = &agent[o];
    // 1. Let extensible be ? IsExtensible(O).
    // 2. If extensible is true, return false.
    if data.extensible {
        return false;
    }
    if let ObjectKind::Array(array) = &data.kind {
        if !array.frozen && array.present().next().is_some() {
            return false;
        }
    }
    // 5. For each element k of keys, do
    data.properties.iter().all(|property| {
        // i. If currentDesc.[[Configurable]] is true, return false.
        // ii. If level is FROZEN and IsDataDescriptor(currentDesc) is true, then
        //     1. If currentDesc.[[Writable]] is true, return false.
        !property.configurable && !(T::LEVEL == IntegrityLevel::Frozen && property.writable)
    })
}

/// ### [7.3.18 LengthOfArrayLike ( obj )](https://tc39.es/ecma262/#sec-lengthofarraylike)
pub(crate) fn length_of_array_like(agent: &mut Agent, obj: Object) -> JsResult<usize> {
    // 1. Return ℝ(? ToLength(? Get(obj, "length"))).
    let length = get(agent, obj, &PropertyKey::from("length"));
    to_length(agent, &length)
}

/// Longest argument list built from an array-like.
pub(crate) const MAX_ARGUMENTS_LENGTH: usize = 65535;

/// ### [7.3.19 CreateListFromArrayLike ( obj )](https://tc39.es/ecma262/#sec-createlistfromarraylike)
pub(crate) fn create_list_from_array_like(agent: &mut Agent, obj: &Value) -> JsResult<Vec<Value>> {
    // 2. If obj is not an Object, throw a TypeError exception.
    let Value::Object(obj) = obj else {
        return Err(agent.throw_exception_with_static_message(
            ExceptionType::TypeError,
            "CreateListFromArrayLike called on non-object",
        ));
    };
    // 3. Let len be ? LengthOfArrayLike(obj).
    let len = length_of_array_like(agent, *obj)?;
    if len > MAX_ARGUMENTS_LENGTH {
        let message = format!("Too many arguments in function call (only {MAX_ARGUMENTS_LENGTH} allowed)");
        return Err(agent.throw_exception(ExceptionType::RangeError, message));
    }
    if let Some(elements) = obj.array_elements(agent) {
        return Ok(elements);
    }
    // 4. Let list be a new empty List.
    // 5. Let index be 0.
    // 6. Repeat, while index < len,
    //    a. Let indexName be ! ToString(𝔽(index)).
    //    b. Let next be ? Get(obj, indexName).
    //    d. Append next to list.
    let list = (0..len)
        .map(|index| get(agent, *obj, &PropertyKey::from(index)))
        .collect();
    // 7. Return list.
    Ok(list)
}

/// ### [10.1.11.1 OrdinaryOwnPropertyKeys ( O )](https://tc39.es/ecma262/#sec-ordinaryownpropertykeys)
pub(crate) fn own_property_keys(agent: &Agent, o: Object) -> Vec<PropertyKey> {
    let data = &agent[o];
    // 1. Let keys be a new empty List.
    let mut keys = Vec::with_capacity(data.properties.len());
    // 2. For each own property key P of O such that P is an array index, in
    //    ascending numeric index order, do
    //    a. Append P to keys.
    if let ObjectKind::Array(array) = &data.kind {
        keys.extend(array.present().map(|(index, _)| PropertyKey::from(index)));
        keys.push(PropertyKey::from("length"));
    }
    let mut indexes = data
        .properties
        .iter()
        .filter_map(|property| property.key.as_array_index())
        .collect::<Vec<_>>();
    indexes.sort_unstable();
    keys.extend(indexes.into_iter().map(PropertyKey::from));
    // 3. For each own property key P of O such that P is a String and P is
    //    not an array index, in ascending chronological order of property
    //    creation, do
    //    a. Append P to keys.
    keys.extend(
        data.properties
            .iter()
            .filter(|property| !property.key.is_symbol() && !property.key.is_array_index())
            .map(|property| property.key.clone()),
    );
    // 4. For each own property key P of O such that P is a Symbol, in
    //    ascending chronological order of property creation, do
    //    a. Append P to keys.
    keys.extend(
        data.properties
            .iter()
            .filter(|property| property.key.is_symbol())
            .map(|property| property.key.clone()),
    );
    // 5. Return keys.
    keys
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum EnumPropKind {
    Key,
    Value,
    KeyValue,
}

pub(crate) trait EnumerablePropertiesKind {
    const KIND: EnumPropKind;
}

pub(crate) mod enumerable_properties_kind {
    use super::{EnumPropKind, EnumerablePropertiesKind};

    pub(crate) struct Key;
    pub(crate) struct Value;
    pub(crate) struct KeyValue;

    impl EnumerablePropertiesKind for Key {
        const KIND: EnumPropKind = EnumPropKind::Key;
    }

    impl EnumerablePropertiesKind for Value {
        const KIND: EnumPropKind = EnumPropKind::Value;
    }

    impl EnumerablePropertiesKind for KeyValue {
        const KIND: EnumPropKind = EnumPropKind::KeyValue;
    }
}

/// ### [7.3.23 EnumerableOwnProperties ( O, kind )](https://tc39.es/ecma262/#sec-enumerableownproperties)
///
/// The abstract operation EnumerableOwnProperties takes arguments O (an
/// Object) and kind (KEY, VALUE, or KEY+VALUE) and returns either a normal
/// completion containing a List of ECMAScript language values or a throw
/// completion.
pub(crate) fn enumerable_own_properties<Kind: EnumerablePropertiesKind>(
    agent: &mut Agent,
    o: Object,
) -> Vec<Value> {
    // 1. Let ownKeys be ? O.[[OwnPropertyKeys]]().
    let own_keys = own_property_keys(agent, o);
    // 2. Let results be a new empty List.
    let mut results = Vec::with_capacity(own_keys.len());
    // 3. For each element key of ownKeys, do
    for key in own_keys {
        // a. If key is a String, then
        let PropertyKey::String(key_string) = &key else {
            continue;
        };
        // i. Let desc be ? O.[[GetOwnProperty]](key).
        // ii. If desc is not undefined and desc.[[Enumerable]] is true, then
        let Some(desc) = get_own_property(agent, o, &key) else {
            continue;
        };
        if desc.enumerable != Some(true) {
            continue;
        }
        // 1. If kind is KEY, then
        if Kind::KIND == EnumPropKind::Key {
            // a. Append key to results.
            results.push(Value::String(key_string.clone()));
            continue;
        }
        // 2. Else,
        //    a. Let value be ? Get(O, key).
        let value = desc.value.unwrap_or_default();
        if Kind::KIND == EnumPropKind::Value {
            // b. If kind is VALUE, then
            //    i. Append value to results.
            results.push(value);
        } else {
            // c. Else,
            //    i. Assert: kind is KEY+VALUE.
            //    ii. Let entry be CreateArrayFromList(« key, value »).
            let entry = create_array_from_list(agent, vec![Value::String(key_string.clone()), value]);
            //    iii. Append entry to results.
            results.push(Value::Object(entry));
        }
    }
    // 4. Return results.
    results
}

/// ### [7.3.25 CopyDataProperties ( target, source, excludedItems )](https://tc39.es/ecma262/#sec-copydataproperties)
///
/// The abstract operation CopyDataProperties takes arguments target (an
/// Object), source (an ECMAScript language value), and excludedItems (a List
/// of property keys) and returns either a normal completion containing unused
/// or a throw completion.
pub(crate) fn copy_data_properties(
    agent: &mut Agent,
    target: Object,
    source: &Value,
    excluded_items: &[PropertyKey],
) -> JsResult<()> {
    // 1. If source is either undefined or null, return unused.
    // 2. Let from be ! ToObject(source).
    let from = match source {
        Value::Object(from) => *from,
        Value::String(string) => {
            // String wrapper objects expose one enumerable own property per
            // code unit.
            for (index, unit) in string_code_units(string).into_iter().enumerate() {
                let key = PropertyKey::from(index);
                if !excluded_items.contains(&key) {
                    create_data_property_or_throw(agent, target, key, Value::String(unit))?;
                }
            }
            return Ok(());
        }
        _ => return Ok(()),
    };
    // 3. Let keys be ? from.[[OwnPropertyKeys]]().
    let keys = own_property_keys(agent, from);
    // 4. For each element nextKey of keys, do
    for next_key in keys {
        // a. Let excluded be false.
        // b. For each element e of excludedItems, do
        //    i. If SameValue(e, nextKey) is true, then
        //       1. Set excluded to true.
        if excluded_items.contains(&next_key) {
            continue;
        }
        // c. If excluded is false, then
        //    i. Let desc be ? from.[[GetOwnProperty]](nextKey).
        //    ii. If desc is not undefined and desc.[[Enumerable]] is true, then
        let Some(desc) = get_own_property(agent, from, &next_key) else {
            continue;
        };
        if desc.enumerable != Some(true) {
            continue;
        }
        // 1. Let propValue be ? Get(from, nextKey).
        // 2. Perform ! CreateDataPropertyOrThrow(target, nextKey, propValue).
        create_data_property_or_throw(agent, target, next_key, desc.value.unwrap_or_default())?;
    }
    // 5. Return unused.
    Ok(())
}

fn string_code_units(string: &JsString) -> Vec<JsString> {
    string
        .code_units()
        .map(|unit| JsString::from_code_units(&[unit]))
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ecmascript::execution::AgentOptions;

    #[test]
    fn integer_keys_are_ordered_first() {
        let mut agent = Agent::new(AgentOptions::default());
        let object = ordinary_object_create(&mut agent);
        for key in ["b", "2", "a", "1"] {
            create_data_property_or_throw(&mut agent, object, PropertyKey::from(key), Value::from(key)).unwrap();
        }
        let keys = own_property_keys(&agent, object);
        let keys = keys.iter().filter_map(PropertyKey::as_str).collect::<Vec<_>>();
        assert_eq!(keys, ["1", "2", "b", "a"]);
    }

    #[test]
    fn frozen_object_rejects_writes() {
        let mut agent = Agent::new(AgentOptions::default());
        let object = ordinary_object_create(&mut agent);
        create_data_property_or_throw(&mut agent, object, PropertyKey::from("a"), Value::from(1)).unwrap();
        set_integrity_level::<integrity::Frozen>(&mut agent, object);
        assert!(test_integrity_level::<integrity::Frozen>(&agent, object));
        assert!(!set(&mut agent, object, PropertyKey::from("a"), Value::from(2), false).unwrap());
        let error = set(&mut agent, object, PropertyKey::from("b"), Value::from(2), true).unwrap_err();
        assert_eq!(agent.exception_type(&error), Some(ExceptionType::TypeError));
        assert!(!delete(&mut agent, object, &PropertyKey::from("a")));
        assert_eq!(get(&mut agent, object, &PropertyKey::from("a")), Value::from(1));
    }

    #[test]
    fn array_writes_grow_with_holes() {
        let mut agent = Agent::new(AgentOptions::default());
        let array = create_array_from_list(&mut agent, vec![Value::from(1)]);
        set(&mut agent, array, PropertyKey::from(3u32), Value::from(4), true).unwrap();
        assert_eq!(get(&mut agent, array, &PropertyKey::from("length")), Value::from(4));
        assert!(get_own_property(&agent, array, &PropertyKey::from(1u32)).is_none());
        set(&mut agent, array, PropertyKey::from("length"), Value::from(1), true).unwrap();
        assert_eq!(array.array_elements(&agent).unwrap(), vec![Value::from(1)]);
        let error = set(&mut agent, array, PropertyKey::from("length"), Value::from(-1), true).unwrap_err();
        assert_eq!(agent.exception_type(&error), Some(ExceptionType::RangeError));
    }

    #[test]
    fn far_array_writes_keep_their_length() {
        let mut agent = Agent::new(AgentOptions::default());
        let array = create_array_from_list(&mut agent, vec![]);
        set(&mut agent, array, PropertyKey::from(4294967294u32), Value::from(1), true).unwrap();
        assert_eq!(get(&mut agent, array, &PropertyKey::from("length")), Value::from(4294967295u32));
        assert_eq!(get(&mut agent, array, &PropertyKey::from(4294967294u32)), Value::from(1));
        let keys = own_property_keys(&agent, array);
        assert_eq!(keys, vec![PropertyKey::from(4294967294u32), PropertyKey::from("length")]);
        set(&mut agent, array, PropertyKey::from("length"), Value::from(16777300), true).unwrap();
        assert_eq!(get(&mut agent, array, &PropertyKey::from("length")), Value::from(16777300));
        assert!(get_own_property(&agent, array, &PropertyKey::from(4294967294u32)).is_none());
    }

    #[test]
    fn argument_lists_from_array_likes_are_bounded() {
        let mut agent = Agent::new(AgentOptions::default());
        let array_like = ordinary_object_create(&mut agent);
        create_data_property_or_throw(&mut agent, array_like, PropertyKey::from("length"), Value::from(2)).unwrap();
        create_data_property_or_throw(&mut agent, array_like, PropertyKey::from(1u32), Value::from("b")).unwrap();
        let list = create_list_from_array_like(&mut agent, &Value::Object(array_like)).unwrap();
        assert_eq!(list, vec![Value::Undefined, Value::from("b")]);
        let huge = create_array_from_list(&mut agent, vec![]);
        set(&mut agent, huge, PropertyKey::from("length"), Value::from(1_000_000), true).unwrap();
        let error = create_list_from_array_like(&mut agent, &Value::Object(huge)).unwrap_err();
        assert_eq!(agent.exception_type(&error), Some(ExceptionType::RangeError));
    }

    #[test]
    fn copy_data_properties_skips_excluded_keys() {
        let mut agent = Agent::new(AgentOptions::default());
        let source = ordinary_object_create(&mut agent);
        for key in ["a", "b", "c"] {
            create_data_property_or_throw(&mut agent, source, PropertyKey::from(key), Value::from(key)).unwrap();
        }
        let target = ordinary_object_create(&mut agent);
        copy_data_properties(&mut agent, target, &Value::Object(source), &[PropertyKey::from("a")]).unwrap();
        let keys = enumerable_own_properties::<enumerable_properties_kind::Key>(&mut agent, target);
        assert_eq!(keys, vec![Value::from("b"), Value::from("c")]);
    }
}
