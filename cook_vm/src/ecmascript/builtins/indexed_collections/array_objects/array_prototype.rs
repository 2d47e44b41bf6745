// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::ecmascript::{
    abstract_operations::{
        operations_on_objects::call_function,
        testing_and_comparison::{is_callable, is_strictly_equal, same_value_zero},
        type_conversion::{to_boolean, to_integer_or_infinity, to_string},
    },
    builtins::{
        ArgumentsList, Behaviour, Builtin,
        array::{
            ArrayHeapData, MAX_ARRAY_LENGTH, array_create_from_data, array_join,
            create_array_from_list,
        },
        intrinsics::intrinsic_function,
    },
    execution::{Agent, ExceptionType, JsError, JsResult},
    types::{JsString, Object, ObjectKind, Value},
};

pub(crate) struct ArrayPrototype;

struct ArrayPrototypeConcat;
impl Builtin for ArrayPrototypeConcat {
    const NAME: &'static str = "concat";
    const LENGTH: u8 = 1;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ArrayPrototype::concat);
}
struct ArrayPrototypeEvery;
impl Builtin for ArrayPrototypeEvery {
    const NAME: &'static str = "every";
    const LENGTH: u8 = 1;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ArrayPrototype::every);
}
struct ArrayPrototypeFilter;
impl Builtin for ArrayPrototypeFilter {
    const NAME: &'static str = "filter";
    const LENGTH: u8 = 1;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ArrayPrototype::filter);
}
struct ArrayPrototypeFind;
impl Builtin for ArrayPrototypeFind {
    const NAME: &'static str = "find";
    const LENGTH: u8 = 1;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ArrayPrototype::find);
}
struct ArrayPrototypeFindIndex;
impl Builtin for ArrayPrototypeFindIndex {
    const NAME: &'static str = "findIndex";
    const LENGTH: u8 = 1;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ArrayPrototype::find_index);
}
struct ArrayPrototypeForEach;
impl Builtin for ArrayPrototypeForEach {
    const NAME: &'static str = "forEach";
    const LENGTH: u8 = 1;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ArrayPrototype::for_each);
}
struct ArrayPrototypeIncludes;
impl Builtin for ArrayPrototypeIncludes {
    const NAME: &'static str = "includes";
    const LENGTH: u8 = 1;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ArrayPrototype::includes);
}
struct ArrayPrototypeIndexOf;
impl Builtin for ArrayPrototypeIndexOf {
    const NAME: &'static str = "indexOf";
    const LENGTH: u8 = 1;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ArrayPrototype::index_of);
}
struct ArrayPrototypeJoin;
impl Builtin for ArrayPrototypeJoin {
    const NAME: &'static str = "join";
    const LENGTH: u8 = 1;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ArrayPrototype::join);
}
struct ArrayPrototypeMap;
impl Builtin for ArrayPrototypeMap {
    const NAME: &'static str = "map";
    const LENGTH: u8 = 1;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ArrayPrototype::map);
}
struct ArrayPrototypePop;
impl Builtin for ArrayPrototypePop {
    const NAME: &'static str = "pop";
    const LENGTH: u8 = 0;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ArrayPrototype::pop);
}
struct ArrayPrototypePush;
impl Builtin for ArrayPrototypePush {
    const NAME: &'static str = "push";
    const LENGTH: u8 = 1;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ArrayPrototype::push);
}
struct ArrayPrototypeReduce;
impl Builtin for ArrayPrototypeReduce {
    const NAME: &'static str = "reduce";
    const LENGTH: u8 = 1;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ArrayPrototype::reduce);
}
struct ArrayPrototypeReverse;
impl Builtin for ArrayPrototypeReverse {
    const NAME: &'static str = "reverse";
    const LENGTH: u8 = 0;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ArrayPrototype::reverse);
}
struct ArrayPrototypeShift;
impl Builtin for ArrayPrototypeShift {
    const NAME: &'static str = "shift";
    const LENGTH: u8 = 0;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ArrayPrototype::shift);
}
struct ArrayPrototypeSlice;
impl Builtin for ArrayPrototypeSlice {
    const NAME: &'static str = "slice";
    const LENGTH: u8 = 2;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ArrayPrototype::slice);
}
struct ArrayPrototypeSome;
impl Builtin for ArrayPrototypeSome {
    const NAME: &'static str = "some";
    const LENGTH: u8 = 1;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ArrayPrototype::some);
}
struct ArrayPrototypeToString;
impl Builtin for ArrayPrototypeToString {
    const NAME: &'static str = "toString";
    const LENGTH: u8 = 0;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ArrayPrototype::to_string);
}
struct ArrayPrototypeUnshift;
impl Builtin for ArrayPrototypeUnshift {
    const NAME: &'static str = "unshift";
    const LENGTH: u8 = 1;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ArrayPrototype::unshift);
}

impl ArrayPrototype {
    const PREFIX: &'static str = "Array.prototype";

    /// ### [23.1.3.2 Array.prototype.concat ( ...items )](https://tc39.es/ecma262/#sec-array.prototype.concat)
    ///
    /// Arrays are spread into the result, holes included; anything else is
    /// appended as a single element.
    fn concat(agent: &mut Agent, this_value: Value, items: ArgumentsList) -> JsResult<Value> {
        // 1. Let O be ? ToObject(this value).
        let o = this_array(agent, &this_value, "concat")?;
        // 2. Let A be ? ArraySpeciesCreate(O, 0).
        let mut a = array_data(agent, o).clone();
        a.frozen = false;
        // 5. For each element E of items, do
        for e in items.iter() {
            // a. Let spreadable be ? IsConcatSpreadable(E).
            let e_len = match e {
                Value::Object(e) if e.is_array(agent) => array_data(agent, *e).len(),
                _ => 1,
            };
            // c. If n + len > 2**53 - 1, throw a TypeError exception.
            if a.len() + e_len > MAX_ARRAY_LENGTH {
                return Err(invalid_array_length(agent));
            }
            match e {
                Value::Object(e) if e.is_array(agent) => {
                    let n = a.len();
                    for (k, sub_element) in array_data(agent, *e).present() {
                        a.set((n + k) as u32, sub_element.clone());
                    }
                    a.set_len((n + e_len) as u32);
                }
                _ => a.push(e.clone()),
            }
        }
        // 7. Return A.
        Ok(Value::Object(array_create_from_data(agent, a)))
    }

    /// ### [23.1.3.6 Array.prototype.every ( callbackfn \[ , thisArg \] )](https://tc39.es/ecma262/#sec-array.prototype.every)
    fn every(agent: &mut Agent, this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
        let (o, callback, this_arg) = callback_arguments(agent, &this_value, arguments, "every")?;
        // 3. Let len be ? LengthOfArrayLike(O).
        let len = length(agent, o);
        // 6. Repeat, while k < len,
        let mut k = 0;
        // b. Let kPresent be ? HasProperty(O, Pk).
        // c. If kPresent is true, then
        while let Some((index, k_value)) = next_element(agent, o, k, len) {
            // ii. Let testResult be ToBoolean(? Call(callbackfn, thisArg, « kValue, 𝔽(k), O »)).
            let test_result = call_function(
                agent,
                callback,
                this_arg.clone(),
                &[k_value, Value::from(index), Value::Object(o)],
            )?;
            // iii. If testResult is false, return false.
            if !to_boolean(&test_result) {
                return Ok(Value::Boolean(false));
            }
            k = index + 1;
        }
        // 7. Return true.
        Ok(Value::Boolean(true))
    }

    /// ### [23.1.3.8 Array.prototype.filter ( callbackfn \[ , thisArg \] )](https://tc39.es/ecma262/#sec-array.prototype.filter)
    fn filter(agent: &mut Agent, this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
        let (o, callback, this_arg) = callback_arguments(agent, &this_value, arguments, "filter")?;
        let len = length(agent, o);
        // 5. Let A be ? ArraySpeciesCreate(O, 0).
        let mut a = Vec::new();
        let mut k = 0;
        while let Some((index, k_value)) = next_element(agent, o, k, len) {
            // ii. Let selected be ToBoolean(? Call(callbackfn, thisArg, « kValue, 𝔽(k), O »)).
            let selected = call_function(
                agent,
                callback,
                this_arg.clone(),
                &[k_value.clone(), Value::from(index), Value::Object(o)],
            )?;
            // iii. If selected is true, then
            if to_boolean(&selected) {
                // 1. Perform ? CreateDataPropertyOrThrow(A, ! ToString(𝔽(to)), kValue).
                a.push(k_value);
            }
            k = index + 1;
        }
        Ok(Value::Object(create_array_from_list(agent, a)))
    }

    /// ### [23.1.3.9 Array.prototype.find ( predicate \[ , thisArg \] )](https://tc39.es/ecma262/#sec-array.prototype.find)
    fn find(agent: &mut Agent, this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
        let (o, predicate, this_arg) = callback_arguments(agent, &this_value, arguments, "find")?;
        let found = find_via_predicate(agent, o, predicate, this_arg)?;
        Ok(found.map(|(_, value)| value).unwrap_or_default())
    }

    /// ### [23.1.3.10 Array.prototype.findIndex ( predicate \[ , thisArg \] )](https://tc39.es/ecma262/#sec-array.prototype.findindex)
    fn find_index(agent: &mut Agent, this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
        let (o, predicate, this_arg) =
            callback_arguments(agent, &this_value, arguments, "findIndex")?;
        let found = find_via_predicate(agent, o, predicate, this_arg)?;
        Ok(found.map_or(Value::from(-1), |(index, _)| Value::from(index)))
    }

    /// ### [23.1.3.15 Array.prototype.forEach ( callbackfn \[ , thisArg \] )](https://tc39.es/ecma262/#sec-array.prototype.foreach)
    fn for_each(agent: &mut Agent, this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
        let (o, callback, this_arg) = callback_arguments(agent, &this_value, arguments, "forEach")?;
        let len = length(agent, o);
        let mut k = 0;
        while let Some((index, k_value)) = next_element(agent, o, k, len) {
            // ii. Perform ? Call(callbackfn, thisArg, « kValue, 𝔽(k), O »).
            call_function(
                agent,
                callback,
                this_arg.clone(),
                &[k_value, Value::from(index), Value::Object(o)],
            )?;
            k = index + 1;
        }
        // 6. Return undefined.
        Ok(Value::Undefined)
    }

    /// ### [23.1.3.16 Array.prototype.includes ( searchElement \[ , fromIndex \] )](https://tc39.es/ecma262/#sec-array.prototype.includes)
    fn includes(agent: &mut Agent, this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
        let o = this_array(agent, &this_value, "includes")?;
        let search_element = arguments.get(0);
        let len = length(agent, o);
        // 3. If len = 0, return false.
        if len == 0 {
            return Ok(Value::Boolean(false));
        }
        // 4. Let n be ? ToIntegerOrInfinity(fromIndex).
        let n = to_integer_or_infinity(agent, &arguments.get(1))?;
        let k = relative_start(n, len);
        // 10. Repeat, while k < len,
        //     a. Let elementK be ? Get(O, ! ToString(𝔽(k))).
        //     b. If SameValueZero(searchElement, elementK) is true, return true.
        // Holes read as undefined.
        let data = array_data(agent, o);
        let found = (search_element.is_undefined() && data.has_holes_from(k))
            || data
                .present_from(k)
                .any(|(_, element)| same_value_zero(&search_element, element));
        Ok(Value::Boolean(found))
    }

    /// ### [23.1.3.17 Array.prototype.indexOf ( searchElement \[ , fromIndex \] )](https://tc39.es/ecma262/#sec-array.prototype.indexof)
    fn index_of(agent: &mut Agent, this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
        let o = this_array(agent, &this_value, "indexOf")?;
        let search_element = arguments.get(0);
        let len = length(agent, o);
        if len == 0 {
            return Ok(Value::from(-1));
        }
        let n = to_integer_or_infinity(agent, &arguments.get(1))?;
        let k = relative_start(n, len);
        // 9. Repeat, while k < len,
        //    a. Let kPresent be ? HasProperty(O, ! ToString(𝔽(k))).
        //    b. If kPresent is true, then
        //       ii. If IsStrictlyEqual(searchElement, elementK) is true, return 𝔽(k).
        let position = array_data(agent, o)
            .present_from(k)
            .find(|(_, element)| is_strictly_equal(&search_element, element))
            .map(|(index, _)| index);
        // 10. Return -1𝔽.
        Ok(position.map_or(Value::from(-1), Value::from))
    }

    /// ### [23.1.3.18 Array.prototype.join ( separator )](https://tc39.es/ecma262/#sec-array.prototype.join)
    fn join(agent: &mut Agent, this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
        let o = this_array(agent, &this_value, "join")?;
        let separator = arguments.get(0);
        // 3. If separator is undefined, let sep be ",".
        // 4. Else, let sep be ? ToString(separator).
        let sep = if separator.is_undefined() {
            JsString::from(",")
        } else {
            to_string(agent, &separator)?
        };
        array_join(agent, o, &sep).map(Value::String)
    }

    /// ### [23.1.3.21 Array.prototype.map ( callbackfn \[ , thisArg \] )](https://tc39.es/ecma262/#sec-array.prototype.map)
    fn map(agent: &mut Agent, this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
        let (o, callback, this_arg) = callback_arguments(agent, &this_value, arguments, "map")?;
        let len = length(agent, o);
        // 4. Let A be ? ArraySpeciesCreate(O, len).
        let mut a = ArrayHeapData::with_length(len as u32);
        let mut k = 0;
        while let Some((index, k_value)) = next_element(agent, o, k, len) {
            // ii. Let mappedValue be ? Call(callbackfn, thisArg, « kValue, 𝔽(k), O »).
            let mapped_value = call_function(
                agent,
                callback,
                this_arg.clone(),
                &[k_value, Value::from(index), Value::Object(o)],
            )?;
            // iii. Perform ? CreateDataPropertyOrThrow(A, Pk, mappedValue).
            a.set(index as u32, mapped_value);
            k = index + 1;
        }
        Ok(Value::Object(array_create_from_data(agent, a)))
    }

    /// ### [23.1.3.22 Array.prototype.pop ( )](https://tc39.es/ecma262/#sec-array.prototype.pop)
    fn pop(agent: &mut Agent, this_value: Value, _: ArgumentsList) -> JsResult<Value> {
        let o = this_array(agent, &this_value, "pop")?;
        let data = mutable_array_data(agent, o)?;
        // 2. Let len be ? LengthOfArrayLike(O).
        let len = data.len();
        // 3. If len = 0, then
        //    b. Return undefined.
        if len == 0 {
            return Ok(Value::Undefined);
        }
        // 4. Else,
        //    c. Let element be ? Get(O, index).
        //    d. Perform ? DeletePropertyOrThrow(O, index).
        let element = data.remove(len - 1);
        //    e. Perform ? Set(O, "length", newLen, true).
        data.set_len((len - 1) as u32);
        Ok(element.unwrap_or_default())
    }

    /// ### [23.1.3.23 Array.prototype.push ( ...items )](https://tc39.es/ecma262/#sec-array.prototype.push)
    fn push(agent: &mut Agent, this_value: Value, items: ArgumentsList) -> JsResult<Value> {
        let o = this_array(agent, &this_value, "push")?;
        // 2. Let len be ? LengthOfArrayLike(O).
        let len = mutable_array_data(agent, o)?.len();
        // 4. If len + argCount > 2**53 - 1, throw a TypeError exception.
        if len + items.len() > MAX_ARRAY_LENGTH {
            return Err(invalid_array_length(agent));
        }
        let data = mutable_array_data(agent, o)?;
        // 5. For each element E of items, do
        //    a. Perform ? Set(O, ! ToString(𝔽(len)), E, true).
        for item in items.iter() {
            data.push(item.clone());
        }
        // 7. Return 𝔽(len).
        Ok(Value::from(data.len()))
    }

    /// ### [23.1.3.24 Array.prototype.reduce ( callbackfn \[ , initialValue \] )](https://tc39.es/ecma262/#sec-array.prototype.reduce)
    fn reduce(agent: &mut Agent, this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
        let (o, callback, _) = callback_arguments(agent, &this_value, arguments, "reduce")?;
        let len = length(agent, o);
        let mut k = 0;
        // 6. Let accumulator be undefined.
        // 7. If initialValue is present, then
        //    a. Set accumulator to initialValue.
        let mut accumulator = if arguments.len() > 1 {
            arguments.get(1)
        } else {
            // 8. Else,
            //    b. Repeat, while kPresent is false and k < len,
            //       ii. Set kPresent to ? HasProperty(O, Pk).
            //       iii. If kPresent is true, then
            //            1. Set accumulator to ? Get(O, Pk).
            //       iv. Set k to k + 1.
            // c. If kPresent is false, throw a TypeError exception.
            let Some((index, first)) = next_element(agent, o, 0, len) else {
                return Err(agent.throw_exception_with_static_message(
                    ExceptionType::TypeError,
                    "Reduce of empty array with no initial value",
                ));
            };
            k = index + 1;
            first
        };
        // 9. Repeat, while k < len,
        while let Some((index, k_value)) = next_element(agent, o, k, len) {
            // i. Set accumulator to ? Call(callbackfn, undefined, « accumulator, kValue, 𝔽(k), O »).
            accumulator = call_function(
                agent,
                callback,
                Value::Undefined,
                &[accumulator, k_value, Value::from(index), Value::Object(o)],
            )?;
            k = index + 1;
        }
        // 10. Return accumulator.
        Ok(accumulator)
    }

    /// ### [23.1.3.26 Array.prototype.reverse ( )](https://tc39.es/ecma262/#sec-array.prototype.reverse)
    fn reverse(agent: &mut Agent, this_value: Value, _: ArgumentsList) -> JsResult<Value> {
        let o = this_array(agent, &this_value, "reverse")?;
        mutable_array_data(agent, o)?.reverse();
        // 6. Return O.
        Ok(this_value)
    }

    /// ### [23.1.3.27 Array.prototype.shift ( )](https://tc39.es/ecma262/#sec-array.prototype.shift)
    fn shift(agent: &mut Agent, this_value: Value, _: ArgumentsList) -> JsResult<Value> {
        let o = this_array(agent, &this_value, "shift")?;
        // 3. If len = 0, then
        //    b. Return undefined.
        // 4. Let first be ? Get(O, "0").
        // 9. Perform ? Set(O, "length", 𝔽(len - 1), true).
        Ok(mutable_array_data(agent, o)?.shift().unwrap_or_default())
    }

    /// ### [23.1.3.28 Array.prototype.slice ( start, end )](https://tc39.es/ecma262/#sec-array.prototype.slice)
    fn slice(agent: &mut Agent, this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
        let o = this_array(agent, &this_value, "slice")?;
        let len = length(agent, o);
        // 3. Let relativeStart be ? ToIntegerOrInfinity(start).
        let relative_start_index = to_integer_or_infinity(agent, &arguments.get(0))?;
        let k = relative_start(relative_start_index, len);
        // 7. If end is undefined, let relativeEnd be len; else let relativeEnd be ? ToIntegerOrInfinity(end).
        let end = arguments.get(1);
        let final_index = if end.is_undefined() {
            len
        } else {
            let relative_end = to_integer_or_infinity(agent, &end)?;
            relative_start(relative_end, len)
        };
        // 11. Let count be max(final - k, 0).
        let count = final_index.saturating_sub(k);
        // 15. Repeat, while k < final,
        //     c. If kPresent is true, then
        //        ii. Perform ? CreateDataPropertyOrThrow(A, ! ToString(𝔽(n)), kValue).
        let entries: Vec<(usize, Value)> = array_data(agent, o)
            .present_from(k)
            .take_while(|(index, _)| *index < final_index)
            .map(|(index, element)| (index - k, element.clone()))
            .collect();
        let a = ArrayHeapData::from_entries(count as u32, entries);
        Ok(Value::Object(array_create_from_data(agent, a)))
    }

    /// ### [23.1.3.29 Array.prototype.some ( callbackfn \[ , thisArg \] )](https://tc39.es/ecma262/#sec-array.prototype.some)
    fn some(agent: &mut Agent, this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
        let (o, callback, this_arg) = callback_arguments(agent, &this_value, arguments, "some")?;
        let len = length(agent, o);
        let mut k = 0;
        while let Some((index, k_value)) = next_element(agent, o, k, len) {
            let test_result = call_function(
                agent,
                callback,
                this_arg.clone(),
                &[k_value, Value::from(index), Value::Object(o)],
            )?;
            // iii. If testResult is true, return true.
            if to_boolean(&test_result) {
                return Ok(Value::Boolean(true));
            }
            k = index + 1;
        }
        Ok(Value::Boolean(false))
    }

    /// ### [23.1.3.36 Array.prototype.toString ( )](https://tc39.es/ecma262/#sec-array.prototype.tostring)
    fn to_string(agent: &mut Agent, this_value: Value, _: ArgumentsList) -> JsResult<Value> {
        let o = this_array(agent, &this_value, "toString")?;
        array_join(agent, o, &JsString::from(",")).map(Value::String)
    }

    /// ### [23.1.3.37 Array.prototype.unshift ( ...items )](https://tc39.es/ecma262/#sec-array.prototype.unshift)
    fn unshift(agent: &mut Agent, this_value: Value, items: ArgumentsList) -> JsResult<Value> {
        let o = this_array(agent, &this_value, "unshift")?;
        let len = mutable_array_data(agent, o)?.len();
        // 4. If argCount > 0, then
        //    a. If len + argCount > 2**53 - 1, throw a TypeError exception.
        if len + items.len() > MAX_ARRAY_LENGTH {
            return Err(invalid_array_length(agent));
        }
        let data = mutable_array_data(agent, o)?;
        data.unshift(items.0);
        // 5. Return 𝔽(len + argCount).
        Ok(Value::from(data.len()))
    }

    pub(crate) fn get_intrinsic(agent: &mut Agent, name: &str) -> Option<Value> {
        Some(match name {
            "concat" => intrinsic_function::<ArrayPrototypeConcat>(agent, Self::PREFIX),
            "every" => intrinsic_function::<ArrayPrototypeEvery>(agent, Self::PREFIX),
            "filter" => intrinsic_function::<ArrayPrototypeFilter>(agent, Self::PREFIX),
            "find" => intrinsic_function::<ArrayPrototypeFind>(agent, Self::PREFIX),
            "findIndex" => intrinsic_function::<ArrayPrototypeFindIndex>(agent, Self::PREFIX),
            "forEach" => intrinsic_function::<ArrayPrototypeForEach>(agent, Self::PREFIX),
            "includes" => intrinsic_function::<ArrayPrototypeIncludes>(agent, Self::PREFIX),
            "indexOf" => intrinsic_function::<ArrayPrototypeIndexOf>(agent, Self::PREFIX),
            "join" => intrinsic_function::<ArrayPrototypeJoin>(agent, Self::PREFIX),
            "map" => intrinsic_function::<ArrayPrototypeMap>(agent, Self::PREFIX),
            "pop" => intrinsic_function::<ArrayPrototypePop>(agent, Self::PREFIX),
            "push" => intrinsic_function::<ArrayPrototypePush>(agent, Self::PREFIX),
            "reduce" => intrinsic_function::<ArrayPrototypeReduce>(agent, Self::PREFIX),
            "reverse" => intrinsic_function::<ArrayPrototypeReverse>(agent, Self::PREFIX),
            "shift" => intrinsic_function::<ArrayPrototypeShift>(agent, Self::PREFIX),
            "slice" => intrinsic_function::<ArrayPrototypeSlice>(agent, Self::PREFIX),
            "some" => intrinsic_function::<ArrayPrototypeSome>(agent, Self::PREFIX),
            "toString" => intrinsic_function::<ArrayPrototypeToString>(agent, Self::PREFIX),
            "unshift" => intrinsic_function::<ArrayPrototypeUnshift>(agent, Self::PREFIX),
            _ => return None,
        })
    }
}

fn this_array(agent: &mut Agent, this_value: &Value, method: &str) -> JsResult<Object> {
    match this_value {
        Value::Object(o) if o.is_array(agent) => Ok(*o),
        _ => Err(agent.throw_exception(
            ExceptionType::TypeError,
            format!("Array.prototype.{method} called on a value that is not an array"),
        )),
    }
}

/// Checks `this` and the callback of the iterating methods.
fn callback_arguments(
    agent: &mut Agent,
    this_value: &Value,
    arguments: ArgumentsList,
    method: &str,
) -> JsResult<(Object, Object, Value)> {
    // 1. Let O be ? ToObject(this value).
    let o = this_array(agent, this_value, method)?;
    let callback = arguments.get(0);
    // 3. If IsCallable(callbackfn) is false, throw a TypeError exception.
    let Some(callback) = is_callable(agent, &callback) else {
        let message = format!("{} is not a function", callback.string_repr(agent));
        return Err(agent.throw_exception(ExceptionType::TypeError, message));
    };
    Ok((o, callback, arguments.get(1)))
}

fn array_data<'b>(agent: &'b Agent<'_>, o: Object) -> &'b ArrayHeapData {
    let ObjectKind::Array(array) = &agent[o].kind else {
        unreachable!("array object expected")
    };
    array
}

fn length(agent: &Agent, o: Object) -> usize {
    array_data(agent, o).len()
}

/// The element at `k`, or `None` for holes and indexes past the end.
/// Callbacks may mutate the array, so iterating methods read one element
/// at a time.
fn element(agent: &Agent, o: Object, k: usize) -> Option<Value> {
    array_data(agent, o).get(k).cloned()
}

/// The first present element in `k..len`. Iterating methods skip holes
/// this way instead of testing every index.
fn next_element(agent: &Agent, o: Object, k: usize, len: usize) -> Option<(usize, Value)> {
    array_data(agent, o)
        .next_present(k)
        .filter(|(index, _)| *index < len)
}

fn mutable_array_data<'b>(agent: &'b mut Agent<'_>, o: Object) -> JsResult<&'b mut ArrayHeapData> {
    let frozen = matches!(&agent[o].kind, ObjectKind::Array(array) if array.frozen);
    if frozen {
        return Err(agent.throw_exception_with_static_message(
            ExceptionType::TypeError,
            "Cannot assign to read only property 'length' of object '[object Array]'",
        ));
    }
    let ObjectKind::Array(array) = &mut agent[o].kind else {
        unreachable!("array object expected")
    };
    Ok(array)
}

fn invalid_array_length(agent: &mut Agent) -> JsError {
    agent.throw_exception_with_static_message(ExceptionType::RangeError, "Invalid array length")
}

/// Clamps a relative index from ToIntegerOrInfinity into `0..=len`.
fn relative_start(relative: f64, len: usize) -> usize {
    if relative < 0.0 {
        (len as f64 + relative).max(0.0) as usize
    } else {
        relative.min(len as f64) as usize
    }
}

/// ### [23.1.3.12.1 FindViaPredicate ( O, len, direction, predicate, thisArg )](https://tc39.es/ecma262/#sec-findviapredicate)
///
/// Holes are visited as undefined.
fn find_via_predicate(
    agent: &mut Agent,
    o: Object,
    predicate: Object,
    this_arg: Value,
) -> JsResult<Option<(usize, Value)>> {
    let len = length(agent, o);
    // 4. For each integer k of indices, do
    for k in 0..len {
        // b. Let kValue be ? Get(O, Pk).
        let k_value = element(agent, o, k).unwrap_or_default();
        // c. Let testResult be ? Call(predicate, thisArg, « kValue, 𝔽(k), O »).
        let test_result = call_function(
            agent,
            predicate,
            this_arg.clone(),
            &[k_value.clone(), Value::from(k), Value::Object(o)],
        )?;
        // d. If ToBoolean(testResult) is true, return the Record { [[Index]]: 𝔽(k), [[Value]]: kValue }.
        if to_boolean(&test_result) {
            return Ok(Some((k, k_value)));
        }
    }
    // 5. Return the Record { [[Index]]: -1𝔽, [[Value]]: undefined }.
    Ok(None)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ecmascript::execution::AgentOptions;

    fn numbers(agent: &mut Agent, values: &[i32]) -> Value {
        let values = values.iter().copied().map(Value::from).collect();
        Value::Object(create_array_from_list(agent, values))
    }

    #[test]
    fn push_pop_shift_unshift() {
        let mut agent = Agent::new(AgentOptions::default());
        let array = numbers(&mut agent, &[2]);
        let len = ArrayPrototype::push(&mut agent, array.clone(), ArgumentsList(&[Value::from(3)]));
        assert_eq!(len.unwrap(), Value::from(2));
        let len = ArrayPrototype::unshift(&mut agent, array.clone(), ArgumentsList(&[Value::from(1)]));
        assert_eq!(len.unwrap(), Value::from(3));
        let last = ArrayPrototype::pop(&mut agent, array.clone(), ArgumentsList(&[]));
        assert_eq!(last.unwrap(), Value::from(3));
        let first = ArrayPrototype::shift(&mut agent, array.clone(), ArgumentsList(&[]));
        assert_eq!(first.unwrap(), Value::from(1));
        let elements = array.as_object().unwrap().array_elements(&agent).unwrap();
        assert_eq!(elements, vec![Value::from(2)]);
    }

    #[test]
    fn slice_uses_relative_indexes() {
        let mut agent = Agent::new(AgentOptions::default());
        let array = numbers(&mut agent, &[1, 2, 3, 4]);
        let sliced =
            ArrayPrototype::slice(&mut agent, array, ArgumentsList(&[Value::from(-3), Value::from(-1)]))
                .unwrap();
        let elements = sliced.as_object().unwrap().array_elements(&agent).unwrap();
        assert_eq!(elements, vec![Value::from(2), Value::from(3)]);
    }

    #[test]
    fn index_of_is_strict_and_includes_finds_nan() {
        let mut agent = Agent::new(AgentOptions::default());
        let array = Value::Object(create_array_from_list(
            &mut agent,
            vec![Value::from("1"), Value::nan(), Value::from(1)],
        ));
        let index = ArrayPrototype::index_of(&mut agent, array.clone(), ArgumentsList(&[Value::from(1)]));
        assert_eq!(index.unwrap(), Value::from(2));
        let index = ArrayPrototype::index_of(&mut agent, array.clone(), ArgumentsList(&[Value::nan()]));
        assert_eq!(index.unwrap(), Value::from(-1));
        let found = ArrayPrototype::includes(&mut agent, array, ArgumentsList(&[Value::nan()]));
        assert_eq!(found.unwrap(), Value::Boolean(true));
    }

    #[test]
    fn reduce_without_initial_value() {
        let mut agent = Agent::new(AgentOptions::default());
        let empty = numbers(&mut agent, &[]);
        let callback = ArrayPrototype::get_intrinsic(&mut agent, "push").unwrap();
        let result = ArrayPrototype::reduce(&mut agent, empty, ArgumentsList(&[callback]));
        let error = result.unwrap_err();
        assert_eq!(agent.exception_type(&error), Some(ExceptionType::TypeError));
    }

    #[test]
    fn non_callable_callbacks_throw() {
        let mut agent = Agent::new(AgentOptions::default());
        let array = numbers(&mut agent, &[1]);
        let result = ArrayPrototype::map(&mut agent, array, ArgumentsList(&[Value::from(1)]));
        let error = result.unwrap_err();
        assert_eq!(error.to_display_string(&agent), "TypeError: 1 is not a function");
    }
}
