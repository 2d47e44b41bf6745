// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::ecmascript::{
    abstract_operations::{
        operations_on_iterator_objects::{get_iterator, iterator_step_value},
        operations_on_objects::{call_function, get, length_of_array_like},
        testing_and_comparison::{is_array, is_callable},
        type_conversion::number_to_uint32,
    },
    builders::BuiltinFunctionBuilder,
    builtins::{
        ArgumentsList, Behaviour, Builtin,
        array::{
            ArrayHeapData, MAX_ARRAY_LENGTH, array_create_from_data, create_array_from_list,
        },
    },
    execution::{Agent, ExceptionType, JsResult},
    types::{Object, PropertyKey, Value},
};

pub(crate) struct ArrayConstructor;

impl Builtin for ArrayConstructor {
    const NAME: &'static str = "Array";

    const LENGTH: u8 = 1;

    const BEHAVIOUR: Behaviour = Behaviour::Constructor(Self::behaviour);
}

struct ArrayFrom;
impl Builtin for ArrayFrom {
    const NAME: &'static str = "from";

    const LENGTH: u8 = 1;

    const BEHAVIOUR: Behaviour = Behaviour::Regular(ArrayConstructor::from);
}

struct ArrayIsArray;
impl Builtin for ArrayIsArray {
    const NAME: &'static str = "isArray";

    const LENGTH: u8 = 1;

    const BEHAVIOUR: Behaviour = Behaviour::Regular(ArrayConstructor::is_array);
}

struct ArrayOf;
impl Builtin for ArrayOf {
    const NAME: &'static str = "of";

    const LENGTH: u8 = 0;

    const BEHAVIOUR: Behaviour = Behaviour::Regular(ArrayConstructor::of);
}

impl ArrayConstructor {
    /// ### [23.1.1.1 Array ( ...values )](https://tc39.es/ecma262/#sec-array)
    fn behaviour(
        agent: &mut Agent,
        _this_value: Value,
        arguments: ArgumentsList,
        _new_target: Option<Object>,
    ) -> JsResult<Value> {
        // 4. Let numberOfArgs be the number of elements in values.
        // 6. Else if numberOfArgs = 1, then
        if let [len] = *arguments {
            // b. If len is not a Number, then
            let Value::Number(len) = len else {
                // i. Perform ! CreateDataPropertyOrThrow(array, "0", len).
                return Ok(Value::Object(create_array_from_list(agent, vec![len.clone()])));
            };
            // c. Else,
            //    i. Let intLen be ! ToUint32(len).
            let int_len = number_to_uint32(*len);
            //    ii. If SameValueZero(intLen, len) is false, throw a RangeError exception.
            if f64::from(int_len) != *len {
                return Err(agent.throw_exception_with_static_message(
                    ExceptionType::RangeError,
                    "Invalid array length",
                ));
            }
            // d. Perform ! Set(array, "length", intLen, true).
            let array = array_create_from_data(agent, ArrayHeapData::with_length(int_len));
            return Ok(Value::Object(array));
        }
        // 5. If numberOfArgs = 0, then
        //    a. Return ! ArrayCreate(0, proto).
        // 7. Else,
        //    d. Repeat, while k < numberOfArgs,
        //       iii. Perform ! CreateDataPropertyOrThrow(array, Pk, itemK).
        Ok(Value::Object(create_array_from_list(agent, arguments.to_vec())))
    }

    /// ### [23.1.2.1 Array.from ( items \[ , mapper \[ , thisArg \] \] )](https://tc39.es/ecma262/#sec-array.from)
    fn from(agent: &mut Agent, _this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
        let items = arguments.get(0);
        let mapfn = arguments.get(1);
        let this_arg = arguments.get(2);
        // 2. If mapper is undefined, then
        //    a. Let mapping be false.
        // 3. Else,
        //    a. If IsCallable(mapper) is false, throw a TypeError exception.
        let mapping = if mapfn.is_undefined() {
            None
        } else {
            match is_callable(agent, &mapfn) {
                Some(mapfn) => Some(mapfn),
                None => {
                    let message = format!("{} is not a function", mapfn.string_repr(agent));
                    return Err(agent.throw_exception(ExceptionType::TypeError, message));
                }
            }
        };
        // 4. Let usingIterator be ? GetMethod(items, %Symbol.iterator%).
        // 5. If usingIterator is not undefined, then
        let values = if is_array(agent, &items) || items.is_string() || items.is_nullish() {
            // c. Let iteratorRecord be ? GetIteratorFromMethod(items, usingIterator).
            let mut iterator_record = get_iterator(agent, &items)?;
            let mut values = Vec::new();
            while let Some(next) = iterator_step_value(agent, &mut iterator_record) {
                values.push(next);
            }
            values
        } else if let Value::Object(array_like) = items {
            // 7. Let arrayLike be ! ToObject(items).
            // 8. Let len be ? LengthOfArrayLike(arrayLike).
            let len = length_of_array_like(agent, array_like)?;
            if len > MAX_ARRAY_LENGTH {
                return Err(agent.throw_exception_with_static_message(
                    ExceptionType::RangeError,
                    "Invalid array length",
                ));
            }
            // 12. Repeat, while k < len,
            //     b. Let kValue be ? Get(arrayLike, Pk).
            (0..len)
                .map(|k| get(agent, array_like, &PropertyKey::from(k)))
                .collect()
        } else {
            Vec::new()
        };
        let values = match mapping {
            // c. If mapping is true, then
            //    i. Let mappedValue be ? Call(mapper, thisArg, « kValue, 𝔽(k) »).
            Some(mapfn) => {
                let mut mapped = Vec::with_capacity(values.len());
                for (k, k_value) in values.into_iter().enumerate() {
                    mapped.push(call_function(agent, mapfn, this_arg.clone(), &[k_value, Value::from(k)])?);
                }
                mapped
            }
            None => values,
        };
        Ok(Value::Object(create_array_from_list(agent, values)))
    }

    /// ### [23.1.2.2 Array.isArray ( arg )](https://tc39.es/ecma262/#sec-array.isarray)
    fn is_array(agent: &mut Agent, _this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
        // 1. Return ? IsArray(arg).
        Ok(Value::Boolean(is_array(agent, &arguments.get(0))))
    }

    /// ### [23.1.2.3 Array.of ( ...items )](https://tc39.es/ecma262/#sec-array.of)
    fn of(agent: &mut Agent, _this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
        Ok(Value::Object(create_array_from_list(agent, arguments.to_vec())))
    }

    pub(crate) fn create_intrinsic(agent: &mut Agent) -> Object {
        BuiltinFunctionBuilder::new::<ArrayConstructor>(agent)
            .with_builtin_function_property::<ArrayFrom>()
            .with_builtin_function_property::<ArrayIsArray>()
            .with_builtin_function_property::<ArrayOf>()
            .build()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ecmascript::execution::AgentOptions;

    #[test]
    fn single_number_argument_is_a_length() {
        let mut agent = Agent::new(AgentOptions::default());
        let array =
            ArrayConstructor::behaviour(&mut agent, Value::Undefined, ArgumentsList(&[Value::from(3)]), None)
                .unwrap();
        let array = array.as_object().unwrap();
        assert_eq!(array.array_elements(&agent).unwrap(), vec![Value::Undefined; 3]);
        let invalid = ArrayConstructor::behaviour(
            &mut agent,
            Value::Undefined,
            ArgumentsList(&[Value::from(1.5)]),
            None,
        );
        assert!(invalid.is_err());
    }

    #[test]
    fn huge_lengths_do_not_allocate_elements() {
        let mut agent = Agent::new(AgentOptions::default());
        let array =
            ArrayConstructor::behaviour(&mut agent, Value::Undefined, ArgumentsList(&[Value::from(1e9)]), None)
                .unwrap();
        let array = array.as_object().unwrap();
        assert_eq!(array.get(&mut agent, "length"), Value::from(1e9));
        assert_eq!(array.get(&mut agent, 999_999_999u32), Value::Undefined);
    }

    #[test]
    fn from_strings_splits_code_points() {
        let mut agent = Agent::new(AgentOptions::default());
        let array =
            ArrayConstructor::from(&mut agent, Value::Undefined, ArgumentsList(&[Value::from("a😀")]))
                .unwrap();
        let elements = array.as_object().unwrap().array_elements(&agent).unwrap();
        assert_eq!(elements, vec![Value::from("a"), Value::from("😀")]);
        assert!(ArrayConstructor::from(&mut agent, Value::Undefined, ArgumentsList(&[Value::Null])).is_err());
    }
}
