// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ## [7.4 Operations on Iterator Objects](https://tc39.es/ecma262/#sec-operations-on-iterator-objects)
//!
//! Without `Symbol.iterator` lookup on prototypes, the only iterables are
//! arrays and strings. Both iterate with the semantics of their built-in
//! iterators.

use crate::ecmascript::{
    execution::{Agent, ExceptionType, JsResult},
    types::{JsString, Object, ObjectKind, Value},
};

/// ### [7.4.1 Iterator Records](https://tc39.es/ecma262/#sec-iterator-records)
///
/// An Iterator Record is a Record value used to encapsulate an Iterator
/// along with the next method.
#[derive(Debug)]
pub(crate) enum IteratorRecord {
    /// ### [23.1.5.1 CreateArrayIterator ( array, kind )](https://tc39.es/ecma262/#sec-createarrayiterator)
    ///
    /// Reads the array on every step, so elements pushed during iteration
    /// are visited.
    Array { array: Object, next_index: usize },
    /// ### [22.1.5.1 CreateStringIterator ( string )](https://tc39.es/ecma262/#sec-createstringiterator)
    String {
        code_points: std::vec::IntoIter<JsString>,
    },
    Done,
}

/// ### [7.4.4 GetIterator ( obj, kind )](https://tc39.es/ecma262/#sec-getiterator)
///
/// The abstract operation GetIterator takes arguments obj (an ECMAScript
/// language value) and kind (sync or async) and returns either a normal
/// completion containing an Iterator Record or a throw completion.
pub(crate) fn get_iterator(agent: &mut Agent, obj: &Value) -> JsResult<IteratorRecord> {
    match obj {
        Value::Object(array) if array.is_array(agent) => Ok(IteratorRecord::Array {
            array: *array,
            next_index: 0,
        }),
        Value::String(string) => Ok(IteratorRecord::String {
            code_points: string.code_points().collect::<Vec<_>>().into_iter(),
        }),
        // 3. If method is undefined, throw a TypeError exception.
        _ => {
            let message = format!("{} is not iterable", obj.string_repr(agent));
            Err(agent.throw_exception(ExceptionType::TypeError, message))
        }
    }
}

/// ### [7.4.10 IteratorStepValue ( iteratorRecord )](https://tc39.es/ecma262/#sec-iteratorstepvalue)
///
/// The abstract operation IteratorStepValue takes argument iteratorRecord (an
/// Iterator Record) and returns either a normal completion containing either
/// an ECMAScript language value or DONE, or a throw completion. It requests
/// the next value from iteratorRecord.\[\[Iterator\]\] by calling
/// iteratorRecord.\[\[NextMethod\]\] and returns either DONE indicating that
/// the iterator has reached its end or the value from the IteratorResult
/// object if a next value is available.
pub(crate) fn iterator_step_value(agent: &Agent, iterator_record: &mut IteratorRecord) -> Option<Value> {
    let value = match iterator_record {
        IteratorRecord::Array { array, next_index } => {
            let ObjectKind::Array(data) = &agent[*array].kind else {
                unreachable!()
            };
            // %ArrayIteratorPrototype%.next: if index >= len, the iterator is
            // done for good.
            if *next_index >= data.len() {
                None
            } else {
                let value = data.get(*next_index).cloned().unwrap_or_default();
                *next_index += 1;
                Some(value)
            }
        }
        IteratorRecord::String { code_points } => code_points.next().map(Value::String),
        IteratorRecord::Done => None,
    };
    if value.is_none() {
        // 3. If done is true, then
        //    a. Set iteratorRecord.[[Done]] to true.
        *iterator_record = IteratorRecord::Done;
    }
    value
}

/// ### [7.4.14 IteratorToList ( iteratorRecord )](https://tc39.es/ecma262/#sec-iteratortolist)
pub(crate) fn iterator_to_list(agent: &Agent, iterator_record: &mut IteratorRecord) -> Vec<Value> {
    // 1. Let values be a new empty List.
    let mut values = Vec::new();
    // 2. Repeat,
    //    a. Let next be ? IteratorStepValue(iteratorRecord).
    //    b. If next is DONE, then
    //       i. Return values.
    //    c. Append next to values.
    while let Some(next) = iterator_step_value(agent, iterator_record) {
        values.push(next);
    }
    values
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ecmascript::{builtins::array::create_array_from_list, execution::AgentOptions};

    #[test]
    fn strings_iterate_by_code_point() {
        let mut agent = Agent::new(AgentOptions::default());
        let mut iterator = get_iterator(&mut agent, &Value::from("a😀")).unwrap();
        let values = iterator_to_list(&agent, &mut iterator);
        assert_eq!(values, vec![Value::from("a"), Value::from("😀")]);
        let lone = Value::String(JsString::from_code_units(&[0xD83D, 0x62]));
        let mut iterator = get_iterator(&mut agent, &lone).unwrap();
        let values = iterator_to_list(&agent, &mut iterator);
        assert_eq!(
            values,
            vec![Value::String(JsString::from_code_units(&[0xD83D])), Value::from("b")]
        );
    }

    #[test]
    fn array_iteration_sees_appended_elements() {
        let mut agent = Agent::new(AgentOptions::default());
        let array = create_array_from_list(&mut agent, vec![Value::from(1)]);
        let mut iterator = get_iterator(&mut agent, &Value::Object(array)).unwrap();
        assert_eq!(iterator_step_value(&agent, &mut iterator), Some(Value::from(1)));
        let ObjectKind::Array(data) = &mut agent[array].kind else {
            unreachable!()
        };
        data.push(Value::from(2));
        assert_eq!(iterator_step_value(&agent, &mut iterator), Some(Value::from(2)));
        assert_eq!(iterator_step_value(&agent, &mut iterator), None);
    }

    #[test]
    fn numbers_are_not_iterable() {
        let mut agent = Agent::new(AgentOptions::default());
        let error = get_iterator(&mut agent, &Value::from(1)).unwrap_err();
        assert_eq!(agent.exception_type(&error), Some(ExceptionType::TypeError));
    }
}
