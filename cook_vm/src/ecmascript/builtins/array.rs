// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ### [10.4.2 Array Exotic Objects](https://tc39.es/ecma262/#sec-array-exotic-objects)

use std::collections::BTreeMap;

use wtf8::Wtf8Buf;

use crate::{
    ecmascript::{
        abstract_operations::type_conversion::to_string,
        execution::{Agent, ExceptionType, JsError, JsResult},
        types::{JsString, Object, ObjectHeapData, ObjectKind, Value},
    },
    heap::CreateHeapData,
};

/// The largest valid array length, 2**32 - 1.
pub(crate) const MAX_ARRAY_LENGTH: usize = u32::MAX as usize;

/// Longest string a join will build, in code units.
const MAX_JOIN_LENGTH: usize = (1 << 29) - 24;

/// A write further than this past the end of the dense part is kept in the
/// sparse map instead of filling the gap with holes.
const MAX_DENSE_GAP: usize = 1024;

/// Elements of an array.
///
/// Indexes below `dense.len()` live in a vector where `None` is a hole.
/// Elements written far past the end of the vector live in `sparse`. Every
/// index in `sparse` is at least `dense.len()` and below `length`.
#[derive(Debug, Clone, Default)]
pub struct ArrayHeapData {
    dense: Vec<Option<Value>>,
    sparse: BTreeMap<u32, Value>,
    length: u32,
    /// Set by `Object.freeze`: elements and length become read-only.
    pub(crate) frozen: bool,
}

impl ArrayHeapData {
    pub(crate) fn from_elements(elements: Vec<Option<Value>>) -> Self {
        let length = u32::try_from(elements.len()).expect("Array length exceeds 2**32 - 1");
        Self {
            dense: elements,
            sparse: BTreeMap::new(),
            length,
            frozen: false,
        }
    }

    pub(crate) fn with_length(length: u32) -> Self {
        Self {
            length,
            ..Default::default()
        }
    }

    /// Builds an array from `(index, value)` pairs in ascending index order.
    pub(crate) fn from_entries(length: u32, entries: impl IntoIterator<Item = (usize, Value)>) -> Self {
        let mut data = Self::with_length(length);
        for (index, value) in entries {
            data.set(index as u32, value);
        }
        data
    }

    pub(crate) fn len(&self) -> usize {
        self.length as usize
    }

    pub(crate) fn get(&self, index: usize) -> Option<&Value> {
        if index < self.dense.len() {
            return self.dense[index].as_ref();
        }
        let index = u32::try_from(index).ok()?;
        self.sparse.get(&index)
    }

    pub(crate) fn has(&self, index: usize) -> bool {
        self.get(index).is_some()
    }

    /// Writes an element, growing `length` past `index` if needed.
    pub(crate) fn set(&mut self, index: u32, value: Value) {
        let position = index as usize;
        if position < self.dense.len() {
            self.dense[position] = Some(value);
        } else if position - self.dense.len() <= MAX_DENSE_GAP {
            self.grow_dense(position + 1);
            self.dense[position] = Some(value);
        } else {
            self.sparse.insert(index, value);
        }
        if index >= self.length {
            self.length = index + 1;
        }
    }

    /// Appends an element. The caller checks that `length` is below
    /// 2**32 - 1.
    pub(crate) fn push(&mut self, value: Value) {
        self.set(self.length, value);
    }

    fn grow_dense(&mut self, new_len: usize) {
        self.dense.resize(new_len, None);
        // Sparse elements now covered by the vector move into it.
        let rest = self.sparse.split_off(&(new_len as u32));
        for (index, value) in std::mem::replace(&mut self.sparse, rest) {
            self.dense[index as usize] = Some(value);
        }
    }

    /// ### [10.4.2.4 ArraySetLength ( A, Desc )](https://tc39.es/ecma262/#sec-arraysetlength)
    ///
    /// Steps 16 onwards: elements at or past the new length are deleted.
    pub(crate) fn set_len(&mut self, length: u32) {
        if (length as usize) < self.dense.len() {
            self.dense.truncate(length as usize);
        }
        self.sparse.retain(|&index, _| index < length);
        self.length = length;
    }

    /// Deletes an element, leaving a hole.
    pub(crate) fn remove(&mut self, index: usize) -> Option<Value> {
        if index < self.dense.len() {
            return self.dense[index].take();
        }
        let index = u32::try_from(index).ok()?;
        self.sparse.remove(&index)
    }

    /// Present elements at or after `from`, in ascending index order.
    pub(crate) fn present_from(&self, from: usize) -> impl Iterator<Item = (usize, &Value)> {
        let dense = self
            .dense
            .iter()
            .enumerate()
            .skip(from)
            .filter_map(|(index, element)| element.as_ref().map(|element| (index, element)));
        let from = u32::try_from(from).unwrap_or(u32::MAX);
        dense.chain(self.sparse.range(from..).map(|(&index, element)| (index as usize, element)))
    }

    pub(crate) fn present(&self) -> impl Iterator<Item = (usize, &Value)> {
        self.present_from(0)
    }

    /// The first present element at or after `from`.
    pub(crate) fn next_present(&self, from: usize) -> Option<(usize, Value)> {
        self.present_from(from)
            .next()
            .map(|(index, element)| (index, element.clone()))
    }

    /// True if any index in `from..length` is a hole.
    pub(crate) fn has_holes_from(&self, from: usize) -> bool {
        let count = self.present_from(from).count();
        count < self.len().saturating_sub(from)
    }

    pub(crate) fn reverse(&mut self) {
        let len = self.len();
        if self.sparse.is_empty() && self.dense.len() == len {
            self.dense.reverse();
            return;
        }
        let entries = self.take_entries();
        *self = Self {
            frozen: self.frozen,
            ..Self::from_entries(
                self.length,
                entries.into_iter().rev().map(|(index, value)| (len - 1 - index, value)),
            )
        };
    }

    /// Removes the first element and moves every other element down by one.
    pub(crate) fn shift(&mut self) -> Option<Value> {
        if self.length == 0 {
            return None;
        }
        if self.sparse.is_empty() {
            self.length -= 1;
            if self.dense.is_empty() {
                return None;
            }
            return self.dense.remove(0);
        }
        let mut entries = self.take_entries().into_iter().peekable();
        let first = entries
            .next_if(|(index, _)| *index == 0)
            .map(|(_, value)| value);
        *self = Self {
            frozen: self.frozen,
            ..Self::from_entries(
                self.length - 1,
                entries.map(|(index, value)| (index - 1, value)),
            )
        };
        first
    }

    /// Inserts `items` at the front. The caller checks that the new length
    /// stays within 2**32 - 1.
    pub(crate) fn unshift(&mut self, items: &[Value]) {
        let count = items.len();
        if self.sparse.is_empty() {
            self.dense.splice(0..0, items.iter().cloned().map(Some));
            self.length += count as u32;
            return;
        }
        let entries = self.take_entries();
        let front = items.iter().cloned().enumerate();
        let rest = entries.into_iter().map(|(index, value)| (index + count, value));
        *self = Self {
            frozen: self.frozen,
            ..Self::from_entries(self.length + count as u32, front.chain(rest))
        };
    }

    fn take_entries(&mut self) -> Vec<(usize, Value)> {
        let dense = std::mem::take(&mut self.dense);
        let sparse = std::mem::take(&mut self.sparse);
        dense
            .into_iter()
            .enumerate()
            .filter_map(|(index, element)| element.map(|element| (index, element)))
            .chain(sparse.into_iter().map(|(index, element)| (index as usize, element)))
            .collect()
    }

    /// Every element from 0 to `length`, holes read as undefined.
    pub(crate) fn to_list(&self) -> Vec<Value> {
        (0..self.len())
            .map(|index| self.get(index).cloned().unwrap_or_default())
            .collect()
    }
}

/// ### [10.4.2.2 ArrayCreate ( length \[ , proto \] )](https://tc39.es/ecma262/#sec-arraycreate)
pub(crate) fn array_create(agent: &mut Agent, elements: Vec<Option<Value>>) -> Object {
    array_create_from_data(agent, ArrayHeapData::from_elements(elements))
}

pub(crate) fn array_create_from_data(agent: &mut Agent, data: ArrayHeapData) -> Object {
    agent
        .heap
        .create(ObjectHeapData::new(ObjectKind::Array(data)))
}

/// ### [7.3.17 CreateArrayFromList ( elements )](https://tc39.es/ecma262/#sec-createarrayfromlist)
///
/// The abstract operation CreateArrayFromList takes argument elements (a List
/// of ECMAScript language values) and returns an Array. It is used to create
/// an Array whose elements are provided by elements.
pub(crate) fn create_array_from_list(agent: &mut Agent, elements: Vec<Value>) -> Object {
    // 1. Let array be ! ArrayCreate(0).
    // 2. Let n be 0.
    // 3. For each element e of elements, do
    //    a. Perform ! CreateDataPropertyOrThrow(array, ! ToString(𝔽(n)), e).
    //    b. Set n to n + 1.
    // 4. Return array.
    array_create(agent, elements.into_iter().map(Some).collect())
}

/// ### [23.1.3.18 Array.prototype.join ( separator )](https://tc39.es/ecma262/#sec-array.prototype.join)
///
/// Steps 5 onwards: undefined, null and holes join as empty strings. An array
/// that is already being joined further up the stack also joins as the
/// empty string, so cyclic arrays terminate.
pub(crate) fn array_join(agent: &mut Agent, o: Object, sep: &JsString) -> JsResult<JsString> {
    if !agent.join_stack.insert(o) {
        return Ok(JsString::default());
    }
    let result = join_elements(agent, o, sep);
    agent.join_stack.remove(&o);
    result
}

fn join_elements(agent: &mut Agent, o: Object, sep: &JsString) -> JsResult<JsString> {
    // 2. Let len be ? LengthOfArrayLike(O).
    let len = array_len(agent, o);
    let separators_len = len.saturating_sub(1).saturating_mul(sep.utf16_len());
    if separators_len > MAX_JOIN_LENGTH {
        return Err(invalid_string_length(agent));
    }
    // 6. Let R be the empty String.
    let mut r = Wtf8Buf::new();
    let mut r_len = separators_len;
    // 7. Let k be 0.
    let mut k = 0;
    let mut separators = 0;
    // 8. Repeat, while k < len,
    //    b. Let element be ? Get(O, ! ToString(𝔽(k))).
    // Holes add nothing but their separators.
    while let Some((index, element)) = present_element(agent, o, k).filter(|(index, _)| *index < len) {
        k = index + 1;
        // c. If element is either undefined or null, let next be the empty
        //    String; otherwise, let next be ? ToString(element).
        if element.is_nullish() {
            continue;
        }
        let next = to_string(agent, &element)?;
        r_len += next.utf16_len();
        if r_len > MAX_JOIN_LENGTH {
            return Err(invalid_string_length(agent));
        }
        // a. If k > 0, set R to the string-concatenation of R and sep.
        push_separators(&mut r, sep, separators, index);
        separators = index;
        // d. Set R to the string-concatenation of R and next.
        r.push_wtf8(next.as_wtf8());
    }
    push_separators(&mut r, sep, separators, len.saturating_sub(1));
    // 9. Return R.
    Ok(JsString::from(r))
}

fn array_len(agent: &Agent, o: Object) -> usize {
    match &agent[o].kind {
        ObjectKind::Array(array) => array.len(),
        _ => 0,
    }
}

fn present_element(agent: &Agent, o: Object, from: usize) -> Option<(usize, Value)> {
    match &agent[o].kind {
        ObjectKind::Array(array) => array.next_present(from),
        _ => None,
    }
}

/// Appends the separators that precede indexes `from + 1` to `to`.
fn push_separators(r: &mut Wtf8Buf, sep: &JsString, from: usize, to: usize) {
    if sep.is_empty() {
        return;
    }
    for _ in from..to {
        r.push_wtf8(sep.as_wtf8());
    }
}

fn invalid_string_length(agent: &mut Agent) -> JsError {
    agent.throw_exception_with_static_message(ExceptionType::RangeError, "Invalid string length")
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ecmascript::execution::AgentOptions;

    #[test]
    fn join_skips_nullish_elements() {
        let mut agent = Agent::new(AgentOptions::default());
        let inner = create_array_from_list(&mut agent, vec![Value::from(2), Value::from(3)]);
        let array = array_create(
            &mut agent,
            vec![
                Some(Value::from(1)),
                None,
                Some(Value::Null),
                Some(Value::Object(inner)),
                Some(Value::from("x")),
            ],
        );
        assert_eq!(array_join(&mut agent, array, &"-".into()).unwrap(), "1---2,3-x");
    }

    #[test]
    fn join_of_a_cyclic_array_is_empty_at_the_cycle() {
        let mut agent = Agent::new(AgentOptions::default());
        let array = create_array_from_list(&mut agent, vec![Value::from(1)]);
        let ObjectKind::Array(data) = &mut agent[array].kind else {
            unreachable!()
        };
        data.push(Value::Object(array));
        assert_eq!(array_join(&mut agent, array, &",".into()).unwrap(), "1,");
        assert!(agent.join_stack.is_empty());
    }

    #[test]
    fn far_writes_stay_sparse() {
        let mut data = ArrayHeapData::from_elements(vec![Some(Value::from(0))]);
        data.set(u32::MAX - 1, Value::from(1));
        assert_eq!(data.len(), MAX_ARRAY_LENGTH);
        assert_eq!(data.get(u32::MAX as usize - 1), Some(&Value::from(1)));
        assert!(data.get(5).is_none());
        assert_eq!(data.present().count(), 2);
        assert!(data.has_holes_from(0));
        data.set_len(1);
        assert_eq!(data.len(), 1);
        assert_eq!(data.present().count(), 1);
    }

    #[test]
    fn sparse_elements_join_the_vector_when_it_reaches_them() {
        let mut data = ArrayHeapData::default();
        data.set(2000, Value::from(2));
        for index in 0..1500 {
            data.set(index, Value::from(1));
        }
        assert_eq!(data.len(), 2001);
        assert_eq!(data.get(2000), Some(&Value::from(2)));
        assert_eq!(data.next_present(1500), Some((2000, Value::from(2))));
    }

    #[test]
    fn reordering_sparse_arrays() {
        let mut data = ArrayHeapData::with_length(5000);
        data.set(0, Value::from("a"));
        data.set(4000, Value::from("b"));
        data.reverse();
        assert_eq!(data.get(4999), Some(&Value::from("a")));
        assert_eq!(data.get(999), Some(&Value::from("b")));
        assert_eq!(data.shift(), None);
        assert_eq!(data.len(), 4999);
        assert_eq!(data.get(998), Some(&Value::from("b")));
        data.unshift(&[Value::from("c")]);
        assert_eq!(data.get(0), Some(&Value::from("c")));
        assert_eq!(data.get(999), Some(&Value::from("b")));
        assert_eq!(data.get(4999), Some(&Value::from("a")));
        assert_eq!(data.len(), 5000);
    }
}
