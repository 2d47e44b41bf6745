// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::ops::{Index, IndexMut};

use super::{JsString, PropertyKey, Value};
use crate::{
    ecmascript::{
        builtins::{ArrayHeapData, BuiltinFunctionHeapData, ECMAScriptFunctionHeapData},
        execution::{Agent, ExceptionType},
    },
    heap::{CreateHeapData, Heap, ObjectIndex, indexes::BaseIndex},
};

/// ### [6.1.7 The Object Type](https://tc39.es/ecma262/#sec-object-type)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Object(pub(crate) ObjectIndex);

/// An own data property. Accessor properties are not supported.
#[derive(Debug, Clone)]
pub(crate) struct ObjectProperty {
    pub(crate) key: PropertyKey,
    pub(crate) value: Value,
    pub(crate) writable: bool,
    pub(crate) enumerable: bool,
    pub(crate) configurable: bool,
}

impl ObjectProperty {
    /// A writable, enumerable, configurable data property.
    pub(crate) fn data(key: PropertyKey, value: Value) -> Self {
        Self {
            key,
            value,
            writable: true,
            enumerable: true,
            configurable: true,
        }
    }

    /// A writable, non-enumerable, configurable data property.
    pub(crate) fn hidden(key: PropertyKey, value: Value) -> Self {
        Self {
            key,
            value,
            writable: true,
            enumerable: false,
            configurable: true,
        }
    }
}

#[derive(Debug)]
pub(crate) enum ObjectKind<'a> {
    Ordinary,
    Array(ArrayHeapData),
    ECMAScriptFunction(ECMAScriptFunctionHeapData<'a>),
    BuiltinFunction(BuiltinFunctionHeapData),
    Error(ExceptionType),
}

#[derive(Debug)]
pub struct ObjectHeapData<'a> {
    pub(crate) extensible: bool,
    pub(crate) kind: ObjectKind<'a>,
    /// Own properties in insertion order. Array elements live in the
    /// [`ArrayHeapData`] instead.
    pub(crate) properties: Vec<ObjectProperty>,
}

impl<'a> ObjectHeapData<'a> {
    pub(crate) fn new(kind: ObjectKind<'a>) -> Self {
        Self {
            extensible: true,
            kind,
            properties: Vec::new(),
        }
    }

    pub(crate) fn find_property(&self, key: &PropertyKey) -> Option<&ObjectProperty> {
        self.properties.iter().find(|property| &property.key == key)
    }

    pub(crate) fn find_property_mut(&mut self, key: &PropertyKey) -> Option<&mut ObjectProperty> {
        self.properties
            .iter_mut()
            .find(|property| &property.key == key)
    }
}

impl Object {
    pub fn is_array(self, agent: &Agent) -> bool {
        matches!(agent[self].kind, ObjectKind::Array(_))
    }

    pub fn is_function(self, agent: &Agent) -> bool {
        matches!(
            agent[self].kind,
            ObjectKind::ECMAScriptFunction(_) | ObjectKind::BuiltinFunction(_)
        )
    }

    pub fn is_error(self, agent: &Agent) -> bool {
        matches!(agent[self].kind, ObjectKind::Error(_))
    }

    pub fn is_extensible(self, agent: &Agent) -> bool {
        agent[self].extensible
    }

    /// The `name` of a function object, or the empty string for anything else.
    pub fn function_name(self, agent: &Agent) -> JsString {
        match &agent[self].kind {
            ObjectKind::ECMAScriptFunction(data) => JsString::from(data.name()),
            ObjectKind::BuiltinFunction(data) => JsString::from(data.name),
            _ => JsString::default(),
        }
    }

    /// Reads a property, falling back to the intrinsic methods of the
    /// object's kind.
    pub fn get(self, agent: &mut Agent, key: impl Into<PropertyKey>) -> Value {
        crate::ecmascript::abstract_operations::operations_on_objects::get(agent, self, &key.into())
    }

    /// Elements of an array object; holes read as undefined.
    pub fn array_elements(self, agent: &Agent) -> Option<Vec<Value>> {
        match &agent[self].kind {
            ObjectKind::Array(array) => Some(array.to_list()),
            _ => None,
        }
    }
}

impl<'a> Index<Object> for Heap<'a> {
    type Output = ObjectHeapData<'a>;

    fn index(&self, index: Object) -> &Self::Output {
        self.objects
            .get(index.0.into_index())
            .expect("Object out of bounds")
    }
}

impl IndexMut<Object> for Heap<'_> {
    fn index_mut(&mut self, index: Object) -> &mut Self::Output {
        self.objects
            .get_mut(index.0.into_index())
            .expect("Object out of bounds")
    }
}

impl<'a> Index<Object> for Agent<'a> {
    type Output = ObjectHeapData<'a>;

    fn index(&self, index: Object) -> &Self::Output {
        &self.heap[index]
    }
}

impl IndexMut<Object> for Agent<'_> {
    fn index_mut(&mut self, index: Object) -> &mut Self::Output {
        &mut self.heap[index]
    }
}

impl<'a> CreateHeapData<ObjectHeapData<'a>, Object> for Heap<'a> {
    fn create(&mut self, data: ObjectHeapData<'a>) -> Object {
        self.objects.push(data);
        Object(BaseIndex::last(&self.objects))
    }
}
