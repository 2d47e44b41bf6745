// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

pub(crate) mod builtin_function_builder;
pub(crate) mod ordinary_object_builder;

pub(crate) use builtin_function_builder::BuiltinFunctionBuilder;
pub(crate) use ordinary_object_builder::OrdinaryObjectBuilder;

use crate::ecmascript::{
    builtins::{Builtin, create_builtin_function},
    execution::Agent,
    types::{Object, ObjectProperty, PropertyKey, Value},
};

/// Built-in methods are writable, configurable and not enumerable.
fn push_builtin_function_property<T: Builtin>(agent: &mut Agent, object: Object) {
    let function = create_builtin_function::<T>(agent);
    agent[object].properties.push(ObjectProperty::hidden(
        PropertyKey::from(T::NAME),
        Value::Object(function),
    ));
}

fn push_function_property(agent: &mut Agent, object: Object, key: &'static str, function: Object) {
    agent[object].properties.push(ObjectProperty::hidden(
        PropertyKey::from(key),
        Value::Object(function),
    ));
}

/// Constant value properties such as `Math.PI` are read-only.
fn push_constant_property(agent: &mut Agent, object: Object, key: &'static str, value: Value) {
    agent[object].properties.push(ObjectProperty {
        key: PropertyKey::from(key),
        value,
        writable: false,
        enumerable: false,
        configurable: false,
    });
}
