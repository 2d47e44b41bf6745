// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Cooked objects have no prototype chain. A property lookup that misses
//! the own properties of its receiver is answered here instead, from the
//! methods the receiver's prototype would have carried.

use super::{
    Builtin, create_builtin_function,
    fundamental_objects::{
        boolean_objects::boolean_prototype::BooleanPrototype,
        error_objects::error_prototype::ErrorPrototype,
        function_objects::function_prototype::FunctionPrototype,
        object_objects::object_prototype::ObjectPrototype,
    },
    indexed_collections::array_objects::array_prototype::ArrayPrototype,
    numbers_and_dates::number_objects::number_prototype::NumberPrototype,
    text_processing::string_objects::string_prototype::StringPrototype,
};
use crate::ecmascript::{
    execution::Agent,
    types::{Object, ObjectKind, PropertyKey, Value},
};

/// Returns the intrinsic function `T` of the given prototype, allocating it
/// on first use. Later lookups return the same function object.
pub(crate) fn intrinsic_function<T: Builtin>(agent: &mut Agent, prototype: &'static str) -> Value {
    if let Some(function) = agent.intrinsic_functions.get(&(prototype, T::NAME)) {
        return Value::Object(*function);
    }
    let function = create_builtin_function::<T>(agent);
    agent
        .intrinsic_functions
        .insert((prototype, T::NAME), function);
    Value::Object(function)
}

/// Resolves `receiver[key]` against the intrinsics of the receiver's type.
/// Returns `None` when no such intrinsic exists.
pub(crate) fn get_intrinsic_property(
    agent: &mut Agent,
    receiver: &Value,
    key: &PropertyKey,
) -> Option<Value> {
    let PropertyKey::String(name) = key else {
        return None;
    };
    match receiver {
        Value::Undefined | Value::Null => None,
        Value::Boolean(_) => BooleanPrototype::get_intrinsic(agent, name),
        Value::Number(_) => NumberPrototype::get_intrinsic(agent, name),
        Value::String(string) => StringPrototype::get_property(agent, string, key),
        Value::Symbol(symbol) => (name.as_str() == "description")
            .then(|| symbol.description(agent).map_or(Value::Undefined, Value::String)),
        Value::Object(o) => object_intrinsic(agent, *o, name),
    }
}

fn object_intrinsic(agent: &mut Agent, o: Object, name: &str) -> Option<Value> {
    let intrinsic = match &agent[o].kind {
        ObjectKind::Ordinary => None,
        ObjectKind::Array(_) => ArrayPrototype::get_intrinsic(agent, name),
        ObjectKind::ECMAScriptFunction(_) | ObjectKind::BuiltinFunction(_) => match name {
            "name" => Some(Value::String(o.function_name(agent))),
            "length" => Some(Value::from(function_length(agent, o))),
            _ => FunctionPrototype::get_intrinsic(agent, name),
        },
        ObjectKind::Error(kind) => match name {
            "name" => Some(Value::from(kind.name())),
            "message" => Some(Value::from("")),
            _ => ErrorPrototype::get_intrinsic(agent, name),
        },
    };
    intrinsic.or_else(|| ObjectPrototype::get_intrinsic(agent, name))
}

fn function_length(agent: &Agent, f: Object) -> usize {
    match &agent[f].kind {
        ObjectKind::ECMAScriptFunction(data) => data.length(),
        ObjectKind::BuiltinFunction(data) => usize::from(data.length),
        _ => 0,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ecmascript::{
        builtins::{array::create_array_from_list, error::create_error_object},
        execution::{AgentOptions, ExceptionType},
    };

    #[test]
    fn intrinsic_methods_are_shared() {
        let mut agent = Agent::new(AgentOptions::default());
        let first = Value::Object(create_array_from_list(&mut agent, vec![]));
        let second = Value::Object(create_array_from_list(&mut agent, vec![]));
        let key = PropertyKey::from("push");
        let a = get_intrinsic_property(&mut agent, &first, &key).unwrap();
        let b = get_intrinsic_property(&mut agent, &second, &key).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.as_object().unwrap().function_name(&agent), "push");
    }

    #[test]
    fn kinds_resolve_their_own_intrinsics() {
        let mut agent = Agent::new(AgentOptions::default());
        let string = Value::from("héllo");
        assert_eq!(
            get_intrinsic_property(&mut agent, &string, &PropertyKey::from("length")),
            Some(Value::from(5))
        );
        assert_eq!(
            get_intrinsic_property(&mut agent, &string, &PropertyKey::from("1")),
            Some(Value::from("é"))
        );
        let error = Value::Object(create_error_object(&mut agent, ExceptionType::TypeError, None));
        assert_eq!(
            get_intrinsic_property(&mut agent, &error, &PropertyKey::from("name")),
            Some(Value::from("TypeError"))
        );
        assert!(get_intrinsic_property(&mut agent, &Value::Null, &PropertyKey::from("x")).is_none());
        assert!(get_intrinsic_property(&mut agent, &Value::from(1), &PropertyKey::from("push")).is_none());
        assert!(get_intrinsic_property(&mut agent, &Value::from(1), &PropertyKey::from("toFixed")).is_some());
    }
}
