// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::object_constructor::cannot_convert_to_object;
use crate::ecmascript::{
    abstract_operations::{operations_on_objects::has_own_property, type_conversion::to_property_key},
    builtins::{ArgumentsList, Behaviour, Builtin, intrinsics::intrinsic_function},
    execution::{Agent, JsResult},
    types::{ObjectKind, PropertyKey, Value},
};

/// Methods every object answers to.
pub(crate) struct ObjectPrototype;

struct ObjectPrototypeHasOwnProperty;
impl Builtin for ObjectPrototypeHasOwnProperty {
    const NAME: &'static str = "hasOwnProperty";
    const LENGTH: u8 = 1;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ObjectPrototype::has_own_property);
}

struct ObjectPrototypeToString;
impl Builtin for ObjectPrototypeToString {
    const NAME: &'static str = "toString";
    const LENGTH: u8 = 0;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ObjectPrototype::to_string);
}

impl ObjectPrototype {
    const PREFIX: &'static str = "Object.prototype";

    /// ### [20.1.3.2 Object.prototype.hasOwnProperty ( V )](https://tc39.es/ecma262/#sec-object.prototype.hasownproperty)
    fn has_own_property(
        agent: &mut Agent,
        this_value: Value,
        arguments: ArgumentsList,
    ) -> JsResult<Value> {
        // 1. Let P be ? ToPropertyKey(V).
        let p = to_property_key(agent, &arguments.get(0))?;
        // 2. Let O be ? ToObject(this value).
        let result = match &this_value {
            Value::Undefined | Value::Null => return Err(cannot_convert_to_object(agent)),
            // 3. Return ? HasOwnProperty(O, P).
            Value::Object(o) => has_own_property(agent, *o, &p),
            Value::String(string) => {
                p.as_str() == Some("length")
                    || p
                        .as_array_index()
                        .is_some_and(|index| (index as usize) < string.utf16_len())
            }
            _ => false,
        };
        Ok(Value::Boolean(result))
    }

    /// ### [20.1.3.6 Object.prototype.toString ( )](https://tc39.es/ecma262/#sec-object.prototype.tostring)
    fn to_string(agent: &mut Agent, this_value: Value, _: ArgumentsList) -> JsResult<Value> {
        // 1. If the this value is undefined, return "[object Undefined]".
        // 2. If the this value is null, return "[object Null]".
        // 3. Let O be ! ToObject(this value).
        let builtin_tag = match &this_value {
            Value::Undefined => "Undefined",
            Value::Null => "Null",
            Value::Boolean(_) => "Boolean",
            Value::Number(_) => "Number",
            Value::String(_) => "String",
            Value::Symbol(_) => "Symbol",
            // 5. If isArray is true, let builtinTag be "Array".
            // 6. Else if O has a [[Call]] internal method, let builtinTag be "Function".
            // 7. Else if O has an [[ErrorData]] internal slot, let builtinTag be "Error".
            // 14. Else, let builtinTag be "Object".
            Value::Object(o) => match &agent[*o].kind {
                ObjectKind::Array(_) => "Array",
                ObjectKind::ECMAScriptFunction(_) | ObjectKind::BuiltinFunction(_) => "Function",
                ObjectKind::Error(_) => "Error",
                ObjectKind::Ordinary => "Object",
            },
        };
        // 17. Return the string-concatenation of "[object ", tag, and "]".
        Ok(Value::from(format!("[object {builtin_tag}]")))
    }

    pub(crate) fn get_intrinsic(agent: &mut Agent, name: &str) -> Option<Value> {
        Some(match name {
            "hasOwnProperty" => {
                intrinsic_function::<ObjectPrototypeHasOwnProperty>(agent, Self::PREFIX)
            }
            "toString" => intrinsic_function::<ObjectPrototypeToString>(agent, Self::PREFIX),
            _ => return None,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ecmascript::{
        abstract_operations::operations_on_objects::{
            create_data_property_or_throw, ordinary_object_create,
        },
        execution::AgentOptions,
    };

    #[test]
    fn has_own_property_ignores_intrinsics() {
        let mut agent = Agent::new(AgentOptions::default());
        let object = ordinary_object_create(&mut agent);
        create_data_property_or_throw(&mut agent, object, PropertyKey::from("a"), Value::Null)
            .unwrap();
        let this = Value::Object(object);
        let own = ObjectPrototype::has_own_property(&mut agent, this.clone(), ArgumentsList(&[Value::from("a")]));
        assert_eq!(own.unwrap(), Value::Boolean(true));
        let inherited = ObjectPrototype::has_own_property(
            &mut agent,
            this,
            ArgumentsList(&[Value::from("hasOwnProperty")]),
        );
        assert_eq!(inherited.unwrap(), Value::Boolean(false));
        let string_index =
            ObjectPrototype::has_own_property(&mut agent, Value::from("ab"), ArgumentsList(&[Value::from(1)]));
        assert_eq!(string_index.unwrap(), Value::Boolean(true));
    }
}
