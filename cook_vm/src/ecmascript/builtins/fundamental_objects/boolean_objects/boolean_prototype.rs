// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::ecmascript::{
    builtins::{ArgumentsList, Behaviour, Builtin, intrinsics::intrinsic_function},
    execution::{Agent, ExceptionType, JsResult},
    types::Value,
};

pub(crate) struct BooleanPrototype;

struct BooleanPrototypeToString;
impl Builtin for BooleanPrototypeToString {
    const NAME: &'static str = "toString";
    const LENGTH: u8 = 0;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(BooleanPrototype::to_string);
}

struct BooleanPrototypeValueOf;
impl Builtin for BooleanPrototypeValueOf {
    const NAME: &'static str = "valueOf";
    const LENGTH: u8 = 0;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(BooleanPrototype::value_of);
}

impl BooleanPrototype {
    const PREFIX: &'static str = "Boolean.prototype";

    /// ### [20.3.3.2 Boolean.prototype.toString ( )](https://tc39.es/ecma262/#sec-boolean.prototype.tostring)
    fn to_string(agent: &mut Agent, this_value: Value, _: ArgumentsList) -> JsResult<Value> {
        // 1. Let b be ? ThisBooleanValue(this value).
        let b = this_boolean_value(agent, &this_value, "toString")?;
        // 2. If b is true, return "true"; else return "false".
        Ok(Value::from(if b { "true" } else { "false" }))
    }

    /// ### [20.3.3.3 Boolean.prototype.valueOf ( )](https://tc39.es/ecma262/#sec-boolean.prototype.valueof)
    fn value_of(agent: &mut Agent, this_value: Value, _: ArgumentsList) -> JsResult<Value> {
        // 1. Return ? ThisBooleanValue(this value).
        this_boolean_value(agent, &this_value, "valueOf").map(Value::Boolean)
    }

    pub(crate) fn get_intrinsic(agent: &mut Agent, name: &str) -> Option<Value> {
        Some(match name {
            "toString" => intrinsic_function::<BooleanPrototypeToString>(agent, Self::PREFIX),
            "valueOf" => intrinsic_function::<BooleanPrototypeValueOf>(agent, Self::PREFIX),
            _ => return None,
        })
    }
}

/// ### [20.3.3.3.1 ThisBooleanValue ( value )](https://tc39.es/ecma262/#sec-thisbooleanvalue)
fn this_boolean_value(agent: &mut Agent, value: &Value, method: &str) -> JsResult<bool> {
    // 1. If value is a Boolean, return value.
    if let Value::Boolean(value) = value {
        return Ok(*value);
    }
    // 3. Throw a TypeError exception.
    Err(agent.throw_exception(
        ExceptionType::TypeError,
        format!("Boolean.prototype.{method} requires that 'this' be a Boolean"),
    ))
}
