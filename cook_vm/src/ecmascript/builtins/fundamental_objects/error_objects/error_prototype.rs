// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::ecmascript::{
    builtins::{ArgumentsList, Behaviour, Builtin, error::error_to_string, intrinsics::intrinsic_function},
    execution::{Agent, ExceptionType, JsResult},
    types::Value,
};

pub(crate) struct ErrorPrototype;

struct ErrorPrototypeToString;
impl Builtin for ErrorPrototypeToString {
    const NAME: &'static str = "toString";
    const LENGTH: u8 = 0;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(ErrorPrototype::to_string);
}

impl ErrorPrototype {
    const PREFIX: &'static str = "Error.prototype";

    /// ### [20.5.3.4 Error.prototype.toString ( )](https://tc39.es/ecma262/#sec-error.prototype.tostring)
    fn to_string(agent: &mut Agent, this_value: Value, _: ArgumentsList) -> JsResult<Value> {
        // 1. Let O be the this value.
        // 2. If O is not an Object, throw a TypeError exception.
        let Value::Object(o) = this_value else {
            return Err(agent.throw_exception_with_static_message(
                ExceptionType::TypeError,
                "Error.prototype.toString called on a non-object",
            ));
        };
        error_to_string(agent, o).map(Value::String)
    }

    pub(crate) fn get_intrinsic(agent: &mut Agent, name: &str) -> Option<Value> {
        match name {
            "toString" => Some(intrinsic_function::<ErrorPrototypeToString>(agent, Self::PREFIX)),
            _ => None,
        }
    }
}
