// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::ecmascript::{
    abstract_operations::{
        operations_on_objects::{call_function, create_list_from_array_like},
        testing_and_comparison::is_callable,
    },
    builtins::{
        ArgumentsList, Behaviour, Builtin, ecmascript_function::function_source_text,
        intrinsics::intrinsic_function,
    },
    execution::{Agent, ExceptionType, JsResult},
    types::{Object, Value},
};

pub(crate) struct FunctionPrototype;

struct FunctionPrototypeApply;
impl Builtin for FunctionPrototypeApply {
    const NAME: &'static str = "apply";
    const LENGTH: u8 = 2;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(FunctionPrototype::apply);
}

struct FunctionPrototypeCall;
impl Builtin for FunctionPrototypeCall {
    const NAME: &'static str = "call";
    const LENGTH: u8 = 1;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(FunctionPrototype::call);
}

struct FunctionPrototypeToString;
impl Builtin for FunctionPrototypeToString {
    const NAME: &'static str = "toString";
    const LENGTH: u8 = 0;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(FunctionPrototype::to_string);
}

impl FunctionPrototype {
    const PREFIX: &'static str = "Function.prototype";

    /// ### [20.2.3.1 Function.prototype.apply ( thisArg, argArray )](https://tc39.es/ecma262/#sec-function.prototype.apply)
    fn apply(agent: &mut Agent, this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
        // 1. Let func be the this value.
        // 2. If IsCallable(func) is false, throw a TypeError exception.
        let func = this_function(agent, &this_value, "apply")?;
        let this_arg = arguments.get(0);
        let arg_array = arguments.get(1);
        // 3. If argArray is either undefined or null, then
        if arg_array.is_nullish() {
            // b. Return ? Call(func, thisArg).
            return call_function(agent, func, this_arg, &[]);
        }
        // 4. Let argList be ? CreateListFromArrayLike(argArray).
        let arg_list = create_list_from_array_like(agent, &arg_array)?;
        // 6. Return ? Call(func, thisArg, argList).
        call_function(agent, func, this_arg, &arg_list)
    }

    /// ### [20.2.3.3 Function.prototype.call ( thisArg, ...args )](https://tc39.es/ecma262/#sec-function.prototype.call)
    fn call(agent: &mut Agent, this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
        // 1. Let func be the this value.
        // 2. If IsCallable(func) is false, throw a TypeError exception.
        let func = this_function(agent, &this_value, "call")?;
        // 4. Return ? Call(func, thisArg, args).
        call_function(agent, func, arguments.get(0), arguments.slice_from(1))
    }

    /// ### [20.2.3.5 Function.prototype.toString ( )](https://tc39.es/ecma262/#sec-function.prototype.tostring)
    fn to_string(agent: &mut Agent, this_value: Value, _: ArgumentsList) -> JsResult<Value> {
        let func = this_function(agent, &this_value, "toString")?;
        Ok(Value::from(function_source_text(agent, func)))
    }

    pub(crate) fn get_intrinsic(agent: &mut Agent, name: &str) -> Option<Value> {
        Some(match name {
            "apply" => intrinsic_function::<FunctionPrototypeApply>(agent, Self::PREFIX),
            "call" => intrinsic_function::<FunctionPrototypeCall>(agent, Self::PREFIX),
            "toString" => intrinsic_function::<FunctionPrototypeToString>(agent, Self::PREFIX),
            _ => return None,
        })
    }
}

fn this_function(agent: &mut Agent, this_value: &Value, method: &str) -> JsResult<Object> {
    match is_callable(agent, this_value) {
        Some(func) => Ok(func),
        None => Err(agent.throw_exception(
            ExceptionType::TypeError,
            format!("Function.prototype.{method} called on a value that is not a function"),
        )),
    }
}
