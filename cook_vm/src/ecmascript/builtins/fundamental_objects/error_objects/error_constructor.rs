// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::ecmascript::{
    abstract_operations::{
        operations_on_objects::{get, has_property},
        type_conversion::to_string,
    },
    builders::BuiltinFunctionBuilder,
    builtins::{ArgumentsList, Behaviour, Builtin, error::create_error_object},
    execution::{Agent, ExceptionType, JsResult},
    types::{Object, ObjectProperty, PropertyKey, Value},
};

pub(crate) struct ErrorConstructor;

impl Builtin for ErrorConstructor {
    const NAME: &'static str = "Error";

    const LENGTH: u8 = 1;

    const BEHAVIOUR: Behaviour = Behaviour::Constructor(Self::behaviour);
}

impl ErrorConstructor {
    /// ### [20.5.1.1 Error ( message \[ , options \] )](https://tc39.es/ecma262/#sec-error-message)
    fn behaviour(
        agent: &mut Agent,
        _this_value: Value,
        arguments: ArgumentsList,
        _new_target: Option<Object>,
    ) -> JsResult<Value> {
        construct_error(agent, ExceptionType::Error, arguments)
    }

    pub(crate) fn create_intrinsic(agent: &mut Agent) -> Object {
        BuiltinFunctionBuilder::new::<ErrorConstructor>(agent).build()
    }
}

/// Shared steps of `Error` and the NativeError constructors. Calling one
/// without `new` creates the same object.
pub(super) fn construct_error(
    agent: &mut Agent,
    kind: ExceptionType,
    arguments: ArgumentsList,
) -> JsResult<Value> {
    let message = arguments.get(0);
    let options = arguments.get(1);
    // 3. If message is not undefined, then
    let msg = if message.is_undefined() {
        None
    } else {
        // a. Let msg be ? ToString(message).
        Some(to_string(agent, &message)?)
    };
    // 4. Perform ? InstallErrorCause(O, options).
    let cause = get_error_cause(agent, &options);
    // 2. Let O be ? OrdinaryCreateFromConstructor(newTarget, "%Error.prototype%", « [[ErrorData]] »).
    // b. Perform CreateNonEnumerableDataPropertyOrThrow(O, "message", msg).
    let o = create_error_object(agent, kind, msg);
    if let Some(cause) = cause {
        agent[o]
            .properties
            .push(ObjectProperty::hidden(PropertyKey::from("cause"), cause));
    }
    // 5. Return O.
    Ok(Value::Object(o))
}

/// ### [20.5.8.1 InstallErrorCause ( O, options )](https://tc39.es/ecma262/#sec-installerrorcause)
pub(super) fn get_error_cause(agent: &mut Agent, options: &Value) -> Option<Value> {
    // 1. If options is an Object and ? HasProperty(options, "cause") is true, then
    let Value::Object(options) = options else {
        return None;
    };
    let key = PropertyKey::from("cause");
    if !has_property(agent, *options, &key) {
        return None;
    }
    // a. Let cause be ? Get(options, "cause").
    Some(get(agent, *options, &key))
}
