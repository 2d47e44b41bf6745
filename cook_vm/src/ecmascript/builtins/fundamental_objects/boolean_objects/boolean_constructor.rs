// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::ecmascript::{
    abstract_operations::type_conversion::to_boolean,
    builders::BuiltinFunctionBuilder,
    builtins::{ArgumentsList, Behaviour, Builtin},
    execution::{Agent, JsResult},
    types::{Object, Value},
};

pub(crate) struct BooleanConstructor;

impl Builtin for BooleanConstructor {
    const NAME: &'static str = "Boolean";

    const LENGTH: u8 = 1;

    const BEHAVIOUR: Behaviour = Behaviour::Constructor(Self::behaviour);
}

impl BooleanConstructor {
    /// ### [20.3.1.1 Boolean ( value )](https://tc39.es/ecma262/#sec-boolean-constructor-boolean-value)
    ///
    /// `new Boolean(value)` also yields the primitive.
    fn behaviour(
        _agent: &mut Agent,
        _this_value: Value,
        arguments: ArgumentsList,
        _new_target: Option<Object>,
    ) -> JsResult<Value> {
        // 1. Let b be ToBoolean(value).
        // 2. If NewTarget is undefined, return b.
        Ok(Value::Boolean(to_boolean(&arguments.get(0))))
    }

    pub(crate) fn create_intrinsic(agent: &mut Agent) -> Object {
        BuiltinFunctionBuilder::new::<BooleanConstructor>(agent).build()
    }
}
