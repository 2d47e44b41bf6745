// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::error_constructor::construct_error;
use crate::ecmascript::{
    builders::BuiltinFunctionBuilder,
    builtins::{ArgumentsList, Behaviour, Builtin},
    execution::{Agent, ExceptionType, JsResult},
    types::{Object, Value},
};

struct RangeErrorConstructor;
impl Builtin for RangeErrorConstructor {
    const NAME: &'static str = "RangeError";

    const LENGTH: u8 = 1;

    const BEHAVIOUR: Behaviour =
        Behaviour::Constructor(NativeErrorConstructors::range_error_constructor);
}
struct ReferenceErrorConstructor;
impl Builtin for ReferenceErrorConstructor {
    const NAME: &'static str = "ReferenceError";

    const LENGTH: u8 = 1;

    const BEHAVIOUR: Behaviour =
        Behaviour::Constructor(NativeErrorConstructors::reference_error_constructor);
}
struct SyntaxErrorConstructor;
impl Builtin for SyntaxErrorConstructor {
    const NAME: &'static str = "SyntaxError";

    const LENGTH: u8 = 1;

    const BEHAVIOUR: Behaviour =
        Behaviour::Constructor(NativeErrorConstructors::syntax_error_constructor);
}
struct TypeErrorConstructor;
impl Builtin for TypeErrorConstructor {
    const NAME: &'static str = "TypeError";

    const LENGTH: u8 = 1;

    const BEHAVIOUR: Behaviour =
        Behaviour::Constructor(NativeErrorConstructors::type_error_constructor);
}

/// ### [20.5.6 NativeError Object Structure](https://tc39.es/ecma262/#sec-nativeerror-object-structure)
pub(crate) struct NativeErrorConstructors;
impl NativeErrorConstructors {
    fn range_error_constructor(
        agent: &mut Agent,
        _this_value: Value,
        arguments: ArgumentsList,
        _new_target: Option<Object>,
    ) -> JsResult<Value> {
        construct_error(agent, ExceptionType::RangeError, arguments)
    }

    fn reference_error_constructor(
        agent: &mut Agent,
        _this_value: Value,
        arguments: ArgumentsList,
        _new_target: Option<Object>,
    ) -> JsResult<Value> {
        construct_error(agent, ExceptionType::ReferenceError, arguments)
    }

    fn syntax_error_constructor(
        agent: &mut Agent,
        _this_value: Value,
        arguments: ArgumentsList,
        _new_target: Option<Object>,
    ) -> JsResult<Value> {
        construct_error(agent, ExceptionType::SyntaxError, arguments)
    }

    fn type_error_constructor(
        agent: &mut Agent,
        _this_value: Value,
        arguments: ArgumentsList,
        _new_target: Option<Object>,
    ) -> JsResult<Value> {
        construct_error(agent, ExceptionType::TypeError, arguments)
    }

    /// The constructors in the order they are exposed as globals.
    pub(crate) fn create_intrinsics(agent: &mut Agent) -> [(&'static str, Object); 4] {
        [
            (
                RangeErrorConstructor::NAME,
                BuiltinFunctionBuilder::new::<RangeErrorConstructor>(agent).build(),
            ),
            (
                ReferenceErrorConstructor::NAME,
                BuiltinFunctionBuilder::new::<ReferenceErrorConstructor>(agent).build(),
            ),
            (
                SyntaxErrorConstructor::NAME,
                BuiltinFunctionBuilder::new::<SyntaxErrorConstructor>(agent).build(),
            ),
            (
                TypeErrorConstructor::NAME,
                BuiltinFunctionBuilder::new::<TypeErrorConstructor>(agent).build(),
            ),
        ]
    }
}
