// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::ops::Deref;

use crate::{
    ecmascript::{
        execution::{Agent, JsResult},
        types::{Object, ObjectHeapData, ObjectKind, Value},
    },
    heap::CreateHeapData,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct ArgumentsList<'a>(pub(crate) &'a [Value]);

impl<'a> Deref for ArgumentsList<'a> {
    type Target = &'a [Value];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl ArgumentsList<'_> {
    #[inline]
    pub fn get(&self, index: usize) -> Value {
        self.0.get(index).cloned().unwrap_or_default()
    }

    /// The arguments from `index` onwards.
    pub(crate) fn slice_from(&self, index: usize) -> &[Value] {
        self.0.get(index..).unwrap_or_default()
    }
}

pub type RegularFn = fn(&mut Agent, Value, ArgumentsList<'_>) -> JsResult<Value>;
pub type ConstructorFn = fn(&mut Agent, Value, ArgumentsList<'_>, Option<Object>) -> JsResult<Value>;

#[derive(Debug, Clone, Copy)]
pub enum Behaviour {
    Regular(RegularFn),
    Constructor(ConstructorFn),
}

impl Behaviour {
    pub(crate) fn is_constructor(&self) -> bool {
        matches!(self, Behaviour::Constructor(_))
    }
}

pub trait Builtin {
    const NAME: &'static str;
    const LENGTH: u8;
    const BEHAVIOUR: Behaviour;
}

/// ### [10.3 Built-in Function Objects](https://tc39.es/ecma262/#sec-built-in-function-objects)
#[derive(Debug)]
pub struct BuiltinFunctionHeapData {
    /// ### \[\[InitialName]]
    pub(crate) name: &'static str,
    pub(crate) length: u8,
    pub(crate) behaviour: Behaviour,
}

/// ### [10.3.4 CreateBuiltinFunction ( behaviour, length, name, additionalInternalSlotsList \[ , realm \[ , prototype \[ , prefix \] \] \] )](https://tc39.es/ecma262/#sec-createbuiltinfunction)
///
/// Built-in functions are realm independent: they never look at the
/// running execution context.
pub(crate) fn create_builtin_function<T: Builtin>(agent: &mut Agent) -> Object {
    // 5. Let func be a new built-in function object that, when called,
    //    performs the action described by behaviour using the provided
    //    arguments as the values of the corresponding parameters specified
    //    by behaviour.
    // 10. Perform SetFunctionLength(func, length).
    // 11. If prefix is not present, then
    //     a. Perform SetFunctionName(func, name).
    agent.heap.create(ObjectHeapData::new(ObjectKind::BuiltinFunction(
        BuiltinFunctionHeapData {
            name: T::NAME,
            length: T::LENGTH,
            behaviour: T::BEHAVIOUR,
        },
    )))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ecmascript::{
        abstract_operations::{
            operations_on_objects::call,
            testing_and_comparison::{is_callable, is_constructor},
        },
        execution::AgentOptions,
    };

    struct Twice;
    impl Builtin for Twice {
        const NAME: &'static str = "twice";
        const LENGTH: u8 = 1;
        const BEHAVIOUR: Behaviour = Behaviour::Regular(twice);
    }

    fn twice(_agent: &mut Agent, _this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
        let Value::Number(number) = arguments.get(0) else {
            return Ok(Value::nan());
        };
        Ok(Value::Number(number * 2.0))
    }

    #[test]
    fn builtin_functions_are_callable_but_not_constructors() {
        let mut agent = Agent::new(AgentOptions::default());
        let function = Value::Object(create_builtin_function::<Twice>(&mut agent));
        assert!(is_callable(&agent, &function).is_some());
        assert!(is_constructor(&agent, &function).is_none());
        let result = call(&mut agent, &function, Value::Undefined, &[Value::from(21)]).unwrap();
        assert_eq!(result, Value::from(42));
        assert_eq!(function.as_object().unwrap().function_name(&agent), "twice");
    }

    #[test]
    fn missing_arguments_read_as_undefined() {
        let arguments = ArgumentsList(&[Value::from(1)]);
        assert_eq!(arguments.get(0), Value::from(1));
        assert_eq!(arguments.get(3), Value::Undefined);
        assert!(arguments.slice_from(2).is_empty());
    }
}
