// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::ecmascript::{
    abstract_operations::type_conversion::to_string,
    builders::BuiltinFunctionBuilder,
    builtins::{ArgumentsList, Behaviour, Builtin},
    execution::{Agent, JsResult},
    types::{Object, Value},
};

pub(crate) struct StringConstructor;

impl Builtin for StringConstructor {
    const NAME: &'static str = "String";

    const LENGTH: u8 = 1;

    const BEHAVIOUR: Behaviour = Behaviour::Constructor(Self::behaviour);
}

impl StringConstructor {
    /// ### [22.1.1.1 String ( value )](https://tc39.es/ecma262/#sec-string-constructor-string-value)
    ///
    /// There are no String objects: `new String(value)` returns the
    /// primitive too.
    fn behaviour(
        agent: &mut Agent,
        _this_value: Value,
        arguments: ArgumentsList,
        new_target: Option<Object>,
    ) -> JsResult<Value> {
        // 1. If value is not present, then
        //    a. Let s be the empty String.
        if arguments.is_empty() {
            return Ok(Value::from(""));
        }
        let value = arguments.get(0);
        // 2. Else,
        //    a. If NewTarget is undefined and value is a Symbol, return SymbolDescriptiveString(value).
        if let (None, Value::Symbol(symbol)) = (new_target, &value) {
            return Ok(Value::String(symbol.descriptive_string(agent)));
        }
        //    b. Let s be ? ToString(value).
        to_string(agent, &value).map(Value::String)
    }

    pub(crate) fn create_intrinsic(agent: &mut Agent) -> Object {
        BuiltinFunctionBuilder::new::<StringConstructor>(agent).build()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ecmascript::execution::AgentOptions;

    #[test]
    fn converts_values_to_strings() {
        let mut agent = Agent::new(AgentOptions::default());
        let mut string = |arguments: &[Value]| {
            StringConstructor::behaviour(&mut agent, Value::Undefined, ArgumentsList(arguments), None)
        };
        assert_eq!(string(&[]).unwrap(), Value::from(""));
        assert_eq!(string(&[Value::from(1.5)]).unwrap(), Value::from("1.5"));
        assert_eq!(string(&[Value::Null]).unwrap(), Value::from("null"));
    }

    #[test]
    fn symbols_use_their_descriptive_string() {
        let mut agent = Agent::new(AgentOptions::default());
        let symbol = agent.create_symbol(Some("tag"));
        let result = StringConstructor::behaviour(
            &mut agent,
            Value::Undefined,
            ArgumentsList(&[Value::Symbol(symbol)]),
            None,
        );
        assert_eq!(result.unwrap(), Value::from("Symbol(tag)"));
    }
}
