// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::ecmascript::{
    abstract_operations::{testing_and_comparison::is_integral_number, type_conversion::to_number},
    builders::BuiltinFunctionBuilder,
    builtins::{ArgumentsList, Behaviour, Builtin},
    execution::{Agent, JsResult},
    types::{Object, Value},
};

pub(crate) struct NumberConstructor;

impl Builtin for NumberConstructor {
    const NAME: &'static str = "Number";

    const LENGTH: u8 = 1;

    const BEHAVIOUR: Behaviour = Behaviour::Constructor(Self::behaviour);
}

struct NumberIsFinite;
impl Builtin for NumberIsFinite {
    const NAME: &'static str = "isFinite";

    const LENGTH: u8 = 1;

    const BEHAVIOUR: Behaviour = Behaviour::Regular(NumberConstructor::is_finite);
}
struct NumberIsInteger;
impl Builtin for NumberIsInteger {
    const NAME: &'static str = "isInteger";

    const LENGTH: u8 = 1;

    const BEHAVIOUR: Behaviour = Behaviour::Regular(NumberConstructor::is_integer);
}
struct NumberIsNaN;
impl Builtin for NumberIsNaN {
    const NAME: &'static str = "isNaN";

    const LENGTH: u8 = 1;

    const BEHAVIOUR: Behaviour = Behaviour::Regular(NumberConstructor::is_nan);
}
struct NumberIsSafeInteger;
impl Builtin for NumberIsSafeInteger {
    const NAME: &'static str = "isSafeInteger";

    const LENGTH: u8 = 1;

    const BEHAVIOUR: Behaviour = Behaviour::Regular(NumberConstructor::is_safe_integer);
}

/// 2**53 - 1
const MAX_SAFE_INTEGER: f64 = 9007199254740991.0;

impl NumberConstructor {
    /// ### [21.1.1.1 Number ( value )](https://tc39.es/ecma262/#sec-number-constructor-number-value)
    ///
    /// `new Number(value)` also yields the primitive.
    fn behaviour(
        agent: &mut Agent,
        _this_value: Value,
        arguments: ArgumentsList,
        _new_target: Option<Object>,
    ) -> JsResult<Value> {
        // 1. If value is present, then
        //    a. Let prim be ? ToNumeric(value).
        //    c. Otherwise, let n be prim.
        // 2. Else,
        //    a. Let n be +0𝔽.
        if arguments.is_empty() {
            return Ok(Value::Number(0.0));
        }
        to_number(agent, &arguments.get(0)).map(Value::Number)
    }

    /// ### [21.1.2.2 Number.isFinite ( number )](https://tc39.es/ecma262/#sec-number.isfinite)
    fn is_finite(_agent: &mut Agent, _: Value, arguments: ArgumentsList) -> JsResult<Value> {
        // 1. If number is not a Number, return false.
        // 2. If number is not finite, return false.
        // 3. Otherwise, return true.
        let result = matches!(arguments.get(0), Value::Number(number) if number.is_finite());
        Ok(Value::Boolean(result))
    }

    /// ### [21.1.2.3 Number.isInteger ( number )](https://tc39.es/ecma262/#sec-number.isinteger)
    fn is_integer(_agent: &mut Agent, _: Value, arguments: ArgumentsList) -> JsResult<Value> {
        // 1. Return IsIntegralNumber(number).
        Ok(Value::Boolean(is_integral_number(&arguments.get(0))))
    }

    /// ### [21.1.2.4 Number.isNaN ( number )](https://tc39.es/ecma262/#sec-number.isnan)
    fn is_nan(_agent: &mut Agent, _: Value, arguments: ArgumentsList) -> JsResult<Value> {
        // 1. If number is not a Number, return false.
        // 2. If number is NaN, return true.
        let result = matches!(arguments.get(0), Value::Number(number) if number.is_nan());
        Ok(Value::Boolean(result))
    }

    /// ### [21.1.2.5 Number.isSafeInteger ( number )](https://tc39.es/ecma262/#sec-number.issafeinteger)
    fn is_safe_integer(_agent: &mut Agent, _: Value, arguments: ArgumentsList) -> JsResult<Value> {
        let number = arguments.get(0);
        // 1. If IsIntegralNumber(number) is true, then
        //    a. If abs(ℝ(number)) ≤ 2**53 - 1, return true.
        let result = is_integral_number(&number)
            && number.as_number().is_some_and(|n| n.abs() <= MAX_SAFE_INTEGER);
        Ok(Value::Boolean(result))
    }

    /// `Number.parseInt` and `Number.parseFloat` are the same function
    /// objects as the globals of those names.
    pub(crate) fn create_intrinsic(agent: &mut Agent, parse_int: Object, parse_float: Object) -> Object {
        BuiltinFunctionBuilder::new::<NumberConstructor>(agent)
            .with_constant_property("EPSILON", Value::Number(f64::EPSILON))
            .with_constant_property("MAX_SAFE_INTEGER", Value::Number(MAX_SAFE_INTEGER))
            .with_constant_property("MAX_VALUE", Value::Number(f64::MAX))
            .with_constant_property("MIN_SAFE_INTEGER", Value::Number(-MAX_SAFE_INTEGER))
            // 5 × 10**-324
            .with_constant_property("MIN_VALUE", Value::Number(5e-324))
            .with_constant_property("NaN", Value::nan())
            .with_constant_property("NEGATIVE_INFINITY", Value::Number(f64::NEG_INFINITY))
            .with_constant_property("POSITIVE_INFINITY", Value::Number(f64::INFINITY))
            .with_builtin_function_property::<NumberIsFinite>()
            .with_builtin_function_property::<NumberIsInteger>()
            .with_builtin_function_property::<NumberIsNaN>()
            .with_builtin_function_property::<NumberIsSafeInteger>()
            .with_function_property("parseFloat", parse_float)
            .with_function_property("parseInt", parse_int)
            .build()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ecmascript::execution::AgentOptions;

    #[test]
    fn predicates_do_not_coerce() {
        let mut agent = Agent::new(AgentOptions::default());
        let is_nan = NumberConstructor::is_nan(&mut agent, Value::Undefined, ArgumentsList(&[Value::from("x")]));
        assert_eq!(is_nan.unwrap(), Value::Boolean(false));
        let is_finite =
            NumberConstructor::is_finite(&mut agent, Value::Undefined, ArgumentsList(&[Value::from("1")]));
        assert_eq!(is_finite.unwrap(), Value::Boolean(false));
        let is_integer =
            NumberConstructor::is_integer(&mut agent, Value::Undefined, ArgumentsList(&[Value::from(5.0)]));
        assert_eq!(is_integer.unwrap(), Value::Boolean(true));
        let is_safe = NumberConstructor::is_safe_integer(
            &mut agent,
            Value::Undefined,
            ArgumentsList(&[Value::Number(2f64.powi(53))]),
        );
        assert_eq!(is_safe.unwrap(), Value::Boolean(false));
    }

    #[test]
    fn number_converts_its_argument() {
        let mut agent = Agent::new(AgentOptions::default());
        let n = NumberConstructor::behaviour(&mut agent, Value::Undefined, ArgumentsList(&[]), None);
        assert_eq!(n.unwrap(), Value::from(0));
        let n = NumberConstructor::behaviour(
            &mut agent,
            Value::Undefined,
            ArgumentsList(&[Value::from(" 12 ")]),
            None,
        );
        assert_eq!(n.unwrap(), Value::from(12));
    }
}
