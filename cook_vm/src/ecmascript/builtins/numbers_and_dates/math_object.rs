// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::ecmascript::{
    abstract_operations::type_conversion::to_number,
    builders::OrdinaryObjectBuilder,
    builtins::{ArgumentsList, Behaviour, Builtin},
    execution::{Agent, JsResult},
    types::{Object, Value},
};

pub(crate) struct MathObject;

struct MathObjectAbs;
impl Builtin for MathObjectAbs {
    const NAME: &'static str = "abs";
    const LENGTH: u8 = 1;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(MathObject::abs);
}

struct MathObjectCeil;
impl Builtin for MathObjectCeil {
    const NAME: &'static str = "ceil";
    const LENGTH: u8 = 1;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(MathObject::ceil);
}

struct MathObjectFloor;
impl Builtin for MathObjectFloor {
    const NAME: &'static str = "floor";
    const LENGTH: u8 = 1;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(MathObject::floor);
}

struct MathObjectMax;
impl Builtin for MathObjectMax {
    const NAME: &'static str = "max";
    const LENGTH: u8 = 2;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(MathObject::max);
}

struct MathObjectMin;
impl Builtin for MathObjectMin {
    const NAME: &'static str = "min";
    const LENGTH: u8 = 2;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(MathObject::min);
}

struct MathObjectPow;
impl Builtin for MathObjectPow {
    const NAME: &'static str = "pow";
    const LENGTH: u8 = 2;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(MathObject::pow);
}

struct MathObjectRound;
impl Builtin for MathObjectRound {
    const NAME: &'static str = "round";
    const LENGTH: u8 = 1;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(MathObject::round);
}

struct MathObjectSign;
impl Builtin for MathObjectSign {
    const NAME: &'static str = "sign";
    const LENGTH: u8 = 1;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(MathObject::sign);
}

struct MathObjectSqrt;
impl Builtin for MathObjectSqrt {
    const NAME: &'static str = "sqrt";
    const LENGTH: u8 = 1;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(MathObject::sqrt);
}

struct MathObjectTrunc;
impl Builtin for MathObjectTrunc {
    const NAME: &'static str = "trunc";
    const LENGTH: u8 = 1;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(MathObject::trunc);
}

impl MathObject {
    /// ### [21.3.2.1 Math.abs ( x )](https://tc39.es/ecma262/#sec-math.abs)
    fn abs(agent: &mut Agent, _this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
        let n = to_number(agent, &arguments.get(0))?;
        Ok(Value::Number(n.abs()))
    }

    /// ### [21.3.2.10 Math.ceil ( x )](https://tc39.es/ecma262/#sec-math.ceil)
    fn ceil(agent: &mut Agent, _this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
        let n = to_number(agent, &arguments.get(0))?;
        Ok(Value::Number(n.ceil()))
    }

    /// ### [21.3.2.16 Math.floor ( x )](https://tc39.es/ecma262/#sec-math.floor)
    fn floor(agent: &mut Agent, _this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
        let n = to_number(agent, &arguments.get(0))?;
        Ok(Value::Number(n.floor()))
    }

    /// ### [21.3.2.24 Math.max ( ...args )](https://tc39.es/ecma262/#sec-math.max)
    fn max(agent: &mut Agent, _this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
        // 1. Let coerced be a new empty List.
        // 2. For each element arg of args, do
        //    a. Let n be ? ToNumber(arg).
        let coerced = coerce_all(agent, arguments)?;
        // 3. Let highest be -∞𝔽.
        let mut highest = f64::NEG_INFINITY;
        // 4. For each element number of coerced, do
        for number in coerced {
            // a. If number is NaN, return NaN.
            if number.is_nan() {
                return Ok(Value::nan());
            }
            // b. If number is +0𝔽 and highest is -0𝔽, set highest to +0𝔽.
            // c. If number > highest, set highest to number.
            if number > highest || (number == 0.0 && highest == 0.0 && highest.is_sign_negative()) {
                highest = number;
            }
        }
        // 5. Return highest.
        Ok(Value::Number(highest))
    }

    /// ### [21.3.2.25 Math.min ( ...args )](https://tc39.es/ecma262/#sec-math.min)
    fn min(agent: &mut Agent, _this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
        let coerced = coerce_all(agent, arguments)?;
        // 3. Let lowest be +∞𝔽.
        let mut lowest = f64::INFINITY;
        for number in coerced {
            if number.is_nan() {
                return Ok(Value::nan());
            }
            // b. If number is -0𝔽 and lowest is +0𝔽, set lowest to -0𝔽.
            // c. If number < lowest, set lowest to number.
            if number < lowest || (number == 0.0 && lowest == 0.0 && number.is_sign_negative()) {
                lowest = number;
            }
        }
        Ok(Value::Number(lowest))
    }

    /// ### [21.3.2.26 Math.pow ( base, exponent )](https://tc39.es/ecma262/#sec-math.pow)
    fn pow(agent: &mut Agent, _this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
        // 1. Set base to ? ToNumber(base).
        let base = to_number(agent, &arguments.get(0))?;
        // 2. Set exponent to ? ToNumber(exponent).
        let exponent = to_number(agent, &arguments.get(1))?;
        // 3. Return Number::exponentiate(base, exponent).
        Ok(Value::Number(exponentiate(base, exponent)))
    }

    /// ### [21.3.2.28 Math.round ( x )](https://tc39.es/ecma262/#sec-math.round)
    fn round(agent: &mut Agent, _this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
        let n = to_number(agent, &arguments.get(0))?;
        // 2. If n is not finite or n is an integral Number, return n.
        if !n.is_finite() || n.trunc() == n {
            return Ok(Value::Number(n));
        }
        // 3. If n < 0.5𝔽 and n > +0𝔽, return +0𝔽.
        // 4. If n < -0𝔽 and n ≥ -0.5𝔽, return -0𝔽.
        if n < 0.0 && n >= -0.5 {
            return Ok(Value::Number(-0.0));
        }
        // 5. Return the integral Number closest to n, preferring the Number
        //    closer to +∞ in the case of a tie.
        let rounded = n.round();
        if rounded - n == -0.5 {
            // Rust rounds ties away from zero.
            return Ok(Value::Number(rounded + 1.0));
        }
        Ok(Value::Number(rounded))
    }

    /// ### [21.3.2.29 Math.sign ( x )](https://tc39.es/ecma262/#sec-math.sign)
    fn sign(agent: &mut Agent, _this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
        let n = to_number(agent, &arguments.get(0))?;
        // 2. If n is one of NaN, +0𝔽, or -0𝔽, return n.
        if n.is_nan() || n == 0.0 {
            return Ok(Value::Number(n));
        }
        // 3. If n < -0𝔽, return -1𝔽.
        // 4. Return 1𝔽.
        Ok(Value::Number(n.signum()))
    }

    /// ### [21.3.2.32 Math.sqrt ( x )](https://tc39.es/ecma262/#sec-math.sqrt)
    fn sqrt(agent: &mut Agent, _this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
        let n = to_number(agent, &arguments.get(0))?;
        Ok(Value::Number(n.sqrt()))
    }

    /// ### [21.3.2.35 Math.trunc ( x )](https://tc39.es/ecma262/#sec-math.trunc)
    fn trunc(agent: &mut Agent, _this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
        let n = to_number(agent, &arguments.get(0))?;
        Ok(Value::Number(n.trunc()))
    }

    pub(crate) fn create_intrinsic(agent: &mut Agent) -> Object {
        OrdinaryObjectBuilder::new(agent)
            // 21.3.1.1 Math.E
            .with_constant_property("E", Value::Number(std::f64::consts::E))
            // 21.3.1.6 Math.PI
            .with_constant_property("PI", Value::Number(std::f64::consts::PI))
            .with_builtin_function_property::<MathObjectAbs>()
            .with_builtin_function_property::<MathObjectCeil>()
            .with_builtin_function_property::<MathObjectFloor>()
            .with_builtin_function_property::<MathObjectMax>()
            .with_builtin_function_property::<MathObjectMin>()
            .with_builtin_function_property::<MathObjectPow>()
            .with_builtin_function_property::<MathObjectRound>()
            .with_builtin_function_property::<MathObjectSign>()
            .with_builtin_function_property::<MathObjectSqrt>()
            .with_builtin_function_property::<MathObjectTrunc>()
            .build()
    }
}

fn coerce_all(agent: &mut Agent, arguments: ArgumentsList) -> JsResult<Vec<f64>> {
    arguments
        .iter()
        .map(|argument| to_number(agent, argument))
        .collect()
}

/// ### [6.1.6.1.3 Number::exponentiate ( base, exponent )](https://tc39.es/ecma262/#sec-numeric-types-number-exponentiate)
pub(crate) fn exponentiate(base: f64, exponent: f64) -> f64 {
    // 1. If exponent is NaN, return NaN.
    if exponent.is_nan() {
        return f64::NAN;
    }
    // 2. If exponent is either +0𝔽 or -0𝔽, return 1𝔽.
    if exponent == 0.0 {
        return 1.0;
    }
    // 9. If exponent is either +∞𝔽 or -∞𝔽 and abs(ℝ(base)) = 1, return NaN.
    if exponent.is_infinite() && base.abs() == 1.0 {
        return f64::NAN;
    }
    base.powf(exponent)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ecmascript::execution::AgentOptions;

    fn round(agent: &mut Agent, n: f64) -> f64 {
        MathObject::round(agent, Value::Undefined, ArgumentsList(&[Value::Number(n)]))
            .unwrap()
            .as_number()
            .unwrap()
    }

    #[test]
    fn round_prefers_positive_infinity_on_ties() {
        let mut agent = Agent::new(AgentOptions::default());
        assert_eq!(round(&mut agent, 2.5), 3.0);
        assert_eq!(round(&mut agent, -2.5), -2.0);
        assert_eq!(round(&mut agent, -2.6), -3.0);
        assert!(round(&mut agent, -0.2).is_sign_negative());
    }

    #[test]
    fn max_and_min_propagate_nan() {
        let mut agent = Agent::new(AgentOptions::default());
        let max = MathObject::max(
            &mut agent,
            Value::Undefined,
            ArgumentsList(&[Value::from(1), Value::from("3"), Value::from(2)]),
        );
        assert_eq!(max.unwrap(), Value::from(3));
        let min = MathObject::min(&mut agent, Value::Undefined, ArgumentsList(&[]));
        assert_eq!(min.unwrap(), Value::Number(f64::INFINITY));
        let max = MathObject::max(
            &mut agent,
            Value::Undefined,
            ArgumentsList(&[Value::from(1), Value::Undefined]),
        );
        assert!(max.unwrap().as_number().unwrap().is_nan());
    }

    #[test]
    fn exponentiate_edge_cases() {
        assert_eq!(exponentiate(2.0, 10.0), 1024.0);
        assert!(exponentiate(1.0, f64::INFINITY).is_nan());
        assert_eq!(exponentiate(f64::NAN, 0.0), 1.0);
    }
}
