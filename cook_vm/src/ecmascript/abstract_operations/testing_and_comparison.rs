// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ## [7.2 Testing and Comparison Operations](https://tc39.es/ecma262/#sec-testing-and-comparison-operations)

use super::type_conversion::{PreferredType, to_number, to_primitive};
use crate::ecmascript::{
    builtins::Behaviour,
    execution::{Agent, ExceptionType, JsResult},
    types::{Object, ObjectKind, Value},
};

/// ### [7.2.1 RequireObjectCoercible ( argument )](https://tc39.es/ecma262/#sec-requireobjectcoercible)
///
/// The abstract operation RequireObjectCoercible takes argument argument (an
/// ECMAScript language value) and returns either a normal completion
/// containing an ECMAScript language value or a throw completion. It throws
/// an error if argument is a value that cannot be converted to an Object
/// using ToObject.
pub(crate) fn require_object_coercible(agent: &mut Agent, argument: &Value) -> JsResult<()> {
    if argument.is_nullish() {
        let name = if argument.is_null() { "null" } else { "undefined" };
        Err(agent.throw_exception(
            ExceptionType::TypeError,
            format!("Cannot destructure '{name}' as it is {name}."),
        ))
    } else {
        Ok(())
    }
}

/// ### [7.2.2 IsArray ( argument )](https://tc39.es/ecma262/#sec-isarray)
pub(crate) fn is_array(agent: &Agent, argument: &Value) -> bool {
    // 1. If argument is not an Object, return false.
    // 2. If argument is an Array exotic object, return true.
    // 3. If argument is a Proxy exotic object, then ...
    // 4. Return false.
    matches!(argument, Value::Object(object) if object.is_array(agent))
}

/// ### [7.2.3 IsCallable ( argument )](https://tc39.es/ecma262/#sec-iscallable)
///
/// The abstract operation IsCallable takes argument argument (an ECMAScript
/// language value) and returns a Boolean. It determines if argument is a
/// callable function with a \[\[Call\]\] internal method.
pub(crate) fn is_callable(agent: &Agent, argument: &Value) -> Option<Object> {
    // 1. If argument is not an Object, return false.
    // 2. If argument has a [[Call]] internal method, return true.
    // 3. Return false.
    match argument {
        Value::Object(object) if object.is_function(agent) => Some(*object),
        _ => None,
    }
}

/// ### [7.2.4 IsConstructor ( argument )](https://tc39.es/ecma262/#sec-isconstructor)
pub(crate) fn is_constructor(agent: &Agent, argument: &Value) -> Option<Object> {
    // 1. If argument is not an Object, return false.
    let Value::Object(object) = argument else {
        return None;
    };
    // 2. If argument has a [[Construct]] internal method, return true.
    // 3. Return false.
    match &agent[*object].kind {
        ObjectKind::ECMAScriptFunction(data) if !data.is_arrow() => Some(*object),
        ObjectKind::BuiltinFunction(data) if matches!(data.behaviour, Behaviour::Constructor(_)) => {
            Some(*object)
        }
        _ => None,
    }
}

/// ### [7.2.6 IsIntegralNumber ( argument )](https://tc39.es/ecma262/#sec-isintegralnumber)
pub(crate) fn is_integral_number(argument: &Value) -> bool {
    // 1. If argument is not a Number, return false.
    // 2. If argument is not finite, return false.
    // 3. If truncate(ℝ(argument)) ≠ ℝ(argument), return false.
    // 4. Return true.
    matches!(argument, Value::Number(number) if number.is_finite() && number.trunc() == *number)
}

/// ### [7.2.10 SameValue ( x, y )](https://tc39.es/ecma262/#sec-samevalue)
pub(crate) fn same_value(x: &Value, y: &Value) -> bool {
    // 2. If x is a Number, then
    if let (Value::Number(x), Value::Number(y)) = (x, y) {
        // a. Return Number::sameValue(x, y).
        return (x.is_nan() && y.is_nan()) || (x == y && x.is_sign_negative() == y.is_sign_negative());
    }
    // 3. Return SameValueNonNumber(x, y).
    same_value_non_number(x, y)
}

/// ### [7.2.11 SameValueZero ( x, y )](https://tc39.es/ecma262/#sec-samevaluezero)
///
/// The abstract operation SameValueZero takes arguments x (an ECMAScript
/// language value) and y (an ECMAScript language value) and returns a
/// Boolean. It determines whether or not the two arguments are the same
/// value (ignoring the difference between +0𝔽 and -0𝔽).
pub(crate) fn same_value_zero(x: &Value, y: &Value) -> bool {
    if let (Value::Number(x), Value::Number(y)) = (x, y) {
        return (x.is_nan() && y.is_nan()) || x == y;
    }
    same_value_non_number(x, y)
}

/// ### [7.2.12 SameValueNonNumber ( x, y )](https://tc39.es/ecma262/#sec-samevaluenonnumber)
fn same_value_non_number(x: &Value, y: &Value) -> bool {
    match (x, y) {
        // 2. If x is either null or undefined, return true.
        (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
        // 4. If x is a String, then
        //    a. If x and y have the same length and the same code units in
        //       the same positions, return true; otherwise, return false.
        (Value::String(x), Value::String(y)) => x == y,
        // 5. If x is a Boolean, then
        (Value::Boolean(x), Value::Boolean(y)) => x == y,
        // 6. NOTE: All other ECMAScript language values are compared by identity.
        (Value::Symbol(x), Value::Symbol(y)) => x == y,
        (Value::Object(x), Value::Object(y)) => x == y,
        _ => false,
    }
}

/// ### [7.2.13 IsLessThan ( x, y, LeftFirst )](https://tc39.es/ecma262/#sec-islessthan)
///
/// The abstract operation IsLessThan takes arguments x (an ECMAScript
/// language value), y (an ECMAScript language value), and LeftFirst (a
/// Boolean) and returns either a normal completion containing either a
/// Boolean or undefined, or a throw completion. It provides the semantics for
/// the comparison x < y, returning true, false, or undefined (which indicates
/// that at least one operand is NaN).
pub(crate) fn is_less_than<const LEFT_FIRST: bool>(
    agent: &mut Agent,
    x: &Value,
    y: &Value,
) -> JsResult<Option<bool>> {
    // 1. If LeftFirst is true, then
    let (px, py) = if LEFT_FIRST {
        // a. Let px be ? ToPrimitive(x, NUMBER).
        let px = to_primitive(agent, x, Some(PreferredType::Number))?;
        // b. Let py be ? ToPrimitive(y, NUMBER).
        let py = to_primitive(agent, y, Some(PreferredType::Number))?;
        (px, py)
    } else {
        // 2. Else,
        // a. NOTE: The order of evaluation needs to be reversed to preserve left to right evaluation.
        // b. Let py be ? ToPrimitive(y, NUMBER).
        let py = to_primitive(agent, y, Some(PreferredType::Number))?;
        // c. Let px be ? ToPrimitive(x, NUMBER).
        let px = to_primitive(agent, x, Some(PreferredType::Number))?;
        (px, py)
    };

    // 3. If px is a String and py is a String, then
    if let (Value::String(px), Value::String(py)) = (&px, &py) {
        // a-d. Compare code unit by code unit.
        return Ok(Some(px.code_units().lt(py.code_units())));
    }

    // 4. Else,
    // d. Let nx be ? ToNumeric(px).
    let nx = to_number(agent, &px)?;
    // e. Let ny be ? ToNumeric(py).
    let ny = to_number(agent, &py)?;
    // f. If Type(nx) is Type(ny), then
    //    i. If nx is a Number, then
    //       1. Return Number::lessThan(nx, ny).
    if nx.is_nan() || ny.is_nan() {
        return Ok(None);
    }
    Ok(Some(nx < ny))
}

/// ### [7.2.14 IsLooselyEqual ( x, y )](https://tc39.es/ecma262/#sec-islooselyequal)
///
/// The abstract operation IsLooselyEqual takes arguments x (an ECMAScript
/// language value) and y (an ECMAScript language value) and returns either a
/// normal completion containing a Boolean or a throw completion. It provides
/// the semantics for the == operator.
pub(crate) fn is_loosely_equal(agent: &mut Agent, x: &Value, y: &Value) -> JsResult<bool> {
    // 1. If Type(x) is Type(y), then
    if std::mem::discriminant(x) == std::mem::discriminant(y) {
        // a. Return IsStrictlyEqual(x, y).
        return Ok(is_strictly_equal(x, y));
    }

    match (x, y) {
        // 2. If x is null and y is undefined, return true.
        // 3. If x is undefined and y is null, return true.
        (Value::Null, Value::Undefined) | (Value::Undefined, Value::Null) => Ok(true),
        // 5. If x is a Number and y is a String, return ! IsLooselyEqual(x, ! ToNumber(y)).
        (Value::Number(_), Value::String(_)) => {
            let y = Value::Number(to_number(agent, y)?);
            is_loosely_equal(agent, x, &y)
        }
        // 6. If x is a String and y is a Number, return ! IsLooselyEqual(! ToNumber(x), y).
        (Value::String(_), Value::Number(_)) => {
            let x = Value::Number(to_number(agent, x)?);
            is_loosely_equal(agent, &x, y)
        }
        // 9. If x is a Boolean, return ! IsLooselyEqual(! ToNumber(x), y).
        (Value::Boolean(_), _) => {
            let x = Value::Number(to_number(agent, x)?);
            is_loosely_equal(agent, &x, y)
        }
        // 10. If y is a Boolean, return ! IsLooselyEqual(x, ! ToNumber(y)).
        (_, Value::Boolean(_)) => {
            let y = Value::Number(to_number(agent, y)?);
            is_loosely_equal(agent, x, &y)
        }
        // 11. If x is either a String, a Number, a BigInt, or a Symbol and y
        //     is an Object, return ! IsLooselyEqual(x, ? ToPrimitive(y)).
        (Value::String(_) | Value::Number(_) | Value::Symbol(_), Value::Object(_)) => {
            let y = to_primitive(agent, y, None)?;
            is_loosely_equal(agent, x, &y)
        }
        // 12. If x is an Object and y is either a String, a Number, a BigInt,
        //     or a Symbol, return ! IsLooselyEqual(? ToPrimitive(x), y).
        (Value::Object(_), Value::String(_) | Value::Number(_) | Value::Symbol(_)) => {
            let x = to_primitive(agent, x, None)?;
            is_loosely_equal(agent, &x, y)
        }
        // 14. Return false.
        _ => Ok(false),
    }
}

/// ### [7.2.15 IsStrictlyEqual ( x, y )](https://tc39.es/ecma262/#sec-isstrictlyequal)
///
/// The abstract operation IsStrictlyEqual takes arguments x (an ECMAScript
/// language value) and y (an ECMAScript language value) and returns a
/// Boolean. It provides the semantics for the === operator.
pub(crate) fn is_strictly_equal(x: &Value, y: &Value) -> bool {
    // 1. If Type(x) is not Type(y), return false.
    // 2. If x is a Number, then
    if let (Value::Number(x), Value::Number(y)) = (x, y) {
        // a. Return Number::equal(x, y).
        return x == y;
    }
    // 3. Return SameValueNonNumber(x, y).
    same_value_non_number(x, y)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ecmascript::execution::AgentOptions;

    #[test]
    fn same_value_distinguishes_zeroes() {
        assert!(!same_value(&Value::from(0.0), &Value::from(-0.0)));
        assert!(same_value_zero(&Value::from(0.0), &Value::from(-0.0)));
        assert!(same_value(&Value::nan(), &Value::nan()));
        assert!(!is_strictly_equal(&Value::nan(), &Value::nan()));
    }

    #[test]
    fn loose_equality_coerces() {
        let mut agent = Agent::new(AgentOptions::default());
        assert!(is_loosely_equal(&mut agent, &Value::Null, &Value::Undefined).unwrap());
        assert!(is_loosely_equal(&mut agent, &Value::from("1"), &Value::from(1)).unwrap());
        assert!(is_loosely_equal(&mut agent, &Value::from(true), &Value::from("1")).unwrap());
        assert!(!is_loosely_equal(&mut agent, &Value::Null, &Value::from(0)).unwrap());
    }

    #[test]
    fn less_than_compares_strings_by_code_unit() {
        let mut agent = Agent::new(AgentOptions::default());
        assert_eq!(
            is_less_than::<true>(&mut agent, &Value::from("a"), &Value::from("b")).unwrap(),
            Some(true)
        );
        assert_eq!(
            is_less_than::<true>(&mut agent, &Value::from("10"), &Value::from("9")).unwrap(),
            Some(true)
        );
        assert_eq!(
            is_less_than::<true>(&mut agent, &Value::from(10), &Value::from("9")).unwrap(),
            Some(false)
        );
        assert_eq!(
            is_less_than::<true>(&mut agent, &Value::nan(), &Value::from(1)).unwrap(),
            None
        );
    }
}
