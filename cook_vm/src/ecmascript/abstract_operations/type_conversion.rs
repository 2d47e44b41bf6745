// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ## [7.1 Type Conversion](https://tc39.es/ecma262/#sec-type-conversion)
//!
//! The ECMAScript language implicitly performs automatic type conversion as
//! needed. To clarify the semantics of certain constructs it is useful to
//! define a set of conversion abstract operations. The conversion abstract
//! operations are polymorphic; they can accept a value of any ECMAScript
//! language type.

use super::{
    operations_on_objects::{call, get_own_property_value},
    testing_and_comparison::is_callable,
};
use crate::ecmascript::{
    builtins::{array::array_join, ecmascript_function::function_source_text, error::error_to_string},
    execution::{Agent, ExceptionType, JsResult},
    types::{JsString, Object, PropertyKey, Value},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferredType {
    String = 1,
    Number,
}

/// ### [7.1.1 ToPrimitive ( input \[ , preferredType \] )](https://tc39.es/ecma262/#sec-toprimitive)
///
/// The abstract operation ToPrimitive takes argument input (an ECMAScript
/// language value) and optional argument preferredType (STRING or NUMBER) and
/// returns either a normal completion containing an ECMAScript language value
/// or a throw completion. It converts its input argument to a non-Object type.
pub(crate) fn to_primitive(
    agent: &mut Agent,
    input: &Value,
    preferred_type: Option<PreferredType>,
) -> JsResult<Value> {
    // 1. If input is an Object, then
    let Value::Object(input) = input else {
        // 2. Return input.
        return Ok(input.clone());
    };
    // a. Let exoticToPrim be ? GetMethod(input, @@toPrimitive).
    // Symbol.toPrimitive is not exposed to cooked code.
    // c. If preferredType is not present, let preferredType be NUMBER.
    // d. Return ? OrdinaryToPrimitive(input, preferredType).
    ordinary_to_primitive(
        agent,
        *input,
        preferred_type.unwrap_or(PreferredType::Number),
    )
}

/// ### [7.1.1.1 OrdinaryToPrimitive ( O, hint )](https://tc39.es/ecma262/#sec-ordinarytoprimitive)
///
/// Own `toString` and `valueOf` methods are honoured. Without them the
/// result is what the missing prototype methods would produce for the
/// object's kind.
pub(crate) fn ordinary_to_primitive(
    agent: &mut Agent,
    o: Object,
    hint: PreferredType,
) -> JsResult<Value> {
    // 1. If hint is STRING, then
    //    a. Let methodNames be « "toString", "valueOf" ».
    // 2. Else,
    //    a. Let methodNames be « "valueOf", "toString" ».
    let method_names = match hint {
        PreferredType::String => ["toString", "valueOf"],
        PreferredType::Number => ["valueOf", "toString"],
    };
    // 3. For each element name of methodNames, do
    for name in method_names {
        // a. Let method be ? Get(O, name).
        let method = get_own_property_value(agent, o, &PropertyKey::from(name));
        // b. If IsCallable(method) is true, then
        if let Some(method) = method.filter(|method| is_callable(agent, method).is_some()) {
            // i. Let result be ? Call(method, O).
            let result = call(agent, &method, Value::Object(o), &[])?;
            // ii. If result is not an Object, return result.
            if !result.is_object() {
                return Ok(result);
            }
        }
    }
    let string = if o.is_array(agent) {
        array_join(agent, o, &JsString::from(","))?
    } else if o.is_error(agent) {
        error_to_string(agent, o)?
    } else if o.is_function(agent) {
        JsString::from(function_source_text(agent, o))
    } else {
        JsString::from("[object Object]")
    };
    Ok(Value::String(string))
}

/// ### [7.1.2 ToBoolean ( argument )](https://tc39.es/ecma262/#sec-toboolean)
pub(crate) fn to_boolean(argument: &Value) -> bool {
    match argument {
        // 1. If argument is a Boolean, return argument.
        Value::Boolean(boolean) => *boolean,
        // 2. If argument is one of undefined, null, +0𝔽, -0𝔽, NaN, 0ℤ, or the
        //    empty String, return false.
        Value::Undefined | Value::Null => false,
        Value::Number(number) => !(*number == 0.0 || number.is_nan()),
        Value::String(string) => !string.is_empty(),
        // 4. Return true.
        Value::Symbol(_) | Value::Object(_) => true,
    }
}

/// ### [7.1.4 ToNumber ( argument )](https://tc39.es/ecma262/#sec-tonumber)
pub(crate) fn to_number(agent: &mut Agent, argument: &Value) -> JsResult<f64> {
    match argument {
        // 1. If argument is a Number, return argument.
        Value::Number(number) => Ok(*number),
        // 2. If argument is either a Symbol or a BigInt, throw a TypeError exception.
        Value::Symbol(_) => Err(agent.throw_exception_with_static_message(
            ExceptionType::TypeError,
            "Cannot convert a Symbol value to a number",
        )),
        // 3. If argument is undefined, return NaN.
        Value::Undefined => Ok(f64::NAN),
        // 4. If argument is either null or false, return +0𝔽.
        Value::Null => Ok(0.0),
        // 5. If argument is true, return 1𝔽.
        Value::Boolean(boolean) => Ok(if *boolean { 1.0 } else { 0.0 }),
        // 6. If argument is a String, return StringToNumber(argument).
        Value::String(string) => Ok(string_to_number(string)),
        // 7. Assert: argument is an Object.
        // 8. Let primValue be ? ToPrimitive(argument, NUMBER).
        // 9. Assert: primValue is not an Object.
        // 10. Return ? ToNumber(primValue).
        Value::Object(_) => {
            let primitive = to_primitive(agent, argument, Some(PreferredType::Number))?;
            to_number(agent, &primitive)
        }
    }
}

/// ### [7.1.4.1.1 StringToNumber ( str )](https://tc39.es/ecma262/#sec-stringtonumber)
pub(crate) fn string_to_number(string: &str) -> f64 {
    // 1. Let literal be ParseText(str, StringNumericLiteral).
    // 2. If literal is a List of errors, return NaN.
    // 3. Return StringNumericValue of literal.
    let trimmed = string.trim_matches(is_white_space_or_line_terminator);
    if trimmed.is_empty() {
        return 0.0;
    }
    let radix = match trimmed.get(..2) {
        Some("0x" | "0X") => 16,
        Some("0o" | "0O") => 8,
        Some("0b" | "0B") => 2,
        _ => 10,
    };
    if radix != 10 {
        let digits = &trimmed[2..];
        if digits.is_empty() {
            return f64::NAN;
        }
        let mut value = 0.0;
        for digit in digits.chars() {
            let Some(digit) = digit.to_digit(radix) else {
                return f64::NAN;
            };
            value = value * f64::from(radix) + f64::from(digit);
        }
        return value;
    }
    let (sign, unsigned) = match trimmed.as_bytes()[0] {
        b'+' => (1.0, &trimmed[1..]),
        b'-' => (-1.0, &trimmed[1..]),
        _ => (1.0, trimmed),
    };
    if unsigned == "Infinity" {
        return sign * f64::INFINITY;
    }
    if !is_str_unsigned_decimal_literal(unsigned) {
        return f64::NAN;
    }
    match fast_float::parse::<f64, _>(unsigned) {
        Ok(value) => sign * value,
        Err(_) => f64::NAN,
    }
}

/// StrUnsignedDecimalLiteral without `Infinity`: `1`, `1.`, `.1`, `1.5e-3`.
fn is_str_unsigned_decimal_literal(literal: &str) -> bool {
    let bytes = literal.as_bytes();
    let mut index = 0;
    let integer_digits = bytes.iter().take_while(|byte| byte.is_ascii_digit()).count();
    index += integer_digits;
    let mut fraction_digits = 0;
    if bytes.get(index) == Some(&b'.') {
        index += 1;
        fraction_digits = bytes[index..]
            .iter()
            .take_while(|byte| byte.is_ascii_digit())
            .count();
        index += fraction_digits;
    }
    if integer_digits == 0 && fraction_digits == 0 {
        return false;
    }
    if matches!(bytes.get(index), Some(b'e' | b'E')) {
        index += 1;
        if matches!(bytes.get(index), Some(b'+' | b'-')) {
            index += 1;
        }
        let exponent_digits = bytes[index..]
            .iter()
            .take_while(|byte| byte.is_ascii_digit())
            .count();
        if exponent_digits == 0 {
            return false;
        }
        index += exponent_digits;
    }
    index == bytes.len()
}

/// WhiteSpace and LineTerminator code points, as trimmed by StringToNumber
/// and `String.prototype.trim`.
pub(crate) fn is_white_space_or_line_terminator(c: char) -> bool {
    matches!(
        c,
        '\u{9}' | '\u{B}' | '\u{C}' | '\u{FEFF}' | '\n' | '\r' | '\u{2028}' | '\u{2029}'
    ) || c.is_whitespace()
}

/// ### [7.1.5 ToIntegerOrInfinity ( argument )](https://tc39.es/ecma262/#sec-tointegerorinfinity)
pub(crate) fn to_integer_or_infinity(agent: &mut Agent, argument: &Value) -> JsResult<f64> {
    // 1. Let number be ? ToNumber(argument).
    let number = to_number(agent, argument)?;
    // 2. If number is one of NaN, +0𝔽, or -0𝔽, return 0.
    if number.is_nan() || number == 0.0 {
        return Ok(0.0);
    }
    // 3. If number is one of +∞𝔽 or -∞𝔽, return number.
    // 4. Let integer be floor(abs(ℝ(number))).
    // 5. If number < -0𝔽, set integer to -integer.
    // 6. Return integer.
    Ok(number.trunc())
}

/// ### [7.1.6 ToInt32 ( argument )](https://tc39.es/ecma262/#sec-toint32)
pub(crate) fn to_int32(agent: &mut Agent, argument: &Value) -> JsResult<i32> {
    // 1. Let number be ? ToNumber(argument).
    let number = to_number(agent, argument)?;
    Ok(number_to_uint32(number) as i32)
}

/// ### [7.1.7 ToUint32 ( argument )](https://tc39.es/ecma262/#sec-touint32)
pub(crate) fn to_uint32(agent: &mut Agent, argument: &Value) -> JsResult<u32> {
    // 1. Let number be ? ToNumber(argument).
    let number = to_number(agent, argument)?;
    Ok(number_to_uint32(number))
}

pub(crate) fn number_to_uint32(number: f64) -> u32 {
    // 2. If number is not finite or number is either +0𝔽 or -0𝔽, return +0𝔽.
    if !number.is_finite() || number == 0.0 {
        return 0;
    }
    // 3. Let int be truncate(ℝ(number)).
    let int = number.trunc();
    // 4. Let int32bit be int modulo 2**32.
    // 5. Return 𝔽(int32bit).
    int.rem_euclid(4294967296.0) as u32
}

/// ### [7.1.17 ToString ( argument )](https://tc39.es/ecma262/#sec-tostring)
pub(crate) fn to_string(agent: &mut Agent, argument: &Value) -> JsResult<JsString> {
    match argument {
        // 1. If argument is a String, return argument.
        Value::String(string) => Ok(string.clone()),
        // 2. If argument is a Symbol, throw a TypeError exception.
        Value::Symbol(_) => Err(agent.throw_exception_with_static_message(
            ExceptionType::TypeError,
            "Cannot convert a Symbol value to a string",
        )),
        // 3. If argument is undefined, return "undefined".
        Value::Undefined => Ok(JsString::from("undefined")),
        // 4. If argument is null, return "null".
        Value::Null => Ok(JsString::from("null")),
        // 5. If argument is true, return "true".
        // 6. If argument is false, return "false".
        Value::Boolean(boolean) => Ok(JsString::from(if *boolean { "true" } else { "false" })),
        // 7. If argument is a Number, return Number::toString(argument, 10).
        Value::Number(number) => Ok(JsString::from(number_to_string(*number))),
        // 9. Assert: argument is an Object.
        // 10. Let primValue be ? ToPrimitive(argument, STRING).
        // 11. Assert: primValue is not an Object.
        // 12. Return ? ToString(primValue).
        Value::Object(_) => {
            let primitive = to_primitive(agent, argument, Some(PreferredType::String))?;
            to_string(agent, &primitive)
        }
    }
}

/// ### [6.1.6.1.20 Number::toString ( x, radix )](https://tc39.es/ecma262/#sec-numeric-types-number-tostring)
///
/// Radix 10 only; see `Number.prototype.toString` for other radixes.
pub(crate) fn number_to_string(x: f64) -> String {
    // 2. If x is either +0𝔽 or -0𝔽, return "0".
    if x == 0.0 {
        return "0".to_string();
    }
    let mut buffer = ryu_js::Buffer::new();
    buffer.format(x).to_string()
}

/// ### [7.1.19 ToPropertyKey ( argument )](https://tc39.es/ecma262/#sec-topropertykey)
pub(crate) fn to_property_key(agent: &mut Agent, argument: &Value) -> JsResult<PropertyKey> {
    // 1. Let key be ? ToPrimitive(argument, STRING).
    let key = to_primitive(agent, argument, Some(PreferredType::String))?;
    // 2. If key is a Symbol, then
    if let Value::Symbol(symbol) = key {
        // a. Return key.
        return Ok(PropertyKey::Symbol(symbol));
    }
    // 3. Return ! ToString(key).
    Ok(PropertyKey::String(to_string(agent, &key)?))
}

/// ### [7.1.20 ToLength ( argument )](https://tc39.es/ecma262/#sec-tolength)
pub(crate) fn to_length(agent: &mut Agent, argument: &Value) -> JsResult<usize> {
    // 1. Let len be ? ToIntegerOrInfinity(argument).
    let len = to_integer_or_infinity(agent, argument)?;
    // 2. If len ≤ 0, return +0𝔽.
    if len <= 0.0 {
        return Ok(0);
    }
    // 3. Return 𝔽(min(len, 2**53 - 1)).
    Ok(len.min(9007199254740991.0) as usize)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn string_to_number_literals() {
        assert_eq!(string_to_number(""), 0.0);
        assert_eq!(string_to_number("  42\n"), 42.0);
        assert_eq!(string_to_number("-1.5e3"), -1500.0);
        assert_eq!(string_to_number(".5"), 0.5);
        assert_eq!(string_to_number("5."), 5.0);
        assert_eq!(string_to_number("0x1F"), 31.0);
        assert_eq!(string_to_number("0b101"), 5.0);
        assert_eq!(string_to_number("0o17"), 15.0);
        assert_eq!(string_to_number("-Infinity"), f64::NEG_INFINITY);
        assert!(string_to_number("abc").is_nan());
        assert!(string_to_number("1e").is_nan());
        assert!(string_to_number("inf").is_nan());
        assert!(string_to_number("-0x10").is_nan());
        assert!(string_to_number("1 2").is_nan());
    }

    #[test]
    fn number_to_string_formatting() {
        assert_eq!(number_to_string(-0.0), "0");
        assert_eq!(number_to_string(5.0), "5");
        assert_eq!(number_to_string(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(number_to_string(1e21), "1e+21");
        assert_eq!(number_to_string(f64::NAN), "NaN");
        assert_eq!(number_to_string(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn uint32_wraps() {
        assert_eq!(number_to_uint32(-1.0), u32::MAX);
        assert_eq!(number_to_uint32(4294967296.0 + 3.7), 3);
        assert_eq!(number_to_uint32(f64::NAN), 0);
        assert_eq!(number_to_uint32(2147483648.0) as i32, i32::MIN);
    }

    #[test]
    fn to_boolean_of_primitives() {
        assert!(!to_boolean(&Value::Undefined));
        assert!(!to_boolean(&Value::from(f64::NAN)));
        assert!(!to_boolean(&Value::from(-0.0)));
        assert!(!to_boolean(&Value::from("")));
        assert!(to_boolean(&Value::from("0")));
        assert!(to_boolean(&Value::from(-1)));
    }
}
