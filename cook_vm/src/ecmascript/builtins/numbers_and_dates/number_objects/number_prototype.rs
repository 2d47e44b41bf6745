// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::ecmascript::{
    abstract_operations::type_conversion::{number_to_string, to_integer_or_infinity},
    builtins::{ArgumentsList, Behaviour, Builtin, intrinsics::intrinsic_function},
    execution::{Agent, ExceptionType, JsResult},
    types::Value,
};

pub(crate) struct NumberPrototype;

struct NumberPrototypeToFixed;
impl Builtin for NumberPrototypeToFixed {
    const NAME: &'static str = "toFixed";
    const LENGTH: u8 = 1;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(NumberPrototype::to_fixed);
}

struct NumberPrototypeToString;
impl Builtin for NumberPrototypeToString {
    const NAME: &'static str = "toString";
    const LENGTH: u8 = 1;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(NumberPrototype::to_string);
}

struct NumberPrototypeValueOf;
impl Builtin for NumberPrototypeValueOf {
    const NAME: &'static str = "valueOf";
    const LENGTH: u8 = 0;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(NumberPrototype::value_of);
}

impl NumberPrototype {
    const PREFIX: &'static str = "Number.prototype";

    /// ### [21.1.3.3 Number.prototype.toFixed ( fractionDigits )](https://tc39.es/ecma262/#sec-number.prototype.tofixed)
    fn to_fixed(agent: &mut Agent, this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
        // 1. Let x be ? ThisNumberValue(this value).
        let x = this_number_value(agent, &this_value, "toFixed")?;
        // 2. Let f be ? ToIntegerOrInfinity(fractionDigits).
        let f = to_integer_or_infinity(agent, &arguments.get(0))?;
        // 4. If f is not finite, throw a RangeError exception.
        // 5. If f < 0 or f > 100, throw a RangeError exception.
        if !(0.0..=100.0).contains(&f) {
            return Err(agent.throw_exception_with_static_message(
                ExceptionType::RangeError,
                "toFixed() digits argument must be between 0 and 100",
            ));
        }
        // 6. If x is not finite, return Number::toString(x, 10).
        // 9. If x ≥ 10**21, then
        //    a. Let m be ! ToString(𝔽(x)).
        if !x.is_finite() || x.abs() >= 1e21 {
            return Ok(Value::from(number_to_string(x)));
        }
        // 7. Set x to ℝ(x).
        // 8. Let s be the empty String.
        // 9. If x < 0, then
        //    a. Set s to "-".
        //    b. Set x to -x.
        let (sign, x) = if x < 0.0 { ("-", -x) } else { ("", x) };
        Ok(Value::from(format!("{sign}{}", fixed_digits(x, f as usize))))
    }

    /// ### [21.1.3.6 Number.prototype.toString ( \[ radix \] )](https://tc39.es/ecma262/#sec-number.prototype.tostring)
    fn to_string(agent: &mut Agent, this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
        // 1. Let x be ? ThisNumberValue(this value).
        let x = this_number_value(agent, &this_value, "toString")?;
        let radix = arguments.get(0);
        // 2. If radix is undefined, let radixMV be 10.
        // 3. Else, let radixMV be ? ToIntegerOrInfinity(radix).
        let radix = if radix.is_undefined() {
            10.0
        } else {
            to_integer_or_infinity(agent, &radix)?
        };
        // 4. If radixMV is not in the inclusive interval from 2 to 36, throw a RangeError exception.
        if !(2.0..=36.0).contains(&radix) {
            return Err(agent.throw_exception_with_static_message(
                ExceptionType::RangeError,
                "toString() radix must be between 2 and 36",
            ));
        }
        // 5. Return Number::toString(x, radixMV).
        if radix == 10.0 || !x.is_finite() {
            return Ok(Value::from(number_to_string(x)));
        }
        Ok(Value::from(number_to_radix_string(x, radix as u32)))
    }

    /// ### [21.1.3.7 Number.prototype.valueOf ( )](https://tc39.es/ecma262/#sec-number.prototype.valueof)
    fn value_of(agent: &mut Agent, this_value: Value, _: ArgumentsList) -> JsResult<Value> {
        // 1. Return ? ThisNumberValue(this value).
        this_number_value(agent, &this_value, "valueOf").map(Value::Number)
    }

    pub(crate) fn get_intrinsic(agent: &mut Agent, name: &str) -> Option<Value> {
        Some(match name {
            "toFixed" => intrinsic_function::<NumberPrototypeToFixed>(agent, Self::PREFIX),
            "toString" => intrinsic_function::<NumberPrototypeToString>(agent, Self::PREFIX),
            "valueOf" => intrinsic_function::<NumberPrototypeValueOf>(agent, Self::PREFIX),
            _ => return None,
        })
    }
}

/// ### [21.1.3.7.1 ThisNumberValue ( value )](https://tc39.es/ecma262/#sec-thisnumbervalue)
fn this_number_value(agent: &mut Agent, value: &Value, method: &str) -> JsResult<f64> {
    // 1. If value is a Number, return value.
    if let Value::Number(value) = value {
        return Ok(*value);
    }
    // 3. Throw a TypeError exception.
    Err(agent.throw_exception(
        ExceptionType::TypeError,
        format!("Number.prototype.{method} requires that 'this' be a Number"),
    ))
}

/// Renders a non-negative finite `x` below 10**21 with `f` fraction digits.
/// Ties round away from zero, measured against the exact binary value.
fn fixed_digits(x: f64, f: usize) -> String {
    // Every finite double has at most 1074 significant fraction digits, so
    // this expansion is exact.
    let exact = format!("{x:.1074}");
    let (integer, fraction) = exact.split_once('.').unwrap_or((&exact, ""));
    // 10. a. Let n be an integer for which n / 10**f - x is as close to zero
    //        as possible. If there are two such n, pick the larger n.
    let mut n: Vec<u8> = integer
        .bytes()
        .chain(fraction.bytes().chain(std::iter::repeat(b'0')).take(f))
        .collect();
    if fraction.as_bytes().get(f).is_some_and(|digit| *digit >= b'5') {
        let mut carried = true;
        for digit in n.iter_mut().rev() {
            if *digit == b'9' {
                *digit = b'0';
            } else {
                *digit += 1;
                carried = false;
                break;
            }
        }
        if carried {
            n.insert(0, b'1');
        }
    }
    // b. If n = 0, let m be "0". Otherwise, let m be the String value
    //    consisting of the digits of the decimal representation of n.
    // c. If f ≠ 0, then
    //    iii. Set m to the string-concatenation of a, ".", and b.
    let split = n.len() - f;
    let mut m = String::from_utf8_lossy(&n[..split]).into_owned();
    if f != 0 {
        m.push('.');
        m.push_str(&String::from_utf8_lossy(&n[split..]));
    }
    m
}

/// Number::toString for radixes other than 10. Emits the shortest digit
/// sequence that still reads back as `x`.
fn number_to_radix_string(x: f64, radix: u32) -> String {
    let radix_f = f64::from(radix);
    let negative = x < 0.0;
    let value = x.abs();
    let mut integer = value.floor();
    let mut fraction = value - integer;
    // Half the distance to the next double, but at least the smallest
    // subnormal.
    let mut delta = (0.5 * (f64::from_bits(value.to_bits() + 1) - value)).max(f64::from_bits(1));
    let mut fraction_digits: Vec<u32> = Vec::new();
    if fraction >= delta {
        loop {
            fraction *= radix_f;
            delta *= radix_f;
            let digit = fraction as u32;
            fraction_digits.push(digit);
            fraction -= f64::from(digit);
            if (fraction > 0.5 || (fraction == 0.5 && digit & 1 == 1)) && fraction + delta > 1.0 {
                // Round up, carrying into the integer part if needed.
                loop {
                    match fraction_digits.pop() {
                        None => {
                            integer += 1.0;
                            break;
                        }
                        Some(digit) if digit + 1 < radix => {
                            fraction_digits.push(digit + 1);
                            break;
                        }
                        Some(_) => {}
                    }
                }
                break;
            }
            if fraction < delta {
                break;
            }
        }
    }
    // Digits below the precision of a double are zeros.
    let mut integer_digits: Vec<u32> = Vec::new();
    while integer / radix_f >= 9007199254740992.0 {
        integer /= radix_f;
        integer_digits.push(0);
    }
    loop {
        let remainder = integer % radix_f;
        integer_digits.push(remainder as u32);
        integer = (integer - remainder) / radix_f;
        if integer <= 0.0 {
            break;
        }
    }
    let to_char = |digit: &u32| char::from_digit(*digit, radix).unwrap_or('0');
    let mut result = String::new();
    if negative {
        result.push('-');
    }
    result.extend(integer_digits.iter().rev().map(to_char));
    if !fraction_digits.is_empty() {
        result.push('.');
        result.extend(fraction_digits.iter().map(to_char));
    }
    result
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ecmascript::execution::AgentOptions;

    fn to_fixed(agent: &mut Agent, x: f64, digits: Value) -> JsResult<Value> {
        NumberPrototype::to_fixed(agent, Value::Number(x), ArgumentsList(&[digits]))
    }

    #[test]
    fn to_fixed_rounds_ties_up() {
        let mut agent = Agent::new(AgentOptions::default());
        assert_eq!(to_fixed(&mut agent, 0.5, Value::Undefined).unwrap(), Value::from("1"));
        assert_eq!(to_fixed(&mut agent, 2.5, Value::Undefined).unwrap(), Value::from("3"));
        assert_eq!(to_fixed(&mut agent, 1.005, Value::from(2)).unwrap(), Value::from("1.00"));
        assert_eq!(to_fixed(&mut agent, 1.45, Value::from(1)).unwrap(), Value::from("1.4"));
        assert_eq!(to_fixed(&mut agent, 9.995, Value::from(1)).unwrap(), Value::from("10.0"));
        assert_eq!(to_fixed(&mut agent, -1.5, Value::from(2)).unwrap(), Value::from("-1.50"));
        assert_eq!(to_fixed(&mut agent, 123.456, Value::from(0)).unwrap(), Value::from("123"));
        assert_eq!(to_fixed(&mut agent, 1e21, Value::from(2)).unwrap(), Value::from("1e+21"));
        assert!(to_fixed(&mut agent, 1.0, Value::from(101)).is_err());
    }

    #[test]
    fn to_string_with_radix() {
        let mut agent = Agent::new(AgentOptions::default());
        let mut in_radix = |x: f64, radix: i32| {
            NumberPrototype::to_string(&mut agent, Value::Number(x), ArgumentsList(&[Value::from(radix)]))
        };
        assert_eq!(in_radix(255.0, 16).unwrap(), Value::from("ff"));
        assert_eq!(in_radix(-255.0, 2).unwrap(), Value::from("-11111111"));
        assert_eq!(in_radix(0.5, 2).unwrap(), Value::from("0.1"));
        assert_eq!(in_radix(0.0, 36).unwrap(), Value::from("0"));
        assert_eq!(in_radix(35.0, 36).unwrap(), Value::from("z"));
        assert_eq!(in_radix(1.5, 10).unwrap(), Value::from("1.5"));
        assert!(in_radix(1.0, 1).is_err());
        assert!(in_radix(1.0, 37).is_err());
    }

    #[test]
    fn methods_require_numbers() {
        let mut agent = Agent::new(AgentOptions::default());
        let result = NumberPrototype::value_of(&mut agent, Value::from("1"), ArgumentsList(&[]));
        assert!(result.is_err());
    }
}
