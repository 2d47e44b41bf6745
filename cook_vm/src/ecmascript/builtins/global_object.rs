// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ## [19 The Global Object](https://tc39.es/ecma262/#sec-global-object)
//!
//! Cooked code sees no global object. The embedder decides which of these
//! globals it supplies; [`standard_globals`] lists the safe defaults.

use super::{
    ArgumentsList, Behaviour, Builtin, create_builtin_function,
    fundamental_objects::{
        boolean_objects::boolean_constructor::BooleanConstructor,
        error_objects::{
            error_constructor::ErrorConstructor, native_error_constructors::NativeErrorConstructors,
        },
        object_objects::object_constructor::ObjectConstructor,
    },
    indexed_collections::array_objects::array_constructor::ArrayConstructor,
    numbers_and_dates::{math_object::MathObject, number_objects::number_constructor::NumberConstructor},
    text_processing::string_objects::string_constructor::StringConstructor,
};
use crate::ecmascript::{
    abstract_operations::type_conversion::{
        is_white_space_or_line_terminator, to_int32, to_number, to_string,
    },
    execution::{Agent, JsResult},
    types::Value,
};

pub(crate) struct GlobalObject;

struct GlobalObjectIsFinite;
impl Builtin for GlobalObjectIsFinite {
    const NAME: &'static str = "isFinite";
    const LENGTH: u8 = 1;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(GlobalObject::is_finite);
}
struct GlobalObjectIsNaN;
impl Builtin for GlobalObjectIsNaN {
    const NAME: &'static str = "isNaN";
    const LENGTH: u8 = 1;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(GlobalObject::is_nan);
}
pub(crate) struct GlobalObjectParseFloat;
impl Builtin for GlobalObjectParseFloat {
    const NAME: &'static str = "parseFloat";
    const LENGTH: u8 = 1;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(GlobalObject::parse_float);
}
pub(crate) struct GlobalObjectParseInt;
impl Builtin for GlobalObjectParseInt {
    const NAME: &'static str = "parseInt";
    const LENGTH: u8 = 2;
    const BEHAVIOUR: Behaviour = Behaviour::Regular(GlobalObject::parse_int);
}

impl GlobalObject {
    /// ### [19.2.2 isFinite ( number )](https://tc39.es/ecma262/#sec-isfinite-number)
    fn is_finite(agent: &mut Agent, _: Value, arguments: ArgumentsList) -> JsResult<Value> {
        // 1. Let num be ? ToNumber(number).
        let num = to_number(agent, &arguments.get(0))?;
        // 2. If num is not finite, return false.
        // 3. Otherwise, return true.
        Ok(Value::Boolean(num.is_finite()))
    }

    /// ### [19.2.3 isNaN ( number )](https://tc39.es/ecma262/#sec-isnan-number)
    fn is_nan(agent: &mut Agent, _: Value, arguments: ArgumentsList) -> JsResult<Value> {
        // 1. Let num be ? ToNumber(number).
        let num = to_number(agent, &arguments.get(0))?;
        // 2. If num is NaN, return true.
        // 3. Otherwise, return false.
        Ok(Value::Boolean(num.is_nan()))
    }

    /// ### [19.2.4 parseFloat ( string )](https://tc39.es/ecma262/#sec-parsefloat-string)
    fn parse_float(agent: &mut Agent, _: Value, arguments: ArgumentsList) -> JsResult<Value> {
        // 1. Let inputString be ? ToString(string).
        let input_string = to_string(agent, &arguments.get(0))?;
        Ok(Value::Number(parse_float(&input_string)))
    }

    /// ### [19.2.5 parseInt ( string, radix )](https://tc39.es/ecma262/#sec-parseint-string-radix)
    fn parse_int(agent: &mut Agent, _: Value, arguments: ArgumentsList) -> JsResult<Value> {
        // 1. Let inputString be ? ToString(string).
        let input_string = to_string(agent, &arguments.get(0))?;
        // 6. Let R be ℝ(? ToInt32(radix)).
        let radix = to_int32(agent, &arguments.get(1))?;
        Ok(Value::Number(parse_int(&input_string, radix)))
    }
}

fn parse_float(input_string: &str) -> f64 {
    // 2. Let trimmedString be ! TrimString(inputString, START).
    let trimmed_string = input_string.trim_start_matches(is_white_space_or_line_terminator);
    // 3. Let trimmed be StringToCodePoints(trimmedString).
    // 4. Let trimmedPrefix be the longest prefix of trimmed that satisfies
    //    the syntax of a StrDecimalLiteral, which might be trimmed itself.
    let bytes = trimmed_string.as_bytes();
    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    if trimmed_string[end..].starts_with("Infinity") {
        return if bytes[0] == b'-' {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }
    let digits = |from: usize| bytes[from..].iter().take_while(|b| b.is_ascii_digit()).count();
    let integer_digits = digits(end);
    end += integer_digits;
    let mut fraction_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        fraction_digits = digits(end + 1);
        if integer_digits > 0 || fraction_digits > 0 {
            end += 1 + fraction_digits;
        }
    }
    // 5. If trimmedPrefix does not contain any code points, return NaN.
    if integer_digits == 0 && fraction_digits == 0 {
        return f64::NAN;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
        let exponent_digits = digits(end + 1 + sign);
        if exponent_digits > 0 {
            end += 1 + sign + exponent_digits;
        }
    }
    // 6. Let parsedNumber be ParseText(trimmedPrefix, StrDecimalLiteral).
    // 8. Return StringNumericValue of parsedNumber.
    fast_float::parse::<f64, _>(&trimmed_string[..end]).unwrap_or(f64::NAN)
}

fn parse_int(input_string: &str, radix: i32) -> f64 {
    // 2. Let S be ! TrimString(inputString, START).
    let mut s = input_string.trim_start_matches(is_white_space_or_line_terminator);
    // 3. Let sign be 1.
    // 4. If S is not empty and the first code unit of S is the code unit
    //    0x002D (HYPHEN-MINUS), set sign to -1.
    let sign = if s.starts_with('-') { -1.0 } else { 1.0 };
    // 5. If S is not empty and the first code unit of S is either the code
    //    unit 0x002B (PLUS SIGN) or the code unit 0x002D (HYPHEN-MINUS), set
    //    S to the substring of S from index 1.
    if s.starts_with(['+', '-']) {
        s = &s[1..];
    }
    // 7. Let stripPrefix be true.
    let mut strip_prefix = true;
    let mut r = radix;
    // 8. If R ≠ 0, then
    if r != 0 {
        // a. If R < 2 or R > 36, return NaN.
        if !(2..=36).contains(&r) {
            return f64::NAN;
        }
        // b. If R ≠ 16, set stripPrefix to false.
        if r != 16 {
            strip_prefix = false;
        }
    } else {
        // 9. Else,
        //    a. Set R to 10.
        r = 10;
    }
    // 10. If stripPrefix is true, then
    //     a. If the length of S is at least 2 and the first two code units
    //        of S are either "0x" or "0X", then
    if strip_prefix && (s.starts_with("0x") || s.starts_with("0X")) {
        // i. Set S to the substring of S from index 2.
        s = &s[2..];
        // ii. Set R to 16.
        r = 16;
    }
    let r = r as u32;
    // 11. If S contains a code unit that is not a radix-R digit, let end be
    //     the index within S of the first such code unit; otherwise let end
    //     be the length of S.
    let end = s
        .char_indices()
        .find(|(_, c)| !c.is_digit(r))
        .map_or(s.len(), |(index, _)| index);
    // 12. Let Z be the substring of S from 0 to end.
    let z = &s[..end];
    // 13. If Z is empty, return NaN.
    if z.is_empty() {
        return f64::NAN;
    }
    // 14. Let mathInt be the integer value that is represented by Z in
    //     radix-R notation.
    let math_int = if r == 10 {
        fast_float::parse::<f64, _>(z).unwrap_or(f64::NAN)
    } else {
        z.chars().fold(0.0, |acc, c| {
            acc * f64::from(r) + f64::from(c.to_digit(r).unwrap_or_default())
        })
    };
    // 15. If mathInt = 0, then
    //     a. If sign = -1, return -0𝔽.
    //     b. Return +0𝔽.
    // 16. Return 𝔽(sign × mathInt).
    sign * math_int
}

/// The globals an embedder can safely hand to cooked code, in a stable
/// order.
pub fn standard_globals(agent: &mut Agent) -> Vec<(&'static str, Value)> {
    let parse_int = create_builtin_function::<GlobalObjectParseInt>(agent);
    let parse_float = create_builtin_function::<GlobalObjectParseFloat>(agent);
    let mut globals = vec![
        ("Object", Value::Object(ObjectConstructor::create_intrinsic(agent))),
        ("Array", Value::Object(ArrayConstructor::create_intrinsic(agent))),
        ("Math", Value::Object(MathObject::create_intrinsic(agent))),
        (
            "Number",
            Value::Object(NumberConstructor::create_intrinsic(agent, parse_int, parse_float)),
        ),
        ("String", Value::Object(StringConstructor::create_intrinsic(agent))),
        ("Boolean", Value::Object(BooleanConstructor::create_intrinsic(agent))),
        ("Error", Value::Object(ErrorConstructor::create_intrinsic(agent))),
    ];
    for (name, constructor) in NativeErrorConstructors::create_intrinsics(agent) {
        globals.push((name, Value::Object(constructor)));
    }
    globals.extend([
        ("parseInt", Value::Object(parse_int)),
        ("parseFloat", Value::Object(parse_float)),
        (
            "isNaN",
            Value::Object(create_builtin_function::<GlobalObjectIsNaN>(agent)),
        ),
        (
            "isFinite",
            Value::Object(create_builtin_function::<GlobalObjectIsFinite>(agent)),
        ),
        // 19.1.2 NaN
        ("NaN", Value::nan()),
        // 19.1.1 Infinity
        ("Infinity", Value::Number(f64::INFINITY)),
        // 19.1.4 undefined
        ("undefined", Value::Undefined),
    ]);
    globals
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ecmascript::execution::AgentOptions;

    #[test]
    fn parse_int_prefixes_and_radixes() {
        assert_eq!(parse_int("  42px", 0), 42.0);
        assert_eq!(parse_int("-0x1F", 0), -31.0);
        assert_eq!(parse_int("0x1F", 10), 0.0);
        assert_eq!(parse_int("ff", 16), 255.0);
        assert_eq!(parse_int("101", 2), 5.0);
        assert!(parse_int("z", 10).is_nan());
        assert!(parse_int("1", 37).is_nan());
        assert!(parse_int("-0", 10).is_sign_negative());
    }

    #[test]
    fn parse_float_takes_the_longest_decimal_prefix() {
        assert_eq!(parse_float("3.14abc"), 3.14);
        assert_eq!(parse_float("  -.5"), -0.5);
        assert_eq!(parse_float("1e3x"), 1000.0);
        assert_eq!(parse_float("1e"), 1.0);
        assert_eq!(parse_float("5."), 5.0);
        assert_eq!(parse_float("-Infinityx"), f64::NEG_INFINITY);
        assert!(parse_float(".").is_nan());
        assert!(parse_float("inf").is_nan());
    }

    #[test]
    fn standard_globals_are_ordered_and_unique() {
        let mut agent = Agent::new(AgentOptions::default());
        let globals = standard_globals(&mut agent);
        let names: Vec<_> = globals.iter().map(|(name, _)| *name).collect();
        assert_eq!(names[..3], ["Object", "Array", "Math"]);
        assert!(names.contains(&"TypeError"));
        assert_eq!(names.last(), Some(&"undefined"));
        let mut deduplicated = names.clone();
        deduplicated.sort_unstable();
        deduplicated.dedup();
        assert_eq!(deduplicated.len(), names.len());
    }
}
