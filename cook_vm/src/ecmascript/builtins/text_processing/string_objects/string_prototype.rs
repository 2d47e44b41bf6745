// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! String methods operate on UTF-16 code unit indexes, like the language
//! does, even though strings are stored as WTF-8.

use wtf8::Wtf8Buf;

use crate::ecmascript::{
    abstract_operations::type_conversion::{
        is_white_space_or_line_terminator, to_integer_or_infinity, to_length, to_string, to_uint32,
    },
    builtins::{
        ArgumentsList, Behaviour, Builtin, array::create_array_from_list,
        intrinsics::intrinsic_function,
    },
    execution::{Agent, ExceptionType, JsError, JsResult},
    types::{JsString, PropertyKey, Value, find_code_units},
};

/// Longest string the repeat and pad methods will build, in code units.
const MAX_STRING_LENGTH: usize = (1 << 29) - 24;

pub(crate) struct StringPrototype;

macro_rules! string_method {
    ($name:ident, $js_name:literal, $length:literal, $behaviour:ident) => {
        struct $name;
        impl Builtin for $name {
            const NAME: &'static str = $js_name;
            const LENGTH: u8 = $length;
            const BEHAVIOUR: Behaviour = Behaviour::Regular(StringPrototype::$behaviour);
        }
    };
}

string_method!(StringPrototypeCharAt, "charAt", 1, char_at);
string_method!(StringPrototypeEndsWith, "endsWith", 1, ends_with);
string_method!(StringPrototypeIncludes, "includes", 1, includes);
string_method!(StringPrototypeIndexOf, "indexOf", 1, index_of);
string_method!(StringPrototypePadEnd, "padEnd", 1, pad_end);
string_method!(StringPrototypePadStart, "padStart", 1, pad_start);
string_method!(StringPrototypeRepeat, "repeat", 1, repeat);
string_method!(StringPrototypeSlice, "slice", 2, slice);
string_method!(StringPrototypeSplit, "split", 2, split);
string_method!(StringPrototypeStartsWith, "startsWith", 1, starts_with);
string_method!(StringPrototypeSubstring, "substring", 2, substring);
string_method!(StringPrototypeToLowerCase, "toLowerCase", 0, to_lower_case);
string_method!(StringPrototypeToString, "toString", 0, to_string);
string_method!(StringPrototypeToUpperCase, "toUpperCase", 0, to_upper_case);
string_method!(StringPrototypeTrim, "trim", 0, trim);
string_method!(StringPrototypeTrimEnd, "trimEnd", 0, trim_end);
string_method!(StringPrototypeTrimStart, "trimStart", 0, trim_start);
string_method!(StringPrototypeValueOf, "valueOf", 0, value_of);

impl StringPrototype {
    const PREFIX: &'static str = "String.prototype";

    /// ### [22.1.3.2 String.prototype.charAt ( pos )](https://tc39.es/ecma262/#sec-string.prototype.charat)
    fn char_at(agent: &mut Agent, this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
        // 1. Let O be ? RequireObjectCoercible(this value).
        // 2. Let S be ? ToString(O).
        let s = this_string(agent, &this_value, "charAt")?;
        // 3. Let position be ? ToIntegerOrInfinity(pos).
        let position = to_integer_or_infinity(agent, &arguments.get(0))?;
        // 4. Let size be the length of S.
        // 5. If position < 0 or position ≥ size, return the empty String.
        if position < 0.0 {
            return Ok(Value::from(""));
        }
        // 6. Return the substring of S from position to position + 1.
        Ok(Value::String(s.utf16_char_at(position as usize).unwrap_or_default()))
    }

    /// ### [22.1.3.7 String.prototype.endsWith ( searchString \[ , endPosition \] )](https://tc39.es/ecma262/#sec-string.prototype.endswith)
    fn ends_with(agent: &mut Agent, this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
        let s = this_string(agent, &this_value, "endsWith")?;
        // 6. Let searchStr be ? ToString(searchString).
        let search_str = to_string(agent, &arguments.get(0))?;
        // 7. Let len be the length of S.
        let len = s.utf16_len();
        // 8. If endPosition is undefined, let pos be len; else let pos be ? ToIntegerOrInfinity(endPosition).
        // 9. Let end be the result of clamping pos between 0 and len.
        let end_position = arguments.get(1);
        let end = if end_position.is_undefined() {
            len
        } else {
            clamp(to_integer_or_infinity(agent, &end_position)?, len)
        };
        // 10. Let searchLength be the length of searchStr.
        let search_length = search_str.utf16_len();
        // 12. Let start be end - searchLength.
        // 13. If start < 0, return false.
        let Some(start) = end.checked_sub(search_length) else {
            return Ok(Value::Boolean(false));
        };
        // 14. Let substring be the substring of S from start to end.
        // 15. If substring is searchStr, return true.
        Ok(Value::Boolean(s.utf16_substring(start, end) == search_str))
    }

    /// ### [22.1.3.8 String.prototype.includes ( searchString \[ , position \] )](https://tc39.es/ecma262/#sec-string.prototype.includes)
    fn includes(agent: &mut Agent, this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
        let s = this_string(agent, &this_value, "includes")?;
        // 5. Let searchStr be ? ToString(searchString).
        let search_str = to_string(agent, &arguments.get(0))?;
        // 6. Let pos be ? ToIntegerOrInfinity(position).
        // 8. Let start be the result of clamping pos between 0 and len.
        let start = clamp(to_integer_or_infinity(agent, &arguments.get(1))?, s.utf16_len());
        // 9. Let index be StringIndexOf(S, searchStr, start).
        // 10. If index is not-found, return false.
        Ok(Value::Boolean(s.utf16_index_of(&search_str, start).is_some()))
    }

    /// ### [22.1.3.9 String.prototype.indexOf ( searchString \[ , position \] )](https://tc39.es/ecma262/#sec-string.prototype.indexof)
    fn index_of(agent: &mut Agent, this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
        let s = this_string(agent, &this_value, "indexOf")?;
        // 3. Let searchStr be ? ToString(searchString).
        let search_str = to_string(agent, &arguments.get(0))?;
        // 4. Let pos be ? ToIntegerOrInfinity(position).
        // 6. Let start be the result of clamping pos between 0 and len.
        let start = clamp(to_integer_or_infinity(agent, &arguments.get(1))?, s.utf16_len());
        // 7. Let result be StringIndexOf(S, searchStr, start).
        // 8. If result is not-found, return -1𝔽.
        Ok(match s.utf16_index_of(&search_str, start) {
            Some(index) => Value::from(index),
            None => Value::from(-1),
        })
    }

    /// ### [22.1.3.16 String.prototype.padEnd ( maxLength \[ , fillString \] )](https://tc39.es/ecma262/#sec-string.prototype.padend)
    fn pad_end(agent: &mut Agent, this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
        let s = this_string(agent, &this_value, "padEnd")?;
        // 2. Return ? StringPaddingBuiltinsImpl(O, maxLength, fillString, end).
        string_padding(agent, s, &arguments, Placement::End)
    }

    /// ### [22.1.3.17 String.prototype.padStart ( maxLength \[ , fillString \] )](https://tc39.es/ecma262/#sec-string.prototype.padstart)
    fn pad_start(agent: &mut Agent, this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
        let s = this_string(agent, &this_value, "padStart")?;
        // 2. Return ? StringPaddingBuiltinsImpl(O, maxLength, fillString, start).
        string_padding(agent, s, &arguments, Placement::Start)
    }

    /// ### [22.1.3.18 String.prototype.repeat ( count )](https://tc39.es/ecma262/#sec-string.prototype.repeat)
    fn repeat(agent: &mut Agent, this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
        let s = this_string(agent, &this_value, "repeat")?;
        // 3. Let n be ? ToIntegerOrInfinity(count).
        let n = to_integer_or_infinity(agent, &arguments.get(0))?;
        // 4. If n < 0 or n = +∞, throw a RangeError exception.
        if n < 0.0 || n == f64::INFINITY {
            let message = format!("Invalid count value: {}", Value::Number(n).string_repr(agent));
            return Err(agent.throw_exception(ExceptionType::RangeError, message));
        }
        // 5. If n = 0, return the empty String.
        if n == 0.0 || s.is_empty() {
            return Ok(Value::from(""));
        }
        if s.utf16_len() as f64 * n > MAX_STRING_LENGTH as f64 {
            return Err(invalid_string_length(agent));
        }
        // 6. Return the String value that is made from n copies of S appended together.
        Ok(Value::String(s.repeat(n as usize)))
    }

    /// ### [22.1.3.22 String.prototype.slice ( start, end )](https://tc39.es/ecma262/#sec-string.prototype.slice)
    fn slice(agent: &mut Agent, this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
        let s = this_string(agent, &this_value, "slice")?;
        // 3. Let len be the length of S.
        let len = s.utf16_len();
        // 4. Let intStart be ? ToIntegerOrInfinity(start).
        // 5-7. Clamp intStart relative to len.
        let from = relative_index(to_integer_or_infinity(agent, &arguments.get(0))?, len);
        // 8. If end is undefined, let intEnd be len; else let intEnd be ? ToIntegerOrInfinity(end).
        // 9-11. Clamp intEnd relative to len.
        let end = arguments.get(1);
        let to = if end.is_undefined() {
            len
        } else {
            relative_index(to_integer_or_infinity(agent, &end)?, len)
        };
        // 12. If from ≥ to, return the empty String.
        // 13. Return the substring of S from from to to.
        Ok(Value::String(s.utf16_substring(from, to)))
    }

    /// ### [22.1.3.23 String.prototype.split ( separator, limit )](https://tc39.es/ecma262/#sec-string.prototype.split)
    fn split(agent: &mut Agent, this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
        let s = this_string(agent, &this_value, "split")?;
        let separator = arguments.get(0);
        let limit = arguments.get(1);
        // 5. If limit is undefined, let lim be 2**32 - 1; else let lim be ℝ(? ToUint32(limit)).
        let lim = if limit.is_undefined() {
            u32::MAX as usize
        } else {
            to_uint32(agent, &limit)? as usize
        };
        // 6. Let R be ? ToString(separator).
        let r = if separator.is_undefined() {
            None
        } else {
            Some(to_string(agent, &separator)?)
        };
        // 7. If lim = 0, then
        //    a. Return CreateArrayFromList(« »).
        if lim == 0 {
            return Ok(Value::Object(create_array_from_list(agent, Vec::new())));
        }
        // 8. If separator is undefined, then
        //    a. Return CreateArrayFromList(« S »).
        let Some(r) = r else {
            return Ok(Value::Object(create_array_from_list(agent, vec![Value::String(s)])));
        };
        let s_units: Vec<u16> = s.code_units().collect();
        let r_units: Vec<u16> = r.code_units().collect();
        // 10. If separatorLength = 0, then
        if r_units.is_empty() {
            // a. Let strLen be the length of S.
            // b. Let outLen be the result of clamping lim between 0 and strLen.
            // c. Let head be the substring of S from 0 to outLen.
            // d. Let codeUnits be a List consisting of the sequence of code units that are the elements of head.
            // e. Return CreateArrayFromList(codeUnits).
            let code_units = s_units
                .iter()
                .take(lim)
                .map(|unit| Value::String(JsString::from_code_units(&[*unit])))
                .collect();
            return Ok(Value::Object(create_array_from_list(agent, code_units)));
        }
        // 11. If S is the empty String, return CreateArrayFromList(« S »).
        if s_units.is_empty() {
            return Ok(Value::Object(create_array_from_list(agent, vec![Value::String(s)])));
        }
        // 12. Let substrings be a new empty List.
        let mut substrings = Vec::new();
        // 13. Let i be 0.
        let mut i = 0;
        // 14. Let j be StringIndexOf(S, R, 0).
        // 15. Repeat, while j is not not-found,
        while let Some(j) = find_code_units(&s_units, &r_units, i) {
            // a. Let T be the substring of S from i to j.
            // b. Append T to substrings.
            substrings.push(Value::String(JsString::from_code_units(&s_units[i..j])));
            // c. If the number of elements in substrings is lim, return CreateArrayFromList(substrings).
            if substrings.len() == lim {
                return Ok(Value::Object(create_array_from_list(agent, substrings)));
            }
            // d. Set i to j + separatorLength.
            // e. Set j to StringIndexOf(S, R, i).
            i = j + r_units.len();
        }
        // 16. Let T be the substring of S from i.
        // 17. Append T to substrings.
        substrings.push(Value::String(JsString::from_code_units(&s_units[i..])));
        // 18. Return CreateArrayFromList(substrings).
        Ok(Value::Object(create_array_from_list(agent, substrings)))
    }

    /// ### [22.1.3.24 String.prototype.startsWith ( searchString \[ , position \] )](https://tc39.es/ecma262/#sec-string.prototype.startswith)
    fn starts_with(agent: &mut Agent, this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
        let s = this_string(agent, &this_value, "startsWith")?;
        // 6. Let searchStr be ? ToString(searchString).
        let search_str = to_string(agent, &arguments.get(0))?;
        // 7. Let len be the length of S.
        let len = s.utf16_len();
        // 8. If position is undefined, let pos be 0; else let pos be ? ToIntegerOrInfinity(position).
        // 9. Let start be the result of clamping pos between 0 and len.
        let start = clamp(to_integer_or_infinity(agent, &arguments.get(1))?, len);
        // 10. Let searchLength be the length of searchStr.
        // 12. Let end be start + searchLength.
        let end = start + search_str.utf16_len();
        // 13. If end > len, return false.
        if end > len {
            return Ok(Value::Boolean(false));
        }
        // 14. Let substring be the substring of S from start to end.
        // 15. If substring is searchStr, return true.
        Ok(Value::Boolean(s.utf16_substring(start, end) == search_str))
    }

    /// ### [22.1.3.25 String.prototype.substring ( start, end )](https://tc39.es/ecma262/#sec-string.prototype.substring)
    fn substring(agent: &mut Agent, this_value: Value, arguments: ArgumentsList) -> JsResult<Value> {
        let s = this_string(agent, &this_value, "substring")?;
        let len = s.utf16_len();
        // 4. Let intStart be ? ToIntegerOrInfinity(start).
        let int_start = to_integer_or_infinity(agent, &arguments.get(0))?;
        // 5. If end is undefined, let intEnd be len; else let intEnd be ? ToIntegerOrInfinity(end).
        let end = arguments.get(1);
        let int_end = if end.is_undefined() {
            len as f64
        } else {
            to_integer_or_infinity(agent, &end)?
        };
        // 6. Let finalStart be the result of clamping intStart between 0 and len.
        // 7. Let finalEnd be the result of clamping intEnd between 0 and len.
        let final_start = clamp(int_start, len);
        let final_end = clamp(int_end, len);
        // 8. Let from be min(finalStart, finalEnd).
        // 9. Let to be max(finalStart, finalEnd).
        // 10. Return the substring of S from from to to.
        Ok(Value::String(s.utf16_substring(
            final_start.min(final_end),
            final_start.max(final_end),
        )))
    }

    /// ### [22.1.3.28 String.prototype.toLowerCase ( )](https://tc39.es/ecma262/#sec-string.prototype.tolowercase)
    fn to_lower_case(agent: &mut Agent, this_value: Value, _: ArgumentsList) -> JsResult<Value> {
        let s = this_string(agent, &this_value, "toLowerCase")?;
        Ok(Value::String(convert_case(&s, str::to_lowercase)))
    }

    /// ### [22.1.3.29 String.prototype.toString ( )](https://tc39.es/ecma262/#sec-string.prototype.tostring)
    fn to_string(agent: &mut Agent, this_value: Value, _: ArgumentsList) -> JsResult<Value> {
        // 1. Return ? ThisStringValue(this value).
        this_string_value(agent, this_value, "toString")
    }

    /// ### [22.1.3.30 String.prototype.toUpperCase ( )](https://tc39.es/ecma262/#sec-string.prototype.touppercase)
    fn to_upper_case(agent: &mut Agent, this_value: Value, _: ArgumentsList) -> JsResult<Value> {
        let s = this_string(agent, &this_value, "toUpperCase")?;
        Ok(Value::String(convert_case(&s, str::to_uppercase)))
    }

    /// ### [22.1.3.32 String.prototype.trim ( )](https://tc39.es/ecma262/#sec-string.prototype.trim)
    fn trim(agent: &mut Agent, this_value: Value, _: ArgumentsList) -> JsResult<Value> {
        // 2. Return ? TrimString(S, start+end).
        let s = this_string(agent, &this_value, "trim")?;
        Ok(Value::String(trim_string(&s, TrimWhere::StartAndEnd)))
    }

    /// ### [22.1.3.33 String.prototype.trimEnd ( )](https://tc39.es/ecma262/#sec-string.prototype.trimend)
    fn trim_end(agent: &mut Agent, this_value: Value, _: ArgumentsList) -> JsResult<Value> {
        let s = this_string(agent, &this_value, "trimEnd")?;
        Ok(Value::String(trim_string(&s, TrimWhere::End)))
    }

    /// ### [22.1.3.34 String.prototype.trimStart ( )](https://tc39.es/ecma262/#sec-string.prototype.trimstart)
    fn trim_start(agent: &mut Agent, this_value: Value, _: ArgumentsList) -> JsResult<Value> {
        let s = this_string(agent, &this_value, "trimStart")?;
        Ok(Value::String(trim_string(&s, TrimWhere::Start)))
    }

    /// ### [22.1.3.35 String.prototype.valueOf ( )](https://tc39.es/ecma262/#sec-string.prototype.valueof)
    fn value_of(agent: &mut Agent, this_value: Value, _: ArgumentsList) -> JsResult<Value> {
        // 1. Return ? ThisStringValue(this value).
        this_string_value(agent, this_value, "valueOf")
    }

    /// Resolves `string[key]`: the `length`, the code unit at an index, or a
    /// String.prototype method.
    pub(crate) fn get_property(agent: &mut Agent, string: &JsString, key: &PropertyKey) -> Option<Value> {
        if let Some(index) = key.as_array_index() {
            return string.utf16_char_at(index as usize).map(Value::String);
        }
        let name = key.as_str()?;
        if name == "length" {
            return Some(Value::from(string.utf16_len()));
        }
        Self::get_intrinsic(agent, name)
    }

    fn get_intrinsic(agent: &mut Agent, name: &str) -> Option<Value> {
        Some(match name {
            "charAt" => intrinsic_function::<StringPrototypeCharAt>(agent, Self::PREFIX),
            "endsWith" => intrinsic_function::<StringPrototypeEndsWith>(agent, Self::PREFIX),
            "includes" => intrinsic_function::<StringPrototypeIncludes>(agent, Self::PREFIX),
            "indexOf" => intrinsic_function::<StringPrototypeIndexOf>(agent, Self::PREFIX),
            "padEnd" => intrinsic_function::<StringPrototypePadEnd>(agent, Self::PREFIX),
            "padStart" => intrinsic_function::<StringPrototypePadStart>(agent, Self::PREFIX),
            "repeat" => intrinsic_function::<StringPrototypeRepeat>(agent, Self::PREFIX),
            "slice" => intrinsic_function::<StringPrototypeSlice>(agent, Self::PREFIX),
            "split" => intrinsic_function::<StringPrototypeSplit>(agent, Self::PREFIX),
            "startsWith" => intrinsic_function::<StringPrototypeStartsWith>(agent, Self::PREFIX),
            "substring" => intrinsic_function::<StringPrototypeSubstring>(agent, Self::PREFIX),
            "toLowerCase" => intrinsic_function::<StringPrototypeToLowerCase>(agent, Self::PREFIX),
            "toString" => intrinsic_function::<StringPrototypeToString>(agent, Self::PREFIX),
            "toUpperCase" => intrinsic_function::<StringPrototypeToUpperCase>(agent, Self::PREFIX),
            "trim" => intrinsic_function::<StringPrototypeTrim>(agent, Self::PREFIX),
            "trimEnd" => intrinsic_function::<StringPrototypeTrimEnd>(agent, Self::PREFIX),
            "trimStart" => intrinsic_function::<StringPrototypeTrimStart>(agent, Self::PREFIX),
            "valueOf" => intrinsic_function::<StringPrototypeValueOf>(agent, Self::PREFIX),
            _ => return None,
        })
    }
}

/// `RequireObjectCoercible(this value)` followed by ToString.
fn this_string(agent: &mut Agent, this_value: &Value, method: &str) -> JsResult<JsString> {
    if this_value.is_nullish() {
        return Err(agent.throw_exception(
            ExceptionType::TypeError,
            format!("String.prototype.{method} called on null or undefined"),
        ));
    }
    to_string(agent, this_value)
}

/// ### [22.1.3.35.1 ThisStringValue ( value )](https://tc39.es/ecma262/#sec-thisstringvalue)
fn this_string_value(agent: &mut Agent, value: Value, method: &str) -> JsResult<Value> {
    // 1. If value is a String, return value.
    if value.is_string() {
        return Ok(value);
    }
    // 3. Throw a TypeError exception.
    Err(agent.throw_exception(
        ExceptionType::TypeError,
        format!("String.prototype.{method} requires that 'this' be a String"),
    ))
}

#[derive(Clone, Copy)]
enum Placement {
    Start,
    End,
}

/// ### [22.1.3.17.1 StringPaddingBuiltinsImpl ( O, maxLength, fillString, placement )](https://tc39.es/ecma262/#sec-stringpaddingbuiltinsimpl)
fn string_padding(
    agent: &mut Agent,
    s: JsString,
    arguments: &ArgumentsList,
    placement: Placement,
) -> JsResult<Value> {
    // 2. Let intMaxLength be ℝ(? ToLength(maxLength)).
    let int_max_length = to_length(agent, &arguments.get(0))?;
    // 3. Let stringLength be the length of S.
    let string_length = s.utf16_len();
    // 4. If intMaxLength ≤ stringLength, return S.
    if int_max_length <= string_length {
        return Ok(Value::String(s));
    }
    // 5. If fillString is undefined, set fillString to the String value consisting solely of the code unit 0x0020 (SPACE).
    // 6. Else, set fillString to ? ToString(fillString).
    let fill_string = arguments.get(1);
    let fill_string = if fill_string.is_undefined() {
        JsString::from(" ")
    } else {
        to_string(agent, &fill_string)?
    };
    // 7. Return StringPad(S, intMaxLength, fillString, placement).
    // StringPad 3. If fillString is the empty String, return S.
    if fill_string.is_empty() {
        return Ok(Value::String(s));
    }
    if int_max_length > MAX_STRING_LENGTH {
        return Err(invalid_string_length(agent));
    }
    // StringPad 4. Let fillLen be maxLength - stringLength.
    // StringPad 5. Let truncatedStringFiller be the String value consisting of
    //              repeated concatenations of fillString truncated to length fillLen.
    let fill_len = int_max_length - string_length;
    let fill_units: Vec<u16> = fill_string.code_units().collect();
    let filler: Vec<u16> = fill_units.iter().copied().cycle().take(fill_len).collect();
    let filler = JsString::from_code_units(&filler);
    // StringPad 6. If placement is start, return the string-concatenation of truncatedStringFiller and S.
    // StringPad 7. Else, return the string-concatenation of S and truncatedStringFiller.
    Ok(Value::String(match placement {
        Placement::Start => filler.concat(&s),
        Placement::End => s.concat(&filler),
    }))
}

fn invalid_string_length(agent: &mut Agent) -> JsError {
    agent.throw_exception_with_static_message(ExceptionType::RangeError, "Invalid string length")
}

/// Clamps an integer from ToIntegerOrInfinity between 0 and `len`.
fn clamp(position: f64, len: usize) -> usize {
    position.clamp(0.0, len as f64) as usize
}

/// Resolves a possibly negative index against `len`, clamped to `0..=len`.
fn relative_index(relative: f64, len: usize) -> usize {
    if relative < 0.0 {
        (len as f64 + relative).max(0.0) as usize
    } else {
        relative.min(len as f64) as usize
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum TrimWhere {
    Start,
    End,
    StartAndEnd,
}

/// ### [22.1.3.32.1 TrimString ( string, where )](https://tc39.es/ecma262/#sec-trimstring)
fn trim_string(s: &JsString, trim_where: TrimWhere) -> JsString {
    let is_white_space = |unit: &u16| {
        char::from_u32(u32::from(*unit)).is_some_and(is_white_space_or_line_terminator)
    };
    let units: Vec<u16> = s.code_units().collect();
    // 3. If where is start, let T be the String value that is a copy of S
    //    with leading white space removed.
    let start = if trim_where == TrimWhere::End {
        0
    } else {
        units.iter().position(|unit| !is_white_space(unit)).unwrap_or(units.len())
    };
    // 4. Else if where is end, let T be the String value that is a copy of S
    //    with trailing white space removed.
    // 5. Else, both leading and trailing white space are removed.
    let end = if trim_where == TrimWhere::Start {
        units.len()
    } else {
        units.iter().rposition(|unit| !is_white_space(unit)).map_or(start, |index| index + 1)
    };
    s.utf16_substring(start, end)
}

/// Case conversion on the well-formed parts of a string. Lone surrogates
/// are copied unchanged.
fn convert_case(s: &JsString, convert: fn(&str) -> String) -> JsString {
    if s.is_well_formed() {
        return JsString::from(convert(s.as_str()));
    }
    let mut buf = Wtf8Buf::with_capacity(s.as_wtf8().len());
    for code_point in s.as_wtf8().code_points() {
        match code_point.to_char() {
            Some(char) => buf.push_str(&convert(char.encode_utf8(&mut [0; 4]))),
            None => buf.push(code_point),
        }
    }
    JsString::from(buf)
}

#[cfg(test)]
mod test {
    use super::*;

    fn call(agent: &mut Agent, name: &str, this: &str, arguments: &[Value]) -> JsResult<Value> {
        let method = StringPrototype::get_intrinsic(agent, name).unwrap();
        crate::ecmascript::abstract_operations::operations_on_objects::call(
            agent,
            &method,
            Value::from(this),
            arguments,
        )
    }

    fn elements(agent: &Agent, value: Value) -> Vec<Value> {
        value.as_object().unwrap().array_elements(agent).unwrap()
    }

    #[test]
    fn searching() {
        let mut agent = Agent::new(crate::ecmascript::execution::AgentOptions::default());
        let agent = &mut agent;
        assert_eq!(call(agent, "indexOf", "banana", &["an".into()]).unwrap(), Value::from(1));
        assert_eq!(
            call(agent, "indexOf", "banana", &["an".into(), 2.into()]).unwrap(),
            Value::from(3)
        );
        assert_eq!(call(agent, "indexOf", "banana", &["x".into()]).unwrap(), Value::from(-1));
        assert_eq!(call(agent, "includes", "banana", &["nan".into()]).unwrap(), Value::Boolean(true));
        assert_eq!(call(agent, "startsWith", "banana", &["ban".into()]).unwrap(), Value::Boolean(true));
        assert_eq!(call(agent, "endsWith", "banana", &["ana".into()]).unwrap(), Value::Boolean(true));
        assert_eq!(
            call(agent, "endsWith", "banana", &["ban".into(), 3.into()]).unwrap(),
            Value::Boolean(true)
        );
        assert_eq!(call(agent, "endsWith", "a", &["banana".into()]).unwrap(), Value::Boolean(false));
    }

    #[test]
    fn slicing_uses_code_units() {
        let mut agent = Agent::new(crate::ecmascript::execution::AgentOptions::default());
        let agent = &mut agent;
        assert_eq!(call(agent, "slice", "hello", &[(-3).into()]).unwrap(), Value::from("llo"));
        assert_eq!(call(agent, "slice", "hello", &[1.into(), (-1).into()]).unwrap(), Value::from("ell"));
        assert_eq!(call(agent, "substring", "hello", &[4.into(), 1.into()]).unwrap(), Value::from("ell"));
        let high = call(agent, "charAt", "a😀", &[1.into()]).unwrap();
        assert_eq!(high, Value::String(JsString::from_code_units(&[0xD83D])));
        assert_ne!(high, Value::from("\u{FFFD}"));
        assert_eq!(call(agent, "charAt", "abc", &[(-1).into()]).unwrap(), Value::from(""));
    }

    #[test]
    fn splitting() {
        let mut agent = Agent::new(crate::ecmascript::execution::AgentOptions::default());
        let result = call(&mut agent, "split", "a,b,,c", &[",".into()]).unwrap();
        assert_eq!(
            elements(&agent, result),
            vec![Value::from("a"), Value::from("b"), Value::from(""), Value::from("c")]
        );
        let result = call(&mut agent, "split", "abc", &["".into(), 2.into()]).unwrap();
        assert_eq!(elements(&agent, result), vec![Value::from("a"), Value::from("b")]);
        let result = call(&mut agent, "split", "abc", &[]).unwrap();
        assert_eq!(elements(&agent, result), vec![Value::from("abc")]);
        let result = call(&mut agent, "split", "", &[",".into()]).unwrap();
        assert_eq!(elements(&agent, result), vec![Value::from("")]);
    }

    #[test]
    fn building_strings() {
        let mut agent = Agent::new(crate::ecmascript::execution::AgentOptions::default());
        let agent = &mut agent;
        assert_eq!(call(agent, "repeat", "ab", &[3.into()]).unwrap(), Value::from("ababab"));
        assert!(call(agent, "repeat", "ab", &[(-1).into()]).is_err());
        assert_eq!(call(agent, "padStart", "5", &[3.into(), "0".into()]).unwrap(), Value::from("005"));
        assert_eq!(call(agent, "padEnd", "ab", &[5.into(), "xy".into()]).unwrap(), Value::from("abxyx"));
        assert_eq!(call(agent, "trim", " \n x \t", &[]).unwrap(), Value::from("x"));
        assert_eq!(call(agent, "trimStart", "  x ", &[]).unwrap(), Value::from("x "));
        assert_eq!(call(agent, "trimEnd", "  x ", &[]).unwrap(), Value::from("  x"));
        assert_eq!(call(agent, "trim", " \t ", &[]).unwrap(), Value::from(""));
        assert_eq!(call(agent, "toUpperCase", "straße", &[]).unwrap(), Value::from("STRASSE"));
    }

    #[test]
    fn methods_reject_nullish_receivers() {
        let mut agent = Agent::new(crate::ecmascript::execution::AgentOptions::default());
        let method = StringPrototype::get_intrinsic(&mut agent, "trim").unwrap();
        let result = crate::ecmascript::abstract_operations::operations_on_objects::call(
            &mut agent,
            &method,
            Value::Null,
            &[],
        );
        let error = result.unwrap_err();
        assert_eq!(
            error.to_display_string(&mut agent),
            "TypeError: String.prototype.trim called on null or undefined"
        );
    }
}
