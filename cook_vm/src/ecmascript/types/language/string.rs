// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::{
    borrow::Borrow,
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
    ops::Deref,
    rc::Rc,
};

use wtf8::{CodePoint, Wtf8, Wtf8Buf};

/// ### [6.1.4 The String Type](https://tc39.es/ecma262/#sec-ecmascript-language-types-string-type)
///
/// Strings are stored as WTF-8 so that lone surrogates survive indexing,
/// slicing and concatenation. Lengths and indexes are measured in UTF-16 code
/// units to match the language.
///
/// A string dereferences to `str` for display and for lookups by name. A
/// string holding lone surrogates shows them as U+FFFD there; use the
/// `utf16_*` helpers or [`JsString::as_wtf8`] to see the exact contents.
#[derive(Clone)]
pub struct JsString(Rc<StringRecord>);

struct StringRecord {
    data: Wtf8Buf,
    /// Lossy rendering, present only when `data` is not valid UTF-8.
    lossy: Option<Box<str>>,
    utf16_len: usize,
}

impl StringRecord {
    fn from_wtf8_buf(data: Wtf8Buf) -> Self {
        let (lossy, utf16_len) = match data.as_str() {
            Some(str) => (None, utf16_len_of(str)),
            None => (
                Some(data.to_string_lossy().into_owned().into_boxed_str()),
                data.to_ill_formed_utf16().count(),
            ),
        };
        Self {
            data,
            lossy,
            utf16_len,
        }
    }

    fn from_string(str: String) -> Self {
        let utf16_len = utf16_len_of(&str);
        Self {
            data: Wtf8Buf::from_string(str),
            lossy: None,
            utf16_len,
        }
    }
}

fn utf16_len_of(str: &str) -> usize {
    if str.is_ascii() {
        str.len()
    } else {
        str.encode_utf16().count()
    }
}

impl JsString {
    /// The contents as `str`. Lone surrogates read as U+FFFD.
    pub fn as_str(&self) -> &str {
        match &self.0.lossy {
            Some(lossy) => lossy,
            None => self.0.data.as_str().unwrap_or_default(),
        }
    }

    pub fn as_wtf8(&self) -> &Wtf8 {
        &self.0.data
    }

    /// False if the string contains lone surrogates.
    pub fn is_well_formed(&self) -> bool {
        self.0.lossy.is_none()
    }

    fn is_ascii(&self) -> bool {
        self.0.data.len() == self.0.utf16_len
    }

    /// Length in UTF-16 code units.
    pub fn utf16_len(&self) -> usize {
        self.0.utf16_len
    }

    pub fn code_units(&self) -> impl Iterator<Item = u16> + '_ {
        self.0.data.to_ill_formed_utf16()
    }

    pub fn code_unit_at(&self, index: usize) -> Option<u16> {
        if index >= self.utf16_len() {
            return None;
        }
        if self.is_ascii() {
            return Some(u16::from(self.as_str().as_bytes()[index]));
        }
        self.code_units().nth(index)
    }

    /// Builds a string from UTF-16 code units. Surrogate pairs are joined
    /// and lone surrogates are kept as they are.
    pub fn from_code_units(units: &[u16]) -> JsString {
        let mut buf = Wtf8Buf::with_capacity(units.len());
        for decoded in char::decode_utf16(units.iter().copied()) {
            match decoded {
                Ok(char) => buf.push_char(char),
                Err(error) => {
                    if let Some(code_point) = CodePoint::from_u32(u32::from(error.unpaired_surrogate())) {
                        buf.push(code_point);
                    }
                }
            }
        }
        JsString::from(buf)
    }

    /// Decodes the value of a string literal or template element. When the
    /// literal contains lone surrogates the parser writes each of them as
    /// U+FFFD followed by four hex digits, and a literal U+FFFD as
    /// U+FFFD followed by `fffd`.
    pub fn from_literal(value: &str, lone_surrogates: bool) -> JsString {
        if !lone_surrogates {
            return JsString::from(value);
        }
        let mut buf = Wtf8Buf::with_capacity(value.len());
        let mut rest = value;
        while let Some(position) = rest.find('\u{FFFD}') {
            buf.push_str(&rest[..position]);
            rest = &rest[position + '\u{FFFD}'.len_utf8()..];
            let code_point = rest
                .get(..4)
                .and_then(|hex| u32::from_str_radix(hex, 16).ok())
                .and_then(CodePoint::from_u32);
            match code_point {
                Some(code_point) => {
                    buf.push(code_point);
                    rest = &rest[4..];
                }
                None => buf.push_char('\u{FFFD}'),
            }
        }
        buf.push_str(rest);
        JsString::from(buf)
    }

    /// The code unit at `index` as a one code unit string.
    pub fn utf16_char_at(&self, index: usize) -> Option<JsString> {
        let unit = self.code_unit_at(index)?;
        Some(JsString::from_code_units(&[unit]))
    }

    /// Substring by UTF-16 code unit range, clamped to the string length.
    pub fn utf16_substring(&self, start: usize, end: usize) -> JsString {
        let end = end.min(self.utf16_len());
        if start >= end {
            return JsString::default();
        }
        if start == 0 && end == self.utf16_len() {
            return self.clone();
        }
        if self.is_ascii() {
            return JsString::from(&self.as_str()[start..end]);
        }
        let units: Vec<u16> = self.code_units().skip(start).take(end - start).collect();
        JsString::from_code_units(&units)
    }

    /// Index in UTF-16 code units of the first occurrence of `needle` at or
    /// after `from`.
    pub fn utf16_index_of(&self, needle: &JsString, from: usize) -> Option<usize> {
        if from > self.utf16_len() || needle.utf16_len() > self.utf16_len() - from {
            return None;
        }
        if self.is_ascii() && needle.is_ascii() {
            return self.as_str()[from..]
                .find(needle.as_str())
                .map(|index| index + from);
        }
        let haystack: Vec<u16> = self.code_units().collect();
        let needle: Vec<u16> = needle.code_units().collect();
        find_code_units(&haystack, &needle, from)
    }

    /// Each code point as its own string; lone surrogates stand alone.
    pub fn code_points(&self) -> impl Iterator<Item = JsString> + '_ {
        self.0.data.code_points().map(|code_point| {
            let mut buf = Wtf8Buf::with_capacity(4);
            buf.push(code_point);
            JsString::from(buf)
        })
    }

    pub fn concat(&self, other: &JsString) -> JsString {
        if other.0.data.len() == 0 {
            return self.clone();
        }
        if self.0.data.len() == 0 {
            return other.clone();
        }
        let mut buf = Wtf8Buf::with_capacity(self.0.data.len() + other.0.data.len());
        buf.push_wtf8(&self.0.data);
        buf.push_wtf8(&other.0.data);
        JsString::from(buf)
    }

    pub fn repeat(&self, count: usize) -> JsString {
        let mut buf = Wtf8Buf::with_capacity(self.0.data.len() * count);
        for _ in 0..count {
            buf.push_wtf8(&self.0.data);
        }
        JsString::from(buf)
    }
}

/// ### [6.1.4.1 StringIndexOf ( string, searchValue, fromIndex )](https://tc39.es/ecma262/#sec-stringindexof)
pub(crate) fn find_code_units(string: &[u16], search_value: &[u16], from_index: usize) -> Option<usize> {
    if from_index > string.len() || search_value.len() > string.len() - from_index {
        return None;
    }
    (from_index..=string.len() - search_value.len())
        .find(|&index| string[index..index + search_value.len()] == *search_value)
}

impl Default for JsString {
    fn default() -> Self {
        JsString::from("")
    }
}

impl PartialEq for JsString {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0) || self.0.data == other.0.data
    }
}

impl Eq for JsString {}

impl Hash for JsString {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Must agree with `str` for lookups through `Borrow<str>`.
        self.as_str().hash(state);
    }
}

impl PartialOrd for JsString {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for JsString {
    /// Code unit order, as in IsLessThan.
    fn cmp(&self, other: &Self) -> Ordering {
        if self.is_ascii() && other.is_ascii() {
            return self.as_str().cmp(other.as_str());
        }
        self.code_units().cmp(other.code_units())
    }
}

impl Deref for JsString {
    type Target = str;

    fn deref(&self) -> &str {
        self.as_str()
    }
}

impl Borrow<str> for JsString {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Debug for JsString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl fmt::Display for JsString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for JsString {
    fn from(value: &str) -> Self {
        Self(Rc::new(StringRecord {
            data: Wtf8Buf::from_str(value),
            lossy: None,
            utf16_len: utf16_len_of(value),
        }))
    }
}

impl From<String> for JsString {
    fn from(value: String) -> Self {
        Self(Rc::new(StringRecord::from_string(value)))
    }
}

impl From<Wtf8Buf> for JsString {
    fn from(value: Wtf8Buf) -> Self {
        Self(Rc::new(StringRecord::from_wtf8_buf(value)))
    }
}

impl PartialEq<str> for JsString {
    fn eq(&self, other: &str) -> bool {
        self.is_well_formed() && self.as_str() == other
    }
}

impl PartialEq<&str> for JsString {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn lengths_count_utf16_code_units() {
        assert_eq!(JsString::from("good").utf16_len(), 4);
        assert_eq!(JsString::from("😀").utf16_len(), 2);
        assert_eq!(JsString::from("é").utf16_len(), 1);
        assert_eq!(JsString::from_code_units(&[0xD83D]).utf16_len(), 1);
    }

    #[test]
    fn indexing_keeps_lone_surrogates() {
        let string = JsString::from("a😀");
        assert_eq!(string.utf16_char_at(0).unwrap(), "a");
        let high = string.utf16_char_at(1).unwrap();
        assert!(!high.is_well_formed());
        assert_eq!(high.code_units().collect::<Vec<_>>(), [0xD83D]);
        let low = string.utf16_char_at(2).unwrap();
        assert_eq!(low.code_units().collect::<Vec<_>>(), [0xDE00]);
        assert!(string.utf16_char_at(3).is_none());
        assert_ne!(high, JsString::from("\u{FFFD}"));
    }

    #[test]
    fn concatenating_halves_restores_the_pair() {
        let string = JsString::from("😀");
        let joined = string.utf16_char_at(0).unwrap().concat(&string.utf16_char_at(1).unwrap());
        assert!(joined.is_well_formed());
        assert_eq!(joined, string);
        assert_eq!(string.utf16_substring(1, 2).concat(&JsString::from("x")).utf16_len(), 2);
    }

    #[test]
    fn substring_and_index_of() {
        let string = JsString::from("hello,world");
        assert_eq!(string.utf16_substring(6, 100), "world");
        assert_eq!(string.utf16_substring(3, 1), "");
        assert_eq!(string.utf16_index_of(&",".into(), 0), Some(5));
        assert_eq!(string.utf16_index_of(&"o".into(), 5), Some(7));
        assert_eq!(string.utf16_index_of(&"z".into(), 0), None);
        assert_eq!(string.utf16_index_of(&"".into(), 3), Some(3));
        let emoji = JsString::from("x😀y");
        assert_eq!(emoji.utf16_index_of(&"y".into(), 0), Some(3));
        assert_eq!(emoji.utf16_substring(1, 3), "😀");
    }

    #[test]
    fn literals_decode_escaped_surrogates() {
        let lone = JsString::from_literal("a\u{FFFD}d83db", true);
        assert_eq!(lone.code_units().collect::<Vec<_>>(), [0x61, 0xD83D, 0x62]);
        let replacement = JsString::from_literal("\u{FFFD}fffd\u{FFFD}dc00", true);
        assert_eq!(replacement.code_units().collect::<Vec<_>>(), [0xFFFD, 0xDC00]);
        assert_eq!(JsString::from_literal("\u{FFFD}", false), "\u{FFFD}");
    }

    #[test]
    fn ordering_uses_code_units() {
        // U+FF61 sorts after the surrogates of U+1F600 by code unit.
        assert!(JsString::from("😀") < JsString::from("\u{FF61}"));
        assert!(JsString::from("a") < JsString::from("b"));
    }
}
