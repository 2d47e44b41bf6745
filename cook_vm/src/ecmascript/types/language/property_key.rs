// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::{JsString, Symbol, Value};
use crate::ecmascript::execution::Agent;

/// ### [6.1.7 The Object Type](https://tc39.es/ecma262/#sec-object-type)
///
/// A property key is either a String value or a Symbol value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PropertyKey {
    String(JsString),
    Symbol(Symbol),
}

impl PropertyKey {
    /// An array index is an integer index whose numeric value is in the
    /// inclusive interval from +0 to 2**32 - 2, written in canonical form.
    pub fn as_array_index(&self) -> Option<u32> {
        let PropertyKey::String(string) = self else {
            return None;
        };
        let bytes = string.as_bytes();
        if bytes.is_empty() || bytes.len() > 10 || !bytes.iter().all(u8::is_ascii_digit) {
            return None;
        }
        if bytes.len() > 1 && bytes[0] == b'0' {
            return None;
        }
        let index: u64 = string.parse().ok()?;
        (index < u64::from(u32::MAX)).then_some(index as u32)
    }

    pub fn is_array_index(&self) -> bool {
        self.as_array_index().is_some()
    }

    pub fn is_symbol(&self) -> bool {
        matches!(self, PropertyKey::Symbol(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyKey::String(string) => Some(string.as_str()),
            PropertyKey::Symbol(_) => None,
        }
    }

    pub fn into_value(self) -> Value {
        match self {
            PropertyKey::String(string) => Value::String(string),
            PropertyKey::Symbol(symbol) => Value::Symbol(symbol),
        }
    }

    /// Renders the key for error messages.
    pub(crate) fn to_display(&self, agent: &Agent) -> String {
        match self {
            PropertyKey::String(string) => string.to_string(),
            PropertyKey::Symbol(symbol) => symbol.descriptive_string(agent).to_string(),
        }
    }
}

impl From<&str> for PropertyKey {
    fn from(value: &str) -> Self {
        PropertyKey::String(JsString::from(value))
    }
}

impl From<String> for PropertyKey {
    fn from(value: String) -> Self {
        PropertyKey::String(JsString::from(value))
    }
}

impl From<JsString> for PropertyKey {
    fn from(value: JsString) -> Self {
        PropertyKey::String(value)
    }
}

impl From<Symbol> for PropertyKey {
    fn from(value: Symbol) -> Self {
        PropertyKey::Symbol(value)
    }
}

impl From<u32> for PropertyKey {
    fn from(value: u32) -> Self {
        PropertyKey::String(JsString::from(value.to_string()))
    }
}

impl From<usize> for PropertyKey {
    fn from(value: usize) -> Self {
        PropertyKey::String(JsString::from(value.to_string()))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn array_indexes_are_canonical() {
        assert_eq!(PropertyKey::from("0").as_array_index(), Some(0));
        assert_eq!(PropertyKey::from("42").as_array_index(), Some(42));
        assert_eq!(PropertyKey::from("042").as_array_index(), None);
        assert_eq!(PropertyKey::from("-1").as_array_index(), None);
        assert_eq!(PropertyKey::from("1.5").as_array_index(), None);
        assert_eq!(PropertyKey::from("4294967295").as_array_index(), None);
        assert_eq!(PropertyKey::from("4294967294").as_array_index(), Some(4294967294));
        assert_eq!(PropertyKey::from("length").as_array_index(), None);
    }
}
