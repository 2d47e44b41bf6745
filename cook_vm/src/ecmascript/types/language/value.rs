// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use ahash::AHashSet;

use super::{JsString, Object, ObjectKind, PropertyKey, Symbol};
use crate::ecmascript::{
    abstract_operations::{
        operations_on_objects::{get_own_property_value, own_property_keys},
        testing_and_comparison::is_callable,
        type_conversion::number_to_string,
    },
    execution::Agent,
};

/// ### [6.1 ECMAScript Language Types](https://tc39.es/ecma262/#sec-ecmascript-language-types)
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    /// ### [6.1.1 The Undefined Type](https://tc39.es/ecma262/#sec-ecmascript-language-types-undefined-type)
    #[default]
    Undefined,
    /// ### [6.1.2 The Null Type](https://tc39.es/ecma262/#sec-ecmascript-language-types-null-type)
    Null,
    /// ### [6.1.3 The Boolean Type](https://tc39.es/ecma262/#sec-ecmascript-language-types-boolean-type)
    Boolean(bool),
    /// ### [6.1.6.1 The Number Type](https://tc39.es/ecma262/#sec-ecmascript-language-types-number-type)
    Number(f64),
    /// ### [6.1.4 The String Type](https://tc39.es/ecma262/#sec-ecmascript-language-types-string-type)
    String(JsString),
    /// ### [6.1.5 The Symbol Type](https://tc39.es/ecma262/#sec-ecmascript-language-types-symbol-type)
    Symbol(Symbol),
    /// ### [6.1.7 The Object Type](https://tc39.es/ecma262/#sec-object-type)
    ///
    /// Functions, arrays and error objects are all objects.
    Object(Object),
}

impl Value {
    pub fn nan() -> Self {
        Value::Number(f64::NAN)
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Undefined or null.
    pub fn is_nullish(&self) -> bool {
        matches!(self, Value::Undefined | Value::Null)
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    pub fn as_object(&self) -> Option<Object> {
        match self {
            Value::Object(object) => Some(*object),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(string) => Some(string.as_str()),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(number) => Some(*number),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(boolean) => Some(*boolean),
            _ => None,
        }
    }

    /// ### [13.5.3 The typeof Operator](https://tc39.es/ecma262/#sec-typeof-operator)
    pub fn type_of(&self, agent: &Agent) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "object",
            Value::Boolean(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Symbol(_) => "symbol",
            Value::Object(_) => {
                if is_callable(agent, self).is_some() {
                    "function"
                } else {
                    "object"
                }
            }
        }
    }

    /// Debug rendering of a value in the style of a JavaScript console.
    pub fn string_repr(&self, agent: &Agent) -> String {
        let mut output = String::new();
        let mut seen = AHashSet::default();
        write_repr(agent, self, &mut output, &mut seen);
        output
    }
}

fn write_repr(agent: &Agent, value: &Value, output: &mut String, seen: &mut AHashSet<Object>) {
    match value {
        Value::Undefined => output.push_str("undefined"),
        Value::Null => output.push_str("null"),
        Value::Boolean(boolean) => output.push_str(if *boolean { "true" } else { "false" }),
        Value::Number(number) => output.push_str(&number_to_string(*number)),
        Value::String(string) => output.push_str(&format!("{string:?}")),
        Value::Symbol(symbol) => output.push_str(&symbol.descriptive_string(agent)),
        Value::Object(object) => {
            if !seen.insert(*object) {
                output.push_str("[Circular]");
                return;
            }
            write_object_repr(agent, *object, output, seen);
            seen.remove(object);
        }
    }
}

/// Runs of holes print as a single `<N empty items>` part.
fn write_holes(output: &mut String, parts: &mut usize, count: usize) {
    if count == 0 {
        return;
    }
    if *parts > 0 {
        output.push_str(", ");
    }
    match count {
        1 => output.push_str("<1 empty item>"),
        _ => output.push_str(&format!("<{count} empty items>")),
    }
    *parts += 1;
}

fn write_object_repr(
    agent: &Agent,
    object: Object,
    output: &mut String,
    seen: &mut AHashSet<Object>,
) {
    match &agent[object].kind {
        ObjectKind::Array(array) => {
            output.push('[');
            let mut parts = 0;
            let mut next = 0;
            for (index, element) in array.present() {
                write_holes(output, &mut parts, index - next);
                if parts > 0 {
                    output.push_str(", ");
                }
                write_repr(agent, element, output, seen);
                parts += 1;
                next = index + 1;
            }
            write_holes(output, &mut parts, array.len() - next);
            output.push(']');
            return;
        }
        ObjectKind::ECMAScriptFunction(_) | ObjectKind::BuiltinFunction(_) => {
            let name = object.function_name(agent);
            if name.is_empty() {
                output.push_str("[Function (anonymous)]");
            } else {
                output.push_str(&format!("[Function {name}]"));
            }
            return;
        }
        ObjectKind::Error(kind) => {
            let message = get_own_property_value(agent, object, &PropertyKey::from("message"));
            match message {
                Some(Value::String(message)) if !message.is_empty() => {
                    output.push_str(&format!("{}: {message}", kind.name()))
                }
                _ => output.push_str(kind.name()),
            }
            return;
        }
        ObjectKind::Ordinary => {}
    }
    let keys = own_property_keys(agent, object);
    if keys.is_empty() {
        output.push_str("{}");
        return;
    }
    output.push_str("{ ");
    for (index, key) in keys.iter().enumerate() {
        if index > 0 {
            output.push_str(", ");
        }
        match key {
            PropertyKey::String(string) => output.push_str(string),
            PropertyKey::Symbol(symbol) => {
                output.push('[');
                output.push_str(&symbol.descriptive_string(agent));
                output.push(']');
            }
        }
        output.push_str(": ");
        let value = get_own_property_value(agent, object, key).unwrap_or_default();
        write_repr(agent, &value, output, seen);
    }
    output.push_str(" }");
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Number(f64::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Number(f64::from(value))
    }
}

impl From<usize> for Value {
    fn from(value: usize) -> Self {
        Value::Number(value as f64)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(JsString::from(value))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(JsString::from(value))
    }
}

impl From<JsString> for Value {
    fn from(value: JsString) -> Self {
        Value::String(value)
    }
}

impl From<Symbol> for Value {
    fn from(value: Symbol) -> Self {
        Value::Symbol(value)
    }
}

impl From<Object> for Value {
    fn from(value: Object) -> Self {
        Value::Object(value)
    }
}
