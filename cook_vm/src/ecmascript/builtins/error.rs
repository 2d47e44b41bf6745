// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ### [20.5 Error Objects](https://tc39.es/ecma262/#sec-error-objects)

use crate::{
    ecmascript::{
        abstract_operations::{operations_on_objects::get, type_conversion::to_string},
        execution::{Agent, ExceptionType, JsResult},
        types::{JsString, Object, ObjectHeapData, ObjectKind, ObjectProperty, PropertyKey, Value},
    },
    heap::CreateHeapData,
};

/// Allocates an error object of the given native type. The message, if any,
/// becomes a non-enumerable own `message` property.
pub(crate) fn create_error_object(
    agent: &mut Agent,
    kind: ExceptionType,
    message: Option<JsString>,
) -> Object {
    let mut data = ObjectHeapData::new(ObjectKind::Error(kind));
    if let Some(message) = message {
        data.properties.push(ObjectProperty::hidden(
            PropertyKey::from("message"),
            Value::String(message),
        ));
    }
    agent.heap.create(data)
}

/// ### [20.5.3.4 Error.prototype.toString ( )](https://tc39.es/ecma262/#sec-error.prototype.tostring)
pub(crate) fn error_to_string(agent: &mut Agent, o: Object) -> JsResult<JsString> {
    // 3. Let name be ? Get(O, "name").
    let name = get(agent, o, &PropertyKey::from("name"));
    // 4. If name is undefined, set name to "Error"; otherwise set name to ? ToString(name).
    let name = if name.is_undefined() {
        JsString::from("Error")
    } else {
        to_string(agent, &name)?
    };
    // 5. Let msg be ? Get(O, "message").
    let msg = get(agent, o, &PropertyKey::from("message"));
    // 6. If msg is undefined, set msg to the empty String; otherwise set msg to ? ToString(msg).
    let msg = if msg.is_undefined() {
        JsString::default()
    } else {
        to_string(agent, &msg)?
    };
    // 7. If name is the empty String, return msg.
    if name.is_empty() {
        return Ok(msg);
    }
    // 8. If msg is the empty String, return name.
    if msg.is_empty() {
        return Ok(name);
    }
    // 9. Return the string-concatenation of name, the code unit 0x003A
    //    (COLON), the code unit 0x0020 (SPACE), and msg.
    Ok(JsString::from(format!("{name}: {msg}")))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ecmascript::execution::AgentOptions;

    #[test]
    fn to_string_combines_name_and_message() {
        let mut agent = Agent::new(AgentOptions::default());
        let error = create_error_object(&mut agent, ExceptionType::TypeError, Some("oops".into()));
        assert_eq!(error_to_string(&mut agent, error).unwrap(), "TypeError: oops");
        let bare = create_error_object(&mut agent, ExceptionType::RangeError, None);
        assert_eq!(error_to_string(&mut agent, bare).unwrap(), "RangeError");
    }
}
