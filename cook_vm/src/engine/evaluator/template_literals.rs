// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use oxc_allocator::UnstableAddress;
use oxc_ast::ast::TemplateLiteral;

use crate::ecmascript::{
    abstract_operations::operations_on_objects::{integrity, set_integrity_level},
    builtins::array::array_create,
    execution::Agent,
    types::{JsString, Object, ObjectProperty, PropertyKey, Value},
};

/// ### [13.2.8.4 GetTemplateObject ( templateLiteral )](https://tc39.es/ecma262/#sec-gettemplateobject)
///
/// Evaluating the same tagged template twice passes the same object.
pub(super) fn get_template_object<'a>(
    agent: &mut Agent<'a>,
    template_literal: &'a TemplateLiteral<'a>,
) -> Object {
    let address = template_literal.unstable_address();
    // 1. Let realm be the current Realm Record.
    let realm = agent.current_realm_id();
    // 2. Let templateRegistry be realm.[[TemplateMap]].
    // 3. For each element e of templateRegistry, do
    //    a. If e.[[Site]] is the same Parse Node as templateLiteral, then
    //       i. Return e.[[Array]].
    if let Some(template) = agent[realm].template_map.get(&address) {
        return *template;
    }
    // 4. Let rawStrings be the TemplateStrings of templateLiteral with argument true.
    // 6. Let cookedStrings be the TemplateStrings of templateLiteral with argument false.
    let (cooked_strings, raw_strings): (Vec<_>, Vec<_>) = template_literal
        .quasis
        .iter()
        .map(|quasi| {
            let cooked = quasi
                .value
                .cooked
                .as_ref()
                .map_or(Value::Undefined, |cooked| {
                    Value::String(JsString::from_literal(cooked.as_str(), quasi.lone_surrogates))
                });
            (Some(cooked), Some(Value::from(quasi.value.raw.as_str())))
        })
        .unzip();
    // 8. Let template be ! ArrayCreate(count).
    let template = array_create(agent, cooked_strings);
    // 9. Let rawObj be ! ArrayCreate(count).
    let raw_obj = array_create(agent, raw_strings);
    // 12. Perform ! SetIntegrityLevel(rawObj, FROZEN).
    set_integrity_level::<integrity::Frozen>(agent, raw_obj);
    // 13. Perform ! DefinePropertyOrThrow(template, "raw", PropertyDescriptor {
    //     [[Value]]: rawObj, [[Writable]]: false, [[Enumerable]]: false,
    //     [[Configurable]]: false }).
    agent[template].properties.push(ObjectProperty::hidden(
        PropertyKey::from("raw"),
        Value::Object(raw_obj),
    ));
    // 14. Perform ! SetIntegrityLevel(template, FROZEN).
    set_integrity_level::<integrity::Frozen>(agent, template);
    // 15. Append the Record { [[Site]]: templateLiteral, [[Array]]: template } to realm.[[TemplateMap]].
    agent[realm].template_map.insert(address, template);
    // 16. Return template.
    template
}
