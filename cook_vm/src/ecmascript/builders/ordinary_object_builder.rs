// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::{push_builtin_function_property, push_constant_property};
use crate::ecmascript::{
    abstract_operations::operations_on_objects::ordinary_object_create,
    builtins::Builtin,
    execution::Agent,
    types::{Object, Value},
};

/// Builds a namespace object such as `Math`.
pub(crate) struct OrdinaryObjectBuilder<'agent, 'a> {
    agent: &'agent mut Agent<'a>,
    this: Object,
}

impl<'agent, 'a> OrdinaryObjectBuilder<'agent, 'a> {
    pub(crate) fn new(agent: &'agent mut Agent<'a>) -> Self {
        let this = ordinary_object_create(agent);
        Self { agent, this }
    }

    #[must_use]
    pub(crate) fn with_builtin_function_property<T: Builtin>(self) -> Self {
        push_builtin_function_property::<T>(self.agent, self.this);
        self
    }

    #[must_use]
    pub(crate) fn with_constant_property(self, key: &'static str, value: Value) -> Self {
        push_constant_property(self.agent, self.this, key, value);
        self
    }

    pub(crate) fn build(self) -> Object {
        self.this
    }
}
