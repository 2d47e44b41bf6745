// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::{push_builtin_function_property, push_constant_property, push_function_property};
use crate::ecmascript::{
    builtins::{Builtin, create_builtin_function},
    execution::Agent,
    types::{Object, Value},
};

/// Builds a built-in constructor together with its static methods, such as
/// `Object` with `Object.keys`.
pub(crate) struct BuiltinFunctionBuilder<'agent, 'a> {
    agent: &'agent mut Agent<'a>,
    this: Object,
}

impl<'agent, 'a> BuiltinFunctionBuilder<'agent, 'a> {
    pub(crate) fn new<T: Builtin>(agent: &'agent mut Agent<'a>) -> Self {
        let this = create_builtin_function::<T>(agent);
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

    /// Adds an existing function object as a method, so that two namespaces
    /// can share it.
    #[must_use]
    pub(crate) fn with_function_property(self, key: &'static str, function: Object) -> Self {
        push_function_property(self.agent, self.this, key, function);
        self
    }

    pub(crate) fn build(self) -> Object {
        self.this
    }
}
