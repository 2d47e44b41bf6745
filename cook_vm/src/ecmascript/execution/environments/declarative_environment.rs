// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use ahash::AHashMap;

use super::{Environment, OuterEnv};
use crate::ecmascript::{
    execution::{Agent, ExceptionType, JsResult},
    types::{JsString, Value},
};

/// A binding in a declarative environment.
#[derive(Debug, Clone)]
pub(crate) struct Binding {
    /// `None` while the binding is uninitialized (in its temporal dead zone).
    pub(crate) value: Option<Value>,
    pub(crate) strict: bool,
    pub(crate) mutable: bool,
    pub(crate) deletable: bool,
}

/// ### [9.1.1.1 Declarative Environment Records](https://tc39.es/ecma262/#sec-declarative-environment-records)
///
/// Each Declarative Environment Record is associated with an ECMAScript
/// program scope containing variable, constant, let, function and parameter
/// declarations. A Declarative Environment Record binds the set of
/// identifiers defined by the declarations contained within its scope.
#[derive(Debug, Clone)]
pub struct DeclarativeEnvironmentRecord {
    /// ### \[\[OuterEnv\]\]
    ///
    /// See [OuterEnv].
    pub(crate) outer_env: OuterEnv,

    /// The bindings within this declarative environment.
    pub(crate) bindings: AHashMap<JsString, Binding>,
}

impl DeclarativeEnvironmentRecord {
    pub(crate) fn new(outer_env: OuterEnv) -> Self {
        DeclarativeEnvironmentRecord {
            outer_env,
            bindings: AHashMap::default(),
        }
    }

    /// ### [9.1.1.1.1 HasBinding ( N )](https://tc39.es/ecma262/#sec-declarative-environment-records-hasbinding-n)
    pub(crate) fn has_binding(&self, name: &str) -> bool {
        // 1. If envRec has a binding for N, return true.
        // 2. Return false.
        self.bindings.contains_key(name)
    }

    /// ### [9.1.1.1.2 CreateMutableBinding ( N, D )](https://tc39.es/ecma262/#sec-declarative-environment-records-createmutablebinding-n-d)
    pub(crate) fn create_mutable_binding(&mut self, name: JsString, is_deletable: bool) {
        // 1. Assert: envRec does not already have a binding for N.
        debug_assert!(!self.has_binding(&name));

        // 2. Create a mutable binding in envRec for N and record that it is
        // uninitialized. If D is true, record that the newly created binding
        // may be deleted by a subsequent DeleteBinding call.
        self.bindings.insert(
            name,
            Binding {
                value: None,
                strict: false,
                mutable: true,
                deletable: is_deletable,
            },
        );

        // 3. Return unused.
    }

    /// ### [9.1.1.1.3 CreateImmutableBinding ( N, S )](https://tc39.es/ecma262/#sec-declarative-environment-records-createimmutablebinding-n-s)
    pub(crate) fn create_immutable_binding(&mut self, name: JsString, is_strict: bool) {
        // 1. Assert: envRec does not already have a binding for N.
        debug_assert!(!self.has_binding(&name));

        // 2. Create an immutable binding in envRec for N and record that it is
        // uninitialized. If S is true, record that the newly created binding
        // is a strict binding.
        self.bindings.insert(
            name,
            Binding {
                value: None,
                strict: is_strict,
                mutable: false,
                deletable: false,
            },
        );

        // 3. Return unused.
    }

    /// ### [9.1.1.1.4 InitializeBinding ( N, V )](https://tc39.es/ecma262/#sec-declarative-environment-records-initializebinding-n-v)
    pub(crate) fn initialize_binding(&mut self, name: &str, value: Value) {
        // 1. Assert: envRec must have an uninitialized binding for N.
        let binding = self
            .bindings
            .get_mut(name)
            .expect("InitializeBinding of a missing binding");

        // 2. Set the bound value for N in envRec to V.
        // 3. Record that the binding for N in envRec has been initialized.
        binding.value = Some(value);

        // 4. Return unused.
    }

    /// ### [9.1.1.1.6 GetBindingValue ( N, S )](https://tc39.es/ecma262/#sec-declarative-environment-records-getbindingvalue-n-s)
    ///
    /// Returns `None` for an uninitialized binding.
    pub(crate) fn get_binding_value(&self, name: &str) -> Option<Value> {
        // 1. Assert: envRec has a binding for N.
        let binding = self.bindings.get(name)?;

        // 2. If the binding for N in envRec is an uninitialized binding, throw
        // a ReferenceError exception.
        // 3. Return the value currently bound to N in envRec.
        binding.value.clone()
    }

    /// ### [9.1.1.1.7 DeleteBinding ( N )](https://tc39.es/ecma262/#sec-declarative-environment-records-deletebinding-n)
    pub(crate) fn delete_binding(&mut self, name: &str) -> bool {
        // 1. Assert: envRec has a binding for N.
        let Some(binding) = self.bindings.get(name) else {
            return true;
        };

        // 2. If the binding for N in envRec cannot be deleted, return false.
        if !binding.deletable {
            return false;
        }

        // 3. Remove the binding for N from envRec.
        self.bindings.remove(name);

        // 4. Return true.
        true
    }
}

impl Environment {
    pub(crate) fn outer_env(self, agent: &Agent) -> OuterEnv {
        agent[self].outer_env
    }

    pub(crate) fn has_binding(self, agent: &Agent, name: &str) -> bool {
        agent[self].has_binding(name)
    }

    pub(crate) fn create_mutable_binding(self, agent: &mut Agent, name: &str, is_deletable: bool) {
        agent[self].create_mutable_binding(JsString::from(name), is_deletable);
    }

    pub(crate) fn create_immutable_binding(self, agent: &mut Agent, name: &str, is_strict: bool) {
        agent[self].create_immutable_binding(JsString::from(name), is_strict);
    }

    pub(crate) fn initialize_binding(self, agent: &mut Agent, name: &str, value: Value) {
        agent[self].initialize_binding(name, value);
    }

    /// ### [9.1.1.1.5 SetMutableBinding ( N, V, S )](https://tc39.es/ecma262/#sec-declarative-environment-records-setmutablebinding-n-v-s)
    pub(crate) fn set_mutable_binding(
        self,
        agent: &mut Agent,
        name: &str,
        value: Value,
        mut is_strict: bool,
    ) -> JsResult<()> {
        let env_rec = &mut agent[self];
        // 1. If envRec does not have a binding for N, then
        let Some(binding) = env_rec.bindings.get_mut(name) else {
            // a. If S is true, throw a ReferenceError exception.
            if is_strict {
                return Err(agent.throw_exception(
                    ExceptionType::ReferenceError,
                    format!("{name} is not defined"),
                ));
            }

            // b. Perform ! envRec.CreateMutableBinding(N, true).
            env_rec.create_mutable_binding(JsString::from(name), true);

            // c. Perform ! envRec.InitializeBinding(N, V).
            env_rec.initialize_binding(name, value);

            // d. Return unused.
            return Ok(());
        };

        // 2. If the binding for N in envRec is a strict binding, set S to true.
        if binding.strict {
            is_strict = true;
        }

        // 3. If the binding for N in envRec has not yet been initialized, then
        if binding.value.is_none() {
            // a. Throw a ReferenceError exception.
            return Err(agent.throw_exception(
                ExceptionType::ReferenceError,
                format!("Cannot access '{name}' before initialization"),
            ));
        }

        // 4. Else if the binding for N in envRec is a mutable binding, then
        if binding.mutable {
            // a. Change its bound value to V.
            binding.value = Some(value);
        } else {
            // 5. Else,
            // a. Assert: This is an attempt to change the value of an immutable binding.
            // b. If S is true, throw a TypeError exception.
            if is_strict {
                return Err(agent.throw_exception(
                    ExceptionType::TypeError,
                    format!("Assignment to constant variable '{name}'"),
                ));
            }
        }

        // 6. Return unused.
        Ok(())
    }

    /// ### [9.1.1.1.6 GetBindingValue ( N, S )](https://tc39.es/ecma262/#sec-declarative-environment-records-getbindingvalue-n-s)
    pub(crate) fn get_binding_value(
        self,
        agent: &mut Agent,
        name: &str,
        _is_strict: bool,
    ) -> JsResult<Value> {
        match agent[self].get_binding_value(name) {
            Some(value) => Ok(value),
            None => Err(agent.throw_exception(
                ExceptionType::ReferenceError,
                format!("Cannot access '{name}' before initialization"),
            )),
        }
    }

    pub(crate) fn delete_binding(self, agent: &mut Agent, name: &str) -> bool {
        agent[self].delete_binding(name)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ecmascript::execution::{AgentOptions, new_declarative_environment};

    #[test]
    fn uninitialized_binding_is_in_temporal_dead_zone() {
        let mut agent = Agent::new(AgentOptions::default());
        let env = new_declarative_environment(&mut agent, None);
        env.create_mutable_binding(&mut agent, "a", false);
        assert!(env.has_binding(&agent, "a"));
        let error = env.get_binding_value(&mut agent, "a", true).unwrap_err();
        assert_eq!(
            agent.exception_type(&error),
            Some(ExceptionType::ReferenceError)
        );
        env.initialize_binding(&mut agent, "a", Value::from(1));
        assert_eq!(
            env.get_binding_value(&mut agent, "a", true).unwrap(),
            Value::from(1)
        );
    }

    #[test]
    fn immutable_binding_rejects_writes() {
        let mut agent = Agent::new(AgentOptions::default());
        let env = new_declarative_environment(&mut agent, None);
        env.create_immutable_binding(&mut agent, "a", true);
        env.initialize_binding(&mut agent, "a", Value::from("x"));
        let error = env
            .set_mutable_binding(&mut agent, "a", Value::from("y"), true)
            .unwrap_err();
        assert_eq!(agent.exception_type(&error), Some(ExceptionType::TypeError));
        assert_eq!(
            env.get_binding_value(&mut agent, "a", true).unwrap(),
            Value::from("x")
        );
    }

    #[test]
    fn outer_environment_is_searched() {
        let mut agent = Agent::new(AgentOptions::default());
        let outer = new_declarative_environment(&mut agent, None);
        outer.create_mutable_binding(&mut agent, "a", false);
        outer.initialize_binding(&mut agent, "a", Value::from(true));
        let inner = new_declarative_environment(&mut agent, Some(outer));
        assert_eq!(inner.outer_env(&agent), Some(outer));
        assert!(!inner.has_binding(&agent, "a"));
        let reference = super::super::get_identifier_reference(&agent, Some(inner), "a", true);
        assert!(matches!(reference.base, crate::ecmascript::types::Base::Environment(env) if env == outer));
        let missing = super::super::get_identifier_reference(&agent, Some(inner), "b", true);
        assert!(missing.is_unresolvable_reference());
    }

    #[test]
    fn deletable_bindings() {
        let mut agent = Agent::new(AgentOptions::default());
        let env = new_declarative_environment(&mut agent, None);
        env.create_mutable_binding(&mut agent, "a", true);
        env.create_mutable_binding(&mut agent, "b", false);
        assert!(env.delete_binding(&mut agent, "a"));
        assert!(!env.delete_binding(&mut agent, "b"));
        assert!(!env.has_binding(&agent, "a"));
    }
}
