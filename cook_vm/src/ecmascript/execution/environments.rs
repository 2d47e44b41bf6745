// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ### [9.1 Environment Records](https://tc39.es/ecma262/#sec-environment-records)
//!
//! Environment Record is a specification type used to define the association
//! of Identifiers to specific variables and functions, based upon the lexical
//! nesting structure of ECMAScript code. Every scope of evaluated code is a
//! Declarative Environment Record: there are no object, function or global
//! environment kinds since `this`, `with` and a global object do not exist in
//! cooked code. The root environment of a cook holds the supplied globals.

mod declarative_environment;

use std::ops::{Index, IndexMut};

pub use declarative_environment::DeclarativeEnvironmentRecord;

use super::Agent;
use crate::{
    ecmascript::types::{Base, PropertyKey, Reference},
    heap::{CreateHeapData, DeclarativeEnvironmentIndex, Heap, indexes::BaseIndex},
};

/// Handle to a [`DeclarativeEnvironmentRecord`] in the heap. Outer links are
/// plain handles, so an environment chain never owns its parents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Environment(pub(crate) DeclarativeEnvironmentIndex);

/// ### \[\[OuterEnv\]\]
///
/// Every Environment Record has an \[\[OuterEnv\]\] field, which is either
/// null or a reference to an outer Environment Record.
pub(crate) type OuterEnv = Option<Environment>;

/// ### [9.1.2.1 GetIdentifierReference ( env, name, strict )](https://tc39.es/ecma262/#sec-getidentifierreference)
///
/// The abstract operation GetIdentifierReference takes arguments env (an
/// Environment Record or null), name (a String), and strict (a Boolean) and
/// returns a Reference Record.
pub(crate) fn get_identifier_reference(
    agent: &Agent,
    env: OuterEnv,
    name: &str,
    strict: bool,
) -> Reference {
    let mut env = env;
    loop {
        // 1. If env is null, then
        let Some(current) = env else {
            // a. Return the Reference Record { [[Base]]: unresolvable,
            //    [[ReferencedName]]: name, [[Strict]]: strict,
            //    [[ThisValue]]: empty }.
            return Reference {
                base: Base::Unresolvable,
                referenced_name: PropertyKey::from(name),
                strict,
            };
        };
        // 2. Let exists be ? env.HasBinding(name).
        // 3. If exists is true, then
        if current.has_binding(agent, name) {
            // a. Return the Reference Record { [[Base]]: env,
            //    [[ReferencedName]]: name, [[Strict]]: strict,
            //    [[ThisValue]]: empty }.
            return Reference::environment(current, name, strict);
        }
        // 4. Else,
        //    a. Let outer be env.[[OuterEnv]].
        //    b. Return ? GetIdentifierReference(outer, name, strict).
        env = current.outer_env(agent);
    }
}

/// ### [9.1.2.2 NewDeclarativeEnvironment ( E )](https://tc39.es/ecma262/#sec-newdeclarativeenvironment)
///
/// The abstract operation NewDeclarativeEnvironment takes argument E (an
/// Environment Record or null) and returns a Declarative Environment Record.
pub(crate) fn new_declarative_environment(agent: &mut Agent, outer_env: OuterEnv) -> Environment {
    // 1. Let env be a new Declarative Environment Record containing no bindings.
    // 2. Set env.[[OuterEnv]] to E.
    // 3. Return env.
    agent
        .heap
        .create(DeclarativeEnvironmentRecord::new(outer_env))
}

impl Index<Environment> for Heap<'_> {
    type Output = DeclarativeEnvironmentRecord;

    fn index(&self, index: Environment) -> &Self::Output {
        self.environments
            .get(index.0.into_index())
            .and_then(Option::as_ref)
            .expect("Environment out of bounds")
    }
}

impl IndexMut<Environment> for Heap<'_> {
    fn index_mut(&mut self, index: Environment) -> &mut Self::Output {
        self.environments
            .get_mut(index.0.into_index())
            .and_then(Option::as_mut)
            .expect("Environment out of bounds")
    }
}

impl Index<Environment> for Agent<'_> {
    type Output = DeclarativeEnvironmentRecord;

    fn index(&self, index: Environment) -> &Self::Output {
        &self.heap[index]
    }
}

impl IndexMut<Environment> for Agent<'_> {
    fn index_mut(&mut self, index: Environment) -> &mut Self::Output {
        &mut self.heap[index]
    }
}

impl CreateHeapData<DeclarativeEnvironmentRecord, Environment> for Heap<'_> {
    fn create(&mut self, data: DeclarativeEnvironmentRecord) -> Environment {
        // Slots freed by the collector are reused first.
        if let Some(index) = self.free_environments.pop() {
            self.environments[index.into_index()] = Some(data);
            return Environment(index);
        }
        self.environments.push(Some(data));
        Environment(BaseIndex::last(&self.environments))
    }
}
