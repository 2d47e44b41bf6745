// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

pub(crate) mod heap_gc;
pub(crate) mod indexes;

pub(crate) use indexes::{DeclarativeEnvironmentIndex, ObjectIndex, RealmIndex, SymbolIndex};

use crate::ecmascript::{
    execution::{DeclarativeEnvironmentRecord, Realm},
    types::{ObjectHeapData, SymbolHeapData},
};

/// Arena of every record an [`Agent`](crate::ecmascript::execution::Agent)
/// allocates. Objects, realms and symbols live as long as the agent.
/// Environments are reclaimed by [`heap_gc::heap_gc`] once nothing can
/// reach them; their slots are `None` until reused.
#[derive(Debug, Default)]
pub(crate) struct Heap<'a> {
    pub(crate) environments: Vec<Option<DeclarativeEnvironmentRecord>>,
    pub(crate) free_environments: Vec<DeclarativeEnvironmentIndex>,
    /// Live environment count that triggers the next collection.
    pub(crate) gc_threshold: usize,
    pub(crate) objects: Vec<ObjectHeapData<'a>>,
    pub(crate) realms: Vec<Realm<'a>>,
    pub(crate) symbols: Vec<SymbolHeapData>,
}

/// Moves a record into the heap and returns its typed handle.
pub(crate) trait CreateHeapData<T, F> {
    fn create(&mut self, data: T) -> F;
}
