// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::{
    ops::{Index, IndexMut},
    rc::Rc,
};

use ahash::AHashMap;
use oxc_allocator::Address;

use super::{Agent, CookHooks, Environment};
use crate::{
    ecmascript::{scripts_and_modules::precook::Scope, types::Object},
    heap::{CreateHeapData, Heap, RealmIndex, indexes::BaseIndex},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RealmIdentifier(pub(crate) RealmIndex);

/// ### [9.3 Realms](https://tc39.es/ecma262/#sec-code-realms)
///
/// Every cook creates its own realm: the source it evaluates, the static
/// scopes computed for that source, and the root environment holding the
/// supplied globals.
#[derive(Debug)]
pub struct Realm<'a> {
    pub(crate) source_text: &'a str,

    /// ### \[\[GlobalEnv]]
    ///
    /// Declarative environment without an outer environment; holds one
    /// immutable binding per supplied global.
    pub(crate) global_env: Environment,

    /// Static scopes from precook, keyed by the address of their AST node.
    pub(crate) scopes: AHashMap<Address, Rc<Scope<'a>>>,

    /// Byte offsets of `|>` operators rewritten before parsing.
    pub(crate) pipeline_operators: Rc<[u32]>,

    pub(crate) expression_only: bool,

    pub(crate) hooks: Option<Rc<dyn CookHooks>>,

    /// ### \[\[TemplateMap]]
    ///
    /// Template objects keyed by the address of their template literal.
    pub(crate) template_map: AHashMap<Address, Object>,
}

impl<'a> Realm<'a> {
    pub(crate) fn scope(&self, address: Address) -> Rc<Scope<'a>> {
        self.scopes
            .get(&address)
            .cloned()
            .expect("Scope of node was not precooked")
    }

    /// Whether a rewritten `|>` lies in `start..end`, the gap between the
    /// operands of a `||` expression.
    pub(crate) fn contains_pipeline_operator(&self, start: u32, end: u32) -> bool {
        let index = self.pipeline_operators.partition_point(|offset| *offset < start);
        self.pipeline_operators
            .get(index)
            .is_some_and(|offset| *offset < end)
    }
}

impl<'a> Index<RealmIdentifier> for Heap<'a> {
    type Output = Realm<'a>;

    fn index(&self, index: RealmIdentifier) -> &Self::Output {
        self.realms
            .get(index.0.into_index())
            .expect("RealmIdentifier out of bounds")
    }
}

impl IndexMut<RealmIdentifier> for Heap<'_> {
    fn index_mut(&mut self, index: RealmIdentifier) -> &mut Self::Output {
        self.realms
            .get_mut(index.0.into_index())
            .expect("RealmIdentifier out of bounds")
    }
}

impl<'a> Index<RealmIdentifier> for Agent<'a> {
    type Output = Realm<'a>;

    fn index(&self, index: RealmIdentifier) -> &Self::Output {
        &self.heap[index]
    }
}

impl IndexMut<RealmIdentifier> for Agent<'_> {
    fn index_mut(&mut self, index: RealmIdentifier) -> &mut Self::Output {
        &mut self.heap[index]
    }
}

impl<'a> CreateHeapData<Realm<'a>, RealmIdentifier> for Heap<'a> {
    fn create(&mut self, data: Realm<'a>) -> RealmIdentifier {
        self.realms.push(data);
        RealmIdentifier(BaseIndex::last(&self.realms))
    }
}
