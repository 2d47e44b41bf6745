// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::ops::Index;

use super::JsString;
use crate::{
    ecmascript::execution::Agent,
    heap::{CreateHeapData, Heap, SymbolIndex, indexes::BaseIndex},
};

/// ### [6.1.5 The Symbol Type](https://tc39.es/ecma262/#sec-ecmascript-language-types-symbol-type)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Symbol(pub(crate) SymbolIndex);

#[derive(Debug, Clone, Default)]
pub struct SymbolHeapData {
    pub(crate) descriptor: Option<JsString>,
}

impl Symbol {
    /// ### [20.4.3.3.1 SymbolDescriptiveString ( sym )](https://tc39.es/ecma262/#sec-symboldescriptivestring)
    pub fn descriptive_string(self, agent: &Agent) -> JsString {
        // 1. Let desc be sym's [[Description]] value.
        // 2. If desc is undefined, set desc to the empty String.
        let descriptor = agent[self].descriptor.as_deref().unwrap_or("");
        // 4. Return the string-concatenation of "Symbol(", desc, and ")".
        JsString::from(format!("Symbol({descriptor})"))
    }

    pub fn description(self, agent: &Agent) -> Option<JsString> {
        agent[self].descriptor.clone()
    }
}

impl Index<Symbol> for Heap<'_> {
    type Output = SymbolHeapData;

    fn index(&self, index: Symbol) -> &Self::Output {
        self.symbols
            .get(index.0.into_index())
            .expect("Symbol out of bounds")
    }
}

impl Index<Symbol> for Agent<'_> {
    type Output = SymbolHeapData;

    fn index(&self, index: Symbol) -> &Self::Output {
        &self.heap[index]
    }
}

impl CreateHeapData<SymbolHeapData, Symbol> for Heap<'_> {
    fn create(&mut self, data: SymbolHeapData) -> Symbol {
        self.symbols.push(data);
        Symbol(BaseIndex::last(&self.symbols))
    }
}
