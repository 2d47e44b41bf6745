// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

mod language;
mod spec;

pub use language::{JsString, Object, ObjectHeapData, PropertyKey, Symbol, SymbolHeapData, Value};
pub(crate) use language::{ObjectKind, ObjectProperty, find_code_units};
pub use spec::PropertyDescriptor;
pub(crate) use spec::{
    Base, CompletionRecord, CompletionType, Reference, get_value, initialize_referenced_binding,
    put_value,
};
