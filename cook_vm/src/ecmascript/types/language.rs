// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

mod object;
mod property_key;
mod string;
mod symbol;
mod value;

pub use object::{Object, ObjectHeapData};
pub(crate) use object::{ObjectKind, ObjectProperty};
pub use property_key::PropertyKey;
pub use string::JsString;
pub(crate) use string::find_code_units;
pub use symbol::{Symbol, SymbolHeapData};
pub use value::Value;
