// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

mod completion_record;
mod property_descriptor;
mod reference;

pub(crate) use completion_record::{CompletionRecord, CompletionType};
pub use property_descriptor::PropertyDescriptor;
pub(crate) use reference::{Base, Reference, get_value, initialize_referenced_binding, put_value};
