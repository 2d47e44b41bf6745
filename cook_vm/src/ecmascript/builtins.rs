// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

pub(crate) mod array;
mod builtin_function;
pub(crate) mod ecmascript_function;
pub(crate) mod error;
pub(crate) mod fundamental_objects;
pub mod global_object;
pub(crate) mod indexed_collections;
pub(crate) mod intrinsics;
pub(crate) mod numbers_and_dates;
pub(crate) mod text_processing;

pub use array::ArrayHeapData;
pub use builtin_function::{
    ArgumentsList, Behaviour, Builtin, BuiltinFunctionHeapData, ConstructorFn, RegularFn,
};
pub(crate) use builtin_function::create_builtin_function;
pub use ecmascript_function::ECMAScriptFunctionHeapData;
