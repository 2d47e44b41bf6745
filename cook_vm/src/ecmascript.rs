// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

pub(crate) mod abstract_operations;
pub(crate) mod builders;
pub mod builtins;
pub mod execution;
pub mod scripts_and_modules;
pub(crate) mod syntax_directed_operations;
pub mod types;
