// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

pub(crate) mod function_definitions;
mod miscellaneous;
pub(crate) mod scope_analysis;

pub(crate) use miscellaneous::{expression_type_name, statement_kind, statement_type_name};
