// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

mod evaluator;

pub(crate) use evaluator::{
    Evaluate, before_evaluate, evaluate_statement_list, function_declaration_instantiation,
};
