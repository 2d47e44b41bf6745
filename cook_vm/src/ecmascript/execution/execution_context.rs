// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::{Environment, RealmIdentifier};

/// ### [Table 26: Additional State Components for ECMAScript Code Execution Contexts](https://tc39.es/ecma262/#table-additional-state-components-for-ecmascript-code-execution-contexts)
#[derive(Debug, Clone, Copy)]
pub(crate) struct ECMAScriptCodeEvaluationState {
    /// ### LexicalEnvironment
    ///
    /// Identifies the Environment Record used to resolve identifier
    /// references made by code within this execution context.
    pub(crate) lexical_environment: Environment,
}

/// ### [9.4 Execution Contexts](https://tc39.es/ecma262/#sec-execution-contexts)
///
/// There is no suspension: contexts are pushed on entry to a cook or a
/// function call and popped when that evaluation completes.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ExecutionContext {
    pub(crate) ecmascript_code: ECMAScriptCodeEvaluationState,

    /// ### Realm
    pub(crate) realm: RealmIdentifier,
}
