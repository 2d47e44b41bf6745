// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::ecmascript::{
    execution::{Agent, Environment},
    scripts_and_modules::precook::{DeclarationFlags, Scope},
    syntax_directed_operations::function_definitions::instantiate_ordinary_function_object,
    types::Value,
};

/// ### [14.2.3 BlockDeclarationInstantiation ( code, env )](https://tc39.es/ecma262/#sec-blockdeclarationinstantiation)
///
/// Function declarations in blocks are bound in the block only.
pub(super) fn block_declaration_instantiation<'a>(
    agent: &mut Agent<'a>,
    scope: &Scope<'a>,
    env: Environment,
) {
    // 1. Let declarations be the LexicallyScopedDeclarations of code.
    // 3. For each element d of declarations, do
    //    a. For each element dn of the BoundNames of d, do
    for (dn, flags) in scope.declarations() {
        if flags.contains(DeclarationFlags::CONST) {
            // i. If IsConstantDeclaration of d is true, then
            //    1. Perform ! env.CreateImmutableBinding(dn, true).
            env.create_immutable_binding(agent, dn, true);
        } else if !env.has_binding(agent, dn) {
            // ii. Else,
            //     1. NOTE: The following step is only reached once per
            //        function declaration name.
            //     2. Perform ! env.CreateMutableBinding(dn, false).
            env.create_mutable_binding(agent, dn, false);
        }
    }
    //    b. If d is either a FunctionDeclaration, a GeneratorDeclaration, an
    //       AsyncFunctionDeclaration, or an AsyncGeneratorDeclaration, then
    for function in scope.functions() {
        // i. Let fn be the sole element of the BoundNames of d.
        let Some(id) = &function.id else {
            continue;
        };
        // ii. Let fo be InstantiateFunctionObject of d with arguments env and privateEnv.
        let fo = instantiate_ordinary_function_object(agent, function, env);
        // iii. Perform ! env.InitializeBinding(fn, fo).
        env.initialize_binding(agent, &id.name, Value::Object(fo));
    }
}
