// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

pub mod agent;
mod environments;
mod execution_context;
mod realm;

pub use agent::{Agent, AgentOptions, Branch, CookHooks, ExceptionType, JsError, JsResult};
pub use environments::{DeclarativeEnvironmentRecord, Environment};
pub(crate) use environments::{OuterEnv, get_identifier_reference, new_declarative_environment};
pub(crate) use execution_context::{ECMAScriptCodeEvaluationState, ExecutionContext};
pub use realm::{Realm, RealmIdentifier};
