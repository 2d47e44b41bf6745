// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ### [9.7 Agents](https://tc39.es/ecma262/#sec-agents)

use ahash::{AHashMap, AHashSet};
use oxc_ast::{
    AstKind,
    ast::{Function, IfStatement},
};

use super::{Environment, ExecutionContext, RealmIdentifier, get_identifier_reference};
use crate::{
    ecmascript::{
        builtins::error::create_error_object,
        types::{JsString, Object, ObjectKind, Reference, Symbol, SymbolHeapData, Value},
    },
    heap::{CreateHeapData, Heap},
};

#[derive(Debug, Default, Clone, Copy)]
pub struct AgentOptions {
    /// Trace supplied globals, function calls and uncaught errors to stderr.
    pub print_internals: bool,
}

pub type JsResult<T> = std::result::Result<T, JsError>;

/// A thrown ECMAScript value travelling up the host stack.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct JsError(pub(crate) Value);

impl JsError {
    pub(crate) fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    /// Renders the thrown value the way an uncaught error is reported:
    /// error objects as `Name: message`, strings verbatim.
    pub fn to_display_string(&self, agent: &Agent) -> String {
        match &self.0 {
            Value::String(message) => message.to_string(),
            value => value.string_repr(agent),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExceptionType {
    Error,
    EvalError,
    RangeError,
    ReferenceError,
    SyntaxError,
    TypeError,
    UriError,
}

impl ExceptionType {
    pub fn name(self) -> &'static str {
        match self {
            ExceptionType::Error => "Error",
            ExceptionType::EvalError => "EvalError",
            ExceptionType::RangeError => "RangeError",
            ExceptionType::ReferenceError => "ReferenceError",
            ExceptionType::SyntaxError => "SyntaxError",
            ExceptionType::TypeError => "TypeError",
            ExceptionType::UriError => "URIError",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "Error" => ExceptionType::Error,
            "EvalError" => ExceptionType::EvalError,
            "RangeError" => ExceptionType::RangeError,
            "ReferenceError" => ExceptionType::ReferenceError,
            "SyntaxError" => ExceptionType::SyntaxError,
            "TypeError" => ExceptionType::TypeError,
            "URIError" => ExceptionType::UriError,
            _ => return None,
        })
    }
}

/// Which arm of an `if` statement was taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Branch {
    If,
    Else,
}

/// Observation points an embedder can use to trace evaluation, for example
/// to build coverage reports of user code.
pub trait CookHooks: std::fmt::Debug {
    /// Called before a statement, expression or catch clause is evaluated.
    fn before_evaluate(&self, _node: AstKind<'_>) {}

    /// Called before the body of an ECMAScript function is entered.
    fn before_call(&self, _node: &Function<'_>) {}

    /// Called once per `if` statement with the branch that is about to run.
    fn before_branch(&self, _node: &IfStatement<'_>, _branch: Branch) {}
}

/// ### [9.7 Agents](https://tc39.es/ecma262/#sec-agents)
///
/// Owns the heap of every value created while cooking. Values of one agent
/// must not be passed to another.
#[derive(Debug)]
pub struct Agent<'a> {
    pub(crate) heap: Heap<'a>,
    pub(crate) options: AgentOptions,
    pub(crate) execution_context_stack: Vec<ExecutionContext>,
    /// Intrinsic methods are allocated on first access and then reused, so
    /// that `[].push === [].push`.
    pub(crate) intrinsic_functions: AHashMap<(&'static str, &'static str), Object>,
    /// Arrays with a join in progress. Joining one of them again yields the
    /// empty string.
    pub(crate) join_stack: AHashSet<Object>,
}

impl<'a> Agent<'a> {
    pub fn new(options: AgentOptions) -> Self {
        Self {
            heap: Heap::default(),
            options,
            execution_context_stack: Vec::new(),
            intrinsic_functions: AHashMap::default(),
            join_stack: AHashSet::default(),
        }
    }

    pub fn options(&self) -> &AgentOptions {
        &self.options
    }

    /// Number of environment records currently alive in the heap.
    pub fn environment_count(&self) -> usize {
        self.heap.live_environments()
    }

    /// Creates a new error object of the given type and returns it as a
    /// thrown value.
    pub fn throw_exception(&mut self, kind: ExceptionType, message: String) -> JsError {
        let error = create_error_object(self, kind, Some(JsString::from(message)));
        JsError::new(Value::Object(error))
    }

    pub fn throw_exception_with_static_message(
        &mut self,
        kind: ExceptionType,
        message: &'static str,
    ) -> JsError {
        let error = create_error_object(self, kind, Some(JsString::from(message)));
        JsError::new(Value::Object(error))
    }

    /// The native error type of a thrown value, if it is an error object.
    pub fn exception_type(&self, error: &JsError) -> Option<ExceptionType> {
        match error.value() {
            Value::Object(object) => match self[*object].kind {
                ObjectKind::Error(kind) => Some(kind),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn create_symbol(&mut self, description: Option<&str>) -> Symbol {
        self.heap.create(SymbolHeapData {
            descriptor: description.map(JsString::from),
        })
    }

    pub(crate) fn running_execution_context(&self) -> &ExecutionContext {
        self.execution_context_stack
            .last()
            .expect("No running execution context")
    }

    pub(crate) fn running_execution_context_mut(&mut self) -> &mut ExecutionContext {
        self.execution_context_stack
            .last_mut()
            .expect("No running execution context")
    }

    /// ### [current Realm Record](https://tc39.es/ecma262/#current-realm)
    pub(crate) fn current_realm_id(&self) -> RealmIdentifier {
        self.running_execution_context().realm
    }

    pub(crate) fn current_lexical_environment(&self) -> Environment {
        self.running_execution_context()
            .ecmascript_code
            .lexical_environment
    }

    pub(crate) fn set_current_lexical_environment(&mut self, env: Environment) {
        self.running_execution_context_mut()
            .ecmascript_code
            .lexical_environment = env;
    }

    /// ### [9.4.2 ResolveBinding ( name \[ , env \] )](https://tc39.es/ecma262/#sec-resolvebinding)
    pub(crate) fn resolve_binding(&self, name: &str, env: Option<Environment>) -> Reference {
        // 1. If env is not present or env is undefined, then
        //    a. Set env to the running execution context's LexicalEnvironment.
        let env = env.unwrap_or_else(|| self.current_lexical_environment());
        // 3. If the source text matched by the syntactic production that is
        //    being evaluated is contained in strict mode code, let strict be
        //    true; else let strict be false.
        // 4. Return ? GetIdentifierReference(env, name, strict).
        get_identifier_reference(self, Some(env), name, true)
    }
}
