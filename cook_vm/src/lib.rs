// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Sandboxed evaluation of a restricted JavaScript subset.
//!
//! Code is first *precooked*: parsed and statically analyzed, which rejects
//! unsupported syntax and collects the free variables it reads. It is then
//! *cooked*: evaluated in a fresh realm whose only globals are the values
//! the embedder supplies for those free variables.

pub mod ecmascript;
mod engine;
mod heap;

pub use ecmascript::{
    builtins::global_object::standard_globals,
    execution::{Agent, AgentOptions, Branch, CookHooks, ExceptionType, JsError, JsResult},
    scripts_and_modules::{
        cook::{CookOptions, cook, invoke, supply},
        precook::{
            PrecookFunctionOptions, PrecookOptions, PrecookResult, PrecookRoot, PrecookedFunction,
            Rules, precook, precook_function,
        },
        preevaluate::{
            PreevaluateOptions, PreevaluateResult, is_evaluable, preevaluate,
            should_allow_recursive_evaluations,
        },
        source_code::{ParsedExpression, ParsedFunction, SourceCode, parse_expression, parse_function},
    },
    types::{JsString, Object, PropertyKey, Value},
};
