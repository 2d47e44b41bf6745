// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Utilities for the cook cli program.
//!
//! > [!IMPORTANT]
//! > This library is currently mainly aimed at internal use and might not
//! > adhere to semver versioning.

mod fmt;

pub use fmt::{exit_with_parse_errors, print_result, print_warnings};

use cook_vm::{
    Agent, AgentOptions, CookOptions, JsResult, PrecookFunctionOptions, PrecookRoot,
    PreevaluateOptions, Rules, Value, cook, invoke, parse_expression, precook_function,
    preevaluate, standard_globals,
};
use oxc_allocator::Allocator;
use oxc_diagnostics::OxcDiagnostic;

#[derive(Debug, Default, Clone, Copy)]
pub struct InstanceConfig {
    /// Whether to trace supplied globals, calls and uncaught errors. Default `false`.
    pub verbose: bool,
    /// Whether sources are TypeScript. Default `false`.
    pub typescript: bool,
    /// Whether `var` declarations are rejected. Default `false`.
    pub no_var: bool,
}

/// An agent together with the globals every cook of this instance sees.
///
/// Sources are copied into `allocator`, which must outlive the instance:
/// functions created by one evaluation stay callable from the next.
pub struct Instance<'a> {
    config: InstanceConfig,
    allocator: &'a Allocator,
    agent: Agent<'a>,
    globals: Vec<(String, Value)>,
}

/// Static errors of a source, and the source text they point into.
pub type ParseFailure<'a> = (Vec<OxcDiagnostic>, &'a str);

impl<'a> Instance<'a> {
    pub fn new(allocator: &'a Allocator, config: InstanceConfig) -> Self {
        let mut agent = Agent::new(AgentOptions {
            print_internals: config.verbose,
        });
        let globals = standard_globals(&mut agent)
            .into_iter()
            .map(|(name, value)| (name.to_owned(), value))
            .collect();
        Self {
            config,
            allocator,
            agent,
            globals,
        }
    }

    pub fn config(&self) -> &InstanceConfig {
        &self.config
    }

    pub fn agent(&self) -> &Agent<'a> {
        &self.agent
    }

    fn cook_options(&self) -> CookOptions {
        CookOptions {
            rules: self.rules(),
            global_variables: self.globals.clone(),
            hooks: None,
        }
    }

    fn rules(&self) -> Rules {
        Rules {
            no_var: self.config.no_var,
        }
    }

    /// Cooks a source holding one function declaration and returns the
    /// function object.
    pub fn cook_function(
        &mut self,
        path: &str,
        source_text: &str,
    ) -> Result<JsResult<Value>, ParseFailure<'a>> {
        let source_text: &'a str = self.allocator.alloc_str(source_text);
        let precooked = precook_function(
            self.allocator,
            source_text,
            PrecookFunctionOptions {
                typescript: self.config.typescript,
                rules: self.rules(),
            },
        )
        .map_err(|errors| (errors, source_text))?;
        print_warnings(precooked.precooked.warnings, path, source_text);
        let options = self.cook_options();
        Ok(cook(
            &mut self.agent,
            PrecookRoot::Function(precooked.function),
            &precooked.source,
            options,
        ))
    }

    /// Cooks a plain expression.
    pub fn evaluate_expression(
        &mut self,
        source_text: &str,
    ) -> Result<JsResult<Value>, ParseFailure<'a>> {
        let source_text: &'a str = self.allocator.alloc_str(source_text);
        let parsed = parse_expression(self.allocator, source_text, self.config.typescript)
            .map_err(|errors| (errors, source_text))?;
        let options = self.cook_options();
        Ok(cook(
            &mut self.agent,
            PrecookRoot::Expression(parsed.expression),
            &parsed.source,
            options,
        ))
    }

    /// Cooks an expression wrapped in `<% %>`.
    pub fn evaluate_template(&mut self, raw: &str) -> Result<JsResult<Value>, ParseFailure<'a>> {
        let raw: &'a str = self.allocator.alloc_str(raw);
        let preevaluated = preevaluate(
            self.allocator,
            raw,
            PreevaluateOptions {
                typescript: self.config.typescript,
            },
        )
        .map_err(|errors| (errors, raw))?;
        let options = self.cook_options();
        Ok(cook(
            &mut self.agent,
            PrecookRoot::Expression(preevaluated.expression),
            &preevaluated.source,
            options,
        ))
    }

    pub fn call(&mut self, function: &Value, arguments: &[Value]) -> JsResult<Value> {
        invoke(&mut self.agent, function, arguments)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn cooked_functions_see_the_standard_globals() {
        let allocator = Allocator::default();
        let mut instance = Instance::new(&allocator, InstanceConfig::default());
        let function = instance
            .cook_function("test.js", "function f(a) { return Math.max(a, 2) }")
            .expect("source should precook")
            .expect("function should cook");
        let result = instance.call(&function, &[Value::from(5)]);
        assert_eq!(result, Ok(Value::from(5)));
    }

    #[test]
    fn no_var_is_reported_statically() {
        let allocator = Allocator::default();
        let mut instance = Instance::new(
            &allocator,
            InstanceConfig {
                no_var: true,
                ..Default::default()
            },
        );
        let Err((errors, _)) = instance.cook_function("test.js", "function f() { var a; }") else {
            panic!("var should be rejected");
        };
        assert_eq!(
            errors[0].message,
            "Var declaration is not recommended, use `let` or `const` instead"
        );
    }

    #[test]
    fn templates_are_unwrapped() {
        let allocator = Allocator::default();
        let mut instance = Instance::new(&allocator, InstanceConfig::default());
        let result = instance
            .evaluate_template("<% [1, 2, 3].length |> String %>")
            .expect("template should precook");
        assert_eq!(result, Ok(Value::from("3")));
    }
}
