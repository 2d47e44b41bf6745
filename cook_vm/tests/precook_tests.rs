// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use cook_vm::{
    Agent, AgentOptions, CookOptions, ExceptionType, PrecookFunctionOptions, PrecookRoot,
    PreevaluateOptions, Rules, Value, cook, invoke, parse_expression, parse_function,
    precook_function, preevaluate, standard_globals,
};
use oxc_allocator::Allocator;

fn messages(errors: &[oxc_diagnostics::OxcDiagnostic]) -> Vec<String> {
    errors.iter().map(|error| error.message.to_string()).collect()
}

#[test]
fn no_var_rule_fails_before_evaluation() {
    let allocator = Allocator::default();
    let source = "function f() { var a = 1; return a }";
    let errors = precook_function(
        &allocator,
        source,
        PrecookFunctionOptions {
            rules: Rules { no_var: true },
            ..Default::default()
        },
    )
    .expect_err("var should be rejected");
    assert_eq!(
        messages(&errors),
        ["Var declaration is not recommended, use `let` or `const` instead"]
    );

    // The same rule applies when cooking a parsed function directly.
    let parsed = parse_function(&allocator, source, false).expect("source should parse");
    let mut agent = Agent::new(AgentOptions::default());
    let error = cook(
        &mut agent,
        PrecookRoot::Function(parsed.function),
        &parsed.source,
        CookOptions {
            rules: Rules { no_var: true },
            ..Default::default()
        },
    )
    .expect_err("var should be rejected");
    assert_eq!(agent.exception_type(&error), Some(ExceptionType::SyntaxError));
    assert!(
        error.to_display_string(&agent).starts_with(
            "SyntaxError: Var declaration is not recommended, use `let` or `const` instead: `var a = 1"
        )
    );
}

/// Cooks a parsed function and renders the SyntaxError it is rejected with.
fn cook_error(source: &str) -> String {
    let allocator = Allocator::default();
    let parsed = parse_function(&allocator, source, false).expect("source should parse");
    let mut agent = Agent::new(AgentOptions::default());
    let error = cook(
        &mut agent,
        PrecookRoot::Function(parsed.function),
        &parsed.source,
        CookOptions::default(),
    )
    .expect_err("source should be rejected");
    assert_eq!(agent.exception_type(&error), Some(ExceptionType::SyntaxError));
    error.to_display_string(&agent)
}

#[test]
fn cook_errors_quote_the_rejected_source() {
    assert_eq!(
        cook_error("async function f() { return 1 }"),
        "SyntaxError: Async function is not allowed: `async function f() { return 1 }`"
    );
    assert_eq!(
        cook_error("function f() { return function* () {} }"),
        "SyntaxError: Generator function is not allowed: `function* () {}`"
    );
}

#[test]
fn async_functions_are_rejected() {
    let allocator = Allocator::default();
    let errors = precook_function(
        &allocator,
        "async function f() { return 1 }",
        PrecookFunctionOptions::default(),
    )
    .expect_err("async should be rejected");
    assert_eq!(messages(&errors), ["Async function is not allowed"]);
}

#[test]
fn generator_functions_are_rejected() {
    let allocator = Allocator::default();
    let errors = precook_function(
        &allocator,
        "function f() { return function* () {} }",
        PrecookFunctionOptions::default(),
    )
    .expect_err("generators should be rejected");
    assert_eq!(messages(&errors), ["Generator function is not allowed"]);
}

#[test]
fn sources_must_hold_one_function() {
    let allocator = Allocator::default();
    let errors = precook_function(&allocator, "", PrecookFunctionOptions::default())
        .expect_err("empty source should be rejected");
    assert_eq!(messages(&errors), ["Function declaration not found"]);

    let errors = precook_function(
        &allocator,
        "function f() {} f();",
        PrecookFunctionOptions::default(),
    )
    .expect_err("extra statements should be rejected");
    assert_eq!(
        messages(&errors),
        ["Expect a single function declaration, but received: \"FunctionDeclaration\", \"ExpressionStatement\""]
    );
}

#[test]
fn typescript_annotations_are_stripped() {
    let allocator = Allocator::default();
    let precooked = precook_function(
        &allocator,
        "type Suffix = string;
        interface Options { suffix: Suffix }
        function f(a: number, options?: Options): string {
            type Local = number;
            const b = a as Local;
            const suffix = (options ?? { suffix: '?' })!.suffix satisfies Suffix;
            return String(b) + suffix;
        }",
        PrecookFunctionOptions {
            typescript: true,
            ..Default::default()
        },
    )
    .expect("source should precook");
    assert_eq!(precooked.precooked.free_variables, ["String"]);

    let mut agent = Agent::new(AgentOptions::default());
    let global_variables = standard_globals(&mut agent)
        .into_iter()
        .map(|(name, value)| (name.to_owned(), value))
        .collect();
    let function = cook(
        &mut agent,
        PrecookRoot::Function(precooked.function),
        &precooked.source,
        CookOptions {
            global_variables,
            ..Default::default()
        },
    )
    .expect("function should cook");
    let result = invoke(&mut agent, &function, &[Value::from(3)]);
    assert_eq!(result, Ok(Value::from("3?")));
}

#[test]
fn typescript_enums_are_rejected() {
    let allocator = Allocator::default();
    let errors = precook_function(
        &allocator,
        "enum Color { Red } function f() {}",
        PrecookFunctionOptions {
            typescript: true,
            ..Default::default()
        },
    )
    .expect_err("enums should be rejected");
    assert_eq!(
        messages(&errors),
        ["Unsupported TypeScript syntax: TSEnumDeclaration"]
    );
}

#[test]
fn preevaluated_expressions_cook() {
    let allocator = Allocator::default();
    let preevaluated = preevaluate(
        &allocator,
        "<%~ DATA.items.filter(item => item > 1) |> (list => list.length) %>",
        PreevaluateOptions::default(),
    )
    .expect("expression should precook");
    assert_eq!(preevaluated.precooked.free_variables, ["DATA"]);

    let mut agent = Agent::new(AgentOptions::default());
    let parsed = parse_expression(&allocator, "({ items: [1, 2, 3] })", false)
        .expect("data should parse");
    let data = cook(
        &mut agent,
        PrecookRoot::Expression(parsed.expression),
        &parsed.source,
        CookOptions::default(),
    )
    .expect("data should cook");
    let result = cook(
        &mut agent,
        PrecookRoot::Expression(preevaluated.expression),
        &preevaluated.source,
        CookOptions {
            global_variables: vec![("DATA".to_owned(), data)],
            ..Default::default()
        },
    );
    assert_eq!(result, Ok(Value::from(2)));
}
