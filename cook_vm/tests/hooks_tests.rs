// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::{cell::RefCell, rc::Rc};

use cook_vm::{
    Agent, AgentOptions, Branch, CookHooks, CookOptions, PrecookFunctionOptions, PrecookRoot,
    Value, cook, invoke, precook_function,
};
use oxc_allocator::Allocator;
use oxc_ast::{
    AstKind,
    ast::{Function, IfStatement},
};

#[derive(Debug, Default)]
struct Recorder {
    events: RefCell<Vec<String>>,
}

impl Recorder {
    fn take(&self) -> Vec<String> {
        self.events.take()
    }
}

fn node_name(node: AstKind) -> &'static str {
    match node {
        AstKind::Function(_) => "Function",
        AstKind::TryStatement(_) => "TryStatement",
        AstKind::BlockStatement(_) => "BlockStatement",
        AstKind::IfStatement(_) => "IfStatement",
        AstKind::ReturnStatement(_) => "ReturnStatement",
        AstKind::ThrowStatement(_) => "ThrowStatement",
        AstKind::CatchClause(_) => "CatchClause",
        AstKind::ConditionalExpression(_) => "ConditionalExpression",
        AstKind::BinaryExpression(_) => "BinaryExpression",
        AstKind::IdentifierReference(_) => "Identifier",
        AstKind::NumericLiteral(_)
        | AstKind::BooleanLiteral(_)
        | AstKind::StringLiteral(_)
        | AstKind::NullLiteral(_) => "Literal",
        _ => "Other",
    }
}

impl CookHooks for Recorder {
    fn before_evaluate(&self, node: AstKind<'_>) {
        self.events.borrow_mut().push(node_name(node).to_owned());
    }

    fn before_call(&self, node: &Function<'_>) {
        let name = node.id.as_ref().map_or("anonymous", |id| id.name.as_str());
        self.events.borrow_mut().push(format!("call {name}"));
    }

    fn before_branch(&self, _node: &IfStatement<'_>, branch: Branch) {
        let branch = match branch {
            Branch::If => "if",
            Branch::Else => "else",
        };
        self.events.borrow_mut().push(format!("branch {branch}"));
    }
}

const SOURCE: &str = "function test(a) {
    try {
        if (a) {
            return a > 0 ? true : false;
        }
        throw 'oops';
    } catch (e) {
        return null;
    }
}";

#[test]
fn hooks_observe_evaluation() {
    let allocator = Allocator::default();
    let precooked = precook_function(&allocator, SOURCE, PrecookFunctionOptions::default())
        .expect("source should precook");
    let recorder = Rc::new(Recorder::default());
    let mut agent = Agent::new(AgentOptions::default());
    let function = cook(
        &mut agent,
        PrecookRoot::Function(precooked.function),
        &precooked.source,
        CookOptions {
            hooks: Some(recorder.clone()),
            ..Default::default()
        },
    )
    .expect("function should cook");
    assert_eq!(recorder.take(), ["Function"]);

    let result = invoke(&mut agent, &function, &[Value::from(1)]);
    assert_eq!(result, Ok(Value::Boolean(true)));
    assert_eq!(
        recorder.take(),
        [
            "call test",
            "TryStatement",
            "BlockStatement",
            "IfStatement",
            "Identifier",
            "branch if",
            "BlockStatement",
            "ReturnStatement",
            "ConditionalExpression",
            "BinaryExpression",
            "Identifier",
            "Literal",
            "Literal",
        ]
    );

    let result = invoke(&mut agent, &function, &[Value::from(0)]);
    assert_eq!(result, Ok(Value::Null));
    assert_eq!(
        recorder.take(),
        [
            "call test",
            "TryStatement",
            "BlockStatement",
            "IfStatement",
            "Identifier",
            "branch else",
            "ThrowStatement",
            "Literal",
            "CatchClause",
            "BlockStatement",
            "ReturnStatement",
            "Literal",
        ]
    );
}

#[test]
fn arrow_functions_do_not_fire_before_call() {
    let allocator = Allocator::default();
    let precooked = precook_function(
        &allocator,
        "function outer() { const inner = () => 1; return inner() }",
        PrecookFunctionOptions::default(),
    )
    .expect("source should precook");
    let recorder = Rc::new(Recorder::default());
    let mut agent = Agent::new(AgentOptions::default());
    let function = cook(
        &mut agent,
        PrecookRoot::Function(precooked.function),
        &precooked.source,
        CookOptions {
            hooks: Some(recorder.clone()),
            ..Default::default()
        },
    )
    .expect("function should cook");
    recorder.take();

    invoke(&mut agent, &function, &[]).expect("call should succeed");
    let calls = recorder
        .take()
        .into_iter()
        .filter(|event| event.starts_with("call "))
        .collect::<Vec<_>>();
    assert_eq!(calls, ["call outer"]);
}
