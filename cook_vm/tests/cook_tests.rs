// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use cook_vm::{
    Agent, AgentOptions, CookOptions, ExceptionType, PrecookFunctionOptions, PrecookRoot, Value,
    cook, invoke, parse_expression, precook_function, standard_globals,
};
use oxc_allocator::Allocator;

/// Cooks `source` with the standard globals, calls it with `arguments` and
/// renders the result or the thrown error.
fn call_cooked(source: &str, arguments: &[Value]) -> Result<String, String> {
    let allocator = Allocator::default();
    let precooked = precook_function(&allocator, source, PrecookFunctionOptions::default())
        .unwrap_or_else(|errors| panic!("{source} should precook: {errors:?}"));
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
    .unwrap_or_else(|error| panic!("{source} should cook: {}", error.to_display_string(&agent)));
    invoke(&mut agent, &function, arguments)
        .map(|value| value.string_repr(&agent))
        .map_err(|error| error.to_display_string(&agent))
}

fn evaluate_expression(
    source: &str,
    global_variables: Vec<(String, Value)>,
) -> Result<String, String> {
    let allocator = Allocator::default();
    let parsed = parse_expression(&allocator, source, false)
        .unwrap_or_else(|errors| panic!("{source} should parse: {errors:?}"));
    let mut agent = Agent::new(AgentOptions::default());
    cook(
        &mut agent,
        PrecookRoot::Expression(parsed.expression),
        &parsed.source,
        CookOptions {
            global_variables,
            ..Default::default()
        },
    )
    .map(|value| value.string_repr(&agent))
    .map_err(|error| error.to_display_string(&agent))
}

#[test]
fn function_declarations_win_over_uninitialized_vars() {
    let result = call_cooked(
        "function f() { var a; function a() {} return typeof a }",
        &[],
    );
    assert_eq!(result.as_deref(), Ok("\"function\""));
}

#[test]
fn var_initializers_overwrite_hoisted_functions() {
    let result = call_cooked(
        "function f() { var a = 'A'; function a() {} return typeof a }",
        &[],
    );
    assert_eq!(result.as_deref(), Ok("\"string\""));
}

#[test]
fn lexical_bindings_have_a_temporal_dead_zone() {
    let result = call_cooked(
        "function f() { let a = typeof b; let b; return a }",
        &[],
    );
    assert_eq!(
        result,
        Err("ReferenceError: Cannot access 'b' before initialization".to_owned())
    );
}

#[test]
fn let_bindings_are_captured_per_iteration() {
    let result = call_cooked(
        "function f() {
            const results = [];
            for (let i of [1, 2]) results.push(() => i);
            return results.map(fn => fn());
        }",
        &[],
    );
    assert_eq!(result.as_deref(), Ok("[1, 2]"));
}

#[test]
fn var_bindings_are_shared_between_iterations() {
    let result = call_cooked(
        "function f() {
            const results = [];
            for (var i of [1, 2]) results.push(() => i);
            return results.map(fn => fn());
        }",
        &[],
    );
    assert_eq!(result.as_deref(), Ok("[2, 2]"));
}

#[test]
fn classic_for_loops_copy_let_bindings() {
    let result = call_cooked(
        "function f() {
            const results = [];
            for (let i = 0; i < 3; i++) results.push(() => i);
            return results.map(fn => fn());
        }",
        &[],
    );
    assert_eq!(result.as_deref(), Ok("[0, 1, 2]"));
}

const SWITCH_SOURCE: &str = "function f(input) {
    let output = '';
    switch (input) {
        case 1:
            output += 'A';
            break;
        default:
            output += 'C';
        case 2:
            output += 'B';
        case 4:
            output += 'D';
            break;
        case 5:
            output += 'E';
    }
    return output;
}";

#[test]
fn switch_falls_through_from_default() {
    let result = call_cooked(SWITCH_SOURCE, &[Value::from(3)]);
    assert_eq!(result.as_deref(), Ok("\"CBD\""));
}

#[test]
fn switch_selects_cases_after_default() {
    let result = call_cooked(SWITCH_SOURCE, &[Value::from(5)]);
    assert_eq!(result.as_deref(), Ok("\"E\""));
}

#[test]
fn object_rest_collects_remaining_properties() {
    let result = call_cooked(
        "function f() { const { a, ...rest } = { a: 1, b: 2, c: 3 }; return [a, rest] }",
        &[],
    );
    assert_eq!(result.as_deref(), Ok("[1, { b: 2, c: 3 }]"));
}

#[test]
fn array_patterns_support_holes_defaults_and_rest() {
    let result = call_cooked(
        "function f([first, , third = 3, ...others], { x: { y } = { y: 'y' } } = {}) {
            return [first, third, others, y];
        }",
        &[],
    );
    assert_eq!(
        result,
        Err("TypeError: undefined is not iterable".to_owned())
    );
    let result = call_cooked(
        "function f() {
            const [first, , third = 3, ...others] = [1, 2, undefined, 4, 5];
            let y;
            ({ x: { y } = { y: 'y' } } = {});
            return [first, third, others, y];
        }",
        &[],
    );
    assert_eq!(result.as_deref(), Ok("[1, 3, [4, 5], \"y\"]"));
}

#[test]
fn destructuring_nullish_values_throws() {
    let result = call_cooked("function f() { const { a } = null; return a }", &[]);
    assert!(result.is_err_and(|error| error.starts_with("TypeError: ")));
}

#[test]
fn typeof_of_a_missing_global_is_undefined() {
    let result = call_cooked("function f() { return typeof missing }", &[]);
    assert_eq!(result.as_deref(), Ok("\"undefined\""));
}

#[test]
fn reading_a_missing_global_throws() {
    let result = call_cooked("function f() { return missing }", &[]);
    assert_eq!(
        result,
        Err("ReferenceError: missing is not defined".to_owned())
    );
}

#[test]
fn assigning_a_missing_global_throws() {
    let result = call_cooked("function f() { missing = 1 }", &[]);
    assert_eq!(
        result,
        Err("ReferenceError: missing is not defined".to_owned())
    );
}

#[test]
fn throw_in_finally_overrides_return() {
    let result = call_cooked(
        "function f() { try { return 1 } finally { throw new Error('oops') } }",
        &[],
    );
    assert_eq!(result, Err("Error: oops".to_owned()));
}

#[test]
fn return_in_finally_overrides_throw() {
    let result = call_cooked(
        "function f() { try { throw 1 } finally { return 2 } }",
        &[],
    );
    assert_eq!(result.as_deref(), Ok("2"));
}

#[test]
fn caught_errors_are_bound_to_the_parameter() {
    let result = call_cooked(
        "function f() {
            try {
                null.a;
            } catch ({ message }) {
                return message;
            }
        }",
        &[],
    );
    assert_eq!(
        result.as_deref(),
        Ok("\"Cannot read properties of null (reading 'a')\"")
    );
}

#[test]
fn uncaught_throws_reach_the_caller() {
    let allocator = Allocator::default();
    let precooked = precook_function(
        &allocator,
        "function f() { throw new TypeError('bad') }",
        PrecookFunctionOptions::default(),
    )
    .expect("source should precook");
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
    let error = invoke(&mut agent, &function, &[]).expect_err("call should throw");
    assert_eq!(agent.exception_type(&error), Some(ExceptionType::TypeError));
}

#[test]
fn the_root_function_can_call_itself() {
    let result = call_cooked(
        "function fib(n) { return n < 2 ? n : fib(n - 1) + fib(n - 2) }",
        &[Value::from(10)],
    );
    assert_eq!(result.as_deref(), Ok("55"));
}

#[test]
fn the_root_function_name_is_immutable() {
    let result = call_cooked("function f() { f = 1 }", &[]);
    assert_eq!(
        result,
        Err("TypeError: Assignment to constant variable 'f'".to_owned())
    );
}

#[test]
fn pipelines_call_the_right_operand() {
    let result = call_cooked(
        "function f(a) { const double = x => x * 2; return a |> double |> String }",
        &[Value::from(4)],
    );
    assert_eq!(result.as_deref(), Ok("\"8\""));
}

#[test]
fn pipelines_reject_non_callable_operands() {
    let result = call_cooked("function f(a) { return 1 |> a }", &[Value::from(2)]);
    assert_eq!(result, Err("TypeError: a is not a function".to_owned()));
}

#[test]
fn logical_or_is_not_a_pipeline() {
    let result = call_cooked("function f(a) { return a || 'fallback' }", &[Value::Null]);
    assert_eq!(result.as_deref(), Ok("\"fallback\""));
}

#[test]
fn template_objects_are_cached_per_site() {
    let result = call_cooked(
        "function f() {
            const tag = strings => strings;
            const get = () => tag`a${1}b`;
            const other = tag`a${1}b`;
            return [get() === get(), get() === other, Object.isFrozen(get()), get().raw[0]];
        }",
        &[],
    );
    assert_eq!(result.as_deref(), Ok("[true, false, true, \"a\"]"));
}

#[test]
fn tagged_templates_receive_substitutions() {
    let result = call_cooked(
        "function f() {
            const tag = (strings, ...values) => strings.join('|') + values.join(',');
            return tag`x${1}y${2}z`;
        }",
        &[],
    );
    assert_eq!(result.as_deref(), Ok("\"x|y|z1,2\""));
}

#[test]
fn untagged_templates_concatenate() {
    let result = call_cooked("function f(a) { return `a${a}b${[1, 2]}` }", &[Value::from(1)]);
    assert_eq!(result.as_deref(), Ok("\"a1b1,2\""));
}

#[test]
fn optional_chains_short_circuit() {
    let result = call_cooked(
        "function f(o) { return [o?.a, o?.a.b, o?.f?.(), typeof o?.missing] }",
        &[Value::Null],
    );
    assert_eq!(
        result.as_deref(),
        Ok("[undefined, undefined, undefined, \"undefined\"]")
    );
}

#[test]
fn optional_chains_continue_on_values() {
    let result = call_cooked(
        "function f() {
            const o = { a: { b: 1 }, f: () => 2 };
            return [o.x?.y, o.a?.b, o.f?.(), o.g?.(), o?.['a']?.b];
        }",
        &[],
    );
    assert_eq!(result.as_deref(), Ok("[undefined, 1, 2, undefined, 1]"));
}

#[test]
fn for_in_enumerates_own_keys() {
    let result = call_cooked(
        "function f() {
            const keys = [];
            for (const k in { a: 1, b: 2 }) keys.push(k);
            for (const k in null) keys.push(k);
            for (const k in 'hi') keys.push(k);
            return keys.join(',');
        }",
        &[],
    );
    assert_eq!(result.as_deref(), Ok("\"a,b,0,1\""));
}

#[test]
fn for_of_iterates_arrays_and_strings() {
    let result = call_cooked(
        "function f() {
            let s = '';
            for (const c of 'hi') s += c;
            let sum = 0;
            for (const [x, y] of [[1, 2], [3, 4]]) sum += x * y;
            const out = [];
            for (const n of [1, 2, 3, 4]) {
                if (n === 2) continue;
                if (n === 4) break;
                out.push(n);
            }
            return [s, sum, out];
        }",
        &[],
    );
    assert_eq!(result.as_deref(), Ok("[\"hi\", 14, [1, 3]]"));
}

#[test]
fn for_of_assigns_existing_targets() {
    let result = call_cooked(
        "function f() {
            const o = {};
            let last;
            for (last of [1, 2]) {}
            for (o.value of ['a', 'b']) {}
            return [last, o.value];
        }",
        &[],
    );
    assert_eq!(result.as_deref(), Ok("[2, \"b\"]"));
}

#[test]
fn for_of_rejects_non_iterables() {
    let result = call_cooked("function f() { for (const x of 1) {} }", &[]);
    assert_eq!(result, Err("TypeError: 1 is not iterable".to_owned()));
}

#[test]
fn while_and_do_while_loops() {
    let result = call_cooked(
        "function f() {
            let i = 0;
            while (i < 5) i++;
            let j = 10;
            do { j++ } while (false);
            return [i, j];
        }",
        &[],
    );
    assert_eq!(result.as_deref(), Ok("[5, 11]"));
}

#[test]
fn closures_share_their_environment() {
    let result = call_cooked(
        "function f() {
            function counter() {
                let count = 0;
                return { inc: () => ++count, get: () => count };
            }
            const c = counter();
            c.inc();
            c.inc();
            return c.get();
        }",
        &[],
    );
    assert_eq!(result.as_deref(), Ok("2"));
}

#[test]
fn default_parameters_see_earlier_parameters() {
    let result = call_cooked(
        "function f(a, b = a + 1, { c } = { c: b * 2 }) { return [a, b, c] }",
        &[Value::from(1)],
    );
    assert_eq!(result.as_deref(), Ok("[1, 2, 4]"));
}

#[test]
fn rest_parameters_collect_arguments() {
    let result = call_cooked(
        "function f(first, ...rest) { return [first, rest] }",
        &[Value::from(1), Value::from(2), Value::from(3)],
    );
    assert_eq!(result.as_deref(), Ok("[1, [2, 3]]"));
}

#[test]
fn spread_in_arrays_objects_and_calls() {
    let result = call_cooked(
        "function f() {
            const a = [1, 2];
            const o = { x: 1, ...{ y: 2 } };
            return [[0, ...a], o, Math.max(...a)];
        }",
        &[],
    );
    assert_eq!(result.as_deref(), Ok("[[0, 1, 2], { x: 1, y: 2 }, 2]"));
}

#[test]
fn functions_are_named_from_their_bindings() {
    let result = call_cooked(
        "function f() { const g = () => 1; let h; h = function () {}; return [g.name, h.name] }",
        &[],
    );
    assert_eq!(result.as_deref(), Ok("[\"g\", \"h\"]"));
}

#[test]
fn block_functions_are_scoped_to_their_block() {
    let result = call_cooked(
        "function f() { { function g() { return 1 } } return typeof g }",
        &[],
    );
    assert_eq!(result.as_deref(), Ok("\"undefined\""));
}

#[test]
fn expressions_evaluate_with_supplied_globals() {
    let data = vec![("DATA".to_owned(), Value::from("ab"))];
    let result = evaluate_expression("DATA.length + DATA[1]", data);
    assert_eq!(result.as_deref(), Ok("\"2b\""));
    let result = evaluate_expression("[1, 2, 3].map(x => x * x)", vec![]);
    assert_eq!(result.as_deref(), Ok("[1, 4, 9]"));
}

#[test]
fn expressions_only_see_supplied_globals() {
    let result = evaluate_expression("Math.max(1, 2)", vec![]);
    assert_eq!(
        result,
        Err("ReferenceError: Math is not defined".to_owned())
    );
}

#[test]
fn unsupported_nodes_throw_when_evaluated() {
    let result = call_cooked("function f(a) { if (a) { return /x/ } return 1 }", &[]);
    assert_eq!(result.as_deref(), Ok("1"));
    let result = call_cooked(
        "function f(a) { if (a) { return /x/ } return 1 }",
        &[Value::from(true)],
    );
    assert_eq!(
        result,
        Err("SyntaxError: Unsupported node type `RegExpLiteral`: `/x/`".to_owned())
    );
    let result = evaluate_expression("[1, this]", vec![]);
    assert_eq!(
        result,
        Err("SyntaxError: Unsupported node type `ThisExpression`: `this`".to_owned())
    );
}

#[test]
fn lone_surrogates_are_kept() {
    let result = evaluate_expression(
        "[
            '😀'[0] === '\\ud83d',
            '\\ud83d'.length,
            '😀'.split('').join('') === '😀',
            '😀'[0] + '😀'[1] === '😀',
            '\\ud83d' === '\\ufffd',
            '\\ufffd'.length,
        ]",
        vec![],
    );
    assert_eq!(result.as_deref(), Ok("[true, 1, true, true, false, 1]"));
}

#[test]
fn arrays_accept_every_valid_length() {
    let result = call_cooked(
        "function f() {
            const a = [];
            a[4294967294] = 1;
            return [a.length, a[4294967294], Object.keys(a)];
        }",
        &[],
    );
    assert_eq!(result.as_deref(), Ok("[4294967295, 1, [\"4294967294\"]]"));
    let result = call_cooked("function f() { return new Array(1e9).length }", &[]);
    assert_eq!(result.as_deref(), Ok("1000000000"));
    let result = call_cooked(
        "function f() {
            const a = [1];
            a.length = 16777300;
            a.push(2);
            return [a.length, a[16777300], a.indexOf(2), a.includes(undefined)];
        }",
        &[],
    );
    assert_eq!(result.as_deref(), Ok("[16777301, 2, 16777300, true]"));
    let result = call_cooked("function f() { const a = []; a.length = 4294967296 }", &[]);
    assert_eq!(result, Err("RangeError: Invalid array length".to_owned()));
}

#[test]
fn holes_print_as_runs() {
    let result = evaluate_expression("[1, , , 2, ]", vec![]);
    assert_eq!(result.as_deref(), Ok("[1, <2 empty items>, 2]"));
    let result = call_cooked("function f() { return new Array(3) }", &[]);
    assert_eq!(result.as_deref(), Ok("[<3 empty items>]"));
}

#[test]
fn apply_reads_every_element_of_an_array_like() {
    let result = call_cooked(
        "function f() { return Math.max.apply(null, { length: 3, 0: 1, 2: 5 }) }",
        &[],
    );
    assert_eq!(result.as_deref(), Ok("NaN"));
    let result = call_cooked(
        "function f() { return Math.max.apply(null, { length: 2, 0: 1, 1: 5 }) }",
        &[],
    );
    assert_eq!(result.as_deref(), Ok("5"));
    let result = call_cooked(
        "function f() { const a = []; a.length = 100000; return Math.max.apply(null, a) }",
        &[],
    );
    assert_eq!(
        result,
        Err("RangeError: Too many arguments in function call (only 65535 allowed)".to_owned())
    );
}

#[test]
fn cyclic_arrays_join_as_empty_strings() {
    let result = call_cooked(
        "function f() { const a = [1]; a.push(a); return [a.join(), a + '', [a, 2].join('-')] }",
        &[],
    );
    assert_eq!(result.as_deref(), Ok("[\"1,\", \"1,\", \"1,-2\"]"));
}

#[test]
fn environments_of_finished_calls_are_reclaimed() {
    let allocator = Allocator::default();
    let source = "function f() {
        let total = 0;
        for (let i = 0; i < 10000; i++) {
            const twice = i * 2;
            total += twice;
        }
        return total;
    }";
    let precooked = precook_function(&allocator, source, PrecookFunctionOptions::default())
        .expect("source should precook");
    let mut agent = Agent::new(AgentOptions::default());
    let function = cook(
        &mut agent,
        PrecookRoot::Function(precooked.function),
        &precooked.source,
        CookOptions::default(),
    )
    .expect("source should cook");
    for _ in 0..3 {
        let result = invoke(&mut agent, &function, &[]).expect("call should succeed");
        assert_eq!(result, Value::from(99990000));
        assert!(agent.environment_count() < 16, "{} environments alive", agent.environment_count());
    }
}

#[test]
fn closures_keep_their_environments_alive() {
    let allocator = Allocator::default();
    let source = "function f() {
        const fns = [];
        for (let i = 0; i < 2000; i++) fns.push(() => i);
        return fns;
    }";
    let precooked = precook_function(&allocator, source, PrecookFunctionOptions::default())
        .expect("source should precook");
    let mut agent = Agent::new(AgentOptions::default());
    let function = cook(
        &mut agent,
        PrecookRoot::Function(precooked.function),
        &precooked.source,
        CookOptions::default(),
    )
    .expect("source should cook");
    let fns = invoke(&mut agent, &function, &[]).expect("call should succeed");
    assert!(agent.environment_count() >= 2000);
    let last = fns.as_object().expect("an array").get(&mut agent, 1999u32);
    assert_eq!(invoke(&mut agent, &last, &[]), Ok(Value::from(1999)));
}
