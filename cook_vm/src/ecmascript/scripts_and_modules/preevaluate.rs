// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Expressions embedded in configuration values as `<% expression %>`.
//!
//! The `<%~ expression %>` form marks a value whose result may itself be
//! evaluated again by the embedder.

use oxc_allocator::Allocator;
use oxc_ast::ast::Expression;
use oxc_diagnostics::OxcDiagnostic;

use super::{
    precook::{PrecookOptions, PrecookResult, PrecookRoot, precook},
    source_code::{SourceCode, parse_expression},
};

#[derive(Debug, Default, Clone, Copy)]
pub struct PreevaluateOptions {
    pub typescript: bool,
}

#[derive(Debug)]
pub struct PreevaluateResult<'a> {
    pub expression: &'a Expression<'a>,
    /// The expression text without its `<% %>` wrapper.
    pub source: SourceCode<'a>,
    pub precooked: PrecookResult<'a>,
}

/// Whether `raw` is wrapped in `<% ... %>` or `<%~ ... %>`. The markers
/// must be separated from the expression by whitespace.
pub fn is_evaluable(raw: &str) -> bool {
    evaluable_parts(raw).is_some()
}

/// Whether `raw` uses the recursive `<%~ ... %>` form.
pub fn should_allow_recursive_evaluations(raw: &str) -> bool {
    raw.trim_start()
        .strip_prefix("<%~")
        .is_some_and(starts_with_whitespace)
}

/// Parses and analyzes the expression of an evaluable string.
pub fn preevaluate<'a>(
    allocator: &'a Allocator,
    raw: &'a str,
    options: PreevaluateOptions,
) -> Result<PreevaluateResult<'a>, Vec<OxcDiagnostic>> {
    let Some(source_text) = evaluable_parts(raw) else {
        return Err(vec![OxcDiagnostic::error(format!(
            "Expect an evaluable string wrapped in `<% %>`, but received: \"{raw}\""
        ))]);
    };
    let parsed = parse_expression(allocator, source_text, options.typescript).map_err(|errors| {
        errors
            .into_iter()
            .map(|error| OxcDiagnostic::error(format!("{}, in \"{raw}\"", error.message)))
            .collect::<Vec<_>>()
    })?;
    let precooked = precook(
        PrecookRoot::Expression(parsed.expression),
        PrecookOptions {
            expression_only: true,
            ..Default::default()
        },
    )?;
    Ok(PreevaluateResult {
        expression: parsed.expression,
        source: parsed.source,
        precooked,
    })
}

/// The text between the markers, whitespace included.
fn evaluable_parts(raw: &str) -> Option<&str> {
    let inner = raw.trim_start().strip_prefix("<%")?;
    let inner = inner.strip_prefix('~').unwrap_or(inner);
    let inner = inner.trim_end().strip_suffix("%>")?;
    (starts_with_whitespace(inner) && inner.ends_with(char::is_whitespace)).then_some(inner)
}

fn starts_with_whitespace(text: &str) -> bool {
    text.starts_with(char::is_whitespace)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn evaluable_strings_need_both_markers() {
        assert!(is_evaluable("<% a %>"));
        assert!(is_evaluable("  <%~ a.b %>\n"));
        assert!(is_evaluable("<%\n  a\n%>"));
        assert!(!is_evaluable("<%a %>"));
        assert!(!is_evaluable("<% a%>"));
        assert!(!is_evaluable("<% a"));
        assert!(!is_evaluable("a %>"));
    }

    #[test]
    fn recursive_evaluation_uses_the_tilde_marker() {
        assert!(should_allow_recursive_evaluations("<%~ a %>"));
        assert!(should_allow_recursive_evaluations(" <%~\ta %>"));
        assert!(!should_allow_recursive_evaluations("<% a %>"));
        assert!(!should_allow_recursive_evaluations("<%~a %>"));
    }

    #[test]
    fn preevaluate_strips_the_wrapper() {
        let allocator = Allocator::default();
        let result = preevaluate(&allocator, "<% DATA.a |> fn %>", PreevaluateOptions::default())
            .expect("expression should precook");
        assert_eq!(result.source.source_text, " DATA.a |> fn ");
        assert_eq!(result.precooked.free_variables, ["DATA", "fn"]);
        assert_eq!(&*result.source.pipeline_operators, [8]);
    }

    #[test]
    fn parse_errors_name_the_raw_string() {
        let allocator = Allocator::default();
        let errors = preevaluate(&allocator, "<% a + %>", PreevaluateOptions::default())
            .expect_err("expression should not parse");
        assert!(errors[0].message.ends_with(", in \"<% a + %>\""));
    }

    #[test]
    fn expression_only_rules_apply() {
        let allocator = Allocator::default();
        let errors = preevaluate(&allocator, "<% () => { return 1 } %>", PreevaluateOptions::default())
            .expect_err("block body should be rejected");
        assert_eq!(
            errors[0].message,
            "Only an `Expression` is allowed in `ArrowFunctionExpression`'s body"
        );
    }
}
