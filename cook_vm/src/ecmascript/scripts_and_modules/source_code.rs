// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Parsing of cook sources. Every parsed node lives in the caller's
//! [`Allocator`], so functions created while cooking can borrow their code
//! for as long as the allocator lives.

use std::rc::Rc;

use oxc_allocator::Allocator;
use oxc_ast::ast::{Expression, Function, Program, Statement};
use oxc_diagnostics::OxcDiagnostic;
use oxc_parser::{Parser, ParserReturn};
use oxc_span::{GetSpan, SourceType, Span};

use crate::ecmascript::syntax_directed_operations::statement_type_name;

/// Source text of a cook together with the positions of the pipeline
/// operators that were rewritten before parsing.
#[derive(Debug, Clone)]
pub struct SourceCode<'a> {
    /// The text as the user wrote it. Spans of the parsed nodes index into
    /// it.
    pub source_text: &'a str,
    /// Byte offsets of every `|>`, ascending.
    pub pipeline_operators: Rc<[u32]>,
}

impl<'a> SourceCode<'a> {
    /// Rewrites `|>` to `||` and returns the text the parser should see.
    /// The rewritten text is allocated in `allocator` only when it differs
    /// from the source.
    fn prepare(allocator: &'a Allocator, source_text: &'a str) -> (Self, &'a str) {
        let (rewritten, pipeline_operators) = rewrite_pipeline_operators(source_text);
        let parser_text = match rewritten {
            Some(rewritten) => allocator.alloc_str(&rewritten),
            None => source_text,
        };
        let source = Self {
            source_text,
            pipeline_operators: pipeline_operators.into(),
        };
        (source, parser_text)
    }
}

/// A source that contains exactly one function declaration.
#[derive(Debug, Clone)]
pub struct ParsedFunction<'a> {
    pub function: &'a Function<'a>,
    pub source: SourceCode<'a>,
}

/// A source that is a single expression.
#[derive(Debug, Clone)]
pub struct ParsedExpression<'a> {
    pub expression: &'a Expression<'a>,
    pub source: SourceCode<'a>,
}

/// Appends the source text under `span` to a SyntaxError message.
pub(crate) fn with_source_text(message: String, source_text: &str, span: Span) -> String {
    match source_text.get(span.start as usize..span.end as usize) {
        Some(text) if !text.is_empty() => format!("{message}: `{text}`"),
        _ => message,
    }
}

/// Message of an analysis diagnostic, quoting the source under its first
/// label.
pub(crate) fn diagnostic_message(error: &OxcDiagnostic, source_text: &str) -> String {
    let message = error.message.to_string();
    match error.labels.as_ref().and_then(|labels| labels.first()) {
        Some(label) => {
            let span = Span::sized(label.offset() as u32, label.len() as u32);
            with_source_text(message, source_text, span)
        }
        None => message,
    }
}

fn source_type(typescript: bool) -> SourceType {
    SourceType::mjs().with_typescript(typescript)
}

/// Parses `source_text` as a program that must consist of a single function
/// declaration. In TypeScript mode type-only statements are dropped first.
pub fn parse_function<'a>(
    allocator: &'a Allocator,
    source_text: &'a str,
    typescript: bool,
) -> Result<ParsedFunction<'a>, Vec<OxcDiagnostic>> {
    let (source, parser_text) = SourceCode::prepare(allocator, source_text);
    let ParserReturn {
        program,
        errors,
        panicked,
        ..
    } = Parser::new(allocator, parser_text, source_type(typescript)).parse();
    if panicked || !errors.is_empty() {
        return Err(errors);
    }
    let program: &'a Program<'a> = allocator.alloc(program);

    let mut statements = Vec::with_capacity(program.body.len());
    for statement in program.body.iter() {
        match statement {
            Statement::TSEnumDeclaration(_)
            | Statement::TSModuleDeclaration(_)
            | Statement::TSGlobalDeclaration(_)
            | Statement::TSImportEqualsDeclaration(_)
            | Statement::TSExportAssignment(_)
            | Statement::TSNamespaceExportDeclaration(_)
            | Statement::ImportDeclaration(_)
            | Statement::ExportAllDeclaration(_)
            | Statement::ExportDefaultDeclaration(_)
            | Statement::ExportNamedDeclaration(_) => {
                return Err(vec![
                    OxcDiagnostic::error(format!(
                        "Unsupported TypeScript syntax: {}",
                        statement_type_name(statement)
                    ))
                    .with_label(statement.span()),
                ]);
            }
            _ if typescript && statement.is_typescript_syntax() => {}
            _ => statements.push(statement),
        }
    }

    match statements.as_slice() {
        [] => Err(vec![OxcDiagnostic::error("Function declaration not found")]),
        [statement] if matches!(statement, Statement::FunctionDeclaration(_)) => {
            let Statement::FunctionDeclaration(function) = *statement else {
                unreachable!()
            };
            Ok(ParsedFunction {
                function: &**function,
                source,
            })
        }
        _ => {
            let received = statements
                .iter()
                .map(|statement| format!("\"{}\"", statement_type_name(statement)))
                .collect::<Vec<_>>()
                .join(", ");
            Err(vec![OxcDiagnostic::error(format!(
                "Expect a single function declaration, but received: {received}"
            ))])
        }
    }
}

/// Parses `source_text` as a single expression.
pub fn parse_expression<'a>(
    allocator: &'a Allocator,
    source_text: &'a str,
    typescript: bool,
) -> Result<ParsedExpression<'a>, Vec<OxcDiagnostic>> {
    let (source, parser_text) = SourceCode::prepare(allocator, source_text);
    let expression =
        Parser::new(allocator, parser_text, source_type(typescript)).parse_expression()?;
    Ok(ParsedExpression {
        expression: allocator.alloc(expression),
        source,
    })
}

/// The parser does not know the pipeline operator, but `||` has the same
/// length and a compatible precedence slot. Replaces every `|>` outside of
/// string literals, template text and comments with `||`, returning the new
/// text if anything changed and the offsets of the replaced operators.
pub(crate) fn rewrite_pipeline_operators(source_text: &str) -> (Option<String>, Vec<u32>) {
    let bytes = source_text.as_bytes();
    let mut offsets = Vec::new();
    // Brace depths at which a template substitution `${` was opened.
    let mut substitutions: Vec<usize> = Vec::new();
    let mut brace_depth = 0usize;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            quote @ (b'\'' | b'"') => i = skip_string_literal(bytes, i + 1, quote),
            b'`' => {
                i = skip_template_text(bytes, i + 1, &mut substitutions, brace_depth);
            }
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                i = bytes[i..]
                    .iter()
                    .position(|b| *b == b'\n')
                    .map_or(bytes.len(), |end| i + end);
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                i = bytes[i + 2..]
                    .windows(2)
                    .position(|window| window == b"*/")
                    .map_or(bytes.len(), |end| i + 2 + end + 2);
            }
            b'{' => {
                brace_depth += 1;
                i += 1;
            }
            b'}' => {
                if substitutions.last() == Some(&brace_depth) {
                    substitutions.pop();
                    i = skip_template_text(bytes, i + 1, &mut substitutions, brace_depth);
                } else {
                    brace_depth = brace_depth.saturating_sub(1);
                    i += 1;
                }
            }
            b'|' if bytes.get(i + 1) == Some(&b'>') => {
                offsets.push(i as u32);
                i += 2;
            }
            _ => i += 1,
        }
    }
    if offsets.is_empty() {
        return (None, offsets);
    }
    let mut rewritten = bytes.to_vec();
    for offset in &offsets {
        rewritten[*offset as usize + 1] = b'|';
    }
    // Only an ASCII byte was replaced by another ASCII byte.
    let rewritten = String::from_utf8(rewritten).unwrap_or_else(|_| source_text.to_owned());
    (Some(rewritten), offsets)
}

/// Returns the index after the closing quote.
fn skip_string_literal(bytes: &[u8], mut i: usize, quote: u8) -> usize {
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b if b == quote => return i + 1,
            _ => i += 1,
        }
    }
    bytes.len()
}

/// Skips template text up to and including the closing backtick, or up to
/// and including the `${` of the next substitution.
fn skip_template_text(
    bytes: &[u8],
    mut i: usize,
    substitutions: &mut Vec<usize>,
    brace_depth: usize,
) -> usize {
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'`' => return i + 1,
            b'$' if bytes.get(i + 1) == Some(&b'{') => {
                substitutions.push(brace_depth);
                return i + 2;
            }
            _ => i += 1,
        }
    }
    bytes.len()
}

#[cfg(test)]
mod test {
    use super::*;

    fn rewrite(source: &str) -> (String, Vec<u32>) {
        let (rewritten, offsets) = rewrite_pipeline_operators(source);
        (rewritten.unwrap_or_else(|| source.to_owned()), offsets)
    }

    #[test]
    fn rewrites_pipeline_operators() {
        assert_eq!(rewrite("a |> b |> c"), ("a || b || c".to_owned(), vec![2, 7]));
        assert_eq!(rewrite("a || b"), ("a || b".to_owned(), vec![]));
    }

    #[test]
    fn pipeline_scanner_skips_strings_and_comments() {
        assert_eq!(rewrite("'|>' |> f").1, vec![5]);
        assert_eq!(rewrite(r#""\"|>" |> f"#).1, vec![7]);
        assert_eq!(rewrite("a // |>\n|> f").1, vec![8]);
        assert_eq!(rewrite("a /* |> */ |> f").1, vec![11]);
    }

    #[test]
    fn pipeline_scanner_tracks_template_substitutions() {
        assert_eq!(rewrite("`|>` |> f").1, vec![5]);
        assert_eq!(rewrite("`${a |> f}|>`").1, vec![5]);
        assert_eq!(rewrite("`${ {a: 1} }|>` |> f").1, vec![16]);
        assert_eq!(rewrite("`${`${x |> g}`}` |> f").1, vec![8, 17]);
    }

    #[test]
    fn parses_a_single_function_declaration() {
        let allocator = Allocator::default();
        let parsed = parse_function(&allocator, "function add(a, b) { return a + b; }", false)
            .unwrap();
        assert_eq!(parsed.function.id.as_ref().unwrap().name, "add");
        assert!(parsed.source.pipeline_operators.is_empty());
    }

    #[test]
    fn rejects_sources_that_are_not_one_function() {
        let allocator = Allocator::default();
        let errors = parse_function(&allocator, "", false).unwrap_err();
        assert_eq!(errors[0].message, "Function declaration not found");
        let errors = parse_function(&allocator, "function a(){} let b = 1;", false).unwrap_err();
        assert_eq!(
            errors[0].message,
            "Expect a single function declaration, but received: \"FunctionDeclaration\", \"VariableDeclaration\""
        );
    }

    #[test]
    fn strips_type_only_statements() {
        let allocator = Allocator::default();
        let source = "type Num = number;\ninterface Pair { a: Num }\nfunction first(p: Pair): Num { return p.a; }";
        assert!(parse_function(&allocator, source, true).is_ok());
        let errors = parse_function(&allocator, "enum E { A }\nfunction f() {}", true).unwrap_err();
        assert_eq!(errors[0].message, "Unsupported TypeScript syntax: TSEnumDeclaration");
    }

    #[test]
    fn parses_expressions_with_pipelines() {
        let allocator = Allocator::default();
        let parsed = parse_expression(&allocator, "x |> f", false).unwrap();
        assert!(matches!(parsed.expression, Expression::LogicalExpression(_)));
        assert_eq!(&*parsed.source.pipeline_operators, &[2]);
        assert_eq!(parsed.source.source_text, "x |> f");
    }
}
