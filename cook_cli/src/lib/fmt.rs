// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Formatting values and errors.

use cook_vm::{Agent, JsResult, Value};
use oxc_diagnostics::OxcDiagnostic;

/// Prints a value, or the uncaught error. Returns whether the result was
/// a value.
pub fn print_result(agent: &Agent, result: &JsResult<Value>) -> bool {
    match result {
        Ok(value) => {
            println!("{}", value.string_repr(agent));
            true
        }
        Err(error) => {
            eprintln!("Uncaught exception: {}", error.to_display_string(agent));
            false
        }
    }
}

fn render_diagnostics(errors: Vec<OxcDiagnostic>, source_path: &str, source: &str) {
    // This seems to be needed for color and Unicode output.
    let _ = miette::set_hook(Box::new(|_| {
        Box::new(oxc_diagnostics::GraphicalReportHandler::new())
    }));

    let named_source = miette::NamedSource::new(source_path, source.to_owned());
    for error in errors {
        let report = error.with_source_code(named_source.clone());
        eprintln!("{report:?}");
    }
}

/// Prints precook warnings, if any.
pub fn print_warnings(warnings: Vec<OxcDiagnostic>, source_path: &str, source: &str) {
    if !warnings.is_empty() {
        render_diagnostics(warnings, source_path, source);
    }
}

/// Exit the program with parse errors.
pub fn exit_with_parse_errors(errors: Vec<OxcDiagnostic>, source_path: &str, source: &str) -> ! {
    assert!(!errors.is_empty());

    eprintln!("SyntaxError:");
    render_diagnostics(errors, source_path, source);

    std::process::exit(1);
}
