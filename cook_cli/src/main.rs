// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
mod theme;

use clap::{Parser as ClapParser, Subcommand};
use cliclack::{input, intro, set_theme};
use cook_cli::{
    Instance, InstanceConfig, exit_with_parse_errors, print_result, print_warnings,
};
use cook_vm::{PrecookFunctionOptions, Rules, precook_function};
use oxc_allocator::Allocator;
use theme::DefaultTheme;

/// A sandboxed evaluator for a JavaScript subset
#[derive(Debug, ClapParser)] // requires `derive` feature
#[command(name = "cook")]
#[command(about = "A sandboxed evaluator for a JavaScript subset", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parses and precooks a function file and logs out its scopes
    Parse {
        #[arg(short, long)]
        typescript: bool,

        /// The path of the file to parse
        path: String,
    },

    /// Cooks a function file and calls it
    Eval {
        #[arg(short, long)]
        verbose: bool,
        #[arg(short, long)]
        typescript: bool,
        #[arg(short, long)]
        no_var: bool,

        /// The path of the file holding the function
        path: String,

        /// Arguments of the call, each one an expression
        args: Vec<String>,
    },

    /// Evaluates an expression wrapped in `<% %>`
    Expr {
        #[arg(short, long)]
        verbose: bool,

        /// The wrapped expression
        raw: String,
    },

    /// Runs the REPL
    Repl {},
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Cli::parse();

    match args.command {
        Command::Parse { typescript, path } => {
            let file = std::fs::read_to_string(&path)?;
            let allocator = Allocator::default();
            let precooked = match precook_function(
                &allocator,
                &file,
                PrecookFunctionOptions {
                    typescript,
                    rules: Rules::default(),
                },
            ) {
                Ok(precooked) => precooked,
                Err(errors) => exit_with_parse_errors(errors, &path, &file),
            };
            let result = precooked.precooked;
            print_warnings(result.warnings, &path, &file);
            println!("Free variables: {:?}", result.free_variables);
            println!("Root scope: {:?}", result.root_scope);
            println!("Scopes: {}", result.scopes.len());
        }
        Command::Eval {
            verbose,
            typescript,
            no_var,
            path,
            args,
        } => {
            // Cooked code may loop forever.
            ctrlc::set_handler(|| std::process::exit(130))?;

            let file = std::fs::read_to_string(&path)?;
            let allocator = Allocator::default();
            let mut instance = Instance::new(
                &allocator,
                InstanceConfig {
                    verbose,
                    typescript,
                    no_var,
                },
            );
            let function = match instance.cook_function(&path, &file) {
                Ok(Ok(function)) => function,
                Ok(result) => {
                    print_result(instance.agent(), &result);
                    std::process::exit(1);
                }
                Err((errors, source)) => exit_with_parse_errors(errors, &path, source),
            };
            let mut arguments = Vec::with_capacity(args.len());
            for arg in &args {
                match instance.evaluate_expression(arg) {
                    Ok(Ok(value)) => arguments.push(value),
                    Ok(result) => {
                        print_result(instance.agent(), &result);
                        std::process::exit(1);
                    }
                    Err((errors, source)) => exit_with_parse_errors(errors, "<argument>", source),
                }
            }
            let result = instance.call(&function, &arguments);
            if !print_result(instance.agent(), &result) {
                std::process::exit(1);
            }
        }
        Command::Expr { verbose, raw } => {
            let allocator = Allocator::default();
            let mut instance = Instance::new(
                &allocator,
                InstanceConfig {
                    verbose,
                    ..Default::default()
                },
            );
            match instance.evaluate_template(&raw) {
                Ok(result) => {
                    if !print_result(instance.agent(), &result) {
                        std::process::exit(1);
                    }
                }
                Err((errors, source)) => exit_with_parse_errors(errors, "<expr>", source),
            }
        }
        Command::Repl {} => {
            let allocator = Allocator::default();
            let mut instance = Instance::new(
                &allocator,
                InstanceConfig {
                    verbose: true,
                    ..Default::default()
                },
            );

            set_theme(DefaultTheme);
            println!("\n\n");
            let mut placeholder = "Enter an expression".to_string();

            loop {
                intro("Cook Repl (type exit or ctrl+c to exit)")?;
                let input: String = input("").placeholder(&placeholder).interact()?;

                if input.trim() == "exit" {
                    std::process::exit(0);
                }
                placeholder = input.to_string();
                match instance.evaluate_expression(&input) {
                    Ok(result) => {
                        print_result(instance.agent(), &result);
                    }
                    Err((errors, source)) => print_warnings(errors, "<stdin>", source),
                }
                println!();
            }
        }
    }
    Ok(())
}
