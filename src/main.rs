// ABOUTME: CLI entry point: one-shot evaluation of argv words, plus the interactive session

use clap::Parser;
use lunar::eval::results;
use lunar::parser::{parse, parse_line};
use lunar::scope::Scope;
use lunar::value::Value;
use rustyline::error::ReadlineError;
use rustyline::history::FileHistory;
use rustyline::{Config, Editor};
use std::process::ExitCode;
use std::rc::Rc;

const HISTORY_FILE: &str = ".lunar_history";

/// Lunar: a Logo-flavored scripting language
#[derive(Parser, Debug)]
#[command(name = "lunar")]
#[command(version)]
#[command(about = "A Logo-flavored scripting language with first-class lists, dicts, and closures")]
struct CliArgs {
    /// Start an interactive session
    #[arg(short, long)]
    interactive: bool,

    /// Program words; `load <filename>` runs a source file
    #[arg(value_name = "CODE", trailing_var_arg = true, allow_hyphen_values = true)]
    code: Vec<String>,
}

fn main() -> ExitCode {
    let args = CliArgs::parse();

    if args.interactive {
        return match repl() {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("Error: {}", e);
                ExitCode::FAILURE
            }
        };
    }

    if args.code.is_empty() {
        print_usage();
        return ExitCode::SUCCESS;
    }

    // The argument vector is one program line: tokenise it, evaluate for
    // results, and echo every non-nil value.
    let scope = Scope::new();
    let outcome = parse(args.code.iter().map(String::as_str))
        .and_then(|tokens| results(&tokens, &scope));
    match outcome {
        Ok(values) => {
            for value in values {
                if !matches!(value, Value::Nil) {
                    println!("{}", value);
                }
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn print_usage() {
    println!(
        "Lunar {} -- a Logo-flavored scripting language",
        env!("CARGO_PKG_VERSION")
    );
    println!("Usage:\n\tlunar [logo code...]");
    println!("\tlunar load <filename>");
}

/// The interactive loop: one persistent root scope, one line at a time.
fn repl() -> Result<(), ReadlineError> {
    let config = Config::builder().auto_add_history(true).build();
    let mut rl: Editor<(), FileHistory> = Editor::with_config(config)?;
    let _ = rl.load_history(HISTORY_FILE);

    println!(
        "Lunar {} -- a Logo-flavored scripting language",
        env!("CARGO_PKG_VERSION")
    );
    println!("Ctrl-D exits.");

    let scope = Scope::new();
    loop {
        match rl.readline("lunar> ") {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                eval_repl_line(&line, &scope);
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                eprintln!("Error: {}", err);
                break;
            }
        }
    }

    let _ = rl.save_history(HISTORY_FILE);
    Ok(())
}

fn eval_repl_line(line: &str, scope: &Rc<Scope>) {
    match parse_line(line).and_then(|tokens| results(&tokens, scope)) {
        Ok(values) => {
            for value in values {
                if !matches!(value, Value::Nil) {
                    println!("{}", value);
                }
            }
        }
        Err(e) => eprintln!("Error: {}", e),
    }
    // A stray break/continue/return at the prompt must not poison the
    // next line.
    scope.breaking.set(false);
    scope.continuing.set(false);
    scope.returning.set(false);
}
