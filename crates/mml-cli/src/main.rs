//! The `mmlc` command-line driver.
//!
//! Provides two subcommands:
//!
//! - `mmlc unify <file>` - unify a comma-separated list of first-order terms
//!   with one of three engines (`--engine robinson|equations|multiequation`).
//! - `mmlc check <file>` - type-check a Micro-ML program and print each
//!   top-level definition's principal type.

use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use rustc_hash::FxHashSet;

use mml_common::{Diagnostic, Span};
use mml_parser::ParseError;

#[derive(Parser)]
#[command(name = "mmlc", version, about = "The Micro-ML unifier and type checker")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Unify a comma-separated list of first-order terms
    Unify {
        /// Path to a file containing the term list
        file: PathBuf,

        /// Which unification engine to run
        #[arg(long, value_enum, default_value = "equations")]
        engine: Engine,
    },
    /// Type-check a Micro-ML program and print each definition's principal type
    Check {
        /// Path to a file containing the program
        file: PathBuf,
    },
}

#[derive(Copy, Clone, ValueEnum)]
enum Engine {
    Robinson,
    Equations,
    Multiequation,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Unify { file, engine } => run_unify(&file, engine),
        Commands::Check { file } => run_check(&file),
    };

    if let Err(e) = result {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

fn read_source(path: &Path) -> Result<String, String> {
    std::fs::read_to_string(path).map_err(|e| format!("failed to read '{}': {}", path.display(), e))
}

fn run_unify(path: &Path, engine: Engine) -> Result<(), String> {
    let source = read_source(path)?;
    let terms = mml_parser::parse_term_list(&source).map_err(|e| report_parse_error(&source, &e))?;

    match engine {
        Engine::Robinson => {
            let set: FxHashSet<_> = terms.into_iter().collect();
            let substitution = mml_typeck::robinson::unify(&set)
                .map_err(|e| report_whole_file(&source, &e))?;
            print_substitution(&substitution);
        }
        Engine::Equations => {
            let substitution = mml_typeck::term_eqlist::unify_terms(&terms)
                .map_err(|e| report_whole_file(&source, &e))?;
            print_substitution(&substitution);
        }
        Engine::Multiequation => {
            let solved = mml_typeck::multieq::unify(&terms)
                .map_err(|e| report_whole_file(&source, &e))?;
            for meq in &solved {
                println!("{meq}");
            }
        }
    }

    Ok(())
}

fn print_substitution<V: Display>(substitution: &rustc_hash::FxHashMap<String, V>) {
    let mut names: Vec<&String> = substitution.keys().collect();
    names.sort();
    for name in names {
        println!("{} = {}", name, substitution[name]);
    }
}

fn run_check(path: &Path) -> Result<(), String> {
    let source = read_source(path)?;
    let defs = mml_parser::parse_program(&source).map_err(|e| report_parse_error(&source, &e))?;

    let mut has_errors = false;
    for (name, result) in mml_typeck::infer_program(&defs) {
        match result {
            Ok(ty) => println!("{} : {}", name, ty.to_principal_string()),
            Err(e) => {
                has_errors = true;
                eprint!("{}", report_whole_file(&source, &e));
            }
        }
    }

    if has_errors {
        return Err("type checking failed due to errors above.".to_string());
    }
    Ok(())
}

fn report_parse_error(source: &str, error: &ParseError) -> String {
    let diagnostic = Diagnostic::new(error.message.clone(), error.span);
    diagnostic.render(source)
}

/// Errors from the unifiers and the inference driver don't carry a span
/// (unification operates over terms and types, not source positions), so
/// they render anchored to the whole file rather than a specific range.
fn report_whole_file<E: Display>(source: &str, error: &E) -> String {
    let span = Span::new(0, source.len() as u32);
    let diagnostic = Diagnostic::new(error.to_string(), span);
    diagnostic.render(source)
}
