//! jsbeautify - pretty printer with expression substitution
//!
//! Parses a script and prints it back out indented (or crushed with
//! `--crush`). `--replace FROM TO` swaps every occurrence of one expression
//! for another before printing; `--optimize` folds constants and prunes
//! dead branches.

use clap::Parser as ClapParser;
use emitter::{emit, EmitOptions};
use jsxmin_cli::{read_input, CliError};
use minifier::substitution::{find_expression, replace, strip_positions};
use minifier::CodeReduction;
use parser::ast::Expression;
use parser::Parser;

/// Reformat a script
#[derive(ClapParser, Debug)]
#[command(name = "jsbeautify", version, about = "JavaScript pretty printer")]
struct Cli {
    /// Input file; stdin when omitted or '-'
    file: Option<String>,

    /// Simplify the AST before printing
    #[arg(short = 'o', long)]
    optimize: bool,

    /// Crush the output onto one line instead of pretty-printing
    #[arg(short = 'c', long)]
    crush: bool,

    /// Replace every occurrence of one expression with another (repeatable)
    #[arg(short = 'r', long = "replace", num_args = 2, value_names = ["FROM", "TO"], action = clap::ArgAction::Append)]
    replace: Vec<String>,
}

/// Parse a snippet and take the expression it denotes.
fn parse_pattern(snippet: &str) -> Result<Expression, CliError> {
    let mut program = Parser::new(snippet).parse()?;
    strip_positions(&mut program);
    find_expression(&program)
        .cloned()
        .ok_or_else(|| CliError::EmptyPattern(snippet.to_string()))
}

fn run(cli: &Cli) -> Result<String, CliError> {
    let source = read_input(cli.file.as_deref())?;
    let mut program = Parser::new(&source).parse()?;

    if !cli.replace.is_empty() {
        strip_positions(&mut program);
        for pair in cli.replace.chunks(2) {
            let [from, to] = pair else { continue };
            let needle = parse_pattern(from)?;
            let replacement = parse_pattern(to)?;
            let count = replace(&mut program, &needle, &replacement);
            log::debug!("replaced {} occurrence(s) of '{}'", count, from);
        }
    }

    if cli.optimize {
        CodeReduction::new().process(&mut program);
    }

    let options = EmitOptions {
        pretty: !cli.crush,
        preserve_lines: false,
    };
    Ok(emit(&program, options))
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(output) => println!("{}", output),
        Err(error) => {
            eprintln!("parse error: {}", error);
            std::process::exit(1);
        }
    }
}
