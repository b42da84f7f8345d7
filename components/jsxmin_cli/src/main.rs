//! jsxmin - JavaScript minifier CLI
//!
//! Reads a script from a file or stdin, runs the renaming passes and prints
//! the crushed (or pretty) result to stdout.

use clap::Parser as ClapParser;
use jsxmin_cli::{read_input, Cli, Runtime};

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let source = match read_input(cli.file.as_deref()) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("{}", error);
            std::process::exit(1);
        }
    };

    let runtime = Runtime::new(cli.rename_globals, cli.rename_properties)
        .with_pretty(cli.pretty)
        .with_preserve_lines(cli.preserve_lines)
        .with_print_ast(cli.print_ast);

    match runtime.minify_source(&source) {
        Ok(output) => {
            print!("{}", output);
            if cli.pretty {
                println!();
            }
        }
        Err(error) => {
            eprintln!("parsing error: {}", error);
            std::process::exit(1);
        }
    }
}
