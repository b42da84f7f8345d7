//! jsexports - lists the file-scope names a script defines
//!
//! Every `var` and function declaration at file scope lands in the shared
//! global namespace; this prints them, one per line, sorted.

use clap::Parser as ClapParser;
use jsxmin_cli::read_input;
use minifier::collect_exports;
use parser::Parser;

/// List the global names a script defines
#[derive(ClapParser, Debug)]
#[command(name = "jsexports", version, about = "List the global names a script defines")]
struct Cli {
    /// Input file; stdin when omitted or '-'
    file: Option<String>,
}

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

    match Parser::new(&source).parse() {
        Ok(program) => {
            for name in collect_exports(&program) {
                println!("{}", name);
            }
        }
        Err(error) => {
            eprintln!("parse error: {}", error);
            std::process::exit(1);
        }
    }
}
