//! Command-line interface definition for the `jsxmin` binary

use clap::Parser;

/// JavaScript source minifier
#[derive(Parser, Debug)]
#[command(name = "jsxmin", version, about = "JavaScript source minifier")]
pub struct Cli {
    /// Input file; stdin when omitted or '-'
    pub file: Option<String>,

    /// Rename underscore-prefixed file-scope names
    #[arg(long)]
    pub rename_globals: bool,

    /// Rename underscore-prefixed properties reached through literal keys
    #[arg(long)]
    pub rename_properties: bool,

    /// Pretty-print the output instead of crushing it
    #[arg(long)]
    pub pretty: bool,

    /// Keep statements on their original source lines
    #[arg(long)]
    pub preserve_lines: bool,

    /// Dump the parsed AST to stderr before minifying
    #[arg(long)]
    pub print_ast: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["jsxmin"]);
        assert!(cli.file.is_none());
        assert!(!cli.rename_globals);
        assert!(!cli.rename_properties);
        assert!(!cli.pretty);
    }

    #[test]
    fn test_flags() {
        let cli = Cli::parse_from([
            "jsxmin",
            "--rename-globals",
            "--rename-properties",
            "--pretty",
            "input.js",
        ]);
        assert_eq!(cli.file.as_deref(), Some("input.js"));
        assert!(cli.rename_globals);
        assert!(cli.rename_properties);
        assert!(cli.pretty);
    }
}
