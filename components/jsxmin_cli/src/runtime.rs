//! Pipeline orchestration for the CLI tools
//!
//! The Runtime wires the components together: parse, rename, emit. Variable
//! renaming always runs (it is a no-op outside function scopes unless
//! globals are opted in); property renaming runs only when requested.

use crate::error::CliResult;
use emitter::{emit, EmitOptions};
use minifier::{PropertyRenaming, VariableRenaming};
use parser::Parser;
use std::io::Read;

/// Minification pipeline shared by the binaries.
pub struct Runtime {
    rename_globals: bool,
    rename_properties: bool,
    options: EmitOptions,
    print_ast: bool,
}

impl Runtime {
    /// Create a runtime with the given renaming switches.
    pub fn new(rename_globals: bool, rename_properties: bool) -> Self {
        Self {
            rename_globals,
            rename_properties,
            options: EmitOptions::default(),
            print_ast: false,
        }
    }

    /// Enable pretty output
    pub fn with_pretty(mut self, enabled: bool) -> Self {
        self.options.pretty = enabled;
        self
    }

    /// Keep statements on their original source lines
    pub fn with_preserve_lines(mut self, enabled: bool) -> Self {
        self.options.preserve_lines = enabled;
        self
    }

    /// Dump the parsed AST to stderr before minifying
    pub fn with_print_ast(mut self, enabled: bool) -> Self {
        self.print_ast = enabled;
        self
    }

    /// Minify a source string.
    ///
    /// # Errors
    /// Returns `CliError::Js` when the input does not parse.
    pub fn minify_source(&self, source: &str) -> CliResult<String> {
        let mut program = Parser::new(source).parse()?;

        if self.print_ast {
            eprintln!("{:#?}", program);
        }

        let mut variable_renaming = VariableRenaming::new(self.rename_globals);
        variable_renaming.process(&mut program);
        log::debug!("renamed {} file-scope names", variable_renaming.file_renames().len());

        if self.rename_properties {
            let mut property_renaming = PropertyRenaming::new();
            property_renaming.process(&mut program);
            log::debug!("renamed {} properties", property_renaming.renames().len());
        }

        Ok(emit(&program, self.options))
    }

    /// Minify the contents of a file.
    pub fn minify_file(&self, path: &str) -> CliResult<String> {
        let source = std::fs::read_to_string(path)?;
        self.minify_source(&source)
    }
}

/// Read the tool input: a named file, or stdin for `None` / `-`.
pub fn read_input(file: Option<&str>) -> CliResult<String> {
    match file {
        Some(path) if path != "-" => Ok(std::fs::read_to_string(path)?),
        _ => {
            let mut source = String::new();
            std::io::stdin().read_to_string(&mut source)?;
            Ok(source)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minify_source_crushes() {
        let runtime = Runtime::new(false, false);
        assert_eq!(
            runtime.minify_source("var x = 1 + 2;\n").unwrap(),
            "var x=1+2;"
        );
    }

    #[test]
    fn test_property_renaming_is_opt_in() {
        let source = "this._prop1 = 1;";
        let without = Runtime::new(false, false).minify_source(source).unwrap();
        assert_eq!(without, "this._prop1=1;");
        let with = Runtime::new(false, true).minify_source(source).unwrap();
        assert_eq!(with, "this._0=1;");
    }

    #[test]
    fn test_parse_errors_surface() {
        let runtime = Runtime::new(false, false);
        assert!(runtime.minify_source("var = 1;").is_err());
    }

    #[test]
    fn test_pretty_mode() {
        let runtime = Runtime::new(false, false).with_pretty(true);
        assert_eq!(runtime.minify_source("var x = 1;").unwrap(), "\nvar x = 1;");
    }
}
