//! JavaScript Emitter Component
//!
//! Prints an AST back to JavaScript source text. Three shapes of output are
//! supported:
//!
//! - crushed (the default): no whitespace beyond what the grammar requires
//! - pretty: indented, with spaces around operators
//! - line-preserving: statements are padded with newlines so they stay on
//!   their original source lines
//!
//! # Example
//!
//! ```
//! use emitter::{emit, EmitOptions};
//! use parser::Parser;
//!
//! let program = Parser::new("var x = 1 + 2;").parse().unwrap();
//! assert_eq!(emit(&program, EmitOptions::default()), "var x=1+2;");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod number;
mod printer;

pub use number::format_number;
pub use printer::{emit, EmitOptions, Emitter};
