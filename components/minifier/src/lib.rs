//! JavaScript Minifier Component
//!
//! The optimization passes of the tool chain. Each pass owns its state and
//! rewrites the AST in place through a `process` entry point:
//!
//! - [`VariableRenaming`] - shortens function-local bindings, and optionally
//!   underscore-prefixed file-scope names
//! - [`PropertyRenaming`] - shortens underscore-prefixed property names that
//!   are only reachable through literal keys
//! - [`CodeReduction`] - constant folding and dead-branch pruning
//! - [`substitution`] - structural expression replacement
//! - [`exports`] - collection of a script's file-scope names
//!
//! # Example
//!
//! ```
//! use minifier::PropertyRenaming;
//! use parser::Parser;
//!
//! let mut program = Parser::new("x._prop1 = 1;").parse().unwrap();
//! PropertyRenaming::new().process(&mut program);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod exports;
mod name_gen;
mod property_renaming;
mod reduction;
pub mod substitution;
mod variable_renaming;

pub use exports::collect_exports;
pub use name_gen::MinifiedNameGenerator;
pub use property_renaming::PropertyRenaming;
pub use reduction::CodeReduction;
pub use variable_renaming::VariableRenaming;
