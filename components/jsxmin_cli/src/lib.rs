//! jsxmin CLI Library
//!
//! Provides the pipeline Runtime and supporting modules for the jsxmin
//! command-line tools (`jsxmin`, `jsexports`, `jsbeautify`).

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cli;
pub mod error;
pub mod runtime;

pub use cli::Cli;
pub use error::{CliError, CliResult};
pub use runtime::{read_input, Runtime};
