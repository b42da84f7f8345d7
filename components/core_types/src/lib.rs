//! Core types shared by the jsxmin components.
//!
//! This crate provides the foundational types for a JavaScript
//! source-to-source tool: error values and source location tracking.
//!
//! # Overview
//!
//! - [`JsError`] - Errors produced while processing a script
//! - [`ErrorKind`] - Types of errors
//! - [`SourcePosition`] - Source code location
//!
//! # Examples
//!
//! ```
//! use core_types::{JsError, ErrorKind};
//!
//! let error = JsError {
//!     kind: ErrorKind::SyntaxError,
//!     message: "Unexpected token".to_string(),
//!     source_position: None,
//! };
//!
//! assert_eq!(error.message, "Unexpected token");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod error;
mod source;

pub use error::{ErrorKind, JsError};
pub use source::SourcePosition;
