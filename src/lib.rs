//! # prismafmt - Prisma Schema Formatter Adapter
//!
//! prismafmt formats [Prisma](https://www.prisma.io/) schema files by handing
//! them to an external formatting engine. The crate itself contains no Prisma
//! grammar and no layout rules. It:
//!
//! - registers the `.prisma` extension and a `prisma` parser,
//! - wraps the raw file in a single placeholder node,
//! - turns host formatting options into the engine's JSON request,
//! - returns the engine's output unchanged.
//!
//! ## Usage
//!
//! ### As a Library
//!
//! ```rust
//! use std::sync::Arc;
//! use prismafmt::error::EngineError;
//! use prismafmt::parser::parse;
//! use prismafmt::printer::{PrintOptions, Printer};
//!
//! // Any `Fn(&str, &str) -> Result<String, EngineError>` is an engine.
//! let engine = |text: &str, _request: &str| -> Result<String, EngineError> {
//!     Ok(text.trim_end().to_owned() + "\n")
//! };
//! let printer = Printer::new(Arc::new(engine));
//!
//! let opts = PrintOptions {
//!     filepath: Some("/work/schema.prisma".into()),
//!     ..PrintOptions::default()
//! };
//! let formatted = printer.print(&parse("model User {}\n\n\n"), &opts).unwrap();
//! assert_eq!(formatted, "model User {}\n");
//! ```
//!
//! ### As a CLI Tool
//!
//! The `prismafmt` binary discovers `.prisma` files and runs them through a
//! [`engine::CommandEngine`]. See the `main` module for CLI usage details.
//!
//! ## Modules
//!
//! - [`language`] - Static language registry
//! - [`parser`] - Placeholder parser
//! - [`printer`] - Request building and delegation to the engine
//! - [`engine`] - The engine trait and the subprocess engine
//! - [`plugin`] - Registration bundle of languages, parsers and printers
//! - [`host`] - File discovery, routing and write/check modes

/// Language registry
pub mod language;

/// Placeholder parser
pub mod parser;

/// Printer delegating to the formatting engine
pub mod printer;

/// Formatting engine seam
pub mod engine;

/// Error types
pub mod error;

/// Registration bundle
pub mod plugin;

/// Minimal host driver
pub mod host;
