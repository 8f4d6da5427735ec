//! Printer that hands the whole file to the formatting engine
//!
//! The printer builds a [`FormatRequest`] from the host's options, serializes
//! it to JSON and calls the [`FormatEngine`] with the node's raw text. The
//! engine's answer is returned as-is.
//!
//! # Example
//!
//! ```rust
//! use prismafmt::printer::{PrintOptions, build_request};
//!
//! let opts = PrintOptions {
//!     filepath: Some("/work/schema.prisma".into()),
//!     tab_width: 4,
//!     use_tabs: false,
//! };
//! let request = build_request(&opts).unwrap();
//! assert_eq!(request.text_document.uri, "file:///work/schema.prisma");
//! assert_eq!(request.options.tab_size, 4);
//! ```

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use url::Url;

use crate::engine::FormatEngine;
use crate::error::PrintError;
use crate::parser::PlaceholderNode;

/// Formatting options supplied by the host for one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintOptions {
    /// Path of the file being formatted; required to build the document URI
    pub filepath: Option<String>,
    /// Width of one indentation level
    pub tab_width: u32,
    /// Indent with tabs instead of spaces
    pub use_tabs: bool,
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self {
            filepath: None,
            tab_width: 2,
            use_tabs: false,
        }
    }
}

/// Request envelope understood by the formatting engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatRequest {
    pub text_document: TextDocument,
    pub options: RequestOptions,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextDocument {
    pub uri: String,
}

/// Whitespace policy sent to the engine
///
/// The three trimming flags are always enabled, whatever the host prefers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestOptions {
    pub tab_size: u32,
    pub insert_spaces: bool,
    pub trim_final_newlines: bool,
    pub insert_final_newline: bool,
    pub trim_trailing_whitespace: bool,
}

impl FormatRequest {
    pub fn to_json(&self) -> Result<String, PrintError> {
        serde_json::to_string(self).map_err(PrintError::SerializeRequest)
    }
}

/// Build the `file://` document URI for a path
///
/// The path is appended to `file://` verbatim and normalized by the URL
/// parser, so hosts should pass absolute paths.
pub fn document_uri(filepath: Option<&str>) -> Result<Url, PrintError> {
    let path = filepath
        .filter(|p| !p.trim().is_empty())
        .ok_or(PrintError::MissingFilePath)?;
    Url::parse(&format!("file://{path}")).map_err(|source| PrintError::InvalidFilePath {
        path: path.to_owned(),
        source,
    })
}

/// Translate host options into the engine's request shape
pub fn build_request(options: &PrintOptions) -> Result<FormatRequest, PrintError> {
    let uri = document_uri(options.filepath.as_deref())?;
    Ok(FormatRequest {
        text_document: TextDocument {
            uri: uri.to_string(),
        },
        options: RequestOptions {
            tab_size: options.tab_width,
            insert_spaces: !options.use_tabs,
            trim_final_newlines: true,
            insert_final_newline: true,
            trim_trailing_whitespace: true,
        },
    })
}

/// Printer for the `prisma-ast` format
#[derive(Clone)]
pub struct Printer {
    engine: Arc<dyn FormatEngine>,
}

impl fmt::Debug for Printer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Printer").finish_non_exhaustive()
    }
}

impl Printer {
    pub fn new(engine: Arc<dyn FormatEngine>) -> Self {
        Self { engine }
    }

    /// Format the node's text through the engine
    ///
    /// # Errors
    ///
    /// Fails when the file path is missing or does not form a URI, or when
    /// the engine rejects the source. Engine errors are passed through
    /// unchanged.
    pub fn print(&self, node: &PlaceholderNode, options: &PrintOptions) -> Result<String, PrintError> {
        let request = build_request(options)?.to_json()?;
        let formatted = self.engine.format(node.text(), &request)?;
        Ok(formatted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::parser::parse;
    use rstest::rstest;
    use std::sync::Mutex;

    fn opts(path: &str, tab_width: u32, use_tabs: bool) -> PrintOptions {
        PrintOptions {
            filepath: Some(path.to_owned()),
            tab_width,
            use_tabs,
        }
    }

    #[test]
    fn request_serializes_to_engine_wire_format() {
        let json = build_request(&opts("/tmp/schema.prisma", 2, false))
            .unwrap()
            .to_json()
            .unwrap();
        assert_eq!(
            json,
            r#"{"textDocument":{"uri":"file:///tmp/schema.prisma"},"options":{"tabSize":2,"insertSpaces":true,"trimFinalNewlines":true,"insertFinalNewline":true,"trimTrailingWhitespace":true}}"#
        );
    }

    #[rstest]
    #[case(2, false)]
    #[case(4, false)]
    #[case(8, true)]
    #[case(0, true)]
    fn request_mirrors_host_indentation(#[case] width: u32, #[case] use_tabs: bool) {
        let request = build_request(&opts("/srv/app/schema.prisma", width, use_tabs)).unwrap();
        assert_eq!(request.options.tab_size, width);
        assert_eq!(request.options.insert_spaces, !use_tabs);
        assert!(request.options.trim_final_newlines);
        assert!(request.options.insert_final_newline);
        assert!(request.options.trim_trailing_whitespace);
    }

    #[rstest]
    #[case("/tmp/schema.prisma", "file:///tmp/schema.prisma")]
    #[case("/tmp/my schema.prisma", "file:///tmp/my%20schema.prisma")]
    #[case("/a/../b/schema.prisma", "file:///b/schema.prisma")]
    fn uri_is_normalized(#[case] path: &str, #[case] expected: &str) {
        let request = build_request(&opts(path, 2, false)).unwrap();
        assert_eq!(request.text_document.uri, expected);
    }

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    #[case(Some("   "))]
    fn missing_path_is_rejected(#[case] path: Option<&str>) {
        let err = document_uri(path).unwrap_err();
        assert!(matches!(err, PrintError::MissingFilePath));
    }

    #[test]
    fn unparseable_path_is_rejected() {
        let err = document_uri(Some("[oops/schema.prisma")).unwrap_err();
        assert!(matches!(err, PrintError::InvalidFilePath { .. }), "{err:?}");
    }

    #[test]
    fn print_returns_engine_output_verbatim() {
        let seen = Arc::new(Mutex::new(None));
        let recorder = Arc::clone(&seen);
        let engine = move |text: &str, request: &str| -> Result<String, EngineError> {
            *recorder.lock().unwrap() = Some((text.to_owned(), request.to_owned()));
            Ok("  engine said so  \n\n".to_owned())
        };
        let printer = Printer::new(Arc::new(engine));
        let options = opts("/tmp/schema.prisma", 4, true);

        let out = printer.print(&parse("model A {}"), &options).unwrap();

        assert_eq!(out, "  engine said so  \n\n");
        let (text, request) = seen.lock().unwrap().clone().unwrap();
        assert_eq!(text, "model A {}");
        assert_eq!(request, build_request(&options).unwrap().to_json().unwrap());
    }

    #[test]
    fn print_without_path_never_reaches_engine() {
        let engine = |_: &str, _: &str| -> Result<String, EngineError> {
            panic!("engine must not be called")
        };
        let printer = Printer::new(Arc::new(engine));
        let err = printer
            .print(&parse("model A {}"), &PrintOptions::default())
            .unwrap_err();
        assert!(matches!(err, PrintError::MissingFilePath));
    }

    #[test]
    fn engine_rejection_propagates() {
        let engine = |_: &str, _: &str| -> Result<String, EngineError> {
            Err(EngineError::Rejected("Error validating: unexpected `{`".into()))
        };
        let printer = Printer::new(Arc::new(engine));
        let err = printer
            .print(&parse("model {"), &opts("/tmp/schema.prisma", 2, false))
            .unwrap_err();
        assert_eq!(err.to_string(), "Error validating: unexpected `{`");
    }
}
