//! Placeholder parser for Prisma schema files
//!
//! No syntax tree is built here. The whole file is wrapped in a single
//! [`PlaceholderNode`] and handed to the printer, which forwards the raw text
//! to the formatting engine.
//!
//! # Example
//!
//! ```rust
//! use prismafmt::parser::{loc_end, loc_start, parse};
//!
//! let node = parse("model User {\n  id Int @id\n}\n");
//! assert_eq!(loc_start(&node), 0);
//! assert_eq!(loc_end(&node), node.text().len());
//! ```

/// AST format tag produced by the `prisma` parser
pub const AST_FORMAT: &str = "prisma-ast";

/// Name the parser is registered under
pub const PARSER_NAME: &str = "prisma";

/// The entire, unparsed source file as one node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderNode {
    text: String,
}

impl PlaceholderNode {
    /// The original file content, unmodified
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Wrap source text in a placeholder node. Never fails.
pub fn parse(source: &str) -> PlaceholderNode {
    PlaceholderNode {
        text: source.to_owned(),
    }
}

/// Start offset of a node; always the beginning of the file
pub fn loc_start(_node: &PlaceholderNode) -> usize {
    0
}

/// End offset of a node in bytes; the node spans the whole file
pub fn loc_end(node: &PlaceholderNode) -> usize {
    node.text.len()
}

/// Parser surface registered with the host
#[derive(Debug, Clone, Copy)]
pub struct ParserSpec {
    /// Tag selecting the printer for the produced node
    pub ast_format: &'static str,
    pub parse: fn(&str) -> PlaceholderNode,
    pub loc_start: fn(&PlaceholderNode) -> usize,
    pub loc_end: fn(&PlaceholderNode) -> usize,
}

static PARSERS: [(&str, ParserSpec); 1] = [(
    PARSER_NAME,
    ParserSpec {
        ast_format: AST_FORMAT,
        parse,
        loc_start,
        loc_end,
    },
)];

/// Look up a parser by the name a language declares
pub fn find_parser(name: &str) -> Option<&'static ParserSpec> {
    PARSERS
        .iter()
        .find(|(parser_name, _)| *parser_name == name)
        .map(|(_, spec)| spec)
}
