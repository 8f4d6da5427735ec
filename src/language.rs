//! Static metadata for the languages this formatter handles
//!
//! The registry is a fixed `'static` slice holding one descriptor for Prisma
//! schema files. Hosts read it to decide which files are routed to the
//! `prisma` parser.
//!
//! # Example
//!
//! ```rust
//! use prismafmt::language::{find_by_path, languages};
//!
//! assert_eq!(languages()[0].name, "Prisma");
//! assert!(find_by_path("db/schema.prisma").is_some());
//! assert!(find_by_path("db/schema.sql").is_none());
//! ```

use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;

/// Describes one supported file type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageDescriptor {
    /// Human readable language name
    pub name: &'static str,
    /// Parser names able to handle this language
    pub parsers: &'static [&'static str],
    /// File suffixes, including the leading dot
    pub extensions: &'static [&'static str],
    /// Identifier from GitHub's linguist language registry
    pub linguist_language_id: u64,
    /// Language identifiers used by VS Code
    pub vscode_language_ids: &'static [&'static str],
}

static LANGUAGES: [LanguageDescriptor; 1] = [LanguageDescriptor {
    name: "Prisma",
    parsers: &["prisma"],
    extensions: &[".prisma"],
    linguist_language_id: 499_933_428,
    vscode_language_ids: &["prisma"],
}];

/// Maps every registered extension (with its leading dot) to its language.
static EXTENSION_INDEX: Lazy<HashMap<&'static str, &'static LanguageDescriptor>> =
    Lazy::new(|| {
        LANGUAGES
            .iter()
            .flat_map(|lang| lang.extensions.iter().map(move |ext| (*ext, lang)))
            .collect()
    });

/// All registered languages
///
/// Returns the same `'static` slice on every call, so hosts may cache it.
pub fn languages() -> &'static [LanguageDescriptor] {
    &LANGUAGES
}

/// Look up a language by file extension
///
/// Accepts the extension with or without its leading dot. Matching is
/// case-sensitive.
pub fn find_by_extension(ext: &str) -> Option<&'static LanguageDescriptor> {
    if ext.starts_with('.') {
        EXTENSION_INDEX.get(ext).copied()
    } else {
        EXTENSION_INDEX.get(format!(".{ext}").as_str()).copied()
    }
}

/// Look up the language for a file path by its extension
pub fn find_by_path(path: impl AsRef<Path>) -> Option<&'static LanguageDescriptor> {
    path.as_ref()
        .extension()
        .and_then(|s| s.to_str())
        .and_then(find_by_extension)
}
