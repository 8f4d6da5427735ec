//! A minimal host that drives the plugin over files
//!
//! The host picks a parser for each file (explicit parser name first, then
//! the file extension), runs parse then print, and decides what to do with
//! the result according to [`Mode`]. Directories are walked recursively and
//! only files with a registered extension are kept.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use prismafmt::error::EngineError;
//! use prismafmt::host::{Host, HostOptions};
//! use prismafmt::plugin::Plugin;
//!
//! let engine = |text: &str, _req: &str| -> Result<String, EngineError> { Ok(text.trim_end().to_owned() + "\n") };
//! let host = Host::new(Plugin::new(Arc::new(engine)), HostOptions::default());
//! let out = host.format_text("model A {}   \n\n", "/work/schema.prisma").unwrap();
//! assert_eq!(out, "model A {}\n");
//! ```

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{debug, error};
use walkdir::WalkDir;

use crate::error::HostError;
use crate::language;
use crate::parser::ParserSpec;
use crate::plugin::Plugin;
use crate::printer::PrintOptions;

/// Output mode for the host
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Print formatted code to stdout
    Stdout,
    /// Write formatted code back to source files
    Write,
    /// Only report whether formatting would change the code
    Check,
}

/// Host-level configuration applied to every file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostOptions {
    pub tab_width: u32,
    pub use_tabs: bool,
    /// Force this parser instead of inferring one from the extension
    pub parser: Option<String>,
}

impl Default for HostOptions {
    fn default() -> Self {
        Self {
            tab_width: 2,
            use_tabs: false,
            parser: None,
        }
    }
}

/// Outcome of formatting a batch of files
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Summary {
    /// Files whose formatted output differs from their content
    pub changed: Vec<PathBuf>,
    /// Files that could not be formatted
    pub failed: usize,
}

pub struct Host {
    plugin: Plugin,
    options: HostOptions,
}

impl Host {
    pub fn new(plugin: Plugin, options: HostOptions) -> Self {
        Self { plugin, options }
    }

    /// Choose the parser for a file
    ///
    /// # Errors
    ///
    /// [`HostError::UnknownParser`] if an explicit parser name is not
    /// registered, [`HostError::NoParser`] if the extension is not.
    pub fn resolve_parser(&self, path: &Path) -> Result<&'static ParserSpec, HostError> {
        if let Some(name) = &self.options.parser {
            return self
                .plugin
                .parser(name)
                .ok_or_else(|| HostError::UnknownParser(name.clone()));
        }
        let lang = language::find_by_path(path).ok_or_else(|| HostError::NoParser {
            path: path.to_path_buf(),
        })?;
        lang.parsers
            .iter()
            .find_map(|name| self.plugin.parser(name))
            .ok_or_else(|| HostError::NoParser {
                path: path.to_path_buf(),
            })
    }

    /// Build the printer options for a file, using its absolute path
    pub fn print_options(&self, path: &Path) -> PrintOptions {
        let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
        PrintOptions {
            filepath: Some(absolute.to_string_lossy().into_owned()),
            tab_width: self.options.tab_width,
            use_tabs: self.options.use_tabs,
        }
    }

    /// Format source text that belongs to `path`
    pub fn format_text(&self, text: &str, path: impl AsRef<Path>) -> Result<String, HostError> {
        let path = path.as_ref();
        let spec = self.resolve_parser(path)?;
        let node = (spec.parse)(text);
        let printer = self
            .plugin
            .printer(spec.ast_format)
            .ok_or_else(|| HostError::NoPrinter(spec.ast_format.to_owned()))?;
        debug!(
            path = %path.display(),
            ast_format = spec.ast_format,
            start = (spec.loc_start)(&node),
            end = (spec.loc_end)(&node),
            "printing"
        );
        printer
            .print(&node, &self.print_options(path))
            .map_err(|source| HostError::Print {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Format one file; returns whether its content would change
    pub fn process_file(&self, path: &Path, mode: Mode) -> Result<bool, HostError> {
        let io_err = |source| HostError::Io {
            path: path.to_path_buf(),
            source,
        };
        let content = fs::read_to_string(path).map_err(io_err)?;
        let formatted = self.format_text(&content, path)?;
        let changed = formatted != content;
        match mode {
            Mode::Stdout => {
                // One lock for header and body so parallel files do not interleave.
                let mut stdout = io::stdout().lock();
                write!(stdout, "===== {} =====\n{}", path.display(), formatted)
                    .and_then(|()| stdout.flush())
                    .map_err(io_err)?;
            }
            Mode::Write => {
                if changed {
                    fs::write(path, formatted).map_err(io_err)?;
                }
            }
            Mode::Check => {}
        }
        Ok(changed)
    }

    /// Format many files in parallel, logging each failure
    pub fn process_files(&self, paths: &[PathBuf], mode: Mode) -> Summary {
        let results: Vec<_> = paths
            .par_iter()
            .map(|path| (path, self.process_file(path, mode)))
            .collect();
        let mut summary = Summary::default();
        for (path, result) in results {
            match result {
                Ok(true) => summary.changed.push(path.clone()),
                Ok(false) => {}
                Err(e) => {
                    error!("{e}");
                    summary.failed += 1;
                }
            }
        }
        summary
    }
}

/// Files to format, plus the paths that could not be walked
#[derive(Debug, Default)]
pub struct Collected {
    pub files: Vec<PathBuf>,
    pub errors: Vec<HostError>,
}

/// Expand files and directories into the files to format
///
/// Files given explicitly are kept whatever their extension, so a forced
/// parser can apply to them; directory contents are filtered by registered
/// extension. Missing or unreadable paths are reported in
/// [`Collected::errors`].
pub fn collect_files(paths: &[PathBuf]) -> Collected {
    let mut out = Collected::default();
    for path in paths {
        if path.is_file() {
            out.files.push(path.clone());
            continue;
        }
        for entry in WalkDir::new(path).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(source) => {
                    out.errors.push(HostError::Walk {
                        path: source.path().unwrap_or(path).to_path_buf(),
                        source,
                    });
                    continue;
                }
            };
            let p = entry.path();
            if p.is_file() && language::find_by_path(p).is_some() {
                out.files.push(p.to_path_buf());
            }
        }
    }
    out
}
