//! Error types for the engine, printer and host layers

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures reported by a formatting engine
#[derive(Debug, Error)]
pub enum EngineError {
    /// The engine refused the input, typically because it is not valid Prisma.
    #[error("{0}")]
    Rejected(String),

    /// The engine process could not be started.
    #[error("failed to start formatting engine '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// Communication with the engine process broke down.
    #[error("I/O error talking to formatting engine '{program}': {source}")]
    Io {
        program: String,
        #[source]
        source: io::Error,
    },

    /// The engine process exited unsuccessfully.
    #[error("formatting engine '{program}' exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: String,
        stderr: String,
    },

    /// The engine wrote something that is not UTF-8 text.
    #[error("formatting engine '{program}' produced non UTF-8 output")]
    InvalidOutput {
        program: String,
        #[source]
        source: std::string::FromUtf8Error,
    },
}

/// Failures of a single print call
#[derive(Debug, Error)]
pub enum PrintError {
    #[error("no file path given; the formatting engine needs a document URI")]
    MissingFilePath,

    #[error("file path '{path}' does not form a valid file URI: {source}")]
    InvalidFilePath {
        path: String,
        #[source]
        source: url::ParseError,
    },

    #[error("failed to serialise format request: {0}")]
    SerializeRequest(#[source] serde_json::Error),

    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Failures raised while routing and formatting files in the host
#[derive(Debug, Error)]
pub enum HostError {
    #[error("no parser could be inferred for file '{}'", path.display())]
    NoParser { path: PathBuf },

    #[error("parser '{0}' is not registered")]
    UnknownParser(String),

    #[error("no printer registered for AST format '{0}'")]
    NoPrinter(String),

    #[error("{}: {source}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{}: {source}", path.display())]
    Print {
        path: PathBuf,
        #[source]
        source: PrintError,
    },
}
