//! The seam between the printer and the external formatting engine
//!
//! The engine owns the Prisma grammar and layout rules. This crate only needs
//! one call from it: `format(text, request_json) -> formatted`. Anything that
//! can answer that call is a [`FormatEngine`]:
//!
//! - a closure, handy for embedding an in-process engine or for tests
//! - [`CommandEngine`], which runs an external program per call
//!
//! # Example
//!
//! ```rust
//! use prismafmt::engine::FormatEngine;
//! use prismafmt::error::EngineError;
//!
//! let echo = |text: &str, _request: &str| -> Result<String, EngineError> { Ok(text.to_owned()) };
//! assert_eq!(echo.format("model A {}", "{}").unwrap(), "model A {}");
//! ```

use std::ffi::OsString;
use std::io::{Read, Write};
use std::process::{Command, Stdio};
use std::thread;

use tracing::debug;

use crate::error::EngineError;

/// Tracing target for engine calls.
const ENGINE_TARGET: &str = "prismafmt::engine";

/// An external formatter for Prisma source
///
/// `request_json` is the serialized `FormatRequest` built by the printer.
/// Implementations must return the formatted text or an error; the printer
/// never alters either.
pub trait FormatEngine: Send + Sync {
    fn format(&self, text: &str, request_json: &str) -> Result<String, EngineError>;
}

impl<F> FormatEngine for F
where
    F: Fn(&str, &str) -> Result<String, EngineError> + Send + Sync,
{
    fn format(&self, text: &str, request_json: &str) -> Result<String, EngineError> {
        self(text, request_json)
    }
}

/// Runs an external program once per format call
///
/// The program is invoked as `program [args...] <request_json>`, receives the
/// source on stdin and must print the formatted source on stdout. A non-zero
/// exit status is reported as [`EngineError::Failed`] with the program's
/// stderr. There is no timeout: a hung engine hangs the call.
#[derive(Debug, Clone)]
pub struct CommandEngine {
    program: OsString,
    args: Vec<OsString>,
}

impl CommandEngine {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Add arguments placed before the request JSON
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    fn program_name(&self) -> String {
        self.program.to_string_lossy().into_owned()
    }
}

impl FormatEngine for CommandEngine {
    fn format(&self, text: &str, request_json: &str) -> Result<String, EngineError> {
        let program = self.program_name();
        debug!(
            target: ENGINE_TARGET,
            program = %program,
            source_bytes = text.len(),
            request = request_json,
            "spawning formatting engine"
        );

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .arg(request_json)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| EngineError::Spawn {
                program: program.clone(),
                source,
            })?;

        let io_err = |source| EngineError::Io {
            program: program.clone(),
            source,
        };

        let mut stdin = child.stdin.take().ok_or_else(|| {
            io_err(std::io::Error::other("failed to capture engine stdin"))
        })?;
        let mut stdout = child.stdout.take().ok_or_else(|| {
            io_err(std::io::Error::other("failed to capture engine stdout"))
        })?;
        let mut stderr = child.stderr.take().ok_or_else(|| {
            io_err(std::io::Error::other("failed to capture engine stderr"))
        })?;

        // Feed stdin while draining stdout and stderr so neither pipe fills up.
        let (write_result, stderr_result, read_result) = thread::scope(|scope| {
            let writer = scope.spawn(move || {
                let result = stdin.write_all(text.as_bytes());
                drop(stdin);
                result
            });
            let stderr_reader = scope.spawn(move || {
                let mut buf = Vec::new();
                stderr.read_to_end(&mut buf).map(|_| buf)
            });
            let mut out = Vec::new();
            let read = stdout.read_to_end(&mut out).map(|_| out);
            (
                writer.join().unwrap_or_else(|_| {
                    Err(std::io::Error::other("engine stdin writer panicked"))
                }),
                stderr_reader.join().unwrap_or_else(|_| {
                    Err(std::io::Error::other("engine stderr reader panicked"))
                }),
                read,
            )
        });

        let status = child.wait().map_err(io_err)?;
        let err_bytes = stderr_result.map_err(io_err)?;

        if !status.success() {
            let stderr = String::from_utf8_lossy(&err_bytes).trim().to_owned();
            debug!(target: ENGINE_TARGET, program = %program, %status, "engine failed");
            return Err(EngineError::Failed {
                program,
                status: status.to_string(),
                stderr,
            });
        }

        // A broken pipe only matters if the engine also claimed success.
        write_result.map_err(io_err)?;
        let out = read_result.map_err(io_err)?;

        debug!(
            target: ENGINE_TARGET,
            program = %program,
            output_bytes = out.len(),
            "engine finished"
        );
        String::from_utf8(out).map_err(|source| EngineError::InvalidOutput { program, source })
    }
}
