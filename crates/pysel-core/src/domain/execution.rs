//! Execution data types shared between services and the process port.

use futures_core::Stream;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::pin::Pin;

/// A fully shaped invocation: program, arguments, and optional environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionInfo {
    /// Program to invoke (an interpreter or a managing tool).
    pub program: PathBuf,
    /// Arguments, in order.
    pub args: Vec<String>,
    /// Extra environment variables, when the invocation needs them.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub env: Option<HashMap<String, String>>,
}

impl ExecutionInfo {
    /// Create an invocation with no extra environment.
    #[must_use]
    pub const fn new(program: PathBuf, args: Vec<String>) -> Self {
        Self {
            program,
            args,
            env: None,
        }
    }
}

/// Interpreter metadata reported by the in-environment info probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterpreterInfo {
    /// Dotted version string, e.g. `3.12.1`.
    pub version: String,
    /// `sys.prefix` of the interpreter.
    pub sys_prefix: String,
    /// `sys.executable` as reported by the interpreter itself.
    pub executable: PathBuf,
    /// Whether the interpreter is a 64-bit build.
    pub is64_bit: bool,
}

/// Collected output of a finished process.
#[derive(Debug, Clone, Default)]
pub struct ProcessOutput {
    /// Captured stdout, lossily decoded.
    pub stdout: String,
    /// Captured stderr, lossily decoded.
    pub stderr: String,
    /// Exit code, `None` when terminated by a signal.
    pub exit_code: Option<i32>,
}

impl ProcessOutput {
    /// Whether the process exited with code 0.
    #[must_use]
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Which stream a line of observable output came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputSource {
    Stdout,
    Stderr,
}

/// One line of streamed process output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLine {
    /// Stream the line came from.
    pub source: OutputSource,
    /// Line text without the trailing newline.
    pub text: String,
}

impl OutputLine {
    /// A stdout line.
    pub fn stdout(text: impl Into<String>) -> Self {
        Self {
            source: OutputSource::Stdout,
            text: text.into(),
        }
    }

    /// A stderr line.
    pub fn stderr(text: impl Into<String>) -> Self {
        Self {
            source: OutputSource::Stderr,
            text: text.into(),
        }
    }
}

/// Stream of tagged output lines from an observable execution.
///
/// The stream ends when both process streams close; dropping it releases the
/// underlying readers.
pub type OutputStream = Pin<Box<dyn Stream<Item = OutputLine> + Send>>;
