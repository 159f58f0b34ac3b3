//! Domain types for interpreter resolution.
//!
//! These are pure data types with no infrastructure dependencies. The
//! environment wrappers know how to shape a command line for their kind;
//! everything that actually touches the OS goes through a port.

mod environment;
mod execution;
mod request;

pub use environment::{
    CondaEnvironment, PixiEnvironment, PlainEnvironment, PythonEnvironment, StoreEnvironment,
};
pub use execution::{
    ExecutionInfo, InterpreterInfo, OutputLine, OutputSource, OutputStream, ProcessOutput,
};
pub use request::{DEFAULT_INTERPRETER, ExecutionRequest, Resource};
