//! The execution context and its collaborators.
//!
//! `context` owns the scheduler and per-opcode handlers; `banks` the
//! register file and byte memory; `ports` the output/input ports; `trace`
//! the debug-tracing hooks.

mod banks;
mod context;
mod error;
mod ports;
mod trace;

#[cfg(test)]
mod engine_tests;

pub use banks::{ByteMemory, RegisterFile, RingSpace, REGISTER_COUNT};
pub use context::{ContextBuilder, ExecutionContext};
pub use error::RuntimeError;
pub use ports::{InputPort, OutputLog};
pub use trace::{NoopTracer, PrintTracer, Tracer};
