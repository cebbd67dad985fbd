//! Pending-set execution engine for Skein dataflow bytecode.
//!
//! The engine drives a lifted program to completion (or budget exhaustion)
//! by repeatedly sweeping a pending set of node addresses, executing nodes
//! whose dependencies are active and discovering one layer of unmet
//! dependencies per turn.

pub mod engine;

// Re-export commonly used items at crate root
pub use engine::{
    ByteMemory, ContextBuilder, ExecutionContext, InputPort, NoopTracer, OutputLog, PrintTracer,
    RegisterFile, RingSpace, RuntimeError, Tracer, REGISTER_COUNT,
};
