//! Bytecode format and instruction-node types for Skein.
//!
//! This crate contains:
//! - The instruction catalog (opcodes and their arity classes)
//! - The tagged instruction type and node/program model
//! - The lifter that turns raw signed bytes into a program
//! - Relative-address resolution and the dependency resolver
//! - Human-readable node dumps for debugging

pub mod addr;
pub mod dump;
pub mod error;
pub mod instruction;
pub mod node;
pub mod opcode;
pub mod program;


// Re-export commonly used items at crate root
pub use addr::{AbsoluteAddress, RelativeAddress, Ring, translate_relative};
pub use dump::{dump_program, show_node};
pub use error::DecodeError;
pub use instruction::Instruction;
pub use node::{Continuation, InstructionNode};
pub use opcode::{ArityClass, Opcode};
pub use program::Program;
