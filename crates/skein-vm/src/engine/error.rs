//! Errors that can occur while executing a program.

use skein_bytecode::{AbsoluteAddress, Ring};

/// Fatal execution failure. Aborts the current `step()`; the run cannot be
/// resumed or retried.
///
/// The decode-era failure classes "opcode with no handler" and
/// "continuation state outside the instruction's set" cannot be constructed
/// here: the tagged `Instruction` and `Continuation` enums are matched
/// exhaustively, so the compiler rejects them instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuntimeError {
    #[error("division by zero at address {address}")]
    DivisionByZero { address: AbsoluteAddress },

    #[error("ring {ring} at address {address} selects no bank")]
    InvalidRing { address: AbsoluteAddress, ring: Ring },
}
