//! Decode-time failures.

/// Fatal failure while lifting a byte stream into a program.
///
/// Decode errors abort program construction; a stream that trips one is
/// malformed and there is no partial result to recover.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// An opcode byte outside the catalog.
    #[error("unknown opcode byte {byte} at offset {offset}")]
    UnknownOpcode { byte: i8, offset: usize },

    /// The stream ended while operand bytes were still owed.
    #[error("stream ends inside {opcode} at offset {offset}: expected {expected} operand bytes, found {found}")]
    TruncatedStream {
        opcode: &'static str,
        offset: usize,
        expected: usize,
        found: usize,
    },

    /// More instructions than 16-bit addressing can cover.
    #[error("program has {0} instructions, exceeding 16-bit addressing")]
    ProgramTooLarge(usize),
}
