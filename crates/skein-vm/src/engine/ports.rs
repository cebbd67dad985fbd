//! Output and input ports.

use std::collections::VecDeque;

/// Append-only sequence of emitted values.
#[derive(Debug, Default)]
pub struct OutputLog(Vec<i8>);

impl OutputLog {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    #[inline]
    pub fn push(&mut self, value: i8) {
        self.0.push(value);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[i8] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<i8> {
        self.0
    }
}

/// Optional FIFO of externally supplied values.
///
/// No opcode in the current instruction set consumes it; it completes the
/// port model and is filled through the context builder.
#[derive(Debug, Default)]
pub struct InputPort(VecDeque<i8>);

impl InputPort {
    pub fn new() -> Self {
        Self(VecDeque::new())
    }

    pub fn from_values(values: Vec<i8>) -> Self {
        Self(values.into())
    }

    /// Append a value to the back of the queue.
    pub fn push(&mut self, value: i8) {
        self.0.push_back(value);
    }

    /// Take the oldest value, if any.
    pub fn next(&mut self) -> Option<i8> {
        self.0.pop_front()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
