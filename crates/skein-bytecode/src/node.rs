//! Instruction nodes: the unit of the program graph.

use crate::addr::AbsoluteAddress;
use crate::instruction::Instruction;

/// Progress marker for instructions that span more than one scheduler turn.
///
/// Only the conditional uses this in the current instruction set; everything
/// else stays at `NotStarted`.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Continuation {
    #[default]
    NotStarted,
    /// The condition was odd; waiting for the then-branch to produce.
    AwaitingThenBranch,
    /// The condition was even; waiting for the else-branch to produce.
    AwaitingElseBranch,
}

/// One node of the program graph.
///
/// `address` is assigned once at lift time and never changes. `active` is
/// true while the node holds a produced value that has not been consumed;
/// `output` is only meaningful while `active` is set.
#[derive(Clone, Copy, Debug)]
pub struct InstructionNode {
    pub address: AbsoluteAddress,
    pub instruction: Instruction,
    pub active: bool,
    pub output: i8,
    pub cont: Continuation,
}

impl InstructionNode {
    /// A fresh, inactive node.
    pub fn new(address: AbsoluteAddress, instruction: Instruction) -> Self {
        Self {
            address,
            instruction,
            active: false,
            output: 0,
            cont: Continuation::NotStarted,
        }
    }
}
