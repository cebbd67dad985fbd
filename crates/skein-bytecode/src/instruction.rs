//! Tagged instruction values.
//!
//! Each variant carries exactly the operand fields its arity class allows,
//! so a payload can never be read under the wrong shape and dispatch is an
//! exhaustive match instead of a runtime table.

use crate::addr::{RelativeAddress, Ring};
use crate::opcode::{ArityClass, Opcode};

/// A decoded instruction: opcode and payload as one inseparable value.
///
/// Relative-address fields are signed offsets from the owning node's
/// address; `value`, `ring`, and `index` fields are verbatim stream bytes.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Instruction {
    Add { lhs: RelativeAddress, rhs: RelativeAddress },
    Block1 { body: RelativeAddress },
    Block2 { first: RelativeAddress, second: RelativeAddress },
    Block3 { first: RelativeAddress, second: RelativeAddress, third: RelativeAddress },
    Block4 {
        first: RelativeAddress,
        second: RelativeAddress,
        third: RelativeAddress,
        fourth: RelativeAddress,
    },
    Const { value: i8 },
    Cut,
    Divide { lhs: RelativeAddress, rhs: RelativeAddress },
    Geq { lhs: RelativeAddress, rhs: RelativeAddress },
    Get { ring: Ring, index: i8 },
    If {
        cond: RelativeAddress,
        then_branch: RelativeAddress,
        else_branch: RelativeAddress,
    },
    Leq { lhs: RelativeAddress, rhs: RelativeAddress },
    Multiply { lhs: RelativeAddress, rhs: RelativeAddress },
    Nop,
    Output { source: RelativeAddress },
    Set { ring: Ring, index: i8, source: RelativeAddress },
    Subtract { lhs: RelativeAddress, rhs: RelativeAddress },
    Trigger { root: RelativeAddress },
}

impl Instruction {
    /// Assemble an instruction from its opcode and collected operand bytes.
    ///
    /// `operands` is in stream order and must have exactly the opcode's
    /// operand count; the lifter guarantees this before calling.
    pub fn from_parts(opcode: Opcode, operands: &[i8]) -> Self {
        debug_assert_eq!(operands.len(), opcode.arity().operand_count());
        match opcode {
            Opcode::Add => Self::Add { lhs: operands[0], rhs: operands[1] },
            Opcode::Block1 => Self::Block1 { body: operands[0] },
            Opcode::Block2 => Self::Block2 { first: operands[0], second: operands[1] },
            Opcode::Block3 => Self::Block3 {
                first: operands[0],
                second: operands[1],
                third: operands[2],
            },
            Opcode::Block4 => Self::Block4 {
                first: operands[0],
                second: operands[1],
                third: operands[2],
                fourth: operands[3],
            },
            Opcode::Const => Self::Const { value: operands[0] },
            Opcode::Cut => Self::Cut,
            Opcode::Divide => Self::Divide { lhs: operands[0], rhs: operands[1] },
            Opcode::Geq => Self::Geq { lhs: operands[0], rhs: operands[1] },
            Opcode::Get => Self::Get { ring: operands[0], index: operands[1] },
            Opcode::If => Self::If {
                cond: operands[0],
                then_branch: operands[1],
                else_branch: operands[2],
            },
            Opcode::Leq => Self::Leq { lhs: operands[0], rhs: operands[1] },
            Opcode::Multiply => Self::Multiply { lhs: operands[0], rhs: operands[1] },
            Opcode::Nop => Self::Nop,
            Opcode::Output => Self::Output { source: operands[0] },
            Opcode::Set => Self::Set {
                ring: operands[0],
                index: operands[1],
                source: operands[2],
            },
            Opcode::Subtract => Self::Subtract { lhs: operands[0], rhs: operands[1] },
            Opcode::Trigger => Self::Trigger { root: operands[0] },
        }
    }

    /// The instruction's opcode.
    pub fn opcode(&self) -> Opcode {
        match self {
            Self::Add { .. } => Opcode::Add,
            Self::Block1 { .. } => Opcode::Block1,
            Self::Block2 { .. } => Opcode::Block2,
            Self::Block3 { .. } => Opcode::Block3,
            Self::Block4 { .. } => Opcode::Block4,
            Self::Const { .. } => Opcode::Const,
            Self::Cut => Opcode::Cut,
            Self::Divide { .. } => Opcode::Divide,
            Self::Geq { .. } => Opcode::Geq,
            Self::Get { .. } => Opcode::Get,
            Self::If { .. } => Opcode::If,
            Self::Leq { .. } => Opcode::Leq,
            Self::Multiply { .. } => Opcode::Multiply,
            Self::Nop => Opcode::Nop,
            Self::Output { .. } => Opcode::Output,
            Self::Set { .. } => Opcode::Set,
            Self::Subtract { .. } => Opcode::Subtract,
            Self::Trigger { .. } => Opcode::Trigger,
        }
    }

    /// The instruction's arity class.
    pub fn arity(&self) -> ArityClass {
        self.opcode().arity()
    }
}
