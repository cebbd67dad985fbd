//! Programs: the lifter and the dependency resolver.

use crate::addr::{AbsoluteAddress, RelativeAddress, translate_relative};
use crate::error::DecodeError;
use crate::instruction::Instruction;
use crate::node::{Continuation, InstructionNode};
use crate::opcode::Opcode;

/// The fixed, ordered node array produced by one lift.
///
/// Addresses are array indices; relative offsets resolve into `[0, len)`
/// with wraparound, so the node array behaves as a circle. The raw byte
/// image is retained because the "self" byte-memory bank is seeded from it.
#[derive(Debug, Clone)]
pub struct Program {
    nodes: Vec<InstructionNode>,
    image: Vec<i8>,
}

impl Program {
    /// Lift a raw byte stream into a program.
    ///
    /// Single scan with a remaining-operand counter: when the counter is
    /// zero the next byte is an opcode; while it is positive, bytes are
    /// operands for the node under construction. A node is finalized and
    /// assigned the next sequential address once its operands are complete.
    pub fn lift(bytes: &[i8]) -> Result<Self, DecodeError> {
        let mut nodes = Vec::new();
        let mut pos = 0;

        while pos < bytes.len() {
            let opcode_offset = pos;
            let byte = bytes[pos];
            let opcode = Opcode::from_byte(byte).ok_or(DecodeError::UnknownOpcode {
                byte,
                offset: opcode_offset,
            })?;
            pos += 1;

            let expected = opcode.arity().operand_count();
            let found = bytes.len() - pos;
            if found < expected {
                return Err(DecodeError::TruncatedStream {
                    opcode: opcode.name(),
                    offset: opcode_offset,
                    expected,
                    found,
                });
            }
            let operands = &bytes[pos..pos + expected];
            pos += expected;

            let address = nodes.len();
            if address > AbsoluteAddress::MAX as usize {
                return Err(DecodeError::ProgramTooLarge(address + 1));
            }
            nodes.push(InstructionNode::new(
                address as AbsoluteAddress,
                Instruction::from_parts(opcode, operands),
            ));
        }

        Ok(Self {
            nodes,
            image: bytes.to_vec(),
        })
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes in address order.
    pub fn nodes(&self) -> &[InstructionNode] {
        &self.nodes
    }

    /// The node at an absolute address. Panics on an out-of-range address;
    /// resolved addresses are always in range.
    pub fn node(&self, address: AbsoluteAddress) -> &InstructionNode {
        &self.nodes[address as usize]
    }

    pub fn node_mut(&mut self, address: AbsoluteAddress) -> &mut InstructionNode {
        &mut self.nodes[address as usize]
    }

    /// The raw byte stream this program was lifted from.
    pub fn image(&self) -> &[i8] {
        &self.image
    }

    /// Resolve a relative offset against a node's address, wrapping around
    /// the program length.
    pub fn resolve(&self, base: AbsoluteAddress, offset: RelativeAddress) -> AbsoluteAddress {
        translate_relative(base, offset, self.nodes.len())
    }

    /// Absolute addresses the node at `address` reads from, in payload
    /// order.
    ///
    /// Ring *get* contributes no edges: its selector names a bank cell, not
    /// a node. Ring *set* contributes exactly its value-to-store address.
    /// The conditional's dependency is continuation-state dependent - only
    /// the condition at first, then only the chosen branch - which is what
    /// keeps the unchosen branch from ever being scheduled.
    pub fn dependencies(&self, address: AbsoluteAddress) -> Vec<AbsoluteAddress> {
        let node = self.node(address);
        let r = |offset| self.resolve(address, offset);
        match node.instruction {
            Instruction::Const { .. }
            | Instruction::Cut
            | Instruction::Nop
            | Instruction::Get { .. } => Vec::new(),

            Instruction::Block1 { body: a } => vec![r(a)],
            Instruction::Output { source: a } => vec![r(a)],
            Instruction::Trigger { root: a } => vec![r(a)],

            Instruction::Add { lhs, rhs }
            | Instruction::Divide { lhs, rhs }
            | Instruction::Geq { lhs, rhs }
            | Instruction::Leq { lhs, rhs }
            | Instruction::Multiply { lhs, rhs }
            | Instruction::Subtract { lhs, rhs } => vec![r(lhs), r(rhs)],

            Instruction::Block2 { first, second } => vec![r(first), r(second)],
            Instruction::Block3 {
                first,
                second,
                third,
            } => vec![r(first), r(second), r(third)],
            Instruction::Block4 {
                first,
                second,
                third,
                fourth,
            } => vec![r(first), r(second), r(third), r(fourth)],

            Instruction::If {
                cond,
                then_branch,
                else_branch,
            } => match node.cont {
                Continuation::NotStarted => vec![r(cond)],
                Continuation::AwaitingThenBranch => vec![r(then_branch)],
                Continuation::AwaitingElseBranch => vec![r(else_branch)],
            },

            Instruction::Set { source, .. } => vec![r(source)],
        }
    }

    /// Addresses of every trigger node, in address order. These seed the
    /// execution context's pending set.
    pub fn trigger_addresses(&self) -> Vec<AbsoluteAddress> {
        self.nodes
            .iter()
            .filter(|n| matches!(n.instruction, Instruction::Trigger { .. }))
            .map(|n| n.address)
            .collect()
    }
}
