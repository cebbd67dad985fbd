//! Human-readable node dumps for debugging.
//!
//! One line per node: opcode name, active flag, arity-class name, then the
//! operand fields the arity class defines. Write-only output; nothing
//! parses it back.

use std::fmt::Write as _;

use crate::instruction::Instruction;
use crate::node::InstructionNode;
use crate::program::Program;

/// One-line summary of a node.
pub fn show_node(node: &InstructionNode) -> String {
    let opcode = node.instruction.opcode();
    let mut out = format!(
        "{} (Active={},Type={}",
        opcode.name(),
        if node.active { "Y" } else { "N" },
        opcode.arity().name(),
    );

    match node.instruction {
        Instruction::Cut | Instruction::Nop => {}
        Instruction::Const { value } => {
            let _ = write!(out, ",Data={value}");
        }
        Instruction::Block1 { body: a }
        | Instruction::Output { source: a }
        | Instruction::Trigger { root: a } => {
            let _ = write!(out, ",IAddr={a}");
        }
        Instruction::Add { lhs, rhs }
        | Instruction::Divide { lhs, rhs }
        | Instruction::Geq { lhs, rhs }
        | Instruction::Leq { lhs, rhs }
        | Instruction::Multiply { lhs, rhs }
        | Instruction::Subtract { lhs, rhs } => {
            let _ = write!(out, ",IAddr1={lhs},IAddr2={rhs}");
        }
        Instruction::Block2 { first, second } => {
            let _ = write!(out, ",IAddr1={first},IAddr2={second}");
        }
        Instruction::Block3 {
            first,
            second,
            third,
        } => {
            let _ = write!(out, ",IAddr1={first},IAddr2={second},IAddr3={third}");
        }
        Instruction::Block4 {
            first,
            second,
            third,
            fourth,
        } => {
            let _ = write!(
                out,
                ",IAddr1={first},IAddr2={second},IAddr3={third},IAddr4={fourth}"
            );
        }
        Instruction::If {
            cond,
            then_branch,
            else_branch,
        } => {
            let _ = write!(out, ",IAddr1={cond},IAddr2={then_branch},IAddr3={else_branch}");
        }
        Instruction::Get { ring, index } => {
            let _ = write!(out, ",Ring={ring},IAddr={index}");
        }
        Instruction::Set { ring, index, source } => {
            let _ = write!(out, ",Ring={ring},IAddr1={index},IAddr2={source}");
        }
    }

    out.push(')');
    out
}

/// All nodes of a program, one line each, in address order.
pub fn dump_program(program: &Program) -> String {
    let mut out = String::new();
    for node in program.nodes() {
        let _ = writeln!(out, "{}: {}", node.address, show_node(node));
    }
    out
}
