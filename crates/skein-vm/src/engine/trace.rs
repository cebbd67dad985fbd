//! Execution tracing for debugging.
//!
//! The scheduler entry points are generic over `Tracer`, so `NoopTracer`
//! calls compile away while `PrintTracer` narrates turns, dispatches, and
//! bank writes to stderr.

use skein_bytecode::{show_node, AbsoluteAddress, InstructionNode};

use super::banks::RingSpace;

/// Hooks invoked by the scheduler. All default to no-ops; implement the
/// ones you care about.
pub trait Tracer {
    /// A turn is starting over this snapshot of the pending set.
    fn trace_turn(&mut self, _turn: u32, _snapshot: &[AbsoluteAddress]) {}

    /// A node's dependencies are met and its handler is about to run.
    fn trace_execute(&mut self, _node: &InstructionNode) {}

    /// A node finished and becomes active.
    fn trace_done(&mut self, _node: &InstructionNode) {}

    /// A multi-phase node ran but stays pending.
    fn trace_suspend(&mut self, _node: &InstructionNode) {}

    /// A visited node had an inactive dependency, now newly pending.
    fn trace_defer(&mut self, _address: AbsoluteAddress, _dependency: AbsoluteAddress) {}

    /// A value was appended to the output port.
    fn trace_output(&mut self, _value: i8) {}

    /// A value was written to a register or byte-memory cell.
    fn trace_bank_write(&mut self, _space: RingSpace, _index: i8, _value: i8) {}
}

/// Tracer that does nothing; optimized away entirely.
pub struct NoopTracer;

impl Tracer for NoopTracer {}

/// Tracer that prints every event to stderr.
#[derive(Default)]
pub struct PrintTracer;

impl Tracer for PrintTracer {
    fn trace_turn(&mut self, turn: u32, snapshot: &[AbsoluteAddress]) {
        eprintln!("turn {turn}: pending {snapshot:?}");
    }

    fn trace_execute(&mut self, node: &InstructionNode) {
        eprintln!("  exec {}: {}", node.address, show_node(node));
    }

    fn trace_done(&mut self, node: &InstructionNode) {
        eprintln!("  done {}: output {}", node.address, node.output);
    }

    fn trace_suspend(&mut self, node: &InstructionNode) {
        eprintln!("  hold {}: {}", node.address, show_node(node));
    }

    fn trace_defer(&mut self, address: AbsoluteAddress, dependency: AbsoluteAddress) {
        eprintln!("  defer {address}: needs {dependency}");
    }

    fn trace_output(&mut self, value: i8) {
        eprintln!("  emit {value}");
    }

    fn trace_bank_write(&mut self, space: RingSpace, index: i8, value: i8) {
        eprintln!("  write {}[{index}] = {value}", space.name());
    }
}
