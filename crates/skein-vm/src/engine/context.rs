//! The execution context: pending-set scheduler and per-opcode handlers.

use std::collections::BTreeSet;

use skein_bytecode::{
    AbsoluteAddress, Continuation, Instruction, InstructionNode, Program, RelativeAddress,
};

use super::banks::{ByteMemory, RegisterFile, RingSpace};
use super::error::RuntimeError;
use super::ports::{InputPort, OutputLog};
use super::trace::{NoopTracer, Tracer};

/// Mutable run state over one program.
///
/// Owns the node array; handlers reach individual nodes only through
/// `consume` and the finalizing write at the end of a dispatch, which keeps
/// the one-shot consumption discipline in one place.
pub struct ExecutionContext {
    program: Program,
    pending: BTreeSet<AbsoluteAddress>,
    registers: RegisterFile,
    memory: ByteMemory,
    output: OutputLog,
    input: InputPort,
    cut_reached: bool,
    turn: u32,
}

/// Builder for execution contexts.
pub struct ContextBuilder {
    program: Program,
    input: InputPort,
}

impl ContextBuilder {
    pub fn new(program: Program) -> Self {
        Self {
            program,
            input: InputPort::new(),
        }
    }

    /// Supply values for the input port.
    pub fn input(mut self, values: Vec<i8>) -> Self {
        self.input = InputPort::from_values(values);
        self
    }

    /// Build the context, seeding the pending set from every trigger node.
    pub fn build(self) -> ExecutionContext {
        let pending: BTreeSet<_> = self.program.trigger_addresses().into_iter().collect();
        let memory = ByteMemory::from_image(self.program.image());
        ExecutionContext {
            program: self.program,
            pending,
            registers: RegisterFile::new(),
            memory,
            output: OutputLog::new(),
            input: self.input,
            cut_reached: false,
            turn: 0,
        }
    }
}

impl ExecutionContext {
    /// Create a context builder.
    pub fn builder(program: Program) -> ContextBuilder {
        ContextBuilder::new(program)
    }

    /// Create a context with default ports.
    pub fn new(program: Program) -> Self {
        Self::builder(program).build()
    }

    /// One scheduler turn.
    ///
    /// Sweeps a snapshot of the pending set: nodes whose dependencies are
    /// all active are executed (and removed once done); for the rest, every
    /// inactive dependency is inserted into the pending set. Insertions
    /// made during the sweep are not visited until the next turn, so one
    /// call discovers exactly one layer of unmet dependencies.
    pub fn step(&mut self) -> Result<(), RuntimeError> {
        self.step_with(&mut NoopTracer)
    }

    /// One scheduler turn, narrated through `tracer`.
    pub fn step_with<T: Tracer>(&mut self, tracer: &mut T) -> Result<(), RuntimeError> {
        let snapshot: Vec<AbsoluteAddress> = self.pending.iter().copied().collect();
        tracer.trace_turn(self.turn, &snapshot);
        self.turn += 1;

        let mut done = Vec::new();
        for address in snapshot {
            if self.dependencies_met(address) {
                if self.execute(address, tracer)? {
                    let node = self.program.node_mut(address);
                    node.active = true;
                    done.push(address);
                    tracer.trace_done(self.program.node(address));
                }
            } else {
                for dependency in self.program.dependencies(address) {
                    if self.program.node(dependency).active {
                        continue;
                    }
                    if self.pending.insert(dependency) {
                        tracer.trace_defer(address, dependency);
                    }
                }
            }
        }

        for address in done {
            self.pending.remove(&address);
        }
        Ok(())
    }

    /// Drive `step` until the pending set drains or the turn budget runs
    /// out. Exhausting the budget is not an error; check `is_done`.
    pub fn step_until_done(&mut self, max_turns: u32) -> Result<(), RuntimeError> {
        self.step_until_done_with(max_turns, &mut NoopTracer)
    }

    pub fn step_until_done_with<T: Tracer>(
        &mut self,
        max_turns: u32,
        tracer: &mut T,
    ) -> Result<(), RuntimeError> {
        let mut remaining = max_turns;
        while !self.pending.is_empty() && remaining > 0 {
            self.step_with(tracer)?;
            remaining -= 1;
        }
        Ok(())
    }

    /// Whether an address is awaiting a scheduler turn.
    pub fn is_pending(&self, address: AbsoluteAddress) -> bool {
        self.pending.contains(&address)
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// True once the pending set has drained.
    pub fn is_done(&self) -> bool {
        self.pending.is_empty()
    }

    /// True once a `Cut` node has executed. The engine itself keeps
    /// stepping; the flag exists for external drivers.
    pub fn cut_reached(&self) -> bool {
        self.cut_reached
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn nodes(&self) -> &[InstructionNode] {
        self.program.nodes()
    }

    pub fn output(&self) -> &OutputLog {
        &self.output
    }

    pub fn registers(&self) -> &RegisterFile {
        &self.registers
    }

    pub fn memory(&self) -> &ByteMemory {
        &self.memory
    }

    pub fn input_mut(&mut self) -> &mut InputPort {
        &mut self.input
    }

    fn dependencies_met(&self, address: AbsoluteAddress) -> bool {
        self.program
            .dependencies(address)
            .iter()
            .all(|&dep| self.program.node(dep).active)
    }

    /// Consume a dependency: read its output and flip it inactive. The
    /// value must be re-produced before it can be read again.
    fn consume(&mut self, base: AbsoluteAddress, offset: RelativeAddress) -> i8 {
        let address = self.program.resolve(base, offset);
        let node = self.program.node_mut(address);
        node.active = false;
        node.output
    }

    /// Record a finished node's produced value.
    fn produce(&mut self, address: AbsoluteAddress, value: i8) {
        self.program.node_mut(address).output = value;
    }

    /// Run the handler for the node at `address`. Returns whether the node
    /// is done; a multi-phase node reports false and stays pending.
    ///
    /// Dependencies are known active when this is called.
    fn execute<T: Tracer>(
        &mut self,
        address: AbsoluteAddress,
        tracer: &mut T,
    ) -> Result<bool, RuntimeError> {
        tracer.trace_execute(self.program.node(address));
        let instruction = self.program.node(address).instruction;

        match instruction {
            Instruction::Const { value } => {
                self.produce(address, value);
            }

            Instruction::Add { lhs, rhs } => {
                let a = self.consume(address, lhs);
                let b = self.consume(address, rhs);
                self.produce(address, a.wrapping_add(b));
            }
            Instruction::Subtract { lhs, rhs } => {
                let a = self.consume(address, lhs);
                let b = self.consume(address, rhs);
                self.produce(address, a.wrapping_sub(b));
            }
            Instruction::Multiply { lhs, rhs } => {
                let a = self.consume(address, lhs);
                let b = self.consume(address, rhs);
                self.produce(address, a.wrapping_mul(b));
            }
            Instruction::Divide { lhs, rhs } => {
                let a = self.consume(address, lhs);
                let b = self.consume(address, rhs);
                if b == 0 {
                    return Err(RuntimeError::DivisionByZero { address });
                }
                self.produce(address, a.wrapping_div(b));
            }
            Instruction::Leq { lhs, rhs } => {
                let a = self.consume(address, lhs);
                let b = self.consume(address, rhs);
                self.produce(address, (a <= b) as i8);
            }
            Instruction::Geq { lhs, rhs } => {
                let a = self.consume(address, lhs);
                let b = self.consume(address, rhs);
                self.produce(address, (a >= b) as i8);
            }

            Instruction::Output { source } => {
                let value = self.consume(address, source);
                self.output.push(value);
                tracer.trace_output(value);
            }

            Instruction::If {
                cond,
                then_branch,
                else_branch,
            } => return Ok(self.execute_if(address, cond, then_branch, else_branch, tracer)),

            Instruction::Get { ring, index } => {
                let space = RingSpace::from_ring(ring)
                    .ok_or(RuntimeError::InvalidRing { address, ring })?;
                let value = match space {
                    RingSpace::Registers => self.registers.get(index),
                    RingSpace::SelfBytes | RingSpace::TargetBytes => {
                        self.memory.get(space, index)
                    }
                };
                self.produce(address, value);
            }
            Instruction::Set { ring, index, source } => {
                let space = RingSpace::from_ring(ring)
                    .ok_or(RuntimeError::InvalidRing { address, ring })?;
                let value = self.consume(address, source);
                match space {
                    RingSpace::Registers => self.registers.set(index, value),
                    RingSpace::SelfBytes | RingSpace::TargetBytes => {
                        self.memory.set(space, index, value)
                    }
                }
                tracer.trace_bank_write(space, index, value);
            }

            // Structural grouping markers: consume operands, forward the
            // last one's value.
            Instruction::Block1 { body } => {
                let value = self.consume(address, body);
                self.produce(address, value);
            }
            Instruction::Block2 { first, second } => {
                self.consume(address, first);
                let value = self.consume(address, second);
                self.produce(address, value);
            }
            Instruction::Block3 {
                first,
                second,
                third,
            } => {
                self.consume(address, first);
                self.consume(address, second);
                let value = self.consume(address, third);
                self.produce(address, value);
            }
            Instruction::Block4 {
                first,
                second,
                third,
                fourth,
            } => {
                self.consume(address, first);
                self.consume(address, second);
                self.consume(address, third);
                let value = self.consume(address, fourth);
                self.produce(address, value);
            }

            // Pending-set seed; does not consume its root.
            Instruction::Trigger { .. } => {}

            Instruction::Nop => {}
            Instruction::Cut => {
                self.cut_reached = true;
            }
        }

        Ok(true)
    }

    /// Two-phase conditional.
    ///
    /// First visit consumes the condition and records the branch chosen by
    /// its parity (odd = then, even = else), staying pending; the unchosen
    /// branch never becomes a dependency, so it is never scheduled. The
    /// next executable visit consumes the chosen branch and finishes.
    fn execute_if<T: Tracer>(
        &mut self,
        address: AbsoluteAddress,
        cond: RelativeAddress,
        then_branch: RelativeAddress,
        else_branch: RelativeAddress,
        tracer: &mut T,
    ) -> bool {
        match self.program.node(address).cont {
            Continuation::NotStarted => {
                let condition = self.consume(address, cond);
                self.program.node_mut(address).cont = if condition % 2 != 0 {
                    Continuation::AwaitingThenBranch
                } else {
                    Continuation::AwaitingElseBranch
                };
                tracer.trace_suspend(self.program.node(address));
                false
            }
            Continuation::AwaitingThenBranch => {
                let value = self.consume(address, then_branch);
                let node = self.program.node_mut(address);
                node.cont = Continuation::NotStarted;
                node.output = value;
                true
            }
            Continuation::AwaitingElseBranch => {
                let value = self.consume(address, else_branch);
                let node = self.program.node_mut(address);
                node.cont = Continuation::NotStarted;
                node.output = value;
                true
            }
        }
    }
}
