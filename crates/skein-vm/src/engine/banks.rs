//! Register and byte-memory banks.
//!
//! Both banks sit outside the instruction graph: ring *get* reads them
//! without a dependency edge and ring *set* writes them after consuming its
//! value operand. Cell indices are verbatim payload bytes reduced by
//! floored modulo into the bank length, matching how control edges wrap.

use skein_bytecode::Ring;

/// Fixed size of the register file.
pub const REGISTER_COUNT: usize = 16;

/// Which bank a ring selector names.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RingSpace {
    /// Ring 0: the register file.
    Registers,
    /// Ring 1: the program's own byte image.
    SelfBytes,
    /// Ring 2: the zero-initialized copy target.
    TargetBytes,
}

impl RingSpace {
    /// Decode a ring selector byte. `None` for selectors outside the model.
    pub fn from_ring(ring: Ring) -> Option<Self> {
        match ring {
            0 => Some(Self::Registers),
            1 => Some(Self::SelfBytes),
            2 => Some(Self::TargetBytes),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Registers => "registers",
            Self::SelfBytes => "self",
            Self::TargetBytes => "target",
        }
    }
}

/// Floored-modulo reduction of a verbatim index byte into `[0, len)`.
fn wrap_index(index: i8, len: usize) -> usize {
    debug_assert!(len > 0);
    (index as i64).rem_euclid(len as i64) as usize
}

/// Fixed-size bank of values, addressed by ring 0.
#[derive(Debug, Clone)]
pub struct RegisterFile {
    cells: [i8; REGISTER_COUNT],
}

impl RegisterFile {
    pub fn new() -> Self {
        Self {
            cells: [0; REGISTER_COUNT],
        }
    }

    pub fn get(&self, index: i8) -> i8 {
        self.cells[wrap_index(index, REGISTER_COUNT)]
    }

    pub fn set(&mut self, index: i8, value: i8) {
        self.cells[wrap_index(index, REGISTER_COUNT)] = value;
    }

    pub fn as_slice(&self) -> &[i8] {
        &self.cells
    }
}

impl Default for RegisterFile {
    fn default() -> Self {
        Self::new()
    }
}

/// Byte-addressable storage: the program's own byte image (ring 1) and an
/// equal-length copy target (ring 2).
///
/// Writes to ring 1 mutate the image copy only; the node array is never
/// re-lifted, so this is self-modifying data, not self-modifying code.
#[derive(Debug, Clone)]
pub struct ByteMemory {
    self_bytes: Vec<i8>,
    target_bytes: Vec<i8>,
}

impl ByteMemory {
    /// Seed the self bank from a program's byte image.
    pub fn from_image(image: &[i8]) -> Self {
        Self {
            self_bytes: image.to_vec(),
            target_bytes: vec![0; image.len()],
        }
    }

    pub fn get(&self, space: RingSpace, index: i8) -> i8 {
        debug_assert_ne!(space, RingSpace::Registers);
        let bank = self.bank(space);
        bank[wrap_index(index, bank.len())]
    }

    pub fn set(&mut self, space: RingSpace, index: i8, value: i8) {
        debug_assert_ne!(space, RingSpace::Registers);
        let bank = self.bank_mut(space);
        let cell = wrap_index(index, bank.len());
        bank[cell] = value;
    }

    pub fn self_bytes(&self) -> &[i8] {
        &self.self_bytes
    }

    pub fn target_bytes(&self) -> &[i8] {
        &self.target_bytes
    }

    fn bank(&self, space: RingSpace) -> &[i8] {
        match space {
            RingSpace::SelfBytes => &self.self_bytes,
            RingSpace::TargetBytes => &self.target_bytes,
            RingSpace::Registers => unreachable!("register ring routed to RegisterFile"),
        }
    }

    fn bank_mut(&mut self, space: RingSpace) -> &mut [i8] {
        match space {
            RingSpace::SelfBytes => &mut self.self_bytes,
            RingSpace::TargetBytes => &mut self.target_bytes,
            RingSpace::Registers => unreachable!("register ring routed to RegisterFile"),
        }
    }
}
