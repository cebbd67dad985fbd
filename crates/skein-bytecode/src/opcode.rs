//! Instruction catalog: opcodes and their arity classes.
//!
//! The catalog is pure lookup. An opcode's arity class fixes how many bytes
//! follow the opcode byte and how they populate its payload; the mapping is
//! closed and any byte outside it is a decode failure, never a fallback.

/// The operation a node performs. One byte on the wire, values assigned
/// alphabetically from zero.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[repr(u8)]
pub enum Opcode {
    Add = 0,
    Block1 = 1,
    Block2 = 2,
    Block3 = 3,
    Block4 = 4,
    Const = 5,
    Cut = 6,
    Divide = 7,
    Geq = 8,
    Get = 9,
    If = 10,
    Leq = 11,
    Multiply = 12,
    Nop = 13,
    Output = 14,
    Set = 15,
    Subtract = 16,
    Trigger = 17,
}

/// Classification of an opcode by operand-byte count and payload shape.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ArityClass {
    /// No operand bytes.
    NoInput,
    /// One literal data byte, stored verbatim.
    Data,
    /// One relative address.
    UnaryOp,
    /// Two relative addresses.
    BinaryOp,
    /// Three relative addresses.
    TriOp,
    /// Four relative addresses.
    QuadOp,
    /// A ring selector plus one bank index, both verbatim.
    RingUnaryOp,
    /// A ring selector, a bank index, and one relative address.
    RingBinaryOp,
}

impl Opcode {
    /// Every opcode in the catalog, in byte-value order.
    pub const ALL: [Opcode; 18] = [
        Self::Add,
        Self::Block1,
        Self::Block2,
        Self::Block3,
        Self::Block4,
        Self::Const,
        Self::Cut,
        Self::Divide,
        Self::Geq,
        Self::Get,
        Self::If,
        Self::Leq,
        Self::Multiply,
        Self::Nop,
        Self::Output,
        Self::Set,
        Self::Subtract,
        Self::Trigger,
    ];

    /// Decode from a raw stream byte. `None` for bytes outside the catalog.
    pub fn from_byte(b: i8) -> Option<Self> {
        match b {
            0 => Some(Self::Add),
            1 => Some(Self::Block1),
            2 => Some(Self::Block2),
            3 => Some(Self::Block3),
            4 => Some(Self::Block4),
            5 => Some(Self::Const),
            6 => Some(Self::Cut),
            7 => Some(Self::Divide),
            8 => Some(Self::Geq),
            9 => Some(Self::Get),
            10 => Some(Self::If),
            11 => Some(Self::Leq),
            12 => Some(Self::Multiply),
            13 => Some(Self::Nop),
            14 => Some(Self::Output),
            15 => Some(Self::Set),
            16 => Some(Self::Subtract),
            17 => Some(Self::Trigger),
            _ => None,
        }
    }

    /// Encode to a stream byte.
    pub fn to_byte(self) -> i8 {
        self as u8 as i8
    }

    /// The opcode's arity class.
    pub fn arity(self) -> ArityClass {
        match self {
            Self::Nop | Self::Cut => ArityClass::NoInput,

            Self::Const => ArityClass::Data,

            Self::Block1 | Self::Output | Self::Trigger => ArityClass::UnaryOp,

            Self::Add
            | Self::Block2
            | Self::Divide
            | Self::Geq
            | Self::Leq
            | Self::Multiply
            | Self::Subtract => ArityClass::BinaryOp,

            Self::Block3 | Self::If => ArityClass::TriOp,

            Self::Block4 => ArityClass::QuadOp,

            Self::Get => ArityClass::RingUnaryOp,

            Self::Set => ArityClass::RingBinaryOp,
        }
    }

    /// Display name for dumps.
    pub fn name(self) -> &'static str {
        match self {
            Self::Add => "Add",
            Self::Block1 => "Block1",
            Self::Block2 => "Block2",
            Self::Block3 => "Block3",
            Self::Block4 => "Block4",
            Self::Const => "Const",
            Self::Cut => "Cut",
            Self::Divide => "Divide",
            Self::Geq => "Geq",
            Self::Get => "Get",
            Self::If => "If",
            Self::Leq => "Leq",
            Self::Multiply => "Multiply",
            Self::Nop => "Nop",
            Self::Output => "Output",
            Self::Set => "Set",
            Self::Subtract => "Subtract",
            Self::Trigger => "Trigger",
        }
    }
}

impl ArityClass {
    /// Number of operand bytes that follow the opcode byte.
    pub fn operand_count(self) -> usize {
        match self {
            Self::NoInput => 0,
            Self::Data | Self::UnaryOp => 1,
            Self::BinaryOp | Self::RingUnaryOp => 2,
            Self::TriOp | Self::RingBinaryOp => 3,
            Self::QuadOp => 4,
        }
    }

    /// Display name for dumps.
    pub fn name(self) -> &'static str {
        match self {
            Self::NoInput => "NoInput",
            Self::Data => "Data",
            Self::UnaryOp => "UnaryOp",
            Self::BinaryOp => "BinaryOp",
            Self::TriOp => "TriOp",
            Self::QuadOp => "QuadOp",
            Self::RingUnaryOp => "RingUnaryOp",
            Self::RingBinaryOp => "RingBinaryOp",
        }
    }
}
