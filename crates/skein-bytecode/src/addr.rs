//! Address types and wraparound resolution.
//!
//! Control edges are encoded as signed offsets from a node's own address.
//! Resolution reduces into `[0, len)` with a floored modulo, so offsets may
//! wrap past either end of the program - a loop body can reference an
//! earlier instruction as if the node array were circular.

/// Signed displacement from a node's own address.
pub type RelativeAddress = i8;

/// Zero-based index of a node in the program array.
pub type AbsoluteAddress = u16;

/// Selector distinguishing which addressable bank a ring operand refers to.
pub type Ring = i8;

/// Resolve a relative offset against a base address in a program of `len`
/// nodes.
///
/// Uses a floored (Euclidean) modulo: the result is in `[0, len)` even when
/// the raw sum is negative. Truncating `%` would produce out-of-range
/// indices for negative operands.
///
/// Panics if `len` is zero; an empty program has no nodes to resolve from.
pub fn translate_relative(base: AbsoluteAddress, offset: RelativeAddress, len: usize) -> AbsoluteAddress {
    assert!(len > 0, "cannot resolve an address in an empty program");
    let raw = base as i64 + offset as i64;
    raw.rem_euclid(len as i64) as AbsoluteAddress
}
