//! Operand building blocks shared by the instruction shapes.
//!
//! ```text
//! ADD R0, R1, R2, LSL #3
//!             └──┬──────┘
//!                └─ operand-2: register R2 shifted by the barrel shifter
//!
//! ADD R0, R1, #4
//!             └┬┘
//!              └─ operand-2: immediate
//! ```
//!
//! Operand-2 is either a (possibly shifted) register or an immediate, never
//! both. [`Operand2Source`] is implemented by the types that can stand in
//! that position at a call site.

use serde::{Deserialize, Serialize};

use crate::registers::Register;

/// Barrel-shifter operation applied to a register operand.
#[derive(Debug, Eq, PartialEq, Hash, Copy, Clone, Serialize, Deserialize)]
pub enum ShiftKind {
    /// Logical shift left.
    Lsl,
    /// Logical shift right.
    Lsr,
    /// Arithmetic shift right.
    Asr,
    /// Rotate right.
    Ror,
}

impl ShiftKind {
    /// Largest amount accepted in an immediate-amount operand-2 shift.
    ///
    /// `LSR #32` and `ASR #32` are encodable, `LSL` and `ROR` stop at 31.
    #[must_use]
    pub const fn max_immediate(self) -> u32 {
        match self {
            Self::Lsl | Self::Ror => 31,
            Self::Lsr | Self::Asr => 32,
        }
    }
}

impl std::fmt::Display for ShiftKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lsl => f.write_str("LSL"),
            Self::Lsr => f.write_str("LSR"),
            Self::Asr => f.write_str("ASR"),
            Self::Ror => f.write_str("ROR"),
        }
    }
}

/// Shift applied to a register operand-2.
#[derive(Debug, Eq, PartialEq, Hash, Copy, Clone, Serialize, Deserialize)]
pub enum Operand2Shift {
    /// Shift by a constant amount.
    Immediate { kind: ShiftKind, amount: u32 },
    /// Shift by the bottom byte of a register.
    Register { kind: ShiftKind, register: Register },
    /// Rotate right by one through the carry flag.
    Rrx,
}

impl Operand2Shift {
    #[must_use]
    pub const fn lsl(amount: u32) -> Self {
        Self::Immediate {
            kind: ShiftKind::Lsl,
            amount,
        }
    }

    #[must_use]
    pub const fn lsr(amount: u32) -> Self {
        Self::Immediate {
            kind: ShiftKind::Lsr,
            amount,
        }
    }

    #[must_use]
    pub const fn asr(amount: u32) -> Self {
        Self::Immediate {
            kind: ShiftKind::Asr,
            amount,
        }
    }

    #[must_use]
    pub const fn ror(amount: u32) -> Self {
        Self::Immediate {
            kind: ShiftKind::Ror,
            amount,
        }
    }

    /// Shift by the amount held in `register`.
    #[must_use]
    pub const fn by_register(kind: ShiftKind, register: Register) -> Self {
        Self::Register { kind, register }
    }
}

impl std::fmt::Display for Operand2Shift {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Immediate { kind, amount } => write!(f, "{kind} #{amount}"),
            Self::Register { kind, register } => write!(f, "{kind} {register}"),
            Self::Rrx => f.write_str("RRX"),
        }
    }
}

/// ARM's flexible second operand.
#[derive(Debug, Eq, PartialEq, Hash, Copy, Clone, Serialize, Deserialize)]
pub enum Operand2 {
    Register {
        register: Register,
        shift: Option<Operand2Shift>,
    },
    Immediate(u32),
}

impl Operand2 {
    #[must_use]
    pub const fn register(&self) -> Option<Register> {
        match self {
            Self::Register { register, .. } => Some(*register),
            Self::Immediate(_) => None,
        }
    }

    #[must_use]
    pub const fn immediate(&self) -> Option<u32> {
        match self {
            Self::Register { .. } => None,
            Self::Immediate(value) => Some(*value),
        }
    }

    #[must_use]
    pub const fn shift(&self) -> Option<Operand2Shift> {
        match self {
            Self::Register { shift, .. } => *shift,
            Self::Immediate(_) => None,
        }
    }
}

impl std::fmt::Display for Operand2 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Register {
                register,
                shift: None,
            } => write!(f, "{register}"),
            Self::Register {
                register,
                shift: Some(shift),
            } => write!(f, "{register}, {shift}"),
            Self::Immediate(value) => write!(f, "{}", Immediate(*value)),
        }
    }
}

/// Renders an immediate the way the listing writes it: small values in
/// decimal, anything wider than a byte in hex.
pub(crate) struct Immediate(pub u32);

impl std::fmt::Display for Immediate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0 <= 0xFF {
            write!(f, "#{}", self.0)
        } else {
            write!(f, "#0x{:X}", self.0)
        }
    }
}

mod sealed {
    pub trait Sealed {}

    impl Sealed for crate::registers::Register {}
    impl Sealed for u32 {}
    impl Sealed for i32 {}
}

/// A value that can be written in the operand-2 position.
///
/// Builders are generic over the source so that a shift can only be attached
/// to a register operand-2.
pub trait Operand2Source: sealed::Sealed + Copy {
    fn into_operand2(self, shift: Option<Operand2Shift>) -> Operand2;
}

impl Operand2Source for Register {
    fn into_operand2(self, shift: Option<Operand2Shift>) -> Operand2 {
        Operand2::Register {
            register: self,
            shift,
        }
    }
}

impl Operand2Source for u32 {
    fn into_operand2(self, _shift: Option<Operand2Shift>) -> Operand2 {
        Operand2::Immediate(self)
    }
}

/// Signed literals keep their two's-complement bit pattern.
impl Operand2Source for i32 {
    #[allow(clippy::cast_sign_loss)]
    fn into_operand2(self, _shift: Option<Operand2Shift>) -> Operand2 {
        Operand2::Immediate(self as u32)
    }
}

/// Amount operand of the shift mnemonics (`LSL`, `LSR`, `ASR`, `ROR`).
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum ShiftBy {
    Amount(u32),
    Register(Register),
}

impl From<u32> for ShiftBy {
    fn from(amount: u32) -> Self {
        Self::Amount(amount)
    }
}

/// Negative amounts keep their bit pattern and fail validation.
impl From<i32> for ShiftBy {
    #[allow(clippy::cast_sign_loss)]
    fn from(amount: i32) -> Self {
        Self::Amount(amount as u32)
    }
}

impl From<u8> for ShiftBy {
    fn from(amount: u8) -> Self {
        Self::Amount(u32::from(amount))
    }
}

impl From<Register> for ShiftBy {
    fn from(register: Register) -> Self {
        Self::Register(register)
    }
}

/// Width of a single load/store transfer.
#[derive(Debug, Default, Eq, PartialEq, Hash, Copy, Clone, Serialize, Deserialize)]
pub enum DataSize {
    /// 32-bit transfer.
    #[default]
    Word,

    /// 8-bit transfer.
    Byte,
}

impl std::fmt::Display for DataSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Word => Ok(()),
            Self::Byte => f.write_str("B"),
        }
    }
}

/// How a load/store combines its base register and offset.
#[derive(Debug, Default, Eq, PartialEq, Hash, Copy, Clone, Serialize, Deserialize)]
pub enum OffsetKind {
    /// `[Rn, #offset]`: base plus offset, base unchanged.
    #[default]
    ImmediateOffset,

    /// `[Rn, #offset]!`: base plus offset, written back to the base.
    PreIndexed,

    /// `[Rn], #offset`: transfer at base, then base plus offset written back.
    PostIndexed,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn display_register_operand2() {
        let op2 = Register::R2.into_operand2(None);
        assert_eq!(op2.to_string(), "R2");

        let op2 = Register::R2.into_operand2(Some(Operand2Shift::lsl(3)));
        assert_eq!(op2.to_string(), "R2, LSL #3");

        let op2 = Register::R2.into_operand2(Some(Operand2Shift::by_register(
            ShiftKind::Asr,
            Register::R7,
        )));
        assert_eq!(op2.to_string(), "R2, ASR R7");

        let op2 = Register::R2.into_operand2(Some(Operand2Shift::Rrx));
        assert_eq!(op2.to_string(), "R2, RRX");
    }

    #[test]
    fn display_immediate_operand2() {
        assert_eq!(4u32.into_operand2(None).to_string(), "#4");
        assert_eq!(255u32.into_operand2(None).to_string(), "#255");
        assert_eq!(0x0400_0000u32.into_operand2(None).to_string(), "#0x4000000");
    }

    #[test]
    fn immediate_ignores_shift() {
        let op2 = 7u32.into_operand2(Some(Operand2Shift::lsl(1)));
        assert_eq!(op2, Operand2::Immediate(7));
        assert_eq!(op2.shift(), None);
        assert_eq!(op2.register(), None);
    }

    #[test]
    fn negative_immediate_keeps_bits() {
        assert_eq!((-1i32).into_operand2(None), Operand2::Immediate(u32::MAX));
    }

    #[test]
    fn shift_ranges() {
        assert_eq!(ShiftKind::Lsl.max_immediate(), 31);
        assert_eq!(ShiftKind::Lsr.max_immediate(), 32);
        assert_eq!(ShiftKind::Asr.max_immediate(), 32);
        assert_eq!(ShiftKind::Ror.max_immediate(), 31);
    }

    #[test]
    fn defaults() {
        assert_eq!(DataSize::default(), DataSize::Word);
        assert_eq!(OffsetKind::default(), OffsetKind::ImmediateOffset);
    }
}
