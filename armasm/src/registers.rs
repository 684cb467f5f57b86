//! # ARMv7 Core Registers
//!
//! The 16 general-purpose registers addressable by A32 instructions.
//!
//! - **R0-R12**: General purpose
//! - **R13 (SP)**: Stack pointer (by convention)
//! - **R14 (LR)**: Link register (return address)
//! - **R15 (PC)**: Program counter
//!
//! [`RegisterList`] is the ordered register set transferred by `PUSH`/`POP`.

use serde::{Deserialize, Serialize};

/// An architectural core register.
#[derive(Debug, Eq, PartialEq, Hash, Copy, Clone, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Register {
    R0 = 0x0,
    R1 = 0x1,
    R2 = 0x2,
    R3 = 0x3,
    R4 = 0x4,
    R5 = 0x5,
    R6 = 0x6,
    R7 = 0x7,
    R8 = 0x8,
    R9 = 0x9,
    R10 = 0xA,
    R11 = 0xB,
    R12 = 0xC,
    /// Stack pointer.
    SP = 0xD,
    /// Link register.
    LR = 0xE,
    /// Program counter.
    PC = 0xF,
}

impl Register {
    /// Every register in index order.
    pub const ALL: [Self; 16] = [
        Self::R0,
        Self::R1,
        Self::R2,
        Self::R3,
        Self::R4,
        Self::R5,
        Self::R6,
        Self::R7,
        Self::R8,
        Self::R9,
        Self::R10,
        Self::R11,
        Self::R12,
        Self::SP,
        Self::LR,
        Self::PC,
    ];

    /// Register number as encoded in an instruction field.
    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }
}

impl std::fmt::Display for Register {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SP => f.write_str("SP"),
            Self::LR => f.write_str("LR"),
            Self::PC => f.write_str("PC"),
            other => write!(f, "R{}", other.index()),
        }
    }
}

/// Ordered register list for `PUSH`/`POP`.
///
/// Call-site order is kept as given: it defines the transfer order written to
/// the listing. Duplicates and empty lists are not rejected here but by
/// [`Instruction::validate`](crate::instruction::Instruction::validate).
#[derive(Debug, Default, Eq, PartialEq, Clone, Serialize, Deserialize)]
pub struct RegisterList(Vec<Register>);

impl RegisterList {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Appends `register` at the end of the list.
    pub fn push(&mut self, register: Register) {
        self.0.push(register);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Register> {
        self.0.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Register] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First register that appears more than once, in list order.
    #[must_use]
    pub fn first_duplicate(&self) -> Option<Register> {
        let mut seen = [false; 16];
        for register in &self.0 {
            let slot = &mut seen[usize::from(register.index())];
            if *slot {
                return Some(*register);
            }
            *slot = true;
        }
        None
    }
}

impl From<Register> for RegisterList {
    fn from(register: Register) -> Self {
        Self(vec![register])
    }
}

impl<const N: usize> From<[Register; N]> for RegisterList {
    fn from(registers: [Register; N]) -> Self {
        Self(registers.to_vec())
    }
}

impl From<&[Register]> for RegisterList {
    fn from(registers: &[Register]) -> Self {
        Self(registers.to_vec())
    }
}

impl From<Vec<Register>> for RegisterList {
    fn from(registers: Vec<Register>) -> Self {
        Self(registers)
    }
}

impl FromIterator<Register> for RegisterList {
    fn from_iter<I: IntoIterator<Item = Register>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl std::fmt::Display for RegisterList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let registers = self
            .0
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{{{registers}}}")
    }
}
