//! # Condition Codes
//!
//! Almost every ARM instruction can be conditionally executed. The condition is
//! written as a mnemonic suffix and tested against the CPSR flags at run time:
//!
//! ```text
//!     CMP   R0, #0
//!     MOVNE R1, #1    ← only executes if Z=0
//!     MOVEQ R1, #0    ← only executes if Z=1
//! ```
//!
//! ```text
//! ┌────────┬─────────────────────┬──────────────────┐
//! │ Suffix │     Meaning         │  Flags Tested    │
//! ├────────┼─────────────────────┼──────────────────┤
//! │   EQ   │ Equal               │ Z=1              │
//! │   NE   │ Not equal           │ Z=0              │
//! │   CS   │ Carry set / ≥ (uns) │ C=1              │
//! │   CC   │ Carry clear / < (u) │ C=0              │
//! │   MI   │ Minus / negative    │ N=1              │
//! │   PL   │ Plus / non-negative │ N=0              │
//! │   VS   │ Overflow set        │ V=1              │
//! │   VC   │ Overflow clear      │ V=0              │
//! │   HI   │ Higher (unsigned)   │ C=1 AND Z=0      │
//! │   LS   │ Lower/same (unsig)  │ C=0 OR Z=1       │
//! │   GE   │ ≥ (signed)          │ N=V              │
//! │   LT   │ < (signed)          │ N≠V              │
//! │   GT   │ > (signed)          │ Z=0 AND N=V      │
//! │   LE   │ ≤ (signed)          │ Z=1 OR N≠V       │
//! │   AL   │ Always              │ (unconditional)  │
//! └────────┴─────────────────────┴──────────────────┘
//! ```
//!
//! An emitted record without an explicit condition carries [`Condition::AL`],
//! which renders no suffix.

use serde::{Deserialize, Serialize};

/// Condition attached to an emitted instruction.
///
/// In `ARMv7` the `0b1111` encoding selects the unconditional instruction space
/// rather than a predicate, so it has no variant here.
#[derive(Debug, Default, Eq, PartialEq, Hash, Copy, Clone, Serialize, Deserialize)]
pub enum Condition {
    /// Equal (Z=1)
    EQ = 0x0,

    /// Not equal (Z=0)
    NE = 0x1,

    /// Carry set / unsigned higher or same (C=1)
    ///
    /// Also known as HS (Higher or Same).
    CS = 0x2,

    /// Carry clear / unsigned lower (C=0)
    ///
    /// Also known as LO (Lower).
    CC = 0x3,

    /// Minus / negative (N=1)
    MI = 0x4,

    /// Plus / positive or zero (N=0)
    PL = 0x5,

    /// Overflow set (V=1)
    VS = 0x6,

    /// Overflow clear (V=0)
    VC = 0x7,

    /// Unsigned higher (C=1 AND Z=0)
    HI = 0x8,

    /// Unsigned lower or same (C=0 OR Z=1)
    LS = 0x9,

    /// Signed greater or equal (N=V)
    GE = 0xA,

    /// Signed less than (N≠V)
    LT = 0xB,

    /// Signed greater than (Z=0 AND N=V)
    GT = 0xC,

    /// Signed less than or equal (Z=1 OR N≠V)
    LE = 0xD,

    /// Always (unconditional)
    ///
    /// The instruction always executes. This is the default when no
    /// condition suffix is specified in assembly (e.g., `MOV` = `MOVAL`).
    #[default]
    AL = 0xE,
}

impl Condition {
    /// Unsigned higher or same, alias of [`Condition::CS`].
    pub const HS: Self = Self::CS;

    /// Unsigned lower, alias of [`Condition::CC`].
    pub const LO: Self = Self::CC;

    /// Every condition in encoding order.
    pub const ALL: [Self; 15] = [
        Self::EQ,
        Self::NE,
        Self::CS,
        Self::CC,
        Self::MI,
        Self::PL,
        Self::VS,
        Self::VC,
        Self::HI,
        Self::LS,
        Self::GE,
        Self::LT,
        Self::GT,
        Self::LE,
        Self::AL,
    ];

    /// The condition with the opposite outcome, if there is one.
    ///
    /// `AL` has no inverse in `ARMv7`.
    #[must_use]
    pub const fn inverse(self) -> Option<Self> {
        match self {
            Self::EQ => Some(Self::NE),
            Self::NE => Some(Self::EQ),
            Self::CS => Some(Self::CC),
            Self::CC => Some(Self::CS),
            Self::MI => Some(Self::PL),
            Self::PL => Some(Self::MI),
            Self::VS => Some(Self::VC),
            Self::VC => Some(Self::VS),
            Self::HI => Some(Self::LS),
            Self::LS => Some(Self::HI),
            Self::GE => Some(Self::LT),
            Self::LT => Some(Self::GE),
            Self::GT => Some(Self::LE),
            Self::LE => Some(Self::GT),
            Self::AL => None,
        }
    }

    #[must_use]
    pub const fn is_unconditional(self) -> bool {
        matches!(self, Self::AL)
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EQ => f.write_str("EQ"),
            Self::NE => f.write_str("NE"),
            Self::CS => f.write_str("CS"),
            Self::CC => f.write_str("CC"),
            Self::MI => f.write_str("MI"),
            Self::PL => f.write_str("PL"),
            Self::VS => f.write_str("VS"),
            Self::VC => f.write_str("VC"),
            Self::HI => f.write_str("HI"),
            Self::LS => f.write_str("LS"),
            Self::GE => f.write_str("GE"),
            Self::LT => f.write_str("LT"),
            Self::GT => f.write_str("GT"),
            Self::LE => f.write_str("LE"),
            Self::AL => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_is_always() {
        assert_eq!(Condition::default(), Condition::AL);
        assert!(Condition::default().is_unconditional());
        assert_eq!(Condition::AL.to_string(), "");
    }

    #[test]
    fn aliases() {
        assert_eq!(Condition::HS, Condition::CS);
        assert_eq!(Condition::LO, Condition::CC);
    }

    #[test]
    fn inverse_is_an_involution() {
        for condition in Condition::ALL {
            match condition.inverse() {
                Some(inverse) => {
                    assert_ne!(inverse, condition);
                    assert_eq!(inverse.inverse(), Some(condition));
                }
                None => assert_eq!(condition, Condition::AL),
            }
        }
    }

    #[test]
    fn encoding_order() {
        for (code, condition) in Condition::ALL.iter().enumerate() {
            assert_eq!(*condition as usize, code);
        }
    }
}
