//! Error types raised while emitting or finishing an assembly.

use crate::instruction::Mnemonic;
use crate::registers::Register;

/// Emission error.
///
/// Call shapes that have no matching instruction form never reach run time,
/// they fail to compile. The variants here cover the emission context and the
/// record-level checks done by [`Instruction::validate`](crate::instruction::Instruction::validate).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AsmError {
    /// Emission was attempted with no current assembly on this thread.
    NoActiveAssembly,

    /// A current assembly was started while another one is still active.
    AssemblyAlreadyActive,

    /// Shift amount exceeds what the instruction can encode.
    ShiftOutOfRange {
        /// The instruction carrying the shift.
        mnemonic: Mnemonic,
        /// The amount as given by the caller.
        amount: u32,
        /// Largest accepted amount.
        max: u32,
    },

    /// `PUSH`/`POP` with no registers.
    EmptyRegisterList {
        /// The instruction carrying the list.
        mnemonic: Mnemonic,
    },

    /// A register listed more than once in a `PUSH`/`POP`.
    DuplicateRegister {
        /// The instruction carrying the list.
        mnemonic: Mnemonic,
        /// The first repeated register.
        register: Register,
    },

    /// A doubleword register pair transfer with byte size.
    BytePairTransfer {
        /// The instruction carrying the pair.
        mnemonic: Mnemonic,
    },
}

impl std::fmt::Display for AsmError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoActiveAssembly => f.write_str("no active assembly to emit into"),
            Self::AssemblyAlreadyActive => {
                f.write_str("an assembly is already active on this thread")
            }
            Self::ShiftOutOfRange {
                mnemonic,
                amount,
                max,
            } => write!(
                f,
                "{mnemonic}: shift amount {amount} out of range (0..={max})"
            ),
            Self::EmptyRegisterList { mnemonic } => {
                write!(f, "{mnemonic}: register list is empty")
            }
            Self::DuplicateRegister { mnemonic, register } => {
                write!(f, "{mnemonic}: register {register} listed more than once")
            }
            Self::BytePairTransfer { mnemonic } => {
                write!(f, "{mnemonic}: a register pair transfer cannot be byte sized")
            }
        }
    }
}

impl std::error::Error for AsmError {}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn display() {
        assert_eq!(
            AsmError::NoActiveAssembly.to_string(),
            "no active assembly to emit into"
        );
        assert_eq!(
            AsmError::ShiftOutOfRange {
                mnemonic: Mnemonic::Lsl,
                amount: 40,
                max: 31
            }
            .to_string(),
            "LSL: shift amount 40 out of range (0..=31)"
        );
        assert_eq!(
            AsmError::DuplicateRegister {
                mnemonic: Mnemonic::Push,
                register: Register::R4
            }
            .to_string(),
            "PUSH: register R4 listed more than once"
        );
    }
}
