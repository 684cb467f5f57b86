//! # Instruction Records
//!
//! Every emitted instruction is one [`Instruction`]. The enum is closed over
//! the operand shapes the emitter produces, and each variant carries only the
//! fields its shape has:
//!
//! | Variant                  | Example                     | Mnemonics                      |
//! |--------------------------|-----------------------------|--------------------------------|
//! | `Bare`                   | `NOP`                       | NOP, ERET                      |
//! | `Destination`            | `BX LR`                     | BX, BLX                        |
//! | `DestinationOperand`     | `NEG R0, R1`                | NEG, RRX                       |
//! | `DataProcessing`         | `ADDS R0, R1, R2, LSL #3`   | ADD, ADC, AND, BIC, EOR, ...   |
//! | `Move`                   | `MOV R0, #4`                | MOV, MVN                       |
//! | `DestinationTwoOperands` | `MUL R0, R1, R2`            | MUL, ASR, LSL, LSR, ROR        |
//! | `TwoOperands`            | `TST R0, #1`                | TST, TEQ                       |
//! | `Shift`                  | `LSL R0, R1, #3`            | ASR, LSL, LSR, ROR             |
//! | `Label`                  | `BEQ loop`                  | B, BL, BLX                     |
//! | `RegisterList`           | `PUSH {R4, LR}`             | PUSH, POP                      |
//! | `MemoryTransfer`         | `LDRB R0, [R1, #-8]`        | LDR, STR                       |
//!
//! Records are rendered in UAL order: mnemonic, `S` suffix, size suffix, then
//! condition (`ADDSEQ`, `LDRBNE`).
//!
//! Values out of encoding range are kept as given and reported by
//! [`Instruction::validate`].

use serde::{Deserialize, Serialize};

use crate::condition::Condition;
use crate::error::AsmError;
use crate::operand::{DataSize, OffsetKind, Operand2, Operand2Shift};
use crate::registers::{Register, RegisterList};

/// Largest amount accepted by the shift mnemonics.
pub const MAX_SHIFT_AMOUNT: u32 = 31;

/// Operation kind of an emitted instruction.
#[derive(Debug, Eq, PartialEq, Hash, Copy, Clone, Serialize, Deserialize)]
pub enum Mnemonic {
    Adc,
    Add,
    And,
    Asr,
    B,
    Bic,
    Bl,
    Blx,
    Bx,
    Eor,
    Eret,
    Ldr,
    Lsl,
    Lsr,
    Mov,
    Mul,
    Mvn,
    Neg,
    Nop,
    Orn,
    Orr,
    Pop,
    Push,
    Ror,
    Rrx,
    Rsb,
    Rsc,
    Sbc,
    Str,
    Sub,
    Teq,
    Tst,
}

impl std::fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Adc => f.write_str("ADC"),
            Self::Add => f.write_str("ADD"),
            Self::And => f.write_str("AND"),
            Self::Asr => f.write_str("ASR"),
            Self::B => f.write_str("B"),
            Self::Bic => f.write_str("BIC"),
            Self::Bl => f.write_str("BL"),
            Self::Blx => f.write_str("BLX"),
            Self::Bx => f.write_str("BX"),
            Self::Eor => f.write_str("EOR"),
            Self::Eret => f.write_str("ERET"),
            Self::Ldr => f.write_str("LDR"),
            Self::Lsl => f.write_str("LSL"),
            Self::Lsr => f.write_str("LSR"),
            Self::Mov => f.write_str("MOV"),
            Self::Mul => f.write_str("MUL"),
            Self::Mvn => f.write_str("MVN"),
            Self::Neg => f.write_str("NEG"),
            Self::Nop => f.write_str("NOP"),
            Self::Orn => f.write_str("ORN"),
            Self::Orr => f.write_str("ORR"),
            Self::Pop => f.write_str("POP"),
            Self::Push => f.write_str("PUSH"),
            Self::Ror => f.write_str("ROR"),
            Self::Rrx => f.write_str("RRX"),
            Self::Rsb => f.write_str("RSB"),
            Self::Rsc => f.write_str("RSC"),
            Self::Sbc => f.write_str("SBC"),
            Self::Str => f.write_str("STR"),
            Self::Sub => f.write_str("SUB"),
            Self::Teq => f.write_str("TEQ"),
            Self::Tst => f.write_str("TST"),
        }
    }
}

/// A fully-specified instruction record.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum Instruction {
    /// Condition only.
    Bare {
        condition: Condition,
        mnemonic: Mnemonic,
    },
    /// A single register operand.
    Destination {
        condition: Condition,
        mnemonic: Mnemonic,
        destination: Register,
    },
    DestinationOperand {
        condition: Condition,
        mnemonic: Mnemonic,
        update_flags: bool,
        destination: Register,
        operand: Register,
    },
    DataProcessing {
        condition: Condition,
        mnemonic: Mnemonic,
        update_flags: bool,
        destination: Register,
        operand: Register,
        op2: Operand2,
    },
    Move {
        condition: Condition,
        mnemonic: Mnemonic,
        update_flags: bool,
        destination: Register,
        op2: Operand2,
    },
    DestinationTwoOperands {
        condition: Condition,
        mnemonic: Mnemonic,
        update_flags: bool,
        destination: Register,
        first_operand: Register,
        second_operand: Register,
    },
    /// Compare-style instruction: always updates the flags, has no destination.
    TwoOperands {
        condition: Condition,
        mnemonic: Mnemonic,
        first_operand: Register,
        op2: Operand2,
    },
    Shift {
        condition: Condition,
        mnemonic: Mnemonic,
        update_flags: bool,
        destination: Register,
        operand: Register,
        amount: u32,
    },
    Label {
        condition: Condition,
        mnemonic: Mnemonic,
        label: String,
        label_offset: Option<u32>,
    },
    RegisterList {
        condition: Condition,
        mnemonic: Mnemonic,
        registers: RegisterList,
    },
    MemoryTransfer {
        condition: Condition,
        mnemonic: Mnemonic,
        data_size: DataSize,
        operand: Register,
        /// Second transfer register of a doubleword pair (`LDRD`/`STRD`).
        second_operand: Option<Register>,
        base: Register,
        offset: Option<i16>,
        offset_kind: OffsetKind,
    },
}

impl Instruction {
    #[must_use]
    pub const fn condition(&self) -> Condition {
        match self {
            Self::Bare { condition, .. }
            | Self::Destination { condition, .. }
            | Self::DestinationOperand { condition, .. }
            | Self::DataProcessing { condition, .. }
            | Self::Move { condition, .. }
            | Self::DestinationTwoOperands { condition, .. }
            | Self::TwoOperands { condition, .. }
            | Self::Shift { condition, .. }
            | Self::Label { condition, .. }
            | Self::RegisterList { condition, .. }
            | Self::MemoryTransfer { condition, .. } => *condition,
        }
    }

    #[must_use]
    pub const fn mnemonic(&self) -> Mnemonic {
        match self {
            Self::Bare { mnemonic, .. }
            | Self::Destination { mnemonic, .. }
            | Self::DestinationOperand { mnemonic, .. }
            | Self::DataProcessing { mnemonic, .. }
            | Self::Move { mnemonic, .. }
            | Self::DestinationTwoOperands { mnemonic, .. }
            | Self::TwoOperands { mnemonic, .. }
            | Self::Shift { mnemonic, .. }
            | Self::Label { mnemonic, .. }
            | Self::RegisterList { mnemonic, .. }
            | Self::MemoryTransfer { mnemonic, .. } => *mnemonic,
        }
    }

    /// Whether executing the record writes the condition flags.
    #[must_use]
    pub const fn updates_flags(&self) -> bool {
        match self {
            Self::DestinationOperand { update_flags, .. }
            | Self::DataProcessing { update_flags, .. }
            | Self::Move { update_flags, .. }
            | Self::DestinationTwoOperands { update_flags, .. }
            | Self::Shift { update_flags, .. } => *update_flags,
            Self::TwoOperands { .. } => true,
            Self::Bare { .. }
            | Self::Destination { .. }
            | Self::Label { .. }
            | Self::RegisterList { .. }
            | Self::MemoryTransfer { .. } => false,
        }
    }

    #[must_use]
    pub const fn destination(&self) -> Option<Register> {
        match self {
            Self::Destination { destination, .. }
            | Self::DestinationOperand { destination, .. }
            | Self::DataProcessing { destination, .. }
            | Self::Move { destination, .. }
            | Self::DestinationTwoOperands { destination, .. }
            | Self::Shift { destination, .. } => Some(*destination),
            Self::Bare { .. }
            | Self::TwoOperands { .. }
            | Self::Label { .. }
            | Self::RegisterList { .. }
            | Self::MemoryTransfer { .. } => None,
        }
    }

    #[must_use]
    pub const fn operand2(&self) -> Option<&Operand2> {
        match self {
            Self::DataProcessing { op2, .. }
            | Self::Move { op2, .. }
            | Self::TwoOperands { op2, .. } => Some(op2),
            _ => None,
        }
    }

    /// Checks the values the record holds against what the instruction can encode.
    ///
    /// # Errors
    ///
    /// Returns an error for an out-of-range shift amount, an empty or duplicated
    /// register list, or a byte-sized register pair transfer.
    pub fn validate(&self) -> Result<(), AsmError> {
        let mnemonic = self.mnemonic();
        match self {
            Self::Shift { amount, .. } if *amount > MAX_SHIFT_AMOUNT => {
                Err(AsmError::ShiftOutOfRange {
                    mnemonic,
                    amount: *amount,
                    max: MAX_SHIFT_AMOUNT,
                })
            }
            Self::DataProcessing { op2, .. }
            | Self::Move { op2, .. }
            | Self::TwoOperands { op2, .. } => match op2.shift() {
                Some(Operand2Shift::Immediate { kind, amount }) if amount > kind.max_immediate() => {
                    Err(AsmError::ShiftOutOfRange {
                        mnemonic,
                        amount,
                        max: kind.max_immediate(),
                    })
                }
                _ => Ok(()),
            },
            Self::MemoryTransfer {
                data_size: DataSize::Byte,
                second_operand: Some(_),
                ..
            } => Err(AsmError::BytePairTransfer { mnemonic }),
            Self::RegisterList { registers, .. } => {
                if registers.is_empty() {
                    return Err(AsmError::EmptyRegisterList { mnemonic });
                }
                registers
                    .first_duplicate()
                    .map_or(Ok(()), |register| {
                        Err(AsmError::DuplicateRegister { mnemonic, register })
                    })
            }
            _ => Ok(()),
        }
    }
}

fn flags_suffix(update_flags: bool) -> &'static str {
    if update_flags { "S" } else { "" }
}

impl std::fmt::Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bare {
                condition,
                mnemonic,
            } => write!(f, "{mnemonic}{condition}"),
            Self::Destination {
                condition,
                mnemonic,
                destination,
            } => write!(f, "{mnemonic}{condition} {destination}"),
            Self::DestinationOperand {
                condition,
                mnemonic,
                update_flags,
                destination,
                operand,
            } => {
                let s = flags_suffix(*update_flags);
                write!(f, "{mnemonic}{s}{condition} {destination}, {operand}")
            }
            Self::DataProcessing {
                condition,
                mnemonic,
                update_flags,
                destination,
                operand,
                op2,
            } => {
                let s = flags_suffix(*update_flags);
                write!(
                    f,
                    "{mnemonic}{s}{condition} {destination}, {operand}, {op2}"
                )
            }
            Self::Move {
                condition,
                mnemonic,
                update_flags,
                destination,
                op2,
            } => {
                let s = flags_suffix(*update_flags);
                write!(f, "{mnemonic}{s}{condition} {destination}, {op2}")
            }
            Self::DestinationTwoOperands {
                condition,
                mnemonic,
                update_flags,
                destination,
                first_operand,
                second_operand,
            } => {
                let s = flags_suffix(*update_flags);
                write!(
                    f,
                    "{mnemonic}{s}{condition} {destination}, {first_operand}, {second_operand}"
                )
            }
            Self::TwoOperands {
                condition,
                mnemonic,
                first_operand,
                op2,
            } => write!(f, "{mnemonic}{condition} {first_operand}, {op2}"),
            Self::Shift {
                condition,
                mnemonic,
                update_flags,
                destination,
                operand,
                amount,
            } => {
                let s = flags_suffix(*update_flags);
                write!(
                    f,
                    "{mnemonic}{s}{condition} {destination}, {operand}, #{amount}"
                )
            }
            Self::Label {
                condition,
                mnemonic,
                label,
                label_offset,
            } => match label_offset {
                Some(offset) => write!(f, "{mnemonic}{condition} {label}+{offset}"),
                None => write!(f, "{mnemonic}{condition} {label}"),
            },
            Self::RegisterList {
                condition,
                mnemonic,
                registers,
            } => write!(f, "{mnemonic}{condition} {registers}"),
            Self::MemoryTransfer {
                condition,
                mnemonic,
                data_size,
                operand,
                second_operand,
                base,
                offset,
                offset_kind,
            } => {
                let offset = offset.unwrap_or(0);
                let address = match (offset_kind, offset) {
                    (OffsetKind::ImmediateOffset, 0) => format!("[{base}]"),
                    (OffsetKind::ImmediateOffset, offset) => format!("[{base}, #{offset}]"),
                    (OffsetKind::PreIndexed, offset) => format!("[{base}, #{offset}]!"),
                    (OffsetKind::PostIndexed, offset) => format!("[{base}], #{offset}"),
                };
                match second_operand {
                    Some(second) => {
                        write!(f, "{mnemonic}D{condition} {operand}, {second}, {address}")
                    }
                    None => write!(f, "{mnemonic}{data_size}{condition} {operand}, {address}"),
                }
            }
        }
    }
}
