//! Shape builders.
//!
//! Each mnemonic method returns the builder of the shape it resolves to. The
//! builder starts from the defaults (unconditional, flags untouched, word
//! size, immediate offset), takes the optional parts, and `emit` appends
//! exactly one record.
//!
//! Builders over an operand-2 are generic over its source. Only the
//! `Register` instantiation has `shift`, so an immediate operand-2 with a
//! shift does not compile:
//!
//! ```compile_fail
//! use armasm::{Assembly, Emitter, Operand2Shift, Register};
//!
//! let mut assembly = Assembly::new();
//! let mut emitter = Emitter::new(&mut assembly);
//! emitter.add(Register::R0, Register::R1, 4).shift(Operand2Shift::lsl(2)).emit();
//! ```

use crate::condition::Condition;
use crate::instruction::{Instruction, Mnemonic};
use crate::operand::{DataSize, OffsetKind, Operand2Shift, Operand2Source, ShiftBy};
use crate::output::OutputCollector;
use crate::registers::{Register, RegisterList};

use super::append;

macro_rules! with_condition {
    () => {
        /// Executes the instruction only when `condition` holds.
        pub fn condition(mut self, condition: Condition) -> Self {
            self.condition = condition;
            self
        }
    };
}

macro_rules! with_update_flags {
    () => {
        /// Sets whether the instruction writes the condition flags (`S` suffix).
        pub fn update_flags(mut self, update_flags: bool) -> Self {
            self.update_flags = update_flags;
            self
        }
    };
}

/// Condition-only instruction.
#[must_use = "nothing is appended until `emit` is called"]
pub struct Bare<'e, C: OutputCollector + ?Sized> {
    output: &'e mut C,
    mnemonic: Mnemonic,
    condition: Condition,
}

impl<'e, C: OutputCollector + ?Sized> Bare<'e, C> {
    pub(crate) fn new(output: &'e mut C, mnemonic: Mnemonic) -> Self {
        Self {
            output,
            mnemonic,
            condition: Condition::AL,
        }
    }

    with_condition!();

    pub fn emit(self) {
        append(
            self.output,
            Instruction::Bare {
                condition: self.condition,
                mnemonic: self.mnemonic,
            },
        );
    }
}

/// Single register instruction.
#[must_use = "nothing is appended until `emit` is called"]
pub struct Destination<'e, C: OutputCollector + ?Sized> {
    output: &'e mut C,
    mnemonic: Mnemonic,
    destination: Register,
    condition: Condition,
}

impl<'e, C: OutputCollector + ?Sized> Destination<'e, C> {
    pub(crate) fn new(output: &'e mut C, mnemonic: Mnemonic, destination: Register) -> Self {
        Self {
            output,
            mnemonic,
            destination,
            condition: Condition::AL,
        }
    }

    with_condition!();

    pub fn emit(self) {
        append(
            self.output,
            Instruction::Destination {
                condition: self.condition,
                mnemonic: self.mnemonic,
                destination: self.destination,
            },
        );
    }
}

/// Destination and one source register.
#[must_use = "nothing is appended until `emit` is called"]
pub struct DestinationOperand<'e, C: OutputCollector + ?Sized> {
    output: &'e mut C,
    mnemonic: Mnemonic,
    destination: Register,
    operand: Register,
    update_flags: bool,
    condition: Condition,
}

impl<'e, C: OutputCollector + ?Sized> DestinationOperand<'e, C> {
    pub(crate) fn new(
        output: &'e mut C,
        mnemonic: Mnemonic,
        destination: Register,
        operand: Register,
    ) -> Self {
        Self {
            output,
            mnemonic,
            destination,
            operand,
            update_flags: false,
            condition: Condition::AL,
        }
    }

    with_condition!();
    with_update_flags!();

    pub fn emit(self) {
        append(
            self.output,
            Instruction::DestinationOperand {
                condition: self.condition,
                mnemonic: self.mnemonic,
                update_flags: self.update_flags,
                destination: self.destination,
                operand: self.operand,
            },
        );
    }
}

/// Destination, first operand register and operand-2.
#[must_use = "nothing is appended until `emit` is called"]
pub struct DataProcessing<'e, C: OutputCollector + ?Sized, S> {
    output: &'e mut C,
    mnemonic: Mnemonic,
    destination: Register,
    operand: Register,
    source: S,
    shift: Option<Operand2Shift>,
    update_flags: bool,
    condition: Condition,
}

impl<'e, C: OutputCollector + ?Sized, S: Operand2Source> DataProcessing<'e, C, S> {
    /// Without a destination the first operand is also the destination.
    pub(crate) fn new(
        output: &'e mut C,
        mnemonic: Mnemonic,
        destination: Option<Register>,
        operand: Register,
        source: S,
    ) -> Self {
        Self {
            output,
            mnemonic,
            destination: destination.unwrap_or(operand),
            operand,
            source,
            shift: None,
            update_flags: false,
            condition: Condition::AL,
        }
    }

    with_condition!();
    with_update_flags!();

    pub fn emit(self) {
        append(
            self.output,
            Instruction::DataProcessing {
                condition: self.condition,
                mnemonic: self.mnemonic,
                update_flags: self.update_flags,
                destination: self.destination,
                operand: self.operand,
                op2: self.source.into_operand2(self.shift),
            },
        );
    }
}

impl<C: OutputCollector + ?Sized> DataProcessing<'_, C, Register> {
    /// Passes the operand-2 register through the barrel shifter.
    pub fn shift(mut self, shift: Operand2Shift) -> Self {
        self.shift = Some(shift);
        self
    }
}

/// Destination and operand-2.
#[must_use = "nothing is appended until `emit` is called"]
pub struct Move<'e, C: OutputCollector + ?Sized, S> {
    output: &'e mut C,
    mnemonic: Mnemonic,
    destination: Register,
    source: S,
    shift: Option<Operand2Shift>,
    update_flags: bool,
    condition: Condition,
}

impl<'e, C: OutputCollector + ?Sized, S: Operand2Source> Move<'e, C, S> {
    pub(crate) fn new(
        output: &'e mut C,
        mnemonic: Mnemonic,
        destination: Register,
        source: S,
    ) -> Self {
        Self {
            output,
            mnemonic,
            destination,
            source,
            shift: None,
            update_flags: false,
            condition: Condition::AL,
        }
    }

    with_condition!();
    with_update_flags!();

    pub fn emit(self) {
        append(
            self.output,
            Instruction::Move {
                condition: self.condition,
                mnemonic: self.mnemonic,
                update_flags: self.update_flags,
                destination: self.destination,
                op2: self.source.into_operand2(self.shift),
            },
        );
    }
}

impl<C: OutputCollector + ?Sized> Move<'_, C, Register> {
    /// Passes the operand-2 register through the barrel shifter.
    pub fn shift(mut self, shift: Operand2Shift) -> Self {
        self.shift = Some(shift);
        self
    }
}

/// Destination and two plain source registers.
#[must_use = "nothing is appended until `emit` is called"]
pub struct DestinationTwoOperands<'e, C: OutputCollector + ?Sized> {
    output: &'e mut C,
    mnemonic: Mnemonic,
    destination: Register,
    first_operand: Register,
    second_operand: Register,
    update_flags: bool,
    condition: Condition,
}

impl<'e, C: OutputCollector + ?Sized> DestinationTwoOperands<'e, C> {
    /// Without a destination the first operand is also the destination.
    pub(crate) fn new(
        output: &'e mut C,
        mnemonic: Mnemonic,
        destination: Option<Register>,
        first_operand: Register,
        second_operand: Register,
    ) -> Self {
        Self {
            output,
            mnemonic,
            destination: destination.unwrap_or(first_operand),
            first_operand,
            second_operand,
            update_flags: false,
            condition: Condition::AL,
        }
    }

    with_condition!();
    with_update_flags!();

    pub fn emit(self) {
        append(
            self.output,
            Instruction::DestinationTwoOperands {
                condition: self.condition,
                mnemonic: self.mnemonic,
                update_flags: self.update_flags,
                destination: self.destination,
                first_operand: self.first_operand,
                second_operand: self.second_operand,
            },
        );
    }
}

/// Compare-style instruction. The record always updates the flags, so there
/// is no `update_flags` option.
#[must_use = "nothing is appended until `emit` is called"]
pub struct TwoOperands<'e, C: OutputCollector + ?Sized, S> {
    output: &'e mut C,
    mnemonic: Mnemonic,
    first_operand: Register,
    source: S,
    shift: Option<Operand2Shift>,
    condition: Condition,
}

impl<'e, C: OutputCollector + ?Sized, S: Operand2Source> TwoOperands<'e, C, S> {
    pub(crate) fn new(
        output: &'e mut C,
        mnemonic: Mnemonic,
        first_operand: Register,
        source: S,
    ) -> Self {
        Self {
            output,
            mnemonic,
            first_operand,
            source,
            shift: None,
            condition: Condition::AL,
        }
    }

    with_condition!();

    pub fn emit(self) {
        append(
            self.output,
            Instruction::TwoOperands {
                condition: self.condition,
                mnemonic: self.mnemonic,
                first_operand: self.first_operand,
                op2: self.source.into_operand2(self.shift),
            },
        );
    }
}

impl<C: OutputCollector + ?Sized> TwoOperands<'_, C, Register> {
    /// Passes the operand-2 register through the barrel shifter.
    pub fn shift(mut self, shift: Operand2Shift) -> Self {
        self.shift = Some(shift);
        self
    }
}

/// `ASR`, `LSL`, `LSR` and `ROR`.
///
/// A constant amount resolves to [`Instruction::Shift`], a register amount to
/// [`Instruction::DestinationTwoOperands`].
#[must_use = "nothing is appended until `emit` is called"]
pub struct Shift<'e, C: OutputCollector + ?Sized> {
    output: &'e mut C,
    mnemonic: Mnemonic,
    destination: Register,
    operand: Register,
    by: ShiftBy,
    update_flags: bool,
    condition: Condition,
}

impl<'e, C: OutputCollector + ?Sized> Shift<'e, C> {
    pub(crate) fn new(
        output: &'e mut C,
        mnemonic: Mnemonic,
        destination: Register,
        operand: Register,
        by: ShiftBy,
    ) -> Self {
        Self {
            output,
            mnemonic,
            destination,
            operand,
            by,
            update_flags: false,
            condition: Condition::AL,
        }
    }

    with_condition!();
    with_update_flags!();

    pub fn emit(self) {
        let instruction = match self.by {
            ShiftBy::Amount(amount) => Instruction::Shift {
                condition: self.condition,
                mnemonic: self.mnemonic,
                update_flags: self.update_flags,
                destination: self.destination,
                operand: self.operand,
                amount,
            },
            ShiftBy::Register(second_operand) => Instruction::DestinationTwoOperands {
                condition: self.condition,
                mnemonic: self.mnemonic,
                update_flags: self.update_flags,
                destination: self.destination,
                first_operand: self.operand,
                second_operand,
            },
        };
        append(self.output, instruction);
    }
}

/// Branch to a label.
#[must_use = "nothing is appended until `emit` is called"]
pub struct Label<'e, C: OutputCollector + ?Sized> {
    output: &'e mut C,
    mnemonic: Mnemonic,
    label: String,
    label_offset: Option<u32>,
    condition: Condition,
}

impl<'e, C: OutputCollector + ?Sized> Label<'e, C> {
    pub(crate) fn new(output: &'e mut C, mnemonic: Mnemonic, label: String) -> Self {
        Self {
            output,
            mnemonic,
            label,
            label_offset: None,
            condition: Condition::AL,
        }
    }

    with_condition!();

    /// Targets `label + offset` bytes.
    pub fn label_offset(mut self, offset: u32) -> Self {
        self.label_offset = Some(offset);
        self
    }

    pub fn emit(self) {
        append(
            self.output,
            Instruction::Label {
                condition: self.condition,
                mnemonic: self.mnemonic,
                label: self.label,
                label_offset: self.label_offset,
            },
        );
    }
}

/// `PUSH`/`POP` register list.
#[must_use = "nothing is appended until `emit` is called"]
pub struct RegisterListTransfer<'e, C: OutputCollector + ?Sized> {
    output: &'e mut C,
    mnemonic: Mnemonic,
    registers: RegisterList,
    condition: Condition,
}

impl<'e, C: OutputCollector + ?Sized> RegisterListTransfer<'e, C> {
    pub(crate) fn new(output: &'e mut C, mnemonic: Mnemonic, registers: RegisterList) -> Self {
        Self {
            output,
            mnemonic,
            registers,
            condition: Condition::AL,
        }
    }

    with_condition!();

    pub fn emit(self) {
        append(
            self.output,
            Instruction::RegisterList {
                condition: self.condition,
                mnemonic: self.mnemonic,
                registers: self.registers,
            },
        );
    }
}

/// Load/store between registers and `[base, #offset]`.
#[must_use = "nothing is appended until `emit` is called"]
pub struct MemoryTransfer<'e, C: OutputCollector + ?Sized> {
    output: &'e mut C,
    mnemonic: Mnemonic,
    operand: Register,
    second_operand: Option<Register>,
    base: Register,
    offset: Option<i16>,
    offset_kind: OffsetKind,
    data_size: DataSize,
    condition: Condition,
}

impl<'e, C: OutputCollector + ?Sized> MemoryTransfer<'e, C> {
    pub(crate) fn new(
        output: &'e mut C,
        mnemonic: Mnemonic,
        operand: Register,
        base: Register,
    ) -> Self {
        Self {
            output,
            mnemonic,
            operand,
            second_operand: None,
            base,
            offset: None,
            offset_kind: OffsetKind::ImmediateOffset,
            data_size: DataSize::Word,
            condition: Condition::AL,
        }
    }

    with_condition!();

    /// Signed byte offset from the base register.
    pub fn offset(mut self, offset: i16) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn offset_kind(mut self, offset_kind: OffsetKind) -> Self {
        self.offset_kind = offset_kind;
        self
    }

    pub fn data_size(mut self, data_size: DataSize) -> Self {
        self.data_size = data_size;
        self
    }

    /// Transfers the register pair `operand, second` (`LDRD`/`STRD`).
    pub fn second_operand(mut self, second: Register) -> Self {
        self.second_operand = Some(second);
        self
    }

    pub fn emit(self) {
        append(
            self.output,
            Instruction::MemoryTransfer {
                condition: self.condition,
                mnemonic: self.mnemonic,
                data_size: self.data_size,
                operand: self.operand,
                second_operand: self.second_operand,
                base: self.base,
                offset: self.offset,
                offset_kind: self.offset_kind,
            },
        );
    }
}
