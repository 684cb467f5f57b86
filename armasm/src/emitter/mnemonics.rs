//! Mnemonic methods of [`Emitter`], in alphabetical order.
//!
//! Operand-2 parameters accept a [`Register`] or an immediate (`u32`/`i32`).
//! `*_assign` forms use the first operand as destination.
//!
//! An unsuffixed integer literal is an `i32`, so immediates above
//! `i32::MAX` need a `u32` suffix (or a typed constant):
//!
//! ```
//! use armasm::{Assembly, Emitter, Register::*};
//!
//! let mut assembly = Assembly::new();
//! let mut e = Emitter::new(&mut assembly);
//! e.move_(R0, 0x8000_0000u32).emit();
//! e.move_(R1, -1).emit();
//!
//! let listing = assembly.listing().unwrap();
//! assert!(listing.contains("MOV R0, #0x80000000"));
//! assert!(listing.contains("MOV R1, #0xFFFFFFFF"));
//! ```
//!
//! ```compile_fail
//! # use armasm::{Assembly, Emitter, Register::*};
//! # let mut assembly = Assembly::new();
//! # let mut e = Emitter::new(&mut assembly);
//! // literal out of range for `i32`
//! e.move_(R0, 0x8000_0000).emit();
//! ```

use crate::instruction::Mnemonic;
use crate::operand::{Operand2Source, ShiftBy};
use crate::output::OutputCollector;
use crate::registers::{Register, RegisterList};

use super::builders::{
    Bare, DataProcessing, Destination, DestinationOperand, DestinationTwoOperands, Label,
    MemoryTransfer, Move, RegisterListTransfer, Shift, TwoOperands,
};
use super::Emitter;

impl<C: OutputCollector + ?Sized> Emitter<'_, C> {
    fn data_processing<S: Operand2Source>(
        &mut self,
        mnemonic: Mnemonic,
        destination: Option<Register>,
        operand: Register,
        op2: S,
    ) -> DataProcessing<'_, C, S> {
        DataProcessing::new(&mut *self.output, mnemonic, destination, operand, op2)
    }

    /// `ADD d, a, op2`
    pub fn add<S: Operand2Source>(
        &mut self,
        destination: Register,
        operand: Register,
        op2: S,
    ) -> DataProcessing<'_, C, S> {
        self.data_processing(Mnemonic::Add, Some(destination), operand, op2)
    }

    /// `ADD a, a, op2`
    pub fn add_assign<S: Operand2Source>(
        &mut self,
        operand: Register,
        op2: S,
    ) -> DataProcessing<'_, C, S> {
        self.data_processing(Mnemonic::Add, None, operand, op2)
    }

    /// `ADC d, a, op2`
    pub fn add_with_carry<S: Operand2Source>(
        &mut self,
        destination: Register,
        operand: Register,
        op2: S,
    ) -> DataProcessing<'_, C, S> {
        self.data_processing(Mnemonic::Adc, Some(destination), operand, op2)
    }

    /// `ADC a, a, op2`
    pub fn add_with_carry_assign<S: Operand2Source>(
        &mut self,
        operand: Register,
        op2: S,
    ) -> DataProcessing<'_, C, S> {
        self.data_processing(Mnemonic::Adc, None, operand, op2)
    }

    /// `AND d, a, op2`
    pub fn and<S: Operand2Source>(
        &mut self,
        destination: Register,
        operand: Register,
        op2: S,
    ) -> DataProcessing<'_, C, S> {
        self.data_processing(Mnemonic::And, Some(destination), operand, op2)
    }

    /// `ASR d, a, #n` or `ASR d, a, Rs`
    pub fn arithmetic_shift_right(
        &mut self,
        destination: Register,
        operand: Register,
        by: impl Into<ShiftBy>,
    ) -> Shift<'_, C> {
        Shift::new(
            &mut *self.output,
            Mnemonic::Asr,
            destination,
            operand,
            by.into(),
        )
    }

    /// `BIC d, a, op2`
    pub fn bit_clear<S: Operand2Source>(
        &mut self,
        destination: Register,
        operand: Register,
        op2: S,
    ) -> DataProcessing<'_, C, S> {
        self.data_processing(Mnemonic::Bic, Some(destination), operand, op2)
    }

    pub fn branch(&mut self, label: impl Into<String>) -> Label<'_, C> {
        Label::new(&mut *self.output, Mnemonic::B, label.into())
    }

    pub fn branch_and_exchange(&mut self, target: Register) -> Destination<'_, C> {
        Destination::new(&mut *self.output, Mnemonic::Bx, target)
    }

    pub fn branch_with_link(&mut self, label: impl Into<String>) -> Label<'_, C> {
        Label::new(&mut *self.output, Mnemonic::Bl, label.into())
    }

    /// `BLX Rm`
    pub fn branch_with_link_and_exchange(&mut self, target: Register) -> Destination<'_, C> {
        Destination::new(&mut *self.output, Mnemonic::Blx, target)
    }

    /// `BLX label`
    pub fn branch_with_link_and_exchange_label(
        &mut self,
        label: impl Into<String>,
    ) -> Label<'_, C> {
        Label::new(&mut *self.output, Mnemonic::Blx, label.into())
    }

    pub fn exception_return(&mut self) -> Bare<'_, C> {
        Bare::new(&mut *self.output, Mnemonic::Eret)
    }

    /// `EOR d, a, op2`
    pub fn exclusive_or<S: Operand2Source>(
        &mut self,
        destination: Register,
        operand: Register,
        op2: S,
    ) -> DataProcessing<'_, C, S> {
        self.data_processing(Mnemonic::Eor, Some(destination), operand, op2)
    }

    /// `LDR operand, [base]`
    pub fn load_register(&mut self, operand: Register, base: Register) -> MemoryTransfer<'_, C> {
        MemoryTransfer::new(&mut *self.output, Mnemonic::Ldr, operand, base)
    }

    pub fn logical_shift_left(
        &mut self,
        destination: Register,
        operand: Register,
        by: impl Into<ShiftBy>,
    ) -> Shift<'_, C> {
        Shift::new(
            &mut *self.output,
            Mnemonic::Lsl,
            destination,
            operand,
            by.into(),
        )
    }

    pub fn logical_shift_right(
        &mut self,
        destination: Register,
        operand: Register,
        by: impl Into<ShiftBy>,
    ) -> Shift<'_, C> {
        Shift::new(
            &mut *self.output,
            Mnemonic::Lsr,
            destination,
            operand,
            by.into(),
        )
    }

    /// `MOV d, op2`
    pub fn move_<S: Operand2Source>(&mut self, destination: Register, op2: S) -> Move<'_, C, S> {
        Move::new(&mut *self.output, Mnemonic::Mov, destination, op2)
    }

    /// `MVN d, op2`
    pub fn move_not<S: Operand2Source>(
        &mut self,
        destination: Register,
        op2: S,
    ) -> Move<'_, C, S> {
        Move::new(&mut *self.output, Mnemonic::Mvn, destination, op2)
    }

    /// `MUL d, a, b`
    pub fn multiply(
        &mut self,
        destination: Register,
        first: Register,
        second: Register,
    ) -> DestinationTwoOperands<'_, C> {
        DestinationTwoOperands::new(
            &mut *self.output,
            Mnemonic::Mul,
            Some(destination),
            first,
            second,
        )
    }

    /// `MUL a, a, b`
    pub fn multiply_assign(
        &mut self,
        first: Register,
        second: Register,
    ) -> DestinationTwoOperands<'_, C> {
        DestinationTwoOperands::new(&mut *self.output, Mnemonic::Mul, None, first, second)
    }

    /// `NEG d, a`
    pub fn negate(&mut self, destination: Register, operand: Register) -> DestinationOperand<'_, C> {
        DestinationOperand::new(&mut *self.output, Mnemonic::Neg, destination, operand)
    }

    pub fn no_op(&mut self) -> Bare<'_, C> {
        Bare::new(&mut *self.output, Mnemonic::Nop)
    }

    /// `ORR d, a, op2`
    pub fn or<S: Operand2Source>(
        &mut self,
        destination: Register,
        operand: Register,
        op2: S,
    ) -> DataProcessing<'_, C, S> {
        self.data_processing(Mnemonic::Orr, Some(destination), operand, op2)
    }

    /// `ORN d, a, op2`
    pub fn or_not<S: Operand2Source>(
        &mut self,
        destination: Register,
        operand: Register,
        op2: S,
    ) -> DataProcessing<'_, C, S> {
        self.data_processing(Mnemonic::Orn, Some(destination), operand, op2)
    }

    /// Takes a single register or anything convertible to a [`RegisterList`].
    pub fn pop(&mut self, registers: impl Into<RegisterList>) -> RegisterListTransfer<'_, C> {
        RegisterListTransfer::new(&mut *self.output, Mnemonic::Pop, registers.into())
    }

    /// Takes a single register or anything convertible to a [`RegisterList`].
    pub fn push(&mut self, registers: impl Into<RegisterList>) -> RegisterListTransfer<'_, C> {
        RegisterListTransfer::new(&mut *self.output, Mnemonic::Push, registers.into())
    }

    /// `RSB d, a, op2`
    pub fn reverse_subtract<S: Operand2Source>(
        &mut self,
        destination: Register,
        operand: Register,
        op2: S,
    ) -> DataProcessing<'_, C, S> {
        self.data_processing(Mnemonic::Rsb, Some(destination), operand, op2)
    }

    pub fn reverse_subtract_assign<S: Operand2Source>(
        &mut self,
        operand: Register,
        op2: S,
    ) -> DataProcessing<'_, C, S> {
        self.data_processing(Mnemonic::Rsb, None, operand, op2)
    }

    /// `RSC d, a, op2`
    pub fn reverse_subtract_with_carry<S: Operand2Source>(
        &mut self,
        destination: Register,
        operand: Register,
        op2: S,
    ) -> DataProcessing<'_, C, S> {
        self.data_processing(Mnemonic::Rsc, Some(destination), operand, op2)
    }

    pub fn reverse_subtract_with_carry_assign<S: Operand2Source>(
        &mut self,
        operand: Register,
        op2: S,
    ) -> DataProcessing<'_, C, S> {
        self.data_processing(Mnemonic::Rsc, None, operand, op2)
    }

    pub fn rotate_right(
        &mut self,
        destination: Register,
        operand: Register,
        by: impl Into<ShiftBy>,
    ) -> Shift<'_, C> {
        Shift::new(
            &mut *self.output,
            Mnemonic::Ror,
            destination,
            operand,
            by.into(),
        )
    }

    /// `RRX d, a`
    pub fn rotate_right_with_extend(
        &mut self,
        destination: Register,
        operand: Register,
    ) -> DestinationOperand<'_, C> {
        DestinationOperand::new(&mut *self.output, Mnemonic::Rrx, destination, operand)
    }

    /// `STR operand, [base]`
    pub fn store_register(&mut self, operand: Register, base: Register) -> MemoryTransfer<'_, C> {
        MemoryTransfer::new(&mut *self.output, Mnemonic::Str, operand, base)
    }

    /// `SUB d, a, op2`
    pub fn subtract<S: Operand2Source>(
        &mut self,
        destination: Register,
        operand: Register,
        op2: S,
    ) -> DataProcessing<'_, C, S> {
        self.data_processing(Mnemonic::Sub, Some(destination), operand, op2)
    }

    pub fn subtract_assign<S: Operand2Source>(
        &mut self,
        operand: Register,
        op2: S,
    ) -> DataProcessing<'_, C, S> {
        self.data_processing(Mnemonic::Sub, None, operand, op2)
    }

    /// `SBC d, a, op2`
    pub fn subtract_with_carry<S: Operand2Source>(
        &mut self,
        destination: Register,
        operand: Register,
        op2: S,
    ) -> DataProcessing<'_, C, S> {
        self.data_processing(Mnemonic::Sbc, Some(destination), operand, op2)
    }

    pub fn subtract_with_carry_assign<S: Operand2Source>(
        &mut self,
        operand: Register,
        op2: S,
    ) -> DataProcessing<'_, C, S> {
        self.data_processing(Mnemonic::Sbc, None, operand, op2)
    }

    /// `TST a, op2`
    pub fn test_bits<S: Operand2Source>(&mut self, operand: Register, op2: S) -> TwoOperands<'_, C, S> {
        TwoOperands::new(&mut *self.output, Mnemonic::Tst, operand, op2)
    }

    /// `TEQ a, op2`
    pub fn test_equivalence<S: Operand2Source>(
        &mut self,
        operand: Register,
        op2: S,
    ) -> TwoOperands<'_, C, S> {
        TwoOperands::new(&mut *self.output, Mnemonic::Teq, operand, op2)
    }
}
