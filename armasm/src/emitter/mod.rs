//! # Instruction Emitter
//!
//! [`Emitter`] is the mnemonic-level surface. Each mnemonic method resolves
//! its arguments to one instruction shape and returns that shape's builder
//! (see [`builders`]); `emit` on the builder appends the record to the
//! collector the emitter borrows.
//!
//! ```
//! use armasm::{Assembly, Condition, Emitter, Register::*};
//!
//! let mut assembly = Assembly::new();
//! let mut e = Emitter::new(&mut assembly);
//! e.add_assign(R0, 1).update_flags(true).emit();
//! e.branch("loop").condition(Condition::NE).emit();
//!
//! let listing = assembly.listing().unwrap();
//! assert!(listing.contains("ADDS R0, R0, #1"));
//! assert!(listing.contains("BNE loop"));
//! ```
//!
//! Helper sequences such as [`Emitter::set_byte`] are written purely in terms
//! of the mnemonic methods.

pub mod builders;
mod mnemonics;

use crate::instruction::Instruction;
use crate::operand::DataSize;
use crate::output::{Assembly, DataMember, DataValue, OutputCollector};
use crate::registers::Register;

/// Scratch register holding the target address in [`Emitter::set_byte`].
pub const SCRATCH_ADDRESS: Register = Register::R11;

/// Scratch register holding the byte value in [`Emitter::set_byte`].
pub const SCRATCH_VALUE: Register = Register::R12;

/// Single point where records reach a collector.
fn append<C: OutputCollector + ?Sized>(output: &mut C, instruction: Instruction) {
    tracing::trace!("emit `{instruction}`");
    output.append(instruction);
}

/// Emission handle over a borrowed [`OutputCollector`].
pub struct Emitter<'a, C: OutputCollector + ?Sized = Assembly> {
    output: &'a mut C,
}

impl<'a, C: OutputCollector + ?Sized> Emitter<'a, C> {
    #[must_use]
    pub fn new(output: &'a mut C) -> Self {
        Self { output }
    }

    /// Appends an already built record.
    pub fn emit(&mut self, instruction: Instruction) {
        append(&mut *self.output, instruction);
    }

    pub fn comment(&mut self, text: impl Into<String>) {
        self.output.add_comment(text.into());
    }

    /// Defines an assembler constant (`.equ name, value`). `value` is written
    /// unchanged, so expressions such as `BASE+4` pass through.
    pub fn constant(&mut self, name: &str, value: impl std::fmt::Display) {
        self.output.add_literal(format!(".equ {name}, {value}"));
    }

    /// Adds a word-sized data member.
    pub fn data_member(&mut self, name: impl Into<String>, value: u32) {
        self.output
            .add_data_member(DataMember::new(name, DataValue::Word(value)));
    }

    /// Adds a NUL-terminated string data member.
    pub fn data_member_text(&mut self, name: impl Into<String>, text: impl Into<String>) {
        self.output
            .add_data_member(DataMember::new(name, DataValue::Text(text.into())));
    }

    pub fn data_member_bytes(&mut self, name: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.output
            .add_data_member(DataMember::new(name, DataValue::Bytes(bytes.into())));
    }

    /// Adds `element_count` elements of `size` bytes, each set to `value`.
    pub fn data_member_fill(
        &mut self,
        name: impl Into<String>,
        element_count: u32,
        size: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.output.add_data_member(DataMember::new(
            name,
            DataValue::Fill {
                element_count,
                size: size.into(),
                value: value.into(),
            },
        ));
    }

    pub fn label(&mut self, name: impl Into<String>) {
        self.output.add_label(name.into(), false);
    }

    /// Places a label exported with `.global`.
    pub fn global_label(&mut self, name: impl Into<String>) {
        self.output.add_label(name.into(), true);
    }

    /// Writes raw assembler text.
    pub fn literal_code(&mut self, code: impl Into<String>) {
        self.output.add_literal(code.into());
    }

    /// Stores `value` at the absolute `address`.
    ///
    /// Emits `MOV R11, #address`, `MOV R12, #value`, `STRB R12, [R11]` and
    /// clobbers both scratch registers.
    pub fn set_byte(&mut self, address: u32, value: u8) {
        self.move_(SCRATCH_ADDRESS, address).emit();
        self.move_(SCRATCH_VALUE, u32::from(value)).emit();
        self.store_register(SCRATCH_VALUE, SCRATCH_ADDRESS)
            .data_size(DataSize::Byte)
            .emit();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::Condition;
    use crate::error::AsmError;
    use crate::instruction::Mnemonic;
    use crate::operand::{OffsetKind, Operand2, Operand2Shift, ShiftKind};
    use crate::output::OutputItem;
    use crate::registers::{Register::*, RegisterList};
    use pretty_assertions::assert_eq;
    use rand::Rng;

    fn emitted(f: impl FnOnce(&mut Emitter<'_>)) -> Vec<Instruction> {
        let mut assembly = Assembly::new();
        f(&mut Emitter::new(&mut assembly));
        assembly.instructions().cloned().collect()
    }

    fn single(f: impl FnOnce(&mut Emitter<'_>)) -> Instruction {
        let mut instructions = emitted(f);
        assert_eq!(instructions.len(), 1, "expected exactly one record");
        instructions.remove(0)
    }

    #[test]
    fn and_with_register() {
        assert_eq!(
            single(|e| e.and(R0, R1, R2).emit()),
            Instruction::DataProcessing {
                condition: Condition::AL,
                mnemonic: Mnemonic::And,
                update_flags: false,
                destination: R0,
                operand: R1,
                op2: Operand2::Register {
                    register: R2,
                    shift: None
                },
            }
        );
    }

    #[test]
    fn add_assign_elides_destination() {
        assert_eq!(
            single(|e| e.add_assign(R0, 4).update_flags(true).emit()),
            Instruction::DataProcessing {
                condition: Condition::AL,
                mnemonic: Mnemonic::Add,
                update_flags: true,
                destination: R0,
                operand: R0,
                op2: Operand2::Immediate(4),
            }
        );
    }

    #[test]
    fn every_assign_form_reuses_first_operand() {
        let instructions = emitted(|e| {
            e.add_assign(R3, R4).emit();
            e.add_with_carry_assign(R3, R4).emit();
            e.reverse_subtract_assign(R3, R4).emit();
            e.reverse_subtract_with_carry_assign(R3, R4).emit();
            e.subtract_assign(R3, R4).emit();
            e.subtract_with_carry_assign(R3, 1).emit();
            e.multiply_assign(R3, R4).emit();
        });
        assert_eq!(instructions.len(), 7);
        for instruction in &instructions {
            assert_eq!(instruction.destination(), Some(R3), "{instruction}");
        }
        assert_eq!(
            instructions
                .iter()
                .map(Instruction::mnemonic)
                .collect::<Vec<_>>(),
            vec![
                Mnemonic::Add,
                Mnemonic::Adc,
                Mnemonic::Rsb,
                Mnemonic::Rsc,
                Mnemonic::Sub,
                Mnemonic::Sbc,
                Mnemonic::Mul,
            ]
        );
    }

    #[test]
    fn conditional_branch_with_offset() {
        assert_eq!(
            single(|e| e
                .branch("loop")
                .label_offset(4)
                .condition(Condition::NE)
                .emit()),
            Instruction::Label {
                condition: Condition::NE,
                mnemonic: Mnemonic::B,
                label: "loop".to_string(),
                label_offset: Some(4),
            }
        );
    }

    #[test]
    fn branch_defaults() {
        assert_eq!(
            single(|e| e.branch_with_link("f").emit()),
            Instruction::Label {
                condition: Condition::AL,
                mnemonic: Mnemonic::Bl,
                label: "f".to_string(),
                label_offset: None,
            }
        );
    }

    #[test]
    fn branch_with_link_and_exchange_forms() {
        let instructions = emitted(|e| {
            e.branch_with_link_and_exchange(R3).emit();
            e.branch_with_link_and_exchange_label("thumb_fn").emit();
            e.branch_and_exchange(LR).condition(Condition::EQ).emit();
        });
        assert_eq!(
            instructions,
            vec![
                Instruction::Destination {
                    condition: Condition::AL,
                    mnemonic: Mnemonic::Blx,
                    destination: R3,
                },
                Instruction::Label {
                    condition: Condition::AL,
                    mnemonic: Mnemonic::Blx,
                    label: "thumb_fn".to_string(),
                    label_offset: None,
                },
                Instruction::Destination {
                    condition: Condition::EQ,
                    mnemonic: Mnemonic::Bx,
                    destination: LR,
                },
            ]
        );
    }

    #[test]
    fn load_byte_with_negative_offset() {
        assert_eq!(
            single(|e| e
                .load_register(R0, R1)
                .offset(-8)
                .data_size(DataSize::Byte)
                .emit()),
            Instruction::MemoryTransfer {
                condition: Condition::AL,
                mnemonic: Mnemonic::Ldr,
                data_size: DataSize::Byte,
                operand: R0,
                second_operand: None,
                base: R1,
                offset: Some(-8),
                offset_kind: OffsetKind::ImmediateOffset,
            }
        );
    }

    #[test]
    fn store_pair_post_indexed() {
        let instruction = single(|e| {
            e.store_register(R2, SP)
                .second_operand(R3)
                .offset(8)
                .offset_kind(OffsetKind::PostIndexed)
                .emit();
        });
        assert_eq!(instruction.to_string(), "STRD R2, R3, [SP], #8");
    }

    #[test]
    fn push_single_register() {
        assert_eq!(
            single(|e| e.push(R4).emit()),
            Instruction::RegisterList {
                condition: Condition::AL,
                mnemonic: Mnemonic::Push,
                registers: RegisterList::from([R4]),
            }
        );
    }

    #[test]
    fn pop_register_list() {
        let instruction = single(|e| e.pop([R4, R5, PC]).emit());
        assert_eq!(instruction.to_string(), "POP {R4, R5, PC}");
    }

    #[test]
    fn set_byte_sequence() {
        let instructions = emitted(|e| e.set_byte(0x0400_0000, 0xAB));
        assert_eq!(
            instructions,
            vec![
                Instruction::Move {
                    condition: Condition::AL,
                    mnemonic: Mnemonic::Mov,
                    update_flags: false,
                    destination: SCRATCH_ADDRESS,
                    op2: Operand2::Immediate(0x0400_0000),
                },
                Instruction::Move {
                    condition: Condition::AL,
                    mnemonic: Mnemonic::Mov,
                    update_flags: false,
                    destination: SCRATCH_VALUE,
                    op2: Operand2::Immediate(0xAB),
                },
                Instruction::MemoryTransfer {
                    condition: Condition::AL,
                    mnemonic: Mnemonic::Str,
                    data_size: DataSize::Byte,
                    operand: SCRATCH_VALUE,
                    second_operand: None,
                    base: SCRATCH_ADDRESS,
                    offset: None,
                    offset_kind: OffsetKind::ImmediateOffset,
                },
            ]
        );
    }

    #[test]
    fn shift_by_amount_and_by_register() {
        let instructions = emitted(|e| {
            e.logical_shift_left(R0, R1, 3).emit();
            e.arithmetic_shift_right(R0, R1, R2).update_flags(true).emit();
        });
        assert_eq!(
            instructions,
            vec![
                Instruction::Shift {
                    condition: Condition::AL,
                    mnemonic: Mnemonic::Lsl,
                    update_flags: false,
                    destination: R0,
                    operand: R1,
                    amount: 3,
                },
                Instruction::DestinationTwoOperands {
                    condition: Condition::AL,
                    mnemonic: Mnemonic::Asr,
                    update_flags: true,
                    destination: R0,
                    first_operand: R1,
                    second_operand: R2,
                },
            ]
        );
    }

    #[test]
    fn out_of_range_shift_is_kept_and_rejected() {
        let mut assembly = Assembly::new();
        Emitter::new(&mut assembly)
            .logical_shift_right(R0, R1, 40)
            .emit();

        let instruction = assembly.instructions().next().cloned();
        assert_eq!(
            instruction.as_ref().map(Instruction::destination),
            Some(Some(R0))
        );
        assert!(matches!(
            instruction,
            Some(Instruction::Shift { amount: 40, .. })
        ));
        assert_eq!(
            assembly.listing(),
            Err(AsmError::ShiftOutOfRange {
                mnemonic: Mnemonic::Lsr,
                amount: 40,
                max: 31
            })
        );
    }

    #[test]
    fn register_operand2_takes_shift() {
        assert_eq!(
            single(|e| e
                .move_(R0, R1)
                .shift(Operand2Shift::ror(8))
                .condition(Condition::GT)
                .emit())
            .to_string(),
            "MOVGT R0, R1, ROR #8"
        );
    }

    #[test]
    fn compare_always_updates_flags() {
        let instructions = emitted(|e| {
            e.test_bits(R0, 1).emit();
            e.test_equivalence(R0, R1)
                .shift(Operand2Shift::by_register(ShiftKind::Lsl, R2))
                .emit();
        });
        assert!(instructions.iter().all(Instruction::updates_flags));
        assert!(instructions.iter().all(|i| i.destination().is_none()));
        assert_eq!(instructions[1].to_string(), "TEQ R0, R1, LSL R2");
    }

    #[test]
    fn update_flags_defaults_off() {
        let instructions = emitted(|e| {
            e.add(R0, R1, R2).emit();
            e.negate(R0, R1).emit();
            e.rotate_right_with_extend(R0, R1).emit();
            e.move_not(R0, 0).emit();
            e.multiply(R0, R1, R2).emit();
            e.rotate_right(R0, R1, 4).emit();
        });
        assert!(instructions.iter().all(|i| !i.updates_flags()));
        assert!(instructions.iter().all(|i| i.condition() == Condition::AL));
    }

    #[test]
    fn bare_instructions() {
        let instructions = emitted(|e| {
            e.no_op().emit();
            e.exception_return().condition(Condition::EQ).emit();
        });
        assert_eq!(
            instructions
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>(),
            vec!["NOP", "ERETEQ"]
        );
    }

    #[test]
    fn pass_through_helpers() {
        let mut assembly = Assembly::new();
        {
            let mut e = Emitter::new(&mut assembly);
            e.constant("LIMIT", 10);
            e.constant("END", "LIMIT+4");
            e.global_label("main");
            e.comment("body");
            e.label("loop");
            e.literal_code(".ltorg");
            e.data_member("counter", 0);
            e.data_member_text("name", "armlet");
            e.data_member_bytes("raw", [1u8, 2]);
            e.data_member_fill("buffer", 4, "1", "0");
        }
        assert_eq!(
            assembly.items(),
            &[
                OutputItem::Literal(".equ LIMIT, 10".to_string()),
                OutputItem::Literal(".equ END, LIMIT+4".to_string()),
                OutputItem::Label {
                    name: "main".to_string(),
                    is_global: true
                },
                OutputItem::Comment("body".to_string()),
                OutputItem::Label {
                    name: "loop".to_string(),
                    is_global: false
                },
                OutputItem::Literal(".ltorg".to_string()),
            ]
        );
        assert_eq!(
            assembly
                .data_members()
                .iter()
                .map(|m| m.name.as_str())
                .collect::<Vec<_>>(),
            vec!["counter", "name", "raw", "buffer"]
        );
        assert_eq!(assembly.instructions().count(), 0);
    }

    #[test]
    fn random_data_processing_never_has_both_operand2_forms() {
        let mut rng = rand::thread_rng();
        let mut assembly = Assembly::new();
        let mut e = Emitter::new(&mut assembly);

        for _ in 0..500 {
            let destination = Register::ALL[rng.gen_range(0..Register::ALL.len())];
            let operand = Register::ALL[rng.gen_range(0..Register::ALL.len())];
            let condition = Condition::ALL[rng.gen_range(0..Condition::ALL.len())];
            let update_flags = rng.gen_range(0..2) == 1;

            if rng.gen_range(0..2) == 0 {
                let source = Register::ALL[rng.gen_range(0..Register::ALL.len())];
                let amount = rng.gen_range(0..32);
                e.subtract(destination, operand, source)
                    .shift(Operand2Shift::lsl(amount))
                    .update_flags(update_flags)
                    .condition(condition)
                    .emit();
            } else {
                let immediate: u32 = rng.gen_range(0..=0xFFFF);
                e.or(destination, operand, immediate)
                    .update_flags(update_flags)
                    .condition(condition)
                    .emit();
            }
        }

        assert_eq!(assembly.instructions().count(), 500);
        for instruction in assembly.instructions() {
            let Instruction::DataProcessing { op2, .. } = instruction else {
                panic!("unexpected shape: {instruction:?}");
            };
            assert!(op2.register().is_some() != op2.immediate().is_some());
            if op2.immediate().is_some() {
                assert_eq!(op2.shift(), None);
            }
        }
        assert!(assembly.validate().is_ok());
    }

    #[test]
    fn works_through_trait_object() {
        let mut assembly = Assembly::new();
        {
            let collector: &mut dyn OutputCollector = &mut assembly;
            let mut e = Emitter::new(collector);
            e.exclusive_or(R0, R0, R0).emit();
            e.or_not(R1, R2, 0xFF).emit();
            e.bit_clear(R3, R3, 1).emit();
        }
        assert_eq!(
            assembly
                .instructions()
                .map(ToString::to_string)
                .collect::<Vec<_>>(),
            vec!["EOR R0, R0, R0", "ORN R1, R2, #255", "BIC R3, R3, #1"]
        );
    }
}
