//! # armasm
//!
//! Mnemonic-level ARMv7 (A32) instruction emission.
//!
//! Code generators call named operations ([`Emitter::add`],
//! [`Emitter::branch`], [`Emitter::push`], ...) and the crate turns each call
//! into one fully-specified [`Instruction`] record appended to an
//! [`OutputCollector`]. Shape errors (a shifted immediate, a flag option on a
//! compare) do not compile; range errors are kept on the record and reported
//! by [`Instruction::validate`] and [`Assembly::listing`].
//!
//! ```
//! use armasm::{Assembly, Condition, Emitter, Register::*};
//!
//! let mut assembly = Assembly::new();
//! let mut e = Emitter::new(&mut assembly);
//! e.global_label("main");
//! e.push([R4, LR]).emit();
//! e.move_(R4, 10).emit();
//! e.label("loop");
//! e.subtract_assign(R4, 1).update_flags(true).emit();
//! e.branch("loop").condition(Condition::NE).emit();
//! e.pop([R4, PC]).emit();
//!
//! assert_eq!(
//!     assembly.listing().unwrap(),
//!     ".text\n.global main\nmain:\n    PUSH {R4, LR}\n    MOV R4, #10\nloop:\n    SUBS R4, R4, #1\n    BNE loop\n    POP {R4, PC}\n"
//! );
//! ```

pub mod condition;
pub mod current;
pub mod emitter;
pub mod error;

#[allow(clippy::too_many_lines)]
pub mod instruction;

pub mod operand;
pub mod output;
pub mod registers;

pub use condition::Condition;
pub use emitter::{Emitter, SCRATCH_ADDRESS, SCRATCH_VALUE};
pub use error::AsmError;
pub use instruction::{Instruction, Mnemonic};
pub use operand::{DataSize, OffsetKind, Operand2, Operand2Shift, Operand2Source, ShiftBy, ShiftKind};
pub use output::{Assembly, DataMember, DataValue, OutputCollector, OutputItem};
pub use registers::{Register, RegisterList};
