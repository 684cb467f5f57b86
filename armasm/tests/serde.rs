//! JSON persistence of emitted assemblies.

use armasm::{Assembly, Condition, DataSize, Emitter, Instruction, Operand2Shift, Register::*};
use pretty_assertions::assert_eq;

fn sample() -> Assembly {
    let mut assembly = Assembly::new();
    let mut e = Emitter::new(&mut assembly);
    e.data_member("counter", 0);
    e.data_member_fill("stack", 64, "4", "0");
    e.global_label("main");
    e.comment("prologue");
    e.push([R4, R5, LR]).emit();
    e.add(R4, R0, R1).shift(Operand2Shift::Rrx).update_flags(true).emit();
    e.branch("done").label_offset(8).condition(Condition::MI).emit();
    e.load_register(R5, SP).offset(-4).data_size(DataSize::Byte).emit();
    e.set_byte(0x0400_0000, 3);
    e.pop([R4, R5, PC]).emit();
    assembly
}

#[test]
fn assembly_round_trip() {
    let assembly = sample();
    let json = serde_json::to_string(&assembly).unwrap();
    let back: Assembly = serde_json::from_str(&json).unwrap();

    assert_eq!(back, assembly);
    assert_eq!(back.listing(), assembly.listing());
}

#[test]
fn instruction_json_shape() {
    let mut assembly = Assembly::new();
    Emitter::new(&mut assembly).test_bits(R0, 1).emit();

    let instruction: Vec<&Instruction> = assembly.instructions().collect();
    assert_eq!(
        serde_json::to_value(instruction[0]).unwrap(),
        serde_json::json!({
            "TwoOperands": {
                "condition": "AL",
                "mnemonic": "Tst",
                "first_operand": "R0",
                "op2": { "Immediate": 1 }
            }
        })
    );
}
