use crate::lua_value::Value;
use crate::lua_vm::{Instruction, LuaVM, OpCode};

use super::make_closure;

/// Scenario 6 (spec §8), forward direction: `for i=1,3 do sum=sum+i end`.
#[test]
fn numeric_for_loop_forward() {
    let instructions = vec![
        Instruction::encode_abx(OpCode::LoadK, 0, 0), // init = 1
        Instruction::encode_abx(OpCode::LoadK, 1, 1), // limit = 3
        Instruction::encode_abx(OpCode::LoadK, 2, 2), // step = 1
        Instruction::encode_abx(OpCode::LoadK, 4, 3), // sum = 0
        Instruction::encode_asbx(OpCode::ForPrep, 0, 1),
        Instruction::encode_abc(OpCode::Add, 4, 4, 3),
        Instruction::encode_asbx(OpCode::ForLoop, 0, -2),
        Instruction::encode_abc(OpCode::Return, 4, 2, 0),
    ];
    let constants = vec![Value::Number(1.0), Value::Number(3.0), Value::Number(1.0), Value::Number(0.0)];
    let closure = make_closure(instructions, constants, Vec::new(), 0, 0, 5);

    let mut vm = LuaVM::new();
    let result = vm.run(closure).unwrap();
    assert_eq!(result, vec![Value::Number(6.0)]);
}

/// Scenario 6 (spec §8), backward direction: `for i=3,1,-1 do ... end`,
/// also checking the loop ran exactly 3 times.
#[test]
fn numeric_for_loop_backward() {
    let instructions = vec![
        Instruction::encode_abx(OpCode::LoadK, 0, 0), // init = 3
        Instruction::encode_abx(OpCode::LoadK, 1, 1), // limit = 1
        Instruction::encode_abx(OpCode::LoadK, 2, 2), // step = -1
        Instruction::encode_abx(OpCode::LoadK, 4, 3), // sum = 0
        Instruction::encode_abx(OpCode::LoadK, 5, 3), // count = 0
        Instruction::encode_asbx(OpCode::ForPrep, 0, 3),
        Instruction::encode_abc(OpCode::Add, 4, 4, 3),
        Instruction::encode_abx(OpCode::LoadK, 6, 4), // 1
        Instruction::encode_abc(OpCode::Add, 5, 5, 6),
        Instruction::encode_asbx(OpCode::ForLoop, 0, -4),
        Instruction::encode_abc(OpCode::Return, 4, 3, 0),
    ];
    let constants = vec![
        Value::Number(3.0),
        Value::Number(1.0),
        Value::Number(-1.0),
        Value::Number(0.0),
        Value::Number(1.0),
    ];
    let closure = make_closure(instructions, constants, Vec::new(), 0, 0, 7);

    let mut vm = LuaVM::new();
    let result = vm.run(closure).unwrap();
    assert_eq!(result, vec![Value::Number(6.0), Value::Number(3.0)]);
}
