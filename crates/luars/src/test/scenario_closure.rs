use std::rc::Rc;

use crate::lua_value::Value;
use crate::lua_vm::{Instruction, LuaVM, OpCode};

use super::make_closure;

/// Scenario 5 (spec §8): two closures built over the same CLOSURE-time
/// upvalue observe each other's writes through the shared cell.
#[test]
fn closures_share_upvalues() {
    // Increments the shared upvalue by 1, returns nothing.
    let incrementer = {
        let instructions = vec![
            Instruction::encode_abc(OpCode::GetUpval, 0, 0, 0),
            Instruction::encode_abx(OpCode::LoadK, 1, 0),
            Instruction::encode_abc(OpCode::Add, 0, 0, 1),
            Instruction::encode_abc(OpCode::SetUpval, 0, 0, 0),
            Instruction::encode_abc(OpCode::Return, 0, 1, 0),
        ];
        make_closure(instructions, vec![Value::Number(1.0)], Vec::new(), 1, 0, 2).prototype.clone()
    };

    // Reads the shared upvalue back.
    let reader = {
        let instructions = vec![
            Instruction::encode_abc(OpCode::GetUpval, 0, 0, 0),
            Instruction::encode_abc(OpCode::Return, 0, 2, 0),
        ];
        make_closure(instructions, Vec::new(), Vec::new(), 1, 0, 1).prototype.clone()
    };

    let outer_instructions = vec![
        Instruction::encode_abx(OpCode::LoadK, 0, 0),
        Instruction::encode_abx(OpCode::Closure, 1, 0),
        Instruction::encode_abc(OpCode::Move, 0, 0, 0),
        Instruction::encode_abx(OpCode::Closure, 2, 1),
        Instruction::encode_abc(OpCode::Move, 0, 0, 0),
        Instruction::encode_abc(OpCode::Call, 1, 1, 1),
        Instruction::encode_abc(OpCode::Call, 1, 1, 1),
        Instruction::encode_abc(OpCode::Call, 2, 1, 2),
        Instruction::encode_abc(OpCode::Return, 2, 2, 0),
    ];
    let closure = make_closure(
        outer_instructions,
        vec![Value::Number(0.0)],
        vec![Rc::clone(&incrementer), Rc::clone(&reader)],
        0,
        0,
        3,
    );

    let mut vm = LuaVM::new();
    let result = vm.run(closure).unwrap();
    assert_eq!(result, vec![Value::Number(2.0)]);
}
