use crate::lua_value::Value;
use crate::lua_vm::{Instruction, LuaVM, OpCode, RK_CONST_BIT};

use super::make_closure;

/// Scenario 4 (spec §8): `t = {10, 20, 30}; return t[1] + t[2] + t[3]`, and
/// separately `#t == 3`.
#[test]
fn table_literal_and_length() {
    let instructions = vec![
        Instruction::encode_abc(OpCode::NewTable, 0, 0, 0),
        Instruction::encode_abx(OpCode::LoadK, 1, 0),
        Instruction::encode_abx(OpCode::LoadK, 2, 1),
        Instruction::encode_abx(OpCode::LoadK, 3, 2),
        Instruction::encode_abc(OpCode::SetList, 0, 3, 1),
        Instruction::encode_abc(OpCode::GetTable, 4, 0, 3 | RK_CONST_BIT),
        Instruction::encode_abc(OpCode::GetTable, 6, 0, 4 | RK_CONST_BIT),
        Instruction::encode_abc(OpCode::Add, 4, 4, 6),
        Instruction::encode_abc(OpCode::GetTable, 6, 0, 5 | RK_CONST_BIT),
        Instruction::encode_abc(OpCode::Add, 4, 4, 6),
        Instruction::encode_abc(OpCode::Len, 5, 0, 0),
        Instruction::encode_abc(OpCode::Return, 4, 3, 0),
    ];
    let constants = vec![
        Value::Number(10.0),
        Value::Number(20.0),
        Value::Number(30.0),
        Value::Number(1.0),
        Value::Number(2.0),
        Value::Number(3.0),
    ];
    let closure = make_closure(instructions, constants, Vec::new(), 0, 0, 7);

    let mut vm = LuaVM::new();
    let result = vm.run(closure).unwrap();
    assert_eq!(result, vec![Value::Number(60.0), Value::Number(3.0)]);
}
