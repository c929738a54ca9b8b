use crate::lua_value::Value;
use crate::lua_vm::{Instruction, LuaVM, OpCode};

use super::make_closure;

/// Scenario 1 (spec §8): `return 42`.
#[test]
fn literal_return() {
    let instructions = vec![
        Instruction::encode_abx(OpCode::LoadK, 0, 0),
        Instruction::encode_abc(OpCode::Return, 0, 2, 0),
    ];
    let closure = make_closure(instructions, vec![Value::Number(42.0)], Vec::new(), 0, 0, 1);

    let mut vm = LuaVM::new();
    let result = vm.run(closure).unwrap();
    assert_eq!(result, vec![Value::Number(42.0)]);
}
