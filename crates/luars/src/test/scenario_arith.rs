use crate::lua_value::Value;
use crate::lua_vm::{Instruction, LuaVM, OpCode, RK_CONST_BIT};

use super::make_closure;

/// Scenario 2 (spec §8): `return 2 + 3 * 4`, precedence handled by the order
/// bytecode was emitted in (MUL before ADD), not by the interpreter.
#[test]
fn arithmetic_precedence() {
    let k2 = 0;
    let k3 = 1;
    let k4 = 2;

    let instructions = vec![
        Instruction::encode_abx(OpCode::LoadK, 0, k2),
        Instruction::encode_abc(OpCode::Mul, 1, k3 | RK_CONST_BIT, k4 | RK_CONST_BIT),
        Instruction::encode_abc(OpCode::Add, 0, 0, 1),
        Instruction::encode_abc(OpCode::Return, 0, 2, 0),
    ];
    let constants = vec![Value::Number(2.0), Value::Number(3.0), Value::Number(4.0)];
    let closure = make_closure(instructions, constants, Vec::new(), 0, 0, 2);

    let mut vm = LuaVM::new();
    let result = vm.run(closure).unwrap();
    assert_eq!(result, vec![Value::Number(14.0)]);
}
