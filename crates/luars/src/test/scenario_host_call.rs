use std::cell::RefCell;
use std::rc::Rc;

use crate::lua_value::Value;
use crate::lua_vm::{Instruction, LuaVM, OpCode};

use super::make_closure;

/// Scenario 3 (spec §8): a registered host function observes its call
/// arguments.
#[test]
fn host_call_captures_args() {
    let instructions = vec![
        Instruction::encode_abx(OpCode::GetGlobal, 0, 0),
        Instruction::encode_abx(OpCode::LoadK, 1, 1),
        Instruction::encode_abx(OpCode::LoadK, 2, 2),
        Instruction::encode_abc(OpCode::Call, 0, 3, 1),
        Instruction::encode_abc(OpCode::Return, 0, 1, 0),
    ];
    let constants = vec![Value::string("capture"), Value::string("hi"), Value::Number(5.0)];
    let closure = make_closure(instructions, constants, Vec::new(), 0, 0, 3);

    let captured = Rc::new(RefCell::new(Vec::new()));
    let captured_in_host = Rc::clone(&captured);

    let mut vm = LuaVM::new();
    vm.register_host_function("capture", move |args, _vm| {
        *captured_in_host.borrow_mut() = args.to_vec();
        Ok(Vec::new())
    });

    vm.run(closure).unwrap();
    assert_eq!(*captured.borrow(), vec![Value::string("hi"), Value::Number(5.0)]);
}
