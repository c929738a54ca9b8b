use crate::lua_value::Value;
use crate::lua_vm::lua_error::{LuaError, LuaResult};
use crate::lua_vm::lua_state::{Flow, LuaVM};
use crate::lua_vm::opcode::Instruction;

pub(crate) enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
}

pub(crate) fn require_number(v: &Value) -> LuaResult<f64> {
    v.as_number()
        .ok_or_else(|| crate::lua_vm::LuaFullError::new(LuaError::TypeError, format!("attempt to perform arithmetic on a {} value", v.type_name())))
}

/// ADD/SUB/MUL/DIV/MOD/POW A B C: R[A] <- RK(B) op RK(C)
pub(crate) fn exec_binop(vm: &mut LuaVM, instr: u32, op: BinOp) -> LuaResult<Flow> {
    let a = Instruction::a(instr) as usize;
    let b = Instruction::b(instr);
    let c = Instruction::c(instr);
    let lhs = require_number(&vm.rk(b))?;
    let rhs = require_number(&vm.rk(c))?;
    let result = match op {
        BinOp::Add => lhs + rhs,
        BinOp::Sub => lhs - rhs,
        BinOp::Mul => lhs * rhs,
        BinOp::Div => lhs / rhs,
        BinOp::Mod => lhs - (lhs / rhs).floor() * rhs,
        BinOp::Pow => lhs.powf(rhs),
    };
    vm.current_frame_mut().set(a, Value::Number(result));
    Ok(Flow::Continue)
}

/// UNM A B: R[A] <- -R[B]
pub(crate) fn exec_unm(vm: &mut LuaVM, instr: u32) -> LuaResult<Flow> {
    let a = Instruction::a(instr) as usize;
    let b = Instruction::b(instr) as usize;
    let v = require_number(&vm.current_frame().get(b))?;
    vm.current_frame_mut().set(a, Value::Number(-v));
    Ok(Flow::Continue)
}

/// NOT A B: R[A] <- not R[B]
pub(crate) fn exec_not(vm: &mut LuaVM, instr: u32) -> LuaResult<Flow> {
    let a = Instruction::a(instr) as usize;
    let b = Instruction::b(instr) as usize;
    let v = vm.current_frame().get(b);
    vm.current_frame_mut().set(a, Value::Boolean(!v.is_truthy()));
    Ok(Flow::Continue)
}

/// CONCAT A B C: R[A] <- R[B] .. R[B+1] .. ... .. R[C]
pub(crate) fn exec_concat(vm: &mut LuaVM, instr: u32) -> LuaResult<Flow> {
    let a = Instruction::a(instr) as usize;
    let b = Instruction::b(instr) as usize;
    let c = Instruction::c(instr) as usize;
    let mut bytes = Vec::new();
    for i in b..=c {
        let v = vm.current_frame().get(i);
        let piece = v.as_bytes().ok_or_else(|| {
            crate::lua_vm::LuaFullError::new(LuaError::TypeError, format!("attempt to concatenate a {} value", v.type_name()))
        })?;
        bytes.extend_from_slice(piece);
    }
    vm.current_frame_mut().set(a, Value::string(bytes));
    Ok(Flow::Continue)
}
