use std::rc::Rc;

use crate::lua_value::Value;
use crate::lua_vm::closure::Closure;
use crate::lua_vm::lua_call_frame::CallFrame;
use crate::lua_vm::lua_error::{LuaError, LuaResult, err};
use crate::lua_vm::lua_state::{Flow, LuaVM};
use crate::lua_vm::opcode::{Instruction, OpCode};

/// Writes a call/return's results into whatever frame is now current,
/// truncating/padding to `return_count` (`None` keeps them all and bumps
/// `top`), then resolves a pending TFORLOOP continuation if one is attached.
/// Shared by RETURN, and by CALL/TAILCALL when the callee is a HostFunction
/// (spec §4.G RETURN, §9 "post-return hook").
fn deliver_results(
    vm: &mut LuaVM,
    return_pos: usize,
    return_count: Option<usize>,
    post_return: Option<crate::lua_vm::lua_call_frame::PostReturnHook>,
    mut results: Vec<Value>,
) -> Flow {
    if vm.frames.is_empty() {
        if let Some(n) = return_count {
            results.resize(n, Value::Nil);
        }
        vm.last_return = results;
        return Flow::Returned;
    }

    match return_count {
        Some(n) => {
            results.resize(n, Value::Nil);
            for (i, v) in results.into_iter().enumerate() {
                vm.current_frame_mut().set(return_pos + i, v);
            }
        }
        None => {
            let count = results.len();
            for (i, v) in results.into_iter().enumerate() {
                vm.current_frame_mut().set(return_pos + i, v);
            }
            vm.current_frame_mut().top = return_pos + count;
        }
    }

    if let Some(hook) = post_return {
        let control = vm.current_frame().get(hook.control_reg);
        if control.is_nil() {
            let pc = vm.current_frame().pc;
            vm.current_frame_mut().pc = pc + 1;
        } else {
            vm.current_frame_mut().set(hook.loop_var_reg, control);
        }
    }

    Flow::Continue
}

/// JMP sBx: pc += sBx
pub(crate) fn exec_jmp(vm: &mut LuaVM, instr: u32) -> LuaResult<Flow> {
    let sbx = Instruction::sbx(instr);
    let pc = vm.current_frame().pc as i64 + sbx as i64;
    vm.current_frame_mut().pc = pc as usize;
    Ok(Flow::Continue)
}

fn compare_order(lhs: &Value, rhs: &Value) -> LuaResult<std::cmp::Ordering> {
    match (lhs, rhs) {
        (Value::Number(a), Value::Number(b)) => {
            Ok(a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Greater))
        }
        (Value::String(a), Value::String(b)) => Ok(a.cmp(b)),
        _ => err(
            LuaError::TypeError,
            format!("attempt to compare {} with {}", lhs.type_name(), rhs.type_name()),
        ),
    }
}

/// EQ A B C: if (RK(B) == RK(C)) ~= A then pc++
pub(crate) fn exec_eq(vm: &mut LuaVM, instr: u32) -> LuaResult<Flow> {
    let a = Instruction::a(instr);
    let b = Instruction::b(instr);
    let c = Instruction::c(instr);
    let cond = vm.rk(b) == vm.rk(c);
    if cond != (a != 0) {
        let pc = vm.current_frame().pc;
        vm.current_frame_mut().pc = pc + 1;
    }
    Ok(Flow::Continue)
}

/// LT A B C: if (RK(B) < RK(C)) ~= A then pc++
pub(crate) fn exec_lt(vm: &mut LuaVM, instr: u32) -> LuaResult<Flow> {
    let a = Instruction::a(instr);
    let b = Instruction::b(instr);
    let c = Instruction::c(instr);
    let cond = compare_order(&vm.rk(b), &vm.rk(c))?.is_lt();
    if cond != (a != 0) {
        let pc = vm.current_frame().pc;
        vm.current_frame_mut().pc = pc + 1;
    }
    Ok(Flow::Continue)
}

/// LE A B C: if (RK(B) <= RK(C)) ~= A then pc++
pub(crate) fn exec_le(vm: &mut LuaVM, instr: u32) -> LuaResult<Flow> {
    let a = Instruction::a(instr);
    let b = Instruction::b(instr);
    let c = Instruction::c(instr);
    let cond = compare_order(&vm.rk(b), &vm.rk(c))?.is_le();
    if cond != (a != 0) {
        let pc = vm.current_frame().pc;
        vm.current_frame_mut().pc = pc + 1;
    }
    Ok(Flow::Continue)
}

/// TEST A C: if (bool)R[A] ~= C then pc++
pub(crate) fn exec_test(vm: &mut LuaVM, instr: u32) -> LuaResult<Flow> {
    let a = Instruction::a(instr) as usize;
    let c = Instruction::c(instr);
    let v = vm.current_frame().get(a);
    if v.is_truthy() != (c != 0) {
        let pc = vm.current_frame().pc;
        vm.current_frame_mut().pc = pc + 1;
    }
    Ok(Flow::Continue)
}

/// TESTSET A B C: if (bool)R[B] == C then R[A] <- R[B] else pc++
pub(crate) fn exec_testset(vm: &mut LuaVM, instr: u32) -> LuaResult<Flow> {
    let a = Instruction::a(instr) as usize;
    let b = Instruction::b(instr) as usize;
    let c = Instruction::c(instr);
    let v = vm.current_frame().get(b);
    if v.is_truthy() == (c != 0) {
        vm.current_frame_mut().set(a, v);
    } else {
        let pc = vm.current_frame().pc;
        vm.current_frame_mut().pc = pc + 1;
    }
    Ok(Flow::Continue)
}

fn call_args(vm: &LuaVM, a: usize, b: usize) -> Vec<Value> {
    let frame = vm.current_frame();
    let nargs = if b == 0 { frame.top - (a + 1) } else { b - 1 };
    (0..nargs).map(|i| frame.get(a + 1 + i)).collect()
}

/// CALL A B C: R[A](R[A+1..A+B-1]) -> R[A..A+C-2]
pub(crate) fn exec_call(vm: &mut LuaVM, instr: u32) -> LuaResult<Flow> {
    let a = Instruction::a(instr) as usize;
    let b = Instruction::b(instr) as usize;
    let c = Instruction::c(instr) as usize;
    let func_val = vm.current_frame().get(a);
    let args = call_args(vm, a, b);
    let return_count = if c == 0 { None } else { Some(c - 1) };
    match func_val {
        Value::Closure(closure) => {
            vm.frames.push(CallFrame::new(closure, args, a, return_count));
            Ok(Flow::Continue)
        }
        Value::HostFunction(host) => {
            let results = host.call(&args, vm)?;
            Ok(deliver_results(vm, a, return_count, None, results))
        }
        other => err(LuaError::TypeError, format!("attempt to call a {} value", other.type_name())),
    }
}

/// TAILCALL A B: replaces the current frame with the call, inheriting its
/// return target (spec §9 "frame-stack interaction").
pub(crate) fn exec_tailcall(vm: &mut LuaVM, instr: u32) -> LuaResult<Flow> {
    let a = Instruction::a(instr) as usize;
    let b = Instruction::b(instr) as usize;
    let func_val = vm.current_frame().get(a);
    let args = call_args(vm, a, b);
    let popped = vm.frames.pop().expect("tailcall requires an active frame");
    match func_val {
        Value::Closure(closure) => {
            let mut frame = CallFrame::new(closure, args, popped.return_pos, popped.return_count);
            frame.post_return = popped.post_return;
            vm.frames.push(frame);
            Ok(Flow::Continue)
        }
        Value::HostFunction(host) => {
            let results = host.call(&args, vm)?;
            Ok(deliver_results(vm, popped.return_pos, popped.return_count, popped.post_return, results))
        }
        other => err(LuaError::TypeError, format!("attempt to call a {} value", other.type_name())),
    }
}

/// RETURN A B: pops the current frame, delivering R[A..A+B-2] to the caller.
pub(crate) fn exec_return(vm: &mut LuaVM, instr: u32) -> LuaResult<Flow> {
    let a = Instruction::a(instr) as usize;
    let b = Instruction::b(instr) as usize;
    let frame = vm.current_frame();
    let count = if b == 0 { frame.top - a } else { b - 1 };
    let results: Vec<Value> = (0..count).map(|i| frame.get(a + i)).collect();
    let popped = vm.frames.pop().expect("return requires an active frame");
    Ok(deliver_results(vm, popped.return_pos, popped.return_count, popped.post_return, results))
}

/// CLOSE A: freeze every register from A upward against further upvalue writes.
pub(crate) fn exec_close(vm: &mut LuaVM, instr: u32) -> LuaResult<Flow> {
    let a = Instruction::a(instr) as usize;
    vm.current_frame_mut().close_from(a);
    Ok(Flow::Continue)
}

/// CLOSURE A Bx: build a closure over nested prototype Bx, consuming the
/// following MOVE/GETUPVAL pseudo-instructions as its upvalue bindings
/// (spec §4.G CLOSURE).
pub(crate) fn exec_closure(vm: &mut LuaVM, instr: u32) -> LuaResult<Flow> {
    let a = Instruction::a(instr) as usize;
    let bx = Instruction::bx(instr) as usize;
    let proto = Rc::clone(&vm.current_closure().prototype.prototypes[bx]);
    let num_upvalues = proto.num_upvalues as usize;

    let mut upvalues = Vec::with_capacity(num_upvalues);
    for _ in 0..num_upvalues {
        let pc = vm.current_frame().pc;
        let pseudo = vm.current_closure().prototype.instructions[pc];
        vm.current_frame_mut().pc = pc + 1;
        let op = Instruction::opcode(pseudo)
            .ok_or_else(|| crate::lua_vm::LuaFullError::new(LuaError::UnknownOpcode, "malformed CLOSURE upvalue pseudo-instruction"))?;
        match op {
            OpCode::Move => {
                let b = Instruction::b(pseudo) as usize;
                upvalues.push(vm.current_frame_mut().cell(b));
            }
            OpCode::GetUpval => {
                let b = Instruction::b(pseudo) as usize;
                upvalues.push(Rc::clone(&vm.current_closure().upvalues[b]));
            }
            _ => return err(LuaError::UnknownOpcode, "CLOSURE upvalue pseudo-instruction must be MOVE or GETUPVAL"),
        }
    }

    let closure = Closure { prototype: proto, upvalues };
    vm.current_frame_mut().set(a, Value::Closure(Rc::new(closure)));
    Ok(Flow::Continue)
}
