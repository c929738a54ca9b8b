use crate::lua_value::Value;
use crate::lua_vm::LuaResult;
use crate::lua_vm::lua_state::{Flow, LuaVM};
use crate::lua_vm::opcode::Instruction;

/// MOVE A B: R[A] <- R[B]
pub(crate) fn exec_move(vm: &mut LuaVM, instr: u32) -> LuaResult<Flow> {
    let a = Instruction::a(instr) as usize;
    let b = Instruction::b(instr) as usize;
    let v = vm.current_frame().get(b);
    vm.current_frame_mut().set(a, v);
    Ok(Flow::Continue)
}

/// LOADK A Bx: R[A] <- K[Bx]
pub(crate) fn exec_loadk(vm: &mut LuaVM, instr: u32) -> LuaResult<Flow> {
    let a = Instruction::a(instr) as usize;
    let bx = Instruction::bx(instr) as usize;
    let k = vm.current_closure().prototype.constants[bx].clone();
    vm.current_frame_mut().set(a, k);
    Ok(Flow::Continue)
}

/// LOADBOOL A B C: R[A] <- (bool)B; if C != 0 then pc++
pub(crate) fn exec_loadbool(vm: &mut LuaVM, instr: u32) -> LuaResult<Flow> {
    let a = Instruction::a(instr) as usize;
    let b = Instruction::b(instr);
    let c = Instruction::c(instr);
    vm.current_frame_mut().set(a, Value::Boolean(b != 0));
    if c != 0 {
        vm.current_frame_mut().pc += 1;
    }
    Ok(Flow::Continue)
}

/// LOADNIL A B: R[A..=B] <- nil (B is an absolute register index, not a count)
pub(crate) fn exec_loadnil(vm: &mut LuaVM, instr: u32) -> LuaResult<Flow> {
    let a = Instruction::a(instr) as usize;
    let b = Instruction::b(instr) as usize;
    for i in a..=b {
        vm.current_frame_mut().set(i, Value::Nil);
    }
    Ok(Flow::Continue)
}

/// GETUPVAL A B: R[A] <- Upval[B]
pub(crate) fn exec_getupval(vm: &mut LuaVM, instr: u32) -> LuaResult<Flow> {
    let a = Instruction::a(instr) as usize;
    let b = Instruction::b(instr) as usize;
    let v = vm.current_closure().upvalues[b].borrow().clone();
    vm.current_frame_mut().set(a, v);
    Ok(Flow::Continue)
}

/// SETUPVAL A B: Upval[B] <- R[A]
pub(crate) fn exec_setupval(vm: &mut LuaVM, instr: u32) -> LuaResult<Flow> {
    let a = Instruction::a(instr) as usize;
    let b = Instruction::b(instr) as usize;
    let v = vm.current_frame().get(a);
    *vm.current_closure().upvalues[b].borrow_mut() = v;
    Ok(Flow::Continue)
}

/// GETGLOBAL A Bx: R[A] <- Globals[K[Bx]]
pub(crate) fn exec_getglobal(vm: &mut LuaVM, instr: u32) -> LuaResult<Flow> {
    let a = Instruction::a(instr) as usize;
    let bx = Instruction::bx(instr) as usize;
    let name = vm.current_closure().prototype.constants[bx].clone();
    let v = vm.globals.borrow().get(&name);
    vm.current_frame_mut().set(a, v);
    Ok(Flow::Continue)
}

/// SETGLOBAL A Bx: Globals[K[Bx]] <- R[A]
pub(crate) fn exec_setglobal(vm: &mut LuaVM, instr: u32) -> LuaResult<Flow> {
    let a = Instruction::a(instr) as usize;
    let bx = Instruction::bx(instr) as usize;
    let name = vm.current_closure().prototype.constants[bx].clone();
    let v = vm.current_frame().get(a);
    vm.globals.borrow_mut().set(name, v)?;
    Ok(Flow::Continue)
}

/// VARARG A B: copy vararg parameters into R[A..A+B-2]; B=0 copies all and
/// sets the frame's top (spec §9 "CALL argument boundary").
pub(crate) fn exec_vararg(vm: &mut LuaVM, instr: u32) -> LuaResult<Flow> {
    let a = Instruction::a(instr) as usize;
    let b = Instruction::b(instr) as usize;
    let frame = vm.current_frame_mut();
    let varargs = frame.varargs.clone();
    if b == 0 {
        for (i, v) in varargs.iter().enumerate() {
            frame.set(a + i, v.clone());
        }
        frame.top = a + varargs.len();
    } else {
        for i in 0..b - 1 {
            frame.set(a + i, varargs.get(i).cloned().unwrap_or(Value::Nil));
        }
    }
    Ok(Flow::Continue)
}
