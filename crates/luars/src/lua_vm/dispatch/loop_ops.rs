use crate::lua_value::Value;
use crate::lua_vm::dispatch::arith::require_number;
use crate::lua_vm::lua_call_frame::{CallFrame, PostReturnHook};
use crate::lua_vm::lua_error::{LuaError, LuaResult, err};
use crate::lua_vm::lua_state::{Flow, LuaVM};
use crate::lua_vm::opcode::Instruction;

/// FORPREP A sBx: R[A] -= R[A+2]; pc += sBx
pub(crate) fn exec_forprep(vm: &mut LuaVM, instr: u32) -> LuaResult<Flow> {
    let a = Instruction::a(instr) as usize;
    let sbx = Instruction::sbx(instr);
    let frame = vm.current_frame();
    let init = require_number(&frame.get(a))?;
    let step = require_number(&frame.get(a + 2))?;
    vm.current_frame_mut().set(a, Value::Number(init - step));
    let pc = vm.current_frame().pc as i64 + sbx as i64;
    vm.current_frame_mut().pc = pc as usize;
    Ok(Flow::Continue)
}

/// FORLOOP A sBx: advance by the step, jump back while still in range.
pub(crate) fn exec_forloop(vm: &mut LuaVM, instr: u32) -> LuaResult<Flow> {
    let a = Instruction::a(instr) as usize;
    let sbx = Instruction::sbx(instr);
    let frame = vm.current_frame();
    let step = require_number(&frame.get(a + 2))?;
    let limit = require_number(&frame.get(a + 1))?;
    let current = require_number(&frame.get(a))? + step;
    let continues = if step > 0.0 { current <= limit } else { current >= limit };
    vm.current_frame_mut().set(a, Value::Number(current));
    if continues {
        let pc = vm.current_frame().pc as i64 + sbx as i64;
        vm.current_frame_mut().pc = pc as usize;
        vm.current_frame_mut().set(a + 3, Value::Number(current));
    }
    Ok(Flow::Continue)
}

/// TFORLOOP A C: calls R[A](R[A+1], R[A+2]), storing C results from R[A+3];
/// a nil first result ends the loop by skipping the following JMP (spec §4.G
/// TFORLOOP, §9 "post-return hook" for the closure-iterator case).
pub(crate) fn exec_tforloop(vm: &mut LuaVM, instr: u32) -> LuaResult<Flow> {
    let a = Instruction::a(instr) as usize;
    let c = Instruction::c(instr) as usize;
    let frame = vm.current_frame();
    let func_val = frame.get(a);
    let state = frame.get(a + 1);
    let control = frame.get(a + 2);

    match func_val {
        Value::Closure(closure) => {
            let mut new_frame = CallFrame::new(closure, vec![state, control], a + 3, Some(c));
            new_frame.post_return = Some(PostReturnHook { control_reg: a + 3, loop_var_reg: a + 2 });
            vm.frames.push(new_frame);
            Ok(Flow::Continue)
        }
        Value::HostFunction(host) => {
            let mut results = host.call(&[state, control], vm)?;
            results.resize(c, Value::Nil);
            for (i, v) in results.into_iter().enumerate() {
                vm.current_frame_mut().set(a + 3 + i, v);
            }
            let new_control = vm.current_frame().get(a + 3);
            if new_control.is_nil() {
                let pc = vm.current_frame().pc;
                vm.current_frame_mut().pc = pc + 1;
            } else {
                vm.current_frame_mut().set(a + 2, new_control);
            }
            Ok(Flow::Continue)
        }
        other => err(LuaError::TypeError, format!("attempt to call a {} value", other.type_name())),
    }
}
