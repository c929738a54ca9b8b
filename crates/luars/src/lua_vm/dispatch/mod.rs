//! Per-opcode semantics (spec §4.G), one module per component-share group.
mod arith;
mod control;
mod load;
mod loop_ops;
mod table_ops;

use crate::lua_vm::LuaResult;
use crate::lua_vm::lua_state::{Flow, LuaVM};
use crate::lua_vm::opcode::OpCode;

pub(crate) fn execute(vm: &mut LuaVM, opcode: OpCode, instr: u32) -> LuaResult<Flow> {
    use OpCode::*;
    match opcode {
        Move => load::exec_move(vm, instr),
        LoadK => load::exec_loadk(vm, instr),
        LoadBool => load::exec_loadbool(vm, instr),
        LoadNil => load::exec_loadnil(vm, instr),
        GetUpval => load::exec_getupval(vm, instr),
        SetUpval => load::exec_setupval(vm, instr),
        GetGlobal => load::exec_getglobal(vm, instr),
        SetGlobal => load::exec_setglobal(vm, instr),
        Vararg => load::exec_vararg(vm, instr),

        GetTable => table_ops::exec_gettable(vm, instr),
        SetTable => table_ops::exec_settable(vm, instr),
        NewTable => table_ops::exec_newtable(vm, instr),
        SelfOp => table_ops::exec_self(vm, instr),
        Len => table_ops::exec_len(vm, instr),
        SetList => table_ops::exec_setlist(vm, instr),

        Add => arith::exec_binop(vm, instr, arith::BinOp::Add),
        Sub => arith::exec_binop(vm, instr, arith::BinOp::Sub),
        Mul => arith::exec_binop(vm, instr, arith::BinOp::Mul),
        Div => arith::exec_binop(vm, instr, arith::BinOp::Div),
        Mod => arith::exec_binop(vm, instr, arith::BinOp::Mod),
        Pow => arith::exec_binop(vm, instr, arith::BinOp::Pow),
        Unm => arith::exec_unm(vm, instr),
        Not => arith::exec_not(vm, instr),
        Concat => arith::exec_concat(vm, instr),

        Jmp => control::exec_jmp(vm, instr),
        Eq => control::exec_eq(vm, instr),
        Lt => control::exec_lt(vm, instr),
        Le => control::exec_le(vm, instr),
        Test => control::exec_test(vm, instr),
        TestSet => control::exec_testset(vm, instr),
        Call => control::exec_call(vm, instr),
        TailCall => control::exec_tailcall(vm, instr),
        Return => control::exec_return(vm, instr),
        Close => control::exec_close(vm, instr),
        Closure => control::exec_closure(vm, instr),

        ForPrep => loop_ops::exec_forprep(vm, instr),
        ForLoop => loop_ops::exec_forloop(vm, instr),
        TForLoop => loop_ops::exec_tforloop(vm, instr),
    }
}
