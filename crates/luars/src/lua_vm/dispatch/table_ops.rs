use crate::lua_value::{LuaTable, Value};
use crate::lua_vm::lua_error::{LuaError, LuaResult, err};
use crate::lua_vm::lua_state::{Flow, LuaVM};
use crate::lua_vm::opcode::Instruction;

fn require_table(v: &Value, what: &str) -> LuaResult<()> {
    if v.as_table().is_none() {
        return err(LuaError::TypeError, format!("attempt to index a {} value ({what})", v.type_name()));
    }
    Ok(())
}

/// Lua's float-byte size hint decoding (spec §4.G NEWTABLE): `x = b & 7`,
/// `e = b >> 3`; `e == 0` gives `x`, otherwise `((x + 8) << (e - 1)) * 2`.
/// Only a capacity hint — the table still grows on demand.
fn fb2size(b: u32) -> usize {
    let x = b & 7;
    let e = b >> 3;
    if e == 0 {
        x as usize
    } else {
        (((x + 8) << (e - 1)) * 2) as usize
    }
}

/// GETTABLE A B C: R[A] <- R[B][RK(C)]
pub(crate) fn exec_gettable(vm: &mut LuaVM, instr: u32) -> LuaResult<Flow> {
    let a = Instruction::a(instr) as usize;
    let b = Instruction::b(instr) as usize;
    let c = Instruction::c(instr);
    let table_val = vm.current_frame().get(b);
    require_table(&table_val, "table expected for GETTABLE")?;
    let key = vm.rk(c);
    let v = table_val.as_table().unwrap().borrow().get(&key);
    vm.current_frame_mut().set(a, v);
    Ok(Flow::Continue)
}

/// SETTABLE A B C: R[A][RK(B)] <- RK(C)
pub(crate) fn exec_settable(vm: &mut LuaVM, instr: u32) -> LuaResult<Flow> {
    let a = Instruction::a(instr) as usize;
    let b = Instruction::b(instr);
    let c = Instruction::c(instr);
    let table_val = vm.current_frame().get(a);
    require_table(&table_val, "table expected for SETTABLE")?;
    let key = vm.rk(b);
    let value = vm.rk(c);
    table_val.as_table().unwrap().borrow_mut().set(key, value)?;
    Ok(Flow::Continue)
}

/// NEWTABLE A B C: R[A] <- a fresh table sized from the B/C hints.
pub(crate) fn exec_newtable(vm: &mut LuaVM, instr: u32) -> LuaResult<Flow> {
    let a = Instruction::a(instr) as usize;
    let b = Instruction::b(instr);
    let c = Instruction::c(instr);
    let table = LuaTable::with_capacity(fb2size(b), fb2size(c));
    vm.current_frame_mut().set(a, Value::table(table));
    Ok(Flow::Continue)
}

/// SELF A B C: R[A+1] <- R[B]; R[A] <- R[B][RK(C)]
pub(crate) fn exec_self(vm: &mut LuaVM, instr: u32) -> LuaResult<Flow> {
    let a = Instruction::a(instr) as usize;
    let b = Instruction::b(instr) as usize;
    let c = Instruction::c(instr);
    let table_val = vm.current_frame().get(b);
    require_table(&table_val, "table expected for SELF")?;
    let key = vm.rk(c);
    let method = table_val.as_table().unwrap().borrow().get(&key);
    vm.current_frame_mut().set(a + 1, table_val);
    vm.current_frame_mut().set(a, method);
    Ok(Flow::Continue)
}

/// LEN A B: table length or string byte length
pub(crate) fn exec_len(vm: &mut LuaVM, instr: u32) -> LuaResult<Flow> {
    let a = Instruction::a(instr) as usize;
    let b = Instruction::b(instr) as usize;
    let v = vm.current_frame().get(b);
    let len = match &v {
        Value::Table(t) => t.borrow().len(),
        Value::String(s) => s.len() as f64,
        other => return err(LuaError::TypeError, format!("attempt to get length of a {} value", other.type_name())),
    };
    vm.current_frame_mut().set(a, Value::Number(len));
    Ok(Flow::Continue)
}

/// SETLIST A B C: write R[A+1..A+B] into array positions (C-1)*50+1..
pub(crate) fn exec_setlist(vm: &mut LuaVM, instr: u32) -> LuaResult<Flow> {
    let a = Instruction::a(instr) as usize;
    let mut b = Instruction::b(instr) as usize;
    let mut c = Instruction::c(instr) as usize;

    if c == 0 {
        let frame = vm.current_frame();
        let pc = frame.pc;
        c = frame.closure.prototype.instructions[pc] as usize;
        vm.current_frame_mut().pc = pc + 1;
    }

    let frame = vm.current_frame();
    if b == 0 {
        b = frame.top - (a + 1);
    }
    let table_val = frame.get(a);
    require_table(&table_val, "table expected for SETLIST")?;
    let table = table_val.as_table().unwrap();
    let base = (c - 1) * 50;
    for i in 1..=b {
        let v = vm.current_frame().get(a + i);
        table.borrow_mut().set(Value::Number((base + i) as f64), v)?;
    }
    Ok(Flow::Continue)
}
