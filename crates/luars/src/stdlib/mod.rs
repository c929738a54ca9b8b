//! The stubs spec §1 allows beyond the interpreter core: `print`,
//! `getmetatable`, `setmetatable`. No metamethod dispatch, no file I/O, no
//! real standard library.
pub mod dump;

use crate::lua_value::Value;
use crate::lua_vm::{LuaResult, LuaVM};

/// `print(...)`: writes each argument's display form to stdout, tab-separated.
fn lua_print(args: &[Value], _vm: &mut LuaVM) -> LuaResult<Vec<Value>> {
    let line = args.iter().map(Value::display).collect::<Vec<_>>().join("\t");
    println!("{line}");
    Ok(Vec::new())
}

/// `getmetatable(v)`: always nil — no metatables are tracked (spec §1 non-goal).
fn lua_getmetatable(_args: &[Value], _vm: &mut LuaVM) -> LuaResult<Vec<Value>> {
    Ok(vec![Value::Nil])
}

/// `setmetatable(t, mt)`: returns `t` unchanged — a no-op stub (spec §1 non-goal).
fn lua_setmetatable(args: &[Value], _vm: &mut LuaVM) -> LuaResult<Vec<Value>> {
    Ok(vec![args.first().cloned().unwrap_or(Value::Nil)])
}

/// Installs the stub library on `vm`'s globals.
pub fn open(vm: &mut LuaVM) {
    vm.register_host_function("print", lua_print);
    vm.register_host_function("getmetatable", lua_getmetatable);
    vm.register_host_function("setmetatable", lua_setmetatable);
}
