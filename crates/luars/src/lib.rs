// Loader and interpreter for precompiled Lua 5.1 bytecode chunks.

#[cfg(test)]
mod test;

pub mod chunk;
pub mod lua_value;
pub mod lua_vm;
pub mod stdlib;

pub use lua_value::{LuaTable, Value};
pub use lua_vm::{Closure, HostFunction, LuaError, LuaFullError, LuaResult, LuaVM};

use std::io::Read;

/// `Load(byte-reader) -> Closure | Error` (spec §6).
pub fn load<R: Read>(mut r: R) -> LuaResult<std::rc::Rc<lua_vm::closure::Prototype>> {
    chunk::load(&mut r)
}

/// Loads a chunk and renders its prototype tree as text without executing it
/// (spec SPEC_FULL §5, backs `src/bin/dump.rs`).
pub fn dump<R: Read>(mut r: R) -> LuaResult<String> {
    let proto = chunk::load(&mut r)?;
    let mut out = String::new();
    stdlib::dump::write_prototype(&mut out, &proto, 0);
    Ok(out)
}
