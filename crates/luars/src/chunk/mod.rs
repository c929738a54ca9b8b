//! Binary chunk loader (spec §4.C): parses a precompiled Lua 5.1 chunk into
//! a tree of [`crate::lua_vm::closure::Prototype`]s.
mod header;
mod loader;

pub use loader::load;
