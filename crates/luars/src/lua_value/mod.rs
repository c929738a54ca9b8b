mod lua_table;
mod lua_value;

pub use lua_table::LuaTable;
pub use lua_value::{Value, format_number};
