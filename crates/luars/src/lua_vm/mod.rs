pub mod closure;
mod dispatch;
mod lua_call_frame;
mod lua_error;
mod lua_state;
mod opcode;

pub use closure::{Closure, HostFunction};
pub use lua_call_frame::{CallFrame, PostReturnHook};
pub use lua_error::{LuaError, LuaFullError, LuaResult};
pub(crate) use lua_error::err;
pub use lua_state::LuaVM;
pub use opcode::{Instruction, OpCode, RK_CONST_BIT};
