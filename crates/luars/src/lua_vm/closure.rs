use std::cell::RefCell;
use std::rc::Rc;

use crate::lua_value::Value;
use crate::lua_vm::LuaVM;
use crate::lua_vm::lua_error::LuaResult;

/// Immutable, compiled shape of a function (spec §3 "Function prototype").
pub struct Prototype {
    pub instructions: Vec<u32>,
    pub constants: Vec<Value>,
    pub prototypes: Vec<Rc<Prototype>>,
    pub num_upvalues: u8,
    pub num_params: u8,
    pub is_vararg: bool,
    pub max_stack_size: u8,
}

/// A register cell shared between a frame and any closures capturing it
/// (spec §9 "Upvalue cells"). Every register is born as one of these, so
/// MOVE-bound upvalue capture is just `Rc::clone`; `CLOSE` swaps the slot
/// for a fresh cell so future writes stop being visible through old
/// captures, which is the whole open/close distinction the reference VM
/// needs — there is nothing else to "close" once registers are always
/// heap cells.
pub type Cell = Rc<RefCell<Value>>;

pub fn new_cell(v: Value) -> Cell {
    Rc::new(RefCell::new(v))
}

/// Prototype + the upvalue bindings captured at the moment CLOSURE ran
/// (spec §3 "Closure"). Each closure owns its own upvalue list even when
/// built from the same prototype.
pub struct Closure {
    pub prototype: Rc<Prototype>,
    pub upvalues: Vec<Cell>,
}

/// A host-language callable registered as a first-class value (spec §4.H).
pub struct HostFunction {
    pub name: String,
    func: Box<dyn Fn(&[Value], &mut LuaVM) -> LuaResult<Vec<Value>>>,
}

impl HostFunction {
    pub fn new(
        name: impl Into<String>,
        func: impl Fn(&[Value], &mut LuaVM) -> LuaResult<Vec<Value>> + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            func: Box::new(func),
        }
    }

    pub fn call(&self, args: &[Value], vm: &mut LuaVM) -> LuaResult<Vec<Value>> {
        (self.func)(args, vm)
    }
}
