use std::cell::RefCell;
use std::rc::Rc;

use crate::lua_value::{LuaTable, Value};
use crate::lua_vm::closure::{Closure, HostFunction};
use crate::lua_vm::dispatch;
use crate::lua_vm::lua_call_frame::CallFrame;
use crate::lua_vm::lua_error::{LuaError, LuaResult};
use crate::lua_vm::opcode::Instruction;

/// Signal a single dispatched instruction sends back to the run loop.
pub(crate) enum Flow {
    /// Keep executing the current frame.
    Continue,
    /// The current frame returned; `values` are its results (already queued
    /// for the caller or, for the top frame, the program's final result).
    Returned,
}

/// VM state (spec §3 "VM state"): a globals table, the frame stack, and
/// nothing else — single-threaded, no shared mutation outside the current
/// frame (spec §5).
pub struct LuaVM {
    pub(crate) globals: Rc<RefCell<LuaTable>>,
    pub(crate) frames: Vec<CallFrame>,
    pub(crate) last_return: Vec<Value>,
}

impl LuaVM {
    pub fn new() -> Self {
        LuaVM {
            globals: Rc::new(RefCell::new(LuaTable::new())),
            frames: Vec::new(),
            last_return: Vec::new(),
        }
    }

    pub fn globals(&self) -> Rc<RefCell<LuaTable>> {
        Rc::clone(&self.globals)
    }

    /// Installs a HostFunction value keyed by `name` on the globals table
    /// (spec §4.H).
    pub fn register_host_function(
        &mut self,
        name: &str,
        func: impl Fn(&[Value], &mut LuaVM) -> LuaResult<Vec<Value>> + 'static,
    ) {
        let value = Value::HostFunction(Rc::new(HostFunction::new(name, func)));
        self.globals.borrow_mut().set_str(name, value);
    }

    pub fn set_global_number(&mut self, name: &str, n: f64) {
        self.globals.borrow_mut().set_str(name, Value::Number(n));
    }

    pub fn set_global_string(&mut self, name: &str, s: impl Into<Vec<u8>>) {
        self.globals.borrow_mut().set_str(name, Value::string(s));
    }

    pub fn set_global_table(&mut self, name: &str, table: LuaTable) {
        self.globals.borrow_mut().set_str(name, Value::table(table));
    }

    pub(crate) fn current_frame(&self) -> &CallFrame {
        self.frames.last().expect("at least one active frame")
    }

    pub(crate) fn current_frame_mut(&mut self) -> &mut CallFrame {
        self.frames.last_mut().expect("at least one active frame")
    }

    pub(crate) fn current_closure(&self) -> Rc<Closure> {
        Rc::clone(&self.current_frame().closure)
    }

    /// Resolve an RK operand: the constant pool when the high bit is set,
    /// otherwise a register (spec §4.D "RK encoding").
    pub(crate) fn rk(&self, x: u32) -> Value {
        if Instruction::rk_is_const(x) {
            let idx = Instruction::rk_index(x) as usize;
            self.current_closure().prototype.constants[idx].clone()
        } else {
            self.current_frame().get(Instruction::rk_index(x) as usize)
        }
    }

    /// `Run(top-level closure)` (spec §4.F): execute until the top frame
    /// returns, yielding its return values.
    pub fn run(&mut self, closure: Rc<Closure>) -> LuaResult<Vec<Value>> {
        self.frames.push(CallFrame::new(closure, Vec::new(), 0, None));
        loop {
            if self.frames.is_empty() {
                unreachable!("run loop must observe the top frame's own Returned signal");
            }
            let frame = self.current_frame();
            let pc = frame.pc;
            let instr = *frame
                .closure
                .prototype
                .instructions
                .get(pc)
                .ok_or_else(|| {
                    crate::lua_vm::LuaFullError::new(LuaError::UnknownOpcode, "program counter ran off the end")
                })?;
            self.current_frame_mut().pc = pc + 1;

            let opcode = Instruction::opcode(instr)
                .ok_or_else(|| crate::lua_vm::LuaFullError::new(LuaError::UnknownOpcode, format!("opcode byte {}", instr & 0x3F)))?;

            match dispatch::execute(self, opcode, instr)? {
                Flow::Continue => {}
                Flow::Returned => {
                    if self.frames.is_empty() {
                        return Ok(std::mem::take(&mut self.last_return));
                    }
                }
            }
        }
    }
}

impl Default for LuaVM {
    fn default() -> Self {
        Self::new()
    }
}
