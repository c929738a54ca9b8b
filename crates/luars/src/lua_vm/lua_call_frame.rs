use std::rc::Rc;

use crate::lua_value::Value;
use crate::lua_vm::closure::{Cell, Closure, new_cell};

/// Where a TFORLOOP should resume after its callee returns (spec §3 "optional
/// post-return hook").
pub struct PostReturnHook {
    /// Register holding the control variable to test against Nil.
    pub control_reg: usize,
    /// Register the loop variable is copied into when the control is non-nil.
    pub loop_var_reg: usize,
}

/// Per-call activation record (spec §3 "Call frame").
pub struct CallFrame {
    pub closure: Rc<Closure>,
    pub registers: Vec<Cell>,
    /// Arguments captured at call time, used by VARARG for the part beyond
    /// the declared parameter count.
    pub varargs: Vec<Value>,
    pub pc: usize,
    /// Register in the caller's frame where this call's results land.
    pub return_pos: usize,
    /// `None` means "however many the callee produced" (multiple returns,
    /// C=0); `Some(n)` truncates/pads to exactly `n` values (spec §4.G RETURN).
    pub return_count: Option<usize>,
    pub post_return: Option<PostReturnHook>,
    /// High-water mark set by CALL(B=0)/VARARG(B=0)/SETLIST(B=0) — the
    /// "top" distinct from `MaxStackSize` that those instructions need
    /// (spec §9 "CALL argument boundary").
    pub top: usize,
}

impl CallFrame {
    pub fn new(
        closure: Rc<Closure>,
        args: Vec<Value>,
        return_pos: usize,
        return_count: Option<usize>,
    ) -> Self {
        let max_stack = closure.prototype.max_stack_size as usize;
        let num_params = closure.prototype.num_params as usize;
        let mut registers: Vec<Cell> = Vec::with_capacity(max_stack.max(args.len()));
        let mut varargs = Vec::new();
        for (i, arg) in args.into_iter().enumerate() {
            if i < num_params {
                registers.push(new_cell(arg));
            } else {
                varargs.push(arg);
            }
        }
        while registers.len() < num_params {
            registers.push(new_cell(Value::Nil));
        }
        while registers.len() < max_stack {
            registers.push(new_cell(Value::Nil));
        }
        let top = registers.len();
        CallFrame {
            closure,
            registers,
            varargs,
            pc: 0,
            return_pos,
            return_count,
            post_return: None,
            top,
        }
    }

    pub fn ensure_register(&mut self, index: usize) {
        while self.registers.len() <= index {
            self.registers.push(new_cell(Value::Nil));
        }
    }

    pub fn get(&self, index: usize) -> Value {
        self.registers[index].borrow().clone()
    }

    pub fn set(&mut self, index: usize, value: Value) {
        self.ensure_register(index);
        *self.registers[index].borrow_mut() = value;
    }

    pub fn cell(&mut self, index: usize) -> Cell {
        self.ensure_register(index);
        Rc::clone(&self.registers[index])
    }

    /// CLOSE: fresh cells from `from` onward so future writes to those
    /// registers stop being visible through upvalues captured earlier.
    pub fn close_from(&mut self, from: usize) {
        for i in from..self.registers.len() {
            let current = self.registers[i].borrow().clone();
            self.registers[i] = new_cell(current);
        }
    }
}
