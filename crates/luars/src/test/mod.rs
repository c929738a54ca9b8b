//! Scenario and invariant tests (spec §8). No compiler is in scope, so each
//! test hand-assembles a [`Prototype`] from [`Instruction`] encodings rather
//! than compiling source text.
mod scenario_arith;
mod scenario_closure;
mod scenario_for_loop;
mod scenario_host_call;
mod scenario_return;
mod scenario_table;
mod table_invariants;

use std::rc::Rc;

use crate::lua_value::Value;
use crate::lua_vm::closure::{Closure, Prototype};

pub(crate) fn make_closure(
    instructions: Vec<u32>,
    constants: Vec<Value>,
    prototypes: Vec<Rc<Prototype>>,
    num_upvalues: u8,
    num_params: u8,
    max_stack_size: u8,
) -> Rc<Closure> {
    let prototype = Rc::new(Prototype {
        instructions,
        constants,
        prototypes,
        num_upvalues,
        num_params,
        is_vararg: false,
        max_stack_size,
    });
    Rc::new(Closure { prototype, upvalues: Vec::new() })
}
