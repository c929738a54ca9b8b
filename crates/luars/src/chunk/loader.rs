use std::io::Read;
use std::rc::Rc;

use crate::chunk::header::{read_exact, read_f64, read_header, read_u32, read_u8};
use crate::lua_value::Value;
use crate::lua_vm::closure::Prototype;
use crate::lua_vm::{LuaError, LuaResult, err};

const TAG_NIL: u8 = 0;
const TAG_BOOLEAN: u8 = 1;
const TAG_NUMBER: u8 = 3;
const TAG_STRING: u8 = 4;

/// Parse a full binary chunk: 12-byte header then the recursive top-level
/// function block (spec §4.C).
pub fn load<R: Read>(r: &mut R) -> LuaResult<Rc<Prototype>> {
    let header = read_header(r)?;
    read_function_block(r, header.size_t_bytes)
}

fn read_size<R: Read>(r: &mut R, size_t_bytes: u8) -> LuaResult<u64> {
    if size_t_bytes == 8 {
        let mut b = [0u8; 8];
        read_exact(r, &mut b)?;
        Ok(u64::from_le_bytes(b))
    } else {
        Ok(read_u32(r)? as u64)
    }
}

/// size_t length, then that many bytes; a non-empty string carries a
/// trailing NUL that is stripped before use (spec §4.C invariant iv).
fn read_string<R: Read>(r: &mut R, size_t_bytes: u8) -> LuaResult<Vec<u8>> {
    let len = read_size(r, size_t_bytes)? as usize;
    if len == 0 {
        return Ok(Vec::new());
    }
    let mut buf = vec![0u8; len];
    read_exact(r, &mut buf)?;
    buf.pop(); // trailing NUL
    Ok(buf)
}

fn read_instruction_list<R: Read>(r: &mut R) -> LuaResult<Vec<u32>> {
    let count = read_u32(r)?;
    (0..count).map(|_| read_u32(r)).collect()
}

fn read_constant_list<R: Read>(r: &mut R, size_t_bytes: u8) -> LuaResult<Vec<Value>> {
    let count = read_u32(r)?;
    let mut constants = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let tag = read_u8(r)?;
        let value = match tag {
            TAG_NIL => Value::Nil,
            TAG_BOOLEAN => Value::Boolean(read_u32(r)? != 0),
            TAG_NUMBER => Value::Number(read_f64(r)?),
            TAG_STRING => Value::string(read_string(r, size_t_bytes)?),
            other => return err(LuaError::BadConstant, format!("unknown constant tag {other}")),
        };
        constants.push(value);
    }
    Ok(constants)
}

fn skip_debug_info<R: Read>(r: &mut R, size_t_bytes: u8) -> LuaResult<()> {
    // Source line positions: u32 count, then that many u32s.
    let count = read_u32(r)?;
    for _ in 0..count {
        read_u32(r)?;
    }
    // Locals: u32 count, each a string plus two u32s (start/end pc).
    let count = read_u32(r)?;
    for _ in 0..count {
        read_string(r, size_t_bytes)?;
        read_u32(r)?;
        read_u32(r)?;
    }
    // Upvalue names: u32 count, each a string.
    let count = read_u32(r)?;
    for _ in 0..count {
        read_string(r, size_t_bytes)?;
    }
    Ok(())
}

fn read_function_list<R: Read>(r: &mut R, size_t_bytes: u8) -> LuaResult<Vec<Rc<Prototype>>> {
    let count = read_u32(r)?;
    (0..count)
        .map(|_| read_function_block(r, size_t_bytes))
        .collect()
}

fn read_function_block<R: Read>(r: &mut R, size_t_bytes: u8) -> LuaResult<Rc<Prototype>> {
    read_string(r, size_t_bytes)?; // source name, unused
    read_u32(r)?; // line defined
    read_u32(r)?; // last line defined
    let num_upvalues = read_u8(r)?;
    let num_params = read_u8(r)?;
    let vararg_flag = read_u8(r)?;
    let max_stack_size = read_u8(r)?;

    let instructions = read_instruction_list(r)?;
    let constants = read_constant_list(r, size_t_bytes)?;
    let prototypes = read_function_list(r, size_t_bytes)?;

    skip_debug_info(r, size_t_bytes)?;

    Ok(Rc::new(Prototype {
        instructions,
        constants,
        prototypes,
        num_upvalues,
        num_params,
        is_vararg: vararg_flag != 0,
        max_stack_size,
    }))
}
