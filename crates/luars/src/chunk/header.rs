use std::io::Read;

use crate::lua_vm::{LuaError, LuaResult, err};

pub const SIGNATURE: [u8; 4] = [0x1B, 0x4C, 0x75, 0x61];
pub const LUAC_VERSION: u8 = 0x51;

/// The 12-byte header every Lua 5.1 binary chunk starts with (spec §4.C).
/// `size_t` may be 4 or 8 bytes; the value is kept so string lengths are read
/// with the matching width.
pub struct ChunkHeader {
    pub size_t_bytes: u8,
}

pub fn read_header<R: Read>(r: &mut R) -> LuaResult<ChunkHeader> {
    let mut sig = [0u8; 4];
    read_exact(r, &mut sig)?;
    if sig != SIGNATURE {
        return err(LuaError::BadSignature, "not a Lua 5.1 binary chunk");
    }

    let version = read_u8(r)?;
    if version != LUAC_VERSION {
        return err(LuaError::BadVersion, format!("unsupported version 0x{version:02x}"));
    }

    let format = read_u8(r)?;
    let endianness = read_u8(r)?;
    let size_int = read_u8(r)?;
    let size_size_t = read_u8(r)?;
    let size_instruction = read_u8(r)?;
    let size_number = read_u8(r)?;
    let integral = read_u8(r)?;

    if format != 0
        || endianness != 1
        || size_int != 4
        || !(size_size_t == 4 || size_size_t == 8)
        || size_instruction != 4
        || size_number != 8
        || integral != 0
    {
        return err(LuaError::BadEncoding, "chunk is not little-endian 32-bit-int/64-bit-double");
    }

    Ok(ChunkHeader {
        size_t_bytes: size_size_t,
    })
}

pub(crate) fn read_exact<R: Read>(r: &mut R, buf: &mut [u8]) -> LuaResult<()> {
    r.read_exact(buf)
        .map_err(|e| crate::lua_vm::LuaFullError::new(LuaError::BadEncoding, e.to_string()))
}

pub(crate) fn read_u8<R: Read>(r: &mut R) -> LuaResult<u8> {
    let mut b = [0u8; 1];
    read_exact(r, &mut b)?;
    Ok(b[0])
}

pub(crate) fn read_u32<R: Read>(r: &mut R) -> LuaResult<u32> {
    let mut b = [0u8; 4];
    read_exact(r, &mut b)?;
    Ok(u32::from_le_bytes(b))
}

pub(crate) fn read_f64<R: Read>(r: &mut R) -> LuaResult<f64> {
    let mut b = [0u8; 8];
    read_exact(r, &mut b)?;
    Ok(f64::from_le_bytes(b))
}
