use ahash::AHashMap;

use crate::lua_value::Value;
use crate::lua_vm::{LuaError, LuaResult, err};

/// Hybrid array+hash container (spec §3/§4.B).
///
/// `array[i]` holds the value bound to 1-based Lua integer key `i + 1`; this
/// matches how `SETLIST` addresses positions starting at 1 and makes `Len`
/// correspond to the longest nil-free prefix starting at key 1 (see
/// SPEC_FULL.md §3 for why this offset was chosen over the original Go
/// source's unoffset, buggy `CalcMaxN`).
pub struct LuaTable {
    array: Vec<Value>,
    hash: AHashMap<Value, Value>,
    max_n: usize,
}

impl LuaTable {
    pub fn new() -> Self {
        Self {
            array: Vec::new(),
            hash: AHashMap::new(),
            max_n: 0,
        }
    }

    /// `array_hint`/`hash_hint` are capacity hints from NEWTABLE (spec §4.G);
    /// sizes are approximate, the container still grows on demand.
    pub fn with_capacity(array_hint: usize, hash_hint: usize) -> Self {
        Self {
            array: Vec::with_capacity(array_hint),
            hash: AHashMap::with_capacity(hash_hint),
            max_n: 0,
        }
    }

    /// Array index (0-based) a 1-based integer key maps to, if it currently
    /// qualifies for the array part: `1 <= key <= array.len() + 1`.
    fn array_slot(&self, key: f64) -> Option<usize> {
        if key.is_nan() || key != key.floor() {
            return None;
        }
        if key < 1.0 || key > self.array.len() as f64 + 1.0 {
            return None;
        }
        Some(key as usize - 1)
    }

    pub fn get(&self, key: &Value) -> Value {
        if let Value::Number(n) = key {
            if let Some(idx) = self.array_slot(*n) {
                if idx < self.array.len() {
                    return self.array[idx].clone();
                }
                return Value::Nil;
            }
        }
        self.hash.get(key).cloned().unwrap_or(Value::Nil)
    }

    /// Writing a Nil key or a NaN number key is a `TypeError` (spec §9 "Table
    /// keys"); the original Go source performs no such check.
    pub fn set(&mut self, key: Value, value: Value) -> LuaResult<()> {
        match &key {
            Value::Nil => return err(LuaError::TypeError, "table index is nil"),
            Value::Number(n) if n.is_nan() => {
                return err(LuaError::TypeError, "table index is NaN");
            }
            _ => {}
        }

        if let Value::Number(n) = key {
            if let Some(idx) = self.array_slot(n) {
                if idx == self.array.len() {
                    self.array.push(value);
                } else {
                    self.array[idx] = value;
                }
                self.recompute_max_n();
                return Ok(());
            }
        }
        if value.is_nil() {
            self.hash.remove(&key);
        } else {
            self.hash.insert(key, value);
        }
        Ok(())
    }

    /// Scan left-to-right until the first nil; `MaxN` is the index of the
    /// last non-nil, or 0 when the first slot is nil (spec §4.B).
    fn recompute_max_n(&mut self) {
        let mut n = 0;
        for v in &self.array {
            if v.is_nil() {
                break;
            }
            n += 1;
        }
        self.max_n = n;
    }

    pub fn len(&self) -> f64 {
        self.max_n as f64
    }

    pub fn get_str(&self, key: &str) -> Value {
        self.get(&Value::string(key.as_bytes().to_vec()))
    }

    pub fn set_str(&mut self, key: &str, value: Value) {
        self.set(Value::string(key.as_bytes().to_vec()), value)
            .expect("string keys are never nil/NaN");
    }
}

impl Default for LuaTable {
    fn default() -> Self {
        Self::new()
    }
}
