use crate::lua_value::{LuaTable, Value};

/// Spec §8 invariant: for any table T and integer key k with 0 <= k <
/// T.ArraySize, `Get(Set(k, v))` round-trips and `Len` tracks the longest
/// nil-free prefix.
#[test]
fn table_set_get_len_round_trip() {
    let mut t = LuaTable::new();
    for i in 1..=5 {
        t.set(Value::Number(i as f64), Value::Number((i * 10) as f64)).unwrap();
    }
    for i in 1..=5 {
        assert_eq!(t.get(&Value::Number(i as f64)), Value::Number((i * 10) as f64));
    }
    assert_eq!(t.len(), 5.0);

    t.set(Value::Number(3.0), Value::Nil).unwrap();
    assert_eq!(t.get(&Value::Number(3.0)), Value::Nil);
    assert_eq!(t.len(), 2.0, "length stops at the first nil-free-prefix break");
}

#[test]
fn nil_and_nan_keys_are_rejected() {
    let mut t = LuaTable::new();
    assert!(t.set(Value::Nil, Value::Number(1.0)).is_err());
    assert!(t.set(Value::Number(f64::NAN), Value::Number(1.0)).is_err());
}

#[test]
fn string_keys_live_in_the_hash_part() {
    let mut t = LuaTable::new();
    t.set_str("name", Value::string("lua"));
    assert_eq!(t.get_str("name"), Value::string("lua"));
    assert_eq!(t.len(), 0.0);
}
