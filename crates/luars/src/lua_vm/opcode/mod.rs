mod instruction;

pub use instruction::{Instruction, RK_CONST_BIT};

/// All 38 Lua 5.1 opcodes, numbered exactly as spec.md §6 lists them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum OpCode {
    Move = 0,
    LoadK = 1,
    LoadBool = 2,
    LoadNil = 3,
    GetUpval = 4,
    GetGlobal = 5,
    GetTable = 6,
    SetGlobal = 7,
    SetUpval = 8,
    SetTable = 9,
    NewTable = 10,
    SelfOp = 11,
    Add = 12,
    Sub = 13,
    Mul = 14,
    Div = 15,
    Mod = 16,
    Pow = 17,
    Unm = 18,
    Not = 19,
    Len = 20,
    Concat = 21,
    Jmp = 22,
    Eq = 23,
    Lt = 24,
    Le = 25,
    Test = 26,
    TestSet = 27,
    Call = 28,
    TailCall = 29,
    Return = 30,
    ForLoop = 31,
    ForPrep = 32,
    TForLoop = 33,
    SetList = 34,
    Close = 35,
    Closure = 36,
    Vararg = 37,
}

impl OpCode {
    pub fn from_u8(b: u8) -> Option<OpCode> {
        use OpCode::*;
        const TABLE: [OpCode; 38] = [
            Move, LoadK, LoadBool, LoadNil, GetUpval, GetGlobal, GetTable, SetGlobal, SetUpval,
            SetTable, NewTable, SelfOp, Add, Sub, Mul, Div, Mod, Pow, Unm, Not, Len, Concat, Jmp,
            Eq, Lt, Le, Test, TestSet, Call, TailCall, Return, ForLoop, ForPrep, TForLoop,
            SetList, Close, Closure, Vararg,
        ];
        TABLE.get(b as usize).copied()
    }
}
