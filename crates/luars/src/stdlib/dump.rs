//! Recursive prototype-tree printer backing `dump()` / `src/bin/dump.rs`
//! (SPEC_FULL §5), in the spirit of `luac -l`.
use std::fmt::Write as _;

use crate::lua_value::Value;
use crate::lua_vm::closure::Prototype;
use crate::lua_vm::{Instruction, OpCode};

fn opcode_name(op: OpCode) -> &'static str {
    match op {
        OpCode::Move => "MOVE",
        OpCode::LoadK => "LOADK",
        OpCode::LoadBool => "LOADBOOL",
        OpCode::LoadNil => "LOADNIL",
        OpCode::GetUpval => "GETUPVAL",
        OpCode::GetGlobal => "GETGLOBAL",
        OpCode::GetTable => "GETTABLE",
        OpCode::SetGlobal => "SETGLOBAL",
        OpCode::SetUpval => "SETUPVAL",
        OpCode::SetTable => "SETTABLE",
        OpCode::NewTable => "NEWTABLE",
        OpCode::SelfOp => "SELF",
        OpCode::Add => "ADD",
        OpCode::Sub => "SUB",
        OpCode::Mul => "MUL",
        OpCode::Div => "DIV",
        OpCode::Mod => "MOD",
        OpCode::Pow => "POW",
        OpCode::Unm => "UNM",
        OpCode::Not => "NOT",
        OpCode::Len => "LEN",
        OpCode::Concat => "CONCAT",
        OpCode::Jmp => "JMP",
        OpCode::Eq => "EQ",
        OpCode::Lt => "LT",
        OpCode::Le => "LE",
        OpCode::Test => "TEST",
        OpCode::TestSet => "TESTSET",
        OpCode::Call => "CALL",
        OpCode::TailCall => "TAILCALL",
        OpCode::Return => "RETURN",
        OpCode::ForLoop => "FORLOOP",
        OpCode::ForPrep => "FORPREP",
        OpCode::TForLoop => "TFORLOOP",
        OpCode::SetList => "SETLIST",
        OpCode::Close => "CLOSE",
        OpCode::Closure => "CLOSURE",
        OpCode::Vararg => "VARARG",
    }
}

fn format_constant(v: &Value) -> String {
    match v {
        Value::Nil => "nil".to_string(),
        Value::Boolean(b) => b.to_string(),
        Value::Number(_) => v.display(),
        Value::String(_) => format!("{:?}", v.display()),
        other => other.display(),
    }
}

pub fn write_prototype(out: &mut String, proto: &Prototype, depth: usize) {
    let indent = "  ".repeat(depth);
    let _ = writeln!(
        out,
        "{indent}function <{} params, {} upvalues, {} max stack{}>",
        proto.num_params,
        proto.num_upvalues,
        proto.max_stack_size,
        if proto.is_vararg { ", vararg" } else { "" },
    );

    for (pc, &instr) in proto.instructions.iter().enumerate() {
        let Some(op) = Instruction::opcode(instr) else {
            let _ = writeln!(out, "{indent}\t{pc}\t???\t{instr:#010x}");
            continue;
        };
        let _ = writeln!(
            out,
            "{indent}\t{pc}\t{}\tA={} B={} C={} Bx={}",
            opcode_name(op),
            Instruction::a(instr),
            Instruction::b(instr),
            Instruction::c(instr),
            Instruction::bx(instr),
        );
    }

    if !proto.constants.is_empty() {
        let _ = writeln!(out, "{indent}constants ({}):", proto.constants.len());
        for (i, k) in proto.constants.iter().enumerate() {
            let _ = writeln!(out, "{indent}\t{i}\t{}", format_constant(k));
        }
    }

    for nested in &proto.prototypes {
        write_prototype(out, nested, depth + 1);
    }
}
