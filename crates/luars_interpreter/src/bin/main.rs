use std::env;
use std::fs::File;
use std::io::BufReader;

use luars::{LuaVM, stdlib};

const VERSION: &str = "luars 0.1.0 (Lua 5.1 bytecode interpreter)";
const COPYRIGHT: &str = "Copyright (C) 2026 lua-rs CppCXY";

fn print_usage() {
    eprintln!("usage: lua [options] chunk");
    eprintln!("Available options are:");
    eprintln!("  -v        show version information");
    eprintln!("  --        stop handling options");
}

fn print_version() {
    println!("{VERSION}");
    println!("{COPYRIGHT}");
}

#[derive(Default)]
struct Options {
    show_version: bool,
    chunk_path: Option<String>,
}

fn parse_args() -> Result<Options, String> {
    let args: Vec<String> = env::args().collect();
    let mut opts = Options::default();
    let mut i = 1;
    let mut stop_options = false;

    while i < args.len() {
        let arg = &args[i];
        if !stop_options && arg.starts_with('-') && arg != "-" {
            match arg.as_str() {
                "-v" => opts.show_version = true,
                "--" => stop_options = true,
                _ => return Err(format!("unrecognized option '{arg}'")),
            }
        } else if opts.chunk_path.is_none() {
            opts.chunk_path = Some(arg.clone());
        } else {
            return Err(format!("unexpected argument '{arg}'"));
        }
        i += 1;
    }

    Ok(opts)
}

fn main() {
    let opts = match parse_args() {
        Ok(opts) => opts,
        Err(msg) => {
            eprintln!("lua: {msg}");
            print_usage();
            std::process::exit(1);
        }
    };

    if opts.show_version {
        print_version();
        if opts.chunk_path.is_none() {
            return;
        }
    }

    let Some(path) = opts.chunk_path else {
        print_usage();
        std::process::exit(1);
    };

    let file = match File::open(&path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("lua: cannot open {path}: {e}");
            std::process::exit(1);
        }
    };

    let closure_proto = match luars::load(BufReader::new(file)) {
        Ok(proto) => proto,
        Err(e) => {
            eprintln!("lua: {path}: {e}");
            std::process::exit(1);
        }
    };

    let mut vm = LuaVM::new();
    stdlib::open(&mut vm);

    let closure = std::rc::Rc::new(luars::Closure {
        prototype: closure_proto,
        upvalues: Vec::new(),
    });

    if let Err(e) = vm.run(closure) {
        eprintln!("lua: {path}: {e}");
        std::process::exit(1);
    }
}
