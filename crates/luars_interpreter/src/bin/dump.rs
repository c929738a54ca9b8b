use std::env;
use std::fs::File;
use std::io::BufReader;

fn main() {
    let args: Vec<String> = env::args().collect();
    let Some(path) = args.get(1) else {
        println!("usage: dump <chunk>");
        std::process::exit(0);
    };

    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("dump: cannot open {path}: {e}");
            std::process::exit(1);
        }
    };

    match luars::dump(BufReader::new(file)) {
        Ok(text) => print!("{text}"),
        Err(e) => {
            eprintln!("dump: {path}: {e}");
            std::process::exit(1);
        }
    }
}
