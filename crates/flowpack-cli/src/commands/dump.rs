use std::path::PathBuf;

use flowpack_bytecode::{Program, dump};

pub struct DumpArgs {
    pub program_path: PathBuf,
}

pub fn run(args: DumpArgs) {
    let program = match Program::from_path(&args.program_path) {
        Ok(program) => program,
        Err(e) => {
            eprintln!("error: '{}': {}", args.program_path.display(), e);
            std::process::exit(1);
        }
    };

    match dump(&program) {
        Ok(text) => print!("{}", text),
        Err(e) => {
            eprintln!("error: malformed program: {}", e);
            std::process::exit(1);
        }
    }
}
