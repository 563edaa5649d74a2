use std::path::PathBuf;

use flowpack_compiler::project::ProjectKind;
use flowpack_compiler::{BuildMode, CompileOptions, compile};

use super::project_loader::load_or_exit;

pub struct CheckArgs {
    pub project_path: PathBuf,
    pub target: Option<ProjectKind>,
    pub strict: bool,
    pub color: bool,
}

pub fn run(args: CheckArgs) {
    let project = load_or_exit(&args.project_path, args.target);

    let options = CompileOptions {
        mode: BuildMode::Check,
    };
    let output = match compile(&project, &options) {
        Ok(output) => output,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    let diagnostics = &output.diagnostics;
    if !diagnostics.is_empty() {
        eprint!("{}", diagnostics.printer().colored(args.color).render());
    }

    let failed = diagnostics.has_errors() || (args.strict && diagnostics.has_warnings());
    if failed {
        std::process::exit(1);
    }

    // Silent on success (like cargo check)
}
