use std::fs;
use std::path::PathBuf;

use flowpack_compiler::project::ProjectKind;
use flowpack_compiler::{BuildMode, CompileOptions, Severity, compile};

use super::project_loader::load_or_exit;

pub struct BuildArgs {
    pub project_path: PathBuf,
    pub output: PathBuf,
    pub mode: BuildMode,
    pub map: Option<PathBuf>,
    pub target: Option<ProjectKind>,
    pub color: bool,
}

pub fn run(args: BuildArgs) {
    let project = load_or_exit(&args.project_path, args.target);

    let options = CompileOptions { mode: args.mode };
    let output = match compile(&project, &options) {
        Ok(output) => output,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    let diagnostics = &output.diagnostics;
    if diagnostics.has_errors() {
        eprint!(
            "{}",
            diagnostics
                .printer()
                .colored(args.color)
                .min_severity(Severity::Error)
                .render()
        );
        eprintln!(
            "error: build failed with {} error(s); '{}' not written",
            diagnostics.error_count(),
            args.output.display()
        );
        std::process::exit(1);
    }
    if diagnostics.has_warnings() {
        eprint!(
            "{}",
            diagnostics
                .printer()
                .colored(args.color)
                .min_severity(Severity::Warning)
                .render()
        );
    }

    let Some(bytes) = output.bytes else {
        eprintln!("error: compiler returned no program");
        std::process::exit(1);
    };
    if let Err(e) = fs::write(&args.output, &bytes) {
        eprintln!("error: failed to write '{}': {}", args.output.display(), e);
        std::process::exit(1);
    }
    tracing::info!(path = %args.output.display(), bytes = bytes.len(), "program written");

    if let Some(map_path) = &args.map {
        let json = match output.assets_map.to_json() {
            Ok(json) => json,
            Err(e) => {
                eprintln!("error: failed to serialize assets map: {}", e);
                std::process::exit(1);
            }
        };
        if let Err(e) = fs::write(map_path, json) {
            eprintln!("error: failed to write '{}': {}", map_path.display(), e);
            std::process::exit(1);
        }
    }
}
