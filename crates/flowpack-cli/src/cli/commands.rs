//! Command builders for the CLI.
//!
//! Each command is built using the shared arg builders from `args.rs`.

use clap::Command;

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("flowpack")
        .about("Compile flow projects to interpreter bytecode")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(check_command())
        .subcommand(build_command())
        .subcommand(dump_command())
        .subcommand(expr_command())
}

/// Compile without output, reporting diagnostics.
pub fn check_command() -> Command {
    Command::new("check")
        .about("Check a project for errors")
        .after_help(
            r#"EXAMPLES:
  flowpack check project.json                 # errors only
  flowpack check project.json --strict        # warnings fail too
  flowpack check project.json --target lvgl   # as an LVGL project"#,
        )
        .arg(project_path_arg())
        .arg(target_arg())
        .arg(strict_arg())
        .arg(color_arg())
        .arg(verbose_arg())
}

/// Compile to a program file.
pub fn build_command() -> Command {
    Command::new("build")
        .about("Compile a project to a program file")
        .override_usage("  flowpack build <PROJECT> -o <FILE> [--mode assets|files] [--map <FILE>]")
        .after_help(
            r#"EXAMPLES:
  flowpack build project.json -o app.bin
  flowpack build project.json -o app.bin --mode files
  flowpack build project.json -o app.bin --map app.map.json"#,
        )
        .arg(project_path_arg())
        .arg(output_file_arg())
        .arg(mode_arg())
        .arg(map_file_arg())
        .arg(target_arg())
        .arg(color_arg())
        .arg(verbose_arg())
}

/// Print the structure of a compiled program.
pub fn dump_command() -> Command {
    Command::new("dump")
        .about("Show the contents of a program file")
        .arg(program_path_arg())
        .arg(verbose_arg())
}

/// Disassemble a standalone expression.
pub fn expr_command() -> Command {
    Command::new("expr")
        .about("Compile one expression and show its instructions")
        .after_help(
            r#"EXAMPLES:
  flowpack expr '1 + 2 * 3'
  flowpack expr 'Math.floor(7 / 2) > 2 ? "yes" : "no"'"#,
        )
        .arg(expr_text_arg())
        .arg(verbose_arg())
}
