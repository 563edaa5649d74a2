//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` that can be composed into commands.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Project file (positional).
pub fn project_path_arg() -> Arg {
    Arg::new("project_path")
        .value_name("PROJECT")
        .value_parser(value_parser!(PathBuf))
        .required(true)
        .help("Project file (JSON)")
}

/// Compiled program file (positional).
pub fn program_path_arg() -> Arg {
    Arg::new("program_path")
        .value_name("PROGRAM")
        .value_parser(value_parser!(PathBuf))
        .required(true)
        .help("Compiled program file")
}

/// Expression text (positional).
pub fn expr_text_arg() -> Arg {
    Arg::new("text")
        .value_name("TEXT")
        .required(true)
        .help("Expression to compile")
}

/// Build mode (--mode).
pub fn mode_arg() -> Arg {
    Arg::new("mode")
        .long("mode")
        .value_name("MODE")
        .default_value("assets")
        .value_parser(["assets", "files"])
        .help("Build for the embedded interpreter (assets) or a standalone build (files)")
}

/// Override the project type (--target).
pub fn target_arg() -> Arg {
    Arg::new("target")
        .long("target")
        .value_name("TYPE")
        .value_parser([
            "firmware",
            "firmware-module",
            "resource",
            "applet",
            "dashboard",
            "lvgl",
        ])
        .help("Project type to build for (default: from the project settings)")
}

/// Write output to file (-o/--output).
pub fn output_file_arg() -> Arg {
    Arg::new("output")
        .short('o')
        .long("output")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .required(true)
        .help("Write the program to file")
}

/// Write the assets map as JSON (--map).
pub fn map_file_arg() -> Arg {
    Arg::new("map")
        .long("map")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Write the debugger assets map (JSON) to file")
}

/// Treat warnings as errors (--strict).
pub fn strict_arg() -> Arg {
    Arg::new("strict")
        .long("strict")
        .action(ArgAction::SetTrue)
        .help("Treat warnings as errors")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize output")
}

/// Debug logging (-v/--verbose).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .long("verbose")
        .action(ArgAction::SetTrue)
        .help("Log compiler progress to stderr")
}
