//! Dispatch logic: extract params from ArgMatches and convert to command args.
//!
//! This module contains:
//! - `*Params` structs that mirror command `*Args` but are populated from clap
//! - `from_matches()` extractors
//! - `Into<*Args>` impls to bridge dispatch → command handlers

use std::path::PathBuf;

use clap::ArgMatches;
use flowpack_compiler::BuildMode;
use flowpack_compiler::project::ProjectKind;

use super::ColorChoice;
use crate::commands::build::BuildArgs;
use crate::commands::check::CheckArgs;
use crate::commands::dump::DumpArgs;
use crate::commands::expr::ExprArgs;

pub struct CheckParams {
    pub project_path: PathBuf,
    pub target: Option<ProjectKind>,
    pub strict: bool,
    pub color: ColorChoice,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            project_path: required_path(m, "project_path"),
            target: parse_target(m),
            strict: m.get_flag("strict"),
            color: parse_color(m),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            project_path: p.project_path,
            target: p.target,
            strict: p.strict,
            color: p.color.should_colorize(),
        }
    }
}

pub struct BuildParams {
    pub project_path: PathBuf,
    pub output: PathBuf,
    pub mode: BuildMode,
    pub map: Option<PathBuf>,
    pub target: Option<ProjectKind>,
    pub color: ColorChoice,
}

impl BuildParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            project_path: required_path(m, "project_path"),
            output: required_path(m, "output"),
            mode: parse_mode(m),
            map: m.get_one::<PathBuf>("map").cloned(),
            target: parse_target(m),
            color: parse_color(m),
        }
    }
}

impl From<BuildParams> for BuildArgs {
    fn from(p: BuildParams) -> Self {
        Self {
            project_path: p.project_path,
            output: p.output,
            mode: p.mode,
            map: p.map,
            target: p.target,
            color: p.color.should_colorize(),
        }
    }
}

pub struct DumpParams {
    pub program_path: PathBuf,
}

impl DumpParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            program_path: required_path(m, "program_path"),
        }
    }
}

impl From<DumpParams> for DumpArgs {
    fn from(p: DumpParams) -> Self {
        Self {
            program_path: p.program_path,
        }
    }
}

pub struct ExprParams {
    pub text: String,
}

impl ExprParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            text: m.get_one::<String>("text").cloned().unwrap_or_default(),
        }
    }
}

impl From<ExprParams> for ExprArgs {
    fn from(p: ExprParams) -> Self {
        Self { text: p.text }
    }
}

/// Required positionals are enforced by clap; an empty path only shows up
/// when params are built from hand-made matches.
fn required_path(m: &ArgMatches, id: &str) -> PathBuf {
    m.get_one::<PathBuf>(id).cloned().unwrap_or_default()
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}

fn parse_mode(m: &ArgMatches) -> BuildMode {
    match m.get_one::<String>("mode").map(|s| s.as_str()) {
        Some("files") => BuildMode::BuildFiles,
        _ => BuildMode::BuildAssets,
    }
}

fn parse_target(m: &ArgMatches) -> Option<ProjectKind> {
    let kind = match m.get_one::<String>("target")?.as_str() {
        "firmware" => ProjectKind::Firmware,
        "firmware-module" => ProjectKind::FirmwareModule,
        "resource" => ProjectKind::Resource,
        "applet" => ProjectKind::Applet,
        "dashboard" => ProjectKind::Dashboard,
        "lvgl" => ProjectKind::Lvgl,
        _ => return None,
    };
    Some(kind)
}
