//! Flowpack compiler: flow graphs to relocatable bytecode.
//!
//! This crate provides the compilation pipeline for flow projects:
//! - `project` - the typed project graph read from JSON
//! - `writer` - aligned binary writer with deferred objects
//! - `assets` - deduplicating index tables and the debugger map
//! - `expr` - expression parser, type checker and code generator
//! - `component` - per-kind ports, properties and payload encoders
//! - `build` - flow arenas, structural checks and document layout
//! - `diagnostics` - error reporting

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod assets;
pub mod build;
pub mod component;
pub mod diagnostics;
pub mod expr;
pub mod project;
pub mod writer;

#[cfg(test)]
mod lib_tests;

use flowpack_bytecode::Header;

pub use assets::AssetsMap;
pub use component::Registry;
pub use diagnostics::{Diagnostics, DiagnosticsPrinter, Severity};
pub use project::Project;
pub use writer::WriterError;

/// What a compile pass produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BuildMode {
    /// Diagnostics only; no program is returned.
    Check,
    /// Program for the embedded interpreter; native actions are not callable.
    #[default]
    BuildAssets,
    /// Program for a standalone build, with the native action table.
    BuildFiles,
}

#[derive(Debug, Clone, Default)]
pub struct CompileOptions {
    pub mode: BuildMode,
}

#[derive(Debug)]
pub struct CompileOutput {
    /// Header plus payload. `None` in check mode, and in a files build
    /// that reported errors.
    pub bytes: Option<Vec<u8>>,
    pub diagnostics: Diagnostics,
    pub assets_map: AssetsMap,
}

/// Internal faults. Problems in the project are diagnostics, not errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    #[error("writer fault: {0}")]
    Writer(#[from] WriterError),

    #[error("payload of {0} bytes does not fit the header size field")]
    PayloadTooLarge(usize),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Compile `project` into a program.
pub fn compile(project: &Project, options: &CompileOptions) -> Result<CompileOutput> {
    compile_with(&Registry::new(), project, options)
}

/// Like [`compile`], reusing an existing registry.
pub fn compile_with(
    registry: &Registry,
    project: &Project,
    options: &CompileOptions,
) -> Result<CompileOutput> {
    let mut diagnostics = Diagnostics::new();
    let built = build::build(project, options.mode, registry, &mut diagnostics)?;

    let size = u32::try_from(built.payload.len())
        .map_err(|_| Error::PayloadTooLarge(built.payload.len()))?;
    let header = Header::new(project.project_type(), size);

    let ship = match options.mode {
        BuildMode::Check => false,
        BuildMode::BuildAssets => true,
        BuildMode::BuildFiles => !diagnostics.has_errors(),
    };
    let bytes = ship.then(|| {
        let mut bytes = Vec::with_capacity(header.to_bytes().len() + built.payload.len());
        bytes.extend_from_slice(&header.to_bytes());
        bytes.extend_from_slice(&built.payload);
        bytes
    });

    tracing::info!(
        mode = ?options.mode,
        payload = built.payload.len(),
        errors = diagnostics.error_count(),
        warnings = diagnostics.warning_count(),
        checksum = format_args!("{:08x}", built.assets_map.payload_checksum),
        "compiled"
    );

    Ok(CompileOutput {
        bytes,
        diagnostics,
        assets_map: built.assets_map,
    })
}
