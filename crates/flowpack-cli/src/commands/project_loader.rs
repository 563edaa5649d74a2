use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use flowpack_compiler::Project;
use flowpack_compiler::project::ProjectKind;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid project file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Read a project file, applying the `--target` override.
pub fn load_project(path: &Path, target: Option<ProjectKind>) -> Result<Project, LoadError> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_project(path, &text, target)
}

pub fn parse_project(
    path: &Path,
    text: &str,
    target: Option<ProjectKind>,
) -> Result<Project, LoadError> {
    let mut project = Project::from_json(text).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    if let Some(kind) = target {
        project.settings.project_type = kind;
    }
    tracing::debug!(
        path = %path.display(),
        pages = project.pages.len(),
        actions = project.actions.len(),
        "project loaded"
    );
    Ok(project)
}

/// Load or exit with `error: ...`.
pub fn load_or_exit(path: &Path, target: Option<ProjectKind>) -> Project {
    load_project(path, target).unwrap_or_else(|e| {
        eprintln!("error: {}", e);
        std::process::exit(1);
    })
}
