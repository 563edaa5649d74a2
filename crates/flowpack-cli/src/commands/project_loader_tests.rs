use std::path::Path;

use flowpack_bytecode::ProjectType;
use flowpack_compiler::project::ProjectKind;

use super::project_loader::{LoadError, load_project, parse_project};

#[test]
fn target_overrides_settings() {
    let text = r#"{ "settings": { "projectType": "dashboard" }, "pages": [{ "name": "Main" }] }"#;

    let project = parse_project(Path::new("p.json"), text, None).unwrap();
    assert_eq!(project.project_type(), ProjectType::Dashboard);

    let project = parse_project(Path::new("p.json"), text, Some(ProjectKind::Lvgl)).unwrap();
    assert_eq!(project.project_type(), ProjectType::Lvgl);
}

#[test]
fn parse_error_names_the_file() {
    let err = parse_project(Path::new("broken.json"), "{ nope", None).unwrap_err();

    assert!(matches!(err, LoadError::Parse { .. }));
    assert!(err.to_string().starts_with("invalid project file 'broken.json': "));
}

#[test]
fn missing_file_is_a_read_error() {
    let err = load_project(Path::new("/nonexistent/flowpack/project.json"), None).unwrap_err();

    assert!(matches!(err, LoadError::Read { .. }));
}
