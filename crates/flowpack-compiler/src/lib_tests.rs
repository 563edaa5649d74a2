use flowpack_bytecode::{HEADER_SIZE, Header, ProjectType};
use indoc::indoc;

use super::*;

const BROKEN: &str = indoc! {r#"
    {
      "settings": { "projectType": "lvgl" },
      "pages": [{
        "name": "Main",
        "components": [
          { "objID": "calc", "type": "EvalExpr", "expression": "missing + 1" }
        ]
      }]
    }
"#};

fn compile_json(json: &str, mode: BuildMode) -> CompileOutput {
    let project = Project::from_json(json).unwrap();
    compile(&project, &CompileOptions { mode }).unwrap()
}

#[test]
fn check_mode_returns_no_bytes() {
    let output = compile_json(BROKEN, BuildMode::Check);

    assert!(output.bytes.is_none());
    assert!(output.diagnostics.has_errors());
}

#[test]
fn assets_build_ships_despite_errors() {
    let output = compile_json(BROKEN, BuildMode::BuildAssets);

    assert!(output.diagnostics.has_errors());
    let bytes = output.bytes.unwrap();
    let header = Header::from_bytes(&bytes).unwrap();
    assert!(header.validate_tag());
    assert_eq!(header.project_type, ProjectType::Lvgl as u16);
    assert_eq!(header.decompressed_size as usize, bytes.len() - HEADER_SIZE);
}

#[test]
fn files_build_withheld_on_errors() {
    let output = compile_json(BROKEN, BuildMode::BuildFiles);

    assert!(output.bytes.is_none());
    assert_eq!(output.assets_map.flows.len(), 1);
}

#[test]
fn checksum_matches_payload() {
    let output = compile_json(BROKEN, BuildMode::BuildAssets);
    let bytes = output.bytes.unwrap();

    assert_eq!(
        output.assets_map.payload_checksum,
        crc32fast::hash(&bytes[HEADER_SIZE..])
    );
}

#[test]
fn check_and_build_report_the_same_diagnostics() {
    let check = compile_json(BROKEN, BuildMode::Check);
    let build = compile_json(BROKEN, BuildMode::BuildAssets);

    assert_eq!(check.diagnostics.messages(), build.diagnostics.messages());
}
