use flowpack_bytecode::{ComponentType, ProjectType};
use indoc::indoc;

use super::*;
use crate::project::{CompareOperator, Project};

fn project() -> Project {
    Project::from_json(indoc! {r#"
        {
          "pages": [{
            "name": "Main",
            "components": [
              { "objID": "call", "type": "CallAction", "action": "sum" },
              { "objID": "sw", "type": "Switch", "tests": [
                { "condition": "true", "outputName": "yes" },
                { "condition": "false", "outputName": "" }
              ] },
              { "objID": "log", "type": "Log", "value": "v={1}", "catchError": true,
                "customInputs": [{ "name": "extra", "type": "integer" }] },
              { "objID": "cmp", "type": "Compare", "A": "1", "operator": "NOT" },
              { "objID": "note", "type": "Comment", "text": "hi" },
              { "objID": "show", "type": "ShowPage" }
            ]
          }],
          "actions": [{
            "name": "sum",
            "components": [
              { "objID": "in_x", "type": "Input", "name": "x", "inputType": "integer" },
              { "objID": "in_y", "type": "Input", "name": "y" },
              { "objID": "out_r", "type": "Output", "name": "r" }
            ]
          }]
        }
    "#})
    .unwrap()
}

fn describe(ports: &[Port]) -> Vec<String> {
    ports
        .iter()
        .map(|p| {
            let mut s = format!("{}: {}", p.name, p.value_type);
            if p.sequence {
                s.push_str(" seq");
            }
            if p.optional {
                s.push_str(" optional");
            }
            s
        })
        .collect()
}

#[test]
fn call_action_takes_callee_ports() {
    let project = project();
    let ports = build_ports(&project, &project.pages[0].components[0]);

    insta::assert_debug_snapshot!(describe(&ports.inputs), @r#"
    [
        "@seqin: null seq",
        "in_x: integer",
        "in_y: any",
    ]
    "#);
    insta::assert_debug_snapshot!(describe(&ports.outputs), @r#"
    [
        "@seqout: null seq",
        "out_r: any optional",
    ]
    "#);
}

#[test]
fn switch_output_per_named_test() {
    let project = project();
    let ports = build_ports(&project, &project.pages[0].components[1]);

    assert_eq!(ports.output_index("yes"), Some(1));
    assert_eq!(ports.outputs.len(), 2);
}

#[test]
fn custom_ports_then_error_output() {
    let project = project();
    let ports = build_ports(&project, &project.pages[0].components[2]);

    assert_eq!(describe(&ports.inputs), ["@seqin: null seq optional", "extra: integer"]);
    assert_eq!(ports.output_index(ERROR_OUT), Some(1));
}

#[test]
fn property_tables() {
    let project = project();
    let log = properties(&project.pages[0].components[2]);
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].mode, PropertyMode::Template);

    let cmp = properties(&project.pages[0].components[3]);
    let hidden: Vec<(&str, bool)> = cmp.iter().map(|p| (p.name, p.hidden)).collect();
    assert_eq!(hidden, [("A", false), ("B", true), ("C", true)]);
}

#[test]
fn required_properties() {
    let project = project();
    let missing = missing_properties(&project.pages[0].components[1]);
    assert_eq!(missing, [("tests[1].outputName".to_string(), "Output name not set")]);

    let missing = missing_properties(&project.pages[0].components[5]);
    assert_eq!(missing, [("page".to_string(), "Page not set")]);
}

#[test]
fn compare_conditions() {
    insta::assert_snapshot!(
        compare_condition(CompareOperator::Less, "a", "b", ""),
        @"(a) < (b)"
    );
    insta::assert_snapshot!(
        compare_condition(CompareOperator::Not, "a", "", ""),
        @"!(a)"
    );
    insta::assert_snapshot!(
        compare_condition(CompareOperator::Xor, "a", "b", ""),
        @"((a) && !(b)) || (!(a) && (b))"
    );
    insta::assert_snapshot!(
        compare_condition(CompareOperator::Between, "x", "1", "9"),
        @"((x) >= (1)) && ((x) <= (9))"
    );
}

#[test]
fn registry_descriptors() {
    let project = project();
    let registry = Registry::new();
    let components = &project.pages[0].components;

    let call = registry.descriptor(&components[0].kind);
    assert_eq!(call.component_type, ComponentType::CallAction);
    assert!(call.payload.is_some());

    let comment = registry.descriptor(&components[4].kind);
    assert!(!comment.encoded);

    let log = registry.descriptor(&components[2].kind);
    assert!(log.payload.is_none());
    assert!(log.supports(ProjectType::Lvgl));
}

#[test]
fn widgets_are_not_supported_on_lvgl() {
    let registry = Registry::new();
    let text = registry
        .iter()
        .find(|(tag, _)| *tag == KindTag::Text)
        .map(|(_, d)| *d)
        .unwrap();

    assert!(text.supports(ProjectType::Firmware));
    assert!(!text.supports(ProjectType::Lvgl));
}
