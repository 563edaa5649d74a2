use indoc::indoc;

use super::*;
use crate::BuildMode;

fn project() -> Project {
    Project::from_json(indoc! {r#"
        {
          "variables": {
            "structures": [{ "name": "Point", "fields": [{ "name": "x", "type": "integer" }] }],
            "enums": [{ "name": "Color", "members": [{ "name": "Red", "value": 1 }] }]
          },
          "styles": [{ "name": "big" }, { "name": "small" }, { "name": "title" }],
          "pages": [{ "name": "Main" }, { "name": "Settings" }],
          "actions": [
            { "name": "beep", "implementationType": "native" },
            { "name": "reset" },
            { "name": "log", "implementationType": "native" }
          ]
        }
    "#})
    .unwrap()
}

#[test]
fn undefined_and_null_are_preregistered() {
    let table = ConstantTable::new();

    assert_eq!(table.len(), 2);
    assert_eq!(table.get(0).unwrap().value, Value::Undefined);
    assert_eq!(table.get(1).unwrap().value, Value::Null);
}

#[test]
fn constants_dedup_on_value_and_type() {
    let mut table = ConstantTable::new();

    let a = table.intern(Value::Integer(5), ValueType::Integer);
    let b = table.intern(Value::Integer(5), ValueType::Integer);
    let c = table.intern(Value::Integer(5), ValueType::Enum("Color".into()));
    let d = table.intern(Value::Double(0.5), ValueType::Double);
    let e = table.intern(Value::Double(0.5), ValueType::Double);

    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(d, e);
    assert_eq!(table.len(), 5);
}

#[test]
fn nan_constants_dedup_by_bits() {
    let mut table = ConstantTable::new();

    let a = table.intern(Value::Double(f64::NAN), ValueType::Double);
    let b = table.intern(Value::Double(f64::NAN), ValueType::Double);

    assert_eq!(a, b);
}

#[test]
fn type_indexes_follow_first_use() {
    let project = project();
    let mut types = TypeTable::new();

    let point = types.index(&project, &ValueType::parse("struct:Point").unwrap());
    let ints = types.index(&project, &ValueType::parse("array:integer").unwrap());
    let again = types.index(&project, &ValueType::parse("struct:Point").unwrap());

    assert_eq!(point, Some(0));
    assert_eq!(ints, Some(1));
    assert_eq!(again, Some(0));
    assert_eq!(
        types.index(&project, &ValueType::parse("array:struct:Nope").unwrap()),
        None
    );
    assert_eq!(
        types.index(&project, &ValueType::parse("enum:Shade").unwrap()),
        None
    );
}

#[test]
fn flows_are_pages_then_flow_actions() {
    let project = project();
    let assets = Assets::new(&project, BuildMode::BuildAssets);

    let names: Vec<&str> = assets.flows().iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, ["Main", "Settings", "reset"]);
    assert_eq!(assets.page_index("Settings"), Some(1));
    assert_eq!(assets.page_index("reset"), None);
    assert_eq!(assets.action_ref("reset"), Some(ActionRef::Flow(2)));
    assert_eq!(assets.action_ref("log"), Some(ActionRef::Native(1)));
    assert_eq!(assets.action_ref("missing"), None);
}

#[test]
fn native_actions_only_callable_when_building_files() {
    let project = project();

    let assets = Assets::new(&project, BuildMode::BuildAssets);
    assert_eq!(assets.native_flow_index(1), None);
    assert!(assets.native_action_names().is_empty());

    let assets = Assets::new(&project, BuildMode::BuildFiles);
    assert_eq!(assets.native_flow_index(1), Some(4));
    assert_eq!(assets.native_action_names(), ["beep", "log"]);
}

#[test]
fn styles_indexed_by_first_use() {
    let project = project();
    let mut assets = Assets::new(&project, BuildMode::BuildAssets);

    assert_eq!(assets.style_index("title"), Some(0));
    assert_eq!(assets.style_index("big"), Some(1));
    assert_eq!(assets.style_index("title"), Some(0));
    assert_eq!(assets.style_index("nope"), None);

    let mut diagnostics = Diagnostics::new();
    assets.report_unused_assets(&mut diagnostics);
    assert_eq!(diagnostics.messages(), ["Unused style: small"]);
}

#[test]
fn component_inputs_keyed_per_flow() {
    let project = project();
    let mut assets = Assets::new(&project, BuildMode::BuildAssets);
    let seq = InputFlags {
        sequence: true,
        optional: false,
    };

    assert_eq!(assets.component_input_index(0, "a", "@seqin", seq), 0);
    assert_eq!(assets.component_input_index(0, "b", "@seqin", seq), 1);
    assert_eq!(assets.component_input_index(0, "a", "@seqin", seq), 0);
    assert_eq!(assets.component_input_index(1, "b", "@seqin", seq), 0);

    assert_eq!(assets.flow_state(0).find_component_input_index("b", "@seqin"), Some(1));
    assert_eq!(assets.flow_state(0).find_component_input_index("b", "x"), None);
}

#[test]
fn input_flag_bits() {
    let flags = |sequence, optional| InputFlags { sequence, optional }.bits();

    assert_eq!(flags(false, false), 0);
    assert_eq!(flags(true, false), 1);
    assert_eq!(flags(false, true), 2);
    assert_eq!(flags(true, true), 3);
}

#[test]
fn finalized_map_lists_pools() {
    let project = project();
    let mut assets = Assets::new(&project, BuildMode::BuildAssets);
    assets.constant_index(Value::String("hi".into()), ValueType::String);
    assets.type_index(&ValueType::Integer);
    assets.style_index("big");
    assets.component_input_index(
        0,
        "c1",
        "value",
        InputFlags::default(),
    );

    let map = assets.finalize_map();

    assert_eq!(map.constants.len(), 3);
    assert_eq!(map.constants[2].value, "hi");
    assert_eq!(map.types, ["integer"]);
    assert_eq!(map.styles, ["big"]);
    assert_eq!(map.flows.len(), 3);
    assert_eq!(map.flows[0].component_inputs[0].obj_id, "c1");
    assert_eq!(map.flows[0].component_inputs[0].input_name, "value");
}
