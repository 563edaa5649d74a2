use indoc::indoc;

use super::*;
use crate::header::{Header, ProjectType};

fn words(instrs: &[Instruction]) -> Vec<u8> {
    instrs.iter().flat_map(|i| i.encode().to_le_bytes()).collect()
}

#[test]
fn expression_names_operations() {
    let bytes = words(&[
        Instruction::PushConstant(0),
        Instruction::PushInput(1),
        Instruction::Operation(0),
        Instruction::End,
    ]);

    insta::assert_snapshot!(dump_expression(&bytes), @r"
    push_const 0
    push_input 1
    op 0 (add)
    end
    ");
}

#[test]
fn expression_without_end() {
    let bytes = words(&[Instruction::PushConstant(0)]);
    assert_eq!(dump_expression(&bytes), "<unterminated>");
}

#[test]
fn flow_values() {
    #[rustfmt::skip]
    let bytes = [
        // int32 -7
        7, 0, 0, 0, 0, 0, 0, 0,  0xF9, 0xFF, 0xFF, 0xFF, 0, 0, 0, 0,
        // boolean true
        2, 0, 0, 0, 0, 0, 0, 0,  1, 0, 0, 0, 0, 0, 0, 0,
        // string asset, offset 8 from slot 40 -> 48
        14, 0, 0, 0, 0, 0, 0, 0,  8, 0, 0, 0, 0, 0, 0, 0,
        b'h', b'i', 0, 0,
    ];
    let r = ByteReader::new(&bytes);

    assert_eq!(flow_value(&r, 0).unwrap(), "int32 -7");
    assert_eq!(flow_value(&r, 16).unwrap(), "boolean true");
    assert_eq!(flow_value(&r, 32).unwrap(), r#"string_asset "hi""#);
}

/// `levels` single-element arrays wrapped around `int32 5`.
fn nested_arrays(levels: usize) -> Vec<u8> {
    let mut bytes = Vec::new();
    for _ in 0..levels {
        // array_asset value, union offset 8 -> array header right after it
        bytes.extend_from_slice(&[16, 0, 0, 0, 0, 0, 0, 0, 8, 0, 0, 0, 0, 0, 0, 0]);
        // one element of type T0
        bytes.extend_from_slice(&[1, 0, 0, 0, 0, 0, 0, 0]);
    }
    bytes.extend_from_slice(&[7, 0, 0, 0, 0, 0, 0, 0, 5, 0, 0, 0, 0, 0, 0, 0]);
    bytes
}

#[test]
fn nested_array_values() {
    let bytes = nested_arrays(2);
    let r = ByteReader::new(&bytes);

    assert_eq!(
        flow_value(&r, 0).unwrap(),
        "array_asset T0 [array_asset T0 [int32 5]]"
    );
}

#[test]
fn value_nesting_is_bounded() {
    let bytes = nested_arrays(10_000);
    let r = ByteReader::new(&bytes);

    assert!(matches!(
        flow_value(&r, 0),
        Err(ReadError::NestedTooDeeply(_))
    ));
}

#[test]
fn empty_program() {
    #[rustfmt::skip]
    let payload = [
        // document: flow definition at 12, no native actions
        12, 0, 0, 0,  0, 0, 0, 0,  0, 0, 0, 0,
        // flow definition: three empty arrays
        0, 0, 0, 0,  0, 0, 0, 0,
        0, 0, 0, 0,  0, 0, 0, 0,
        0, 0, 0, 0,  0, 0, 0, 0,
    ];
    let mut bytes = Header::new(ProjectType::Firmware, payload.len() as u32)
        .to_bytes()
        .to_vec();
    bytes.extend_from_slice(&payload);
    let program = Program::from_bytes(bytes).unwrap();

    assert_eq!(
        dump(&program).unwrap(),
        indoc! {"
            program firmware v3.0, 36 bytes

            constants:

            globals:
        "}
    );
}
