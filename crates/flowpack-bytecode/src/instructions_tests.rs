use super::*;

#[test]
fn kind_occupies_top_three_bits() {
    assert_eq!(Instruction::PushConstant(5).encode(), 5);
    assert_eq!(Instruction::PushInput(1).encode(), 0x2001);
    assert_eq!(Instruction::PushLocalVar(2).encode(), 0x4002);
    assert_eq!(Instruction::PushGlobalVar(3).encode(), 0x6003);
    assert_eq!(Instruction::PushOutput(0).encode(), 0x8000);
    assert_eq!(Instruction::ArrayElement.encode(), 0xA000);
    assert_eq!(Instruction::Operation(22).encode(), 0xC016);
    assert_eq!(Instruction::End.encode(), 0xE000);
}

#[test]
fn decode_inverts_encode() {
    let all = [
        Instruction::PushConstant(0),
        Instruction::PushInput(MAX_ARG),
        Instruction::PushLocalVar(17),
        Instruction::PushGlobalVar(4),
        Instruction::PushOutput(1),
        Instruction::ArrayElement,
        Instruction::Operation(89),
        Instruction::End,
    ];
    for instr in all {
        assert_eq!(Instruction::decode(instr.encode()), instr);
    }
}

#[test]
fn with_index_rejects_wide_arguments() {
    assert_eq!(
        Instruction::with_index(InstructionKind::PushConstant, 8191),
        Ok(Instruction::PushConstant(8191))
    );

    let err = Instruction::with_index(InstructionKind::PushConstant, 8192).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"PushConstant argument 8192 exceeds 8191");
}

#[test]
fn display_uses_mnemonics() {
    let text = [
        Instruction::PushConstant(3),
        Instruction::PushInput(0),
        Instruction::Operation(0),
        Instruction::ArrayElement,
        Instruction::End,
    ]
    .iter()
    .map(|i| i.to_string())
    .collect::<Vec<_>>()
    .join("\n");

    insta::assert_snapshot!(text, @r"
    push_const 3
    push_input 0
    op 0
    array_elem
    end
    ");
}

#[test]
fn decode_stream_stops_at_end() {
    let bytes = [0x01, 0x00, 0x00, 0xE0, 0xFF, 0xFF];
    let (instrs, used) = decode_stream(&bytes).unwrap();

    assert_eq!(instrs, vec![Instruction::PushConstant(1), Instruction::End]);
    assert_eq!(used, 4);
}

#[test]
fn decode_stream_without_end_is_none() {
    assert_eq!(decode_stream(&[0x01, 0x00]), None);
    assert_eq!(decode_stream(&[]), None);
}
