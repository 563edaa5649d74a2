//! Human-readable program dump for debugging.
//!
//! Walks the payload through relative offsets, so a dump that completes is
//! also a structural check of the program.

use std::fmt::Write as _;

use crate::component_type::ComponentType;
use crate::instructions::{Instruction, decode_stream};
use crate::operations;
use crate::program::Program;
use crate::reader::{ByteReader, ReadError};
use crate::value::{FLOW_VALUE_SIZE, FlowValueType};

/// Byte offsets of the fixed part of each record.
mod layout {
    pub const DOC_FLOW_DEFINITION: usize = 0;
    pub const DOC_NATIVE_ACTIONS: usize = 4;

    pub const DEF_FLOWS: usize = 0;
    pub const DEF_CONSTANTS: usize = 8;
    pub const DEF_GLOBALS: usize = 16;

    pub const FLOW_COMPONENTS: usize = 0;
    pub const FLOW_LOCALS: usize = 8;
    pub const FLOW_INPUTS: usize = 16;
    pub const FLOW_DATA_ITEMS: usize = 24;
    pub const FLOW_WIDGET_ACTIONS: usize = 32;
    pub const FLOW_USER_PROPERTIES: usize = 40;

    pub const COMP_TYPE: usize = 0;
    pub const COMP_RESERVED: usize = 2;
    pub const COMP_INPUTS: usize = 4;
    pub const COMP_PROPERTIES: usize = 12;
    pub const COMP_OUTPUTS: usize = 20;
    pub const COMP_CATCH_OUTPUT: usize = 28;
    pub const COMP_PAYLOAD: usize = 32;

    pub const OUTPUT_LINES: usize = 0;
    pub const OUTPUT_IS_SEQ: usize = 8;
}

pub use layout::*;

/// Dump an entire program.
pub fn dump(program: &Program) -> Result<String, ReadError> {
    let r = program.reader();
    let mut out = String::new();

    let _ = writeln!(
        out,
        "program {} v{}.{}, {} bytes",
        program.project_type().name(),
        program.header().major,
        program.header().minor,
        r.len()
    );

    let def = r.offset(DOC_FLOW_DEFINITION)?;

    out.push_str("\nconstants:\n");
    for (i, pos) in r.object_array(def + DEF_CONSTANTS)?.into_iter().enumerate() {
        let _ = writeln!(out, "  C{i} {}", flow_value(&r, pos)?);
    }

    out.push_str("\nglobals:\n");
    for (i, pos) in r.object_array(def + DEF_GLOBALS)?.into_iter().enumerate() {
        let _ = writeln!(out, "  G{i} {}", flow_value(&r, pos)?);
    }

    for (i, flow) in r.object_array(def + DEF_FLOWS)?.into_iter().enumerate() {
        dump_flow(&mut out, &r, i, flow)?;
    }

    let natives = r.object_array(DOC_NATIVE_ACTIONS)?;
    if !natives.is_empty() {
        out.push_str("\nnative actions:\n");
        for (i, pos) in natives.into_iter().enumerate() {
            let _ = writeln!(out, "  A{i} {}", r.c_str(pos)?);
        }
    }

    Ok(out)
}

/// Disassemble one instruction stream, one instruction per line.
pub fn dump_expression(bytes: &[u8]) -> String {
    let Some((instrs, _)) = decode_stream(bytes) else {
        return "<unterminated>".to_string();
    };
    instrs
        .iter()
        .map(|i| instruction_text(*i))
        .collect::<Vec<_>>()
        .join("\n")
}

fn instruction_text(instr: Instruction) -> String {
    match instr {
        Instruction::Operation(index) => match operations::by_index(index) {
            Some(op) => format!("{instr} ({})", op.name),
            None => format!("{instr} (?)"),
        },
        _ => instr.to_string(),
    }
}

fn inline_expression(r: &ByteReader<'_>, pos: usize) -> Result<String, ReadError> {
    let tail = r.bytes(pos, r.len() - pos)?;
    let Some((instrs, _)) = decode_stream(tail) else {
        return Ok("<unterminated>".to_string());
    };
    Ok(instrs
        .iter()
        .map(|i| instruction_text(*i))
        .collect::<Vec<_>>()
        .join("; "))
}

fn dump_flow(
    out: &mut String,
    r: &ByteReader<'_>,
    index: usize,
    flow: usize,
) -> Result<(), ReadError> {
    let _ = writeln!(out, "\nflow {index}:");

    let locals = r.object_array(flow + FLOW_LOCALS)?;
    if !locals.is_empty() {
        out.push_str("  locals:\n");
        for (i, pos) in locals.into_iter().enumerate() {
            let _ = writeln!(out, "    L{i} {}", flow_value(r, pos)?);
        }
    }

    let inputs = r.number_array(flow + FLOW_INPUTS)?;
    if inputs.count > 0 {
        out.push_str("  inputs:\n");
        for i in 0..inputs.count {
            let flags = r.u8(inputs.start + i)?;
            let _ = writeln!(out, "    I{i}{}", input_flags(flags));
        }
    }

    out.push_str("  components:\n");
    for (i, pos) in r.object_array(flow + FLOW_COMPONENTS)?.into_iter().enumerate() {
        dump_component(out, r, i, pos)?;
    }

    for (label, field) in [
        ("data items", FLOW_DATA_ITEMS),
        ("widget actions", FLOW_WIDGET_ACTIONS),
    ] {
        let items = r.object_array(flow + field)?;
        if items.is_empty() {
            continue;
        }
        let _ = writeln!(out, "  {label}:");
        for (i, pos) in items.into_iter().enumerate() {
            let _ = writeln!(out, "    {i}: [{}] #{}", r.i16(pos)?, r.i16(pos + 2)?);
        }
    }

    let user = r.number_array(flow + FLOW_USER_PROPERTIES)?;
    if user.count > 0 {
        let flags = (0..user.count)
            .map(|i| r.u8(user.start + i).map(|b| b.to_string()))
            .collect::<Result<Vec<_>, _>>()?;
        let _ = writeln!(out, "  user properties assignable: {}", flags.join(" "));
    }

    Ok(())
}

fn input_flags(flags: u8) -> String {
    let mut s = String::new();
    if flags & 1 != 0 {
        s.push_str(" seq");
    }
    if flags & 2 != 0 {
        s.push_str(" optional");
    }
    s
}

fn dump_component(
    out: &mut String,
    r: &ByteReader<'_>,
    index: usize,
    pos: usize,
) -> Result<(), ReadError> {
    let type_id = r.u16(pos + COMP_TYPE)?;
    let name = ComponentType::from_id(type_id).map_or("?", |t| t.name());
    let breakpoint = if r.u16(pos + COMP_RESERVED)? != 0 {
        " (breakpoint)"
    } else {
        ""
    };
    let _ = writeln!(out, "    [{index}] {name}{breakpoint}");

    let inputs = r.number_array(pos + COMP_INPUTS)?;
    if inputs.count > 0 {
        let list = (0..inputs.count)
            .map(|i| r.u16(inputs.start + i * 2).map(|v| format!("I{v}")))
            .collect::<Result<Vec<_>, _>>()?;
        let _ = writeln!(out, "        in: {}", list.join(" "));
    }

    for (i, prop) in r.object_array(pos + COMP_PROPERTIES)?.into_iter().enumerate() {
        let _ = writeln!(out, "        prop {i}: {}", inline_expression(r, prop)?);
    }

    for (i, output) in r.object_array(pos + COMP_OUTPUTS)?.into_iter().enumerate() {
        let seq = if r.u32(output + OUTPUT_IS_SEQ)? != 0 {
            " seq"
        } else {
            ""
        };
        let targets = r
            .object_array(output + OUTPUT_LINES)?
            .into_iter()
            .map(|line| {
                let component = r.i16(line)?;
                let input = r.i16(line + 2)?;
                Ok(format!("[{component}]:I{input}"))
            })
            .collect::<Result<Vec<_>, ReadError>>()?;
        let _ = writeln!(out, "        out {i}{seq} -> {}", targets.join(" "));
    }

    let catch = r.i16(pos + COMP_CATCH_OUTPUT)?;
    if catch >= 0 {
        let _ = writeln!(out, "        catch error -> out {catch}");
    }

    if let Some(payload) = payload_summary(r, type_id, pos + COMP_PAYLOAD)? {
        let _ = writeln!(out, "        {payload}");
    }
    Ok(())
}

fn payload_summary(
    r: &ByteReader<'_>,
    type_id: u16,
    pos: usize,
) -> Result<Option<String>, ReadError> {
    let Some(ty) = ComponentType::from_id(type_id) else {
        return Ok(None);
    };
    let text = match ty {
        ComponentType::Input | ComponentType::Output => format!("slot {}", r.u8(pos)?),
        ComponentType::Constant => format!("value C{}", r.u16(pos)?),
        ComponentType::CallAction => format!(
            "flow {} inputs@{} outputs@{}",
            r.i16(pos)?,
            r.u8(pos + 2)?,
            r.u8(pos + 3)?
        ),
        ComponentType::ShowPage => format!("page {}", r.i16(pos)?),
        ComponentType::OnEvent => format!("event {}", r.u8(pos)?),
        ComponentType::Compare => format!("condition: {}", inline_expression(r, r.offset(pos)?)?),
        ComponentType::SetVariable => {
            let entries = r
                .object_array(pos)?
                .into_iter()
                .map(|e| {
                    Ok(format!(
                        "{} <- {}",
                        inline_expression(r, r.offset(e)?)?,
                        inline_expression(r, r.offset(e + 4)?)?
                    ))
                })
                .collect::<Result<Vec<_>, ReadError>>()?;
            format!("set: {}", entries.join(" | "))
        }
        ComponentType::Switch => {
            let tests = r
                .object_array(pos)?
                .into_iter()
                .map(|t| {
                    Ok(format!(
                        "out {} when {}",
                        r.u32(t)?,
                        inline_expression(r, r.offset(t + 4)?)?
                    ))
                })
                .collect::<Result<Vec<_>, ReadError>>()?;
            format!("tests: {}", tests.join(" | "))
        }
        ComponentType::Text => format!("style {}", r.i16(pos)?),
        ComponentType::Button => format!(
            "style {} action {} widget action {}",
            r.i16(pos)?,
            r.i16(pos + 2)?,
            r.u16(pos + 4)?
        ),
        ComponentType::TextInput => format!("style {} data item {}", r.i16(pos)?, r.u16(pos + 2)?),
        _ => return Ok(None),
    };
    Ok(Some(text))
}

/// Array nesting limit when rendering values.
pub const MAX_VALUE_DEPTH: usize = 32;

/// Render one flow value.
pub fn flow_value(r: &ByteReader<'_>, pos: usize) -> Result<String, ReadError> {
    nested_value(r, pos, 0)
}

fn nested_value(r: &ByteReader<'_>, pos: usize, depth: usize) -> Result<String, ReadError> {
    if depth > MAX_VALUE_DEPTH {
        return Err(ReadError::NestedTooDeeply(pos));
    }
    let code = r.u8(pos)?;
    let Some(ty) = FlowValueType::from_u8(code) else {
        return Ok(format!("type{code}"));
    };
    let union = pos + 8;
    let text = match ty {
        FlowValueType::Undefined | FlowValueType::Null => return Ok(ty.name().to_string()),
        FlowValueType::Boolean => (r.u32(union)? != 0).to_string(),
        FlowValueType::Int32 | FlowValueType::Json => r.i32(union)?.to_string(),
        FlowValueType::Uint32 => r.u32(union)?.to_string(),
        FlowValueType::Float => r.f32(union)?.to_string(),
        FlowValueType::Double | FlowValueType::Date => r.f64(union)?.to_string(),
        FlowValueType::StringAsset => format!("{:?}", r.c_str(r.offset(union)?)?),
        FlowValueType::ArrayAsset => {
            let array = r.offset(union)?;
            let size = r.u32(array)? as usize;
            let type_index = r.u32(array + 4)?;
            let elements = (0..size)
                .map(|i| nested_value(r, array + 8 + i * FLOW_VALUE_SIZE, depth + 1))
                .collect::<Result<Vec<_>, _>>()?;
            format!("T{type_index} [{}]", elements.join(", "))
        }
        _ => format!("{:02x?}", r.bytes(union, 8)?),
    };
    Ok(format!("{} {text}", ty.name()))
}

#[cfg(test)]
#[path = "dump_tests.rs"]
mod dump_tests;
