//! Generic component header, shared by every kind.
//!
//! Layout, in write order: type, reserved, inputs, properties, outputs,
//! error-catch output, then the kind's payload.

use flowpack_bytecode::{ComponentType, Instruction};
use indexmap::IndexMap;

use super::ports::{ERROR_OUT, Ports, SEQ_OUT};
use super::properties::{Property, PropertyMode, properties};
use super::registry::Descriptor;
use crate::assets::{ActionRef, Assets, ComponentMap, LineMap, OutputMap};
use crate::diagnostics::{DiagnosticBuilder, DiagnosticKind, Diagnostics, Section};
use crate::expr::{
    ExprError, Scope, build_assignable_expression, build_expression, template_to_expression,
};
use crate::project::{Component, Flow, ValueType};
use crate::writer::DataBuffer;

/// Everything a payload encoder may touch while one component is written.
pub struct EncodeContext<'e, 'p> {
    pub assets: &'e mut Assets<'p>,
    pub diagnostics: &'e mut Diagnostics,
    pub flow_index: usize,
    pub flow: &'p Flow,
    pub component: &'p Component,
    /// Index of the component in its flow's component table.
    pub component_index: usize,
    pub ports: &'e Ports,
}

impl<'e, 'p> EncodeContext<'e, 'p> {
    /// Start a diagnostic located at the current component.
    pub fn report(&mut self, kind: DiagnosticKind, section: Section) -> DiagnosticBuilder<'_> {
        self.diagnostics
            .report(kind, section)
            .at(&self.flow.name, Some(&self.component.obj_id))
    }

    fn report_expression(&mut self, property: &str, text: &str, err: &ExprError) {
        err.report(self.diagnostics, text)
            .at(&self.flow.name, Some(&self.component.obj_id))
            .property(property)
            .emit();
    }

    /// Compile a value expression, or report and fall back to a bare `END`.
    pub fn expression(&mut self, property: &str, text: &str, expected: &ValueType) -> Vec<Instruction> {
        let scope = Scope::component(
            self.flow_index,
            self.flow,
            &self.component.obj_id,
            &self.ports.inputs,
            &self.ports.outputs,
        );
        match build_expression(self.assets, scope, text, expected) {
            Ok(instructions) => instructions,
            Err(err) => {
                self.report_expression(property, text, &err);
                vec![Instruction::End]
            }
        }
    }

    /// Compile a write target, or report and fall back to a bare `END`.
    pub fn assignable(&mut self, property: &str, text: &str) -> Vec<Instruction> {
        let scope = Scope::component(
            self.flow_index,
            self.flow,
            &self.component.obj_id,
            &self.ports.inputs,
            &self.ports.outputs,
        );
        match build_assignable_expression(self.assets, scope, text) {
            Ok(instructions) => instructions,
            Err(err) => {
                self.report_expression(property, text, &err);
                vec![Instruction::End]
            }
        }
    }

    fn template(&mut self, property: &str, text: &str, expected: &ValueType) -> Vec<Instruction> {
        match template_to_expression(text) {
            Ok(converted) => self.expression(property, &converted, expected),
            Err(err) => {
                self.report_expression(property, text, &err);
                vec![Instruction::End]
            }
        }
    }

    fn property(&mut self, property: &Property<'_>) -> Vec<Instruction> {
        if property.hidden {
            return vec![Instruction::End];
        }
        match property.mode {
            PropertyMode::Value => self.expression(property.name, property.text, &property.expected),
            PropertyMode::Assignable => self.assignable(property.name, property.text),
            PropertyMode::Template => self.template(property.name, property.text, &property.expected),
        }
    }

    /// Narrow an index to `i16`; `None` and overflow both encode as `-1`.
    pub fn index_i16(&mut self, property: &str, index: Option<usize>) -> i16 {
        let Some(index) = index else {
            return -1;
        };
        i16::try_from(index).unwrap_or_else(|_| {
            self.report(DiagnosticKind::IndexOverflow, Section::Build)
                .message(format!("index {index} does not fit 16 bits"))
                .property(property)
                .emit();
            -1
        })
    }

    pub fn index_u16(&mut self, property: &str, index: usize) -> u16 {
        u16::try_from(index).unwrap_or_else(|_| {
            self.report(DiagnosticKind::IndexOverflow, Section::Build)
                .message(format!("index {index} does not fit 16 bits"))
                .property(property)
                .emit();
            0
        })
    }

    /// Style index, `-1` when unset or unknown.
    pub fn style(&mut self, property: &str, name: &str) -> i16 {
        if name.is_empty() {
            return -1;
        }
        let index = self.assets.style_index(name);
        if index.is_none() {
            self.report(DiagnosticKind::UnresolvedReference, Section::Build)
                .message(format!("Style '{name}' not found"))
                .property(property)
                .emit();
        }
        self.index_i16(property, index)
    }

    /// Page flow index, `-1` when unset or unknown.
    pub fn page(&mut self, property: &str, name: &str) -> i16 {
        if name.is_empty() {
            return -1;
        }
        let index = self.assets.page_index(name);
        if index.is_none() {
            self.report(DiagnosticKind::UnresolvedReference, Section::Build)
                .message(format!("Page '{name}' not found"))
                .property(property)
                .emit();
        }
        self.index_i16(property, index)
    }

    /// Flow index a call to `name` goes through, `-1` when it cannot be called.
    pub fn action(&mut self, property: &str, name: &str) -> i16 {
        if name.is_empty() {
            return -1;
        }
        let index = match self.assets.action_ref(name) {
            Some(ActionRef::Flow(index)) => Some(index),
            Some(ActionRef::Native(native)) => {
                let index = self.assets.native_flow_index(native);
                if index.is_none() {
                    self.report(DiagnosticKind::UnresolvedReference, Section::Build)
                        .message(format!("Native action '{name}' is only callable in a files build"))
                        .property(property)
                        .emit();
                }
                index
            }
            None => {
                self.report(DiagnosticKind::UnresolvedReference, Section::Build)
                    .message(format!("Action '{name}' not found"))
                    .property(property)
                    .emit();
                None
            }
        };
        self.index_i16(property, index)
    }
}

/// Instruction stream as unaligned `u16` words.
pub fn write_instructions(buf: &mut DataBuffer, instructions: &[Instruction]) {
    for instr in instructions {
        buf.write_u16_non_aligned(instr.encode());
    }
}

/// Write the header and payload of `ctx.component`.
///
/// `lines` holds, per built output, the already resolved connection targets.
pub fn encode_component(
    ctx: &mut EncodeContext<'_, '_>,
    descriptor: &Descriptor,
    lines: &[Vec<LineMap>],
    buf: &mut DataBuffer,
) -> ComponentMap {
    let project_type = ctx.assets.project().project_type();
    let component_type = if descriptor.supports(project_type) {
        descriptor.component_type
    } else {
        let target = project_type.name();
        ctx.report(DiagnosticKind::UnsupportedComponent, Section::Build)
            .message(format!("{} on {target}", descriptor.name))
            .emit();
        ComponentType::Unsupported
    };
    buf.write_u16(component_type.id());
    buf.write_u16(u16::from(ctx.component.breakpoint));

    let mut input_indexes = IndexMap::new();
    let mut inputs = Vec::with_capacity(ctx.ports.inputs.len());
    for port in &ctx.ports.inputs {
        let index = ctx.assets.component_input_index(
            ctx.flow_index,
            &ctx.component.obj_id,
            &port.name,
            port.flags(),
        );
        input_indexes.insert(port.name.clone(), index);
        inputs.push(index);
    }
    let inputs: Vec<u16> = inputs
        .into_iter()
        .map(|index| ctx.index_u16("inputs", index))
        .collect();
    buf.write_number_array(&inputs, |b, index| b.write_u16(*index));

    let component = ctx.component;
    let mut property_indexes = IndexMap::new();
    let mut streams = Vec::new();
    for (index, property) in properties(component).iter().enumerate() {
        property_indexes.insert(property.name.to_string(), index);
        streams.push(ctx.property(property));
    }
    buf.write_array(&streams, |b, stream| write_instructions(b, stream));

    let outputs: Vec<(u32, &[LineMap])> = ctx
        .ports
        .outputs
        .iter()
        .enumerate()
        .map(|(i, port)| {
            let lines = lines.get(i).map_or(&[][..], Vec::as_slice);
            (u32::from(port.name == SEQ_OUT), lines)
        })
        .collect();
    buf.write_array(&outputs, |b, (is_seq, lines)| {
        b.write_array(*lines, |lb, line| {
            lb.write_i16(narrow_line_index(line.target_component_index));
            lb.write_i16(narrow_line_index(line.target_input_index));
        });
        b.write_u32(*is_seq);
    });

    let catch = ctx
        .ports
        .output_index(ERROR_OUT)
        .and_then(|i| i16::try_from(i).ok())
        .unwrap_or(-1);
    buf.write_i16(catch);
    buf.write_u16(0);

    if let Some(payload) = descriptor.payload {
        payload(ctx, buf);
    }

    tracing::trace!(
        obj_id = %ctx.component.obj_id,
        kind = descriptor.name,
        "component encoded"
    );

    ComponentMap {
        component_index: ctx.component_index,
        obj_id: ctx.component.obj_id.clone(),
        component_type: descriptor.name.to_string(),
        input_indexes,
        property_indexes,
        outputs: ctx
            .ports
            .outputs
            .iter()
            .enumerate()
            .map(|(i, port)| OutputMap {
                output_name: port.name.clone(),
                connection_lines: lines.get(i).cloned().unwrap_or_default(),
            })
            .collect(),
    }
}

fn narrow_line_index(index: i32) -> i16 {
    i16::try_from(index).unwrap_or(-1)
}
