//! Per-flow component arena, structural checks and flow records.

use std::collections::HashMap;

use flowpack_bytecode::value::FLOW_VALUE_ALIGN;

use super::values;
use crate::assets::{Assets, LineMap, VariableMap, WidgetBinding};
use crate::component::{
    Descriptor, EncodeContext, Ports, Registry, build_ports, encode_component, missing_properties,
};
use crate::diagnostics::{DiagnosticKind, Diagnostics, Section};
use crate::project::{Component, ConnectionLine, Flow, Variable};
use crate::writer::{DataBuffer, WriterError};

#[derive(Debug)]
pub struct ArenaEntry<'p> {
    pub component: &'p Component,
    pub descriptor: Descriptor,
    pub ports: Ports,
}

/// Encodable components of one flow, in graph order, with `objID` lookup.
///
/// Comments are not part of the arena, so a line touching one resolves as
/// a line to an unknown component. When an `objID` repeats, lines resolve
/// to its first component.
#[derive(Debug)]
pub struct FlowArena<'p> {
    pub flow_index: usize,
    pub flow: &'p Flow,
    pub entries: Vec<ArenaEntry<'p>>,
    by_id: HashMap<&'p str, usize>,
}

impl<'p> FlowArena<'p> {
    pub fn new(
        assets: &Assets<'p>,
        registry: &Registry,
        flow_index: usize,
        flow: &'p Flow,
    ) -> Self {
        let project = assets.project();
        let entries: Vec<ArenaEntry<'p>> = flow
            .components
            .iter()
            .filter_map(|component| {
                let descriptor = *registry.descriptor(&component.kind);
                descriptor.encoded.then(|| ArenaEntry {
                    component,
                    descriptor,
                    ports: build_ports(project, component),
                })
            })
            .collect();
        let mut by_id = HashMap::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            by_id.entry(entry.component.obj_id.as_str()).or_insert(index);
        }

        Self {
            flow_index,
            flow,
            entries,
            by_id,
        }
    }

    pub fn index_of(&self, obj_id: &str) -> Option<usize> {
        self.by_id.get(obj_id).copied()
    }

    fn lines_from<'a>(
        &'a self,
        obj_id: &'a str,
        output: &'a str,
    ) -> impl Iterator<Item = &'p ConnectionLine> + 'a {
        self.flow
            .connection_lines
            .iter()
            .filter(move |line| line.source == obj_id && line.output == output)
    }

    /// Structural checks; everything found here is also encoded with a fallback.
    pub fn check(&self, diagnostics: &mut Diagnostics) {
        let flow_name = self.flow.name.as_str();

        for (index, entry) in self.entries.iter().enumerate() {
            let obj_id = entry.component.obj_id.as_str();

            if self.index_of(obj_id) != Some(index) {
                diagnostics
                    .report(DiagnosticKind::DuplicateObjectId, Section::Checks)
                    .message(obj_id)
                    .at(flow_name, Some(obj_id))
                    .emit();
            }

            let mut seen: Vec<&str> = Vec::new();
            for output in &entry.ports.outputs {
                if seen.contains(&output.name.as_str()) {
                    diagnostics
                        .report(DiagnosticKind::DuplicateOutput, Section::Checks)
                        .message(output.name.clone())
                        .at(flow_name, Some(obj_id))
                        .emit();
                } else {
                    seen.push(&output.name);
                }
            }

            for (property, message) in missing_properties(entry.component) {
                diagnostics
                    .report(DiagnosticKind::MissingProperty, Section::Checks)
                    .message(message)
                    .at(flow_name, Some(obj_id))
                    .property(property)
                    .emit();
            }

            for input in &entry.ports.inputs {
                if !input.sequence || input.optional {
                    continue;
                }
                let connected = self
                    .flow
                    .connection_lines
                    .iter()
                    .any(|line| line.target == obj_id && line.input == input.name);
                if !connected {
                    diagnostics
                        .report(DiagnosticKind::UnconnectedInput, Section::Checks)
                        .message(input.name.clone())
                        .at(flow_name, Some(obj_id))
                        .emit();
                }
            }
        }

        for line in &self.flow.connection_lines {
            self.check_line(line, diagnostics);
        }
    }

    fn check_line(&self, line: &ConnectionLine, diagnostics: &mut Diagnostics) {
        let flow_name = self.flow.name.as_str();
        let mut stale = |object: &str, message: String| {
            diagnostics
                .report(DiagnosticKind::StaleConnection, Section::Checks)
                .message(message)
                .at(flow_name, Some(object))
                .emit();
        };

        match self.index_of(&line.source) {
            None => stale(
                &line.source,
                format!("Connection line source '{}' not found", line.source),
            ),
            Some(source) if self.entries[source].ports.output_index(&line.output).is_none() => {
                stale(
                    &line.source,
                    format!("Output '{}' not found on '{}'", line.output, line.source),
                )
            }
            Some(_) => {}
        }

        match self.index_of(&line.target) {
            None => stale(
                &line.source,
                format!("Connection line target '{}' not found", line.target),
            ),
            Some(target) if self.entries[target].ports.input(&line.input).is_none() => stale(
                &line.target,
                format!("Input '{}' not found on '{}'", line.input, line.target),
            ),
            Some(_) => {}
        }
    }

    /// Connection targets of every built output of entry `index`.
    ///
    /// Registers each target input with the flow's input table on first use.
    fn line_maps(&self, assets: &mut Assets<'_>, index: usize) -> Vec<Vec<LineMap>> {
        let entry = &self.entries[index];
        entry
            .ports
            .outputs
            .iter()
            .map(|output| {
                self.lines_from(&entry.component.obj_id, &output.name)
                    .map(|line| self.line_map(assets, line))
                    .collect()
            })
            .collect()
    }

    fn line_map(&self, assets: &mut Assets<'_>, line: &ConnectionLine) -> LineMap {
        let Some(target) = self.index_of(&line.target) else {
            return LineMap {
                target_component_index: -1,
                target_input_index: -1,
            };
        };
        let entry = &self.entries[target];
        let input = entry.ports.input(&line.input).map(|port| {
            assets.component_input_index(
                self.flow_index,
                &entry.component.obj_id,
                &port.name,
                port.flags(),
            )
        });
        LineMap {
            target_component_index: to_i32(Some(target)),
            target_input_index: to_i32(input),
        }
    }
}

fn to_i32(index: Option<usize>) -> i32 {
    index.and_then(|i| i32::try_from(i).ok()).unwrap_or(-1)
}

fn to_i16(index: usize) -> i16 {
    i16::try_from(index).unwrap_or(-1)
}

/// Write one flow record.
pub fn write_flow<'p>(
    buf: &mut DataBuffer,
    assets: &mut Assets<'p>,
    diagnostics: &mut Diagnostics,
    arena: &FlowArena<'p>,
) -> Result<(), WriterError> {
    let flow = arena.flow;
    let flow_index = arena.flow_index;
    tracing::debug!(flow = %flow.name, components = arena.entries.len(), "encoding flow");

    let indexes: Vec<usize> = (0..arena.entries.len()).collect();
    let mut component_maps = Vec::with_capacity(indexes.len());
    buf.write_array(&indexes, |b, &index| {
        let lines = arena.line_maps(assets, index);
        let entry = &arena.entries[index];
        let mut ctx = EncodeContext {
            assets: &mut *assets,
            diagnostics: &mut *diagnostics,
            flow_index,
            flow,
            component: entry.component,
            component_index: index,
            ports: &entry.ports,
        };
        component_maps.push(encode_component(&mut ctx, &entry.descriptor, &lines, b));
    });

    let locals: Vec<&Variable> = flow.all_local_variables().collect();
    buf.write_array_aligned(&locals, FLOW_VALUE_ALIGN, |b, variable| {
        values::write_variable(b, assets, diagnostics, Some(flow), variable);
    });

    let inputs = buf.reserve_number_array();

    let write_binding = |b: &mut DataBuffer, binding: &WidgetBinding| {
        b.write_i16(to_i16(binding.component));
        b.write_i16(to_i16(binding.slot));
    };
    let state = assets.flow_state(flow_index);
    buf.write_array(&state.widget_data_items(), write_binding);
    buf.write_array(&state.widget_actions(), write_binding);

    let assignable: Vec<u8> = flow
        .user_properties
        .iter()
        .map(|p| u8::from(p.assignable))
        .collect();
    buf.write_number_array(&assignable, |b, flag| b.write_u8(*flag));

    let flags = state.component_input_flags();
    buf.fill_array(inputs, &flags, |b, flag| b.write_u8(*flag))?;

    let flow_map = &mut assets.map.flows[flow_index];
    flow_map.components = component_maps;
    flow_map.local_variables = locals
        .iter()
        .enumerate()
        .map(|(index, variable)| VariableMap {
            index,
            name: variable.name.clone(),
            value_type: variable.value_type.clone(),
        })
        .collect();
    Ok(())
}
