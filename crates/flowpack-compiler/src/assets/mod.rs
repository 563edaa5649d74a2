//! Asset index tables.
//!
//! Every table is lookup-or-append: the first use of a key fixes its index
//! for the rest of the compile pass. `-1` (or `None`) means "absent".

mod constants;
mod flow_state;
mod map;
mod types;

#[cfg(test)]
mod assets_tests;

use indexmap::IndexSet;

use crate::BuildMode;
use crate::diagnostics::{DiagnosticKind, Diagnostics, Section};
use crate::project::{Flow, Project, ValueType};

pub use constants::{Constant, ConstantTable, Value};
pub use flow_state::{FlowState, InputFlags, WidgetBinding};
pub use map::{
    AssetsMap, ComponentInputMap, ComponentMap, ConstantMap, FlowMap, LineMap, OutputMap,
    VariableMap,
};
pub use types::TypeTable;

/// Where a named action lives at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionRef {
    /// Flow-implemented action, by flow index.
    Flow(usize),
    /// Host-implemented action, by position in the native action table.
    Native(usize),
}

#[derive(Debug)]
pub struct Assets<'p> {
    project: &'p Project,
    mode: BuildMode,
    pub(crate) constants: ConstantTable,
    pub(crate) types: TypeTable,
    flows: Vec<&'p Flow>,
    flow_states: Vec<FlowState>,
    native_actions: Vec<&'p Flow>,
    styles: IndexSet<String>,
    pub(crate) map: AssetsMap,
}

impl<'p> Assets<'p> {
    /// Register flows: pages in project order, then flow-implemented actions.
    pub fn new(project: &'p Project, mode: BuildMode) -> Self {
        let flows: Vec<&Flow> = project
            .pages
            .iter()
            .chain(project.actions.iter().filter(|a| !a.is_native()))
            .collect();
        let native_actions: Vec<&Flow> = project.native_actions().collect();

        let map = AssetsMap {
            project_type: project.project_type().name().to_string(),
            flows: flows
                .iter()
                .enumerate()
                .map(|(flow_index, flow)| FlowMap {
                    flow_index,
                    name: flow.name.clone(),
                    ..FlowMap::default()
                })
                .collect(),
            ..AssetsMap::default()
        };

        Self {
            project,
            mode,
            constants: ConstantTable::new(),
            types: TypeTable::new(),
            flow_states: vec![FlowState::new(); flows.len()],
            flows,
            native_actions,
            styles: IndexSet::new(),
            map,
        }
    }

    pub fn project(&self) -> &'p Project {
        self.project
    }

    pub fn mode(&self) -> BuildMode {
        self.mode
    }

    pub fn constant_index(&mut self, value: Value, value_type: ValueType) -> usize {
        self.constants.intern(value, value_type)
    }

    pub fn type_index(&mut self, ty: &ValueType) -> i32 {
        self.types
            .index(self.project, ty)
            .map_or(-1, |i| i as i32)
    }

    pub fn flows(&self) -> &[&'p Flow] {
        &self.flows
    }

    pub fn flow_index(&self, name: &str) -> Option<usize> {
        self.flows.iter().position(|f| f.name == name)
    }

    /// Pages occupy the first flow slots, so a page index is its flow index.
    pub fn page_index(&self, name: &str) -> Option<usize> {
        self.project.find_page(name).map(|(index, _)| index)
    }

    pub fn action_ref(&self, name: &str) -> Option<ActionRef> {
        if let Some(index) = self.native_actions.iter().position(|a| a.name == name) {
            return Some(ActionRef::Native(index));
        }
        let position = self
            .project
            .actions
            .iter()
            .filter(|a| !a.is_native())
            .position(|a| a.name == name)?;
        Some(ActionRef::Flow(self.project.pages.len() + position))
    }

    /// Flow index a native action is called through, when the target can call it.
    pub fn native_flow_index(&self, native: usize) -> Option<usize> {
        (self.mode == BuildMode::BuildFiles).then_some(self.flows.len() + native)
    }

    /// Native action names, as written into the document table.
    pub fn native_action_names(&self) -> Vec<&'p str> {
        if self.mode != BuildMode::BuildFiles {
            return Vec::new();
        }
        self.native_actions.iter().map(|a| a.name.as_str()).collect()
    }

    /// Index among referenced styles, in first-use order.
    pub fn style_index(&mut self, name: &str) -> Option<usize> {
        self.project.find_style(name)?;
        let (index, _) = self.styles.insert_full(name.to_string());
        Some(index)
    }

    pub fn flow_state(&self, flow: usize) -> &FlowState {
        &self.flow_states[flow]
    }

    pub fn flow_state_mut(&mut self, flow: usize) -> &mut FlowState {
        &mut self.flow_states[flow]
    }

    pub fn component_input_index(
        &mut self,
        flow: usize,
        obj_id: &str,
        input: &str,
        flags: InputFlags,
    ) -> usize {
        self.flow_states[flow].component_input_index(obj_id, input, flags)
    }

    pub fn report_unused_assets(&self, diagnostics: &mut Diagnostics) {
        for style in &self.project.styles {
            if !self.styles.contains(&style.name) {
                diagnostics
                    .report(DiagnosticKind::UnusedAsset, Section::Build)
                    .message(format!("Unused style: {}", style.name))
                    .emit();
            }
        }
    }

    /// Complete the map with the pool tables once every flow is encoded.
    pub fn finalize_map(&mut self) -> AssetsMap {
        let mut map = std::mem::take(&mut self.map);

        map.constants = self
            .constants
            .iter()
            .enumerate()
            .map(|(index, c)| ConstantMap {
                index,
                value_type: c.value_type.to_string(),
                value: c.value.to_string(),
            })
            .collect();
        map.types = self.types.signatures().map(str::to_string).collect();
        map.styles = self.styles.iter().cloned().collect();
        map.global_variables = self
            .project
            .variables
            .global_variables
            .iter()
            .enumerate()
            .map(|(index, v)| VariableMap {
                index,
                name: v.name.clone(),
                value_type: v.value_type.clone(),
            })
            .collect();
        map.native_actions = self
            .native_action_names()
            .into_iter()
            .map(str::to_string)
            .collect();

        for (flow_index, state) in self.flow_states.iter().enumerate() {
            let inputs: Vec<ComponentInputMap> = state
                .component_inputs()
                .enumerate()
                .map(|(input_index, (path, _))| {
                    let (obj_id, input_name) = path.split_once("//").unwrap_or((path, ""));
                    ComponentInputMap {
                        input_index,
                        obj_id: obj_id.to_string(),
                        input_name: input_name.to_string(),
                    }
                })
                .collect();
            map.flows[flow_index].component_inputs = inputs;
        }

        map
    }
}
