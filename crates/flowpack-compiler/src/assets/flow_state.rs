//! Per-flow index tables filled while the flow's components are encoded.

use indexmap::IndexMap;

const PATH_SEPARATOR: &str = "//";

/// Runtime flags of one component input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputFlags {
    pub sequence: bool,
    pub optional: bool,
}

impl InputFlags {
    const SEQUENCE: u8 = 1 << 0;
    const OPTIONAL: u8 = 1 << 1;

    pub fn bits(self) -> u8 {
        let mut bits = 0;
        if self.sequence {
            bits |= Self::SEQUENCE;
        }
        if self.optional {
            bits |= Self::OPTIONAL;
        }
        bits
    }
}

/// A widget property or output bound to a component slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidgetBinding {
    pub component: usize,
    /// Property index for data items, output index for actions.
    pub slot: usize,
}

#[derive(Debug, Clone, Default)]
pub struct FlowState {
    component_inputs: IndexMap<String, InputFlags>,
    widget_data_items: IndexMap<String, WidgetBinding>,
    widget_actions: IndexMap<String, WidgetBinding>,
}

fn path(obj_id: &str, name: &str) -> String {
    format!("{obj_id}{PATH_SEPARATOR}{name}")
}

impl FlowState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn component_input_index(&mut self, obj_id: &str, input: &str, flags: InputFlags) -> usize {
        let (index, _) = self
            .component_inputs
            .insert_full(path(obj_id, input), flags);
        index
    }

    pub fn find_component_input_index(&self, obj_id: &str, input: &str) -> Option<usize> {
        self.component_inputs.get_index_of(&path(obj_id, input))
    }

    pub fn component_inputs(&self) -> impl Iterator<Item = (&str, InputFlags)> {
        self.component_inputs.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn component_input_flags(&self) -> Vec<u8> {
        self.component_inputs.values().map(|f| f.bits()).collect()
    }

    pub fn widget_data_item_index(
        &mut self,
        obj_id: &str,
        property: &str,
        binding: WidgetBinding,
    ) -> usize {
        let (index, _) = self
            .widget_data_items
            .insert_full(path(obj_id, property), binding);
        index
    }

    pub fn widget_action_index(
        &mut self,
        obj_id: &str,
        property: &str,
        binding: WidgetBinding,
    ) -> usize {
        let (index, _) = self
            .widget_actions
            .insert_full(path(obj_id, property), binding);
        index
    }

    pub fn widget_data_items(&self) -> Vec<WidgetBinding> {
        self.widget_data_items.values().copied().collect()
    }

    pub fn widget_actions(&self) -> Vec<WidgetBinding> {
        self.widget_actions.values().copied().collect()
    }
}
