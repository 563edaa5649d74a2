//! Debugger-facing map from program indexes back to project objects.

use indexmap::IndexMap;
use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetsMap {
    pub project_type: String,
    pub flows: Vec<FlowMap>,
    pub constants: Vec<ConstantMap>,
    pub types: Vec<String>,
    pub styles: Vec<String>,
    pub global_variables: Vec<VariableMap>,
    pub native_actions: Vec<String>,
    /// CRC-32 of the payload that follows the header.
    pub payload_checksum: u32,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowMap {
    pub flow_index: usize,
    pub name: String,
    pub components: Vec<ComponentMap>,
    pub component_inputs: Vec<ComponentInputMap>,
    pub local_variables: Vec<VariableMap>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentMap {
    pub component_index: usize,
    #[serde(rename = "objID")]
    pub obj_id: String,
    pub component_type: String,
    pub input_indexes: IndexMap<String, usize>,
    pub property_indexes: IndexMap<String, usize>,
    pub outputs: Vec<OutputMap>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputMap {
    pub output_name: String,
    pub connection_lines: Vec<LineMap>,
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineMap {
    pub target_component_index: i32,
    pub target_input_index: i32,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentInputMap {
    pub input_index: usize,
    #[serde(rename = "objID")]
    pub obj_id: String,
    pub input_name: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstantMap {
    pub index: usize,
    pub value_type: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableMap {
    pub index: usize,
    pub name: String,
    #[serde(rename = "type")]
    pub value_type: String,
}

impl AssetsMap {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
