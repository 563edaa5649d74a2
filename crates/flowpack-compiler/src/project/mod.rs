//! Project object graph handed to the compiler.
//!
//! Deserialized from JSON with camelCase keys. The compiler only reads it.

mod component;
mod value_type;


use flowpack_bytecode::ProjectType;
use serde::Deserialize;

pub use component::{
    ButtonProps, CallActionProps, CommentProps, CompareOperator, CompareProps, Component,
    ComponentKind, CounterProps, CustomPort, DelayProps, ErrorProps, EvalExprProps, FlowEvent,
    InputProps, LoopProps, OnEventProps, OutputProps, SetVariableEntry, SetVariableProps,
    ShowPageProps, SwitchProps, SwitchTest, TextInputProps, TextProps, ValueProps, WatchProps,
};
pub use value_type::ValueType;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Project {
    pub settings: Settings,
    pub variables: ProjectVariables,
    pub styles: Vec<Style>,
    pub pages: Vec<Flow>,
    pub actions: Vec<Flow>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub project_type: ProjectKind,
    pub title: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProjectKind {
    #[default]
    Firmware,
    FirmwareModule,
    Resource,
    Applet,
    Dashboard,
    Lvgl,
}

impl From<ProjectKind> for ProjectType {
    fn from(kind: ProjectKind) -> Self {
        match kind {
            ProjectKind::Firmware => ProjectType::Firmware,
            ProjectKind::FirmwareModule => ProjectType::FirmwareModule,
            ProjectKind::Resource => ProjectType::Resource,
            ProjectKind::Applet => ProjectType::Applet,
            ProjectKind::Dashboard => ProjectType::Dashboard,
            ProjectKind::Lvgl => ProjectType::Lvgl,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectVariables {
    pub global_variables: Vec<Variable>,
    pub structures: Vec<Structure>,
    pub enums: Vec<EnumDef>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Variable {
    pub name: String,
    #[serde(rename = "type")]
    pub value_type: String,
    pub default_value: String,
    /// Only meaningful for user properties.
    pub assignable: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Structure {
    pub name: String,
    pub fields: Vec<StructField>,
}

impl Structure {
    pub fn field(&self, name: &str) -> Option<(usize, &StructField)> {
        self.fields.iter().enumerate().find(|(_, f)| f.name == name)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StructField {
    pub name: String,
    #[serde(rename = "type")]
    pub value_type: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EnumDef {
    pub name: String,
    pub members: Vec<EnumMember>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EnumMember {
    pub name: String,
    pub value: i32,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Style {
    pub name: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ImplementationType {
    #[default]
    Flow,
    Native,
}

/// A page or an action. Pages ignore `implementation_type`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Flow {
    pub name: String,
    pub implementation_type: ImplementationType,
    pub components: Vec<Component>,
    pub connection_lines: Vec<ConnectionLine>,
    pub local_variables: Vec<Variable>,
    pub user_properties: Vec<Variable>,
}

impl Flow {
    pub fn find_component(&self, obj_id: &str) -> Option<(usize, &Component)> {
        self.components
            .iter()
            .enumerate()
            .find(|(_, c)| c.obj_id == obj_id)
    }

    /// User properties first, then local variables, matching the runtime's
    /// local variable numbering.
    pub fn all_local_variables(&self) -> impl Iterator<Item = &Variable> {
        self.user_properties.iter().chain(&self.local_variables)
    }

    pub fn find_local_variable(&self, name: &str) -> Option<(usize, &Variable)> {
        self.all_local_variables()
            .enumerate()
            .find(|(_, v)| v.name == name)
    }

    /// Components of one kind in graph order (Input/Output slot numbering).
    pub fn components_where<'a>(
        &'a self,
        pred: impl Fn(&ComponentKind) -> bool + 'a,
    ) -> impl Iterator<Item = &'a Component> + 'a {
        self.components.iter().filter(move |c| pred(&c.kind))
    }

    pub fn is_native(&self) -> bool {
        self.implementation_type == ImplementationType::Native
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ConnectionLine {
    pub source: String,
    pub output: String,
    pub target: String,
    pub input: String,
}

impl Project {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn project_type(&self) -> ProjectType {
        self.settings.project_type.into()
    }

    pub fn find_action(&self, name: &str) -> Option<&Flow> {
        self.actions.iter().find(|a| a.name == name)
    }

    pub fn find_page(&self, name: &str) -> Option<(usize, &Flow)> {
        self.pages.iter().enumerate().find(|(_, p)| p.name == name)
    }

    pub fn find_style(&self, name: &str) -> Option<&Style> {
        self.styles.iter().find(|s| s.name == name)
    }

    pub fn find_global_variable(&self, name: &str) -> Option<(usize, &Variable)> {
        self.variables
            .global_variables
            .iter()
            .enumerate()
            .find(|(_, v)| v.name == name)
    }

    pub fn find_struct(&self, name: &str) -> Option<&Structure> {
        self.variables.structures.iter().find(|s| s.name == name)
    }

    pub fn find_enum(&self, name: &str) -> Option<&EnumDef> {
        self.variables.enums.iter().find(|e| e.name == name)
    }

    /// Actions implemented by the host rather than by a flow, in project order.
    pub fn native_actions(&self) -> impl Iterator<Item = &Flow> {
        self.actions.iter().filter(|a| a.is_native())
    }
}
