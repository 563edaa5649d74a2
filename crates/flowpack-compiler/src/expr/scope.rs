//! Name resolution for identifiers inside expressions.

use crate::component::Port;
use crate::project::{Flow, Project, ValueType, Variable};

/// Where an expression is evaluated.
///
/// Component-less scopes are used for variable defaults; flow-less scopes
/// for standalone expressions.
#[derive(Debug, Clone, Copy)]
pub struct Scope<'a> {
    pub flow_index: usize,
    pub flow: Option<&'a Flow>,
    pub obj_id: &'a str,
    pub inputs: &'a [Port],
    pub outputs: &'a [Port],
}

pub const INDEX_IDENTIFIER: &str = "$index";

#[derive(Debug, Clone, Copy)]
pub enum Resolved<'a> {
    Output { index: usize, port: &'a Port },
    Input { port: &'a Port },
    Local { index: usize, variable: &'a Variable },
    Global { index: usize, variable: &'a Variable },
    LoopIndex,
}

impl Resolved<'_> {
    pub fn value_type(&self) -> ValueType {
        match self {
            Self::Output { port, .. } | Self::Input { port } => port.value_type.clone(),
            Self::Local { variable, .. } | Self::Global { variable, .. } => {
                ValueType::parse(&variable.value_type).unwrap_or(ValueType::Any)
            }
            Self::LoopIndex => ValueType::Integer,
        }
    }
}

impl<'a> Scope<'a> {
    pub fn empty() -> Self {
        Self {
            flow_index: 0,
            flow: None,
            obj_id: "",
            inputs: &[],
            outputs: &[],
        }
    }

    pub fn flow(flow_index: usize, flow: &'a Flow) -> Self {
        Self {
            flow_index,
            flow: Some(flow),
            ..Self::empty()
        }
    }

    pub fn component(
        flow_index: usize,
        flow: &'a Flow,
        obj_id: &'a str,
        inputs: &'a [Port],
        outputs: &'a [Port],
    ) -> Self {
        Self {
            flow_index,
            flow: Some(flow),
            obj_id,
            inputs,
            outputs,
        }
    }

    /// Outputs (assignable only), inputs, locals, globals, then `$index`.
    pub fn resolve(&self, project: &'a Project, name: &str, assignable: bool) -> Option<Resolved<'a>> {
        if assignable
            && let Some((index, port)) = self.outputs.iter().enumerate().find(|(_, p)| p.name == name)
        {
            return Some(Resolved::Output { index, port });
        }
        if let Some(port) = self.inputs.iter().find(|p| p.name == name) {
            return Some(Resolved::Input { port });
        }
        if let Some((index, variable)) = self.flow.and_then(|f| f.find_local_variable(name)) {
            return Some(Resolved::Local { index, variable });
        }
        if let Some((index, variable)) = project.find_global_variable(name) {
            return Some(Resolved::Global { index, variable });
        }
        (name == INDEX_IDENTIFIER).then_some(Resolved::LoopIndex)
    }
}
