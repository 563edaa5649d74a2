//! Built inputs and outputs of a component.
//!
//! The port list depends on current property values (Switch tests, the
//! CallAction callee), so it is recomputed here and shared by the checker
//! and the encoder.

use crate::assets::InputFlags;
use crate::project::{Component, ComponentKind, Flow, Project, ValueType};

pub const SEQ_IN: &str = "@seqin";
pub const SEQ_OUT: &str = "@seqout";
pub const ERROR_OUT: &str = "@error";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Port {
    pub name: String,
    pub value_type: ValueType,
    pub sequence: bool,
    pub optional: bool,
}

impl Port {
    pub fn seq(name: &str) -> Self {
        Self {
            name: name.to_string(),
            value_type: ValueType::Null,
            sequence: true,
            optional: false,
        }
    }

    pub fn data(name: &str, value_type: ValueType) -> Self {
        Self {
            name: name.to_string(),
            value_type,
            sequence: false,
            optional: false,
        }
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn with_type(mut self, value_type: ValueType) -> Self {
        self.value_type = value_type;
        self
    }

    pub fn flags(&self) -> InputFlags {
        InputFlags {
            sequence: self.sequence,
            optional: self.optional,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ports {
    pub inputs: Vec<Port>,
    pub outputs: Vec<Port>,
}

impl Ports {
    pub fn input_index(&self, name: &str) -> Option<usize> {
        self.inputs.iter().position(|p| p.name == name)
    }

    pub fn output_index(&self, name: &str) -> Option<usize> {
        self.outputs.iter().position(|p| p.name == name)
    }

    pub fn input(&self, name: &str) -> Option<&Port> {
        self.inputs.iter().find(|p| p.name == name)
    }
}

fn parse_type(signature: &str) -> ValueType {
    ValueType::parse(signature).unwrap_or(ValueType::Any)
}

/// Ports of `component` as currently configured.
pub fn build_ports(project: &Project, component: &Component) -> Ports {
    let opt_seq_in = || Port::seq(SEQ_IN).optional();
    let opt_seq_out = || Port::seq(SEQ_OUT).optional();

    let (mut inputs, mut outputs) = match &component.kind {
        ComponentKind::Start => (vec![], vec![Port::seq(SEQ_OUT)]),
        ComponentKind::End | ComponentKind::Output(_) => (vec![Port::seq(SEQ_IN)], vec![]),
        ComponentKind::Input(props) => (
            vec![],
            vec![Port::seq(SEQ_OUT).with_type(parse_type(&props.input_type))],
        ),
        ComponentKind::WatchVariable(_) => (
            vec![opt_seq_in()],
            vec![opt_seq_out(), Port::data("variable", ValueType::Any)],
        ),
        ComponentKind::EvalExpr(_) => (
            vec![opt_seq_in()],
            vec![opt_seq_out(), Port::data("result", ValueType::Any)],
        ),
        ComponentKind::SetVariable(_) | ComponentKind::Log(_) => {
            (vec![opt_seq_in()], vec![opt_seq_out()])
        }
        ComponentKind::Error(_) => (vec![opt_seq_in()], vec![]),
        ComponentKind::Switch(props) => {
            let mut outputs = vec![opt_seq_out()];
            outputs.extend(
                props
                    .tests
                    .iter()
                    .filter(|t| !t.output_name.is_empty())
                    .map(|t| Port::seq(&t.output_name).optional()),
            );
            (vec![opt_seq_in()], outputs)
        }
        ComponentKind::Compare(_) | ComponentKind::IsTrue(_) => (
            vec![opt_seq_in()],
            vec![
                opt_seq_out(),
                Port::seq("True").with_type(ValueType::Boolean),
                Port::seq("False").with_type(ValueType::Boolean),
            ],
        ),
        ComponentKind::Constant(_) => (
            vec![opt_seq_in()],
            vec![opt_seq_out(), Port::data("value", ValueType::Any)],
        ),
        ComponentKind::CallAction(props) => {
            let mut inputs = vec![Port::seq(SEQ_IN)];
            let mut outputs = vec![Port::seq(SEQ_OUT)];
            if let Some(callee) = project.find_action(&props.action) {
                let (callee_inputs, callee_outputs) = callee_ports(callee);
                inputs.extend(callee_inputs);
                outputs.extend(callee_outputs);
            }
            (inputs, outputs)
        }
        ComponentKind::Delay(_) => (vec![Port::seq(SEQ_IN)], vec![Port::seq(SEQ_OUT)]),
        ComponentKind::CatchError => (
            vec![],
            vec![opt_seq_out(), Port::data("Message", ValueType::String)],
        ),
        ComponentKind::Counter(_) => (
            vec![Port::seq(SEQ_IN)],
            vec![Port::seq(SEQ_OUT), Port::seq("done").optional()],
        ),
        ComponentKind::Loop(_) => (
            vec![Port::seq("start"), Port::seq("next")],
            vec![Port::seq(SEQ_OUT), Port::seq("done").optional()],
        ),
        ComponentKind::ShowPage(_) => (vec![Port::seq(SEQ_IN)], vec![opt_seq_out()]),
        ComponentKind::OnEvent(_) => (
            vec![],
            vec![
                Port::seq(SEQ_OUT),
                Port::data("event", ValueType::Event).optional(),
            ],
        ),
        ComponentKind::Button(_) => (vec![], vec![Port::seq("clicked").optional()]),
        ComponentKind::Text(_)
        | ComponentKind::TextInput(_)
        | ComponentKind::Comment(_)
        | ComponentKind::Unknown => (vec![], vec![]),
    };

    inputs.extend(
        component
            .custom_inputs
            .iter()
            .map(|p| Port::data(&p.name, parse_type(&p.value_type))),
    );
    outputs.extend(
        component
            .custom_outputs
            .iter()
            .map(|p| Port::data(&p.name, parse_type(&p.value_type))),
    );
    if component.catch_error {
        outputs.push(Port::seq(ERROR_OUT).with_type(ValueType::String));
    }

    Ports { inputs, outputs }
}

/// Data inputs and outputs a caller gets from the callee's Input/Output components.
///
/// Ports are keyed by the callee component's `objID`, so renaming a slot
/// leaves caller lines intact.
fn callee_ports(callee: &Flow) -> (Vec<Port>, Vec<Port>) {
    let inputs = callee
        .components
        .iter()
        .filter_map(|c| match &c.kind {
            ComponentKind::Input(props) => {
                Some(Port::data(&c.obj_id, parse_type(&props.input_type)))
            }
            _ => None,
        })
        .collect();
    let outputs = callee
        .components
        .iter()
        .filter_map(|c| match &c.kind {
            ComponentKind::Output(_) => Some(Port::data(&c.obj_id, ValueType::Any).optional()),
            _ => None,
        })
        .collect();
    (inputs, outputs)
}
