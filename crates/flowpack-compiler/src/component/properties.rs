//! Expression properties each component kind exposes.
//!
//! The order of the returned list is the order of the component's
//! property table in the program.

use crate::project::{CompareOperator, Component, ComponentKind, ValueType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyMode {
    /// Pushes a value.
    Value,
    /// Pushes a write target.
    Assignable,
    /// Template literal, converted to a concatenation first.
    Template,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property<'c> {
    pub name: &'static str,
    pub text: &'c str,
    pub expected: ValueType,
    pub mode: PropertyMode,
    /// Hidden properties keep their slot but compile to a bare `END`.
    pub hidden: bool,
}

impl<'c> Property<'c> {
    fn value(name: &'static str, text: &'c str, expected: ValueType) -> Self {
        Self {
            name,
            text,
            expected,
            mode: PropertyMode::Value,
            hidden: false,
        }
    }

    fn assignable(name: &'static str, text: &'c str) -> Self {
        Self {
            mode: PropertyMode::Assignable,
            ..Self::value(name, text, ValueType::Any)
        }
    }

    fn template(name: &'static str, text: &'c str) -> Self {
        Self {
            mode: PropertyMode::Template,
            ..Self::value(name, text, ValueType::Any)
        }
    }

    fn hidden_if(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }
}

pub fn properties(component: &Component) -> Vec<Property<'_>> {
    match &component.kind {
        ComponentKind::WatchVariable(p) => vec![Property::value("variable", &p.variable, ValueType::Any)],
        ComponentKind::EvalExpr(p) => {
            vec![Property::value("expression", &p.expression, ValueType::Any)]
        }
        ComponentKind::Compare(p) => {
            let unary = p.operator == CompareOperator::Not;
            let ternary = p.operator == CompareOperator::Between;
            vec![
                Property::value("A", &p.a, ValueType::Any),
                Property::value("B", &p.b, ValueType::Any).hidden_if(unary),
                Property::value("C", &p.c, ValueType::Any).hidden_if(!ternary),
            ]
        }
        ComponentKind::IsTrue(p) => vec![Property::value("value", &p.value, ValueType::Any)],
        ComponentKind::Log(p) => vec![Property::template("value", &p.value)],
        ComponentKind::Delay(p) => {
            vec![Property::value("milliseconds", &p.milliseconds, ValueType::Double)]
        }
        ComponentKind::Error(p) => vec![Property::value("message", &p.message, ValueType::Any)],
        ComponentKind::Counter(p) => {
            vec![Property::value("countValue", &p.count_value, ValueType::Integer)]
        }
        ComponentKind::Loop(p) => vec![
            Property::assignable("variable", &p.variable),
            Property::value("from", &p.from, ValueType::Any),
            Property::value("to", &p.to, ValueType::Any),
            Property::value("step", &p.step, ValueType::Any),
        ],
        ComponentKind::Text(p) => vec![Property::template("text", &p.text)],
        ComponentKind::Button(p) => vec![
            Property::template("text", &p.text),
            Property::value("enabled", &p.enabled, ValueType::Any),
        ],
        ComponentKind::TextInput(p) => vec![Property::assignable("data", &p.data)],
        _ => Vec::new(),
    }
}

/// Required properties that are empty, as `(property, message)`.
pub fn missing_properties(component: &Component) -> Vec<(String, &'static str)> {
    let mut missing = Vec::new();
    let mut require = |property: String, text: &str, message: &'static str| {
        if text.trim().is_empty() {
            missing.push((property, message));
        }
    };

    match &component.kind {
        ComponentKind::Input(p) => require("name".into(), &p.name, "Name not set"),
        ComponentKind::Output(p) => require("name".into(), &p.name, "Name not set"),
        ComponentKind::WatchVariable(p) => {
            require("variable".into(), &p.variable, "Variable not set")
        }
        ComponentKind::EvalExpr(p) => {
            require("expression".into(), &p.expression, "Expression not set")
        }
        ComponentKind::SetVariable(p) => {
            for (i, entry) in p.entries.iter().enumerate() {
                require(format!("entries[{i}].variable"), &entry.variable, "Variable not set");
            }
        }
        ComponentKind::Switch(p) => {
            for (i, test) in p.tests.iter().enumerate() {
                require(format!("tests[{i}].condition"), &test.condition, "Condition not set");
                require(format!("tests[{i}].outputName"), &test.output_name, "Output name not set");
            }
        }
        ComponentKind::CallAction(p) => require("action".into(), &p.action, "Action name not set"),
        ComponentKind::Loop(p) => require("variable".into(), &p.variable, "Variable not set"),
        ComponentKind::ShowPage(p) => require("page".into(), &p.page, "Page not set"),
        ComponentKind::TextInput(p) => require("data".into(), &p.data, "Data not set"),
        _ => {}
    }
    missing
}
