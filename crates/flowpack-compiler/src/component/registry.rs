//! One descriptor per component kind.

use flowpack_bytecode::{ComponentType, ProjectType};
use indexmap::IndexMap;

use super::encoder::EncodeContext;
use super::payload;
use crate::project::ComponentKind;
use crate::writer::DataBuffer;

pub type PayloadEncoder = fn(&mut EncodeContext<'_, '_>, &mut DataBuffer);

/// Field-less image of [`ComponentKind`], used as the registry key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KindTag {
    Start,
    End,
    Input,
    Output,
    WatchVariable,
    EvalExpr,
    SetVariable,
    Switch,
    Compare,
    IsTrue,
    Constant,
    Log,
    CallAction,
    Delay,
    Error,
    CatchError,
    Counter,
    Loop,
    ShowPage,
    OnEvent,
    Comment,
    Text,
    Button,
    TextInput,
    Unknown,
}

impl KindTag {
    pub fn of(kind: &ComponentKind) -> Self {
        match kind {
            ComponentKind::Start => Self::Start,
            ComponentKind::End => Self::End,
            ComponentKind::Input(_) => Self::Input,
            ComponentKind::Output(_) => Self::Output,
            ComponentKind::WatchVariable(_) => Self::WatchVariable,
            ComponentKind::EvalExpr(_) => Self::EvalExpr,
            ComponentKind::SetVariable(_) => Self::SetVariable,
            ComponentKind::Switch(_) => Self::Switch,
            ComponentKind::Compare(_) => Self::Compare,
            ComponentKind::IsTrue(_) => Self::IsTrue,
            ComponentKind::Constant(_) => Self::Constant,
            ComponentKind::Log(_) => Self::Log,
            ComponentKind::CallAction(_) => Self::CallAction,
            ComponentKind::Delay(_) => Self::Delay,
            ComponentKind::Error(_) => Self::Error,
            ComponentKind::CatchError => Self::CatchError,
            ComponentKind::Counter(_) => Self::Counter,
            ComponentKind::Loop(_) => Self::Loop,
            ComponentKind::ShowPage(_) => Self::ShowPage,
            ComponentKind::OnEvent(_) => Self::OnEvent,
            ComponentKind::Comment(_) => Self::Comment,
            ComponentKind::Text(_) => Self::Text,
            ComponentKind::Button(_) => Self::Button,
            ComponentKind::TextInput(_) => Self::TextInput,
            ComponentKind::Unknown => Self::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Descriptor {
    pub name: &'static str,
    pub component_type: ComponentType,
    /// `false` for kinds that never reach the program (comments).
    pub encoded: bool,
    pub payload: Option<PayloadEncoder>,
}

impl Descriptor {
    const fn new(name: &'static str, component_type: ComponentType) -> Self {
        Self {
            name,
            component_type,
            encoded: true,
            payload: None,
        }
    }

    const fn with_payload(mut self, payload: PayloadEncoder) -> Self {
        self.payload = Some(payload);
        self
    }

    /// Whether a program for `target` can run this kind.
    pub fn supports(&self, target: ProjectType) -> bool {
        match self.component_type {
            ComponentType::Unsupported => false,
            ty if ty.is_widget() => target != ProjectType::Lvgl,
            _ => true,
        }
    }
}

static UNKNOWN: Descriptor = Descriptor::new("Unknown", ComponentType::Unsupported);

/// Descriptors of every kind, built once and passed by reference.
#[derive(Debug, Clone)]
pub struct Registry {
    descriptors: IndexMap<KindTag, Descriptor>,
}

impl Registry {
    pub fn new() -> Self {
        use ComponentType as T;

        let entries = [
            (KindTag::Start, Descriptor::new("Start", T::Start)),
            (KindTag::End, Descriptor::new("End", T::End)),
            (
                KindTag::Input,
                Descriptor::new("Input", T::Input).with_payload(payload::input),
            ),
            (
                KindTag::Output,
                Descriptor::new("Output", T::Output).with_payload(payload::output),
            ),
            (
                KindTag::WatchVariable,
                Descriptor::new("WatchVariable", T::WatchVariable),
            ),
            (KindTag::EvalExpr, Descriptor::new("EvalExpr", T::EvalExpr)),
            (
                KindTag::SetVariable,
                Descriptor::new("SetVariable", T::SetVariable).with_payload(payload::set_variable),
            ),
            (
                KindTag::Switch,
                Descriptor::new("Switch", T::Switch).with_payload(payload::switch),
            ),
            (
                KindTag::Compare,
                Descriptor::new("Compare", T::Compare).with_payload(payload::compare),
            ),
            (KindTag::IsTrue, Descriptor::new("IsTrue", T::IsTrue)),
            (
                KindTag::Constant,
                Descriptor::new("Constant", T::Constant).with_payload(payload::constant),
            ),
            (KindTag::Log, Descriptor::new("Log", T::Log)),
            (
                KindTag::CallAction,
                Descriptor::new("CallAction", T::CallAction).with_payload(payload::call_action),
            ),
            (KindTag::Delay, Descriptor::new("Delay", T::Delay)),
            (KindTag::Error, Descriptor::new("Error", T::Error)),
            (KindTag::CatchError, Descriptor::new("CatchError", T::CatchError)),
            (KindTag::Counter, Descriptor::new("Counter", T::Counter)),
            (KindTag::Loop, Descriptor::new("Loop", T::Loop)),
            (
                KindTag::ShowPage,
                Descriptor::new("ShowPage", T::ShowPage).with_payload(payload::show_page),
            ),
            (
                KindTag::OnEvent,
                Descriptor::new("OnEvent", T::OnEvent).with_payload(payload::on_event),
            ),
            (
                KindTag::Comment,
                Descriptor {
                    encoded: false,
                    ..Descriptor::new("Comment", T::Unsupported)
                },
            ),
            (
                KindTag::Text,
                Descriptor::new("Text", T::Text).with_payload(payload::text),
            ),
            (
                KindTag::Button,
                Descriptor::new("Button", T::Button).with_payload(payload::button),
            ),
            (
                KindTag::TextInput,
                Descriptor::new("TextInput", T::TextInput).with_payload(payload::text_input),
            ),
            (KindTag::Unknown, UNKNOWN),
        ];

        Self {
            descriptors: entries.into_iter().collect(),
        }
    }

    pub fn descriptor(&self, kind: &ComponentKind) -> &Descriptor {
        self.descriptors.get(&KindTag::of(kind)).unwrap_or(&UNKNOWN)
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (KindTag, &Descriptor)> {
        self.descriptors.iter().map(|(tag, d)| (*tag, d))
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
