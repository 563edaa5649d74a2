//! Component type ids understood by the interpreter.
//!
//! Widgets occupy the low range, actions start at 1001. Id 0 marks a
//! component the target cannot run.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ComponentType {
    Unsupported = 0,

    Text = 6,
    Button = 10,
    TextInput = 11,

    Start = 1001,
    End = 1002,
    Input = 1003,
    Output = 1004,
    WatchVariable = 1005,
    EvalExpr = 1006,
    SetVariable = 1007,
    Switch = 1008,
    Compare = 1009,
    IsTrue = 1010,
    Constant = 1011,
    Log = 1012,
    CallAction = 1013,
    Delay = 1014,
    Error = 1015,
    CatchError = 1016,
    Counter = 1017,
    Loop = 1018,
    ShowPage = 1019,
    OnEvent = 1020,
}

impl ComponentType {
    pub fn id(self) -> u16 {
        self as u16
    }

    pub fn from_id(id: u16) -> Option<Self> {
        ALL.iter().copied().find(|t| t.id() == id)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Unsupported => "Unsupported",
            Self::Text => "Text",
            Self::Button => "Button",
            Self::TextInput => "TextInput",
            Self::Start => "Start",
            Self::End => "End",
            Self::Input => "Input",
            Self::Output => "Output",
            Self::WatchVariable => "WatchVariable",
            Self::EvalExpr => "EvalExpr",
            Self::SetVariable => "SetVariable",
            Self::Switch => "Switch",
            Self::Compare => "Compare",
            Self::IsTrue => "IsTrue",
            Self::Constant => "Constant",
            Self::Log => "Log",
            Self::CallAction => "CallAction",
            Self::Delay => "Delay",
            Self::Error => "Error",
            Self::CatchError => "CatchError",
            Self::Counter => "Counter",
            Self::Loop => "Loop",
            Self::ShowPage => "ShowPage",
            Self::OnEvent => "OnEvent",
        }
    }

    pub fn is_widget(self) -> bool {
        (1..1000).contains(&self.id())
    }
}

const ALL: &[ComponentType] = &[
    ComponentType::Unsupported,
    ComponentType::Text,
    ComponentType::Button,
    ComponentType::TextInput,
    ComponentType::Start,
    ComponentType::End,
    ComponentType::Input,
    ComponentType::Output,
    ComponentType::WatchVariable,
    ComponentType::EvalExpr,
    ComponentType::SetVariable,
    ComponentType::Switch,
    ComponentType::Compare,
    ComponentType::IsTrue,
    ComponentType::Constant,
    ComponentType::Log,
    ComponentType::CallAction,
    ComponentType::Delay,
    ComponentType::Error,
    ComponentType::CatchError,
    ComponentType::Counter,
    ComponentType::Loop,
    ComponentType::ShowPage,
    ComponentType::OnEvent,
];
