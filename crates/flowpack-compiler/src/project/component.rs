//! Component records as they appear in a project file.
//!
//! Every property that holds an expression is kept as raw text; the
//! compiler parses it at encode time.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    #[serde(rename = "objID")]
    pub obj_id: String,
    #[serde(default)]
    pub catch_error: bool,
    #[serde(default)]
    pub breakpoint: bool,
    #[serde(default)]
    pub custom_inputs: Vec<CustomPort>,
    #[serde(default)]
    pub custom_outputs: Vec<CustomPort>,
    #[serde(flatten)]
    pub kind: ComponentKind,
}

/// User-declared extra input or output.
#[derive(Debug, Clone, Deserialize)]
pub struct CustomPort {
    pub name: String,
    #[serde(rename = "type", default = "any_type")]
    pub value_type: String,
}

fn any_type() -> String {
    "any".to_string()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum ComponentKind {
    Start,
    End,
    Input(InputProps),
    Output(OutputProps),
    WatchVariable(WatchProps),
    EvalExpr(EvalExprProps),
    SetVariable(SetVariableProps),
    Switch(SwitchProps),
    Compare(CompareProps),
    IsTrue(ValueProps),
    Constant(ValueProps),
    Log(ValueProps),
    CallAction(CallActionProps),
    Delay(DelayProps),
    Error(ErrorProps),
    CatchError,
    Counter(CounterProps),
    Loop(LoopProps),
    ShowPage(ShowPageProps),
    OnEvent(OnEventProps),
    Comment(CommentProps),

    Text(TextProps),
    Button(ButtonProps),
    TextInput(TextInputProps),

    /// Any type this compiler has no encoder for.
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InputProps {
    pub name: String,
    #[serde(default = "any_type")]
    pub input_type: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OutputProps {
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WatchProps {
    pub variable: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EvalExprProps {
    pub expression: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SetVariableProps {
    pub entries: Vec<SetVariableEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SetVariableEntry {
    pub variable: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SwitchProps {
    pub tests: Vec<SwitchTest>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SwitchTest {
    pub condition: String,
    pub output_name: String,
    pub output_value: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum CompareOperator {
    #[default]
    #[serde(rename = "=")]
    Equal,
    #[serde(rename = "<")]
    Less,
    #[serde(rename = ">")]
    Greater,
    #[serde(rename = "<=")]
    LessOrEqual,
    #[serde(rename = ">=")]
    GreaterOrEqual,
    #[serde(rename = "<>")]
    NotEqual,
    #[serde(rename = "NOT")]
    Not,
    #[serde(rename = "AND")]
    And,
    #[serde(rename = "OR")]
    Or,
    #[serde(rename = "XOR")]
    Xor,
    #[serde(rename = "BETWEEN")]
    Between,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CompareProps {
    #[serde(rename = "A")]
    pub a: String,
    #[serde(rename = "B")]
    pub b: String,
    #[serde(rename = "C")]
    pub c: String,
    pub operator: CompareOperator,
}

/// Single `value` expression (IsTrue, Constant, Log).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ValueProps {
    pub value: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CallActionProps {
    pub action: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DelayProps {
    pub milliseconds: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ErrorProps {
    pub message: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CounterProps {
    pub count_value: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoopProps {
    pub variable: String,
    pub from: String,
    pub to: String,
    pub step: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ShowPageProps {
    pub page: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowEvent {
    #[default]
    PageOpen,
    PageClose,
    Keydown,
}

impl FlowEvent {
    pub fn code(self) -> u8 {
        match self {
            Self::PageOpen => 0,
            Self::PageClose => 1,
            Self::Keydown => 2,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OnEventProps {
    pub event: FlowEvent,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CommentProps {
    pub text: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TextProps {
    pub text: String,
    pub style: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ButtonProps {
    pub text: String,
    pub enabled: String,
    pub style: String,
    pub action: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TextInputProps {
    pub data: String,
    pub style: String,
}
