use std::ops::Range;

/// Diagnostic kinds, grouped by the stage that reports them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    // Expression text does not parse
    ExpressionSyntax,

    // Names that do not resolve
    UnknownIdentifier,
    UnknownFunction,
    UnknownMember,
    UnknownType,
    UnresolvedReference,
    StaleConnection,

    // Valid names, wrong use
    ArgumentCount,
    TypeMismatch,
    NotAssignable,
    NotConstant,
    IndexOverflow,

    // Graph structure
    MissingProperty,
    DuplicateOutput,
    DuplicateObjectId,
    UnconnectedInput,
    UnsupportedComponent,

    // Informational
    UnusedAsset,
}

impl DiagnosticKind {
    pub fn default_severity(&self) -> Severity {
        match self {
            Self::UnconnectedInput => Severity::Warning,
            Self::UnusedAsset => Severity::Info,
            _ => Severity::Error,
        }
    }

    /// Base message for this diagnostic kind, used when no custom message is provided.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::ExpressionSyntax => "Expression error",

            Self::UnknownIdentifier => "unknown identifier",
            Self::UnknownFunction => "Unknown function",
            Self::UnknownMember => "unknown member",
            Self::UnknownType => "unknown type",
            Self::UnresolvedReference => "reference not found",
            Self::StaleConnection => "connection line references a missing port",

            Self::ArgumentCount => "wrong number of arguments",
            Self::TypeMismatch => "incompatible types",
            Self::NotAssignable => "Expression is not assignable",
            Self::NotConstant => "Not a constant",
            Self::IndexOverflow => "index does not fit into the instruction encoding",

            Self::MissingProperty => "required property not set",
            Self::DuplicateOutput => "duplicate output name",
            Self::DuplicateObjectId => "duplicate component id",
            Self::UnconnectedInput => "input is not connected",
            Self::UnsupportedComponent => "Component is not supported for the build target",

            Self::UnusedAsset => "unused asset",
        }
    }

    /// Template for custom messages. Contains `{}` placeholder for caller-provided detail.
    pub fn custom_message(&self) -> String {
        match self {
            Self::ExpressionSyntax => "Expression error: {}".to_string(),
            Self::UnknownFunction => "Unknown function '{}'".to_string(),
            Self::DuplicateOutput => "Duplicate output name '{}'".to_string(),
            Self::DuplicateObjectId => "Duplicate component id '{}'".to_string(),
            Self::UnconnectedInput => "Input '{}' is not connected".to_string(),
            Self::UnsupportedComponent => format!("{}: {{}}", self.fallback_message()),

            // These carry complete sentences from the reporting site
            Self::UnknownIdentifier
            | Self::UnknownMember
            | Self::UnknownType
            | Self::UnresolvedReference
            | Self::StaleConnection
            | Self::ArgumentCount
            | Self::TypeMismatch
            | Self::NotAssignable
            | Self::NotConstant
            | Self::IndexOverflow
            | Self::MissingProperty
            | Self::UnusedAsset => "{}".to_string(),
        }
    }

    /// Render the final message.
    ///
    /// - `None` → returns `fallback_message()`
    /// - `Some(detail)` → returns `custom_message()` with `{}` replaced by detail
    pub fn message(&self, msg: Option<&str>) -> String {
        match msg {
            None => self.fallback_message().to_string(),
            Some(detail) => self.custom_message().replace("{}", detail),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Severity {
    #[default]
    Error,
    Warning,
    Info,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// Output section a diagnostic belongs to.
///
/// `Checks` holds structural findings from the graph walk, `Build` holds
/// problems found while encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Section {
    Checks,
    #[default]
    Build,
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Section::Checks => write!(f, "checks"),
            Section::Build => write!(f, "build"),
        }
    }
}

/// The graph node a diagnostic is attached to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectRef {
    pub flow: String,
    /// `None` for flow-level findings (variables, tables).
    pub object_id: Option<String>,
}

/// Expression text and the span inside it the diagnostic points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SourceSnippet {
    pub(crate) text: String,
    pub(crate) span: Range<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub(crate) kind: DiagnosticKind,
    pub(crate) section: Section,
    pub(crate) severity: Severity,
    pub(crate) message: String,
    pub(crate) object: Option<ObjectRef>,
    pub(crate) property: Option<String>,
    pub(crate) source: Option<SourceSnippet>,
}

impl DiagnosticMessage {
    pub(crate) fn with_default_message(kind: DiagnosticKind, section: Section) -> Self {
        Self {
            kind,
            section,
            severity: kind.default_severity(),
            message: kind.fallback_message().to_string(),
            object: None,
            property: None,
            source: None,
        }
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn section(&self) -> Section {
        self.section
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn object(&self) -> Option<&ObjectRef> {
        self.object.as_ref()
    }

    pub fn property(&self) -> Option<&str> {
        self.property.as_deref()
    }

    pub(crate) fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    pub(crate) fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }

    /// `flow/objID.property`, or as much of it as is known.
    pub fn location(&self) -> Option<String> {
        let object = self.object.as_ref()?;
        let mut out = object.flow.clone();
        if let Some(id) = &object.object_id {
            out.push('/');
            out.push_str(id);
        }
        if let Some(property) = &self.property {
            out.push('.');
            out.push_str(property);
        }
        Some(out)
    }
}

impl std::fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}[{}]: {}", self.severity, self.section, self.message)?;
        if let Some(location) = self.location() {
            write!(f, " (at {location})")?;
        }
        Ok(())
    }
}
