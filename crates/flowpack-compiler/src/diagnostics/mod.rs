mod message;
mod printer;

#[cfg(test)]
mod diagnostics_tests;

use std::ops::Range;

pub use message::{DiagnosticKind, DiagnosticMessage, ObjectRef, Section, Severity};
pub use printer::DiagnosticsPrinter;

use message::SourceSnippet;

/// Compile-run diagnostics sink.
///
/// Reporting never fails and never stops the pass; callers substitute a
/// fallback encoding and keep going.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    messages: Vec<DiagnosticMessage>,
}

#[must_use = "diagnostic not emitted, call .emit()"]
pub struct DiagnosticBuilder<'a> {
    diagnostics: &'a mut Diagnostics,
    message: DiagnosticMessage,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
        }
    }

    /// Create a diagnostic with the given kind in the given section.
    ///
    /// Uses the kind's default message. Call `.message()` on the builder to override.
    pub fn report(&mut self, kind: DiagnosticKind, section: Section) -> DiagnosticBuilder<'_> {
        DiagnosticBuilder {
            diagnostics: self,
            message: DiagnosticMessage::with_default_message(kind, section),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn has_errors(&self) -> bool {
        self.messages.iter().any(|d| d.is_error())
    }

    pub fn has_warnings(&self) -> bool {
        self.messages.iter().any(|d| d.is_warning())
    }

    pub fn error_count(&self) -> usize {
        self.messages.iter().filter(|d| d.is_error()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.messages.iter().filter(|d| d.is_warning()).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DiagnosticMessage> {
        self.messages.iter()
    }

    /// Messages in report order, for assertions.
    pub fn messages(&self) -> Vec<String> {
        self.messages.iter().map(|m| m.message.clone()).collect()
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.messages.extend(other.messages);
    }
}

impl<'a> DiagnosticBuilder<'a> {
    /// Provide custom detail for this diagnostic, rendered using the kind's template.
    pub fn message(mut self, msg: impl Into<String>) -> Self {
        let detail = msg.into();
        self.message.message = self.message.kind.message(Some(&detail));
        self
    }

    /// Attach to a flow, and optionally to a component inside it.
    pub fn at(mut self, flow: &str, object_id: Option<&str>) -> Self {
        self.message.object = Some(ObjectRef {
            flow: flow.to_string(),
            object_id: object_id.map(str::to_string),
        });
        self
    }

    pub fn property(mut self, name: impl Into<String>) -> Self {
        self.message.property = Some(name.into());
        self
    }

    /// Expression text, with the byte span the problem was found at.
    pub fn source(mut self, text: impl Into<String>, span: Range<usize>) -> Self {
        self.message.source = Some(SourceSnippet {
            text: text.into(),
            span,
        });
        self
    }

    pub fn severity(mut self, severity: Severity) -> Self {
        self.message.severity = severity;
        self
    }

    pub fn emit(self) {
        tracing::debug!(diagnostic = %self.message, "reported");
        self.diagnostics.messages.push(self.message);
    }
}
