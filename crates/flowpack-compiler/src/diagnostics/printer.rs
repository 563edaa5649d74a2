//! Builder-pattern printer for rendering diagnostics.

use std::fmt::Write;

use annotate_snippets::{AnnotationKind, Level, Renderer, Snippet};

use super::Diagnostics;
use super::message::Severity;

/// Builder for rendering diagnostics with various options.
///
/// Diagnostics carrying expression text are rendered as annotated snippets
/// with the location as the snippet path. Everything else is a plain line.
pub struct DiagnosticsPrinter<'d> {
    diagnostics: &'d Diagnostics,
    colored: bool,
    min_severity: Severity,
}

impl<'d> DiagnosticsPrinter<'d> {
    pub fn new(diagnostics: &'d Diagnostics) -> Self {
        Self {
            diagnostics,
            colored: false,
            min_severity: Severity::Info,
        }
    }

    pub fn colored(mut self, value: bool) -> Self {
        self.colored = value;
        self
    }

    /// Skip diagnostics less severe than `severity`.
    pub fn min_severity(mut self, severity: Severity) -> Self {
        self.min_severity = severity;
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = self.format(&mut out);
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        let renderer = if self.colored {
            Renderer::styled()
        } else {
            Renderer::plain()
        };

        let shown = self
            .diagnostics
            .iter()
            .filter(|d| d.severity <= self.min_severity);

        for (i, diag) in shown.enumerate() {
            if i > 0 {
                w.write_char('\n')?;
            }

            let Some(source) = &diag.source else {
                write!(w, "{}", diag)?;
                continue;
            };

            let location = diag.location().unwrap_or_default();
            let range = adjust_range(source.span.clone(), source.text.len());
            let mut snippet = Snippet::source(source.text.as_str())
                .line_start(1)
                .annotation(AnnotationKind::Primary.span(range).label(&diag.message));
            if !location.is_empty() {
                snippet = snippet.path(location.as_str());
            }

            let level = severity_to_level(diag.severity);
            let report = vec![level.primary_title(&diag.message).element(snippet)];
            write!(w, "{}", renderer.render(&report))?;
        }

        Ok(())
    }
}

fn severity_to_level(severity: Severity) -> Level<'static> {
    match severity {
        Severity::Error => Level::ERROR,
        Severity::Warning => Level::WARNING,
        Severity::Info => Level::INFO,
    }
}

fn adjust_range(range: std::ops::Range<usize>, limit: usize) -> std::ops::Range<usize> {
    let start = range.start.min(limit);
    let end = range.end.min(limit);

    if start == end {
        return start..(start + 1).min(limit.max(start));
    }

    start..end
}

impl Diagnostics {
    pub fn printer(&self) -> DiagnosticsPrinter<'_> {
        DiagnosticsPrinter::new(self)
    }
}
