use super::*;

#[test]
fn severity_display() {
    insta::assert_snapshot!(format!("{}", Severity::Error), @"error");
    insta::assert_snapshot!(format!("{}", Severity::Warning), @"warning");
    insta::assert_snapshot!(format!("{}", Severity::Info), @"info");
}

#[test]
fn report_with_default_message() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::NotAssignable, Section::Build)
        .emit();

    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics.has_errors());
    assert_eq!(diagnostics.messages(), vec!["Expression is not assignable"]);
}

#[test]
fn report_with_custom_message() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnknownFunction, Section::Build)
        .message("Math.nope")
        .emit();
    diagnostics
        .report(DiagnosticKind::ExpressionSyntax, Section::Build)
        .message("unexpected end of input")
        .emit();

    assert_eq!(
        diagnostics.messages(),
        vec![
            "Unknown function 'Math.nope'",
            "Expression error: unexpected end of input"
        ]
    );
}

#[test]
fn severities_are_counted_separately() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnconnectedInput, Section::Checks)
        .message("@seqin")
        .emit();
    diagnostics
        .report(DiagnosticKind::UnusedAsset, Section::Checks)
        .message("Unused style: big")
        .emit();

    assert!(!diagnostics.has_errors());
    assert!(diagnostics.has_warnings());
    assert_eq!(diagnostics.error_count(), 0);
    assert_eq!(diagnostics.warning_count(), 1);
    assert_eq!(diagnostics.len(), 2);
}

#[test]
fn severity_override() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnresolvedReference, Section::Build)
        .message("Style not found: big")
        .severity(Severity::Warning)
        .emit();

    assert!(!diagnostics.has_errors());
    assert!(diagnostics.has_warnings());
}

#[test]
fn plain_rendering_includes_location() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::DuplicateOutput, Section::Checks)
        .message("done")
        .at("Main", Some("c3"))
        .property("tests")
        .emit();
    diagnostics
        .report(DiagnosticKind::UnknownType, Section::Checks)
        .message("Variable type not set")
        .at("Main", None)
        .emit();

    insta::assert_snapshot!(diagnostics.printer().render(), @r"
    error[checks]: Duplicate output name 'done' (at Main/c3.tests)
    error[checks]: Variable type not set (at Main)
    ");
}

#[test]
fn min_severity_filters() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnusedAsset, Section::Checks)
        .message("Unused style: big")
        .emit();
    diagnostics
        .report(DiagnosticKind::NotConstant, Section::Build)
        .emit();

    let text = diagnostics
        .printer()
        .min_severity(Severity::Warning)
        .render();
    insta::assert_snapshot!(text, @"error[build]: Not a constant");
}

#[test]
fn expression_diagnostics_render_snippet() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnknownIdentifier, Section::Build)
        .message("identifier 'nope' is neither input or local or global variable")
        .at("Main", Some("c1"))
        .property("value")
        .source("1 + nope", 4..8)
        .emit();

    let text = diagnostics.printer().render();
    assert!(text.starts_with("error: identifier 'nope'"));
    assert!(text.contains("Main/c1.value"));
    assert!(text.contains("1 + nope"));
    assert!(text.contains("^^^^"));
}
