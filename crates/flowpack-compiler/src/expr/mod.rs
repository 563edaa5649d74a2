//! Expression compiler.
//!
//! Text is lexed, parsed into an [`Expr`] tree, typed, then lowered into a
//! stack-machine instruction stream that always ends with `END`. Errors are
//! returned, never reported here: the caller turns them into diagnostics and
//! falls back to a bare `END`.

mod ast;
mod builtins;
mod codegen;
mod eval;
mod lexer;
mod parser;
mod scope;
mod template;
mod typing;

#[cfg(test)]
mod expr_tests;
#[cfg(test)]
mod lexer_tests;

use std::fmt;
use std::ops::Range;

use flowpack_bytecode::{Instruction, operations};

use crate::assets::{Assets, Value};
use crate::diagnostics::{DiagnosticBuilder, DiagnosticKind, Diagnostics, Section};
use crate::project::{Project, ValueType};

pub use ast::{BinaryOp, Expr, ExprKind, Literal, UnaryOp};
pub use lexer::{Token, TokenKind, lex};
pub use parser::{MAX_DEPTH, parse};
pub use scope::{Resolved, Scope};
pub use template::template_to_expression;

use codegen::Codegen;
use eval::Evaluator;
use typing::Typer;

/// A failure compiling one expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExprError {
    pub kind: DiagnosticKind,
    /// Detail rendered through the kind's message template.
    pub detail: String,
    /// Byte range inside the expression text.
    pub span: Range<usize>,
}

impl ExprError {
    pub fn new(kind: DiagnosticKind, detail: impl Into<String>, span: Range<usize>) -> Self {
        Self {
            kind,
            detail: detail.into(),
            span,
        }
    }

    /// Start a diagnostic for this error against `text`. The caller adds the location.
    pub fn report<'d>(&self, diagnostics: &'d mut Diagnostics, text: &str) -> DiagnosticBuilder<'d> {
        diagnostics
            .report(self.kind, Section::Build)
            .message(self.detail.clone())
            .source(text, self.span.clone())
    }
}

impl fmt::Display for ExprError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.kind.message(Some(&self.detail)))
    }
}

impl std::error::Error for ExprError {}

/// Compile a value expression, checking its type against `expected`.
pub fn build_expression(
    assets: &mut Assets<'_>,
    scope: Scope<'_>,
    text: &str,
    expected: &ValueType,
) -> Result<Vec<Instruction>, ExprError> {
    let mut codegen = Codegen::new(assets, scope);
    if text.trim().is_empty() {
        let empty = Expr::new(ExprKind::Literal(Literal::Undefined), 0..0);
        codegen.push_constant(Value::Undefined, ValueType::Undefined, &empty)?;
        return Ok(codegen.finish());
    }

    let expr = parse(text)?;
    let actual = Typer::new(codegen.project(), scope, false).type_of(&expr)?;
    if !expected.accepts(&actual) {
        return Err(ExprError::new(
            DiagnosticKind::TypeMismatch,
            format!("Type mismatch: expected '{expected}', found '{actual}'"),
            expr.span.clone(),
        ));
    }
    codegen.emit(&expr, false, Some(expected))?;
    let instructions = codegen.finish();
    tracing::trace!(expression = text, count = instructions.len(), "compiled");
    Ok(instructions)
}

/// Compile a write target: an output, variable, element or field, or a
/// conditional choosing between two targets.
pub fn build_assignable_expression(
    assets: &mut Assets<'_>,
    scope: Scope<'_>,
    text: &str,
) -> Result<Vec<Instruction>, ExprError> {
    let expr = parse(text)?;
    if !is_assignable(&expr) {
        return Err(ExprError::new(
            DiagnosticKind::NotAssignable,
            "Expression is not assignable",
            expr.span.clone(),
        ));
    }
    let mut codegen = Codegen::new(assets, scope);
    Typer::new(codegen.project(), scope, true).type_of(&expr)?;
    codegen.emit(&expr, true, None)?;
    Ok(codegen.finish())
}

/// Fold `text` to a value at compile time.
pub fn eval_constant_expression(
    project: &Project,
    text: &str,
) -> Result<(Value, ValueType), ExprError> {
    let expr = parse(text)?;
    let value = Evaluator::new(project).eval(&expr)?;
    let value_type = value.natural_type();
    Ok((value, value_type))
}

/// Static type of `text` in `scope`.
pub fn expression_type(project: &Project, scope: Scope<'_>, text: &str) -> Result<ValueType, ExprError> {
    if text.trim().is_empty() {
        return Ok(ValueType::Undefined);
    }
    let expr = parse(text)?;
    Typer::new(project, scope, false).type_of(&expr)
}

fn is_assignable(expr: &Expr) -> bool {
    match &expr.kind {
        ExprKind::Identifier(_) | ExprKind::Member { .. } | ExprKind::Index { .. } => true,
        ExprKind::Conditional {
            consequent,
            alternate,
            ..
        } => is_assignable(consequent) && is_assignable(alternate),
        _ => false,
    }
}

/// One instruction per line, with constants and operation names resolved.
pub fn disassemble(instructions: &[Instruction], assets: &Assets<'_>) -> String {
    instructions
        .iter()
        .map(|instr| match *instr {
            Instruction::PushConstant(index) => match assets.constants.get(usize::from(index)) {
                Some(constant) => {
                    let value = match &constant.value {
                        Value::String(s) => format!("{s:?}"),
                        other => other.to_string(),
                    };
                    format!("{instr} ({} {value})", constant.value_type)
                }
                None => format!("{instr} (?)"),
            },
            Instruction::Operation(index) => match operations::by_index(index) {
                Some(op) => format!("{instr} ({})", op.name),
                None => format!("{instr} (?)"),
            },
            _ => instr.to_string(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}
