//! Template literals: `Hello {name}!` becomes `"Hello " + (name) + "!"`.

use super::ExprError;
use crate::diagnostics::DiagnosticKind;

/// Rewrite template text into an equivalent string concatenation expression.
///
/// `{{` and `}}` stand for literal braces. An unmatched `{` is an error.
pub fn template_to_expression(text: &str) -> Result<String, ExprError> {
    let mut parts: Vec<String> = Vec::new();
    let mut literal = String::new();
    let mut chars = text.char_indices().peekable();

    while let Some((at, c)) = chars.next() {
        match c {
            '{' if chars.peek().map(|&(_, n)| n) == Some('{') => {
                chars.next();
                literal.push('{');
            }
            '}' if chars.peek().map(|&(_, n)| n) == Some('}') => {
                chars.next();
                literal.push('}');
            }
            '{' => {
                let mut inner = String::new();
                let mut closed = false;
                for (_, n) in chars.by_ref() {
                    if n == '}' {
                        closed = true;
                        break;
                    }
                    inner.push(n);
                }
                if !closed {
                    return Err(ExprError::new(
                        DiagnosticKind::ExpressionSyntax,
                        "unterminated '{' in template",
                        at..text.len(),
                    ));
                }
                if !literal.is_empty() {
                    parts.push(quote(&std::mem::take(&mut literal)));
                }
                parts.push(format!("({})", inner.trim()));
            }
            _ => literal.push(c),
        }
    }
    if !literal.is_empty() {
        parts.push(quote(&literal));
    }

    // Leading `{a}{b}` must concatenate, not add.
    if parts.first().is_none_or(|p| !p.starts_with('"')) {
        parts.insert(0, "\"\"".to_string());
    }
    Ok(parts.join(" + "))
}

fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}
