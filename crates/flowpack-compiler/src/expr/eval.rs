//! Compile-time constant folding.

use super::ExprError;
use super::ast::{BinaryOp, Expr, ExprKind, UnaryOp};
use super::builtins;
use super::codegen::literal_value;
use super::typing;
use crate::assets::Value;
use crate::diagnostics::DiagnosticKind;
use crate::project::Project;

pub struct Evaluator<'a> {
    project: &'a Project,
}

fn not_constant(expr: &Expr) -> ExprError {
    ExprError::new(DiagnosticKind::NotConstant, "Not a constant", expr.span.clone())
}

impl<'a> Evaluator<'a> {
    pub fn new(project: &'a Project) -> Self {
        Self { project }
    }

    pub fn eval(&self, expr: &Expr) -> Result<Value, ExprError> {
        match &expr.kind {
            ExprKind::Literal(lit) => Ok(literal_value(lit).0),
            ExprKind::Identifier(_) | ExprKind::Index { .. } => Err(not_constant(expr)),
            ExprKind::Unary { op, arg } => {
                let value = self.eval(arg)?;
                unary(*op, value).ok_or_else(|| not_constant(expr))
            }
            ExprKind::Binary { op, left, right } => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                binary(*op, &left, &right, expr)
            }
            ExprKind::Conditional {
                test,
                consequent,
                alternate,
            } => {
                if self.eval(test)?.is_truthy() {
                    self.eval(consequent)
                } else {
                    self.eval(alternate)
                }
            }
            ExprKind::Member { object, property } => {
                let Some(name) = object.as_identifier() else {
                    return Err(not_constant(expr));
                };
                if let Some(enum_def) = self.project.find_enum(name) {
                    return enum_def
                        .members
                        .iter()
                        .find(|m| m.name == *property)
                        .map(|m| Value::Integer(m.value))
                        .ok_or_else(|| typing::unknown_enum_member(name, property, expr));
                }
                builtins::constant(&format!("{name}.{property}"))
                    .map(|(value, _)| value)
                    .ok_or_else(|| not_constant(expr))
            }
            ExprKind::Call { callee, args } => {
                let name = typing::function_name(callee)?;
                let args = args
                    .iter()
                    .map(|a| self.eval(a))
                    .collect::<Result<Vec<_>, _>>()?;
                call(&name, &args).ok_or_else(|| not_constant(expr))
            }
            ExprKind::Array(items) => items
                .iter()
                .map(|item| self.eval(item))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            ExprKind::Object(fields) => fields
                .iter()
                .map(|(name, value)| Ok((name.clone(), self.eval(value)?)))
                .collect::<Result<Vec<_>, ExprError>>()
                .map(Value::Object),
        }
    }
}

fn unary(op: UnaryOp, value: Value) -> Option<Value> {
    Some(match (op, value) {
        (UnaryOp::Not, v) => Value::Boolean(!v.is_truthy()),
        (UnaryOp::Plus, v @ (Value::Integer(_) | Value::Float(_) | Value::Double(_))) => v,
        (UnaryOp::Minus, Value::Integer(v)) => Value::Integer(v.wrapping_neg()),
        (UnaryOp::Minus, Value::Float(v)) => Value::Float(-v),
        (UnaryOp::Minus, Value::Double(v)) => Value::Double(-v),
        (UnaryOp::BitNot, Value::Integer(v)) => Value::Integer(!v),
        _ => return None,
    })
}

fn as_int(value: &Value) -> Option<i32> {
    match value {
        Value::Integer(v) => Some(*v),
        Value::Boolean(v) => Some(i32::from(*v)),
        Value::Float(v) => Some(*v as i32),
        Value::Double(v) => Some(*v as i32),
        _ => None,
    }
}

fn binary(op: BinaryOp, left: &Value, right: &Value, expr: &Expr) -> Result<Value, ExprError> {
    if op == BinaryOp::Add
        && (matches!(left, Value::String(_)) || matches!(right, Value::String(_)))
    {
        return Ok(Value::String(format!("{left}{right}")));
    }

    match op {
        BinaryOp::And => return Ok(Value::Boolean(left.is_truthy() && right.is_truthy())),
        BinaryOp::Or => return Ok(Value::Boolean(left.is_truthy() || right.is_truthy())),
        BinaryOp::Equal => return Ok(Value::Boolean(loose_eq(left, right))),
        BinaryOp::NotEqual => return Ok(Value::Boolean(!loose_eq(left, right))),
        _ => {}
    }

    if let (Value::String(l), Value::String(r)) = (left, right) {
        let ordering = l.cmp(r);
        return match op {
            BinaryOp::Less => Ok(Value::Boolean(ordering.is_lt())),
            BinaryOp::Greater => Ok(Value::Boolean(ordering.is_gt())),
            BinaryOp::LessOrEqual => Ok(Value::Boolean(ordering.is_le())),
            BinaryOp::GreaterOrEqual => Ok(Value::Boolean(ordering.is_ge())),
            _ => Err(not_constant(expr)),
        };
    }

    if let (Value::Integer(l), Value::Integer(r)) = (left, right) {
        let (l, r) = (*l, *r);
        let folded = match op {
            BinaryOp::Add => l.wrapping_add(r),
            BinaryOp::Sub => l.wrapping_sub(r),
            BinaryOp::Mul => l.wrapping_mul(r),
            BinaryOp::Div | BinaryOp::Mod if r == 0 => {
                return Err(ExprError::new(
                    DiagnosticKind::NotConstant,
                    "Division by zero",
                    expr.span.clone(),
                ));
            }
            BinaryOp::Div => l.wrapping_div(r),
            BinaryOp::Mod => l.wrapping_rem(r),
            _ => return integer_op(op, l, r, expr),
        };
        return Ok(Value::Integer(folded));
    }

    match op {
        BinaryOp::ShiftLeft
        | BinaryOp::ShiftRight
        | BinaryOp::BitAnd
        | BinaryOp::BitOr
        | BinaryOp::BitXor => {
            let (Some(l), Some(r)) = (as_int(left), as_int(right)) else {
                return Err(not_constant(expr));
            };
            integer_op(op, l, r, expr)
        }
        _ => {
            let (Some(l), Some(r)) = (left.as_f64(), right.as_f64()) else {
                return Err(not_constant(expr));
            };
            Ok(match op {
                BinaryOp::Add => Value::Double(l + r),
                BinaryOp::Sub => Value::Double(l - r),
                BinaryOp::Mul => Value::Double(l * r),
                BinaryOp::Div => Value::Double(l / r),
                BinaryOp::Mod => Value::Double(l % r),
                BinaryOp::Less => Value::Boolean(l < r),
                BinaryOp::Greater => Value::Boolean(l > r),
                BinaryOp::LessOrEqual => Value::Boolean(l <= r),
                BinaryOp::GreaterOrEqual => Value::Boolean(l >= r),
                _ => return Err(not_constant(expr)),
            })
        }
    }
}

fn integer_op(op: BinaryOp, l: i32, r: i32, expr: &Expr) -> Result<Value, ExprError> {
    Ok(match op {
        BinaryOp::ShiftLeft => Value::Integer(l.wrapping_shl(r as u32)),
        BinaryOp::ShiftRight => Value::Integer(l.wrapping_shr(r as u32)),
        BinaryOp::BitAnd => Value::Integer(l & r),
        BinaryOp::BitOr => Value::Integer(l | r),
        BinaryOp::BitXor => Value::Integer(l ^ r),
        BinaryOp::Less => Value::Boolean(l < r),
        BinaryOp::Greater => Value::Boolean(l > r),
        BinaryOp::LessOrEqual => Value::Boolean(l <= r),
        BinaryOp::GreaterOrEqual => Value::Boolean(l >= r),
        _ => return Err(not_constant(expr)),
    })
}

fn loose_eq(left: &Value, right: &Value) -> bool {
    match (left.as_f64(), right.as_f64()) {
        (Some(l), Some(r)) => l == r,
        _ => left == right,
    }
}

fn call(name: &str, args: &[Value]) -> Option<Value> {
    let number = |i: usize| args.get(i).and_then(Value::as_f64);
    let string = |i: usize| match args.get(i) {
        Some(Value::String(s)) => Some(s.as_str()),
        _ => None,
    };

    Some(match name {
        "Math.sin" => Value::Double(number(0)?.sin()),
        "Math.cos" => Value::Double(number(0)?.cos()),
        "Math.log" => Value::Double(number(0)?.ln()),
        "Math.log10" => Value::Double(number(0)?.log10()),
        "Math.floor" => Value::Double(number(0)?.floor()),
        "Math.ceil" => Value::Double(number(0)?.ceil()),
        "Math.pow" => Value::Double(number(0)?.powf(number(1)?)),
        "Math.round" => {
            let value = number(0)?;
            let digits = args.get(1).map_or(Some(0), as_int)?;
            let scale = 10f64.powi(digits);
            Value::Double((value * scale).round() / scale)
        }
        "Math.abs" => match args.first()? {
            Value::Integer(v) => Value::Integer(v.wrapping_abs()),
            other => Value::Double(other.as_f64()?.abs()),
        },
        "Math.min" | "Math.max" => {
            let pick_max = name == "Math.max";
            if let Some(ints) = args.iter().map(integer_only).collect::<Option<Vec<i32>>>() {
                let folded = if pick_max {
                    ints.into_iter().max()
                } else {
                    ints.into_iter().min()
                };
                Value::Integer(folded?)
            } else {
                let values = args.iter().map(Value::as_f64).collect::<Option<Vec<f64>>>()?;
                let folded = values.into_iter().reduce(|a, b| {
                    if pick_max { a.max(b) } else { a.min(b) }
                });
                Value::Double(folded?)
            }
        }

        "String.length" => Value::Integer(i32::try_from(string(0)?.chars().count()).ok()?),
        "String.find" => {
            let haystack = string(0)?;
            let needle = string(1)?;
            let index = haystack
                .find(needle)
                .map_or(-1, |byte| haystack[..byte].chars().count() as i64);
            Value::Integer(i32::try_from(index).ok()?)
        }
        "String.padStart" => {
            let text = string(0)?;
            let width = usize::try_from(as_int(args.get(1)?)?).unwrap_or(0);
            let pad = string(2)?;
            Value::String(pad_start(text, width, pad)?)
        }
        "String.substring" => {
            let chars: Vec<char> = string(0)?.chars().collect();
            let clamp = |v: i32| usize::try_from(v).unwrap_or(0).min(chars.len());
            let start = clamp(as_int(args.get(1)?)?);
            let end = match args.get(2) {
                Some(v) => clamp(as_int(v)?),
                None => chars.len(),
            };
            let (start, end) = if start > end { (end, start) } else { (start, end) };
            Value::String(chars[start..end].iter().collect())
        }
        _ => return None,
    })
}

fn integer_only(value: &Value) -> Option<i32> {
    match value {
        Value::Integer(v) => Some(*v),
        _ => None,
    }
}

/// Longest string the runtime can address.
const MAX_STRING_LEN: usize = u16::MAX as usize;

fn pad_start(text: &str, width: usize, pad: &str) -> Option<String> {
    let len = text.chars().count();
    if len >= width || pad.is_empty() {
        return Some(text.to_string());
    }
    if width > MAX_STRING_LEN {
        return None;
    }
    let mut out: String = pad.chars().cycle().take(width - len).collect();
    out.push_str(text);
    Some(out)
}
