//! Static value types of expressions.
//!
//! Lenient where the runtime converts: `+` with a non-numeric, non-string
//! operand is typed `any` rather than rejected.

use flowpack_bytecode::operations;

use super::ExprError;
use super::ast::{BinaryOp, Expr, ExprKind, Literal, UnaryOp};
use super::builtins;
use super::scope::Scope;
use crate::diagnostics::DiagnosticKind;
use crate::project::{Project, ValueType};

pub struct Typer<'a> {
    project: &'a Project,
    scope: Scope<'a>,
    assignable: bool,
}

impl<'a> Typer<'a> {
    pub fn new(project: &'a Project, scope: Scope<'a>, assignable: bool) -> Self {
        Self {
            project,
            scope,
            assignable,
        }
    }

    pub fn type_of(&self, expr: &Expr) -> Result<ValueType, ExprError> {
        match &expr.kind {
            ExprKind::Literal(lit) => Ok(literal_type(lit)),
            ExprKind::Identifier(name) => self
                .scope
                .resolve(self.project, name, self.assignable)
                .map(|r| r.value_type())
                .ok_or_else(|| unknown_identifier(name, expr)),
            ExprKind::Unary { op, arg } => {
                let ty = self.type_of(arg)?;
                Ok(match op {
                    UnaryOp::Not => ValueType::Boolean,
                    _ => ty,
                })
            }
            ExprKind::Binary { op, left, right } => {
                let left = self.type_of(left)?;
                let right = self.type_of(right)?;
                Ok(binary_type(*op, &left, &right))
            }
            ExprKind::Conditional {
                test, consequent, ..
            } => {
                self.type_of(test)?;
                self.type_of(consequent)
            }
            ExprKind::Member { object, property } => self.member_type(expr, object, property),
            ExprKind::Index { object, index } => {
                self.type_of(index)?;
                let object_type = self.type_of(object)?;
                match &object_type {
                    ValueType::Array(element) => Ok((**element).clone()),
                    ValueType::Any | ValueType::Json => Ok(ValueType::Any),
                    other => Err(ExprError::new(
                        DiagnosticKind::TypeMismatch,
                        format!("Array type expected but found '{other}'"),
                        object.span.clone(),
                    )),
                }
            }
            ExprKind::Call { callee, args } => {
                let name = function_name(callee)?;
                if name == "Flow.makeValue" {
                    return make_value_type(args, expr);
                }
                let arg_types = args
                    .iter()
                    .map(|a| self.type_of(a))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(builtins::function_type(&name, &arg_types))
            }
            ExprKind::Array(items) => {
                let element = match items.first() {
                    Some(first) => self.type_of(first)?,
                    None => ValueType::Any,
                };
                for item in items.iter().skip(1) {
                    self.type_of(item)?;
                }
                Ok(ValueType::array_of(element))
            }
            ExprKind::Object(fields) => {
                for (_, value) in fields {
                    self.type_of(value)?;
                }
                Ok(ValueType::Struct("any".to_string()))
            }
        }
    }

    fn member_type(&self, expr: &Expr, object: &Expr, property: &str) -> Result<ValueType, ExprError> {
        if let Some(name) = object.as_identifier() {
            if let Some(enum_def) = self.project.find_enum(name) {
                if !enum_def.members.iter().any(|m| m.name == property) {
                    return Err(unknown_enum_member(name, property, expr));
                }
                return Ok(ValueType::Enum(name.to_string()));
            }
            if let Some((_, ty)) = builtins::constant(&format!("{name}.{property}")) {
                return Ok(ty);
            }
        }

        let object_type = self.type_of(object)?;
        match &object_type {
            ValueType::Struct(name) if name != "any" => {
                let structure = self
                    .project
                    .find_struct(name)
                    .ok_or_else(|| unknown_field(&object_type, property, expr))?;
                let (_, field) = structure
                    .field(property)
                    .ok_or_else(|| unknown_field(&object_type, property, expr))?;
                Ok(ValueType::parse(&field.value_type).unwrap_or(ValueType::Any))
            }
            ValueType::Struct(_) | ValueType::Object(_) | ValueType::Any | ValueType::Json => {
                Ok(ValueType::Any)
            }
            other => Err(ExprError::new(
                DiagnosticKind::TypeMismatch,
                format!("Struct or object type expected but found '{other}'"),
                object.span.clone(),
            )),
        }
    }
}

pub fn literal_type(lit: &Literal) -> ValueType {
    match lit {
        Literal::Undefined => ValueType::Undefined,
        Literal::Null => ValueType::Null,
        Literal::Boolean(_) => ValueType::Boolean,
        Literal::Integer(_) => ValueType::Integer,
        Literal::Double(_) => ValueType::Double,
        Literal::String(_) => ValueType::String,
    }
}

fn binary_type(op: BinaryOp, left: &ValueType, right: &ValueType) -> ValueType {
    if op.is_logical() {
        return ValueType::Boolean;
    }
    match op {
        BinaryOp::Add if *left == ValueType::String || *right == ValueType::String => {
            ValueType::String
        }
        BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div => {
            numeric_promotion(left, right)
        }
        _ => ValueType::Integer,
    }
}

/// `double` beats `float` beats `integer`. Anything else is untyped.
fn numeric_promotion(left: &ValueType, right: &ValueType) -> ValueType {
    let rank = |ty: &ValueType| match ty {
        ValueType::Integer | ValueType::Enum(_) | ValueType::Boolean => Some(0),
        ValueType::Float => Some(1),
        ValueType::Double => Some(2),
        _ => None,
    };
    match (rank(left), rank(right)) {
        (Some(l), Some(r)) => match l.max(r) {
            0 => ValueType::Integer,
            1 => ValueType::Float,
            _ => ValueType::Double,
        },
        _ => ValueType::Any,
    }
}

/// `Object.method` of a call, which is the only callable form.
pub fn function_name(callee: &Expr) -> Result<String, ExprError> {
    if let ExprKind::Member { object, property } = &callee.kind
        && let Some(object) = object.as_identifier()
    {
        let name = format!("{object}.{property}");
        if operations::function(&name).is_none() {
            return Err(ExprError::new(
                DiagnosticKind::UnknownFunction,
                name,
                callee.span.clone(),
            ));
        }
        return Ok(name);
    }
    Err(ExprError::new(
        DiagnosticKind::UnresolvedReference,
        "Invalid call expression",
        callee.span.clone(),
    ))
}

/// `Flow.makeValue("Point", {...})` has the type named by its first argument.
pub fn make_value_type(args: &[Expr], call: &Expr) -> Result<ValueType, ExprError> {
    let Some(Expr {
        kind: ExprKind::Literal(Literal::String(name)),
        ..
    }) = args.first()
    else {
        return Err(ExprError::new(
            DiagnosticKind::TypeMismatch,
            "Flow.makeValue expects a structure name as its first argument",
            call.span.clone(),
        ));
    };
    let ty = if name.contains(':') {
        ValueType::parse(name)
    } else {
        Some(ValueType::Struct(name.clone()))
    };
    ty.ok_or_else(|| {
        ExprError::new(
            DiagnosticKind::UnknownType,
            format!("Unknown type '{name}'"),
            call.span.clone(),
        )
    })
}

fn unknown_identifier(name: &str, expr: &Expr) -> ExprError {
    ExprError::new(
        DiagnosticKind::UnknownIdentifier,
        format!("identifier '{name}' is neither input or local or global variable"),
        expr.span.clone(),
    )
}

pub fn unknown_enum_member(enum_name: &str, member: &str, expr: &Expr) -> ExprError {
    ExprError::new(
        DiagnosticKind::UnknownMember,
        format!("Member '{member}' does not exist in enum '{enum_name}'"),
        expr.span.clone(),
    )
}

pub fn unknown_field(object_type: &ValueType, field: &str, expr: &Expr) -> ExprError {
    ExprError::new(
        DiagnosticKind::UnknownMember,
        format!("field not found: \"{object_type}\".\"{field}\""),
        expr.span.clone(),
    )
}
