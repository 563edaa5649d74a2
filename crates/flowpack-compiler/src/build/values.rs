//! Flow value encoding for the constant pool and variable tables.

use flowpack_bytecode::FlowValueType;
use flowpack_bytecode::value::FLOW_VALUE_ALIGN;

use crate::assets::{Assets, Value};
use crate::diagnostics::{DiagnosticKind, Diagnostics, Section};
use crate::expr::eval_constant_expression;
use crate::project::{Flow, Project, ValueType, Variable};
use crate::writer::DataBuffer;

/// Runtime type code a value of `ty` is stored under.
pub fn flow_value_type(ty: &ValueType) -> FlowValueType {
    match ty {
        ValueType::Undefined => FlowValueType::Undefined,
        ValueType::Null => FlowValueType::Null,
        ValueType::Boolean => FlowValueType::Boolean,
        ValueType::Integer | ValueType::Enum(_) => FlowValueType::Int32,
        ValueType::Float => FlowValueType::Float,
        ValueType::Double => FlowValueType::Double,
        ValueType::String => FlowValueType::StringAsset,
        ValueType::Date => FlowValueType::Date,
        ValueType::Widget => FlowValueType::Widget,
        ValueType::Json => FlowValueType::Json,
        ValueType::Event => FlowValueType::Event,
        ValueType::Array(_) | ValueType::Struct(_) => FlowValueType::ArrayAsset,
        _ => FlowValueType::Uint32,
    }
}

/// Value a variable of `ty` starts with when it has no default.
pub fn default_value(project: &Project, ty: &ValueType) -> Value {
    match ty {
        ValueType::Boolean => Value::Boolean(false),
        ValueType::Integer => Value::Integer(0),
        ValueType::Float => Value::Float(0.0),
        ValueType::Double | ValueType::Date => Value::Double(0.0),
        ValueType::String => Value::String(String::new()),
        ValueType::Enum(name) => Value::Integer(
            project
                .find_enum(name)
                .and_then(|e| e.members.first())
                .map_or(0, |m| m.value),
        ),
        ValueType::Array(_) => Value::Array(Vec::new()),
        _ => Value::Null,
    }
}

/// Write one 16-byte flow value.
///
/// `any` (and a value that is plainly undefined or null) is stored under the
/// value's own type.
pub fn write_value(buf: &mut DataBuffer, assets: &mut Assets<'_>, value: &Value, ty: &ValueType) {
    let ty = match value {
        Value::Undefined | Value::Null => value.natural_type(),
        _ if matches!(ty, ValueType::Any) => value.natural_type(),
        _ => ty.clone(),
    };
    let code = flow_value_type(&ty);

    buf.align_to(FLOW_VALUE_ALIGN);
    buf.write_u8(code as u8);
    buf.write_u8(0);
    buf.write_u16(0);
    buf.write_u32(0);

    match code {
        FlowValueType::Boolean => {
            buf.write_u32(u32::from(value.is_truthy()));
            buf.write_u32(0);
        }
        FlowValueType::Int32 | FlowValueType::Json => {
            buf.write_i32(value.as_f64().map_or(0, |v| v as i32));
            buf.write_u32(0);
        }
        FlowValueType::Uint32 => {
            buf.write_u32(value.as_f64().map_or(0, |v| v as u32));
            buf.write_u32(0);
        }
        FlowValueType::Float => {
            buf.write_f32(value.as_f64().map_or(0.0, |v| v as f32));
            buf.write_u32(0);
        }
        FlowValueType::Double | FlowValueType::Date => {
            buf.write_f64(value.as_f64().unwrap_or(0.0));
        }
        FlowValueType::StringAsset => {
            let text = value.to_string();
            buf.write_object_offset(1, |s| s.write_string(&text));
            buf.write_u32(0);
        }
        FlowValueType::ArrayAsset => {
            let elements = array_elements(assets.project(), value, &ty);
            let type_index = assets.type_index(&ty) as u32;
            buf.write_object_offset(FLOW_VALUE_ALIGN, |array| {
                array.write_u32(elements.len() as u32);
                array.write_u32(type_index);
                for (element, element_type) in &elements {
                    write_value(array, assets, element, element_type);
                }
            });
            buf.write_u32(0);
        }
        _ => {
            buf.write_u32(0);
            buf.write_u32(0);
        }
    }
}

/// Elements with their types: array items in order, struct fields in declaration order.
fn array_elements(project: &Project, value: &Value, ty: &ValueType) -> Vec<(Value, ValueType)> {
    match ty {
        ValueType::Array(element) => match value {
            Value::Array(items) => items
                .iter()
                .map(|item| (item.clone(), (**element).clone()))
                .collect(),
            _ => Vec::new(),
        },
        ValueType::Struct(name) => {
            let Some(structure) = project.find_struct(name) else {
                return Vec::new();
            };
            let fields = match value {
                Value::Object(fields) => fields.as_slice(),
                _ => &[],
            };
            structure
                .fields
                .iter()
                .map(|field| {
                    let field_type = ValueType::parse(&field.value_type).unwrap_or(ValueType::Any);
                    let value = fields
                        .iter()
                        .find(|(name, _)| *name == field.name)
                        .map(|(_, v)| v.clone())
                        .unwrap_or_else(|| default_value(project, &field_type));
                    (value, field_type)
                })
                .collect()
        }
        _ => Vec::new(),
    }
}

/// Write a variable's initial value, folding its default expression.
pub fn write_variable(
    buf: &mut DataBuffer,
    assets: &mut Assets<'_>,
    diagnostics: &mut Diagnostics,
    flow: Option<&Flow>,
    variable: &Variable,
) {
    let project = assets.project();
    let ty = match ValueType::parse(&variable.value_type) {
        Some(ty) => ty,
        None => {
            let builder = diagnostics
                .report(DiagnosticKind::UnknownType, Section::Build)
                .message(format!("Unknown type '{}'", variable.value_type))
                .property(variable.name.clone());
            match flow {
                Some(flow) => builder.at(&flow.name, None).emit(),
                None => builder.emit(),
            }
            ValueType::Any
        }
    };

    let value = if variable.default_value.trim().is_empty() {
        default_value(project, &ty)
    } else {
        match eval_constant_expression(project, &variable.default_value) {
            Ok((value, _)) => value,
            Err(err) => {
                let builder = err
                    .report(diagnostics, &variable.default_value)
                    .property(variable.name.clone());
                match flow {
                    Some(flow) => builder.at(&flow.name, None).emit(),
                    None => builder.emit(),
                }
                Value::Null
            }
        }
    };

    write_value(buf, assets, &value, &ty);
}
