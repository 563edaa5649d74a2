//! Built-in constants and result types of built-in functions.

use crate::assets::Value;
use crate::project::ValueType;

/// Value and type of a `Object.NAME` constant.
pub fn constant(name: &str) -> Option<(Value, ValueType)> {
    Some(match name {
        "Math.PI" => (Value::Double(std::f64::consts::PI), ValueType::Double),
        "Math.Infinity" => (Value::Double(f64::INFINITY), ValueType::Double),
        "System.Platform" => (Value::String(std::env::consts::OS.to_string()), ValueType::String),
        "System.Architecture" => (
            Value::String(std::env::consts::ARCH.to_string()),
            ValueType::String,
        ),
        _ => return None,
    })
}

/// Static result type of a call, given the argument types.
pub fn function_type(name: &str, args: &[ValueType]) -> ValueType {
    let first = args.first().cloned().unwrap_or(ValueType::Any);
    match name {
        "System.getTick" | "Flow.index" | "Flow.parseInteger" | "Flow.toInteger"
        | "Flow.getBitmapIndex" => ValueType::Integer,
        "Flow.parseFloat" => ValueType::Float,
        "Flow.parseDouble" => ValueType::Double,
        "Flow.isPageActive" => ValueType::Boolean,
        "Flow.translate" => ValueType::String,

        "Date.now" | "Date.fromString" | "Date.make" => ValueType::Date,
        "Date.toString" | "Date.toLocaleString" => ValueType::String,
        "Date.getYear" | "Date.getMonth" | "Date.getDay" | "Date.getHours"
        | "Date.getMinutes" | "Date.getSeconds" | "Date.getMilliseconds" => ValueType::Integer,

        "Math.sin" | "Math.cos" | "Math.floor" | "Math.ceil" | "Math.round" | "Math.log"
        | "Math.log10" | "Math.pow" => {
            if first == ValueType::Float {
                ValueType::Float
            } else {
                ValueType::Double
            }
        }
        "Math.abs" | "Math.min" | "Math.max" => {
            if first.is_numeric() {
                first
            } else {
                ValueType::Double
            }
        }

        "String.length" | "String.find" | "String.codePointAt" => ValueType::Integer,
        "String.substring" | "String.padStart" | "String.format" | "String.formatPrefix"
        | "String.fromCodePoint" | "Crypto.sha256" => ValueType::String,
        "String.split" => ValueType::array_of(ValueType::String),

        "Array.length" => ValueType::Integer,
        "Array.slice" | "Array.append" | "Array.insert" | "Array.remove" | "Array.clone" => first,
        "Array.allocate" => ValueType::array_of(ValueType::Any),

        "Blob.allocate" => ValueType::Blob,
        "Blob.toString" => ValueType::String,
        "JSON.get" | "JSON.clone" => ValueType::Json,

        _ => ValueType::Any,
    }
}
