//! Compile-time values and the deduplicating constant pool.

use std::fmt;

use indexmap::IndexMap;

use crate::project::ValueType;

/// A value known at compile time.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Undefined,
    Null,
    Boolean(bool),
    Integer(i32),
    Float(f32),
    Double(f64),
    String(String),
    Array(Vec<Value>),
    /// Object literal fields in source order, matched to a structure when encoded.
    Object(Vec<(String, Value)>),
}

impl Value {
    /// Type a folded value carries on its own.
    pub fn natural_type(&self) -> ValueType {
        match self {
            Self::Undefined => ValueType::Undefined,
            Self::Null => ValueType::Null,
            Self::Boolean(_) => ValueType::Boolean,
            Self::Integer(_) => ValueType::Integer,
            Self::Float(_) => ValueType::Float,
            Self::Double(_) => ValueType::Double,
            Self::String(_) => ValueType::String,
            Self::Array(items) => ValueType::array_of(
                items
                    .first()
                    .map_or(ValueType::Any, |item| item.natural_type()),
            ),
            Self::Object(_) => ValueType::Struct("any".to_string()),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(v) => Some(f64::from(*v)),
            Self::Float(v) => Some(f64::from(*v)),
            Self::Double(v) => Some(*v),
            Self::Boolean(v) => Some(if *v { 1.0 } else { 0.0 }),
            _ => None,
        }
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Undefined | Self::Null => false,
            Self::Boolean(v) => *v,
            Self::Integer(v) => *v != 0,
            Self::Float(v) => *v != 0.0,
            Self::Double(v) => *v != 0.0 && !v.is_nan(),
            Self::String(s) => !s.is_empty(),
            Self::Array(_) | Self::Object(_) => true,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undefined => f.write_str("undefined"),
            Self::Null => f.write_str("null"),
            Self::Boolean(v) => write!(f, "{v}"),
            Self::Integer(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Double(v) => write!(f, "{v}"),
            Self::String(s) => f.write_str(s),
            Self::Array(items) => {
                let parts: Vec<String> = items.iter().map(ToString::to_string).collect();
                f.write_str(&parts.join(","))
            }
            Self::Object(_) => f.write_str("[object Object]"),
        }
    }
}

/// Hashable image of a [`Value`]; floats compare by bit pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum ValueKey {
    Undefined,
    Null,
    Boolean(bool),
    Integer(i32),
    Float(u32),
    Double(u64),
    String(String),
    Array(Vec<ValueKey>),
    Object(Vec<(String, ValueKey)>),
}

impl From<&Value> for ValueKey {
    fn from(value: &Value) -> Self {
        match value {
            Value::Undefined => Self::Undefined,
            Value::Null => Self::Null,
            Value::Boolean(v) => Self::Boolean(*v),
            Value::Integer(v) => Self::Integer(*v),
            Value::Float(v) => Self::Float(v.to_bits()),
            Value::Double(v) => Self::Double(v.to_bits()),
            Value::String(s) => Self::String(s.clone()),
            Value::Array(items) => Self::Array(items.iter().map(Self::from).collect()),
            Value::Object(fields) => Self::Object(
                fields
                    .iter()
                    .map(|(name, v)| (name.clone(), Self::from(v)))
                    .collect(),
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Constant {
    pub value: Value,
    pub value_type: ValueType,
}

/// Constant pool keyed by `(value, type)`.
///
/// Index 0 is always `undefined` and index 1 is always `null`.
#[derive(Debug, Clone)]
pub struct ConstantTable {
    entries: IndexMap<(ValueKey, ValueType), Constant>,
}

impl ConstantTable {
    pub fn new() -> Self {
        let mut table = Self {
            entries: IndexMap::new(),
        };
        table.intern(Value::Undefined, ValueType::Undefined);
        table.intern(Value::Null, ValueType::Null);
        table
    }

    /// Index of `(value, value_type)`, appending it on first use.
    pub fn intern(&mut self, value: Value, value_type: ValueType) -> usize {
        let key = (ValueKey::from(&value), value_type.clone());
        if let Some(index) = self.entries.get_index_of(&key) {
            return index;
        }
        let (index, _) = self.entries.insert_full(key, Constant { value, value_type });
        index
    }

    pub fn get(&self, index: usize) -> Option<&Constant> {
        self.entries.get_index(index).map(|(_, c)| c)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Constant> {
        self.entries.values()
    }
}

impl Default for ConstantTable {
    fn default() -> Self {
        Self::new()
    }
}
