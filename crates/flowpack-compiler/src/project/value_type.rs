//! Value type signatures: `integer`, `enum:Color`, `array:struct:Point`, ...

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueType {
    Undefined,
    Null,
    Boolean,
    Integer,
    Float,
    Double,
    String,
    Date,
    Blob,
    Stream,
    Widget,
    Json,
    Event,
    Any,
    Object(String),
    Enum(String),
    /// `struct:any` is the type of an object literal before it meets a
    /// declared structure.
    Struct(String),
    Array(Box<ValueType>),
}

impl ValueType {
    pub fn parse(signature: &str) -> Option<Self> {
        let signature = signature.trim();
        if let Some((prefix, rest)) = signature.split_once(':') {
            if rest.is_empty() {
                return None;
            }
            return match prefix {
                "object" => Some(Self::Object(rest.to_string())),
                "enum" => Some(Self::Enum(rest.to_string())),
                "struct" => Some(Self::Struct(rest.to_string())),
                "array" => Self::parse(rest).map(|t| Self::Array(Box::new(t))),
                _ => None,
            };
        }
        Some(match signature {
            "undefined" => Self::Undefined,
            "null" => Self::Null,
            "boolean" => Self::Boolean,
            "integer" => Self::Integer,
            "float" => Self::Float,
            "double" => Self::Double,
            "string" => Self::String,
            "date" => Self::Date,
            "blob" => Self::Blob,
            "stream" => Self::Stream,
            "widget" => Self::Widget,
            "json" => Self::Json,
            "event" => Self::Event,
            "any" => Self::Any,
            _ => return None,
        })
    }

    pub fn array_of(element: ValueType) -> Self {
        Self::Array(Box::new(element))
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Integer | Self::Float | Self::Double)
    }

    /// Types that carry no static information.
    pub fn is_dynamic(&self) -> bool {
        matches!(self, Self::Any | Self::Undefined | Self::Null | Self::Json)
    }

    pub fn element(&self) -> Option<&ValueType> {
        match self {
            Self::Array(inner) => Some(inner),
            _ => None,
        }
    }

    /// Whether a value of type `actual` may be stored where `self` is expected.
    pub fn accepts(&self, actual: &ValueType) -> bool {
        if self == actual || self.is_dynamic() || actual.is_dynamic() {
            return true;
        }
        match (self, actual) {
            (a, b) if a.is_numeric() && b.is_numeric() => true,
            (Self::Boolean, b) if b.is_numeric() => true,
            (Self::Enum(_), Self::Integer) | (Self::Integer, Self::Enum(_)) => true,
            (Self::Struct(_), Self::Struct(name)) if name == "any" => true,
            (Self::Array(a), Self::Array(b)) => a.accepts(b),
            _ => false,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undefined => f.write_str("undefined"),
            Self::Null => f.write_str("null"),
            Self::Boolean => f.write_str("boolean"),
            Self::Integer => f.write_str("integer"),
            Self::Float => f.write_str("float"),
            Self::Double => f.write_str("double"),
            Self::String => f.write_str("string"),
            Self::Date => f.write_str("date"),
            Self::Blob => f.write_str("blob"),
            Self::Stream => f.write_str("stream"),
            Self::Widget => f.write_str("widget"),
            Self::Json => f.write_str("json"),
            Self::Event => f.write_str("event"),
            Self::Any => f.write_str("any"),
            Self::Object(name) => write!(f, "object:{name}"),
            Self::Enum(name) => write!(f, "enum:{name}"),
            Self::Struct(name) => write!(f, "struct:{name}"),
            Self::Array(inner) => write!(f, "array:{inner}"),
        }
    }
}
