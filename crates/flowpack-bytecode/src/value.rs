//! Flow value encoding.
//!
//! A flow value is 16 bytes: `u8` type, `u8` unit, `u16` options,
//! `u32` reserved, then an 8-byte union whose meaning depends on the type.

pub const FLOW_VALUE_SIZE: usize = 16;
/// Flow values hold doubles, so every value table is 8-byte aligned.
pub const FLOW_VALUE_ALIGN: usize = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum FlowValueType {
    Undefined = 0,
    Null = 1,
    Boolean = 2,
    Int8 = 3,
    Uint8 = 4,
    Int16 = 5,
    Uint16 = 6,
    Int32 = 7,
    Uint32 = 8,
    Int64 = 9,
    Uint64 = 10,
    Float = 11,
    Double = 12,
    String = 13,
    StringAsset = 14,
    Array = 15,
    ArrayAsset = 16,
    StringRef = 17,
    ArrayRef = 18,
    BlobRef = 19,
    Stream = 20,
    Date = 21,
    Widget = 34,
    Json = 35,
    Event = 37,
}

impl FlowValueType {
    pub fn from_u8(code: u8) -> Option<Self> {
        Some(match code {
            0 => Self::Undefined,
            1 => Self::Null,
            2 => Self::Boolean,
            3 => Self::Int8,
            4 => Self::Uint8,
            5 => Self::Int16,
            6 => Self::Uint16,
            7 => Self::Int32,
            8 => Self::Uint32,
            9 => Self::Int64,
            10 => Self::Uint64,
            11 => Self::Float,
            12 => Self::Double,
            13 => Self::String,
            14 => Self::StringAsset,
            15 => Self::Array,
            16 => Self::ArrayAsset,
            17 => Self::StringRef,
            18 => Self::ArrayRef,
            19 => Self::BlobRef,
            20 => Self::Stream,
            21 => Self::Date,
            34 => Self::Widget,
            35 => Self::Json,
            37 => Self::Event,
            _ => return None,
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Int8 => "int8",
            Self::Uint8 => "uint8",
            Self::Int16 => "int16",
            Self::Uint16 => "uint16",
            Self::Int32 => "int32",
            Self::Uint32 => "uint32",
            Self::Int64 => "int64",
            Self::Uint64 => "uint64",
            Self::Float => "float",
            Self::Double => "double",
            Self::String => "string",
            Self::StringAsset => "string_asset",
            Self::Array => "array",
            Self::ArrayAsset => "array_asset",
            Self::StringRef => "string_ref",
            Self::ArrayRef => "array_ref",
            Self::BlobRef => "blob_ref",
            Self::Stream => "stream",
            Self::Date => "date",
            Self::Widget => "widget",
            Self::Json => "json",
            Self::Event => "event",
        }
    }

    /// Whether the union holds an object offset rather than an inline value.
    pub fn is_offset(self) -> bool {
        matches!(self, Self::StringAsset | Self::ArrayAsset)
    }
}
