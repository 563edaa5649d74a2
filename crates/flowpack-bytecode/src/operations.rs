//! Runtime operation table.
//!
//! Indexes are part of the wire contract: an `OPERATION n` instruction
//! dispatches to entry `n` of the interpreter's table. Gaps (69, 78, 81-87)
//! belong to operations this compiler never emits.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Arity {
    Fixed(u8),
    /// Variadic call. The compiler pushes the argument count before `OPERATION`.
    Range { min: u8, max: u8 },
}

impl Arity {
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Self::Fixed(n) => count == n as usize,
            Self::Range { min, max } => (min as usize..=max as usize).contains(&count),
        }
    }

    pub fn is_variadic(self) -> bool {
        matches!(self, Self::Range { .. })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Operation {
    pub name: &'static str,
    pub index: u16,
    pub arity: Arity,
}

const fn op(name: &'static str, index: u16, arity: u8) -> Operation {
    Operation {
        name,
        index,
        arity: Arity::Fixed(arity),
    }
}

const fn var(name: &'static str, index: u16, min: u8, max: u8) -> Operation {
    Operation {
        name,
        index,
        arity: Arity::Range { min, max },
    }
}

pub const CONDITIONAL: &str = "conditional";

pub static OPERATIONS: &[Operation] = &[
    op("add", 0, 2),
    op("sub", 1, 2),
    op("mul", 2, 2),
    op("div", 3, 2),
    op("mod", 4, 2),
    op("left_shift", 5, 2),
    op("right_shift", 6, 2),
    op("binary_and", 7, 2),
    op("binary_or", 8, 2),
    op("binary_xor", 9, 2),
    op("equal", 10, 2),
    op("not_equal", 11, 2),
    op("less", 12, 2),
    op("greater", 13, 2),
    op("less_or_equal", 14, 2),
    op("greater_or_equal", 15, 2),
    op("logical_and", 16, 2),
    op("logical_or", 17, 2),
    op("unary_plus", 18, 1),
    op("unary_minus", 19, 1),
    op("binary_one_complement", 20, 1),
    op("not", 21, 1),
    op(CONDITIONAL, 22, 3),
    op("System.getTick", 23, 0),
    op("Flow.index", 24, 1),
    op("Flow.isPageActive", 25, 0),
    op("Flow.pageTimelinePosition", 26, 0),
    op("Flow.makeValue", 27, 2),
    op("Flow.makeArrayValue", 28, 2),
    op("Flow.languages", 29, 0),
    op("Flow.translate", 30, 1),
    op("Flow.parseInteger", 31, 1),
    op("Flow.parseFloat", 32, 1),
    op("Flow.parseDouble", 33, 1),
    op("Date.now", 34, 0),
    op("Date.toString", 35, 1),
    op("Date.fromString", 36, 1),
    op("Math.sin", 37, 1),
    op("Math.cos", 38, 1),
    op("Math.log", 39, 1),
    op("Math.log10", 40, 1),
    op("Math.abs", 41, 1),
    op("Math.floor", 42, 1),
    op("Math.ceil", 43, 1),
    var("Math.round", 44, 1, 2),
    var("Math.min", 45, 2, 255),
    var("Math.max", 46, 2, 255),
    op("String.length", 47, 1),
    var("String.substring", 48, 2, 3),
    op("String.find", 49, 2),
    op("String.padStart", 50, 3),
    op("String.split", 51, 2),
    op("Array.length", 52, 1),
    var("Array.slice", 53, 1, 3),
    op("Array.allocate", 54, 1),
    op("Array.append", 55, 2),
    op("Array.insert", 56, 3),
    op("Array.remove", 57, 2),
    op("Array.clone", 58, 1),
    op("Date.toLocaleString", 59, 1),
    op("Date.getYear", 60, 1),
    op("Date.getMonth", 61, 1),
    op("Date.getDay", 62, 1),
    op("Date.getHours", 63, 1),
    op("Date.getMinutes", 64, 1),
    op("Date.getSeconds", 65, 1),
    op("Date.getMilliseconds", 66, 1),
    op("Date.make", 67, 7),
    op("Math.pow", 68, 2),
    op("Flow.getBitmapIndex", 70, 1),
    op("Flow.toInteger", 71, 1),
    op("String.fromCodePoint", 72, 1),
    op("String.codePointAt", 73, 2),
    op("Crypto.sha256", 74, 1),
    op("Blob.allocate", 75, 1),
    op("JSON.get", 76, 2),
    op("JSON.clone", 77, 1),
    op("String.format", 79, 2),
    op("String.formatPrefix", 80, 3),
    op("Blob.toString", 88, 1),
    op("Flow.themes", 89, 0),
];

/// Operators (index 0..=22) are not callable by name from expressions.
const FIRST_FUNCTION: u16 = 23;

pub fn by_name(name: &str) -> Option<&'static Operation> {
    OPERATIONS.iter().find(|op| op.name == name)
}

pub fn by_index(index: u16) -> Option<&'static Operation> {
    OPERATIONS.iter().find(|op| op.index == index)
}

/// Look up a built-in function (`Object.method`) callable from expressions.
pub fn function(name: &str) -> Option<&'static Operation> {
    by_name(name).filter(|op| op.index >= FIRST_FUNCTION)
}

#[cfg(test)]
#[path = "operations_tests.rs"]
mod operations_tests;
