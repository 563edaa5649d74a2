//! Expression instructions.
//!
//! Each instruction is a little-endian `u16`: the top 3 bits select the
//! kind, the low 13 bits carry the argument. Streams are written without
//! alignment and always end with [`Instruction::End`].

use std::fmt;

const KIND_SHIFT: u16 = 13;
const ARG_MASK: u16 = (1 << KIND_SHIFT) - 1;

/// Largest argument that fits into an instruction.
pub const MAX_ARG: u16 = ARG_MASK;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum InstructionKind {
    PushConstant = 0,
    PushInput = 1,
    PushLocalVar = 2,
    PushGlobalVar = 3,
    PushOutput = 4,
    ArrayElement = 5,
    Operation = 6,
    End = 7,
}

impl InstructionKind {
    fn from_bits(bits: u16) -> Self {
        match bits & 0b111 {
            0 => Self::PushConstant,
            1 => Self::PushInput,
            2 => Self::PushLocalVar,
            3 => Self::PushGlobalVar,
            4 => Self::PushOutput,
            5 => Self::ArrayElement,
            6 => Self::Operation,
            _ => Self::End,
        }
    }

    pub fn mnemonic(self) -> &'static str {
        match self {
            Self::PushConstant => "push_const",
            Self::PushInput => "push_input",
            Self::PushLocalVar => "push_local",
            Self::PushGlobalVar => "push_global",
            Self::PushOutput => "push_output",
            Self::ArrayElement => "array_elem",
            Self::Operation => "op",
            Self::End => "end",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Instruction {
    PushConstant(u16),
    PushInput(u16),
    PushLocalVar(u16),
    PushGlobalVar(u16),
    PushOutput(u16),
    ArrayElement,
    Operation(u16),
    End,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{kind:?} argument {arg} exceeds {MAX_ARG}")]
pub struct EncodeError {
    pub kind: InstructionKind,
    pub arg: usize,
}

impl Instruction {
    pub fn kind(self) -> InstructionKind {
        match self {
            Self::PushConstant(_) => InstructionKind::PushConstant,
            Self::PushInput(_) => InstructionKind::PushInput,
            Self::PushLocalVar(_) => InstructionKind::PushLocalVar,
            Self::PushGlobalVar(_) => InstructionKind::PushGlobalVar,
            Self::PushOutput(_) => InstructionKind::PushOutput,
            Self::ArrayElement => InstructionKind::ArrayElement,
            Self::Operation(_) => InstructionKind::Operation,
            Self::End => InstructionKind::End,
        }
    }

    pub fn arg(self) -> u16 {
        match self {
            Self::PushConstant(a)
            | Self::PushInput(a)
            | Self::PushLocalVar(a)
            | Self::PushGlobalVar(a)
            | Self::PushOutput(a)
            | Self::Operation(a) => a,
            Self::ArrayElement | Self::End => 0,
        }
    }

    /// Build an instruction from a table index, checking the 13-bit limit.
    pub fn with_index(kind: InstructionKind, index: usize) -> Result<Self, EncodeError> {
        let arg = u16::try_from(index)
            .ok()
            .filter(|&a| a <= MAX_ARG)
            .ok_or(EncodeError { kind, arg: index })?;

        Ok(match kind {
            InstructionKind::PushConstant => Self::PushConstant(arg),
            InstructionKind::PushInput => Self::PushInput(arg),
            InstructionKind::PushLocalVar => Self::PushLocalVar(arg),
            InstructionKind::PushGlobalVar => Self::PushGlobalVar(arg),
            InstructionKind::PushOutput => Self::PushOutput(arg),
            InstructionKind::ArrayElement => Self::ArrayElement,
            InstructionKind::Operation => Self::Operation(arg),
            InstructionKind::End => Self::End,
        })
    }

    pub fn encode(self) -> u16 {
        ((self.kind() as u16) << KIND_SHIFT) | (self.arg() & ARG_MASK)
    }

    pub fn decode(word: u16) -> Self {
        let arg = word & ARG_MASK;
        match InstructionKind::from_bits(word >> KIND_SHIFT) {
            InstructionKind::PushConstant => Self::PushConstant(arg),
            InstructionKind::PushInput => Self::PushInput(arg),
            InstructionKind::PushLocalVar => Self::PushLocalVar(arg),
            InstructionKind::PushGlobalVar => Self::PushGlobalVar(arg),
            InstructionKind::PushOutput => Self::PushOutput(arg),
            InstructionKind::ArrayElement => Self::ArrayElement,
            InstructionKind::Operation => Self::Operation(arg),
            InstructionKind::End => Self::End,
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = self.kind();
        match self {
            Self::ArrayElement | Self::End => f.write_str(kind.mnemonic()),
            _ => write!(f, "{} {}", kind.mnemonic(), self.arg()),
        }
    }
}

/// Decode an instruction stream up to and including the first `End`.
///
/// Returns the instructions and the number of bytes consumed, or `None`
/// when the stream runs out before `End`.
pub fn decode_stream(bytes: &[u8]) -> Option<(Vec<Instruction>, usize)> {
    let mut out = Vec::new();
    let mut pos = 0;
    while pos + 2 <= bytes.len() {
        let instr = Instruction::decode(u16::from_le_bytes([bytes[pos], bytes[pos + 1]]));
        pos += 2;
        out.push(instr);
        if instr == Instruction::End {
            return Some((out, pos));
        }
    }
    None
}

#[cfg(test)]
#[path = "instructions_tests.rs"]
mod instructions_tests;
