//! Wire format of compiled flow programs.
//!
//! This crate contains:
//! - Program header and container validation (`header`, `program`)
//! - Expression instruction encoding (`instructions`)
//! - The runtime operation table (`operations`)
//! - Value and component type codes (`value`, `component_type`)
//! - Offset-following reader and human-readable dump (`reader`, `dump`)

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod component_type;
pub mod dump;
pub mod header;
pub mod instructions;
pub mod operations;
pub mod program;
pub mod reader;
pub mod value;

pub use component_type::ComponentType;
pub use dump::{dump, dump_expression};
pub use header::{HEADER_SIZE, Header, ProjectType, TAG, VERSION_MAJOR, VERSION_MINOR};
pub use instructions::{EncodeError, Instruction, InstructionKind};
pub use operations::{Arity, OPERATIONS, Operation};
pub use program::{Program, ProgramError};
pub use reader::{ByteReader, ReadError};
pub use value::{FLOW_VALUE_SIZE, FlowValueType};
