//! Component encoding protocol.
//!
//! Every component is written as the same generic header (type, inputs,
//! property streams, outputs with their connection lines, error-catch
//! output) followed by a payload only its kind knows how to produce.
//! Per-kind behavior is looked up in a [`Registry`] of [`Descriptor`]s.

mod encoder;
mod payload;
mod ports;
mod properties;
mod registry;

#[cfg(test)]
mod component_tests;

pub use encoder::{EncodeContext, encode_component, write_instructions};
pub use payload::compare_condition;
pub use ports::{ERROR_OUT, Port, Ports, SEQ_IN, SEQ_OUT, build_ports};
pub use properties::{Property, PropertyMode, missing_properties, properties};
pub use registry::{Descriptor, KindTag, PayloadEncoder, Registry};
