//! Type descriptor table.

use indexmap::IndexSet;

use crate::project::{Project, ValueType};

/// Signatures in first-use order. The position is the runtime type index.
#[derive(Debug, Clone, Default)]
pub struct TypeTable {
    signatures: IndexSet<String>,
}

impl TypeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of `ty`, or `None` when it names an unknown enum or structure.
    pub fn index(&mut self, project: &Project, ty: &ValueType) -> Option<usize> {
        if !is_known(project, ty) {
            return None;
        }
        let (index, _) = self.signatures.insert_full(ty.to_string());
        Some(index)
    }

    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }

    pub fn signatures(&self) -> impl Iterator<Item = &str> {
        self.signatures.iter().map(String::as_str)
    }
}

fn is_known(project: &Project, ty: &ValueType) -> bool {
    match ty {
        ValueType::Enum(name) => project.find_enum(name).is_some(),
        ValueType::Struct(name) => name == "any" || project.find_struct(name).is_some(),
        ValueType::Array(inner) => is_known(project, inner),
        _ => true,
    }
}
