//! Compiled program container: header plus payload.

use std::io;
use std::path::Path;

use crate::header::{HEADER_SIZE, Header, ProjectType, VERSION_MAJOR};
use crate::reader::ByteReader;

#[derive(Debug, thiserror::Error)]
pub enum ProgramError {
    #[error("invalid tag: expected ~eez")]
    InvalidTag,
    #[error("unsupported version: {0} (expected {VERSION_MAJOR})")]
    UnsupportedVersion(u8),
    #[error("unknown project type: {0}")]
    UnknownProjectType(u16),
    #[error("file too small: {0} bytes (minimum {HEADER_SIZE})")]
    FileTooSmall(usize),
    #[error("size mismatch: header says {header} bytes, got {actual}")]
    SizeMismatch { header: u32, actual: usize },
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// A validated program. The payload is everything after the header.
#[derive(Debug, Clone)]
pub struct Program {
    header: Header,
    project_type: ProjectType,
    bytes: Vec<u8>,
}

impl Program {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, ProgramError> {
        let header = Header::from_bytes(&bytes).ok_or(ProgramError::FileTooSmall(bytes.len()))?;

        if !header.validate_tag() {
            return Err(ProgramError::InvalidTag);
        }
        if !header.validate_version() {
            return Err(ProgramError::UnsupportedVersion(header.major));
        }
        let project_type = ProjectType::from_u16(header.project_type)
            .ok_or(ProgramError::UnknownProjectType(header.project_type))?;

        let actual = bytes.len() - HEADER_SIZE;
        if header.decompressed_size as usize != actual {
            return Err(ProgramError::SizeMismatch {
                header: header.decompressed_size,
                actual,
            });
        }

        Ok(Self {
            header,
            project_type,
            bytes,
        })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ProgramError> {
        Self::from_bytes(std::fs::read(path)?)
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn project_type(&self) -> ProjectType {
        self.project_type
    }

    pub fn payload(&self) -> &[u8] {
        &self.bytes[HEADER_SIZE..]
    }

    pub fn reader(&self) -> ByteReader<'_> {
        ByteReader::new(self.payload())
    }
}

#[cfg(test)]
#[path = "program_tests.rs"]
mod program_tests;
