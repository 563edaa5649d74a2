//! Program header (12 bytes).
//!
//! Layout:
//! - 0-3: tag `~eez`
//! - 4: major version, 5: minor version
//! - 6-7: project type
//! - 8-11: size of the payload that follows the header

/// Tag bytes at the start of every program.
pub const TAG: [u8; 4] = *b"~eez";
pub const VERSION_MAJOR: u8 = 3;
pub const VERSION_MINOR: u8 = 0;
pub const HEADER_SIZE: usize = 12;

/// Build target recorded in the header.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[repr(u16)]
pub enum ProjectType {
    #[default]
    Firmware = 1,
    FirmwareModule = 2,
    Resource = 3,
    Applet = 4,
    Dashboard = 5,
    Lvgl = 6,
}

impl ProjectType {
    pub fn from_u16(value: u16) -> Option<Self> {
        Some(match value {
            1 => Self::Firmware,
            2 => Self::FirmwareModule,
            3 => Self::Resource,
            4 => Self::Applet,
            5 => Self::Dashboard,
            6 => Self::Lvgl,
            _ => return None,
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Firmware => "firmware",
            Self::FirmwareModule => "firmware-module",
            Self::Resource => "resource",
            Self::Applet => "applet",
            Self::Dashboard => "dashboard",
            Self::Lvgl => "lvgl",
        }
    }

    /// Dashboard projects run in a desktop VM that also executes widgets,
    /// every other target runs on the embedded interpreter.
    pub fn is_dashboard(self) -> bool {
        matches!(self, Self::Dashboard)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Header {
    pub tag: [u8; 4],
    pub major: u8,
    pub minor: u8,
    pub project_type: u16,
    /// Payload size in bytes. Payloads are stored uncompressed, so this is
    /// also the number of bytes following the header.
    pub decompressed_size: u32,
}

impl Header {
    pub fn new(project_type: ProjectType, decompressed_size: u32) -> Self {
        Self {
            tag: TAG,
            major: VERSION_MAJOR,
            minor: VERSION_MINOR,
            project_type: project_type as u16,
            decompressed_size,
        }
    }

    /// Decode header from the first 12 bytes. Returns `None` on short input.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < HEADER_SIZE {
            return None;
        }
        Some(Self {
            tag: [bytes[0], bytes[1], bytes[2], bytes[3]],
            major: bytes[4],
            minor: bytes[5],
            project_type: u16::from_le_bytes([bytes[6], bytes[7]]),
            decompressed_size: u32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]),
        })
    }

    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut bytes = [0u8; HEADER_SIZE];
        bytes[0..4].copy_from_slice(&self.tag);
        bytes[4] = self.major;
        bytes[5] = self.minor;
        bytes[6..8].copy_from_slice(&self.project_type.to_le_bytes());
        bytes[8..12].copy_from_slice(&self.decompressed_size.to_le_bytes());
        bytes
    }

    pub fn validate_tag(&self) -> bool {
        self.tag == TAG
    }

    pub fn validate_version(&self) -> bool {
        self.major == VERSION_MAJOR
    }
}

#[cfg(test)]
#[path = "header_tests.rs"]
mod header_tests;
