//! Bounds-checked reader for program payloads.
//!
//! Positions are absolute within the payload. Offsets stored in the payload
//! are relative to the slot holding them, so [`ByteReader::offset`] adds the
//! slot position back.

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ReadError {
    #[error("read of {len} bytes at {pos} is out of bounds (payload is {size} bytes)")]
    OutOfBounds { pos: usize, len: usize, size: usize },
    #[error("null offset at {0}")]
    NullOffset(usize),
    #[error("offset at {slot} points to {target}, past the end of the payload")]
    DanglingOffset { slot: usize, target: usize },
    #[error("unterminated string at {0}")]
    UnterminatedString(usize),
    #[error("value at {0} is nested too deeply")]
    NestedTooDeeply(usize),
}

/// Count plus position of the first element of a contiguous number array.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NumberArray {
    pub count: usize,
    pub start: usize,
}

#[derive(Clone, Copy, Debug)]
pub struct ByteReader<'a> {
    bytes: &'a [u8],
}

impl<'a> ByteReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn bytes(&self, pos: usize, len: usize) -> Result<&'a [u8], ReadError> {
        pos.checked_add(len)
            .and_then(|end| self.bytes.get(pos..end))
            .ok_or(ReadError::OutOfBounds {
                pos,
                len,
                size: self.bytes.len(),
            })
    }

    fn array<const N: usize>(&self, pos: usize) -> Result<[u8; N], ReadError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.bytes(pos, N)?);
        Ok(out)
    }

    pub fn u8(&self, pos: usize) -> Result<u8, ReadError> {
        Ok(self.array::<1>(pos)?[0])
    }

    pub fn u16(&self, pos: usize) -> Result<u16, ReadError> {
        Ok(u16::from_le_bytes(self.array(pos)?))
    }

    pub fn i16(&self, pos: usize) -> Result<i16, ReadError> {
        Ok(i16::from_le_bytes(self.array(pos)?))
    }

    pub fn u32(&self, pos: usize) -> Result<u32, ReadError> {
        Ok(u32::from_le_bytes(self.array(pos)?))
    }

    pub fn i32(&self, pos: usize) -> Result<i32, ReadError> {
        Ok(i32::from_le_bytes(self.array(pos)?))
    }

    pub fn f32(&self, pos: usize) -> Result<f32, ReadError> {
        Ok(f32::from_le_bytes(self.array(pos)?))
    }

    pub fn f64(&self, pos: usize) -> Result<f64, ReadError> {
        Ok(f64::from_le_bytes(self.array(pos)?))
    }

    /// Follow the relative offset stored at `slot`.
    pub fn offset(&self, slot: usize) -> Result<usize, ReadError> {
        let rel = self.u32(slot)? as usize;
        if rel == 0 {
            return Err(ReadError::NullOffset(slot));
        }
        let target = slot + rel;
        if target >= self.bytes.len() {
            return Err(ReadError::DanglingOffset { slot, target });
        }
        Ok(target)
    }

    /// Read an object array: `u32` count, then an offset to a table of
    /// per-item offsets. Returns the start position of every item.
    pub fn object_array(&self, pos: usize) -> Result<Vec<usize>, ReadError> {
        let count = self.u32(pos)? as usize;
        if count == 0 {
            return Ok(Vec::new());
        }
        let table = self.offset(pos + 4)?;
        (0..count).map(|i| self.offset(table + i * 4)).collect()
    }

    /// Read a number array: `u32` count, then an offset to contiguous items.
    pub fn number_array(&self, pos: usize) -> Result<NumberArray, ReadError> {
        let count = self.u32(pos)? as usize;
        if count == 0 {
            return Ok(NumberArray { count, start: 0 });
        }
        let start = self.offset(pos + 4)?;
        Ok(NumberArray { count, start })
    }

    /// Read a NUL-terminated UTF-8 string (lossy).
    pub fn c_str(&self, pos: usize) -> Result<String, ReadError> {
        let tail = self.bytes.get(pos..).ok_or(ReadError::OutOfBounds {
            pos,
            len: 1,
            size: self.bytes.len(),
        })?;
        let end = tail
            .iter()
            .position(|&b| b == 0)
            .ok_or(ReadError::UnterminatedString(pos))?;
        Ok(String::from_utf8_lossy(&tail[..end]).into_owned())
    }
}

#[cfg(test)]
#[path = "reader_tests.rs"]
mod reader_tests;
