//! Append-only binary writer with deferred objects.
//!
//! `write_object_offset` reserves a 4-byte slot and builds the referenced
//! object into a child buffer right away. Children are laid out after their
//! parent at [`DataBuffer::finalize`], breadth-first, and every slot is
//! patched with `target - slot`. Alignment is tracked per buffer: a child is
//! placed at a multiple of the largest alignment it used internally, so
//! alignment relative to the child's start is also absolute alignment.

#[cfg(test)]
mod writer_tests;

use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WriterError {
    #[error("reservation at slot {slot} was never filled")]
    UnfilledReservation { slot: usize },
    #[error("reservation {index} does not belong to this buffer")]
    ForeignReservation { index: usize },
    #[error("reservation {index} was already filled")]
    AlreadyFilled { index: usize },
    #[error("object of {size} bytes does not fit a 32-bit offset")]
    OffsetOverflow { size: usize },
}

/// A slot whose object is produced later through [`DataBuffer::fill_array`].
#[derive(Debug)]
#[must_use = "a reservation must be filled before the buffer is finalized"]
pub struct ArrayReservation {
    count_slot: usize,
    deferred: usize,
    layout: ReservedLayout,
}

#[derive(Debug, Clone, Copy)]
enum ReservedLayout {
    /// Table of per-item object offsets, items placed at `item_align`.
    Objects { item_align: usize },
    /// Items back to back, as in [`DataBuffer::write_number_array`].
    Numbers,
}

#[derive(Debug)]
enum Content {
    Ready(DataBuffer),
    Reserved,
    /// Filled with no items; the slot stays zero.
    Empty,
}

#[derive(Debug)]
struct Deferred {
    slot: usize,
    align: usize,
    content: Content,
}

#[derive(Debug, Default)]
pub struct DataBuffer {
    bytes: Vec<u8>,
    max_align: usize,
    deferred: Vec<Deferred>,
}

impl DataBuffer {
    pub fn new() -> Self {
        Self {
            bytes: Vec::new(),
            max_align: 1,
            deferred: Vec::new(),
        }
    }

    /// Bytes written directly into this buffer (children excluded).
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn align_to(&mut self, align: usize) {
        debug_assert!(align.is_power_of_two());
        self.max_align = self.max_align.max(align);
        let rem = self.bytes.len() % align;
        if rem != 0 {
            self.bytes.resize(self.bytes.len() + align - rem, 0);
        }
    }

    pub fn write_u8(&mut self, value: u8) {
        self.bytes.push(value);
    }

    pub fn write_i8(&mut self, value: i8) {
        self.bytes.push(value as u8);
    }

    pub fn write_u16(&mut self, value: u16) {
        self.align_to(2);
        self.bytes.extend_from_slice(&value.to_le_bytes());
    }

    /// Unaligned variant for instruction streams.
    pub fn write_u16_non_aligned(&mut self, value: u16) {
        self.bytes.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_i16(&mut self, value: i16) {
        self.align_to(2);
        self.bytes.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_u32(&mut self, value: u32) {
        self.align_to(4);
        self.bytes.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_i32(&mut self, value: i32) {
        self.align_to(4);
        self.bytes.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_f32(&mut self, value: f32) {
        self.align_to(4);
        self.bytes.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_f64(&mut self, value: f64) {
        self.align_to(8);
        self.bytes.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes);
    }

    /// UTF-8 bytes plus a NUL terminator.
    pub fn write_string(&mut self, value: &str) {
        self.bytes.extend_from_slice(value.as_bytes());
        self.bytes.push(0);
    }

    /// Reserve a 4-byte offset slot and build the referenced object now.
    pub fn write_object_offset(&mut self, align: usize, emit: impl FnOnce(&mut DataBuffer)) {
        self.align_to(4);
        let slot = self.bytes.len();
        self.bytes.extend_from_slice(&[0; 4]);

        let mut child = DataBuffer::new();
        emit(&mut child);
        self.deferred.push(Deferred {
            slot,
            align,
            content: Content::Ready(child),
        });
    }

    /// `u32` count, then an offset to a table of per-item object offsets.
    pub fn write_array<T>(&mut self, items: &[T], emit: impl FnMut(&mut DataBuffer, &T)) {
        self.write_array_aligned(items, 4, emit);
    }

    /// Like [`write_array`](Self::write_array), placing every item at `item_align`.
    pub fn write_array_aligned<T>(
        &mut self,
        items: &[T],
        item_align: usize,
        mut emit: impl FnMut(&mut DataBuffer, &T),
    ) {
        self.write_u32(items.len() as u32);
        if items.is_empty() {
            self.write_u32(0);
            return;
        }
        self.write_object_offset(4, |table| {
            for item in items {
                table.write_object_offset(item_align, |object| emit(object, item));
            }
        });
    }

    /// `u32` count, then an offset to the items written back to back.
    pub fn write_number_array<T>(&mut self, items: &[T], mut emit: impl FnMut(&mut DataBuffer, &T)) {
        self.write_u32(items.len() as u32);
        if items.is_empty() {
            self.write_u32(0);
            return;
        }
        self.write_object_offset(4, |run| {
            for item in items {
                emit(run, item);
            }
        });
    }

    /// Reserve an array whose items are only known after later writes.
    ///
    /// Writes a placeholder count and offset slot. The array must be
    /// completed with [`fill_array`](Self::fill_array) on this same buffer.
    pub fn reserve_array(&mut self, item_align: usize) -> ArrayReservation {
        self.reserve(ReservedLayout::Objects { item_align })
    }

    /// Number-array counterpart of [`reserve_array`](Self::reserve_array).
    pub fn reserve_number_array(&mut self) -> ArrayReservation {
        self.reserve(ReservedLayout::Numbers)
    }

    fn reserve(&mut self, layout: ReservedLayout) -> ArrayReservation {
        self.align_to(4);
        let count_slot = self.bytes.len();
        self.bytes.extend_from_slice(&[0; 4]);
        let slot = self.bytes.len();
        self.bytes.extend_from_slice(&[0; 4]);

        self.deferred.push(Deferred {
            slot,
            align: 4,
            content: Content::Reserved,
        });
        ArrayReservation {
            count_slot,
            deferred: self.deferred.len() - 1,
            layout,
        }
    }

    pub fn fill_array<T>(
        &mut self,
        reservation: ArrayReservation,
        items: &[T],
        mut emit: impl FnMut(&mut DataBuffer, &T),
    ) -> Result<(), WriterError> {
        let index = reservation.deferred;
        let entry = self
            .deferred
            .get_mut(index)
            .filter(|d| d.slot == reservation.count_slot + 4)
            .ok_or(WriterError::ForeignReservation { index })?;
        if !matches!(entry.content, Content::Reserved) {
            return Err(WriterError::AlreadyFilled { index });
        }

        entry.content = if items.is_empty() {
            Content::Empty
        } else {
            let mut table = DataBuffer::new();
            for item in items {
                match reservation.layout {
                    ReservedLayout::Objects { item_align } => {
                        table.write_object_offset(item_align, |object| emit(object, item))
                    }
                    ReservedLayout::Numbers => emit(&mut table, item),
                }
            }
            Content::Ready(table)
        };

        let count = (items.len() as u32).to_le_bytes();
        let at = reservation.count_slot;
        self.bytes[at..at + 4].copy_from_slice(&count);
        Ok(())
    }

    /// Lay out all deferred objects and patch every offset slot.
    pub fn finalize(self) -> Result<Vec<u8>, WriterError> {
        let mut out = self.bytes;
        let mut queue: VecDeque<(usize, Deferred)> =
            self.deferred.into_iter().map(|d| (0, d)).collect();

        while let Some((base, deferred)) = queue.pop_front() {
            let slot = base + deferred.slot;
            let child = match deferred.content {
                Content::Ready(child) => child,
                Content::Empty => continue,
                Content::Reserved => return Err(WriterError::UnfilledReservation { slot }),
            };

            let align = deferred.align.max(child.max_align);
            let rem = out.len() % align;
            if rem != 0 {
                out.resize(out.len() + align - rem, 0);
            }

            let start = out.len();
            let rel = u32::try_from(start - slot)
                .map_err(|_| WriterError::OffsetOverflow { size: start })?;
            out[slot..slot + 4].copy_from_slice(&rel.to_le_bytes());
            out.extend_from_slice(&child.bytes);

            queue.extend(child.deferred.into_iter().map(|d| (start, d)));
        }

        Ok(out)
    }
}
