//! Arithmetic addressing for rings of uniform-width slots.
//!
//! ```text
//! [newest index: pointer_size bytes BE][slot 0][slot 1]...[slot n-1][slack]
//! ```
//!
//! The k-th most recent record lives in slot `(newest - k) mod n`. Bytes past
//! the last whole slot are slack and belong to no record.

use crate::CyclicError;
use std::ops::Range;

/// Geometry of a fixed-slot elementary file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferLayout {
    /// Width of the leading newest-record pointer.
    pub pointer_size: usize,
    /// Width of every slot.
    pub slot_width: usize,
}

impl BufferLayout {
    #[must_use]
    pub const fn new(pointer_size: usize, slot_width: usize) -> Self {
        Self {
            pointer_size,
            slot_width,
        }
    }

    /// Number of whole slots in a value of `len` bytes.
    #[must_use]
    pub const fn slot_count(&self, len: usize) -> usize {
        len.saturating_sub(self.pointer_size) / self.slot_width
    }

    /// Read the big-endian newest-record pointer.
    ///
    /// # Errors
    ///
    /// Returns [`CyclicError::Truncated`] if `value` is shorter than the
    /// pointer.
    pub fn read_pointer(&self, value: &[u8]) -> Result<usize, CyclicError> {
        let bytes = value
            .get(..self.pointer_size)
            .ok_or(CyclicError::Truncated {
                needed: self.pointer_size,
                available: value.len(),
            })?;
        Ok(bytes.iter().fold(0usize, |acc, &b| (acc << 8) | usize::from(b)))
    }

    /// Overwrite the newest-record pointer.
    ///
    /// # Errors
    ///
    /// Returns [`CyclicError::Truncated`] if `value` is shorter than the
    /// pointer, or [`CyclicError::PointerOutOfRange`] if `pointer` does not
    /// fit its width.
    pub fn write_pointer(&self, value: &mut [u8], pointer: usize) -> Result<(), CyclicError> {
        let available = value.len();
        let field = value
            .get_mut(..self.pointer_size)
            .ok_or(CyclicError::Truncated {
                needed: self.pointer_size,
                available,
            })?;
        let limit = 1usize
            .checked_shl(u32::try_from(8 * self.pointer_size).unwrap_or(u32::MAX))
            .unwrap_or(usize::MAX);
        if pointer >= limit {
            return Err(CyclicError::PointerOutOfRange { pointer, limit });
        }
        let mut rest = pointer;
        for byte in field.iter_mut().rev() {
            #[allow(clippy::cast_possible_truncation)] // masked to one byte
            let low = (rest & 0xff) as u8;
            *byte = low;
            rest >>= 8;
        }
        Ok(())
    }
}

/// Byte offsets of every slot, from the newest record back to the oldest.
///
/// Reverse the iterator for chronological order.
#[derive(Debug, Clone)]
pub struct FixedSlots {
    layout: BufferLayout,
    slot_count: usize,
    newest: usize,
    ks: Range<usize>,
}

impl FixedSlots {
    /// Address the slots of a `len`-byte value whose newest record is at
    /// slot index `newest`.
    ///
    /// # Errors
    ///
    /// Returns [`CyclicError::Truncated`] when not even one slot fits, or
    /// [`CyclicError::PointerOutOfRange`] when `newest` is not a slot index.
    pub fn new(layout: BufferLayout, len: usize, newest: usize) -> Result<Self, CyclicError> {
        let slot_count = layout.slot_count(len);
        if slot_count == 0 {
            return Err(CyclicError::Truncated {
                needed: layout.pointer_size + layout.slot_width,
                available: len,
            });
        }
        if newest >= slot_count {
            return Err(CyclicError::PointerOutOfRange {
                pointer: newest,
                limit: slot_count,
            });
        }
        Ok(Self {
            layout,
            slot_count,
            newest,
            ks: 0..slot_count,
        })
    }

    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.slot_count
    }

    /// Byte offset of the k-th most recent record.
    #[must_use]
    pub fn offset(&self, k: usize) -> usize {
        let index = (self.newest + self.slot_count - k % self.slot_count) % self.slot_count;
        self.layout.pointer_size + index * self.layout.slot_width
    }

    /// Byte range of the k-th most recent record.
    #[must_use]
    pub fn range(&self, k: usize) -> Range<usize> {
        let start = self.offset(k);
        start..start + self.layout.slot_width
    }
}

impl Iterator for FixedSlots {
    type Item = Range<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        self.ks.next().map(|k| self.range(k))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.ks.size_hint()
    }
}

impl DoubleEndedIterator for FixedSlots {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.ks.next_back().map(|k| self.range(k))
    }
}

impl ExactSizeIterator for FixedSlots {}

#[cfg(test)]
mod tests {
    use super::*;

    const LAYOUT: BufferLayout = BufferLayout::new(1, 10);

    #[test]
    fn slots_run_backwards_from_newest() {
        // 4 slots plus 3 slack bytes
        let slots = FixedSlots::new(LAYOUT, 1 + 40 + 3, 1).expect("valid pointer");
        assert_eq!(slots.slot_count(), 4);
        let starts: Vec<_> = slots.clone().map(|r| r.start).collect();
        assert_eq!(starts, [11, 1, 31, 21]);
        let chronological: Vec<_> = slots.rev().map(|r| r.start).collect();
        assert_eq!(chronological, [21, 31, 1, 11]);
    }

    #[test]
    fn newest_pointer_must_name_a_slot() {
        assert_eq!(
            FixedSlots::new(LAYOUT, 41, 4).unwrap_err(),
            CyclicError::PointerOutOfRange {
                pointer: 4,
                limit: 4
            }
        );
        assert_eq!(
            FixedSlots::new(LAYOUT, 10, 0).unwrap_err(),
            CyclicError::Truncated {
                needed: 11,
                available: 10
            }
        );
    }

    #[test]
    fn pointer_field_roundtrip() {
        let layout = BufferLayout::new(2, 5);
        let mut value = [0u8; 12];
        layout.write_pointer(&mut value, 0x0102).expect("fits");
        assert_eq!(&value[..2], &[0x01, 0x02]);
        assert_eq!(layout.read_pointer(&value), Ok(0x0102));

        assert!(matches!(
            LAYOUT.write_pointer(&mut value, 256),
            Err(CyclicError::PointerOutOfRange { limit: 256, .. })
        ));
        assert!(layout.read_pointer(&[0x01]).is_err());
    }
}
