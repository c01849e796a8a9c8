//! Wraparound reads and writes over a ring stored as one flat slice.
//!
//! A span `[start, start + len)` that runs past the end of the ring continues
//! at offset 0. Spans never exceed the ring itself.

use std::borrow::Cow;
use std::ops::Range;

/// Split a span into up to two physical ranges, in logical order.
fn segments(ring_len: usize, start: usize, len: usize) -> (Range<usize>, Range<usize>) {
    debug_assert!(start < ring_len && len <= ring_len);
    let first = len.min(ring_len - start);
    (start..start + first, 0..len - first)
}

/// Read `len` bytes starting at `start`, wrapping at the end of `ring`.
///
/// Borrows when the span is contiguous.
pub fn read_wrapped(ring: &[u8], start: usize, len: usize) -> Cow<'_, [u8]> {
    let (head, tail) = segments(ring.len(), start, len);
    if tail.is_empty() {
        Cow::Borrowed(&ring[head])
    } else {
        let mut out = Vec::with_capacity(len);
        out.extend_from_slice(&ring[head]);
        out.extend_from_slice(&ring[tail]);
        Cow::Owned(out)
    }
}

/// Write `data` starting at `start`, wrapping at the end of `ring`.
pub fn write_wrapped(ring: &mut [u8], start: usize, data: &[u8]) {
    let (head, tail) = segments(ring.len(), start, data.len());
    let split = head.len();
    ring[head].copy_from_slice(&data[..split]);
    ring[tail].copy_from_slice(&data[split..]);
}

/// Fill `len` bytes starting at `start` (taken modulo the ring length) with
/// `value`.
pub fn fill_wrapped(ring: &mut [u8], start: usize, len: usize, value: u8) {
    if len == 0 {
        return;
    }
    let (head, tail) = segments(ring.len(), start % ring.len(), len);
    ring[head].fill(value);
    ring[tail].fill(value);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contiguous_read_borrows() {
        let ring = [1, 2, 3, 4, 5];
        let bytes = read_wrapped(&ring, 1, 3);
        assert!(matches!(bytes, Cow::Borrowed(_)));
        assert_eq!(&*bytes, &[2, 3, 4]);
    }

    #[test]
    fn read_across_the_end() {
        let ring = [1, 2, 3, 4, 5];
        assert_eq!(&*read_wrapped(&ring, 3, 4), &[4, 5, 1, 2]);
        assert_eq!(&*read_wrapped(&ring, 0, 5), &ring);
    }

    #[test]
    fn write_and_fill_across_the_end() {
        let mut ring = [0u8; 6];
        write_wrapped(&mut ring, 4, &[7, 8, 9]);
        assert_eq!(ring, [9, 0, 0, 0, 7, 8]);

        fill_wrapped(&mut ring, 5, 3, 0xee);
        assert_eq!(ring, [0xee, 0xee, 0, 0, 7, 0xee]);

        // start is taken modulo the ring length
        fill_wrapped(&mut ring, 6, 1, 0x11);
        assert_eq!(ring[0], 0x11);
    }
}
