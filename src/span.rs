//! Byte cursor over a borrowed input buffer.
//!
//! A [`Span`] is a view into the caller's byte buffer plus the absolute
//! offset of its first byte from the start of the original input. Readers
//! advance a span in place; decoded entities that are logically a raw byte
//! range (expressions, custom section payloads) store a sub-span of the
//! input rather than an owned copy.

use std::fmt;

/// An advanceable view over borrowed bytes.
///
/// Copying a span is cheap and copies only the view, never the bytes.
/// Equality compares the viewed bytes, not the offset, so a decoded span
/// compares equal to one constructed from an expected byte string.
#[derive(Clone, Copy, Eq)]
pub struct Span<'a> {
    data: &'a [u8],
    start: usize,
}

impl<'a> Span<'a> {
    /// Creates a span covering `data`, with offset 0 at its first byte.
    pub fn new(data: &'a [u8]) -> Self {
        Span { data, start: 0 }
    }

    /// Creates a span whose first byte sits at absolute offset `start`.
    pub fn at(data: &'a [u8], start: usize) -> Self {
        Span { data, start }
    }

    /// Absolute offset of the next unread byte.
    pub fn pos(&self) -> usize {
        self.start
    }

    /// Number of bytes remaining.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The remaining bytes.
    pub fn bytes(&self) -> &'a [u8] {
        self.data
    }

    pub(crate) fn peek(&self) -> Option<u8> {
        self.data.first().copied()
    }

    /// Advances past the first `count` bytes. Caller checks `count <= len`.
    pub(crate) fn advance(&mut self, count: usize) {
        self.data = &self.data[count..];
        self.start += count;
    }

    /// Splits off the first `count` bytes as a new span and advances past
    /// them. Caller checks `count <= len`.
    pub(crate) fn take(&mut self, count: usize) -> Span<'a> {
        let taken = Span {
            data: &self.data[..count],
            start: self.start,
        };
        self.advance(count);
        taken
    }

    /// The bytes between the start of `self` and the start of `rest`,
    /// where `rest` was produced by advancing a copy of `self`.
    pub(crate) fn up_to(&self, rest: &Span<'a>) -> Span<'a> {
        let consumed = rest.start - self.start;
        Span {
            data: &self.data[..consumed],
            start: self.start,
        }
    }
}

impl PartialEq for Span<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl PartialEq<&[u8]> for Span<'_> {
    fn eq(&self, other: &&[u8]) -> bool {
        self.data == *other
    }
}

impl<const N: usize> PartialEq<&[u8; N]> for Span<'_> {
    fn eq(&self, other: &&[u8; N]) -> bool {
        self.data == *other
    }
}

impl<'a> From<&'a [u8]> for Span<'a> {
    fn from(data: &'a [u8]) -> Self {
        Span::new(data)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for Span<'a> {
    fn from(data: &'a [u8; N]) -> Self {
        Span::new(data)
    }
}

impl fmt::Debug for Span<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Span(@{} {:02x?})", self.start, self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_tracks_offset() {
        let mut span = Span::new(&[1, 2, 3, 4]);
        assert_eq!(span.pos(), 0);
        assert_eq!(span.len(), 4);
        span.advance(3);
        assert_eq!(span.pos(), 3);
        assert_eq!(span.len(), 1);
        assert_eq!(span.bytes(), &[4]);
    }

    #[test]
    fn test_take_splits_prefix() {
        let mut span = Span::new(&[1, 2, 3, 4]);
        let head = span.take(2);
        assert_eq!(head.bytes(), &[1, 2]);
        assert_eq!(head.pos(), 0);
        assert_eq!(span.bytes(), &[3, 4]);
        assert_eq!(span.pos(), 2);
    }

    #[test]
    fn test_up_to_recovers_consumed_range() {
        let start = Span::new(&[0x41, 0x00, 0x0b, 0xff]);
        let mut cursor = start;
        cursor.advance(3);
        let consumed = start.up_to(&cursor);
        assert_eq!(consumed, &[0x41u8, 0x00, 0x0b][..]);
        assert_eq!(consumed.pos(), 0);
    }

    #[test]
    fn test_content_equality_ignores_offset() {
        let a = Span::at(&[1, 2, 3], 10);
        let b = Span::new(&[1, 2, 3]);
        assert_eq!(a, b);
    }
}
