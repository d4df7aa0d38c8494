//! Fixed-capacity buffers with explicit length bookkeeping.
//!
//! [`FixedBuf`] owns its storage, never reallocates, and exposes the filled
//! prefix and the spare suffix as slices. All length changes go through
//! checked operations that saturate at the capacity, so a miscounted
//! `advance` can never expose uninitialised or out-of-range storage.

use alloc::{boxed::Box, vec};

/// An owned buffer of `capacity` units, of which the first `len` are filled.
#[derive(Debug, Clone)]
pub struct FixedBuf<T> {
    data: Box<[T]>,
    len: usize,
}

impl<T: Copy + Default> FixedBuf<T> {
    /// Allocates an empty buffer holding up to `capacity` units.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            data: vec![T::default(); capacity].into_boxed_slice(),
            len: 0,
        }
    }

    /// Total number of units the buffer can hold.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Number of filled units.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether no unit is filled.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether every unit is filled.
    #[inline]
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.len == self.data.len()
    }

    /// Number of units that can still be appended.
    #[inline]
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.len
    }

    /// The filled prefix.
    #[inline]
    #[must_use]
    pub fn filled(&self) -> &[T] {
        &self.data[..self.len]
    }

    /// The filled prefix, for in-place rewrites.
    #[inline]
    pub fn filled_mut(&mut self) -> &mut [T] {
        &mut self.data[..self.len]
    }

    /// The unfilled suffix, to be written and then committed with
    /// [`FixedBuf::advance`].
    #[inline]
    pub fn spare_mut(&mut self) -> &mut [T] {
        &mut self.data[self.len..]
    }

    /// Marks up to `n` spare units as filled and returns how many were.
    #[inline]
    pub fn advance(&mut self, n: usize) -> usize {
        let n = n.min(self.remaining());
        self.len += n;
        n
    }

    /// Appends as much of `src` as fits and returns the number of units
    /// copied.
    pub fn extend_from_slice(&mut self, src: &[T]) -> usize {
        let n = src.len().min(self.remaining());
        self.data[self.len..self.len + n].copy_from_slice(&src[..n]);
        self.len += n;
        n
    }

    /// Appends one unit. Returns `false` if the buffer is full.
    pub fn push(&mut self, unit: T) -> bool {
        if self.is_full() {
            return false;
        }
        self.data[self.len] = unit;
        self.len += 1;
        true
    }

    /// Drops the first `n` filled units (saturating) and moves the rest to
    /// the front.
    pub fn consume(&mut self, n: usize) {
        let n = n.min(self.len);
        self.data.copy_within(n..self.len, 0);
        self.len -= n;
    }

    /// Empties the buffer without touching its storage.
    #[inline]
    pub fn clear(&mut self) {
        self.len = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::FixedBuf;

    #[test]
    fn extend_stops_at_capacity() {
        let mut buf = FixedBuf::<u8>::new(4);
        assert_eq!(buf.extend_from_slice(b"abc"), 3);
        assert_eq!(buf.extend_from_slice(b"def"), 1);
        assert!(buf.is_full());
        assert_eq!(buf.filled(), b"abcd");
        assert!(!buf.push(b'x'));
    }

    #[test]
    fn advance_saturates() {
        let mut buf = FixedBuf::<u16>::new(3);
        buf.spare_mut()[..2].copy_from_slice(&[1, 2]);
        assert_eq!(buf.advance(2), 2);
        assert_eq!(buf.advance(10), 1);
        assert_eq!(buf.len(), 3);
        assert_eq!(buf.remaining(), 0);
        assert!(buf.spare_mut().is_empty());
    }

    #[test]
    fn consume_compacts_to_front() {
        let mut buf = FixedBuf::<u8>::new(8);
        buf.extend_from_slice(b"hello");
        buf.consume(3);
        assert_eq!(buf.filled(), b"lo");
        assert_eq!(buf.remaining(), 6);
        buf.consume(100);
        assert!(buf.is_empty());
    }

    #[test]
    fn zero_capacity_is_always_full() {
        let mut buf = FixedBuf::<u32>::new(0);
        assert!(buf.is_full());
        assert_eq!(buf.extend_from_slice(&[1]), 0);
        assert_eq!(buf.advance(1), 0);
    }
}
