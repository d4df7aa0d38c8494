//! Per-encoding code point primitives.
//!
//! Each supported code unit type (`u8` for UTF-8, `u16` for UTF-16, `u32` for
//! UTF-32) implements [`CodeUnit`]. The encoding is selected statically by the
//! unit type of a buffer, so the transcoding loops in [`crate::convert`] and
//! the console adapters are monomorphised per pair of encodings.
//!
//! Decoding never fails and never reads past the end of the slice it is
//! given. A malformed sequence yields [`Decoded::Illegal`] together with a
//! non-zero number of consumed units, so callers always make progress. A
//! sequence cut short by the end of the slice yields
//! [`Decoded::Incomplete`] and consumes nothing, leaving the caller free to
//! retain the units and retry once more input is available.
//!
//! ```rust
//! use wideio::{CodeUnit, Decoded};
//!
//! assert_eq!(u8::decode(b"\xE2\x82\xAC"), (Decoded::CodePoint('€'), 3));
//! assert_eq!(u8::decode(b"\xE2\x82"), (Decoded::Incomplete, 0));
//! assert_eq!(u16::decode(&[0xDC00]), (Decoded::Illegal, 1));
//! ```

mod utf16;
mod utf32;
mod utf8;

use alloc::vec::Vec;

/// The code point substituted for every malformed sequence.
pub const REPLACEMENT_CHARACTER: char = '\u{FFFD}';

/// Outcome of decoding one code point from the front of a unit slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoded {
    /// A well-formed sequence encoding this code point.
    CodePoint(char),
    /// The leading units are not a well-formed sequence.
    Illegal,
    /// The units are a valid prefix, but the slice ends before the sequence
    /// does.
    Incomplete,
}

impl Decoded {
    /// Returns the decoded code point, substituting
    /// [`REPLACEMENT_CHARACTER`] for `Illegal` and `Incomplete`.
    #[must_use]
    pub fn or_replacement(self) -> char {
        match self {
            Decoded::CodePoint(c) => c,
            Decoded::Illegal | Decoded::Incomplete => REPLACEMENT_CHARACTER,
        }
    }
}

mod sealed {
    pub trait Sealed {}

    impl Sealed for u8 {}
    impl Sealed for u16 {}
    impl Sealed for u32 {}
}

/// A code unit of a Unicode encoding form.
///
/// This trait is sealed: the set of encodings is closed to UTF-8 (`u8`),
/// UTF-16 (`u16`) and UTF-32 (`u32`).
pub trait CodeUnit: Copy + Default + Eq + core::fmt::Debug + sealed::Sealed + 'static {
    /// Maximum number of units a single code point occupies.
    const MAX_WIDTH: usize;

    /// The unit written after converted text by [`crate::convert`].
    const TERMINATOR: Self;

    /// Decodes one code point from the front of `units`.
    ///
    /// Returns the outcome and the number of units consumed:
    /// - the sequence width for [`Decoded::CodePoint`],
    /// - at least one for [`Decoded::Illegal`],
    /// - zero for [`Decoded::Incomplete`] (also returned for an empty slice).
    fn decode(units: &[Self]) -> (Decoded, usize);

    /// Number of units needed to encode `c`.
    fn width(c: char) -> usize;

    /// Encodes `c` at the front of `out` and returns the number of units
    /// written, which always equals [`CodeUnit::width`].
    ///
    /// # Panics
    ///
    /// Panics if `out` is shorter than `Self::width(c)`.
    fn encode(c: char, out: &mut [Self]) -> usize;

    /// Appends the encoding of `c` to `out`.
    fn encode_into(c: char, out: &mut Vec<Self>) {
        let mut tmp = [Self::TERMINATOR; 4];
        let n = Self::encode(c, &mut tmp);
        out.extend_from_slice(&tmp[..n]);
    }
}

#[cfg(test)]
mod tests;
