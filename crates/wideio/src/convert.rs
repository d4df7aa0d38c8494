//! One-shot transcoding over complete inputs.
//!
//! Both entry points decode the whole source with [`decode_lossy`], so
//! malformed sequences become [`REPLACEMENT_CHARACTER`]. Since the source is
//! known to be complete, a sequence cut short by its end is malformed too and
//! is replaced in the same way.
//!
//! - [`convert`] writes into a fixed destination and fails rather than
//!   truncating, because a truncated multi-unit sequence would corrupt the
//!   text handed to fixed-size OS buffers.
//! - [`convert_to_vec`] grows its output and cannot fail.
//!
//! [`REPLACEMENT_CHARACTER`]: crate::REPLACEMENT_CHARACTER

use alloc::{string::String, vec::Vec};
use core::iter::FusedIterator;

use crate::{codec::CodeUnit, error::ConvertError};

/// Iterator over the code points of a unit slice, with malformed and
/// truncated sequences replaced. Created by [`decode_lossy`].
#[derive(Debug, Clone)]
pub struct DecodeLossy<'a, T> {
    units: &'a [T],
}

/// Decodes `units` into code points, substituting the replacement character
/// for every malformed sequence.
///
/// ```rust
/// let decoded: String = wideio::decode_lossy(b"a\xC1\x81b\xE2\x82").collect();
/// assert_eq!(decoded, "a\u{FFFD}b\u{FFFD}");
/// ```
#[must_use]
pub fn decode_lossy<T: CodeUnit>(units: &[T]) -> DecodeLossy<'_, T> {
    DecodeLossy { units }
}

impl<T: CodeUnit> DecodeLossy<'_, T> {
    /// Units not yet decoded.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        self.units
    }
}

impl<T: CodeUnit> Iterator for DecodeLossy<'_, T> {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        if self.units.is_empty() {
            return None;
        }
        let (decoded, consumed) = T::decode(self.units);
        // Only `Incomplete` consumes nothing, and only at the end of input.
        let consumed = if consumed == 0 { self.units.len() } else { consumed };
        self.units = &self.units[consumed..];
        Some(decoded.or_replacement())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.units.len();
        (len.div_ceil(T::MAX_WIDTH), Some(len))
    }
}

impl<T: CodeUnit> FusedIterator for DecodeLossy<'_, T> {}

/// Converts `src` into `dest`, followed by a terminating zero unit.
///
/// On success returns the converted text, terminator excluded. The terminator
/// always occupies one unit of `dest`, so the text itself may use at most
/// `dest.len() - 1` units.
///
/// # Errors
///
/// Returns [`ConvertError::DestinationOverflow`] as soon as the next code
/// point does not fit. The terminator is then written right after the last
/// complete code point, but the buffer contents must be treated as invalid.
/// An empty `dest` fails without being written.
///
/// ```rust
/// use wideio::{ConvertError, convert};
///
/// let mut wide = [0u16; 8];
/// assert_eq!(convert(&mut wide, "héllo".as_bytes()).unwrap(), &[104, 233, 108, 108, 111]);
/// assert_eq!(wide[5], 0);
///
/// let mut short = [0u16; 3];
/// assert_eq!(
///     convert(&mut short, "abc".as_bytes()),
///     Err(ConvertError::DestinationOverflow { capacity: 3, written: 2 })
/// );
/// ```
pub fn convert<'a, I: CodeUnit, O: CodeUnit>(
    dest: &'a mut [O],
    src: &[I],
) -> Result<&'a mut [O], ConvertError> {
    let capacity = dest.len();
    let Some(limit) = capacity.checked_sub(1) else {
        return Err(ConvertError::DestinationOverflow {
            capacity,
            written: 0,
        });
    };

    let mut written = 0;
    for c in decode_lossy(src) {
        if limit - written < O::width(c) {
            dest[written] = O::TERMINATOR;
            return Err(ConvertError::DestinationOverflow { capacity, written });
        }
        written += O::encode(c, &mut dest[written..limit]);
    }
    dest[written] = O::TERMINATOR;
    Ok(&mut dest[..written])
}

/// Converts `src` into a newly allocated unit vector.
///
/// ```rust
/// let utf32: Vec<u32> = wideio::convert_to_vec(&[0xD83D_u16, 0xDC4D, 0xD800]);
/// assert_eq!(utf32, [0x1F44D, 0xFFFD]);
/// ```
#[must_use]
pub fn convert_to_vec<I: CodeUnit, O: CodeUnit>(src: &[I]) -> Vec<O> {
    let mut out = Vec::with_capacity(src.len());
    for c in decode_lossy(src) {
        O::encode_into(c, &mut out);
    }
    out
}

/// Converts units of any encoding into a UTF-8 `String`.
#[must_use]
pub fn narrow<T: CodeUnit>(units: &[T]) -> String {
    decode_lossy(units).collect()
}

/// Converts UTF-8 text into UTF-16 units.
#[must_use]
pub fn widen(text: &str) -> Vec<u16> {
    convert_to_vec(text.as_bytes())
}

/// Converts UTF-8 text into UTF-16 units followed by a terminating zero, the
/// form expected by wide-character OS interfaces.
#[must_use]
pub fn widen_nul(text: &str) -> Vec<u16> {
    let mut wide = widen(text);
    wide.push(0);
    wide
}
