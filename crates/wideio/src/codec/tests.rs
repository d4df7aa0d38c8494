use alloc::{string::String, vec::Vec};

use quickcheck::QuickCheck;
use rstest::rstest;

use super::*;

#[rstest]
#[case::ascii(b"A", Decoded::CodePoint('A'), 1)]
#[case::nul(b"\0", Decoded::CodePoint('\0'), 1)]
#[case::two_byte(b"\xC3\xA5", Decoded::CodePoint('å'), 2)]
#[case::three_byte(b"\xE2\x82\xAC", Decoded::CodePoint('€'), 3)]
#[case::four_byte(b"\xF0\x9F\x91\x8D", Decoded::CodePoint('👍'), 4)]
#[case::max_scalar(b"\xF4\x8F\xBF\xBF", Decoded::CodePoint('\u{10FFFF}'), 4)]
#[case::trailing_input_ignored(b"\xC3\xA5xyz", Decoded::CodePoint('å'), 2)]
#[case::stray_continuation(b"\x80", Decoded::Illegal, 1)]
#[case::invalid_lead(b"\xFF\x80", Decoded::Illegal, 1)]
#[case::overlong_two_byte(b"\xC1\x81", Decoded::Illegal, 2)]
#[case::overlong_nul(b"\xC0\x80", Decoded::Illegal, 2)]
#[case::overlong_three_byte(b"\xE0\x80\x80", Decoded::Illegal, 3)]
#[case::overlong_four_byte(b"\xF0\x8F\xBF\xBF", Decoded::Illegal, 4)]
#[case::surrogate(b"\xED\xA0\x80", Decoded::Illegal, 3)]
#[case::above_max(b"\xF4\x90\x80\x80", Decoded::Illegal, 4)]
#[case::five_bit_lead(b"\xF5\x80\x80\x80", Decoded::Illegal, 4)]
#[case::missing_continuation(b"\xE2\x41", Decoded::Illegal, 1)]
#[case::short_continuation(b"\xE2\x82\x41", Decoded::Illegal, 2)]
#[case::truncated_two_of_three(b"\xE2\x82", Decoded::Incomplete, 0)]
#[case::truncated_lead_only(b"\xF0", Decoded::Incomplete, 0)]
#[case::truncated_three_of_four(b"\xF0\x9F\x91", Decoded::Incomplete, 0)]
#[case::truncated_overlong_prefix(b"\xE0\x80", Decoded::Illegal, 2)]
#[case::truncated_surrogate_prefix(b"\xED\xA0", Decoded::Illegal, 2)]
#[case::truncated_above_max_prefix(b"\xF4\x90", Decoded::Illegal, 2)]
#[case::truncated_overlong_lead(b"\xC1", Decoded::Illegal, 1)]
#[case::empty(b"", Decoded::Incomplete, 0)]
fn utf8_decode(#[case] input: &[u8], #[case] expected: Decoded, #[case] consumed: usize) {
    assert_eq!(u8::decode(input), (expected, consumed));
}

#[rstest]
#[case::bmp(&[0x0041], Decoded::CodePoint('A'), 1)]
#[case::last_bmp(&[0xFFFF], Decoded::CodePoint('\u{FFFF}'), 1)]
#[case::pair(&[0xD83D, 0xDC4D], Decoded::CodePoint('👍'), 2)]
#[case::max_pair(&[0xDBFF, 0xDFFF], Decoded::CodePoint('\u{10FFFF}'), 2)]
#[case::lone_high_at_end(&[0xD83D], Decoded::Incomplete, 0)]
#[case::high_then_bmp(&[0xD83D, 0x0041], Decoded::Illegal, 1)]
#[case::high_then_high(&[0xD83D, 0xD83D], Decoded::Illegal, 1)]
#[case::lone_low(&[0xDC4D, 0x0041], Decoded::Illegal, 1)]
fn utf16_decode(#[case] input: &[u16], #[case] expected: Decoded, #[case] consumed: usize) {
    assert_eq!(u16::decode(input), (expected, consumed));
}

#[rstest]
#[case::ascii(&[0x41], Decoded::CodePoint('A'), 1)]
#[case::astral(&[0x1F44D], Decoded::CodePoint('👍'), 1)]
#[case::surrogate(&[0xD800], Decoded::Illegal, 1)]
#[case::above_max(&[0x11_0000], Decoded::Illegal, 1)]
#[case::all_bits(&[u32::MAX], Decoded::Illegal, 1)]
fn utf32_decode(#[case] input: &[u32], #[case] expected: Decoded, #[case] consumed: usize) {
    assert_eq!(u32::decode(input), (expected, consumed));
}

#[rstest]
#[case('A', 1, 1)]
#[case('\u{7FF}', 2, 1)]
#[case('\u{800}', 3, 1)]
#[case('\u{FFFF}', 3, 1)]
#[case('\u{10000}', 4, 2)]
#[case('\u{10FFFF}', 4, 2)]
fn widths_by_range(#[case] c: char, #[case] utf8: usize, #[case] utf16: usize) {
    assert_eq!(u8::width(c), utf8);
    assert_eq!(u16::width(c), utf16);
    assert_eq!(u32::width(c), 1);
}

#[test]
fn max_widths() {
    assert_eq!(u8::MAX_WIDTH, 4);
    assert_eq!(u16::MAX_WIDTH, 2);
    assert_eq!(u32::MAX_WIDTH, 1);
}

#[test]
fn or_replacement_substitutes_failures() {
    assert_eq!(Decoded::CodePoint('x').or_replacement(), 'x');
    assert_eq!(Decoded::Illegal.or_replacement(), REPLACEMENT_CHARACTER);
    assert_eq!(Decoded::Incomplete.or_replacement(), REPLACEMENT_CHARACTER);
}

/// Every truncation of a valid multi-byte sequence is reported as
/// incomplete rather than illegal.
#[test]
fn every_proper_prefix_is_incomplete() {
    for c in ['ß', '€', '\u{FFFD}', '👍', '\u{10000}', '\u{10FFFF}'] {
        let mut buf = [0u8; 4];
        let bytes = c.encode_utf8(&mut buf).as_bytes();
        for end in 1..bytes.len() {
            assert_eq!(
                u8::decode(&bytes[..end]),
                (Decoded::Incomplete, 0),
                "prefix {end} of {c:?}"
            );
        }
    }
}

/// Decoding arbitrary bytes never stalls and never over-consumes.
#[test]
fn decode_always_progresses_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(bytes: Vec<u8>, wide: Vec<u16>, words: Vec<u32>) -> bool {
        fn walk<T: CodeUnit>(mut units: &[T]) -> bool {
            while !units.is_empty() {
                let (decoded, consumed) = T::decode(units);
                if consumed > units.len() {
                    return false;
                }
                match decoded {
                    Decoded::Incomplete if consumed == 0 => return true,
                    Decoded::Incomplete => return false,
                    Decoded::Illegal if consumed == 0 => return false,
                    Decoded::CodePoint(c) if consumed != T::width(c) => return false,
                    _ => {}
                }
                units = &units[consumed..];
            }
            true
        }
        walk(&bytes) && walk(&wide) && walk(&words)
    }

    QuickCheck::new()
        .tests(2_000)
        .quickcheck(prop as fn(Vec<u8>, Vec<u16>, Vec<u32>) -> bool);
}

/// `width` predicts exactly what `encode` writes, and decoding the encoded
/// units returns the original code point.
#[test]
fn width_matches_encode_quickcheck() {
    fn prop(c: char) -> bool {
        fn check<T: CodeUnit>(c: char) -> bool {
            let mut out = [T::TERMINATOR; 4];
            let written = T::encode(c, &mut out);
            written == T::width(c)
                && written <= T::MAX_WIDTH
                && T::decode(&out[..written]) == (Decoded::CodePoint(c), written)
        }
        check::<u8>(c) && check::<u16>(c) && check::<u32>(c)
    }

    QuickCheck::new()
        .tests(5_000)
        .quickcheck(prop as fn(char) -> bool);
}

/// The codec agrees with the standard library on valid text.
#[test]
fn agrees_with_std_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(text: String) -> bool {
        let mut bytes = text.as_bytes();
        let mut chars = text.chars();
        while !bytes.is_empty() {
            let (decoded, consumed) = u8::decode(bytes);
            if Some(decoded) != chars.next().map(Decoded::CodePoint) {
                return false;
            }
            bytes = &bytes[consumed..];
        }
        chars.next().is_none()
    }

    QuickCheck::new()
        .tests(1_000)
        .quickcheck(prop as fn(String) -> bool);
}
