use alloc::{format, string::String, vec::Vec};
use core::fmt::Write;

use quickcheck::QuickCheck;
use quickcheck_macros::quickcheck;
use rstest::rstest;

use crate::{
    CodeUnit, ConvertError, convert, convert_to_vec, decode_lossy, narrow, widen, widen_nul,
};

#[test]
fn overlong_pair_yields_one_replacement() {
    let wide: Vec<u16> = convert_to_vec(b"\xC1\x81");
    assert_eq!(wide, [0xFFFD]);
    assert_eq!(narrow(b"x\xC1\x81y"), "x\u{FFFD}y");
}

#[test]
fn truncated_tail_is_replaced_once() {
    assert_eq!(narrow(b"ok\xE2\x82"), "ok\u{FFFD}");
    assert_eq!(narrow(&[0x61_u16, 0xD83D]), "a\u{FFFD}");
}

#[rstest]
#[case::ascii("abc")]
#[case::latin("naïve café")]
#[case::cjk("漢字かな")]
#[case::astral("𝄞 👍🏽 \u{10FFFF}")]
#[case::empty("")]
fn utf8_round_trips_through_every_form(#[case] text: &str) {
    let utf16: Vec<u16> = convert_to_vec(text.as_bytes());
    let utf32: Vec<u32> = convert_to_vec(text.as_bytes());
    assert_eq!(utf16, text.encode_utf16().collect::<Vec<_>>());
    assert_eq!(utf32, text.chars().map(u32::from).collect::<Vec<_>>());
    assert_eq!(narrow(&utf16), text);
    assert_eq!(narrow(&utf32), text);
    assert_eq!(convert_to_vec::<u32, u16>(&utf32), utf16);
}

#[test]
fn bounded_exact_fit() {
    let mut dest = [0xAAAA_u16; 6];
    let out = convert(&mut dest, "héllo".as_bytes()).unwrap();
    assert_eq!(out.len(), 5);
    assert_eq!(dest[5], 0);
}

#[test]
fn bounded_one_unit_short() {
    let mut dest = [0xAAAA_u16; 5];
    let err = convert(&mut dest, "héllo".as_bytes()).unwrap_err();
    assert_eq!(
        err,
        ConvertError::DestinationOverflow {
            capacity: 5,
            written: 4
        }
    );
    assert!(dest.contains(&0));
}

#[test]
fn bounded_never_splits_surrogate_pair() {
    let mut dest = [0xAAAA_u16; 3];
    let err = convert(&mut dest, "a👍".as_bytes()).unwrap_err();
    assert_eq!(
        err,
        ConvertError::DestinationOverflow {
            capacity: 3,
            written: 1
        }
    );
    assert_eq!(dest[1], 0);
}

#[test]
fn bounded_never_splits_utf8_sequence() {
    let mut dest = [0xAA_u8; 4];
    let err = convert(&mut dest, &[0x61_u16, 0x20AC]).unwrap_err();
    assert_eq!(
        err,
        ConvertError::DestinationOverflow {
            capacity: 4,
            written: 1
        }
    );
    assert_eq!(dest[1], 0);
}

#[test]
fn bounded_empty_destination() {
    let mut dest: [u32; 0] = [];
    assert_eq!(
        convert(&mut dest, b"a"),
        Err(ConvertError::DestinationOverflow {
            capacity: 0,
            written: 0
        })
    );
}

#[test]
fn bounded_empty_source_writes_terminator() {
    let mut dest = [7_u8; 1];
    assert_eq!(convert::<u16, u8>(&mut dest, &[]).unwrap(), &[] as &[u8]);
    assert_eq!(dest, [0]);
}

#[test]
fn widen_nul_terminates() {
    assert_eq!(widen_nul("hé"), [0x68, 0xE9, 0]);
    assert_eq!(widen(""), Vec::<u16>::new());
}

#[test]
fn overflow_error_message() {
    let err = ConvertError::DestinationOverflow {
        capacity: 4,
        written: 3,
    };
    assert_eq!(
        format!("{err}"),
        "destination of 4 units is too small (overflowed after 3 units)"
    );
}

#[test]
fn decode_lossy_transcript_snapshot() {
    let mut out = String::new();
    let mut rest: &[u8] = b"a\xC1\x81\xE2\x82\xACz\xF0\x9F";
    while !rest.is_empty() {
        let (decoded, consumed) = u8::decode(rest);
        writeln!(out, "{decoded:?} {consumed}").unwrap();
        if consumed == 0 {
            break;
        }
        rest = &rest[consumed..];
    }
    insta::assert_snapshot!(out, @r"
    CodePoint('a') 1
    Illegal 2
    CodePoint('€') 3
    CodePoint('z') 1
    Incomplete 0
    ");
    assert_eq!(
        decode_lossy(b"a\xC1\x81\xE2\x82\xACz\xF0\x9F").collect::<String>(),
        "a\u{FFFD}€z\u{FFFD}"
    );
}

#[quickcheck]
fn utf32_round_trip(text: String) -> bool {
    let utf32: Vec<u32> = convert_to_vec(text.as_bytes());
    convert_to_vec::<u32, u8>(&utf32) == text.as_bytes()
}

/// Lossy decoding agrees with the standard library on arbitrary UTF-16 and
/// leaves valid UTF-8 untouched.
#[test]
fn lossy_output_is_valid_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(bytes: Vec<u8>, wide: Vec<u16>) -> bool {
        let from_bytes = narrow(&bytes);
        let from_wide = narrow(&wide);
        let std_wide = String::from_utf16_lossy(&wide);
        from_wide == std_wide
            && (core::str::from_utf8(&bytes).is_err() || from_bytes.as_bytes() == bytes)
    }

    QuickCheck::new()
        .tests(2_000)
        .quickcheck(prop as fn(Vec<u8>, Vec<u16>) -> bool);
}

/// The bounded form either matches the growable form or reports overflow
/// with a terminator inside the destination.
#[test]
fn bounded_matches_growable_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(text: String, capacity: u8) -> bool {
        let expected: Vec<u16> = convert_to_vec(text.as_bytes());
        let mut dest = [0xAAAA_u16; 256];
        let dest = &mut dest[..usize::from(capacity)];
        match convert(&mut *dest, text.as_bytes()).map(|out| *out == *expected) {
            Ok(same) => same,
            Err(ConvertError::DestinationOverflow { capacity, written }) => {
                expected.len() >= capacity
                    && (capacity == 0 || (written < capacity && dest[written] == 0))
            }
        }
    }

    QuickCheck::new()
        .tests(2_000)
        .quickcheck(prop as fn(String, u8) -> bool);
}
