#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use wideio::{CodeUnit, ConvertError, Decoded, convert, convert_to_vec, narrow};

#[derive(Debug, Arbitrary)]
struct Input {
    bytes: Vec<u8>,
    wide: Vec<u16>,
    words: Vec<u32>,
    capacity: u8,
}

fn walk<T: CodeUnit>(mut units: &[T]) {
    while !units.is_empty() {
        let (decoded, consumed) = T::decode(units);
        assert!(consumed <= units.len());
        match decoded {
            Decoded::Incomplete => {
                assert_eq!(consumed, 0);
                return;
            }
            Decoded::Illegal => assert!(consumed >= 1),
            Decoded::CodePoint(c) => assert_eq!(consumed, T::width(c)),
        }
        units = &units[consumed..];
    }
}

fn bounded<I: CodeUnit, O: CodeUnit>(src: &[I], capacity: usize) {
    let expected: Vec<O> = convert_to_vec(src);
    let mut dest = vec![O::default(); capacity];
    match convert(&mut dest, src).map(|out| out.to_vec()) {
        Ok(out) => {
            assert_eq!(out, expected);
            assert_eq!(dest[out.len()], O::TERMINATOR);
        }
        Err(ConvertError::DestinationOverflow { written, .. }) => {
            assert!(expected.len() >= capacity);
            if capacity > 0 {
                assert_eq!(dest[written], O::TERMINATOR);
            }
        }
    }
}

fuzz_target!(|input: Input| {
    walk(&input.bytes);
    walk(&input.wide);
    walk(&input.words);

    let capacity = usize::from(input.capacity);
    bounded::<u8, u16>(&input.bytes, capacity);
    bounded::<u16, u8>(&input.wide, capacity);
    bounded::<u32, u16>(&input.words, capacity);

    // Lossy output is valid text and survives another round unchanged.
    let text = narrow(&input.bytes);
    let utf16: Vec<u16> = convert_to_vec(text.as_bytes());
    assert_eq!(narrow(&utf16), text);
    assert_eq!(narrow(&input.wide), String::from_utf16_lossy(&input.wide));
});
