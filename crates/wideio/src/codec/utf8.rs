use super::{CodeUnit, Decoded};

/// Smallest value each sequence width may encode; anything below is an
/// overlong form.
const MIN_VALUE: [u32; 5] = [0, 0, 0x80, 0x800, 0x1_0000];

impl CodeUnit for u8 {
    const MAX_WIDTH: usize = 4;
    const TERMINATOR: Self = 0;

    fn decode(units: &[u8]) -> (Decoded, usize) {
        decode(units)
    }

    #[inline]
    fn width(c: char) -> usize {
        c.len_utf8()
    }

    #[inline]
    fn encode(c: char, out: &mut [u8]) -> usize {
        c.encode_utf8(out).len()
    }
}

/// Width declared by a lead byte, or `0` if the byte cannot start a
/// multi-byte sequence.
#[inline]
fn sequence_width(lead: u8) -> usize {
    match lead {
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF7 => 4,
        _ => 0,
    }
}

#[inline]
fn is_continuation(b: u8) -> bool {
    b & 0xC0 == 0x80
}

/// Whether `lead` followed by the continuation bytes in `tail` can still be
/// completed into a well-formed sequence.
fn can_complete(lead: u8, tail: &[u8]) -> bool {
    let second = match lead {
        0xC2..=0xF4 => tail.first().copied(),
        _ => return false,
    };
    let Some(second) = second else {
        return true;
    };
    match lead {
        0xE0 => (0xA0..=0xBF).contains(&second),
        0xED => (0x80..=0x9F).contains(&second),
        0xF0 => (0x90..=0xBF).contains(&second),
        0xF4 => (0x80..=0x8F).contains(&second),
        _ => true,
    }
}

fn decode(units: &[u8]) -> (Decoded, usize) {
    let Some(&lead) = units.first() else {
        return (Decoded::Incomplete, 0);
    };
    if lead < 0x80 {
        return (Decoded::CodePoint(char::from(lead)), 1);
    }

    let width = sequence_width(lead);
    if width == 0 {
        return (Decoded::Illegal, 1);
    }

    let mut value = u32::from(lead) & (0x7F >> width);
    let mut taken = 1;
    while taken < width {
        match units.get(taken) {
            Some(&b) if is_continuation(b) => {
                value = (value << 6) | u32::from(b & 0x3F);
                taken += 1;
            }
            // The lead and the continuation bytes matched so far form the
            // malformed sequence; the offending byte starts the next one.
            Some(_) => return (Decoded::Illegal, taken),
            None if can_complete(lead, &units[1..taken]) => return (Decoded::Incomplete, 0),
            None => return (Decoded::Illegal, taken),
        }
    }

    if value < MIN_VALUE[width] {
        return (Decoded::Illegal, width);
    }
    match char::from_u32(value) {
        Some(c) => (Decoded::CodePoint(c), width),
        None => (Decoded::Illegal, width),
    }
}
