use super::{CodeUnit, Decoded};

const HIGH_SURROGATES: core::ops::RangeInclusive<u16> = 0xD800..=0xDBFF;
const LOW_SURROGATES: core::ops::RangeInclusive<u16> = 0xDC00..=0xDFFF;

impl CodeUnit for u16 {
    const MAX_WIDTH: usize = 2;
    const TERMINATOR: Self = 0;

    fn decode(units: &[u16]) -> (Decoded, usize) {
        let Some(&first) = units.first() else {
            return (Decoded::Incomplete, 0);
        };
        if HIGH_SURROGATES.contains(&first) {
            return match units.get(1) {
                None => (Decoded::Incomplete, 0),
                Some(&second) if LOW_SURROGATES.contains(&second) => {
                    let value = 0x1_0000
                        + ((u32::from(first) - 0xD800) << 10)
                        + (u32::from(second) - 0xDC00);
                    char::from_u32(value).map_or((Decoded::Illegal, 1), |c| (Decoded::CodePoint(c), 2))
                }
                Some(_) => (Decoded::Illegal, 1),
            };
        }
        char::from_u32(u32::from(first)).map_or((Decoded::Illegal, 1), |c| (Decoded::CodePoint(c), 1))
    }

    #[inline]
    fn width(c: char) -> usize {
        c.len_utf16()
    }

    #[inline]
    fn encode(c: char, out: &mut [u16]) -> usize {
        c.encode_utf16(out).len()
    }
}
