use super::{CodeUnit, Decoded};

impl CodeUnit for u32 {
    const MAX_WIDTH: usize = 1;
    const TERMINATOR: Self = 0;

    fn decode(units: &[u32]) -> (Decoded, usize) {
        match units.first() {
            None => (Decoded::Incomplete, 0),
            Some(&unit) => char::from_u32(unit).map_or((Decoded::Illegal, 1), |c| (Decoded::CodePoint(c), 1)),
        }
    }

    #[inline]
    fn width(_: char) -> usize {
        1
    }

    #[inline]
    fn encode(c: char, out: &mut [u32]) -> usize {
        out[0] = u32::from(c);
        1
    }
}
