use alloc::vec::Vec;

/// Split `units` into approximately equal-sized chunks.
///
/// Unlike splitting a `str`, chunk boundaries deliberately ignore code point
/// boundaries: the chunks are meant to be fed one by one to a streaming
/// adapter, which must carry split sequences across calls.
///
/// # Panics
///
/// Panics if `parts` is zero.
#[must_use]
pub fn produce_chunks<T>(units: &[T], parts: usize) -> Vec<&[T]> {
    assert!(parts > 0);
    let chunk_size = units.len().div_ceil(parts).max(1);
    units.chunks(chunk_size).collect()
}
