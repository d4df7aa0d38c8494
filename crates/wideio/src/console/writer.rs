use std::io;

use bstr::BStr;
use log::{debug, trace, warn};

use super::Console;
use crate::{
    ConsoleError, ConsoleOptions,
    buffer::FixedBuf,
    codec::{CodeUnit, Decoded},
};

/// Buffered UTF-8 writer over a UTF-16 console.
///
/// Bytes accumulate in a fixed buffer. A flush transcodes every complete
/// code point into a wide buffer sized so that it cannot overflow, writes the
/// wide buffer with one console call, and keeps whatever the console did not
/// accept, plus any trailing incomplete sequence, for the next flush.
///
/// Dropping the writer flushes it; errors at that point are logged.
#[derive(Debug)]
pub struct ConsoleWriter<C: Console> {
    console: C,
    bytes: FixedBuf<u8>,
    wide: FixedBuf<u16>,
    // Low half of a surrogate pair whose high half the console already
    // accepted. Its bytes are consumed; it goes out before anything else.
    split_low: Option<u16>,
}

impl<C: Console> ConsoleWriter<C> {
    /// Binds a writer with default options to `console`.
    pub fn new(console: C) -> Self {
        Self::with_options(console, ConsoleOptions::default())
    }

    /// Binds a writer to `console`.
    pub fn with_options(console: C, options: ConsoleOptions) -> Self {
        let capacity = options.capacity();
        Self {
            console,
            bytes: FixedBuf::new(capacity),
            wide: FixedBuf::new(capacity * u16::MAX_WIDTH),
            split_low: None,
        }
    }

    /// Whether the bound handle is an interactive console.
    pub fn is_console(&self) -> bool {
        self.console.is_console()
    }

    /// The bound console.
    pub fn console(&self) -> &C {
        &self.console
    }

    /// Bytes buffered but not yet accepted by the console.
    pub fn pending(&self) -> &[u8] {
        self.bytes.filled()
    }

    /// Runs one write cycle: transcodes the complete code points at the front
    /// of the buffer, writes them with a single console call, and drops the
    /// bytes whose code points the console accepted.
    ///
    /// Returns the number of bytes consumed. A trailing incomplete sequence
    /// is never consumed.
    ///
    /// # Errors
    ///
    /// [`ConsoleError::NotAConsole`] if the handle is absent,
    /// [`ConsoleError::Write`] if the console call fails. The buffer is left
    /// untouched in both cases, except that a code point whose first unit
    /// the console already accepted counts as written; its remaining unit is
    /// sent first by the next cycle.
    pub fn flush_cycle(&mut self) -> Result<usize, ConsoleError> {
        if !self.console.is_attached() {
            return Err(ConsoleError::NotAConsole);
        }
        self.write_split_low()?;

        self.wide.clear();
        let decoded = encode_complete(self.bytes.filled(), &mut self.wide);
        if self.wide.is_empty() {
            return Ok(0);
        }

        let submitted = self.wide.len();
        let accepted = self
            .console
            .write_wide(self.wide.filled())
            .map_err(ConsoleError::Write)?;
        trace!("console write: {decoded} bytes as {submitted} units, {accepted} accepted");

        let consumed = if accepted >= submitted {
            decoded
        } else {
            let (mut consumed, whole) = accepted_prefix(self.bytes.filled(), accepted);
            if whole < accepted {
                // The console split a surrogate pair: the high half is out, so
                // the code point is consumed and its low half is sent next.
                let (_, len) = u8::decode(&self.bytes.filled()[consumed..]);
                self.split_low = Some(self.wide.filled()[accepted]);
                consumed += len;
            }
            debug!(
                "console accepted {accepted} of {submitted} units; retaining {:?}",
                BStr::new(&self.bytes.filled()[consumed..])
            );
            consumed
        };
        #[cfg(any(test, feature = "fuzzing"))]
        assert!(
            consumed <= decoded,
            "Internal error: consumed {consumed} bytes, only {decoded} transcoded"
        );
        self.bytes.consume(consumed);
        self.write_split_low()?;
        Ok(consumed)
    }

    fn write_split_low(&mut self) -> Result<(), ConsoleError> {
        if let Some(low) = self.split_low {
            let n = self
                .console
                .write_wide(&[low])
                .map_err(ConsoleError::Write)?;
            if n == 0 {
                return Err(ConsoleError::Write(io::ErrorKind::WriteZero.into()));
            }
            self.split_low = None;
        }
        Ok(())
    }

    /// Writes every complete code point in the buffer, repeating write
    /// cycles while the console accepts only part of a submission.
    ///
    /// A trailing incomplete sequence stays buffered until the bytes that
    /// complete it are written.
    ///
    /// # Errors
    ///
    /// See [`ConsoleWriter::flush_cycle`]. A console that accepts nothing of
    /// a non-empty submission fails with `io::ErrorKind::WriteZero`.
    pub fn sync(&mut self) -> io::Result<()> {
        loop {
            let before = self.bytes.len();
            let consumed = self.flush_cycle()?;
            if consumed == before || self.wide.is_empty() {
                return Ok(());
            }
            if consumed == 0 {
                return Err(io::ErrorKind::WriteZero.into());
            }
        }
    }

    /// Flushes the buffer and writes a replacement character for a trailing
    /// sequence that can no longer be completed.
    ///
    /// # Errors
    ///
    /// See [`ConsoleWriter::sync`].
    pub fn finish(&mut self) -> io::Result<()> {
        self.sync()?;
        if !self.bytes.is_empty() {
            debug!(
                "replacing incomplete trailing sequence {:?}",
                BStr::new(self.bytes.filled())
            );
            let mut units = [0u16; 2];
            let n = u16::encode(crate::REPLACEMENT_CHARACTER, &mut units);
            let accepted = self
                .console
                .write_wide(&units[..n])
                .map_err(ConsoleError::Write)?;
            if accepted == 0 {
                return Err(io::ErrorKind::WriteZero.into());
            }
            self.bytes.clear();
        }
        Ok(())
    }
}

impl<C: Console> io::Write for ConsoleWriter<C> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        if self.bytes.is_full() && self.flush_cycle()? == 0 {
            return Err(io::ErrorKind::WriteZero.into());
        }
        Ok(self.bytes.extend_from_slice(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.sync()
    }
}

impl<C: Console> Drop for ConsoleWriter<C> {
    fn drop(&mut self) {
        if self.bytes.is_empty() && self.split_low.is_none() {
            return;
        }
        if let Err(err) = self.sync() {
            warn!("console output lost on drop: {err}");
        } else if !self.bytes.is_empty() {
            debug!(
                "dropping incomplete trailing sequence {:?}",
                BStr::new(self.bytes.filled())
            );
        }
    }
}

/// Encodes the complete code points at the front of `src` into `out` and
/// returns the number of source bytes they span.
fn encode_complete(src: &[u8], out: &mut FixedBuf<u16>) -> usize {
    let mut offset = 0;
    while offset < src.len() {
        let (decoded, consumed) = u8::decode(&src[offset..]);
        if decoded == Decoded::Incomplete {
            break;
        }
        let c = decoded.or_replacement();
        if out.remaining() < u16::width(c) {
            break;
        }
        let n = u16::encode(c, out.spare_mut());
        out.advance(n);
        offset += consumed;
    }
    offset
}

/// Splits the first `units` UTF-16 units of the transcoded `src` into whole
/// code points. Returns the bytes those code points span and the units they
/// occupy, which is less than `units` when the last accepted unit starts a
/// surrogate pair.
fn accepted_prefix(src: &[u8], units: usize) -> (usize, usize) {
    let mut offset = 0;
    let mut used = 0;
    while offset < src.len() {
        let (decoded, consumed) = u8::decode(&src[offset..]);
        if decoded == Decoded::Incomplete {
            break;
        }
        let width = u16::width(decoded.or_replacement());
        if used + width > units {
            break;
        }
        used += width;
        offset += consumed;
    }
    (offset, used)
}
