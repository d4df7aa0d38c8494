use std::{io, vec::Vec};

use bstr::BStr;
use log::{debug, trace};

use super::Console;
use crate::{
    ConsoleError, ConsoleOptions, REPLACEMENT_CHARACTER,
    buffer::FixedBuf,
    codec::{CodeUnit, Decoded},
};

const CTRL_Z: u8 = 0x1A;
const PUSHBACK_INITIAL: usize = 4;

/// Outcome of the most recent refill of a [`ConsoleReader`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadState {
    /// Nothing has been read since construction or the last
    /// [`ConsoleReader::sync`].
    Idle,
    /// The last refill produced bytes and left nothing carried over.
    Complete,
    /// The last refill ended inside a surrogate pair; the leading unit is
    /// kept until the console delivers the rest.
    AwaitingMore,
    /// End of input was reached. Every refill reports zero bytes until
    /// [`ConsoleReader::sync`] is called.
    Eof,
}

/// Buffered UTF-8 reader over a UTF-16 console.
///
/// Each refill reads one batch of UTF-16 units and transcodes it to UTF-8. A
/// high surrogate at the end of a batch is carried over to the next one.
/// Carriage returns are dropped and a Ctrl-Z at the start of a line ends the
/// input (both configurable through [`ConsoleOptions`]).
#[derive(Debug)]
pub struct ConsoleReader<C: Console> {
    console: C,
    wide: FixedBuf<u16>,
    bytes: FixedBuf<u8>,
    pos: usize,
    // Pushed-back bytes live in `pushback[pb_start..]`; the region is active
    // while that range is non-empty.
    pushback: Vec<u8>,
    pb_start: usize,
    was_newline: bool,
    state: ReadState,
    options: ConsoleOptions,
}

impl<C: Console> ConsoleReader<C> {
    /// Binds a reader with default options to `console`.
    pub fn new(console: C) -> Self {
        Self::with_options(console, ConsoleOptions::default())
    }

    /// Binds a reader to `console`.
    pub fn with_options(console: C, options: ConsoleOptions) -> Self {
        let capacity = options.capacity();
        Self {
            console,
            wide: FixedBuf::new(capacity),
            bytes: FixedBuf::new(capacity * u8::MAX_WIDTH),
            pos: 0,
            pushback: Vec::new(),
            pb_start: 0,
            was_newline: true,
            state: ReadState::Idle,
            options,
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

    /// Outcome of the most recent refill.
    pub fn state(&self) -> ReadState {
        self.state
    }

    /// Pushes `byte` back so that it is the next byte read.
    ///
    /// There is no limit on the number of consecutive push-backs. Bytes
    /// pushed back are returned even after end of input was reached.
    pub fn unread(&mut self, byte: u8) {
        if !self.has_pushback() {
            if self.pos > 0 {
                self.pos -= 1;
                self.bytes.filled_mut()[self.pos] = byte;
                return;
            }
            // The region starts with the bytes still pending in the main
            // buffer, which are then considered consumed.
            let pending = &self.bytes.filled()[self.pos..];
            let len = (pending.len() + 1).max(PUSHBACK_INITIAL);
            self.pushback.clear();
            self.pushback.resize(len, 0);
            self.pb_start = len - pending.len();
            self.pushback[self.pb_start..].copy_from_slice(pending);
            self.bytes.clear();
            self.pos = 0;
        } else if self.pb_start == 0 {
            let old = self.pushback.len();
            let len = old * 2;
            trace!("growing push-back region to {len} bytes");
            let mut grown = Vec::with_capacity(len);
            grown.resize(len - old, 0);
            grown.extend_from_slice(&self.pushback);
            self.pushback = grown;
            self.pb_start = len - old;
        }
        self.pb_start -= 1;
        self.pushback[self.pb_start] = byte;
    }

    /// Discards pending console input, carried units, buffered and
    /// pushed-back bytes, and clears the end-of-input latch.
    ///
    /// # Errors
    ///
    /// [`ConsoleError::NotAConsole`] if the handle is absent,
    /// [`ConsoleError::Flush`] if discarding console input fails.
    pub fn sync(&mut self) -> Result<(), ConsoleError> {
        if !self.console.is_attached() {
            return Err(ConsoleError::NotAConsole);
        }
        self.reset();
        self.console.flush_input().map_err(ConsoleError::Flush)
    }

    // Local state only; buffered bytes are gone even if the console flush
    // that follows fails.
    fn reset(&mut self) {
        self.wide.clear();
        self.bytes.clear();
        self.pos = 0;
        self.pushback.clear();
        self.pb_start = 0;
        self.was_newline = true;
        self.state = ReadState::Idle;
    }

    fn has_pushback(&self) -> bool {
        self.pb_start < self.pushback.len()
    }

    /// Replaces the exhausted byte buffer with the next batch of console
    /// input and returns the number of bytes produced; zero means end of
    /// input.
    fn refill(&mut self) -> Result<usize, ConsoleError> {
        if !self.console.is_attached() {
            return Err(ConsoleError::NotAConsole);
        }
        self.bytes.clear();
        self.pos = 0;
        if self.state == ReadState::Eof {
            return Ok(0);
        }

        loop {
            let read = self
                .console
                .read_wide(self.wide.spare_mut())
                .map_err(ConsoleError::Read)?;
            if read == 0 {
                if !self.wide.is_empty() {
                    debug!(
                        "end of input inside a surrogate pair; replacing {} carried units",
                        self.wide.len()
                    );
                    self.wide.clear();
                    let n = u8::encode(REPLACEMENT_CHARACTER, self.bytes.spare_mut());
                    self.bytes.advance(n);
                }
                self.state = ReadState::Eof;
                return Ok(self.bytes.len());
            }
            self.wide.advance(read);

            let produced = self.decode_wide();
            #[cfg(any(test, feature = "fuzzing"))]
            assert!(
                self.wide.len() < u16::MAX_WIDTH,
                "Internal error: {} units carried over",
                self.wide.len()
            );
            trace!(
                "console read: {read} units, {produced} bytes, {} carried",
                self.wide.len()
            );

            if self.options.ctrl_z_eof
                && self.was_newline
                && self.bytes.filled().first() == Some(&CTRL_Z)
            {
                debug!(
                    "Ctrl-Z at line start; discarding {:?}",
                    BStr::new(self.bytes.filled())
                );
                self.reset();
                self.state = ReadState::Eof;
                self.console.flush_input().map_err(ConsoleError::Flush)?;
                return Ok(0);
            }

            if produced == 0 {
                self.state = ReadState::AwaitingMore;
                continue;
            }
            self.was_newline = self.bytes.filled().last() == Some(&b'\n');
            self.state = if self.wide.is_empty() {
                ReadState::Complete
            } else {
                ReadState::AwaitingMore
            };
            return Ok(produced);
        }
    }

    /// Transcodes the complete code points of the wide buffer into the byte
    /// buffer and moves an incomplete tail to the front of the wide buffer.
    fn decode_wide(&mut self) -> usize {
        let units = self.wide.filled();
        let mut offset = 0;
        while offset < units.len() {
            let (decoded, consumed) = u16::decode(&units[offset..]);
            if decoded == Decoded::Incomplete {
                break;
            }
            let c = decoded.or_replacement();
            if c == '\r' && self.options.strip_carriage_return {
                offset += consumed;
                continue;
            }
            if self.bytes.remaining() < u8::width(c) {
                break;
            }
            let n = u8::encode(c, self.bytes.spare_mut());
            self.bytes.advance(n);
            offset += consumed;
        }
        self.wide.consume(offset);
        self.bytes.len()
    }
}

impl<C: Console> io::Read for ConsoleReader<C> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        let available = io::BufRead::fill_buf(self)?;
        let n = available.len().min(buf.len());
        buf[..n].copy_from_slice(&available[..n]);
        io::BufRead::consume(self, n);
        Ok(n)
    }
}

impl<C: Console> io::BufRead for ConsoleReader<C> {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        if self.has_pushback() {
            return Ok(&self.pushback[self.pb_start..]);
        }
        if self.pos >= self.bytes.len() {
            self.refill()?;
        }
        Ok(&self.bytes.filled()[self.pos..])
    }

    fn consume(&mut self, amt: usize) {
        if self.has_pushback() {
            self.pb_start = (self.pb_start + amt).min(self.pushback.len());
            if !self.has_pushback() {
                self.pushback.clear();
                self.pb_start = 0;
            }
        } else {
            self.pos = (self.pos + amt).min(self.bytes.len());
        }
    }
}
