use std::{collections::VecDeque, io, string::String, vec::Vec};

use super::Console;
use crate::{narrow, widen};

/// An in-memory console driven by a script of reads.
///
/// Each scripted read is delivered by one [`Console::read_wide`] call (split
/// if the caller's buffer is smaller), which makes it possible to reproduce
/// exactly where the console breaks its input. Written units are recorded,
/// and individual writes can be limited to simulate a console that accepts
/// only part of a submission.
#[derive(Debug)]
pub struct ScriptedConsole {
    reads: VecDeque<io::Result<Vec<u16>>>,
    // `None` fails that write.
    write_script: VecDeque<Option<usize>>,
    fail_writes: bool,
    fail_input_flush: bool,
    written: Vec<u16>,
    write_calls: usize,
    input_flushes: usize,
    attached: bool,
    interactive: bool,
}

impl Default for ScriptedConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedConsole {
    /// An attached, interactive console with no scripted input.
    #[must_use]
    pub fn new() -> Self {
        Self {
            reads: VecDeque::new(),
            write_script: VecDeque::new(),
            fail_writes: false,
            fail_input_flush: false,
            written: Vec::new(),
            write_calls: 0,
            input_flushes: 0,
            attached: true,
            interactive: true,
        }
    }

    /// A console whose handle is absent.
    #[must_use]
    pub fn detached() -> Self {
        Self {
            attached: false,
            interactive: false,
            ..Self::new()
        }
    }

    /// A handle that exists but is redirected to a file or pipe.
    #[must_use]
    pub fn redirected() -> Self {
        Self {
            interactive: false,
            ..Self::new()
        }
    }

    /// Queues one read delivering exactly `units`.
    pub fn push_read(&mut self, units: impl Into<Vec<u16>>) -> &mut Self {
        self.reads.push_back(Ok(units.into()));
        self
    }

    /// Queues one read delivering `text` as UTF-16.
    pub fn push_read_str(&mut self, text: &str) -> &mut Self {
        self.push_read(widen(text))
    }

    /// Queues one failing read.
    pub fn push_read_error(&mut self, kind: io::ErrorKind) -> &mut Self {
        self.reads.push_back(Err(kind.into()));
        self
    }

    /// Limits the next write call to accept at most `accepted` units.
    pub fn limit_next_write(&mut self, accepted: usize) -> &mut Self {
        self.write_script.push_back(Some(accepted));
        self
    }

    /// Makes the next write call fail; later writes are unaffected.
    pub fn fail_next_write(&mut self) -> &mut Self {
        self.write_script.push_back(None);
        self
    }

    /// Makes every following write fail.
    pub fn fail_writes(&mut self, fail: bool) -> &mut Self {
        self.fail_writes = fail;
        self
    }

    /// Makes discarding pending input fail. Scripted reads are kept.
    pub fn fail_input_flush(&mut self, fail: bool) -> &mut Self {
        self.fail_input_flush = fail;
        self
    }

    /// All units accepted so far.
    #[must_use]
    pub fn written(&self) -> &[u16] {
        &self.written
    }

    /// All units accepted so far, as UTF-8.
    #[must_use]
    pub fn written_string(&self) -> String {
        narrow(&self.written)
    }

    /// Number of write calls made, failed ones included.
    #[must_use]
    pub fn write_calls(&self) -> usize {
        self.write_calls
    }

    /// Number of times pending input was discarded.
    #[must_use]
    pub fn input_flushes(&self) -> usize {
        self.input_flushes
    }

    /// Number of scripted reads not yet delivered.
    #[must_use]
    pub fn pending_reads(&self) -> usize {
        self.reads.len()
    }
}

impl Console for ScriptedConsole {
    fn read_wide(&mut self, buf: &mut [u16]) -> io::Result<usize> {
        let mut units = match self.reads.pop_front() {
            None => return Ok(0),
            Some(read) => read?,
        };
        if units.len() > buf.len() {
            let rest = units.split_off(buf.len());
            self.reads.push_front(Ok(rest));
        }
        buf[..units.len()].copy_from_slice(&units);
        Ok(units.len())
    }

    fn write_wide(&mut self, units: &[u16]) -> io::Result<usize> {
        self.write_calls += 1;
        if self.fail_writes {
            return Err(io::Error::other("scripted write failure"));
        }
        let accepted = match self.write_script.pop_front() {
            None => units.len(),
            Some(Some(limit)) => limit.min(units.len()),
            Some(None) => return Err(io::Error::other("scripted write failure")),
        };
        self.written.extend_from_slice(&units[..accepted]);
        Ok(accepted)
    }

    fn is_console(&self) -> bool {
        self.interactive
    }

    fn is_attached(&self) -> bool {
        self.attached
    }

    fn flush_input(&mut self) -> io::Result<()> {
        if self.fail_input_flush {
            return Err(io::Error::other("scripted flush failure"));
        }
        self.input_flushes += 1;
        self.reads.clear();
        Ok(())
    }
}
