//! UTF-8 byte streams over a UTF-16 console.
//!
//! A [`Console`] is the boundary to the operating system: it moves UTF-16
//! units in and out of one console handle. The adapters layered on top
//! expose ordinary byte-stream semantics:
//!
//! - [`ConsoleWriter`] implements [`std::io::Write`]. Bytes are buffered,
//!   complete code points are transcoded and written in one console call,
//!   and a code point split across `write` calls is completed by the next
//!   one.
//! - [`ConsoleReader`] implements [`std::io::Read`] and [`std::io::BufRead`].
//!   A surrogate pair split across console reads is carried over, carriage
//!   returns are dropped, a Ctrl-Z at the start of a line ends the input, and
//!   any number of bytes can be pushed back with [`ConsoleReader::unread`].
//!
//! ```rust
//! use std::io::{BufRead, Write};
//!
//! use wideio::console::{ConsoleReader, ConsoleWriter, ScriptedConsole};
//!
//! let mut console = ScriptedConsole::new();
//! console.push_read_str("héllo\r\n");
//!
//! let mut reader = ConsoleReader::new(&mut console);
//! let mut line = String::new();
//! reader.read_line(&mut line)?;
//! assert_eq!(line, "héllo\n");
//! drop(reader);
//!
//! let mut writer = ConsoleWriter::new(&mut console);
//! writer.write_all("wörld".as_bytes())?;
//! writer.flush()?;
//! drop(writer);
//! assert_eq!(console.written_string(), "wörld");
//! # Ok::<(), std::io::Error>(())
//! ```
//!
//! Adapters block in the console primitives and are not synchronised; each
//! console handle should be owned by exactly one adapter.

use std::io;

mod reader;
mod scripted;
#[cfg(windows)]
mod windows;
mod writer;

pub use reader::{ConsoleReader, ReadState};
pub use scripted::ScriptedConsole;
#[cfg(windows)]
pub use windows::WinConsole;
pub use writer::ConsoleWriter;

/// The OS primitives of one console handle.
pub trait Console {
    /// Reads UTF-16 units into `buf`, blocking until at least one unit is
    /// available. Returns `Ok(0)` only at the end of input.
    fn read_wide(&mut self, buf: &mut [u16]) -> io::Result<usize>;

    /// Writes a prefix of `units` and returns how many units were accepted.
    fn write_wide(&mut self, units: &[u16]) -> io::Result<usize>;

    /// Whether the handle refers to an interactive console rather than a
    /// file or pipe.
    fn is_console(&self) -> bool;

    /// Whether a handle is present at all. Adapters bound to an absent handle
    /// fail every operation with
    /// [`ConsoleError::NotAConsole`](crate::ConsoleError::NotAConsole).
    fn is_attached(&self) -> bool {
        true
    }

    /// Discards input typed ahead but not yet read.
    fn flush_input(&mut self) -> io::Result<()>;
}

impl<C: Console + ?Sized> Console for &mut C {
    fn read_wide(&mut self, buf: &mut [u16]) -> io::Result<usize> {
        (**self).read_wide(buf)
    }

    fn write_wide(&mut self, units: &[u16]) -> io::Result<usize> {
        (**self).write_wide(units)
    }

    fn is_console(&self) -> bool {
        (**self).is_console()
    }

    fn is_attached(&self) -> bool {
        (**self).is_attached()
    }

    fn flush_input(&mut self) -> io::Result<()> {
        (**self).flush_input()
    }
}

/// A handle that is never attached, used where the platform has no
/// wide-character console.
#[derive(Debug, Clone, Copy, Default)]
pub struct Detached;

impl Console for Detached {
    fn read_wide(&mut self, _: &mut [u16]) -> io::Result<usize> {
        Err(io::ErrorKind::Unsupported.into())
    }

    fn write_wide(&mut self, _: &[u16]) -> io::Result<usize> {
        Err(io::ErrorKind::Unsupported.into())
    }

    fn is_console(&self) -> bool {
        false
    }

    fn is_attached(&self) -> bool {
        false
    }

    fn flush_input(&mut self) -> io::Result<()> {
        Err(io::ErrorKind::Unsupported.into())
    }
}

/// The console type of the current platform.
#[cfg(windows)]
pub type NativeConsole = WinConsole;

/// The console type of the current platform.
#[cfg(not(windows))]
pub type NativeConsole = Detached;
