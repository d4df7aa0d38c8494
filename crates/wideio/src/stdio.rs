//! Explicitly owned standard streams.
//!
//! [`Stdio`] binds the three standard handles once. A handle attached to an
//! interactive console gets a console adapter; any other handle (a file, a
//! pipe, or a missing console) uses a regular byte stream, by default the
//! process's own `std::io` stream.
//!
//! As with C++ `tie`, reading standard input or writing standard error first
//! flushes standard output, so prompts appear before the program blocks.
//! Dropping the [`Stdio`] value flushes both outputs.
//!
//! ```rust
//! use std::io::Write;
//!
//! use wideio::stdio::Stdio;
//!
//! let mut stdio = Stdio::open();
//! writeln!(stdio.stdout(), "привет")?;
//! # Ok::<(), std::io::Error>(())
//! ```

use std::{
    boxed::Box,
    fmt,
    io::{self, BufRead, Read, Write},
};

use log::{debug, warn};

use crate::{
    ConsoleOptions,
    console::{Console, ConsoleReader, ConsoleWriter, NativeConsole},
};

/// Standard input: the console adapter or a fallback byte stream.
pub enum Input<C: Console> {
    /// Interactive console.
    Console(ConsoleReader<C>),
    /// Anything else.
    Stream(Box<dyn BufRead>),
}

/// Standard output or error: the console adapter or a fallback byte stream.
pub enum Output<C: Console> {
    /// Interactive console.
    Console(ConsoleWriter<C>),
    /// Anything else.
    Stream(Box<dyn Write>),
}

impl<C: Console> Input<C> {
    /// Whether reads go through the console adapter.
    pub fn is_console(&self) -> bool {
        matches!(self, Input::Console(_))
    }
}

impl<C: Console> Output<C> {
    /// Whether writes go through the console adapter.
    pub fn is_console(&self) -> bool {
        matches!(self, Output::Console(_))
    }
}

impl<C: Console> fmt::Debug for Input<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Input::Console(_) => f.write_str("Input::Console"),
            Input::Stream(_) => f.write_str("Input::Stream"),
        }
    }
}

impl<C: Console> fmt::Debug for Output<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Output::Console(_) => f.write_str("Output::Console"),
            Output::Stream(_) => f.write_str("Output::Stream"),
        }
    }
}

impl<C: Console> Read for Input<C> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Input::Console(reader) => reader.read(buf),
            Input::Stream(stream) => stream.read(buf),
        }
    }
}

impl<C: Console> BufRead for Input<C> {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        match self {
            Input::Console(reader) => reader.fill_buf(),
            Input::Stream(stream) => stream.fill_buf(),
        }
    }

    fn consume(&mut self, amt: usize) {
        match self {
            Input::Console(reader) => reader.consume(amt),
            Input::Stream(stream) => stream.consume(amt),
        }
    }
}

impl<C: Console> Write for Output<C> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Console(writer) => writer.write(buf),
            Output::Stream(stream) => stream.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Console(writer) => writer.flush(),
            Output::Stream(stream) => stream.flush(),
        }
    }
}

/// The byte streams used for handles that are not interactive consoles.
pub struct Fallbacks {
    /// Used when standard input is not a console.
    pub stdin: Box<dyn BufRead>,
    /// Used when standard output is not a console.
    pub stdout: Box<dyn Write>,
    /// Used when standard error is not a console.
    pub stderr: Box<dyn Write>,
}

impl Fallbacks {
    /// The process's own standard streams.
    #[must_use]
    pub fn process() -> Self {
        Self {
            stdin: Box::new(io::BufReader::new(io::stdin())),
            stdout: Box::new(io::stdout()),
            stderr: Box::new(io::stderr()),
        }
    }
}

impl fmt::Debug for Fallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fallbacks").finish_non_exhaustive()
    }
}

/// The three standard streams of a program.
#[derive(Debug)]
pub struct Stdio<C: Console = NativeConsole> {
    stdin: Input<C>,
    stdout: Output<C>,
    stderr: Output<C>,
}

impl Stdio<NativeConsole> {
    /// Binds the current process's standard handles.
    #[must_use]
    pub fn open() -> Self {
        #[cfg(windows)]
        let (stdin, stdout, stderr) = {
            use crate::console::WinConsole;
            (WinConsole::stdin(), WinConsole::stdout(), WinConsole::stderr())
        };
        #[cfg(not(windows))]
        let (stdin, stdout, stderr) = {
            use crate::console::Detached;
            (Detached, Detached, Detached)
        };
        Self::bind(stdin, stdout, stderr)
    }
}

impl<C: Console> Stdio<C> {
    /// Binds the given handles, falling back to the process's streams for
    /// those that are not interactive consoles.
    pub fn bind(stdin: C, stdout: C, stderr: C) -> Self {
        Self::bind_with(
            stdin,
            stdout,
            stderr,
            Fallbacks::process(),
            ConsoleOptions::default(),
        )
    }

    /// Binds the given handles with explicit fallbacks and adapter options.
    pub fn bind_with(
        stdin: C,
        stdout: C,
        stderr: C,
        fallbacks: Fallbacks,
        options: ConsoleOptions,
    ) -> Self {
        let stdin = if stdin.is_console() {
            Input::Console(ConsoleReader::with_options(stdin, options))
        } else {
            Input::Stream(fallbacks.stdin)
        };
        let stdout = output(stdout, fallbacks.stdout, options);
        let stderr = output(stderr, fallbacks.stderr, options);
        debug!(
            "standard streams bound (console: stdin={}, stdout={}, stderr={})",
            stdin.is_console(),
            stdout.is_console(),
            stderr.is_console()
        );
        Self {
            stdin,
            stdout,
            stderr,
        }
    }

    /// Standard input. Reading flushes standard output first.
    pub fn stdin(&mut self) -> Stdin<'_, C> {
        Stdin {
            input: &mut self.stdin,
            tie: &mut self.stdout,
        }
    }

    /// Standard output.
    pub fn stdout(&mut self) -> &mut Output<C> {
        &mut self.stdout
    }

    /// Standard error. Writing flushes standard output first.
    pub fn stderr(&mut self) -> Stderr<'_, C> {
        Stderr {
            output: &mut self.stderr,
            tie: &mut self.stdout,
        }
    }

    /// Standard log. Shares standard error's stream and its tie to standard
    /// output, so log and error lines stay in order.
    pub fn log(&mut self) -> Stderr<'_, C> {
        self.stderr()
    }
}

impl<C: Console> Drop for Stdio<C> {
    fn drop(&mut self) {
        if let Err(err) = self.stdout.flush() {
            warn!("failed to flush standard output: {err}");
        }
        if let Err(err) = self.stderr.flush() {
            warn!("failed to flush standard error: {err}");
        }
    }
}

fn output<C: Console>(console: C, fallback: Box<dyn Write>, options: ConsoleOptions) -> Output<C> {
    if console.is_console() {
        Output::Console(ConsoleWriter::with_options(console, options))
    } else {
        Output::Stream(fallback)
    }
}

/// Standard input tied to standard output.
#[derive(Debug)]
pub struct Stdin<'a, C: Console> {
    input: &'a mut Input<C>,
    tie: &'a mut Output<C>,
}

impl<C: Console> Read for Stdin<'_, C> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.tie.flush()?;
        self.input.read(buf)
    }
}

impl<C: Console> BufRead for Stdin<'_, C> {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        self.tie.flush()?;
        self.input.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.input.consume(amt);
    }
}

/// Standard error tied to standard output.
#[derive(Debug)]
pub struct Stderr<'a, C: Console> {
    output: &'a mut Output<C>,
    tie: &'a mut Output<C>,
}

impl<C: Console> Write for Stderr<'_, C> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.tie.flush()?;
        self.output.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.output.flush()
    }
}
