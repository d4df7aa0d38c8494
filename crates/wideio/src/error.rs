use thiserror::Error;

/// Failure of a bounded conversion into a caller-supplied buffer.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvertError {
    /// The destination cannot hold the converted text plus its terminator.
    ///
    /// A terminator was written at `written` (if `capacity > 0`); everything
    /// before it is unspecified and must not be used as a truncated result.
    #[error("destination of {capacity} units is too small (overflowed after {written} units)")]
    DestinationOverflow {
        /// Capacity of the destination, terminator included.
        capacity: usize,
        /// Units encoded before the next code point failed to fit.
        written: usize,
    },
}

#[cfg(feature = "std")]
pub use console::ConsoleError;

#[cfg(feature = "std")]
mod console {
    use std::io;

    use thiserror::Error;

    /// Failure of a console adapter.
    #[derive(Error, Debug)]
    pub enum ConsoleError {
        /// The adapter is bound to an absent handle. Callers should fall back
        /// to a regular byte stream.
        #[error("handle is not attached to a console")]
        NotAConsole,
        /// The console read primitive failed.
        #[error("console read failed: {0}")]
        Read(#[source] io::Error),
        /// The console write primitive failed.
        #[error("console write failed: {0}")]
        Write(#[source] io::Error),
        /// Discarding pending console input failed.
        #[error("console input flush failed: {0}")]
        Flush(#[source] io::Error),
    }

    impl From<ConsoleError> for io::Error {
        fn from(err: ConsoleError) -> Self {
            let kind = match &err {
                ConsoleError::NotAConsole => io::ErrorKind::Unsupported,
                ConsoleError::Read(e) | ConsoleError::Write(e) | ConsoleError::Flush(e) => e.kind(),
            };
            io::Error::new(kind, err)
        }
    }
}
