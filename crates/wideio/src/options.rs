/// Configuration of the console adapters.
///
/// # Examples
///
/// ```rust
/// use wideio::ConsoleOptions;
///
/// let options = ConsoleOptions {
///     buffer_capacity: 256,
///     ..Default::default()
/// };
/// assert!(options.strip_carriage_return);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ConsoleOptions {
    /// Capacity of the adapter's primary buffer.
    ///
    /// For [`ConsoleWriter`](crate::console::ConsoleWriter) this is the number
    /// of UTF-8 bytes buffered before a console write; its wide buffer holds
    /// twice as many UTF-16 units. For
    /// [`ConsoleReader`](crate::console::ConsoleReader) this is the number of
    /// UTF-16 units requested per console read; its byte buffer holds four
    /// times as many bytes.
    ///
    /// Values below 4 are raised to 4 so that any single code point fits.
    ///
    /// # Default
    ///
    /// `1024`
    pub buffer_capacity: usize,

    /// Whether the reader drops carriage returns, turning console `\r\n`
    /// line endings into `\n`.
    ///
    /// # Default
    ///
    /// `true`
    pub strip_carriage_return: bool,

    /// Whether a Ctrl-Z (`0x1A`) at the start of a line ends the input.
    ///
    /// When enabled, the reader reports end of input, discards pending
    /// console input, and keeps reporting end of input until
    /// [`ConsoleReader::sync`](crate::console::ConsoleReader::sync) is called.
    ///
    /// # Default
    ///
    /// `true`
    pub ctrl_z_eof: bool,
}

impl ConsoleOptions {
    pub(crate) const MIN_CAPACITY: usize = 4;

    pub(crate) fn capacity(&self) -> usize {
        self.buffer_capacity.max(Self::MIN_CAPACITY)
    }
}

impl Default for ConsoleOptions {
    fn default() -> Self {
        Self {
            buffer_capacity: 1024,
            strip_carriage_return: true,
            ctrl_z_eof: true,
        }
    }
}
