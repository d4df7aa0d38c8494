//! Streaming transcoding between UTF-8, UTF-16 and UTF-32, and UTF-8 byte
//! streams layered over wide-character consoles.
//!
//! The core ([`codec`] and [`convert`]) is `no_std` and allocation is only
//! used by the growable conversions. With the default `std` feature the crate
//! also provides:
//!
//! - [`console::ConsoleWriter`] / [`console::ConsoleReader`]: `io::Write` and
//!   `io::BufRead` adapters that move UTF-8 bytes through a UTF-16 console,
//!   carrying split code points between calls;
//! - [`stdio::Stdio`]: owned standard streams that pick the console adapters
//!   only when attached to an interactive console;
//! - [`fs`] and [`args`]: UTF-8 front ends for paths, arguments and the
//!   environment.
//!
//! ```rust
//! use wideio::{convert, narrow, widen};
//!
//! let wide = widen("naïve 👍");
//! assert_eq!(narrow(&wide), "naïve 👍");
//!
//! let mut out = [0u16; 4];
//! assert!(convert(&mut out, "abcd".as_bytes()).is_err());
//! ```

#![no_std]
extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

pub mod buffer;
mod chunk_utils;
pub mod codec;
mod convert;
mod error;

#[cfg(feature = "std")]
pub mod args;
#[cfg(feature = "std")]
pub mod console;
#[cfg(feature = "std")]
pub mod fs;
#[cfg(feature = "std")]
mod options;
#[cfg(feature = "std")]
pub mod stdio;

#[cfg(test)]
mod tests;

pub use chunk_utils::produce_chunks;
pub use codec::{CodeUnit, Decoded, REPLACEMENT_CHARACTER};
pub use convert::{DecodeLossy, convert, convert_to_vec, decode_lossy, narrow, widen, widen_nul};
#[cfg(feature = "std")]
pub use error::ConsoleError;
pub use error::ConvertError;
#[cfg(feature = "std")]
pub use options::ConsoleOptions;
