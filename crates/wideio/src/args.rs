//! Process arguments and environment as UTF-8.
//!
//! Each string is converted from the OS representation exactly once, with
//! undecodable units replaced by U+FFFD. Unlike [`std::env::args`], nothing
//! here panics on a non-Unicode argument.

use std::{env, ffi::OsStr, string::String, vec::Vec};

/// Converts an OS string to UTF-8.
#[must_use]
pub fn from_native(native: &OsStr) -> String {
    #[cfg(windows)]
    {
        use std::os::windows::ffi::OsStrExt;

        let wide: Vec<u16> = native.encode_wide().collect();
        crate::narrow(&wide)
    }
    #[cfg(unix)]
    {
        use std::os::unix::ffi::OsStrExt;

        crate::narrow(native.as_bytes())
    }
    #[cfg(not(any(windows, unix)))]
    {
        native.to_string_lossy().into_owned()
    }
}

/// The process arguments, program name first.
#[must_use]
pub fn args() -> Vec<String> {
    env::args_os().map(|arg| from_native(&arg)).collect()
}

/// The process environment as `(name, value)` pairs.
#[must_use]
pub fn vars() -> Vec<(String, String)> {
    env::vars_os()
        .map(|(name, value)| (from_native(&name), from_native(&value)))
        .collect()
}

/// The value of the environment variable `name`, if set.
#[must_use]
pub fn var(name: &str) -> Option<String> {
    #[cfg(windows)]
    let name = {
        use std::os::windows::ffi::OsStringExt;

        std::ffi::OsString::from_wide(&crate::widen(name))
    };
    env::var_os(name).map(|value| from_native(&value))
}
