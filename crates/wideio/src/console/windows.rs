use std::{io, ptr};

use windows_sys::Win32::{
    Foundation::{HANDLE, INVALID_HANDLE_VALUE},
    System::Console::{
        FlushConsoleInputBuffer, GetConsoleMode, GetStdHandle, ReadConsoleW, STD_ERROR_HANDLE,
        STD_HANDLE, STD_INPUT_HANDLE, STD_OUTPUT_HANDLE, WriteConsoleW,
    },
};

use super::Console;

/// A standard handle of the current process, driven through the wide
/// console API.
#[derive(Debug)]
pub struct WinConsole {
    handle: HANDLE,
}

// SAFETY: console handles are process-wide and the console API may be called
// from any thread.
unsafe impl Send for WinConsole {}

impl WinConsole {
    /// The standard input handle.
    #[must_use]
    pub fn stdin() -> Self {
        Self::std(STD_INPUT_HANDLE)
    }

    /// The standard output handle.
    #[must_use]
    pub fn stdout() -> Self {
        Self::std(STD_OUTPUT_HANDLE)
    }

    /// The standard error handle.
    #[must_use]
    pub fn stderr() -> Self {
        Self::std(STD_ERROR_HANDLE)
    }

    fn std(which: STD_HANDLE) -> Self {
        // SAFETY: `GetStdHandle` takes no pointers; a missing handle comes
        // back as null or `INVALID_HANDLE_VALUE` and is checked on use.
        let handle = unsafe { GetStdHandle(which) };
        Self { handle }
    }

    // A chunk length the API accepts; callers loop over the remainder.
    fn clamp(len: usize) -> u32 {
        u32::try_from(len).unwrap_or(u32::MAX)
    }
}

impl Console for WinConsole {
    fn read_wide(&mut self, buf: &mut [u16]) -> io::Result<usize> {
        let mut read = 0u32;
        // SAFETY: `buf` is valid for `clamp(buf.len())` units and `read`
        // outlives the call; a null control block is allowed.
        let ok = unsafe {
            ReadConsoleW(
                self.handle,
                buf.as_mut_ptr().cast(),
                Self::clamp(buf.len()),
                &mut read,
                ptr::null(),
            )
        };
        if ok == 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(read as usize)
    }

    fn write_wide(&mut self, units: &[u16]) -> io::Result<usize> {
        let mut written = 0u32;
        // SAFETY: `units` is valid for `clamp(units.len())` units and
        // `written` outlives the call.
        let ok = unsafe {
            WriteConsoleW(
                self.handle,
                units.as_ptr().cast(),
                Self::clamp(units.len()),
                &mut written,
                ptr::null(),
            )
        };
        if ok == 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(written as usize)
    }

    fn is_console(&self) -> bool {
        if !self.is_attached() {
            return false;
        }
        let mut mode = 0;
        // SAFETY: `mode` outlives the call; the handle is attached.
        unsafe { GetConsoleMode(self.handle, &mut mode) != 0 }
    }

    fn is_attached(&self) -> bool {
        !self.handle.is_null() && self.handle != INVALID_HANDLE_VALUE
    }

    fn flush_input(&mut self) -> io::Result<()> {
        // SAFETY: takes only the handle; an invalid one makes the call fail.
        if unsafe { FlushConsoleInputBuffer(self.handle) } == 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(())
    }
}
