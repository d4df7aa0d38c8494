//! File system calls taking UTF-8 paths.
//!
//! Each entry point converts its path to the native representation once and
//! then calls the corresponding `std::fs` function. Invalid UTF-8 in a path is
//! replaced with U+FFFD rather than rejected, so a path that cannot name a
//! file simply fails with `NotFound`.

use std::{
    fs::{self, File, Metadata},
    io,
    path::{Path, PathBuf},
    string::String,
};

/// Converts a UTF-8 path to the platform's native path.
///
/// On Windows the path is widened to UTF-16; elsewhere it is kept as UTF-8.
#[must_use]
pub fn native_path(path: impl AsRef<[u8]>) -> PathBuf {
    #[cfg(windows)]
    {
        use std::os::windows::ffi::OsStringExt;

        let wide: std::vec::Vec<u16> = crate::convert_to_vec(path.as_ref());
        PathBuf::from(std::ffi::OsString::from_wide(&wide))
    }
    #[cfg(not(windows))]
    {
        PathBuf::from(crate::decode_lossy(path.as_ref()).collect::<String>())
    }
}

/// Converts a native path back to UTF-8, replacing what does not decode.
#[must_use]
pub fn display_path(path: &Path) -> String {
    crate::args::from_native(path.as_os_str())
}

/// Like [`display_path`], with `/` as the only separator.
#[must_use]
pub fn generic_display_path(path: &Path) -> String {
    let display = display_path(path);
    if cfg!(windows) {
        display.replace('\\', "/")
    } else {
        display
    }
}

/// Metadata of the file at `path`, following symbolic links.
///
/// # Errors
///
/// Whatever [`std::fs::metadata`] reports for the native path.
pub fn stat(path: impl AsRef<[u8]>) -> io::Result<Metadata> {
    fs::metadata(native_path(path))
}

/// [`stat`] for callers that pass the size of the record they expect back.
///
/// A size that does not match `size_of::<Metadata>()` means the caller was
/// built against a different record layout, and fails with
/// [`io::ErrorKind::InvalidInput`] before the file system is touched.
///
/// # Errors
///
/// `InvalidInput` on a size mismatch, otherwise as [`stat`].
pub fn stat_checked(path: impl AsRef<[u8]>, record_size: usize) -> io::Result<Metadata> {
    let expected = size_of::<Metadata>();
    if record_size != expected {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            std::format!("stat record of {record_size} bytes, expected {expected}"),
        ));
    }
    stat(path)
}

/// Opens the file at `path` for reading.
///
/// # Errors
///
/// As [`std::fs::File::open`].
pub fn open(path: impl AsRef<[u8]>) -> io::Result<File> {
    File::open(native_path(path))
}

/// Creates or truncates the file at `path` for writing.
///
/// # Errors
///
/// As [`std::fs::File::create`].
pub fn create(path: impl AsRef<[u8]>) -> io::Result<File> {
    File::create(native_path(path))
}

/// Removes the file at `path`.
///
/// # Errors
///
/// As [`std::fs::remove_file`].
pub fn remove(path: impl AsRef<[u8]>) -> io::Result<()> {
    fs::remove_file(native_path(path))
}

#[cfg(test)]
mod tests {
    use std::io::{Read, Write};

    use super::*;

    // Hebrew, Cyrillic and Greek letters, as in a typical non-ASCII name.
    const NAME: &str = "\u{5e9}-\u{43c}-\u{3bd}.txt";

    fn scratch(tag: &str) -> String {
        let dir = display_path(&std::env::temp_dir());
        std::format!("{dir}/wideio-{tag}-{}-{NAME}", std::process::id())
    }

    #[test]
    fn stat_missing_file_fails() {
        let path = scratch("missing");
        let _ = remove(&path);
        assert_eq!(stat(&path).unwrap_err().kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn create_stat_open_remove() {
        let path = scratch("lifecycle");
        let data = b"Hello World\0";
        create(&path).unwrap().write_all(data).unwrap();

        let meta = stat(&path).unwrap();
        assert_eq!(meta.len(), data.len() as u64);
        assert_eq!(
            stat_checked(&path, size_of::<Metadata>()).unwrap().len(),
            meta.len()
        );

        let mut read = std::vec::Vec::new();
        open(&path).unwrap().read_to_end(&mut read).unwrap();
        assert_eq!(read, data);

        remove(&path).unwrap();
        assert!(stat(&path).is_err());
    }

    #[test]
    fn stat_checked_rejects_wrong_record_size() {
        let err = stat_checked("anything", size_of::<Metadata>() - 4).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn native_path_round_trips() {
        let native = native_path(NAME);
        assert_eq!(display_path(&native), NAME);
    }

    #[test]
    fn native_path_replaces_invalid_bytes() {
        let native = native_path(b"a\xFFb");
        assert_eq!(display_path(&native), "a\u{FFFD}b");
    }

    #[test]
    fn generic_display_path_uses_forward_slashes() {
        let path = native_path("dir/sub/file");
        assert_eq!(generic_display_path(&path), "dir/sub/file");
    }
}
