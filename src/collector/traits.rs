//! Abstractions for filesystem access to enable testing and mocking.
//!
//! The `FileSystem` trait lets the readers work against the real `/proc`
//! filesystem on Linux or against an in-memory mock in tests and CI.

use std::ffi::OsString;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Directory entry names, yielded in whatever order the source provides.
pub type DirEntries = Box<dyn Iterator<Item = io::Result<OsString>>>;

/// An open, readable file whose release can be observed.
///
/// Dropping a handle releases it silently; `close` releases it and reports
/// the outcome.
pub trait FileHandle: Read {
    fn close(self: Box<Self>) -> io::Result<()>;
}

/// Abstraction for filesystem operations.
pub trait FileSystem: Send + Sync {
    /// Opens a file read-only.
    fn open(&self, path: &Path) -> io::Result<Box<dyn FileHandle>>;

    /// Opens a directory for iteration.
    ///
    /// Failure to open is returned here; failures while iterating are
    /// yielded by the iterator.
    fn read_dir(&self, path: &Path) -> io::Result<DirEntries>;
}

/// Real filesystem implementation that delegates to `std::fs`.
///
/// Use this in production to read from the actual `/proc` filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFs;

impl RealFs {
    pub fn new() -> Self {
        Self
    }
}

/// A `std::fs::File` whose descriptor is closed explicitly.
struct RealFile {
    file: File,
}

impl Read for RealFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.file.read(buf)
    }
}

impl FileHandle for RealFile {
    #[cfg(unix)]
    fn close(self: Box<Self>) -> io::Result<()> {
        use std::os::fd::IntoRawFd;

        let fd = self.file.into_raw_fd();
        // SAFETY: `fd` was just released from an owned `File` and is closed exactly once.
        if unsafe { libc::close(fd) } == -1 {
            return Err(io::Error::last_os_error());
        }
        Ok(())
    }

    #[cfg(not(unix))]
    fn close(self: Box<Self>) -> io::Result<()> {
        drop(self.file);
        Ok(())
    }
}

impl FileSystem for RealFs {
    fn open(&self, path: &Path) -> io::Result<Box<dyn FileHandle>> {
        let file = File::open(path)?;
        Ok(Box::new(RealFile { file }))
    }

    fn read_dir(&self, path: &Path) -> io::Result<DirEntries> {
        let entries = std::fs::read_dir(path)?;
        Ok(Box::new(
            entries.map(|entry| entry.map(|entry| entry.file_name())),
        ))
    }
}
