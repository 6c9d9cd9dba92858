//! In-memory mock filesystem for testing readers without real `/proc`.
//!
//! Besides plain content, files and directories can carry injected faults
//! (read error at an offset, close error, iteration error) so the error
//! paths of the readers can be exercised deterministically.

use crate::collector::traits::{DirEntries, FileHandle, FileSystem};
use std::collections::{HashMap, HashSet};
use std::ffi::OsString;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default)]
struct MockFile {
    content: Vec<u8>,
    /// Reads fail once this many bytes have been handed out.
    fail_read_at: Option<usize>,
    fail_close: bool,
}

/// In-memory filesystem for testing.
#[derive(Debug, Clone, Default)]
pub struct MockFs {
    /// Map from path to file contents.
    files: HashMap<PathBuf, MockFile>,
    /// Set of directories (for read_dir support).
    directories: HashSet<PathBuf>,
    /// Directories whose iteration fails after the last entry.
    broken_dirs: HashSet<PathBuf>,
}

impl MockFs {
    /// Creates a new empty mock filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file with the given content.
    ///
    /// Parent directories are automatically created.
    pub fn add_file(&mut self, path: impl AsRef<Path>, content: impl Into<Vec<u8>>) {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            self.add_parents(parent);
        }
        self.files.insert(
            path,
            MockFile {
                content: content.into(),
                ..MockFile::default()
            },
        );
    }

    /// Adds an empty directory.
    pub fn add_dir(&mut self, path: impl AsRef<Path>) {
        self.add_parents(path.as_ref());
    }

    fn add_parents(&mut self, path: &Path) {
        let mut current = Some(path);
        while let Some(p) = current {
            if !p.as_os_str().is_empty() {
                self.directories.insert(p.to_path_buf());
            }
            current = p.parent();
        }
    }

    /// Adds a process directory with its `status` and `cmdline` files.
    ///
    /// An empty `status` or `cmdline` leaves that file out.
    pub fn add_process(&mut self, pid: u32, status: &str, cmdline: &[u8]) {
        let base = PathBuf::from(format!("/proc/{}", pid));
        self.add_dir(&base);
        if !status.is_empty() {
            self.add_file(base.join("status"), status);
        }
        if !cmdline.is_empty() {
            self.add_file(base.join("cmdline"), cmdline);
        }
    }

    /// Makes reads of `path` fail once `offset` bytes have been returned.
    pub fn fail_read_at(&mut self, path: impl AsRef<Path>, offset: usize) {
        if let Some(file) = self.files.get_mut(path.as_ref()) {
            file.fail_read_at = Some(offset);
        }
    }

    /// Makes closing `path` fail.
    pub fn fail_close(&mut self, path: impl AsRef<Path>) {
        if let Some(file) = self.files.get_mut(path.as_ref()) {
            file.fail_close = true;
        }
    }

    /// Makes iteration of directory `path` fail after its last entry.
    pub fn fail_listing(&mut self, path: impl AsRef<Path>) {
        self.broken_dirs.insert(path.as_ref().to_path_buf());
    }
}

/// Open handle onto a `MockFile` snapshot.
struct MockHandle {
    file: MockFile,
    pos: usize,
}

impl Read for MockHandle {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let end = match self.file.fail_read_at {
            Some(at) if self.pos >= at => {
                return Err(io::Error::other("Input/output error"));
            }
            Some(at) => at.min(self.file.content.len()),
            None => self.file.content.len(),
        };
        let n = buf.len().min(end - self.pos);
        buf[..n].copy_from_slice(&self.file.content[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}

impl FileHandle for MockHandle {
    fn close(self: Box<Self>) -> io::Result<()> {
        if self.file.fail_close {
            return Err(io::Error::other("Bad file descriptor"));
        }
        Ok(())
    }
}

fn not_found() -> io::Error {
    io::Error::new(io::ErrorKind::NotFound, "No such file or directory")
}

impl FileSystem for MockFs {
    fn open(&self, path: &Path) -> io::Result<Box<dyn FileHandle>> {
        let file = self.files.get(path).cloned().ok_or_else(not_found)?;
        Ok(Box::new(MockHandle { file, pos: 0 }))
    }

    fn read_dir(&self, path: &Path) -> io::Result<DirEntries> {
        if self.files.contains_key(path) {
            return Err(io::Error::new(
                io::ErrorKind::NotADirectory,
                "Not a directory",
            ));
        }
        if !self.directories.contains(path) {
            return Err(not_found());
        }

        let mut entries: HashSet<OsString> = HashSet::new();

        // Direct children only
        for child in self.files.keys().chain(self.directories.iter()) {
            if child.parent() == Some(path)
                && let Some(name) = child.file_name()
            {
                entries.insert(name.to_os_string());
            }
        }

        let mut entries: Vec<io::Result<OsString>> = entries.into_iter().map(Ok).collect();
        if self.broken_dirs.contains(path) {
            entries.push(Err(io::Error::other("Input/output error")));
        }
        Ok(Box::new(entries.into_iter()))
    }
}
