//! Streaming copies of a pseudo-file to an output stream.
//!
//! Two styles are provided: [`read_raw`] issues descriptor reads into a
//! fixed [`ChunkBuffer`], [`read_buffered`] goes through a `BufReader` line
//! by line. Both emit the file's bytes verbatim, so their total output is
//! identical even though chunk boundaries differ.

use std::io::{self, BufRead, BufReader, Read, Write};
use std::path::Path;

use tracing::debug;

use crate::collector::traits::{FileHandle, FileSystem};
use crate::console::{Console, Status};
use crate::error::ProcError;

/// Capacity of the raw-read window.
pub const CHUNK_CAPACITY: usize = 4096;

/// Longest line segment returned by one buffered read. Longer lines arrive
/// in several segments.
pub const LINE_CAPACITY: usize = CHUNK_CAPACITY - 1;

/// Owned fixed-capacity byte window.
///
/// One slot of the capacity is kept in reserve, so a single fill never
/// exceeds [`LINE_CAPACITY`] bytes.
pub struct ChunkBuffer {
    data: [u8; CHUNK_CAPACITY],
    len: usize,
}

impl Default for ChunkBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl ChunkBuffer {
    pub fn new() -> Self {
        Self {
            data: [0; CHUNK_CAPACITY],
            len: 0,
        }
    }

    /// Replaces the contents with one read from `src`.
    ///
    /// Returns the number of bytes read; `0` means end of input.
    /// Interrupted reads are retried.
    pub fn fill_from<R: Read + ?Sized>(&mut self, src: &mut R) -> io::Result<usize> {
        self.len = 0;
        loop {
            match src.read(&mut self.data[..LINE_CAPACITY]) {
                Ok(n) => {
                    self.len = n;
                    return Ok(n);
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }

    pub fn filled(&self) -> &[u8] {
        &self.data[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// How a file is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadStyle {
    /// Descriptor reads into a fixed chunk buffer.
    Raw,
    /// Line reads through a buffered stream.
    Buffered,
}

impl ReadStyle {
    fn open_op(self) -> &'static str {
        match self {
            ReadStyle::Raw => "open",
            ReadStyle::Buffered => "fopen",
        }
    }

    fn close_op(self) -> &'static str {
        match self {
            ReadStyle::Raw => "close",
            ReadStyle::Buffered => "fclose",
        }
    }
}

/// Totals for one completed read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadStats {
    /// Bytes written to the output.
    pub bytes: u64,
    /// Non-empty chunks (raw) or line segments (buffered) copied.
    pub segments: u64,
}

/// Copies `path` to `out` in [`ChunkBuffer`]-sized chunks.
///
/// Each chunk is written as soon as it is read. A read error after partial
/// output still fails; the bytes already written stay written.
pub fn read_raw<F, W>(fs: &F, path: &Path, out: &mut W) -> Result<ReadStats, ProcError>
where
    F: FileSystem + ?Sized,
    W: Write + ?Sized,
{
    let style = ReadStyle::Raw;
    let mut file = fs
        .open(path)
        .map_err(|e| ProcError::open(style.open_op(), path, e))?;

    let mut buf = ChunkBuffer::new();
    let mut stats = ReadStats::default();
    let copied = loop {
        match buf.fill_from(&mut *file) {
            Ok(0) => break Ok(()),
            Ok(n) => {
                if let Err(e) = out.write_all(buf.filled()) {
                    break Err(ProcError::Output(e));
                }
                stats.bytes += n as u64;
                stats.segments += 1;
            }
            Err(e) => break Err(ProcError::read("read", path, e)),
        }
    };

    finish(style, path, file, copied, stats)
}

/// Copies `path` to `out` one line at a time through a `BufReader`.
pub fn read_buffered<F, W>(fs: &F, path: &Path, out: &mut W) -> Result<ReadStats, ProcError>
where
    F: FileSystem + ?Sized,
    W: Write + ?Sized,
{
    read_lines(fs, path, out, None)
}

/// Buffered copy of at most `max_lines` line segments (all when `None`).
///
/// A segment is what one line read returns: a full line, or a
/// [`LINE_CAPACITY`]-byte piece of a longer one.
pub fn read_lines<F, W>(
    fs: &F,
    path: &Path,
    out: &mut W,
    max_lines: Option<usize>,
) -> Result<ReadStats, ProcError>
where
    F: FileSystem + ?Sized,
    W: Write + ?Sized,
{
    let style = ReadStyle::Buffered;
    let file = fs
        .open(path)
        .map_err(|e| ProcError::open(style.open_op(), path, e))?;

    let mut reader = BufReader::new(file);
    let mut line = Vec::with_capacity(LINE_CAPACITY);
    let mut stats = ReadStats::default();
    let copied = loop {
        if max_lines.is_some_and(|max| stats.segments >= max as u64) {
            break Ok(());
        }
        line.clear();
        match (&mut reader)
            .take(LINE_CAPACITY as u64)
            .read_until(b'\n', &mut line)
        {
            Ok(0) => break Ok(()),
            Ok(n) => {
                if let Err(e) = out.write_all(&line) {
                    break Err(ProcError::Output(e));
                }
                stats.bytes += n as u64;
                stats.segments += 1;
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => break Err(ProcError::read("read", path, e)),
        }
    };

    finish(style, path, reader.into_inner(), copied, stats)
}

/// Releases `file` on every path; a copy error takes precedence over a
/// close error.
fn finish(
    style: ReadStyle,
    path: &Path,
    file: Box<dyn FileHandle>,
    copied: Result<(), ProcError>,
    stats: ReadStats,
) -> Result<ReadStats, ProcError> {
    let closed = file.close();
    copied?;
    closed.map_err(|e| ProcError::close(style.close_op(), path, e))?;
    debug!(
        path = %path.display(),
        bytes = stats.bytes,
        segments = stats.segments,
        "copied"
    );
    Ok(stats)
}

/// Copies `path` to the console in the given style, reporting any error.
pub fn dump_file<F, O, E>(fs: &F, path: &Path, style: ReadStyle, con: &mut Console<O, E>) -> Status
where
    F: FileSystem + ?Sized,
    O: Write,
    E: Write,
{
    let result = match style {
        ReadStyle::Raw => read_raw(fs, path, con.out()),
        ReadStyle::Buffered => read_buffered(fs, path, con.out()),
    };
    if let Err(e) = &result {
        con.error(e);
    }
    Status::from(&result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::mock::MockFs;
    use crate::console::testing::{FailAfter, console, text};

    fn pattern(len: usize) -> Vec<u8> {
        (0..len).map(|i| b"abcdefghij\n"[i % 11]).collect()
    }

    fn raw(fs: &MockFs, path: &str) -> (Result<ReadStats, ProcError>, Vec<u8>) {
        let mut out = Vec::new();
        let result = read_raw(fs, Path::new(path), &mut out);
        (result, out)
    }

    fn buffered(fs: &MockFs, path: &str) -> (Result<ReadStats, ProcError>, Vec<u8>) {
        let mut out = Vec::new();
        let result = read_buffered(fs, Path::new(path), &mut out);
        (result, out)
    }

    #[test]
    fn test_chunk_buffer_reserves_one_slot() {
        let mut buf = ChunkBuffer::new();
        assert!(buf.is_empty());
        let data = vec![7u8; 5000];
        let n = buf.fill_from(&mut data.as_slice()).unwrap();
        assert_eq!(n, LINE_CAPACITY);
        assert_eq!(buf.len(), 4095);
        assert!(buf.len() < CHUNK_CAPACITY);
        assert_eq!(buf.filled(), &data[..4095]);
    }

    #[test]
    fn test_raw_read_emits_exact_bytes() {
        for len in [0usize, 1, 4095, 4096, 8193] {
            let mut fs = MockFs::new();
            let content = pattern(len);
            fs.add_file("/proc/blob", content.clone());

            let (result, out) = raw(&fs, "/proc/blob");
            let stats = result.unwrap();
            assert_eq!(out, content, "length {len}");
            assert_eq!(stats.bytes, len as u64);
            assert_eq!(stats.segments, len.div_ceil(LINE_CAPACITY) as u64);
        }
    }

    #[test]
    fn test_raw_read_missing_file() {
        let fs = MockFs::new();
        let (result, out) = raw(&fs, "/proc/missing");
        assert!(matches!(result, Err(ProcError::Open { op: "open", .. })));
        assert!(out.is_empty());
    }

    #[test]
    fn test_raw_read_error_after_partial_output() {
        let mut fs = MockFs::new();
        fs.add_file("/proc/blob", pattern(6000));
        fs.fail_read_at("/proc/blob", 4095);

        let (result, out) = raw(&fs, "/proc/blob");
        assert!(matches!(result, Err(ProcError::Read { op: "read", .. })));
        assert_eq!(out, pattern(4095));
    }

    #[test]
    fn test_read_error_wins_over_close_error() {
        let mut fs = MockFs::new();
        fs.add_file("/proc/blob", "abc");
        fs.fail_read_at("/proc/blob", 1);
        fs.fail_close("/proc/blob");

        let (result, _) = raw(&fs, "/proc/blob");
        assert!(matches!(result, Err(ProcError::Read { .. })));
    }

    #[test]
    fn test_raw_close_failure_is_distinct() {
        let mut fs = MockFs::new();
        fs.add_file("/proc/version", "Linux version 6.1\n");
        fs.fail_close("/proc/version");

        let (result, out) = raw(&fs, "/proc/version");
        let err = result.unwrap_err();
        assert!(matches!(err, ProcError::Close { op: "close", .. }));
        assert_eq!(err.to_string(), "close(/proc/version) failed: Bad file descriptor");
        assert_eq!(out, b"Linux version 6.1\n");
    }

    #[test]
    fn test_buffered_matches_raw() {
        let mut fs = MockFs::typical_system();
        let mut long_line = vec![b'x'; 9000];
        long_line.push(b'\n');
        long_line.extend_from_slice(b"tail without newline");
        fs.add_file("/proc/long", long_line);

        for path in ["/proc/version", "/proc/cpuinfo", "/proc/1/cmdline", "/proc/long"] {
            let (raw_result, raw_out) = raw(&fs, path);
            let (buf_result, buf_out) = buffered(&fs, path);
            assert_eq!(raw_out, buf_out, "{path}");
            assert_eq!(raw_result.unwrap().bytes, buf_result.unwrap().bytes);
        }
    }

    #[test]
    fn test_buffered_splits_long_lines() {
        let mut fs = MockFs::new();
        let mut content = vec![b'y'; 5000];
        content.push(b'\n');
        fs.add_file("/proc/long", content.clone());

        let (result, out) = buffered(&fs, "/proc/long");
        assert_eq!(out, content);
        assert_eq!(result.unwrap().segments, 2);
    }

    #[test]
    fn test_buffered_errors_use_stream_names() {
        let mut fs = MockFs::new();
        let (result, _) = buffered(&fs, "/proc/missing");
        assert!(matches!(result, Err(ProcError::Open { op: "fopen", .. })));

        fs.add_file("/proc/meminfo", "MemTotal: 1 kB\n");
        fs.fail_close("/proc/meminfo");
        let (result, out) = buffered(&fs, "/proc/meminfo");
        assert!(matches!(result, Err(ProcError::Close { op: "fclose", .. })));
        assert_eq!(out, b"MemTotal: 1 kB\n");
    }

    #[test]
    fn test_read_lines_cap() {
        let fs = MockFs::typical_system();
        let mut out = Vec::new();
        let stats = read_lines(&fs, Path::new("/proc/cpuinfo"), &mut out, Some(3)).unwrap();
        assert_eq!(stats.segments, 3);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "processor\t: 0\nvendor_id\t: GenuineIntel\ncpu family\t: 6\n"
        );
    }

    #[test]
    fn test_read_lines_short_file() {
        let fs = MockFs::sparse_system_files();
        let mut out = Vec::new();
        let stats = read_lines(&fs, Path::new("/proc/meminfo"), &mut out, Some(10)).unwrap();
        assert_eq!(stats.segments, 3);
        assert_eq!(out.iter().filter(|&&b| b == b'\n').count(), 3);
    }

    #[test]
    fn test_buffered_read_error_after_partial_output() {
        let mut fs = MockFs::new();
        fs.add_file("/proc/blob", "alpha\nbravo\ncharlie\ndelta\n");
        fs.fail_read_at("/proc/blob", 12);

        let (result, out) = buffered(&fs, "/proc/blob");
        let err = result.unwrap_err();
        assert!(matches!(err, ProcError::Read { op: "read", .. }));
        assert_eq!(err.to_string(), "read(/proc/blob) failed: Input/output error");
        assert_eq!(out, b"alpha\nbravo\n");
    }

    #[test]
    fn test_output_failure() {
        let fs = MockFs::typical_system();
        let result = read_raw(&fs, Path::new("/proc/version"), &mut FailAfter::new(0));
        assert!(result.unwrap_err().is_output());

        let result = read_buffered(&fs, Path::new("/proc/cpuinfo"), &mut FailAfter::new(5));
        assert!(result.unwrap_err().is_output());
    }

    #[test]
    fn test_dump_file_reports_error() {
        let fs = MockFs::typical_system();
        let mut con = console();
        let status = dump_file(&fs, Path::new("/proc/nope"), ReadStyle::Raw, &mut con);
        assert_eq!(status, Status::Failure);

        let (out, err) = text(con);
        assert!(out.is_empty());
        assert!(err.starts_with("ERROR: open(/proc/nope) failed: "));
    }

    #[test]
    fn test_dump_file_success() {
        let fs = MockFs::typical_system();
        let mut con = console();
        let status = dump_file(&fs, Path::new("/proc/version"), ReadStyle::Buffered, &mut con);
        assert_eq!(status.code(), 0);

        let (out, err) = text(con);
        assert!(out.starts_with("Linux version 6.1.0"));
        assert!(err.is_empty());
    }
}
