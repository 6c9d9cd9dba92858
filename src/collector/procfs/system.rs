//! System-wide dumps: CPU and memory summaries, and the reader comparison.

use std::io::Write;
use std::path::Path;

use tracing::{debug, info};

use crate::collector::procfs::reader::{ReadStyle, dump_file, read_lines};
use crate::collector::traits::FileSystem;
use crate::config::ProcPaths;
use crate::console::{Console, Status};
use crate::error::ProcError;

/// Dumps system-wide pseudo-files from `/proc/`.
pub struct SystemReader<F: FileSystem> {
    fs: F,
    paths: ProcPaths,
}

impl<F: FileSystem> SystemReader<F> {
    /// Creates a new system reader.
    ///
    /// # Arguments
    /// * `fs` - Filesystem implementation (real or mock)
    /// * `paths` - Location of the proc filesystem
    pub fn new(fs: F, paths: ProcPaths) -> Self {
        Self { fs, paths }
    }

    /// Prints the first `max_lines` lines of `cpuinfo` and `meminfo`.
    ///
    /// Best effort: a file that cannot be opened, read or closed is reported
    /// and skipped, and the call still succeeds. Only a failing output stream
    /// fails it.
    pub fn system_info<O: Write, E: Write>(
        &self,
        max_lines: usize,
        con: &mut Console<O, E>,
    ) -> Status {
        match self.try_system_info(max_lines, con) {
            Ok(()) => Status::Success,
            Err(e) => {
                con.error(&e);
                Status::Failure
            }
        }
    }

    fn try_system_info<O: Write, E: Write>(
        &self,
        max_lines: usize,
        con: &mut Console<O, E>,
    ) -> Result<(), ProcError> {
        let sections = [
            ("CPU", self.paths.cpuinfo()),
            ("Memory", self.paths.meminfo()),
        ];

        for (title, path) in &sections {
            con.line(format_args!(
                "\n--- {} Information (first {} lines) ---",
                title, max_lines
            ))?;
            self.summarize(path, max_lines, con)?;
        }

        con.line(format_args!("SUCCESS: System information displayed!"))
    }

    /// Streams the head of one file, reporting input failures.
    fn summarize<O: Write, E: Write>(
        &self,
        path: &Path,
        max_lines: usize,
        con: &mut Console<O, E>,
    ) -> Result<(), ProcError> {
        match read_lines(&self.fs, path, con.out(), Some(max_lines)) {
            Ok(stats) => {
                debug!(path = %path.display(), lines = stats.segments, "summarized");
                Ok(())
            }
            Err(e) if e.is_output() => Err(e),
            Err(e) => {
                con.error(&e);
                Ok(())
            }
        }
    }

    /// Runs both reader styles over the same file with section headers.
    ///
    /// Uses `/proc/version` unless `file` is given. The readers' own
    /// outcomes are not part of the result; errors are reported as usual.
    pub fn compare_methods<O: Write, E: Write>(
        &self,
        file: Option<&Path>,
        con: &mut Console<O, E>,
    ) {
        let path = file.map_or_else(|| self.paths.version(), Path::to_path_buf);
        info!(path = %path.display(), "comparing read methods");

        if let Err(e) = self.try_compare(&path, con) {
            con.error(&e);
        }
    }

    fn try_compare<O: Write, E: Write>(
        &self,
        path: &Path,
        con: &mut Console<O, E>,
    ) -> Result<(), ProcError> {
        con.line(format_args!(
            "Comparing file reading methods for: {}\n",
            path.display()
        ))?;

        con.line(format_args!("=== Method 1: Using System Calls ==="))?;
        dump_file(&self.fs, path, ReadStyle::Raw, con);

        con.line(format_args!("\n=== Method 2: Using Library Functions ==="))?;
        dump_file(&self.fs, path, ReadStyle::Buffered, con);

        con.line(format_args!(
            "\nNOTE: Run this program with strace to see the difference!"
        ))?;
        con.line(format_args!(
            "Example: strace -e trace=openat,read,write,close {}",
            env!("CARGO_PKG_NAME")
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::mock::MockFs;
    use crate::config::DEFAULT_MAX_LINES;
    use crate::console::testing::{console, text};

    fn reader(fs: MockFs) -> SystemReader<MockFs> {
        SystemReader::new(fs, ProcPaths::default())
    }

    #[test]
    fn test_system_info_caps_lines() {
        let reader = reader(MockFs::typical_system());
        let mut con = console();
        let status = reader.system_info(DEFAULT_MAX_LINES, &mut con);
        assert_eq!(status, Status::Success);

        let (out, err) = text(con);
        assert!(err.is_empty());
        assert!(out.starts_with("\n--- CPU Information (first 10 lines) ---\nprocessor\t: 0\n"));
        // 13-line cpuinfo is cut after its 10th line
        assert!(out.contains("physical id\t: 0\n\n--- Memory Information (first 10 lines) ---\n"));
        assert!(!out.contains("siblings"));
        assert!(!out.contains("Dirty"));
        assert!(out.ends_with("SwapFree:        4096000 kB\nSUCCESS: System information displayed!\n"));
    }

    #[test]
    fn test_system_info_missing_and_short_files() {
        let reader = reader(MockFs::sparse_system_files());
        let mut con = console();
        let status = reader.system_info(DEFAULT_MAX_LINES, &mut con);
        assert_eq!(status, Status::Success);

        let (out, err) = text(con);
        assert!(err.starts_with("ERROR: fopen(/proc/cpuinfo) failed: "));
        assert!(out.contains("MemFree:          512000 kB\nMemAvailable:     768000 kB\n"));
        assert!(out.contains("SUCCESS: System information displayed!"));
    }

    #[test]
    fn test_system_info_close_failure_keeps_success() {
        let mut fs = MockFs::typical_system();
        fs.fail_close("/proc/meminfo");
        let reader = reader(fs);

        let mut con = console();
        assert_eq!(reader.system_info(3, &mut con), Status::Success);

        let (out, err) = text(con);
        assert_eq!(err, "ERROR: fclose(/proc/meminfo) failed: Bad file descriptor\n");
        assert!(out.contains("(first 3 lines)"));
        assert!(out.contains("MemAvailable:"));
    }

    #[test]
    fn test_system_info_read_fault_keeps_success() {
        let mut fs = MockFs::typical_system();
        fs.fail_read_at("/proc/cpuinfo", 20);
        let reader = reader(fs);

        let mut con = console();
        assert_eq!(reader.system_info(DEFAULT_MAX_LINES, &mut con), Status::Success);

        let (out, err) = text(con);
        assert_eq!(err, "ERROR: read(/proc/cpuinfo) failed: Input/output error\n");
        assert!(out.contains("processor\t: 0\n\n--- Memory Information"));
        assert!(!out.contains("vendor_id"));
        assert!(out.contains("MemAvailable:"));
        assert!(out.ends_with("SUCCESS: System information displayed!\n"));
    }

    #[test]
    fn test_system_info_both_missing() {
        let reader = reader(MockFs::new());
        let mut con = console();
        assert_eq!(reader.system_info(DEFAULT_MAX_LINES, &mut con), Status::Success);

        let (_, err) = text(con);
        assert_eq!(err.matches("ERROR: fopen(").count(), 2);
    }

    #[test]
    fn test_compare_methods_prints_both_sections() {
        let reader = reader(MockFs::typical_system());
        let mut con = console();
        reader.compare_methods(None, &mut con);

        let (out, err) = text(con);
        assert!(err.is_empty());
        assert!(out.starts_with("Comparing file reading methods for: /proc/version\n\n"));

        let (first, second) = out
            .split_once("\n=== Method 2: Using Library Functions ===\n")
            .unwrap();
        let first = first
            .strip_prefix("Comparing file reading methods for: /proc/version\n\n=== Method 1: Using System Calls ===\n")
            .unwrap();
        let second = second
            .split_once("\nNOTE: Run this program with strace")
            .unwrap()
            .0;
        assert_eq!(first, second);
        assert!(first.starts_with("Linux version"));
    }

    #[test]
    fn test_compare_methods_missing_file() {
        let reader = reader(MockFs::new());
        let mut con = console();
        reader.compare_methods(Some(Path::new("/proc/nope")), &mut con);

        let (out, err) = text(con);
        assert!(out.contains("=== Method 1: Using System Calls ==="));
        assert!(out.contains("=== Method 2: Using Library Functions ==="));
        assert!(err.contains("ERROR: open(/proc/nope) failed: "));
        assert!(err.contains("ERROR: fopen(/proc/nope) failed: "));
    }
}
