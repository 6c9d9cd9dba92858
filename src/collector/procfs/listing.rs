//! Enumeration of process directories under the `/proc` root.

use std::io::Write;
use std::path::Path;

use tracing::debug;

use crate::collector::traits::FileSystem;
use crate::error::ProcError;

/// Returns `true` if `name` is non-empty and consists only of ASCII digits.
///
/// This is the sole test for "is this a process directory".
pub fn is_numeric(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| b.is_ascii_digit())
}

/// Numeric entries found by one scan, in the order the directory yielded them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcListing {
    pids: Vec<String>,
}

impl ProcListing {
    pub fn pids(&self) -> &[String] {
        &self.pids
    }

    pub fn count(&self) -> usize {
        self.pids.len()
    }
}

/// Scans `root` and prints every numeric entry as a `PID / Type` table row.
///
/// Rows are written as entries are discovered, unsorted. Entry names that
/// are not valid UTF-8 cannot be numeric and are skipped. An empty result is
/// not an error.
pub fn list_process_dirs<F, W>(fs: &F, root: &Path, out: &mut W) -> Result<ProcListing, ProcError>
where
    F: FileSystem + ?Sized,
    W: Write + ?Sized,
{
    let entries = fs
        .read_dir(root)
        .map_err(|e| ProcError::open("opendir", root, e))?;

    writeln!(out, "Process directories in {}:", root.display())?;
    writeln!(out, "{:<8} {:<20}", "PID", "Type")?;
    writeln!(out, "{:<8} {:<20}", "---", "----")?;

    let mut listing = ProcListing::default();
    for entry in entries {
        let name = entry.map_err(|e| ProcError::read("readdir", root, e))?;
        let Some(name) = name.to_str() else {
            continue;
        };
        if is_numeric(name) {
            writeln!(out, "{:<8} {:<20}", name, "process")?;
            listing.pids.push(name.to_string());
        }
    }

    debug!(root = %root.display(), count = listing.count(), "scanned process directories");

    writeln!(out, "Found {} process directories", listing.count())?;
    writeln!(out, "SUCCESS: Process directories listed!")?;
    Ok(listing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::mock::MockFs;
    use std::collections::HashSet;

    #[test]
    fn test_is_numeric() {
        assert!(is_numeric("123"));
        assert!(is_numeric("0"));
        assert!(!is_numeric(""));
        assert!(!is_numeric("12a"));
        assert!(!is_numeric("-1"));
        assert!(!is_numeric(" 1"));
        assert!(!is_numeric("١٢"));
    }

    #[test]
    fn test_list_numbered_entries() {
        let fs = MockFs::numbered_entries();
        let mut out = Vec::new();
        let listing = list_process_dirs(&fs, Path::new("/proc"), &mut out).unwrap();

        let pids: HashSet<&str> = listing.pids().iter().map(String::as_str).collect();
        assert_eq!(pids, HashSet::from(["1", "2", "7"]));
        assert_eq!(listing.count(), 3);

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Process directories in /proc:\nPID      Type"));
        assert!(text.contains("7        process             \n"));
        assert!(!text.contains("42x"));
        assert!(text.ends_with("Found 3 process directories\nSUCCESS: Process directories listed!\n"));
    }

    #[test]
    fn test_list_empty_root() {
        let mut fs = MockFs::new();
        fs.add_dir("/proc");
        fs.add_file("/proc/version", "Linux\n");

        let mut out = Vec::new();
        let listing = list_process_dirs(&fs, Path::new("/proc"), &mut out).unwrap();
        assert_eq!(listing.count(), 0);
        assert!(String::from_utf8(out).unwrap().contains("Found 0 process directories\n"));
    }

    #[test]
    fn test_list_missing_root() {
        let fs = MockFs::new();
        let mut out = Vec::new();
        let err = list_process_dirs(&fs, Path::new("/proc"), &mut out).unwrap_err();
        assert!(matches!(err, ProcError::Open { op: "opendir", .. }));
        assert!(out.is_empty());
    }

    #[test]
    fn test_list_iteration_failure_is_distinct() {
        let mut fs = MockFs::typical_system();
        fs.fail_listing("/proc");
        let mut out = Vec::new();
        let err = list_process_dirs(&fs, Path::new("/proc"), &mut out).unwrap_err();
        assert!(matches!(err, ProcError::Read { op: "readdir", .. }));
        assert!(!String::from_utf8(out).unwrap().contains("SUCCESS"));
    }
}
