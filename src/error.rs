//! Error type for pseudo-file and directory dumps.

use std::io;
use std::path::{Path, PathBuf};

/// Failure of one dump operation.
///
/// `op` names the primitive that failed (`open`, `fopen`, `opendir`, `read`,
/// `readdir`, `close`, `fclose`), so the rendered message reads like
/// `open(/proc/1/status) failed: No such file or directory`.
#[derive(Debug, thiserror::Error)]
pub enum ProcError {
    /// The file or directory could not be opened.
    #[error("{op}({}) failed: {source}", path.display())]
    Open {
        op: &'static str,
        path: PathBuf,
        source: io::Error,
    },

    /// Reading failed after the handle was opened.
    #[error("{op}({}) failed: {source}", path.display())]
    Read {
        op: &'static str,
        path: PathBuf,
        source: io::Error,
    },

    /// Releasing the handle failed.
    #[error("{op}({}) failed: {source}", path.display())]
    Close {
        op: &'static str,
        path: PathBuf,
        source: io::Error,
    },

    /// Writing to the output stream failed.
    #[error("write to output failed: {0}")]
    Output(#[from] io::Error),
}

impl ProcError {
    pub(crate) fn open(op: &'static str, path: &Path, source: io::Error) -> Self {
        ProcError::Open {
            op,
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn read(op: &'static str, path: &Path, source: io::Error) -> Self {
        ProcError::Read {
            op,
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn close(op: &'static str, path: &Path, source: io::Error) -> Self {
        ProcError::Close {
            op,
            path: path.to_path_buf(),
            source,
        }
    }

    /// Returns `true` when the output stream, not an input, failed.
    pub fn is_output(&self) -> bool {
        matches!(self, ProcError::Output(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_primitive_style() {
        let err = ProcError::open(
            "open",
            Path::new("/proc/42/status"),
            io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
        );
        assert_eq!(
            err.to_string(),
            "open(/proc/42/status) failed: No such file or directory"
        );
    }

    #[test]
    fn test_output_flag() {
        let err = ProcError::close("fclose", Path::new("/proc/meminfo"), io::Error::other("x"));
        assert!(!err.is_output());
        assert_eq!(err.to_string(), "fclose(/proc/meminfo) failed: x");

        let err = ProcError::from(io::Error::from(io::ErrorKind::BrokenPipe));
        assert!(err.is_output());
    }
}
