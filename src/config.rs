//! Locations of the pseudo-files read by the dump operations.

use std::path::PathBuf;

/// Default mount point of the process-information pseudo-filesystem.
pub const DEFAULT_PROC_PATH: &str = "/proc";

/// Lines shown per system-info file unless overridden.
pub const DEFAULT_MAX_LINES: usize = 10;

/// Builds pseudo-file paths under a configurable root.
///
/// Paths are produced by plain substitution (`<root>/<pid>/status`); the
/// identifier is not validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcPaths {
    proc_path: String,
}

impl Default for ProcPaths {
    fn default() -> Self {
        Self::new(DEFAULT_PROC_PATH)
    }
}

impl ProcPaths {
    pub fn new(proc_path: impl Into<String>) -> Self {
        Self {
            proc_path: proc_path.into(),
        }
    }

    pub fn root(&self) -> PathBuf {
        PathBuf::from(&self.proc_path)
    }

    pub fn status(&self, pid: &str) -> PathBuf {
        PathBuf::from(format!("{}/{}/status", self.proc_path, pid))
    }

    pub fn cmdline(&self, pid: &str) -> PathBuf {
        PathBuf::from(format!("{}/{}/cmdline", self.proc_path, pid))
    }

    pub fn cpuinfo(&self) -> PathBuf {
        PathBuf::from(format!("{}/cpuinfo", self.proc_path))
    }

    pub fn meminfo(&self) -> PathBuf {
        PathBuf::from(format!("{}/meminfo", self.proc_path))
    }

    pub fn version(&self) -> PathBuf {
        PathBuf::from(format!("{}/version", self.proc_path))
    }
}
