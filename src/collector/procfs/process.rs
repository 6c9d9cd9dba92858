//! Per-process dump of `/proc/[pid]/status` and `/proc/[pid]/cmdline`.

use std::io::Write;

use tracing::{debug, info};

use crate::collector::procfs::reader::{ReadStats, read_raw};
use crate::collector::traits::FileSystem;
use crate::config::ProcPaths;
use crate::console::{Console, Status};
use crate::error::ProcError;

/// Outcome of one process dump, per file.
#[derive(Debug)]
pub struct ProcessReport {
    pub pid: String,
    pub status: Result<ReadStats, ProcError>,
    pub cmdline: Result<ReadStats, ProcError>,
}

impl ProcessReport {
    /// Overall result: only the `cmdline` read decides it.
    pub fn outcome(&self) -> Status {
        Status::from(&self.cmdline)
    }
}

/// Dumps the status and command line of single processes.
pub struct ProcessReader<F: FileSystem> {
    fs: F,
    paths: ProcPaths,
}

impl<F: FileSystem> ProcessReader<F> {
    /// Creates a new process reader.
    ///
    /// # Arguments
    /// * `fs` - Filesystem implementation (real or mock)
    /// * `paths` - Location of the proc filesystem
    pub fn new(fs: F, paths: ProcPaths) -> Self {
        Self { fs, paths }
    }

    /// Prints `status` then `cmdline` of `pid` with raw reads.
    ///
    /// `pid` is substituted into the paths as given. Both files are always
    /// attempted; a failed `status` read only produces a warning, a failed
    /// `cmdline` read makes the whole call fail.
    pub fn read_process_info<O: Write, E: Write>(
        &self,
        pid: &str,
        con: &mut Console<O, E>,
    ) -> ProcessReport {
        let status_path = self.paths.status(pid);
        let cmdline_path = self.paths.cmdline(pid);

        let status = con
            .line(format_args!("\n--- Process Information for PID {} ---", pid))
            .and_then(|()| read_raw(&self.fs, &status_path, con.out()));
        if let Err(e) = &status {
            con.error(e);
            con.warning(format_args!("Could not read {}", status_path.display()));
        }

        let cmdline = con
            .line(format_args!("\n--- Command Line ---"))
            .and_then(|()| read_raw(&self.fs, &cmdline_path, con.out()));
        let cmdline = match cmdline {
            Ok(stats) => con
                .line(format_args!(""))
                .and_then(|()| con.line(format_args!("SUCCESS: Process information read!")))
                .inspect_err(|e| con.error(e))
                .map(|()| stats),
            Err(e) => {
                con.error(&e);
                con.warning(format_args!("Could not read {}", cmdline_path.display()));
                if let Err(out) = con.line(format_args!("")) {
                    con.error(&out);
                }
                Err(e)
            }
        };

        let report = ProcessReport {
            pid: pid.to_string(),
            status,
            cmdline,
        };
        match report.outcome() {
            Status::Success => debug!(pid, "process information read"),
            Status::Failure => info!(pid, "process information incomplete"),
        }
        report
    }
}
