//! Main collector that combines the process and system readers.
//!
//! The `Collector` struct is the single entry point the binary drives: one
//! method per operation, each printing its own diagnostics and returning a
//! [`Status`].

use std::io::Write;
use std::path::Path;

use tracing::info;

use crate::collector::procfs::{
    ProcessReader, ProcessReport, ReadStyle, SystemReader, dump_file, list_process_dirs,
};
use crate::collector::traits::FileSystem;
use crate::config::ProcPaths;
use crate::console::{Console, Status};

/// Dumps process directories, per-process files and system files.
pub struct Collector<F: FileSystem + Clone> {
    fs: F,
    paths: ProcPaths,
    process_reader: ProcessReader<F>,
    system_reader: SystemReader<F>,
}

impl<F: FileSystem + Clone> Collector<F> {
    /// Creates a new collector.
    ///
    /// # Arguments
    /// * `fs` - Filesystem implementation (real or mock)
    /// * `paths` - Location of the proc filesystem
    pub fn new(fs: F, paths: ProcPaths) -> Self {
        Self {
            fs: fs.clone(),
            process_reader: ProcessReader::new(fs.clone(), paths.clone()),
            system_reader: SystemReader::new(fs, paths.clone()),
            paths,
        }
    }

    /// Prints the table of numeric entries under the proc root.
    pub fn list_processes<O: Write, E: Write>(&self, con: &mut Console<O, E>) -> Status {
        let root = self.paths.root();
        match list_process_dirs(&self.fs, &root, con.out()) {
            Ok(listing) => {
                info!(count = listing.count(), "listed process directories");
                Status::Success
            }
            Err(e) => {
                con.error(&e);
                Status::Failure
            }
        }
    }

    /// Prints `status` and `cmdline` of one process.
    pub fn read_process_info<O: Write, E: Write>(
        &self,
        pid: &str,
        con: &mut Console<O, E>,
    ) -> ProcessReport {
        self.process_reader.read_process_info(pid, con)
    }

    /// Prints the head of `cpuinfo` and `meminfo`.
    pub fn system_info<O: Write, E: Write>(
        &self,
        max_lines: usize,
        con: &mut Console<O, E>,
    ) -> Status {
        self.system_reader.system_info(max_lines, con)
    }

    /// Runs both reader styles over `file` (default `/proc/version`).
    pub fn compare_methods<O: Write, E: Write>(
        &self,
        file: Option<&Path>,
        con: &mut Console<O, E>,
    ) {
        self.system_reader.compare_methods(file, con);
    }

    /// Copies an arbitrary file to the output.
    pub fn dump<O: Write, E: Write>(
        &self,
        path: &Path,
        style: ReadStyle,
        con: &mut Console<O, E>,
    ) -> Status {
        dump_file(&self.fs, path, style, con)
    }

    /// Runs listing, process info for `pid`, system info and the comparison
    /// in sequence.
    ///
    /// Every step runs regardless of earlier failures. The comparison does
    /// not affect the result.
    pub fn run_all<O: Write, E: Write>(
        &self,
        pid: &str,
        max_lines: usize,
        con: &mut Console<O, E>,
    ) -> Status {
        let mut status = self.list_processes(con);
        status = status.and(self.read_process_info(pid, con).outcome());
        status = status.and(self.system_info(max_lines, con));

        if let Err(e) = con.line(format_args!("")) {
            con.error(&e);
            return Status::Failure;
        }
        self.compare_methods(None, con);
        status
    }
}
