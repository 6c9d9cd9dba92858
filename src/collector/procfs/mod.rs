//! Readers for the Linux `/proc` filesystem.
//!
//! This module provides the directory scan, the two file-copy styles and the
//! process and system dumps built on top of them.

pub mod listing;
pub mod process;
pub mod reader;
pub mod system;

pub use listing::{ProcListing, is_numeric, list_process_dirs};
pub use process::{ProcessReader, ProcessReport};
pub use reader::{ChunkBuffer, ReadStats, ReadStyle, dump_file, read_buffered, read_lines, read_raw};
pub use system::SystemReader;
