//! Pseudo-file reader for Linux.
//!
//! This module dumps process directories and kernel-exposed text files from
//! the `/proc` filesystem, with support for mocking for testing on macOS.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         Collector                           │
//! │  ┌─────────────────────┐   ┌─────────────────────────────┐  │
//! │  │  ProcessReader      │   │     SystemReader            │  │
//! │  │  - /proc/[pid]/*    │   │  - /proc/cpuinfo            │  │
//! │  └──────────┬──────────┘   │  - /proc/meminfo            │  │
//! │             │              │  - /proc/version            │  │
//! │             │              └──────────────┬──────────────┘  │
//! │             └──────────────┬──────────────┘                 │
//! │                     ┌──────▼──────┐                         │
//! │                     │ read_raw /  │ list_process_dirs       │
//! │                     │ read_lines  │                         │
//! │                     └──────┬──────┘                         │
//! │                     ┌──────▼──────┐                         │
//! │                     │  FileSystem │ (trait)                 │
//! │                     └──────┬──────┘                         │
//! └────────────────────────────┼────────────────────────────────┘
//!                              │
//!              ┌───────────────┼───────────────┐
//!              │               │               │
//!       ┌──────▼──────┐ ┌──────▼──────┐ ┌──────▼──────┐
//!       │   RealFs    │ │   MockFs    │ │  Scenarios  │
//!       │ (Linux)     │ │ (Testing)   │ │ (Fixtures)  │
//!       └─────────────┘ └─────────────┘ └─────────────┘
//! ```
//!
//! # Usage
//!
//! ## Production (Linux)
//!
//! ```ignore
//! use procread::collector::{Collector, RealFs};
//! use procread::{Console, ProcPaths};
//!
//! let collector = Collector::new(RealFs::new(), ProcPaths::default());
//! let status = collector.list_processes(&mut Console::stdio());
//! ```
//!
//! ## Testing (with MockFs)
//!
//! ```
//! use procread::collector::{Collector, MockFs};
//! use procread::{Console, ProcPaths};
//!
//! let collector = Collector::new(MockFs::typical_system(), ProcPaths::default());
//! let mut con = Console::new(Vec::<u8>::new(), Vec::<u8>::new());
//! assert!(collector.list_processes(&mut con).is_success());
//! ```

#[allow(clippy::module_inception)]
mod collector;
pub mod mock;
pub mod procfs;
pub mod traits;

pub use collector::Collector;
pub use mock::MockFs;
pub use procfs::{ProcessReport, ReadStats, ReadStyle};
pub use traits::{FileHandle, FileSystem, RealFs};
