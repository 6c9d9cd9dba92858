//! procread - dumps process directories and kernel pseudo-files.
//!
//! Provides:
//! - `collector` - directory scan, raw and buffered readers, process and
//!   system dumps over a mockable filesystem
//! - `console` - output/diagnostic streams and operation status
//! - `config` - pseudo-file locations
//! - `error` - error type shared by all operations

pub mod collector;
pub mod config;
pub mod console;
pub mod error;

pub use config::ProcPaths;
pub use console::{Console, Status};
pub use error::ProcError;
