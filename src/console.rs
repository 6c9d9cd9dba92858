//! Output and diagnostic streams shared by all dump operations.

use std::fmt;
use std::io::{self, Write};

use crate::error::ProcError;

/// Outcome of a contract-bearing operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    Failure,
}

impl Status {
    /// Small-integer form: `0` for success, `-1` for failure.
    pub fn code(self) -> i32 {
        match self {
            Status::Success => 0,
            Status::Failure => -1,
        }
    }

    pub fn is_success(self) -> bool {
        self == Status::Success
    }

    /// Combines two statuses; failure wins.
    pub fn and(self, other: Status) -> Status {
        if self.is_success() && other.is_success() {
            Status::Success
        } else {
            Status::Failure
        }
    }
}

impl<T> From<&Result<T, ProcError>> for Status {
    fn from(result: &Result<T, ProcError>) -> Self {
        if result.is_ok() {
            Status::Success
        } else {
            Status::Failure
        }
    }
}

/// Content goes to `out`, `ERROR:` / `WARNING:` lines go to `err`.
///
/// The binary wires this to stdout/stderr; tests use `Vec<u8>` for both.
pub struct Console<O: Write, E: Write> {
    out: O,
    err: E,
}

impl Console<io::StdoutLock<'static>, io::Stderr> {
    /// Console over the process's standard streams.
    pub fn stdio() -> Self {
        Self::new(io::stdout().lock(), io::stderr())
    }
}

impl<O: Write, E: Write> Console<O, E> {
    pub fn new(out: O, err: E) -> Self {
        Self { out, err }
    }

    /// The content stream.
    pub fn out(&mut self) -> &mut O {
        &mut self.out
    }

    /// Writes one line of content.
    pub fn line(&mut self, args: fmt::Arguments<'_>) -> Result<(), ProcError> {
        self.out.write_fmt(args)?;
        self.out.write_all(b"\n")?;
        Ok(())
    }

    /// Reports an error on the diagnostic stream.
    pub fn error(&mut self, err: &ProcError) {
        // Nowhere left to report a failing stderr.
        let _ = writeln!(self.err, "ERROR: {err}");
    }

    /// Reports a warning on the diagnostic stream.
    pub fn warning(&mut self, msg: fmt::Arguments<'_>) {
        let _ = writeln!(self.err, "WARNING: {msg}");
    }

    pub fn flush(&mut self) -> Result<(), ProcError> {
        self.out.flush()?;
        Ok(())
    }

    pub fn into_parts(self) -> (O, E) {
        (self.out, self.err)
    }
}
