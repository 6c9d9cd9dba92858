//! procread - dumps process directories and kernel pseudo-files.
//!
//! Usage:
//!   procread list                 # numeric entries under /proc
//!   procread pid 1                # /proc/1/status and /proc/1/cmdline
//!   procread pid self             # same, for procread itself
//!   procread sysinfo -n 5         # first 5 lines of cpuinfo and meminfo
//!   procread compare              # raw vs buffered read of /proc/version
//!   procread cat /proc/uptime     # raw read of any file (--buffered for lines)
//!   procread all                  # everything above in sequence

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;
#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::{Level, debug};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::Directive;

use procread::collector::{Collector, RealFs, ReadStyle};
use procread::config::{DEFAULT_MAX_LINES, DEFAULT_PROC_PATH};
use procread::{Console, ProcPaths, Status};

/// Process and system pseudo-file dumper.
#[derive(Parser)]
#[command(name = "procread", about = "Dump /proc process and system files", version)]
struct Args {
    /// Path to /proc filesystem (for testing/mocking).
    #[arg(long, default_value = DEFAULT_PROC_PATH, global = true)]
    proc_path: String,

    /// Increase logging verbosity (-v for info, -vv for debug, -vvv for trace).
    /// Default is warn level.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode - only log errors.
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List process directories.
    List,
    /// Show status and command line of a process.
    Pid {
        /// Process ID, or "self" for this process.
        pid: String,
    },
    /// Show the first lines of cpuinfo and meminfo.
    Sysinfo {
        /// Lines to show per file.
        #[arg(short = 'n', long, default_value_t = DEFAULT_MAX_LINES)]
        lines: usize,
    },
    /// Read one file with both methods.
    Compare {
        /// File to read (default: <proc-path>/version).
        #[arg(long, value_name = "PATH")]
        file: Option<PathBuf>,
    },
    /// Copy a file to stdout.
    Cat {
        path: PathBuf,

        /// Read line by line through a buffered stream.
        #[arg(long)]
        buffered: bool,
    },
    /// Run list, pid self, sysinfo and compare in sequence.
    All {
        /// Lines to show per system file.
        #[arg(short = 'n', long, default_value_t = DEFAULT_MAX_LINES)]
        lines: usize,
    },
}

/// Initializes the tracing subscriber with the appropriate log level.
/// Logs go to stderr so stdout carries only dumped content.
fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = format!("procread={}", level).parse::<Directive>() {
        filter = filter.add_directive(directive);
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Resolves "self" to this process's PID; anything else is used verbatim.
fn resolve_pid(pid: String) -> String {
    if pid == "self" {
        std::process::id().to_string()
    } else {
        pid
    }
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose, args.quiet);

    debug!(proc_path = %args.proc_path, "starting");

    let collector = Collector::new(RealFs::new(), ProcPaths::new(&args.proc_path));
    let mut con = Console::stdio();

    let status = match args.command {
        Command::List => collector.list_processes(&mut con),
        Command::Pid { pid } => collector
            .read_process_info(&resolve_pid(pid), &mut con)
            .outcome(),
        Command::Sysinfo { lines } => collector.system_info(lines, &mut con),
        Command::Compare { file } => {
            collector.compare_methods(file.as_deref(), &mut con);
            Status::Success
        }
        Command::Cat { path, buffered } => {
            let style = if buffered {
                ReadStyle::Buffered
            } else {
                ReadStyle::Raw
            };
            collector.dump(&path, style, &mut con)
        }
        Command::All { lines } => {
            collector.run_all(&std::process::id().to_string(), lines, &mut con)
        }
    };

    let status = match con.flush() {
        Ok(()) => status,
        Err(e) => {
            con.error(&e);
            Status::Failure
        }
    };

    debug!(code = status.code(), "finished");
    if !status.is_success() {
        std::process::exit(1);
    }
}
