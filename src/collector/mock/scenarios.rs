//! Pre-built mock filesystem scenarios for testing.
//!
//! These scenarios provide realistic `/proc` filesystem states.

use super::filesystem::MockFs;

impl MockFs {
    /// Creates a typical system with a few processes.
    ///
    /// Includes: init (PID 1), a bash shell (PID 1000) and a kernel thread
    /// (PID 2, empty cmdline), plus `cpuinfo`, `meminfo` and `version`.
    /// `/proc/self` and `/proc/sys` are present as non-numeric entries.
    pub fn typical_system() -> Self {
        let mut fs = Self::new();

        fs.add_file(
            "/proc/version",
            "Linux version 6.1.0-18-amd64 (debian-kernel@lists.debian.org) \
             (gcc-12 (Debian 12.2.0-14) 12.2.0, GNU ld (GNU Binutils for Debian) 2.40) \
             #1 SMP PREEMPT_DYNAMIC Debian 6.1.76-1 (2024-02-01)\n",
        );
        fs.add_file(
            "/proc/cpuinfo",
            "\
processor\t: 0
vendor_id\t: GenuineIntel
cpu family\t: 6
model\t\t: 142
model name\t: Intel(R) Core(TM) i7-8550U CPU @ 1.80GHz
stepping\t: 10
microcode\t: 0xf4
cpu MHz\t\t: 1992.000
cache size\t: 8192 KB
physical id\t: 0
siblings\t: 8
core id\t\t: 0
cpu cores\t: 4
",
        );
        fs.add_file(
            "/proc/meminfo",
            "\
MemTotal:       16384000 kB
MemFree:         8192000 kB
MemAvailable:   12000000 kB
Buffers:          512000 kB
Cached:          2048000 kB
SwapCached:            0 kB
Active:          4096000 kB
Inactive:        2048000 kB
SwapTotal:       4096000 kB
SwapFree:        4096000 kB
Dirty:              1024 kB
Writeback:             0 kB
",
        );

        fs.add_process(
            1,
            "Name:\tsystemd\nUmask:\t0000\nState:\tS (sleeping)\nTgid:\t1\nPid:\t1\nPPid:\t0\n\
             Uid:\t0\t0\t0\t0\nGid:\t0\t0\t0\t0\n",
            b"/sbin/init\0splash\0",
        );
        fs.add_process(
            2,
            "Name:\tkthreadd\nState:\tS (sleeping)\nTgid:\t2\nPid:\t2\nPPid:\t0\n",
            b"",
        );
        fs.add_file("/proc/2/cmdline", "");
        fs.add_process(
            1000,
            "Name:\tbash\nState:\tS (sleeping)\nTgid:\t1000\nPid:\t1000\nPPid:\t999\n\
             Uid:\t1000\t1000\t1000\t1000\nGid:\t1000\t1000\t1000\t1000\n",
            b"-bash\0",
        );

        fs.add_dir("/proc/self");
        fs.add_dir("/proc/sys/kernel");

        fs
    }

    /// A `/proc` root holding exactly the entries `1`, `2`, `abc`, `42x`, `7`.
    pub fn numbered_entries() -> Self {
        let mut fs = Self::new();
        for name in ["1", "2", "abc", "42x", "7"] {
            fs.add_dir(format!("/proc/{}", name));
        }
        fs
    }

    /// A system whose `cpuinfo` is missing and whose `meminfo` has only
    /// three lines.
    pub fn sparse_system_files() -> Self {
        let mut fs = Self::new();
        fs.add_file(
            "/proc/meminfo",
            "MemTotal:        1024000 kB\nMemFree:          512000 kB\nMemAvailable:     768000 kB\n",
        );
        fs
    }
}
