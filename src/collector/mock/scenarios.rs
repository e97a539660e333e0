//! Pre-built mock filesystem scenarios for testing.
//!
//! These scenarios provide realistic `/proc` states for the four stat
//! families plus the kernel hostname.

use super::filesystem::MockFs;

const NET_DEV_HEADER: &str = "\
Inter-|   Receive                                                |  Transmit
 face |bytes    packets errs drop fifo frame compressed multicast|bytes    packets errs drop fifo colls carrier compressed
";

impl MockFs {
    /// Creates a typical 4-core host with a loopback and one ethernet
    /// interface.
    pub fn typical_system() -> Self {
        let mut fs = Self::new();

        fs.add_file("/proc/sys/kernel/hostname", "mock-host\n");
        fs.add_file("/proc/loadavg", "0.15 0.10 0.05 1/150 1234\n");
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
Shmem:             65536 kB
Slab:             512000 kB
SReclaimable:     256000 kB
",
        );
        fs.set_cpu_count(4);
        fs.add_file(
            "/proc/net/dev",
            format!(
                "{NET_DEV_HEADER}    lo: 12345678     9876    0    0    0     0          0         0 12345678     9876    0    0    0     0       0          0
  eth0: 987654321   654321    5   10    0     0          0       100 123456789   456789    2    5    0     0       0          0
"
            ),
        );

        fs
    }

    /// Rewrites `/proc/stat` with an aggregate line and `count` per-core
    /// lines, each core reporting the same tick counters.
    pub fn set_cpu_count(&mut self, count: usize) {
        let n = count as u64;
        let mut stat = format!(
            "cpu  {} {} {} {} {} {} {} 0 0 0\n",
            2500 * n,
            125 * n,
            750 * n,
            20000 * n,
            250 * n,
            50 * n,
            25 * n
        );
        for id in 0..count {
            stat.push_str(&format!("cpu{id} 2500 125 750 20000 250 50 25 0 0 0\n"));
        }
        stat.push_str("ctxt 500000\nbtime 1700000000\nprocesses 10000\n");
        stat.push_str("procs_running 2\nprocs_blocked 0\n");
        self.add_file("/proc/stat", stat);
    }

    /// Rewrites `/proc/net/dev` with the given interfaces.
    ///
    /// Every interface reports the same counters: 1000 bytes and 10 packets
    /// in each direction, 1 error and 2 drops received, 3 errors and 4 drops
    /// transmitted.
    pub fn set_interfaces(&mut self, names: &[&str]) {
        let mut content = NET_DEV_HEADER.to_string();
        for name in names {
            content.push_str(&format!(
                "{name:>6}: 1000 10 1 2 0 0 0 0 1000 10 3 4 0 0 0 0\n"
            ));
        }
        self.add_file("/proc/net/dev", content);
    }

    /// Rewrites `/proc/loadavg` with the given averages.
    pub fn set_loadavg(&mut self, load1: f64, load5: f64, load15: f64) {
        self.add_file(
            "/proc/loadavg",
            format!("{load1:.2} {load5:.2} {load15:.2} 1/150 1234\n"),
        );
    }
}
