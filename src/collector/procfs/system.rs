//! Stats source backed by the `/proc` filesystem.

use crate::collector::procfs::parser::{
    ParseError, parse_cpu_stat, parse_hostname, parse_loadavg, parse_meminfo, parse_net_dev,
};
use crate::collector::source::{
    CpuTimesStat, LoadAvgStat, NetIoCountersStat, SourceError, StatsSource, VirtualMemoryStat,
};
use crate::collector::traits::FileSystem;
use std::path::Path;

/// Clock ticks per second (USER_HZ). Standard value for Linux.
const CLK_TCK: f64 = 100.0;

/// Label of the aggregate line in [`StatsSource::cpu_times`].
pub const CPU_TOTAL: &str = "cpu-total";

/// Label of the aggregate entry in [`StatsSource::net_io_counters`].
pub const NET_ALL: &str = "all";

/// Reads system-wide stats from `/proc/`.
pub struct ProcfsSource<F: FileSystem> {
    fs: F,
    proc_path: String,
}

impl<F: FileSystem> ProcfsSource<F> {
    /// Creates a new procfs stats source.
    ///
    /// # Arguments
    /// * `fs` - Filesystem implementation (real or mock)
    /// * `proc_path` - Base path to proc filesystem (usually "/proc")
    pub fn new(fs: F, proc_path: impl Into<String>) -> Self {
        Self {
            fs,
            proc_path: proc_path.into(),
        }
    }

    /// Returns the base path this source reads from.
    pub fn proc_path(&self) -> &str {
        &self.proc_path
    }

    /// Returns `true` if the proc filesystem looks mounted at `proc_path`.
    pub fn is_available(&self) -> bool {
        self.fs
            .exists(Path::new(&format!("{}/stat", self.proc_path)))
    }

    fn read(&self, file: &str) -> Result<String, SourceError> {
        let path = format!("{}/{}", self.proc_path, file);
        Ok(self.fs.read_to_string(Path::new(&path))?)
    }
}

impl<F: FileSystem> StatsSource for ProcfsSource<F> {
    /// Reads `/proc/loadavg`.
    fn load_avg(&self) -> Result<LoadAvgStat, SourceError> {
        let info = parse_loadavg(&self.read("loadavg")?)?;

        Ok(LoadAvgStat {
            load1: info.load1,
            load5: info.load5,
            load15: info.load15,
        })
    }

    /// Reads `/proc/stat`. The aggregate line is reported as `cpu-total`.
    fn cpu_times(&self) -> Result<Vec<CpuTimesStat>, SourceError> {
        let cpus = parse_cpu_stat(&self.read("stat")?)?;
        let secs = |ticks: u64| ticks as f64 / CLK_TCK;

        Ok(cpus
            .into_iter()
            .map(|cpu| CpuTimesStat {
                cpu: match cpu.cpu_id {
                    Some(id) => format!("cpu{}", id),
                    None => CPU_TOTAL.to_string(),
                },
                user: secs(cpu.user),
                system: secs(cpu.system),
                idle: secs(cpu.idle),
                nice: secs(cpu.nice),
                iowait: secs(cpu.iowait),
                irq: secs(cpu.irq),
                softirq: secs(cpu.softirq),
                steal: secs(cpu.steal),
                guest: secs(cpu.guest),
                guest_nice: secs(cpu.guest_nice),
            })
            .collect())
    }

    /// Reads `/proc/meminfo` and derives used/available the way psutil does.
    fn virtual_memory(&self) -> Result<VirtualMemoryStat, SourceError> {
        let info = parse_meminfo(&self.read("meminfo")?)?;
        let kb = |v: u64| {
            v.checked_mul(1024)
                .ok_or_else(|| ParseError::new(format!("meminfo value {} kB overflows bytes", v)))
        };

        let total = kb(info.mem_total)?;
        let free = kb(info.mem_free)?;
        let buffers = kb(info.buffers)?;
        let cached = kb(info.cached)?;
        let reclaimable = free.saturating_add(buffers).saturating_add(cached);
        // Older kernels lack MemAvailable
        let available = match info.mem_available {
            Some(v) => kb(v)?,
            None => reclaimable,
        };
        let used = total.saturating_sub(reclaimable);
        let used_percent = if total == 0 {
            0.0
        } else {
            total.saturating_sub(available) as f64 / total as f64 * 100.0
        };

        Ok(VirtualMemoryStat {
            total,
            available,
            used,
            used_percent,
            free,
            active: kb(info.active)?,
            inactive: kb(info.inactive)?,
            buffers,
            cached,
            shared: kb(info.shmem)?,
        })
    }

    /// Reads `/proc/net/dev`. The sum over all interfaces comes first as `all`.
    fn net_io_counters(&self) -> Result<Vec<NetIoCountersStat>, SourceError> {
        let devices = parse_net_dev(&self.read("net/dev")?)?;

        let mut all = NetIoCountersStat {
            name: NET_ALL.to_string(),
            ..Default::default()
        };
        let mut counters = Vec::with_capacity(devices.len() + 1);
        for dev in devices {
            let stat = NetIoCountersStat {
                name: dev.interface,
                bytes_sent: dev.tx_bytes,
                bytes_recv: dev.rx_bytes,
                packets_sent: dev.tx_packets,
                packets_recv: dev.rx_packets,
                errin: dev.rx_errs,
                errout: dev.tx_errs,
                dropin: dev.rx_drop,
                dropout: dev.tx_drop,
            };
            all.bytes_sent = all.bytes_sent.saturating_add(stat.bytes_sent);
            all.bytes_recv = all.bytes_recv.saturating_add(stat.bytes_recv);
            all.packets_sent = all.packets_sent.saturating_add(stat.packets_sent);
            all.packets_recv = all.packets_recv.saturating_add(stat.packets_recv);
            all.errin = all.errin.saturating_add(stat.errin);
            all.errout = all.errout.saturating_add(stat.errout);
            all.dropin = all.dropin.saturating_add(stat.dropin);
            all.dropout = all.dropout.saturating_add(stat.dropout);
            counters.push(stat);
        }
        counters.insert(0, all);

        Ok(counters)
    }

    /// Reads `/proc/sys/kernel/hostname`.
    fn hostname(&self) -> Result<String, SourceError> {
        Ok(parse_hostname(&self.read("sys/kernel/hostname")?)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::mock::MockFs;

    fn typical() -> ProcfsSource<MockFs> {
        ProcfsSource::new(MockFs::typical_system(), "/proc")
    }

    #[test]
    fn test_load_avg() {
        let load = typical().load_avg().unwrap();
        assert!((load.load1 - 0.15).abs() < 1e-9);
        assert!((load.load5 - 0.10).abs() < 1e-9);
        assert!((load.load15 - 0.05).abs() < 1e-9);
    }

    #[test]
    fn test_cpu_times() {
        let cpus = typical().cpu_times().unwrap();

        let names: Vec<&str> = cpus.iter().map(|c| c.cpu.as_str()).collect();
        assert_eq!(names, ["cpu-total", "cpu0", "cpu1", "cpu2", "cpu3"]);

        // 2500 ticks at USER_HZ=100
        assert!((cpus[1].user - 25.0).abs() < 1e-9);
        assert!((cpus[0].idle - 800.0).abs() < 1e-9);
    }

    #[test]
    fn test_virtual_memory() {
        let vm = typical().virtual_memory().unwrap();

        assert_eq!(vm.total, 16384000 * 1024);
        assert_eq!(vm.available, 12000000 * 1024);
        assert_eq!(vm.free, 8192000 * 1024);
        assert_eq!(vm.used, (16384000 - 8192000 - 512000 - 2048000) * 1024);
        assert_eq!(vm.shared, 65536 * 1024);
        assert!((vm.used_percent - 26.7578125).abs() < 1e-9);
    }

    #[test]
    fn test_virtual_memory_without_mem_available() {
        let mut fs = MockFs::new();
        fs.add_file(
            "/proc/meminfo",
            "MemTotal: 1000 kB\nMemFree: 100 kB\nBuffers: 100 kB\nCached: 300 kB\n",
        );
        let vm = ProcfsSource::new(fs, "/proc").virtual_memory().unwrap();

        assert_eq!(vm.available, 500 * 1024);
        assert!((vm.used_percent - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_virtual_memory_overflowing_kb_is_parse_error() {
        let mut fs = MockFs::typical_system();
        fs.add_file("/proc/meminfo", "MemTotal: 18014398509481984 kB\n");
        let result = ProcfsSource::new(fs, "/proc").virtual_memory();

        assert!(matches!(result, Err(SourceError::Parse(_))));
    }

    #[test]
    fn test_virtual_memory_fallback_available_saturates() {
        let mut fs = MockFs::new();
        let huge = u64::MAX / 1024;
        fs.add_file(
            "/proc/meminfo",
            format!("MemTotal: {huge} kB\nMemFree: {huge} kB\nCached: {huge} kB\n"),
        );
        let vm = ProcfsSource::new(fs, "/proc").virtual_memory().unwrap();

        assert_eq!(vm.available, u64::MAX);
        assert_eq!(vm.used, 0);
    }

    #[test]
    fn test_net_io_counters_aggregate_saturates() {
        let mut fs = MockFs::new();
        fs.add_file(
            "/proc/net/dev",
            format!(
                "     a: {} 1 0 0 0 0 0 0 5 1 0 0 0 0 0 0\n     b: 1 1 0 0 0 0 0 0 5 1 0 0 0 0 0 0\n",
                u64::MAX
            ),
        );
        let nets = ProcfsSource::new(fs, "/proc").net_io_counters().unwrap();

        assert_eq!(nets[0].name, "all");
        assert_eq!(nets[0].bytes_recv, u64::MAX);
        assert_eq!(nets[0].bytes_sent, 10);
        assert_eq!(nets[1].bytes_recv, u64::MAX);
    }

    #[test]
    fn test_net_io_counters_aggregate_first() {
        let nets = typical().net_io_counters().unwrap();

        let names: Vec<&str> = nets.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, ["all", "lo", "eth0"]);

        assert_eq!(nets[2].bytes_recv, 987654321);
        assert_eq!(nets[2].bytes_sent, 123456789);
        assert_eq!(nets[2].errin, 5);
        assert_eq!(nets[2].dropin, 10);
        assert_eq!(nets[2].errout, 2);
        assert_eq!(nets[2].dropout, 5);

        assert_eq!(nets[0].bytes_recv, 12345678 + 987654321);
        assert_eq!(nets[0].packets_sent, 9876 + 456789);
    }

    #[test]
    fn test_hostname() {
        assert_eq!(typical().hostname().unwrap(), "mock-host");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let source = ProcfsSource::new(MockFs::new(), "/proc");
        assert!(!source.is_available());
        assert!(matches!(source.load_avg(), Err(SourceError::Io(_))));
        assert!(matches!(source.hostname(), Err(SourceError::Io(_))));
    }

    #[test]
    fn test_custom_proc_path() {
        let mut fs = MockFs::new();
        fs.add_file("/host/proc/loadavg", "1.00 2.00 3.00 1/1 1\n");
        fs.add_file("/host/proc/stat", "cpu 1 2 3 4\n");
        let source = ProcfsSource::new(fs, "/host/proc");

        assert!(source.is_available());
        assert_eq!(source.proc_path(), "/host/proc");
        assert!((source.load_avg().unwrap().load15 - 3.0).abs() < 1e-9);
    }
}
