//! The stats source boundary.
//!
//! A [`StatsSource`] supplies point-in-time OS measurements grouped by
//! family. The collection core only talks to this trait; the crate ships a
//! `/proc` backed implementation in [`crate::collector::procfs`].

use crate::collector::procfs::parser::ParseError;

/// Load averages over 1, 5 and 15 minutes.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LoadAvgStat {
    pub load1: f64,
    pub load5: f64,
    pub load15: f64,
}

/// CPU time per mode for one logical CPU, in seconds.
///
/// `cpu` is `cpu-total` for the aggregate line and `cpuN` for core N.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CpuTimesStat {
    pub cpu: String,
    pub user: f64,
    pub system: f64,
    pub idle: f64,
    pub nice: f64,
    pub iowait: f64,
    pub irq: f64,
    pub softirq: f64,
    pub steal: f64,
    pub guest: f64,
    pub guest_nice: f64,
}

/// Virtual memory counters, in bytes except `used_percent`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VirtualMemoryStat {
    pub total: u64,
    pub available: u64,
    pub used: u64,
    pub used_percent: f64,
    pub free: u64,
    pub active: u64,
    pub inactive: u64,
    pub buffers: u64,
    pub cached: u64,
    pub shared: u64,
}

/// I/O counters for one network interface.
///
/// `name` is `all` for the sum over every interface.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NetIoCountersStat {
    pub name: String,
    pub bytes_sent: u64,
    pub bytes_recv: u64,
    pub packets_sent: u64,
    pub packets_recv: u64,
    pub errin: u64,
    pub errout: u64,
    pub dropin: u64,
    pub dropout: u64,
}

/// Error returned by a stats source probe.
#[derive(Debug)]
pub enum SourceError {
    /// I/O error reading the underlying data.
    Io(std::io::Error),
    /// The underlying data could not be parsed.
    Parse(ParseError),
}

impl std::fmt::Display for SourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceError::Io(e) => write!(f, "I/O error: {}", e),
            SourceError::Parse(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for SourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SourceError::Io(e) => Some(e),
            SourceError::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for SourceError {
    fn from(e: std::io::Error) -> Self {
        SourceError::Io(e)
    }
}

impl From<ParseError> for SourceError {
    fn from(e: ParseError) -> Self {
        SourceError::Parse(e)
    }
}

/// Supplier of point-in-time OS measurements.
///
/// Every probe is independent and returns a fresh snapshot. Implementations
/// must be safe for concurrent read access.
pub trait StatsSource: Send + Sync {
    /// Current load averages.
    fn load_avg(&self) -> Result<LoadAvgStat, SourceError>;

    /// CPU times for the aggregate pseudo-core followed by every logical CPU.
    fn cpu_times(&self) -> Result<Vec<CpuTimesStat>, SourceError>;

    /// Current virtual memory counters.
    fn virtual_memory(&self) -> Result<VirtualMemoryStat, SourceError>;

    /// I/O counters for the aggregate pseudo-interface followed by every
    /// network interface.
    fn net_io_counters(&self) -> Result<Vec<NetIoCountersStat>, SourceError>;

    /// Local host identifier.
    fn hostname(&self) -> Result<String, SourceError>;
}
