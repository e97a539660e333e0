//! Parsers for `/proc` filesystem files.
//!
//! These are pure functions that parse the content of various `/proc` files
//! into structured data. They are designed to be easily testable with string inputs.

/// Error type for parsing failures.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub message: String,
}

impl ParseError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Parse error: {}", self.message)
    }
}

impl std::error::Error for ParseError {}

/// Parsed data from `/proc/meminfo`. All values are in kB.
#[derive(Debug, Clone, Default)]
pub struct MemInfo {
    pub mem_total: u64,
    pub mem_free: u64,
    /// `None` on kernels older than 3.14, which lack `MemAvailable`.
    pub mem_available: Option<u64>,
    pub buffers: u64,
    pub cached: u64,
    pub active: u64,
    pub inactive: u64,
    pub shmem: u64,
}

/// Parses `/proc/meminfo` content.
///
/// Only the fields this crate reports are read; an unparsable value for any
/// of them is an error.
pub fn parse_meminfo(content: &str) -> Result<MemInfo, ParseError> {
    let mut info = MemInfo::default();
    let mut seen_total = false;

    for line in content.lines() {
        let Some((key, rest)) = line.split_once(':') else {
            continue;
        };
        let field = match key {
            "MemTotal" => {
                seen_total = true;
                &mut info.mem_total
            }
            "MemFree" => &mut info.mem_free,
            "MemAvailable" => info.mem_available.insert(0),
            "Buffers" => &mut info.buffers,
            "Cached" => &mut info.cached,
            "Active" => &mut info.active,
            "Inactive" => &mut info.inactive,
            "Shmem" => &mut info.shmem,
            _ => continue,
        };
        *field = rest
            .split_whitespace()
            .next()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| ParseError::new(format!("invalid {} value in meminfo", key)))?;
    }

    if !seen_total {
        return Err(ParseError::new("missing MemTotal in meminfo"));
    }

    Ok(info)
}

/// Single CPU line from `/proc/stat`. Values are in clock ticks.
#[derive(Debug, Clone, Default)]
pub struct CpuStat {
    pub cpu_id: Option<u32>, // None for aggregate "cpu" line
    pub user: u64,
    pub nice: u64,
    pub system: u64,
    pub idle: u64,
    pub iowait: u64,
    pub irq: u64,
    pub softirq: u64,
    pub steal: u64,
    pub guest: u64,
    pub guest_nice: u64,
}

/// Parses the `cpu*` lines of `/proc/stat`, keeping file order.
///
/// Lines whose suffix after `cpu` is not a number are rejected rather than
/// silently merged into the aggregate.
pub fn parse_cpu_stat(content: &str) -> Result<Vec<CpuStat>, ParseError> {
    let mut cpus = Vec::new();

    for line in content.lines() {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some(label) = parts.first() else {
            continue;
        };
        let Some(suffix) = label.strip_prefix("cpu") else {
            continue;
        };

        let cpu_id = if suffix.is_empty() {
            None
        } else {
            Some(
                suffix
                    .parse()
                    .map_err(|_| ParseError::new(format!("invalid cpu label '{}'", label)))?,
            )
        };

        if parts.len() < 5 {
            return Err(ParseError::new(format!(
                "not enough fields for {}: expected 4+, got {}",
                label,
                parts.len() - 1
            )));
        }

        // Columns past idle appeared in later kernels and default to zero
        let get_val = |idx: usize| -> Result<u64, ParseError> {
            match parts.get(idx) {
                Some(s) => s.parse().map_err(|_| {
                    ParseError::new(format!("invalid counter '{}' for {}", s, label))
                }),
                None => Ok(0),
            }
        };

        cpus.push(CpuStat {
            cpu_id,
            user: get_val(1)?,
            nice: get_val(2)?,
            system: get_val(3)?,
            idle: get_val(4)?,
            iowait: get_val(5)?,
            irq: get_val(6)?,
            softirq: get_val(7)?,
            steal: get_val(8)?,
            guest: get_val(9)?,
            guest_nice: get_val(10)?,
        });
    }

    if cpus.is_empty() {
        return Err(ParseError::new("no cpu lines in stat"));
    }

    Ok(cpus)
}

/// Load averages from `/proc/loadavg`.
#[derive(Debug, Clone, Default)]
pub struct LoadAvg {
    pub load1: f64,
    pub load5: f64,
    pub load15: f64,
}

/// Parses the three averages leading `/proc/loadavg`. The run queue and
/// last pid columns that follow are ignored.
pub fn parse_loadavg(content: &str) -> Result<LoadAvg, ParseError> {
    let mut fields = content.split_whitespace();
    let mut next = |name: &str| -> Result<f64, ParseError> {
        fields
            .next()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| ParseError::new(format!("invalid {} in loadavg", name)))
    };

    Ok(LoadAvg {
        load1: next("load1")?,
        load5: next("load5")?,
        load15: next("load15")?,
    })
}

// ============ Network Device Stats Parser ============

/// Parsed data from `/proc/net/dev`.
#[derive(Debug, Clone, Default)]
pub struct NetDevStats {
    /// Interface name (eth0, lo, etc.)
    pub interface: String,
    /// Bytes received
    pub rx_bytes: u64,
    /// Packets received
    pub rx_packets: u64,
    /// Receive errors
    pub rx_errs: u64,
    /// Receive drops
    pub rx_drop: u64,
    /// Bytes transmitted
    pub tx_bytes: u64,
    /// Packets transmitted
    pub tx_packets: u64,
    /// Transmit errors
    pub tx_errs: u64,
    /// Transmit drops
    pub tx_drop: u64,
}

/// Parses `/proc/net/dev` content.
///
/// Format:
/// Inter-|   Receive                                                |  Transmit
///  face |bytes    packets errs drop fifo frame compressed multicast|bytes    packets errs drop fifo colls carrier compressed
///    lo: 1234567     1234    0    0    0     0          0         0  1234567     1234    0    0    0     0       0          0
pub fn parse_net_dev(content: &str) -> Result<Vec<NetDevStats>, ParseError> {
    let mut devices = Vec::new();

    for line in content.lines() {
        // Skip header lines
        if line.contains('|') || line.trim().is_empty() {
            continue;
        }

        let Some((name, counters)) = line.split_once(':') else {
            return Err(ParseError::new(format!("malformed net/dev line: {}", line)));
        };

        let interface = name.trim();
        let values: Vec<&str> = counters.split_whitespace().collect();
        if values.len() < 16 {
            return Err(ParseError::new(format!(
                "not enough fields for {}: expected 16, got {}",
                interface,
                values.len()
            )));
        }

        let get_val = |idx: usize| -> Result<u64, ParseError> {
            values[idx].parse().map_err(|_| {
                ParseError::new(format!("invalid counter '{}' for {}", values[idx], interface))
            })
        };

        devices.push(NetDevStats {
            rx_bytes: get_val(0)?,
            rx_packets: get_val(1)?,
            rx_errs: get_val(2)?,
            rx_drop: get_val(3)?,
            tx_bytes: get_val(8)?,
            tx_packets: get_val(9)?,
            tx_errs: get_val(10)?,
            tx_drop: get_val(11)?,
            interface: interface.to_string(),
        });
    }

    Ok(devices)
}

/// Parses `/proc/sys/kernel/hostname`.
pub fn parse_hostname(content: &str) -> Result<String, ParseError> {
    let name = content.trim();
    if name.is_empty() {
        return Err(ParseError::new("empty hostname"));
    }
    Ok(name.to_string())
}
