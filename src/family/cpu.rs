//! CPU times: `/intel/psutil/cpu/<core>/<mode>`.
//!
//! Cores are discovered from the stats source on every catalog call; the
//! aggregate pseudo-core comes first.

use super::{FamilyDescriptor, NamespacePattern, PatternMatch, StatFamily};
use crate::collector::source::{CpuTimesStat, SourceError, StatsSource};
use crate::metric::MetricValue;

pub const MODES: &[&str] = &[
    "user",
    "system",
    "idle",
    "nice",
    "iowait",
    "irq",
    "softirq",
    "steal",
    "guest",
    "guest_nice",
];

pub(super) const DESCRIPTOR: FamilyDescriptor = FamilyDescriptor {
    family: StatFamily::Cpu,
    pattern: NamespacePattern {
        family_segment: "cpu",
        has_instance: true,
        leaves: MODES,
    },
    discover: Some(discover),
    fetch,
};

fn discover(source: &dyn StatsSource) -> Result<Vec<String>, SourceError> {
    Ok(source.cpu_times()?.into_iter().map(|c| c.cpu).collect())
}

fn fetch(
    source: &dyn StatsSource,
    matched: &PatternMatch<'_>,
) -> Result<Option<MetricValue>, SourceError> {
    let cpus = source.cpu_times()?;
    Ok(cpus
        .iter()
        .find(|c| Some(c.cpu.as_str()) == matched.instance)
        .and_then(|c| mode_value(c, matched.leaf))
        .map(MetricValue::Float))
}

/// Seconds spent in a mode.
pub fn mode_value(cpu: &CpuTimesStat, mode: &str) -> Option<f64> {
    let v = match mode {
        "user" => cpu.user,
        "system" => cpu.system,
        "idle" => cpu.idle,
        "nice" => cpu.nice,
        "iowait" => cpu.iowait,
        "irq" => cpu.irq,
        "softirq" => cpu.softirq,
        "steal" => cpu.steal,
        "guest" => cpu.guest,
        "guest_nice" => cpu.guest_nice,
        _ => return None,
    };
    Some(v)
}
