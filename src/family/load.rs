//! Load averages: `/intel/psutil/load/{load1,load5,load15}`.

use super::{FamilyDescriptor, NamespacePattern, PatternMatch, StatFamily};
use crate::collector::source::{LoadAvgStat, SourceError, StatsSource};
use crate::metric::MetricValue;

/// Period labels, shortest first.
pub const PERIODS: &[&str] = &["load1", "load5", "load15"];

pub(super) const DESCRIPTOR: FamilyDescriptor = FamilyDescriptor {
    family: StatFamily::Load,
    pattern: NamespacePattern {
        family_segment: "load",
        has_instance: false,
        leaves: PERIODS,
    },
    discover: None,
    fetch,
};

fn fetch(
    source: &dyn StatsSource,
    matched: &PatternMatch<'_>,
) -> Result<Option<MetricValue>, SourceError> {
    let load = source.load_avg()?;
    Ok(period_value(&load, matched.leaf).map(MetricValue::Float))
}

/// Load average for a period label.
pub fn period_value(load: &LoadAvgStat, period: &str) -> Option<f64> {
    match period {
        "load1" => Some(load.load1),
        "load5" => Some(load.load5),
        "load15" => Some(load.load15),
        _ => None,
    }
}
