//! Virtual memory: `/intel/psutil/vm/<counter>`.

use super::{FamilyDescriptor, NamespacePattern, PatternMatch, StatFamily};
use crate::collector::source::{SourceError, StatsSource, VirtualMemoryStat};
use crate::metric::MetricValue;

pub const COUNTERS: &[&str] = &[
    "total",
    "available",
    "used",
    "used_percent",
    "free",
    "active",
    "inactive",
    "buffers",
    "cached",
    "shared",
];

pub(super) const DESCRIPTOR: FamilyDescriptor = FamilyDescriptor {
    family: StatFamily::Memory,
    pattern: NamespacePattern {
        family_segment: "vm",
        has_instance: false,
        leaves: COUNTERS,
    },
    discover: None,
    fetch,
};

fn fetch(
    source: &dyn StatsSource,
    matched: &PatternMatch<'_>,
) -> Result<Option<MetricValue>, SourceError> {
    let vm = source.virtual_memory()?;
    Ok(counter_value(&vm, matched.leaf))
}

/// Value of a memory counter. Byte counts are unsigned, `used_percent` is
/// a float.
pub fn counter_value(vm: &VirtualMemoryStat, counter: &str) -> Option<MetricValue> {
    let bytes = match counter {
        "used_percent" => return Some(MetricValue::Float(vm.used_percent)),
        "total" => vm.total,
        "available" => vm.available,
        "used" => vm.used,
        "free" => vm.free,
        "active" => vm.active,
        "inactive" => vm.inactive,
        "buffers" => vm.buffers,
        "cached" => vm.cached,
        "shared" => vm.shared,
        _ => return None,
    };
    Some(MetricValue::Unsigned(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_value() {
        let vm = VirtualMemoryStat {
            total: 8_000_000_000,
            used_percent: 42.5,
            shared: 7,
            ..Default::default()
        };
        assert_eq!(
            counter_value(&vm, "total"),
            Some(MetricValue::Unsigned(8_000_000_000))
        );
        assert_eq!(
            counter_value(&vm, "used_percent"),
            Some(MetricValue::Float(42.5))
        );
        assert_eq!(counter_value(&vm, "shared"), Some(MetricValue::Unsigned(7)));
        assert_eq!(counter_value(&vm, "swap"), None);
    }

    #[test]
    fn test_every_counter_has_a_value() {
        let vm = VirtualMemoryStat::default();
        for counter in COUNTERS {
            assert!(counter_value(&vm, counter).is_some(), "{counter}");
        }
    }
}
