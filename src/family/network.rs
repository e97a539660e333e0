//! Network I/O counters: `/intel/psutil/net/<interface>/<counter>`.
//!
//! Interfaces are discovered from the stats source on every catalog call;
//! the aggregate `all` pseudo-interface comes first.

use super::{FamilyDescriptor, NamespacePattern, PatternMatch, StatFamily};
use crate::collector::source::{NetIoCountersStat, SourceError, StatsSource};
use crate::metric::MetricValue;

pub const COUNTERS: &[&str] = &[
    "bytes_sent",
    "bytes_recv",
    "packets_sent",
    "packets_recv",
    "errin",
    "errout",
    "dropin",
    "dropout",
];

pub(super) const DESCRIPTOR: FamilyDescriptor = FamilyDescriptor {
    family: StatFamily::Network,
    pattern: NamespacePattern {
        family_segment: "net",
        has_instance: true,
        leaves: COUNTERS,
    },
    discover: Some(discover),
    fetch,
};

fn discover(source: &dyn StatsSource) -> Result<Vec<String>, SourceError> {
    Ok(source
        .net_io_counters()?
        .into_iter()
        .map(|n| n.name)
        .collect())
}

fn fetch(
    source: &dyn StatsSource,
    matched: &PatternMatch<'_>,
) -> Result<Option<MetricValue>, SourceError> {
    let nets = source.net_io_counters()?;
    Ok(nets
        .iter()
        .find(|n| Some(n.name.as_str()) == matched.instance)
        .and_then(|n| counter_value(n, matched.leaf))
        .map(MetricValue::Unsigned))
}

pub fn counter_value(net: &NetIoCountersStat, counter: &str) -> Option<u64> {
    let v = match counter {
        "bytes_sent" => net.bytes_sent,
        "bytes_recv" => net.bytes_recv,
        "packets_sent" => net.packets_sent,
        "packets_recv" => net.packets_recv,
        "errin" => net.errin,
        "errout" => net.errout,
        "dropin" => net.dropin,
        "dropout" => net.dropout,
        _ => return None,
    };
    Some(v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::mock::MockFs;
    use crate::collector::procfs::ProcfsSource;

    #[test]
    fn test_discover_interfaces() {
        let mut fs = MockFs::new();
        fs.set_interfaces(&["lo", "eth0", "wlan0"]);
        let source = ProcfsSource::new(fs, "/proc");

        assert_eq!(discover(&source).unwrap(), ["all", "lo", "eth0", "wlan0"]);
    }

    #[test]
    fn test_discover_without_net_dev_fails() {
        let source = ProcfsSource::new(MockFs::new(), "/proc");
        assert!(discover(&source).is_err());
    }

    #[test]
    fn test_fetch_counter() {
        let mut fs = MockFs::new();
        fs.set_interfaces(&["lo", "eth0"]);
        let source = ProcfsSource::new(fs, "/proc");

        let eth0 = PatternMatch {
            instance: Some("eth0"),
            leaf: "dropout",
        };
        assert_eq!(
            fetch(&source, &eth0).unwrap(),
            Some(MetricValue::Unsigned(4))
        );

        let all = PatternMatch {
            instance: Some("all"),
            leaf: "bytes_recv",
        };
        assert_eq!(
            fetch(&source, &all).unwrap(),
            Some(MetricValue::Unsigned(2000))
        );
    }

    #[test]
    fn test_every_counter_has_a_value() {
        let net = NetIoCountersStat::default();
        for counter in COUNTERS {
            assert!(counter_value(&net, counter).is_some(), "{counter}");
        }
    }
}
