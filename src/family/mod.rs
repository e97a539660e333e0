//! Stat families and their descriptors.
//!
//! Each family owns a [`FamilyDescriptor`]: the namespace pattern it
//! answers to, an optional discovery step listing the instances (cores,
//! interfaces) currently present, and a fetch step extracting one value
//! from a fresh snapshot. All descriptors live in the immutable
//! [`FAMILIES`] registry, in routing priority order.
//!
//! ```text
//! /intel/psutil/load/<period>
//! /intel/psutil/cpu/<core>/<mode>
//! /intel/psutil/vm/<counter>
//! /intel/psutil/net/<interface>/<counter>
//! ```

pub mod cpu;
pub mod load;
pub mod memory;
pub mod network;

use crate::collector::procfs::ParseError;
use crate::collector::source::{SourceError, StatsSource};
use crate::error::CollectError;
use crate::metric::MetricValue;
use crate::namespace::{Namespace, NamespaceError};
use serde::Serialize;
use std::fmt;

/// Segments shared by every namespace this crate exposes.
pub const PREFIX: [&str; 2] = ["intel", "psutil"];

/// Group of namespaces sharing a discovery and fetch strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatFamily {
    Load,
    Cpu,
    Memory,
    Network,
}

impl StatFamily {
    pub fn name(self) -> &'static str {
        match self {
            StatFamily::Load => "load",
            StatFamily::Cpu => "cpu",
            StatFamily::Memory => "memory",
            StatFamily::Network => "network",
        }
    }
}

impl fmt::Display for StatFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Shape of a family's namespaces: `PREFIX`, the family segment, an
/// optional instance segment, then one of a fixed set of leaf labels.
#[derive(Debug)]
pub struct NamespacePattern {
    pub family_segment: &'static str,
    pub has_instance: bool,
    pub leaves: &'static [&'static str],
}

/// Parts of a namespace picked out by a successful pattern match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternMatch<'a> {
    pub instance: Option<&'a str>,
    pub leaf: &'a str,
}

impl NamespacePattern {
    /// Number of segments a matching namespace has.
    pub fn arity(&self) -> usize {
        PREFIX.len() + 2 + usize::from(self.has_instance)
    }

    /// Matches prefix, arity and leaf label.
    pub fn matches<'a>(&self, ns: &'a Namespace) -> Option<PatternMatch<'a>> {
        let segments = ns.segments();
        if segments.len() != self.arity() {
            return None;
        }

        let (head, rest) = segments.split_at(PREFIX.len());
        if head.iter().zip(PREFIX).any(|(s, p)| s != p) || rest[0] != self.family_segment {
            return None;
        }

        let leaf = rest[rest.len() - 1].as_str();
        if !self.leaves.contains(&leaf) {
            return None;
        }

        Some(PatternMatch {
            instance: self.has_instance.then(|| rest[1].as_str()),
            leaf,
        })
    }

    /// Builds every namespace for one instance (or for the family itself when
    /// it has no instance segment), in leaf order.
    fn expand(&self, instance: Option<&str>) -> Result<Vec<Namespace>, NamespaceError> {
        self.leaves
            .iter()
            .map(|leaf| {
                let mut segments: Vec<&str> = PREFIX.to_vec();
                segments.push(self.family_segment);
                segments.extend(instance);
                segments.push(*leaf);
                Namespace::new(segments)
            })
            .collect()
    }
}

/// Lists the instance identifiers currently present on the host.
type DiscoverFn = fn(&dyn StatsSource) -> Result<Vec<String>, SourceError>;

/// Fetches a fresh snapshot and extracts the matched value. `Ok(None)` means
/// the snapshot has no entry for the matched instance.
type FetchFn = fn(&dyn StatsSource, &PatternMatch<'_>) -> Result<Option<MetricValue>, SourceError>;

/// Pattern, discovery and fetch for one stat family.
pub struct FamilyDescriptor {
    pub family: StatFamily,
    pub pattern: NamespacePattern,
    discover: Option<DiscoverFn>,
    fetch: FetchFn,
}

impl fmt::Debug for FamilyDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FamilyDescriptor")
            .field("family", &self.family)
            .field("pattern", &self.pattern)
            .finish_non_exhaustive()
    }
}

/// Family descriptors in routing priority order.
pub static FAMILIES: [FamilyDescriptor; 4] = [
    load::DESCRIPTOR,
    cpu::DESCRIPTOR,
    memory::DESCRIPTOR,
    network::DESCRIPTOR,
];

impl FamilyDescriptor {
    /// Current instance identifiers, or `None` for a static family.
    pub fn discover_instances(
        &self,
        source: &dyn StatsSource,
    ) -> Result<Option<Vec<String>>, CollectError> {
        let Some(discover) = self.discover else {
            return Ok(None);
        };
        discover(source)
            .map(Some)
            .map_err(|source| CollectError::Discovery {
                family: self.family,
                source,
            })
    }

    /// Every namespace of this family currently collectible, in discovery
    /// order. Duplicated instances are kept.
    pub fn catalog(&self, source: &dyn StatsSource) -> Result<Vec<Namespace>, CollectError> {
        let discovery_error = |e: NamespaceError| CollectError::Discovery {
            family: self.family,
            source: SourceError::Parse(ParseError::new(format!("invalid instance: {}", e))),
        };

        match self.discover_instances(source)? {
            None => self.pattern.expand(None).map_err(discovery_error),
            Some(instances) => {
                let mut entries = Vec::with_capacity(instances.len() * self.pattern.leaves.len());
                for instance in &instances {
                    entries.extend(
                        self.pattern
                            .expand(Some(instance.as_str()))
                            .map_err(discovery_error)?,
                    );
                }
                Ok(entries)
            }
        }
    }

    /// Fetches the value addressed by `matched`, a match of `ns` against this
    /// family's pattern.
    pub fn fetch(
        &self,
        source: &dyn StatsSource,
        ns: &Namespace,
        matched: &PatternMatch<'_>,
    ) -> Result<MetricValue, CollectError> {
        match (self.fetch)(source, matched) {
            Ok(Some(value)) => Ok(value),
            Ok(None) => Err(CollectError::Lookup {
                namespace: ns.clone(),
                reason: format!(
                    "no {} instance '{}' in current snapshot",
                    self.family,
                    matched.instance.unwrap_or_default()
                ),
            }),
            Err(source) => Err(CollectError::Fetch {
                family: self.family,
                source,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::mock::MockFs;
    use crate::collector::procfs::ProcfsSource;

    fn ns(s: &str) -> Namespace {
        s.parse().unwrap()
    }

    fn descriptor(family: StatFamily) -> &'static FamilyDescriptor {
        FAMILIES.iter().find(|d| d.family == family).unwrap()
    }

    #[test]
    fn test_registry_order() {
        let families: Vec<StatFamily> = FAMILIES.iter().map(|d| d.family).collect();
        assert_eq!(
            families,
            [
                StatFamily::Load,
                StatFamily::Cpu,
                StatFamily::Memory,
                StatFamily::Network
            ]
        );
    }

    #[test]
    fn test_pattern_arity() {
        assert_eq!(descriptor(StatFamily::Load).pattern.arity(), 4);
        assert_eq!(descriptor(StatFamily::Cpu).pattern.arity(), 5);
        assert_eq!(descriptor(StatFamily::Memory).pattern.arity(), 4);
        assert_eq!(descriptor(StatFamily::Network).pattern.arity(), 5);
    }

    #[test]
    fn test_pattern_matches_instance_and_leaf() {
        let pattern = &descriptor(StatFamily::Network).pattern;
        let n = ns("/intel/psutil/net/eth0/bytes_recv");

        assert_eq!(
            pattern.matches(&n),
            Some(PatternMatch {
                instance: Some("eth0"),
                leaf: "bytes_recv"
            })
        );
    }

    #[test]
    fn test_pattern_rejects_wrong_shape() {
        let pattern = &descriptor(StatFamily::Cpu).pattern;
        // Unknown mode
        assert!(pattern.matches(&ns("/intel/psutil/cpu/cpu0/bogus")).is_none());
        // Missing core segment
        assert!(pattern.matches(&ns("/intel/psutil/cpu/user")).is_none());
        // Extra trailing segment
        assert!(pattern.matches(&ns("/intel/psutil/cpu/cpu0/user/x")).is_none());
        // Wrong vendor prefix
        assert!(pattern.matches(&ns("/acme/psutil/cpu/cpu0/user")).is_none());
    }

    #[test]
    fn test_static_family_has_no_instances() {
        let source = ProcfsSource::new(MockFs::typical_system(), "/proc");
        let load = descriptor(StatFamily::Load);
        assert_eq!(load.discover_instances(&source).unwrap(), None);
    }

    #[test]
    fn test_fetch_missing_instance_is_lookup_error() {
        let source = ProcfsSource::new(MockFs::typical_system(), "/proc");
        let cpu = descriptor(StatFamily::Cpu);
        let n = ns("/intel/psutil/cpu/cpu42/user");
        let matched = cpu.pattern.matches(&n).unwrap();

        let err = cpu.fetch(&source, &n, &matched).unwrap_err();
        match err {
            CollectError::Lookup { namespace, reason } => {
                assert_eq!(namespace, n);
                assert!(reason.contains("cpu42"));
            }
            other => panic!("expected lookup error, got {other:?}"),
        }
    }

    #[test]
    fn test_fetch_probe_failure_is_fetch_error() {
        let mut fs = MockFs::typical_system();
        fs.remove_file("/proc/meminfo");
        let source = ProcfsSource::new(fs, "/proc");
        let memory = descriptor(StatFamily::Memory);
        let n = ns("/intel/psutil/vm/total");
        let matched = memory.pattern.matches(&n).unwrap();

        assert!(matches!(
            memory.fetch(&source, &n, &matched),
            Err(CollectError::Fetch {
                family: StatFamily::Memory,
                ..
            })
        ));
    }

    #[test]
    fn test_catalog_rejects_empty_instance() {
        let mut fs = MockFs::new();
        fs.add_file("/proc/net/dev", "    : 1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16\n");
        let source = ProcfsSource::new(fs, "/proc");

        assert!(matches!(
            descriptor(StatFamily::Network).catalog(&source),
            Err(CollectError::Discovery {
                family: StatFamily::Network,
                ..
            })
        ));
    }
}
