//! Classifies requested namespaces into stat families.

use crate::family::{FAMILIES, FamilyDescriptor, PatternMatch, StatFamily};
use crate::namespace::Namespace;

/// Outcome of routing one namespace.
#[derive(Debug, Clone, Copy)]
pub enum Classification<'a> {
    Matched {
        descriptor: &'static FamilyDescriptor,
        matched: PatternMatch<'a>,
    },
    Unmatched,
}

impl Classification<'_> {
    pub fn family(&self) -> Option<StatFamily> {
        match self {
            Classification::Matched { descriptor, .. } => Some(descriptor.family),
            Classification::Unmatched => None,
        }
    }
}

/// Matches `ns` against each family pattern in priority order (Load, CPU,
/// Memory, Network); the first match wins.
pub fn classify(ns: &Namespace) -> Classification<'_> {
    FAMILIES
        .iter()
        .find_map(|descriptor| {
            descriptor
                .pattern
                .matches(ns)
                .map(|matched| Classification::Matched {
                    descriptor,
                    matched,
                })
        })
        .unwrap_or(Classification::Unmatched)
}
