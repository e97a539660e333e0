//! Builds the catalog of namespaces the host can currently report.

use crate::collector::source::StatsSource;
use crate::error::CollectError;
use crate::family::FAMILIES;
use crate::namespace::Namespace;
use tracing::debug;

/// Enumerates every collectible namespace, family by family (Load, CPU,
/// Memory, Network), keeping discovery order within a family.
///
/// Dynamic instances are probed on every call. A failing probe aborts the
/// whole catalog. Duplicates reported by the source are kept.
pub fn build_catalog(source: &dyn StatsSource) -> Result<Vec<Namespace>, CollectError> {
    let mut catalog = Vec::new();
    for descriptor in &FAMILIES {
        let entries = descriptor.catalog(source)?;
        debug!(family = %descriptor.family, entries = entries.len(), "catalog family built");
        catalog.extend(entries);
    }
    Ok(catalog)
}
