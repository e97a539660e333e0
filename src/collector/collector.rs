//! Collection façade over the catalog builder, router and family fetches.
//!
//! The `Collector` struct is the entry point a collection scheduler calls:
//! `get_catalog` to advertise namespaces, `collect` to produce records.

use chrono::Utc;
use tracing::{debug, trace};

use crate::catalog::build_catalog;
use crate::collector::source::StatsSource;
use crate::error::CollectError;
use crate::metric::MetricRecord;
use crate::namespace::Namespace;
use crate::router::{Classification, classify};

/// Collects metric records from a stats source.
pub struct Collector<S: StatsSource> {
    source: S,
}

impl<S: StatsSource> Collector<S> {
    /// Creates a new collector.
    ///
    /// # Arguments
    /// * `source` - Stats source implementation (procfs or any other)
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Returns the underlying stats source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Returns every namespace the host can currently report.
    ///
    /// Recomputed on each call since cores and interfaces can change.
    pub fn get_catalog(&self) -> Result<Vec<Namespace>, CollectError> {
        build_catalog(&self.source)
    }

    /// Collects one record per requested namespace, in request order.
    ///
    /// Namespaces that match no stat family yield a default record (empty
    /// namespace, no value) in their slot. Any fetch or lookup failure
    /// aborts the whole batch. Hostname and timestamp are resolved once and
    /// shared by every record in the batch; an unresolvable hostname leaves
    /// the source empty.
    pub fn collect(&self, requested: &[Namespace]) -> Result<Vec<MetricRecord>, CollectError> {
        let timestamp = Utc::now();
        let hostname = match self.source.hostname() {
            Ok(name) => name,
            Err(e) => {
                debug!(error = %e, "hostname resolution failed, leaving source empty");
                String::new()
            }
        };

        let mut records = Vec::with_capacity(requested.len());
        let mut unmatched = 0usize;

        for ns in requested {
            let record = match classify(ns) {
                Classification::Matched {
                    descriptor,
                    matched,
                } => {
                    trace!(namespace = %ns, family = %descriptor.family, "routing namespace");
                    let value = descriptor.fetch(&self.source, ns, &matched)?;
                    MetricRecord::new(ns.clone(), value)
                }
                Classification::Unmatched => {
                    debug!(namespace = %ns, "namespace matches no stat family");
                    unmatched += 1;
                    MetricRecord::default()
                }
            };
            records.push(record.stamped(&hostname, timestamp));
        }

        debug!(
            requested = requested.len(),
            unmatched,
            source = %hostname,
            "metrics collected"
        );

        Ok(records)
    }
}
