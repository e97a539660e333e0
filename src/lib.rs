//! psutil-collector - metric collection core for OS stat families.
//!
//! Discovers the catalog of namespaces a host can report (load averages,
//! per-core CPU times, virtual memory, per-interface network counters) and
//! collects uniform metric records for any requested subset.
//!
//! Modules:
//! - `collector` - collection façade, stats source trait, `/proc` backend
//! - `family` - per-family namespace patterns, discovery and fetch
//! - `router` - namespace classification
//! - `catalog` - catalog building
//! - `namespace`, `metric` - data model
//! - `error` - collection errors

pub mod catalog;
pub mod collector;
pub mod error;
pub mod family;
pub mod metric;
pub mod namespace;
pub mod router;

pub use collector::Collector;
pub use error::CollectError;
pub use family::StatFamily;
pub use metric::{MetricRecord, MetricValue};
pub use namespace::Namespace;
