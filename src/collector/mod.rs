//! Metric collection over OS stat families.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         Collector                           │
//! │   get_catalog ──► catalog::build_catalog                    │
//! │   collect     ──► router::classify ──► FamilyDescriptor     │
//! │                                        (load/cpu/vm/net)    │
//! │                            │                                │
//! │                     ┌──────▼──────┐                         │
//! │                     │ StatsSource │ (trait)                 │
//! │                     └──────┬──────┘                         │
//! │                     ┌──────▼──────┐                         │
//! │                     │ ProcfsSource│  /proc/loadavg, stat,   │
//! │                     └──────┬──────┘  meminfo, net/dev       │
//! │                     ┌──────▼──────┐                         │
//! │                     │  FileSystem │ (trait)                 │
//! │                     └──────┬──────┘                         │
//! └────────────────────────────┼────────────────────────────────┘
//!                      ┌───────┴───────┐
//!               ┌──────▼──────┐ ┌──────▼──────┐
//!               │   RealFs    │ │   MockFs    │
//!               │ (Linux)     │ │ (Testing)   │
//!               └─────────────┘ └─────────────┘
//! ```
//!
//! # Usage
//!
//! ## Production (Linux)
//!
//! ```ignore
//! use psutil_collector::collector::{Collector, ProcfsSource, RealFs};
//!
//! let collector = Collector::new(ProcfsSource::new(RealFs::new(), "/proc"));
//! let catalog = collector.get_catalog().unwrap();
//! let records = collector.collect(&catalog).unwrap();
//! ```
//!
//! ## Testing (with MockFs)
//!
//! ```
//! use psutil_collector::Namespace;
//! use psutil_collector::collector::{Collector, MockFs, ProcfsSource};
//!
//! let collector = Collector::new(ProcfsSource::new(MockFs::typical_system(), "/proc"));
//! let requested: Vec<Namespace> = vec!["/intel/psutil/load/load1".parse().unwrap()];
//! let records = collector.collect(&requested).unwrap();
//! assert_eq!(records[0].source(), "mock-host");
//! ```

#[allow(clippy::module_inception)]
mod collector;
pub mod mock;
pub mod procfs;
pub mod source;
pub mod traits;

pub use collector::Collector;
pub use mock::MockFs;
pub use procfs::ProcfsSource;
pub use source::{SourceError, StatsSource};
pub use traits::{FileSystem, RealFs};
