//! Metric records produced by a collection call.

use crate::namespace::Namespace;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A collected value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetricValue {
    /// Load averages, CPU seconds, percentages.
    Float(f64),
    /// Byte and packet counters.
    Unsigned(u64),
}

impl From<f64> for MetricValue {
    fn from(v: f64) -> Self {
        MetricValue::Float(v)
    }
}

impl From<u64> for MetricValue {
    fn from(v: u64) -> Self {
        MetricValue::Unsigned(v)
    }
}

/// One collected metric, stamped with its source host and collection time.
///
/// The default record has an empty namespace and no value; it fills the
/// slot of a requested namespace that matched no stat family.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MetricRecord {
    namespace: Namespace,
    value: Option<MetricValue>,
    source: String,
    timestamp: DateTime<Utc>,
}

impl MetricRecord {
    /// Creates an unstamped record.
    pub(crate) fn new(namespace: Namespace, value: MetricValue) -> Self {
        Self {
            namespace,
            value: Some(value),
            ..Default::default()
        }
    }

    /// Sets source host and timestamp.
    pub(crate) fn stamped(mut self, source: &str, timestamp: DateTime<Utc>) -> Self {
        self.source = source.to_string();
        self.timestamp = timestamp;
        self
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    pub fn value(&self) -> Option<MetricValue> {
        self.value
    }

    /// Host the value was collected on; empty if it could not be resolved.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}
