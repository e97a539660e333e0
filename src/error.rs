//! Errors surfaced by catalog building and collection.

use crate::collector::source::SourceError;
use crate::family::StatFamily;
use crate::namespace::Namespace;

/// Error aborting a `get_catalog` or `collect` call.
#[derive(Debug)]
pub enum CollectError {
    /// A family probe failed while building the catalog.
    Discovery {
        family: StatFamily,
        source: SourceError,
    },
    /// A family probe failed while collecting.
    Fetch {
        family: StatFamily,
        source: SourceError,
    },
    /// A namespace's instance is absent from the fetched snapshot.
    Lookup {
        namespace: Namespace,
        reason: String,
    },
}

impl std::fmt::Display for CollectError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CollectError::Discovery { family, source } => {
                write!(f, "{} discovery failed: {}", family, source)
            }
            CollectError::Fetch { family, source } => {
                write!(f, "{} fetch failed: {}", family, source)
            }
            CollectError::Lookup { namespace, reason } => {
                write!(f, "lookup of {} failed: {}", namespace, reason)
            }
        }
    }
}

impl std::error::Error for CollectError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CollectError::Discovery { source, .. } | CollectError::Fetch { source, .. } => {
                Some(source)
            }
            CollectError::Lookup { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::procfs::ParseError;
    use std::error::Error;

    #[test]
    fn test_display() {
        let err = CollectError::Discovery {
            family: StatFamily::Network,
            source: SourceError::Parse(ParseError::new("bad line")),
        };
        assert_eq!(
            err.to_string(),
            "network discovery failed: Parse error: bad line"
        );
        assert!(err.source().is_some());

        let err = CollectError::Lookup {
            namespace: "/intel/psutil/cpu/cpu9/user".parse().unwrap(),
            reason: "no such cpu".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "lookup of /intel/psutil/cpu/cpu9/user failed: no such cpu"
        );
        assert!(err.source().is_none());
    }
}
