//! Hierarchical metric namespaces.
//!
//! A namespace is an ordered sequence of non-empty segments. Its canonical
//! string form is the segments joined by `/` with a leading `/`, e.g.
//! `/intel/psutil/cpu/cpu0/user`.

use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Error building a [`Namespace`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamespaceError {
    /// The string form did not start with `/`.
    MissingLeadingSlash(String),
    /// The segment at this index was empty.
    EmptySegment(usize),
}

impl fmt::Display for NamespaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NamespaceError::MissingLeadingSlash(s) => {
                write!(f, "namespace '{}' must start with '/'", s)
            }
            NamespaceError::EmptySegment(idx) => write!(f, "namespace segment {} is empty", idx),
        }
    }
}

impl std::error::Error for NamespaceError {}

/// Path identifying one collectible metric.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Namespace {
    segments: Vec<String>,
}

impl Namespace {
    /// Builds a namespace from its segments.
    ///
    /// Fails if any segment is empty.
    pub fn new<I, S>(segments: I) -> Result<Self, NamespaceError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        if let Some(idx) = segments.iter().position(|s| s.is_empty()) {
            return Err(NamespaceError::EmptySegment(idx));
        }
        Ok(Self { segments })
    }

    /// The zero namespace, carried by records of unmatched requests.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Last segment, if any.
    pub fn leaf(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            write!(f, "/{}", segment)?;
        }
        Ok(())
    }
}

impl FromStr for Namespace {
    type Err = NamespaceError;

    /// Parses the canonical `/a/b/c` form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some(rest) = s.strip_prefix('/') else {
            return Err(NamespaceError::MissingLeadingSlash(s.to_string()));
        };
        Self::new(rest.split('/'))
    }
}

impl Serialize for Namespace {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
