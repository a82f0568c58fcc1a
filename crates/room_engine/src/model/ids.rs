//! Element identifiers

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque, unique element identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    /// Wrap an existing identifier string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Monotonic id source for one editing session
///
/// Ids have the form `<prefix>-<n>`; `n` never repeats within a generator,
/// so removed ids are never handed out again.
#[derive(Debug, Default)]
pub struct IdGenerator {
    next: u64,
}

impl IdGenerator {
    /// Create a generator starting at 1
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Produce the next id with the given prefix
    pub fn next_id(&mut self, prefix: &str) -> ElementId {
        let n = self.next.max(1);
        self.next = n + 1;
        ElementId(format!("{prefix}-{n}"))
    }
}
