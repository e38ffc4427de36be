//! Per-file visit counts keyed by declaration identity.

use std::fmt;

use lazydoc_syntax::Pos;
use rustc_hash::FxHashMap;

/// Visits above this count suppress synthesis for an identity.
pub const VISIT_THRESHOLD: u32 = 2;

/// Name plus position: the same node always maps to the same key, while two
/// declarations sharing a name at different offsets stay distinct.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdentityKey {
    pub name: String,
    pub pos: Pos,
}

impl IdentityKey {
    pub fn new(name: impl Into<String>, pos: Pos) -> Self {
        Self {
            name: name.into(),
            pos,
        }
    }
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.pos)
    }
}

/// How many times each identity was visited during one file's pass.
///
/// Owned by a single file pass and dropped with it.
#[derive(Debug, Default)]
pub struct VisitLedger {
    visits: FxHashMap<IdentityKey, u32>,
}

impl VisitLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one visit and returns the updated total.
    pub fn record(&mut self, key: &IdentityKey) -> u32 {
        let count = self.visits.entry(key.clone()).or_insert(0);
        *count += 1;
        *count
    }

    /// Visits recorded so far, zero for unseen keys.
    pub fn count(&self, key: &IdentityKey) -> u32 {
        self.visits.get(key).copied().unwrap_or(0)
    }

    /// `true` once the identity was visited more than [`VISIT_THRESHOLD`] times.
    pub fn is_over_threshold(&self, key: &IdentityKey) -> bool {
        self.count(key) > VISIT_THRESHOLD
    }

    /// Number of distinct identities seen.
    pub fn len(&self) -> usize {
        self.visits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visits.is_empty()
    }
}
