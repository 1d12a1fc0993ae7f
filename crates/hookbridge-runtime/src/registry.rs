//! Identity registry — first-seen tracking for (identity, stage) pairs.

use dashmap::DashMap;

use hookbridge_core::events::HookStage;

/// Composite key for the seen set.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct SeenKey {
    identity: String,
    stage: HookStage,
}

/// Registry of (identity, stage) pairs that have already been processed.
///
/// Once a key is marked seen it is never unmarked; this is what guarantees
/// at-most-once dispatch per pair for the lifetime of the process.
#[derive(Debug, Default)]
pub struct SeenRegistry {
    /// Seen keys. The map's atomic per-key insert makes mark-and-check
    /// linearizable across threads without an outer lock.
    seen: DashMap<SeenKey, ()>,
}

impl SeenRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the pair seen and report whether this call was the first to
    /// observe it.
    ///
    /// Two concurrent calls for the same pair yield `true` to exactly one
    /// caller.
    pub fn mark_and_check(&self, identity: &str, stage: HookStage) -> bool {
        let key = SeenKey {
            identity: identity.to_string(),
            stage,
        };
        self.seen.insert(key, ()).is_none()
    }

    /// Number of distinct pairs observed so far.
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    /// Whether no pair has been observed yet.
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
