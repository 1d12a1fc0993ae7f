//! Context store — one mutable hook context per identity.

use std::sync::{Arc, Mutex};

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use hookbridge_core::events::{HookEvent, HookStage};

use crate::context::HookContext;

/// A shared, per-identity context slot.
///
/// The inner mutex serializes both refinement and dispatch for one
/// identity; slots for different identities are independent.
pub type ContextSlot = Arc<Mutex<HookContext>>;

/// Mapping from identity to its single long-lived context.
///
/// Contexts are created once and subsequently only refined in place.
#[derive(Debug, Default)]
pub struct ContextStore {
    contexts: DashMap<String, ContextSlot>,
}

impl ContextStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create or refine the context for the event's identity.
    ///
    /// Returns `None` when no context exists yet and the event does not
    /// qualify to create one: creation requires either the zygote stage or
    /// a reported class loader, so a resource-only event can never produce
    /// a half-formed context.
    pub fn assign(&self, event: &HookEvent) -> Option<ContextSlot> {
        let (slot, existing) = match self.contexts.entry(event.identity().to_string()) {
            Entry::Occupied(entry) => (Arc::clone(entry.get()), true),
            Entry::Vacant(entry) => {
                if event.stage == HookStage::ZygoteInit || event.class_loader.is_some() {
                    let slot = Arc::new(Mutex::new(HookContext::from_event(event)));
                    entry.insert(Arc::clone(&slot));
                    (slot, false)
                } else {
                    return None;
                }
            }
        };
        // The map entry guard is released before taking the slot lock:
        // dispatch can hold a slot for the length of a user callback, and
        // waiting on it must not keep any map shard locked.
        if existing {
            slot.lock()
                .unwrap_or_else(|e| e.into_inner())
                .refine(event);
        }
        Some(slot)
    }

    /// Fetch the slot for an identity, if one exists.
    pub fn get(&self, identity: &str) -> Option<ContextSlot> {
        self.contexts.get(identity).map(|slot| Arc::clone(&slot))
    }

    /// Number of identities with a context.
    pub fn len(&self) -> usize {
        self.contexts.len()
    }

    /// Whether no context exists yet.
    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }
}
