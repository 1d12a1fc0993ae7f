//! # hookbridge-runtime
//!
//! The dispatch engine: classifies raw interception events, tracks
//! first-seen (identity, stage) pairs, maintains one long-lived hook
//! context per identity, and routes qualifying events to the registered
//! entry callback and collaborators behind a failure-isolating boundary.

pub mod classifier;
pub mod context;
pub mod dispatcher;
pub mod lifecycle;
pub mod loader_watch;
pub mod module_state;
pub mod registry;
pub mod runtime;
pub mod store;

pub use context::HookContext;
pub use lifecycle::AppLifecycleCallbacks;
pub use runtime::{Collaborators, HookRuntime};
