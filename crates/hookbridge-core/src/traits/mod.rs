//! Abstract contracts between the dispatch core and its collaborators.
//!
//! The core consumes these seams; their implementations live with the host
//! hooking engine integration and are not part of this library.

pub mod collaborators;
pub mod host;

pub use collaborators::{LifecycleRegistrar, ModuleResourceLoader, SelfHookInstaller};
pub use host::HostEngine;
