//! # HookBridge
//!
//! Hook-lifecycle orchestration core for processes instrumented by an
//! external host hooking engine.
//!
//! The engine delivers raw, repeated, possibly out-of-order interception
//! events ("a class loader is active", "a package's process has started",
//! "a package's resources are available"). HookBridge turns them into
//! deduplicated lifecycle transitions: one long-lived [`HookContext`] per
//! identity, at most one entry-callback invocation per (identity, stage)
//! pair, and a failure-isolating boundary so nothing a callback or
//! collaborator does can crash the shared host process.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use hookbridge::{Collaborators, HookRuntime, RuntimeConfig};
//! use hookbridge::events::HookEvent;
//!
//! let runtime = HookRuntime::new(engine, collaborators, RuntimeConfig::default());
//! runtime.begin_module_load("com.example.module", "/data/app/module.apk");
//! runtime.set_entry_callback(Box::new(|ctx| {
//!     tracing::info!("loaded into {}", ctx.package_name);
//!     Ok(())
//! }));
//! runtime.finish_module_load();
//!
//! // Reentered by the engine, possibly from multiple threads:
//! runtime.on_event(HookEvent::zygote_init(None));
//! ```

pub mod logging;

pub use hookbridge_core::config::{self, RuntimeConfig};
pub use hookbridge_core::error::{ErrorKind, HookError};
pub use hookbridge_core::events;
pub use hookbridge_core::result::HookResult;
pub use hookbridge_core::traits;
pub use hookbridge_core::types;
pub use hookbridge_runtime::{AppLifecycleCallbacks, Collaborators, HookContext, HookRuntime};
