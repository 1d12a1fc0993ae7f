//! Class-loader watch registry.
//!
//! One underlying class-load interception is shared across all watched
//! loaders and demultiplexed here by loader token, mirroring how a single
//! `loadClass` hook serves every watcher in the host process.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use dashmap::DashMap;

use hookbridge_core::traits::HostEngine;
use hookbridge_core::types::LoaderHandle;

/// Callback fired once per class successfully loaded by a watched loader.
pub type ClassLoadCallback = Box<dyn Fn(&str) + Send + Sync>;

/// Registry of per-loader class-load callbacks.
pub struct ClassLoaderWatch {
    host: Arc<dyn HostEngine>,
    /// Loader token → callback.
    callbacks: DashMap<u64, ClassLoadCallback>,
    /// Whether the shared interception has been installed.
    installed: AtomicBool,
}

impl ClassLoaderWatch {
    /// Create a watch registry over the host engine.
    pub fn new(host: Arc<dyn HostEngine>) -> Self {
        Self {
            host,
            callbacks: DashMap::new(),
            installed: AtomicBool::new(false),
        }
    }

    /// Register a callback for classes loaded through the given loader.
    ///
    /// A missing loader is a configuration misuse and a no-op. Outside an
    /// active engine the registration degrades to a warning. The shared
    /// interception is installed on the first successful call; an install
    /// failure is logged and retried on the next `watch`, with the callback
    /// kept registered either way.
    pub fn watch(&self, loader: Option<&LoaderHandle>, callback: ClassLoadCallback) {
        let Some(loader) = loader else {
            tracing::warn!("Cannot watch a missing class loader");
            return;
        };
        if !self.host.is_active() {
            tracing::warn!("Class loader watching requires an active hooking engine");
            return;
        }
        self.callbacks.insert(loader.token, callback);
        if self.installed.load(Ordering::SeqCst) {
            return;
        }
        match self.host.install_class_load_hook() {
            Ok(()) => {
                self.installed.store(true, Ordering::SeqCst);
            }
            Err(e) => {
                tracing::warn!("Failed to install the class load hook: {e}");
            }
        }
    }

    /// Route a loaded class back to the watcher of its loader.
    ///
    /// Called by the host engine integration from its interception; classes
    /// from unwatched loaders are ignored. Callback panics are trapped so
    /// they cannot unwind into the engine's pipeline.
    pub fn notify_class_loaded(&self, loader_token: u64, class_name: &str) {
        let Some(callback) = self.callbacks.get(&loader_token) else {
            return;
        };
        if panic::catch_unwind(AssertUnwindSafe(|| callback(class_name))).is_err() {
            tracing::error!(
                loader_token,
                class_name,
                "Class load callback panicked"
            );
        }
    }

    /// Number of watched loaders.
    pub fn watched_count(&self) -> usize {
        self.callbacks.len()
    }
}
