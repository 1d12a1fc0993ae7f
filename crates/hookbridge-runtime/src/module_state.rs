//! Process-wide identity and load state of the hosting hook module.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use hookbridge_core::traits::ModuleResourceLoader;
use hookbridge_core::types::ResourcesHandle;

/// Mutable identity fields, guarded together.
#[derive(Debug, Default)]
struct ModuleIdentity {
    package_name: String,
    file_path: String,
    resources: Option<ResourcesHandle>,
}

/// Process-wide record of the hosting module's own identity and lifecycle.
///
/// `begin_load` fires when the module's own bootstrap event arrives;
/// `finish_load` flips once, permanently, when the module completes its
/// setup. After that point the entry-callback window is closed.
#[derive(Debug, Default)]
pub struct ModuleState {
    begun: AtomicBool,
    finished: AtomicBool,
    resources_hook_supported: AtomicBool,
    identity: Mutex<ModuleIdentity>,
}

impl ModuleState {
    /// Create a fresh state record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the module's own identity and attempt to load its resources.
    ///
    /// Expected at most once in practice, but repeat calls simply overwrite
    /// the same fields. A resource load failure is non-fatal: it is logged
    /// and can be retried later via [`refresh_resources`](Self::refresh_resources).
    pub fn begin_load(
        &self,
        package_name: impl Into<String>,
        file_path: impl Into<String>,
        loader: &dyn ModuleResourceLoader,
    ) {
        {
            let mut identity = self.lock_identity();
            identity.package_name = package_name.into();
            identity.file_path = file_path.into();
        }
        self.begun.store(true, Ordering::SeqCst);
        self.refresh_resources(loader);
    }

    /// Reload the module's own resources handle.
    pub fn refresh_resources(&self, loader: &dyn ModuleResourceLoader) {
        let file_path = self.lock_identity().file_path.clone();
        match loader.load_module_resources(&file_path) {
            Ok(handle) => {
                self.lock_identity().resources = Some(handle);
            }
            Err(e) => {
                tracing::warn!(file_path = %file_path, "Failed to load module resources: {e}");
            }
        }
    }

    /// Permanently mark the module's own setup as finished.
    pub fn finish_load(&self) {
        self.finished.store(true, Ordering::SeqCst);
    }

    /// Whether the module's bootstrap event has fired.
    pub fn has_begun_loading(&self) -> bool {
        self.begun.load(Ordering::SeqCst)
    }

    /// Whether the module finished its own setup.
    pub fn has_finished_loading(&self) -> bool {
        self.finished.load(Ordering::SeqCst)
    }

    /// The module's own package name (empty before `begin_load`).
    pub fn package_name(&self) -> String {
        self.lock_identity().package_name.clone()
    }

    /// The module's own file path (empty before `begin_load`).
    pub fn file_path(&self) -> String {
        self.lock_identity().file_path.clone()
    }

    /// The cached self-resources handle, if one was loaded.
    pub fn resources(&self) -> Option<ResourcesHandle> {
        self.lock_identity().resources
    }

    /// Record that the host engine supports resources hooking.
    pub fn mark_resources_hook_supported(&self) {
        self.resources_hook_supported.store(true, Ordering::SeqCst);
    }

    /// Whether a resources-load event has been dispatched in this process.
    pub fn is_resources_hook_supported(&self) -> bool {
        self.resources_hook_supported.load(Ordering::SeqCst)
    }

    fn lock_identity(&self) -> std::sync::MutexGuard<'_, ModuleIdentity> {
        self.identity.lock().unwrap_or_else(|e| e.into_inner())
    }
}
