//! External collaborator contracts invoked during dispatch.
//!
//! Failures are surfaced to the core only as [`HookError`] values; the
//! dispatcher catches and logs them, never letting them reach the host.
//!
//! [`HookError`]: crate::error::HookError

use crate::events::HookStage;
use crate::result::HookResult;
use crate::types::{LoaderHandle, ResourcesHandle};

/// Installs the module's own status/diagnostics hooks into a host process.
pub trait SelfHookInstaller: Send + Sync + 'static {
    /// Install status responders (active flag, executor name/version) into
    /// the module's own classes via the given loader.
    fn install_status_hooks(&self, loader: &LoaderHandle, stage: HookStage) -> HookResult<()>;

    /// Install the preferences file-permission patch.
    fn install_prefs_permission_patch(&self) -> HookResult<()>;
}

/// Installs process-wide application lifecycle interception.
pub trait LifecycleRegistrar: Send + Sync + 'static {
    /// Register lifecycle hooks (creation, termination, memory pressure,
    /// configuration change) for the given package.
    ///
    /// Idempotency across repeated calls for the same package is this
    /// collaborator's responsibility, not the core's.
    fn register_application_lifecycle(&self, package_name: &str) -> HookResult<()>;
}

/// Loads the hosting module's own resources table.
pub trait ModuleResourceLoader: Send + Sync + 'static {
    /// Load (or reload) the module's resources from its own file path.
    fn load_module_resources(&self, file_path: &str) -> HookResult<ResourcesHandle>;
}
