//! Host hooking engine contract.

use crate::result::HookResult;

/// The already-active interception engine hosting this library.
///
/// All methods are synchronous: the core is reentered from whatever threads
/// the engine chooses and must never suspend or block. Implementations are
/// expected to answer in bounded, short time.
pub trait HostEngine: Send + Sync + 'static {
    /// Whether the engine is actually active in this process.
    ///
    /// Operations that require the engine degrade to a warning-and-no-op
    /// when this returns false.
    fn is_active(&self) -> bool;

    /// The package name of the process the core is currently running in.
    fn current_package_name(&self) -> String;

    /// The process name of the process the core is currently running in.
    fn current_process_name(&self) -> String;

    /// Whether a class with the given fully-qualified name is present on
    /// the system. Used for companion-class noise detection.
    fn has_class(&self, name: &str) -> bool;

    /// Install the single shared class-load interception.
    ///
    /// Installed at most once per process; loaded classes are reported back
    /// through the runtime's class-load notification entry point.
    fn install_class_load_hook(&self) -> HookResult<()>;
}
