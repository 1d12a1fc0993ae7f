//! Host application lifecycle fan-out.
//!
//! The lifecycle registrar collaborator installs the actual interception;
//! once installed, the engine reports transitions back through
//! [`LifecycleRouter::route`], which fans out to the callbacks the module
//! registered here.

use std::panic::{self, AssertUnwindSafe};
use std::sync::RwLock;

use hookbridge_core::config::LifecycleConfig;
use hookbridge_core::error::HookError;
use hookbridge_core::events::AppLifecycleEvent;
use hookbridge_core::result::HookResult;

/// A registered lifecycle callback.
pub type LifecycleCallback = Box<dyn Fn(&AppLifecycleEvent) -> HookResult<()> + Send + Sync>;

/// Optional callbacks for each host application lifecycle transition.
#[derive(Default)]
pub struct AppLifecycleCallbacks {
    /// `attachBaseContext` callback (fires for both before and after).
    pub on_attach_base_context: Option<LifecycleCallback>,
    /// `onCreate` callback.
    pub on_create: Option<LifecycleCallback>,
    /// `onTerminate` callback.
    pub on_terminate: Option<LifecycleCallback>,
    /// `onLowMemory` callback.
    pub on_low_memory: Option<LifecycleCallback>,
    /// `onTrimMemory` callback.
    pub on_trim_memory: Option<LifecycleCallback>,
    /// `onConfigurationChanged` callback.
    pub on_configuration_changed: Option<LifecycleCallback>,
}

impl AppLifecycleCallbacks {
    /// Whether any callback is registered.
    pub fn is_set_up(&self) -> bool {
        self.on_attach_base_context.is_some()
            || self.on_create.is_some()
            || self.on_terminate.is_some()
            || self.on_low_memory.is_some()
            || self.on_trim_memory.is_some()
            || self.on_configuration_changed.is_some()
    }

    fn for_event(&self, event: &AppLifecycleEvent) -> Option<&LifecycleCallback> {
        match event {
            AppLifecycleEvent::AttachBaseContext { .. } => self.on_attach_base_context.as_ref(),
            AppLifecycleEvent::Create => self.on_create.as_ref(),
            AppLifecycleEvent::Terminate => self.on_terminate.as_ref(),
            AppLifecycleEvent::LowMemory => self.on_low_memory.as_ref(),
            AppLifecycleEvent::TrimMemory { .. } => self.on_trim_memory.as_ref(),
            AppLifecycleEvent::ConfigurationChanged => self.on_configuration_changed.as_ref(),
        }
    }
}

/// Routes lifecycle transitions reported by the engine to the registered
/// callbacks.
pub struct LifecycleRouter {
    callbacks: RwLock<AppLifecycleCallbacks>,
    config: LifecycleConfig,
}

impl LifecycleRouter {
    /// Create a router with no callbacks registered.
    pub fn new(config: LifecycleConfig) -> Self {
        Self {
            callbacks: RwLock::new(AppLifecycleCallbacks::default()),
            config,
        }
    }

    /// Replace the registered callback set.
    pub fn set_callbacks(&self, callbacks: AppLifecycleCallbacks) {
        *self.callbacks.write().unwrap_or_else(|e| e.into_inner()) = callbacks;
    }

    /// Whether any lifecycle callback is registered.
    pub fn is_set_up(&self) -> bool {
        self.callbacks
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .is_set_up()
    }

    /// Deliver a lifecycle transition to its registered callback.
    ///
    /// A callback failure (error or panic) is re-raised to the caller when
    /// `rethrow_to_app` is enabled, so the hooked application observes it
    /// on its own lifecycle path; otherwise it is logged and swallowed.
    /// Transitions with no registered callback are silently ignored.
    pub fn route(&self, event: &AppLifecycleEvent) -> HookResult<()> {
        let guard = self.callbacks.read().unwrap_or_else(|e| e.into_inner());
        let Some(callback) = guard.for_event(event) else {
            return Ok(());
        };
        let outcome = match panic::catch_unwind(AssertUnwindSafe(|| callback(event))) {
            Ok(result) => result,
            Err(_) => Err(HookError::callback("lifecycle callback panicked")),
        };
        match outcome {
            Ok(()) => Ok(()),
            Err(e) if self.config.rethrow_to_app => Err(e),
            Err(e) => {
                tracing::error!("An error occurred during an app lifecycle event: {e}");
                Ok(())
            }
        }
    }
}
