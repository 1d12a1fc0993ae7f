//! Dispatcher — side effects and the user entry callback, behind one
//! failure-isolating boundary.

use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, RwLock};

use hookbridge_core::config::ModuleConfig;
use hookbridge_core::error::HookError;
use hookbridge_core::events::HookStage;
use hookbridge_core::result::HookResult;
use hookbridge_core::traits::{HostEngine, LifecycleRegistrar, SelfHookInstaller};

use crate::context::HookContext;
use crate::module_state::ModuleState;

/// The single externally registered user entry callback.
pub type EntryCallback = Box<dyn Fn(&HookContext) -> HookResult<()> + Send + Sync>;

/// Routes a produced-or-refined context to its side effects.
///
/// Nothing dispatched here may propagate into the host engine's call
/// stack: expected failures come back as [`HookError`] values, panics in
/// the user callback are trapped, and both end up on the logging channel.
/// A failure is terminal for that event; there are no retries.
pub struct Dispatcher {
    callback: RwLock<Option<EntryCallback>>,
    module_state: Arc<ModuleState>,
    host: Arc<dyn HostEngine>,
    self_hooks: Arc<dyn SelfHookInstaller>,
    lifecycle: Arc<dyn LifecycleRegistrar>,
    config: ModuleConfig,
}

impl Dispatcher {
    /// Create a dispatcher over the shared module state and collaborators.
    pub fn new(
        module_state: Arc<ModuleState>,
        host: Arc<dyn HostEngine>,
        self_hooks: Arc<dyn SelfHookInstaller>,
        lifecycle: Arc<dyn LifecycleRegistrar>,
        config: ModuleConfig,
    ) -> Self {
        Self {
            callback: RwLock::new(None),
            module_state,
            host,
            self_hooks,
            lifecycle,
            config,
        }
    }

    /// Register the user entry callback.
    ///
    /// Registration is only meaningful during the module's own setup
    /// window; once the module finished loading this is a configuration
    /// misuse and the call is a no-op.
    pub fn set_entry_callback(&self, callback: EntryCallback) {
        if self.module_state.has_finished_loading() {
            tracing::warn!("Entry callback registered after module load finished; ignoring");
            return;
        }
        *self
            .callback
            .write()
            .unwrap_or_else(|e| e.into_inner()) = Some(callback);
    }

    /// Whether an entry callback is currently registered.
    pub fn has_entry_callback(&self) -> bool {
        self.callback
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .is_some()
    }

    /// Run all side effects for a context.
    ///
    /// The first failing stage logs and terminates dispatch for this event;
    /// the registry key upstream stays marked, so the event is not retried.
    pub fn dispatch(&self, ctx: &HookContext) {
        if let Err(e) = self.run_stages(ctx) {
            tracing::error!(
                identity = %ctx.package_name,
                stage = %ctx.stage,
                "Dispatch failed: {e}"
            );
        }
    }

    fn run_stages(&self, ctx: &HookContext) -> HookResult<()> {
        // The framework context is not an app-level callback target: zygote
        // deliveries are never deduplicated, so letting one through (e.g.
        // when this process really is the framework) would re-invoke the
        // callback on every redelivery.
        if ctx.stage != HookStage::ZygoteInit
            && ctx.is_correct_process(&self.host.current_process_name())
            && !self.module_state.has_finished_loading()
        {
            self.invoke_entry_callback(ctx)?;
        }
        if ctx.stage != HookStage::ZygoteInit
            && ctx.package_name == self.module_state.package_name()
        {
            // At-most-once for this branch is guaranteed upstream by the
            // seen registry, not re-checked here.
            if self.config.enable_prefs_patch && ctx.stage == HookStage::PackageLoad {
                self.self_hooks.install_prefs_permission_patch()?;
            }
            if self.config.enable_status_hooks {
                self.self_hooks.install_status_hooks(&ctx.class_loader, ctx.stage)?;
            }
        }
        if ctx.stage == HookStage::PackageLoad {
            self.lifecycle
                .register_application_lifecycle(&ctx.package_name)?;
        }
        if ctx.stage == HookStage::ResourcesLoad {
            self.module_state.mark_resources_hook_supported();
        }
        Ok(())
    }

    fn invoke_entry_callback(&self, ctx: &HookContext) -> HookResult<()> {
        let guard = self.callback.read().unwrap_or_else(|e| e.into_inner());
        let Some(callback) = guard.as_ref() else {
            return Ok(());
        };
        match panic::catch_unwind(AssertUnwindSafe(|| callback(ctx))) {
            Ok(result) => result,
            Err(payload) => Err(HookError::callback(format!(
                "entry callback panicked: {}",
                panic_message(&payload)
            ))),
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s
    } else {
        "non-string panic payload"
    }
}
