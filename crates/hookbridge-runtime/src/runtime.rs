//! The long-lived orchestrator owning all dispatch state.

use std::sync::Arc;

use hookbridge_core::config::RuntimeConfig;
use hookbridge_core::events::{AppLifecycleEvent, HookEvent};
use hookbridge_core::result::HookResult;
use hookbridge_core::traits::{
    HostEngine, LifecycleRegistrar, ModuleResourceLoader, SelfHookInstaller,
};
use hookbridge_core::types::LoaderHandle;

use crate::classifier::{Classification, EventClassifier};
use crate::context::HookContext;
use crate::dispatcher::{Dispatcher, EntryCallback};
use crate::lifecycle::{AppLifecycleCallbacks, LifecycleRouter};
use crate::loader_watch::{ClassLoadCallback, ClassLoaderWatch};
use crate::module_state::ModuleState;
use crate::registry::SeenRegistry;
use crate::store::ContextStore;

/// The external collaborators the runtime dispatches into.
#[derive(Clone)]
pub struct Collaborators {
    /// Installs the module's own status/diagnostics hooks.
    pub self_hooks: Arc<dyn SelfHookInstaller>,
    /// Installs application lifecycle interception.
    pub lifecycle: Arc<dyn LifecycleRegistrar>,
    /// Loads the module's own resources.
    pub module_resources: Arc<dyn ModuleResourceLoader>,
}

/// The hook-lifecycle orchestration core.
///
/// Constructed once per process and reentered synchronously from whatever
/// threads the host engine uses. All registries and stores live here as
/// explicit state; there are no ambient globals. Everything is rebuilt
/// empty on process start — nothing is persisted or shared across
/// processes.
pub struct HookRuntime {
    store: ContextStore,
    classifier: EventClassifier,
    dispatcher: Dispatcher,
    module_state: Arc<ModuleState>,
    loader_watch: ClassLoaderWatch,
    lifecycle_router: LifecycleRouter,
    module_resources: Arc<dyn ModuleResourceLoader>,
}

impl HookRuntime {
    /// Create a runtime over the host engine and collaborators.
    pub fn new(
        host: Arc<dyn HostEngine>,
        collaborators: Collaborators,
        config: RuntimeConfig,
    ) -> Self {
        let registry = Arc::new(SeenRegistry::new());
        let module_state = Arc::new(ModuleState::new());
        Self {
            store: ContextStore::new(),
            classifier: EventClassifier::new(Arc::clone(&registry), Arc::clone(&host)),
            dispatcher: Dispatcher::new(
                Arc::clone(&module_state),
                Arc::clone(&host),
                collaborators.self_hooks,
                collaborators.lifecycle,
                config.module.clone(),
            ),
            module_state,
            loader_watch: ClassLoaderWatch::new(Arc::clone(&host)),
            lifecycle_router: LifecycleRouter::new(config.lifecycle.clone()),
            module_resources: collaborators.module_resources,
        }
    }

    /// Handle a raw interception event from the host engine.
    ///
    /// Classifies the event, creates or refines the identity's context, and
    /// dispatches side effects under the per-identity critical section.
    /// Never propagates anything back to the engine; skips are traced.
    pub fn on_event(&self, event: HookEvent) {
        match self.classifier.classify(&event) {
            Classification::Skip(reason) => {
                tracing::trace!(
                    stage = %event.stage,
                    identity = event.identity(),
                    ?reason,
                    "Event skipped"
                );
            }
            Classification::Proceed => {
                let Some(slot) = self.store.assign(&event) else {
                    tracing::trace!(
                        stage = %event.stage,
                        identity = event.identity(),
                        "No context creatable without a class loader"
                    );
                    return;
                };
                // Dispatch holds the slot lock so a concurrent later event
                // for the same identity cannot refine fields mid-dispatch.
                let ctx = slot.lock().unwrap_or_else(|e| e.into_inner());
                self.dispatcher.dispatch(&ctx);
            }
        }
    }

    /// Register the single user entry callback.
    pub fn set_entry_callback(&self, callback: EntryCallback) {
        self.dispatcher.set_entry_callback(callback);
    }

    /// Record the module's own bootstrap: identity, file path, resources.
    pub fn begin_module_load(
        &self,
        package_name: impl Into<String>,
        file_path: impl Into<String>,
    ) {
        self.module_state
            .begin_load(package_name, file_path, self.module_resources.as_ref());
    }

    /// Permanently close the module's setup window.
    pub fn finish_module_load(&self) {
        self.module_state.finish_load();
    }

    /// Retry loading the module's own resources.
    pub fn refresh_module_resources(&self) {
        self.module_state
            .refresh_resources(self.module_resources.as_ref());
    }

    /// Register a per-loader class-load callback.
    pub fn watch_class_loader(&self, loader: Option<&LoaderHandle>, callback: ClassLoadCallback) {
        self.loader_watch.watch(loader, callback);
    }

    /// Report a loaded class from the engine's shared interception.
    pub fn notify_class_loaded(&self, loader_token: u64, class_name: &str) {
        self.loader_watch.notify_class_loaded(loader_token, class_name);
    }

    /// Replace the host application lifecycle callbacks.
    pub fn set_lifecycle_callbacks(&self, callbacks: AppLifecycleCallbacks) {
        self.lifecycle_router.set_callbacks(callbacks);
    }

    /// Deliver a host application lifecycle transition.
    ///
    /// The returned error is the opt-in rethrow-to-app path; every other
    /// failure is logged and swallowed inside the router.
    pub fn on_app_lifecycle(&self, event: &AppLifecycleEvent) -> HookResult<()> {
        self.lifecycle_router.route(event)
    }

    /// Whether a resources-load event was dispatched in this process.
    pub fn is_resources_hook_supported(&self) -> bool {
        self.module_state.is_resources_hook_supported()
    }

    /// The module's own state record.
    pub fn module_state(&self) -> &ModuleState {
        &self.module_state
    }

    /// Read-only snapshot of an identity's context, for diagnostics.
    pub fn context(&self, identity: &str) -> Option<HookContext> {
        self.store
            .get(identity)
            .map(|slot| slot.lock().unwrap_or_else(|e| e.into_inner()).clone())
    }
}
