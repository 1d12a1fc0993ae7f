//! Shared test helpers: a scriptable host engine and recording collaborators.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use hookbridge::traits::{
    HostEngine, LifecycleRegistrar, ModuleResourceLoader, SelfHookInstaller,
};
use hookbridge::types::{LoaderHandle, ResourcesHandle};
use hookbridge::events::HookStage;
use hookbridge::{Collaborators, HookError, HookResult, HookRuntime, RuntimeConfig};

/// A host engine whose reported identity can be changed mid-test.
pub struct MockEngine {
    pub active: AtomicBool,
    identity: Mutex<String>,
    pub hook_installs: AtomicUsize,
}

impl MockEngine {
    pub fn new(identity: &str) -> Arc<Self> {
        Arc::new(Self {
            active: AtomicBool::new(true),
            identity: Mutex::new(identity.to_string()),
            hook_installs: AtomicUsize::new(0),
        })
    }

    /// Simulate the process identity changing (e.g. a different test phase).
    pub fn set_identity(&self, identity: &str) {
        *self.identity.lock().unwrap() = identity.to_string();
    }
}

impl HostEngine for MockEngine {
    fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }
    fn current_package_name(&self) -> String {
        self.identity.lock().unwrap().clone()
    }
    fn current_process_name(&self) -> String {
        self.identity.lock().unwrap().clone()
    }
    fn has_class(&self, name: &str) -> bool {
        name == "android.miui.R"
    }
    fn install_class_load_hook(&self) -> HookResult<()> {
        self.hook_installs.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Records every collaborator call; individual calls can be made to fail.
#[derive(Default)]
pub struct Recorder {
    pub status_hooks: AtomicUsize,
    pub prefs_patches: AtomicUsize,
    pub lifecycle_registrations: Mutex<Vec<String>>,
    pub resource_loads: AtomicUsize,
    pub fail_lifecycle_for: Mutex<Option<String>>,
    pub fail_resources: AtomicBool,
}

impl Recorder {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn lifecycle_count(&self) -> usize {
        self.lifecycle_registrations.lock().unwrap().len()
    }

    pub fn fail_lifecycle_for(&self, package: &str) {
        *self.fail_lifecycle_for.lock().unwrap() = Some(package.to_string());
    }
}

impl SelfHookInstaller for Recorder {
    fn install_status_hooks(&self, _loader: &LoaderHandle, _stage: HookStage) -> HookResult<()> {
        self.status_hooks.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
    fn install_prefs_permission_patch(&self) -> HookResult<()> {
        self.prefs_patches.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

impl LifecycleRegistrar for Recorder {
    fn register_application_lifecycle(&self, package_name: &str) -> HookResult<()> {
        if self.fail_lifecycle_for.lock().unwrap().as_deref() == Some(package_name) {
            return Err(HookError::collaborator(format!(
                "lifecycle install failed for {package_name}"
            )));
        }
        self.lifecycle_registrations
            .lock()
            .unwrap()
            .push(package_name.to_string());
        Ok(())
    }
}

impl ModuleResourceLoader for Recorder {
    fn load_module_resources(&self, _file_path: &str) -> HookResult<ResourcesHandle> {
        if self.fail_resources.load(Ordering::SeqCst) {
            return Err(HookError::resources("module apk unreadable"));
        }
        self.resource_loads.fetch_add(1, Ordering::SeqCst);
        Ok(ResourcesHandle(99))
    }
}

/// Build a runtime over a mock engine reporting the given process identity.
pub fn runtime(identity: &str) -> (HookRuntime, Arc<Recorder>, Arc<MockEngine>) {
    let engine = MockEngine::new(identity);
    let recorder = Recorder::new();
    let collaborators = Collaborators {
        self_hooks: Arc::clone(&recorder) as Arc<dyn SelfHookInstaller>,
        lifecycle: Arc::clone(&recorder) as Arc<dyn LifecycleRegistrar>,
        module_resources: Arc::clone(&recorder) as Arc<dyn ModuleResourceLoader>,
    };
    let runtime = HookRuntime::new(
        Arc::clone(&engine) as Arc<dyn HostEngine>,
        collaborators,
        RuntimeConfig::default(),
    );
    (runtime, recorder, engine)
}
