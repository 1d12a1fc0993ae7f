//! The per-identity hook context ("parameter wrapper").

use serde::Serialize;

use hookbridge_core::events::{HookEvent, HookStage};
use hookbridge_core::types::{AppInfoHandle, LoaderHandle, ResourcesHandle, SYSTEM_FRAMEWORK};

/// The mutable record assembled from successive events for one identity and
/// handed to the registered entry callback.
///
/// At most one context exists per identity; all mutation is in place via
/// [`refine`](Self::refine).
#[derive(Debug, Clone, Serialize)]
pub struct HookContext {
    /// The stage that last updated this context.
    pub stage: HookStage,
    /// Package name; the system-framework identity when absent.
    pub package_name: String,
    /// Process name; the system-framework identity when absent.
    pub process_name: String,
    /// Code-loading context of the target process.
    pub class_loader: LoaderHandle,
    /// Application info handle, once supplied.
    pub app_info: Option<AppInfoHandle>,
    /// Resources handle, once supplied.
    pub resources: Option<ResourcesHandle>,
}

impl HookContext {
    /// Build a fresh context from the first qualifying event for an
    /// identity.
    ///
    /// Callers must only create a context for zygote-init events or events
    /// that carry a class loader; the loader fallback here exists for the
    /// zygote case where none was reported yet.
    pub fn from_event(event: &HookEvent) -> Self {
        Self {
            stage: event.stage,
            // identity() already pins zygote events to the framework name.
            package_name: event.identity().to_string(),
            process_name: if event.stage == HookStage::ZygoteInit {
                SYSTEM_FRAMEWORK.to_string()
            } else {
                non_blank(event.process_name.as_deref())
            },
            class_loader: event.class_loader.unwrap_or_else(LoaderHandle::system_fallback),
            app_info: event.app_info,
            resources: event.resources,
        }
    }

    /// Refine this context in place with data from a later event.
    ///
    /// The stage is always overwritten. Names are overwritten only when the
    /// incoming value is non-blank, and never by a zygote event, whose names
    /// are engine noise. The class loader is replaced only by a handle that
    /// is verifiably an application loader (or during zygote init); a
    /// generic loader never displaces an existing reference. Optional
    /// handles are set when supplied and never cleared.
    pub fn refine(&mut self, event: &HookEvent) {
        self.stage = event.stage;
        if event.stage != HookStage::ZygoteInit {
            if let Some(name) = event.package_name.as_deref().filter(|n| !n.trim().is_empty()) {
                self.package_name = name.to_string();
            }
            if let Some(name) = event.process_name.as_deref().filter(|n| !n.trim().is_empty()) {
                self.process_name = name.to_string();
            }
        }
        if let Some(loader) = event.class_loader {
            if event.stage == HookStage::ZygoteInit || loader.is_application() {
                self.class_loader = loader;
            }
        }
        if let Some(app_info) = event.app_info {
            self.app_info = Some(app_info);
        }
        if let Some(resources) = event.resources {
            self.resources = Some(resources);
        }
    }

    /// Whether this context belongs to the process the core is actually
    /// running in, judged against the live process identity at dispatch
    /// time.
    ///
    /// A package loaded as a shared library into another process produces a
    /// context whose process name does not match, and such a context is not
    /// presented to the entry callback.
    pub fn is_correct_process(&self, current_process: &str) -> bool {
        self.process_name == current_process
    }
}

fn non_blank(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => SYSTEM_FRAMEWORK.to_string(),
    }
}
