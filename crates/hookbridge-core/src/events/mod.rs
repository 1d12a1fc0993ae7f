//! Interception event model.
//!
//! Raw events delivered by the host hooking engine, the closed set of
//! lifecycle stages they belong to, and the first-class skip outcome used
//! by the classifier.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::{AppInfoHandle, LoaderHandle, ResourcesHandle, SYSTEM_FRAMEWORK};

/// The closed set of interception stages delivered by the host engine.
///
/// Determines which identity space and which wrapper fields are relevant
/// for an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HookStage {
    /// The system framework's class loader became active (zygote fork).
    ZygoteInit,
    /// A package's process has started and its classes are loadable.
    PackageLoad,
    /// A package's resources are now available.
    ResourcesLoad,
}

impl fmt::Display for HookStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZygoteInit => write!(f, "zygote_init"),
            Self::PackageLoad => write!(f, "package_load"),
            Self::ResourcesLoad => write!(f, "resources_load"),
        }
    }
}

/// A raw interception event as delivered by the host hooking engine.
///
/// The engine guarantees only that the event occurred; fields may be
/// missing, duplicated deliveries are expected, and the reported identity
/// is not necessarily trustworthy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HookEvent {
    /// The stage this event belongs to.
    pub stage: HookStage,
    /// Reported package name, if any.
    pub package_name: Option<String>,
    /// Reported process name, if any.
    pub process_name: Option<String>,
    /// Code-loading context of the target process, if supplied.
    pub class_loader: Option<LoaderHandle>,
    /// Application info handle, if supplied.
    pub app_info: Option<AppInfoHandle>,
    /// Resources handle, if supplied.
    pub resources: Option<ResourcesHandle>,
}

impl HookEvent {
    /// Create a zygote-init event.
    pub fn zygote_init(class_loader: Option<LoaderHandle>) -> Self {
        Self {
            stage: HookStage::ZygoteInit,
            package_name: None,
            process_name: None,
            class_loader,
            app_info: None,
            resources: None,
        }
    }

    /// Create a package-load event.
    pub fn package_load(
        package_name: impl Into<String>,
        process_name: impl Into<String>,
        class_loader: Option<LoaderHandle>,
        app_info: Option<AppInfoHandle>,
    ) -> Self {
        Self {
            stage: HookStage::PackageLoad,
            package_name: Some(package_name.into()),
            process_name: Some(process_name.into()),
            class_loader,
            app_info,
            resources: None,
        }
    }

    /// Create a resources-load event.
    pub fn resources_load(
        package_name: impl Into<String>,
        resources: Option<ResourcesHandle>,
    ) -> Self {
        Self {
            stage: HookStage::ResourcesLoad,
            package_name: Some(package_name.into()),
            process_name: None,
            class_loader: None,
            app_info: None,
            resources,
        }
    }

    /// The identity this event is attributed to.
    ///
    /// Zygote events always belong to the system framework, whatever name
    /// the engine reported alongside them. Other events fall back to the
    /// framework identity when the reported name is missing or blank, so
    /// every component keys an anonymous event the same way.
    pub fn identity(&self) -> &str {
        if self.stage == HookStage::ZygoteInit {
            return SYSTEM_FRAMEWORK;
        }
        match self.package_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => SYSTEM_FRAMEWORK,
        }
    }
}

/// Why the classifier declined to produce a context for an event.
///
/// A skip is not an error; it is a first-class, silent outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    /// The identity belongs to a known noise producer.
    NoiseIdentity,
    /// This (identity, stage) pair has already been delivered.
    AlreadyDelivered,
    /// A resources-load event was attributed to a package other than the
    /// process's actual current package.
    ForeignResources,
}

/// Host application lifecycle transitions observed by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppLifecycleEvent {
    /// `Application.attachBaseContext`; `after` is false for the before
    /// hook and true for the after hook.
    AttachBaseContext {
        /// Whether the base context has already been attached.
        after: bool,
    },
    /// `Application.onCreate`.
    Create,
    /// `Application.onTerminate`.
    Terminate,
    /// `Application.onLowMemory`.
    LowMemory,
    /// `Application.onTrimMemory` with the reported level.
    TrimMemory {
        /// The trim level reported by the system.
        level: i32,
    },
    /// `Application.onConfigurationChanged`.
    ConfigurationChanged,
}
