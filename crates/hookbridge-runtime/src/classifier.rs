//! Event classifier — decides whether a raw event deserves a context.

use std::sync::Arc;

use hookbridge_core::events::{HookEvent, HookStage, SkipReason};
use hookbridge_core::traits::HostEngine;

use crate::registry::SeenRegistry;

/// Identities of known noise producers: system log-collector injection
/// shims whose package loads are replayed against every process.
const NOISE_IDENTITIES: &[&str] = &["com.miui.contentcatcher", "com.miui.catcherpatch"];

/// Companion class whose presence confirms the noise producers are the
/// vendor shims rather than an unrelated package reusing the name.
const NOISE_COMPANION_CLASS: &str = "android.miui.R";

/// Outcome of classifying a raw event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// The event qualifies; produce or refine a context and dispatch.
    Proceed,
    /// The event is intentionally ignored.
    Skip(SkipReason),
}

/// Classifies raw interception events against the seen registry and the
/// live process identity.
pub struct EventClassifier {
    registry: Arc<SeenRegistry>,
    host: Arc<dyn HostEngine>,
}

impl EventClassifier {
    /// Create a classifier over the shared registry.
    pub fn new(registry: Arc<SeenRegistry>, host: Arc<dyn HostEngine>) -> Self {
        Self { registry, host }
    }

    /// Classify an event.
    ///
    /// Zygote-init events always proceed: they are expected once per
    /// process and repeats refine the system-framework context
    /// idempotently. Package and resources loads are deduplicated per
    /// (identity, stage); resources loads additionally must be attributed
    /// to the process's actual current package, since some engines
    /// misreport the owner of a resources table.
    pub fn classify(&self, event: &HookEvent) -> Classification {
        if self.is_noise_identity(event.package_name.as_deref()) {
            return Classification::Skip(SkipReason::NoiseIdentity);
        }
        match event.stage {
            HookStage::ZygoteInit => Classification::Proceed,
            HookStage::PackageLoad => {
                if self.registry.mark_and_check(event.identity(), HookStage::PackageLoad) {
                    Classification::Proceed
                } else {
                    Classification::Skip(SkipReason::AlreadyDelivered)
                }
            }
            HookStage::ResourcesLoad => {
                let identity = event.identity();
                // Marking happens before the identity comparison; a foreign
                // report still consumes the key for this identity.
                if !self.registry.mark_and_check(identity, HookStage::ResourcesLoad) {
                    Classification::Skip(SkipReason::AlreadyDelivered)
                } else if identity != self.host.current_package_name() {
                    Classification::Skip(SkipReason::ForeignResources)
                } else {
                    Classification::Proceed
                }
            }
        }
    }

    fn is_noise_identity(&self, package_name: Option<&str>) -> bool {
        let Some(name) = package_name else {
            return false;
        };
        NOISE_IDENTITIES.contains(&name) && self.host.has_class(NOISE_COMPANION_CLASS)
    }
}
