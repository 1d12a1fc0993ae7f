//! Identity and opaque handle types.

pub mod handles;

pub use handles::{AppInfoHandle, LoaderHandle, LoaderQuality, ResourcesHandle};

/// Reserved identity representing the system framework itself.
///
/// Used as the package and process name for zygote/system events and as the
/// fallback whenever the engine reports a blank identity.
pub const SYSTEM_FRAMEWORK: &str = "android";
