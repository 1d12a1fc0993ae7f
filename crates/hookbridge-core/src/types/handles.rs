//! Opaque references into the host process.
//!
//! The core never introspects these; they are tokens minted by the host
//! hooking engine and handed back to collaborators unchanged. The loader
//! handle additionally carries a quality marker so that "absent" and
//! "present but generic" stay distinguishable.

use serde::{Deserialize, Serialize};

/// How trustworthy a code-loading context is for hooking purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoaderQuality {
    /// A legitimate application class loader for the target package.
    Application,
    /// A generic or system class loader; usable, but a lower-quality
    /// reference that must never displace an application loader.
    System,
}

/// Opaque reference to the code-loading context of a target process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoaderHandle {
    /// Engine-minted token identifying the underlying loader.
    pub token: u64,
    /// Quality of this reference.
    pub quality: LoaderQuality,
}

impl LoaderHandle {
    /// Create a handle for a legitimate application class loader.
    pub fn application(token: u64) -> Self {
        Self {
            token,
            quality: LoaderQuality::Application,
        }
    }

    /// Create a handle for a generic/system class loader.
    pub fn system(token: u64) -> Self {
        Self {
            token,
            quality: LoaderQuality::System,
        }
    }

    /// The fallback handle used when a context must be created before any
    /// loader was reported (zygote stage only).
    pub fn system_fallback() -> Self {
        Self::system(0)
    }

    /// Whether this is an application-quality reference.
    pub fn is_application(&self) -> bool {
        self.quality == LoaderQuality::Application
    }
}

/// Opaque reference to a target application's info record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppInfoHandle(pub u64);

/// Opaque reference to a loaded resources table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourcesHandle(pub u64);
