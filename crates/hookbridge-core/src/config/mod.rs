//! Runtime configuration schemas.
//!
//! All configuration structs are deserialized via the `config` crate. The
//! embedding module usually constructs [`RuntimeConfig`] programmatically
//! with [`Default`], but a TOML file + environment overlay is supported the
//! same way for packaging-level preferences.

pub mod logging;

use serde::{Deserialize, Serialize};

use self::logging::LoggingConfig;

use crate::error::HookError;

/// Root runtime configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Module self-hook settings.
    #[serde(default)]
    pub module: ModuleConfig,
    /// Host application lifecycle settings.
    #[serde(default)]
    pub lifecycle: LifecycleConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Module self-hook configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleConfig {
    /// Whether to install status/diagnostics hooks when the module's own
    /// package is loaded into a host process.
    #[serde(default = "default_true")]
    pub enable_status_hooks: bool,
    /// Whether to install the preferences file-permission patch alongside
    /// the status hooks.
    #[serde(default)]
    pub enable_prefs_patch: bool,
}

/// Host application lifecycle configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LifecycleConfig {
    /// Whether a failure inside a lifecycle callback is re-raised on the
    /// hooked application's own lifecycle path instead of being logged.
    #[serde(default = "default_true")]
    pub rethrow_to_app: bool,
}

impl Default for ModuleConfig {
    fn default() -> Self {
        Self {
            enable_status_hooks: true,
            enable_prefs_patch: false,
        }
    }
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            rethrow_to_app: true,
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `HOOKBRIDGE_`.
    pub fn load(env: &str) -> Result<Self, HookError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("HOOKBRIDGE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| HookError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| HookError::configuration(format!("Failed to deserialize config: {e}")))
    }
}

fn default_true() -> bool {
    true
}
