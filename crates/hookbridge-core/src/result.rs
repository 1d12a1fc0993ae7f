//! Convenience result type alias for HookBridge.

use crate::error::HookError;

/// A specialized `Result` type for HookBridge operations.
///
/// This is defined as a convenience so that every crate does not need to
/// write `Result<T, HookError>` explicitly.
pub type HookResult<T> = Result<T, HookError>;
