//! # hookbridge-core
//!
//! Core crate for HookBridge. Contains collaborator traits, configuration
//! schemas, the event model, opaque handle types, and the unified error
//! system.
//!
//! This crate has **no** internal dependencies on other HookBridge crates.

pub mod config;
pub mod error;
pub mod events;
pub mod result;
pub mod traits;
pub mod types;

pub use error::HookError;
pub use result::HookResult;
