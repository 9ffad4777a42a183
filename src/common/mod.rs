//! Common types shared across the crate.
//!
//! This module provides the unified error type and result alias used by the
//! package model, the binders, and the renderer, ensuring a consistent API
//! for users.

// Submodule declarations
pub mod error;

// Re-exports for convenience
pub use error::{BindingKind, Error, Result};
