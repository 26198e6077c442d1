//! Error handling for the Modulith verifier
//!
//! This module provides the error types, result alias, and error context
//! utilities used throughout the crate.

pub mod context;
pub mod types;

pub use context::{OptionExt, ResultExt};
pub use types::{ErrorSeverity, ModulithError, Result};
