//! Error context utilities for Modulith
//!
//! This module provides utilities for adding context to errors and handling
//! errors in a consistent way throughout the application.

use crate::error::{ModulithError, Result};

/// Extension trait for Result to add context to errors
pub trait ResultExt<T> {
    /// Add context to an error with a custom message
    fn with_context<C, F>(self, context: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: std::fmt::Display;
}

impl<T> ResultExt<T> for Result<T> {
    /// Domain errors keep their variant so severity and exit codes survive;
    /// only generic failures are folded into an `Analysis` error.
    fn with_context<C, F>(self, context: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: std::fmt::Display,
    {
        self.map_err(|err| match err {
            ModulithError::Io { source } => ModulithError::Analysis {
                message: format!("{}: {}", context(), source),
            },
            ModulithError::Analysis { message } => ModulithError::Analysis {
                message: format!("{}: {}", context(), message),
            },
            other => {
                tracing::debug!("{}: {}", context(), other);
                other
            }
        })
    }
}

/// Extension trait for Option to convert to Result with a custom error
pub trait OptionExt<T> {
    /// Convert Option to Result with a custom error message
    fn ok_or_error<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> ModulithError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_error<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> ModulithError,
    {
        self.ok_or_else(err_fn)
    }
}
