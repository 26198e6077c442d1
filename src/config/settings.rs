//! Settings validation

use std::path::Path;

use crate::error::{ModulithError, Result};
use crate::models::config::Settings;

/// Settings validator for ensuring configuration is valid
pub struct SettingsValidator;

impl SettingsValidator {
    /// Validate settings and return errors if invalid
    pub fn validate(settings: &Settings) -> Result<()> {
        if !settings.model_path.exists() {
            return Err(ModulithError::ModelNotFound {
                path: settings.model_path.clone(),
            });
        }

        Self::validate_root(settings)?;

        for pattern in &settings.exclude_patterns {
            glob::Pattern::new(pattern).map_err(|e| {
                ModulithError::config_error(format!("Invalid exclude pattern '{}': {}", pattern, e))
            })?;
        }

        if settings.threads == Some(0) {
            return Err(ModulithError::config_error("Thread count must be at least 1"));
        }

        if let Some(path) = &settings.output_file {
            Self::validate_output_path(path)?;
        }

        Ok(())
    }

    /// Exactly one of the root type and the root package must be given
    fn validate_root(settings: &Settings) -> Result<()> {
        let root = settings.root.as_deref().map(str::trim).filter(|r| !r.is_empty());
        let root_package = settings
            .root_package
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty());

        match (root, root_package) {
            (Some(_), None) | (None, Some(_)) => Ok(()),
            (None, None) => Err(ModulithError::config_error(
                "No application root given. Use --root <TYPE> or --root-package <PACKAGE>",
            )),
            (Some(_), Some(_)) => Err(ModulithError::config_error(
                "Both root and root_package are set. Use only one of them",
            )),
        }
    }

    /// The output file's directory has to exist and the file itself must not be a directory
    fn validate_output_path(path: &Path) -> Result<()> {
        if path.is_dir() {
            return Err(ModulithError::InvalidPath {
                path: path.to_path_buf(),
            });
        }

        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() && !parent.is_dir() => {
                Err(ModulithError::OutputDirectoryNotFound {
                    path: parent.to_path_buf(),
                })
            }
            _ => Ok(()),
        }
    }
}
