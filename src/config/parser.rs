//! Configuration file parsing utilities

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ModulithError, Result};
use crate::models::config::PartialSettings;
use super::file::DEFAULT_CONFIG_FILE;

/// Parse a TOML configuration file into PartialSettings
pub fn parse_config_file<P: AsRef<Path>>(path: P) -> Result<PartialSettings> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ModulithError::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path).map_err(|e| ModulithError::ConfigRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    tracing::debug!(path = %path.display(), "loading configuration file");

    parse_config_content(&content, path)
}

/// Parse TOML configuration content into PartialSettings
pub fn parse_config_content<P: AsRef<Path>>(content: &str, path: P) -> Result<PartialSettings> {
    let path = path.as_ref();

    let settings: PartialSettings = toml::from_str(content).map_err(|e| ModulithError::ConfigParse {
        path: path.to_path_buf(),
        source: e,
    })?;

    validate_partial_settings(&settings, path)?;

    Ok(settings)
}

/// Validate partial settings for obvious errors
pub fn validate_partial_settings<P: AsRef<Path>>(settings: &PartialSettings, path: P) -> Result<()> {
    let path = path.as_ref();
    let invalid = |message: String| Err(ModulithError::config_error(format!("{} in config file: {}", message, path.display())));

    if let Some(model_path) = &settings.model_path {
        if model_path.as_os_str().is_empty() {
            return invalid("Invalid empty model_path".to_string());
        }
    }

    for (key, value) in [("root", &settings.root), ("root_package", &settings.root_package)] {
        if matches!(value, Some(v) if v.trim().is_empty()) {
            return invalid(format!("Invalid empty {}", key));
        }
    }

    if let Some(patterns) = &settings.exclude_patterns {
        for pattern in patterns {
            if pattern.is_empty() {
                return invalid("Empty exclude pattern".to_string());
            }

            if let Err(e) = glob::Pattern::new(pattern) {
                return invalid(format!("Invalid exclude pattern '{}' ({})", pattern, e));
            }
        }
    }

    if settings.threads == Some(0) {
        return invalid("Invalid threads 0, must be at least 1,".to_string());
    }

    if let Some(output_file) = &settings.output_file {
        if output_file.as_os_str().is_empty() {
            return invalid("Invalid empty output_file".to_string());
        }
    }

    if let Some(modules) = &settings.modules {
        for (name, module) in modules {
            for interface in module.named_interfaces.iter().flatten() {
                if interface.name.trim().is_empty() {
                    return invalid(format!("Unnamed interface of module '{}'", name));
                }
            }
        }
    }

    Ok(())
}

/// Candidate locations of the default configuration file, in lookup order
pub fn default_config_locations() -> Vec<PathBuf> {
    let mut locations = vec![PathBuf::from(DEFAULT_CONFIG_FILE)];

    if let Some(home_dir) = dirs::home_dir() {
        locations.push(home_dir.join(DEFAULT_CONFIG_FILE));
    }

    if let Some(config_dir) = dirs::config_dir() {
        locations.push(config_dir.join("modulith").join("config.toml"));
    }

    locations
}

/// Find and load configuration from default locations
pub fn find_default_config() -> Result<Option<PartialSettings>> {
    for location in default_config_locations() {
        if location.is_file() {
            return Ok(Some(parse_config_file(location)?));
        }
    }

    Ok(None)
}

/// Create a default configuration file at the specified path
pub fn create_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(ModulithError::io_error)?;
        }
    }

    fs::write(path, include_str!("default_config.toml")).map_err(ModulithError::io_error)?;

    Ok(())
}
