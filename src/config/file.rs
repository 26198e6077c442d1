//! Configuration file and environment sources

use std::path::{Path, PathBuf};

use crate::error::{ModulithError, Result};
use crate::models::config::PartialSettings;
use super::{ConfigSource, parser};

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = ".modulith.toml";

/// Configuration file source
pub struct FileConfig {
    path: PathBuf,
    name: String,
    priority: u8,
}

impl FileConfig {
    /// Create a new file configuration source with the default path
    pub fn new() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_CONFIG_FILE),
            name: "default config file".to_string(),
            priority: 10, // Overridden by environment variables and CLI
        }
    }

    /// Create a new file configuration source with a custom path
    pub fn with_path<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            name: format!("config file ({})", path.as_ref().display()),
            priority: 10,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create a default configuration file at this location
    pub fn create_default(&self) -> Result<()> {
        parser::create_default_config(&self.path)
    }
}

impl ConfigSource for FileConfig {
    fn load(&self) -> Result<PartialSettings> {
        if !self.is_available() {
            return Err(ModulithError::ConfigNotFound {
                path: self.path.clone(),
            });
        }

        parser::parse_config_file(&self.path)
    }

    fn is_available(&self) -> bool {
        self.path.is_file()
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> u8 {
        self.priority
    }
}

impl Default for FileConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Variables read by [`EnvConfig`], without the prefix
const ENV_KEYS: [&str; 5] = ["MODEL", "ROOT", "ROOT_PACKAGE", "OUTPUT_FORMAT", "EXCLUDE"];

/// Environment variable configuration source
pub struct EnvConfig {
    prefix: String,
    name: String,
    priority: u8,
}

impl EnvConfig {
    /// Create a new environment variable configuration source
    pub fn new(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        Self {
            name: format!("{} environment variables", &prefix),
            prefix,
            priority: 20, // Overrides the config file, overridden by CLI
        }
    }

    fn var(&self, key: &str) -> Option<String> {
        std::env::var(format!("{}_{}", self.prefix, key))
            .ok()
            .filter(|value| !value.trim().is_empty())
    }
}

impl ConfigSource for EnvConfig {
    fn load(&self) -> Result<PartialSettings> {
        let mut settings = PartialSettings::default();

        if let Some(path) = self.var("MODEL") {
            settings.model_path = Some(PathBuf::from(path));
        }

        if let Some(root) = self.var("ROOT") {
            settings.root = Some(root);
        }

        if let Some(root_package) = self.var("ROOT_PACKAGE") {
            settings.root_package = Some(root_package);
        }

        if let Some(format) = self.var("OUTPUT_FORMAT") {
            let output_format = format
                .parse()
                .map_err(|message: String| ModulithError::config_error(format!("{}_OUTPUT_FORMAT: {}", self.prefix, message)))?;
            settings.output_format = Some(output_format);
        }

        if let Some(exclude) = self.var("EXCLUDE") {
            settings.exclude_patterns = Some(
                exclude
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
            );
        }

        Ok(settings)
    }

    fn is_available(&self) -> bool {
        ENV_KEYS.iter().any(|key| self.var(key).is_some())
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> u8 {
        self.priority
    }
}
