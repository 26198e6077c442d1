//! Configuration management
//!
//! Settings are layered from defaults, a TOML file, `MODULITH_*` environment
//! variables and command-line arguments, each later source winning.

pub mod cli;
pub mod file;
pub mod parser;
pub mod settings;

use std::path::PathBuf;

use crate::error::Result;
use crate::models::config::{PartialSettings, Settings};

pub use cli::{CliArgs, CliConfig};
pub use file::{EnvConfig, FileConfig, DEFAULT_CONFIG_FILE};
pub use parser::{create_default_config, find_default_config, parse_config_content, parse_config_file};
pub use settings::SettingsValidator;

/// Prefix of the environment variables read by default
pub const ENV_PREFIX: &str = "MODULITH";

/// Trait for configuration sources
pub trait ConfigSource {
    /// Load configuration from this source
    fn load(&self) -> Result<PartialSettings>;

    /// Check if this configuration source is available
    fn is_available(&self) -> bool;

    /// Get the name of this configuration source for logging
    fn name(&self) -> &str;

    /// Get the priority of this source (higher numbers take precedence)
    fn priority(&self) -> u8 {
        10
    }
}

/// Configuration builder for merging multiple sources
pub struct ConfigBuilder {
    partial: PartialSettings,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            partial: PartialSettings::default(),
        }
    }

    /// Merge settings from a partial configuration
    pub fn merge(mut self, partial: PartialSettings) -> Self {
        self.partial.merge_from(partial);
        self
    }

    /// Load and merge settings from a configuration source
    pub fn load_from<S: ConfigSource>(self, source: &S) -> Result<Self> {
        if !source.is_available() {
            return Ok(self);
        }

        tracing::debug!(source = source.name(), priority = source.priority(), "merging configuration");
        let partial = source.load()?;
        Ok(self.merge(partial))
    }

    /// Try to load from a source, ignoring failures
    pub fn try_load_from<S: ConfigSource>(self, source: &S) -> Self {
        if !source.is_available() {
            return self;
        }

        match source.load() {
            Ok(partial) => self.merge(partial),
            Err(e) => {
                tracing::warn!(source = source.name(), error = %e, "ignoring configuration source");
                self
            }
        }
    }

    /// Add configuration from a file
    pub fn add_config_file(self, path: &std::path::Path) -> Result<Self> {
        let file_config = FileConfig::with_path(path);
        if !file_config.is_available() {
            return Err(crate::error::ModulithError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }
        self.load_from(&file_config)
    }

    /// Try to add configuration from the default config file locations
    pub fn try_add_default_config_file(self) -> Result<Self> {
        match parser::find_default_config()? {
            Some(default_config) => Ok(self.merge(default_config)),
            None => Ok(self),
        }
    }

    /// The merged settings without validation
    pub fn settings(&self) -> Settings {
        self.partial.to_settings()
    }

    /// Build the final settings with validation
    pub fn build(self) -> Result<Settings> {
        let settings = self.partial.to_settings();
        SettingsValidator::validate(&settings)?;
        Ok(settings)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Load configuration from all sources with the default environment prefix
pub fn load_config(cli_args: CliArgs) -> Result<Settings> {
    load_config_with_env_prefix(cli_args, ENV_PREFIX)
}

/// Load configuration with a custom environment variable prefix
pub fn load_config_with_env_prefix(cli_args: CliArgs, env_prefix: &str) -> Result<Settings> {
    let config_path: Option<PathBuf> = cli_args.config.clone();
    let cli_config = CliConfig::new(cli_args);

    let builder = match config_path {
        Some(path) => ConfigBuilder::new().add_config_file(&path)?,
        None => ConfigBuilder::new().try_add_default_config_file()?,
    };

    builder
        .try_load_from(&EnvConfig::new(env_prefix))
        .load_from(&cli_config)?
        .build()
}
