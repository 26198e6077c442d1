//! Command-line argument configuration source

use std::path::PathBuf;

use crate::cli::args::{Args, OutputFormat as CliOutputFormat};
use crate::error::Result;
use crate::models::config::{OutputFormat, PartialSettings};
use super::ConfigSource;

/// Command-line argument configuration source
#[derive(Debug)]
pub struct CliConfig {
    args: CliArgs,
    name: String,
    priority: u8,
}

/// Command-line arguments that feed into settings
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    pub model_path: Option<PathBuf>,
    pub root: Option<String>,
    pub root_package: Option<String>,
    pub exclude: Option<Vec<String>>,
    pub output_format: Option<OutputFormat>,
    pub output_file: Option<PathBuf>,
    pub quiet: bool,
    pub verbose: bool,
    pub no_parallel: bool,
    pub threads: Option<usize>,
    pub no_fail: bool,
    pub no_colors: bool,
    pub no_progress: bool,
    pub config: Option<PathBuf>,
}

impl From<&Args> for CliArgs {
    fn from(args: &Args) -> Self {
        Self {
            model_path: args.model.clone(),
            root: args.root.clone(),
            root_package: args.root_package.clone(),
            exclude: if args.exclude.is_empty() { None } else { Some(args.exclude.clone()) },
            output_format: args.output.map(|format| match format {
                CliOutputFormat::Text => OutputFormat::Text,
                CliOutputFormat::Json => OutputFormat::Json,
                CliOutputFormat::Csv => OutputFormat::Csv,
            }),
            output_file: args.output_file.clone(),
            quiet: args.quiet,
            verbose: args.verbose,
            no_parallel: args.no_parallel,
            threads: args.threads,
            no_fail: args.no_fail,
            no_colors: args.no_colors,
            no_progress: args.no_progress,
            config: args.config.clone(),
        }
    }
}

impl CliConfig {
    /// Create a new CLI configuration source
    pub fn new(args: CliArgs) -> Self {
        Self {
            args,
            name: "command-line arguments".to_string(),
            priority: 30, // Highest priority
        }
    }

    /// Create a CLI configuration source from Args
    pub fn from_args(args: &Args) -> Self {
        Self::new(CliArgs::from(args))
    }

    /// Get the config file path if specified
    pub fn config_path(&self) -> Option<&PathBuf> {
        self.args.config.as_ref()
    }
}

impl ConfigSource for CliConfig {
    fn load(&self) -> Result<PartialSettings> {
        let mut settings = PartialSettings {
            model_path: self.args.model_path.clone(),
            root: self.args.root.clone(),
            root_package: self.args.root_package.clone(),
            exclude_patterns: self.args.exclude.clone(),
            output_format: self.args.output_format,
            output_file: self.args.output_file.clone(),
            threads: self.args.threads,
            ..Default::default()
        };

        // Flags only ever switch a default off or on
        if self.args.quiet {
            settings.quiet = Some(true);
        }
        if self.args.verbose {
            settings.verbose = Some(true);
        }
        if self.args.no_parallel {
            settings.parallel = Some(false);
        }
        if self.args.no_fail {
            settings.fail_on_violation = Some(false);
        }
        if self.args.no_colors {
            settings.use_colors = Some(false);
        }
        if self.args.no_progress {
            settings.show_progress = Some(false);
        }

        Ok(settings)
    }

    fn is_available(&self) -> bool {
        true
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> u8 {
        self.priority
    }
}
