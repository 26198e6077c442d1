//! Command implementations

use std::path::PathBuf;
use std::sync::Arc;

use super::Args;
use crate::config::{self, CliArgs, FileConfig};
use crate::core::parallel::with_thread_pool;
use crate::core::Modules;
use crate::error::{ModulithError, Result, ResultExt};
use crate::models::config::Settings;
use crate::models::dependency::DependencyDepth;
use crate::models::type_ref::TypeRef;
use crate::output::{create_formatter, create_progress_callback, create_writer, Formatter, ProgressReporter};
use crate::parsers::ClassModelLoader;

/// Available commands
#[derive(Debug)]
pub enum Command {
    /// Verify all module dependencies
    Verify(Args),
    /// Print a summary of every module
    Describe(Args),
    /// List the dependencies of one module
    Dependencies {
        args: Args,
        module: String,
        depth: DependencyDepth,
    },
    /// Initialize a default configuration file
    Init,
}

impl Command {
    /// Create a command from parsed arguments
    pub fn from_args(args: Args) -> Self {
        if args.init {
            return Command::Init;
        }

        if args.describe {
            return Command::Describe(args);
        }

        if let Some(module) = args.dependencies.clone() {
            let depth = args.depth.into();
            return Command::Dependencies { args, module, depth };
        }

        Command::Verify(args)
    }

    /// Execute the command
    pub fn execute(&self) -> Result<()> {
        match self {
            Command::Verify(args) => {
                let settings = load_settings(args)?;
                verify(&settings)
            }
            Command::Describe(args) => {
                let settings = load_settings(args)?;
                let modules = with_modules(&settings, |modules| Ok(modules.summaries()))?;

                write_output(&settings, |formatter| formatter.format_modules(&modules))
            }
            Command::Dependencies { args, module, depth } => {
                let settings = load_settings(args)?;
                let listing = with_modules(&settings, |modules| modules.dependency_listing(module, *depth))?;

                write_output(&settings, |formatter| formatter.format_dependencies(&listing))
            }
            Command::Init => init(),
        }
    }
}

/// Merge all configuration sources for a command line
pub fn load_settings(args: &Args) -> Result<Settings> {
    let settings = config::load_config(CliArgs::from(args)).with_context(|| "Failed to load configuration")?;

    tracing::debug!(?settings, "effective settings");

    Ok(settings)
}

/// Load the class model, assemble the module graph and hand it to `f`,
/// all inside the configured thread pool
pub fn with_modules<T, F>(settings: &Settings, f: F) -> Result<T>
where
    T: Send,
    F: FnOnce(&Modules<'_>) -> Result<T> + Send,
{
    let loader = ClassModelLoader::with_exclude_patterns(&settings.exclude_patterns)?;
    let model = loader.load(&settings.model_path)?;
    let config = settings.modules_config();

    with_thread_pool(settings.parallel, settings.threads, || {
        let modules = match (&settings.root, &settings.root_package) {
            (Some(root), _) => Modules::of(&model, &TypeRef::new(root.as_str()), &config)?,
            (None, Some(root_package)) => Modules::of_package(&model, root_package, &config)?,
            (None, None) => return Err(ModulithError::config_error("No application root configured")),
        };

        f(&modules)
    })?
}

/// Verify the module graph and write the report.
///
/// Violations fail the run after the report is written, unless
/// `fail_on_violation` is off.
pub fn verify(settings: &Settings) -> Result<()> {
    let reporter = Arc::new(ProgressReporter::new(settings.show_progress, settings.quiet, settings.verbose));

    let report = with_modules(settings, |modules| {
        reporter.start(modules.len(), "Verifying modules");
        let report = modules.report_with_progress(create_progress_callback(reporter.clone()))?;
        reporter.finish(&format!(
            "Verified {} modules, {} violations",
            report.modules.len(),
            report.violations.len()
        ));
        Ok(report)
    })?;

    write_output(settings, |formatter| formatter.format(&report))?;

    if settings.fail_on_violation && !report.is_success() {
        return Err(ModulithError::Violations(report.violations));
    }

    Ok(())
}

fn write_output<F>(settings: &Settings, render: F) -> Result<()>
where
    F: FnOnce(&dyn Formatter) -> Result<String>,
{
    // No escape codes in files
    let use_colors = settings.use_colors && settings.output_file.is_none();
    let formatter = create_formatter(settings.output_format, use_colors, settings.verbose, settings.quiet);

    let content = render(formatter.as_ref())?;
    create_writer(settings.output_file.as_ref()).write(&content)
}

fn init() -> Result<()> {
    let file_config = FileConfig::new();
    let config_path: PathBuf = file_config.path().to_path_buf();

    if config_path.exists() {
        println!("Configuration file already exists at: {}", config_path.display());
        println!("To overwrite it, delete the file first and run this command again.");
        return Ok(());
    }

    file_config.create_default()?;

    println!("Created default configuration file at: {}", config_path.display());
    println!("\nEvery option is commented out; uncomment and edit what you need:");
    println!("  - model_path: class model JSON file or directory");
    println!("  - root / root_package: the application root");
    println!("  - [modules.<name>]: display names and named interfaces per module");

    Ok(())
}
